//! Conditional publishing behind an approval gate.
//!
//! Conditions are evaluated first: business hours (overridable), the daily
//! quota and validation (both blocking). A blocking condition rejects the
//! request with an explanatory error. Overridable conditions send the item to
//! the approval queue when moderation is required; once `minimumApprovals`
//! approvals arrive it is published and the daily count goes up. A request
//! with no conditions publishes right away.

use super::{FlowContext, FlowStrategy, manager_catch, usage_call};
use hypergraph_core::Strategy;

const MINIMUM_APPROVALS: u32 = 1;
const BUSINESS_HOURS: (u32, u32) = (9, 17);
const MAX_DAILY_PUBLICATIONS: u32 = 10;

#[derive(Debug)]
pub(super) struct Conditional;

fn validation_condition(call: &str) -> String {
    format!(
        "    // Content validation\n    const validation = await {call}(data);\n    if (!validation.isValid) {{\n      conditions.push({{\n        type: 'validation',\n        message: `Validation errors: ${{validation.errors.join(', ')}}`,\n        canOverride: false\n      }});\n    }}\n\n"
    )
}

/// Business hours and daily quota checks, shared by both shells.
fn base_conditions(settings: &str, count: &str) -> String {
    format!(
        "    // Check business hours\n    const currentHour = new Date().getHours();\n    if (currentHour < {settings}.allowedHours.start ||\n        currentHour >= {settings}.allowedHours.end) {{\n      conditions.push({{\n        type: 'business_hours',\n        message: 'Publishing outside business hours',\n        canOverride: true\n      }});\n    }}\n\n    // Check daily limit\n    if ({count} >= {settings}.maxDailyPublications) {{\n      conditions.push({{\n        type: 'daily_limit',\n        message: 'Daily publication limit reached',\n        canOverride: false\n      }});\n    }}\n\n"
    )
}

impl FlowStrategy for Conditional {
    fn kind(&self) -> Strategy {
        Strategy::Conditional
    }

    fn react_components(&self, ctx: &FlowContext) -> Vec<String> {
        vec![format!("{}ConditionalForm", ctx.entity)]
    }

    fn react_state(&self, _ctx: &FlowContext) -> String {
        let (start, end) = BUSINESS_HOURS;
        format!(
            "  const [publishingConditions] = useState({{\n    minimumApprovals: {MINIMUM_APPROVALS},\n    requiresModeration: true,\n    allowedHours: {{ start: {start}, end: {end} }}, // Business hours\n    maxDailyPublications: {MAX_DAILY_PUBLICATIONS}\n  }});\n  const [pendingApprovals, setPendingApprovals] = useState([]);\n  const [dailyPublishCount, setDailyPublishCount] = useState(0);\n\n"
        )
    }

    fn react_logic(&self, ctx: &FlowContext) -> String {
        let entity = &ctx.entity;
        let validation = if ctx.validated {
            validation_condition("validateData")
        } else {
            String::new()
        };
        let preview = if ctx.preview {
            "    const preview = await generatePreview(data);\n    setPreviewData(preview);\n\n"
        } else {
            ""
        };
        let check_deps: Vec<&str> = [
            Some("publishingConditions"),
            Some("dailyPublishCount"),
            ctx.validated.then_some("validateData"),
        ]
        .into_iter()
        .flatten()
        .collect();
        let request_deps: Vec<&str> = [
            Some("checkPublishingConditions"),
            Some("publishingConditions"),
            Some("publishApprovedItem"),
            ctx.preview.then_some("generatePreview"),
        ]
        .into_iter()
        .flatten()
        .collect();

        format!(
            r"  const checkPublishingConditions = useCallback(async (data) => {{
    const conditions = [];

{conditions}{validation}    return conditions;
  }}, [{check_deps}]);

  const publishApprovedItem = useCallback(async (approvalRequest) => {{
    try {{
      setPublishingState(prev => ({{ ...prev, status: 'publishing', error: null }}));

      const ops = preparePublish({entity}, approvalRequest.data, mapping);
      await publishOps(ops);

      setPendingApprovals(prev => prev.map(request =>
        request.id === approvalRequest.id
          ? {{ ...request, status: 'published' }}
          : request
      ));

      setDailyPublishCount(prev => prev + 1);
      setPublishingState(prev => ({{
        ...prev,
        status: 'success',
        publishedCount: prev.publishedCount + 1
      }}));
    }} catch (error) {{
      console.error('Failed to publish approved item:', error);
      setPublishingState(prev => ({{ ...prev, status: 'error', error: error.message }}));
    }}
  }}, []);

  const requestPublishingApproval = useCallback(async (data) => {{
{preview}    const conditions = await checkPublishingConditions(data);
    const blockers = conditions.filter(c => !c.canOverride);

    if (blockers.length > 0) {{
      const message = `Cannot publish: ${{blockers.map(b => b.message).join(', ')}}`;
      setPublishingState(prev => ({{ ...prev, status: 'error', error: message }}));
      throw new Error(message);
    }}

    if (conditions.length > 0 && publishingConditions.requiresModeration) {{
      // Add to approval queue
      const approvalRequest = {{
        id: Date.now() + Math.random(),
        data,
        conditions,
        requestedAt: new Date(),
        status: 'pending',
        approvals: []
      }};
      setPendingApprovals(prev => [...prev, approvalRequest]);
      return {{ requiresApproval: true, requestId: approvalRequest.id }};
    }}

    // No conditions: publish right away
    await publishApprovedItem({{ id: null, data }});
    return {{ requiresApproval: false }};
  }}, [{request_deps}]);

  const approvePublication = useCallback((requestId, approverId) => {{
    setPendingApprovals(prev => prev.map(request => {{
      if (request.id !== requestId || request.status !== 'pending') {{
        return request;
      }}

      const approvals = [...request.approvals, {{ approverId, approvedAt: new Date() }}];
      const updatedRequest = {{ ...request, approvals }};

      if (approvals.length >= publishingConditions.minimumApprovals) {{
        updatedRequest.status = 'approved';
        // Quorum reached
        setTimeout(() => publishApprovedItem(updatedRequest), 100);
      }}

      return updatedRequest;
    }}));
  }}, [publishingConditions, publishApprovedItem]);

",
            conditions = base_conditions("publishingConditions", "dailyPublishCount"),
            check_deps = check_deps.join(", "),
            request_deps = request_deps.join(", "),
        )
    }

    fn react_ui(&self, ctx: &FlowContext) -> String {
        format!(
            r#"      <div className="conditional-publishing">
        <h3>Conditional Publishing</h3>
        <{entity}ConditionalForm onSubmit={{requestPublishingApproval}} />
        <p>Published today: {{dailyPublishCount}}/{{publishingConditions.maxDailyPublications}}</p>

        <div className="pending-approvals">
          <h4>Pending Approvals:</h4>
          {{pendingApprovals.map((request) => (
            <div key={{request.id}} className="approval-request">
              <span>{{request.data.name || 'Untitled'}}</span>
              <span>Status: {{request.status}}</span>
              <span>Approvals: {{request.approvals.length}}/{{publishingConditions.minimumApprovals}}</span>
              {{request.status === 'pending' && (
                <button onClick={{() => approvePublication(request.id, 'current-user')}}>
                  Approve
                </button>
              )}}
            </div>
          ))}}
        </div>
      </div>

"#,
            entity = ctx.entity
        )
    }

    fn manager_fields(&self, ctx: &FlowContext) -> String {
        let (start, end) = BUSINESS_HOURS;
        let settings = format!(
            "{{\n    minimumApprovals: {MINIMUM_APPROVALS},\n    requiresModeration: true,\n    allowedHours: {{ start: {start}, end: {end} }},\n    maxDailyPublications: {MAX_DAILY_PUBLICATIONS}\n  }}"
        );
        if ctx.typed {
            format!(
                "  private publishingConditions = {settings};\n  private pendingApprovals: Array<{{ id: number; data: any; conditions: any[]; requestedAt: Date; status: 'pending' | 'approved' | 'published'; approvals: Array<{{ approverId: string; approvedAt: Date }}> }}> = [];\n  private dailyPublishCount = 0;\n"
            )
        } else {
            format!(
                "    this.publishingConditions = {};\n    this.pendingApprovals = [];\n    this.dailyPublishCount = 0;\n",
                settings.replace('\n', "\n  ")
            )
        }
    }

    fn manager_methods(&self, ctx: &FlowContext) -> String {
        let validation = if ctx.validated {
            validation_condition("this.validateData")
        } else {
            String::new()
        };
        let preview = if ctx.preview {
            "    await this.generatePreview(data);\n"
        } else {
            ""
        };

        format!(
            r"{check}
    const conditions{conditions_type} = [];

{conditions}{validation}    return conditions;
  }}

{request}
{preview}    const conditions = await this.checkPublishingConditions(data);
    const blockers = conditions.filter(c => !c.canOverride);

    if (blockers.length > 0) {{
      const message = `Cannot publish: ${{blockers.map(b => b.message).join(', ')}}`;
      this.updateState({{ status: 'error', error: message }});
      throw new Error(message);
    }}

    if (conditions.length > 0 && this.publishingConditions.requiresModeration) {{
      const id = Date.now() + Math.random();
      this.pendingApprovals.push({{
        id,
        data,
        conditions,
        requestedAt: new Date(),
        status: 'pending',
        approvals: []
      }});
      return {{ requiresApproval: true, requestId: id }};
    }}

    await this.publishApprovedItem(data);
    return {{ requiresApproval: false }};
  }}

{approve}
    const request = this.pendingApprovals.find(r => r.id === requestId);
    if (!request || request.status !== 'pending') return false;

    request.approvals.push({{ approverId, approvedAt: new Date() }});
    if (request.approvals.length < this.publishingConditions.minimumApprovals) {{
      return false;
    }}

    request.status = 'approved';
    await this.publishApprovedItem(request.data);
    request.status = 'published';
    return true;
  }}

{publish}
    try {{
      this.updateState({{ status: 'publishing', error: null }});

      const ops = preparePublish({entity}, data, mapping);
      await publishOps(ops);

      this.dailyPublishCount += 1;
      this.updateState({{
        status: 'success',
        publishedCount: this.state.publishedCount + 1
      }});
{catch}  }}

  getPendingApprovals() {{
    return this.pendingApprovals.filter(r => r.status === 'pending');
  }}

",
            check = ctx.pick(
                "  async checkPublishingConditions(data: any): Promise<Array<{ type: string; message: string; canOverride: boolean }>> {",
                "  async checkPublishingConditions(data) {"
            ),
            conditions_type = ctx.pick(
                ": Array<{ type: string; message: string; canOverride: boolean }>",
                ""
            ),
            conditions = base_conditions("this.publishingConditions", "this.dailyPublishCount"),
            request = ctx.pick(
                "  async requestPublishingApproval(data: any): Promise<{ requiresApproval: boolean; requestId?: number }> {",
                "  async requestPublishingApproval(data) {"
            ),
            approve = ctx.pick(
                "  async approvePublication(requestId: number, approverId: string): Promise<boolean> {",
                "  async approvePublication(requestId, approverId) {"
            ),
            publish = ctx.pick(
                "  private async publishApprovedItem(data: any): Promise<void> {",
                "  async publishApprovedItem(data) {"
            ),
            entity = ctx.entity,
            catch = manager_catch(ctx),
        )
    }

    fn usage(&self, ctx: &FlowContext) -> String {
        usage_call(
            ctx,
            "",
            &format!(
                "publishingManager.requestPublishingApproval({}Data)",
                ctx.var
            ),
            "Submitted",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(typed: bool, validated: bool, preview: bool) -> FlowContext {
        FlowContext {
            entity: "Article".to_string(),
            var: "article".to_string(),
            css_class: "article-publishing".to_string(),
            typed,
            validated,
            preview,
            batch_size: 10,
            queue_length: None,
        }
    }

    #[test]
    fn test_react_state_defaults() {
        let state = Conditional.react_state(&ctx(false, true, true));
        assert!(state.contains("minimumApprovals: 1,"));
        assert!(state.contains("requiresModeration: true,"));
        assert!(state.contains("allowedHours: { start: 9, end: 17 }"));
        assert!(state.contains("maxDailyPublications: 10"));
    }

    #[test]
    fn test_react_conditions_overridability() {
        let code = Conditional.react_logic(&ctx(false, true, false));
        let hours = code.find("type: 'business_hours'").unwrap();
        let limit = code.find("type: 'daily_limit'").unwrap();
        let validation = code.find("type: 'validation'").unwrap();
        assert!(code[hours..limit].contains("canOverride: true"));
        assert!(code[limit..validation].contains("canOverride: false"));
        assert!(code.contains("Cannot publish: "));
        assert!(code.contains("setDailyPublishCount(prev => prev + 1);"));
    }

    #[test]
    fn test_react_publish_helper_defined_before_use() {
        let code = Conditional.react_logic(&ctx(false, false, true));
        let helper = code.find("const publishApprovedItem").unwrap();
        let request = code.find("const requestPublishingApproval").unwrap();
        let approve = code.find("const approvePublication").unwrap();
        assert!(helper < request);
        assert!(helper < approve);
        assert!(code.contains("await generatePreview(data);"));
    }

    #[test]
    fn test_react_without_validation() {
        let code = Conditional.react_logic(&ctx(false, false, false));
        assert!(!code.contains("type: 'validation'"));
        assert!(code.contains("}, [publishingConditions, dailyPublishCount]);"));
    }

    #[test]
    fn test_manager_quorum_gate() {
        let code = Conditional.manager_methods(&ctx(true, true, false));
        assert!(code.contains("async approvePublication(requestId: number, approverId: string): Promise<boolean> {"));
        assert!(code.contains("request.approvals.length < this.publishingConditions.minimumApprovals"));
        assert!(code.contains("this.dailyPublishCount += 1;"));
        assert!(code.contains("this.validateData(data)"));
    }

    #[test]
    fn test_plain_manager_fields() {
        let fields = Conditional.manager_fields(&ctx(false, true, true));
        assert!(fields.starts_with("    this.publishingConditions = {\n      minimumApprovals: 1,"));
        assert!(fields.contains("    this.dailyPublishCount = 0;\n"));
    }
}
