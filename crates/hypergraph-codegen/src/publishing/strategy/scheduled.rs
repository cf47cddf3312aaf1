//! Scheduled publishing.
//!
//! Items carry a `publishAt` time and start as `scheduled`. A check every
//! 60 000 ms publishes due items; an item failing validation is skipped and
//! stays scheduled.

use super::{FlowContext, FlowStrategy, manager_catch, react_catch, usage_call};
use hypergraph_core::Strategy;

const CHECK_INTERVAL_MS: u32 = 60_000;

#[derive(Debug)]
pub(super) struct Scheduled;

impl FlowStrategy for Scheduled {
    fn kind(&self) -> Strategy {
        Strategy::Scheduled
    }

    fn react_hooks(&self) -> &'static str {
        "useState, useCallback, useEffect"
    }

    fn react_components(&self, ctx: &FlowContext) -> Vec<String> {
        vec![format!("{}ScheduleForm", ctx.entity)]
    }

    fn react_state(&self, _ctx: &FlowContext) -> String {
        "  const [scheduledItems, setScheduledItems] = useState([]);\n\n".to_string()
    }

    fn react_logic(&self, ctx: &FlowContext) -> String {
        let entity = &ctx.entity;
        let preview = if ctx.preview {
            "    generatePreview(data).then(setPreviewData).catch(() => {});\n"
        } else {
            ""
        };
        let validation = if ctx.validated {
            "        // Validate before publishing; invalid items stay scheduled\n        const validation = await validateData(item.data);\n        if (!validation.isValid) {\n          console.error(`Validation failed for scheduled item ${item.id}`);\n          continue;\n        }\n\n"
        } else {
            ""
        };
        let schedule_deps = if ctx.preview { "generatePreview" } else { "" };
        let process_deps: Vec<&str> = [Some("scheduledItems"), ctx.validated.then_some("validateData")]
            .into_iter()
            .flatten()
            .collect();

        format!(
            r"  const scheduleForPublishing = useCallback((data, publishAt) => {{
    const scheduledItem = {{
      id: Date.now() + Math.random(),
      data,
      publishAt,
      status: 'scheduled'
    }};
    setScheduledItems(prev => [...prev, scheduledItem]);
{preview}  }}, [{schedule_deps}]);

  const processScheduledItems = useCallback(async () => {{
    const now = new Date();
    const itemsToPublish = scheduledItems.filter(item =>
      item.status === 'scheduled' && new Date(item.publishAt) <= now
    );

    if (itemsToPublish.length === 0) return;

    try {{
      setPublishingState(prev => ({{ ...prev, status: 'publishing' }}));

      for (const item of itemsToPublish) {{
{validation}        const ops = preparePublish({entity}, item.data, mapping);
        await publishOps(ops);

        setScheduledItems(prev => prev.map(si =>
          si.id === item.id ? {{ ...si, status: 'published' }} : si
        ));

        setPublishingState(prev => ({{
          ...prev,
          publishedCount: prev.publishedCount + 1
        }}));
      }}

      setPublishingState(prev => ({{ ...prev, status: 'success' }}));
{catch}  }}, [{process_deps}]);

  // Check for due items every minute
  useEffect(() => {{
    const interval = setInterval(processScheduledItems, {CHECK_INTERVAL_MS});
    return () => clearInterval(interval);
  }}, [processScheduledItems]);

",
            catch = react_catch("Scheduled publishing"),
            process_deps = process_deps.join(", ")
        )
    }

    fn react_ui(&self, ctx: &FlowContext) -> String {
        format!(
            r#"      <div className="scheduled-publishing">
        <h3>Scheduled Publishing</h3>
        <{entity}ScheduleForm onSubmit={{scheduleForPublishing}} />

        <div className="scheduled-items">
          <h4>Scheduled Items:</h4>
          {{scheduledItems.map((item) => (
            <div key={{item.id}} className="scheduled-item">
              <span>{{item.data.name || 'Untitled'}}</span>
              <span>Publish at: {{new Date(item.publishAt).toLocaleString()}}</span>
              <span className={{`status-${{item.status}}`}}>{{item.status}}</span>
            </div>
          ))}}
        </div>
      </div>

"#,
            entity = ctx.entity
        )
    }

    fn manager_fields(&self, ctx: &FlowContext) -> String {
        if ctx.typed {
            "  private scheduledItems: Array<{ id: number; data: any; publishAt: Date; status: 'scheduled' | 'published' }> = [];\n  private schedulerHandle: ReturnType<typeof setInterval> | null = null;\n".to_string()
        } else {
            "    this.scheduledItems = [];\n    this.schedulerHandle = null;\n".to_string()
        }
    }

    fn manager_methods(&self, ctx: &FlowContext) -> String {
        let validation = if ctx.validated {
            "        const validation = await this.validateData(item.data);\n        if (!validation.isValid) {\n          console.error(`Validation failed for scheduled item ${item.id}`);\n          continue;\n        }\n\n"
        } else {
            ""
        };
        let preview = if ctx.preview {
            "    await this.generatePreview(data);\n"
        } else {
            ""
        };

        format!(
            r"{schedule}
{preview}    const id = Date.now() + Math.random();
    this.scheduledItems.push({{ id, data, publishAt: new Date(publishAt), status: 'scheduled' }});
    return id;
  }}

{process}
    const now = new Date();
    const due = this.scheduledItems.filter(item => item.status === 'scheduled' && item.publishAt <= now);
    if (due.length === 0) return;

    try {{
      this.updateState({{ status: 'publishing', error: null }});

      for (const item of due) {{
{validation}        const ops = preparePublish({entity}, item.data, mapping);
        await publishOps(ops);
        item.status = 'published';

        this.updateState({{ publishedCount: this.state.publishedCount + 1 }});
      }}

      this.updateState({{ status: 'success' }});
{catch}  }}

{start}
    this.stopScheduler();
    this.schedulerHandle = setInterval(() => {{
      this.processScheduledItems().catch(error => console.error('Scheduled publishing failed:', error));
    }}, intervalMs);
  }}

{stop}
    if (this.schedulerHandle !== null) {{
      clearInterval(this.schedulerHandle);
      this.schedulerHandle = null;
    }}
  }}

  getScheduledItems() {{
    return [...this.scheduledItems];
  }}

",
            schedule = ctx.pick(
                "  async scheduleForPublishing(data: any, publishAt: Date | string): Promise<number> {",
                "  async scheduleForPublishing(data, publishAt) {"
            ),
            process = ctx.pick(
                "  async processScheduledItems(): Promise<void> {",
                "  async processScheduledItems() {"
            ),
            start = if ctx.typed {
                format!("  startScheduler(intervalMs: number = {CHECK_INTERVAL_MS}): void {{")
            } else {
                format!("  startScheduler(intervalMs = {CHECK_INTERVAL_MS}) {{")
            },
            stop = ctx.pick("  stopScheduler(): void {", "  stopScheduler() {"),
            entity = ctx.entity,
            catch = manager_catch(ctx),
        )
    }

    fn usage(&self, ctx: &FlowContext) -> String {
        usage_call(
            ctx,
            "publishingManager.startScheduler();\n",
            &format!(
                "publishingManager.scheduleForPublishing({}Data, new Date(Date.now() + 60 * 60 * 1000))",
                ctx.var
            ),
            "Scheduled",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(typed: bool, validated: bool) -> FlowContext {
        FlowContext {
            entity: "Event".to_string(),
            var: "event".to_string(),
            css_class: "event-publishing".to_string(),
            typed,
            validated,
            preview: false,
            batch_size: 10,
            queue_length: None,
        }
    }

    #[test]
    fn test_react_interval_and_skip() {
        let code = Scheduled.react_logic(&ctx(false, true));
        assert!(code.contains("setInterval(processScheduledItems, 60000)"));
        assert!(code.contains("continue;"));
        assert!(code.contains("status: 'scheduled'"));
        assert!(code.contains("{ ...si, status: 'published' }"));
    }

    #[test]
    fn test_react_without_validation_never_skips() {
        let code = Scheduled.react_logic(&ctx(false, false));
        assert!(!code.contains("continue;"));
        assert!(code.contains("}, [scheduledItems]);"));
    }

    #[test]
    fn test_manager_scheduler_methods() {
        let code = Scheduled.manager_methods(&ctx(true, true));
        assert!(code.contains("startScheduler(intervalMs: number = 60000): void {"));
        assert!(code.contains("stopScheduler(): void {"));
        assert!(code.contains("item.status = 'published';"));
    }

    #[test]
    fn test_uses_effect_hook() {
        assert!(Scheduled.react_hooks().contains("useEffect"));
    }
}
