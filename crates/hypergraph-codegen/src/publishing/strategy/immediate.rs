//! Immediate publishing: `idle → preparing → publishing → success | error`.
//!
//! Validation runs while preparing and throws on failure. The preview is
//! generated before publishing starts. There is no retry.

use super::{FlowContext, FlowStrategy, manager_catch, react_catch, usage_call};
use hypergraph_core::Strategy;

#[derive(Debug)]
pub(super) struct Immediate;

impl FlowStrategy for Immediate {
    fn kind(&self) -> Strategy {
        Strategy::Immediate
    }

    fn react_components(&self, ctx: &FlowContext) -> Vec<String> {
        let mut components = vec![format!("{}Form", ctx.entity)];
        if ctx.validated {
            components.push("ValidationResults".to_string());
        }
        components
    }

    fn react_state(&self, _ctx: &FlowContext) -> String {
        String::new()
    }

    fn react_logic(&self, ctx: &FlowContext) -> String {
        let entity = &ctx.entity;
        let validation = if ctx.validated {
            "      // Validate data before publishing\n      const validation = await validateData(data);\n      setValidationResults(validation);\n      if (!validation.isValid) {\n        throw new Error(`Validation failed: ${validation.errors.join(', ')}`);\n      }\n\n"
        } else {
            ""
        };
        let preview = if ctx.preview {
            "      // Generate preview\n      const preview = await generatePreview(data);\n      setPreviewData(preview);\n\n"
        } else {
            ""
        };
        let deps: Vec<&str> = [
            ctx.validated.then_some("validateData"),
            ctx.preview.then_some("generatePreview"),
        ]
        .into_iter()
        .flatten()
        .collect();

        format!(
            "  const publish{entity} = useCallback(async (data) => {{\n    try {{\n      setPublishingState(prev => ({{\n        ...prev,\n        status: 'preparing',\n        error: null\n      }}));\n\n{validation}{preview}      setPublishingState(prev => ({{ ...prev, status: 'publishing' }}));\n\n      // Prepare operations for publishing\n      const ops = preparePublish({entity}, data, mapping);\n\n      // Publish to Knowledge Graph\n      await publishOps(ops);\n\n      setPublishingState(prev => ({{\n        ...prev,\n        status: 'success',\n        publishedCount: prev.publishedCount + 1\n      }}));\n\n      console.log('{entity} published successfully!');\n{}  }}, [{}]);\n\n",
            react_catch("Publishing"),
            deps.join(", ")
        )
    }

    fn react_ui(&self, ctx: &FlowContext) -> String {
        let entity = &ctx.entity;
        let validation = if ctx.validated {
            "        {validationResults && (\n          <ValidationResults results={validationResults} />\n        )}\n"
        } else {
            ""
        };
        let preview = if ctx.preview {
            "        {previewData && (\n          <button onClick={() => setShowPreview(true)}>\n            Show Preview\n          </button>\n        )}\n"
        } else {
            ""
        };
        format!(
            "      <div className=\"immediate-publishing\">\n        <h3>Publish {entity} Immediately</h3>\n        <{entity}Form onSubmit={{publish{entity}}} />\n{validation}{preview}      </div>\n\n"
        )
    }

    fn manager_fields(&self, _ctx: &FlowContext) -> String {
        String::new()
    }

    fn manager_methods(&self, ctx: &FlowContext) -> String {
        let signature = ctx.pick(
            "  async publishImmediate(data: any): Promise<void> {",
            "  async publishImmediate(data) {",
        );
        let validation = if ctx.validated {
            "      // Validate data\n      const validation = await this.validateData(data);\n      if (!validation.isValid) {\n        throw new Error(`Validation failed: ${validation.errors.join(', ')}`);\n      }\n\n"
        } else {
            ""
        };
        let preview = if ctx.preview {
            "      // Generate preview\n      await this.generatePreview(data);\n\n"
        } else {
            ""
        };
        format!(
            "{signature}\n    try {{\n      this.updateState({{ status: 'preparing', error: null }});\n\n{validation}{preview}      this.updateState({{ status: 'publishing' }});\n\n      // Prepare and publish\n      const ops = preparePublish({}, data, mapping);\n      await publishOps(ops);\n\n      this.updateState({{\n        status: 'success',\n        publishedCount: this.state.publishedCount + 1\n      }});\n{}  }}\n\n",
            ctx.entity,
            manager_catch(ctx)
        )
    }

    fn usage(&self, ctx: &FlowContext) -> String {
        usage_call(
            ctx,
            "",
            &format!("publishingManager.publishImmediate({}Data)", ctx.var),
            "Published",
        )
    }
}
