//! Publishing strategies.
//!
//! Each strategy is a template for a runtime state machine living in the
//! generated code. The engine never runs it.

mod batch;
mod conditional;
mod immediate;
mod scheduled;

pub use batch::ChunkPlan;

use super::FlowContext;
use hypergraph_core::Strategy;

/// Source fragments one publishing strategy contributes to a flow.
///
/// React methods produce code inside the component body; manager methods
/// produce class members. Each method returns the complete fragment for its
/// slot, honoring the validation and preview toggles of the context.
pub trait FlowStrategy: Send + Sync {
    /// The strategy this implementation renders.
    fn kind(&self) -> Strategy;

    /// React hooks imported by the component.
    fn react_hooks(&self) -> &'static str {
        "useState, useCallback"
    }

    /// Form and helper components referenced by the strategy's UI block.
    fn react_components(&self, ctx: &FlowContext) -> Vec<String>;

    /// Extra `useState` declarations.
    fn react_state(&self, ctx: &FlowContext) -> String;

    /// Callbacks implementing the flow.
    fn react_logic(&self, ctx: &FlowContext) -> String;

    /// Strategy-specific part of the rendered JSX.
    fn react_ui(&self, ctx: &FlowContext) -> String;

    /// Manager fields: typed declarations, or constructor assignments for
    /// plain JavaScript.
    fn manager_fields(&self, ctx: &FlowContext) -> String;

    /// Manager methods implementing the flow.
    fn manager_methods(&self, ctx: &FlowContext) -> String;

    /// Calls shown in the manager usage example.
    fn usage(&self, ctx: &FlowContext) -> String;

    /// Trailing notes appended after the flow.
    fn notes(&self, _ctx: &FlowContext) -> String {
        String::new()
    }
}

/// Returns the implementation for a strategy.
#[must_use]
pub fn for_strategy(strategy: Strategy) -> &'static dyn FlowStrategy {
    match strategy {
        Strategy::Immediate => &immediate::Immediate,
        Strategy::Batch => &batch::Batch,
        Strategy::Scheduled => &scheduled::Scheduled,
        Strategy::Conditional => &conditional::Conditional,
    }
}

/// `catch` block updating React state to `error`.
fn react_catch(label: &str) -> String {
    format!(
        "    }} catch (error) {{\n      console.error('{label} failed:', error);\n      setPublishingState(prev => ({{\n        ...prev,\n        status: 'error',\n        error: error.message\n      }}));\n    }}\n"
    )
}

/// `catch` block updating manager state to `error` and rethrowing.
fn manager_catch(ctx: &FlowContext) -> String {
    format!(
        "    }} catch (error) {{\n      this.updateState({{\n        status: 'error',\n        error: {}\n      }});\n      throw error;\n    }}\n",
        ctx.error_message()
    )
}

/// Usage call wrapped for the flavor: awaited inside `try` for TypeScript,
/// a promise chain for plain JavaScript.
fn usage_call(ctx: &FlowContext, setup: &str, call: &str, label: &str) -> String {
    if ctx.typed {
        format!(
            "// Publish data\ntry {{\n{}  await {call};\n  console.log('{label} successfully!');\n}} catch (error) {{\n  console.error('Publishing failed:', error);\n}}\n",
            setup
                .lines()
                .map(|line| format!("  {line}\n"))
                .collect::<String>()
        )
    } else {
        format!(
            "// Publish data\n{setup}{call}\n  .then(() => console.log('{label} successfully!'))\n  .catch(error => console.error('Publishing failed:', error));\n"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(typed: bool) -> FlowContext {
        FlowContext {
            entity: "Event".to_string(),
            var: "event".to_string(),
            css_class: "event-publishing".to_string(),
            typed,
            validated: true,
            preview: true,
            batch_size: 10,
            queue_length: None,
        }
    }

    #[test]
    fn test_for_strategy_matches_kind() {
        for strategy in Strategy::ALL {
            assert_eq!(for_strategy(*strategy).kind(), *strategy);
        }
    }

    #[test]
    fn test_usage_call_flavors() {
        let typed = usage_call(&ctx(true), "", "manager.publish(x)", "Published");
        assert!(typed.contains("  await manager.publish(x);\n"));

        let plain = usage_call(&ctx(false), "", "manager.publish(x)", "Published");
        assert!(plain.contains("manager.publish(x)\n  .then("));
    }

    #[test]
    fn test_manager_catch_message() {
        assert!(manager_catch(&ctx(true)).contains("error instanceof Error"));
        assert!(manager_catch(&ctx(false)).contains("error: error.message"));
    }
}
