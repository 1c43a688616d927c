//! After-hook for JSON parser construction call sites.

use std::sync::Arc;

use super::{CallContext, CallResult, CallSiteAdvice, PropagationModule};

/// Fires after a parser-factory call: if the produced parser came from a
/// tainted input, the parser itself is marked tainted. The original return
/// value is always handed back untouched, whether or not the module is
/// present or succeeds.
pub struct JsonParseAdvice {
    propagation: Option<Arc<dyn PropagationModule>>,
}

impl JsonParseAdvice {
    pub fn new(propagation: Option<Arc<dyn PropagationModule>>) -> Self {
        Self { propagation }
    }
}

impl CallSiteAdvice for JsonParseAdvice {
    fn after(&self, ctx: &CallContext<'_>, result: CallResult) -> CallResult {
        let Some(module) = &self.propagation else {
            return result;
        };
        if let (CallResult::Return(parser), Some(input)) = (&result, ctx.arguments.first()) {
            if let Err(error) = module.taint_if_input_tainted(parser, input) {
                module.on_unexpected_error("after_create_parser", &error);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingModule {
        taints: Mutex<Vec<(Value, Value)>>,
        errors: Mutex<Vec<String>>,
        fail: bool,
    }

    impl PropagationModule for RecordingModule {
        fn taint_if_input_tainted(&self, target: &Value, source: &Value) -> anyhow::Result<()> {
            if self.fail {
                return Err(anyhow!("taint engine unavailable"));
            }
            self.taints
                .lock()
                .unwrap()
                .push((target.clone(), source.clone()));
            Ok(())
        }

        fn on_unexpected_error(&self, operation: &str, error: &anyhow::Error) {
            self.errors
                .lock()
                .unwrap()
                .push(format!("{operation}: {error}"));
        }
    }

    fn ctx<'a>(receiver: &'a Value, args: &'a [Value]) -> CallContext<'a> {
        CallContext {
            receiver,
            arguments: args,
        }
    }

    #[test]
    fn test_forwards_parser_and_input_to_module() {
        let module = Arc::new(RecordingModule::default());
        let advice = JsonParseAdvice::new(Some(module.clone()));

        let receiver = json!({"factory": true});
        let args = [json!("{\"user\": \"input\"}")];
        let result = advice.after(
            &ctx(&receiver, &args),
            CallResult::Return(json!({"parser": 1})),
        );

        assert_eq!(result, CallResult::Return(json!({"parser": 1})));
        let taints = module.taints.lock().unwrap();
        assert_eq!(taints.len(), 1);
        assert_eq!(taints[0].1, json!("{\"user\": \"input\"}"));
    }

    #[test]
    fn test_module_failure_is_contained() {
        let module = Arc::new(RecordingModule {
            fail: true,
            ..Default::default()
        });
        let advice = JsonParseAdvice::new(Some(module.clone()));

        let receiver = json!(null);
        let args = [json!("input")];
        let result = advice.after(&ctx(&receiver, &args), CallResult::Return(json!("parser")));

        // Original value returned despite the module fault.
        assert_eq!(result, CallResult::Return(json!("parser")));
        assert_eq!(module.errors.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_module_disables_the_feature() {
        let advice = JsonParseAdvice::new(None);
        let receiver = json!(null);
        let args = [json!("input")];
        let result = advice.after(&ctx(&receiver, &args), CallResult::Return(json!("parser")));
        assert_eq!(result, CallResult::Return(json!("parser")));
    }

    #[test]
    fn test_failed_call_is_not_forwarded() {
        let module = Arc::new(RecordingModule::default());
        let advice = JsonParseAdvice::new(Some(module.clone()));

        let receiver = json!(null);
        let args = [json!("input")];
        let result = advice.after(
            &ctx(&receiver, &args),
            CallResult::Failure("bad json".into()),
        );

        assert_eq!(result, CallResult::Failure("bad json".into()));
        assert!(module.taints.lock().unwrap().is_empty());
    }
}
