//! Built-in listeners that command scripts can refer to by name.

use emitter::{EmitterError, Listener, ListenerTable};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// The listener table handed to scripts, plus the state its listeners share.
#[derive(Debug, Clone)]
pub struct BuiltinListeners {
    pub table: ListenerTable,
    calls: Arc<AtomicUsize>,
}

impl BuiltinListeners {
    /// `log` prints its arguments, `count` counts its calls, `fail` aborts
    /// the dispatch it is part of.
    pub fn new() -> Self {
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        let table = ListenerTable::new()
            .with("log", log_listener())
            .with(
                "count",
                Listener::infallible(move |_: &[Value]| {
                    counter.fetch_add(1, Ordering::SeqCst);
                }),
            )
            .with(
                "fail",
                Listener::new(|args: &[Value]| {
                    warn!("💥 fail listener called with {} argument(s)", args.len());
                    Err(EmitterError::listener("the fail listener always fails"))
                }),
            );

        Self { table, calls }
    }

    /// Times the `count` listener has run.
    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for BuiltinListeners {
    fn default() -> Self {
        Self::new()
    }
}

/// Listener that logs the arguments it was triggered with.
pub fn log_listener() -> Listener {
    Listener::infallible(|args: &[Value]| {
        let rendered = Value::Array(args.to_vec());
        info!("📨 The event was triggered with the following arguments: {}", rendered);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use emitter::Registry;
    use serde_json::json;

    #[test]
    fn test_builtin_names() {
        let builtins = BuiltinListeners::new();
        assert_eq!(builtins.table.names(), vec!["count", "fail", "log"]);
    }

    #[test]
    fn test_count_listener_counts() {
        let builtins = BuiltinListeners::new();
        let registry = Registry::new();
        let count = builtins.table.get("count").cloned().unwrap();

        registry.on("e", count.clone()).unwrap();
        registry.on("e", count).unwrap();
        registry.trigger("e", &[json!(1)]).unwrap();

        assert_eq!(builtins.count(), 2);
    }

    #[test_log::test]
    fn test_log_listener_accepts_any_arguments() {
        let registry = Registry::new();
        registry.on("e", log_listener()).unwrap();

        assert!(registry.trigger("e", &[json!("a"), json!({"b": [1, 2]}), Value::Null]).unwrap());
        assert!(registry.trigger("e", &[]).unwrap());
        assert_eq!(registry.listener_count("e"), 1);
    }

    #[test]
    fn test_fail_listener_fails_dispatch() {
        let builtins = BuiltinListeners::new();
        let registry = Registry::new();
        registry.on("e", builtins.table.get("fail").cloned().unwrap()).unwrap();
        registry.on("e", builtins.table.get("count").cloned().unwrap()).unwrap();

        let err = registry.trigger("e", &[]).unwrap_err();
        assert!(matches!(err, EmitterError::ListenerFailed(_)));
        assert_eq!(builtins.count(), 0);
    }
}
