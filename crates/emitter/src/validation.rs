//! Validation helpers shared by the registry and the command layer

use crate::listener::Listener;
use crate::registry::Subscriptions;
use serde_json::Value;

/// Event names are non-empty strings.
pub fn is_valid_event_name(name: &str) -> bool {
    !name.is_empty()
}

/// Dynamic form of [`is_valid_event_name`]: only a non-empty JSON string
/// qualifies. Numbers, booleans, null, arrays and objects never do.
pub fn is_valid_event_name_value(value: &Value) -> bool {
    matches!(value, Value::String(name) if is_valid_event_name(name))
}

/// A listener argument is valid when it resolved to a callable.
pub fn is_valid_listener<A>(candidate: Option<&Listener<A>>) -> bool {
    candidate.is_some()
}

/// True iff `name` is a key of the mapping.
pub fn has_event<A>(name: &str, subscriptions: &Subscriptions<A>) -> bool {
    subscriptions.contains_key(name)
}

/// Number of listeners registered under `name`, or 0 when absent.
pub fn count_listeners<A>(name: &str, subscriptions: &Subscriptions<A>) -> usize {
    subscriptions
        .get(name)
        .map(|entry| entry.listeners.len())
        .unwrap_or(0)
}

/// Short rendering of a rejected value for error messages.
pub fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("{s:?}"),
        Value::Array(_) => "[array]".to_string(),
        Value::Object(_) => "{object}".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::EventEntry;
    use smallvec::smallvec;
    use serde_json::json;

    fn invalid_values() -> Vec<Value> {
        vec![
            json!([1, 2, 3, 4, 5, 6, 7, 8, 9, 0]),
            json!({"foo": "bar"}),
            json!(true),
            json!(false),
            json!(1234567890),
            Value::Null,
            json!(""),
        ]
    }

    #[test]
    fn test_event_name_must_be_non_empty() {
        assert!(is_valid_event_name("123"));
        assert!(is_valid_event_name("event_name_one"));
        assert!(!is_valid_event_name(""));
    }

    #[test]
    fn test_event_name_value_rejects_non_strings() {
        assert!(is_valid_event_name_value(&json!("123")));
        for value in invalid_values() {
            assert!(!is_valid_event_name_value(&value), "{value} accepted");
        }
    }

    #[test]
    fn test_listener_must_be_present() {
        let listener: Listener = Listener::infallible(|_| {});
        assert!(is_valid_listener(Some(&listener)));
        assert!(!is_valid_listener::<Value>(None));
    }

    #[test]
    fn test_has_event_and_count() {
        let listener: Listener = Listener::infallible(|_| {});
        let mut subscriptions: Subscriptions<Value> = Subscriptions::default();
        subscriptions.insert(
            "event_name_one".into(),
            EventEntry {
                listeners: smallvec![listener.clone(), listener],
                run_once: false,
            },
        );

        assert!(has_event("event_name_one", &subscriptions));
        assert!(!has_event("event_name_ONE", &subscriptions));
        assert_eq!(count_listeners("event_name_one", &subscriptions), 2);
        assert_eq!(count_listeners("event_name_ONE", &subscriptions), 0);
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(&Value::Null), "null");
        assert_eq!(describe(&json!(12)), "12");
        assert_eq!(describe(&json!([1])), "[array]");
        assert_eq!(describe(&json!({"a": 1})), "{object}");
        assert_eq!(describe(&json!("x")), "\"x\"");
    }
}
