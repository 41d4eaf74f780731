//! Persisted counter state.

use serde::{Deserialize, Serialize};

/// Durable state of one sequence counter.
///
/// `current_value` is the next value to hand out; `version` is bumped on
/// every write so external tooling can spot lost updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterState {
    /// Counter namespace (e.g. `invoices`).
    pub context: String,

    /// Next value to be returned.
    pub current_value: i64,

    /// Write counter.
    pub version: u64,

    /// Last update timestamp (milliseconds since epoch).
    pub updated_at: i64,
}

impl CounterState {
    /// Create the initial state for a context.
    #[must_use]
    pub fn new(context: String, start: i64) -> Self {
        Self {
            context,
            current_value: start,
            version: 0,
            updated_at: chrono::Utc::now().timestamp_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = CounterState::new("invoices".to_string(), 1000);
        assert_eq!(state.context, "invoices");
        assert_eq!(state.current_value, 1000);
        assert_eq!(state.version, 0);
        assert!(state.updated_at > 0);
    }

    #[test]
    fn test_state_roundtrip() {
        let state = CounterState::new("orders".to_string(), 1);
        let json = serde_json::to_string(&state).unwrap();
        let back: CounterState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.context, "orders");
        assert_eq!(back.current_value, 1);
    }
}
