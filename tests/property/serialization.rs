//! Property-based serialization round-trip tests.
//!
//! Uses proptest to verify:
//! 1. Any valid `Task` survives encode → decode round-trip.
//! 2. Random input never causes a panic in `decode` (returns `Err` gracefully).
//! 3. The wire shape keeps its camelCase field names for any task.

use proptest::prelude::*;
use termtodo_proto::task::{Task, TaskId, Timestamp, decode, encode};
use uuid::Uuid;

// --- Arbitrary implementations for protocol types ---

/// Strategy for generating arbitrary `TaskId` values.
fn arb_task_id() -> impl Strategy<Value = TaskId> {
    any::<u128>().prop_map(|n| TaskId::from_uuid(Uuid::from_u128(n)))
}

/// Strategy for generating arbitrary `Timestamp` values.
fn arb_timestamp() -> impl Strategy<Value = Timestamp> {
    any::<u64>().prop_map(Timestamp::from_millis)
}

/// Strategy for generating arbitrary `Task` values.
/// Uses non-empty text without NUL bytes, matching validated tasks.
fn arb_task() -> impl Strategy<Value = Task> {
    (arb_task_id(), "[^\x00]{1,256}", any::<bool>(), arb_timestamp()).prop_map(
        |(id, text, completed, created_at)| Task {
            id,
            text,
            completed,
            created_at,
        },
    )
}

proptest! {
    #[test]
    fn task_round_trips_through_json(task in arb_task()) {
        let encoded = encode(&task).expect("encode");
        let decoded = decode(&encoded).expect("decode");
        prop_assert_eq!(decoded, task);
    }

    #[test]
    fn decode_never_panics_on_arbitrary_input(input in ".*") {
        // Must return Ok or Err, never panic.
        let _ = decode(&input);
    }

    #[test]
    fn wire_shape_uses_camel_case_fields(task in arb_task()) {
        let encoded = encode(&task).expect("encode");
        let value: serde_json::Value = serde_json::from_str(&encoded).expect("valid json");
        let object = value.as_object().expect("object");
        prop_assert!(object.contains_key("id"));
        prop_assert!(object.contains_key("text"));
        prop_assert!(object.contains_key("completed"));
        prop_assert!(object.contains_key("createdAt"));
        prop_assert_eq!(object.len(), 4);
    }
}
