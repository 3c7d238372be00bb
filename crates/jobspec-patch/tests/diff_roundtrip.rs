use jobspec_patch::{apply_patch, diff, PatchOperation};
use proptest::prelude::*;
use serde_json::{Map, Value};

fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z~/]{0,6}".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map("[a-c~/]{0,3}", inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect::<Map<String, Value>>())),
        ]
    })
}

proptest! {
    #[test]
    fn applying_diff_reproduces_destination(src in json_value(), dst in json_value()) {
        let patch = diff(&src, &dst);
        let out = apply_patch(&src, &patch).expect("diff output must apply");
        prop_assert_eq!(out, dst);
    }

    #[test]
    fn diff_of_equal_values_is_empty(value in json_value()) {
        prop_assert!(diff(&value, &value.clone()).is_empty());
    }

    #[test]
    fn diff_never_emits_move_copy_or_test(src in json_value(), dst in json_value()) {
        for op in diff(&src, &dst) {
            let allowed = matches!(
                op,
                PatchOperation::Add { .. } | PatchOperation::Remove { .. } | PatchOperation::Replace { .. }
            );
            prop_assert!(allowed, "unexpected op {}", op.op_name());
        }
    }
}
