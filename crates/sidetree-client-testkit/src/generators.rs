//! Proptest generators for property-based testing.

use proptest::prelude::*;
use serde_json::Value;

use sidetree_client_core::{CreateOperation, Delta, Patch, SuffixData};

/// Largest integer magnitude that survives the trip through an `f64`.
const MAX_SAFE_INTEGER: i64 = (1 << 53) - 1;

/// Generate a commitment-like string.
pub fn commitment() -> impl Strategy<Value = String> {
    "Ei[A-Za-z0-9_-]{10,43}".prop_map(String::from)
}

/// Generate an object key, including non-ASCII ones.
pub fn key() -> impl Strategy<Value = String> {
    "\\PC{1,8}".prop_map(String::from)
}

/// Generate a JSON scalar.
///
/// Numbers are integers small enough that canonical encoding reproduces
/// them exactly.
pub fn json_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-MAX_SAFE_INTEGER..=MAX_SAFE_INTEGER).prop_map(Value::from),
        ".{0,16}".prop_map(Value::String),
    ]
}

/// Generate a nested JSON value.
pub fn json_value() -> impl Strategy<Value = Value> {
    json_leaf().prop_recursive(3, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map(key(), inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

/// Generate a patch with an `action` and arbitrary other members.
pub fn patch() -> impl Strategy<Value = Patch> {
    (
        "[a-z]{3,8}(-[a-z]{3,8})?",
        prop::collection::btree_map(key(), json_value(), 0..3),
    )
        .prop_map(|(action, members)| {
            let mut patch: Patch = members.into_iter().collect();
            patch.insert("action".to_string(), Value::String(action));
            patch
        })
}

/// Generate a delta.
pub fn delta() -> impl Strategy<Value = Delta> {
    (prop::collection::vec(patch(), 0..4), commitment())
        .prop_map(|(patches, update)| Delta::new(patches, update))
}

/// Parameters for generating a create operation.
///
/// The suffix data always commits to the delta through `deltaHash`.
#[derive(Debug, Clone)]
pub struct CreateParams {
    pub delta: Delta,
    pub recovery_commitment: String,
    pub r#type: Option<String>,
    pub anchor_origin: Option<String>,
    pub method: String,
}

impl Arbitrary for CreateParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            delta(),
            commitment(),
            proptest::option::of("[a-z]{1,12}"),
            proptest::option::of("https://[a-z]{1,12}\\.example"),
            "[a-z]{2,8}(:[a-z]{2,8})?",
        )
            .prop_map(|(delta, recovery, ty, origin, method)| CreateParams {
                delta,
                recovery_commitment: recovery,
                r#type: ty,
                anchor_origin: origin,
                method,
            })
            .boxed()
    }
}

/// Generate a create operation from parameters.
pub fn create_from_params(params: &CreateParams) -> CreateOperation {
    let delta_hash = params.delta.hash().expect("generated delta encodes");
    let mut suffix_data = SuffixData::new(delta_hash, params.recovery_commitment.clone());
    if let Some(ty) = &params.r#type {
        suffix_data = suffix_data.with_type(ty.clone());
    }
    if let Some(origin) = &params.anchor_origin {
        suffix_data = suffix_data.with_anchor_origin(origin.clone());
    }
    CreateOperation::new(suffix_data, params.delta.clone())
}
