//! Conversion between JSON claims and DynamoDB attribute values.
//!
//! Claims are stored attribute-per-claim so the table stays readable from
//! the console. Numbers travel as their decimal string (`N`) and come back
//! as JSON numbers; sets written by other tools (`SS`, `NS`) read back as
//! arrays.

use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{Map, Number, Value};
use signet_identity::UserClaims;
use std::collections::HashMap;

use crate::error::StoreError;

/// A DynamoDB item.
pub type Item = HashMap<String, AttributeValue>;

/// Converts a JSON value to a DynamoDB attribute value.
#[must_use]
pub fn json_to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Array(items) => AttributeValue::L(items.iter().map(json_to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(
            map.iter()
                .map(|(k, v)| (k.clone(), json_to_attribute(v)))
                .collect(),
        ),
    }
}

/// Converts a DynamoDB attribute value back to JSON.
///
/// Binary attributes are never written by this crate and read back as `null`.
#[must_use]
pub fn attribute_to_json(value: &AttributeValue) -> Value {
    match value {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => number_to_json(n),
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::L(list) => Value::Array(list.iter().map(attribute_to_json).collect()),
        AttributeValue::M(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), attribute_to_json(v)))
                .collect(),
        ),
        AttributeValue::Ss(ss) => Value::Array(ss.iter().cloned().map(Value::String).collect()),
        AttributeValue::Ns(ns) => Value::Array(ns.iter().map(|n| number_to_json(n)).collect()),
        _ => Value::Null,
    }
}

fn number_to_json(n: &str) -> Value {
    n.parse::<Number>()
        .map(Value::Number)
        .unwrap_or_else(|_| Value::String(n.to_string()))
}

/// Converts user claims to a DynamoDB item, one attribute per claim.
#[must_use]
pub fn claims_to_item(claims: &UserClaims) -> Item {
    claims
        .as_map()
        .iter()
        .map(|(k, v)| (k.clone(), json_to_attribute(v)))
        .collect()
}

/// Reads a DynamoDB item back as user claims.
///
/// # Errors
///
/// Returns `StoreError::InvalidRecord` if the item has no usable `sub`.
pub fn item_to_claims(item: &Item) -> Result<UserClaims, StoreError> {
    let map: Map<String, Value> = item
        .iter()
        .map(|(k, v)| (k.clone(), attribute_to_json(v)))
        .collect();

    UserClaims::try_from(map).map_err(|e| StoreError::InvalidRecord {
        details: e.to_string(),
    })
}
