//! EIP-712 typed data for Ethereum-derived hardware signing.
//!
//! Ethermint-style chains let Ledger devices sign Cosmos transactions as
//! EIP-712 structured data. The typed data is derived from the Amino sign
//! doc: struct types are generated from the JSON shape of each message,
//! and every number is coerced to a string first so the message hashes the
//! same bytes the device displays.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::amino::StdSignDoc;

/// Custom types for `TypedData`, keyed by struct name.
pub type Types = BTreeMap<String, Vec<Eip712DomainType>>;

/// One field of an EIP-712 struct type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eip712DomainType {
    pub name: String,
    #[serde(rename = "type")]
    pub r#type: String,
}

impl Eip712DomainType {
    fn new(name: impl Into<String>, r#type: impl Into<String>) -> Self {
        Self { name: name.into(), r#type: r#type.into() }
    }
}

/// The signing domain the wallet binds the signature to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eip712Domain {
    pub name: String,
    pub version: String,
    pub chain_id: String,
    pub verifying_contract: String,
    pub salt: String,
}

impl Eip712Domain {
    /// The fixed domain Ethermint web3 extensions verify against.
    pub fn web3_extension(ethereum_chain_id: u64) -> Self {
        Self {
            name: "Injective Web3".to_owned(),
            version: "1.0.0".to_owned(),
            chain_id: format!("0x{ethereum_chain_id:x}"),
            verifying_contract: "cosmos".to_owned(),
            salt: "0".to_owned(),
        }
    }
}

/// A complete typed-data payload as passed to `eth_signTypedData_v4`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TypedData {
    pub types: Types,
    #[serde(rename = "primaryType")]
    pub primary_type: String,
    pub domain: Eip712Domain,
    pub message: Value,
}

/// Failures deriving typed data from a sign doc.
#[derive(Debug, Error)]
pub enum Eip712Error {
    /// The sign doc did not serialize to a JSON object.
    #[error("sign doc is not a JSON object")]
    NotAnObject,
    /// A message field held a value with no EIP-712 representation.
    #[error("field {0} cannot be represented as typed data")]
    Unrepresentable(String),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

/// Derives the typed data a hardware device signs for `doc`.
///
/// The transaction gets an explicit timeout height so a stalled device
/// cannot release a signature for an unbounded window.
pub fn typed_data(
    doc: &StdSignDoc,
    timeout_height: u64,
    ethereum_chain_id: u64,
) -> Result<TypedData, Eip712Error> {
    let mut message = match serde_json::to_value(doc)? {
        Value::Object(map) => map,
        _ => return Err(Eip712Error::NotAnObject),
    };
    message.insert("timeout_height".to_owned(), json!(timeout_height.to_string()));
    let mut message = Value::Object(message);
    coerce_numbers(&mut message);

    let mut types = Types::new();
    types.insert(
        "EIP712Domain".to_owned(),
        vec![
            Eip712DomainType::new("name", "string"),
            Eip712DomainType::new("version", "string"),
            Eip712DomainType::new("chainId", "string"),
            Eip712DomainType::new("verifyingContract", "string"),
            Eip712DomainType::new("salt", "string"),
        ],
    );
    types.insert(
        "Tx".to_owned(),
        vec![
            Eip712DomainType::new("account_number", "string"),
            Eip712DomainType::new("chain_id", "string"),
            Eip712DomainType::new("fee", "Fee"),
            Eip712DomainType::new("memo", "string"),
            Eip712DomainType::new("msgs", "Msg[]"),
            Eip712DomainType::new("sequence", "string"),
            Eip712DomainType::new("timeout_height", "string"),
        ],
    );
    types.insert(
        "Fee".to_owned(),
        vec![
            Eip712DomainType::new("amount", "Coin[]"),
            Eip712DomainType::new("gas", "string"),
        ],
    );
    types.insert(
        "Coin".to_owned(),
        vec![
            Eip712DomainType::new("amount", "string"),
            Eip712DomainType::new("denom", "string"),
        ],
    );
    types.insert(
        "Msg".to_owned(),
        vec![
            Eip712DomainType::new("type", "string"),
            Eip712DomainType::new("value", "MsgValue"),
        ],
    );

    // Every message in the transaction must share one value shape; the
    // device renders a single MsgValue struct type.
    let msgs = message
        .get("msgs")
        .and_then(Value::as_array)
        .ok_or(Eip712Error::NotAnObject)?;
    let first = msgs
        .first()
        .and_then(|m| m.get("value"))
        .cloned()
        .unwrap_or_else(|| Value::Object(Map::new()));
    derive_struct_type("MsgValue", &first, &mut types)?;

    Ok(TypedData {
        types,
        primary_type: "Tx".to_owned(),
        domain: Eip712Domain::web3_extension(ethereum_chain_id),
        message,
    })
}

/// Registers a struct type for `value` under `name`, recursing into nested
/// objects. Nested struct names are derived from the field name.
fn derive_struct_type(name: &str, value: &Value, types: &mut Types) -> Result<(), Eip712Error> {
    let fields = match value {
        Value::Object(map) => map,
        _ => return Err(Eip712Error::Unrepresentable(name.to_owned())),
    };
    let mut entries = Vec::with_capacity(fields.len());
    for (field, inner) in fields {
        let nested = format!("Type{}", camel_case(field));
        let ty = match inner {
            Value::String(_) => "string".to_owned(),
            Value::Bool(_) => "bool".to_owned(),
            Value::Object(_) => {
                derive_struct_type(&nested, inner, types)?;
                nested
            }
            Value::Array(items) => match items.first() {
                None | Some(Value::String(_)) => "string[]".to_owned(),
                Some(item @ Value::Object(_)) => {
                    derive_struct_type(&nested, item, types)?;
                    format!("{nested}[]")
                }
                Some(_) => return Err(Eip712Error::Unrepresentable(field.clone())),
            },
            // numbers are coerced to strings before derivation; anything
            // left is a hole the device cannot display
            Value::Null | Value::Number(_) => {
                return Err(Eip712Error::Unrepresentable(field.clone()))
            }
        };
        entries.push(Eip712DomainType::new(field.clone(), ty));
    }
    types.insert(name.to_owned(), entries);
    Ok(())
}

/// Rewrites every JSON number in place as its decimal string.
fn coerce_numbers(value: &mut Value) {
    match value {
        Value::Number(n) => *value = Value::String(n.to_string()),
        Value::Array(items) => items.iter_mut().for_each(coerce_numbers),
        Value::Object(map) => map.values_mut().for_each(coerce_numbers),
        _ => {}
    }
}

fn camel_case(field: &str) -> String {
    field
        .split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
