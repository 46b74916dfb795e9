//! Legacy Amino JSON signing forms.
//!
//! Amino sign bytes are the UTF-8 encoding of the sign doc serialized with
//! object keys sorted lexicographically and no insignificant whitespace,
//! with `&`, `<` and `>` replaced by their `\uXXXX` escapes to match what
//! JavaScript signers historically produced. Two wallets shown the same
//! transaction must hash identical bytes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::Coin;

/// A message in its legacy Amino `{type, value}` envelope.
///
/// The `type` names are historical and frozen; several diverge from the
/// current protobuf names.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AminoMsg {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: Value,
}

impl AminoMsg {
    /// Builds an envelope around an already-rendered value.
    pub fn new(kind: impl Into<String>, value: Value) -> Self {
        Self { kind: kind.into(), value }
    }
}

/// The fee block of an Amino sign doc. Gas is carried as a decimal string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StdFee {
    pub amount: Vec<Coin>,
    pub gas: String,
}

impl StdFee {
    /// Converts the wire fee into its Amino rendering.
    pub fn from_fee(fee: &crate::types::Fee) -> Self {
        Self {
            amount: fee.amount.clone(),
            gas: fee.gas_limit.to_string(),
        }
    }
}

/// The document an Amino signer displays and signs.
///
/// Account number and sequence are decimal strings; JSON numbers would be
/// mangled by signers that parse them as doubles. Messages are raw JSON:
/// most are `{type, value}` envelopes, but chains requiring "lifted"
/// authorization payloads drop the envelope entirely.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StdSignDoc {
    pub account_number: String,
    pub chain_id: String,
    pub fee: StdFee,
    pub memo: String,
    pub msgs: Vec<Value>,
    pub sequence: String,
}

impl StdSignDoc {
    /// The canonical bytes a signer hashes.
    pub fn sign_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        let doc = serde_json::to_value(self)?;
        let canonical = serde_json::to_string(&sort_keys(doc))?;
        Ok(escape_characters(&canonical).into_bytes())
    }
}

/// Recursively rewrites every object with its keys in lexicographic order.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut sorted = Map::new();
            let mut entries: Vec<_> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            for (key, inner) in entries {
                sorted.insert(key, sort_keys(inner));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// Escapes the characters JavaScript's `JSON.stringify` historically
/// escaped in sign docs.
fn escape_characters(json: &str) -> String {
    json.replace('&', "\\u0026")
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(memo: &str) -> StdSignDoc {
        StdSignDoc {
            account_number: "42".into(),
            chain_id: "cosmoshub-4".into(),
            fee: StdFee {
                amount: vec![Coin { denom: "uatom".into(), amount: 3750 }],
                gas: "150000".into(),
            },
            memo: memo.into(),
            msgs: vec![json!({
                "type": "cosmos-sdk/MsgWithdrawDelegationReward",
                "value": {
                    "delegator_address": "cosmos1user",
                    "validator_address": "cosmosvaloper1val",
                },
            })],
            sequence: "7".into(),
        }
    }

    #[test]
    fn sign_bytes_sort_keys_at_every_level() {
        let bytes = doc("").sign_bytes().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        // top level keys land in lexicographic order
        assert!(text.starts_with(r#"{"account_number":"42","chain_id":"cosmoshub-4","fee":"#));
        // nested message keys too
        let delegator = text.find("delegator_address").unwrap();
        let validator = text.find("validator_address").unwrap();
        assert!(delegator < validator);
    }

    #[test]
    fn sign_bytes_have_no_whitespace() {
        let text = String::from_utf8(doc("").sign_bytes().unwrap()).unwrap();
        assert!(!text.contains(": "));
        assert!(!text.contains(", "));
        assert!(!text.contains('\n'));
    }

    #[test]
    fn sign_bytes_escape_html_characters() {
        let text = String::from_utf8(doc("a&b <tag>").sign_bytes().unwrap()).unwrap();
        assert!(text.contains(r"a\u0026b \u003ctag\u003e"));
        assert!(!text.contains('&'));
        assert!(!text.contains('<'));
        assert!(!text.contains('>'));
    }

    #[test]
    fn identical_docs_produce_identical_bytes() {
        assert_eq!(doc("memo").sign_bytes().unwrap(), doc("memo").sign_bytes().unwrap());
    }

    #[test]
    fn amino_type_field_round_trips() {
        let msg = AminoMsg::new("cosmos-sdk/MsgSend", json!({ "amount": [] }));
        let text = serde_json::to_string(&msg).unwrap();
        assert!(text.contains(r#""type":"cosmos-sdk/MsgSend""#));
        let back: AminoMsg = serde_json::from_str(&text).unwrap();
        assert_eq!(back, msg);
    }
}
