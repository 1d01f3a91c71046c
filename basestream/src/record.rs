//!
//! Normalize decoded text into structured records.
//!

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::{errors::StreamError, proto::Block};

///
/// One block or flash block update as a key-ordered JSON object.
///
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// The regular block feed arrives structured; its record uses the same field names
/// as the service's JSON documents.
impl From<&Block> for Record {
    fn from(block: &Block) -> Self {
        let transactions = block
            .transactions
            .iter()
            .map(|tx| Value::String(format!("0x{}", hex::encode(tx))))
            .collect::<Vec<_>>();

        let mut map = Map::new();
        map.insert("blockNumber".into(), json!(block.block_number));
        map.insert("blockHash".into(), json!(block.block_hash));
        map.insert("transactions".into(), Value::Array(transactions));
        Self(map)
    }
}

/// Two-space indented JSON.
impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pretty = serde_json::to_string_pretty(&self.0).map_err(|_| fmt::Error)?;
        f.write_str(&pretty)
    }
}

///
/// Parse decoded text into a [`Record`].
///
/// Anything but a JSON object is a [`StreamError::Parse`].
///
pub fn normalize(text: &str) -> Result<Record, StreamError> {
    Ok(Record(serde_json::from_str(text)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_nested_structure() {
        let text = r#"{"index":1,"diff":{"receipts":{"0xab":{"status":"0x1"}},"transactions":["0x02f8","0x01f9"]},"metadata":null}"#;

        let record = normalize(text).unwrap();

        assert_eq!(record.len(), 3);
        assert_eq!(record.get("index"), Some(&json!(1)));
        assert_eq!(record.get("metadata"), Some(&Value::Null));
        assert_eq!(
            record.get("diff").unwrap()["transactions"],
            json!(["0x02f8", "0x01f9"])
        );
    }

    #[test]
    fn reserializes_to_the_same_document() {
        let text = r#"{"b":[1,2.5,"x",true,{"c":null}],"a":{"z":1,"y":{}}}"#;

        let record = normalize(text).unwrap();
        let round_trip: Value = serde_json::from_str(&serde_json::to_string(&record).unwrap()).unwrap();

        assert_eq!(round_trip, serde_json::from_str::<Value>(text).unwrap());
    }

    #[test]
    fn keys_are_ordered() {
        let record = normalize(r#"{"b":1,"a":2,"c":3}"#).unwrap();
        let keys = record.into_inner().keys().cloned().collect::<Vec<_>>();

        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn pretty_prints_with_two_spaces() {
        let record = normalize(r#"{"a":1}"#).unwrap();

        assert_eq!(record.to_string(), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn invalid_text_fails() {
        assert!(matches!(normalize("{\"a\":"), Err(StreamError::Parse(_))));
        assert!(matches!(normalize("not json"), Err(StreamError::Parse(_))));
    }

    #[test]
    fn non_object_documents_fail() {
        assert!(matches!(normalize("[1,2,3]"), Err(StreamError::Parse(_))));
        assert!(matches!(normalize("\"text\""), Err(StreamError::Parse(_))));
    }

    #[test]
    fn block_becomes_record() {
        let block = Block {
            block_number: 29_000_001,
            block_hash: "0xea48ba1c8e38ea586239e9c5ec62949ddd79404c6006c099bb02a8b22ddd18e4".into(),
            transactions: vec![vec![0x02, 0xf8, 0x6f], vec![0xf8, 0x6c]],
        };

        let record = Record::from(&block);

        assert_eq!(record.get("blockNumber"), Some(&json!(29_000_001u64)));
        assert_eq!(
            record.get("blockHash"),
            Some(&json!("0xea48ba1c8e38ea586239e9c5ec62949ddd79404c6006c099bb02a8b22ddd18e4"))
        );
        assert_eq!(
            record.get("transactions"),
            Some(&json!(["0x02f86f", "0xf86c"]))
        );
    }
}
