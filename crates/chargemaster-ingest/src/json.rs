//! JSON artifact decoding.

use std::io::{BufReader, Read};

use serde_json::Value;

use crate::error::Result;

/// Decodes a whole JSON artifact into a nested value tree.
///
/// # Errors
///
/// Fails when the stream is unreadable or is not well-formed JSON.
pub fn read_json(stream: Box<dyn Read>) -> Result<Value> {
    Ok(serde_json::from_reader(BufReader::new(stream))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn decodes_nested_documents() {
        let doc = r#"{"Gross Charges": [{"Itemcode": "1"}]}"#;
        let value = read_json(Box::new(Cursor::new(doc.as_bytes().to_vec()))).unwrap();
        assert!(value["Gross Charges"].is_array());
    }

    #[test]
    fn malformed_documents_fail() {
        let result = read_json(Box::new(Cursor::new(b"{not json".to_vec())));
        assert!(result.is_err());
    }
}
