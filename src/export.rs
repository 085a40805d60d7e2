// Author: Dustin Pilgrim
// License: MIT

use crate::document::Document;
use crate::TomeError;

/// Export a document to pretty-printed JSON for tooling and diagnostics.
///
/// Tables keep their key order, datetimes become their RFC 3339 style
/// string, and non-finite floats become `null`.
///
/// # Examples
/// ```
/// use tome_cfg::{export, Document, Value};
///
/// # fn main() -> Result<(), tome_cfg::TomeError> {
/// let mut builder = Document::builder();
/// builder.insert("server.port", Value::from(8080))?;
/// let json = export::export_document_to_json(&builder.finish())?;
/// assert!(json.contains("\"port\": 8080"));
/// # Ok(())
/// # }
/// ```
pub fn export_document_to_json(doc: &Document) -> Result<String, TomeError> {
    serde_json::to_string_pretty(doc).map_err(|e| TomeError::Export {
        message: e.to_string(),
    })
}

/// The document as a `serde_json::Value`.
pub fn document_to_json_value(doc: &Document) -> Result<serde_json::Value, TomeError> {
    serde_json::to_value(doc).map_err(|e| TomeError::Export {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Datetime, Value};

    fn sample() -> Document {
        let mut builder = Document::builder();
        builder.insert("zeta", Value::from("last-defined-first")).unwrap();
        builder.insert("alpha.enabled", Value::from(true)).unwrap();
        builder
            .insert_array("alpha.ports", vec![Value::from(80), Value::from(443)])
            .unwrap();
        builder
            .insert(
                "alpha.since",
                Value::from("2021-03-04T05:06:07Z".parse::<Datetime>().unwrap()),
            )
            .unwrap();
        builder.finish()
    }

    #[test]
    fn test_export_preserves_structure() {
        let json = export_document_to_json(&sample()).unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(v["zeta"], "last-defined-first");
        assert_eq!(v["alpha"]["enabled"], true);
        assert_eq!(v["alpha"]["ports"][1], 443);
        assert_eq!(v["alpha"]["since"], "2021-03-04T05:06:07Z");
    }

    #[test]
    fn test_export_preserves_key_order() {
        let v = document_to_json_value(&sample()).unwrap();
        let keys: Vec<&String> = v.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_export_non_finite_float() {
        let mut builder = Document::builder();
        builder.insert("x", Value::Float(f64::NAN)).unwrap();
        let v = document_to_json_value(&builder.finish()).unwrap();
        assert!(v["x"].is_null());
    }
}
