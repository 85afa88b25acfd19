//! Schematic source documents
//!
//! A source document is JSON. It is parsed into a [`serde_json::Value`] first so
//! it can be checked against a JSON schema, and only then converted into the
//! typed [`SchematicSource`].

pub mod ast;
pub mod map;
pub mod schema;

pub use ast::{BlockDecl, ConfigDecl, ConfigKind, Info, ProgramSource, SchematicSource, Tiles};
pub use map::StringMap;
pub use schema::{default_schema, validate, SchemaError};

use serde_json::{json, Value};

use crate::error::SourceError;

/// Schema URL written into starter documents for editor support
pub const SCHEMA_URL: &str =
    "https://raw.githubusercontent.com/BalaM314/msch-generate/main/docs/msch-v1.schema.json";

/// Description used when `init` is given none
pub const DEFAULT_DESCRIPTION: &str =
    "No description provided.\nGenerated with https://github.com/BalaM314/msch-generate";

/// Parse raw document text into an untyped JSON value
pub fn parse_json(source: &str) -> Result<Value, SourceError> {
    serde_json::from_str(source).map_err(|e| SourceError::from_json(&e, source))
}

/// Build the starter document written by `msch-build init`
///
/// `authors` is split on commas, each optionally followed by one space.
pub fn starter_document(name: &str, description: Option<&str>, authors: Option<&str>) -> Value {
    let authors: Vec<&str> = authors
        .unwrap_or("Unknown")
        .split(',')
        .map(|a| a.strip_prefix(' ').unwrap_or(a))
        .collect();

    json!({
        "$schema": SCHEMA_URL,
        "info": {
            "name": name,
            "description": description.unwrap_or(DEFAULT_DESCRIPTION),
            "authors": authors,
            "version": "1.0.0"
        },
        "tiles": {
            "grid": [["holyBlock"]],
            "blocks": {
                "holyBlock": { "id": "router" }
            },
            "programs": {}
        },
        "consts": {}
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_reports_position() {
        let err = parse_json("{\n  \"info\": }").unwrap_err();
        let SourceError::Syntax { line, .. } = &err;
        assert_eq!(*line, 2);
    }

    #[test]
    fn test_starter_document_is_valid() {
        let doc = starter_document("Factory", None, Some("alice, bob,carol"));
        assert!(validate(&doc, &default_schema()).is_ok());
        assert_eq!(doc["info"]["authors"], json!(["alice", "bob", "carol"]));
        assert_eq!(doc["info"]["version"], json!("1.0.0"));
    }

    #[test]
    fn test_starter_document_schema_and_default_description() {
        let doc = starter_document("Factory", None, None);
        assert_eq!(doc["$schema"], json!(SCHEMA_URL));
        assert_eq!(
            doc["info"]["description"],
            json!("No description provided.\nGenerated with https://github.com/BalaM314/msch-generate")
        );
        let keys: Vec<&str> = doc.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["$schema", "info", "tiles", "consts"]);
    }

    #[test]
    fn test_starter_document_deserializes() {
        let doc = starter_document("Factory", Some("desc"), None);
        let source: SchematicSource = serde_json::from_value(doc).unwrap();
        assert_eq!(source.info.authors, vec!["Unknown".to_string()]);
        assert_eq!(source.info.description.as_deref(), Some("desc"));
        assert_eq!(source.tiles.blocks.get("holyBlock").unwrap().id, "router");
    }
}
