//! JSON schema validation for source documents

use serde_json::Value;
use thiserror::Error;

/// The bundled `msch-v1` schema
pub const DEFAULT_SCHEMA: &str = include_str!("msch-v1.schema.json");

/// Errors produced while checking a document against a schema
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The document does not satisfy the schema
    #[error("Schematic file is invalid: {message} (at {path})")]
    Violation { path: String, message: String },

    /// The schema itself could not be compiled
    #[error("JSON schema is invalid: {0}")]
    InvalidSchema(String),
}

impl SchemaError {
    /// Schema compilation problems come from the installation, not the user
    pub fn is_user_facing(&self) -> bool {
        matches!(self, SchemaError::Violation { .. })
    }
}

/// Parse the bundled schema
pub fn default_schema() -> Value {
    serde_json::from_str(DEFAULT_SCHEMA).expect("Bundled schema should be valid JSON")
}

/// Validate `instance` against `schema`, reporting only the first violation
pub fn validate(instance: &Value, schema: &Value) -> Result<(), SchemaError> {
    let validator =
        jsonschema::validator_for(schema).map_err(|e| SchemaError::InvalidSchema(e.to_string()))?;

    let result = match validator.iter_errors(instance).next() {
        None => Ok(()),
        Some(error) => {
            let pointer = error.instance_path.to_string();
            Err(SchemaError::Violation {
                path: if pointer.is_empty() {
                    "/".to_string()
                } else {
                    pointer
                },
                message: error.to_string(),
            })
        }
    };
    result
}
