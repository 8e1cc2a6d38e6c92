use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown field type \"{kind}\" for field \"{field}\" of collection \"{collection}\"")]
    UnknownFieldKind {
        collection: String,
        field:      String,
        kind:       String,
    },

    #[error("Expected {expected} but found {found}")]
    UnexpectedShape {
        expected: &'static str,
        found:    String,
    },
}
