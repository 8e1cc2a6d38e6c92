use pbts_schema::SchemaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Collection \"{id}\" is not part of the collection index")]
    UnresolvedCollection {
        id: String,
    },

    #[error("Parse error at line {line}, column {column}: {msg}")]
    ParseError {
        msg:    String,
        line:   usize,
        column: usize,
    },

    #[error("Formatting failed at line {line}, column {column}: {msg}\n\n{text}")]
    Formatting {
        msg:    String,
        line:   usize,
        column: usize,
        text:   String,
    },
}
