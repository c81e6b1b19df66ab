//! Errors produced by the OBJ loader.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObjError {
    #[error("OBJ resource not found: {}", path.display())]
    ResourceNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read line {line}")]
    Io {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("Malformed {what} '{token}' on line {line}")]
    MalformedNumericField {
        line: usize,
        what: &'static str,
        token: String,
    },

    #[error("Face index {index} out of range (vertex count {vertex_count}) on line {line}")]
    OutOfRangeIndex {
        index: i64,
        vertex_count: usize,
        line: usize,
    },
}

pub type ObjResult<T> = Result<T, ObjError>;
