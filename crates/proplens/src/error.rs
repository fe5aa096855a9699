//! Error types for collection, description and lookup.

use thiserror::Error;

use crate::decl::parser::ParseError;
use crate::foundation::Path;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by property collection and lookup.
///
/// Every failure is synchronous and fatal to the call that raised it; there
/// are no retries and no partial recovery inside a call.
#[derive(Debug, Error)]
pub enum Error {
    /// A bound object's runtime type differs from the collected type.
    #[error("bound object is not an instance of `{expected}`")]
    TypeMismatch { expected: &'static str },

    /// Lookup by canonical path found nothing.
    #[error("no property at path `{0}`")]
    PathNotFound(Path),

    /// The declaration source failed to lex or parse.
    #[error("declaration parse failed: {0}")]
    Parse(#[from] ParseError),

    /// The root class is not declared anywhere in the declaration source.
    #[error("class `{0}` not found in declaration source")]
    ClassNotFound(String),

    /// Description pass over an empty map has no root class to choose.
    #[error("cannot pick a root class from an empty property map")]
    EmptyMap,

    /// Reading the declaration file failed.
    #[error("failed to read declaration source: {0}")]
    Io(#[from] std::io::Error),
}
