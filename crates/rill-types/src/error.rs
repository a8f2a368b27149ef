//! Type model errors

use crate::TypeTag;
use rill_diagnostics::{Diagnostic, ErrorCode, RIL0100, RIL0101, RIL0102};
use thiserror::Error;

/// Errors raised by the type model
///
/// Equivalence, assignability, and signature synthesis are total over
/// well-formed graphs; malformedness is caught once, at construction.
#[derive(Debug, Clone, Error)]
pub enum TypeModelError {
    /// Structural data inconsistent with the node's tag
    #[error("invalid type shape: {tag} node {detail}")]
    InvalidTypeShape { tag: TypeTag, detail: String },

    /// A reserved handle was defined a second time
    #[error("type handle {index} is already defined")]
    AlreadyDefined { index: u32 },

    /// A parameter accessor was called on a tag that carries none
    #[error("{tag} type carries no type parameter")]
    NoTypeParameter { tag: TypeTag },
}

/// Type model result
pub type TypeModelResult<T> = Result<T, TypeModelError>;

impl TypeModelError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidTypeShape { .. } => RIL0100,
            Self::AlreadyDefined { .. } => RIL0101,
            Self::NoTypeParameter { .. } => RIL0102,
        }
    }

    /// Convert to a diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code(), self.to_string());
        match self.code().info().help {
            Some(help) => diag.with_help(help),
            None => diag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = TypeModelError::NoTypeParameter { tag: TypeTag::Int };
        assert_eq!(err.code(), RIL0102);
        assert_eq!(err.to_string(), "int type carries no type parameter");
    }

    #[test]
    fn test_to_diagnostic() {
        let err = TypeModelError::InvalidTypeShape {
            tag: TypeTag::Array,
            detail: "missing element type".to_string(),
        };
        let diag = err.to_diagnostic();
        assert_eq!(diag.code, RIL0100);
        assert!(diag.help.is_some());
    }
}
