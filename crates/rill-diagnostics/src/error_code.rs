//! Rill error codes following a structured numbering system
//!
//! Error code ranges:
//! - RIL0100-RIL0199: Type model errors (construction, parameter access)
//! - RIL0200-RIL0299: Configuration errors (schema validation)
//! - RIL0300-RIL0399: Relational adapter errors (schema/statement generation)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCode(u16);

impl ErrorCode {
    /// Create a new error code
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the numeric code
    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Get error information for this code
    pub fn info(&self) -> &'static ErrorInfo {
        ERROR_INFO.get(&self.0).unwrap_or(&UNKNOWN_ERROR)
    }

    /// Check if this is a type model error (0100-0199)
    pub const fn is_type_error(&self) -> bool {
        self.0 >= 100 && self.0 < 200
    }

    /// Check if this is a configuration error (0200-0299)
    pub const fn is_config_error(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Check if this is a relational adapter error (0300-0399)
    pub const fn is_relational_error(&self) -> bool {
        self.0 >= 300 && self.0 < 400
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RIL{:04}", self.0)
    }
}

/// Information about an error code
#[derive(Debug, Clone)]
pub struct ErrorInfo {
    /// Short description of the error
    pub description: &'static str,
    /// Detailed help text
    pub help: Option<&'static str>,
}

impl ErrorInfo {
    const fn new(description: &'static str) -> Self {
        Self {
            description,
            help: None,
        }
    }

    const fn with_help(mut self, help: &'static str) -> Self {
        self.help = Some(help);
        self
    }
}

static UNKNOWN_ERROR: ErrorInfo = ErrorInfo::new("Unknown error");

use std::collections::HashMap;
use std::sync::LazyLock;

static ERROR_INFO: LazyLock<HashMap<u16, ErrorInfo>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Type model errors (0100-0199)
    map.insert(
        100,
        ErrorInfo::new("Invalid type shape")
            .with_help("The structural data supplied for a type node does not match its tag"),
    );
    map.insert(
        101,
        ErrorInfo::new("Type handle already defined")
            .with_help("A reserved type handle may be defined exactly once"),
    );
    map.insert(
        102,
        ErrorInfo::new("Type carries no parameter")
            .with_help("Only parameterized kinds (array, map, stream, table, ...) have a type parameter"),
    );
    map.insert(103, ErrorInfo::new("Empty union type"));

    // Configuration errors (0200-0299)
    map.insert(200, ErrorInfo::new("Key does not match declared kind"));
    map.insert(
        201,
        ErrorInfo::new("Property not declared by schema")
            .with_help("The schema for this table forbids additional properties"),
    );

    // Relational adapter errors (0300-0399)
    map.insert(
        300,
        ErrorInfo::new("Unsupported column type")
            .with_help("Only scalar, json/xml, and array-typed fields can be mapped to columns"),
    );
    map.insert(301, ErrorInfo::new("Statement execution failed"));
    map.insert(302, ErrorInfo::new("Table constraint is not a record type"));

    map
});

// Named constants for common error codes

/// Invalid type shape
pub const RIL0100: ErrorCode = ErrorCode::new(100);
/// Type handle already defined
pub const RIL0101: ErrorCode = ErrorCode::new(101);
/// Type carries no parameter
pub const RIL0102: ErrorCode = ErrorCode::new(102);
/// Empty union type
pub const RIL0103: ErrorCode = ErrorCode::new(103);
/// Key does not match declared kind
pub const RIL0200: ErrorCode = ErrorCode::new(200);
/// Property not declared by schema
pub const RIL0201: ErrorCode = ErrorCode::new(201);
/// Unsupported column type
pub const RIL0300: ErrorCode = ErrorCode::new(300);
/// Statement execution failed
pub const RIL0301: ErrorCode = ErrorCode::new(301);
/// Table constraint is not a record type
pub const RIL0302: ErrorCode = ErrorCode::new(302);
