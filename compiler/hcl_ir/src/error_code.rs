//! Error codes for all compiler diagnostics.
//!
//! Each error code is a unique identifier (e.g., `E2001`) with the first digit
//! indicating the compiler phase.

use std::fmt;

/// Error codes for all compiler diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E1xxx: Scanner errors
/// - E2xxx: Parser errors
/// - E3xxx: Analysis errors
/// - E4xxx: Code generation errors
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Scanner Errors (E1xxx)
    /// Unexpected character in source
    E1001,
    /// Unterminated string literal
    E1002,
    /// Invalid escape sequence
    E1003,

    // Parser Errors (E2xxx)
    /// Unclosed delimiter
    E2001,
    /// Unexpected closing delimiter
    E2002,
    /// Nesting too deep
    E2003,
    /// Quote with nothing to quote
    E2004,

    // Analysis Errors (E3xxx)
    /// Wrong number of operands for a special form or operator
    E3001,
    /// Expected a symbol
    E3002,
    /// Expected a string literal
    E3003,
    /// Malformed parameter or binding list
    E3004,
    /// Literal in call position
    E3005,
    /// Form only allowed at top level
    E3006,

    // Codegen Errors (E4xxx)
    /// Imported path does not carry the source extension
    E4001,
    /// Empty import path
    E4002,
    /// Definition outside statement position
    E4003,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E3005 => "E3005",
            ErrorCode::E3006 => "E3006",
            ErrorCode::E4001 => "E4001",
            ErrorCode::E4002 => "E4002",
            ErrorCode::E4003 => "E4003",
        }
    }

    /// Phase name for the leading digit.
    pub fn phase(&self) -> &'static str {
        match self.as_str().as_bytes()[1] {
            b'1' => "scan",
            b'2' => "parse",
            b'3' => "analyze",
            _ => "generate",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
