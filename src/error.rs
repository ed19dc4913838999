// ABOUTME: Error taxonomy for reader and evaluator failures (§7)

use crate::value::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum LispError {
    /// Input ended inside a string/list/vector/map.
    #[error("input ran out while reading: {context}")]
    ReaderRanOut { position: usize, context: String },

    /// Structurally invalid token or unsupported construct.
    #[error("malformed form near '{context}'")]
    ReaderBadForm { position: usize, context: String },

    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("{function}: expected {expected} argument{}, got {actual}", if expected == "1" { "" } else { "s" })]
    ArityError {
        function: String,
        expected: String,
        actual: usize,
    },

    #[error("{function}: expected {expected}, got {actual} at argument {position}")]
    TypeError {
        function: String,
        expected: String,
        actual: String,
        position: usize,
    },

    #[error("value is not callable: {0}")]
    NotCallable(String),

    #[error("{function}: {message}")]
    ArgShape { function: String, message: String },

    #[error("{0}")]
    Divide(String),
}

impl LispError {
    /// The cursor position to print alongside the message (§7); non-reader errors report 0.
    pub fn position(&self) -> usize {
        match self {
            LispError::ReaderRanOut { position, .. } => *position,
            LispError::ReaderBadForm { position, .. } => *position,
            _ => 0,
        }
    }

    pub fn type_error(function: &str, expected: &str, actual: &Value, position: usize) -> Self {
        LispError::TypeError {
            function: function.to_string(),
            expected: expected.to_string(),
            actual: actual.type_name().to_string(),
            position,
        }
    }

    pub fn arity_error(function: &str, expected: impl Into<String>, actual: usize) -> Self {
        LispError::ArityError {
            function: function.to_string(),
            expected: expected.into(),
            actual,
        }
    }

    pub fn arg_shape(function: &str, message: impl Into<String>) -> Self {
        LispError::ArgShape {
            function: function.to_string(),
            message: message.into(),
        }
    }

    /// Renders the single user-visible line described by §7: `<position>: <message>`.
    pub fn render_line(&self) -> String {
        format!("{}: {}", self.position(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reader_errors_carry_their_position() {
        let e = LispError::ReaderRanOut {
            position: 7,
            context: "(foo".to_string(),
        };
        assert_eq!(e.position(), 7);
        assert!(e.render_line().starts_with("7: "));
    }

    #[test]
    fn non_reader_errors_report_position_zero() {
        let e = LispError::UnknownSymbol("x".to_string());
        assert_eq!(e.position(), 0);
        assert!(e.render_line().starts_with("0: "));
    }
}
