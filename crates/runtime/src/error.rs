//! Runtime Error Taxonomy
//!
//! Every error carries a kind, a human-readable message, and the
//! irritants (the offending datum or argument list) already rendered
//! into the message. Rendering happens eagerly so an `Error` never
//! retains a GC-managed value: by the time an error reaches the REPL or
//! the script loader, the registers that kept its irritants alive are
//! gone.
//!
//! Errors bubble out of `interpret` through ordinary `Result`
//! propagation; the evaluator installs no handlers of its own.

use sable_core::Value;

use crate::printer::printable;

/// Which failure family an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A primitive's argument failed its type predicate.
    Type,
    /// Arity mismatch, unknown procedure type, bad primitive call.
    Call,
    /// Lookup or assignment on an undefined symbol.
    Variable,
    /// I/O failure on a port-backed operation.
    File,
    /// Malformed reader input.
    Parse,
    /// Anything else the host raises.
    Runtime,
}

#[derive(Debug, Clone)]
pub struct Error {
    kind: ErrorKind,
    message: String,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    fn with_irritants(kind: ErrorKind, msg: impl Into<String>, irritants: Value) -> Self {
        Error {
            kind,
            message: format!("{}, irritants: {}", msg.into(), printable(irritants)),
        }
    }

    pub fn type_error(msg: impl Into<String>, irritants: Value) -> Self {
        Self::with_irritants(ErrorKind::Type, msg, irritants)
    }

    pub fn call_error(msg: impl Into<String>, irritants: Value) -> Self {
        Self::with_irritants(ErrorKind::Call, msg, irritants)
    }

    pub fn variable_error(msg: impl Into<String>, irritants: Value) -> Self {
        Self::with_irritants(ErrorKind::Variable, msg, irritants)
    }

    pub fn file_error(msg: impl Into<String>, irritants: Value) -> Self {
        Self::with_irritants(ErrorKind::File, msg, irritants)
    }

    pub fn parse_error(msg: impl Into<String>) -> Self {
        Error {
            kind: ErrorKind::Parse,
            message: msg.into(),
        }
    }

    pub fn runtime_error(msg: impl Into<String>) -> Self {
        Error {
            kind: ErrorKind::Runtime,
            message: msg.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

/// Fail with a type error unless `predicate` holds for `val`.
pub fn check_type(predicate: fn(Value) -> bool, val: Value, msg: &str) -> Result<()> {
    if predicate(val) {
        Ok(())
    } else {
        Err(Error::type_error(msg, val))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_irritants_are_rendered_eagerly() {
        let err = Error::type_error("car: expected pair", Value::from_int(42));
        assert_eq!(err.kind(), ErrorKind::Type);
        assert_eq!(err.message(), "car: expected pair, irritants: 42");
    }

    #[test]
    fn test_check_type_passes_and_fails() {
        assert!(check_type(Value::is_int, Value::from_int(1), "int expected").is_ok());
        let err = check_type(Value::is_int, Value::from_double(1.5), "int expected");
        assert_eq!(err.unwrap_err().kind(), ErrorKind::Type);
    }
}
