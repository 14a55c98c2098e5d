//! Error definitions
//!
//! This module provides the errors that are raised by a
//! [`MockObject`](crate::MockObject).

use thiserror::Error;

/// Error raised by [`verify`](crate::MockObject::verify) if a expectation was
/// not met.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("expected {name}, {expected}")]
pub struct MockExpectationError {
    /// Name of the method of the unmet expectation.
    pub name: String,

    /// Human readable representation of the expected call.
    pub expected: String,
}

/// Main error type for dynmock
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A mocked method was called with the wrong number of arguments.
    #[error("wrong number of arguments for `{name}` (given {given}, expected {expected})")]
    ArgumentMismatch {
        name: String,
        given: usize,
        expected: usize,
    },

    /// A expectation was not met.
    #[error(transparent)]
    Expectation(#[from] MockExpectationError),

    /// A method was called that has no expectation.
    #[error("undefined method `{name}` for mock")]
    NoMethod { name: String },

    /// The return value of a method has a different type than requested.
    #[error("return value of `{name}` is not of type `{expected}`")]
    ReturnType {
        name: String,
        expected: &'static str,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
