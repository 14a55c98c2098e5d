//! A minimal expectation based mock object.
//!
//! A [`MockObject`] records which method calls are expected, intercepts the
//! calls at runtime and verifies afterwards that every expectation was met.

extern crate self as dynmock;

pub mod error;
pub mod expectation;
pub mod mock;
pub mod value;

pub use dynmock_macros::{call, expect_call};

pub use error::{Error, MockExpectationError, Result};
pub use expectation::{CallRecord, Expectation};
pub use mock::MockObject;
pub use value::{Args, Value, ValueRef};
