//! The [`expectation`](self) module contains the [`Expectation`] of a mocked
//! method and the [`CallRecord`] of an observed call.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::{Args, ValueRef};

/// Expected call of a method of a [`MockObject`](crate::MockObject).
#[derive(Debug, Clone, PartialEq)]
pub struct Expectation {
    name: String,
    return_value: ValueRef,
    args: Args,
}

impl Expectation {
    pub(crate) fn new(name: String, return_value: ValueRef, args: Args) -> Self {
        Self {
            name,
            return_value,
            args,
        }
    }

    /// Name of the expected method.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value that is returned when the method is called.
    #[must_use]
    pub fn return_value(&self) -> &ValueRef {
        &self.return_value
    }

    /// Arguments the method is expected to be called with.
    #[must_use]
    pub fn args(&self) -> &Args {
        &self.args
    }

    /// Returns `true` if the passed `record` is structurally equal to this
    /// expectation, `false` otherwise.
    #[must_use]
    pub fn is_met_by(&self, record: &CallRecord) -> bool {
        self.return_value == record.return_value && self.args == record.args
    }
}

/// Renders the payload of the expectation as `{retval: .., args: [..]}`.
impl Display for Expectation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{{retval: {:?}, args: {:?}}}", self.return_value, self.args)
    }
}

/// Observed call of a method of a [`MockObject`](crate::MockObject).
#[derive(Debug, Clone, PartialEq)]
pub struct CallRecord {
    /// Value that was returned to the caller.
    pub return_value: ValueRef,

    /// Arguments the method was actually called with.
    pub args: Args,
}

impl PartialEq<Expectation> for CallRecord {
    fn eq(&self, other: &Expectation) -> bool {
        other.is_met_by(self)
    }
}
