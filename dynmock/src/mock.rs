//! The [`mock`](self) module implements the [`MockObject`] type.

use std::collections::HashMap;
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::mem::replace;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    error::MockExpectationError, Args, CallRecord, Error, Expectation, Result, Value, ValueRef,
};

/// Mock object that records expected calls, intercepts them and verifies
/// afterwards that every expectation was met.
///
/// Cloning a [`MockObject`] creates a new handle to the same mock, so one
/// handle can be injected into the code under test while the test keeps
/// another one to verify the calls.
///
/// The internal state is never locked while values passed to the mock are
/// compared, formatted or dropped, so these values may call back into the mock.
///
/// ```
/// use dynmock::{args, MockObject};
///
/// let mock = MockObject::new();
/// mock.expect("meaning_of_life", 42, ())
///     .expect("do_something_with", true, args!["obj", true]);
///
/// assert_eq!(42, mock.call::<i32>("meaning_of_life", ()).unwrap());
/// assert!(mock.call::<bool>("do_something_with", args!["obj", true]).unwrap());
/// assert!(mock.verify().unwrap());
/// ```
#[must_use]
#[derive(Default)]
pub struct MockObject {
    shared: Arc<Mutex<Shared>>,
    released: bool,
}

/// Handler that is installed for every expected method.
type Method = Box<dyn Fn(&str, &Args) -> Result<ValueRef> + Send + Sync>;

#[derive(Default)]
struct Shared {
    name: Option<String>,
    expected: Vec<Expectation>,
    methods: HashMap<String, Method>,
    actual: HashMap<String, Vec<CallRecord>>,
    check_on_drop: bool,
}

impl MockObject {
    /// Create a new anonymous mock object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new mock object with the passed `name`.
    ///
    /// The name is used in log events and panic messages.
    pub fn named<S: Into<String>>(name: S) -> Self {
        let mock = Self::new();
        mock.shared.lock().name = Some(name.into());

        mock
    }

    /// Name of the mock object, if any.
    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.shared.lock().name.clone()
    }

    /// Expect that method `name` is called with `args` and let it return
    /// `return_value`.
    ///
    /// Any previous expectation for `name` is replaced. Pass `()` as `args`
    /// for a method without arguments.
    pub fn expect<S, R>(&self, name: S, return_value: R, args: impl Into<Args>) -> &Self
    where
        S: Into<String>,
        R: Value,
    {
        let name = name.into();
        let return_value = ValueRef::new(return_value);
        let args = args.into();
        let expectation = Expectation::new(name.clone(), return_value.clone(), args.clone());

        tracing::debug!(
            mock = self.label(),
            method = %name,
            expectation = %expectation,
            "Register expectation"
        );

        let arity = args.len();
        let method: Method = Box::new(move |name: &str, given: &Args| {
            if given.len() != arity {
                return Err(Error::ArgumentMismatch {
                    name: name.into(),
                    given: given.len(),
                    expected: arity,
                });
            }

            Ok(return_value.clone())
        });

        let (old_expectation, old_method) = {
            let mut shared = self.shared.lock();

            let old_expectation =
                if let Some(pos) = shared.expected.iter().position(|e| e.name() == name) {
                    Some(replace(&mut shared.expected[pos], expectation))
                } else {
                    shared.expected.push(expectation);

                    None
                };
            let old_method = shared.methods.insert(name, method);

            (old_expectation, old_method)
        };

        drop(old_expectation);
        drop(old_method);

        self
    }

    /// Call the mocked method `name` with the passed `args` and return the
    /// expected return value as `R`.
    ///
    /// # Errors
    /// Returns [`Error::NoMethod`] if `name` was never expected,
    /// [`Error::ArgumentMismatch`] if the number of arguments differs from the
    /// expectation and [`Error::ReturnType`] if the return value is not of
    /// type `R`.
    pub fn call<R>(&self, name: &str, args: impl Into<Args>) -> Result<R>
    where
        R: Value + Clone,
    {
        let value = self.call_dyn(name, args)?;

        value
            .downcast_ref::<R>()
            .cloned()
            .ok_or_else(|| Error::ReturnType {
                name: name.into(),
                expected: std::any::type_name::<R>(),
            })
    }

    /// Call the mocked method `name` with the passed `args` and return the
    /// expected return value.
    ///
    /// # Errors
    /// Returns [`Error::NoMethod`] if `name` was never expected and
    /// [`Error::ArgumentMismatch`] if the number of arguments differs from the
    /// expectation.
    pub fn call_dyn(&self, name: &str, args: impl Into<Args>) -> Result<ValueRef> {
        let args = args.into();

        let res = {
            let mut shared = self.shared.lock();

            let res = shared.methods.get(name).map(|method| method(name, &args));

            match res {
                Some(Ok(return_value)) => {
                    shared.calls_mut(name).push(CallRecord {
                        return_value: return_value.clone(),
                        args: args.clone(),
                    });

                    Ok(return_value)
                }
                Some(Err(err)) => Err(err),
                None => Err(Error::NoMethod { name: name.into() }),
            }
        };

        match &res {
            Ok(_) => tracing::trace!(
                mock = self.label(),
                method = name,
                args = ?args,
                "Call intercepted"
            ),
            Err(err) => tracing::debug!(
                mock = self.label(),
                method = name,
                error = %err,
                "Call rejected"
            ),
        }

        res
    }

    /// Verify that all expected methods were called as expected.
    ///
    /// An expectation is met if at least one call of the method was made with
    /// exactly the expected arguments. The number of calls is not checked.
    ///
    /// # Errors
    /// Returns [`Error::Expectation`] for the first expectation (in order of
    /// registration) that was not met.
    pub fn verify(&self) -> Result<bool> {
        let checks = {
            let shared = self.shared.lock();

            shared
                .expected
                .iter()
                .map(|expected| {
                    let calls = shared
                        .actual
                        .get(expected.name())
                        .cloned()
                        .unwrap_or_default();

                    (expected.clone(), calls)
                })
                .collect::<Vec<_>>()
        };

        for (expected, calls) in &checks {
            if !calls.iter().any(|call| expected.is_met_by(call)) {
                tracing::debug!(
                    mock = self.label(),
                    method = expected.name(),
                    expectation = %expected,
                    "Expectation not met"
                );

                return Err(MockExpectationError {
                    name: expected.name().into(),
                    expected: expected.to_string(),
                }
                .into());
            }
        }

        tracing::debug!(mock = self.label(), "All expectations met");

        Ok(true)
    }

    /// Returns `true` if the mock handles calls to `name`, `false` otherwise.
    ///
    /// This is the case for every expected method and for the methods of the
    /// [`MockObject`] itself.
    #[must_use]
    pub fn responds_to(&self, name: &str) -> bool {
        self.shared.lock().methods.contains_key(name) || INNATE_METHODS.contains(&name)
    }

    /// Get the calls that were made to the method `name` so far.
    #[must_use]
    pub fn calls(&self, name: &str) -> Vec<CallRecord> {
        self.shared
            .lock()
            .actual
            .get(name)
            .cloned()
            .unwrap_or_default()
    }

    /// Verify the expectations when the last handle of this mock is dropped.
    ///
    /// Dropping the mock panics if [`verify`](Self::verify) fails.
    pub fn verify_on_drop(self) -> Self {
        self.shared.lock().check_on_drop = true;

        self
    }

    /// Disable the verification on drop for this handle and drop it.
    ///
    /// Other handles of the same mock still verify when they are dropped.
    pub fn release(mut self) {
        self.released = true;

        drop(self);
    }

    fn label(&self) -> String {
        self.shared
            .lock()
            .name
            .clone()
            .unwrap_or_else(|| "<anonymous>".into())
    }
}

impl Clone for MockObject {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
            released: false,
        }
    }
}

impl Debug for MockObject {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let (name, expected, actual) = {
            let shared = self.shared.lock();

            (
                shared.name.clone(),
                shared.expected.clone(),
                shared.actual.clone(),
            )
        };

        f.debug_struct("MockObject")
            .field("name", &name)
            .field("expected", &expected)
            .field("actual", &actual)
            .finish_non_exhaustive()
    }
}

impl Drop for MockObject {
    fn drop(&mut self) {
        if self.released || Arc::strong_count(&self.shared) > 1 || std::thread::panicking() {
            return;
        }

        if !self.shared.lock().check_on_drop {
            return;
        }

        if let Err(err) = self.verify() {
            panic!(
                "Mock object `{}` was not called as expected: {err}",
                self.label()
            );
        }
    }
}

impl Shared {
    fn calls_mut(&mut self, name: &str) -> &mut Vec<CallRecord> {
        self.actual.entry(name.to_owned()).or_default()
    }
}

/// Methods of the [`MockObject`] itself, reported by
/// [`responds_to`](MockObject::responds_to).
const INNATE_METHODS: &[&str] = &[
    "new",
    "default",
    "named",
    "name",
    "expect",
    "call",
    "call_dyn",
    "verify",
    "responds_to",
    "calls",
    "verify_on_drop",
    "release",
    "clone",
    "fmt",
];

#[cfg(test)]
mod tests {
    use crate::{args, Error};

    use super::{MockObject, INNATE_METHODS};

    #[test]
    fn expect_installs_method() {
        let mock = MockObject::new();
        assert!(!mock.responds_to("sum"));

        mock.expect("sum", 3, args![1, 2]);

        assert!(mock.responds_to("sum"));
        assert_eq!(3, mock.call::<i32>("sum", args![1, 2]).unwrap());
    }

    #[test]
    fn innate_methods_are_reported() {
        let mock = MockObject::new();

        assert!(mock.responds_to("expect"));
        assert!(mock.responds_to("verify"));
        assert!(mock.responds_to("responds_to"));
        assert!(!mock.responds_to("unknown"));
    }

    #[test]
    fn innate_methods_cover_public_api() {
        let mock = MockObject::default();
        let named = MockObject::named("mock");
        let _ = MockObject::new();

        mock.expect("f", 1, ());
        let _ = mock.call::<i32>("f", ());
        let _ = mock.call_dyn("f", ());
        let _ = mock.verify();
        let _ = mock.calls("f");
        let _ = named.name();
        let _ = format!("{mock:?}");
        mock.clone().verify_on_drop().release();
        named.release();

        for method in [
            "new",
            "default",
            "named",
            "name",
            "expect",
            "call",
            "call_dyn",
            "verify",
            "responds_to",
            "calls",
            "verify_on_drop",
            "release",
            "clone",
            "fmt",
        ] {
            assert!(mock.responds_to(method), "missing innate method `{method}`");
        }

        assert_eq!(14, INNATE_METHODS.len());
    }

    #[test]
    fn calls_are_logged_in_order() {
        let mock = MockObject::new();
        mock.expect("sum", 3, args![1, 2]);

        mock.call_dyn("sum", args![1, 2]).unwrap();
        mock.call_dyn("sum", args![4, 5]).unwrap();

        let calls = mock.calls("sum");
        assert_eq!(2, calls.len());
        assert_eq!(args![1, 2], calls[0].args);
        assert_eq!(args![4, 5], calls[1].args);
    }

    #[test]
    fn rejected_calls_are_not_logged() {
        let mock = MockObject::new();
        mock.expect("sum", 3, args![1, 2]);

        assert!(mock.call_dyn("sum", args![1]).is_err());
        assert!(mock.call_dyn("other", ()).is_err());

        assert!(mock.calls("sum").is_empty());
        assert!(mock.calls("other").is_empty());
    }

    #[test]
    fn wrong_return_type() {
        let mock = MockObject::new();
        mock.expect("sum", 3_u8, args![1, 2]);

        let err = mock.call::<i32>("sum", args![1, 2]).unwrap_err();

        assert_eq!(
            Error::ReturnType {
                name: "sum".into(),
                expected: "i32",
            },
            err
        );
        assert_eq!(1, mock.calls("sum").len());
    }

    #[test]
    fn verify_reports_in_registration_order() {
        let mock = MockObject::new();
        mock.expect("b", (), ()).expect("a", (), ());

        let err = mock.verify().unwrap_err();

        assert_eq!("expected b, {retval: (), args: []}", err.to_string());
    }

    #[test]
    fn debug_shows_name() {
        let mock = MockObject::named("mailer");

        assert_eq!(Some("mailer".to_owned()), mock.name());
        assert!(format!("{mock:?}").contains("mailer"));
    }
}
