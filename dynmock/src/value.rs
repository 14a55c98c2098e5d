//! The [`value`](self) module contains the dynamically typed values that are
//! passed to and returned from a [`MockObject`](crate::MockObject).

use std::any::{type_name, Any};
use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::ops::Deref;
use std::slice::Iter;
use std::sync::Arc;

/// Dynamically typed value that can be used as argument or return value of
/// a mocked method.
///
/// This trait is implemented for any type that is [`Debug`], [`PartialEq`],
/// [`Send`] and [`Sync`].
pub trait Value: Any + Debug + Send + Sync {
    /// Get the value as [`Any`] to be able to downcast it.
    fn as_any(&self) -> &dyn Any;

    /// Returns `true` if `other` has the same concrete type as `self` and both
    /// values are equal, `false` otherwise.
    fn eq_value(&self, other: &dyn Value) -> bool;

    /// Name of the concrete type of the value.
    fn type_name(&self) -> &'static str;
}

impl<T> Value for T
where
    T: Any + Debug + PartialEq + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_value(&self, other: &dyn Value) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }
}

/// Shared reference to a [`Value`].
#[derive(Clone)]
pub struct ValueRef(Arc<dyn Value>);

impl ValueRef {
    /// Create a new [`ValueRef`] from the passed `value`.
    ///
    /// If `value` already is a [`ValueRef`] the inner value is shared instead
    /// of being wrapped again.
    pub fn new<T: Value>(value: T) -> Self {
        if let Some(value) = (&value as &dyn Any).downcast_ref::<ValueRef>() {
            return value.clone();
        }

        Self(Arc::new(value))
    }

    /// Returns a reference to the inner value if it is of type `T`.
    #[must_use]
    pub fn downcast_ref<T: Value>(&self) -> Option<&T> {
        (*self.0).as_any().downcast_ref()
    }

    /// Returns `true` if the inner value is of type `T`.
    #[must_use]
    pub fn is<T: Value>(&self) -> bool {
        (*self.0).as_any().is::<T>()
    }

    /// Name of the concrete type of the inner value.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        (*self.0).type_name()
    }
}

impl PartialEq for ValueRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || (*self.0).eq_value(&*other.0)
    }
}

impl Debug for ValueRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(&*self.0, f)
    }
}

/// Ordered list of positional arguments of a method call.
///
/// The length of the list is the arity of the call.
#[derive(Default, Clone, PartialEq)]
pub struct Args(Vec<ValueRef>);

impl Args {
    /// Create a new empty argument list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a argument to the end of the list.
    #[must_use]
    pub fn arg<T: Value>(mut self, value: T) -> Self {
        self.0.push(ValueRef::new(value));

        self
    }

    /// Returns an iterator over the arguments.
    pub fn iter(&self) -> Iter<'_, ValueRef> {
        self.0.iter()
    }
}

impl Deref for Args {
    type Target = [ValueRef];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Debug for Args {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_list().entries(&self.0).finish()
    }
}

impl From<()> for Args {
    fn from((): ()) -> Self {
        Self::new()
    }
}

impl From<Vec<ValueRef>> for Args {
    fn from(value: Vec<ValueRef>) -> Self {
        Self(value)
    }
}

impl FromIterator<ValueRef> for Args {
    fn from_iter<I: IntoIterator<Item = ValueRef>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Args {
    type Item = &'a ValueRef;
    type IntoIter = Iter<'a, ValueRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Create an [`Args`] list from the passed expressions.
///
/// ```
/// use dynmock::args;
///
/// let args = args![1, "two", 3.0];
/// assert_eq!(3, args.len());
/// assert_eq!(args, args![1, "two", 3.0]);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::Args::new()
    };
    ($( $arg:expr ),+ $(,)?) => {
        $crate::Args::from(::std::vec![$( $crate::ValueRef::new($arg) ),+])
    };
}

#[cfg(test)]
mod tests {
    use super::{Args, ValueRef};

    #[test]
    fn same_type_and_value_is_equal() {
        assert_eq!(ValueRef::new(42), ValueRef::new(42));
        assert_ne!(ValueRef::new(42), ValueRef::new(43));
    }

    #[test]
    fn different_types_are_never_equal() {
        assert_ne!(ValueRef::new(42_i32), ValueRef::new(42_i64));
        assert_ne!(ValueRef::new("42"), ValueRef::new(String::from("42")));
    }

    #[test]
    fn nested_value_ref_is_shared() {
        let inner = ValueRef::new(vec![1, 2, 3]);
        let outer = ValueRef::new(inner.clone());

        assert!(outer.is::<Vec<i32>>());
        assert_eq!(Some(&vec![1, 2, 3]), outer.downcast_ref::<Vec<i32>>());
        assert_eq!(inner, outer);
    }

    #[test]
    fn debug_renders_inner_values() {
        let args = Args::new().arg(1).arg("two");

        assert_eq!(r#"[1, "two"]"#, format!("{args:?}"));
        assert_eq!("\"two\"", format!("{:?}", args[1]));
    }

    #[test]
    fn args_compare_in_order() {
        assert_eq!(args![1, 2], Args::new().arg(1).arg(2));
        assert_ne!(args![1, 2], args![2, 1]);
        assert_ne!(args![1, 2], args![1, 2, 3]);
        assert_eq!(Args::from(()), args![]);
    }
}
