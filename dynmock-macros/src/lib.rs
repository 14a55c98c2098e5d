#![warn(
    unused,
    clippy::pedantic,
    future_incompatible,
    missing_debug_implementations,
    nonstandard_style,
    rust_2018_idioms,
    rust_2021_compatibility
)]
#![allow(clippy::module_name_repetitions)]

use expect_call::CallMode;
use proc_macro::TokenStream;

mod expect_call;
mod misc;

/// Expect a call on a `MockObject`.
///
/// `expect_call!(mock, method(a, b) => ret)` registers `method` with the
/// arguments `a` and `b` and the return value `ret`.
#[proc_macro]
pub fn expect_call(input: TokenStream) -> TokenStream {
    expect_call::exec(input.into(), CallMode::Expect).into()
}

/// Call a mocked method of a `MockObject`.
///
/// `call!(mock, method(a, b))` evaluates to the `Result` of the call.
#[proc_macro]
pub fn call(input: TokenStream) -> TokenStream {
    expect_call::exec(input.into(), CallMode::Call).into()
}
