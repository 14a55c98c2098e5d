use proc_macro2::{Ident, TokenStream};
use quote::{quote, ToTokens};
use syn::{
    parse::{Parse, ParseStream},
    parse2,
    punctuated::Punctuated,
    spanned::Spanned,
    token::Comma,
    Error, Expr, ExprCall, Result as ParseResult, Token,
};

use crate::misc::{ident_dynmock, method_name};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(crate) enum CallMode {
    Expect,
    Call,
}

pub(crate) fn exec(input: TokenStream, mode: CallMode) -> TokenStream {
    let call: Call = match parse2(input) {
        Ok(call) => call,
        Err(err) => {
            return err.to_compile_error();
        }
    };

    if let Err(err) = call.check(mode) {
        return err.to_compile_error();
    }

    call.into_token_stream()
}

struct Call {
    obj: Box<Expr>,
    method: Ident,
    args: Punctuated<Expr, Comma>,
    ret: Option<Expr>,
}

impl Call {
    fn check(&self, mode: CallMode) -> ParseResult<()> {
        match (mode, &self.ret) {
            (CallMode::Expect, None) => Err(Error::new(
                self.method.span(),
                "Expect return value: `expect_call!(mock, method(args..) => value)`",
            )),
            (CallMode::Call, Some(ret)) => Err(Error::new(
                ret.span(),
                "Unexpected return value: `call!(mock, method(args..))`",
            )),
            (_, _) => Ok(()),
        }
    }
}

impl Parse for Call {
    fn parse(input: ParseStream<'_>) -> ParseResult<Self> {
        let obj = Box::new(input.parse()?);

        input.parse::<Token![,]>()?;

        let call: ExprCall = input.parse()?;

        let method = if let Expr::Path(p) = *call.func {
            if let Some(method) = p.path.get_ident() {
                method.clone()
            } else {
                return Err(Error::new(p.span(), "Expect method identifier"));
            }
        } else {
            return Err(input.error("Expect method identifier"));
        };

        let args = call.args;

        let ret = if input.peek(Token![=>]) {
            input.parse::<Token![=>]>()?;

            Some(input.parse()?)
        } else {
            None
        };

        if !input.is_empty() {
            return Err(input.error("Unexpected tokens after mocked call"));
        }

        Ok(Self {
            obj,
            method,
            args,
            ret,
        })
    }
}

impl ToTokens for Call {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let Self {
            obj,
            method,
            args,
            ret,
        } = self;

        let dynmock = ident_dynmock();
        let name = method_name(method);
        let args = args.iter();
        let args = quote!(#dynmock::args![ #( #args ),* ]);

        tokens.extend(if let Some(ret) = ret {
            quote! {
                #obj.expect(#name, #ret, #args)
            }
        } else {
            quote! {
                #obj.call(#name, #args)
            }
        });

        #[cfg(feature = "debug")]
        println!("\nexpect_call!:\n{tokens:#}\n");
    }
}

#[cfg(test)]
mod tests {
    use quote::quote;
    use syn::parse2;

    use super::{Call, CallMode};

    #[test]
    fn parse_expectation() {
        let call: Call = parse2(quote!(mock, sum(1, 2) => 3)).unwrap();

        assert_eq!("sum", call.method.to_string());
        assert_eq!(2, call.args.len());
        assert!(call.ret.is_some());
        assert!(call.check(CallMode::Expect).is_ok());
        assert!(call.check(CallMode::Call).is_err());
    }

    #[test]
    fn parse_call_without_args() {
        let call: Call = parse2(quote!(self.inner, meaning_of_life())).unwrap();

        assert!(call.args.is_empty());
        assert!(call.ret.is_none());
        assert!(call.check(CallMode::Call).is_ok());
        assert!(call.check(CallMode::Expect).is_err());
    }

    #[test]
    fn reject_path_as_method() {
        assert!(parse2::<Call>(quote!(mock, a::b(1) => 2)).is_err());
    }

    #[test]
    fn reject_trailing_tokens() {
        assert!(parse2::<Call>(quote!(mock, sum(1) => 2, 3)).is_err());
    }
}
