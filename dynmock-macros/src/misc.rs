use proc_macro2::Ident;
use quote::format_ident;
use syn::{ext::IdentExt, LitStr};

/// Name of the mocked method as string literal (without the `r#` prefix of
/// raw identifiers).
pub(crate) fn method_name(method: &Ident) -> LitStr {
    LitStr::new(&method.unraw().to_string(), method.span())
}

#[cfg(feature = "force-name")]
pub(crate) fn ident_dynmock() -> Ident {
    format_ident!("dynmock")
}

#[cfg(not(feature = "force-name"))]
pub(crate) fn ident_dynmock() -> Ident {
    use proc_macro_crate::{crate_name, FoundCrate};

    match crate_name("dynmock") {
        Ok(FoundCrate::Itself) => format_ident!("crate"),
        Ok(FoundCrate::Name(name)) => format_ident!("{name}"),
        Err(_) => format_ident!("dynmock"),
    }
}
