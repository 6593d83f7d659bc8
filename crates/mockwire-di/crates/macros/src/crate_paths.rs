//! Dynamic crate path resolution for generated code

use proc_macro2::TokenStream;
use quote::quote;

/// Resolves the path to the mockwire_di crate.
///
/// Direct dependents get `::mockwire_di` (or their renamed import); users of the
/// facade crate get `::mockwire::di`. Inside mockwire-di itself the crate root
/// declares `extern crate self as mockwire_di`, so the absolute path works there
/// as well.
pub(crate) fn get_mockwire_di_crate() -> TokenStream {
	use proc_macro_crate::{FoundCrate, crate_name};

	match crate_name("mockwire-di") {
		Ok(FoundCrate::Itself) => return quote!(::mockwire_di),
		Ok(FoundCrate::Name(name)) => {
			let ident = syn::Ident::new(&name, proc_macro2::Span::call_site());
			return quote!(::#ident);
		}
		Err(_) => {}
	}

	match crate_name("mockwire") {
		Ok(FoundCrate::Itself) => return quote!(crate::di),
		Ok(FoundCrate::Name(name)) => {
			let ident = syn::Ident::new(&name, proc_macro2::Span::call_site());
			return quote!(::#ident::di);
		}
		Err(_) => {}
	}

	// Final fallback
	quote!(::mockwire::di)
}
