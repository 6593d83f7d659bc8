//! Procedural macros for mockwire dependency discovery
//!
//! - `#[discoverable]` on an inherent `impl` block describes the type's public
//!   constructors
//! - `#[discoverable]` on a trait marks `dyn Trait` as an abstraction

use proc_macro::TokenStream;
use syn::{Item, parse_macro_input};

mod crate_paths;
mod discoverable;

/// Implement `Discoverable` from an impl block or a trait
///
/// # Example
///
/// ```ignore
/// use mockwire_di::discoverable;
/// use std::sync::Arc;
///
/// #[discoverable]
/// pub trait Repository: Send + Sync {
///     fn find(&self, id: u32) -> Option<String>;
/// }
///
/// #[derive(Clone)]
/// pub struct Settings {
///     pub page_size: usize,
/// }
///
/// #[discoverable]
/// impl Settings {
///     pub fn new() -> Self {
///         Self { page_size: 20 }
///     }
/// }
///
/// pub struct UserService {
///     repo: Arc<dyn Repository>,
///     settings: Settings,
/// }
///
/// #[discoverable]
/// impl UserService {
///     pub fn new(repo: Arc<dyn Repository>, settings: Settings) -> Self {
///         Self { repo, settings }
///     }
/// }
/// ```
///
/// # Constructors
///
/// Every `pub fn` without a receiver or generic parameters that returns `Self`
/// (or the type by name) is a constructor, in declaration order. An impl block
/// without any describes an unconstructible type.
///
/// A parameter of type `Arc<T>` is resolved as the service `T` and passed as
/// the shared `Arc`. Any other parameter type `T` is resolved as the service `T`
/// and passed as a clone, so it must implement `Clone`. Reference parameters are
/// rejected.
///
/// # Traits
///
/// The trait must not be generic and must list `Send` and `Sync` among its
/// supertraits. When combined with `#[mockall::automock]`, put
/// `#[discoverable]` first.
#[proc_macro_attribute]
pub fn discoverable(args: TokenStream, input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as Item);

	discoverable::discoverable_impl(args.into(), input)
		.unwrap_or_else(|e| e.to_compile_error())
		.into()
}
