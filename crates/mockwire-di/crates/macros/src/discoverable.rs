//! Implementation of the `#[discoverable]` attribute

use crate::crate_paths::get_mockwire_di_crate;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{
	FnArg, GenericArgument, ImplItem, ImplItemFn, Item, ItemImpl, ItemTrait, PathArguments,
	Result, ReturnType, Type, TypeParamBound, Visibility,
};

pub(crate) fn discoverable_impl(args: TokenStream, item: Item) -> Result<TokenStream> {
	if !args.is_empty() {
		return Err(syn::Error::new_spanned(
			args,
			"#[discoverable] does not take arguments",
		));
	}

	match item {
		Item::Impl(item_impl) if item_impl.trait_.is_none() => expand_impl(item_impl),
		Item::Impl(item_impl) => Err(syn::Error::new_spanned(
			&item_impl.self_ty,
			"#[discoverable] must be applied to an inherent impl block, not a trait impl",
		)),
		Item::Trait(item_trait) => expand_trait(item_trait),
		other => Err(syn::Error::new_spanned(
			other,
			"#[discoverable] can only be applied to inherent impl blocks and traits",
		)),
	}
}

/// One resolved constructor parameter.
struct Param {
	/// Service type requested from the container
	service: Type,
	/// Whether the constructor takes the `Arc` itself or a clone of the value
	shared: bool,
}

fn expand_impl(item_impl: ItemImpl) -> Result<TokenStream> {
	let di = get_mockwire_di_crate();
	let self_ty = &item_impl.self_ty;
	let (impl_generics, _, where_clause) = item_impl.generics.split_for_impl();

	let mut constructors = Vec::new();
	for method in item_impl.items.iter().filter_map(|item| match item {
		ImplItem::Fn(method) => Some(method),
		_ => None,
	}) {
		if !is_public_constructor(method, self_ty) {
			continue;
		}

		let name = &method.sig.ident;
		let params = method
			.sig
			.inputs
			.iter()
			.map(classify_param)
			.collect::<Result<Vec<_>>>()?;

		let infos = params.iter().map(|param| {
			let service = &param.service;
			quote! { #di::TypeInfo::of::<#service>() }
		});
		let args = params.iter().map(|param| {
			let service = &param.service;
			if param.shared {
				quote! { __container.resolve::<#service>()? }
			} else {
				quote! { ::std::clone::Clone::clone(&*__container.resolve::<#service>()?) }
			}
		});

		constructors.push(quote! {
			#di::Constructor::new::<Self, _>(
				stringify!(#name),
				::std::vec![#(#infos),*],
				|__container: &#di::Container| {
					::std::result::Result::Ok(::std::sync::Arc::new(Self::#name(#(#args),*)))
				},
			)
		});
	}

	Ok(quote! {
		#item_impl

		impl #impl_generics #di::Discoverable for #self_ty #where_clause {
			fn shape() -> #di::Shape {
				#di::Shape::Concrete(::std::vec![#(#constructors),*])
			}
		}
	})
}

/// `pub fn` without receiver or generics returning `Self` or the impl's type.
fn is_public_constructor(method: &ImplItemFn, self_ty: &Type) -> bool {
	let sig = &method.sig;
	matches!(method.vis, Visibility::Public(_))
		&& sig.asyncness.is_none()
		&& sig.unsafety.is_none()
		&& sig.generics.params.is_empty()
		&& sig.receiver().is_none()
		&& returns_self(&sig.output, self_ty)
}

fn returns_self(output: &ReturnType, self_ty: &Type) -> bool {
	let ReturnType::Type(_, ty) = output else {
		return false;
	};
	let Type::Path(returned) = ty.as_ref() else {
		return false;
	};
	if returned.qself.is_some() {
		return false;
	}
	if returned.path.is_ident("Self") {
		return true;
	}
	match (returned.path.segments.last(), last_segment_ident(self_ty)) {
		(Some(segment), Some(ident)) => segment.ident == *ident,
		_ => false,
	}
}

fn last_segment_ident(ty: &Type) -> Option<&syn::Ident> {
	match ty {
		Type::Path(path) => path.path.segments.last().map(|segment| &segment.ident),
		_ => None,
	}
}

fn classify_param(arg: &FnArg) -> Result<Param> {
	let FnArg::Typed(pat_type) = arg else {
		return Err(syn::Error::new_spanned(arg, "constructors cannot take a receiver"));
	};

	match pat_type.ty.as_ref() {
		Type::Reference(reference) => Err(syn::Error::new_spanned(
			reference,
			"constructor parameters cannot be references; take `Arc<T>` or an owned `Clone` type",
		)),
		ty => Ok(match arc_inner(ty) {
			Some(inner) => Param {
				service: inner.clone(),
				shared: true,
			},
			None => Param {
				service: ty.clone(),
				shared: false,
			},
		}),
	}
}

/// Returns `T` for `Arc<T>`, `sync::Arc<T>` or `std::sync::Arc<T>`.
fn arc_inner(ty: &Type) -> Option<&Type> {
	let Type::Path(path) = ty else {
		return None;
	};
	let segment = path.path.segments.last()?;
	if segment.ident != "Arc" {
		return None;
	}
	let PathArguments::AngleBracketed(generic) = &segment.arguments else {
		return None;
	};
	match generic.args.first() {
		Some(GenericArgument::Type(inner)) if generic.args.len() == 1 => Some(inner),
		_ => None,
	}
}

fn expand_trait(item_trait: ItemTrait) -> Result<TokenStream> {
	if !item_trait.generics.params.is_empty() {
		return Err(syn::Error::new_spanned(
			&item_trait.generics,
			"#[discoverable] does not support generic traits",
		));
	}

	for required in ["Send", "Sync"] {
		if !has_supertrait(&item_trait, required) {
			return Err(syn::Error::new_spanned(
				&item_trait.ident,
				format!("#[discoverable] traits must have `{required}` as a supertrait"),
			));
		}
	}

	let di = get_mockwire_di_crate();
	let ident = &item_trait.ident;

	Ok(quote! {
		#item_trait

		impl #di::Discoverable for dyn #ident {
			fn shape() -> #di::Shape {
				#di::Shape::Abstract
			}
		}
	})
}

fn has_supertrait(item_trait: &ItemTrait, name: &str) -> bool {
	item_trait.supertraits.iter().any(|bound| match bound {
		TypeParamBound::Trait(bound) => bound
			.path
			.segments
			.last()
			.is_some_and(|segment| segment.ident == name),
		_ => false,
	})
}
