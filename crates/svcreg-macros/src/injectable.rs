//! `#[derive(Injectable)]` implementation

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    Data, DeriveInput, Field, Fields, GenericArgument, PathArguments, Type, parse_macro_input,
};

pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(expanded) => expanded.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            input,
            "Injectable can only be derived for structs",
        ));
    };

    let body = match &data.fields {
        Fields::Named(fields) => {
            let wired = fields
                .named
                .iter()
                .map(|field| {
                    let name = &field.ident;
                    wire(field).map(|value| quote! { #name: #value })
                })
                .collect::<syn::Result<Vec<_>>>()?;
            quote! { Self { #(#wired),* } }
        }
        Fields::Unnamed(fields) => {
            let wired = fields
                .unnamed
                .iter()
                .map(wire)
                .collect::<syn::Result<Vec<_>>>()?;
            quote! { Self(#(#wired),*) }
        }
        Fields::Unit => quote! { Self },
    };

    // Without injected fields the container goes unused
    let (container, ext) = if data.fields.iter().any(is_injected) {
        (
            quote! { container },
            quote! { use ::svcreg::ContractContainerExt as _; },
        )
    } else {
        (quote! { _container }, quote! {})
    };

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::svcreg::Injectable for #ident #ty_generics #where_clause {
            fn inject(
                #container: &dyn ::svcreg::ContractContainer,
            ) -> ::svcreg::Result<Self> {
                #ext
                ::core::result::Result::Ok(#body)
            }
        }
    })
}

/// Expression producing one field's value
fn wire(field: &Field) -> syn::Result<TokenStream2> {
    if !is_injected(field) {
        return Ok(quote! { ::core::default::Default::default() });
    }
    let contract = arc_target(&field.ty).ok_or_else(|| {
        syn::Error::new_spanned(&field.ty, "#[inject] fields must be `Arc<dyn Contract>`")
    })?;
    Ok(quote! { container.resolve_contract::<#contract>()? })
}

fn is_injected(field: &Field) -> bool {
    field.attrs.iter().any(|attr| attr.path().is_ident("inject"))
}

/// `T` in `Arc<T>`
fn arc_target(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    let last = path.path.segments.last()?;
    if last.ident != "Arc" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &last.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner @ Type::TraitObject(_)) => Some(inner),
        _ => None,
    }
}
