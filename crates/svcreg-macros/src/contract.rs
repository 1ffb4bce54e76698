//! `#[contract]` implementation

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{ToTokens, quote};
use syn::{
    FnArg, GenericParam, Item, ItemTrait, Pat, ReturnType, TraitItem, TraitItemFn,
    parse_macro_input,
};

pub fn contract(attr: TokenStream, item: TokenStream) -> TokenStream {
    let attr = TokenStream2::from(attr);
    if !attr.is_empty() {
        return syn::Error::new_spanned(attr, "#[contract] takes no arguments")
            .to_compile_error()
            .into();
    }

    let input = parse_macro_input!(item as Item);
    let Item::Trait(item) = input else {
        return syn::Error::new_spanned(&input, "#[contract] can only be placed on a trait")
            .to_compile_error()
            .into();
    };

    match expand(&item) {
        Ok(expanded) => expanded.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn expand(item: &ItemTrait) -> syn::Result<TokenStream2> {
    if !item.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &item.generics,
            "contract traits cannot be generic",
        ));
    }

    let mut methods = Vec::new();
    for trait_item in &item.items {
        match trait_item {
            TraitItem::Fn(method) => methods.push(check_method(method)?),
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "contract traits may only declare methods",
                ));
            }
        }
    }

    let ident = &item.ident;
    let name = ident.to_string();

    let proxy_methods = methods.iter().map(|method| {
        let mut sig = method.sig.clone();
        for input in &mut sig.inputs {
            if let FnArg::Typed(typed) = input {
                *typed.pat = Pat::Verbatim(quote!(_));
            }
        }
        let method_name = sig.ident.to_string();
        quote! {
            #sig {
                ::svcreg::StubResult::from_sentinel(self.dispatch(#method_name))
            }
        }
    });

    let signatures = methods.iter().map(|method| {
        let method_name = method.sig.ident.to_string();
        let params = method.sig.inputs.iter().filter_map(|input| match input {
            FnArg::Typed(typed) => Some(render(&typed.ty)),
            FnArg::Receiver(_) => None,
        });
        let returns = match &method.sig.output {
            ReturnType::Default => quote! {},
            ReturnType::Type(_, ty) => {
                let ty = render(ty);
                quote! { .with_return(#ty) }
            }
        };
        quote! {
            ::svcreg::MethodSignature::new(#method_name, ::svcreg::Receiver::Ref)
                #(.with_param(#params))*
                #returns
        }
    });

    Ok(quote! {
        #item

        impl #ident for ::svcreg::ContractProxy {
            #(#proxy_methods)*
        }

        impl ::svcreg::Contract for dyn #ident {
            fn identity() -> ::svcreg::ContractIdentity {
                ::svcreg::ContractIdentity::new(::core::concat!(::core::module_path!(), "::", #name))
            }

            fn surface() -> ::svcreg::ContractSurface {
                ::svcreg::ContractSurface::new(
                    <Self as ::svcreg::Contract>::identity(),
                    ::std::vec![#(#signatures),*],
                )
            }

            fn from_proxy(
                proxy: ::std::sync::Arc<::svcreg::ContractProxy>,
            ) -> ::std::sync::Arc<Self> {
                proxy
            }
        }
    })
}

fn check_method(method: &TraitItemFn) -> syn::Result<&TraitItemFn> {
    if let Some(body) = &method.default {
        return Err(syn::Error::new_spanned(
            body,
            "contract methods cannot have a default body",
        ));
    }
    if let Some(asyncness) = &method.sig.asyncness {
        return Err(syn::Error::new_spanned(
            asyncness,
            "contract methods cannot be async",
        ));
    }
    if let Some(param) = method
        .sig
        .generics
        .params
        .iter()
        .find(|p| !matches!(p, GenericParam::Lifetime(_)))
    {
        return Err(syn::Error::new_spanned(
            param,
            "contract methods cannot have type or const parameters",
        ));
    }
    match method.sig.receiver() {
        Some(receiver) if receiver.reference.is_some() && receiver.mutability.is_none() => {
            Ok(method)
        }
        _ => Err(syn::Error::new_spanned(
            &method.sig,
            "contract methods must take `&self`",
        )),
    }
}

/// Source-like rendering of a type, matching what the scanner records
fn render(ty: &syn::Type) -> String {
    ty.to_token_stream()
        .to_string()
        .replace(" :: ", "::")
        .replace(":: ", "::")
        .replace(" <", "<")
        .replace("< ", "<")
        .replace(" >", ">")
        .replace(" ,", ",")
        .replace("& ", "&")
}
