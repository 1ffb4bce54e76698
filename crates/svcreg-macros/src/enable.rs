//! `#[enable_contracts]` implementation

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, LitStr, parse_macro_input};

pub fn enable_contracts(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut roots: Vec<LitStr> = Vec::new();
    let parser = syn::meta::parser(|meta| {
        if meta.path.is_ident("roots") {
            let array: syn::ExprArray = meta.value()?.parse()?;
            for element in array.elems {
                match element {
                    syn::Expr::Lit(syn::ExprLit {
                        lit: syn::Lit::Str(root),
                        ..
                    }) => roots.push(root),
                    other => {
                        return Err(syn::Error::new_spanned(
                            other,
                            "roots must be string literals",
                        ));
                    }
                }
            }
            Ok(())
        } else {
            Err(meta.error("unknown enable_contracts argument, expected `roots`"))
        }
    });
    parse_macro_input!(attr with parser);

    let unchanged = proc_macro2::TokenStream::from(item.clone());
    let input = parse_macro_input!(item as DeriveInput);
    let ident = &input.ident;
    let name = ident.to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        #unchanged

        impl #impl_generics #ident #ty_generics #where_clause {
            /// Namespaces contract discovery starts from
            pub fn scan_roots() -> ::svcreg::ScanRoots {
                ::svcreg::ScanRoots::explicit_or_inferred::<&str>(
                    &[#(#roots),*],
                    &::svcreg::ContractIdentity::new(::core::concat!(
                        ::core::module_path!(),
                        "::",
                        #name
                    )),
                )
            }
        }
    };
    expanded.into()
}
