//! Implementation of #[derive(Reflect)] proc-macro.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Fields, GenericParam, Index, Member};

pub fn derive_reflect_impl(input: TokenStream) -> TokenStream {
    let mut input = parse_macro_input!(input as DeriveInput);

    for param in input.generics.params.iter_mut() {
        if let GenericParam::Type(param) = param {
            param.bounds.push(parse_quote!(::boot::Reflect));
        }
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let body = match &input.data {
        Data::Struct(data) => struct_body(&data.fields),
        Data::Enum(_) => quote! {
            ::boot::Type::opaque::<Self>()
        },
        Data::Union(_) => {
            return syn::Error::new_spanned(&input, "Reflect cannot be derived for unions")
                .to_compile_error()
                .into();
        }
    };

    let expanded = quote! {
        impl #impl_generics ::boot::Reflect for #name #ty_generics #where_clause {
            fn type_of() -> ::boot::Type {
                #body
            }
        }
    };

    TokenStream::from(expanded)
}

fn struct_body(fields: &Fields) -> TokenStream2 {
    let descriptors = fields.iter().enumerate().map(|(index, field)| {
        let field_type = &field.ty;
        let (member, field_name) = match &field.ident {
            Some(ident) => (Member::Named(ident.clone()), ident.unraw().to_string()),
            None => (Member::Unnamed(Index::from(index)), index.to_string()),
        };

        quote! {
            ::boot::Field::new(
                #field_name,
                <#field_type as ::boot::Reflect>::type_of,
                |value| {
                    value
                        .downcast_ref::<Self>()
                        .map(|this| &this.#member as &dyn ::std::any::Any)
                },
            )
        }
    });

    quote! {
        ::boot::Type::structure::<Self>(::std::vec![#(#descriptors),*])
    }
}
