use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, Fields, Result};

pub(crate) fn generate_packable(ast: &DeriveInput, fields: &Fields) -> Result<TokenStream> {
    if !matches!(fields, Fields::Named(_)) {
        return Err(syn::Error::new_spanned(
            ast,
            "Only structs with named fields are supported",
        ));
    }

    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let gen = quote! {
        impl #impl_generics docstash::storable::Packable for #name #ty_generics #where_clause {
            fn pack(&self) -> docstash::errors::DocstashResult<docstash::storable::Record> {
                docstash::storable::serde_pack::pack(self)
            }

            fn unpack(
                record: docstash::storable::Record,
                options: &docstash::storable::UnpackOptions,
            ) -> docstash::errors::DocstashResult<Self> {
                docstash::storable::serde_pack::unpack(record, options)
            }
        }
    };

    Ok(TokenStream::from(gen))
}
