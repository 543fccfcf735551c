use proc_macro::TokenStream;
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::{DataStruct, DeriveInput, Fields, LitBool, LitInt, LitStr, Result, Token};

#[derive(Default)]
struct StorageAttributes {
    key: Option<String>,
    database: Option<String>,
    collection: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    connect_timeout_ms: Option<u64>,
    socket_timeout_ms: Option<u64>,
    journal: Option<bool>,
}

pub(crate) fn generate_storable_for_struct(
    ast: &DeriveInput,
    data: &DataStruct,
) -> Result<TokenStream> {
    let name = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let mut storage = StorageAttributes::default();
    let mut found = false;
    for attr in &ast.attrs {
        if attr.path().is_ident("storage") {
            found = true;
            attr.parse_nested_meta(|meta| parse_storage_meta(&mut storage, meta))?;
        }
    }
    if !found {
        return Err(syn::Error::new_spanned(
            ast,
            "Missing #[storage(key = \"...\", database = \"...\", collection = \"...\")] attribute",
        ));
    }

    let key = required(ast, storage.key, "key")?;
    let database = required(ast, storage.database, "database")?;
    let collection = required(ast, storage.collection, "collection")?;
    check_key_field(ast, data, &key)?;

    let mut settings = Vec::new();
    if let Some(host) = storage.host {
        settings.push(quote! { .host(#host) });
    }
    if let Some(port) = storage.port {
        settings.push(quote! { .port(#port) });
    }
    if let Some(timeout) = storage.connect_timeout_ms {
        settings.push(quote! { .connect_timeout_ms(#timeout) });
    }
    if let Some(timeout) = storage.socket_timeout_ms {
        settings.push(quote! { .socket_timeout_ms(#timeout) });
    }
    if let Some(journal) = storage.journal {
        settings.push(quote! { .journal(#journal) });
    }

    let gen = quote! {
        impl #impl_generics docstash::storable::Storable for #name #ty_generics #where_clause {
            fn storage_config() -> docstash::errors::DocstashResult<docstash::storage_config::StorageConfig> {
                docstash::storage_config::StorageConfig::builder()
                    .key_attr(#key)
                    .database(#database)
                    .collection(#collection)
                    #(#settings)*
                    .build()
            }
        }
    };

    Ok(TokenStream::from(gen))
}

fn parse_storage_meta(storage: &mut StorageAttributes, meta: ParseNestedMeta) -> Result<()> {
    if meta.path.is_ident("key") {
        storage.key = Some(non_empty(&meta, meta.value()?.parse::<LitStr>()?)?);
    } else if meta.path.is_ident("database") {
        storage.database = Some(non_empty(&meta, meta.value()?.parse::<LitStr>()?)?);
    } else if meta.path.is_ident("collection") {
        storage.collection = Some(non_empty(&meta, meta.value()?.parse::<LitStr>()?)?);
    } else if meta.path.is_ident("host") {
        storage.host = Some(non_empty(&meta, meta.value()?.parse::<LitStr>()?)?);
    } else if meta.path.is_ident("port") {
        storage.port = Some(meta.value()?.parse::<LitInt>()?.base10_parse::<u16>()?);
    } else if meta.path.is_ident("connect_timeout_ms") {
        storage.connect_timeout_ms = Some(meta.value()?.parse::<LitInt>()?.base10_parse::<u64>()?);
    } else if meta.path.is_ident("socket_timeout_ms") {
        storage.socket_timeout_ms = Some(meta.value()?.parse::<LitInt>()?.base10_parse::<u64>()?);
    } else if meta.path.is_ident("journal") {
        storage.journal = Some(meta.value()?.parse::<LitBool>()?.value);
    } else {
        return Err(meta.error("Unknown storage attribute"));
    }
    Ok(())
}

fn non_empty(meta: &ParseNestedMeta, value: LitStr) -> Result<String> {
    let value = value.value();
    if value.trim().is_empty() {
        return Err(meta.error("Storage attribute value cannot be empty"));
    }
    Ok(value)
}

fn required(ast: &DeriveInput, value: Option<String>, name: &str) -> Result<String> {
    value.ok_or_else(|| {
        syn::Error::new_spanned(ast, format!("Missing required storage attribute `{}`", name))
    })
}

/// The key must name a field, as serialized. Only the first segment of a
/// dotted key is checked, and a container-level `rename_all` disables the
/// check since the serialized names are no longer visible here.
fn check_key_field(ast: &DeriveInput, data: &DataStruct, key: &str) -> Result<()> {
    let named = match &data.fields {
        Fields::Named(named) => named,
        _ => {
            return Err(syn::Error::new_spanned(
                ast,
                "Only structs with named fields are supported",
            ))
        }
    };

    if has_serde_rename_all(ast)? {
        return Ok(());
    }

    let root = key.split('.').next().unwrap_or(key);
    for field in &named.named {
        let serialized = match serde_rename(field)? {
            Some(rename) => rename,
            None => field
                .ident
                .as_ref()
                .map(|ident| ident.to_string().trim_start_matches("r#").to_string())
                .unwrap_or_default(),
        };
        if serialized == root {
            return Ok(());
        }
    }

    Err(syn::Error::new_spanned(
        ast,
        format!("Key field {} not found in struct", root),
    ))
}

fn has_serde_rename_all(ast: &DeriveInput) -> Result<bool> {
    let mut rename_all = false;
    for attr in &ast.attrs {
        if attr.path().is_ident("serde") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename_all") {
                    rename_all = true;
                }
                skip_meta(&meta)
            })?;
        }
    }
    Ok(rename_all)
}

fn serde_rename(field: &syn::Field) -> Result<Option<String>> {
    let mut rename = None;
    for attr in &field.attrs {
        if attr.path().is_ident("serde") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") && meta.input.peek(Token![=]) {
                    let value: LitStr = meta.value()?.parse()?;
                    rename = Some(value.value());
                    Ok(())
                } else {
                    skip_meta(&meta)
                }
            })?;
        }
    }
    Ok(rename)
}

fn skip_meta(meta: &ParseNestedMeta) -> Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<syn::Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        meta.parse_nested_meta(|inner| skip_meta(&inner))?;
    }
    Ok(())
}
