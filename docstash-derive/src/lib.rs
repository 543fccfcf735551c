#![recursion_limit = "128"]
//! # docstash Derive Macros
//!
//! Procedural macros implementing the `docstash` storage traits.
//!
//! ## Macros
//!
//! ### `Packable`
//!
//! Implements `docstash::storable::Packable` through serde: `pack` serializes
//! the struct to a BSON record and `unpack` deserializes it back after
//! applying the unpack options. The struct must also derive (or implement)
//! `serde::Serialize` and `serde::Deserialize`.
//!
//! ### `Storable`
//!
//! Implements `docstash::storable::Storable` from a `#[storage(...)]`
//! attribute:
//!
//! | key                  | type   | required |
//! |----------------------|--------|----------|
//! | `key`                | string | yes      |
//! | `database`           | string | yes      |
//! | `collection`         | string | yes      |
//! | `host`               | string | no       |
//! | `port`               | int    | no       |
//! | `connect_timeout_ms` | int    | no       |
//! | `socket_timeout_ms`  | int    | no       |
//! | `journal`            | bool   | no       |
//!
//! `key` must name a field of the struct (its serialized name, so
//! `#[serde(rename)]` is honoured).
//!
//! # Examples
//!
//! ```rust,ignore
//! use docstash_derive::{Packable, Storable};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, Packable, Storable)]
//! #[storage(key = "doc_id", database = "library", collection = "papers", port = 27018)]
//! pub struct Paper {
//!     pub doc_id: String,
//!     pub title: String,
//! }
//! ```

extern crate proc_macro;
mod packable;
mod storable;

use crate::packable::generate_packable;
use crate::storable::generate_storable_for_struct;
use proc_macro::TokenStream;
use syn::{Data, DeriveInput};

/// Derives `Packable` by delegating to `docstash::storable::serde_pack`.
///
/// # Errors
///
/// Returns a compile error for enums, unions, tuple structs and unit
/// structs: a record is always a map of named fields.
#[proc_macro_derive(Packable)]
pub fn derive_packable(input: TokenStream) -> TokenStream {
    let ast = syn::parse_macro_input!(input as DeriveInput);

    match ast.data {
        Data::Struct(ref data) => match generate_packable(&ast, &data.fields) {
            Ok(token_stream) => token_stream,
            Err(e) => {
                let error = syn::Error::new_spanned(
                    &ast,
                    format!("Failed to derive Packable for struct '{}': {}", ast.ident, e),
                );
                error.to_compile_error().into()
            }
        },
        Data::Enum(_) => {
            let error = syn::Error::new_spanned(
                &ast,
                "Cannot derive Packable for enums. Only structs with named fields are supported.",
            );
            error.to_compile_error().into()
        }
        Data::Union(_) => {
            let error = syn::Error::new_spanned(
                &ast,
                "Cannot derive Packable for unions. Only structs with named fields are supported.",
            );
            error.to_compile_error().into()
        }
    }
}

/// Derives `Storable` from a `#[storage(...)]` attribute.
///
/// # Errors
///
/// Returns a compile error if the attribute is missing, a required key is
/// absent or empty, an unknown key is used, or `key` names no field.
#[proc_macro_derive(Storable, attributes(storage))]
pub fn derive_storable(input: TokenStream) -> TokenStream {
    let ast = syn::parse_macro_input!(input as DeriveInput);

    match ast.data {
        Data::Struct(ref data) => match generate_storable_for_struct(&ast, data) {
            Ok(token_stream) => token_stream,
            Err(e) => {
                let error = syn::Error::new_spanned(
                    &ast,
                    format!("Failed to derive Storable for struct '{}': {}", ast.ident, e),
                );
                error.to_compile_error().into()
            }
        },
        Data::Enum(_) => {
            let error = syn::Error::new_spanned(
                &ast,
                "Cannot derive Storable for enums. Only structs are supported.",
            );
            error.to_compile_error().into()
        }
        Data::Union(_) => {
            let error = syn::Error::new_spanned(
                &ast,
                "Cannot derive Storable for unions. Only structs are supported.",
            );
            error.to_compile_error().into()
        }
    }
}
