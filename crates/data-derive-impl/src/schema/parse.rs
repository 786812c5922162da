// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Lifting a `#[data_schema]` module into the declaration model.
//!
//! # Architecture
//!
//! ```text
//! parse.rs (coordinator)
//! ├── options.rs - module options     #[data_schema(..)]
//! ├── data.rs    - struct options     #[data(..)]
//! └── member.rs  - member options     #[data(..)] / #[property(..)]
//! ```
//!
//! Errors from every struct and field are accumulated and reported together.

mod data;
mod member;
mod options;

pub use data::{data_attr, parse_data_struct};
pub use member::is_helper;
pub use options::SchemaOptions;
use data_schema::TypeDecl;
use proc_macro2::TokenStream;
use syn::{Item, ItemMod};

/// Parsed schema module.
#[derive(Debug)]
pub struct Schema {
    /// Module options.
    pub options: SchemaOptions,

    /// Data type declarations in module order.
    pub decls: Vec<TypeDecl>,

    /// Module items as written.
    pub items: Vec<Item>
}

/// Parse the attribute arguments and the module body.
///
/// # Errors
///
/// - Malformed module options
/// - A module without an inline body (`mod game;`)
/// - Any struct or member attribute error
pub fn parse_schema(args: TokenStream, module: &ItemMod) -> darling::Result<Schema> {
    let mut errors = darling::Error::accumulator();
    let options = errors.handle(SchemaOptions::parse(args)).unwrap_or_default();

    let Some((_, items)) = &module.content else {
        errors.push(
            darling::Error::custom("#[data_schema] needs an inline module body").with_span(module)
        );
        return errors.finish_with(Schema {
            options,
            decls: Vec::new(),
            items: Vec::new()
        });
    };

    let mut decls = Vec::new();
    for item in items {
        if let Item::Struct(item) = item
            && let Some(Some(decl)) = errors.handle(parse_data_struct(item))
        {
            decls.push(decl);
        }
    }

    errors.finish_with(Schema {
        options,
        decls,
        items: items.clone()
    })
}
