// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `#[data_schema]` expansion.
//!
//! # Flow
//!
//! ```text
//! mod game { .. }
//!       │
//!       ▼
//! parse ──────► Schema { options, decls, items }
//!       │
//!       ▼
//! symbols ────► KnownSymbols (local converters, types, option lists)
//!       │
//!       ▼
//! Compiler::run ──► Output { types, generated, diagnostics }
//!       │
//!       ▼
//! emit ───────► mod game { rewritten structs, impls, compile_error!s }
//! ```

mod emit;
mod parse;
mod symbols;

#[cfg(test)]
mod tests;

use data_schema::Compiler;
use proc_macro2::TokenStream;
use quote::quote;
use syn::ItemMod;

/// Expand a schema module.
///
/// Parse errors are reported next to the module with helper attributes
/// stripped, so the rest of the crate still type-checks against it.
pub fn expand(args: TokenStream, item: TokenStream) -> TokenStream {
    let mut module: ItemMod = match syn::parse2(item) {
        Ok(module) => module,
        Err(err) => return err.to_compile_error()
    };

    let schema = match parse::parse_schema(args, &module) {
        Ok(schema) => schema,
        Err(err) => {
            emit::strip_helpers(&mut module);
            let errors = err.write_errors();
            return quote! {
                #module
                #errors
            };
        }
    };

    let symbols = symbols::collect(&schema.items, &schema.options);
    let output = Compiler::new(&symbols)
        .with_options(schema.options.compile_options())
        .run(schema.decls);

    emit::emit(module, &output, &schema.options.krate)
}
