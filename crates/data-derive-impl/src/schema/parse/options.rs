// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Module-level options from `#[data_schema(...)]`.

use darling::{FromMeta, ast::NestedMeta, util::PathList};
use data_schema::{CompileOptions, InvalidPlanPolicy};
use proc_macro2::TokenStream;
use syn::Path;

/// Returns the default runtime crate path.
///
/// Used by darling for the `crate` option default.
pub fn default_runtime() -> Path {
    syn::parse_quote!(::data_core)
}

/// Options parsed from the attribute arguments.
///
/// # Example
///
/// ```rust,ignore
/// #[data_schema(
///     decorations(serde),
///     converters(crate::convert::Wrap),
///     invalid = "stub",
///     crate = "::data_derive"
/// )]
/// mod game { ... }
/// ```
#[derive(Debug, FromMeta)]
pub struct SchemaOptions {
    /// External decorations allowed in `accessor(..)` and `storage(..)`.
    #[darling(default)]
    pub decorations: PathList,

    /// External converter types.
    #[darling(default)]
    pub converters: PathList,

    /// What to do with members whose plan is rejected.
    #[darling(default)]
    pub invalid: InvalidPlanPolicy,

    /// Runtime crate path used in generated code.
    #[darling(default = "default_runtime", rename = "crate")]
    pub krate: Path
}

impl Default for SchemaOptions {
    fn default() -> Self {
        Self {
            decorations: PathList::default(),
            converters:  PathList::default(),
            invalid:     InvalidPlanPolicy::default(),
            krate:       default_runtime()
        }
    }
}

impl SchemaOptions {
    /// Parse from the raw attribute arguments.
    pub fn parse(args: TokenStream) -> darling::Result<Self> {
        if args.is_empty() {
            return Ok(Self::default());
        }
        let items = NestedMeta::parse_meta_list(args)?;
        Self::from_list(&items)
    }

    /// Engine options.
    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions::default()
            .with_invalid(self.invalid)
            .with_runtime(self.krate.clone())
    }
}
