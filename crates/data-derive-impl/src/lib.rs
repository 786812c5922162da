// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Procedural macro behind `data-derive`.
//!
//! `#[data_schema]` is applied to an inline module. Every struct marked
//! `#[data]` inside it becomes a data type: its members get accessors, base
//! types propagate their accessors and storage, and schema violations are
//! reported as compile errors with a stable `DATA_xxxx` code.
//!
//! # Attribute Quick Reference
//!
//! ## Module-Level `#[data_schema(...)]`
//!
//! ```rust,ignore
//! #[data_schema(
//!     decorations(serde),          // Optional: external attributes allowed in accessor(..)/storage(..)
//!     converters(crate::Percent),  // Optional: converters defined outside the module
//!     invalid = "omit",            // Optional: "omit" | "stub" (default: "omit")
//!     crate = "::data_derive"      // Optional: runtime crate path (default: "::data_core")
//! )]
//! mod game { /* ... */ }
//! ```
//!
//! ## Struct-Level `#[data(...)]`
//!
//! ```rust,ignore
//! #[data]                               // Immutable data type
//! #[data(mutable)]                      // Setters allowed
//! #[data(base = "Hero")]                // Extends another data type
//! #[data(base = "GenericData<i32>")]    // Generic base with arguments
//! ```
//!
//! ## Member-Level Attributes
//!
//! ```rust,ignore
//! #[data]
//! pub struct Stat {
//!     _hp: f32,                                    // Getter `hp()`
//!
//!     #[data(converter = Wrap)]                    // Getter returns Wrap's output
//!     _atk: f32,
//!
//!     #[data(accessor(must_use))]                  // Attribute on the getter
//!     _def: f32,
//!
//!     #[data(skip)]                                // Plain storage, no accessor
//!     cache: u64,
//!
//!     #[property(setter = "pub(crate)", storage(allow(dead_code)))]
//!     pub level: u8,                               // Property with private storage
//! }
//! ```
//!
//! # Generated Code
//!
//! | Member | Getter | Setter (mutable types) |
//! |--------|--------|------------------------|
//! | `_hp: f32` | `fn hp(&self) -> &f32` | `fn set_hp(&mut self, value: f32)` |
//! | `#[data(converter = C)] _hp: f32` | `fn hp(&self) -> <C as Converter<f32>>::Output` | `fn set_hp(&mut self, value: f32)` |
//! | `_items: Vec<T>` | `fn items(&self) -> ReadView<'_, T>` | never |
//!
//! Every data type also implements `Data` with its exposed accessor names.
//!
//! # Diagnostics
//!
//! | Code | Meaning |
//! |------|---------|
//! | `DATA_0001` | Unresolved decoration or converter on a field |
//! | `DATA_0002` | Unresolved decoration or converter on a property |
//! | `DATA_0003` | Write policy on an immutable type |
//! | `DATA_0004` | Non-private field on an immutable type |
//! | `DATA_0005` | Non-private setter on an immutable type |
//! | `DATA_0006` | Keyed mapping in the schema |
//! | `DATA_0007` | Duplicate accessor name |
//! | `DATA_0008` | Unknown base type |
//! | `DATA_0009` | Cyclic base chain |
//! | `DATA_0010` | Base type argument count mismatch |
//! | `DATA_0011` | Conflicting base types |

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

mod schema;

use proc_macro::TokenStream;

/// Compiles the data types of an inline module.
///
/// See the [crate documentation](crate) for the accepted attributes.
///
/// # Example
///
/// ```rust,ignore
/// use data_derive::data_schema;
///
/// #[data_schema]
/// mod game {
///     #[derive(Default)]
///     pub struct Wrap;
///
///     impl data_derive::Converter<f32> for Wrap {
///         type Output = f64;
///
///         fn convert(&self, raw: &f32) -> f64 {
///             f64::from(*raw)
///         }
///     }
///
///     #[data]
///     pub struct Stat {
///         #[data(converter = Wrap)]
///         _hp: f32
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn data_schema(args: TokenStream, item: TokenStream) -> TokenStream {
    schema::expand(args.into(), item.into()).into()
}
