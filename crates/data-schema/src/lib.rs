// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Schema analysis and accessor synthesis for data types.
//!
//! This crate is the engine behind the `#[data_schema]` macro. It takes a set
//! of type declarations whose members carry converter, policy and decoration
//! markers, decides the accessor shape of every member, propagates accessors
//! through single inheritance with generic substitution, validates the
//! result and synthesizes getters and setters.
//!
//! # Pipeline
//!
//! | Stage | Module | Output |
//! |-------|--------|--------|
//! | Fragment merge | [`merge`] | one [`TypeDecl`] per type |
//! | Classification | [`classify`] | one [`FieldPlan`] per member |
//! | Inheritance | [`resolve`] | merged, base-first plan list |
//! | Validation | [`rules`] | invalid plans + [`Diagnostic`]s |
//! | Synthesis | [`synth`] | [`GeneratedMember`]s |
//!
//! [`Compiler`] drives the stages in dependency order.
//!
//! # Example
//!
//! ```rust
//! use data_schema::{Compiler, KnownSymbols, MemberDecl, TypeDecl};
//! use syn::{Visibility, parse_quote};
//!
//! let stat = TypeDecl::named("Stat")
//!     .with_member(
//!         MemberDecl::field(parse_quote!(_hp), Visibility::Inherited, parse_quote!(f32))
//!             .with_converter(parse_quote!(Wrap))
//!     )
//!     .with_member(
//!         MemberDecl::field(parse_quote!(_atk), parse_quote!(pub), parse_quote!(f32))
//!             .with_converter(parse_quote!(Wrap))
//!     );
//!
//! let symbols = KnownSymbols::new().with_converter(&parse_quote!(Wrap));
//! let output = Compiler::new(&symbols).run(vec![stat]);
//!
//! assert_eq!(output.generated[0].getter_names(), vec!["Hp"]);
//! assert_eq!(output.diagnostics[0].code(), "DATA_0004");
//! ```
//!
//! # Logging
//!
//! The engine emits `tracing` events (`debug` per type, `trace` per plan and
//! diagnostic). No subscriber is installed.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

pub mod classify;
pub mod compile;
pub mod decl;
pub mod diagnostic;
pub mod merge;
pub mod model;
pub mod naming;
pub mod resolve;
pub mod resolver;
pub mod rules;
pub mod synth;

pub use compile::{CompileOptions, Compiler, InvalidPlanPolicy, Output};
pub use decl::{BaseRef, Decoration, DecorationTarget, MemberDecl, Surface, TypeDecl};
pub use diagnostic::{Diagnostic, DiagnosticBag, DiagnosticId, DiagnosticSink, Severity};
pub use model::{
    CollectionShape, DataType, FieldKind, FieldPlan, Mutability, PlanStatus, ValidationState,
    WritePolicy
};
pub use naming::AccessorName;
pub use resolver::{DecorationResolver, DecorationRole, KnownSymbols, Resolution};
pub use rules::is_private;
pub use synth::{CodeSink, GeneratedMember, GeneratedType, MemberBody, MemberKind};
