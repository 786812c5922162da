// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Compiler driver.
//!
//! One [`Compiler::run`] is one pass over the currently visible
//! declarations. The pass holds no state between runs, so the same input
//! always yields the same generated members and diagnostics in the same
//! order.
//!
//! ```text
//! decls ─► merge ─► schedule ─► per type (bases first):
//!                                  classify ─► resolve ─► validate ─► synthesize
//!                                                             │            │
//!                                                      DiagnosticSink   CodeSink
//! ```
//!
//! Types are processed sequentially: a derived type needs its base's merged
//! plans, and syntax tree values are not `Send` inside a compiler plugin.

use std::collections::HashMap;

use darling::FromMeta;
use syn::{Path, parse_quote};

use crate::{
    classify::classify,
    decl::TypeDecl,
    diagnostic::{Diagnostic, DiagnosticSink},
    merge::merge_fragments,
    model::{DataType, FieldPlan},
    resolve::{check_base, resolve_type, schedule},
    resolver::DecorationResolver,
    rules::validate,
    synth::{CodeSink, GeneratedType, synthesize}
};

/// What synthesis does with invalid plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InvalidPlanPolicy {
    /// Emit nothing for the plan.
    #[default]
    Omit,
    /// Emit the accessors with an `unreachable!` body.
    Stub
}

impl FromMeta for InvalidPlanPolicy {
    fn from_string(value: &str) -> darling::Result<Self> {
        match value.to_lowercase().as_str() {
            "omit" => Ok(Self::Omit),
            "stub" => Ok(Self::Stub),
            _ => Err(darling::Error::unknown_value(value))
        }
    }
}

/// Engine options.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Handling of invalid plans.
    pub invalid: InvalidPlanPolicy,

    /// Path of the runtime crate in generated code.
    pub runtime: Path
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            invalid: InvalidPlanPolicy::Omit,
            runtime: parse_quote!(::data_core)
        }
    }
}

impl CompileOptions {
    /// Set the invalid plan policy.
    #[must_use]
    pub fn with_invalid(mut self, invalid: InvalidPlanPolicy) -> Self {
        self.invalid = invalid;
        self
    }

    /// Set the runtime crate path.
    #[must_use]
    pub fn with_runtime(mut self, runtime: Path) -> Self {
        self.runtime = runtime;
        self
    }
}

/// Result of [`Compiler::run`].
#[derive(Debug, Clone, Default)]
pub struct Output {
    /// Validated types in processing order.
    pub types: Vec<DataType>,

    /// Generated accessors per type, in processing order.
    pub generated: Vec<GeneratedType>,

    /// Diagnostics in report order.
    pub diagnostics: Vec<Diagnostic>
}

impl Output {
    /// Find a validated type by name.
    #[must_use]
    pub fn data_type(&self, name: &str) -> Option<&DataType> {
        self.types.iter().find(|data| data.ident == name)
    }

    /// Find the generated accessors of a type by name.
    #[must_use]
    pub fn generated_for(&self, name: &str) -> Option<&GeneratedType> {
        self.generated.iter().find(|generated| generated.owner == name)
    }

    /// Check if any diagnostic was reported.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Schema compiler bound to a decoration resolver.
///
/// # Example
///
/// ```rust,ignore
/// let symbols = KnownSymbols::new().with_converter(&parse_quote!(Wrap));
/// let output = Compiler::new(&symbols).run(vec![stat, hero, new_hero]);
///
/// for diagnostic in &output.diagnostics {
///     eprintln!("{diagnostic}");
/// }
/// ```
pub struct Compiler<'r, R: ?Sized> {
    resolver: &'r R,
    options:  CompileOptions
}

impl<'r, R> Compiler<'r, R>
where
    R: DecorationResolver + ?Sized
{
    /// Create a compiler with default options.
    pub fn new(resolver: &'r R) -> Self {
        Self {
            resolver,
            options: CompileOptions::default()
        }
    }

    /// Replace the options.
    #[must_use]
    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    /// Current options.
    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Run one pass and collect everything into an [`Output`].
    pub fn run(&self, decls: Vec<TypeDecl>) -> Output {
        let mut generated: Vec<GeneratedType> = Vec::new();
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let types = self.run_into(decls, &mut generated, &mut diagnostics);
        Output {
            types,
            generated,
            diagnostics
        }
    }

    /// Run one pass, streaming into host sinks.
    ///
    /// Returns the validated types in processing order.
    pub fn run_into<C, S>(&self, decls: Vec<TypeDecl>, code: &mut C, sink: &mut S) -> Vec<DataType>
    where
        C: CodeSink + ?Sized,
        S: DiagnosticSink + ?Sized
    {
        let decls = merge_fragments(decls, sink);
        let scheduled = schedule(&decls);
        tracing::debug!(
            types = decls.len(),
            cyclic = scheduled.cyclic.len(),
            "scheduled"
        );

        let mut resolved: HashMap<String, DataType> = HashMap::new();
        let mut order = Vec::with_capacity(scheduled.order.len());

        for index in scheduled.order {
            let decl = &decls[index];
            let own: Vec<FieldPlan> = decl
                .members
                .iter()
                .map(|member| classify(member, &decl.ident, decl.mode, self.resolver))
                .collect();

            let base = check_base(decl, scheduled.cyclic.contains(&index), &resolved, sink);
            let mut data = resolve_type(decl, own, base);
            validate(&mut data, sink);
            code.emit(&data, synthesize(&data, &self.options));

            order.push(data.ident.to_string());
            resolved.insert(data.ident.to_string(), data);
        }

        order
            .iter()
            .filter_map(|name| resolved.remove(name))
            .collect()
    }
}
