// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Diagnostic catalog and sinks.
//!
//! Every rule violation is reported as a [`Diagnostic`] with a stable
//! identifier from [`DiagnosticId`]. Diagnostics are produced once and never
//! mutated; a compilation collects them in order into a [`DiagnosticSink`].
//!
//! # Catalog
//!
//! | Id | Title |
//! |----|-------|
//! | `DATA_0001` | Invalid accessor decoration on a field |
//! | `DATA_0002` | Invalid storage decoration on a property |
//! | `DATA_0003` | Write policy on immutable data |
//! | `DATA_0004` | Fields of immutable data must be private |
//! | `DATA_0005` | Setters of immutable data must be private |
//! | `DATA_0006` | Keyed mapping cannot be exposed |
//! | `DATA_0007` | Duplicate accessor name |
//! | `DATA_0008` | Unknown base type |
//! | `DATA_0009` | Cyclic base chain |
//! | `DATA_0010` | Base generic arity mismatch |
//! | `DATA_0011` | Conflicting base types across fragments |

use std::fmt;

use proc_macro2::Span;

/// Diagnostic severity.
///
/// The engine only raises errors; the host decides whether they fail the
/// build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Rule violation.
    Error
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("error")
        }
    }
}

/// Static description of one diagnostic kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    /// Stable identifier, e.g. `DATA_0004`.
    pub id: &'static str,

    /// Short title.
    pub title: &'static str,

    /// Message template with positional `{0}`, `{1}` placeholders.
    pub message_format: &'static str,

    /// Longer explanation.
    pub description: &'static str,

    /// Default severity.
    pub severity: Severity
}

/// Stable diagnostic identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagnosticId {
    /// Unresolved decoration or converter on a field surface.
    UnresolvedFieldDecoration,
    /// Unresolved decoration or converter on a property surface.
    UnresolvedPropertyDecoration,
    /// Write policy override on an immutable type.
    PolicyOnImmutable,
    /// Non-private backing field on an immutable type.
    PublicFieldOnImmutable,
    /// Non-private declared setter on an immutable type.
    PublicSetterOnImmutable,
    /// Keyed mapping in the schema.
    KeyedMapping,
    /// Duplicate exposed accessor name in the merged plan set.
    DuplicateAccessor,
    /// Base reference does not name a known data type.
    UnknownBase,
    /// Type is part of a cyclic base chain.
    CyclicBase,
    /// Base reference supplies the wrong number of type arguments.
    BaseArity,
    /// Fragments of one type declare different bases.
    ConflictingBase
}

impl DiagnosticId {
    /// Every identifier, in catalog order.
    pub const ALL: [Self; 11] = [
        Self::UnresolvedFieldDecoration,
        Self::UnresolvedPropertyDecoration,
        Self::PolicyOnImmutable,
        Self::PublicFieldOnImmutable,
        Self::PublicSetterOnImmutable,
        Self::KeyedMapping,
        Self::DuplicateAccessor,
        Self::UnknownBase,
        Self::CyclicBase,
        Self::BaseArity,
        Self::ConflictingBase
    ];

    /// Catalog entry for this identifier.
    #[must_use]
    pub const fn descriptor(self) -> &'static Descriptor {
        match self {
            Self::UnresolvedFieldDecoration => &DATA_0001,
            Self::UnresolvedPropertyDecoration => &DATA_0002,
            Self::PolicyOnImmutable => &DATA_0003,
            Self::PublicFieldOnImmutable => &DATA_0004,
            Self::PublicSetterOnImmutable => &DATA_0005,
            Self::KeyedMapping => &DATA_0006,
            Self::DuplicateAccessor => &DATA_0007,
            Self::UnknownBase => &DATA_0008,
            Self::CyclicBase => &DATA_0009,
            Self::BaseArity => &DATA_0010,
            Self::ConflictingBase => &DATA_0011
        }
    }

    /// Stable string identifier.
    #[must_use]
    pub const fn code(self) -> &'static str {
        self.descriptor().id
    }
}

impl fmt::Display for DiagnosticId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

const DATA_0001: Descriptor = Descriptor {
    id:             "DATA_0001",
    title:          "Invalid accessor decoration type",
    message_format: "The field \"{0}\" is using attribute \"{1}\" which was not recognized as a valid type (are you missing a use declaration?)",
    description:    "All decorations forwarded onto the generated accessor of a field must resolve to valid types.",
    severity:       Severity::Error
};

const DATA_0002: Descriptor = Descriptor {
    id:             "DATA_0002",
    title:          "Invalid storage decoration type",
    message_format: "The property \"{0}\" is using attribute \"{1}\" which was not recognized as a valid type (are you missing a use declaration?)",
    description:    "All decorations forwarded onto the generated storage of a property must resolve to valid types.",
    severity:       Severity::Error
};

const DATA_0003: Descriptor = Descriptor {
    id:             "DATA_0003",
    title:          "Cannot apply a write policy to immutable data",
    message_format: "\"{0}\" is immutable thus its members cannot declare a write policy (are you missing #[data(mutable)]?)",
    description:    "The data type must be mutable to carry per-field write policies.",
    severity:       Severity::Error
};

const DATA_0004: Descriptor = Descriptor {
    id:             "DATA_0004",
    title:          "Fields of immutable data must be private",
    message_format: "\"{0}\" is immutable thus its fields must be private (are you missing #[data(mutable)]?)",
    description:    "The data type must be mutable to have non-private fields.",
    severity:       Severity::Error
};

const DATA_0005: Descriptor = Descriptor {
    id:             "DATA_0005",
    title:          "Property setters of immutable data must be private",
    message_format: "\"{0}\" is immutable thus its property setter must be private (are you missing #[data(mutable)]?)",
    description:    "The data type must be mutable to have non-private property setters.",
    severity:       Severity::Error
};

const DATA_0006: Descriptor = Descriptor {
    id:             "DATA_0006",
    title:          "Keyed mapping cannot be exposed",
    message_format: "The member \"{0}\" of \"{1}\" is a keyed mapping which cannot be exposed through a read-only view (mark it #[data(skip)])",
    description:    "Only sequences, linear collections and sets can be exposed as views.",
    severity:       Severity::Error
};

const DATA_0007: Descriptor = Descriptor {
    id:             "DATA_0007",
    title:          "Duplicate accessor name",
    message_format: "\"{0}\" declares accessor \"{1}\" which is already exposed by \"{2}\"",
    description:    "Exposed accessor names must be unique across a type and its base chain.",
    severity:       Severity::Error
};

const DATA_0008: Descriptor = Descriptor {
    id:             "DATA_0008",
    title:          "Unknown base type",
    message_format: "\"{0}\" extends \"{1}\" which is not a data type",
    description:    "A base type must be a data type declared in the same schema.",
    severity:       Severity::Error
};

const DATA_0009: Descriptor = Descriptor {
    id:             "DATA_0009",
    title:          "Cyclic base chain",
    message_format: "\"{0}\" takes part in a cyclic base chain",
    description:    "The base chain of a data type must end in a type without a base.",
    severity:       Severity::Error
};

const DATA_0010: Descriptor = Descriptor {
    id:             "DATA_0010",
    title:          "Base generic arity mismatch",
    message_format: "\"{0}\" extends \"{1}\" with {2} type argument(s) but the base declares {3}",
    description:    "A base reference must supply one type argument per base type parameter.",
    severity:       Severity::Error
};

const DATA_0011: Descriptor = Descriptor {
    id:             "DATA_0011",
    title:          "Conflicting base types",
    message_format: "Fragments of \"{0}\" declare different base types \"{1}\" and \"{2}\"",
    description:    "All fragments of a data type must agree on its base type.",
    severity:       Severity::Error
};

/// Substitute positional `{n}` placeholders in a message template.
///
/// Placeholders without a matching argument are left as written.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        let arg = tail.find('}').and_then(|close| {
            tail[..close]
                .parse::<usize>()
                .ok()
                .and_then(|index| args.get(index))
                .map(|arg| (close, *arg))
        });
        match arg {
            Some((close, arg)) => {
                out.push_str(arg);
                rest = &tail[close + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

/// One reported rule violation.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{id}: {message}")]
pub struct Diagnostic {
    /// Catalog identifier.
    pub id: DiagnosticId,

    /// Severity.
    pub severity: Severity,

    /// Formatted message.
    pub message: String,

    /// Display name of the offending symbol.
    pub symbol: String,

    /// Source location of the offending symbol.
    pub span: Span
}

impl Diagnostic {
    /// Build a diagnostic from the catalog template and its arguments.
    pub fn new(id: DiagnosticId, symbol: impl Into<String>, span: Span, args: &[&str]) -> Self {
        let descriptor = id.descriptor();
        Self {
            id,
            severity: descriptor.severity,
            message: format_message(descriptor.message_format, args),
            symbol: symbol.into(),
            span
        }
    }

    /// Catalog title.
    #[must_use]
    pub fn title(&self) -> &'static str {
        self.id.descriptor().title
    }

    /// Stable string identifier.
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.id.code()
    }

    /// Render as a compile error at the offending span.
    pub fn to_syn_error(&self) -> syn::Error {
        syn::Error::new(self.span, self.to_string())
    }
}

/// Receiver for diagnostics produced by a compilation.
pub trait DiagnosticSink {
    /// Record one diagnostic.
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Ordered diagnostic collection for one compilation.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticBag {
    items: Vec<Diagnostic>
}

impl DiagnosticBag {
    /// Empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if nothing was reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of reported diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if any error was reported.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.items
            .iter()
            .any(|diagnostic| diagnostic.severity == Severity::Error)
    }

    /// Diagnostics in report order.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.items.iter()
    }

    /// Identifiers in report order.
    #[must_use]
    pub fn ids(&self) -> Vec<DiagnosticId> {
        self.items.iter().map(|diagnostic| diagnostic.id).collect()
    }

    /// Diagnostics about one symbol.
    pub fn for_symbol<'a>(&'a self, symbol: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.items
            .iter()
            .filter(move |diagnostic| diagnostic.symbol == symbol)
    }

    /// Take the diagnostics out of the bag.
    #[must_use]
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

impl DiagnosticSink for DiagnosticBag {
    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::trace!(id = diagnostic.code(), symbol = %diagnostic.symbol, "diagnostic");
        self.items.push(diagnostic);
    }
}

impl<'a> IntoIterator for &'a DiagnosticBag {
    type IntoIter = std::slice::Iter<'a, Diagnostic>;
    type Item = &'a Diagnostic;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for DiagnosticBag {
    type IntoIter = std::vec::IntoIter<Diagnostic>;
    type Item = Diagnostic;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_are_sequential() {
        for (index, id) in DiagnosticId::ALL.iter().enumerate() {
            assert_eq!(id.code(), format!("DATA_{:04}", index + 1));
            assert_eq!(id.descriptor().severity, Severity::Error);
        }
    }

    #[test]
    fn formats_positional_arguments() {
        assert_eq!(
            format_message("\"{0}\" uses \"{1}\"", &["Stat._atk", "Wrapp"]),
            "\"Stat._atk\" uses \"Wrapp\""
        );
    }

    #[test]
    fn leaves_unknown_placeholders() {
        assert_eq!(format_message("{0} and {3} {x}", &["a"]), "a and {3} {x}");
    }

    #[test]
    fn diagnostic_displays_id_and_message() {
        let diagnostic = Diagnostic::new(
            DiagnosticId::PublicFieldOnImmutable,
            "Stat._atk",
            Span::call_site(),
            &["Stat"]
        );
        assert_eq!(
            diagnostic.to_string(),
            "DATA_0004: \"Stat\" is immutable thus its fields must be private (are you missing #[data(mutable)]?)"
        );
        assert_eq!(diagnostic.title(), "Fields of immutable data must be private");
    }

    #[test]
    fn bag_keeps_report_order() {
        let mut bag = DiagnosticBag::new();
        bag.report(Diagnostic::new(DiagnosticId::CyclicBase, "A", Span::call_site(), &["A"]));
        bag.report(Diagnostic::new(DiagnosticId::CyclicBase, "B", Span::call_site(), &["B"]));
        assert_eq!(bag.len(), 2);
        assert!(bag.has_errors());
        assert_eq!(bag.for_symbol("B").count(), 1);
        let symbols: Vec<_> = bag.iter().map(|d| d.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["A", "B"]);
    }
}
