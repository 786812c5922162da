// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Decoration and converter resolution.
//!
//! The compiler never guesses whether a referenced decoration exists. It asks
//! a [`DecorationResolver`] supplied by the host, and anything other than
//! [`Resolution::Resolved`] is reported. A misspelled decoration is never
//! treated as "no decoration".
//!
//! [`KnownSymbols`] is a ready-made resolver for hosts that can enumerate the
//! symbols visible to the schema up front.

use syn::Path;

/// What a referenced path is expected to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorationRole {
    /// An attribute forwarded onto generated code.
    Decoration,
    /// A converter type.
    Converter
}

/// Resolver verdict for one reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The reference names a usable symbol.
    Resolved,
    /// Nothing with that name is visible.
    Missing,
    /// The name exists but is the wrong kind of symbol.
    WrongShape,
    /// More than one candidate matches.
    Ambiguous
}

impl Resolution {
    /// Check if the reference resolved.
    #[must_use]
    pub const fn is_resolved(self) -> bool {
        matches!(self, Self::Resolved)
    }
}

/// Resolves decoration and converter references for the compiler.
///
/// Any `Fn(&Path, DecorationRole) -> Resolution` closure is a resolver.
pub trait DecorationResolver {
    /// Resolve `path` in the given role.
    fn resolve(&self, path: &Path, role: DecorationRole) -> Resolution;
}

impl<F> DecorationResolver for F
where
    F: Fn(&Path, DecorationRole) -> Resolution
{
    fn resolve(&self, path: &Path, role: DecorationRole) -> Resolution {
        self(path, role)
    }
}

/// Attributes that always resolve as decorations.
const BUILTIN_ATTRIBUTES: &[&str] = &[
    "allow",
    "cfg",
    "cfg_attr",
    "cold",
    "deny",
    "deprecated",
    "doc",
    "expect",
    "forbid",
    "inline",
    "must_use",
    "track_caller",
    "warn"
];

/// Render a path as `a::b::C`, ignoring generic arguments.
pub fn path_key(path: &Path) -> String {
    let key = path
        .segments
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect::<Vec<_>>()
        .join("::");
    if path.leading_colon.is_some() {
        format!("::{key}")
    } else {
        key
    }
}

fn last_segment(path: &Path) -> Option<String> {
    path.segments
        .last()
        .map(|segment| segment.ident.to_string())
}

/// Resolver over explicitly registered symbols.
///
/// # Example
///
/// ```rust,ignore
/// let symbols = KnownSymbols::new()
///     .with_decoration(&parse_quote!(serde))
///     .with_converter(&parse_quote!(crate::convert::Wrap))
///     .with_type(&parse_quote!(Stat));
///
/// assert_eq!(symbols.resolve(&parse_quote!(Wrap), DecorationRole::Converter), Resolution::Resolved);
/// ```
#[derive(Debug, Clone, Default)]
pub struct KnownSymbols {
    decorations: Vec<String>,
    converters:  Vec<String>,
    types:       Vec<String>
}

impl KnownSymbols {
    /// Empty resolver that still knows the built-in attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a decoration path.
    #[must_use]
    pub fn with_decoration(mut self, path: &Path) -> Self {
        self.add_decoration(path);
        self
    }

    /// Register a converter path.
    #[must_use]
    pub fn with_converter(mut self, path: &Path) -> Self {
        self.add_converter(path);
        self
    }

    /// Register a type that is neither a decoration nor a converter.
    #[must_use]
    pub fn with_type(mut self, path: &Path) -> Self {
        self.add_type(path);
        self
    }

    /// Register a decoration path in place.
    pub fn add_decoration(&mut self, path: &Path) {
        push_unique(&mut self.decorations, path_key(path));
    }

    /// Register a converter path in place.
    pub fn add_converter(&mut self, path: &Path) {
        push_unique(&mut self.converters, path_key(path));
    }

    /// Register a plain type in place.
    pub fn add_type(&mut self, path: &Path) {
        push_unique(&mut self.types, path_key(path));
    }

    fn resolve_decoration(&self, key: &str, last: Option<&str>) -> Resolution {
        if BUILTIN_ATTRIBUTES.contains(&key) || self.decorations.iter().any(|d| d == key) {
            return Resolution::Resolved;
        }
        if self.converters.iter().chain(&self.types).any(|t| {
            t == key || last.is_some_and(|last| t.rsplit("::").next() == Some(last))
        }) {
            return Resolution::WrongShape;
        }
        Resolution::Missing
    }

    fn resolve_converter(&self, key: &str, last: Option<&str>) -> Resolution {
        if self.converters.iter().any(|c| c == key) {
            return Resolution::Resolved;
        }
        let Some(last) = last else {
            return Resolution::Missing;
        };
        let candidates = self
            .converters
            .iter()
            .filter(|c| c.rsplit("::").next() == Some(last))
            .count();
        match candidates {
            1 => Resolution::Resolved,
            0 if self
                .types
                .iter()
                .chain(&self.decorations)
                .any(|t| t == key || t.rsplit("::").next() == Some(last)) =>
            {
                Resolution::WrongShape
            }
            0 => Resolution::Missing,
            _ => Resolution::Ambiguous
        }
    }
}

impl DecorationResolver for KnownSymbols {
    fn resolve(&self, path: &Path, role: DecorationRole) -> Resolution {
        let key = path_key(path);
        let last = last_segment(path);
        match role {
            DecorationRole::Decoration => self.resolve_decoration(&key, last.as_deref()),
            DecorationRole::Converter => self.resolve_converter(&key, last.as_deref())
        }
    }
}

fn push_unique(list: &mut Vec<String>, key: String) {
    if !list.contains(&key) {
        list.push(key);
    }
}
