// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Accessor naming.
//!
//! Names are derived from the backing identifier only, so the same source
//! always produces the same accessors:
//!
//! | Backing | Exposed | Getter | Setter |
//! |---------|---------|--------|--------|
//! | `_hp` | `Hp` | `hp` | `set_hp` |
//! | `m_multipliers` | `Multipliers` | `multipliers` | `set_multipliers` |
//! | `new_values` | `NewValues` | `new_values` | `set_new_values` |
//! | `_newValues` | `NewValues` | `new_values` | `set_new_values` |
//! | `_type` | `Type` | `r#type` | `set_type` |
//! | `_self` | `Self` | `_self` | `set_self` |

use convert_case::{Case, Casing};
use syn::Ident;

/// Keywords that need a raw identifier when used as a method name.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield"
];

/// Path keywords that cannot be raw identifiers. Getters for these stems keep
/// the storage marker.
const PATH_KEYWORDS: &[&str] = &["self", "super", "crate", "Self"];

/// Names derived for one accessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorName {
    /// Exposed PascalCase name, unique within a merged plan set.
    pub exposed: String,

    /// Read accessor method.
    pub getter: Ident,

    /// Write accessor method.
    pub setter: Ident
}

impl AccessorName {
    /// Derive accessor names from a backing identifier.
    pub fn derive(backing: &Ident) -> Self {
        let stem = storage_stem(backing);
        let method = method_stem(&stem);
        let span = backing.span();
        let getter = if PATH_KEYWORDS.contains(&method.as_str()) {
            let name = backing.to_string();
            Ident::new(name.strip_prefix("r#").unwrap_or(&name), span)
        } else if KEYWORDS.contains(&method.as_str()) {
            Ident::new_raw(&method, span)
        } else {
            Ident::new(&method, span)
        };

        Self {
            exposed: stem.to_case(Case::Pascal),
            getter,
            setter: Ident::new(&format!("set_{method}"), span)
        }
    }
}

/// snake_case form of a stem, or the stem itself when the conversion would
/// not start with a letter.
fn method_stem(stem: &str) -> String {
    let snake = stem.to_case(Case::Snake);
    if snake.starts_with(|c: char| c.is_ascii_alphabetic()) {
        snake
    } else {
        stem.to_string()
    }
}

/// Strip raw-identifier and private-storage markers from a backing name.
///
/// Falls back to the original name when stripping would leave nothing or
/// something that is not an identifier.
pub fn storage_stem(backing: &Ident) -> String {
    let name = backing.to_string();
    let name = name.strip_prefix("r#").unwrap_or(&name);
    let stripped = name.strip_prefix("m_").unwrap_or(name).trim_start_matches('_');

    if stripped.is_empty() || stripped.starts_with(|c: char| c.is_ascii_digit()) {
        name.to_string()
    } else {
        stripped.to_string()
    }
}
