// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Fragment merge.
//!
//! A type may be declared in several fragments. They are merged into one
//! declaration before classification:
//!
//! - fragments are ordered by their `fragment` key (stable for equal keys)
//! - members are concatenated in that order
//! - the type is mutable if any fragment is
//! - generics come from the first fragment
//! - the first declared base wins; a different base in a later fragment
//!   raises `DATA_0011`
//!
//! Merged types come out in order of first appearance.

use crate::{
    decl::TypeDecl,
    diagnostic::{Diagnostic, DiagnosticId, DiagnosticSink},
    model::Mutability
};

/// Merge fragments of the same type into single declarations.
pub fn merge_fragments<S>(decls: Vec<TypeDecl>, sink: &mut S) -> Vec<TypeDecl>
where
    S: DiagnosticSink + ?Sized
{
    let mut groups: Vec<Vec<TypeDecl>> = Vec::new();
    for decl in decls {
        match groups
            .iter_mut()
            .find(|group| group.first().is_some_and(|first| first.ident == decl.ident))
        {
            Some(group) => group.push(decl),
            None => groups.push(vec![decl])
        }
    }

    groups
        .into_iter()
        .filter_map(|mut fragments| {
            fragments.sort_by_key(|fragment| fragment.fragment);
            let mut fragments = fragments.into_iter();
            let mut merged = fragments.next()?;
            for fragment in fragments {
                absorb(&mut merged, fragment, sink);
            }
            Some(merged)
        })
        .collect()
}

fn absorb<S>(merged: &mut TypeDecl, fragment: TypeDecl, sink: &mut S)
where
    S: DiagnosticSink + ?Sized
{
    if fragment.mode.is_mutable() {
        merged.mode = Mutability::Mutable;
    }
    if merged.base.is_none() {
        merged.base = fragment.base;
    } else if let (Some(first), Some(other)) = (&merged.base, &fragment.base)
        && first != other
    {
        let name = merged.ident.to_string();
        sink.report(Diagnostic::new(
            DiagnosticId::ConflictingBase,
            name.clone(),
            other.ident.span(),
            &[&name, &first.display(), &other.display()]
        ));
    }
    merged.members.extend(fragment.members);
}
