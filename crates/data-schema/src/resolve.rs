// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Inheritance and generics resolution.
//!
//! Types are processed leaves first. A derived type's merged plan list is
//! the base's merged plans (with the base's type parameters replaced by the
//! arguments the derived type supplies) followed by its own plans.
//!
//! ```text
//! Hero            [Multipliers]
//! NewHero: Hero   [Multipliers*, NewValues]      * inherited, origin = Hero
//! ```
//!
//! Substitution is purely a type rewrite; inherited plans are not
//! reclassified.

use std::collections::{BTreeSet, HashMap};

use syn::{
    Ident, Type,
    visit_mut::{self, VisitMut}
};

use crate::{
    decl::{BaseRef, TypeDecl},
    diagnostic::{Diagnostic, DiagnosticId, DiagnosticSink},
    model::{DataType, FieldKind, FieldPlan, ValidationState}
};

/// Processing order over a set of merged declarations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    /// Declaration indices, bases before derived types.
    pub order: Vec<usize>,

    /// Indices of types that take part in a base cycle.
    pub cyclic: BTreeSet<usize>
}

/// Compute the processing order.
///
/// Kahn's algorithm over base edges, always taking the earliest declared
/// ready type. Edges between members of a cycle are dropped, so cycle
/// members are scheduled as roots and their dependents still follow them.
pub fn schedule(decls: &[TypeDecl]) -> Schedule {
    let index: HashMap<String, usize> = decls
        .iter()
        .enumerate()
        .map(|(i, decl)| (decl.ident.to_string(), i))
        .collect();
    let parent: Vec<Option<usize>> = decls
        .iter()
        .map(|decl| {
            decl.base
                .as_ref()
                .and_then(|base| index.get(&base.ident.to_string()).copied())
        })
        .collect();

    let cyclic: BTreeSet<usize> = (0..decls.len())
        .filter(|&start| {
            let mut current = parent[start];
            for _ in 0..decls.len() {
                match current {
                    Some(node) if node == start => return true,
                    Some(node) => current = parent[node],
                    None => return false
                }
            }
            false
        })
        .collect();

    let edge = |node: usize| parent[node].filter(|_| !cyclic.contains(&node));

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); decls.len()];
    let mut pending = vec![0usize; decls.len()];
    for node in 0..decls.len() {
        if let Some(base) = edge(node) {
            children[base].push(node);
            pending[node] += 1;
        }
    }

    let mut ready: BTreeSet<usize> = (0..decls.len()).filter(|&n| pending[n] == 0).collect();
    let mut order = Vec::with_capacity(decls.len());
    while let Some(node) = ready.pop_first() {
        order.push(node);
        for &child in &children[node] {
            pending[child] -= 1;
            if pending[child] == 0 {
                ready.insert(child);
            }
        }
    }

    Schedule {
        order,
        cyclic
    }
}

/// Replaces type parameters with concrete arguments.
struct Substitute<'a> {
    map: &'a [(Ident, Type)]
}

impl Substitute<'_> {
    fn lookup(&self, ty: &Type) -> Option<&Type> {
        let Type::Path(type_path) = ty else {
            return None;
        };
        if type_path.qself.is_some() {
            return None;
        }
        let ident = type_path.path.get_ident()?;
        self.map
            .iter()
            .find(|(param, _)| param == ident)
            .map(|(_, arg)| arg)
    }
}

impl VisitMut for Substitute<'_> {
    fn visit_type_mut(&mut self, ty: &mut Type) {
        if let Some(arg) = self.lookup(ty) {
            *ty = arg.clone();
            return;
        }
        visit_mut::visit_type_mut(self, ty);
    }
}

/// Apply a parameter → argument substitution to an inherited plan.
pub fn substitute_plan(plan: &mut FieldPlan, map: &[(Ident, Type)]) {
    if map.is_empty() {
        return;
    }
    let mut visitor = Substitute {
        map
    };
    visitor.visit_type_mut(&mut plan.ty);
    match &mut plan.kind {
        FieldKind::Scalar => {}
        FieldKind::ConvertedScalar {
            converter
        } => visitor.visit_path_mut(converter),
        FieldKind::CollectionView {
            element, ..
        } => visitor.visit_type_mut(element)
    }
}

/// Check a declared base against the already resolved types.
///
/// Returns the base to inherit from, or `None` after reporting why the type
/// must be resolved without one.
pub fn check_base<'a, S>(
    decl: &TypeDecl,
    cyclic: bool,
    resolved: &'a HashMap<String, DataType>,
    sink: &mut S
) -> Option<&'a DataType>
where
    S: DiagnosticSink + ?Sized
{
    let base = decl.base.as_ref()?;
    let name = decl.ident.to_string();

    if cyclic {
        sink.report(Diagnostic::new(
            DiagnosticId::CyclicBase,
            name.clone(),
            base.ident.span(),
            &[&name]
        ));
        return None;
    }

    let Some(resolved_base) = resolved.get(&base.ident.to_string()) else {
        sink.report(Diagnostic::new(
            DiagnosticId::UnknownBase,
            name.clone(),
            base.ident.span(),
            &[&name, &base.display()]
        ));
        return None;
    };

    let expected = resolved_base.generics.type_params().count();
    if expected != base.args.len() {
        sink.report(Diagnostic::new(
            DiagnosticId::BaseArity,
            name.clone(),
            base.ident.span(),
            &[
                &name,
                &base.display(),
                &base.args.len().to_string(),
                &expected.to_string()
            ]
        ));
        return None;
    }

    Some(resolved_base)
}

/// Plans inherited from `base`, substituted with the arguments of `base_ref`.
///
/// Write permission is narrowed by the derived type's mode.
pub fn inherit(base: &DataType, base_ref: &BaseRef, derived: &TypeDecl) -> Vec<FieldPlan> {
    let map: Vec<(Ident, Type)> = base
        .generics
        .type_params()
        .map(|param| param.ident.clone())
        .zip(base_ref.args.iter().cloned())
        .collect();

    base.plans
        .iter()
        .cloned()
        .map(|mut plan| {
            substitute_plan(&mut plan, &map);
            plan.writable &= derived.mode.is_mutable();
            plan
        })
        .collect()
}

/// Build the merged, not yet validated model of one type.
pub fn resolve_type(decl: &TypeDecl, own: Vec<FieldPlan>, base: Option<&DataType>) -> DataType {
    let (base_ref, mut plans) = match (base, decl.base.as_ref()) {
        (Some(base), Some(base_ref)) => (Some(base_ref.clone()), inherit(base, base_ref, decl)),
        _ => (None, Vec::new())
    };
    plans.extend(own);

    tracing::debug!(
        ty = %decl.ident,
        base = base_ref.as_ref().map(BaseRef::display).as_deref().unwrap_or("-"),
        plans = plans.len(),
        "resolved"
    );

    DataType {
        ident: decl.ident.clone(),
        generics: decl.generics.clone(),
        base: base_ref,
        mode: decl.mode,
        plans,
        state: ValidationState::Pending
    }
}
