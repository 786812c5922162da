// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Rule engine.
//!
//! Runs once per [`DataType`], after resolution and before synthesis. Every
//! rule runs over every own plan; a plan can trip several rules at once.
//! Inherited plans were validated with their declaring type and keep that
//! verdict.
//!
//! | Rule | Plan outcome |
//! |------|--------------|
//! | `DATA_0001` / `DATA_0002` unresolved decoration | invalid |
//! | `DATA_0003` policy on immutable type | valid, read-only |
//! | `DATA_0004` public field on immutable type | invalid |
//! | `DATA_0005` public setter on immutable type | invalid |
//! | `DATA_0006` keyed mapping | invalid |
//! | `DATA_0007` duplicate accessor name | later plan invalid |

use std::collections::HashMap;

use syn::{Visibility, spanned::Spanned};

use crate::{
    decl::Surface,
    diagnostic::{Diagnostic, DiagnosticId, DiagnosticSink},
    model::{CollectionShape, DataType, FieldKind, FieldPlan, ValidationState},
    resolver::path_key
};

/// Check if a visibility is private (`pub(self)` or nothing).
#[must_use]
pub fn is_private(vis: &Visibility) -> bool {
    match vis {
        Visibility::Inherited => true,
        Visibility::Restricted(restricted) => {
            restricted.in_token.is_none() && restricted.path.is_ident("self")
        }
        Visibility::Public(_) => false
    }
}

/// Validate `data`, invalidating offending plans and reporting each
/// violation. Moves the type to [`ValidationState::Validated`].
pub fn validate<S>(data: &mut DataType, sink: &mut S)
where
    S: DiagnosticSink + ?Sized
{
    if data.is_validated() {
        return;
    }

    let owner = data.ident.clone();
    let type_name = owner.to_string();
    let immutable = !data.mode.is_mutable();

    for plan in data
        .plans
        .iter_mut()
        .filter(|plan| !plan.is_inherited_by(&owner))
    {
        let symbol = format!("{type_name}.{}", plan.backing);
        let mut invalid = !plan.unresolved.is_empty();

        check_unresolved(plan, &symbol, sink);

        if immutable && plan.policy.is_some() {
            sink.report(Diagnostic::new(
                DiagnosticId::PolicyOnImmutable,
                symbol.clone(),
                plan.backing.span(),
                &[&type_name]
            ));
        }

        match &plan.surface {
            Surface::Field {
                vis
            } if immutable && !is_private(vis) => {
                sink.report(Diagnostic::new(
                    DiagnosticId::PublicFieldOnImmutable,
                    symbol.clone(),
                    plan.backing.span(),
                    &[&type_name]
                ));
                invalid = true;
            }
            Surface::Property {
                setter: Some(setter),
                ..
            } if immutable && !is_private(setter) => {
                sink.report(Diagnostic::new(
                    DiagnosticId::PublicSetterOnImmutable,
                    symbol.clone(),
                    setter.span(),
                    &[&type_name]
                ));
                invalid = true;
            }
            _ => {}
        }

        if let FieldKind::CollectionView {
            shape: CollectionShape::Keyed,
            ..
        } = plan.kind
        {
            sink.report(Diagnostic::new(
                DiagnosticId::KeyedMapping,
                symbol.clone(),
                plan.ty.span(),
                &[&plan.backing.to_string(), &type_name]
            ));
            invalid = true;
        }

        if invalid {
            plan.invalidate();
        }
    }

    check_duplicates(data, sink);

    data.state = ValidationState::Validated;
    tracing::debug!(
        ty = %data.ident,
        valid = data.valid_plans().count(),
        total = data.plans.len(),
        "validated"
    );
}

fn check_unresolved<S>(plan: &FieldPlan, symbol: &str, sink: &mut S)
where
    S: DiagnosticSink + ?Sized
{
    let id = match plan.surface {
        Surface::Field { .. } => DiagnosticId::UnresolvedFieldDecoration,
        Surface::Property { .. } => DiagnosticId::UnresolvedPropertyDecoration
    };
    let member = plan.backing.to_string();
    for unresolved in &plan.unresolved {
        sink.report(Diagnostic::new(
            id,
            symbol,
            unresolved.path.span(),
            &[&member, &path_key(&unresolved.path)]
        ));
    }
}

fn check_duplicates<S>(data: &mut DataType, sink: &mut S)
where
    S: DiagnosticSink + ?Sized
{
    let owner = data.ident.clone();
    let type_name = owner.to_string();
    let mut seen: HashMap<String, String> = HashMap::new();

    for plan in &mut data.plans {
        let exposed = plan.accessor.exposed.clone();
        match seen.get(&exposed) {
            None => {
                seen.insert(exposed, plan.origin.to_string());
            }
            Some(first) if !plan.is_inherited_by(&owner) => {
                sink.report(Diagnostic::new(
                    DiagnosticId::DuplicateAccessor,
                    format!("{type_name}.{}", plan.backing),
                    plan.backing.span(),
                    &[&type_name, &exposed, first]
                ));
                plan.invalidate();
            }
            Some(_) => {}
        }
    }
}
