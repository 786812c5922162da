// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field classification.
//!
//! Each member declaration is reduced to a [`Presence`] record and then
//! decided into a [`FieldKind`] by [`decide`]. The decision order is fixed:
//!
//! 1. converter reference present → [`FieldKind::ConvertedScalar`]
//! 2. storage type is a known collection → [`FieldKind::CollectionView`]
//! 3. otherwise → [`FieldKind::Scalar`]
//!
//! A converter that does not resolve keeps its kind; the plan is flagged
//! invalid and the reference recorded for the rule engine.

use syn::{Attribute, GenericArgument, Ident, Path, PathArguments, Type, parse_quote};

use crate::{
    decl::{DecorationTarget, MemberDecl, Surface},
    model::{CollectionShape, FieldKind, FieldPlan, Mutability, PlanStatus, Unresolved, WritePolicy},
    naming::AccessorName,
    resolver::{DecorationResolver, DecorationRole}
};

/// Normalized record of what a declaration carries.
#[derive(Debug, Clone, Copy)]
pub struct Presence<'a> {
    /// Converter reference, resolved or not.
    pub converter: Option<&'a Path>,

    /// Collection shape of the storage type with its element type.
    pub collection: Option<(CollectionShape, &'a Type)>
}

/// Decide the accessor kind. First match wins.
pub fn decide(presence: &Presence<'_>) -> FieldKind {
    if let Some(converter) = presence.converter {
        return FieldKind::ConvertedScalar {
            converter: converter.clone()
        };
    }
    if let Some((shape, element)) = presence.collection {
        return FieldKind::CollectionView {
            element: element.clone(),
            shape
        };
    }
    FieldKind::Scalar
}

/// Detect a collection storage type.
///
/// Returns the shape and the exposed element type. Keyed mappings expose
/// `(K, V)` pairs.
pub fn collection_shape(ty: &Type) -> Option<(CollectionShape, Type)> {
    match ty {
        Type::Group(group) => collection_shape(&group.elem),
        Type::Paren(paren) => collection_shape(&paren.elem),
        Type::Array(array) => Some((CollectionShape::Sequence, (*array.elem).clone())),
        Type::Path(type_path) if type_path.qself.is_none() => {
            let segment = type_path.path.segments.last()?;
            let args = type_args(&segment.arguments);
            let shape = match segment.ident.to_string().as_str() {
                "Vec" => CollectionShape::Sequence,
                "VecDeque" | "LinkedList" => CollectionShape::Linear,
                "HashSet" | "BTreeSet" => CollectionShape::Set,
                "HashMap" | "BTreeMap" => {
                    let [key, value, ..] = args.as_slice() else {
                        return None;
                    };
                    return Some((CollectionShape::Keyed, parse_quote!((#key, #value))));
                }
                "Box" => {
                    let Some(Type::Slice(slice)) = args.first() else {
                        return None;
                    };
                    return Some((CollectionShape::Sequence, (*slice.elem).clone()));
                }
                _ => return None
            };
            args.first().map(|element| (shape, element.clone()))
        }
        _ => None
    }
}

fn type_args(arguments: &PathArguments) -> Vec<Type> {
    match arguments {
        PathArguments::AngleBracketed(bracketed) => bracketed
            .args
            .iter()
            .filter_map(|arg| match arg {
                GenericArgument::Type(ty) => Some(ty.clone()),
                _ => None
            })
            .collect(),
        _ => Vec::new()
    }
}

/// Classify one member of `owner` into a plan.
///
/// Decorations are checked against `resolver`; unresolved ones are recorded
/// on the plan, left out of the forwarded attributes and make the plan
/// invalid.
pub fn classify<R>(member: &MemberDecl, owner: &Ident, mode: Mutability, resolver: &R) -> FieldPlan
where
    R: DecorationResolver + ?Sized
{
    let mut unresolved = Vec::new();
    let mut storage_attrs: Vec<Attribute> = Vec::new();
    let mut accessor_attrs: Vec<Attribute> = Vec::new();

    match member.surface {
        Surface::Field { .. } => storage_attrs.extend(member.attrs.iter().cloned()),
        Surface::Property { .. } => accessor_attrs.extend(member.attrs.iter().cloned())
    }

    for decoration in &member.decorations {
        let resolution = resolver.resolve(decoration.path(), DecorationRole::Decoration);
        if !resolution.is_resolved() {
            unresolved.push(Unresolved {
                path: decoration.path().clone(),
                role: DecorationRole::Decoration,
                resolution
            });
            continue;
        }
        let meta = &decoration.meta;
        let attr: Attribute = parse_quote!(#[#meta]);
        match decoration.target {
            DecorationTarget::Accessor => accessor_attrs.push(attr),
            DecorationTarget::Storage => storage_attrs.push(attr)
        }
    }

    if let Some(converter) = &member.converter {
        let resolution = resolver.resolve(converter, DecorationRole::Converter);
        if !resolution.is_resolved() {
            unresolved.push(Unresolved {
                path: converter.clone(),
                role: DecorationRole::Converter,
                resolution
            });
        }
    }

    let collection = collection_shape(&member.ty);
    let kind = decide(&Presence {
        converter:  member.converter.as_ref(),
        collection: collection
            .as_ref()
            .map(|(shape, element)| (*shape, element))
    });

    let writable = mode.is_mutable()
        && member.policy.unwrap_or_default() == WritePolicy::ReadWrite
        && !matches!(kind, FieldKind::CollectionView { .. });

    let status = if unresolved.is_empty() {
        PlanStatus::Valid
    } else {
        PlanStatus::Invalid
    };

    let plan = FieldPlan {
        backing: member.ident.clone(),
        accessor: AccessorName::derive(&member.ident),
        ty: member.ty.clone(),
        kind,
        surface: member.surface.clone(),
        policy: member.policy,
        writable,
        storage_attrs,
        accessor_attrs,
        unresolved,
        origin: owner.clone(),
        status
    };

    tracing::trace!(
        owner = %owner,
        field = %plan.backing,
        accessor = %plan.accessor.exposed,
        kind = plan.kind.label(),
        writable = plan.writable,
        valid = plan.is_valid(),
        "classified"
    );

    plan
}
