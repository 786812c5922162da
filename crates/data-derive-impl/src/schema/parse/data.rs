// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Struct-level `#[data(...)]` parsing.
//!
//! # Syntax
//!
//! ```rust,ignore
//! #[data]                                     // immutable, no base
//! #[data(mutable)]                            // setters allowed
//! #[data(base = "Hero")]                      // extends Hero
//! #[data(mutable, base = "GenericData<i32>")] // generic base
//! ```

use darling::{FromMeta, ast::NestedMeta};
use data_schema::{BaseRef, Mutability, TypeDecl};
use syn::{Attribute, Fields, ItemStruct, Meta, Type};

use super::member::{DATA_ATTR, parse_member};

/// Options from the struct-level `#[data(...)]` attribute.
#[derive(Debug, Default, FromMeta)]
pub struct DataOptions {
    /// Allow write accessors.
    #[darling(default)]
    pub mutable: bool,

    /// Base data type.
    #[darling(default)]
    pub base: Option<Type>
}

impl DataOptions {
    /// Parse from the attribute. A bare `#[data]` yields the defaults.
    pub fn from_attr(attr: &Attribute) -> darling::Result<Self> {
        match &attr.meta {
            Meta::Path(_) => Ok(Self::default()),
            Meta::List(list) => {
                let items = NestedMeta::parse_meta_list(list.tokens.clone())?;
                Self::from_list(&items).map_err(|err| err.with_span(attr))
            }
            Meta::NameValue(_) => Err(darling::Error::unsupported_format("name-value").with_span(attr))
        }
    }
}

/// Find the `#[data]` attribute of a struct, if it is a data type.
pub fn data_attr(item: &ItemStruct) -> Option<&Attribute> {
    item.attrs.iter().find(|attr| attr.path().is_ident(DATA_ATTR))
}

/// Lift a `#[data]` struct into a type declaration.
///
/// Returns `Ok(None)` for structs without the attribute.
pub fn parse_data_struct(item: &ItemStruct) -> darling::Result<Option<TypeDecl>> {
    let Some(attr) = data_attr(item) else {
        return Ok(None);
    };

    let mut errors = darling::Error::accumulator();
    let options = errors.handle(DataOptions::from_attr(attr)).unwrap_or_default();

    let mut decl = TypeDecl::new(item.ident.clone()).with_generics(item.generics.clone());
    if options.mutable {
        decl = decl.with_mode(Mutability::Mutable);
    }
    if let Some(base) = &options.base {
        match BaseRef::from_type(base) {
            Some(base) => decl = decl.with_base(base),
            None => errors.push(
                darling::Error::custom("`base` must name a data type, e.g. `base = \"Hero\"`")
                    .with_span(base)
            )
        }
    }

    match &item.fields {
        Fields::Named(fields) => {
            for field in &fields.named {
                if let Some(Some(member)) = errors.handle(parse_member(field)) {
                    decl = decl.with_member(member);
                }
            }
        }
        Fields::Unit => {}
        Fields::Unnamed(_) => errors.push(
            darling::Error::custom("data types must have named fields").with_span(&item.ident)
        )
    }

    errors.finish_with(Some(decl))
}
