// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Member-level attribute parsing.
//!
//! A named field of a `#[data]` struct becomes one [`MemberDecl`]. The helper
//! attribute decides the surface:
//!
//! | Attribute | Surface | Storage |
//! |-----------|---------|---------|
//! | none or `#[data(..)]` | field | the field as written |
//! | `#[property]` / `#[property(..)]` | property | synthesized private field |
//! | `#[data(skip)]` | none | plain storage, no accessor |
//!
//! # Options
//!
//! | Option | `#[data]` | `#[property]` | Meaning |
//! |--------|:---------:|:-------------:|---------|
//! | `skip` | ✓ | | Keep as plain storage |
//! | `converter = Path` | ✓ | ✓ | Expose through a converter |
//! | `policy = "read_only"` | ✓ | ✓ | Per-field write policy |
//! | `accessor(meta, ..)` | ✓ | | Decorations for the getter |
//! | `storage(meta, ..)` | | ✓ | Decorations for the backing field |
//! | `setter` / `setter = "vis"` | | ✓ | Declare a write accessor |
//!
//! Any other attribute on the field is kept: on a field surface it stays on
//! the storage, on a property surface it moves to the getter.

use darling::FromMeta;
use data_schema::{Decoration, MemberDecl, WritePolicy};
use syn::{
    Attribute, Field, LitStr, Meta, Path, Token, Visibility, meta::ParseNestedMeta,
    punctuated::Punctuated
};

/// Field surface helper attribute.
pub const DATA_ATTR: &str = "data";

/// Property surface helper attribute.
pub const PROPERTY_ATTR: &str = "property";

/// Check if an attribute is consumed by the macro.
pub fn is_helper(attr: &Attribute) -> bool {
    attr.path().is_ident(DATA_ATTR) || attr.path().is_ident(PROPERTY_ATTR)
}

/// Options collected from the helper attributes of one field.
#[derive(Debug, Default)]
struct MemberOptions {
    skip:        bool,
    property:    Option<Attribute>,
    converter:   Option<Path>,
    policy:      Option<WritePolicy>,
    setter:      Option<Visibility>,
    accessor:    Vec<Meta>,
    storage:     Vec<Meta>,
    saw_field:   bool
}

/// Parse one named field into a member declaration.
///
/// Returns `Ok(None)` for `#[data(skip)]` fields.
///
/// # Errors
///
/// - Unknown options or malformed values
/// - `#[data]` and `#[property]` on the same field
/// - Surface-specific options on the wrong surface
pub fn parse_member(field: &Field) -> darling::Result<Option<MemberDecl>> {
    let Some(ident) = field.ident.clone() else {
        return Err(darling::Error::custom("data types must have named fields").with_span(field));
    };

    let mut errors = darling::Error::accumulator();
    let mut options = MemberOptions::default();
    let mut attrs = Vec::new();

    for attr in &field.attrs {
        if attr.path().is_ident(DATA_ATTR) {
            options.saw_field = true;
            errors.handle(parse_data_attr(attr, &mut options).map_err(darling::Error::from));
        } else if attr.path().is_ident(PROPERTY_ATTR) {
            if options.property.is_some() {
                errors.push(darling::Error::duplicate_field(PROPERTY_ATTR).with_span(attr));
            }
            options.property = Some(attr.clone());
            errors.handle(
                parse_property_attr(attr, &field.vis, &mut options).map_err(darling::Error::from)
            );
        } else {
            attrs.push(attr.clone());
        }
    }

    if let Some(property) = &options.property
        && options.saw_field
    {
        errors.push(
            darling::Error::custom("a member is either `#[data(..)]` or `#[property]`, not both")
                .with_span(property)
        );
    }
    if options.skip && options.property.is_some() {
        errors.push(darling::Error::custom("`skip` cannot be combined with `#[property]`").with_span(field));
    }

    errors.finish()?;

    if options.skip {
        return Ok(None);
    }

    let mut member = if options.property.is_some() {
        let mut member = MemberDecl::property(ident, field.vis.clone(), field.ty.clone());
        if let Some(setter) = options.setter {
            member = member.with_setter(setter);
        }
        member
    } else {
        MemberDecl::field(ident, field.vis.clone(), field.ty.clone())
    };

    if let Some(converter) = options.converter {
        member = member.with_converter(converter);
    }
    if let Some(policy) = options.policy {
        member = member.with_policy(policy);
    }
    for meta in options.accessor {
        member = member.with_decoration(Decoration::accessor(meta));
    }
    for meta in options.storage {
        member = member.with_decoration(Decoration::storage(meta));
    }
    for attr in attrs {
        member = member.with_attr(attr);
    }

    Ok(Some(member))
}

fn parse_data_attr(attr: &Attribute, options: &mut MemberOptions) -> syn::Result<()> {
    if !matches!(attr.meta, Meta::List(_)) {
        return Err(syn::Error::new_spanned(
            attr,
            "expected `#[data(skip | converter = .. | policy = \"..\" | accessor(..))]`"
        ));
    }

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("skip") {
            options.skip = true;
            return Ok(());
        }
        if meta.path.is_ident("accessor") {
            options.accessor.extend(parse_meta_group(&meta)?);
            return Ok(());
        }
        if parse_shared(&meta, options)? {
            return Ok(());
        }
        Err(meta.error("unknown data option, expected: skip, converter, policy, accessor"))
    })
}

fn parse_property_attr(
    attr: &Attribute,
    vis: &Visibility,
    options: &mut MemberOptions
) -> syn::Result<()> {
    match &attr.meta {
        Meta::Path(_) => return Ok(()),
        Meta::NameValue(_) => {
            return Err(syn::Error::new_spanned(attr, "expected `#[property]` or `#[property(..)]`"));
        }
        Meta::List(_) => {}
    }

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("setter") {
            options.setter = Some(if meta.input.peek(Token![=]) {
                let lit: LitStr = meta.value()?.parse()?;
                parse_visibility(&lit)?
            } else {
                vis.clone()
            });
            return Ok(());
        }
        if meta.path.is_ident("storage") {
            options.storage.extend(parse_meta_group(&meta)?);
            return Ok(());
        }
        if parse_shared(&meta, options)? {
            return Ok(());
        }
        Err(meta.error("unknown property option, expected: setter, storage, converter, policy"))
    })
}

/// Parse options valid on both surfaces. Returns `false` if `meta` is not one
/// of them.
fn parse_shared(meta: &ParseNestedMeta<'_>, options: &mut MemberOptions) -> syn::Result<bool> {
    if meta.path.is_ident("converter") {
        options.converter = Some(meta.value()?.parse()?);
        return Ok(true);
    }
    if meta.path.is_ident("policy") {
        let lit: LitStr = meta.value()?.parse()?;
        let policy = WritePolicy::from_string(&lit.value())
            .map_err(|err| syn::Error::new(lit.span(), err.to_string()))?;
        options.policy = Some(policy);
        return Ok(true);
    }
    Ok(false)
}

fn parse_meta_group(meta: &ParseNestedMeta<'_>) -> syn::Result<Vec<Meta>> {
    let content;
    syn::parenthesized!(content in meta.input);
    let metas = Punctuated::<Meta, Token![,]>::parse_terminated(&content)?;
    Ok(metas.into_iter().collect())
}

/// `""` is private, anything else must parse as a visibility.
fn parse_visibility(lit: &LitStr) -> syn::Result<Visibility> {
    if lit.value().trim().is_empty() {
        return Ok(Visibility::Inherited);
    }
    lit.parse()
}

#[cfg(test)]
mod tests {
    use data_schema::{DecorationTarget, Surface};
    use quote::ToTokens;
    use syn::parse_quote;

    use super::*;

    fn field(tokens: proc_macro2::TokenStream) -> Field {
        let item: syn::ItemStruct = parse_quote!(struct S { #tokens });
        item.fields.into_iter().next().unwrap()
    }

    #[test]
    fn plain_field_is_field_surface() {
        let member = parse_member(&field(quote::quote!(_hp: f32))).unwrap().unwrap();
        assert_eq!(member.ident, "_hp");
        assert!(member.surface.is_field());
        assert!(member.converter.is_none());
    }

    #[test]
    fn skip_drops_member() {
        let parsed = parse_member(&field(quote::quote!(#[data(skip)] cache: u64))).unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn field_options() {
        let member = parse_member(&field(quote::quote! {
            /// Hit points.
            #[data(converter = Wrap, policy = "read_only", accessor(must_use, serde(rename = "hp")))]
            _hp: f32
        }))
        .unwrap()
        .unwrap();

        assert_eq!(member.converter.to_token_stream().to_string(), "Wrap");
        assert_eq!(member.policy, Some(WritePolicy::ReadOnly));
        assert_eq!(member.decorations.len(), 2);
        assert!(
            member
                .decorations
                .iter()
                .all(|d| d.target == DecorationTarget::Accessor)
        );
        assert_eq!(member.attrs.len(), 1);
    }

    #[test]
    fn bare_property() {
        let member = parse_member(&field(quote::quote!(#[property] pub new_values: Vec<i32>)))
            .unwrap()
            .unwrap();
        assert!(matches!(
            member.surface,
            Surface::Property {
                setter: None,
                ..
            }
        ));
    }

    #[test]
    fn property_setter_defaults_to_field_visibility() {
        let member = parse_member(&field(quote::quote! {
            #[property(setter, storage(allow(dead_code)))]
            pub(crate) count: u32
        }))
        .unwrap()
        .unwrap();

        let Surface::Property {
            setter: Some(setter), ..
        } = &member.surface
        else {
            panic!("expected a property with a setter");
        };
        assert_eq!(setter.to_token_stream().to_string(), "pub (crate)");
        assert_eq!(member.decorations[0].target, DecorationTarget::Storage);
    }

    #[test]
    fn property_setter_with_explicit_visibility() {
        let member = parse_member(&field(quote::quote! {
            #[property(setter = "")]
            pub count: u32
        }))
        .unwrap()
        .unwrap();

        assert!(matches!(
            member.surface,
            Surface::Property {
                setter: Some(Visibility::Inherited),
                ..
            }
        ));
    }

    #[test]
    fn rejects_unknown_option() {
        assert!(parse_member(&field(quote::quote!(#[data(table = "x")] hp: f32))).is_err());
        assert!(parse_member(&field(quote::quote!(#[data(setter)] hp: f32))).is_err());
        assert!(parse_member(&field(quote::quote!(#[property(accessor(inline))] hp: f32))).is_err());
    }

    #[test]
    fn rejects_both_surfaces() {
        let result = parse_member(&field(quote::quote! {
            #[data(converter = Wrap)]
            #[property]
            hp: f32
        }));
        assert!(result.is_err());
    }

    #[test]
    fn rejects_bad_policy() {
        let result = parse_member(&field(quote::quote!(#[data(policy = "sometimes")] hp: f32)));
        assert!(result.is_err());
    }

    #[test]
    fn helper_detection() {
        assert!(is_helper(&parse_quote!(#[data(skip)])));
        assert!(is_helper(&parse_quote!(#[property])));
        assert!(!is_helper(&parse_quote!(#[serde(skip)])));
    }
}
