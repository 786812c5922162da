// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Symbol table for the decoration resolver.
//!
//! A proc-macro cannot see beyond its own input, so the table is built from
//! the module content plus the lists given in the module options:
//!
//! | Source | Registered as |
//! |--------|---------------|
//! | `impl Converter<..> for X` in the module | converter `X` |
//! | struct, enum, union or type alias in the module | type |
//! | `converters(..)` option | converter |
//! | `decorations(..)` option | decoration |

use data_schema::KnownSymbols;
use syn::{Item, Path, Type};

use super::parse::SchemaOptions;

/// Trait name that marks an impl block as a converter.
const CONVERTER_TRAIT: &str = "Converter";

/// Build the resolver for one module.
pub fn collect(items: &[Item], options: &SchemaOptions) -> KnownSymbols {
    let mut symbols = KnownSymbols::new();

    for item in items {
        match item {
            Item::Impl(item) => {
                let is_converter = item
                    .trait_
                    .as_ref()
                    .and_then(|(_, path, _)| path.segments.last())
                    .is_some_and(|segment| segment.ident == CONVERTER_TRAIT);
                if is_converter && let Some(path) = self_path(&item.self_ty) {
                    symbols.add_converter(&path);
                }
            }
            Item::Struct(item) => symbols.add_type(&Path::from(item.ident.clone())),
            Item::Enum(item) => symbols.add_type(&Path::from(item.ident.clone())),
            Item::Union(item) => symbols.add_type(&Path::from(item.ident.clone())),
            Item::Type(item) => symbols.add_type(&Path::from(item.ident.clone())),
            _ => {}
        }
    }

    for path in options.converters.iter() {
        symbols.add_converter(path);
    }
    for path in options.decorations.iter() {
        symbols.add_decoration(path);
    }

    symbols
}

fn self_path(ty: &Type) -> Option<Path> {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => Some(type_path.path.clone()),
        _ => None
    }
}

#[cfg(test)]
mod tests {
    use data_schema::{DecorationResolver, DecorationRole, Resolution};
    use syn::{ItemMod, parse_quote};

    use super::*;

    fn module() -> Vec<Item> {
        let module: ItemMod = parse_quote! {
            mod game {
                #[derive(Default)]
                pub struct Wrap;

                impl ::data_core::Converter<f32> for Wrap {
                    type Output = FloatWrapper;
                    fn convert(&self, raw: &f32) -> FloatWrapper { FloatWrapper(*raw) }
                }

                pub struct FloatWrapper(pub f32);

                pub enum Rarity { Common }
            }
        };
        module.content.map(|(_, items)| items).unwrap_or_default()
    }

    #[test]
    fn local_converter_impls_register_converters() {
        let symbols = collect(&module(), &SchemaOptions::default());
        assert_eq!(
            symbols.resolve(&parse_quote!(Wrap), DecorationRole::Converter),
            Resolution::Resolved
        );
        assert_eq!(
            symbols.resolve(&parse_quote!(FloatWrapper), DecorationRole::Converter),
            Resolution::WrongShape
        );
        assert_eq!(
            symbols.resolve(&parse_quote!(Rarity), DecorationRole::Converter),
            Resolution::WrongShape
        );
    }

    #[test]
    fn option_lists_extend_the_table() {
        let options = SchemaOptions::parse(quote::quote! {
            decorations(serde),
            converters(crate::convert::Percent)
        })
        .unwrap();
        let symbols = collect(&[], &options);

        assert!(
            symbols
                .resolve(&parse_quote!(serde), DecorationRole::Decoration)
                .is_resolved()
        );
        assert!(
            symbols
                .resolve(&parse_quote!(Percent), DecorationRole::Converter)
                .is_resolved()
        );
        assert_eq!(
            symbols.resolve(&parse_quote!(Missing), DecorationRole::Converter),
            Resolution::Missing
        );
    }
}
