// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Expansion tests.
//!
//! The expanded module is parsed back so assertions do not depend on token
//! spacing.

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{ImplItem, Item, ItemMod, ItemStruct, Visibility};

use super::expand;

fn expand_mod(args: TokenStream, item: TokenStream) -> ItemMod {
    syn::parse2(expand(args, item)).unwrap()
}

fn items(module: &ItemMod) -> &[Item] {
    module
        .content
        .as_ref()
        .map(|(_, items)| items.as_slice())
        .unwrap_or_default()
}

fn structure<'a>(module: &'a ItemMod, name: &str) -> &'a ItemStruct {
    items(module)
        .iter()
        .find_map(|item| match item {
            Item::Struct(item) if item.ident == name => Some(item),
            _ => None
        })
        .unwrap()
}

fn field_names(item: &ItemStruct) -> Vec<String> {
    item.fields
        .iter()
        .filter_map(|field| field.ident.as_ref().map(ToString::to_string))
        .collect()
}

fn methods(module: &ItemMod, owner: &str) -> Vec<String> {
    items(module)
        .iter()
        .filter_map(|item| match item {
            Item::Impl(item)
                if item.trait_.is_none() && item.self_ty.to_token_stream().to_string() == owner =>
            {
                Some(item)
            }
            _ => None
        })
        .flat_map(|item| &item.items)
        .filter_map(|item| match item {
            ImplItem::Fn(method) => Some(method.sig.ident.to_string()),
            _ => None
        })
        .collect()
}

fn data_impl_count(module: &ItemMod) -> usize {
    items(module)
        .iter()
        .filter(|item| match item {
            Item::Impl(item) => item
                .trait_
                .as_ref()
                .is_some_and(|(_, path, _)| path.segments.last().is_some_and(|s| s.ident == "Data")),
            _ => false
        })
        .count()
}

fn errors(module: &ItemMod) -> Vec<String> {
    items(module)
        .iter()
        .filter_map(|item| match item {
            Item::Macro(item)
                if item
                    .mac
                    .path
                    .segments
                    .last()
                    .is_some_and(|s| s.ident == "compile_error") =>
            {
                Some(item.mac.tokens.to_string())
            }
            _ => None
        })
        .collect()
}

fn converter_prelude() -> TokenStream {
    quote! {
        #[derive(Default)]
        pub struct Wrap;

        impl ::data_core::Converter<f32> for Wrap {
            type Output = FloatWrapper;

            fn convert(&self, raw: &f32) -> FloatWrapper {
                FloatWrapper(*raw)
            }
        }

        pub struct FloatWrapper(pub f32);
    }
}

#[test]
fn immutable_type_with_public_field() {
    let prelude = converter_prelude();
    let module = expand_mod(quote!(), quote! {
        mod game {
            #prelude

            #[data]
            pub struct Stat {
                #[data(converter = Wrap)]
                _hp: f32,
                #[data(converter = Wrap)]
                pub _atk: f32
            }
        }
    });

    assert_eq!(methods(&module, "Stat"), vec!["hp"]);
    let errors = errors(&module);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("DATA_0004"));
    assert_eq!(data_impl_count(&module), 1);
}

#[test]
fn helper_attributes_are_stripped() {
    let module = expand_mod(quote!(), quote! {
        mod game {
            #[data]
            #[derive(Debug)]
            pub struct Hero {
                #[data(skip)]
                #[allow(dead_code)]
                cache: u8,
                _multipliers: Vec<u8>
            }
        }
    });

    let hero = structure(&module, "Hero");
    assert_eq!(hero.attrs.len(), 1);
    assert!(hero.attrs[0].path().is_ident("derive"));
    let cache = hero.fields.iter().next().unwrap();
    assert_eq!(cache.attrs.len(), 1);
    assert!(cache.attrs[0].path().is_ident("allow"));
    assert_eq!(methods(&module, "Hero"), vec!["multipliers"]);
}

#[test]
fn inherited_storage_is_injected_base_first() {
    let module = expand_mod(quote!(), quote! {
        mod game {
            #[data(base = "Hero")]
            pub struct NewHero {
                _new_values: Vec<i32>
            }

            #[data]
            pub struct Hero {
                _multipliers: Vec<u8>
            }
        }
    });

    assert!(errors(&module).is_empty());
    let new_hero = structure(&module, "NewHero");
    assert_eq!(field_names(new_hero), vec!["_multipliers", "_new_values"]);
    assert!(matches!(
        new_hero.fields.iter().next().unwrap().vis,
        Visibility::Inherited
    ));
    assert_eq!(methods(&module, "NewHero"), vec!["multipliers", "new_values"]);
    assert_eq!(data_impl_count(&module), 2);
}

#[test]
fn generic_base_is_substituted() {
    let module = expand_mod(quote!(), quote! {
        mod game {
            #[data]
            pub struct GenericData<T> {
                _value: T
            }

            #[data(base = "GenericData<i32>")]
            pub struct IntData {
                _extra: u8
            }
        }
    });

    assert!(errors(&module).is_empty());
    let int_data = structure(&module, "IntData");
    let injected = int_data.fields.iter().next().unwrap();
    assert_eq!(injected.ty.to_token_stream().to_string(), "i32");
    assert_eq!(methods(&module, "IntData"), vec!["value", "extra"]);
}

#[test]
fn mutable_type_gets_setters() {
    let module = expand_mod(quote!(), quote! {
        mod game {
            #[data(mutable)]
            pub struct Counter {
                value: i32,
                #[data(policy = "read_only")]
                id: u32,
                history: Vec<i32>
            }
        }
    });

    assert!(errors(&module).is_empty());
    assert_eq!(
        methods(&module, "Counter"),
        vec!["value", "set_value", "id", "history"]
    );
}

#[test]
fn property_storage_becomes_private() {
    let module = expand_mod(quote!(), quote! {
        mod game {
            #[data(mutable)]
            pub struct Counter {
                /// Current count.
                #[property(setter)]
                pub count: u32
            }
        }
    });

    assert!(errors(&module).is_empty());
    let counter = structure(&module, "Counter");
    let count = counter.fields.iter().next().unwrap();
    assert!(matches!(count.vis, Visibility::Inherited));
    assert!(count.attrs.is_empty());
    assert_eq!(methods(&module, "Counter"), vec!["count", "set_count"]);
}

#[test]
fn unresolved_decoration_is_reported() {
    let source = quote! {
        mod game {
            #[data]
            pub struct Stat {
                #[data(accessor(serde(rename = "hp")))]
                _hp: f32
            }
        }
    };

    let module = expand_mod(quote!(), source.clone());
    let errors = errors(&module);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("DATA_0001"));
    assert!(methods(&module, "Stat").is_empty());

    let module = expand_mod(quote!(decorations(serde)), source);
    assert!(self::errors(&module).is_empty());
    assert_eq!(methods(&module, "Stat"), vec!["hp"]);
}

#[test]
fn converter_naming_a_plain_type_is_wrong_shape() {
    let prelude = converter_prelude();
    let module = expand_mod(quote!(), quote! {
        mod game {
            #prelude

            #[data]
            pub struct Stat {
                #[data(converter = FloatWrapper)]
                _hp: f32
            }
        }
    });

    let errors = errors(&module);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("DATA_0001"));
}

#[test]
fn unknown_base_is_reported() {
    let module = expand_mod(quote!(), quote! {
        mod game {
            #[data(base = "Villain")]
            pub struct Orphan {
                _hp: u8
            }
        }
    });

    let errors = errors(&module);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("DATA_0008"));
    assert_eq!(methods(&module, "Orphan"), vec!["hp"]);
}

#[test]
fn keyed_mapping_needs_skip() {
    let module = expand_mod(quote!(), quote! {
        mod game {
            #[data]
            pub struct Inventory {
                _items: ::std::collections::HashMap<u32, u8>
            }
        }
    });
    assert!(errors(&module)[0].contains("DATA_0006"));

    let module = expand_mod(quote!(), quote! {
        mod game {
            #[data]
            pub struct Inventory {
                #[data(skip)]
                _items: ::std::collections::HashMap<u32, u8>
            }
        }
    });
    assert!(errors(&module).is_empty());
    assert!(methods(&module, "Inventory").is_empty());
}

#[test]
fn stub_policy_keeps_rejected_accessors() {
    let prelude = converter_prelude();
    let module = expand_mod(quote!(invalid = "stub"), quote! {
        mod game {
            #prelude

            #[data]
            pub struct Stat {
                #[data(converter = Wrap)]
                pub _atk: f32
            }
        }
    });

    assert_eq!(methods(&module, "Stat"), vec!["atk"]);
    assert_eq!(errors(&module).len(), 1);
}

#[test]
fn stub_policy_never_duplicates_methods() {
    let module = expand_mod(quote!(invalid = "stub"), quote! {
        mod game {
            #[data]
            pub struct Hero {
                _values: Vec<i32>,
                m_values: Vec<i32>
            }

            #[data(base = "Hero")]
            pub struct NewHero {
                _values: Vec<i32>
            }
        }
    });

    let errors = errors(&module);
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|error| error.contains("DATA_0007")));
    assert_eq!(methods(&module, "Hero"), vec!["values"]);
    assert_eq!(methods(&module, "NewHero"), vec!["values"]);
}

#[test]
fn runtime_path_is_configurable() {
    let module = expand_mod(quote!(crate = "crate::rt"), quote! {
        mod game {
            #[data]
            pub struct Hero {
                _multipliers: Vec<u8>
            }
        }
    });

    let rendered = module.to_token_stream().to_string();
    assert!(rendered.contains("crate :: rt :: Data"));
    assert!(rendered.contains("crate :: rt :: ReadView"));
    assert!(!rendered.contains("data_core"));
}

#[test]
fn parse_errors_keep_the_module() {
    let output = expand(quote!(), quote! {
        mod game {
            #[data(frozen)]
            pub struct Hero {
                #[data(converter)]
                _hp: u8
            }
        }
    });

    let file: syn::File = syn::parse2(output).unwrap();
    let Item::Mod(module) = &file.items[0] else {
        panic!("expected the module first");
    };
    let hero = structure(module, "Hero");
    assert!(hero.attrs.is_empty());
    assert!(hero.fields.iter().all(|field| field.attrs.is_empty()));
    let compile_errors = file
        .items
        .iter()
        .filter(|item| matches!(item, Item::Macro(_)))
        .count();
    assert_eq!(compile_errors, 2);
}

#[test]
fn non_module_input_is_an_error() {
    let output = expand(quote!(), quote!(struct NotAModule;)).to_string();
    assert!(output.contains("compile_error"));
}
