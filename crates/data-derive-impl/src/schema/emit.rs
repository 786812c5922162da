// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Re-emitting the schema module.
//!
//! Every item is kept in place. Each data struct is rewritten and followed by
//! its generated code:
//!
//! ```text
//! #[data(base = "Hero")]              pub struct NewHero {
//! pub struct NewHero {       ──►          _multipliers: Vec<Stat>,   // inherited storage
//!     _new_values: Vec<i32>,              _new_values: Vec<i32>,
//! }                                   }
//!                                     impl NewHero { multipliers(), new_values() }
//!                                     impl Data for NewHero { .. }
//! ```
//!
//! Diagnostics become `compile_error!` items at the end of the module.

use data_schema::{DataType, FieldPlan, GeneratedType, Output, Surface};
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{
    Field, FieldMutability, Fields, Item, ItemMod, ItemStruct, Path, Visibility,
    punctuated::Punctuated
};

use super::parse::{data_attr, is_helper};

/// Render the module with generated code and diagnostics.
pub fn emit(mut module: ItemMod, output: &Output, runtime: &Path) -> TokenStream {
    let Some((brace, items)) = module.content.take() else {
        return module.to_token_stream();
    };

    let mut content = Vec::with_capacity(items.len());
    for item in items {
        let Item::Struct(mut item) = item else {
            content.push(item);
            continue;
        };
        let data = data_attr(&item)
            .is_some()
            .then(|| output.data_type(&item.ident.to_string()))
            .flatten();
        let Some(data) = data else {
            content.push(Item::Struct(item));
            continue;
        };

        rewrite_struct(&mut item, data);
        content.push(Item::Struct(item));
        if let Some(generated) = output.generated_for(&data.ident.to_string()) {
            content.push(Item::Verbatim(generated.inherent_impl()));
            content.push(Item::Verbatim(data_impl(data, generated, runtime)));
        }
    }

    for diagnostic in &output.diagnostics {
        content.push(Item::Verbatim(diagnostic.to_syn_error().to_compile_error()));
    }

    module.content = Some((brace, content));
    module.to_token_stream()
}

/// Remove helper attributes so a module that failed to parse does not cascade
/// into unknown-attribute errors.
pub fn strip_helpers(module: &mut ItemMod) {
    let Some((_, items)) = &mut module.content else {
        return;
    };
    for item in items {
        if let Item::Struct(item) = item
            && data_attr(item).is_some()
        {
            item.attrs.retain(|attr| !is_helper(attr));
            for field in item.fields.iter_mut() {
                field.attrs.retain(|attr| !is_helper(attr));
            }
        }
    }
}

fn rewrite_struct(item: &mut ItemStruct, data: &DataType) {
    item.attrs.retain(|attr| !is_helper(attr));

    if matches!(item.fields, Fields::Unit) && data.inherited_plans().next().is_some() {
        item.fields = Fields::Named(syn::parse_quote!({}));
        item.semi_token = None;
    }
    let Fields::Named(fields) = &mut item.fields else {
        return;
    };

    let own = std::mem::take(&mut fields.named);
    let mut named = Punctuated::new();

    for plan in data.inherited_plans() {
        let declared = own
            .iter()
            .any(|field| field.ident.as_ref() == Some(&plan.backing));
        if !declared {
            named.push(inherited_storage(data, plan));
        }
    }

    for mut field in own {
        let plan = field
            .ident
            .as_ref()
            .and_then(|ident| data.own_plans().find(|plan| &plan.backing == ident));
        match plan {
            Some(plan) => {
                field.attrs = plan.storage_attrs.clone();
                if plan.surface.is_property() {
                    field.vis = Visibility::Inherited;
                }
            }
            None => field.attrs.retain(|attr| !is_helper(attr))
        }
        named.push(field);
    }

    fields.named = named;
}

/// Backing field for a plan inherited from the base chain.
///
/// Property storage is always private. Field storage keeps its visibility
/// on mutable types and is private on immutable ones.
fn inherited_storage(data: &DataType, plan: &FieldPlan) -> Field {
    let vis = match &plan.surface {
        Surface::Field {
            vis
        } if data.mode.is_mutable() => vis.clone(),
        _ => Visibility::Inherited
    };
    Field {
        attrs: plan.storage_attrs.clone(),
        vis,
        mutability: FieldMutability::None,
        ident: Some(plan.backing.clone()),
        colon_token: Some(Default::default()),
        ty: plan.ty.clone()
    }
}

fn data_impl(data: &DataType, generated: &GeneratedType, runtime: &Path) -> TokenStream {
    let ident = &data.ident;
    let name = ident.to_string();
    let accessors = generated.getter_names();
    let writable = generated.setter_names();
    let mutable = data.mode.is_mutable();
    let (impl_generics, ty_generics, where_clause) = data.generics.split_for_impl();

    quote! {
        impl #impl_generics #runtime::Data for #ident #ty_generics #where_clause {
            const NAME: &'static str = #name;
            const ACCESSORS: &'static [&'static str] = &[#(#accessors),*];
            const WRITABLE: &'static [&'static str] = &[#(#writable),*];
            const MUTABLE: bool = #mutable;
        }
    }
}
