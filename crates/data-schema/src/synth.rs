// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Accessor synthesis.
//!
//! Turns the validated plans of a [`DataType`] into [`GeneratedMember`]s.
//! Each member knows how to render itself, so hosts can splice them into an
//! inherent `impl` block directly.
//!
//! # Generated Code
//!
//! For `Stat { _hp: f32 }` with converter `Wrap` and `Hero { _multipliers:
//! Vec<Stat> }`:
//!
//! ```rust,ignore
//! impl Stat {
//!     pub fn hp(&self) -> <Wrap as ::data_core::Converter<f32>>::Output {
//!         <Wrap as ::data_core::Converter<f32>>::convert(
//!             &<Wrap as ::core::default::Default>::default(),
//!             &self._hp,
//!         )
//!     }
//! }
//!
//! impl Hero {
//!     pub fn multipliers(&self) -> ::data_core::ReadView<'_, Stat> {
//!         ::data_core::ReadView::new(&self._multipliers)
//!     }
//! }
//! ```

use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{Attribute, Generics, Ident, Path, Type, Visibility};

use crate::{
    compile::{CompileOptions, InvalidPlanPolicy},
    model::{DataType, FieldKind, FieldPlan}
};

/// Read or write accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    /// Read accessor.
    Getter,
    /// Write accessor.
    Setter
}

/// What a generated member does with the backing storage.
#[derive(Debug, Clone)]
pub enum MemberBody {
    /// Return a reference to the stored value.
    Read {
        /// Backing field.
        field: Ident,
        /// Stored type.
        ty:    Type
    },

    /// Return the converter applied to the stored value.
    Convert {
        /// Backing field.
        field:     Ident,
        /// Stored type.
        raw:       Type,
        /// Converter type.
        converter: Path
    },

    /// Return a read-only view over the stored collection.
    View {
        /// Backing field.
        field:   Ident,
        /// Element type.
        element: Type
    },

    /// Replace the stored value.
    Write {
        /// Backing field.
        field: Ident,
        /// Stored type.
        ty:    Type
    }
}

impl MemberBody {
    /// Backing field the body touches.
    #[must_use]
    pub fn field(&self) -> &Ident {
        match self {
            Self::Read {
                field, ..
            }
            | Self::Convert {
                field, ..
            }
            | Self::View {
                field, ..
            }
            | Self::Write {
                field, ..
            } => field
        }
    }
}

/// One synthesized accessor.
#[derive(Debug, Clone)]
pub struct GeneratedMember {
    /// Exposed accessor name.
    pub name: String,

    /// Method identifier.
    pub accessor: Ident,

    /// Getter or setter.
    pub kind: MemberKind,

    /// Type the member is generated on.
    pub owner: Ident,

    /// Method visibility.
    pub vis: Visibility,

    /// Attributes forwarded onto the method.
    pub attrs: Vec<Attribute>,

    /// Behaviour.
    pub body: MemberBody,

    /// Declaring base type, for inherited members.
    pub inherited_from: Option<Ident>,

    /// Rendered with an unreachable body because the plan is invalid.
    pub stubbed: bool,

    /// Path of the runtime crate.
    pub runtime: Path
}

impl GeneratedMember {
    fn signature(&self) -> TokenStream {
        let accessor = &self.accessor;
        let runtime = &self.runtime;
        match &self.body {
            MemberBody::Read {
                ty, ..
            } => quote! { fn #accessor(&self) -> &#ty },
            MemberBody::Convert {
                raw,
                converter,
                ..
            } => quote! {
                fn #accessor(&self) -> <#converter as #runtime::Converter<#raw>>::Output
            },
            MemberBody::View {
                element, ..
            } => quote! { fn #accessor(&self) -> #runtime::ReadView<'_, #element> },
            MemberBody::Write {
                ty, ..
            } => quote! { fn #accessor(&mut self, value: #ty) }
        }
    }

    fn block(&self) -> TokenStream {
        if self.stubbed {
            let message = format!(
                "`{}::{}` was rejected by the data schema compiler",
                self.owner, self.accessor
            );
            let discard = matches!(self.body, MemberBody::Write { .. })
                .then(|| quote! { let _ = value; });
            return quote! { #discard ::core::unreachable!(#message) };
        }

        let runtime = &self.runtime;
        match &self.body {
            MemberBody::Read {
                field, ..
            } => quote! { &self.#field },
            MemberBody::Convert {
                field,
                raw,
                converter
            } => quote! {
                <#converter as #runtime::Converter<#raw>>::convert(
                    &<#converter as ::core::default::Default>::default(),
                    &self.#field,
                )
            },
            MemberBody::View {
                field, ..
            } => quote! { #runtime::ReadView::new(&self.#field) },
            MemberBody::Write {
                field, ..
            } => quote! { self.#field = value; }
        }
    }
}

impl ToTokens for GeneratedMember {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let attrs = &self.attrs;
        let vis = &self.vis;
        let signature = self.signature();
        let block = self.block();
        let doc = match self.kind {
            MemberKind::Getter => format!("Returns `{}`.", self.name),
            MemberKind::Setter => format!("Sets `{}`.", self.name)
        };
        let doc = (!attrs.iter().any(|attr| attr.path().is_ident("doc")))
            .then(|| quote! { #[doc = #doc] });

        tokens.extend(quote! {
            #doc
            #(#attrs)*
            #[inline]
            #vis #signature {
                #block
            }
        });
    }
}

/// Accessors generated for one type.
#[derive(Debug, Clone)]
pub struct GeneratedType {
    /// Owning type.
    pub owner: Ident,

    /// Owner generics, for the `impl` header.
    pub generics: Generics,

    /// Members in plan order.
    pub members: Vec<GeneratedMember>
}

impl GeneratedType {
    /// Exposed names of the generated getters, in order.
    #[must_use]
    pub fn getter_names(&self) -> Vec<&str> {
        self.names(MemberKind::Getter)
    }

    /// Exposed names of the generated setters, in order.
    #[must_use]
    pub fn setter_names(&self) -> Vec<&str> {
        self.names(MemberKind::Setter)
    }

    fn names(&self, kind: MemberKind) -> Vec<&str> {
        self.members
            .iter()
            .filter(|member| member.kind == kind && !member.stubbed)
            .map(|member| member.name.as_str())
            .collect()
    }

    /// Find a member by exposed name and kind.
    #[must_use]
    pub fn member(&self, name: &str, kind: MemberKind) -> Option<&GeneratedMember> {
        self.members
            .iter()
            .find(|member| member.name == name && member.kind == kind)
    }

    /// Render the inherent `impl` block.
    pub fn inherent_impl(&self) -> TokenStream {
        let owner = &self.owner;
        let members = &self.members;
        let (impl_generics, ty_generics, where_clause) = self.generics.split_for_impl();
        quote! {
            impl #impl_generics #owner #ty_generics #where_clause {
                #(#members)*
            }
        }
    }
}

impl ToTokens for GeneratedType {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        tokens.extend(self.inherent_impl());
    }
}

/// Receiver for synthesized members.
pub trait CodeSink {
    /// Accept the members generated for `data`.
    fn emit(&mut self, data: &DataType, members: Vec<GeneratedMember>);
}

impl CodeSink for Vec<GeneratedType> {
    fn emit(&mut self, data: &DataType, members: Vec<GeneratedMember>) {
        self.push(GeneratedType {
            owner: data.ident.clone(),
            generics: data.generics.clone(),
            members
        });
    }
}

/// Synthesize the accessors of a validated type.
///
/// Invalid plans are skipped, or stubbed under [`InvalidPlanPolicy::Stub`].
/// A stub never takes a method name that a valid plan or an earlier stub
/// already uses.
pub fn synthesize(data: &DataType, options: &CompileOptions) -> Vec<GeneratedMember> {
    let mut taken: HashSet<String> = data
        .valid_plans()
        .flat_map(|plan| {
            let setter = plan.writable.then(|| plan.accessor.setter.to_string());
            std::iter::once(plan.accessor.getter.to_string()).chain(setter)
        })
        .collect();

    let mut members = Vec::new();
    for plan in &data.plans {
        let stubbed = !plan.is_valid();
        if stubbed && options.invalid == InvalidPlanPolicy::Omit {
            continue;
        }
        if !stubbed || taken.insert(plan.accessor.getter.to_string()) {
            members.push(getter(data, plan, options, stubbed));
        }
        if plan.writable && (!stubbed || taken.insert(plan.accessor.setter.to_string())) {
            members.push(setter(data, plan, options, stubbed));
        }
    }
    members
}

fn member(
    data: &DataType,
    plan: &FieldPlan,
    options: &CompileOptions,
    kind: MemberKind,
    body: MemberBody,
    stubbed: bool
) -> GeneratedMember {
    let (accessor, vis, attrs) = match kind {
        MemberKind::Getter => (
            plan.accessor.getter.clone(),
            plan.getter_vis(),
            plan.accessor_attrs.clone()
        ),
        MemberKind::Setter => (plan.accessor.setter.clone(), plan.setter_vis(), Vec::new())
    };
    GeneratedMember {
        name: plan.accessor.exposed.clone(),
        accessor,
        kind,
        owner: data.ident.clone(),
        vis,
        attrs,
        body,
        inherited_from: plan
            .is_inherited_by(&data.ident)
            .then(|| plan.origin.clone()),
        stubbed,
        runtime: options.runtime.clone()
    }
}

fn getter(
    data: &DataType,
    plan: &FieldPlan,
    options: &CompileOptions,
    stubbed: bool
) -> GeneratedMember {
    let field = plan.backing.clone();
    let body = match &plan.kind {
        FieldKind::Scalar => MemberBody::Read {
            field,
            ty: plan.ty.clone()
        },
        FieldKind::ConvertedScalar {
            converter
        } => MemberBody::Convert {
            field,
            raw: plan.ty.clone(),
            converter: converter.clone()
        },
        FieldKind::CollectionView {
            element, ..
        } => MemberBody::View {
            field,
            element: element.clone()
        }
    };
    member(data, plan, options, MemberKind::Getter, body, stubbed)
}

fn setter(
    data: &DataType,
    plan: &FieldPlan,
    options: &CompileOptions,
    stubbed: bool
) -> GeneratedMember {
    let body = MemberBody::Write {
        field: plan.backing.clone(),
        ty:    plan.ty.clone()
    };
    member(data, plan, options, MemberKind::Setter, body, stubbed)
}
