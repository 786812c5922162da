// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Declaration model consumed by the compiler.
//!
//! Hosts describe every type that takes part in the schema as a [`TypeDecl`]
//! with its ordered [`MemberDecl`]s. The model follows what a
//! declaration carries in source: a member is either a backing field the user
//! wrote ([`Surface::Field`]) or an exposed property whose storage the
//! generator synthesizes ([`Surface::Property`]). Both forms end up as the
//! same [`FieldPlan`](crate::FieldPlan) after classification.
//!
//! # Example
//!
//! ```rust,ignore
//! let stat = TypeDecl::named("Stat")
//!     .with_member(MemberDecl::field(ident("_hp"), Visibility::Inherited, parse_quote!(f32))
//!         .with_converter(parse_quote!(Wrap)));
//! ```

use proc_macro2::Span;
use syn::{Attribute, GenericArgument, Generics, Ident, Meta, Path, PathArguments, Type, Visibility};

use crate::model::{Mutability, WritePolicy};

/// A type declaration (or one fragment of it).
#[derive(Debug, Clone)]
pub struct TypeDecl {
    /// Type identifier.
    pub ident: Ident,

    /// Generic parameters as declared.
    pub generics: Generics,

    /// Single base type, if the type extends another data type.
    pub base: Option<BaseRef>,

    /// Declared mutability mode.
    pub mode: Mutability,

    /// Members in declaration order.
    pub members: Vec<MemberDecl>,

    /// Ordering key among fragments of the same type.
    ///
    /// Fragments are merged in ascending key order, so the order in which a
    /// host hands fragments over never shows up in the output.
    pub fragment: usize
}

impl TypeDecl {
    /// Start an immutable, non-generic declaration.
    pub fn new(ident: Ident) -> Self {
        Self {
            ident,
            generics: Generics::default(),
            base: None,
            mode: Mutability::Immutable,
            members: Vec::new(),
            fragment: 0
        }
    }

    /// Start a declaration from a plain name.
    pub fn named(name: &str) -> Self {
        Self::new(Ident::new(name, Span::call_site()))
    }

    /// Set the mutability mode.
    #[must_use]
    pub fn with_mode(mut self, mode: Mutability) -> Self {
        self.mode = mode;
        self
    }

    /// Shorthand for [`Mutability::Mutable`].
    #[must_use]
    pub fn mutable(self) -> Self {
        self.with_mode(Mutability::Mutable)
    }

    /// Set generic parameters.
    #[must_use]
    pub fn with_generics(mut self, generics: Generics) -> Self {
        self.generics = generics;
        self
    }

    /// Set the base type.
    #[must_use]
    pub fn with_base(mut self, base: BaseRef) -> Self {
        self.base = Some(base);
        self
    }

    /// Append a member.
    #[must_use]
    pub fn with_member(mut self, member: MemberDecl) -> Self {
        self.members.push(member);
        self
    }

    /// Set the fragment ordering key.
    #[must_use]
    pub fn with_fragment(mut self, fragment: usize) -> Self {
        self.fragment = fragment;
        self
    }

    /// Identifiers of the declared type parameters, in order.
    pub fn type_params(&self) -> Vec<Ident> {
        self.generics
            .type_params()
            .map(|param| param.ident.clone())
            .collect()
    }
}

/// Reference to a base type with its generic arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseRef {
    /// Base type identifier.
    pub ident: Ident,

    /// Type arguments substituted for the base's type parameters.
    pub args: Vec<Type>
}

impl BaseRef {
    /// Reference a base type without generic arguments.
    pub fn new(ident: Ident) -> Self {
        Self {
            ident,
            args: Vec::new()
        }
    }

    /// Add a generic argument.
    #[must_use]
    pub fn with_arg(mut self, arg: Type) -> Self {
        self.args.push(arg);
        self
    }

    /// Build a base reference from a written type such as `Hero` or
    /// `GenericData<i32>`.
    ///
    /// Only the last path segment names the base; lifetime and const
    /// arguments are ignored. Returns `None` for anything that is not a
    /// plain path type.
    pub fn from_type(ty: &Type) -> Option<Self> {
        let Type::Path(type_path) = ty else {
            return None;
        };
        if type_path.qself.is_some() {
            return None;
        }
        let segment = type_path.path.segments.last()?;
        let args = match &segment.arguments {
            PathArguments::AngleBracketed(bracketed) => bracketed
                .args
                .iter()
                .filter_map(|arg| match arg {
                    GenericArgument::Type(ty) => Some(ty.clone()),
                    _ => None
                })
                .collect(),
            _ => Vec::new()
        };
        Some(Self {
            ident: segment.ident.clone(),
            args
        })
    }

    /// Display form, e.g. `GenericData<i32>`.
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            return self.ident.to_string();
        }
        let args: Vec<String> = self
            .args
            .iter()
            .map(|arg| quote::quote!(#arg).to_string().replace(' ', ""))
            .collect();
        format!("{}<{}>", self.ident, args.join(", "))
    }
}

/// How a member was declared in source.
#[derive(Debug, Clone)]
pub enum Surface {
    /// User-declared backing field with its visibility.
    Field {
        /// Field visibility.
        vis: Visibility
    },

    /// User-declared exposed property; storage is synthesized.
    Property {
        /// Visibility of the read accessor.
        vis:    Visibility,
        /// Declared write accessor visibility, if a setter was declared.
        setter: Option<Visibility>
    }
}

impl Surface {
    /// Check if this is a field surface.
    #[must_use]
    pub fn is_field(&self) -> bool {
        matches!(self, Self::Field { .. })
    }

    /// Check if this is a property surface.
    #[must_use]
    pub fn is_property(&self) -> bool {
        matches!(self, Self::Property { .. })
    }

    /// Surface name used in diagnostics.
    #[must_use]
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Field { .. } => "field",
            Self::Property { .. } => "property"
        }
    }
}

/// What a decoration is forwarded onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorationTarget {
    /// The generated read accessor.
    Accessor,
    /// The backing storage.
    Storage
}

/// Decoration attached to a member and forwarded onto generated code.
#[derive(Debug, Clone)]
pub struct Decoration {
    /// Where the decoration lands.
    pub target: DecorationTarget,

    /// Decoration content, e.g. `must_use` or `serde(rename = "hp")`.
    pub meta: Meta
}

impl Decoration {
    /// Decoration for the generated accessor.
    pub fn accessor(meta: Meta) -> Self {
        Self {
            target: DecorationTarget::Accessor,
            meta
        }
    }

    /// Decoration for the backing storage.
    pub fn storage(meta: Meta) -> Self {
        Self {
            target: DecorationTarget::Storage,
            meta
        }
    }

    /// Referenced decoration path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.meta.path()
    }
}

/// One member declaration.
#[derive(Debug, Clone)]
pub struct MemberDecl {
    /// Member identifier (backing name for fields, exposed name for
    /// properties).
    pub ident: Ident,

    /// Declared storage type.
    pub ty: Type,

    /// Declaration surface.
    pub surface: Surface,

    /// Converter reference, if any.
    pub converter: Option<Path>,

    /// Per-field write policy override.
    pub policy: Option<WritePolicy>,

    /// Decorations to forward onto generated code.
    pub decorations: Vec<Decoration>,

    /// Host-native attributes that stay where the user wrote them.
    ///
    /// For a field they remain on the storage; for a property they follow
    /// the read accessor.
    pub attrs: Vec<Attribute>
}

impl MemberDecl {
    fn with_surface(ident: Ident, ty: Type, surface: Surface) -> Self {
        Self {
            ident,
            ty,
            surface,
            converter: None,
            policy: None,
            decorations: Vec::new(),
            attrs: Vec::new()
        }
    }

    /// Declare a backing field.
    pub fn field(ident: Ident, vis: Visibility, ty: Type) -> Self {
        Self::with_surface(ident, ty, Surface::Field {
            vis
        })
    }

    /// Declare an exposed property without a setter.
    pub fn property(ident: Ident, vis: Visibility, ty: Type) -> Self {
        Self::with_surface(ident, ty, Surface::Property {
            vis,
            setter: None
        })
    }

    /// Attach a converter reference.
    #[must_use]
    pub fn with_converter(mut self, converter: Path) -> Self {
        self.converter = Some(converter);
        self
    }

    /// Attach a write policy override.
    #[must_use]
    pub fn with_policy(mut self, policy: WritePolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Declare a setter visibility. Has no effect on field surfaces.
    #[must_use]
    pub fn with_setter(mut self, vis: Visibility) -> Self {
        if let Surface::Property {
            setter, ..
        } = &mut self.surface
        {
            *setter = Some(vis);
        }
        self
    }

    /// Attach a decoration.
    #[must_use]
    pub fn with_decoration(mut self, decoration: Decoration) -> Self {
        self.decorations.push(decoration);
        self
    }

    /// Attach a host-native attribute.
    #[must_use]
    pub fn with_attr(mut self, attr: Attribute) -> Self {
        self.attrs.push(attr);
        self
    }
}
