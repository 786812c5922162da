// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Normalized schema model.
//!
//! A [`DataType`] is what the compiler works on after classification and
//! inheritance resolution: one flat, base-first list of [`FieldPlan`]s,
//! regardless of whether each member started life as a field or a property.
//!
//! ```text
//! DataType
//! ├── ident, generics, base, mode
//! ├── state: Pending → Validated
//! └── plans: Vec<FieldPlan>           (inherited first, then own)
//!     └── FieldPlan
//!         ├── backing / accessor names
//!         ├── ty                        (storage type)
//!         ├── kind: Scalar | ConvertedScalar | CollectionView
//!         ├── surface                   (field or property)
//!         ├── writable                  (effective, computed once)
//!         ├── origin                    (declaring type)
//!         └── status: Valid | Invalid
//! ```

use darling::FromMeta;
use syn::{Attribute, Generics, Ident, Path, Type, Visibility};

use crate::{
    decl::{BaseRef, Surface},
    naming::AccessorName,
    resolver::{DecorationRole, Resolution}
};

/// Per-type mutability mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mutability {
    /// No write accessors, storage must be private.
    #[default]
    Immutable,
    /// Write accessors allowed, subject to field policy.
    Mutable
}

impl Mutability {
    /// Check if the mode is [`Mutability::Mutable`].
    #[must_use]
    pub const fn is_mutable(self) -> bool {
        matches!(self, Self::Mutable)
    }
}

/// Per-field write policy override.
///
/// Only legal on mutable types. Fields without an override are
/// [`WritePolicy::ReadWrite`] on mutable types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePolicy {
    /// Getter only.
    ReadOnly,
    /// Getter and setter.
    #[default]
    ReadWrite
}

impl FromMeta for WritePolicy {
    /// Parse from `"read_only"` / `"read_write"` (case-insensitive, `-`
    /// accepted in place of `_`).
    fn from_string(value: &str) -> darling::Result<Self> {
        match value.to_lowercase().replace('-', "_").as_str() {
            "read_only" | "readonly" => Ok(Self::ReadOnly),
            "read_write" | "readwrite" => Ok(Self::ReadWrite),
            _ => Err(darling::Error::unknown_value(value))
        }
    }
}

/// Storage shape of a collection field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionShape {
    /// `Vec<T>`, `[T; N]`, `Box<[T]>`.
    Sequence,
    /// `VecDeque<T>`, `LinkedList<T>`.
    Linear,
    /// `HashSet<T>`, `BTreeSet<T>`.
    Set,
    /// `HashMap<K, V>`, `BTreeMap<K, V>`. Never exposed as a view.
    Keyed
}

impl CollectionShape {
    /// Check if the shape can be exposed through a read-only view.
    #[must_use]
    pub const fn is_viewable(self) -> bool {
        !matches!(self, Self::Keyed)
    }
}

/// Accessor kind decided by the classifier.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Getter returns a reference to the stored value.
    Scalar,

    /// Getter returns the converter applied to the stored value.
    ConvertedScalar {
        /// Converter type.
        converter: Path
    },

    /// Getter returns a read-only view over the stored collection.
    CollectionView {
        /// Element type exposed by the view.
        element: Type,
        /// Storage shape.
        shape:   CollectionShape
    }
}

impl FieldKind {
    /// Short name used in logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::ConvertedScalar { .. } => "converted",
            Self::CollectionView { .. } => "view"
        }
    }
}

/// A decoration reference that did not resolve.
#[derive(Debug, Clone)]
pub struct Unresolved {
    /// Referenced path as written.
    pub path: Path,

    /// What the reference was supposed to be.
    pub role: DecorationRole,

    /// Resolver verdict.
    pub resolution: Resolution
}

/// Validity of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlanStatus {
    /// Accessors are synthesized.
    #[default]
    Valid,
    /// Flagged by classification or a rule; no accessor is synthesized.
    Invalid
}

/// One generated-accessor unit.
#[derive(Debug, Clone)]
pub struct FieldPlan {
    /// Backing storage identifier.
    pub backing: Ident,

    /// Exposed and method names.
    pub accessor: AccessorName,

    /// Storage type (after generic substitution for inherited plans).
    pub ty: Type,

    /// Accessor kind.
    pub kind: FieldKind,

    /// Declaration surface.
    pub surface: Surface,

    /// Declared policy override, kept for validation.
    pub policy: Option<WritePolicy>,

    /// Whether a setter is synthesized.
    pub writable: bool,

    /// Attributes for the backing storage.
    pub storage_attrs: Vec<Attribute>,

    /// Attributes for the read accessor.
    pub accessor_attrs: Vec<Attribute>,

    /// Decorations that failed to resolve during classification.
    pub unresolved: Vec<Unresolved>,

    /// Type that declared this plan.
    pub origin: Ident,

    /// Validity.
    pub status: PlanStatus
}

impl FieldPlan {
    /// Check if the plan is valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.status == PlanStatus::Valid
    }

    /// Mark the plan invalid.
    pub fn invalidate(&mut self) {
        self.status = PlanStatus::Invalid;
    }

    /// Check if the plan was inherited by `owner`.
    #[must_use]
    pub fn is_inherited_by(&self, owner: &Ident) -> bool {
        &self.origin != owner
    }

    /// Visibility of the read accessor.
    #[must_use]
    pub fn getter_vis(&self) -> Visibility {
        match &self.surface {
            Surface::Field { .. } => syn::parse_quote!(pub),
            Surface::Property {
                vis, ..
            } => vis.clone()
        }
    }

    /// Visibility of the write accessor.
    #[must_use]
    pub fn setter_vis(&self) -> Visibility {
        match &self.surface {
            Surface::Field { .. } => syn::parse_quote!(pub),
            Surface::Property {
                vis,
                setter
            } => setter.clone().unwrap_or_else(|| vis.clone())
        }
    }
}

/// Validation lifecycle of a data type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationState {
    /// Classified and resolved, rules not yet run.
    #[default]
    Pending,
    /// Rule engine finished; the model is frozen.
    Validated
}

/// Fully resolved data type.
#[derive(Debug, Clone)]
pub struct DataType {
    /// Type identifier.
    pub ident: Ident,

    /// Generic parameters.
    pub generics: Generics,

    /// Base reference as declared.
    pub base: Option<BaseRef>,

    /// Mutability mode.
    pub mode: Mutability,

    /// Merged plans, inherited first.
    pub plans: Vec<FieldPlan>,

    /// Validation state.
    pub state: ValidationState
}

impl DataType {
    /// Plans declared directly on this type.
    pub fn own_plans(&self) -> impl Iterator<Item = &FieldPlan> {
        self.plans
            .iter()
            .filter(|plan| !plan.is_inherited_by(&self.ident))
    }

    /// Plans inherited from the base chain.
    pub fn inherited_plans(&self) -> impl Iterator<Item = &FieldPlan> {
        self.plans
            .iter()
            .filter(|plan| plan.is_inherited_by(&self.ident))
    }

    /// Plans that survived validation.
    pub fn valid_plans(&self) -> impl Iterator<Item = &FieldPlan> {
        self.plans.iter().filter(|plan| plan.is_valid())
    }

    /// Find a plan by exposed accessor name.
    #[must_use]
    pub fn plan(&self, accessor: &str) -> Option<&FieldPlan> {
        self.plans
            .iter()
            .find(|plan| plan.accessor.exposed == accessor)
    }

    /// Exposed accessor names of the merged plan set, in order.
    #[must_use]
    pub fn accessor_names(&self) -> Vec<&str> {
        self.plans
            .iter()
            .map(|plan| plan.accessor.exposed.as_str())
            .collect()
    }

    /// Check if the rule engine has run.
    #[must_use]
    pub fn is_validated(&self) -> bool {
        self.state == ValidationState::Validated
    }
}
