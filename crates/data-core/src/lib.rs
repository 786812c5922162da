// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Runtime support for data-derive generated accessors.
//!
//! Types declared inside a `#[data_schema]` module get accessors that plug
//! into the items defined here. The crate can also be used on its own to
//! write the same surface by hand.
//!
//! # Overview
//!
//! - [`Data`] - Implemented for every generated data type
//! - [`Converter`] - Stored value → exposed value transform
//! - [`ReadView`] - Non-owning read-only view over a backing collection
//! - [`ViewSource`] - Collections a [`ReadView`] can be built over
//! - [`prelude`] - Convenient re-exports
//!
//! # Usage
//!
//! ```rust
//! use data_core::{Converter, ReadView};
//!
//! #[derive(Default)]
//! struct Percent;
//!
//! impl Converter<f32> for Percent {
//!     type Output = u8;
//!
//!     fn convert(&self, raw: &f32) -> u8 {
//!         (raw * 100.0).round() as u8
//!     }
//! }
//!
//! let values = vec![0.25_f32, 0.5];
//! let view = ReadView::new(&values);
//! assert_eq!(Percent.convert(&view[1]), 50);
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod converter;
pub mod prelude;
mod view;

pub use converter::Converter;
pub use view::{Iter, ReadView, ViewSource};

/// Compile-time description of a generated data type.
///
/// Implemented by the `#[data_schema]` macro for every `#[data]` struct. The
/// constants mirror what the schema compiler decided, so the generated
/// surface can be inspected without reflection.
///
/// # Example
///
/// ```rust
/// use data_core::Data;
///
/// struct Hero;
///
/// impl Data for Hero {
///     const NAME: &'static str = "Hero";
///     const ACCESSORS: &'static [&'static str] = &["Multipliers"];
///     const WRITABLE: &'static [&'static str] = &[];
///     const MUTABLE: bool = false;
/// }
///
/// assert!(Hero::exposes("Multipliers"));
/// assert!(!Hero::is_writable("Multipliers"));
/// ```
pub trait Data {
    /// Declared type name.
    const NAME: &'static str;

    /// Exposed accessor names in generation order (inherited first).
    const ACCESSORS: &'static [&'static str];

    /// Accessors that also received a setter.
    const WRITABLE: &'static [&'static str];

    /// Whether the type was declared mutable.
    const MUTABLE: bool;

    /// Check if an accessor with the given exposed name was generated.
    fn exposes(accessor: &str) -> bool {
        Self::ACCESSORS.contains(&accessor)
    }

    /// Check if an accessor with the given exposed name has a setter.
    fn is_writable(accessor: &str) -> bool {
        Self::WRITABLE.contains(&accessor)
    }
}
