// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! # data-derive
//!
//! One crate, all features. Re-exports:
//! - [`data_schema`] attribute macro from `data-derive-impl`
//! - All types from `data-core` ([`Data`], [`Converter`], [`ReadView`],
//!   [`ViewSource`])
//!
//! # Quick Start
//!
//! ```rust
//! use data_derive::{Data, data_schema};
//!
//! #[data_schema(crate = "::data_derive")]
//! mod game {
//!     #[derive(Default)]
//!     pub struct Percent;
//!
//!     impl data_derive::Converter<f32> for Percent {
//!         type Output = u8;
//!
//!         fn convert(&self, raw: &f32) -> u8 {
//!             (raw * 100.0).round() as u8
//!         }
//!     }
//!
//!     #[data]
//!     pub struct Stat {
//!         #[data(converter = Percent)]
//!         _crit: f32,
//!         _tags: Vec<String>
//!     }
//!
//!     impl Stat {
//!         pub fn new(crit: f32, tags: Vec<String>) -> Self {
//!             Self { _crit: crit, _tags: tags }
//!         }
//!     }
//! }
//!
//! let stat = game::Stat::new(0.25, vec!["fire".into()]);
//! assert_eq!(stat.crit(), 25);
//! assert_eq!(stat.tags().len(), 1);
//! assert_eq!(<game::Stat as Data>::ACCESSORS, &["Crit", "Tags"]);
//! ```

pub use data_core::*;
pub use data_derive_impl::data_schema;
