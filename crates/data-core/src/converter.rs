// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Value converters.

/// Pure transform from a stored representation to an exposed one.
///
/// Generated getters construct the converter with [`Default`] on every call,
/// so implementations should be zero-sized or cheap to build and must not
/// rely on side effects.
///
/// # Example
///
/// ```rust
/// use data_core::Converter;
///
/// #[derive(Debug, PartialEq)]
/// struct FloatWrapper(f32);
///
/// #[derive(Default)]
/// struct FloatWrapperConverter;
///
/// impl Converter<f32> for FloatWrapperConverter {
///     type Output = FloatWrapper;
///
///     fn convert(&self, raw: &f32) -> FloatWrapper {
///         FloatWrapper(*raw)
///     }
/// }
///
/// assert_eq!(FloatWrapperConverter.convert(&2.5), FloatWrapper(2.5));
/// ```
pub trait Converter<Raw: ?Sized> {
    /// Exposed representation.
    type Output;

    /// Convert the stored value.
    fn convert(&self, raw: &Raw) -> Self::Output;
}
