// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Read-only collection views.
//!
//! Generated getters for collection fields return a [`ReadView`] instead of
//! the backing collection. The view borrows the storage, never copies it, and
//! offers no way to replace, resize or mutate it.
//!
//! # Supported Storage
//!
//! | Shape | Types |
//! |-------|-------|
//! | Sequence | `Vec<T>`, `[T; N]`, `Box<[T]>` |
//! | Linear | `VecDeque<T>`, `LinkedList<T>` |
//! | Set | `HashSet<T, S>`, `BTreeSet<T>` |
//!
//! Contiguous storage is viewed as a slice. Other shapes are walked through
//! their own iterators; indexing them is linear in the index.

use std::{
    collections::{BTreeSet, HashSet, LinkedList, VecDeque},
    fmt,
    ops::Index,
    slice
};

/// Collection that a [`ReadView`] can borrow.
///
/// Implemented for the standard sequence, linear and set collections.
/// Implement it for custom storage to make it viewable from generated
/// accessors.
pub trait ViewSource<T> {
    /// Number of elements.
    fn source_len(&self) -> usize;

    /// Element at `index` in iteration order.
    fn source_get(&self, index: usize) -> Option<&T>;

    /// Iterate elements in the collection's own order.
    fn source_iter(&self) -> Box<dyn Iterator<Item = &T> + '_>;

    /// Contiguous elements, if the storage has them.
    fn source_slice(&self) -> Option<&[T]> {
        None
    }
}

macro_rules! slice_source {
    ($($ty:ty => [$($gen:tt)*]),* $(,)?) => {
        $(
            impl<$($gen)*> ViewSource<T> for $ty {
                fn source_len(&self) -> usize {
                    <[T]>::len(self)
                }

                fn source_get(&self, index: usize) -> Option<&T> {
                    <[T]>::get(self, index)
                }

                fn source_iter(&self) -> Box<dyn Iterator<Item = &T> + '_> {
                    Box::new(<[T]>::iter(self))
                }

                fn source_slice(&self) -> Option<&[T]> {
                    Some(&self[..])
                }
            }
        )*
    };
}

slice_source! {
    Vec<T> => [T],
    Box<[T]> => [T],
    [T; N] => [T, const N: usize],
}

impl<T> ViewSource<T> for VecDeque<T> {
    fn source_len(&self) -> usize {
        self.len()
    }

    fn source_get(&self, index: usize) -> Option<&T> {
        self.get(index)
    }

    fn source_iter(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.iter())
    }

    fn source_slice(&self) -> Option<&[T]> {
        match self.as_slices() {
            (front, []) => Some(front),
            _ => None
        }
    }
}

macro_rules! walked_source {
    ($($ty:ty => [$($gen:tt)*]),* $(,)?) => {
        $(
            impl<$($gen)*> ViewSource<T> for $ty {
                fn source_len(&self) -> usize {
                    self.len()
                }

                fn source_get(&self, index: usize) -> Option<&T> {
                    self.iter().nth(index)
                }

                fn source_iter(&self) -> Box<dyn Iterator<Item = &T> + '_> {
                    Box::new(self.iter())
                }
            }
        )*
    };
}

walked_source! {
    LinkedList<T> => [T],
    HashSet<T, S> => [T, S],
    BTreeSet<T> => [T],
}

enum Repr<'a, T> {
    Slice(&'a [T]),
    Source(&'a dyn ViewSource<T>)
}

/// Non-owning, read-only view over a backing collection.
///
/// # Example
///
/// ```rust
/// use std::collections::VecDeque;
///
/// use data_core::ReadView;
///
/// let queue: VecDeque<u32> = [1, 2, 3].into_iter().collect();
/// let view = ReadView::new(&queue);
///
/// assert_eq!(view.len(), 3);
/// assert_eq!(view.first(), Some(&1));
/// assert_eq!(view, [1, 2, 3]);
/// ```
pub struct ReadView<'a, T> {
    repr: Repr<'a, T>
}

impl<'a, T> ReadView<'a, T> {
    /// Borrow a collection as a view.
    ///
    /// Contiguous storage is captured as a slice up front.
    pub fn new<S>(source: &'a S) -> Self
    where
        S: ViewSource<T> + 'a
    {
        let repr = match source.source_slice() {
            Some(slice) => Repr::Slice(slice),
            None => Repr::Source(source)
        };
        Self {
            repr
        }
    }

    /// View a slice.
    pub const fn from_slice(slice: &'a [T]) -> Self {
        Self {
            repr: Repr::Slice(slice)
        }
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        match self.repr {
            Repr::Slice(slice) => slice.len(),
            Repr::Source(source) => source.source_len()
        }
    }

    /// Check if the view has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&'a T> {
        match self.repr {
            Repr::Slice(slice) => slice.get(index),
            Repr::Source(source) => source.source_get(index)
        }
    }

    /// First element.
    #[must_use]
    pub fn first(&self) -> Option<&'a T> {
        self.get(0)
    }

    /// Last element.
    #[must_use]
    pub fn last(&self) -> Option<&'a T> {
        match self.repr {
            Repr::Slice(slice) => slice.last(),
            Repr::Source(source) => source
                .source_len()
                .checked_sub(1)
                .and_then(|index| source.source_get(index))
        }
    }

    /// Contiguous elements, when the backing storage is contiguous.
    #[must_use]
    pub fn as_slice(&self) -> Option<&'a [T]> {
        match self.repr {
            Repr::Slice(slice) => Some(slice),
            Repr::Source(_) => None
        }
    }

    /// Iterate elements in the backing collection's order.
    pub fn iter(&self) -> Iter<'a, T> {
        let repr = match self.repr {
            Repr::Slice(slice) => IterRepr::Slice(slice.iter()),
            Repr::Source(source) => IterRepr::Walk {
                inner:     source.source_iter(),
                remaining: source.source_len()
            }
        };
        Iter {
            repr
        }
    }

    /// Copy the elements into an owned vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone
    {
        self.iter().cloned().collect()
    }
}

impl<T> Clone for ReadView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ReadView<'_, T> {}

impl<T> Clone for Repr<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Repr<'_, T> {}

impl<'a, T> From<&'a [T]> for ReadView<'a, T> {
    fn from(slice: &'a [T]) -> Self {
        Self::from_slice(slice)
    }
}

impl<T> Index<usize> for ReadView<'_, T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(item) => item,
            None => panic!(
                "index out of bounds: the len is {} but the index is {}",
                self.len(),
                index
            )
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ReadView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for ReadView<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for ReadView<'_, T> {}

impl<T: PartialEq> PartialEq<[T]> for ReadView<'_, T> {
    fn eq(&self, other: &[T]) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for ReadView<'_, T> {
    fn eq(&self, other: &[T; N]) -> bool {
        *self == other[..]
    }
}

impl<T: PartialEq> PartialEq<Vec<T>> for ReadView<'_, T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        *self == other[..]
    }
}

impl<'a, T> IntoIterator for ReadView<'a, T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &ReadView<'a, T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

/// Iterator over a [`ReadView`].
pub struct Iter<'a, T> {
    repr: IterRepr<'a, T>
}

enum IterRepr<'a, T> {
    Slice(slice::Iter<'a, T>),
    Walk {
        inner:     Box<dyn Iterator<Item = &'a T> + 'a>,
        remaining: usize
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        match &mut self.repr {
            IterRepr::Slice(iter) => iter.next(),
            IterRepr::Walk {
                inner,
                remaining
            } => {
                let item = inner.next()?;
                *remaining = remaining.saturating_sub(1);
                Some(item)
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.repr {
            IterRepr::Slice(iter) => iter.size_hint(),
            IterRepr::Walk {
                remaining, ..
            } => (*remaining, Some(*remaining))
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
impl<T: serde::Serialize> serde::Serialize for ReadView<'_, T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer
    {
        serializer.collect_seq(self.iter())
    }
}
