use std::{collections::BTreeSet, rc::Rc};

use itertools::Itertools;

use crate::errors::{ReflectanceError, Result};

/// Band selection. Either the listed band indexes are kept,
/// or (`drop == true`) every band except the listed ones.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Indexes {
    selection: Rc<[usize]>,
    drop: bool,
}

impl<const N: usize> From<([usize; N], bool)> for Indexes {
    fn from(value: ([usize; N], bool)) -> Self {
        let selection = Rc::from(value.0);
        let drop = value.1;
        Indexes { selection, drop }
    }
}

impl From<(std::ops::Range<usize>, bool)> for Indexes {
    fn from(value: (std::ops::Range<usize>, bool)) -> Self {
        let selection = value.0.collect();
        let drop = value.1;
        Indexes { selection, drop }
    }
}

impl<const N: usize> From<[usize; N]> for Indexes {
    fn from(value: [usize; N]) -> Self {
        Indexes {
            selection: Rc::from(value),
            drop: false,
        }
    }
}

impl From<std::ops::Range<usize>> for Indexes {
    fn from(value: std::ops::Range<usize>) -> Self {
        Indexes {
            selection: value.collect(),
            drop: false,
        }
    }
}

impl From<Vec<usize>> for Indexes {
    fn from(value: Vec<usize>) -> Self {
        Indexes {
            selection: Rc::from(value),
            drop: false,
        }
    }
}

impl Default for Indexes {
    fn default() -> Self {
        Self::all()
    }
}

impl Indexes {
    pub fn all() -> Self {
        Self {
            selection: Rc::from([]),
            drop: true,
        }
    }

    pub fn is_all(&self) -> bool {
        self.drop && self.selection.is_empty()
    }

    /// Resolves the selection against a collection of `collection_len` items.
    /// Kept indexes come back in the order given, dropped ones leave
    /// the remaining indexes sorted.
    pub fn indexes_from(&self, collection_len: usize) -> Result<Rc<[usize]>> {
        if let Some(&index) = self.selection.iter().find(|idx| **idx >= collection_len) {
            return Err(ReflectanceError::IndexOutOfRange {
                index,
                len: collection_len,
            });
        }
        if self.drop {
            let drop_idxs: BTreeSet<usize> = self.selection.iter().copied().collect();
            Ok((0..collection_len)
                .filter(|idx| !drop_idxs.contains(idx))
                .collect())
        } else {
            Ok(Rc::clone(&self.selection))
        }
    }

    pub fn select_from<T: Clone>(&self, collection: &[T]) -> Result<Vec<T>> {
        Ok(self
            .indexes_from(collection.len())?
            .iter()
            .map(|idx| collection[*idx].clone())
            .collect())
    }

    /// Indexes of `collection` items matching `predicate`, sorted.
    pub fn matching<T>(collection: &[T], predicate: impl Fn(&T) -> bool) -> Self {
        collection
            .iter()
            .positions(predicate)
            .collect_vec()
            .into()
    }
}
