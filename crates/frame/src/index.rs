use crate::error::{FrameError, Result};
use crate::label::Label;
use indexmap::IndexMap;
use serde::Serialize;

/// A full key-tuple, one label per index level.
pub type Key = Vec<Label>;

/// An ordered axis index, flat (one level) or hierarchical (multiple named
/// levels).
///
/// Every key carries exactly one label per level and full key-tuples are
/// unique, so positional and by-key lookup never disagree. Insertion order is
/// the display order; nothing here ever sorts.
#[derive(Debug, Clone, Serialize)]
pub struct Index {
    names: Vec<Option<String>>,
    keys: Vec<Key>,
    #[serde(skip)]
    lookup: IndexMap<Key, usize>,
}

impl Index {
    /// Create a flat (single-level, unnamed) index from labels.
    pub fn from_labels<L: Into<Label>>(labels: impl IntoIterator<Item = L>) -> Result<Self> {
        let keys = labels.into_iter().map(|l| vec![l.into()]).collect();
        Self::from_keys(vec![None], keys)
    }

    /// Create an index from full key-tuples with per-level names.
    pub fn from_keys(names: Vec<Option<String>>, keys: Vec<Key>) -> Result<Self> {
        let nlevels = names.len();
        let mut lookup = IndexMap::with_capacity(keys.len());
        for (pos, key) in keys.iter().enumerate() {
            if key.len() != nlevels {
                return Err(FrameError::KeyLevelMismatch {
                    nlevels,
                    key_levels: key.len(),
                });
            }
            if lookup.insert(key.clone(), pos).is_some() {
                return Err(FrameError::DuplicateKey { key: key.clone() });
            }
        }
        Ok(Index {
            names,
            keys,
            lookup,
        })
    }

    /// Create a hierarchical index from tuples of labels.
    pub fn from_tuples<K, L>(names: Vec<Option<String>>, tuples: Vec<K>) -> Result<Self>
    where
        K: IntoIterator<Item = L>,
        L: Into<Label>,
    {
        let keys = tuples
            .into_iter()
            .map(|t| t.into_iter().map(Into::into).collect())
            .collect();
        Self::from_keys(names, keys)
    }

    /// Set the name of a level, returning the index.
    #[must_use]
    pub fn with_name(mut self, level: usize, name: &str) -> Self {
        if level < self.names.len() {
            self.names[level] = Some(name.to_string());
        }
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Number of levels; `1` means a flat index.
    #[must_use]
    pub fn nlevels(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_hierarchical(&self) -> bool {
        self.nlevels() > 1
    }

    #[must_use]
    pub fn names(&self) -> &[Option<String>] {
        &self.names
    }

    #[must_use]
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    #[must_use]
    pub fn key(&self, pos: usize) -> &Key {
        &self.keys[pos]
    }

    /// Position of a full key-tuple, if present.
    #[must_use]
    pub fn position(&self, key: &Key) -> Option<usize> {
        self.lookup.get(key).copied()
    }

    #[must_use]
    pub fn contains(&self, key: &Key) -> bool {
        self.lookup.contains_key(key)
    }

    /// Resolve a level selector by position or by name.
    pub fn level(&self, name: &str) -> Result<usize> {
        self.names
            .iter()
            .position(|n| n.as_deref() == Some(name))
            .ok_or_else(|| FrameError::LevelNotFound {
                name: name.to_string(),
            })
    }

    /// Positions of all entries where any level equals `label`.
    ///
    /// For a flat index this is plain key lookup; for a hierarchical index a
    /// match at any level counts, so a totals label stays findable after an
    /// outer level has been added around it.
    #[must_use]
    pub fn positions_of_label(&self, label: &Label) -> Vec<usize> {
        self.keys
            .iter()
            .enumerate()
            .filter(|(_, key)| key.iter().any(|l| l == label))
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Subset of the index at the given positions, preserving order.
    #[must_use]
    pub fn select(&self, positions: &[usize]) -> Self {
        let keys: Vec<Key> = positions.iter().map(|&p| self.keys[p].clone()).collect();
        let mut lookup = IndexMap::with_capacity(keys.len());
        for (pos, key) in keys.iter().enumerate() {
            lookup.insert(key.clone(), pos);
        }
        Index {
            names: self.names.clone(),
            keys,
            lookup,
        }
    }

    /// Append a key at the end.
    pub fn push(&mut self, key: Key) -> Result<()> {
        self.insert(self.keys.len(), key)
    }

    /// Insert a key at a position, shifting later entries.
    pub fn insert(&mut self, pos: usize, key: Key) -> Result<()> {
        if key.len() != self.nlevels() {
            return Err(FrameError::KeyLevelMismatch {
                nlevels: self.nlevels(),
                key_levels: key.len(),
            });
        }
        if self.contains(&key) {
            return Err(FrameError::DuplicateKey { key });
        }
        self.keys.insert(pos, key);
        self.rebuild_lookup();
        Ok(())
    }

    /// Concatenate another index of the same shape after this one.
    pub fn concat(&self, other: &Index) -> Result<Self> {
        if other.nlevels() != self.nlevels() {
            return Err(FrameError::KeyLevelMismatch {
                nlevels: self.nlevels(),
                key_levels: other.nlevels(),
            });
        }
        let mut keys = self.keys.clone();
        keys.extend(other.keys.iter().cloned());
        Self::from_keys(self.names.clone(), keys)
    }

    /// New index with an extra outermost level holding a constant label.
    #[must_use]
    pub fn prepend_level(&self, label: &Label, name: Option<String>) -> Self {
        let mut names = vec![name];
        names.extend(self.names.iter().cloned());
        let keys: Vec<Key> = self
            .keys
            .iter()
            .map(|key| {
                let mut new_key = Vec::with_capacity(key.len() + 1);
                new_key.push(label.clone());
                new_key.extend(key.iter().cloned());
                new_key
            })
            .collect();
        let mut lookup = IndexMap::with_capacity(keys.len());
        for (pos, key) in keys.iter().enumerate() {
            lookup.insert(key.clone(), pos);
        }
        Index {
            names,
            keys,
            lookup,
        }
    }

    /// New index with every occurrence of `from` at `level` replaced by `to`.
    pub fn rename_level_value(&self, level: usize, from: &Label, to: &Label) -> Result<Self> {
        if level >= self.nlevels() {
            return Err(FrameError::LevelOutOfBounds {
                level,
                nlevels: self.nlevels(),
            });
        }
        let keys = self
            .keys
            .iter()
            .map(|key| {
                let mut key = key.clone();
                if &key[level] == from {
                    key[level] = to.clone();
                }
                key
            })
            .collect();
        Self::from_keys(self.names.clone(), keys)
    }

    /// New index with levels rearranged into `order`.
    pub fn reorder_levels(&self, order: &[usize]) -> Result<Self> {
        for &level in order {
            if level >= self.nlevels() {
                return Err(FrameError::LevelOutOfBounds {
                    level,
                    nlevels: self.nlevels(),
                });
            }
        }
        let names = order.iter().map(|&l| self.names[l].clone()).collect();
        let keys = self
            .keys
            .iter()
            .map(|key| order.iter().map(|&l| key[l].clone()).collect())
            .collect();
        Self::from_keys(names, keys)
    }

    /// Group positions by their key prefix through `depth` (levels
    /// `0..=depth`), in first-seen order.
    ///
    /// Entries sharing a prefix group together even when they are not
    /// contiguous, matching unsorted hierarchical grouping.
    #[must_use]
    pub fn group_by_prefix(&self, depth: usize) -> Vec<(Key, Vec<usize>)> {
        let mut groups: IndexMap<Key, Vec<usize>> = IndexMap::new();
        for (pos, key) in self.keys.iter().enumerate() {
            let prefix: Key = key[..=depth.min(key.len() - 1)].to_vec();
            groups.entry(prefix).or_default().push(pos);
        }
        groups.into_iter().collect()
    }

    fn rebuild_lookup(&mut self) {
        self.lookup.clear();
        for (pos, key) in self.keys.iter().enumerate() {
            self.lookup.insert(key.clone(), pos);
        }
    }
}

impl PartialEq for Index {
    fn eq(&self, other: &Self) -> bool {
        self.names == other.names && self.keys == other.keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region_index() -> Index {
        Index::from_tuples(
            vec![Some("region".to_string()), Some("city".to_string())],
            vec![
                vec!["North", "Amsterdam"],
                vec!["North", "Groningen"],
                vec!["South", "Eindhoven"],
                vec!["North", "Zwolle"],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_flat_index_lookup() {
        let index = Index::from_labels(["A", "B", "C"]).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.nlevels(), 1);
        assert_eq!(index.position(&vec!["B".into()]), Some(1));
        assert_eq!(index.position(&vec!["Z".into()]), None);
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let result = Index::from_labels(["A", "B", "A"]);
        assert!(matches!(result, Err(FrameError::DuplicateKey { .. })));
    }

    #[test]
    fn test_key_level_mismatch() {
        let result = Index::from_keys(
            vec![None, None],
            vec![vec!["A".into(), "x".into()], vec!["B".into()]],
        );
        assert!(matches!(result, Err(FrameError::KeyLevelMismatch { .. })));
    }

    #[test]
    fn test_positions_of_label_any_level() {
        let index = region_index();
        assert_eq!(index.positions_of_label(&"North".into()), vec![0, 1, 3]);
        assert_eq!(index.positions_of_label(&"Eindhoven".into()), vec![2]);
        assert!(index.positions_of_label(&"East".into()).is_empty());
    }

    #[test]
    fn test_group_by_prefix_first_seen_order() {
        let index = region_index();
        let groups = index.group_by_prefix(0);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, vec![Label::from("North")]);
        assert_eq!(groups[0].1, vec![0, 1, 3]);
        assert_eq!(groups[1].1, vec![2]);
    }

    #[test]
    fn test_insert_and_conflict() {
        let mut index = Index::from_labels(["A", "B"]).unwrap();
        index.insert(1, vec!["Totals".into()]).unwrap();
        assert_eq!(index.position(&vec!["Totals".into()]), Some(1));
        assert_eq!(index.position(&vec!["B".into()]), Some(2));

        let result = index.push(vec!["Totals".into()]);
        assert!(matches!(result, Err(FrameError::DuplicateKey { .. })));
    }

    #[test]
    fn test_prepend_level() {
        let index = Index::from_labels(["A", "B"]).unwrap();
        let nested = index.prepend_level(&"n".into(), None);
        assert_eq!(nested.nlevels(), 2);
        assert_eq!(nested.key(0), &vec![Label::from("n"), Label::from("A")]);
    }

    #[test]
    fn test_reorder_levels() {
        let index = region_index().reorder_levels(&[1, 0]).unwrap();
        assert_eq!(index.names()[0].as_deref(), Some("city"));
        assert_eq!(
            index.key(0),
            &vec![Label::from("Amsterdam"), Label::from("North")]
        );
    }

    #[test]
    fn test_level_by_name() {
        let index = region_index();
        assert_eq!(index.level("city").unwrap(), 1);
        assert!(matches!(
            index.level("country"),
            Err(FrameError::LevelNotFound { .. })
        ));
    }
}
