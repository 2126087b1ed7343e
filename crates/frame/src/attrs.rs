use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Margin-label metadata carried alongside a frame or series.
///
/// Maps a transform category (`"totals"`, `"percentages"`, `"differences"`)
/// to the labels that category has introduced, so later transforms in a chain
/// can exclude margin rows/columns without the caller repeating ignore keys.
/// Propagated copy-then-merge; never shared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Attrs {
    labels: BTreeMap<String, BTreeSet<String>>,
}

impl Attrs {
    #[must_use]
    pub fn new() -> Self {
        Attrs::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.values().all(BTreeSet::is_empty)
    }

    /// Labels tracked under one category.
    pub fn tracked(&self, category: &str) -> impl Iterator<Item = &String> {
        self.labels.get(category).into_iter().flatten()
    }

    /// All tracked labels, across categories.
    pub fn all_tracked(&self) -> impl Iterator<Item = &String> {
        self.labels.values().flatten()
    }

    /// Union labels into a category, creating the slot if needed.
    pub fn track<I, S>(&mut self, category: &str, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let slot = self.labels.entry(category.to_string()).or_default();
        slot.extend(labels.into_iter().map(Into::into));
    }

    /// Union-merge another metadata value into this one.
    pub fn merge(&mut self, other: &Attrs) {
        for (category, labels) in &other.labels {
            let slot = self.labels.entry(category.clone()).or_default();
            slot.extend(labels.iter().cloned());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_and_merge() {
        let mut attrs = Attrs::new();
        attrs.track("totals", ["Totals"]);
        attrs.track("totals", ["Subtotals"]);

        let mut other = Attrs::new();
        other.track("percentages", ["pct"]);
        other.track("totals", ["Totals"]);

        attrs.merge(&other);

        let totals: Vec<&String> = attrs.tracked("totals").collect();
        assert_eq!(totals, ["Subtotals", "Totals"]);
        let pct: Vec<&String> = attrs.tracked("percentages").collect();
        assert_eq!(pct, ["pct"]);
    }

    #[test]
    fn test_missing_category_is_empty() {
        let attrs = Attrs::new();
        assert_eq!(attrs.tracked("differences").count(), 0);
        assert!(attrs.is_empty());
    }
}
