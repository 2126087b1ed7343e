use crosstab_frame::{Index, Label};

/// Build a mask separating data entries from margin entries.
///
/// One entry per index position, `true` meaning "real data, keep it". An
/// entry is a margin when any of its levels matches an ignore key: exact
/// match for any label, prefix match for text labels. The prefix rule is what
/// lets `"Subtotals Region_A"` be excluded by listing `"Subtotals"` — and it
/// deliberately also catches `"SubtotalsX"`; callers relying on chained
/// transforms expect that over-match.
#[must_use]
pub fn data_mask(index: &Index, ignore_keys: &[Label]) -> Vec<bool> {
    if ignore_keys.is_empty() {
        return vec![true; index.len()];
    }
    index
        .keys()
        .iter()
        .map(|key| key.iter().all(|level| should_keep(level, ignore_keys)))
        .collect()
}

/// Positions of the entries the mask keeps.
#[must_use]
pub fn kept_positions(mask: &[bool]) -> Vec<usize> {
    mask.iter()
        .enumerate()
        .filter(|(_, &keep)| keep)
        .map(|(pos, _)| pos)
        .collect()
}

fn should_keep(value: &Label, ignore_keys: &[Label]) -> bool {
    if ignore_keys.contains(value) {
        return false;
    }
    if let Some(text) = value.as_text() {
        for key in ignore_keys {
            if let Some(prefix) = key.as_text() {
                if text.starts_with(prefix) {
                    return false;
                }
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crosstab_frame::Index;

    #[test]
    fn test_empty_ignore_keeps_all() {
        let index = Index::from_labels(["A", "Totals"]).unwrap();
        assert_eq!(data_mask(&index, &[]), vec![true, true]);
    }

    #[test]
    fn test_exact_match_flat() {
        let index = Index::from_labels(["A", "B", "Totals"]).unwrap();
        let mask = data_mask(&index, &["Totals".into()]);
        assert_eq!(mask, vec![true, true, false]);
        assert_eq!(kept_positions(&mask), vec![0, 1]);
    }

    #[test]
    fn test_unknown_key_is_noop() {
        let index = Index::from_labels(["A", "B"]).unwrap();
        assert_eq!(data_mask(&index, &["Totals".into()]), vec![true, true]);
    }

    #[test]
    fn test_prefix_match() {
        let index =
            Index::from_labels(["A", "Subtotals Region_A", "SubtotalsX", "Subway"]).unwrap();
        let mask = data_mask(&index, &["Subtotals".into()]);
        // "SubtotalsX" is excluded too: literal prefix rule.
        assert_eq!(mask, vec![true, false, false, true]);
    }

    #[test]
    fn test_case_sensitive() {
        let index = Index::from_labels(["totals", "Totals"]).unwrap();
        let mask = data_mask(&index, &["Totals".into()]);
        assert_eq!(mask, vec![true, false]);
    }

    #[test]
    fn test_any_level_match_on_hierarchical() {
        let index = Index::from_tuples(
            vec![None, None],
            vec![
                vec!["North", "Amsterdam"],
                vec!["North", "Subtotals North"],
                vec!["Totals", ""],
            ],
        )
        .unwrap();
        let mask = data_mask(&index, &["Totals".into(), "Subtotals".into()]);
        assert_eq!(mask, vec![true, false, false]);
    }

    #[test]
    fn test_integer_labels_exact_only() {
        let index = Index::from_labels([2023, 2024]).unwrap();
        let mask = data_mask(&index, &[2024.into()]);
        assert_eq!(mask, vec![true, false]);
        // A text ignore key never prefix-matches an integer label.
        let mask = data_mask(&index, &["20".into()]);
        assert_eq!(mask, vec![true, true]);
    }
}
