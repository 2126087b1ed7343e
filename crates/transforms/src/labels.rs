use crate::axis::Axis;
use crosstab_frame::{Attrs, Label};

/// Transform categories whose output labels are tracked for chaining.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Totals,
    Percentages,
    Differences,
}

impl Category {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Totals => "totals",
            Category::Percentages => "percentages",
            Category::Differences => "differences",
        }
    }

    #[must_use]
    pub fn all() -> [Category; 3] {
        [
            Category::Totals,
            Category::Percentages,
            Category::Differences,
        ]
    }
}

/// Record the labels a transform introduced on its output's metadata.
///
/// Runs after the transform; unions with whatever was already tracked there
/// (carried over from the input by copy-on-transform). Absent labels are
/// simply not passed in.
pub fn tag<'a>(attrs: &mut Attrs, category: Category, labels: impl IntoIterator<Item = &'a str>) {
    attrs.track(category.as_str(), labels.into_iter().map(ToString::to_string));
}

fn extend_tracked(keys: &mut Vec<Label>, attrs: &Attrs, category: Category) {
    for label in attrs.tracked(category.as_str()) {
        let label = Label::from(label.as_str());
        if !keys.contains(&label) {
            keys.push(label);
        }
    }
}

/// Union explicit ignore keys with the category's own tracked labels.
#[must_use]
pub fn resolve_own_ignored(attrs: &Attrs, category: Category, explicit: &[Label]) -> Vec<Label> {
    let mut keys: Vec<Label> = explicit.to_vec();
    extend_tracked(&mut keys, attrs, category);
    keys
}

/// Union explicit ignore keys with tracked margin labels.
///
/// The transform's own category is always pulled in; when the operation is
/// column-wise (axis 1, row-relative) the labels the other categories added
/// as columns are pulled in as well, so a totals column or an earlier pct
/// block never feeds back into a computation.
#[must_use]
pub fn resolve_ignored(
    attrs: &Attrs,
    category: Category,
    axis: Axis,
    explicit: &[Label],
) -> Vec<Label> {
    let mut keys = resolve_own_ignored(attrs, category, explicit);
    if axis == Axis::Columns {
        for other in Category::all() {
            if other != category {
                extend_tracked(&mut keys, attrs, other);
            }
        }
    }
    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_unions_with_existing() {
        let mut attrs = Attrs::new();
        tag(&mut attrs, Category::Totals, ["Totals"]);
        tag(&mut attrs, Category::Totals, ["Subtotals", "Totals"]);
        let tracked: Vec<&String> = attrs.tracked("totals").collect();
        assert_eq!(tracked, ["Subtotals", "Totals"]);
    }

    #[test]
    fn test_resolve_own_category_only_for_rows() {
        let mut attrs = Attrs::new();
        tag(&mut attrs, Category::Totals, ["Totals"]);
        tag(&mut attrs, Category::Percentages, ["pct"]);

        let keys = resolve_ignored(&attrs, Category::Totals, Axis::Rows, &[]);
        assert_eq!(keys, vec![Label::from("Totals")]);
    }

    #[test]
    fn test_resolve_pulls_other_categories_for_columns() {
        let mut attrs = Attrs::new();
        tag(&mut attrs, Category::Totals, ["Totals"]);
        tag(&mut attrs, Category::Percentages, ["pct"]);

        let keys = resolve_ignored(&attrs, Category::Totals, Axis::Columns, &[]);
        assert_eq!(keys, vec![Label::from("Totals"), Label::from("pct")]);
    }

    #[test]
    fn test_explicit_keys_kept_in_front_without_duplicates() {
        let mut attrs = Attrs::new();
        tag(&mut attrs, Category::Totals, ["Totals"]);

        let explicit = vec![Label::from("Totals"), Label::from("Margin")];
        let keys = resolve_ignored(&attrs, Category::Totals, Axis::Rows, &explicit);
        assert_eq!(keys, vec![Label::from("Totals"), Label::from("Margin")]);
    }
}
