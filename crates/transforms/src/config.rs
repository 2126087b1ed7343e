use serde::Deserialize;

/// Default labels and settings for the transform operations.
///
/// Options structs fill their unset fields from here, so a host application
/// can load site-wide conventions (say, Dutch margin labels) once from JSON
/// and have every chained call pick them up.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Defaults {
    pub totals: TotalsDefaults,
    pub subtotals: SubtotalsDefaults,
    pub percentages: PercentageDefaults,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TotalsDefaults {
    pub label: String,
    /// Fill value padding the unused levels of hierarchical margin keys.
    pub fill: String,
}

impl Default for TotalsDefaults {
    fn default() -> Self {
        TotalsDefaults {
            label: "Totals".to_string(),
            fill: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SubtotalsDefaults {
    pub label: String,
    pub skip_single_rows: bool,
    pub include_level_name: bool,
    pub fill: String,
}

impl Default for SubtotalsDefaults {
    fn default() -> Self {
        SubtotalsDefaults {
            label: "Subtotals".to_string(),
            skip_single_rows: true,
            include_level_name: false,
            fill: String::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PercentageDefaults {
    pub label_n: String,
    pub label_pct: String,
    /// Decimal places for rounding; negative means no rounding.
    pub ndigits: i32,
    /// The whole against which fractions are computed (1 = proportions,
    /// 100 = percentages).
    pub base: f64,
}

impl Default for PercentageDefaults {
    fn default() -> Self {
        PercentageDefaults {
            label_n: "n".to_string(),
            label_pct: "pct".to_string(),
            ndigits: -1,
            base: 1.0,
        }
    }
}

impl Defaults {
    /// Load defaults from a JSON document; missing sections and fields keep
    /// their built-in values.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_defaults() {
        let defaults = Defaults::default();
        assert_eq!(defaults.totals.label, "Totals");
        assert_eq!(defaults.subtotals.label, "Subtotals");
        assert!(defaults.subtotals.skip_single_rows);
        assert_eq!(defaults.percentages.label_pct, "pct");
        assert_eq!(defaults.percentages.ndigits, -1);
        assert!((defaults.percentages.base - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_json_overrides() {
        let defaults = Defaults::from_json_str(
            r#"{"totals": {"label": "Totaal"}, "percentages": {"base": 100}}"#,
        )
        .unwrap();
        assert_eq!(defaults.totals.label, "Totaal");
        assert!((defaults.percentages.base - 100.0).abs() < f64::EPSILON);
        // Untouched sections keep their built-ins.
        assert_eq!(defaults.subtotals.label, "Subtotals");
        assert_eq!(defaults.percentages.label_n, "n");
    }
}
