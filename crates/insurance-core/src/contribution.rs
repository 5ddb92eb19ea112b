//! Per-category contribution rules
//!
//! Every rule works on whole won amounts with truncating division, which
//! is how the statutory employee shares are rounded.

use serde::Deserialize;

use crate::category::InsuranceCategory;
use crate::parser::RawRow;

/// Column positions in the portal's report layouts (0-based)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    /// Health insurance premium (health report)
    pub health: usize,
    /// Long-term care premium (health report)
    pub long_term_care: usize,
    /// Pension contribution, employer and employee combined
    pub pension: usize,
    /// Employment insurance premium
    pub employment: usize,
    /// Industrial accident premium
    pub industrial_accident: usize,
    /// Resident registration number, "front-back"
    pub person_key: usize,
    /// Person's name
    pub name: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            health: 13,
            long_term_care: 26,
            pension: 6,
            employment: 4,
            industrial_accident: 4,
            person_key: 2,
            name: 3,
        }
    }
}

/// Employee share of the combined employment premium: 115/205
const EMPLOYMENT_SHARE_NUMERATOR: u64 = 115;
const EMPLOYMENT_SHARE_DENOMINATOR: u64 = 205;

/// Employment shares are cut down to a multiple of 10 won
const EMPLOYMENT_ROUNDING_UNIT: u64 = 10;

/// Contribution for one row of a category's report
pub fn compute_contribution(category: InsuranceCategory, row: &RawRow, layout: &ColumnLayout) -> u64 {
    match category {
        InsuranceCategory::Health => {
            amount_at(row, layout.health).saturating_add(amount_at(row, layout.long_term_care))
        }
        InsuranceCategory::Pension => amount_at(row, layout.pension) / 2,
        InsuranceCategory::Employment => employment_share(amount_at(row, layout.employment)),
        InsuranceCategory::IndustrialAccident => amount_at(row, layout.industrial_accident),
    }
}

fn employment_share(premium: u64) -> u64 {
    let share = premium.saturating_mul(EMPLOYMENT_SHARE_NUMERATOR) / EMPLOYMENT_SHARE_DENOMINATOR;
    share / EMPLOYMENT_ROUNDING_UNIT * EMPLOYMENT_ROUNDING_UNIT
}

fn amount_at(row: &RawRow, index: usize) -> u64 {
    row.get(index).map_or(0, parse_amount)
}

/// Lenient integer parse: reads the leading digits and ignores the rest.
/// Missing digits and negative values count as zero.
pub fn parse_amount(value: &str) -> u64 {
    let value = value.trim();
    let value = value.strip_prefix('+').unwrap_or(value);
    let end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());

    value[..end].parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Row with `value` placed at `index` and blanks elsewhere
    fn row_with(values: &[(usize, &str)]) -> RawRow {
        let len = values.iter().map(|(i, _)| i + 1).max().unwrap_or(0);
        let mut fields = vec![String::new(); len];
        for (i, v) in values {
            fields[*i] = v.to_string();
        }
        RawRow::new(2, fields)
    }

    fn compute(category: InsuranceCategory, row: &RawRow) -> u64 {
        compute_contribution(category, row, &ColumnLayout::default())
    }

    #[test]
    fn test_health_sums_both_columns() {
        let row = row_with(&[(13, "120000"), (26, "15540")]);
        assert_eq!(compute(InsuranceCategory::Health, &row), 135_540);
    }

    #[test]
    fn test_health_missing_long_term_care() {
        let row = row_with(&[(13, "120000")]);
        assert_eq!(compute(InsuranceCategory::Health, &row), 120_000);
    }

    #[test]
    fn test_pension_halves_with_floor() {
        let row = row_with(&[(6, "100001")]);
        assert_eq!(compute(InsuranceCategory::Pension, &row), 50_000);
    }

    #[test]
    fn test_employment_share_and_rounding() {
        assert_eq!(compute(InsuranceCategory::Employment, &row_with(&[(4, "1000")])), 560);
        assert_eq!(compute(InsuranceCategory::Employment, &row_with(&[(4, "2000")])), 1120);
        // 36900 * 115 / 205 = 20700 exactly
        assert_eq!(compute(InsuranceCategory::Employment, &row_with(&[(4, "36900")])), 20_700);
        // 999 * 115 / 205 = 560.4 -> 560
        assert_eq!(compute(InsuranceCategory::Employment, &row_with(&[(4, "999")])), 560);
        // 17 * 115 / 205 = 9.5 -> 9 -> 0
        assert_eq!(compute(InsuranceCategory::Employment, &row_with(&[(4, "17")])), 0);
    }

    #[test]
    fn test_employment_matches_formula() {
        for value in [0u64, 1, 9, 205, 1_234, 56_789, 1_000_000] {
            let row = row_with(&[(4, &value.to_string())]);
            let expected = (value * 115 / 205) / 10 * 10;
            assert_eq!(compute(InsuranceCategory::Employment, &row), expected);
        }
    }

    #[test]
    fn test_industrial_accident_passes_through() {
        let row = row_with(&[(4, "4321")]);
        assert_eq!(compute(InsuranceCategory::IndustrialAccident, &row), 4321);
    }

    #[test]
    fn test_absent_fields_are_zero() {
        let row = RawRow::new(2, vec!["1".to_string(), "x".to_string()]);
        for category in InsuranceCategory::ALL {
            assert_eq!(compute(category, &row), 0);
        }
    }

    #[test]
    fn test_parse_amount_is_lenient() {
        assert_eq!(parse_amount("1500"), 1500);
        assert_eq!(parse_amount(" 42 "), 42);
        assert_eq!(parse_amount("12.7"), 12);
        assert_eq!(parse_amount("300원"), 300);
        assert_eq!(parse_amount("+7"), 7);
        assert_eq!(parse_amount(""), 0);
        assert_eq!(parse_amount("abc"), 0);
        assert_eq!(parse_amount("-500"), 0);
    }

    #[test]
    fn test_custom_layout() {
        let layout = ColumnLayout {
            pension: 1,
            ..ColumnLayout::default()
        };
        let row = RawRow::new(2, vec!["x".to_string(), "900".to_string()]);
        assert_eq!(compute_contribution(InsuranceCategory::Pension, &row, &layout), 450);
    }
}
