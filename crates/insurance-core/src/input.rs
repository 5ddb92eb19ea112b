//! Validation of the run parameters (date range and business number)

use regex::Regex;
use std::sync::LazyLock;

use crate::error::InputError;
use crate::period::Period;

/// 10-digit business registration number, or 11 digits with a branch suffix
static BUSINESS_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10,11}$").expect("business number pattern"));

/// Everything a run needs from the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunInput {
    pub start: Period,
    pub end: Period,
    pub business_number: String,
}

impl RunInput {
    /// Validate raw answers in prompt order
    pub fn from_answers(
        start_year: &str,
        start_month: &str,
        end_year: &str,
        end_month: &str,
        business_number: &str,
    ) -> Result<Self, InputError> {
        let start_year = parse_year("start year", start_year)?;
        let start_month = parse_month("start month", start_month)?;
        let end_year = parse_year("end year", end_year)?;
        let end_month = parse_month("end month", end_month)?;

        Ok(Self {
            start: period(start_year, start_month)?,
            end: period(end_year, end_month)?,
            business_number: validate_business_number(business_number)?,
        })
    }

    /// Number of months the run covers (0 for a reversed range)
    pub fn month_count(&self) -> usize {
        Period::range(self.start, self.end).count()
    }
}

pub fn parse_year(field: &'static str, value: &str) -> Result<i32, InputError> {
    value.trim().parse().map_err(|_| InputError::NotANumber {
        field,
        value: value.to_string(),
    })
}

pub fn parse_month(field: &'static str, value: &str) -> Result<u32, InputError> {
    let month: u32 = value.trim().parse().map_err(|_| InputError::NotANumber {
        field,
        value: value.to_string(),
    })?;

    if !(1..=12).contains(&month) {
        return Err(InputError::MonthOutOfRange { field, value: month });
    }
    Ok(month)
}

pub fn validate_business_number(value: &str) -> Result<String, InputError> {
    let value = value.trim();
    if BUSINESS_NUMBER.is_match(value) {
        Ok(value.to_string())
    } else {
        Err(InputError::InvalidBusinessNumber(value.to_string()))
    }
}

fn period(year: i32, month: u32) -> Result<Period, InputError> {
    Period::new(year, month).ok_or_else(|| InputError::InvalidYearMonth(format!("{}-{}", year, month)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_answers() {
        let input = RunInput::from_answers("2023", "11", "2024", "2", "1234567890").unwrap();
        assert_eq!(input.start, Period::new(2023, 11).unwrap());
        assert_eq!(input.end, Period::new(2024, 2).unwrap());
        assert_eq!(input.business_number, "1234567890");
        assert_eq!(input.month_count(), 4);
    }

    #[test]
    fn test_reversed_range_is_allowed_but_empty() {
        let input = RunInput::from_answers("2024", "5", "2024", "1", "12345678901").unwrap();
        assert_eq!(input.month_count(), 0);
    }

    #[test]
    fn test_non_numeric_year() {
        let err = RunInput::from_answers("twenty", "1", "2024", "1", "1234567890").unwrap_err();
        assert_eq!(
            err,
            InputError::NotANumber {
                field: "start year",
                value: "twenty".to_string()
            }
        );
    }

    #[test]
    fn test_month_out_of_range() {
        let err = RunInput::from_answers("2024", "1", "2024", "13", "1234567890").unwrap_err();
        assert_eq!(
            err,
            InputError::MonthOutOfRange {
                field: "end month",
                value: 13
            }
        );
    }

    #[test]
    fn test_business_number_format() {
        assert!(validate_business_number("1234567890").is_ok());
        assert!(validate_business_number(" 12345678901 ").is_ok());
        assert!(validate_business_number("123456789").is_err());
        assert!(validate_business_number("123456789012").is_err());
        assert!(validate_business_number("123-45-67890").is_err());
        assert!(validate_business_number("").is_err());
    }
}
