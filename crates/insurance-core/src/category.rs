//! The four insurance categories published by the portal

use std::fmt;

/// One of the four social insurance types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsuranceCategory {
    Health,
    Pension,
    Employment,
    IndustrialAccident,
}

impl InsuranceCategory {
    /// Processing order within a period
    pub const ALL: [InsuranceCategory; 4] = [
        InsuranceCategory::Health,
        InsuranceCategory::Pension,
        InsuranceCategory::Employment,
        InsuranceCategory::IndustrialAccident,
    ];

    /// Portal insurance type code (`insuTypeCd`)
    pub fn code(&self) -> &'static str {
        match self {
            InsuranceCategory::Health => "10",
            InsuranceCategory::Pension => "20",
            InsuranceCategory::Employment => "30",
            InsuranceCategory::IndustrialAccident => "40",
        }
    }

    /// Report endpoint, relative to the portal base URL
    pub fn endpoint(&self) -> &'static str {
        match self {
            InsuranceCategory::Health => "JpBca00206.do",
            InsuranceCategory::Pension => "JpBca00207.do",
            InsuranceCategory::Employment => "JpBca00208.do",
            InsuranceCategory::IndustrialAccident => "JpBca00209.do",
        }
    }

    /// Short name used in raw artifact file names
    pub fn display_name(&self) -> &'static str {
        match self {
            InsuranceCategory::Health => "건강",
            InsuranceCategory::Pension => "연금",
            InsuranceCategory::Employment => "고용",
            InsuranceCategory::IndustrialAccident => "산재",
        }
    }

    /// Column title in the monthly summary
    pub fn column_title(&self) -> &'static str {
        match self {
            InsuranceCategory::Health => "건강보험",
            InsuranceCategory::Pension => "국민연금",
            InsuranceCategory::Employment => "고용보험",
            InsuranceCategory::IndustrialAccident => "산재보험",
        }
    }

    /// Position in [`InsuranceCategory::ALL`], used to index per-category amounts
    pub fn index(&self) -> usize {
        match self {
            InsuranceCategory::Health => 0,
            InsuranceCategory::Pension => 1,
            InsuranceCategory::Employment => 2,
            InsuranceCategory::IndustrialAccident => 3,
        }
    }
}

impl fmt::Display for InsuranceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsuranceCategory::Health => write!(f, "Health"),
            InsuranceCategory::Pension => write!(f, "Pension"),
            InsuranceCategory::Employment => write!(f, "Employment"),
            InsuranceCategory::IndustrialAccident => write!(f, "Industrial Accident"),
        }
    }
}
