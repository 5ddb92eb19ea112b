//! Per-period, per-person contribution totals

use std::collections::HashMap;

use crate::category::InsuranceCategory;
use crate::contribution::{ColumnLayout, compute_contribution};
use crate::error::ParseError;
use crate::parser::RawRow;
use crate::period::Period;

/// Accumulated contributions for one person
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonRecord {
    pub identifier: String,
    pub name: String,
    amounts: [u64; 4],
    total: u64,
}

impl PersonRecord {
    fn new(identifier: String, name: String) -> Self {
        Self {
            identifier,
            name,
            amounts: [0; 4],
            total: 0,
        }
    }

    pub fn amount(&self, category: InsuranceCategory) -> u64 {
        self.amounts[category.index()]
    }

    /// Sum of the four category amounts
    pub fn total(&self) -> u64 {
        self.total
    }

    fn add(&mut self, category: InsuranceCategory, contribution: u64) {
        let amount = &mut self.amounts[category.index()];
        *amount = amount.saturating_add(contribution);
        self.total = self.total.saturating_add(contribution);
    }
}

/// Person identifier and name taken from a report row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonKey<'a> {
    pub identifier: &'a str,
    pub name: &'a str,
}

impl<'a> PersonKey<'a> {
    /// The identifier is the part of the registration number before the
    /// hyphen (birth date digits). A missing name is left blank.
    pub fn from_row(row: &'a RawRow, layout: &ColumnLayout) -> Result<Self, ParseError> {
        let registration = row.get(layout.person_key).ok_or(ParseError::MissingPersonKey {
            line: row.line,
            column: layout.person_key,
        })?;

        let identifier = registration.split('-').next().unwrap_or_default();

        Ok(Self {
            identifier,
            name: row.get(layout.name).unwrap_or_default(),
        })
    }
}

/// Contributions for everyone appearing in one period's reports,
/// in order of first appearance
#[derive(Debug, Clone)]
pub struct Ledger {
    period: Period,
    records: Vec<PersonRecord>,
    index: HashMap<String, usize>,
}

impl Ledger {
    pub fn new(period: Period) -> Self {
        Self {
            period,
            records: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn period(&self) -> Period {
        self.period
    }

    /// Records in insertion order
    pub fn records(&self) -> &[PersonRecord] {
        &self.records
    }

    pub fn get(&self, identifier: &str) -> Option<&PersonRecord> {
        self.index.get(identifier).map(|&i| &self.records[i])
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Column sum for one category across all records
    pub fn category_total(&self, category: InsuranceCategory) -> u64 {
        self.records
            .iter()
            .fold(0u64, |sum, r| sum.saturating_add(r.amount(category)))
    }

    /// Sum of every record's total
    pub fn grand_total(&self) -> u64 {
        self.records
            .iter()
            .fold(0u64, |sum, r| sum.saturating_add(r.total()))
    }

    /// Add one row's contribution to its person, creating the record on
    /// first sight. Returns the contribution added.
    pub fn accumulate(
        &mut self,
        category: InsuranceCategory,
        row: &RawRow,
        layout: &ColumnLayout,
    ) -> Result<u64, ParseError> {
        let key = PersonKey::from_row(row, layout)?;
        let contribution = compute_contribution(category, row, layout);
        self.record_mut(key).add(category, contribution);
        Ok(contribution)
    }

    /// Accumulate every row of one category's report.
    ///
    /// All rows are checked before any is applied, so a malformed report
    /// leaves the ledger untouched. Returns the number of rows applied.
    pub fn accumulate_report(
        &mut self,
        category: InsuranceCategory,
        rows: &[RawRow],
        layout: &ColumnLayout,
    ) -> Result<usize, ParseError> {
        for row in rows {
            PersonKey::from_row(row, layout)?;
        }
        for row in rows {
            self.accumulate(category, row, layout)?;
        }
        Ok(rows.len())
    }

    fn record_mut(&mut self, key: PersonKey<'_>) -> &mut PersonRecord {
        let position = match self.index.get(key.identifier) {
            Some(&i) => i,
            None => {
                let i = self.records.len();
                self.records
                    .push(PersonRecord::new(key.identifier.to_string(), key.name.to_string()));
                self.index.insert(key.identifier.to_string(), i);
                i
            }
        };
        &mut self.records[position]
    }
}
