//! Report request parameters
//!
//! Each category has a fixed set of form fields. The period-dependent
//! fields (`wrtChasu`, `gojiYyyymm`, `schYyyy`, `schMm`) are filled in per
//! request.

use serde::Deserialize;

use crate::category::InsuranceCategory;
use crate::period::Period;

/// Workplace identifiers and endpoint settings for the portal
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PortalProfile {
    /// Base URL the category endpoints are appended to
    pub base_url: String,
    /// Firm symbol (`firmSym`)
    pub firm_symbol: String,
    /// Unit firm symbol (`unitFirmSym`)
    pub unit_firm_symbol: String,
    /// National finance code, health reports only
    pub nation_finance_code: String,
    /// UNB number, health reports only
    pub unb_number: String,
    /// Pension workplace number, health reports only
    pub firm_nps_number: String,
    /// Workplace ledger number for employment/accident reports
    pub workplace_ledger_number: String,
    /// Appended to YYYYMM to form the write-sequence token
    pub sequence_suffix: String,
}

impl Default for PortalProfile {
    fn default() -> Self {
        Self {
            base_url: "https://si4n.nhis.or.kr/jpbc/".to_string(),
            firm_symbol: "78317148".to_string(),
            unit_firm_symbol: "000".to_string(),
            nation_finance_code: "00".to_string(),
            unb_number: "57110088348".to_string(),
            firm_nps_number: "20009811105".to_string(),
            workplace_ledger_number: "20201118747".to_string(),
            sequence_suffix: "2001".to_string(),
        }
    }
}

/// A single form-encoded POST to the portal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    pub category: InsuranceCategory,
    pub period: Period,
    pub url: String,
    pub form: Vec<(&'static str, String)>,
}

impl ReportRequest {
    /// Build the request for one category and period
    pub fn new(
        profile: &PortalProfile,
        business_number: &str,
        category: InsuranceCategory,
        period: Period,
    ) -> Self {
        let mut form = static_fields(profile, business_number, category);

        let yyyymm = period.yyyymm();
        form.push(("wrtChasu", format!("{}{}", yyyymm, profile.sequence_suffix)));
        form.push(("gojiYyyymm", yyyymm));
        form.push(("schYyyy", period.year().to_string()));
        form.push(("schMm", period.month().to_string()));

        Self {
            category,
            period,
            url: format!(
                "{}/{}",
                profile.base_url.trim_end_matches('/'),
                category.endpoint()
            ),
            form,
        }
    }

    /// Look up a form field by name
    pub fn field(&self, name: &str) -> Option<&str> {
        self.form
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

fn static_fields(
    profile: &PortalProfile,
    business_number: &str,
    category: InsuranceCategory,
) -> Vec<(&'static str, String)> {
    let mut form = vec![
        ("popYn", "N".to_string()),
        ("excelYn", "Y".to_string()),
        ("insuTypeCd", category.code().to_string()),
        ("firmMgmtNo", format!("{}0", business_number)),
        ("returnName", "list".to_string()),
    ];

    match category {
        InsuranceCategory::Health => {
            form.extend([
                ("hidWrkgbn", "S".to_string()),
                ("firmSym", profile.firm_symbol.clone()),
                ("unitFirmSym", profile.unit_firm_symbol.clone()),
                ("gojiChasu", "1".to_string()),
                ("nationFinanceCd", profile.nation_finance_code.clone()),
                ("unbNo", profile.unb_number.clone()),
                ("firmNpsNo", profile.firm_nps_number.clone()),
                ("seWonbuNo3", profile.workplace_ledger_number.clone()),
                ("seWonbuNo4", profile.workplace_ledger_number.clone()),
                ("seWonbuNo", String::new()),
            ]);
        }
        InsuranceCategory::Pension => {
            form.extend([
                ("hidWrkgbn", "S".to_string()),
                ("firmSym", profile.firm_symbol.clone()),
                ("unitFirmSym", profile.unit_firm_symbol.clone()),
                ("seWonbuNo", String::new()),
            ]);
        }
        InsuranceCategory::Employment | InsuranceCategory::IndustrialAccident => {
            let (name, kind) = if category == InsuranceCategory::Employment {
                ("고용보험", "EPIC")
            } else {
                ("산재보험", "IACI")
            };
            form.extend([
                ("insuName", name.to_string()),
                ("insuKind", kind.to_string()),
                ("hidWrkgbn", "S".to_string()),
                ("firmSym", profile.firm_symbol.clone()),
                ("unitFirmSym", profile.unit_firm_symbol.clone()),
                ("seWonbuNo", profile.workplace_ledger_number.clone()),
            ]);
        }
    }

    form.push(("userId", String::new()));
    form.push(("passwd", String::new()));
    form
}
