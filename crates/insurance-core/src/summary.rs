//! Monthly summary CSV rendering

use csv::{QuoteStyle, WriterBuilder};

use crate::category::InsuranceCategory;
use crate::decode::UTF8_BOM;
use crate::ledger::Ledger;

/// Label in the identifier column of the closing totals row
pub const TOTALS_LABEL: &str = "합계";

const IDENTIFIER_TITLE: &str = "주민번호";
const NAME_TITLE: &str = "성명";
const TOTAL_TITLE: &str = "총납부액";

/// Render a ledger as BOM-prefixed UTF-8 CSV: header, one line per person
/// in ledger order, then a totals line. No newline follows the totals line.
/// Fields are written as-is, never quoted.
pub fn format_summary(ledger: &Ledger) -> Result<String, csv::Error> {
    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .from_writer(Vec::new());

    let mut header = vec![IDENTIFIER_TITLE, NAME_TITLE];
    header.extend(InsuranceCategory::ALL.iter().map(|c| c.column_title()));
    header.push(TOTAL_TITLE);
    wtr.write_record(&header)?;

    for record in ledger.records() {
        let mut line = vec![record.identifier.clone(), record.name.clone()];
        line.extend(
            InsuranceCategory::ALL
                .iter()
                .map(|c| record.amount(*c).to_string()),
        );
        line.push(record.total().to_string());
        wtr.write_record(&line)?;
    }

    let mut totals = vec![TOTALS_LABEL.to_string(), String::new()];
    totals.extend(
        InsuranceCategory::ALL
            .iter()
            .map(|c| ledger.category_total(*c).to_string()),
    );
    totals.push(ledger.grand_total().to_string());
    wtr.write_record(&totals)?;

    let bytes = wtr.into_inner().map_err(|err| csv::Error::from(err.into_error()))?;
    let body = String::from_utf8_lossy(&bytes);

    Ok(format!("{}{}", UTF8_BOM, body.trim_end_matches('\n')))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contribution::ColumnLayout;
    use crate::parser::RawRow;
    use crate::period::Period;

    fn row(registration: &str, name: &str, column: usize, value: &str) -> RawRow {
        let mut fields = vec![String::new(); 27];
        fields[2] = registration.to_string();
        fields[3] = name.to_string();
        fields[column] = value.to_string();
        RawRow::new(2, fields)
    }

    fn sample_ledger() -> Ledger {
        let layout = ColumnLayout::default();
        let mut ledger = Ledger::new(Period::new(2024, 2).unwrap());
        let entries = [
            (InsuranceCategory::Health, row("900101-1", "홍길동", 13, "100000")),
            (InsuranceCategory::Pension, row("900101-1", "홍길동", 6, "90001")),
            (InsuranceCategory::Employment, row("850303-2", "김영희", 4, "2000")),
            (InsuranceCategory::IndustrialAccident, row("900101-1", "홍길동", 4, "700")),
            (InsuranceCategory::IndustrialAccident, row("850303-2", "김영희", 4, "300")),
        ];
        for (category, r) in &entries {
            ledger.accumulate(*category, r, &layout).unwrap();
        }
        ledger
    }

    #[test]
    fn test_summary_layout() {
        let text = format_summary(&sample_ledger()).unwrap();
        let expected = "\u{feff}주민번호,성명,건강보험,국민연금,고용보험,산재보험,총납부액\n\
                        900101,홍길동,100000,45000,0,700,145700\n\
                        850303,김영희,0,0,1120,300,1420\n\
                        합계,,100000,45000,1120,1000,147120";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_empty_ledger_has_zero_totals() {
        let ledger = Ledger::new(Period::new(2024, 2).unwrap());
        let text = format_summary(&ledger).unwrap();
        assert!(text.starts_with(UTF8_BOM));
        assert!(text.ends_with("\n합계,,0,0,0,0,0"));
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_names_are_never_quoted() {
        let layout = ColumnLayout::default();
        let mut ledger = Ledger::new(Period::new(2024, 2).unwrap());
        ledger
            .accumulate(InsuranceCategory::IndustrialAccident, &row("900101-1", "\"Kim", 4, "10"), &layout)
            .unwrap();

        let text = format_summary(&ledger).unwrap();
        assert_eq!(text.lines().nth(1), Some("900101,\"Kim,0,0,0,10,10"));
    }

    #[test]
    fn test_totals_row_matches_columns() {
        let text = format_summary(&sample_ledger()).unwrap();
        let rows: Vec<Vec<u64>> = text
            .lines()
            .skip(1)
            .map(|line| line.split(',').skip(2).map(|v| v.parse().unwrap()).collect())
            .collect();
        let (totals, people) = rows.split_last().unwrap();

        for column in 0..4 {
            let sum: u64 = people.iter().map(|r| r[column]).sum();
            assert_eq!(totals[column], sum);
        }
        for r in &rows {
            assert_eq!(r[4], r[..4].iter().sum::<u64>());
        }
    }
}
