//! Converts downloaded CSV files into Excel workbooks
//!
//! Raw portal reports are EUC-KR and summaries are UTF-8 with a byte-order
//! mark; both are accepted, so a folder mixing them converts in one pass.
//! Each `name.csv` becomes `name.xlsx` with a single `Sheet1`. The first
//! line is written as a bold header row.

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use insurance_core::decode::{SourceEncoding, decode_any};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::{Path, PathBuf};

/// Outcome for one input file
#[derive(Debug)]
pub enum Conversion {
    Converted {
        input: PathBuf,
        output: PathBuf,
        encoding: SourceEncoding,
    },
    Failed {
        input: PathBuf,
        error: String,
    },
}

/// Convert every `*.csv` directly inside `input_dir` into `output_dir`.
/// A file that cannot be decoded is reported and skipped.
pub fn convert_folder(input_dir: &Path, output_dir: &Path) -> Result<Vec<Conversion>> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output folder: {}", output_dir.display()))?;

    let mut inputs: Vec<PathBuf> = std::fs::read_dir(input_dir)
        .with_context(|| format!("Failed to read input folder: {}", input_dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_csv(path))
        .collect();
    inputs.sort();

    let mut results = Vec::with_capacity(inputs.len());
    for input in inputs {
        let result = match convert_file(&input, output_dir) {
            Ok((output, encoding)) => {
                tracing::info!(input = %input.display(), output = %output.display(), encoding = encoding.label(), "converted");
                Conversion::Converted {
                    input,
                    output,
                    encoding,
                }
            }
            Err(e) => {
                tracing::warn!(input = %input.display(), error = %e, "conversion failed");
                Conversion::Failed {
                    input,
                    error: format!("{:#}", e),
                }
            }
        };
        results.push(result);
    }

    Ok(results)
}

fn convert_file(input: &Path, output_dir: &Path) -> Result<(PathBuf, SourceEncoding)> {
    let bytes = std::fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let (text, encoding) = decode_any(&bytes).context("neither utf-8 nor euc-kr")?;

    let stem = input
        .file_stem()
        .with_context(|| format!("No file name: {}", input.display()))?;
    let mut file_name = stem.to_os_string();
    file_name.push(".xlsx");
    let output = output_dir.join(file_name);

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    write_rows(worksheet, &text)?;
    workbook
        .save(&output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    Ok((output, encoding))
}

fn write_rows(worksheet: &mut Worksheet, text: &str) -> Result<()> {
    let header_format = Format::new().set_bold();
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    for (row, record) in reader.records().enumerate() {
        let record = record.context("malformed csv")?;
        let row = u32::try_from(row).context("too many rows for a worksheet")?;

        for (col, field) in record.iter().enumerate() {
            let col = u16::try_from(col).context("too many columns for a worksheet")?;
            if row == 0 {
                worksheet.write_string_with_format(row, col, field, &header_format)?;
            } else if let Some(number) = numeric_cell(field) {
                worksheet.write_number(row, col, number)?;
            } else if !field.is_empty() {
                worksheet.write_string(row, col, field)?;
            }
        }
    }

    Ok(())
}

/// Plain decimal numbers become numeric cells. Values with a leading zero
/// (birth-date identifiers such as `010203`) stay text so the zero survives.
fn numeric_cell(field: &str) -> Option<f64> {
    let digits = field.strip_prefix('-').unwrap_or(field);
    let plain = !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && digits.chars().next().is_some_and(|c| c.is_ascii_digit());
    let leading_zero = digits.len() > 1 && digits.starts_with('0') && !digits.starts_with("0.");
    if !plain || leading_zero {
        return None;
    }
    field.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{Data, Reader, open_workbook_auto};
    use tempfile::TempDir;

    const EUC_KR_NAME: [u8; 6] = [0xc8, 0xab, 0xb1, 0xe6, 0xb5, 0xbf]; // 홍길동

    fn cell(path: &Path, row: u32, col: u32) -> Option<Data> {
        let mut workbook = open_workbook_auto(path).unwrap();
        let range = workbook.worksheet_range("Sheet1").unwrap();
        range.get_value((row, col)).cloned()
    }

    #[test]
    fn test_converts_mixed_folder() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("inputs");
        let output = tmp.path().join("outputs");
        std::fs::create_dir_all(&input).unwrap();

        let mut raw = b"name,amount\n".to_vec();
        raw.extend_from_slice(&EUC_KR_NAME);
        raw.extend_from_slice(b",1500\n");
        std::fs::write(input.join("202401_건강.csv"), &raw).unwrap();
        std::fs::write(input.join("202401_월별합산.CSV"), "\u{feff}주민번호,총납부액\n합계,0").unwrap();
        std::fs::write(input.join("notes.txt"), "skip me").unwrap();

        let results = convert_folder(&input, &output).unwrap();
        assert_eq!(results.len(), 2);

        let health = output.join("202401_건강.xlsx");
        assert_eq!(cell(&health, 0, 0), Some(Data::String("name".to_string())));
        assert_eq!(cell(&health, 1, 0), Some(Data::String("홍길동".to_string())));
        assert_eq!(cell(&health, 1, 1), Some(Data::Float(1500.0)));

        let summary = output.join("202401_월별합산.xlsx");
        assert_eq!(cell(&summary, 0, 0), Some(Data::String("주민번호".to_string())));
        assert_eq!(cell(&summary, 1, 1), Some(Data::Float(0.0)));
        assert!(!output.join("notes.xlsx").exists());

        let encodings: Vec<_> = results
            .iter()
            .map(|r| match r {
                Conversion::Converted { encoding, .. } => Some(*encoding),
                Conversion::Failed { .. } => None,
            })
            .collect();
        assert_eq!(encodings, vec![Some(SourceEncoding::EucKr), Some(SourceEncoding::Utf8)]);
    }

    #[test]
    fn test_identifiers_keep_leading_zero() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("ids.csv"), "주민번호,금액\n010203,12.5\n").unwrap();

        convert_folder(tmp.path(), &tmp.path().join("out")).unwrap();

        let workbook = tmp.path().join("out").join("ids.xlsx");
        assert_eq!(cell(&workbook, 1, 0), Some(Data::String("010203".to_string())));
        assert_eq!(cell(&workbook, 1, 1), Some(Data::Float(12.5)));
    }

    #[test]
    fn test_numeric_cell() {
        assert_eq!(numeric_cell("1500"), Some(1500.0));
        assert_eq!(numeric_cell("-3"), Some(-3.0));
        assert_eq!(numeric_cell("0"), Some(0.0));
        assert_eq!(numeric_cell("0.5"), Some(0.5));
        assert_eq!(numeric_cell("010203"), None);
        assert_eq!(numeric_cell("900101-1"), None);
        assert_eq!(numeric_cell("NaN"), None);
        assert_eq!(numeric_cell(""), None);
    }

    #[test]
    fn test_undecodable_file_is_reported() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("bad.csv"), [0xff, 0xfe, 0xff]).unwrap();

        let results = convert_folder(tmp.path(), &tmp.path().join("out")).unwrap();
        assert!(matches!(results.as_slice(), [Conversion::Failed { .. }]));
    }

    #[test]
    fn test_missing_input_folder() {
        let tmp = TempDir::new().unwrap();
        assert!(convert_folder(&tmp.path().join("nope"), &tmp.path().join("out")).is_err());
    }
}
