//! Interactive prompts for the run parameters
//!
//! Blank answers are asked again. End of input cancels the run before
//! anything is downloaded.

use insurance_core::{InputError, Period, RunInput};
use std::io::{BufRead, Write};

const EMPTY_ANSWER: &str = "빈 값을 입력할 수 없습니다. 다시 시도해주세요.";

/// Line-based question/answer over any reader and writer
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask until a non-blank answer arrives
    pub fn ask(&mut self, question: &str) -> Result<String, InputError> {
        loop {
            write!(self.output, "{} ", question).map_err(|_| InputError::Canceled)?;
            self.output.flush().map_err(|_| InputError::Canceled)?;

            let mut line = String::new();
            let read = self.input.read_line(&mut line).map_err(|_| InputError::Canceled)?;
            if read == 0 {
                return Err(InputError::Canceled);
            }

            let answer = line.trim();
            if !answer.is_empty() {
                return Ok(answer.to_string());
            }
            writeln!(self.output, "{}", EMPTY_ANSWER).map_err(|_| InputError::Canceled)?;
        }
    }
}

/// Values already given on the command line
#[derive(Debug, Default, Clone)]
pub struct Preset {
    pub start: Option<Period>,
    pub end: Option<Period>,
    pub business_number: Option<String>,
}

/// Ask for whatever the preset does not cover, then validate everything
pub fn collect_run_input<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    preset: Preset,
) -> Result<RunInput, InputError> {
    let (start_year, start_month) = match preset.start {
        Some(p) => (p.year().to_string(), p.month().to_string()),
        None => (
            prompter.ask("조회 시작 연도를 입력하세요 (예: 2024):")?,
            prompter.ask("조회 시작 월을 입력하세요 (1-12):")?,
        ),
    };

    let (end_year, end_month) = match preset.end {
        Some(p) => (p.year().to_string(), p.month().to_string()),
        None => (
            prompter.ask("조회 종료 연도를 입력하세요 (예: 2025):")?,
            prompter.ask("조회 종료 월을 입력하세요 (1-12):")?,
        ),
    };

    let business_number = match preset.business_number {
        Some(number) => number,
        None => prompter.ask("사업자 번호를 입력하세요 (숫자만, 예: 0123456789):")?,
    };

    RunInput::from_answers(&start_year, &start_month, &end_year, &end_month, &business_number)
}
