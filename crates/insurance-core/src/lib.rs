//! Monthly four-insurance contribution aggregation
//!
//! Downloads the health, pension, employment and industrial accident
//! reports for each month, totals every person's employee contributions
//! and renders a per-month summary CSV. Network access, prompting and file
//! output are supplied by the caller through the traits in [`driver`].

pub mod category;
pub mod contribution;
pub mod decode;
pub mod driver;
pub mod error;
pub mod input;
pub mod ledger;
pub mod parser;
pub mod period;
pub mod request;
pub mod summary;

pub use category::InsuranceCategory;
pub use contribution::{ColumnLayout, compute_contribution};
pub use driver::{Artifact, ArtifactSink, Pacer, Pacing, PeriodDriver, ReportSource, RunReport};
pub use error::{CategoryError, FetchError, InputError, ParseError, RunError, SinkError};
pub use input::RunInput;
pub use ledger::{Ledger, PersonRecord};
pub use parser::{RawRow, RowParser};
pub use period::Period;
pub use request::{PortalProfile, ReportRequest};
pub use summary::format_summary;
