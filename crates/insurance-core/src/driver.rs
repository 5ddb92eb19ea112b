//! Month-by-month report retrieval and aggregation
//!
//! For every period the driver requests the four category reports in a
//! fixed order, folds each into a fresh ledger and saves the raw download,
//! then writes the period's summary. Fetch, parse and raw-save failures
//! are recorded against their category and the run carries on; only a
//! summary that cannot be rendered or saved stops the run.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, error, info};

use crate::category::InsuranceCategory;
use crate::contribution::ColumnLayout;
use crate::decode::decode_report;
use crate::error::{CategoryError, FetchError, RunError, SinkError};
use crate::ledger::Ledger;
use crate::parser::{RawRow, RowParser};
use crate::period::Period;
use crate::request::{PortalProfile, ReportRequest};
use crate::summary::format_summary;

/// MIME type of raw portal downloads
pub const RAW_MIME: &str = "text/csv;charset=euc-kr";

/// MIME type of generated summaries
pub const SUMMARY_MIME: &str = "text/csv;charset=utf-8";

/// Retrieves one report as raw bytes
pub trait ReportSource {
    fn fetch(&self, request: &ReportRequest) -> impl Future<Output = Result<Vec<u8>, FetchError>>;
}

/// Receives finished files
pub trait ArtifactSink {
    fn store(&mut self, artifact: &Artifact) -> Result<(), SinkError>;
}

/// Waits between requests
pub trait Pacer {
    fn pause(&self, delay: Duration) -> impl Future<Output = ()>;
}

impl<T: ReportSource + ?Sized> ReportSource for &T {
    fn fetch(&self, request: &ReportRequest) -> impl Future<Output = Result<Vec<u8>, FetchError>> {
        (**self).fetch(request)
    }
}

impl<T: Pacer + ?Sized> Pacer for &T {
    fn pause(&self, delay: Duration) -> impl Future<Output = ()> {
        (**self).pause(delay)
    }
}

/// Delays applied toward the portal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// After each saved raw report
    pub after_artifact: Duration,
    /// After each saved summary
    pub after_summary: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            after_artifact: Duration::from_millis(800),
            after_summary: Duration::from_millis(1500),
        }
    }
}

/// A named file handed to the sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub contents: Vec<u8>,
    pub mime: &'static str,
}

impl Artifact {
    /// Unmodified download for one period and category
    pub fn raw(period: Period, category: InsuranceCategory, contents: Vec<u8>) -> Self {
        Self {
            file_name: format!("{}_{}.csv", period.yyyymm(), category.display_name()),
            contents,
            mime: RAW_MIME,
        }
    }

    /// Monthly summary ("월별합산") for one period
    pub fn summary(period: Period, text: String) -> Self {
        Self {
            file_name: format!("{}_월별합산.csv", period.yyyymm()),
            contents: text.into_bytes(),
            mime: SUMMARY_MIME,
        }
    }
}

/// A category that failed within its period. Fetch and parse failures
/// leave the category out of the ledger; a sink failure only loses the raw
/// file.
#[derive(Debug)]
pub struct CategoryFailure {
    pub category: InsuranceCategory,
    pub error: CategoryError,
}

/// Result of processing one period
#[derive(Debug)]
pub struct PeriodOutcome {
    pub period: Period,
    /// Distinct people in the summary
    pub people: usize,
    /// Per-category totals, in [`InsuranceCategory::ALL`] order
    pub category_totals: [u64; 4],
    pub grand_total: u64,
    pub failures: Vec<CategoryFailure>,
}

impl PeriodOutcome {
    fn from_ledger(ledger: &Ledger, failures: Vec<CategoryFailure>) -> Self {
        Self {
            period: ledger.period(),
            people: ledger.len(),
            category_totals: InsuranceCategory::ALL.map(|c| ledger.category_total(c)),
            grand_total: ledger.grand_total(),
            failures,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Outcomes for every period of a run
#[derive(Debug, Default)]
pub struct RunReport {
    pub periods: Vec<PeriodOutcome>,
}

impl RunReport {
    /// All failed (period, category) attempts
    pub fn failures(&self) -> impl Iterator<Item = (Period, &CategoryFailure)> {
        self.periods
            .iter()
            .flat_map(|p| p.failures.iter().map(move |f| (p.period, f)))
    }

    pub fn failure_count(&self) -> usize {
        self.periods.iter().map(|p| p.failures.len()).sum()
    }
}

/// Sequential driver for a whole run
pub struct PeriodDriver<S, K, P> {
    source: S,
    sink: K,
    pacer: P,
    profile: PortalProfile,
    layout: ColumnLayout,
    pacing: Pacing,
    business_number: String,
}

impl<S, K, P> PeriodDriver<S, K, P>
where
    S: ReportSource,
    K: ArtifactSink,
    P: Pacer,
{
    pub fn new(source: S, sink: K, pacer: P, business_number: impl Into<String>) -> Self {
        Self {
            source,
            sink,
            pacer,
            profile: PortalProfile::default(),
            layout: ColumnLayout::default(),
            pacing: Pacing::default(),
            business_number: business_number.into(),
        }
    }

    pub fn with_profile(mut self, profile: PortalProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_layout(mut self, layout: ColumnLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Give back the sink (and everything it collected)
    pub fn into_sink(self) -> K {
        self.sink
    }

    /// Process every period from `start` to `end` inclusive
    pub async fn run(&mut self, start: Period, end: Period) -> Result<RunReport, RunError> {
        let mut report = RunReport::default();

        for period in Period::range(start, end) {
            let outcome = self.process_period(period).await?;
            report.periods.push(outcome);
        }

        Ok(report)
    }

    /// Fetch, aggregate and save one period
    pub async fn process_period(&mut self, period: Period) -> Result<PeriodOutcome, RunError> {
        let mut ledger = Ledger::new(period);
        let mut failures = Vec::new();

        for category in InsuranceCategory::ALL {
            let request = ReportRequest::new(&self.profile, &self.business_number, category, period);

            match self.collect_category(&request, &mut ledger).await {
                Ok(raw) => {
                    let artifact = Artifact::raw(period, category, raw);
                    match self.sink.store(&artifact) {
                        Ok(()) => {
                            info!(%period, %category, file = %artifact.file_name, "saved raw report");
                            self.pacer.pause(self.pacing.after_artifact).await;
                        }
                        // Contributions stay in the ledger; only the raw file is lost
                        Err(err) => {
                            error!(%period, %category, error = %err, "raw report not saved");
                            failures.push(CategoryFailure {
                                category,
                                error: CategoryError::Sink(err),
                            });
                        }
                    }
                }
                Err(err) => {
                    error!(%period, %category, error = %err, "category skipped");
                    failures.push(CategoryFailure {
                        category,
                        error: err,
                    });
                }
            }
        }

        let text = format_summary(&ledger).map_err(|source| RunError::Summary { period, source })?;
        let artifact = Artifact::summary(period, text);
        self.sink
            .store(&artifact)
            .map_err(|source| RunError::SummaryArtifact { period, source })?;
        info!(%period, people = ledger.len(), file = %artifact.file_name, "saved monthly summary");
        self.pacer.pause(self.pacing.after_summary).await;

        Ok(PeriodOutcome::from_ledger(&ledger, failures))
    }

    /// Fetch one report and fold it into the ledger. Returns the raw bytes.
    async fn collect_category(
        &self,
        request: &ReportRequest,
        ledger: &mut Ledger,
    ) -> Result<Vec<u8>, CategoryError> {
        let raw = self.source.fetch(request).await?;
        let text = decode_report(&raw)?;

        let rows = RowParser::new(&text)
            .rows()
            .skip(1)
            .collect::<Result<Vec<RawRow>, _>>()?;
        let applied = ledger.accumulate_report(request.category, &rows, &self.layout)?;

        debug!(
            period = %request.period,
            category = %request.category,
            bytes = raw.len(),
            rows = applied,
            "report aggregated"
        );
        Ok(raw)
    }
}
