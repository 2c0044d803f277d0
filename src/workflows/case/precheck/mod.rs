//! Approval precheck run against a case just before it is submitted.
//!
//! Six named checks each pass or fail on the current record; the verdict combines them into
//! auto-approval or manual review. Evaluation never fails: missing data is a failing check.

mod config;
mod policy;
mod rules;


pub use config::{PrecheckConfig, DEFAULT_INVOICE_TOLERANCE, DEFAULT_REQUIRED_PHOTOS};

use super::domain::{CaseRecord, PreCheckResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckId {
    VehicleData,
    ClaimForm,
    PhotoQuality,
    PartsPricing,
    InvoiceValidation,
    CoverageCheck,
}

impl CheckId {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::VehicleData,
            Self::ClaimForm,
            Self::PhotoQuality,
            Self::PartsPricing,
            Self::InvoiceValidation,
            Self::CoverageCheck,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VehicleData => "vehicle_data",
            Self::ClaimForm => "claim_form",
            Self::PhotoQuality => "photo_quality",
            Self::PartsPricing => "parts_pricing",
            Self::InvoiceValidation => "invoice_validation",
            Self::CoverageCheck => "coverage_check",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::VehicleData => "Vehicle Data Validation",
            Self::ClaimForm => "Claim Form Verification",
            Self::PhotoQuality => "Photo Quality Check",
            Self::PartsPricing => "Parts & Pricing Review",
            Self::InvoiceValidation => "Invoice Validation",
            Self::CoverageCheck => "Coverage Verification",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Success,
    Error,
}

/// One row of the precheck summary. `details` is display text only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub id: CheckId,
    pub name: &'static str,
    pub status: CheckStatus,
    pub details: String,
}

/// Amounts the invoice is compared against, derived from the repair items.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpectedTotals {
    pub parts: f64,
    pub labor: f64,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrecheckOutcome {
    pub verdict: PreCheckResult,
    pub checks: Vec<CheckResult>,
    pub expected_totals: ExpectedTotals,
}

impl PrecheckOutcome {
    pub fn passed(&self) -> usize {
        self.checks
            .iter()
            .filter(|check| check.status == CheckStatus::Success)
            .count()
    }
}

/// Stateless evaluator holding the precheck configuration.
#[derive(Debug, Clone, Default)]
pub struct PrecheckEngine {
    config: PrecheckConfig,
}

impl PrecheckEngine {
    pub fn new(config: PrecheckConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PrecheckConfig {
        &self.config
    }

    pub fn evaluate_check(&self, check: CheckId, record: &CaseRecord) -> CheckStatus {
        rules::evaluate(check, record, &self.config)
    }

    pub fn check_details(&self, check: CheckId, record: &CaseRecord) -> String {
        rules::details(check, record, &self.config)
    }

    pub fn summary(&self, record: &CaseRecord) -> Vec<CheckResult> {
        CheckId::ordered()
            .into_iter()
            .map(|id| CheckResult {
                id,
                name: id.name(),
                status: self.evaluate_check(id, record),
                details: self.check_details(id, record),
            })
            .collect()
    }

    pub fn expected_totals(&self, record: &CaseRecord) -> ExpectedTotals {
        rules::expected_totals(record, &self.config)
    }

    /// Whether an invoice amount is close enough to the expected one to count as a match.
    pub fn amounts_match(&self, actual: f64, expected: f64) -> bool {
        rules::within_tolerance(actual, expected, self.config.invoice_tolerance)
    }

    pub fn determine_case_approval_status(&self, record: &CaseRecord) -> PreCheckResult {
        self.evaluate(record).verdict
    }

    pub fn evaluate(&self, record: &CaseRecord) -> PrecheckOutcome {
        let checks = self.summary(record);
        let verdict = policy::decide_verdict(record, &checks);
        let expected_totals = self.expected_totals(record);

        let outcome = PrecheckOutcome {
            verdict,
            checks,
            expected_totals,
        };
        debug!(
            vrn = %record.vrn,
            verdict = verdict.as_str(),
            passed = outcome.passed(),
            "precheck evaluated"
        );
        outcome
    }
}
