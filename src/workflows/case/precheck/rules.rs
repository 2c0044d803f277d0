use super::super::domain::{CaseRecord, ClaimFormAction, InvoiceOcrData};
use super::config::PrecheckConfig;
use super::{CheckId, CheckStatus, ExpectedTotals};

pub(crate) fn expected_totals(record: &CaseRecord, config: &PrecheckConfig) -> ExpectedTotals {
    ExpectedTotals {
        parts: category_total(record, &config.parts_categories),
        labor: category_total(record, &config.labor_categories),
        total: record.expected_total(),
    }
}

fn category_total(record: &CaseRecord, labels: &[String]) -> f64 {
    record
        .repair_items
        .iter()
        .filter(|item| labels.iter().any(|label| label == item.category.label()))
        .map(|item| item.line_total())
        .sum()
}

/// Absolute band, inclusive at the edge.
pub(crate) fn within_tolerance(actual: f64, expected: f64, tolerance: f64) -> bool {
    (actual - expected).abs() <= tolerance
}

struct InvoiceComparison {
    parts: bool,
    labor: bool,
    total: bool,
}

impl InvoiceComparison {
    fn new(ocr: &InvoiceOcrData, expected: &ExpectedTotals, tolerance: f64) -> Self {
        Self {
            parts: within_tolerance(ocr.parts_total, expected.parts, tolerance),
            labor: within_tolerance(ocr.labor_total, expected.labor, tolerance),
            total: within_tolerance(ocr.total_amount, expected.total, tolerance),
        }
    }

    fn all_match(&self) -> bool {
        self.parts && self.labor && self.total
    }
}

fn vehicle_data_present(record: &CaseRecord) -> bool {
    record.vehicle.is_some()
        && record.owner.is_some()
        && record.coverage_check.is_some()
        && record.price_estimate.is_some()
        && record.vrn_confirmed
}

fn claim_form_continued(record: &CaseRecord) -> bool {
    record.claim_form.is_some()
        && record.claim_form_action_taken == Some(ClaimFormAction::Continued)
}

pub(crate) fn evaluate(check: CheckId, record: &CaseRecord, config: &PrecheckConfig) -> CheckStatus {
    let passed = match check {
        CheckId::VehicleData => vehicle_data_present(record),
        CheckId::ClaimForm => claim_form_continued(record),
        CheckId::PhotoQuality => record.photos.len() == config.required_photo_count,
        CheckId::PartsPricing => !record.repair_items.is_empty() && record.parts_labor_confirmed,
        CheckId::InvoiceValidation => match (&record.invoice, &record.ocr_invoice_data) {
            (Some(_), Some(ocr)) => {
                let expected = expected_totals(record, config);
                InvoiceComparison::new(ocr, &expected, config.invoice_tolerance).all_match()
            }
            _ => false,
        },
        CheckId::CoverageCheck => {
            record.customer_accepted_no_coverage
                || record
                    .coverage_check
                    .as_ref()
                    .map(|coverage| coverage.covered)
                    .unwrap_or(false)
        }
    };

    if passed {
        CheckStatus::Success
    } else {
        CheckStatus::Error
    }
}

pub(crate) fn details(check: CheckId, record: &CaseRecord, config: &PrecheckConfig) -> String {
    match check {
        CheckId::VehicleData => {
            if vehicle_data_present(record) {
                "Vehicle, owner, coverage, and price estimate data validated".to_string()
            } else {
                "Missing vehicle, owner, coverage, or price estimate information, or VRN not confirmed"
                    .to_string()
            }
        }
        CheckId::ClaimForm => {
            if claim_form_continued(record) {
                "Claim form processed and continued".to_string()
            } else {
                "Claim form missing or not continued".to_string()
            }
        }
        CheckId::PhotoQuality => format!(
            "{}/{} required photos uploaded",
            record.photos.len(),
            config.required_photo_count
        ),
        CheckId::PartsPricing => {
            if record.repair_items.is_empty() {
                "Repair items missing".to_string()
            } else if !record.parts_labor_confirmed {
                "Repair items data not confirmed".to_string()
            } else {
                format!("{} repair items confirmed", record.repair_items.len())
            }
        }
        CheckId::InvoiceValidation => {
            let Some(ocr) = record.ocr_invoice_data.as_ref() else {
                return if record.invoice.is_none() {
                    "Invoice not uploaded".to_string()
                } else {
                    "OCR processing incomplete".to_string()
                };
            };
            if record.invoice.is_none() {
                return "Invoice not uploaded".to_string();
            }

            let expected = expected_totals(record, config);
            let comparison = InvoiceComparison::new(ocr, &expected, config.invoice_tolerance);
            if !comparison.total {
                format!(
                    "Invoice amounts do not match expected totals (invoice {:.2}, expected {:.2})",
                    ocr.total_amount, expected.total
                )
            } else if !comparison.all_match() {
                format!(
                    "Invoice parts/labor breakdown does not match (parts {:.2} vs {:.2}, labor {:.2} vs {:.2})",
                    ocr.parts_total, expected.parts, ocr.labor_total, expected.labor
                )
            } else {
                "Invoice validated and amounts match".to_string()
            }
        }
        CheckId::CoverageCheck => {
            if record.customer_accepted_no_coverage {
                return "Customer accepted to pay without insurance coverage".to_string();
            }
            match &record.coverage_check {
                None => "Coverage check not performed".to_string(),
                Some(coverage) if !coverage.covered => "Coverage not confirmed".to_string(),
                Some(_) => "Coverage confirmed".to_string(),
            }
        }
    }
}
