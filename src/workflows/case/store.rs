use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use super::domain::{
    AdditionalClaimInfo, Attachment, CaseRecord, ClaimForm, ClaimFormAction, InvoiceOcrData,
    Photo, PreCheckResult, RepairItem, StepId, VrnLookup,
};

/// Owns the case record for one wizard run.
///
/// Every update swaps in a fresh record, so a snapshot handed out earlier keeps the values it
/// had. Updates do not validate; callers check ranges and cross-field rules before calling in.
#[derive(Debug, Clone, Default)]
pub struct CaseStore {
    current: Arc<CaseRecord>,
}

impl CaseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_record(record: CaseRecord) -> Self {
        Self {
            current: Arc::new(record),
        }
    }

    pub fn record(&self) -> &CaseRecord {
        &self.current
    }

    pub fn snapshot(&self) -> Arc<CaseRecord> {
        Arc::clone(&self.current)
    }

    fn patch(&mut self, group: &'static str, apply: impl FnOnce(&mut CaseRecord)) {
        let mut next = CaseRecord::clone(&self.current);
        apply(&mut next);
        self.current = Arc::new(next);
        debug!(group, "case record updated");
    }

    pub fn update_vrn_data(&mut self, lookup: VrnLookup) {
        self.patch("vrn_lookup", |record| {
            record.vrn = lookup.vrn;
            record.damage_date = lookup.damage_date;
            record.insurance_company = lookup.insurance_company;
            record.glass_type = lookup.glass_type;
            record.vehicle = lookup.vehicle;
            record.owner = lookup.owner;
            record.existing_case = lookup.existing_case;
            record.coverage_check = lookup.coverage_check;
            record.price_estimate = lookup.price_estimate;
            record.vrn_confirmed = lookup.vrn_confirmed;
        });
    }

    /// `None` for the acceptance flag keeps whatever was recorded before.
    pub fn update_claim_form(
        &mut self,
        claim_form: Option<ClaimForm>,
        customer_accepted_no_coverage: Option<bool>,
    ) {
        self.patch("claim_form", |record| {
            record.claim_form = claim_form;
            if let Some(accepted) = customer_accepted_no_coverage {
                record.customer_accepted_no_coverage = accepted;
            }
        });
    }

    pub fn update_additional_claim_info(&mut self, info: AdditionalClaimInfo) {
        self.patch("additional_claim_info", |record| {
            record.additional_claim_info = info;
        });
    }

    pub fn update_photos(
        &mut self,
        photos: Vec<Photo>,
        photos_complete: bool,
        photos_skipped: Option<bool>,
        photos_skipped_reason: Option<String>,
    ) {
        self.patch("photos", |record| {
            record.photos = photos;
            record.photos_complete = photos_complete;
            if let Some(skipped) = photos_skipped {
                record.photos_skipped = skipped;
            }
            if let Some(reason) = photos_skipped_reason {
                record.photos_skipped_reason = reason;
            }
        });
    }

    /// Replaces the whole list; callers pass the full set of items, not a delta.
    pub fn update_repair_items(&mut self, items: Vec<RepairItem>) {
        self.patch("repair_items", |record| {
            record.repair_items = items;
        });
    }

    pub fn update_parts_labor_confirmation(&mut self, confirmed: bool) {
        self.patch("parts_labor_confirmation", |record| {
            record.parts_labor_confirmed = confirmed;
        });
    }

    pub fn update_calibration_data(
        &mut self,
        needed: bool,
        signature: Option<String>,
        document: Option<Attachment>,
    ) {
        self.patch("calibration", |record| {
            record.calibration_needed = needed;
            if let Some(signature) = signature {
                record.calibration_signature = signature;
            }
            if let Some(document) = document {
                record.calibration_document = Some(document);
            }
        });
    }

    /// Drops the calibration document; `update_calibration_data` can only replace it.
    pub fn clear_calibration_document(&mut self) {
        self.patch("calibration", |record| {
            record.calibration_document = None;
        });
    }

    pub fn update_invoice(&mut self, invoice: Attachment) {
        self.patch("invoice", |record| {
            record.invoice = Some(invoice);
        });
    }

    pub fn update_ocr_invoice_data(&mut self, data: InvoiceOcrData) {
        self.patch("ocr_invoice_data", |record| {
            record.ocr_invoice_data = Some(data);
        });
    }

    pub fn update_pre_check(&mut self, result: PreCheckResult) {
        self.patch("pre_check", |record| {
            record.pre_check_result = Some(result);
        });
    }

    pub fn update_job_performed_date(&mut self, date: NaiveDate) {
        self.patch("job_performed_date", |record| {
            record.job_performed_date = Some(date);
        });
    }

    pub fn update_claim_form_action_taken(&mut self, action: ClaimFormAction) {
        self.patch("claim_form_action", |record| {
            record.claim_form_action_taken = Some(action);
        });
    }

    /// Appends unconditionally. Deduplication is the caller's job.
    pub fn add_skipped_item(&mut self, step: StepId) {
        self.patch("skipped_items", |record| {
            record.skipped_items.push(step);
        });
    }

    pub fn remove_skipped_item(&mut self, step: StepId) {
        self.patch("skipped_items", |record| {
            record.skipped_items.retain(|item| *item != step);
        });
    }

    /// Clears everything that hangs off the VRN lookup inputs. The VRN and the vehicle/owner
    /// lookup results stay in place.
    pub fn reset_dependent_case_data(&mut self) {
        self.patch("reset_dependent", |record| {
            record.damage_date = None;
            record.insurance_company = String::new();
            record.glass_type = None;
            record.coverage_check = None;
            record.price_estimate = None;
            record.claim_form = None;
            record.additional_claim_info = AdditionalClaimInfo::default();
            record.photos = Vec::new();
            record.repair_items = Vec::new();
            record.invoice = None;
            record.ocr_invoice_data = None;
            record.pre_check_result = None;
            record.skipped_items = Vec::new();
            record.parts_labor_confirmed = false;
            record.customer_accepted_no_coverage = false;
            record.calibration_needed = false;
            record.calibration_signature = String::new();
            record.calibration_document = None;
            record.photos_skipped = false;
            record.photos_skipped_reason = String::new();
            record.job_performed_date = None;
            record.claim_form_action_taken = None;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::case::domain::{GlassType, RepairCategory};

    fn repair_item(id: &str) -> RepairItem {
        RepairItem {
            id: id.to_string(),
            category: RepairCategory::Glass,
            article_number: Some("WS-001".to_string()),
            quantity: 1,
            unit_price: 280.0,
            discount: 0.0,
            suggested: true,
        }
    }

    fn photo(id: &str) -> Photo {
        Photo {
            id: id.to_string(),
            kind: None,
            file: Attachment::new(format!("{id}.jpg"), "image/jpeg", 1024),
            preview: String::new(),
        }
    }

    #[test]
    fn snapshots_are_not_affected_by_later_updates() {
        let mut store = CaseStore::new();
        let before = store.snapshot();

        store.update_repair_items(vec![repair_item("1")]);

        assert!(before.repair_items.is_empty());
        assert_eq!(store.record().repair_items.len(), 1);
    }

    #[test]
    fn add_skipped_item_does_not_deduplicate() {
        let mut store = CaseStore::new();
        store.add_skipped_item(StepId::Photos);
        store.add_skipped_item(StepId::Photos);

        assert_eq!(
            store.record().skipped_items,
            vec![StepId::Photos, StepId::Photos]
        );

        store.remove_skipped_item(StepId::Photos);
        assert!(store.record().skipped_items.is_empty());
    }

    #[test]
    fn optional_arguments_keep_previous_values() {
        let mut store = CaseStore::new();
        store.update_claim_form(None, Some(true));
        store.update_claim_form(None, None);
        assert!(store.record().customer_accepted_no_coverage);

        store.update_photos(Vec::new(), false, Some(true), Some("Car in car wash".to_string()));
        store.update_photos(vec![photo("a")], true, None, None);
        assert!(store.record().photos_skipped);
        assert_eq!(store.record().photos_skipped_reason, "Car in car wash");

        let document = Attachment::new("calibration-cert.pdf", "application/pdf", 2048);
        store.update_calibration_data(true, Some("K. Berg".to_string()), Some(document.clone()));
        store.update_calibration_data(false, None, None);
        assert!(!store.record().calibration_needed);
        assert_eq!(store.record().calibration_signature, "K. Berg");
        assert_eq!(store.record().calibration_document, Some(document));

        store.clear_calibration_document();
        assert!(store.record().calibration_document.is_none());
    }

    #[test]
    fn reset_preserves_vrn_and_clears_dependents() {
        let mut store = CaseStore::new();
        store.update_vrn_data(VrnLookup {
            vrn: "EL12345".to_string(),
            damage_date: NaiveDate::from_ymd_opt(2025, 3, 14),
            insurance_company: "If Skadeforsikring".to_string(),
            glass_type: Some(GlassType::Windscreen),
            vrn_confirmed: true,
            ..VrnLookup::default()
        });
        store.update_repair_items(vec![repair_item("1")]);
        store.update_photos(vec![photo("a"), photo("b")], true, None, None);
        store.update_pre_check(PreCheckResult::AutoApproved);
        store.add_skipped_item(StepId::Invoice);
        store.update_claim_form_action_taken(ClaimFormAction::Continued);
        store.update_job_performed_date(NaiveDate::from_ymd_opt(2025, 3, 20).expect("valid"));

        store.reset_dependent_case_data();
        let record = store.record();

        assert_eq!(record.vrn, "EL12345");
        assert!(record.vrn_confirmed);
        assert!(record.damage_date.is_none());
        assert!(record.insurance_company.is_empty());
        assert!(record.glass_type.is_none());
        assert!(record.repair_items.is_empty());
        assert!(record.photos.is_empty());
        assert!(record.pre_check_result.is_none());
        assert!(record.skipped_items.is_empty());
        assert!(record.claim_form_action_taken.is_none());
        assert!(record.job_performed_date.is_none());
    }
}
