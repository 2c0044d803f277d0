use std::io::Cursor;
use std::sync::Arc;

use chrono::NaiveDate;
use glass_case::workflows::case::{
    Attachment, CaseRecord, CaseWizard, CheckId, CheckStatus, ClaimForm, ClaimFormAction,
    GlassType, InMemorySubmissionSink, InvoiceOcrData, Photo, PhotoKind, PreCheckResult,
    PrecheckConfig, PrecheckEngine, StepId, StepStatus, SubmissionOutcome, VrnLookup,
    WizardProgress,
};
use glass_case::workflows::repair_import::RepairItemImporter;
use serde_json::json;

const PRICE_LIST: &str = "Category,Article Number,Quantity,Unit Price,Discount\n\
Glass,WS-001,1,280,\n\
Rutelim,ADH-001,1,25,\n\
Arbeid monteringspris,,1,120,\n\
Miljøavgift,ENV-001,1,15,\n";

fn damage_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid damage date")
}

fn lookup(glass_type: GlassType) -> VrnLookup {
    serde_json::from_value(json!({
        "vrn": "EL12345",
        "damage_date": "2025-03-14",
        "insurance_company": "If Skadeforsikring",
        "glass_type": glass_type.label(),
        "vehicle": {
            "vrn": "EL12345",
            "make": "Volvo",
            "model": "XC60",
            "year": 2021,
            "color": "Silver",
            "vin": "YV1UZ8256M1234567"
        },
        "owner": {
            "name": "Ingrid Solberg",
            "address": "Storgata 12, 0155 Oslo",
            "phone": "+47 912 34 567",
            "email": "ingrid.solberg@example.no"
        },
        "coverage_check": {
            "covered": true,
            "coverage_amount": 500.0,
            "deductible": 250.0,
            "message": "Glass damage covered under comprehensive policy",
            "insurance_company": "If Skadeforsikring"
        },
        "price_estimate": {
            "min_price": 380.0,
            "max_price": 520.0,
            "estimated_price": 440.0,
            "confidence": "high"
        },
        "vrn_confirmed": true
    }))
    .expect("lookup fixture parses")
}

fn claim_form() -> ClaimForm {
    ClaimForm {
        id: "CF-2025-0042".to_string(),
        vrn: "EL12345".to_string(),
        description: "Crack across the driver side".to_string(),
        exists: true,
        damage_date: Some(damage_date()),
        location: None,
        insurance_company: Some("If Skadeforsikring".to_string()),
        glass_type: Some(GlassType::Windscreen),
    }
}

fn photos() -> Vec<Photo> {
    [
        ("p1", PhotoKind::Overview),
        ("p2", PhotoKind::GlassCloseup),
        ("p3", PhotoKind::DamageCloseup),
    ]
    .into_iter()
    .map(|(id, kind)| Photo {
        id: id.to_string(),
        kind: Some(kind),
        file: Attachment::new(format!("{id}.jpg"), "image/jpeg", 400_000),
        preview: String::new(),
    })
    .collect()
}

fn ocr(parts_total: f64, labor_total: f64, total_amount: f64) -> InvoiceOcrData {
    InvoiceOcrData {
        parts_total,
        labor_total,
        total_amount,
        invoice_number: Some("10042".to_string()),
        invoice_date: None,
        company_name: Some("Bilglass Sandvika AS".to_string()),
        kid_number: None,
        due_date: None,
    }
}

fn mapped_engine() -> Arc<PrecheckEngine> {
    Arc::new(PrecheckEngine::new(PrecheckConfig {
        parts_categories: vec![
            "Glass".to_string(),
            "Rutelim".to_string(),
            "Miljøavgift".to_string(),
        ],
        labor_categories: vec!["Arbeid monteringspris".to_string()],
        ..PrecheckConfig::default()
    }))
}

#[test]
fn imported_price_list_flows_through_wizard_to_auto_approval() {
    let sink = Arc::new(InMemorySubmissionSink::default());
    let mut wizard = CaseWizard::new(mapped_engine(), Arc::clone(&sink));

    wizard
        .confirm_vehicle(lookup(GlassType::Windscreen))
        .expect("lookup applied");
    wizard.next().expect("to claim form");
    wizard
        .record_claim_form(Some(claim_form()), ClaimFormAction::Continued, Some(false))
        .expect("claim form recorded");
    wizard.next().expect("to parts and labor");

    let items =
        RepairItemImporter::from_reader(Cursor::new(PRICE_LIST)).expect("price list imports");
    let store = wizard.store_mut().expect("case open");
    store.update_repair_items(items);
    store.update_parts_labor_confirmation(true);
    wizard.next().expect("to photos");

    wizard
        .store_mut()
        .expect("case open")
        .update_photos(photos(), true, None, None);
    wizard.next().expect("to invoice");

    let store = wizard.store_mut().expect("case open");
    store.update_invoice(Attachment::new("invoice.pdf", "application/pdf", 90_000));
    store.update_ocr_invoice_data(ocr(318.0, 122.0, 442.0));

    assert!(wizard
        .steps()
        .iter()
        .all(|step| step.status == StepStatus::Complete));

    let progress = wizard.next().expect("case submitted");
    assert_eq!(
        progress,
        WizardProgress::Finished(SubmissionOutcome::Submitted)
    );

    let submissions = sink.submissions();
    assert_eq!(submissions.len(), 1);
    let record = &submissions[0].record;
    assert_eq!(record.pre_check_result, Some(PreCheckResult::AutoApproved));
    assert_eq!(record.repair_items.len(), 4);
    assert_eq!(record.repair_items[0].id, "import-1");
}

#[test]
fn invoice_breakdown_mismatch_sends_case_to_review() {
    let engine = mapped_engine();
    let mut record: CaseRecord = CaseRecord {
        repair_items: RepairItemImporter::from_reader(Cursor::new(PRICE_LIST))
            .expect("price list imports"),
        invoice: Some(Attachment::new("invoice.pdf", "application/pdf", 90_000)),
        ocr_invoice_data: Some(ocr(200.0, 240.0, 440.0)),
        ..CaseRecord::default()
    };

    assert_eq!(
        engine.evaluate_check(CheckId::InvoiceValidation, &record),
        CheckStatus::Error
    );

    record.ocr_invoice_data = Some(ocr(320.0, 120.0, 440.0));
    assert_eq!(
        engine.evaluate_check(CheckId::InvoiceValidation, &record),
        CheckStatus::Success
    );
    assert_eq!(
        engine.determine_case_approval_status(&record),
        PreCheckResult::ManualReview
    );
}

#[test]
fn changing_glass_type_after_confirmation_discards_downstream_work() {
    let mut wizard = CaseWizard::new(
        Arc::new(PrecheckEngine::default()),
        Arc::new(InMemorySubmissionSink::default()),
    );
    wizard
        .confirm_vehicle(lookup(GlassType::Windscreen))
        .expect("lookup applied");
    wizard
        .record_claim_form(Some(claim_form()), ClaimFormAction::Continued, None)
        .expect("claim form recorded");
    wizard
        .store_mut()
        .expect("case open")
        .update_photos(photos(), true, None, None);

    wizard
        .confirm_vehicle(lookup(GlassType::Sunroof))
        .expect("lookup applied");

    let record = wizard.record();
    assert_eq!(record.glass_type, Some(GlassType::Sunroof));
    assert!(record.claim_form.is_none());
    assert!(record.photos.is_empty());
    assert!(record.coverage_check.is_some());
    assert_eq!(wizard.step_status(StepId::ClaimForm), StepStatus::Incomplete);
}

#[test]
fn customer_paying_without_coverage_still_needs_review() {
    let record: CaseRecord = serde_json::from_value(json!({
        "vrn": "EL12345",
        "vrn_confirmed": true,
        "customer_accepted_no_coverage": true,
        "skipped_items": ["photos", "invoice"]
    }))
    .expect("case parses");

    let outcome = PrecheckEngine::default().evaluate(&record);

    assert_eq!(outcome.verdict, PreCheckResult::ManualReview);
    let coverage = outcome
        .checks
        .iter()
        .find(|check| check.id == CheckId::CoverageCheck)
        .expect("coverage check present");
    assert_eq!(coverage.status, CheckStatus::Success);
    assert_eq!(
        coverage.details,
        "Customer accepted to pay without insurance coverage"
    );
}
