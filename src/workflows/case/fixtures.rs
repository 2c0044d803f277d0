use chrono::NaiveDate;

use super::domain::{
    Attachment, CaseRecord, ClaimForm, ClaimFormAction, CoverageCheck, EstimateConfidence,
    GlassType, InvoiceOcrData, Owner, Photo, PhotoKind, PriceEstimate, RepairCategory,
    RepairItem, Vehicle, VrnLookup,
};

pub(crate) fn damage_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date")
}

pub(crate) fn vehicle() -> Vehicle {
    Vehicle {
        vrn: "EL12345".to_string(),
        make: "Volvo".to_string(),
        model: "XC60".to_string(),
        year: 2021,
        color: "Silver".to_string(),
        vin: "YV1UZ8256M1234567".to_string(),
    }
}

pub(crate) fn owner() -> Owner {
    Owner {
        name: "Ingrid Solberg".to_string(),
        address: "Storgata 12, 0155 Oslo".to_string(),
        phone: "+47 912 34 567".to_string(),
        email: "ingrid.solberg@example.no".to_string(),
    }
}

pub(crate) fn covered() -> CoverageCheck {
    CoverageCheck {
        covered: true,
        coverage_amount: 500.0,
        deductible: 250.0,
        message: "Glass damage covered under comprehensive policy".to_string(),
        insurance_company: "If Skadeforsikring".to_string(),
    }
}

pub(crate) fn price_estimate() -> PriceEstimate {
    PriceEstimate {
        min_price: 380.0,
        max_price: 520.0,
        estimated_price: 440.0,
        confidence: EstimateConfidence::High,
        factors: vec!["OEM glass available".to_string()],
    }
}

pub(crate) fn confirmed_lookup() -> VrnLookup {
    VrnLookup {
        vrn: "EL12345".to_string(),
        damage_date: Some(damage_date()),
        insurance_company: "If Skadeforsikring".to_string(),
        glass_type: Some(GlassType::Windscreen),
        vehicle: Some(vehicle()),
        owner: Some(owner()),
        existing_case: None,
        coverage_check: Some(covered()),
        price_estimate: Some(price_estimate()),
        vrn_confirmed: true,
    }
}

pub(crate) fn claim_form() -> ClaimForm {
    ClaimForm {
        id: "CF-2025-0042".to_string(),
        vrn: "EL12345".to_string(),
        description: "Stone chip spread into a crack across the driver side".to_string(),
        exists: true,
        damage_date: Some(damage_date()),
        location: Some("E18 near Sandvika".to_string()),
        insurance_company: Some("If Skadeforsikring".to_string()),
        glass_type: Some(GlassType::Windscreen),
    }
}

pub(crate) fn item(id: &str, category: RepairCategory, quantity: u32, unit_price: f64) -> RepairItem {
    RepairItem {
        id: id.to_string(),
        category,
        article_number: None,
        quantity,
        unit_price,
        discount: 0.0,
        suggested: false,
    }
}

/// Windscreen job totalling 440.
pub(crate) fn repair_items() -> Vec<RepairItem> {
    vec![
        item("1", RepairCategory::Glass, 1, 280.0),
        item("2", RepairCategory::Adhesive, 1, 25.0),
        item("3", RepairCategory::FittingLabor, 1, 120.0),
        item("4", RepairCategory::EnvironmentalFee, 1, 15.0),
    ]
}

pub(crate) fn photo(id: &str, kind: PhotoKind) -> Photo {
    Photo {
        id: id.to_string(),
        kind: Some(kind),
        file: Attachment::new(format!("{id}.jpg"), "image/jpeg", 512_000),
        preview: format!("blob:{id}"),
    }
}

pub(crate) fn photos() -> Vec<Photo> {
    vec![
        photo("p1", PhotoKind::Overview),
        photo("p2", PhotoKind::GlassCloseup),
        photo("p3", PhotoKind::DamageCloseup),
    ]
}

pub(crate) fn invoice() -> Attachment {
    Attachment::new("invoice-10042.pdf", "application/pdf", 88_000)
}

/// OCR figures for the default repair items. Parts and labor read as zero, matching the
/// default category breakdown.
pub(crate) fn ocr(total_amount: f64) -> InvoiceOcrData {
    InvoiceOcrData {
        parts_total: 0.0,
        labor_total: 0.0,
        total_amount,
        invoice_number: Some("10042".to_string()),
        invoice_date: NaiveDate::from_ymd_opt(2025, 3, 21),
        company_name: Some("Bilglass Sandvika AS".to_string()),
        kid_number: Some("0010042".to_string()),
        due_date: NaiveDate::from_ymd_opt(2025, 4, 4),
    }
}

/// A case on which every precheck passes.
pub(crate) fn approvable_record() -> CaseRecord {
    let lookup = confirmed_lookup();
    CaseRecord {
        vrn: lookup.vrn,
        damage_date: lookup.damage_date,
        insurance_company: lookup.insurance_company,
        glass_type: lookup.glass_type,
        vehicle: lookup.vehicle,
        owner: lookup.owner,
        coverage_check: lookup.coverage_check,
        price_estimate: lookup.price_estimate,
        vrn_confirmed: true,
        claim_form: Some(claim_form()),
        claim_form_action_taken: Some(ClaimFormAction::Continued),
        repair_items: repair_items(),
        parts_labor_confirmed: true,
        photos: photos(),
        photos_complete: true,
        invoice: Some(invoice()),
        ocr_invoice_data: Some(ocr(440.0)),
        ..CaseRecord::default()
    }
}
