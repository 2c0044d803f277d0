use serde::Serialize;

use super::domain::{GlassType, RepairCategory, RepairItem};

pub const VAT_RATE: f64 = 0.25;

struct Suggestion {
    category: RepairCategory,
    article_number: &'static str,
    quantity: u32,
    unit_price: f64,
}

const fn suggestion(
    category: RepairCategory,
    article_number: &'static str,
    quantity: u32,
    unit_price: f64,
) -> Suggestion {
    Suggestion {
        category,
        article_number,
        quantity,
        unit_price,
    }
}

const WINDSCREEN: &[Suggestion] = &[
    suggestion(RepairCategory::Glass, "WS-001", 1, 280.0),
    suggestion(RepairCategory::Adhesive, "ADH-001", 1, 25.0),
    suggestion(RepairCategory::FittingLabor, "", 1, 120.0),
    suggestion(RepairCategory::EnvironmentalFee, "ENV-001", 1, 15.0),
];

const SIDE_WINDOW: &[Suggestion] = &[
    suggestion(RepairCategory::Glass, "SW-001", 1, 150.0),
    suggestion(RepairCategory::FittingLabor, "", 1, 80.0),
    suggestion(RepairCategory::EnvironmentalFee, "ENV-001", 1, 10.0),
];

const REAR_WINDOW: &[Suggestion] = &[
    suggestion(RepairCategory::Glass, "RW-001", 1, 220.0),
    suggestion(RepairCategory::Adhesive, "ADH-002", 1, 20.0),
    suggestion(RepairCategory::FittingLabor, "", 1, 100.0),
    suggestion(RepairCategory::EnvironmentalFee, "ENV-001", 1, 12.0),
];

const SUNROOF: &[Suggestion] = &[
    suggestion(RepairCategory::Glass, "SR-001", 1, 320.0),
    suggestion(RepairCategory::Accessories, "SR-SEAL-001", 1, 45.0),
    suggestion(RepairCategory::HourlyLabor, "", 2, 75.0),
    suggestion(RepairCategory::EnvironmentalFee, "ENV-001", 1, 15.0),
];

const FALLBACK: &[Suggestion] = &[
    suggestion(RepairCategory::Glass, "GL-001", 1, 200.0),
    suggestion(RepairCategory::FittingLabor, "", 1, 90.0),
];

/// Starting quote for a glass type. Unknown glass gets a generic glass-plus-fitting pair.
pub fn suggested_repair_items(glass_type: Option<GlassType>) -> Vec<RepairItem> {
    let (prefix, rows) = match glass_type {
        Some(GlassType::Windscreen) => ("ws", WINDSCREEN),
        Some(GlassType::SideWindow) => ("sw", SIDE_WINDOW),
        Some(GlassType::RearWindow) => ("rw", REAR_WINDOW),
        Some(GlassType::Sunroof) => ("sr", SUNROOF),
        None => ("gl", FALLBACK),
    };

    rows.iter()
        .enumerate()
        .map(|(index, row)| RepairItem {
            id: format!("suggested-{prefix}-{}", index + 1),
            category: row.category,
            article_number: if row.article_number.is_empty() {
                None
            } else {
                Some(row.article_number.to_string())
            },
            quantity: row.quantity,
            unit_price: row.unit_price,
            discount: 0.0,
            suggested: true,
        })
        .collect()
}

/// Quote totals as shown to the workshop, after VAT and the customer's deductible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RepairTotals {
    pub subtotal: f64,
    pub vat_amount: f64,
    pub total_with_vat: f64,
    pub deductible: f64,
    pub final_total: f64,
}

impl RepairTotals {
    pub fn calculate(items: &[RepairItem], deductible: f64) -> Self {
        let subtotal: f64 = items.iter().map(RepairItem::line_total).sum();
        let vat_amount = subtotal * VAT_RATE;
        let total_with_vat = subtotal + vat_amount;

        Self {
            subtotal,
            vat_amount,
            total_with_vat,
            deductible,
            final_total: total_with_vat - deductible,
        }
    }
}

/// Problems that keep the repair items from being accepted, one message per issue.
pub fn validate_repair_items(items: &[RepairItem]) -> Vec<String> {
    let mut errors = Vec::new();

    if items.is_empty() {
        errors.push("At least one repair item is required".to_string());
    }

    for (index, item) in items.iter().enumerate() {
        let position = index + 1;
        if item.quantity == 0 {
            errors.push(format!("Item {position}: Quantity must be greater than 0"));
        }
        if item.unit_price < 0.0 || !item.unit_price.is_finite() {
            errors.push(format!("Item {position}: Unit price cannot be negative"));
        }
        if !(0.0..=100.0).contains(&item.discount) {
            errors.push(format!("Item {position}: Discount must be between 0 and 100"));
        }
    }

    errors
}
