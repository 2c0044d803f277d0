//! Repair items from workshop price-list exports.
//!
//! Expected headers: `Category, Article Number, Quantity, Unit Price, Discount`. The
//! discount column may be missing entirely; a blank article number is treated as absent.

mod parser;

use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::workflows::case::{RepairCategory, RepairItem};
use parser::RawRepairRow;

#[derive(Debug, thiserror::Error)]
pub enum RepairImportError {
    #[error("failed to read repair item export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid repair item CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: unknown repair category '{value}'")]
    UnknownCategory { row: usize, value: String },
    #[error("row {row}: {column} '{value}' is not a valid number")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },
    #[error("row {row}: unit price {value} cannot be negative")]
    NegativePrice { row: usize, value: f64 },
    #[error("row {row}: discount {value} must be between 0 and 100")]
    InvalidDiscount { row: usize, value: f64 },
}

pub struct RepairItemImporter;

impl RepairItemImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<RepairItem>, RepairImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<RepairItem>, RepairImportError> {
        let items = parser::parse_rows(reader)?
            .into_iter()
            .map(into_item)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(items = items.len(), "repair items imported");
        Ok(items)
    }
}

fn into_item(raw: RawRepairRow) -> Result<RepairItem, RepairImportError> {
    let row = raw.row;
    let category = RepairCategory::from_label(&raw.category).ok_or_else(|| {
        RepairImportError::UnknownCategory {
            row,
            value: raw.category.clone(),
        }
    })?;

    let quantity = raw
        .quantity
        .parse::<u32>()
        .map_err(|_| RepairImportError::InvalidNumber {
            row,
            column: "Quantity",
            value: raw.quantity.clone(),
        })?;

    let unit_price = parse_amount(row, "Unit Price", &raw.unit_price)?;
    if unit_price < 0.0 {
        return Err(RepairImportError::NegativePrice {
            row,
            value: unit_price,
        });
    }

    let discount = match raw.discount.as_deref() {
        Some(value) => parse_amount(row, "Discount", value)?,
        None => 0.0,
    };
    if !(0.0..=100.0).contains(&discount) {
        return Err(RepairImportError::InvalidDiscount {
            row,
            value: discount,
        });
    }

    Ok(RepairItem {
        id: format!("import-{row}"),
        category,
        article_number: raw.article_number,
        quantity,
        unit_price,
        discount,
        suggested: false,
    })
}

/// Accepts a decimal comma as well as a point.
fn parse_amount(row: usize, column: &'static str, value: &str) -> Result<f64, RepairImportError> {
    value
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| RepairImportError::InvalidNumber {
            row,
            column,
            value: value.to_string(),
        })
}
