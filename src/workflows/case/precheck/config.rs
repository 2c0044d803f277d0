use serde::{Deserialize, Serialize};

pub const DEFAULT_INVOICE_TOLERANCE: f64 = 5.0;
pub const DEFAULT_REQUIRED_PHOTOS: usize = 3;

/// Dials for the approval precheck.
///
/// `parts_categories` and `labor_categories` hold the category labels counted towards the
/// parts and labor subtotals on the invoice. The defaults are the bare words `parts` and
/// `labor`, which no repair category carries, so both subtotals come out as zero unless a
/// real mapping is configured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrecheckConfig {
    pub invoice_tolerance: f64,
    pub required_photo_count: usize,
    pub parts_categories: Vec<String>,
    pub labor_categories: Vec<String>,
}

impl Default for PrecheckConfig {
    fn default() -> Self {
        Self {
            invoice_tolerance: DEFAULT_INVOICE_TOLERANCE,
            required_photo_count: DEFAULT_REQUIRED_PHOTOS,
            parts_categories: vec!["parts".to_string()],
            labor_categories: vec!["labor".to_string()],
        }
    }
}
