use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Glass positions a workshop can replace or repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GlassType {
    Windscreen,
    #[serde(rename = "Side Window")]
    SideWindow,
    #[serde(rename = "Rear Window")]
    RearWindow,
    Sunroof,
}

impl GlassType {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Windscreen,
            Self::SideWindow,
            Self::RearWindow,
            Self::Sunroof,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Windscreen => "Windscreen",
            Self::SideWindow => "Side Window",
            Self::RearWindow => "Rear Window",
            Self::Sunroof => "Sunroof",
        }
    }

    /// Case-insensitive match against the display label.
    pub fn from_label(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::ordered()
            .into_iter()
            .find(|glass| glass.label().eq_ignore_ascii_case(trimmed))
    }
}

/// Vehicle details returned by the registry lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub vrn: String,
    pub make: String,
    pub model: String,
    pub year: u16,
    pub color: String,
    pub vin: String,
}

/// Registered keeper of the vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExistingCaseStatus {
    Open,
    Pending,
    Closed,
}

/// Prior case already registered against the same VRN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingCase {
    pub id: String,
    pub vrn: String,
    pub status: ExistingCaseStatus,
    pub created_date: NaiveDate,
    pub description: String,
}

/// Insurer coverage answer for the damage being claimed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageCheck {
    pub covered: bool,
    pub coverage_amount: f64,
    pub deductible: f64,
    pub message: String,
    pub insurance_company: String,
}

impl CoverageCheck {
    /// Coverage the insurer could not settle automatically and flagged for a person to review.
    pub fn needs_manual_review(&self) -> bool {
        self.message.contains("manual review")
    }

    /// Covered outright, or pending insurer review. Either lets the case move past lookup.
    pub fn is_acceptable(&self) -> bool {
        self.covered || self.needs_manual_review()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateConfidence {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEstimate {
    pub min_price: f64,
    pub max_price: f64,
    pub estimated_price: f64,
    pub confidence: EstimateConfidence,
    #[serde(default)]
    pub factors: Vec<String>,
}

/// Insurer claim form, either found on file or drafted during intake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimForm {
    pub id: String,
    pub vrn: String,
    pub description: String,
    pub exists: bool,
    #[serde(default)]
    pub damage_date: Option<NaiveDate>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub insurance_company: Option<String>,
    #[serde(default)]
    pub glass_type: Option<GlassType>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalClaimInfo {
    #[serde(default)]
    pub cause_of_damage: Option<String>,
    #[serde(default)]
    pub wear_and_tear: Option<String>,
    #[serde(default)]
    pub place: Option<String>,
}

/// What the workshop chose to do once the claim form step finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimFormAction {
    Continued,
    Drafted,
    Stopped,
    Submitted,
}

/// Line item categories used on workshop invoices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RepairCategory {
    Glass,
    #[serde(rename = "Tilbehør")]
    Accessories,
    #[serde(rename = "Sensor / Sensorgel")]
    SensorGel,
    #[serde(rename = "Arbeid monteringspris")]
    FittingLabor,
    #[serde(rename = "Arbeid Timepris")]
    HourlyLabor,
    #[serde(rename = "Rutelim")]
    Adhesive,
    #[serde(rename = "Verkstedmateriell")]
    WorkshopMaterials,
    #[serde(rename = "Miljøavgift")]
    EnvironmentalFee,
    #[serde(rename = "Statisk Kalibrering")]
    StaticCalibration,
    #[serde(rename = "Dynamisk Kalibrering")]
    DynamicCalibration,
    #[serde(rename = "Lys/regnsensor Kalibrering")]
    LightRainSensorCalibration,
    #[serde(rename = "Kombinert Kalibrering")]
    CombinedCalibration,
    #[serde(rename = "Dab-antenne")]
    DabAntenna,
    #[serde(rename = "Annet")]
    Other,
    #[serde(rename = "Fraktsone 1")]
    FreightZone1,
    #[serde(rename = "Fraktsone 2")]
    FreightZone2,
    #[serde(rename = "Fraktsone 3")]
    FreightZone3,
    #[serde(rename = "Fraktsone 4")]
    FreightZone4,
    #[serde(rename = "Glass med avvikende rabatt")]
    GlassWithDeviatingDiscount,
}

impl RepairCategory {
    pub const fn ordered() -> [Self; 19] {
        [
            Self::Glass,
            Self::Accessories,
            Self::SensorGel,
            Self::FittingLabor,
            Self::HourlyLabor,
            Self::Adhesive,
            Self::WorkshopMaterials,
            Self::EnvironmentalFee,
            Self::StaticCalibration,
            Self::DynamicCalibration,
            Self::LightRainSensorCalibration,
            Self::CombinedCalibration,
            Self::DabAntenna,
            Self::Other,
            Self::FreightZone1,
            Self::FreightZone2,
            Self::FreightZone3,
            Self::FreightZone4,
            Self::GlassWithDeviatingDiscount,
        ]
    }

    /// Label as printed on invoices and price lists.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Glass => "Glass",
            Self::Accessories => "Tilbehør",
            Self::SensorGel => "Sensor / Sensorgel",
            Self::FittingLabor => "Arbeid monteringspris",
            Self::HourlyLabor => "Arbeid Timepris",
            Self::Adhesive => "Rutelim",
            Self::WorkshopMaterials => "Verkstedmateriell",
            Self::EnvironmentalFee => "Miljøavgift",
            Self::StaticCalibration => "Statisk Kalibrering",
            Self::DynamicCalibration => "Dynamisk Kalibrering",
            Self::LightRainSensorCalibration => "Lys/regnsensor Kalibrering",
            Self::CombinedCalibration => "Kombinert Kalibrering",
            Self::DabAntenna => "Dab-antenne",
            Self::Other => "Annet",
            Self::FreightZone1 => "Fraktsone 1",
            Self::FreightZone2 => "Fraktsone 2",
            Self::FreightZone3 => "Fraktsone 3",
            Self::FreightZone4 => "Fraktsone 4",
            Self::GlassWithDeviatingDiscount => "Glass med avvikende rabatt",
        }
    }

    pub fn from_label(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::ordered()
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(trimmed))
    }
}

/// One priced line on the repair quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairItem {
    pub id: String,
    pub category: RepairCategory,
    #[serde(default)]
    pub article_number: Option<String>,
    pub quantity: u32,
    pub unit_price: f64,
    /// Percentage, 0 to 100.
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub suggested: bool,
}

impl RepairItem {
    pub fn line_total(&self) -> f64 {
        let subtotal = f64::from(self.quantity) * self.unit_price;
        subtotal - subtotal * (self.discount / 100.0)
    }
}

/// Opaque reference to an uploaded file. Storage and transfer happen elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
}

impl Attachment {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        size_bytes: u64,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            size_bytes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoKind {
    Overview,
    GlassCloseup,
    DamageCloseup,
    ExtraDocumentation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    pub kind: Option<PhotoKind>,
    pub file: Attachment,
    #[serde(default)]
    pub preview: String,
}

/// Figures read off the uploaded invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceOcrData {
    pub parts_total: f64,
    pub labor_total: f64,
    pub total_amount: f64,
    #[serde(default)]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub invoice_date: Option<NaiveDate>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub kid_number: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

/// Wizard steps, in the order they are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepId {
    VrnLookup,
    ClaimForm,
    PartsLabor,
    Photos,
    Invoice,
}

impl StepId {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::VrnLookup,
            Self::ClaimForm,
            Self::PartsLabor,
            Self::Photos,
            Self::Invoice,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VrnLookup => "vrn-lookup",
            Self::ClaimForm => "claim-form",
            Self::PartsLabor => "parts-labor",
            Self::Photos => "photos",
            Self::Invoice => "invoice",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::VrnLookup => "VRN Lookup",
            Self::ClaimForm => "Claim Form",
            Self::PartsLabor => "Parts & Labor",
            Self::Photos => "Photos",
            Self::Invoice => "Invoice",
        }
    }

    pub const fn required(self) -> bool {
        !matches!(self, Self::Photos)
    }
}

/// Approval verdict written back onto the case at submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreCheckResult {
    AutoApproved,
    ManualReview,
}

impl PreCheckResult {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AutoApproved => "auto_approved",
            Self::ManualReview => "manual_review",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::AutoApproved => "Auto-Approved",
            Self::ManualReview => "Manual Review",
        }
    }
}

/// Result of the VRN lookup step, applied to the case in one go.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VrnLookup {
    pub vrn: String,
    #[serde(default)]
    pub damage_date: Option<NaiveDate>,
    #[serde(default)]
    pub insurance_company: String,
    #[serde(default)]
    pub glass_type: Option<GlassType>,
    #[serde(default)]
    pub vehicle: Option<Vehicle>,
    #[serde(default)]
    pub owner: Option<Owner>,
    #[serde(default)]
    pub existing_case: Option<ExistingCase>,
    #[serde(default)]
    pub coverage_check: Option<CoverageCheck>,
    #[serde(default)]
    pub price_estimate: Option<PriceEstimate>,
    #[serde(default)]
    pub vrn_confirmed: bool,
}

/// Everything known about one in-progress case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseRecord {
    pub vrn: String,
    pub damage_date: Option<NaiveDate>,
    pub insurance_company: String,
    pub glass_type: Option<GlassType>,
    pub vehicle: Option<Vehicle>,
    pub owner: Option<Owner>,
    pub existing_case: Option<ExistingCase>,
    pub coverage_check: Option<CoverageCheck>,
    pub price_estimate: Option<PriceEstimate>,
    pub claim_form: Option<ClaimForm>,
    pub additional_claim_info: AdditionalClaimInfo,
    pub claim_form_action_taken: Option<ClaimFormAction>,
    pub repair_items: Vec<RepairItem>,
    pub calibration_needed: bool,
    pub calibration_signature: String,
    pub calibration_document: Option<Attachment>,
    pub job_performed_date: Option<NaiveDate>,
    pub photos: Vec<Photo>,
    pub photos_complete: bool,
    pub photos_skipped: bool,
    pub photos_skipped_reason: String,
    pub invoice: Option<Attachment>,
    pub ocr_invoice_data: Option<InvoiceOcrData>,
    pub skipped_items: Vec<StepId>,
    pub vrn_confirmed: bool,
    pub parts_labor_confirmed: bool,
    pub customer_accepted_no_coverage: bool,
    pub pre_check_result: Option<PreCheckResult>,
}

impl CaseRecord {
    pub fn is_skipped(&self, step: StepId) -> bool {
        self.skipped_items.contains(&step)
    }

    /// Sum of every repair line after discounts.
    pub fn expected_total(&self) -> f64 {
        self.repair_items.iter().map(RepairItem::line_total).sum()
    }

    pub fn calibration_complete(&self) -> bool {
        !self.calibration_needed || !self.calibration_signature.trim().is_empty()
    }

    /// A photo skip only counts once the workshop has said why.
    pub fn photo_skip_justified(&self) -> bool {
        !self.photos_skipped || !self.photos_skipped_reason.trim().is_empty()
    }

    /// Identifying inputs that, once confirmed, everything downstream depends on.
    pub(crate) fn identity_differs(&self, lookup: &VrnLookup) -> bool {
        self.vrn != lookup.vrn
            || self.damage_date != lookup.damage_date
            || self.insurance_company != lookup.insurance_company
            || self.glass_type != lookup.glass_type
    }
}
