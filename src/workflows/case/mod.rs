//! Case creation for glass repair jobs: the case record, the store that owns it, the
//! approval precheck, and the step-by-step wizard that drives a case to submission.

pub mod domain;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod precheck;
pub mod pricing;
pub mod router;
pub mod store;
pub mod wizard;

pub use domain::{
    AdditionalClaimInfo, Attachment, CaseRecord, ClaimForm, ClaimFormAction, CoverageCheck,
    EstimateConfidence, ExistingCase, ExistingCaseStatus, GlassType, InvoiceOcrData, Owner,
    Photo, PhotoKind, PreCheckResult, PriceEstimate, RepairCategory, RepairItem, StepId, Vehicle,
    VrnLookup,
};
pub use precheck::{
    CheckId, CheckResult, CheckStatus, ExpectedTotals, PrecheckConfig, PrecheckEngine,
    PrecheckOutcome,
};
pub use pricing::{suggested_repair_items, validate_repair_items, RepairTotals};
pub use router::case_router;
pub use store::CaseStore;
pub use wizard::{
    CaseReceipt, CaseSubmission, CaseWizard, InMemorySubmissionSink, StepStatus, StepView,
    SubmissionError, SubmissionOutcome, SubmissionSink, TracingSubmissionSink, WizardError,
    WizardProgress,
};
