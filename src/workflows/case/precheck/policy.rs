use super::super::domain::{CaseRecord, PreCheckResult};
use super::{CheckResult, CheckStatus};

/// A customer paying without insurance cover always goes to a person, even when every check
/// passes. Otherwise the case is auto-approved only with a clean sheet.
pub(crate) fn decide_verdict(record: &CaseRecord, checks: &[CheckResult]) -> PreCheckResult {
    if record.customer_accepted_no_coverage {
        return PreCheckResult::ManualReview;
    }

    if checks
        .iter()
        .all(|check| check.status == CheckStatus::Success)
    {
        PreCheckResult::AutoApproved
    } else {
        PreCheckResult::ManualReview
    }
}
