use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::{info, warn};

use super::domain::{CaseRecord, ClaimForm, ClaimFormAction, PreCheckResult, StepId, VrnLookup};
use super::precheck::PrecheckEngine;
use super::store::CaseStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Complete,
    Incomplete,
    Pending,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepView {
    pub id: StepId,
    pub title: &'static str,
    pub required: bool,
    pub status: StepStatus,
}

/// How a wizard run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionOutcome {
    Submitted,
    Drafted,
    Stopped,
}

impl SubmissionOutcome {
    pub const fn title(self) -> &'static str {
        match self {
            Self::Submitted => "Case Submitted Successfully",
            Self::Drafted => "Case Saved as Draft",
            Self::Stopped => "Process Stopped",
        }
    }
}

/// Final case handed over to whatever persists or forwards it.
#[derive(Debug, Clone, Serialize)]
pub struct CaseSubmission {
    pub outcome: SubmissionOutcome,
    pub record: CaseRecord,
}

/// Outbound hook receiving finished cases.
pub trait SubmissionSink: Send + Sync {
    fn deliver(&self, submission: &CaseSubmission) -> Result<(), SubmissionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("submission transport unavailable: {0}")]
    Transport(String),
}

/// Sink that only records finished cases in the log.
#[derive(Debug, Default, Clone)]
pub struct TracingSubmissionSink;

impl SubmissionSink for TracingSubmissionSink {
    fn deliver(&self, submission: &CaseSubmission) -> Result<(), SubmissionError> {
        info!(
            vrn = %submission.record.vrn,
            outcome = ?submission.outcome,
            pre_check = submission.record.pre_check_result.map(PreCheckResult::as_str),
            skipped = submission.record.skipped_items.len(),
            "case handed off"
        );
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct InMemorySubmissionSink {
    submissions: Arc<Mutex<Vec<CaseSubmission>>>,
}

impl InMemorySubmissionSink {
    pub fn submissions(&self) -> Vec<CaseSubmission> {
        self.submissions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl SubmissionSink for InMemorySubmissionSink {
    fn deliver(&self, submission: &CaseSubmission) -> Result<(), SubmissionError> {
        let mut guard = self
            .submissions
            .lock()
            .map_err(|_| SubmissionError::Transport("submission store poisoned".to_string()))?;
        guard.push(submission.clone());
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("step {} is not complete", .0.as_str())]
    StepIncomplete(StepId),
    #[error("step index {0} is out of range")]
    StepOutOfRange(usize),
    #[error("step {} cannot be skipped", .0.as_str())]
    SkipNotAllowed(StepId),
    #[error("{action} is not available on step {}", .step.as_str())]
    ActionNotAvailable { action: &'static str, step: StepId },
    #[error("case already finished as {0:?}")]
    AlreadyFinished(SubmissionOutcome),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

/// Where a navigation call left the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardProgress {
    At(StepId),
    Finished(SubmissionOutcome),
}

/// Summary shown once the wizard has reached an outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseReceipt {
    pub outcome: SubmissionOutcome,
    pub title: &'static str,
    pub vrn: String,
    pub pre_check_result: Option<PreCheckResult>,
    pub status_label: &'static str,
    pub customer_paid: bool,
    pub calibration_required: bool,
    pub pending_items: usize,
}

const STEPS: [StepId; 5] = StepId::ordered();

/// Parts/labor through invoice may be left pending; lookup and claim form may not.
const SKIPPABLE: std::ops::RangeInclusive<usize> = 2..=4;

/// Drives one case through the five steps and hands it off at the end.
pub struct CaseWizard<S> {
    store: CaseStore,
    engine: Arc<PrecheckEngine>,
    sink: Arc<S>,
    current: usize,
    outcome: Option<SubmissionOutcome>,
}

impl<S> CaseWizard<S>
where
    S: SubmissionSink + 'static,
{
    pub fn new(engine: Arc<PrecheckEngine>, sink: Arc<S>) -> Self {
        Self::with_store(CaseStore::new(), engine, sink)
    }

    pub fn with_store(store: CaseStore, engine: Arc<PrecheckEngine>, sink: Arc<S>) -> Self {
        Self {
            store,
            engine,
            sink,
            current: 0,
            outcome: None,
        }
    }

    pub fn record(&self) -> &CaseRecord {
        self.store.record()
    }

    pub fn store(&self) -> &CaseStore {
        &self.store
    }

    /// Step components write through here. Closed once the case is finished.
    pub fn store_mut(&mut self) -> Result<&mut CaseStore, WizardError> {
        self.ensure_open()?;
        Ok(&mut self.store)
    }

    pub fn current_step(&self) -> StepId {
        STEPS[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn outcome(&self) -> Option<SubmissionOutcome> {
        self.outcome
    }

    fn ensure_open(&self) -> Result<(), WizardError> {
        match self.outcome {
            Some(outcome) => Err(WizardError::AlreadyFinished(outcome)),
            None => Ok(()),
        }
    }

    fn is_last_step(&self) -> bool {
        self.current == STEPS.len() - 1
    }

    pub fn step_status(&self, step: StepId) -> StepStatus {
        let record = self.store.record();
        if record.is_skipped(step) {
            return StepStatus::Pending;
        }

        let complete = match step {
            StepId::VrnLookup => lookup_settled(record) && record.price_estimate.is_some(),
            StepId::ClaimForm => {
                record.claim_form_action_taken == Some(ClaimFormAction::Continued)
            }
            StepId::PartsLabor => {
                !record.repair_items.is_empty() && record.calibration_complete()
            }
            StepId::Photos => record.photo_skip_justified(),
            StepId::Invoice => record.invoice.is_some(),
        };

        if complete {
            StepStatus::Complete
        } else {
            StepStatus::Incomplete
        }
    }

    pub fn steps(&self) -> Vec<StepView> {
        STEPS
            .iter()
            .map(|step| StepView {
                id: *step,
                title: step.title(),
                required: step.required(),
                status: self.step_status(*step),
            })
            .collect()
    }

    pub fn can_proceed(&self) -> bool {
        if self.outcome.is_some() {
            return false;
        }

        let record = self.store.record();
        match self.current_step() {
            StepId::VrnLookup => lookup_settled(record) && record.existing_case.is_none(),
            StepId::ClaimForm => {
                record.claim_form_action_taken == Some(ClaimFormAction::Continued)
            }
            StepId::PartsLabor => {
                (!record.repair_items.is_empty() && record.calibration_complete())
                    || record.is_skipped(StepId::PartsLabor)
            }
            StepId::Photos => record.photo_skip_justified(),
            StepId::Invoice => record.invoice.is_some() || record.is_skipped(StepId::Invoice),
        }
    }

    /// Moves forward one step; on the last step this submits the case.
    pub fn next(&mut self) -> Result<WizardProgress, WizardError> {
        self.ensure_open()?;
        if !self.can_proceed() {
            return Err(WizardError::StepIncomplete(self.current_step()));
        }
        self.advance()
    }

    fn advance(&mut self) -> Result<WizardProgress, WizardError> {
        if self.is_last_step() {
            let outcome = self.finalize(SubmissionOutcome::Submitted)?;
            return Ok(WizardProgress::Finished(outcome));
        }

        self.current += 1;
        Ok(WizardProgress::At(self.current_step()))
    }

    pub fn previous(&mut self) -> Result<StepId, WizardError> {
        self.ensure_open()?;
        self.current = self.current.saturating_sub(1);
        Ok(self.current_step())
    }

    pub fn go_to(&mut self, index: usize) -> Result<StepId, WizardError> {
        self.ensure_open()?;
        if index >= STEPS.len() {
            return Err(WizardError::StepOutOfRange(index));
        }
        self.current = index;
        Ok(self.current_step())
    }

    /// Whether the current step offers a skip: parts/labor through invoice, once each.
    pub fn can_skip(&self) -> bool {
        self.outcome.is_none()
            && SKIPPABLE.contains(&self.current)
            && !self.store.record().is_skipped(self.current_step())
    }

    pub fn skip(&mut self) -> Result<WizardProgress, WizardError> {
        self.ensure_open()?;
        let step = self.current_step();
        if !self.can_skip() {
            return Err(WizardError::SkipNotAllowed(step));
        }

        self.store.add_skipped_item(step);
        info!(step = step.as_str(), "step skipped");
        self.advance()
    }

    /// Stops the case during lookup or claim intake, keeping what was recorded so far.
    pub fn stop(&mut self) -> Result<SubmissionOutcome, WizardError> {
        self.ensure_open()?;
        if self.current > 1 {
            return Err(WizardError::ActionNotAvailable {
                action: "stop",
                step: self.current_step(),
            });
        }
        self.finalize(SubmissionOutcome::Stopped)
    }

    pub fn save_draft(&mut self) -> Result<SubmissionOutcome, WizardError> {
        self.ensure_open()?;
        if self.current == 0 {
            return Err(WizardError::ActionNotAvailable {
                action: "save draft",
                step: self.current_step(),
            });
        }
        self.finalize(SubmissionOutcome::Drafted)
    }

    /// Submits with the given steps marked as still pending.
    pub fn submit_with_skipped(&mut self, items: &[StepId]) -> Result<SubmissionOutcome, WizardError> {
        self.ensure_open()?;
        self.ensure_submittable()?;
        for item in items {
            if !self.store.record().is_skipped(*item) {
                self.store.add_skipped_item(*item);
            }
        }
        self.finalize(SubmissionOutcome::Submitted)
    }

    /// Submits from wherever the wizard stands, marking every unfinished skippable step as
    /// pending. Lookup and claim form must already be complete.
    pub fn submit_outstanding(&mut self) -> Result<SubmissionOutcome, WizardError> {
        self.ensure_open()?;
        if let Some(step) = STEPS[..*SKIPPABLE.start()]
            .iter()
            .find(|step| self.step_status(**step) != StepStatus::Complete)
        {
            return Err(WizardError::StepIncomplete(*step));
        }

        let pending: Vec<StepId> = STEPS[SKIPPABLE]
            .iter()
            .copied()
            .filter(|step| self.step_status(*step) == StepStatus::Incomplete)
            .collect();
        self.submit_with_skipped(&pending)
    }

    /// A photo skip without a reason keeps the case from being submitted, whichever path
    /// reaches submission.
    fn ensure_submittable(&self) -> Result<(), WizardError> {
        if self.store.record().photo_skip_justified() {
            Ok(())
        } else {
            Err(WizardError::StepIncomplete(StepId::Photos))
        }
    }

    /// Applies a lookup result. Changing the VRN, damage date, insurer or glass type after
    /// they were confirmed throws away everything recorded downstream of them.
    pub fn confirm_vehicle(&mut self, lookup: VrnLookup) -> Result<(), WizardError> {
        self.ensure_open()?;
        let record = self.store.record();
        if record.vrn_confirmed && record.identity_differs(&lookup) {
            info!(
                previous = %record.vrn,
                vrn = %lookup.vrn,
                "identifying inputs changed, resetting dependent case data"
            );
            self.store.reset_dependent_case_data();
        }
        self.store.update_vrn_data(lookup);
        Ok(())
    }

    pub fn record_claim_form(
        &mut self,
        claim_form: Option<ClaimForm>,
        action: ClaimFormAction,
        customer_accepted_no_coverage: Option<bool>,
    ) -> Result<(), WizardError> {
        self.ensure_open()?;
        self.store
            .update_claim_form(claim_form, customer_accepted_no_coverage);
        self.store.update_claim_form_action_taken(action);
        Ok(())
    }

    fn finalize(&mut self, outcome: SubmissionOutcome) -> Result<SubmissionOutcome, WizardError> {
        if outcome == SubmissionOutcome::Submitted {
            self.ensure_submittable()?;
            let verdict = self
                .engine
                .determine_case_approval_status(self.store.record());
            self.store.update_pre_check(verdict);
        }

        let submission = CaseSubmission {
            outcome,
            record: self.store.record().clone(),
        };

        if let Err(err) = self.sink.deliver(&submission) {
            warn!(vrn = %submission.record.vrn, error = %err, "case hand-off failed");
            return Err(err.into());
        }

        info!(
            vrn = %submission.record.vrn,
            outcome = ?outcome,
            pre_check = submission.record.pre_check_result.map(PreCheckResult::as_str),
            "case finished"
        );
        self.outcome = Some(outcome);
        Ok(outcome)
    }

    pub fn receipt(&self) -> Option<CaseReceipt> {
        let outcome = self.outcome?;
        let record = self.store.record();
        let status_label = match record.pre_check_result {
            Some(result) => result.label(),
            None => PreCheckResult::ManualReview.label(),
        };

        Some(CaseReceipt {
            outcome,
            title: outcome.title(),
            vrn: record.vrn.clone(),
            pre_check_result: record.pre_check_result,
            status_label,
            customer_paid: record.customer_accepted_no_coverage,
            calibration_required: record.calibration_needed,
            pending_items: record.skipped_items.len(),
        })
    }
}

fn lookup_settled(record: &CaseRecord) -> bool {
    record.vehicle.is_some()
        && record.owner.is_some()
        && record.vrn_confirmed
        && record
            .coverage_check
            .as_ref()
            .map(|coverage| coverage.is_acceptable())
            .unwrap_or(false)
}
