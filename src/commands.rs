use crate::infra::{load_case, parse_glass_type};
use clap::Args;
use glass_case::config::AppConfig;
use glass_case::error::AppError;
use glass_case::telemetry;
use glass_case::workflows::case::router::DEFAULT_DEDUCTIBLE;
use glass_case::workflows::case::{
    suggested_repair_items, validate_repair_items, CaseReceipt, CaseWizard, CheckStatus,
    GlassType, PrecheckEngine, PrecheckOutcome, RepairItem, RepairTotals,
    TracingSubmissionSink,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct PrecheckArgs {
    /// Case record saved as JSON
    #[arg(long = "case")]
    pub(crate) case_path: PathBuf,
    /// CSV price list replacing the repair items on the case
    #[arg(long)]
    pub(crate) repair_items: Option<PathBuf>,
    /// Print the outcome as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Glass type to quote (Windscreen, Side Window, Rear Window, Sunroof)
    #[arg(long, value_parser = parse_glass_type)]
    pub(crate) glass_type: Option<GlassType>,
    /// Deductible subtracted from the total
    #[arg(long, default_value_t = DEFAULT_DEDUCTIBLE)]
    pub(crate) deductible: f64,
}

#[derive(Args, Debug)]
pub(crate) struct SubmitArgs {
    /// Case record saved as JSON
    #[arg(long = "case")]
    pub(crate) case_path: PathBuf,
    /// CSV price list replacing the repair items on the case
    #[arg(long)]
    pub(crate) repair_items: Option<PathBuf>,
}

/// Loads configuration and installs the log subscriber for a one-shot command.
pub(crate) fn prepare_runtime() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(config)
}

pub(crate) fn run_precheck(args: PrecheckArgs) -> Result<(), AppError> {
    let config = prepare_runtime()?;
    let engine = PrecheckEngine::new(config.precheck);
    let store = load_case(&args.case_path, args.repair_items.as_deref())?;
    let record = store.record();

    let outcome = engine.evaluate(record);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    render_precheck(&record.vrn, &outcome, &validate_items(&record.repair_items));
    Ok(())
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let items = suggested_repair_items(args.glass_type);
    let totals = RepairTotals::calculate(&items, args.deductible);

    let heading = args
        .glass_type
        .map(GlassType::label)
        .unwrap_or("Unspecified glass");
    println!("Suggested repair for {heading}");
    for item in &items {
        println!(
            "- {} {} x {:.2}{} = {:.2}",
            item.category.label(),
            item.quantity,
            item.unit_price,
            item.article_number
                .as_deref()
                .map(|article| format!(" ({article})"))
                .unwrap_or_default(),
            item.line_total()
        );
    }
    render_totals(&totals);
    Ok(())
}

pub(crate) fn run_submit(args: SubmitArgs) -> Result<(), AppError> {
    let config = prepare_runtime()?;

    let store = load_case(&args.case_path, args.repair_items.as_deref())?;
    let engine = Arc::new(PrecheckEngine::new(config.precheck));
    let mut wizard = CaseWizard::with_store(store, engine, Arc::new(TracingSubmissionSink));

    wizard.submit_outstanding()?;

    if let Some(receipt) = wizard.receipt() {
        render_receipt(&receipt, wizard.record().expected_total());
    }
    Ok(())
}

fn validate_items(items: &[RepairItem]) -> Vec<String> {
    if items.is_empty() {
        Vec::new()
    } else {
        validate_repair_items(items)
    }
}

fn render_precheck(vrn: &str, outcome: &PrecheckOutcome, item_issues: &[String]) {
    let vrn = if vrn.is_empty() { "unregistered vehicle" } else { vrn };
    println!("Approval precheck for {vrn}");

    for check in &outcome.checks {
        let marker = match check.status {
            CheckStatus::Success => "PASS",
            CheckStatus::Error => "FAIL",
        };
        println!("- [{marker}] {}: {}", check.name, check.details);
    }

    let totals = outcome.expected_totals;
    println!(
        "\nExpected invoice: parts {:.2}, labor {:.2}, total {:.2}",
        totals.parts, totals.labor, totals.total
    );

    if !item_issues.is_empty() {
        println!("\nRepair item issues");
        for issue in item_issues {
            println!("- {issue}");
        }
    }

    println!(
        "\nVerdict: {} ({}/{} checks passed)",
        outcome.verdict.label(),
        outcome.passed(),
        outcome.checks.len()
    );
}

fn render_totals(totals: &RepairTotals) {
    println!("\nSubtotal: {:.2}", totals.subtotal);
    println!("VAT (25%): {:.2}", totals.vat_amount);
    println!("Total incl. VAT: {:.2}", totals.total_with_vat);
    println!("Deductible: -{:.2}", totals.deductible);
    println!("Final total: {:.2}", totals.final_total);
}

fn render_receipt(receipt: &CaseReceipt, expected_total: f64) {
    println!("{}", receipt.title);
    println!("Vehicle: {}", receipt.vrn);
    println!("Status: {}", receipt.status_label);
    println!("Repair total: {expected_total:.2}");
    if receipt.customer_paid {
        println!("Customer pays without insurance coverage");
    }
    if receipt.calibration_required {
        println!("Calibration required");
    }
    if receipt.pending_items > 0 {
        println!("Pending items: {}", receipt.pending_items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepare_runtime_installs_log_subscriber() {
        prepare_runtime().expect("runtime prepared");

        assert!(tracing::dispatcher::has_been_set());
    }
}
