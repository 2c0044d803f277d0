use glass_case::error::AppError;
use glass_case::workflows::case::{CaseRecord, CaseStore, GlassType};
use glass_case::workflows::repair_import::RepairItemImporter;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_glass_type(raw: &str) -> Result<GlassType, String> {
    GlassType::from_label(raw).ok_or_else(|| {
        let known = GlassType::ordered()
            .iter()
            .map(|glass| glass.label())
            .collect::<Vec<_>>()
            .join(", ");
        format!("unknown glass type '{raw}' (expected one of: {known})")
    })
}

/// Reads a saved case and, when given, replaces its repair items with an imported price list.
pub(crate) fn load_case(
    case_path: &Path,
    repair_items: Option<&Path>,
) -> Result<CaseStore, AppError> {
    let raw = std::fs::read_to_string(case_path)?;
    let record: CaseRecord = serde_json::from_str(&raw)?;
    let mut store = CaseStore::from_record(record);

    if let Some(path) = repair_items {
        let items = RepairItemImporter::from_path(path)?;
        store.update_repair_items(items);
    }

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glass_type_parses_labels_case_insensitively() {
        assert_eq!(parse_glass_type("side window"), Ok(GlassType::SideWindow));
        let error = parse_glass_type("door").expect_err("unknown glass");
        assert!(error.contains("Windscreen"));
    }

    #[test]
    fn load_case_reports_missing_file() {
        let error = load_case(Path::new("./no-such-case.json"), None).expect_err("missing");
        assert!(matches!(error, AppError::Io(_)));
    }
}
