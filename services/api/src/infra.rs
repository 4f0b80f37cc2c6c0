use landlord_aid::config::AppConfig;
use landlord_aid::error::AppError;
use landlord_aid::workflows::intake::AddressBook;
use landlord_aid::workflows::records::{JsonlRecordStore, RecordService};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Append-only ledger on disk behind the configured payload policy.
pub(crate) fn record_service(config: &AppConfig) -> Arc<RecordService<JsonlRecordStore>> {
    let store = Arc::new(JsonlRecordStore::new(config.storage.record_store.clone()));
    Arc::new(RecordService::new(store, config.intake.payload_policy))
}

/// The configured address export, or the bundled list when none is set.
pub(crate) fn address_book(config: &AppConfig) -> Result<Arc<AddressBook>, AppError> {
    let book = match &config.storage.address_csv {
        Some(path) => AddressBook::from_csv_path(path)?,
        None => AddressBook::bundled(),
    };
    Ok(Arc::new(book))
}
