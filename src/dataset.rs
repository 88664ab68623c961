use crate::error::StoreError;
use crate::record::Record;
use crate::store::RecordStore;
use serde::Serialize;

/// The last successfully fetched records. Analytics only ever read this.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip)]
    pub records: Vec<Record>,
    pub version: u64,
    pub record_count: usize,
    pub loaded_at: String,
}

/// Fetches a fresh snapshot. On failure `current` is left untouched so the
/// caller can keep serving stale data.
pub fn refresh<'a>(
    current: &'a mut Option<Dataset>,
    store: &dyn RecordStore,
) -> Result<&'a Dataset, StoreError> {
    let fetched = store.fetch_all()?;
    let records: Vec<Record> = fetched.into_iter().map(|s| s.record).collect();
    let version = current.as_ref().map(|d| d.version + 1).unwrap_or(1);
    tracing::info!(version, records = records.len(), "dataset refreshed");
    Ok(current.insert(Dataset {
        record_count: records.len(),
        records,
        version,
        loaded_at: chrono::Utc::now().to_rfc3339(),
    }))
}
