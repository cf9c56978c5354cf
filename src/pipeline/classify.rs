// Manual classification: overwrite a record's category and bias tags.

use tracing::info;

use crate::db::RecordStore;
use crate::error::PipelineError;

/// Set both tags on record `id`. A `None` clears that column.
pub async fn classify_record(
    store: &dyn RecordStore,
    id: i64,
    category: Option<&str>,
    bias: Option<&str>,
) -> Result<(), PipelineError> {
    if !store.update_fields(id, category, bias).await? {
        return Err(PipelineError::NotFound { id });
    }
    info!(id, category = ?category, bias = ?bias, "Record classified");
    Ok(())
}
