//! Batch extraction across characters.
//!
//! Each character is extracted independently against the shared registry;
//! results come back in input order, one per requested id.

use rayon::prelude::*;
use tracing::info;

use crate::data::{CharacterId, DataRegistry};
use crate::error::ExtractError;
use crate::extract::{extract_character, CharacterExport, ExtractObserver, ExtractOptions};
use crate::parallel::pool::WorkerPool;

#[derive(Debug)]
pub struct BatchItem {
    pub id: CharacterId,
    pub result: Result<CharacterExport, ExtractError>,
}

/// Extract every id in `ids` on `pool`. A failure for one character never
/// affects the others.
pub fn extract_batch(
    registry: &DataRegistry,
    ids: &[CharacterId],
    options: &ExtractOptions,
    observer: &dyn ExtractObserver,
    pool: &WorkerPool,
) -> Vec<BatchItem> {
    let items: Vec<BatchItem> = pool.install(|| {
        ids.par_iter()
            .map(|&id| BatchItem {
                id,
                result: extract_character(
                    &registry.tables,
                    &registry.texts,
                    id,
                    options,
                    observer,
                ),
            })
            .collect()
    });

    let failed = items.iter().filter(|item| item.result.is_err()).count();
    info!(
        requested = ids.len(),
        succeeded = items.len() - failed,
        failed,
        "batch extraction finished"
    );
    items
}
