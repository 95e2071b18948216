//! Local vs. reference height comparison

use super::types::{NodeSnapshot, ReferenceHeight, SyncVerdict};
use crate::errors::HealthError;

/// Classify the node's sync state. Pure: no I/O, no clock.
pub fn evaluate(local: &NodeSnapshot, reference: &ReferenceHeight) -> Result<SyncVerdict, HealthError> {
    let local_height = local
        .latest_block_height
        .trim()
        .parse::<u64>()
        .map_err(|_| HealthError::InvalidHeight {
            value: local.latest_block_height.clone(),
        })?;

    Ok(verdict_for(local_height, reference.height))
}

pub fn verdict_for(local_height: u64, reference_height: u64) -> SyncVerdict {
    let deficit = reference_height.saturating_sub(local_height);
    SyncVerdict {
        synced: deficit == 0,
        local_height,
        reference_height,
        deficit,
    }
}
