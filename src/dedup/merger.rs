// src/dedup/merger.rs

use crate::db::children::{count_all_children, repoint_all_children};
use crate::db::properties::{delete_property, update_merged_fields};
use crate::dedup::MergePlan;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;
use tracing::debug;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MergeOutcome {
    pub deleted: usize,
    pub children_repointed: usize,
}

/// Applies one merge plan inside its own transaction.
///
/// Order matters: children are moved and losers deleted before the survivor's
/// fields are written, otherwise a merged APN would collide with the unique
/// index while the loser that carried it still exists. Any error drops the
/// transaction, leaving the whole group untouched.
pub fn apply_merge_plan(conn: &mut Connection, plan: &MergePlan) -> AppResult<MergeOutcome> {
    let tx = conn.transaction()?;
    let survivor_id = plan.merged.id.as_str();
    let mut outcome = MergeOutcome::default();

    for loser in &plan.losers {
        let moved = repoint_all_children(&tx, &loser.id, survivor_id)?;

        let remaining = count_all_children(&tx, &loser.id)?;
        if remaining > 0 {
            return Err(AppError::ChildrenRemain {
                property_id: loser.id.clone(),
                remaining,
            });
        }

        delete_property(&tx, &loser.id)?;
        debug!(
            survivor = survivor_id,
            loser = %loser.id,
            moved,
            "duplicate folded into survivor"
        );

        outcome.children_repointed += moved;
        outcome.deleted += 1;
    }

    if !plan.filled.is_empty() {
        update_merged_fields(&tx, &plan.merged)?;
    }

    tx.commit()?;
    Ok(outcome)
}
