//! Collapses properties sharing a normalized (address, city, zip) key into a
//! single survivor.
//!
//! The run is a single sequential pass. Each duplicate group is merged in its
//! own transaction; a group that fails is rolled back, logged and counted as
//! skipped while the rest of the run carries on. Running the job again over a
//! cleaned dataset finds no groups and changes nothing.

mod merger;
mod planner;

pub use planner::{find_duplicate_groups, MergePlan};

use merger::apply_merge_plan;

use crate::db::connection::Database;
use crate::db::properties::load_all_properties;
use crate::db::runs::{finish_dedup_run, start_dedup_run};
use crate::errors::AppResult;
use chrono::Utc;
use serde::Serialize;
use std::fmt;
use tracing::{info, warn};

#[derive(Debug, Default, Clone, Copy)]
pub struct DedupOptions {
    /// Plan and report merges without writing them.
    pub dry_run: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct DedupReport {
    pub dry_run: bool,
    pub properties_scanned: usize,
    pub groups_processed: usize,
    pub groups_merged: usize,
    pub properties_deleted: usize,
    pub groups_skipped: usize,
    pub children_repointed: usize,
}

impl fmt::Display for DedupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "processed={} merged={} deleted={} skipped={} (scanned {} properties, re-pointed {} child records{})",
            self.groups_processed,
            self.groups_merged,
            self.properties_deleted,
            self.groups_skipped,
            self.properties_scanned,
            self.children_repointed,
            if self.dry_run { ", dry run" } else { "" }
        )
    }
}

/// Runs the deduplicator and records the run in `dedup_runs`.
///
/// Per-group failures are absorbed into `groups_skipped`. Only failures to
/// read the property table or to write the run log are returned as errors.
pub fn run_dedup(db: &mut Database, opts: DedupOptions) -> AppResult<DedupReport> {
    let started = Utc::now().naive_utc();
    let run_id = db.with_conn(|conn| start_dedup_run(conn, opts.dry_run, started))?;

    let result = dedup_all(db, opts);
    let finished = Utc::now().naive_utc();

    match result {
        Ok(report) => {
            db.with_conn(|conn| finish_dedup_run(conn, run_id, &report, true, None, finished))?;
            Ok(report)
        }
        Err(e) => {
            let empty = DedupReport {
                dry_run: opts.dry_run,
                ..Default::default()
            };
            if let Err(log_err) = db.with_conn(|conn| {
                finish_dedup_run(conn, run_id, &empty, false, Some(e.to_string()), finished)
            }) {
                warn!(error = %log_err, "failed to record dedup run failure");
            }
            Err(e)
        }
    }
}

fn dedup_all(db: &mut Database, opts: DedupOptions) -> AppResult<DedupReport> {
    let properties = db.with_conn(load_all_properties)?;
    let mut report = DedupReport {
        dry_run: opts.dry_run,
        properties_scanned: properties.len(),
        ..Default::default()
    };

    let groups = find_duplicate_groups(properties);
    info!(
        scanned = report.properties_scanned,
        groups = groups.len(),
        "duplicate scan complete"
    );

    for group in &groups {
        report.groups_processed += 1;
        let plan = group.plan();
        let survivor = &plan.merged;

        if opts.dry_run {
            info!(
                key = %plan.key,
                survivor = %survivor.id,
                losers = plan.losers.len(),
                filled = plan.filled.len(),
                "would merge group"
            );
            report.groups_merged += 1;
            report.properties_deleted += plan.losers.len();
            continue;
        }

        match db.with_conn_mut(|conn| apply_merge_plan(conn, &plan)) {
            Ok(outcome) => {
                info!(
                    survivor = %survivor.id,
                    address = %survivor.full_address(),
                    deleted = outcome.deleted,
                    repointed = outcome.children_repointed,
                    "merged duplicate group"
                );
                report.groups_merged += 1;
                report.properties_deleted += outcome.deleted;
                report.children_repointed += outcome.children_repointed;
            }
            Err(e) => {
                warn!(
                    survivor = %survivor.id,
                    address = %survivor.full_address(),
                    error = %e,
                    "skipping duplicate group"
                );
                report.groups_skipped += 1;
            }
        }
    }

    Ok(report)
}
