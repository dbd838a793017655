use crate::dedup::DedupReport;
use crate::errors::AppResult;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DedupRun {
    pub id: i64,
    pub started_at: NaiveDateTime,
    pub finished_at: Option<NaiveDateTime>,
    pub dry_run: bool,
    pub properties_scanned: Option<i64>,
    pub groups_processed: Option<i64>,
    pub groups_merged: Option<i64>,
    pub properties_deleted: Option<i64>,
    pub groups_skipped: Option<i64>,
    pub success: bool,
    pub error_message: Option<String>,
}

pub fn start_dedup_run(conn: &Connection, dry_run: bool, now: NaiveDateTime) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO dedup_runs (started_at, dry_run, success) VALUES (?1, ?2, 0)",
        params![now, dry_run],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn finish_dedup_run(
    conn: &Connection,
    run_id: i64,
    report: &DedupReport,
    success: bool,
    error: Option<String>,
    now: NaiveDateTime,
) -> AppResult<()> {
    conn.execute(
        r#"
        UPDATE dedup_runs SET
            finished_at = ?1, properties_scanned = ?2, groups_processed = ?3,
            groups_merged = ?4, properties_deleted = ?5, groups_skipped = ?6,
            success = ?7, error_message = ?8
        WHERE id = ?9
        "#,
        params![
            now,
            report.properties_scanned,
            report.groups_processed,
            report.groups_merged,
            report.properties_deleted,
            report.groups_skipped,
            success,
            error,
            run_id
        ],
    )?;
    Ok(())
}

pub fn recent_dedup_runs(conn: &Connection) -> AppResult<Vec<DedupRun>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT id, started_at, finished_at, dry_run, properties_scanned, groups_processed,
               groups_merged, properties_deleted, groups_skipped, success, error_message
        FROM dedup_runs
        ORDER BY started_at DESC, id DESC
        LIMIT 50
        "#,
    )?;

    let rows = stmt.query_map([], |row| {
        Ok(DedupRun {
            id: row.get(0)?,
            started_at: row.get(1)?,
            finished_at: row.get(2)?,
            dry_run: row.get(3)?,
            properties_scanned: row.get(4)?,
            groups_processed: row.get(5)?,
            groups_merged: row.get(6)?,
            properties_deleted: row.get(7)?,
            groups_skipped: row.get(8)?,
            success: row.get(9)?,
            error_message: row.get(10)?,
        })
    })?;

    let mut runs = Vec::new();
    for r in rows {
        runs.push(r?);
    }
    Ok(runs)
}
