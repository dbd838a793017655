use crate::db::connection::Database;
use crate::db::properties::upsert_property;
use crate::errors::AppResult;
use crate::ingest::SourceRecord;
use crate::ingest::NormalizedProperty;
use chrono::Utc;
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub skipped: usize,
}

/// Reads a JSON array of source records from `path` and upserts them.
pub fn import_file(db: &Database, path: &Path) -> AppResult<ImportReport> {
    let reader = BufReader::new(File::open(path)?);
    let records: Vec<SourceRecord> = serde_json::from_reader(reader)?;
    info!(path = %path.display(), records = records.len(), "importing property records");
    import_records(db, &records)
}

/// Upserts each record on its own. Invalid records and records the database
/// rejects (for example an APN already held by another property) are skipped.
pub fn import_records(db: &Database, records: &[SourceRecord]) -> AppResult<ImportReport> {
    let now = Utc::now().naive_utc();
    let mut report = ImportReport::default();

    db.with_conn(|conn| {
        for record in records {
            let prop = match NormalizedProperty::from_source_record(record) {
                Ok(p) => p,
                Err(e) => {
                    warn!(error = %e, "skipping record");
                    report.skipped += 1;
                    continue;
                }
            };

            match upsert_property(conn, &prop, now) {
                Ok(()) => report.imported += 1,
                Err(e) => {
                    warn!(id = %prop.id, address = %prop.address, error = %e, "skipping record");
                    report.skipped += 1;
                }
            }
        }
        Ok(())
    })?;

    Ok(report)
}
