use crate::errors::AppResult;
use rusqlite::{params, Connection};

/// Every table holding a `property_id` foreign key.
///
/// Deduplication re-points rows in each of these tables before deleting a
/// duplicate, so a child table missing from `ALL` would be left pointing at a
/// deleted property. Adding a child table to `sql/schema.sql` means adding it
/// here too; `schema_tests` fails until both agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildTable {
    Sales,
    OwnershipEvents,
    WorkEvents,
    Permits,
    PropertyClaims,
    InsuranceClaims,
    RentalSignals,
}

impl ChildTable {
    pub const ALL: [ChildTable; 7] = [
        ChildTable::Sales,
        ChildTable::OwnershipEvents,
        ChildTable::WorkEvents,
        ChildTable::Permits,
        ChildTable::PropertyClaims,
        ChildTable::InsuranceClaims,
        ChildTable::RentalSignals,
    ];

    pub fn table_name(self) -> &'static str {
        match self {
            ChildTable::Sales => "sales",
            ChildTable::OwnershipEvents => "ownership_events",
            ChildTable::WorkEvents => "work_events",
            ChildTable::Permits => "permits",
            ChildTable::PropertyClaims => "property_claims",
            ChildTable::InsuranceClaims => "insurance_claims",
            ChildTable::RentalSignals => "rental_signals",
        }
    }

    /// Moves every row owned by `from` to `to`. Returns the rows moved.
    pub fn repoint(self, conn: &Connection, from: &str, to: &str) -> AppResult<usize> {
        let sql = format!(
            "UPDATE {} SET property_id = ?1 WHERE property_id = ?2",
            self.table_name()
        );
        let moved = conn.execute(&sql, params![to, from])?;
        Ok(moved)
    }

    pub fn count_for(self, conn: &Connection, property_id: &str) -> AppResult<i64> {
        let sql = format!(
            "SELECT COUNT(*) FROM {} WHERE property_id = ?1",
            self.table_name()
        );
        let n = conn.query_row(&sql, params![property_id], |r| r.get(0))?;
        Ok(n)
    }

    #[cfg(test)]
    pub fn count_all(self, conn: &Connection) -> AppResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", self.table_name());
        let n = conn.query_row(&sql, [], |r| r.get(0))?;
        Ok(n)
    }
}

/// Re-points the rows of every child table. Returns the total rows moved.
pub fn repoint_all_children(conn: &Connection, from: &str, to: &str) -> AppResult<usize> {
    let mut moved = 0;
    for table in ChildTable::ALL {
        moved += table.repoint(conn, from, to)?;
    }
    Ok(moved)
}

/// Rows in any child table still owned by `property_id`.
pub fn count_all_children(conn: &Connection, property_id: &str) -> AppResult<i64> {
    let mut total = 0;
    for table in ChildTable::ALL {
        total += table.count_for(conn, property_id)?;
    }
    Ok(total)
}
