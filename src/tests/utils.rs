use crate::db::children::ChildTable;
use crate::db::connection::Database;
use crate::db::properties::find_property;
use crate::domain::property::{bare_property, Property};
use crate::errors::AppResult;
use chrono::NaiveDate;
use rusqlite::{params, Connection};

/// Fresh in-memory DB using the production schema
pub fn init_test_db() -> Database {
    Database::open_in_memory().unwrap_or_else(|e| panic!("Database initialization failed: {e}"))
}

/// A property at `address` in Springfield 62701 with no optional fields set.
pub fn property(id: &str, address: &str) -> Property {
    let mut p = bare_property(id);
    p.address = address.to_string();
    p
}

pub fn insert_property(db: &Database, p: &Property) {
    db.with_conn(|conn| {
        conn.execute(
            r#"
            INSERT INTO properties (
                id, address, city, state, zip,
                apn, county, year_built, living_area, lot_size,
                bedrooms, bathrooms, property_type, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
            "#,
            params![
                p.id,
                p.address,
                p.city,
                p.state,
                p.zip,
                p.apn,
                p.county,
                p.year_built,
                p.living_area,
                p.lot_size,
                p.bedrooms,
                p.bathrooms,
                p.property_type,
                p.created_at,
            ],
        )?;
        Ok(())
    })
    .expect("Failed to insert property");
}

/// Inserts one minimal row into `table` owned by `property_id`.
pub fn insert_child(db: &Database, table: ChildTable, property_id: &str) {
    let day = NaiveDate::from_ymd_opt(2022, 5, 1).unwrap();
    let at = day.and_hms_opt(12, 0, 0).unwrap();

    db.with_conn(|conn| {
        match table {
            ChildTable::Sales => conn.execute(
                "INSERT INTO sales (property_id, sale_date, price) VALUES (?1, ?2, 350000)",
                params![property_id, day],
            )?,
            ChildTable::OwnershipEvents => conn.execute(
                "INSERT INTO ownership_events (property_id, owner_name, event_date) VALUES (?1, 'J. Doe', ?2)",
                params![property_id, day],
            )?,
            ChildTable::WorkEvents => conn.execute(
                "INSERT INTO work_events (property_id, description, event_date) VALUES (?1, 'roof', ?2)",
                params![property_id, day],
            )?,
            ChildTable::Permits => conn.execute(
                "INSERT INTO permits (property_id, permit_number, issued_date) VALUES (?1, 'B-1', ?2)",
                params![property_id, day],
            )?,
            ChildTable::PropertyClaims => conn.execute(
                "INSERT INTO property_claims (property_id, user_email, claimed_at) VALUES (?1, 'owner@example.com', ?2)",
                params![property_id, at],
            )?,
            ChildTable::InsuranceClaims => conn.execute(
                "INSERT INTO insurance_claims (property_id, claim_date, amount) VALUES (?1, ?2, 1200.0)",
                params![property_id, day],
            )?,
            ChildTable::RentalSignals => conn.execute(
                "INSERT INTO rental_signals (property_id, start_date) VALUES (?1, ?2)",
                params![property_id, day],
            )?,
        };
        Ok(())
    })
    .expect("Failed to insert child row");
}

/// One row in every child table.
pub fn insert_all_children(db: &Database, property_id: &str) {
    for table in ChildTable::ALL {
        insert_child(db, table, property_id);
    }
}

pub fn child_totals(db: &Database) -> Vec<i64> {
    db.with_conn(|conn| {
        ChildTable::ALL
            .iter()
            .map(|t| t.count_all(conn))
            .collect::<AppResult<Vec<_>>>()
    })
    .expect("Failed to count children")
}

pub fn orphaned_children(db: &Database) -> i64 {
    db.with_conn(|conn| {
        let mut total = 0;
        for table in ChildTable::ALL {
            let sql = format!(
                "SELECT COUNT(*) FROM {} WHERE property_id NOT IN (SELECT id FROM properties)",
                table.table_name()
            );
            total += conn.query_row(&sql, [], |r| r.get::<_, i64>(0))?;
        }
        Ok(total)
    })
    .expect("Failed to count orphans")
}

pub fn get_property(db: &Database, id: &str) -> Option<Property> {
    db.with_conn(|conn| find_property(conn, id))
        .expect("Failed to load property")
}

pub fn owner_of_sales(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT property_id FROM sales ORDER BY id")
        .unwrap();
    stmt.query_map([], |r| r.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap()
}
