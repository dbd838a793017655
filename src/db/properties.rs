use crate::domain::property::Property;
use crate::errors::{AppError, AppResult};
use crate::ingest::NormalizedProperty;
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Row};

const PROPERTY_COLUMNS: &str = r#"
    id, address, city, state, zip,
    apn, county, year_built, living_area, lot_size,
    bedrooms, bathrooms, property_type, created_at
"#;

fn property_from_row(row: &Row<'_>) -> rusqlite::Result<Property> {
    Ok(Property {
        id: row.get(0)?,
        address: row.get(1)?,
        city: row.get(2)?,
        state: row.get(3)?,
        zip: row.get(4)?,
        apn: row.get(5)?,
        county: row.get(6)?,
        year_built: row.get(7)?,
        living_area: row.get(8)?,
        lot_size: row.get(9)?,
        bedrooms: row.get(10)?,
        bathrooms: row.get(11)?,
        property_type: row.get(12)?,
        created_at: row.get(13)?,
    })
}

/// Full scan of the `properties` table.
pub fn load_all_properties(conn: &Connection) -> AppResult<Vec<Property>> {
    let sql = format!("SELECT {PROPERTY_COLUMNS} FROM properties ORDER BY id");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], property_from_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn find_property(conn: &Connection, id: &str) -> AppResult<Option<Property>> {
    let sql = format!("SELECT {PROPERTY_COLUMNS} FROM properties WHERE id = ?1");
    let prop = conn
        .query_row(&sql, params![id], property_from_row)
        .optional()?;
    Ok(prop)
}

#[cfg(test)]
pub fn count_properties(conn: &Connection) -> AppResult<i64> {
    let n = conn.query_row("SELECT COUNT(*) FROM properties", [], |r| r.get(0))?;
    Ok(n)
}

/// Writes the mergeable fields of `prop` back to its row. Address fields and
/// `created_at` are never touched by a merge.
pub fn update_merged_fields(conn: &Connection, prop: &Property) -> AppResult<()> {
    let updated = conn.execute(
        r#"
        UPDATE properties SET
            apn = ?1, county = ?2, year_built = ?3, living_area = ?4,
            lot_size = ?5, bedrooms = ?6, bathrooms = ?7, property_type = ?8
        WHERE id = ?9
        "#,
        params![
            &prop.apn,
            &prop.county,
            &prop.year_built,
            &prop.living_area,
            &prop.lot_size,
            &prop.bedrooms,
            &prop.bathrooms,
            &prop.property_type,
            &prop.id,
        ],
    )?;

    if updated != 1 {
        return Err(AppError::NotFound(format!("property {}", prop.id)));
    }
    Ok(())
}

pub fn delete_property(conn: &Connection, id: &str) -> AppResult<()> {
    let deleted = conn.execute("DELETE FROM properties WHERE id = ?1", params![id])?;
    if deleted != 1 {
        return Err(AppError::NotFound(format!("property {id}")));
    }
    Ok(())
}

/// Inserts an ingested record, or refreshes the row with the same id.
///
/// Update-then-insert rather than `ON CONFLICT(id)`, so re-importing a record
/// that carries an APN never trips the APN index on its own row.
pub fn upsert_property(
    conn: &Connection,
    prop: &NormalizedProperty,
    now: NaiveDateTime,
) -> AppResult<()> {
    let updated = conn.execute(
        r#"
        UPDATE properties SET
            address = ?2, city = ?3, state = ?4, zip = ?5,
            apn = ?6, county = ?7, year_built = ?8, living_area = ?9,
            lot_size = ?10, bedrooms = ?11, bathrooms = ?12, property_type = ?13
        WHERE id = ?1
        "#,
        params![
            &prop.id,
            &prop.address,
            &prop.city,
            &prop.state,
            &prop.zip,
            &prop.apn,
            &prop.county,
            &prop.year_built,
            &prop.living_area,
            &prop.lot_size,
            &prop.bedrooms,
            &prop.bathrooms,
            &prop.property_type,
        ],
    )?;
    if updated == 1 {
        return Ok(());
    }

    conn.execute(
        r#"
        INSERT INTO properties (
            id, address, city, state, zip,
            apn, county, year_built, living_area, lot_size,
            bedrooms, bathrooms, property_type, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)
        "#,
        params![
            &prop.id,
            &prop.address,
            &prop.city,
            &prop.state,
            &prop.zip,
            &prop.apn,
            &prop.county,
            &prop.year_built,
            &prop.living_area,
            &prop.lot_size,
            &prop.bedrooms,
            &prop.bathrooms,
            &prop.property_type,
            now,
        ],
    )?;
    Ok(())
}
