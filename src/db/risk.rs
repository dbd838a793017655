use crate::db::properties::find_property;
use crate::domain::risk::{InsuranceClaim, RentalPeriod, RiskInputs};
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection};

/// Loads the related records the risk score is computed from.
pub fn load_risk_inputs(conn: &Connection, property_id: &str) -> AppResult<RiskInputs> {
    let property = find_property(conn, property_id)?
        .ok_or_else(|| AppError::NotFound(format!("property {property_id}")))?;

    let mut stmt = conn.prepare("SELECT amount FROM insurance_claims WHERE property_id = ?1")?;
    let insurance_claims = stmt
        .query_map(params![property_id], |row| {
            Ok(InsuranceClaim {
                amount: row.get(0)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut stmt = conn.prepare("SELECT event_date FROM work_events WHERE property_id = ?1")?;
    let work_event_dates = stmt
        .query_map(params![property_id], |row| row.get::<_, NaiveDate>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    let mut stmt =
        conn.prepare("SELECT start_date, end_date FROM rental_signals WHERE property_id = ?1")?;
    let rental_periods = stmt
        .query_map(params![property_id], |row| {
            Ok(RentalPeriod {
                start_date: row.get(0)?,
                end_date: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let ownership_event_count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM ownership_events WHERE property_id = ?1",
        params![property_id],
        |r| r.get(0),
    )?;

    Ok(RiskInputs {
        year_built: property.year_built,
        insurance_claims,
        work_event_dates,
        rental_periods,
        ownership_event_count: ownership_event_count as usize,
    })
}
