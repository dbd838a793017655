// src/ingest/normalize.rs

use crate::errors::AppError;
use crate::ingest::models::SourceRecord;

/// A source record flattened and validated, ready to upsert into `properties`.
/// This is the boundary between whatever shape ingestion produces and the
/// table the deduplicator works on.
#[derive(Debug, PartialEq, Clone)]
pub struct NormalizedProperty {
    pub id: String,

    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,

    pub apn: Option<String>,
    pub county: Option<String>,
    pub year_built: Option<i64>,
    pub living_area: Option<i64>,
    pub lot_size: Option<i64>,
    pub bedrooms: Option<i64>,
    pub bathrooms: Option<f64>,
    pub property_type: Option<String>,
}

/// Prefix ids with the source so ids can't collide across sources.
/// Example: "attom:12345678"
pub fn make_scoped_id(source: &str, raw_id: &str) -> String {
    format!("{}:{}", source.trim().to_lowercase(), raw_id.trim())
}

/// Trimmed value, with blank strings treated as missing.
fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn required(value: Option<&str>, what: &str) -> Result<String, AppError> {
    non_blank(value).ok_or_else(|| AppError::Validation(format!("Missing or empty {what}")))
}

impl NormalizedProperty {
    pub fn from_source_record(record: &SourceRecord) -> Result<Self, AppError> {
        let address = record
            .location
            .address
            .as_ref()
            .ok_or_else(|| AppError::Validation("Missing address object".into()))?;

        let source_id = required(record.source.id.as_deref(), "source id")?;
        let source_name =
            non_blank(record.source.name.as_deref()).unwrap_or_else(|| "unknown".to_string());

        let description = record.description.as_ref();

        Ok(NormalizedProperty {
            id: make_scoped_id(&source_name, &source_id),
            address: required(address.line.as_deref(), "address line")?,
            city: required(address.city.as_deref(), "city")?,
            state: non_blank(address.state_code.as_deref())
                .map(|s| s.to_uppercase())
                .unwrap_or_default(),
            zip: required(address.postal_code.as_deref(), "postal code")?,
            apn: non_blank(
                record
                    .parcel
                    .as_ref()
                    .and_then(|p| p.apn.as_deref()),
            ),
            county: non_blank(
                record
                    .location
                    .county
                    .as_ref()
                    .and_then(|c| c.name.as_deref()),
            ),
            year_built: description.and_then(|d| d.year_built),
            living_area: description.and_then(|d| d.sqft),
            lot_size: description.and_then(|d| d.lot_sqft),
            bedrooms: description.and_then(|d| d.beds),
            bathrooms: description.and_then(|d| d.baths),
            property_type: non_blank(description.and_then(|d| d.property_type.as_deref())),
        })
    }
}
