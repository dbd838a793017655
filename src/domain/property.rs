// src/domain/property.rs

use chrono::NaiveDateTime;
use std::fmt;

/// A row of the `properties` table.
#[derive(Debug, PartialEq, Clone)]
pub struct Property {
    pub id: String,

    // Address fields (used for grouping)
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,

    // Optional facts, merged field by field during deduplication
    pub apn: Option<String>,
    pub county: Option<String>,
    pub year_built: Option<i64>,
    pub living_area: Option<i64>,
    pub lot_size: Option<i64>,
    pub bedrooms: Option<i64>,
    pub bathrooms: Option<f64>,
    pub property_type: Option<String>,

    pub created_at: NaiveDateTime,
}

/// The optional fields that count towards completeness and get merged from
/// duplicates into the survivor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyField {
    YearBuilt,
    LivingArea,
    LotSize,
    Bedrooms,
    Bathrooms,
    PropertyType,
    Apn,
    County,
}

impl PropertyField {
    pub const ALL: [PropertyField; 8] = [
        PropertyField::YearBuilt,
        PropertyField::LivingArea,
        PropertyField::LotSize,
        PropertyField::Bedrooms,
        PropertyField::Bathrooms,
        PropertyField::PropertyType,
        PropertyField::Apn,
        PropertyField::County,
    ];

    #[cfg(test)]
    pub fn column(self) -> &'static str {
        match self {
            PropertyField::YearBuilt => "year_built",
            PropertyField::LivingArea => "living_area",
            PropertyField::LotSize => "lot_size",
            PropertyField::Bedrooms => "bedrooms",
            PropertyField::Bathrooms => "bathrooms",
            PropertyField::PropertyType => "property_type",
            PropertyField::Apn => "apn",
            PropertyField::County => "county",
        }
    }
}

/// Normalized (address, city, zip) tuple that duplicate groups share.
/// Compared field by field, never as a joined string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct GroupKey {
    pub address: String,
    pub city: String,
    pub zip: String,
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}, {:?}, {:?}", self.address, self.city, self.zip)
    }
}

impl Property {
    /// Lower-cased trimmed address and city plus the trimmed zip. Exact match
    /// only, so "St" and "Street" stay distinct.
    pub fn group_key(&self) -> GroupKey {
        GroupKey {
            address: self.address.trim().to_lowercase(),
            city: self.city.trim().to_lowercase(),
            zip: self.zip.trim().to_string(),
        }
    }

    pub fn has_field(&self, field: PropertyField) -> bool {
        match field {
            PropertyField::YearBuilt => self.year_built.is_some(),
            PropertyField::LivingArea => self.living_area.is_some(),
            PropertyField::LotSize => self.lot_size.is_some(),
            PropertyField::Bedrooms => self.bedrooms.is_some(),
            PropertyField::Bathrooms => self.bathrooms.is_some(),
            PropertyField::PropertyType => self.property_type.is_some(),
            PropertyField::Apn => self.apn.is_some(),
            PropertyField::County => self.county.is_some(),
        }
    }

    /// Number of populated optional fields.
    pub fn completeness(&self) -> usize {
        PropertyField::ALL
            .iter()
            .filter(|f| self.has_field(**f))
            .count()
    }

    /// Copies every field that is missing here but present on `other`.
    /// Fields already set are never overwritten. Returns the fields filled.
    pub fn fill_missing_from(&mut self, other: &Property) -> Vec<PropertyField> {
        let mut filled = Vec::new();

        macro_rules! fill {
            ($field:ident, $variant:expr) => {
                if self.$field.is_none() && other.$field.is_some() {
                    self.$field = other.$field.clone();
                    filled.push($variant);
                }
            };
        }

        fill!(year_built, PropertyField::YearBuilt);
        fill!(living_area, PropertyField::LivingArea);
        fill!(lot_size, PropertyField::LotSize);
        fill!(bedrooms, PropertyField::Bedrooms);
        fill!(bathrooms, PropertyField::Bathrooms);
        fill!(property_type, PropertyField::PropertyType);
        fill!(apn, PropertyField::Apn);
        fill!(county, PropertyField::County);

        filled
    }

    /// "123 Main St, Springfield, IL 62701"
    pub fn full_address(&self) -> String {
        format!("{}, {}, {} {}", self.address, self.city, self.state, self.zip)
    }
}

#[cfg(test)]
pub(crate) fn bare_property(id: &str) -> Property {
    use chrono::NaiveDate;

    Property {
        id: id.to_string(),
        address: "12 Oak Ave".to_string(),
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        zip: "62701".to_string(),
        apn: None,
        county: None,
        year_built: None,
        living_area: None,
        lot_size: None,
        bedrooms: None,
        bathrooms: None,
        property_type: None,
        created_at: NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
    }
}
