use serde::Deserialize;

// record
//  ├── source
//  │    ├── name
//  │    └── id
//  ├── location
//  │    ├── address
//  │    │    ├── line
//  │    │    ├── city
//  │    │    ├── state_code
//  │    │    └── postal_code
//  │    └── county
//  │         └── name
//  ├── parcel
//  │    └── apn
//  └── description
//       ├── year_built
//       ├── sqft
//       ├── lot_sqft
//       ├── beds
//       ├── baths
//       └── type

#[derive(Debug, Deserialize)]
pub struct SourceRecord {
    pub source: Source,
    pub location: Location,
    pub parcel: Option<Parcel>,
    pub description: Option<Description>,
}

#[derive(Debug, Deserialize)]
pub struct Source {
    pub name: Option<String>,
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Location {
    pub address: Option<Address>,
    pub county: Option<County>,
}

#[derive(Debug, Deserialize)]
pub struct Address {
    pub line: Option<String>,
    pub city: Option<String>,
    pub state_code: Option<String>,
    pub postal_code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct County {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Parcel {
    pub apn: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Description {
    pub year_built: Option<i64>,
    pub sqft: Option<i64>,
    pub lot_sqft: Option<i64>,
    pub beds: Option<i64>,
    pub baths: Option<f64>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
}
