mod importer;
mod models;
mod normalize;

pub use importer::import_file;
#[cfg(test)]
pub use importer::import_records;
pub use models::SourceRecord;
pub use normalize::NormalizedProperty;
