pub mod property;
pub mod risk;
