pub mod children;
pub mod connection;
pub mod properties;
pub mod risk;
pub mod runs;
