//! Pipeline output schema

pub mod schema;

pub use schema::ConversionReport;
