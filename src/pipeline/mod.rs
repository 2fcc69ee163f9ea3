//! Detection and conversion pipeline

pub mod service;

pub use service::ConversionService;
