//! TTB Label Verification
//!
//! Compares the values claimed on a label application (brand name,
//! class/type, alcohol content, net contents) and the mandatory government
//! warning against text read off the label image by a vision OCR service.
//!
//! The engine in [`services::validation`] is a pure function of its inputs;
//! the HTTP routes, OCR client and configuration are a thin shell around it.

pub mod app_state;
pub mod config;
pub mod models;
pub mod routes;
pub mod services;

pub use models::label::{ExpectedLabelData, ExtractedLabelData, FieldName};
pub use models::verification::{FieldVerdict, VerificationReport, WarningVerdict};
pub use services::validation::{verify_label, verify_label_with, MatchThresholds};
