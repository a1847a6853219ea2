pub mod ocr;
pub mod text;
pub mod ttb_standards;
pub mod validation;
pub mod warning;
