//! Shared label fixtures for integration tests

#![allow(dead_code)]

use label_verify::services::ttb_standards::GOVERNMENT_WARNING_TEXT;
use label_verify::{ExpectedLabelData, ExtractedLabelData};

/// A labelled scenario: what the applicant claimed and what OCR read.
#[derive(Debug, Clone)]
pub struct TestLabelFixture {
    pub description: &'static str,
    pub expected: ExpectedLabelData,
    pub extracted: ExtractedLabelData,
    pub should_pass: bool,
}

pub fn old_tom_expected() -> ExpectedLabelData {
    ExpectedLabelData {
        brand_name: "Old Tom Distillery".to_string(),
        product_type: "Kentucky Straight Bourbon Whiskey".to_string(),
        alcohol_content: "45".to_string(),
        net_contents: "750 mL".to_string(),
    }
}

pub fn old_tom_extracted() -> ExtractedLabelData {
    ExtractedLabelData {
        brand_name: Some("Old Tom Distillery".to_string()),
        product_type: Some("Kentucky Straight Bourbon Whiskey".to_string()),
        alcohol_content: Some("45% Alc./Vol. (90 Proof)".to_string()),
        net_contents: Some("750 mL".to_string()),
        government_warning: true,
        full_text: format!(
            "OLD TOM DISTILLERY\nKentucky Straight Bourbon Whiskey\n\
             45% Alc./Vol. (90 Proof)\n750 mL\n{}",
            GOVERNMENT_WARNING_TEXT
        ),
    }
}

pub fn stone_creek_expected() -> ExpectedLabelData {
    ExpectedLabelData {
        brand_name: "Stone Creek Vineyards".to_string(),
        product_type: "Cabernet Sauvignon".to_string(),
        alcohol_content: "13.5%".to_string(),
        net_contents: "750 mL".to_string(),
    }
}

/// A wine label where OCR only produced the full text.
pub fn stone_creek_text_only() -> ExtractedLabelData {
    ExtractedLabelData {
        brand_name: None,
        product_type: None,
        alcohol_content: Some("ALC. 13.5% BY VOL.".to_string()),
        net_contents: Some("750ml".to_string()),
        government_warning: false,
        full_text: format!(
            "Stone Creek\nVineyards\n2019 CABERNET SAUVIGNON\nALC. 13.5% BY VOL.\n750ml\n{}",
            GOVERNMENT_WARNING_TEXT.to_uppercase()
        ),
    }
}

pub fn test_fixtures() -> Vec<TestLabelFixture> {
    let mut wrong_abv = old_tom_extracted();
    wrong_abv.alcohol_content = Some("40% Alc./Vol. (80 Proof)".to_string());

    let mut wrong_size = old_tom_extracted();
    wrong_size.net_contents = Some("1 L".to_string());

    let mut no_warning = old_tom_extracted();
    no_warning.full_text = "OLD TOM DISTILLERY\nKentucky Straight Bourbon Whiskey\n45%\n750 mL".to_string();

    vec![
        TestLabelFixture {
            description: "compliant bourbon label",
            expected: old_tom_expected(),
            extracted: old_tom_extracted(),
            should_pass: true,
        },
        TestLabelFixture {
            description: "wine label read as full text only",
            expected: stone_creek_expected(),
            extracted: stone_creek_text_only(),
            should_pass: true,
        },
        TestLabelFixture {
            description: "ABV off by five points",
            expected: old_tom_expected(),
            extracted: wrong_abv,
            should_pass: false,
        },
        TestLabelFixture {
            description: "liter bottle against a 750 mL claim",
            expected: old_tom_expected(),
            extracted: wrong_size,
            should_pass: false,
        },
        TestLabelFixture {
            description: "warning statement missing",
            expected: old_tom_expected(),
            extracted: no_warning,
            should_pass: false,
        },
    ]
}
