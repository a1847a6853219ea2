use garde::Validate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Label fields checked by the verification engine, in report order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, EnumString, Display, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    #[strum(serialize = "brandName")]
    BrandName,
    #[strum(serialize = "productType")]
    ProductType,
    #[strum(serialize = "alcoholContent")]
    AlcoholContent,
    #[strum(serialize = "netContents")]
    NetContents,
    #[strum(serialize = "governmentWarning")]
    GovernmentWarning,
}

impl FieldName {
    /// Fixed order used for discrepancy lists.
    pub const ALL: [FieldName; 5] = [
        FieldName::BrandName,
        FieldName::ProductType,
        FieldName::AlcoholContent,
        FieldName::NetContents,
        FieldName::GovernmentWarning,
    ];
}

/// Values the applicant claims are on the label (the application form).
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedLabelData {
    #[garde(length(min = 1, max = 500), custom(not_blank))]
    pub brand_name: String,

    #[garde(length(min = 1, max = 500), custom(not_blank))]
    pub product_type: String,

    /// Free text such as "45", "45%" or "45% Alc./Vol.".
    #[garde(length(min = 1, max = 500), custom(not_blank))]
    pub alcohol_content: String,

    /// Free text such as "750 mL" or "12 fl oz".
    #[garde(length(min = 1, max = 500), custom(not_blank))]
    pub net_contents: String,
}

impl From<ExtractedLabelData> for ExpectedLabelData {
    /// Form values read by OCR; fields it could not read become "".
    fn from(extracted: ExtractedLabelData) -> Self {
        ExpectedLabelData {
            brand_name: extracted.brand_name.unwrap_or_default(),
            product_type: extracted.product_type.unwrap_or_default(),
            alcohol_content: extracted.alcohol_content.unwrap_or_default(),
            net_contents: extracted.net_contents.unwrap_or_default(),
        }
    }
}

fn not_blank(value: &str, _ctx: &()) -> garde::Result {
    if value.trim().is_empty() {
        return Err(garde::Error::new("must not be blank"));
    }
    Ok(())
}

/// Fields read off a label image by the OCR collaborator.
///
/// The per-field values are a best-effort summary and may be `None` even when
/// the text is present somewhere in `full_text`, which is always the
/// authoritative corpus.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedLabelData {
    #[serde(default)]
    pub brand_name: Option<String>,

    #[serde(default)]
    pub product_type: Option<String>,

    #[serde(default)]
    pub alcohol_content: Option<String>,

    #[serde(default)]
    pub net_contents: Option<String>,

    /// The collaborator's own judgement; the engine runs its own phrase check.
    #[serde(default)]
    pub government_warning: bool,

    pub full_text: String,
}
