//! Textual renderings of a computed field element.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::crypto::field::FieldElement;
use crate::errors::FormatError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain decimal, as circuits take public inputs.
    #[default]
    Field,
    /// `0x` + lowercase hex without padding.
    Hex,
    /// One-line JSON object, see [`FieldReport`].
    Json,
    /// Multi-line dump of every representation.
    All,
    /// `0x` + 64 hex digits, for `bytes32` slots.
    Bytes32,
}

impl FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "field" => Ok(OutputFormat::Field),
            "hex" => Ok(OutputFormat::Hex),
            "json" => Ok(OutputFormat::Json),
            "all" => Ok(OutputFormat::All),
            "bytes32" => Ok(OutputFormat::Bytes32),
            other => Err(FormatError::UnknownFormat(other.to_string())),
        }
    }
}

/// JSON shape consumed downstream. `bigint` and `field_element` repeat the
/// decimal value; existing consumers read either key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldReport {
    pub decimal: String,
    pub hex: String,
    pub bigint: String,
    pub field_element: String,
}

impl From<&FieldElement> for FieldReport {
    fn from(fe: &FieldElement) -> Self {
        let decimal = fe.to_decimal();
        Self {
            hex: fe.to_hex(),
            bigint: decimal.clone(),
            field_element: decimal.clone(),
            decimal,
        }
    }
}

/// Render `fe` in the requested format. The output carries no trailing newline.
pub fn render(fe: &FieldElement, format: OutputFormat) -> Result<String, serde_json::Error> {
    Ok(match format {
        OutputFormat::Field => fe.to_decimal(),
        OutputFormat::Hex => fe.to_hex(),
        OutputFormat::Bytes32 => fe.to_hex_padded(),
        OutputFormat::Json => serde_json::to_string(&FieldReport::from(fe))?,
        OutputFormat::All => {
            let dec = fe.to_decimal();
            format!(
                "Decimal: {dec}\nHex: {}\nBigInt: {dec}n\nField Element: {dec}",
                fe.to_hex()
            )
        }
    })
}
