//! BN254 scalar field: modulus, reduction and canonical field elements.
//! All hash outputs leave the crate as [`FieldElement`]s, i.e. already reduced into `[0, p)`.

use std::fmt;

use num_bigint::BigUint;
use num_traits::{Num, Zero};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Decimal form of the BN254 scalar field modulus (circom's `p`).
pub const BN254_MODULUS_DEC: &str =
    "21888242871839275222246405745257275088548364400416034343698204186575808495617";

static MODULUS: Lazy<BigUint> =
    Lazy::new(|| BigUint::from_str_radix(BN254_MODULUS_DEC, 10).expect("modulus literal"));

/// Maximum number of bytes of text packed into one field element.
pub const TEXT_FIELD_BYTES: usize = 30;

/// The field prime `p`.
pub fn bn254_modulus() -> &'static BigUint {
    &MODULUS
}

/// `raw mod p`.
pub fn reduce(raw: &BigUint) -> FieldElement {
    FieldElement(raw % bn254_modulus())
}

/// Big-endian accumulation: `acc = acc * 256 + byte`, most significant byte first.
pub fn bytes_to_integer(bytes: &[u8]) -> BigUint {
    bytes
        .iter()
        .fold(BigUint::zero(), |acc, b| (acc << 8u32) + BigUint::from(*b))
}

/// Reduce a big-endian byte string into the field.
pub fn reduce_be_bytes(bytes: &[u8]) -> FieldElement {
    reduce(&bytes_to_integer(bytes))
}

/// Pack a label (e.g. a model version string) into one field element.
///
/// The first [`TEXT_FIELD_BYTES`] UTF-8 bytes are read little-endian
/// (byte `i` weighs `256^i`), then reduced mod `p`. Longer strings are
/// truncated, so labels sharing a 30-byte prefix collide.
pub fn text_to_field(text: &str) -> FieldElement {
    let bytes = text.as_bytes();
    let take = bytes.len().min(TEXT_FIELD_BYTES);
    reduce(&BigUint::from_bytes_le(&bytes[..take]))
}

/// An integer in `[0, p)`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct FieldElement(BigUint);

impl FieldElement {
    /// Accepts `value` only if it is already canonical.
    pub fn new(value: BigUint) -> Option<Self> {
        (value < *bn254_modulus()).then_some(FieldElement(value))
    }

    pub fn zero() -> Self {
        FieldElement(BigUint::zero())
    }

    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }

    pub fn into_biguint(self) -> BigUint {
        self.0
    }

    pub fn to_decimal(&self) -> String {
        self.0.to_str_radix(10)
    }

    /// `0x`-prefixed lowercase hex, no padding.
    pub fn to_hex(&self) -> String {
        format!("0x{}", self.0.to_str_radix(16))
    }

    /// `0x`-prefixed lowercase hex, zero-padded to 32 bytes.
    pub fn to_hex_padded(&self) -> String {
        format!("0x{:0>64}", self.0.to_str_radix(16))
    }

    /// 32-byte big-endian encoding.
    pub fn to_be_bytes32(&self) -> [u8; 32] {
        let raw = self.0.to_bytes_be();
        let mut out = [0u8; 32];
        out[32 - raw.len()..].copy_from_slice(&raw);
        out
    }

    /// Parse a decimal or `0x`-prefixed hex string; the value must be below `p`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let value = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) if !hex.is_empty() => BigUint::from_str_radix(hex, 16).ok()?,
            Some(_) => return None,
            None => BigUint::from_str_radix(s, 10).ok()?,
        };
        Self::new(value)
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<FieldElement> for String {
    fn from(fe: FieldElement) -> Self {
        fe.to_decimal()
    }
}

impl TryFrom<String> for FieldElement {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        FieldElement::parse(&s).ok_or_else(|| format!("'{s}' is not a canonical field element"))
    }
}

impl From<u64> for FieldElement {
    fn from(v: u64) -> Self {
        FieldElement(BigUint::from(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modulus_is_254_bits() {
        assert_eq!(bn254_modulus().bits(), 254);
    }

    #[test]
    fn reduce_wraps_at_modulus() {
        let p = bn254_modulus().clone();
        assert_eq!(reduce(&p), FieldElement::zero());
        assert_eq!(reduce(&(p.clone() + 5u32)), FieldElement::from(5));
        let ones = reduce_be_bytes(&[0xff; 64]);
        assert!(ones.as_biguint() < &p);
    }

    #[test]
    fn bytes_are_big_endian() {
        assert_eq!(bytes_to_integer(&[]), BigUint::zero());
        assert_eq!(bytes_to_integer(&[0x01, 0x00]), BigUint::from(256u32));
        assert_eq!(bytes_to_integer(&[0x00, 0x00, 0x2a]), BigUint::from(42u32));
    }

    #[test]
    fn hex_renderings() {
        let fe = FieldElement::from(255);
        assert_eq!(fe.to_hex(), "0xff");
        assert_eq!(fe.to_hex_padded(), format!("0x{}ff", "0".repeat(62)));
        assert_eq!(FieldElement::zero().to_hex(), "0x0");
        assert_eq!(fe.to_be_bytes32()[31], 0xff);
    }

    #[test]
    fn parse_rejects_non_canonical() {
        assert_eq!(FieldElement::parse("0x2a"), Some(FieldElement::from(42)));
        assert_eq!(FieldElement::parse("42"), Some(FieldElement::from(42)));
        assert!(FieldElement::parse(BN254_MODULUS_DEC).is_none());
        assert!(FieldElement::parse("0x").is_none());
        assert!(FieldElement::parse("-1").is_none());
    }

    #[test]
    fn text_is_little_endian_and_truncated() {
        assert_eq!(text_to_field("A"), FieldElement::from(0x41));
        assert_eq!(text_to_field("AB"), FieldElement::from(0x4241));
        let long = "x".repeat(40);
        assert_eq!(text_to_field(&long), text_to_field(&long[..30]));
        assert!(text_to_field("LSTM-CNN-v1.0").as_biguint() < bn254_modulus());
    }
}
