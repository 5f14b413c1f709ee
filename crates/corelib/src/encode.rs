//! Record encoding: every record kind maps to an ordered vector of
//! non-negative integers, one per permutation input.
//!
//! Decimal readings use two-decimal fixed point, `floor(x * 100)` evaluated
//! on an IEEE-754 double exactly as the record producers and the circuit
//! side compute it. Digits past the second decimal are dropped, so `36.001`
//! and `36.009` encode identically, and a value whose binary product lands
//! just under an integer (`1.13 * 100 = 112.99999999999999`) floors below it.

use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::{FromPrimitive, Num, Zero};

use crate::crypto::field::text_to_field;
use crate::errors::{Expected, InputError};

/// Multiplier applied to sensor readings before flooring.
pub const READING_SCALE: f64 = 100.0;
/// Multiplier turning a probability into `probabilityInt`.
pub const PROBABILITY_SCALE: f64 = 10_000.0;

/// Parse a non-negative integer field. Signs, fractions and exponents are rejected.
pub fn parse_uint(field: &str, text: &str) -> Result<BigUint, InputError> {
    let t = text.trim();
    if t.is_empty() || !t.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InputError::parse(
            field,
            text,
            "expected a non-negative integer",
        ));
    }
    BigUint::from_str_radix(t, 10).map_err(|e| InputError::parse(field, text, e.to_string()))
}

/// Parse a finite decimal reading. Exponent notation is accepted; `inf`
/// and `NaN` are not.
pub fn parse_decimal(field: &str, text: &str) -> Result<f64, InputError> {
    let value = text
        .trim()
        .parse::<f64>()
        .map_err(|_| InputError::parse(field, text, "expected a decimal number"))?;
    if !value.is_finite() {
        return Err(InputError::parse(
            field,
            text,
            "expected a finite decimal number",
        ));
    }
    Ok(value)
}

/// `floor(value * scale)` as a permutation input. Negative results are rejected.
pub fn fixed_point(field: &str, value: f64, scale: f64) -> Result<BigUint, InputError> {
    let scaled = (value * scale).floor();
    if !scaled.is_finite() {
        return Err(InputError::parse(
            field,
            &value.to_string(),
            "scaled value overflows",
        ));
    }
    if scaled < 0.0 {
        return Err(InputError::NegativeValue {
            field: field.to_string(),
            value: scaled.to_string(),
        });
    }
    // -0.0 lands here too
    if scaled == 0.0 {
        return Ok(BigUint::zero());
    }
    BigUint::from_f64(scaled)
        .ok_or_else(|| InputError::parse(field, &value.to_string(), "not representable"))
}

/// `floor(probability * 10_000)`, the integer confidence a prediction carries.
pub fn probability_to_int(probability: f64) -> Result<BigUint, InputError> {
    fixed_point("probability", probability, PROBABILITY_SCALE)
}

/// Machine quality class as reported by the sensor feed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MachineClass {
    Low = 1,
    Medium = 2,
    High = 3,
}

impl MachineClass {
    pub fn code(self) -> u32 {
        self as u32
    }
}

/// Either a recognised class letter or a numeric code taken as-is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MachineType {
    Known(MachineClass),
    RawNumeric(BigUint),
}

impl MachineType {
    pub fn code(&self) -> BigUint {
        match self {
            MachineType::Known(class) => BigUint::from(class.code()),
            MachineType::RawNumeric(n) => n.clone(),
        }
    }
}

impl FromStr for MachineType {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "L" => Ok(MachineType::Known(MachineClass::Low)),
            "M" => Ok(MachineType::Known(MachineClass::Medium)),
            "H" => Ok(MachineType::Known(MachineClass::High)),
            other => parse_uint("machineType", other)
                .map(MachineType::RawNumeric)
                .map_err(|_| InputError::UnknownCategory(s.to_string())),
        }
    }
}

/// A record that can be committed to with one permutation call.
pub trait FieldRecord {
    /// Short name used in logs and errors.
    const KIND: &'static str;

    /// Number of permutation inputs this record produces.
    fn arity(&self) -> usize;

    fn encode(&self) -> Result<Vec<BigUint>, InputError>;
}

/// The six physical readings of one sensor sample.
#[derive(Clone, Debug, PartialEq)]
pub struct SensorReadings {
    pub air_temp: f64,
    pub process_temp: f64,
    pub rotational_speed: BigUint,
    pub torque: f64,
    pub tool_wear: BigUint,
    pub machine_type: MachineType,
}

impl FieldRecord for SensorReadings {
    const KIND: &'static str = "commitment";

    fn arity(&self) -> usize {
        6
    }

    fn encode(&self) -> Result<Vec<BigUint>, InputError> {
        Ok(vec![
            fixed_point("airTemp", self.air_temp, READING_SCALE)?,
            fixed_point("processTemp", self.process_temp, READING_SCALE)?,
            self.rotational_speed.clone(),
            fixed_point("torque", self.torque, READING_SCALE)?,
            self.tool_wear.clone(),
            self.machine_type.code(),
        ])
    }
}

/// A sensor sample tagged with its machine and time.
#[derive(Clone, Debug, PartialEq)]
pub struct SensorRecord {
    pub machine_id: BigUint,
    pub timestamp: BigUint,
    pub readings: SensorReadings,
}

impl FieldRecord for SensorRecord {
    const KIND: &'static str = "sensor";

    fn arity(&self) -> usize {
        8
    }

    fn encode(&self) -> Result<Vec<BigUint>, InputError> {
        let mut out = Vec::with_capacity(8);
        out.push(self.machine_id.clone());
        out.push(self.timestamp.clone());
        out.extend(self.readings.encode()?);
        Ok(out)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PredictionRecord {
    pub data_id: BigUint,
    pub prediction: BigUint,
    pub probability_int: BigUint,
    pub model_version_hash: BigUint,
    pub timestamp: BigUint,
}

impl PredictionRecord {
    /// Build a record from raw model output: the probability is scaled to
    /// `probabilityInt` and the model label is packed into one element.
    pub fn from_model_output(
        data_id: BigUint,
        prediction: BigUint,
        probability: f64,
        model_version: &str,
        timestamp: BigUint,
    ) -> Result<Self, InputError> {
        Ok(Self {
            data_id,
            prediction,
            probability_int: probability_to_int(probability)?,
            model_version_hash: text_to_field(model_version).into_biguint(),
            timestamp,
        })
    }
}

impl FieldRecord for PredictionRecord {
    const KIND: &'static str = "prediction";

    fn arity(&self) -> usize {
        5
    }

    fn encode(&self) -> Result<Vec<BigUint>, InputError> {
        Ok(vec![
            self.data_id.clone(),
            self.prediction.clone(),
            self.probability_int.clone(),
            self.model_version_hash.clone(),
            self.timestamp.clone(),
        ])
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaintenanceRecord {
    pub prediction_id: BigUint,
    pub task_type: BigUint,
    pub priority: BigUint,
    pub timestamp: BigUint,
}

impl FieldRecord for MaintenanceRecord {
    const KIND: &'static str = "maintenance";

    fn arity(&self) -> usize {
        4
    }

    fn encode(&self) -> Result<Vec<BigUint>, InputError> {
        Ok(vec![
            self.prediction_id.clone(),
            self.task_type.clone(),
            self.priority.clone(),
            self.timestamp.clone(),
        ])
    }
}

/// Caller-supplied inputs, passed through unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenericRecord(pub Vec<BigUint>);

impl FieldRecord for GenericRecord {
    const KIND: &'static str = "hash";

    fn arity(&self) -> usize {
        self.0.len()
    }

    fn encode(&self) -> Result<Vec<BigUint>, InputError> {
        if self.0.is_empty() {
            return Err(InputError::ArgumentCount {
                command: Self::KIND.to_string(),
                expected: Expected::AtLeast(1),
                got: 0,
            });
        }
        Ok(self.0.clone())
    }
}
