//! Positional-argument validation for each command.
//!
//! Argument counts are checked before any value is parsed, so a short
//! argument list always reports a count error.

use crate::encode::{
    parse_decimal, parse_uint, GenericRecord, MachineType, MaintenanceRecord, PredictionRecord,
    SensorReadings, SensorRecord,
};
use crate::errors::{Expected, InputError};

/// Recognised command names.
pub const COMMANDS: &[&str] = &[
    "sensor",
    "prediction",
    "model-prediction",
    "maintenance",
    "hash",
    "commitment",
    "text",
];

/// One parsed unit of work.
#[derive(Clone, Debug, PartialEq)]
pub enum HashRequest {
    Sensor(SensorRecord),
    Prediction(PredictionRecord),
    Maintenance(MaintenanceRecord),
    Generic(GenericRecord),
    /// Sensor readings only, as committed to inside the sensor circuit.
    Commitment(SensorReadings),
    /// A label to pack into one field element.
    Text(String),
}

impl HashRequest {
    pub fn parse<S: AsRef<str>>(command: &str, args: &[S]) -> Result<Self, InputError> {
        let args: Vec<&str> = args.iter().map(AsRef::as_ref).collect();
        match command {
            "sensor" => {
                expect_count(command, &args, 8)?;
                Ok(HashRequest::Sensor(SensorRecord {
                    machine_id: parse_uint("machineId", args[0])?,
                    timestamp: parse_uint("timestamp", args[1])?,
                    readings: parse_readings(&args[2..])?,
                }))
            }
            "commitment" => {
                expect_count(command, &args, 6)?;
                Ok(HashRequest::Commitment(parse_readings(&args)?))
            }
            "prediction" => {
                expect_count(command, &args, 5)?;
                Ok(HashRequest::Prediction(PredictionRecord {
                    data_id: parse_uint("dataId", args[0])?,
                    prediction: parse_uint("prediction", args[1])?,
                    probability_int: parse_uint("probabilityInt", args[2])?,
                    model_version_hash: parse_uint("modelVersionHash", args[3])?,
                    timestamp: parse_uint("timestamp", args[4])?,
                }))
            }
            "model-prediction" => {
                expect_count(command, &args, 5)?;
                Ok(HashRequest::Prediction(PredictionRecord::from_model_output(
                    parse_uint("dataId", args[0])?,
                    parse_uint("prediction", args[1])?,
                    parse_decimal("probability", args[2])?,
                    args[3],
                    parse_uint("timestamp", args[4])?,
                )?))
            }
            "maintenance" => {
                expect_count(command, &args, 4)?;
                Ok(HashRequest::Maintenance(MaintenanceRecord {
                    prediction_id: parse_uint("predictionId", args[0])?,
                    task_type: parse_uint("taskType", args[1])?,
                    priority: parse_uint("priority", args[2])?,
                    timestamp: parse_uint("timestamp", args[3])?,
                }))
            }
            "hash" => {
                if args.is_empty() {
                    return Err(count_error(command, Expected::AtLeast(1), 0));
                }
                let values = args
                    .iter()
                    .enumerate()
                    .map(|(i, a)| parse_uint(&format!("n{}", i + 1), a))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(HashRequest::Generic(GenericRecord(values)))
            }
            "text" => {
                expect_count(command, &args, 1)?;
                Ok(HashRequest::Text(args[0].to_string()))
            }
            other => Err(InputError::UnknownCommand(other.to_string())),
        }
    }

    pub fn command(&self) -> &'static str {
        match self {
            HashRequest::Sensor(_) => "sensor",
            HashRequest::Prediction(_) => "prediction",
            HashRequest::Maintenance(_) => "maintenance",
            HashRequest::Generic(_) => "hash",
            HashRequest::Commitment(_) => "commitment",
            HashRequest::Text(_) => "text",
        }
    }
}

fn parse_readings(args: &[&str]) -> Result<SensorReadings, InputError> {
    Ok(SensorReadings {
        air_temp: parse_decimal("airTemp", args[0])?,
        process_temp: parse_decimal("processTemp", args[1])?,
        rotational_speed: parse_uint("rotationalSpeed", args[2])?,
        torque: parse_decimal("torque", args[3])?,
        tool_wear: parse_uint("toolWear", args[4])?,
        machine_type: args[5].parse::<MachineType>()?,
    })
}

fn expect_count(command: &str, args: &[&str], n: usize) -> Result<(), InputError> {
    if args.len() != n {
        return Err(count_error(command, Expected::Exactly(n), args.len()));
    }
    Ok(())
}

fn count_error(command: &str, expected: Expected, got: usize) -> InputError {
    InputError::ArgumentCount {
        command: command.to_string(),
        expected,
        got,
    }
}
