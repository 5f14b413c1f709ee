//! Encode -> permute -> reduce, one entry point per record kind.

use num_bigint::BigUint;
use tracing::debug;

use crate::crypto::field::{text_to_field, FieldElement};
use crate::crypto::poseidon::{DigestMode, PoseidonRegistry};
use crate::encode::{
    FieldRecord, GenericRecord, MaintenanceRecord, PredictionRecord, SensorReadings, SensorRecord,
};
use crate::errors::FieldprintError;
use crate::request::HashRequest;

/// Owns the permutation instances for the lifetime of the process.
/// Build one and pass it to every hashing call.
#[derive(Default)]
pub struct HashService {
    registry: PoseidonRegistry,
    digest: DigestMode,
}

impl HashService {
    pub fn new(digest: DigestMode) -> Self {
        Self {
            registry: PoseidonRegistry::new(),
            digest,
        }
    }

    pub fn digest_mode(&self) -> DigestMode {
        self.digest
    }

    pub fn registry(&self) -> &PoseidonRegistry {
        &self.registry
    }

    pub fn hash_record<R: FieldRecord>(&self, record: &R) -> Result<FieldElement, FieldprintError> {
        let inputs = record.encode()?;
        debug!(kind = R::KIND, arity = inputs.len(), ?inputs, "encoded record");
        Ok(self.registry.hash(&inputs, self.digest)?)
    }

    pub fn hash_sensor(&self, record: &SensorRecord) -> Result<FieldElement, FieldprintError> {
        self.hash_record(record)
    }

    /// Commitment over the readings alone (no machine id or timestamp).
    pub fn hash_sensor_commitment(
        &self,
        readings: &SensorReadings,
    ) -> Result<FieldElement, FieldprintError> {
        self.hash_record(readings)
    }

    pub fn hash_prediction(
        &self,
        record: &PredictionRecord,
    ) -> Result<FieldElement, FieldprintError> {
        self.hash_record(record)
    }

    pub fn hash_maintenance(
        &self,
        record: &MaintenanceRecord,
    ) -> Result<FieldElement, FieldprintError> {
        self.hash_record(record)
    }

    pub fn hash_generic(&self, values: &[BigUint]) -> Result<FieldElement, FieldprintError> {
        self.hash_record(&GenericRecord(values.to_vec()))
    }

    /// Run one parsed request.
    pub fn execute(&self, request: &HashRequest) -> Result<FieldElement, FieldprintError> {
        match request {
            HashRequest::Sensor(r) => self.hash_sensor(r),
            HashRequest::Prediction(r) => self.hash_prediction(r),
            HashRequest::Maintenance(r) => self.hash_maintenance(r),
            HashRequest::Generic(r) => self.hash_record(r),
            HashRequest::Commitment(r) => self.hash_sensor_commitment(r),
            HashRequest::Text(s) => Ok(text_to_field(s)),
        }
    }
}
