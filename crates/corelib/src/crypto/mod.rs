//! Field arithmetic over the BN254 scalar field and the Poseidon adapter
//! that compresses encoded records into one field element.

pub mod field;
pub mod poseidon;
