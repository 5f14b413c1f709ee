//! Core library: record encoding, Poseidon commitments over BN254 and
//! result rendering, shared by the CLI and any embedding service.
//!
//! Pipeline: record -> [`encode`] -> integer vector -> [`crypto::poseidon`]
//! -> digest -> [`crypto::field`] reduction -> [`format`] -> text.

pub mod config;
pub mod crypto;
pub mod encode;
pub mod errors;
pub mod format;
pub mod request;
pub mod service;

pub use config::Config;
pub use crypto::field::FieldElement;
pub use crypto::poseidon::DigestMode;
pub use errors::{FieldprintError, FormatError, HashError, InputError};
pub use format::{render, OutputFormat};
pub use request::HashRequest;
pub use service::HashService;

/// Version helper for CLI
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!version().is_empty());
    }
}
