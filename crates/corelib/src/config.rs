use serde::{Deserialize, Serialize};

use crate::crypto::poseidon::DigestMode;
use crate::errors::FormatError;
use crate::format::OutputFormat;

/// Environment variable overriding the default output format.
pub const ENV_FORMAT: &str = "FIELDPRINT_FORMAT";
/// Environment variable overriding the default digest mode.
pub const ENV_DIGEST: &str = "FIELDPRINT_DIGEST";

/// Invocation settings: how digests are read back and how results are printed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub format: OutputFormat, // e.g., "field", "hex"
    #[serde(default)]
    pub digest: DigestMode, // "element" or "bytes"
}

impl Config {
    pub fn new(format: OutputFormat, digest: DigestMode) -> Self {
        Self { format, digest }
    }

    /// Explicit settings win. `FIELDPRINT_FORMAT` / `FIELDPRINT_DIGEST` are
    /// only read (and validated) for the fields left unset.
    pub fn resolve(
        format: Option<OutputFormat>,
        digest: Option<DigestMode>,
    ) -> Result<Self, FormatError> {
        Self::resolve_with(format, digest, |key| std::env::var(key).ok())
    }

    pub(crate) fn resolve_with<F>(
        format: Option<OutputFormat>,
        digest: Option<DigestMode>,
        lookup: F,
    ) -> Result<Self, FormatError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let format = match format {
            Some(f) => f,
            None => lookup(ENV_FORMAT)
                .map(|v| v.parse())
                .transpose()?
                .unwrap_or_default(),
        };
        let digest = match digest {
            Some(d) => d,
            None => lookup(ENV_DIGEST)
                .map(|v| v.parse())
                .transpose()?
                .unwrap_or_default(),
        };
        Ok(Self { format, digest })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_decimal_and_element() {
        let cfg = Config::resolve_with(None, None, |_| None).unwrap();
        assert_eq!(cfg, Config::new(OutputFormat::Field, DigestMode::Element));
    }

    #[test]
    fn env_overrides() {
        let cfg = Config::resolve_with(None, None, |k| match k {
            ENV_FORMAT => Some("json".into()),
            ENV_DIGEST => Some("bytes".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(cfg.format, OutputFormat::Json);
        assert_eq!(cfg.digest, DigestMode::BytesBe);
        assert!(Config::resolve_with(None, None, |_| Some("nope".into())).is_err());
    }

    #[test]
    fn explicit_settings_skip_the_environment() {
        let cfg = Config::resolve_with(
            Some(OutputFormat::Hex),
            Some(DigestMode::Element),
            |_| Some("nope".into()),
        )
        .unwrap();
        assert_eq!(cfg, Config::new(OutputFormat::Hex, DigestMode::Element));
        // only the unset field is validated
        assert!(Config::resolve_with(Some(OutputFormat::Hex), None, |_| Some("nope".into()))
            .is_err());
        let cfg = Config::resolve_with(None, Some(DigestMode::BytesBe), |k| {
            (k == ENV_FORMAT).then(|| "all".to_string())
        })
        .unwrap();
        assert_eq!(cfg, Config::new(OutputFormat::All, DigestMode::BytesBe));
    }

    #[test]
    fn deserializes_partial_json() {
        let cfg: Config = serde_json::from_str(r#"{"digest":"bytes"}"#).unwrap();
        assert_eq!(cfg.format, OutputFormat::Field);
        assert_eq!(cfg.digest, DigestMode::BytesBe);
    }
}
