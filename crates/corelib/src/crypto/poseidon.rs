//! Adapter over the circomlib-compatible Poseidon permutation (BN254, `light-poseidon`).
//!
//! light-poseidon bundles circom parameters for up to 12 inputs. Wider
//! instances (13..=16 inputs) are derived from the Grain LFSR the same way
//! circomlib's tables were, then handed to `Poseidon::new`.
//!
//! The permutation is parameterised by its input count, so the verifier side
//! must use `Poseidon(k)` with the same `k` that produced the digest.
//! [`PoseidonRegistry`] builds each `k` lazily, at most once, and is meant to
//! live for the whole process.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use ark_bn254::Fr;
use ark_crypto_primitives::sponge::poseidon::find_poseidon_ark_and_mds;
use ark_ff::PrimeField;
use light_poseidon::{
    Poseidon, PoseidonBytesHasher, PoseidonHasher, PoseidonParameters, MAX_X5_LEN,
};
use num_bigint::BigUint;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::crypto::field::{bn254_modulus, reduce_be_bytes, FieldElement};
use crate::errors::{FormatError, HashError};

/// Largest input count with circom parameters (state width 17).
pub const MAX_ARITY: usize = 16;

const FULL_ROUNDS: usize = 8;
/// Partial rounds per state width, starting at t = 2 (circomlib `N_ROUNDS_P`).
const PARTIAL_ROUNDS: [usize; MAX_ARITY] = [
    56, 57, 56, 60, 60, 63, 64, 63, 60, 66, 60, 65, 70, 60, 64, 68,
];
const ALPHA: u64 = 5;

/// Which output capability of the primitive to use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestMode {
    /// The primitive hands back a field element.
    #[default]
    Element,
    /// The primitive hands back 32 big-endian bytes.
    #[serde(rename = "bytes")]
    BytesBe,
}

impl std::str::FromStr for DigestMode {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "element" | "field" => Ok(DigestMode::Element),
            "bytes" | "bytes-be" => Ok(DigestMode::BytesBe),
            other => Err(FormatError::UnknownDigestMode(other.to_string())),
        }
    }
}

/// Raw output of one permutation call, before normalisation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Digest {
    Element(BigUint),
    Bytes(Vec<u8>),
}

impl Digest {
    /// Bring the digest into canonical form. Byte digests are decoded
    /// big-endian and reduced; element digests are only range-checked.
    pub fn normalize(self) -> Result<FieldElement, HashError> {
        match self {
            Digest::Element(v) => FieldElement::new(v).ok_or(HashError::DigestOutOfField),
            Digest::Bytes(bytes) => {
                trace!(len = bytes.len(), "reducing byte digest");
                Ok(reduce_be_bytes(&bytes))
            }
        }
    }
}

/// A fixed-arity field permutation.
pub trait Permutation {
    /// Number of inputs absorbed per call.
    fn arity(&self) -> usize;

    /// Absorb exactly [`Self::arity`] canonical inputs and squeeze one digest.
    fn permute(&mut self, inputs: &[BigUint], mode: DigestMode) -> Result<Digest, HashError>;
}

/// `Poseidon(k)` with circomlib's round constants and MDS matrix.
pub struct CircomPoseidon {
    arity: usize,
    inner: Poseidon<Fr>,
}

impl CircomPoseidon {
    pub fn new(arity: usize) -> Result<Self, HashError> {
        if arity == 0 || arity > MAX_ARITY {
            return Err(HashError::UnsupportedArity(arity));
        }
        let width = arity + 1;
        let inner = if width <= MAX_X5_LEN {
            Poseidon::<Fr>::new_circom(arity)
                .map_err(|e| HashError::Permutation(e.to_string()))?
        } else {
            Poseidon::<Fr>::new(grain_parameters(width)?)
        };
        Ok(Self { arity, inner })
    }
}

/// Round constants and MDS matrix for state width `width`, generated with
/// the Grain LFSR (x^5 S-box, 8 full rounds, no skipped matrices).
pub fn grain_parameters(width: usize) -> Result<PoseidonParameters<Fr>, HashError> {
    let partial_rounds = width
        .checked_sub(2)
        .and_then(|i| PARTIAL_ROUNDS.get(i))
        .copied()
        .ok_or(HashError::UnsupportedArity(width.saturating_sub(1)))?;
    let (ark, mds) = find_poseidon_ark_and_mds::<Fr>(
        u64::from(Fr::MODULUS_BIT_SIZE),
        width - 1,
        FULL_ROUNDS as u64,
        partial_rounds as u64,
        0,
    );
    Ok(PoseidonParameters::new(
        ark.into_iter().flatten().collect(),
        mds,
        FULL_ROUNDS,
        partial_rounds,
        width,
        ALPHA,
    ))
}

impl Permutation for CircomPoseidon {
    fn arity(&self) -> usize {
        self.arity
    }

    fn permute(&mut self, inputs: &[BigUint], mode: DigestMode) -> Result<Digest, HashError> {
        if inputs.len() != self.arity {
            return Err(HashError::UnsupportedArity(inputs.len()));
        }
        match mode {
            DigestMode::Element => {
                let elems: Vec<Fr> = inputs.iter().map(|v| Fr::from(v.clone())).collect();
                let out = self
                    .inner
                    .hash(&elems)
                    .map_err(|e| HashError::Permutation(e.to_string()))?;
                Ok(Digest::Element(out.into()))
            }
            DigestMode::BytesBe => {
                let encoded: Vec<[u8; 32]> = inputs.iter().map(be_bytes32).collect();
                let slices: Vec<&[u8]> = encoded.iter().map(|b| b.as_slice()).collect();
                let out = self
                    .inner
                    .hash_bytes_be(&slices)
                    .map_err(|e| HashError::Permutation(e.to_string()))?;
                Ok(Digest::Bytes(out.to_vec()))
            }
        }
    }
}

fn be_bytes32(v: &BigUint) -> [u8; 32] {
    let raw = v.to_bytes_be();
    let mut out = [0u8; 32];
    out[32 - raw.len()..].copy_from_slice(&raw);
    out
}

/// Per-arity cache of constructed permutations.
///
/// Slots are written once on first use and only read afterwards; concurrent
/// first access still runs a single construction per arity.
pub struct PoseidonRegistry {
    slots: Vec<OnceCell<Mutex<CircomPoseidon>>>,
    constructions: AtomicUsize,
}

impl Default for PoseidonRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PoseidonRegistry {
    pub fn new() -> Self {
        Self {
            slots: (0..MAX_ARITY).map(|_| OnceCell::new()).collect(),
            constructions: AtomicUsize::new(0),
        }
    }

    /// How many permutation instances have been built so far.
    pub fn constructions(&self) -> usize {
        self.constructions.load(Ordering::Acquire)
    }

    fn instance(&self, arity: usize) -> Result<&Mutex<CircomPoseidon>, HashError> {
        let slot = arity
            .checked_sub(1)
            .and_then(|i| self.slots.get(i))
            .ok_or(HashError::UnsupportedArity(arity))?;
        slot.get_or_try_init(|| {
            debug!(arity, "constructing Poseidon instance");
            let built = CircomPoseidon::new(arity)?;
            self.constructions.fetch_add(1, Ordering::AcqRel);
            Ok(Mutex::new(built))
        })
    }

    /// Permute `inputs` with the instance matching their length and return
    /// the canonical field element.
    pub fn hash(&self, inputs: &[BigUint], mode: DigestMode) -> Result<FieldElement, HashError> {
        let p = bn254_modulus();
        if let Some(index) = inputs.iter().position(|v| v >= p) {
            return Err(HashError::InputOutOfField { index });
        }
        let cell = self.instance(inputs.len())?;
        let mut perm = cell
            .lock()
            .map_err(|_| HashError::Permutation("permutation lock poisoned".into()))?;
        perm.permute(inputs, mode)?.normalize()
    }
}
