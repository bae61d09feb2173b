// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Typed errors for the proof pipeline.
//!
//! [`ProofAdapter`](crate::ProofAdapter) tags every error with the [`Stage`]
//! it was raised in; [`AdapterError::kind`] looks through the tag. External
//! messages (snarkjs stderr, JSON-RPC errors, Soroban invoke errors) are
//! carried verbatim.

use std::fmt;

/// Pipeline stage that raised an error
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Generate,
    Normalize,
    Export,
    Verify,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Generate => "generate",
            Stage::Normalize => "normalize",
            Stage::Export => "export",
            Stage::Verify => "verify",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("proof generation failed: {0}")]
    ProofGeneration(String),

    #[error("malformed proof: {0}")]
    MalformedProof(String),

    #[error("calldata has {got} elements, scheme needs at least {expected}")]
    CalldataShape { expected: usize, got: usize },

    #[error("verifier reverted: {0}")]
    VerificationRevert(String),

    #[error("config: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{stage}: {error}")]
    Staged { stage: Stage, error: Box<AdapterError> },
}

impl AdapterError {
    /// Tag with the stage that raised it. An existing tag wins.
    pub fn at(self, stage: Stage) -> Self {
        match self {
            staged @ AdapterError::Staged { .. } => staged,
            error => AdapterError::Staged { stage, error: Box::new(error) },
        }
    }

    /// The stage that raised this error.
    ///
    /// Untagged errors (from calling a backend or parser directly) fall back
    /// to the stage their variant usually comes from.
    pub fn stage(&self) -> Stage {
        match self {
            AdapterError::Staged { stage, .. } => *stage,
            AdapterError::ProofGeneration(_) | AdapterError::Io(_) => Stage::Generate,
            AdapterError::MalformedProof(_) => Stage::Normalize,
            AdapterError::CalldataShape { .. } => Stage::Export,
            AdapterError::VerificationRevert(_) | AdapterError::Config(_) => Stage::Verify,
        }
    }

    /// The underlying error, without its stage tag
    pub fn kind(&self) -> &AdapterError {
        match self {
            AdapterError::Staged { error, .. } => error.kind(),
            other => other,
        }
    }
}

impl From<zkcall_circuits::CircuitError> for AdapterError {
    fn from(e: zkcall_circuits::CircuitError) -> Self {
        AdapterError::ProofGeneration(e.to_string())
    }
}

pub type AdapterResult<T> = Result<T, AdapterError>;
