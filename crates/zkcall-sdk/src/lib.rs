// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! # zkcall-sdk
//!
//! Proof adapter for on-chain zero-knowledge verifiers.
//!
//! `zkcall-sdk` drives a proving backend for a witness, normalizes the
//! proof's numeric encoding, reshapes it into a verifier contract's
//! calldata layout and asks the contract for its boolean verdict.
//!
//! ## Crate layout
//!
//! | Module | Purpose |
//! |---|---|
//! | [`adapter`] | [`ProofAdapter`]: generate, normalize, export, verify |
//! | [`backend`] | Native arkworks prover and the snarkjs CLI backend |
//! | [`numeric`] | Arbitrary-precision normalization of decimal / hex strings |
//! | [`proof`] | Typed proofs, public signals, witness input |
//! | [`calldata`] | Solidity calldata text ↔ positional tuple |
//! | [`contract`] | Soroban and EVM verifier clients |
//! | [`config`] | `~/.zkcall/config.json` |
//! | [`error`] | [`AdapterError`] and the pipeline [`Stage`] |
//!
//! ## Features
//!
//! - `soroban` (default): the Soroban verifier client, backed by the
//!   `zkcall-verifier` contract crate.

pub mod adapter;
pub mod backend;
pub mod calldata;
pub mod config;
pub mod contract;
pub mod error;
pub mod numeric;
pub mod proof;

pub use adapter::ProofAdapter;
pub use backend::{AnyBackend, NativeBackend, ProvingBackend, SnarkjsBackend};
pub use calldata::{format_solidity_calldata, parse_calldata, CalldataTuple};
pub use contract::{EvmVerifier, VerifierContract};
pub use error::{AdapterError, AdapterResult, Stage};
pub use numeric::{normalize_numeric_encoding, Numeric};
pub use proof::{ExportedProof, PublicSignals, RawProof, Scheme, WitnessInput};
