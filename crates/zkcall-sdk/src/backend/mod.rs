// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Proving backends.
//!
//! | Backend | Schemes | Artifacts |
//! |---|---|---|
//! | [`NativeBackend`] | Groth16 | `<name>.circuit.json` + `circuit_final.pk` (see `zkcall setup`) |
//! | [`SnarkjsBackend`] | Groth16, PLONK | `<circuit>.wasm` + `circuit_final.zkey` |

mod native;
mod snarkjs;

use std::path::Path;

use crate::error::AdapterResult;
use crate::proof::{ExportedProof, PublicSignals, RawProof, Scheme, WitnessInput};

pub use native::NativeBackend;
pub use snarkjs::SnarkjsBackend;

/// A prover that emits snarkjs-shaped proof JSON.
#[allow(async_fn_in_trait)]
pub trait ProvingBackend {
    fn name(&self) -> &'static str;

    /// Compute the witness and prove in one step. Paths are used verbatim.
    async fn full_prove(
        &self,
        scheme: Scheme,
        witness: &WitnessInput,
        circuit_path: &Path,
        proving_key_path: &Path,
    ) -> AdapterResult<RawProof>;

    /// Solidity calldata text for a proof, `zkey export soliditycalldata` format
    async fn export_solidity_calldata(
        &self,
        proof: &ExportedProof,
        public_signals: &PublicSignals,
    ) -> AdapterResult<String>;
}

/// Backend chosen at runtime (CLI `--backend`, config `backend`)
pub enum AnyBackend {
    Native(NativeBackend),
    Snarkjs(SnarkjsBackend),
}

impl ProvingBackend for AnyBackend {
    fn name(&self) -> &'static str {
        match self {
            AnyBackend::Native(b) => b.name(),
            AnyBackend::Snarkjs(b) => b.name(),
        }
    }

    async fn full_prove(
        &self,
        scheme: Scheme,
        witness: &WitnessInput,
        circuit_path: &Path,
        proving_key_path: &Path,
    ) -> AdapterResult<RawProof> {
        match self {
            AnyBackend::Native(b) => b.full_prove(scheme, witness, circuit_path, proving_key_path).await,
            AnyBackend::Snarkjs(b) => b.full_prove(scheme, witness, circuit_path, proving_key_path).await,
        }
    }

    async fn export_solidity_calldata(
        &self,
        proof: &ExportedProof,
        public_signals: &PublicSignals,
    ) -> AdapterResult<String> {
        match self {
            AnyBackend::Native(b) => b.export_solidity_calldata(proof, public_signals).await,
            AnyBackend::Snarkjs(b) => b.export_solidity_calldata(proof, public_signals).await,
        }
    }
}
