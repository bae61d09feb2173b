// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! The proof adapter: generate → normalize → export → verify.
//!
//! Each call is independent; the adapter holds only its backend. Stages run
//! strictly in sequence and nothing is retried. Every error leaving a step is
//! tagged with that step's [`Stage`].
//!
//! ```rust,no_run
//! use std::path::Path;
//! use zkcall_sdk::{EvmVerifier, NativeBackend, ProofAdapter, Scheme, WitnessInput};
//!
//! # async fn example() -> zkcall_sdk::AdapterResult<()> {
//! let adapter = ProofAdapter::new(NativeBackend::new());
//! let witness = WitnessInput::from_pairs(&[("a", "1"), ("b", "2")])?;
//! let (_proof, signals, calldata) = adapter
//!     .prove_and_export(
//!         Scheme::Groth16,
//!         &witness,
//!         Path::new("artifacts/multiplier2.circuit.json"),
//!         Path::new("artifacts/circuit_final.pk"),
//!     )
//!     .await?;
//! assert_eq!(signals.len(), 1);
//!
//! let verifier = EvmVerifier::new("http://127.0.0.1:8545", "0x5FbDB2315678afecb367f032d93F642f64180aa3");
//! let ok = adapter.verify(&verifier, &calldata).await?;
//! # let _ = ok;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use crate::backend::ProvingBackend;
use crate::calldata::{parse_calldata, CalldataTuple};
use crate::contract::VerifierContract;
use crate::error::{AdapterError, AdapterResult, Stage};
use crate::numeric::normalize_numeric_encoding;
use crate::proof::{ExportedProof, PublicSignals, RawProof, Scheme, WitnessInput};

pub struct ProofAdapter<B> {
    backend: B,
}

impl<B: ProvingBackend> ProofAdapter<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Run the backend's full prove. Output is untouched.
    pub async fn generate_proof(
        &self,
        scheme: Scheme,
        witness: &WitnessInput,
        circuit_path: &Path,
        proving_key_path: &Path,
    ) -> AdapterResult<RawProof> {
        tracing::info!(
            backend = self.backend.name(),
            %scheme,
            circuit = %circuit_path.display(),
            signals = witness.len(),
            "generating proof"
        );
        let raw = self
            .backend
            .full_prove(scheme, witness, circuit_path, proving_key_path)
            .await
            .map_err(|e| e.at(Stage::Generate))?;
        tracing::debug!(backend = self.backend.name(), "proof generated");
        Ok(raw)
    }

    /// Normalize numeric leaves and decode against the scheme's schema
    pub fn decode(
        &self,
        scheme: Scheme,
        raw: RawProof,
    ) -> AdapterResult<(ExportedProof, PublicSignals)> {
        let proof = normalize_numeric_encoding(raw.proof);
        let signals = normalize_numeric_encoding(raw.public_signals);
        let decode = || -> AdapterResult<_> {
            Ok((
                ExportedProof::decode(scheme, &proof)?,
                PublicSignals::decode(&signals)?,
            ))
        };
        let (proof, signals) = decode().map_err(|e| e.at(Stage::Normalize))?;
        tracing::debug!(%scheme, public_signals = signals.len(), "proof decoded");
        Ok((proof, signals))
    }

    /// Export Solidity calldata and split it into positional arguments
    pub async fn export_calldata(
        &self,
        scheme: Scheme,
        proof: &ExportedProof,
        public_signals: &PublicSignals,
    ) -> AdapterResult<CalldataTuple> {
        let tuple = self
            .export_text(scheme, proof, public_signals)
            .await
            .and_then(|text| parse_calldata(scheme, &text))
            .map_err(|e| e.at(Stage::Export))?;
        tracing::info!(%scheme, elements = tuple.len(), "calldata exported");
        Ok(tuple)
    }

    async fn export_text(
        &self,
        scheme: Scheme,
        proof: &ExportedProof,
        public_signals: &PublicSignals,
    ) -> AdapterResult<String> {
        if proof.scheme() != scheme {
            return Err(AdapterError::MalformedProof(format!(
                "cannot export a {} proof as {scheme}",
                proof.scheme()
            )));
        }
        self.backend
            .export_solidity_calldata(proof, public_signals)
            .await
    }

    /// Call the verifier once. `Ok(false)` is a rejection, `Err` a revert.
    pub async fn verify<V: VerifierContract>(
        &self,
        contract: &V,
        calldata: &CalldataTuple,
    ) -> AdapterResult<bool> {
        match contract.verify_proof(calldata).await {
            Ok(valid) => {
                tracing::info!(scheme = %calldata.scheme(), valid, "verifier answered");
                Ok(valid)
            }
            Err(e) => {
                tracing::warn!(scheme = %calldata.scheme(), error = %e, "verification call failed");
                Err(e.at(Stage::Verify))
            }
        }
    }

    /// generate → normalize → decode → export
    pub async fn prove_and_export(
        &self,
        scheme: Scheme,
        witness: &WitnessInput,
        circuit_path: &Path,
        proving_key_path: &Path,
    ) -> AdapterResult<(ExportedProof, PublicSignals, CalldataTuple)> {
        let raw = self
            .generate_proof(scheme, witness, circuit_path, proving_key_path)
            .await?;
        let (proof, signals) = self.decode(scheme, raw)?;
        let calldata = self.export_calldata(scheme, &proof, &signals).await?;
        Ok((proof, signals, calldata))
    }
}
