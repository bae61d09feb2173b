// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! snarkjs CLI backend.
//!
//! Runs `snarkjs <scheme> fullprove` and `snarkjs zkey export
//! soliditycalldata` in a scratch directory. Requires
//! [snarkjs](https://github.com/iden3/snarkjs) on `$PATH` (or an explicit
//! binary path). Failures carry snarkjs's stderr verbatim.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::process::Output;

use serde_json::Value;
use tokio::process::Command;

use super::ProvingBackend;
use crate::error::{AdapterError, AdapterResult};
use crate::numeric::Numeric;
use crate::proof::{ExportedProof, PublicSignals, RawProof, Scheme, WitnessInput};

const INPUT_FILE: &str = "input.json";
const PROOF_FILE: &str = "proof.json";
const PUBLIC_FILE: &str = "public.json";

#[derive(Clone, Debug)]
pub struct SnarkjsBackend {
    bin: String,
}

impl Default for SnarkjsBackend {
    fn default() -> Self {
        Self::new("snarkjs")
    }
}

impl SnarkjsBackend {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }

    pub fn bin(&self) -> &str {
        &self.bin
    }

    async fn run(&self, args: &[&OsStr]) -> std::io::Result<Output> {
        tracing::debug!(bin = %self.bin, ?args, "spawning snarkjs");
        Command::new(&self.bin).args(args).output().await
    }
}

fn failure_text(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if stderr.trim().is_empty() {
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    } else {
        stderr.trim().to_string()
    }
}

fn read_json(path: &Path) -> AdapterResult<Value> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data)
        .map_err(|e| AdapterError::ProofGeneration(format!("{}: {e}", path.display())))
}

fn write_json(path: &Path, value: &Value) -> AdapterResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| AdapterError::ProofGeneration(e.to_string()))?;
    fs::write(path, json)?;
    Ok(())
}

impl ProvingBackend for SnarkjsBackend {
    fn name(&self) -> &'static str {
        "snarkjs"
    }

    async fn full_prove(
        &self,
        scheme: Scheme,
        witness: &WitnessInput,
        circuit_path: &Path,
        proving_key_path: &Path,
    ) -> AdapterResult<RawProof> {
        let dir = tempfile::tempdir()?;
        let input = dir.path().join(INPUT_FILE);
        let proof = dir.path().join(PROOF_FILE);
        let public = dir.path().join(PUBLIC_FILE);
        write_json(&input, &witness.to_json())?;

        let output = self
            .run(&[
                OsStr::new(scheme.as_str()),
                OsStr::new("fullprove"),
                input.as_os_str(),
                circuit_path.as_os_str(),
                proving_key_path.as_os_str(),
                proof.as_os_str(),
                public.as_os_str(),
            ])
            .await
            .map_err(|e| {
                AdapterError::ProofGeneration(format!("failed to run `{}`: {e}", self.bin))
            })?;

        if !output.status.success() {
            return Err(AdapterError::ProofGeneration(failure_text(&output)));
        }

        Ok(RawProof {
            proof: Numeric::from(read_json(&proof)?),
            public_signals: Numeric::from(read_json(&public)?),
        })
    }

    async fn export_solidity_calldata(
        &self,
        proof: &ExportedProof,
        public_signals: &PublicSignals,
    ) -> AdapterResult<String> {
        let dir = tempfile::tempdir()?;
        let proof_path = dir.path().join(PROOF_FILE);
        let public_path = dir.path().join(PUBLIC_FILE);
        write_json(&proof_path, &proof.to_json())?;
        write_json(&public_path, &public_signals.to_json())?;

        let output = self
            .run(&[
                OsStr::new("zkey"),
                OsStr::new("export"),
                OsStr::new("soliditycalldata"),
                public_path.as_os_str(),
                proof_path.as_os_str(),
            ])
            .await
            .map_err(|e| {
                AdapterError::MalformedProof(format!("failed to run `{}`: {e}", self.bin))
            })?;

        if !output.status.success() {
            return Err(AdapterError::MalformedProof(failure_text(&output)));
        }
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
