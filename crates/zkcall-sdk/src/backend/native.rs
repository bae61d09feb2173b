// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! In-process Groth16 prover over BLS12-381.
//!
//! `circuit_path` is the `<name>.circuit.json` manifest written by
//! `zkcall setup`; `proving_key_path` is the matching `circuit_final.pk`.
//! The emitted JSON has the same shape snarkjs writes, with
//! `"curve": "bls12381"`.

use std::path::{Path, PathBuf};

use ark_bls12_381::{Bls12_381, Fq, Fr};
use ark_ff::{BigInteger, PrimeField};
use ark_groth16::Proof;
use ark_std::rand::{rngs::StdRng, SeedableRng};
use num_bigint::BigUint;
use serde_json::{json, Value};
use zkcall_circuits::artifacts::{load_artifacts, LoadedArtifacts};

use super::ProvingBackend;
use crate::calldata::format_solidity_calldata;
use crate::error::{AdapterError, AdapterResult};
use crate::numeric::Numeric;
use crate::proof::{ExportedProof, PublicSignals, RawProof, Scheme, WitnessInput};

pub const CURVE_NAME: &str = "bls12381";

#[derive(Clone, Debug, Default)]
pub struct NativeBackend {
    seed: Option<u64>,
}

impl NativeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deterministic proving randomness, for reproducible test vectors
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    fn rng(&self) -> StdRng {
        let seed = self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or_default()
        });
        StdRng::seed_from_u64(seed)
    }
}

fn to_biguint<F: PrimeField>(f: &F) -> BigUint {
    BigUint::from_bytes_le(&f.into_bigint().to_bytes_le())
}

fn dec<F: PrimeField>(f: &F) -> Value {
    Value::String(to_biguint(f).to_str_radix(10))
}

fn modulus<F: PrimeField>() -> BigUint {
    BigUint::from_bytes_le(&F::MODULUS.to_bytes_le())
}

/// Order the witness by the manifest's signals and lift into `Fr`.
/// Values at or above the scalar modulus are rejected, not reduced.
fn witness_to_fr(artifacts: &LoadedArtifacts, witness: &WitnessInput) -> AdapterResult<Vec<Fr>> {
    let signals = &artifacts.manifest.signals;
    if let Some(unknown) = witness.signals().find(|s| !signals.iter().any(|k| k.as_str() == *s)) {
        return Err(AdapterError::ProofGeneration(format!(
            "unknown signal `{unknown}` for {}",
            artifacts.kind()
        )));
    }
    let r = modulus::<Fr>();
    signals
        .iter()
        .map(|name| {
            let value = witness.get(name).ok_or_else(|| {
                AdapterError::ProofGeneration(format!("missing signal `{name}` for {}", artifacts.kind()))
            })?;
            if *value >= r {
                return Err(AdapterError::ProofGeneration(format!(
                    "signal `{name}` is not a field element"
                )));
            }
            Ok(Fr::from_le_bytes_mod_order(&value.to_bytes_le()))
        })
        .collect()
}

fn g1_json(p: &ark_bls12_381::G1Affine) -> Value {
    if p.infinity {
        return json!(["0", "1", "0"]);
    }
    json!([dec::<Fq>(&p.x), dec::<Fq>(&p.y), "1"])
}

fn g2_json(p: &ark_bls12_381::G2Affine) -> Value {
    if p.infinity {
        return json!([["0", "0"], ["1", "0"], ["0", "0"]]);
    }
    json!([
        [dec::<Fq>(&p.x.c0), dec::<Fq>(&p.x.c1)],
        [dec::<Fq>(&p.y.c0), dec::<Fq>(&p.y.c1)],
        ["1", "0"]
    ])
}

/// snarkjs-shaped `proof.json` for an arkworks proof
pub fn proof_json(proof: &Proof<Bls12_381>) -> Value {
    json!({
        "pi_a": g1_json(&proof.a),
        "pi_b": g2_json(&proof.b),
        "pi_c": g1_json(&proof.c),
        "protocol": "groth16",
        "curve": CURVE_NAME,
    })
}

fn prove_blocking(
    mut rng: StdRng,
    witness: &WitnessInput,
    circuit_path: &Path,
    key_path: &Path,
) -> AdapterResult<RawProof> {
    let artifacts = load_artifacts(circuit_path, key_path)?;
    let inputs = witness_to_fr(&artifacts, witness)?;
    let (proof, public) =
        zkcall_circuits::prove(artifacts.kind(), &artifacts.proving_key, &inputs, &mut rng)?;

    let public_json = Value::Array(public.iter().map(dec::<Fr>).collect());
    Ok(RawProof {
        proof: Numeric::from(proof_json(&proof)),
        public_signals: Numeric::from(public_json),
    })
}

impl ProvingBackend for NativeBackend {
    fn name(&self) -> &'static str {
        "native"
    }

    async fn full_prove(
        &self,
        scheme: Scheme,
        witness: &WitnessInput,
        circuit_path: &Path,
        proving_key_path: &Path,
    ) -> AdapterResult<RawProof> {
        if scheme != Scheme::Groth16 {
            return Err(AdapterError::ProofGeneration(format!(
                "unsupported scheme: native backend proves groth16 only, not {scheme}"
            )));
        }
        let rng = self.rng();
        let witness = witness.clone();
        let circuit: PathBuf = circuit_path.to_path_buf();
        let key: PathBuf = proving_key_path.to_path_buf();

        tokio::task::spawn_blocking(move || prove_blocking(rng, &witness, &circuit, &key))
            .await
            .map_err(|e| AdapterError::ProofGeneration(format!("prover task: {e}")))?
    }

    async fn export_solidity_calldata(
        &self,
        proof: &ExportedProof,
        public_signals: &PublicSignals,
    ) -> AdapterResult<String> {
        format_solidity_calldata(proof, public_signals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zkcall_circuits::{setup, write_artifacts, CircuitKind};

    #[test]
    fn field_conversion_matches_modulus() {
        let r = modulus::<Fr>();
        assert_eq!(
            r.to_str_radix(10),
            "52435875175126190479447740508185965837690552500527637822603658699938581184513"
        );
        assert_eq!(to_biguint(&(Fr::from(0u64) - Fr::from(1u64))), r - 1u8);
    }

    #[test]
    fn witness_ordering_and_range() {
        let dir = tempfile::tempdir().unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let (pk, _) = setup(CircuitKind::Multiplier3, &mut rng).unwrap();
        let paths = write_artifacts(dir.path(), CircuitKind::Multiplier3, &pk).unwrap();
        let artifacts = load_artifacts(&paths.circuit, &paths.proving_key).unwrap();

        let w = WitnessInput::from_pairs(&[("c", "3"), ("a", "1"), ("b", "2")]).unwrap();
        assert_eq!(
            witness_to_fr(&artifacts, &w).unwrap(),
            vec![Fr::from(1u64), Fr::from(2u64), Fr::from(3u64)]
        );

        let r = modulus::<Fr>().to_str_radix(10);
        let w = WitnessInput::from_pairs(&[("a", r.as_str()), ("b", "2"), ("c", "3")]).unwrap();
        let err = witness_to_fr(&artifacts, &w).unwrap_err();
        assert!(err.to_string().contains("not a field element"), "{err}");

        let w = WitnessInput::from_pairs(&[("a", "1"), ("b", "2"), ("d", "3")]).unwrap();
        let err = witness_to_fr(&artifacts, &w).unwrap_err();
        assert!(err.to_string().contains("unknown signal `d`"), "{err}");
    }

    #[tokio::test]
    async fn plonk_unsupported() {
        let err = NativeBackend::new()
            .full_prove(
                Scheme::Plonk,
                &WitnessInput::default(),
                Path::new("x.circuit.json"),
                Path::new("x.pk"),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AdapterError::ProofGeneration(ref m) if m.contains("unsupported scheme")));
    }
}
