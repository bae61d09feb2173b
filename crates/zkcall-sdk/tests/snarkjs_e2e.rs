// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! snarkjs → EVM verifier, both schemes.
//!
//! Needs circom artifacts, snarkjs and a node with the generated Solidity
//! verifiers deployed:
//!
//! ```text
//! ZKCALL_SNARKJS_ARTIFACTS=./build        # multiplier2_js/multiplier2.wasm, groth16.zkey, plonk.zkey
//! ZKCALL_EVM_RPC=http://127.0.0.1:8545
//! ZKCALL_EVM_VERIFIER=0x...               # Groth16 verifier
//! ZKCALL_EVM_PLONK_VERIFIER=0x...         # PLONK verifier
//! cargo test -p zkcall-sdk --test snarkjs_e2e -- --ignored
//! ```

use std::path::PathBuf;

use zkcall_sdk::{
    AdapterError, CalldataTuple, EvmVerifier, ProofAdapter, Scheme, SnarkjsBackend, Stage,
    WitnessInput,
};

struct Env {
    artifacts: PathBuf,
    rpc: String,
}

fn env() -> Env {
    let var = |name: &str| std::env::var(name).unwrap_or_else(|_| panic!("{name} not set"));
    Env {
        artifacts: PathBuf::from(var("ZKCALL_SNARKJS_ARTIFACTS")),
        rpc: var("ZKCALL_EVM_RPC"),
    }
}

fn verifier_for(scheme: Scheme, rpc: &str) -> EvmVerifier {
    let name = match scheme {
        Scheme::Groth16 => "ZKCALL_EVM_VERIFIER",
        Scheme::Plonk => "ZKCALL_EVM_PLONK_VERIFIER",
    };
    let address = std::env::var(name).unwrap_or_else(|_| panic!("{name} not set"));
    EvmVerifier::new(rpc, address)
}

fn adapter() -> ProofAdapter<SnarkjsBackend> {
    let bin = std::env::var("ZKCALL_SNARKJS_BIN").unwrap_or_else(|_| "snarkjs".into());
    ProofAdapter::new(SnarkjsBackend::new(bin))
}

async fn prove(scheme: Scheme, env: &Env) -> CalldataTuple {
    let wasm = env.artifacts.join("multiplier2_js").join("multiplier2.wasm");
    let zkey = env.artifacts.join(format!("{scheme}.zkey"));
    let witness = WitnessInput::from_pairs(&[("a", "1"), ("b", "2")]).unwrap();
    let (_, signals, calldata) = adapter()
        .prove_and_export(scheme, &witness, &wasm, &zkey)
        .await
        .unwrap();
    assert_eq!(signals.to_json(), serde_json::json!(["2"]));
    calldata
}

#[tokio::test]
#[ignore = "needs snarkjs and an EVM node"]
async fn groth16_valid_and_zero() {
    let env = env();
    let verifier = verifier_for(Scheme::Groth16, &env.rpc);
    let calldata = prove(Scheme::Groth16, &env).await;
    assert!(adapter().verify(&verifier, &calldata).await.unwrap());

    let zero = CalldataTuple::zero_groth16(calldata.inputs().len());
    assert!(!adapter().verify(&verifier, &zero).await.unwrap());
}

#[tokio::test]
#[ignore = "needs snarkjs and an EVM node"]
async fn plonk_valid_and_corrupted() {
    let env = env();
    let verifier = verifier_for(Scheme::Plonk, &env.rpc);
    let calldata = prove(Scheme::Plonk, &env).await;
    assert!(adapter().verify(&verifier, &calldata).await.unwrap());

    let corrupted = match calldata {
        CalldataTuple::PlonkWords { proof, inputs } => CalldataTuple::PlonkWords {
            proof: vec!["0".into(); proof.len()],
            inputs,
        },
        CalldataTuple::Plonk { proof, inputs } => CalldataTuple::Plonk {
            proof: vec![0; proof.len()],
            inputs,
        },
        other => panic!("expected plonk calldata, got {other:?}"),
    };
    // a PLONK verifier may return false or revert; it must not accept
    let result = adapter().verify(&verifier, &corrupted).await;
    assert!(!matches!(result, Ok(true)), "corrupted PLONK proof accepted");
}

#[tokio::test]
#[ignore = "needs snarkjs"]
async fn unknown_signal_fails_generation() {
    let artifacts = PathBuf::from(std::env::var("ZKCALL_SNARKJS_ARTIFACTS").expect("ZKCALL_SNARKJS_ARTIFACTS not set"));
    let wasm = artifacts.join("multiplier2_js").join("multiplier2.wasm");
    let zkey = artifacts.join("groth16.zkey");
    // unknown signal: circom's witness calculator rejects it
    let witness = WitnessInput::from_pairs(&[("a", "1"), ("z", "2")]).unwrap();
    let err = adapter()
        .generate_proof(Scheme::Groth16, &witness, &wasm, &zkey)
        .await
        .unwrap_err();
    assert!(matches!(err.kind(), AdapterError::ProofGeneration(_)), "got {err}");
    assert_eq!(err.stage(), Stage::Generate);
}
