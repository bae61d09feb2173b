// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! zkcall verifier: one deployed instance per verification key

use crate::encoding::{decode_inputs, decode_proof};
use crate::types::VerificationKey;
use crate::verifier::verify_groth16;
use soroban_sdk::{contract, contractimpl, contracttype, BytesN, Env, Vec};

#[contracttype]
#[derive(Clone)]
enum DataKey {
    Vk,
}

const INSTANCE_TTL: u32 = 535_680; // ~30 days
const INSTANCE_THRESHOLD: u32 = 267_840; // ~15 days

#[contract]
pub struct Groth16Verifier;

#[contractimpl]
impl Groth16Verifier {
    /// Deploy with the circuit's verification key
    pub fn __constructor(env: Env, vk: VerificationKey) {
        if vk.ic.is_empty() {
            panic!("VK must have at least ic[0]");
        }
        env.storage().instance().set(&DataKey::Vk, &vk);
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_THRESHOLD, INSTANCE_TTL);
    }

    /// Verify a proof given in snarkjs calldata layout.
    ///
    /// Read-only. Returns `false` for malformed shapes and non-canonical
    /// field elements instead of trapping.
    pub fn verify_proof(
        env: Env,
        a: Vec<BytesN<48>>,
        b: Vec<Vec<BytesN<48>>>,
        c: Vec<BytesN<48>>,
        input: Vec<BytesN<32>>,
    ) -> bool {
        let vk = Self::get_vk(env.clone());
        let Some(proof) = decode_proof(&env, &a, &b, &c) else {
            return false;
        };
        let Some(inputs) = decode_inputs(&env, &input, vk.ic.len() - 1) else {
            return false;
        };
        verify_groth16(&env, &vk, &proof, &inputs)
    }

    /// Get the stored verification key
    pub fn get_vk(env: Env) -> VerificationKey {
        env.storage()
            .instance()
            .get(&DataKey::Vk)
            .expect("not initialized")
    }

    /// Number of public inputs `verify_proof` expects
    pub fn num_inputs(env: Env) -> u32 {
        Self::get_vk(env).ic.len() - 1
    }
}
