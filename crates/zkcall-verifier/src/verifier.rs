// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Groth16 pairing check using Soroban BLS12-381 host functions

use crate::types::{Proof, VerificationKey};
use soroban_sdk::crypto::bls12_381::{Fr, G1Affine};
use soroban_sdk::{BytesN, Env, Vec};

fn fr_neg_one(env: &Env) -> Fr {
    let bls = env.crypto().bls12_381();
    let mut one = [0u8; 32];
    one[31] = 1;
    let zero = Fr::from_bytes(BytesN::from_array(env, &[0u8; 32]));
    bls.fr_sub(&zero, &Fr::from_bytes(BytesN::from_array(env, &one)))
}

/// Verify a Groth16 proof with a single multi-pairing
///
/// Same layout as the snarkjs Solidity verifier, which negates A:
///
/// 1. vk_x = IC[0] + MSM(IC[1..], public_inputs)
/// 2. e(-A,B) * e(alpha,beta) * e(vk_x,gamma) * e(C,delta) == 1
///
/// `public_inputs.len()` must equal `vk.ic.len() - 1`; the contract checks
/// arity before calling in.
pub fn verify_groth16(
    env: &Env,
    vk: &VerificationKey,
    proof: &Proof,
    public_inputs: &Vec<Fr>,
) -> bool {
    let bls = env.crypto().bls12_381();

    let ic_0: G1Affine = vk.ic.get(0).expect("VK must have at least ic[0]");
    let vk_x = if public_inputs.is_empty() {
        ic_0
    } else {
        let msm = bls.g1_msm(vk.ic.slice(1..), public_inputs.clone());
        bls.g1_add(&ic_0, &msm)
    };

    let neg_a = bls.g1_mul(&proof.a, &fr_neg_one(env));

    let g1_points: Vec<G1Affine> = Vec::from_array(
        env,
        [neg_a, vk.alpha_g1.clone(), vk_x, proof.c.clone()],
    );
    let g2_points = Vec::from_array(
        env,
        [
            proof.b.clone(),
            vk.beta_g2.clone(),
            vk.gamma_g2.clone(),
            vk.delta_g2.clone(),
        ],
    );

    bls.pairing_check(g1_points, g2_points)
}
