// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Type definitions for Groth16 verification

use soroban_sdk::crypto::bls12_381::{G1Affine, G2Affine};
use soroban_sdk::{contracttype, Vec};

/// Groth16 verification key for BLS12-381
///
/// IC is a unified vector: ic[0] is the constant term, ic[1..] are coefficients
/// for public inputs.
#[contracttype]
#[derive(Clone, Debug)]
pub struct VerificationKey {
    pub alpha_g1: G1Affine,
    pub beta_g2: G2Affine,
    pub gamma_g2: G2Affine,
    pub delta_g2: G2Affine,
    pub ic: Vec<G1Affine>,
}

/// Decoded Groth16 proof
#[derive(Clone, Debug)]
pub struct Proof {
    pub a: G1Affine,
    pub b: G2Affine,
    pub c: G1Affine,
}
