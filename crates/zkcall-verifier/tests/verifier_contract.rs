// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Contract tests for zkcall-verifier: deploy, verify_proof, rejects

use ark_bls12_381::{Bls12_381, Fr as ArkFr, G1Affine as ArkG1, G2Affine as ArkG2};
use ark_serialize::CanonicalSerialize;
use ark_std::rand::{rngs::StdRng, SeedableRng};
use soroban_sdk::crypto::bls12_381::{G1Affine, G2Affine};
use soroban_sdk::{BytesN, Env, Vec};
use zkcall_circuits::CircuitKind;
use zkcall_verifier::{Groth16Verifier, Groth16VerifierClient, VerificationKey, FQ_MODULUS, FR_MODULUS};

// ── ark → Soroban helpers ──

fn g1_bytes(p: &ArkG1) -> [u8; 96] {
    let mut bytes = std::vec::Vec::new();
    p.serialize_uncompressed(&mut bytes).unwrap();
    bytes.try_into().unwrap()
}

fn g2_bytes(p: &ArkG2) -> [u8; 192] {
    let mut bytes = std::vec::Vec::new();
    p.serialize_uncompressed(&mut bytes).unwrap();
    bytes.try_into().unwrap()
}

fn fr_bytes(fr: &ArkFr) -> [u8; 32] {
    let mut bytes = std::vec::Vec::new();
    fr.serialize_compressed(&mut bytes).unwrap();
    bytes.reverse();
    bytes.try_into().unwrap()
}

fn coord(env: &Env, chunk: &[u8]) -> BytesN<48> {
    BytesN::from_array(env, &chunk.try_into().unwrap())
}

fn g1_coords(env: &Env, p: &ArkG1) -> Vec<BytesN<48>> {
    let b = g1_bytes(p);
    Vec::from_array(env, [coord(env, &b[..48]), coord(env, &b[48..])])
}

fn g2_coords(env: &Env, p: &ArkG2) -> Vec<Vec<BytesN<48>>> {
    let b = g2_bytes(p);
    Vec::from_array(
        env,
        [
            Vec::from_array(env, [coord(env, &b[..48]), coord(env, &b[48..96])]),
            Vec::from_array(env, [coord(env, &b[96..144]), coord(env, &b[144..])]),
        ],
    )
}

fn inputs(env: &Env, values: &[ArkFr]) -> Vec<BytesN<32>> {
    let mut out = Vec::new(env);
    for v in values {
        out.push_back(BytesN::from_array(env, &fr_bytes(v)));
    }
    out
}

fn soroban_vk(env: &Env, vk: &ark_groth16::VerifyingKey<Bls12_381>) -> VerificationKey {
    let mut ic = Vec::new(env);
    for p in &vk.gamma_abc_g1 {
        ic.push_back(G1Affine::from_bytes(BytesN::from_array(env, &g1_bytes(p))));
    }
    VerificationKey {
        alpha_g1: G1Affine::from_bytes(BytesN::from_array(env, &g1_bytes(&vk.alpha_g1))),
        beta_g2: G2Affine::from_bytes(BytesN::from_array(env, &g2_bytes(&vk.beta_g2))),
        gamma_g2: G2Affine::from_bytes(BytesN::from_array(env, &g2_bytes(&vk.gamma_g2))),
        delta_g2: G2Affine::from_bytes(BytesN::from_array(env, &g2_bytes(&vk.delta_g2))),
        ic,
    }
}

// ── Scenario ──

struct Scenario {
    vk: ark_groth16::VerifyingKey<Bls12_381>,
    proof: ark_groth16::Proof<Bls12_381>,
    public: std::vec::Vec<ArkFr>,
}

fn multiplier2_scenario() -> Scenario {
    let mut rng = StdRng::seed_from_u64(42);
    let (pk, vk) = zkcall_circuits::setup(CircuitKind::Multiplier2, &mut rng).unwrap();
    let witness = [ArkFr::from(1u64), ArkFr::from(2u64)];
    let (proof, public) =
        zkcall_circuits::prove(CircuitKind::Multiplier2, &pk, &witness, &mut rng).unwrap();
    assert!(zkcall_circuits::verify_offchain(&vk, &proof, &public));
    Scenario { vk, proof, public }
}

fn deploy<'a>(env: &'a Env, vk: &ark_groth16::VerifyingKey<Bls12_381>) -> Groth16VerifierClient<'a> {
    let id = env.register(Groth16Verifier, (soroban_vk(env, vk),));
    Groth16VerifierClient::new(env, &id)
}

fn zero_g1(env: &Env) -> Vec<BytesN<48>> {
    Vec::from_array(env, [BytesN::from_array(env, &[0u8; 48]), BytesN::from_array(env, &[0u8; 48])])
}

fn zero_g2(env: &Env) -> Vec<Vec<BytesN<48>>> {
    Vec::from_array(env, [zero_g1(env), zero_g1(env)])
}

// ── Tests ──

#[test]
fn valid_proof_verifies() {
    let s = multiplier2_scenario();
    let env = Env::default();
    let client = deploy(&env, &s.vk);

    assert!(client.verify_proof(
        &g1_coords(&env, &s.proof.a),
        &g2_coords(&env, &s.proof.b),
        &g1_coords(&env, &s.proof.c),
        &inputs(&env, &s.public),
    ));
}

#[test]
fn tampered_input_rejected() {
    let s = multiplier2_scenario();
    let env = Env::default();
    let client = deploy(&env, &s.vk);

    assert!(!client.verify_proof(
        &g1_coords(&env, &s.proof.a),
        &g2_coords(&env, &s.proof.b),
        &g1_coords(&env, &s.proof.c),
        &inputs(&env, &[ArkFr::from(3u64)]),
    ));
}

#[test]
fn all_zero_calldata_returns_false() {
    let s = multiplier2_scenario();
    let env = Env::default();
    let client = deploy(&env, &s.vk);

    let result = client.try_verify_proof(
        &zero_g1(&env),
        &zero_g2(&env),
        &zero_g1(&env),
        &Vec::from_array(&env, [BytesN::from_array(&env, &[0u8; 32])]),
    );
    assert!(
        matches!(result, Ok(Ok(false))),
        "zero tuple must return false, not revert: {result:?}"
    );
}

#[test]
fn wrong_input_count_returns_false() {
    let s = multiplier2_scenario();
    let env = Env::default();
    let client = deploy(&env, &s.vk);

    let two = [s.public[0], s.public[0]];
    assert!(!client.verify_proof(
        &g1_coords(&env, &s.proof.a),
        &g2_coords(&env, &s.proof.b),
        &g1_coords(&env, &s.proof.c),
        &inputs(&env, &two),
    ));
}

#[test]
fn wrong_point_arity_returns_false() {
    let s = multiplier2_scenario();
    let env = Env::default();
    let client = deploy(&env, &s.vk);

    let mut short_a = g1_coords(&env, &s.proof.a);
    short_a.pop_back();
    assert!(!client.verify_proof(
        &short_a,
        &g2_coords(&env, &s.proof.b),
        &g1_coords(&env, &s.proof.c),
        &inputs(&env, &s.public),
    ));
}

#[test]
fn non_canonical_coordinate_returns_false() {
    let s = multiplier2_scenario();
    let env = Env::default();
    let client = deploy(&env, &s.vk);

    let mut a = g1_coords(&env, &s.proof.a);
    a.set(0, BytesN::from_array(&env, &FQ_MODULUS));
    assert!(!client.verify_proof(
        &a,
        &g2_coords(&env, &s.proof.b),
        &g1_coords(&env, &s.proof.c),
        &inputs(&env, &s.public),
    ));
}

#[test]
fn input_above_modulus_returns_false() {
    let s = multiplier2_scenario();
    let env = Env::default();
    let client = deploy(&env, &s.vk);

    let over = Vec::from_array(&env, [BytesN::from_array(&env, &FR_MODULUS)]);
    assert!(!client.verify_proof(
        &g1_coords(&env, &s.proof.a),
        &g2_coords(&env, &s.proof.b),
        &g1_coords(&env, &s.proof.c),
        &over,
    ));
}

#[test]
fn off_curve_point_reverts() {
    let s = multiplier2_scenario();
    let env = Env::default();
    let client = deploy(&env, &s.vk);

    let mut one = [0u8; 48];
    one[47] = 1;
    let bogus = Vec::from_array(&env, [BytesN::from_array(&env, &one), BytesN::from_array(&env, &one)]);
    let result = client.try_verify_proof(
        &bogus,
        &g2_coords(&env, &s.proof.b),
        &g1_coords(&env, &s.proof.c),
        &inputs(&env, &s.public),
    );
    assert!(result.is_err(), "off-curve point should trap, got {result:?}");
}

#[test]
fn stored_vk_and_arity() {
    let s = multiplier2_scenario();
    let env = Env::default();
    let client = deploy(&env, &s.vk);

    assert_eq!(client.num_inputs(), 1);
    let stored = client.get_vk();
    assert_eq!(stored.ic.len(), 2);
    assert_eq!(
        stored.alpha_g1.to_bytes(),
        soroban_vk(&env, &s.vk).alpha_g1.to_bytes()
    );
}

#[test]
fn each_deploy_is_independent() {
    let s = multiplier2_scenario();
    let env = Env::default();
    let first = deploy(&env, &s.vk);
    let second = deploy(&env, &s.vk);
    assert_ne!(first.address, second.address);
    assert_eq!(first.num_inputs(), second.num_inputs());
}
