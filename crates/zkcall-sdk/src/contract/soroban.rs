// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Soroban verifier client.
//!
//! [`Groth16VerifierClient`] is generated from the `zkcall-verifier`
//! contract. Calldata elements are packed as 48-byte big-endian
//! coordinates and 32-byte big-endian inputs; the G2 limb order of the
//! tuple (`c1, c0`) is what the contract expects.

use ark_bls12_381::{Bls12_381, G1Affine as ArkG1, G2Affine as ArkG2};
use ark_groth16::VerifyingKey;
use ark_serialize::CanonicalSerialize;
use soroban_sdk::crypto::bls12_381::{G1Affine, G2Affine};
use soroban_sdk::{BytesN, Env, Vec as SorobanVec};
use zkcall_verifier::VerificationKey;

pub use zkcall_verifier::{Groth16Verifier, Groth16VerifierClient};

use super::{be_word, VerifierContract};
use crate::calldata::CalldataTuple;
use crate::error::{AdapterError, AdapterResult, Stage};

fn coords(env: &Env, elements: &[String]) -> AdapterResult<SorobanVec<BytesN<48>>> {
    let mut out = SorobanVec::new(env);
    for e in elements {
        out.push_back(BytesN::from_array(env, &be_word::<48>(e)?));
    }
    Ok(out)
}

fn inputs(env: &Env, elements: &[String]) -> AdapterResult<SorobanVec<BytesN<32>>> {
    let mut out = SorobanVec::new(env);
    for e in elements {
        out.push_back(BytesN::from_array(env, &be_word::<32>(e)?));
    }
    Ok(out)
}

fn key_error(e: impl std::fmt::Display) -> AdapterError {
    AdapterError::Config(format!("verification key encoding: {e}")).at(Stage::Verify)
}

fn g1(env: &Env, p: &ArkG1) -> AdapterResult<G1Affine> {
    let mut bytes = Vec::with_capacity(96);
    p.serialize_uncompressed(&mut bytes).map_err(key_error)?;
    let arr: [u8; 96] = bytes.try_into().map_err(|_| key_error("G1 is not 96 bytes"))?;
    Ok(G1Affine::from_bytes(BytesN::from_array(env, &arr)))
}

fn g2(env: &Env, p: &ArkG2) -> AdapterResult<G2Affine> {
    let mut bytes = Vec::with_capacity(192);
    p.serialize_uncompressed(&mut bytes).map_err(key_error)?;
    let arr: [u8; 192] = bytes.try_into().map_err(|_| key_error("G2 is not 192 bytes"))?;
    Ok(G2Affine::from_bytes(BytesN::from_array(env, &arr)))
}

/// Convert an arkworks verifying key into the contract's constructor argument.
///
/// arkworks' uncompressed BLS12-381 encoding is the Zcash layout the host
/// functions take, so points are copied byte for byte.
pub fn verification_key(env: &Env, vk: &VerifyingKey<Bls12_381>) -> AdapterResult<VerificationKey> {
    let mut ic = SorobanVec::new(env);
    for p in &vk.gamma_abc_g1 {
        ic.push_back(g1(env, p)?);
    }
    Ok(VerificationKey {
        alpha_g1: g1(env, &vk.alpha_g1)?,
        beta_g2: g2(env, &vk.beta_g2)?,
        gamma_g2: g2(env, &vk.gamma_g2)?,
        delta_g2: g2(env, &vk.delta_g2)?,
        ic,
    })
}

impl VerifierContract for Groth16VerifierClient<'_> {
    async fn verify_proof(&self, calldata: &CalldataTuple) -> AdapterResult<bool> {
        let CalldataTuple::Groth16 { a, b, c, inputs: public } = calldata else {
            return Err(AdapterError::VerificationRevert(
                "Soroban verifier has no plonk entry point".into(),
            ));
        };
        let env = &self.env;
        let a = coords(env, a)?;
        let mut b_arg = SorobanVec::new(env);
        for pair in b {
            b_arg.push_back(coords(env, pair)?);
        }
        let c = coords(env, c)?;
        let public = inputs(env, public)?;

        match self.try_verify_proof(&a, &b_arg, &c, &public) {
            Ok(Ok(valid)) => Ok(valid),
            Ok(Err(e)) => Err(AdapterError::VerificationRevert(format!("{e:?}"))),
            Err(e) => Err(AdapterError::VerificationRevert(format!("{e:?}"))),
        }
    }
}
