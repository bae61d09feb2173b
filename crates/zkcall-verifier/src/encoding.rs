// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Calldata → host-type decoding.
//!
//! Coordinates arrive as 48-byte big-endian field elements, public inputs as
//! 32-byte big-endian scalars. Decoding returns `None` for anything the
//! snarkjs Solidity verifier would answer `false` to (non-canonical values,
//! wrong arity) so the contract can reject without trapping.
//!
//! `(0, 0)` is the EVM precompile encoding of the point at infinity and is
//! mapped to the Zcash infinity flag. Any other off-curve point still traps
//! in the host.

use crate::types::Proof;
use soroban_sdk::crypto::bls12_381::{Fr, G1Affine, G2Affine};
use soroban_sdk::{BytesN, Env, Vec};

/// BLS12-381 base field modulus q, big-endian
pub const FQ_MODULUS: [u8; 48] = [
    0x1a, 0x01, 0x11, 0xea, 0x39, 0x7f, 0xe6, 0x9a, 0x4b, 0x1b, 0xa7, 0xb6,
    0x43, 0x4b, 0xac, 0xd7, 0x64, 0x77, 0x4b, 0x84, 0xf3, 0x85, 0x12, 0xbf,
    0x67, 0x30, 0xd2, 0xa0, 0xf6, 0xb0, 0xf6, 0x24, 0x1e, 0xab, 0xff, 0xfe,
    0xb1, 0x53, 0xff, 0xff, 0xb9, 0xfe, 0xff, 0xff, 0xff, 0xff, 0xaa, 0xab,
];

/// BLS12-381 scalar field modulus r, big-endian
pub const FR_MODULUS: [u8; 32] = [
    0x73, 0xed, 0xa7, 0x53, 0x29, 0x9d, 0x7d, 0x48, 0x33, 0x39, 0xd8, 0x08,
    0x09, 0xa1, 0xd8, 0x05, 0x53, 0xbd, 0xa4, 0x02, 0xff, 0xfe, 0x5b, 0xfe,
    0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x01,
];

const INFINITY_FLAG: u8 = 0x40;

fn canonical_fq(coord: &BytesN<48>) -> Option<[u8; 48]> {
    let bytes = coord.to_array();
    // big-endian arrays compare numerically
    if bytes < FQ_MODULUS {
        Some(bytes)
    } else {
        None
    }
}

fn mark_infinity(buf: &mut [u8]) {
    if buf.iter().all(|b| *b == 0) {
        buf[0] = INFINITY_FLAG;
    }
}

/// G1 from `[x, y]`
pub fn decode_g1(env: &Env, coords: &Vec<BytesN<48>>) -> Option<G1Affine> {
    if coords.len() != 2 {
        return None;
    }
    let x = canonical_fq(&coords.get(0)?)?;
    let y = canonical_fq(&coords.get(1)?)?;

    let mut buf = [0u8; 96];
    buf[..48].copy_from_slice(&x);
    buf[48..].copy_from_slice(&y);
    mark_infinity(&mut buf);
    Some(G1Affine::from_bytes(BytesN::from_array(env, &buf)))
}

/// G2 from `[[x.c1, x.c0], [y.c1, y.c0]]` (the snarkjs calldata order,
/// which is also the Zcash serialization order).
pub fn decode_g2(env: &Env, coords: &Vec<Vec<BytesN<48>>>) -> Option<G2Affine> {
    if coords.len() != 2 {
        return None;
    }
    let mut buf = [0u8; 192];
    for (i, pair) in coords.iter().enumerate() {
        if pair.len() != 2 {
            return None;
        }
        let hi = canonical_fq(&pair.get(0)?)?;
        let lo = canonical_fq(&pair.get(1)?)?;
        let off = i * 96;
        buf[off..off + 48].copy_from_slice(&hi);
        buf[off + 48..off + 96].copy_from_slice(&lo);
    }
    mark_infinity(&mut buf);
    Some(G2Affine::from_bytes(BytesN::from_array(env, &buf)))
}

pub fn decode_proof(
    env: &Env,
    a: &Vec<BytesN<48>>,
    b: &Vec<Vec<BytesN<48>>>,
    c: &Vec<BytesN<48>>,
) -> Option<Proof> {
    Some(Proof {
        a: decode_g1(env, a)?,
        b: decode_g2(env, b)?,
        c: decode_g1(env, c)?,
    })
}

/// Public inputs; `None` on arity mismatch or any value >= r
pub fn decode_inputs(env: &Env, input: &Vec<BytesN<32>>, expected: u32) -> Option<Vec<Fr>> {
    if input.len() != expected {
        return None;
    }
    let mut out = Vec::new(env);
    for value in input.iter() {
        if value.to_array() >= FR_MODULUS {
            return None;
        }
        out.push_back(Fr::from_bytes(value));
    }
    Some(out)
}
