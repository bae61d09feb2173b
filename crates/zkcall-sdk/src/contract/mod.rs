// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Verifier contract clients.
//!
//! A verifier is anything exposing a read-only `verifyProof` over the
//! positional arguments of a [`CalldataTuple`]. `Ok(false)` means the
//! verifier rejected the proof; a trap or revert is
//! [`AdapterError::VerificationRevert`](crate::AdapterError::VerificationRevert).

pub mod evm;
#[cfg(feature = "soroban")]
pub mod soroban;

use num_bigint::BigUint;

use crate::calldata::CalldataTuple;
use crate::error::{AdapterError, AdapterResult};
use crate::numeric::parse_integer;

pub use evm::EvmVerifier;

#[allow(async_fn_in_trait)]
pub trait VerifierContract {
    async fn verify_proof(&self, calldata: &CalldataTuple) -> AdapterResult<bool>;
}

/// Left-pad a calldata element into an `N`-byte big-endian word.
/// Values wider than the word are an error, never truncated.
pub(crate) fn be_word<const N: usize>(element: &str) -> AdapterResult<[u8; N]> {
    let n: BigUint = parse_integer(element).ok_or_else(|| {
        AdapterError::MalformedProof(format!("calldata element `{element}` is not an integer"))
    })?;
    let bytes = n.to_bytes_be();
    if bytes.len() > N {
        return Err(AdapterError::MalformedProof(format!(
            "calldata element {element} does not fit in {N} bytes"
        )));
    }
    let mut out = [0u8; N];
    out[N - bytes.len()..].copy_from_slice(&bytes);
    Ok(out)
}
