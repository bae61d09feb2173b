// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! EVM verifier over JSON-RPC `eth_call`.
//!
//! Targets the Solidity verifiers snarkjs generates:
//!
//! - Groth16: `verifyProof(uint256[2],uint256[2][2],uint256[2],uint256[N])`
//! - PLONK, snarkjs 0.7+: `verifyProof(uint256[24],uint256[N])`
//! - PLONK, older snarkjs: `verifyProof(bytes,uint256[])`
//!
//! `N` is only known at run time, so the static-array entry points get their
//! selector from the signature string; the `bytes` one is declared with
//! `sol!`.
//!
//! The call is read-only. A JSON-RPC error (e.g. `execution reverted`) is a
//! [`VerificationRevert`](AdapterError::VerificationRevert) carrying the
//! node's message.

use alloy_primitives::{keccak256, Bytes, U256};
use alloy_sol_types::{sol, SolCall, SolValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{be_word, VerifierContract};
use crate::calldata::{CalldataTuple, PLONK_PROOF_WORDS};
use crate::error::{AdapterError, AdapterResult};

sol! {
    function verifyProof(bytes proof, uint256[] pubSignals) external view returns (bool);
}

#[derive(Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'a str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<Value>,
}

#[derive(Clone, Debug)]
pub struct EvmVerifier {
    rpc_url: String,
    address: String,
    http: reqwest::Client,
}

impl EvmVerifier {
    pub fn new(rpc_url: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            address: address.into(),
            http: reqwest::Client::new(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    async fn eth_call(&self, data: &[u8]) -> AdapterResult<String> {
        let req = JsonRpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method: "eth_call",
            params: serde_json::json!([
                { "to": self.address, "data": format!("0x{}", hex::encode(data)) },
                "latest"
            ]),
        };
        let revert = |e: reqwest::Error| AdapterError::VerificationRevert(e.to_string());
        let resp: JsonRpcResponse<String> = self
            .http
            .post(&self.rpc_url)
            .json(&req)
            .send()
            .await
            .map_err(revert)?
            .json()
            .await
            .map_err(revert)?;

        if let Some(err) = resp.error {
            let message = err
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| err.to_string());
            return Err(AdapterError::VerificationRevert(message));
        }
        resp.result
            .ok_or_else(|| AdapterError::VerificationRevert("eth_call returned no result".into()))
    }
}

impl VerifierContract for EvmVerifier {
    async fn verify_proof(&self, calldata: &CalldataTuple) -> AdapterResult<bool> {
        let data = encode_call(calldata)?;
        tracing::debug!(address = %self.address, bytes = data.len(), "eth_call verifyProof");
        let ret = self.eth_call(&data).await?;
        decode_bool(&ret)
    }
}

/// Solidity signature of the verifier entry point for this tuple
pub fn function_signature(calldata: &CalldataTuple) -> String {
    let n = calldata.inputs().len();
    match calldata {
        CalldataTuple::Groth16 { .. } => {
            format!("verifyProof(uint256[2],uint256[2][2],uint256[2],uint256[{n}])")
        }
        CalldataTuple::PlonkWords { .. } => {
            format!("verifyProof(uint256[{PLONK_PROOF_WORDS}],uint256[{n}])")
        }
        CalldataTuple::Plonk { .. } => verifyProofCall::SIGNATURE.to_string(),
    }
}

pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

fn uint(element: &str) -> AdapterResult<U256> {
    Ok(U256::from_be_bytes(be_word::<32>(element)?))
}

fn uints(elements: &[String]) -> AdapterResult<Vec<U256>> {
    elements.iter().map(|e| uint(e)).collect()
}

fn pair(p: &[String; 2]) -> AdapterResult<[U256; 2]> {
    Ok([uint(&p[0])?, uint(&p[1])?])
}

/// Selector, the encoded leading arguments, then the inputs as `uint256[N]`
fn static_call(calldata: &CalldataTuple, head: Vec<u8>, inputs: &[U256]) -> Vec<u8> {
    let mut out = selector(&function_signature(calldata)).to_vec();
    out.extend(head);
    for input in inputs {
        out.extend(input.abi_encode());
    }
    out
}

/// ABI-encode `verifyProof(...)` calldata, selector included
pub fn encode_call(calldata: &CalldataTuple) -> AdapterResult<Vec<u8>> {
    let inputs = uints(calldata.inputs())?;
    match calldata {
        CalldataTuple::Groth16 { a, b, c, .. } => {
            let head = (pair(a)?, [pair(&b[0])?, pair(&b[1])?], pair(c)?).abi_encode_params();
            Ok(static_call(calldata, head, &inputs))
        }
        CalldataTuple::PlonkWords { proof, .. } => {
            let words: [U256; PLONK_PROOF_WORDS] = uints(proof)?.try_into().map_err(|w: Vec<U256>| {
                AdapterError::MalformedProof(format!(
                    "PLONK proof has {} words, verifier takes {PLONK_PROOF_WORDS}",
                    w.len()
                ))
            })?;
            Ok(static_call(calldata, words.abi_encode(), &inputs))
        }
        CalldataTuple::Plonk { proof, .. } => Ok(verifyProofCall {
            proof: Bytes::copy_from_slice(proof),
            pubSignals: inputs,
        }
        .abi_encode()),
    }
}

/// Decode an ABI `bool` return value
pub fn decode_bool(ret: &str) -> AdapterResult<bool> {
    let bytes = hex::decode(ret.strip_prefix("0x").unwrap_or(ret))
        .map_err(|e| AdapterError::VerificationRevert(format!("return data {ret}: {e}")))?;
    if bytes.is_empty() {
        // a call to an address without code also lands here
        return Err(AdapterError::VerificationRevert("empty return data".into()));
    }
    bool::abi_decode_validate(&bytes)
        .map_err(|e| AdapterError::VerificationRevert(format!("return data {ret}: {e}")))
}
