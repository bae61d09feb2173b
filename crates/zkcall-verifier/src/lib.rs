// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! zkcall-verifier: Groth16 verifier contract on Soroban with a
//! snarkjs-shaped `verify_proof(a, b, c, input)` entry point

#![no_std]

mod contract;
mod encoding;
mod types;
mod verifier;

pub use contract::*;
pub use encoding::*;
pub use types::*;
pub use verifier::*;
