//! Arithmetic circuits proved by the in-process zkcall backend.
//!
//! Each circuit takes its private signals in a fixed order (see
//! [`CircuitKind::signals`]) and exposes the product as its single public
//! signal, mirroring the circom `Multiplier` family.

pub mod artifacts;
pub mod multiplier2;
pub mod multiplier3;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use ark_bls12_381::{Bls12_381, Fr};
use ark_groth16::{Groth16, PreparedVerifyingKey, Proof, ProvingKey, VerifyingKey};
use ark_relations::r1cs::{
    ConstraintSynthesizer, ConstraintSystem, ConstraintSystemRef, SynthesisError,
};
use ark_snark::SNARK;
use ark_std::rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

pub use artifacts::{load_artifacts, write_artifacts, CircuitManifest, LoadedArtifacts};
pub use multiplier2::Multiplier2Circuit;
pub use multiplier3::Multiplier3Circuit;

#[derive(Debug, thiserror::Error)]
pub enum CircuitError {
    #[error("unknown circuit: {0}")]
    UnknownCircuit(String),

    #[error("{circuit} expects {expected} witness values, got {got}")]
    WitnessArity {
        circuit: CircuitKind,
        expected: usize,
        got: usize,
    },

    #[error("constraint not satisfied: {0}")]
    Unsatisfied(String),

    #[error("synthesis: {0}")]
    Synthesis(String),

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("manifest: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("key encoding: {0}")]
    KeyEncoding(String),

    #[error("incompatible artifacts: {0}")]
    Incompatible(String),
}

impl From<SynthesisError> for CircuitError {
    fn from(e: SynthesisError) -> Self {
        CircuitError::Synthesis(e.to_string())
    }
}

/// Built-in circuits, addressed by name in artifact manifests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CircuitKind {
    Multiplier2,
    Multiplier3,
}

impl CircuitKind {
    pub const ALL: [CircuitKind; 2] = [CircuitKind::Multiplier2, CircuitKind::Multiplier3];

    pub fn name(&self) -> &'static str {
        match self {
            CircuitKind::Multiplier2 => "multiplier2",
            CircuitKind::Multiplier3 => "multiplier3",
        }
    }

    /// Private signal names, in the order `prove` expects them.
    pub fn signals(&self) -> &'static [&'static str] {
        match self {
            CircuitKind::Multiplier2 => &["a", "b"],
            CircuitKind::Multiplier3 => &["a", "b", "c"],
        }
    }

    pub fn num_public(&self) -> usize {
        1
    }

    /// Compute the public signals natively from the private ones.
    pub fn evaluate(&self, inputs: &[Fr]) -> Result<Vec<Fr>, CircuitError> {
        self.check_arity(inputs)?;
        Ok(vec![inputs.iter().product()])
    }

    fn check_arity(&self, inputs: &[Fr]) -> Result<(), CircuitError> {
        let expected = self.signals().len();
        if inputs.len() != expected {
            return Err(CircuitError::WitnessArity {
                circuit: *self,
                expected,
                got: inputs.len(),
            });
        }
        Ok(())
    }

    pub fn empty(&self) -> Circuit {
        match self {
            CircuitKind::Multiplier2 => Circuit::Multiplier2(Multiplier2Circuit::empty()),
            CircuitKind::Multiplier3 => Circuit::Multiplier3(Multiplier3Circuit::empty()),
        }
    }

    pub fn assigned(&self, inputs: &[Fr]) -> Result<Circuit, CircuitError> {
        self.check_arity(inputs)?;
        Ok(match self {
            CircuitKind::Multiplier2 => {
                Circuit::Multiplier2(Multiplier2Circuit::assigned(inputs[0], inputs[1]))
            }
            CircuitKind::Multiplier3 => Circuit::Multiplier3(Multiplier3Circuit::assigned(
                inputs[0], inputs[1], inputs[2],
            )),
        })
    }
}

impl fmt::Display for CircuitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CircuitKind {
    type Err = CircuitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CircuitKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| CircuitError::UnknownCircuit(s.to_string()))
    }
}

/// Any built-in circuit, dispatched by kind.
#[derive(Clone)]
pub enum Circuit {
    Multiplier2(Multiplier2Circuit),
    Multiplier3(Multiplier3Circuit),
}

impl ConstraintSynthesizer<Fr> for Circuit {
    fn generate_constraints(self, cs: ConstraintSystemRef<Fr>) -> Result<(), SynthesisError> {
        match self {
            Circuit::Multiplier2(c) => c.generate_constraints(cs),
            Circuit::Multiplier3(c) => c.generate_constraints(cs),
        }
    }
}

/// Run Groth16 trusted setup for a circuit
pub fn setup<R: RngCore + CryptoRng>(
    kind: CircuitKind,
    rng: &mut R,
) -> Result<(ProvingKey<Bls12_381>, VerifyingKey<Bls12_381>), CircuitError> {
    Ok(Groth16::<Bls12_381>::circuit_specific_setup(kind.empty(), rng)?)
}

/// Synthesize with a concrete witness and report the first unsatisfied constraint.
///
/// `Groth16::prove` does not check satisfiability; an unsatisfied witness
/// would yield a proof that simply fails to verify.
pub fn check_satisfied(circuit: Circuit) -> Result<(), CircuitError> {
    let cs = ConstraintSystem::<Fr>::new_ref();
    circuit.generate_constraints(cs.clone())?;
    if !cs.is_satisfied()? {
        let at = cs.which_is_unsatisfied()?.unwrap_or_else(|| "unknown".to_string());
        return Err(CircuitError::Unsatisfied(at));
    }
    Ok(())
}

/// Generate a Groth16 proof; returns the proof and its public signals
pub fn prove<R: RngCore + CryptoRng>(
    kind: CircuitKind,
    pk: &ProvingKey<Bls12_381>,
    inputs: &[Fr],
    rng: &mut R,
) -> Result<(Proof<Bls12_381>, Vec<Fr>), CircuitError> {
    let public = kind.evaluate(inputs)?;
    let circuit = kind.assigned(inputs)?;
    check_satisfied(circuit.clone())?;
    let proof = Groth16::<Bls12_381>::prove(pk, circuit, rng)?;
    Ok((proof, public))
}

/// Verify a proof off-chain
pub fn verify_offchain(
    vk: &VerifyingKey<Bls12_381>,
    proof: &Proof<Bls12_381>,
    public_inputs: &[Fr],
) -> bool {
    let pvk = PreparedVerifyingKey::from(vk.clone());
    Groth16::<Bls12_381>::verify_with_processed_vk(&pvk, public_inputs, proof).unwrap_or(false)
}

/// Count constraints in a circuit
pub fn constraint_count(kind: CircuitKind) -> Result<usize, CircuitError> {
    let cs = ConstraintSystem::<Fr>::new_ref();
    cs.set_optimization_goal(ark_relations::r1cs::OptimizationGoal::Constraints);
    cs.set_mode(ark_relations::r1cs::SynthesisMode::Setup);
    kind.empty().generate_constraints(cs.clone())?;
    Ok(cs.num_constraints())
}
