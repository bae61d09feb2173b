use ark_bls12_381::Fr;
use ark_r1cs_std::{alloc::AllocVar, fields::fp::FpVar, fields::FieldVar};
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError};

/// "I know `a`, `b` such that `a * b == c`"
#[derive(Clone)]
pub struct Multiplier2Circuit {
    pub a: Option<Fr>,
    pub b: Option<Fr>,
    pub c: Option<Fr>,
}

impl Multiplier2Circuit {
    pub fn empty() -> Self {
        Self { a: None, b: None, c: None }
    }

    /// Witness with the public product computed natively.
    pub fn assigned(a: Fr, b: Fr) -> Self {
        Self { a: Some(a), b: Some(b), c: Some(a * b) }
    }
}

impl ConstraintSynthesizer<Fr> for Multiplier2Circuit {
    fn generate_constraints(self, cs: ConstraintSystemRef<Fr>) -> Result<(), SynthesisError> {
        // Public input: product
        let c_pub = FpVar::new_input(cs.clone(), || self.c.ok_or(SynthesisError::AssignmentMissing))?;

        let a = FpVar::new_witness(cs.clone(), || self.a.ok_or(SynthesisError::AssignmentMissing))?;
        let b = FpVar::new_witness(cs, || self.b.ok_or(SynthesisError::AssignmentMissing))?;

        a.mul_equals(&b, &c_pub)?;
        Ok(())
    }
}
