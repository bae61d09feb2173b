use ark_bls12_381::Fr;
use ark_r1cs_std::{alloc::AllocVar, fields::fp::FpVar, fields::FieldVar};
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError};

/// "I know `a`, `b`, `c` such that `a * b * c == d`"
#[derive(Clone)]
pub struct Multiplier3Circuit {
    pub a: Option<Fr>,
    pub b: Option<Fr>,
    pub c: Option<Fr>,
    pub d: Option<Fr>,
}

impl Multiplier3Circuit {
    pub fn empty() -> Self {
        Self { a: None, b: None, c: None, d: None }
    }

    pub fn assigned(a: Fr, b: Fr, c: Fr) -> Self {
        Self { a: Some(a), b: Some(b), c: Some(c), d: Some(a * b * c) }
    }
}

impl ConstraintSynthesizer<Fr> for Multiplier3Circuit {
    fn generate_constraints(self, cs: ConstraintSystemRef<Fr>) -> Result<(), SynthesisError> {
        let d_pub = FpVar::new_input(cs.clone(), || self.d.ok_or(SynthesisError::AssignmentMissing))?;

        let a = FpVar::new_witness(cs.clone(), || self.a.ok_or(SynthesisError::AssignmentMissing))?;
        let b = FpVar::new_witness(cs.clone(), || self.b.ok_or(SynthesisError::AssignmentMissing))?;
        let c = FpVar::new_witness(cs, || self.c.ok_or(SynthesisError::AssignmentMissing))?;

        // ab = a * b, then ab * c == d
        let ab = &a * &b;
        ab.mul_equals(&c, &d_pub)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_relations::r1cs::ConstraintSystem;

    #[test]
    fn product_satisfies() {
        let circuit = Multiplier3Circuit::assigned(Fr::from(1u64), Fr::from(2u64), Fr::from(1u64));
        assert_eq!(circuit.d, Some(Fr::from(2u64)));

        let cs = ConstraintSystem::<Fr>::new_ref();
        circuit.generate_constraints(cs.clone()).unwrap();
        assert!(cs.is_satisfied().unwrap());
    }

    #[test]
    fn wrong_product_unsatisfied() {
        let mut circuit = Multiplier3Circuit::assigned(Fr::from(2u64), Fr::from(3u64), Fr::from(5u64));
        circuit.d = Some(Fr::from(31u64));
        let cs = ConstraintSystem::<Fr>::new_ref();
        circuit.generate_constraints(cs.clone()).unwrap();
        assert!(!cs.is_satisfied().unwrap(), "should fail: 2*3*5 != 31");
    }
}
