// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Solidity calldata text ↔ [`CalldataTuple`].
//!
//! The text format is what `snarkjs zkey export soliditycalldata` prints:
//!
//! - Groth16: `["a0","a1"],[["b01","b00"],["b11","b10"]],["c0","c1"],["in0",...]`
//!   (G2 limbs swapped to `c1, c0`, the EVM precompile order);
//! - PLONK, snarkjs 0.7+: `["w0",...,"w23"],["in0",...]`, the proof as
//!   24 field words;
//! - PLONK, older snarkjs: `0x<proof bytes>,["in0",...]`.
//!
//! Numbers are `0x`-prefixed hex, zero-padded to 64 digits.

use num_bigint::BigUint;
use serde_json::{json, Value};

use crate::error::{AdapterError, AdapterResult};
use crate::numeric::parse_integer;
use crate::proof::{ExportedProof, G1Point, PublicSignals, Scheme};

/// Minimum Groth16 element count: A(2) + B(4) + C(2)
pub const GROTH16_PROOF_ELEMENTS: usize = 8;

/// Field words in a snarkjs 0.7+ PLONK proof: 9 commitments + 6 evaluations
pub const PLONK_PROOF_WORDS: usize = 24;

/// Width of one PLONK blob word
const WORD: usize = 32;

/// Positional arguments for a verifier's `verifyProof`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CalldataTuple {
    /// Decimal strings throughout; `b` is in calldata (`c1, c0`) order
    Groth16 {
        a: [String; 2],
        b: [[String; 2]; 2],
        c: [String; 2],
        inputs: Vec<String>,
    },
    /// Older snarkjs: the proof as one `bytes` argument
    Plonk {
        proof: Vec<u8>,
        inputs: Vec<String>,
    },
    /// snarkjs 0.7+: the proof as `uint256[24]`, decimal strings
    PlonkWords {
        proof: Vec<String>,
        inputs: Vec<String>,
    },
}

impl CalldataTuple {
    pub fn scheme(&self) -> Scheme {
        match self {
            CalldataTuple::Groth16 { .. } => Scheme::Groth16,
            CalldataTuple::Plonk { .. } | CalldataTuple::PlonkWords { .. } => Scheme::Plonk,
        }
    }

    pub fn inputs(&self) -> &[String] {
        match self {
            CalldataTuple::Groth16 { inputs, .. }
            | CalldataTuple::Plonk { inputs, .. }
            | CalldataTuple::PlonkWords { inputs, .. } => inputs,
        }
    }

    /// Flat element count, as parsed from the text
    pub fn len(&self) -> usize {
        match self {
            CalldataTuple::Groth16 { inputs, .. } => GROTH16_PROOF_ELEMENTS + inputs.len(),
            CalldataTuple::Plonk { inputs, .. } => 1 + inputs.len(),
            CalldataTuple::PlonkWords { proof, inputs } => proof.len() + inputs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Groth16 tuple of all-zero elements with `n` inputs
    pub fn zero_groth16(n: usize) -> Self {
        let z = || "0".to_string();
        CalldataTuple::Groth16 {
            a: [z(), z()],
            b: [[z(), z()], [z(), z()]],
            c: [z(), z()],
            inputs: vec![z(); n],
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            CalldataTuple::Groth16 { a, b, c, inputs } => json!({
                "scheme": "groth16",
                "a": a,
                "b": b,
                "c": c,
                "inputs": inputs,
            }),
            CalldataTuple::Plonk { proof, inputs } => json!({
                "scheme": "plonk",
                "proof": format!("0x{}", hex::encode(proof)),
                "inputs": inputs,
            }),
            CalldataTuple::PlonkWords { proof, inputs } => json!({
                "scheme": "plonk",
                "proof": proof,
                "inputs": inputs,
            }),
        }
    }
}

/// Drop every quote, bracket and whitespace character, then split on `,`
fn tokens(text: &str) -> Vec<String> {
    let stripped: String = text
        .chars()
        .filter(|c| !matches!(c, '"' | '[' | ']') && !c.is_whitespace())
        .collect();
    stripped
        .split(',')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn decimals(toks: &[String]) -> AdapterResult<Vec<String>> {
    toks.iter().map(|t| to_decimal(t)).collect()
}

fn to_decimal(token: &str) -> AdapterResult<String> {
    parse_integer(token)
        .map(|n| n.to_str_radix(10))
        .ok_or_else(|| AdapterError::MalformedProof(format!("calldata element `{token}` is not an integer")))
}

/// Split exported calldata text into the verifier's positional arguments
pub fn parse_calldata(scheme: Scheme, text: &str) -> AdapterResult<CalldataTuple> {
    let toks = tokens(text);
    match scheme {
        Scheme::Groth16 => {
            if toks.len() < GROTH16_PROOF_ELEMENTS {
                return Err(AdapterError::CalldataShape {
                    expected: GROTH16_PROOF_ELEMENTS,
                    got: toks.len(),
                });
            }
            let n = decimals(&toks)?;
            Ok(CalldataTuple::Groth16 {
                a: [n[0].clone(), n[1].clone()],
                b: [[n[2].clone(), n[3].clone()], [n[4].clone(), n[5].clone()]],
                c: [n[6].clone(), n[7].clone()],
                inputs: n[GROTH16_PROOF_ELEMENTS..].to_vec(),
            })
        }
        // the word form opens with the proof array; the bytes form with `0x`
        Scheme::Plonk if text.trim_start().starts_with('[') => {
            if toks.len() < PLONK_PROOF_WORDS {
                return Err(AdapterError::CalldataShape {
                    expected: PLONK_PROOF_WORDS,
                    got: toks.len(),
                });
            }
            let n = decimals(&toks)?;
            let (proof, inputs) = n.split_at(PLONK_PROOF_WORDS);
            Ok(CalldataTuple::PlonkWords {
                proof: proof.to_vec(),
                inputs: inputs.to_vec(),
            })
        }
        Scheme::Plonk => {
            let Some((blob, rest)) = toks.split_first() else {
                return Err(AdapterError::CalldataShape { expected: 1, got: 0 });
            };
            let hex_body = blob.strip_prefix("0x").ok_or_else(|| {
                AdapterError::MalformedProof(format!("PLONK proof `{blob}` is not 0x-prefixed bytes"))
            })?;
            let proof = hex::decode(hex_body)
                .map_err(|e| AdapterError::MalformedProof(format!("PLONK proof bytes: {e}")))?;
            let inputs = decimals(rest)?;
            Ok(CalldataTuple::Plonk { proof, inputs })
        }
    }
}

fn hex_word(n: &BigUint) -> String {
    format!("\"0x{:0>64}\"", n.to_str_radix(16))
}

fn fits<'a>(n: &'a BigUint, what: &str) -> AdapterResult<&'a BigUint> {
    if n.bits() > (WORD * 8) as u64 {
        return Err(AdapterError::MalformedProof(format!(
            "{what} does not fit in a {WORD}-byte word"
        )));
    }
    Ok(n)
}

fn push_word(out: &mut Vec<u8>, n: &BigUint, what: &str) -> AdapterResult<()> {
    let bytes = fits(n, what)?.to_bytes_be();
    out.extend(std::iter::repeat(0u8).take(WORD - bytes.len()));
    out.extend_from_slice(&bytes);
    Ok(())
}

fn push_point(out: &mut Vec<u8>, p: &G1Point, what: &str) -> AdapterResult<()> {
    push_word(out, &p.x, what)?;
    push_word(out, &p.y, what)
}

/// Render a typed proof as Solidity calldata text, snarkjs-compatible.
///
/// PLONK proofs carrying `eval_r` come from older snarkjs and render as a
/// bytes blob; without it they render as the 24-word array. Either way each
/// value takes one 32-byte word, so only curves whose coordinates fit (bn128)
/// can be rendered.
pub fn format_solidity_calldata(
    proof: &ExportedProof,
    public_signals: &PublicSignals,
) -> AdapterResult<String> {
    let inputs = public_signals.iter().map(hex_word).collect::<Vec<_>>().join(",");
    match proof {
        ExportedProof::Groth16(p) => Ok(format!(
            "[{},{}],[[{},{}],[{},{}]],[{},{}],[{}]",
            hex_word(&p.a.x),
            hex_word(&p.a.y),
            hex_word(&p.b.x[1]),
            hex_word(&p.b.x[0]),
            hex_word(&p.b.y[1]),
            hex_word(&p.b.y[0]),
            hex_word(&p.c.x),
            hex_word(&p.c.y),
            inputs,
        )),
        ExportedProof::Plonk(p) if p.evaluations.r.is_none() => {
            let mut words = Vec::with_capacity(PLONK_PROOF_WORDS);
            for (name, point) in p.commitments() {
                words.push(hex_word(fits(&point.x, name)?));
                words.push(hex_word(fits(&point.y, name)?));
            }
            for (name, value) in p.named_evaluations() {
                words.push(hex_word(fits(value, name)?));
            }
            Ok(format!("[{}],[{}]", words.join(","), inputs))
        }
        ExportedProof::Plonk(p) => {
            let mut blob = Vec::new();
            for (name, point) in p.commitments() {
                push_point(&mut blob, point, name)?;
            }
            for (name, value) in p.named_evaluations() {
                push_word(&mut blob, value, name)?;
            }
            Ok(format!("0x{},[{}]", hex::encode(blob), inputs))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proof::{G2Point, Groth16Proof, PlonkEvaluations, PlonkProof};

    fn big(n: u64) -> BigUint {
        BigUint::from(n)
    }

    fn sample_groth16() -> ExportedProof {
        ExportedProof::Groth16(Groth16Proof {
            a: G1Point { x: big(1), y: big(2) },
            b: G2Point { x: [big(3), big(4)], y: [big(5), big(6)] },
            c: G1Point { x: big(7), y: big(8) },
            curve: None,
        })
    }

    #[test]
    fn groth16_layout_and_swap() {
        let text = format_solidity_calldata(&sample_groth16(), &PublicSignals(vec![big(2)])).unwrap();
        assert!(text.starts_with("[\"0x0000000000000000000000000000000000000000000000000000000000000001\""));

        let tuple = parse_calldata(Scheme::Groth16, &text).unwrap();
        assert_eq!(
            tuple,
            CalldataTuple::Groth16 {
                a: ["1".into(), "2".into()],
                b: [["4".into(), "3".into()], ["6".into(), "5".into()]],
                c: ["7".into(), "8".into()],
                inputs: vec!["2".into()],
            }
        );
        assert_eq!(tuple.len(), 9);
    }

    #[test]
    fn groth16_accepts_decimal_and_whitespace() {
        let text = "[ \"1\", \"2\" ],\n[[\"3\",\"4\"],[\"5\",\"6\"]],\n[\"7\",\"0x8\"],[]";
        let tuple = parse_calldata(Scheme::Groth16, text).unwrap();
        assert_eq!(tuple.inputs(), &[] as &[String]);
        let CalldataTuple::Groth16 { c, .. } = tuple else {
            panic!("wrong scheme");
        };
        assert_eq!(c, ["7".to_string(), "8".to_string()]);
    }

    #[test]
    fn groth16_too_few_elements() {
        let err = parse_calldata(Scheme::Groth16, "[\"1\",\"2\"],[[\"3\",\"4\"],[\"5\",\"6\"]],[\"7\"]")
            .unwrap_err();
        assert!(matches!(err, AdapterError::CalldataShape { expected: 8, got: 7 }));

        let err = parse_calldata(Scheme::Groth16, "").unwrap_err();
        assert!(matches!(err, AdapterError::CalldataShape { expected: 8, got: 0 }));
    }

    #[test]
    fn groth16_non_integer_element() {
        let text = "[\"1\",\"2\"],[[\"3\",\"4\"],[\"5\",\"6\"]],[\"7\",\"eight\"],[\"9\"]";
        assert!(matches!(
            parse_calldata(Scheme::Groth16, text),
            Err(AdapterError::MalformedProof(_))
        ));
    }

    #[test]
    fn plonk_blob_and_inputs() {
        let tuple = parse_calldata(Scheme::Plonk, "0xdeadbeef,[\"0x02\",\"3\"]").unwrap();
        assert_eq!(
            tuple,
            CalldataTuple::Plonk {
                proof: vec![0xde, 0xad, 0xbe, 0xef],
                inputs: vec!["2".into(), "3".into()],
            }
        );
        assert_eq!(tuple.scheme(), Scheme::Plonk);
    }

    #[test]
    fn plonk_empty_and_bad_blob() {
        assert!(matches!(
            parse_calldata(Scheme::Plonk, "  "),
            Err(AdapterError::CalldataShape { expected: 1, got: 0 })
        ));
        assert!(matches!(
            parse_calldata(Scheme::Plonk, "0xabc,[\"1\"]"),
            Err(AdapterError::MalformedProof(_))
        ));
        assert!(matches!(
            parse_calldata(Scheme::Plonk, "\"1\",\"2\""),
            Err(AdapterError::MalformedProof(_))
        ));
    }

    fn word_text(n: usize) -> String {
        (1..=n as u64).map(|i| hex_word(&big(i))).collect::<Vec<_>>().join(",")
    }

    #[test]
    fn plonk_word_array_form() {
        let text = format!("[{}],[\"0x02\"]", word_text(PLONK_PROOF_WORDS));
        let tuple = parse_calldata(Scheme::Plonk, &text).unwrap();
        let CalldataTuple::PlonkWords { proof, inputs } = &tuple else {
            panic!("expected the word form, got {tuple:?}");
        };
        assert_eq!(proof.len(), PLONK_PROOF_WORDS);
        assert_eq!(proof[0], "1");
        assert_eq!(proof[23], "24");
        assert_eq!(inputs, &vec!["2".to_string()]);
        assert_eq!(tuple.scheme(), Scheme::Plonk);
        assert_eq!(tuple.len(), 25);
    }

    #[test]
    fn plonk_word_array_too_short() {
        let text = format!("[{}],[\"2\"]", word_text(10));
        assert!(matches!(
            parse_calldata(Scheme::Plonk, &text),
            Err(AdapterError::CalldataShape { expected: 24, got: 11 })
        ));
    }

    #[test]
    fn separators_stripped_inside_tokens() {
        let text = "[\"0x\n01\",\"2\"],[[\"3\",\"4\"],[\"5\",\"6\"]],[\"7\",\"8\"],[\"[9]\"]";
        let tuple = parse_calldata(Scheme::Groth16, text).unwrap();
        let CalldataTuple::Groth16 { a, inputs, .. } = tuple else {
            panic!("wrong scheme");
        };
        assert_eq!(a[0], "1");
        assert_eq!(inputs, vec!["9".to_string()]);
    }

    #[test]
    fn plonk_format_word_layout() {
        let point = |i: u64| G1Point { x: big(2 * i), y: big(2 * i + 1) };
        let proof = ExportedProof::Plonk(PlonkProof {
            a: point(0),
            b: point(1),
            c: point(2),
            z: point(3),
            t1: point(4),
            t2: point(5),
            t3: point(6),
            wxi: point(7),
            wxiw: point(8),
            evaluations: PlonkEvaluations {
                a: big(100),
                b: big(101),
                c: big(102),
                s1: big(103),
                s2: big(104),
                zw: big(105),
                r: Some(big(106)),
            },
            curve: Some("bn128".into()),
        });
        let text = format_solidity_calldata(&proof, &PublicSignals(vec![big(9)])).unwrap();
        let CalldataTuple::Plonk { proof: blob, inputs } = parse_calldata(Scheme::Plonk, &text).unwrap() else {
            panic!("wrong scheme");
        };
        assert_eq!(blob.len(), (18 + 7) * WORD);
        // Wxiw.y is the last commitment word
        assert_eq!(blob[18 * WORD - 1], 17);
        assert_eq!(blob[blob.len() - 1], 106);
        assert_eq!(inputs, vec!["9".to_string()]);
    }

    #[test]
    fn plonk_rejects_wide_coordinates() {
        let proof = PlonkProof {
            a: G1Point { x: BigUint::from(1u8) << 300u32, y: big(0) },
            b: G1Point::default(),
            c: G1Point::default(),
            z: G1Point::default(),
            t1: G1Point::default(),
            t2: G1Point::default(),
            t3: G1Point::default(),
            wxi: G1Point::default(),
            wxiw: G1Point::default(),
            evaluations: PlonkEvaluations::default(),
            curve: Some("bls12381".into()),
        };
        let err = format_solidity_calldata(&ExportedProof::Plonk(proof), &PublicSignals::default())
            .unwrap_err();
        assert!(matches!(err, AdapterError::MalformedProof(ref m) if m.contains("A")), "{err}");
    }

    #[test]
    fn plonk_without_eval_r_formats_as_words() {
        let proof = PlonkProof {
            a: G1Point { x: big(1), y: big(2) },
            b: G1Point::default(),
            c: G1Point::default(),
            z: G1Point::default(),
            t1: G1Point::default(),
            t2: G1Point::default(),
            t3: G1Point::default(),
            wxi: G1Point::default(),
            wxiw: G1Point::default(),
            evaluations: PlonkEvaluations { zw: big(7), ..Default::default() },
            curve: Some("bn128".into()),
        };
        let text = format_solidity_calldata(&ExportedProof::Plonk(proof), &PublicSignals(vec![big(3)]))
            .unwrap();
        let CalldataTuple::PlonkWords { proof, inputs } = parse_calldata(Scheme::Plonk, &text).unwrap() else {
            panic!("expected the word form");
        };
        assert_eq!(proof[..2], ["1".to_string(), "2".to_string()]);
        assert_eq!(proof[23], "7");
        assert_eq!(inputs, vec!["3".to_string()]);
    }

    #[test]
    fn zero_tuple_shape() {
        let t = CalldataTuple::zero_groth16(1);
        assert_eq!(t.len(), 9);
        assert!(t.inputs().iter().all(|i| i == "0"));
    }
}
