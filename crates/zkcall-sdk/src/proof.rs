// Copyright 2026 abhirupbanerjee
// Licensed under the Apache License, Version 2.0

//! Typed proofs, public signals and witness inputs.
//!
//! Backends hand back an untyped [`RawProof`]. After
//! [`normalize_numeric_encoding`](crate::numeric::normalize_numeric_encoding)
//! it is decoded once, against the snarkjs JSON field names, into an
//! [`ExportedProof`]. Everything downstream works on the typed form.
//!
//! Group elements use the snarkjs projective layout: G1 is `[x, y, z]`,
//! G2 is `[[x.c0, x.c1], [y.c0, y.c1], [z.c0, z.c1]]`. `z = 1` is affine,
//! `z = 0` is the point at infinity (decoded as all-zero coordinates).

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AdapterError, AdapterResult};
use crate::numeric::{parse_integer, Numeric};

/// Proof system the backend is asked to run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Groth16,
    Plonk,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Groth16 => "groth16",
            Scheme::Plonk => "plonk",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = AdapterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "groth16" => Ok(Scheme::Groth16),
            "plonk" => Ok(Scheme::Plonk),
            other => Err(AdapterError::ProofGeneration(format!("unsupported scheme: {other}"))),
        }
    }
}

/// Proof and public signals exactly as the backend produced them
#[derive(Clone, Debug, PartialEq)]
pub struct RawProof {
    pub proof: Numeric,
    pub public_signals: Numeric,
}

fn malformed(msg: impl Into<String>) -> AdapterError {
    AdapterError::MalformedProof(msg.into())
}

fn field<'a>(tree: &'a Numeric, name: &str) -> AdapterResult<&'a Numeric> {
    tree.get(name).ok_or_else(|| malformed(format!("missing field `{name}`")))
}

fn integer(value: &Numeric, what: &str) -> AdapterResult<BigUint> {
    value
        .as_integer()
        .cloned()
        .ok_or_else(|| malformed(format!("{what}: expected integer, got {}", value.to_json())))
}

fn list<'a>(value: &'a Numeric, what: &str) -> AdapterResult<&'a [Numeric]> {
    value
        .as_list()
        .ok_or_else(|| malformed(format!("{what}: expected list")))
}

fn dec(n: &BigUint) -> Value {
    Value::String(n.to_str_radix(10))
}

/// Affine G1 point; `(0, 0)` is infinity
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct G1Point {
    pub x: BigUint,
    pub y: BigUint,
}

impl G1Point {
    pub fn decode(value: &Numeric, what: &str) -> AdapterResult<Self> {
        let coords = list(value, what)?;
        if coords.len() != 2 && coords.len() != 3 {
            return Err(malformed(format!(
                "{what}: G1 point needs 2 or 3 coordinates, got {}",
                coords.len()
            )));
        }
        let x = integer(&coords[0], what)?;
        let y = integer(&coords[1], what)?;
        let z = match coords.get(2) {
            Some(z) => integer(z, what)?,
            None => BigUint::from(1u8),
        };
        if z == BigUint::from(0u8) {
            return Ok(G1Point::default());
        }
        if z != BigUint::from(1u8) {
            return Err(malformed(format!("{what}: point is not affine (z = {z})")));
        }
        Ok(G1Point { x, y })
    }

    pub fn is_infinity(&self) -> bool {
        self.x == BigUint::default() && self.y == BigUint::default()
    }

    pub fn to_json(&self) -> Value {
        if self.is_infinity() {
            return json!(["0", "1", "0"]);
        }
        json!([dec(&self.x), dec(&self.y), "1"])
    }
}

/// Affine G2 point, coordinates as `[c0, c1]`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct G2Point {
    pub x: [BigUint; 2],
    pub y: [BigUint; 2],
}

impl G2Point {
    pub fn decode(value: &Numeric, what: &str) -> AdapterResult<Self> {
        let coords = list(value, what)?;
        if coords.len() != 2 && coords.len() != 3 {
            return Err(malformed(format!(
                "{what}: G2 point needs 2 or 3 coordinates, got {}",
                coords.len()
            )));
        }
        let fq2 = |v: &Numeric| -> AdapterResult<[BigUint; 2]> {
            let pair = list(v, what)?;
            if pair.len() != 2 {
                return Err(malformed(format!("{what}: Fq2 element needs 2 limbs, got {}", pair.len())));
            }
            Ok([integer(&pair[0], what)?, integer(&pair[1], what)?])
        };
        let x = fq2(&coords[0])?;
        let y = fq2(&coords[1])?;
        let z = match coords.get(2) {
            Some(z) => fq2(z)?,
            None => [BigUint::from(1u8), BigUint::default()],
        };
        let zero = BigUint::default();
        if z[0] == zero && z[1] == zero {
            return Ok(G2Point::default());
        }
        if z[0] != BigUint::from(1u8) || z[1] != zero {
            return Err(malformed(format!("{what}: point is not affine")));
        }
        Ok(G2Point { x, y })
    }

    pub fn is_infinity(&self) -> bool {
        self.x.iter().chain(self.y.iter()).all(|c| *c == BigUint::default())
    }

    pub fn to_json(&self) -> Value {
        if self.is_infinity() {
            return json!([["0", "0"], ["1", "0"], ["0", "0"]]);
        }
        json!([
            [dec(&self.x[0]), dec(&self.x[1])],
            [dec(&self.y[0]), dec(&self.y[1])],
            ["1", "0"]
        ])
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Groth16Proof {
    pub a: G1Point,
    pub b: G2Point,
    pub c: G1Point,
    pub curve: Option<String>,
}

/// PLONK opening evaluations. `r` is absent in newer snarkjs releases.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlonkEvaluations {
    pub a: BigUint,
    pub b: BigUint,
    pub c: BigUint,
    pub s1: BigUint,
    pub s2: BigUint,
    pub zw: BigUint,
    pub r: Option<BigUint>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlonkProof {
    pub a: G1Point,
    pub b: G1Point,
    pub c: G1Point,
    pub z: G1Point,
    pub t1: G1Point,
    pub t2: G1Point,
    pub t3: G1Point,
    pub wxi: G1Point,
    pub wxiw: G1Point,
    pub evaluations: PlonkEvaluations,
    pub curve: Option<String>,
}

impl PlonkProof {
    /// Commitment names and points in calldata order
    pub fn commitments(&self) -> [(&'static str, &G1Point); 9] {
        [
            ("A", &self.a),
            ("B", &self.b),
            ("C", &self.c),
            ("Z", &self.z),
            ("T1", &self.t1),
            ("T2", &self.t2),
            ("T3", &self.t3),
            ("Wxi", &self.wxi),
            ("Wxiw", &self.wxiw),
        ]
    }

    /// Evaluation names and values in calldata order
    pub fn named_evaluations(&self) -> Vec<(&'static str, &BigUint)> {
        let e = &self.evaluations;
        let mut out = vec![
            ("eval_a", &e.a),
            ("eval_b", &e.b),
            ("eval_c", &e.c),
            ("eval_s1", &e.s1),
            ("eval_s2", &e.s2),
            ("eval_zw", &e.zw),
        ];
        if let Some(r) = &e.r {
            out.push(("eval_r", r));
        }
        out
    }
}

/// A normalized proof, decoded for one scheme
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportedProof {
    Groth16(Groth16Proof),
    Plonk(PlonkProof),
}

impl ExportedProof {
    /// Decode a normalized proof tree. A `protocol` field, when present,
    /// must name the requested scheme.
    pub fn decode(scheme: Scheme, tree: &Numeric) -> AdapterResult<Self> {
        if !matches!(tree, Numeric::Map(_)) {
            return Err(malformed("proof is not an object"));
        }
        if let Some(protocol) = tree.get("protocol") {
            let protocol = protocol
                .as_text()
                .ok_or_else(|| malformed("`protocol` is not a string"))?;
            if protocol != scheme.as_str() {
                return Err(malformed(format!(
                    "proof protocol is {protocol}, expected {scheme}"
                )));
            }
        }
        let curve = tree.get("curve").and_then(Numeric::as_text).map(str::to_string);

        match scheme {
            Scheme::Groth16 => Ok(ExportedProof::Groth16(Groth16Proof {
                a: G1Point::decode(field(tree, "pi_a")?, "pi_a")?,
                b: G2Point::decode(field(tree, "pi_b")?, "pi_b")?,
                c: G1Point::decode(field(tree, "pi_c")?, "pi_c")?,
                curve,
            })),
            Scheme::Plonk => {
                let g1 = |name: &str| G1Point::decode(field(tree, name)?, name);
                let scalar = |name: &str| integer(field(tree, name)?, name);
                Ok(ExportedProof::Plonk(PlonkProof {
                    a: g1("A")?,
                    b: g1("B")?,
                    c: g1("C")?,
                    z: g1("Z")?,
                    t1: g1("T1")?,
                    t2: g1("T2")?,
                    t3: g1("T3")?,
                    wxi: g1("Wxi")?,
                    wxiw: g1("Wxiw")?,
                    evaluations: PlonkEvaluations {
                        a: scalar("eval_a")?,
                        b: scalar("eval_b")?,
                        c: scalar("eval_c")?,
                        s1: scalar("eval_s1")?,
                        s2: scalar("eval_s2")?,
                        zw: scalar("eval_zw")?,
                        r: tree.get("eval_r").map(|v| integer(v, "eval_r")).transpose()?,
                    },
                    curve,
                }))
            }
        }
    }

    pub fn scheme(&self) -> Scheme {
        match self {
            ExportedProof::Groth16(_) => Scheme::Groth16,
            ExportedProof::Plonk(_) => Scheme::Plonk,
        }
    }

    /// snarkjs `proof.json`
    pub fn to_json(&self) -> Value {
        let mut obj = serde_json::Map::new();
        let curve = match self {
            ExportedProof::Groth16(p) => {
                obj.insert("pi_a".into(), p.a.to_json());
                obj.insert("pi_b".into(), p.b.to_json());
                obj.insert("pi_c".into(), p.c.to_json());
                &p.curve
            }
            ExportedProof::Plonk(p) => {
                for (name, point) in p.commitments() {
                    obj.insert(name.into(), point.to_json());
                }
                for (name, value) in p.named_evaluations() {
                    obj.insert(name.into(), dec(value));
                }
                &p.curve
            }
        };
        obj.insert("protocol".into(), json!(self.scheme().as_str()));
        if let Some(curve) = curve {
            obj.insert("curve".into(), json!(curve));
        }
        Value::Object(obj)
    }
}

/// Public signals in verifier input order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PublicSignals(pub Vec<BigUint>);

impl PublicSignals {
    pub fn decode(tree: &Numeric) -> AdapterResult<Self> {
        let items = list(tree, "public signals")?;
        items
            .iter()
            .enumerate()
            .map(|(i, v)| integer(v, &format!("public signal {i}")))
            .collect::<AdapterResult<Vec<_>>>()
            .map(PublicSignals)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BigUint> {
        self.0.iter()
    }

    /// snarkjs `public.json`
    pub fn to_json(&self) -> Value {
        Value::Array(self.0.iter().map(dec).collect())
    }
}

impl From<Vec<BigUint>> for PublicSignals {
    fn from(values: Vec<BigUint>) -> Self {
        PublicSignals(values)
    }
}

/// Circuit input: signal name → unsigned integer.
///
/// Values are parsed once on construction; the map is not mutated afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WitnessInput(BTreeMap<String, BigUint>);

fn witness_value(signal: &str, raw: &str) -> AdapterResult<BigUint> {
    parse_integer(raw).ok_or_else(|| {
        AdapterError::ProofGeneration(format!("signal `{signal}`: `{raw}` is not an unsigned integer"))
    })
}

impl WitnessInput {
    /// Build from `(signal, "decimal" | "0xhex")` pairs
    pub fn from_pairs<K: AsRef<str>, V: AsRef<str>>(pairs: &[(K, V)]) -> AdapterResult<Self> {
        let mut map = BTreeMap::new();
        for (k, v) in pairs {
            let signal = k.as_ref();
            map.insert(signal.to_string(), witness_value(signal, v.as_ref())?);
        }
        Ok(WitnessInput(map))
    }

    /// Parse a circom-style `input.json` object. Values may be strings or
    /// non-negative JSON integers.
    pub fn from_json(value: &Value) -> AdapterResult<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| AdapterError::ProofGeneration("witness input must be a JSON object".into()))?;
        let mut map = BTreeMap::new();
        for (signal, v) in obj {
            let n = match v {
                Value::String(s) => witness_value(signal, s)?,
                Value::Number(n) if n.is_u64() => witness_value(signal, &n.to_string())?,
                other => {
                    return Err(AdapterError::ProofGeneration(format!(
                        "signal `{signal}`: unsupported value {other}"
                    )))
                }
            };
            map.insert(signal.clone(), n);
        }
        Ok(WitnessInput(map))
    }

    pub fn from_file(path: &Path) -> AdapterResult<Self> {
        let data = fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&data).map_err(|e| {
            AdapterError::ProofGeneration(format!("{}: {e}", path.display()))
        })?;
        Self::from_json(&value)
    }

    pub fn get(&self, signal: &str) -> Option<&BigUint> {
        self.0.get(signal)
    }

    pub fn signals(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `input.json` with decimal string values
    pub fn to_json(&self) -> Value {
        Value::Object(self.0.iter().map(|(k, v)| (k.clone(), dec(v))).collect())
    }
}
