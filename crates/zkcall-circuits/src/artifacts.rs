//! On-disk artifacts for the in-process prover.
//!
//! A setup run writes two files into one directory:
//!
//! - `<name>.circuit.json`: manifest naming the circuit, its signals and the
//!   hex-encoded (compressed) verifying key;
//! - `circuit_final.pk`: the compressed Groth16 proving key.
//!
//! Both paths are handed to the prover verbatim. Loading checks that the
//! proving key belongs to the manifest's circuit.

use std::fs;
use std::path::{Path, PathBuf};

use ark_bls12_381::Bls12_381;
use ark_groth16::{ProvingKey, VerifyingKey};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use serde::{Deserialize, Serialize};

use crate::{CircuitError, CircuitKind};

pub const PROVING_KEY_FILE: &str = "circuit_final.pk";
pub const CURVE: &str = "bls12-381";

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CircuitManifest {
    pub circuit: CircuitKind,
    pub curve: String,
    pub signals: Vec<String>,
    pub public_outputs: usize,
    pub verifying_key: String,
}

impl CircuitManifest {
    pub fn file_name(kind: CircuitKind) -> String {
        format!("{}.circuit.json", kind.name())
    }

    pub fn verifying_key(&self) -> Result<VerifyingKey<Bls12_381>, CircuitError> {
        let bytes = hex::decode(&self.verifying_key)
            .map_err(|e| CircuitError::KeyEncoding(format!("verifying key hex: {e}")))?;
        VerifyingKey::deserialize_compressed(&bytes[..])
            .map_err(|e| CircuitError::KeyEncoding(format!("verifying key: {e}")))
    }
}

pub struct ArtifactPaths {
    pub circuit: PathBuf,
    pub proving_key: PathBuf,
}

pub struct LoadedArtifacts {
    pub manifest: CircuitManifest,
    pub proving_key: ProvingKey<Bls12_381>,
}

impl LoadedArtifacts {
    pub fn kind(&self) -> CircuitKind {
        self.manifest.circuit
    }

    pub fn verifying_key(&self) -> &VerifyingKey<Bls12_381> {
        &self.proving_key.vk
    }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> CircuitError + '_ {
    move |source| CircuitError::Io { path: path.to_path_buf(), source }
}

fn vk_hex(vk: &VerifyingKey<Bls12_381>) -> Result<String, CircuitError> {
    let mut bytes = Vec::new();
    vk.serialize_compressed(&mut bytes)
        .map_err(|e| CircuitError::KeyEncoding(e.to_string()))?;
    Ok(hex::encode(bytes))
}

/// Write manifest + proving key for `kind` into `dir` (created if missing)
pub fn write_artifacts(
    dir: &Path,
    kind: CircuitKind,
    pk: &ProvingKey<Bls12_381>,
) -> Result<ArtifactPaths, CircuitError> {
    fs::create_dir_all(dir).map_err(io_err(dir))?;

    let manifest = CircuitManifest {
        circuit: kind,
        curve: CURVE.to_string(),
        signals: kind.signals().iter().map(|s| s.to_string()).collect(),
        public_outputs: kind.num_public(),
        verifying_key: vk_hex(&pk.vk)?,
    };
    let circuit = dir.join(CircuitManifest::file_name(kind));
    let json = serde_json::to_string_pretty(&manifest)?;
    fs::write(&circuit, json).map_err(io_err(&circuit))?;

    let proving_key = dir.join(PROVING_KEY_FILE);
    let mut bytes = Vec::new();
    pk.serialize_compressed(&mut bytes)
        .map_err(|e| CircuitError::KeyEncoding(e.to_string()))?;
    fs::write(&proving_key, bytes).map_err(io_err(&proving_key))?;

    Ok(ArtifactPaths { circuit, proving_key })
}

pub fn read_manifest(circuit_path: &Path) -> Result<CircuitManifest, CircuitError> {
    let data = fs::read_to_string(circuit_path).map_err(io_err(circuit_path))?;
    Ok(serde_json::from_str(&data)?)
}

/// Load and cross-check a manifest and proving key
pub fn load_artifacts(circuit_path: &Path, key_path: &Path) -> Result<LoadedArtifacts, CircuitError> {
    let manifest = read_manifest(circuit_path)?;
    if manifest.curve != CURVE {
        return Err(CircuitError::Incompatible(format!(
            "manifest curve {} is not {CURVE}",
            manifest.curve
        )));
    }

    let bytes = fs::read(key_path).map_err(io_err(key_path))?;
    let proving_key = ProvingKey::<Bls12_381>::deserialize_compressed(&bytes[..])
        .map_err(|e| CircuitError::KeyEncoding(format!("{}: {e}", key_path.display())))?;

    let expected_ic = manifest.circuit.num_public() + 1;
    if proving_key.vk.gamma_abc_g1.len() != expected_ic {
        return Err(CircuitError::Incompatible(format!(
            "proving key has {} public inputs, {} expects {}",
            proving_key.vk.gamma_abc_g1.len() - 1,
            manifest.circuit,
            expected_ic - 1
        )));
    }
    if vk_hex(&proving_key.vk)? != manifest.verifying_key {
        return Err(CircuitError::Incompatible(format!(
            "{} was not generated for {}",
            key_path.display(),
            circuit_path.display()
        )));
    }

    Ok(LoadedArtifacts { manifest, proving_key })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup;
    use ark_std::rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let (pk, vk) = setup(CircuitKind::Multiplier2, &mut rng).unwrap();

        let paths = write_artifacts(dir.path(), CircuitKind::Multiplier2, &pk).unwrap();
        assert!(paths.circuit.ends_with("multiplier2.circuit.json"));

        let loaded = load_artifacts(&paths.circuit, &paths.proving_key).unwrap();
        assert_eq!(loaded.kind(), CircuitKind::Multiplier2);
        assert_eq!(loaded.manifest.signals, vec!["a", "b"]);
        assert_eq!(loaded.verifying_key(), &vk);
        assert_eq!(loaded.manifest.verifying_key().unwrap(), vk);
    }

    #[test]
    fn mismatched_key_rejected() {
        let dir_a = tempfile::tempdir().unwrap();
        let dir_b = tempfile::tempdir().unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let (pk_a, _) = setup(CircuitKind::Multiplier2, &mut rng).unwrap();
        let (pk_b, _) = setup(CircuitKind::Multiplier2, &mut rng).unwrap();
        let a = write_artifacts(dir_a.path(), CircuitKind::Multiplier2, &pk_a).unwrap();
        let b = write_artifacts(dir_b.path(), CircuitKind::Multiplier2, &pk_b).unwrap();

        let err = load_artifacts(&a.circuit, &b.proving_key).err().unwrap();
        assert!(matches!(err, CircuitError::Incompatible(_)), "got {err}");
    }

    #[test]
    fn missing_key_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let (pk, _) = setup(CircuitKind::Multiplier3, &mut rng).unwrap();
        let paths = write_artifacts(dir.path(), CircuitKind::Multiplier3, &pk).unwrap();

        let err = load_artifacts(&paths.circuit, &dir.path().join("nope.pk")).err().unwrap();
        assert!(matches!(err, CircuitError::Io { .. }));
    }
}
