use std::path::PathBuf;

use anyhow::{Context, Result};
use ark_std::rand::{rngs::StdRng, SeedableRng};
use zkcall_circuits::{constraint_count, setup, write_artifacts, CircuitKind};
use zkcall_sdk::config::load_config;

use crate::output;

pub async fn run(circuit: &str, out: Option<PathBuf>, seed: u64) -> Result<()> {
    let kind: CircuitKind = circuit.parse().map_err(|_| {
        output::fail_with_hint(
            &format!("unknown circuit: {circuit}"),
            &format!(
                "available: {}",
                CircuitKind::ALL.map(|k| k.name()).join(", ")
            ),
        )
    })?;
    let dir = match out {
        Some(dir) => dir,
        None => PathBuf::from(load_config()?.artifacts_dir),
    };

    let job = tokio::task::spawn_blocking(move || -> Result<_> {
        let mut rng = StdRng::seed_from_u64(seed);
        let (pk, _vk) = setup(kind, &mut rng).context("trusted setup failed")?;
        let paths = write_artifacts(&dir, kind, &pk)?;
        Ok((paths, constraint_count(kind)?))
    });
    let (paths, constraints) =
        output::with_spinner(&format!("running Groth16 setup for {kind}..."), job).await??;

    if output::is_json() {
        output::json_output(serde_json::json!({
            "circuit": kind.name(),
            "constraints": constraints,
            "signals": kind.signals(),
            "manifest": paths.circuit.display().to_string(),
            "proving_key": paths.proving_key.display().to_string(),
        }))?;
    } else {
        output::success(&format!("{kind} ready"));
        output::label("constraints", &constraints.to_string());
        output::label("signals", &kind.signals().join(", "));
        output::label("manifest", &paths.circuit.display().to_string());
        output::label("proving key", &paths.proving_key.display().to_string());
        if seed == 42 {
            output::warn("default seed: this setup is reproducible by anyone, use it for testing only");
        }
    }
    Ok(())
}
