use anyhow::Result;
use zkcall_sdk::config::{config_path, load_config, save_config, Config};

use crate::output;

pub fn set(key: &str, value: &str) -> Result<()> {
    if !Config::KEYS.contains(&key) {
        return Err(output::fail_with_hint(
            &format!("unknown config key: {key}"),
            &format!("allowed keys: {}", Config::KEYS.join(", ")),
        ));
    }

    let mut cfg = load_config()?;
    cfg.set(key, value)?;
    save_config(&cfg)?;

    if output::is_json() {
        output::json_output(serde_json::json!({ "key": key, "value": value }))?;
    } else {
        output::success(&format!("{key} updated"));
    }
    Ok(())
}

pub fn show() -> Result<()> {
    let cfg = load_config()?;
    let path = config_path()?;

    if output::is_json() {
        output::json_output(serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": serde_json::to_value(&cfg)?,
        }))?;
    } else {
        output::label("path", &path.display().to_string());
        if !path.exists() {
            output::warn("no config file yet, showing defaults");
        }
        output::label("artifacts_dir", &cfg.artifacts_dir);
        output::label("snarkjs_bin", &cfg.snarkjs_bin);
        output::label("rpc_url", &cfg.rpc_url);
        output::label("verifier_address", &cfg.verifier_address);
        output::label("backend", &cfg.backend.to_string());
    }
    Ok(())
}
