use anyhow::Result;
use colored::Colorize;
use zkcall_sdk::config::{load_config, BackendKind};
use zkcall_sdk::{AdapterError, EvmVerifier};

use crate::output;
use crate::ProveArgs;

/// EVM verifiers take 32-byte words; native proofs carry 48-byte BLS12-381
/// coordinates and can never be encoded for them.
fn ensure_evm_backend(kind: BackendKind) -> Result<()> {
    match kind {
        BackendKind::Snarkjs => Ok(()),
        BackendKind::Native => Err(output::fail_with_hint(
            "the native backend proves over BLS12-381, which EVM verifiers cannot check",
            "pass --backend snarkjs or run `zkcall config set backend snarkjs`",
        )),
    }
}

pub async fn run(args: &ProveArgs, rpc: Option<&str>, address: Option<&str>) -> Result<()> {
    let cfg = load_config()?;
    ensure_evm_backend(super::backend_kind(args, &cfg))?;
    let rpc_url = rpc.unwrap_or(&cfg.rpc_url).to_string();
    let Some(address) = address.or(cfg.verifier_address()) else {
        return Err(output::fail_with_hint(
            "no verifier address configured",
            "pass --address or run `zkcall config set verifier_address 0x...`",
        ));
    };

    let (signals, calldata) = super::prove_and_export(args, &cfg).await?;
    let adapter = super::adapter(args, &cfg);
    let verifier = EvmVerifier::new(rpc_url.clone(), address);

    let result =
        output::with_spinner("calling verifyProof...", adapter.verify(&verifier, &calldata)).await;

    let valid = match result {
        Ok(valid) => valid,
        Err(e) if matches!(e.kind(), AdapterError::VerificationRevert(_)) => {
            return Err(output::fail_with_hint(
                &e.to_string(),
                &format!("is {address} a {} verifier on {rpc_url}?", args.scheme),
            ))
        }
        Err(e) => return Err(e.into()),
    };

    if output::is_json() {
        output::json_output(serde_json::json!({
            "scheme": args.scheme.as_str(),
            "verifier": address,
            "public_signals": signals.to_json(),
            "valid": valid,
        }))?;
    } else {
        output::label("verifier", address);
        output::label("public signals", &format!("[{}]", super::signals_text(&signals)));
        let verdict = if valid { "valid".green() } else { "rejected".red() };
        output::label("proof", &verdict.to_string());
    }

    if !valid {
        anyhow::bail!("verifier rejected the proof");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_backend_refused_for_evm() {
        let err = ensure_evm_backend(BackendKind::Native).unwrap_err();
        assert!(err.to_string().contains("--backend snarkjs"), "{err}");
        assert!(ensure_evm_backend(BackendKind::Snarkjs).is_ok());
    }
}
