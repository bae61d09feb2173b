pub mod calldata;
pub mod config;
pub mod prove;
pub mod setup;
pub mod verify;

use anyhow::Result;
use zkcall_sdk::config::{BackendKind, Config};
use zkcall_sdk::{
    AnyBackend, CalldataTuple, ExportedProof, NativeBackend, ProofAdapter, ProvingBackend,
    PublicSignals, SnarkjsBackend, WitnessInput,
};

use crate::output;
use crate::ProveArgs;

/// `--backend` if given, else config `backend`
pub(crate) fn backend_kind(args: &ProveArgs, cfg: &Config) -> BackendKind {
    args.backend.unwrap_or(cfg.backend)
}

pub(crate) fn adapter(args: &ProveArgs, cfg: &Config) -> ProofAdapter<AnyBackend> {
    let backend = match backend_kind(args, cfg) {
        BackendKind::Native => AnyBackend::Native(NativeBackend::new()),
        BackendKind::Snarkjs => AnyBackend::Snarkjs(SnarkjsBackend::new(cfg.snarkjs_bin.clone())),
    };
    ProofAdapter::new(backend)
}

/// generate → normalize → decode, behind a spinner
pub(crate) async fn prove(
    args: &ProveArgs,
    cfg: &Config,
) -> Result<(ProofAdapter<AnyBackend>, ExportedProof, PublicSignals)> {
    let witness = WitnessInput::from_file(&args.input)?;
    let adapter = adapter(args, cfg);

    let msg = format!("proving {} with {}...", args.scheme, adapter.backend().name());
    let raw = output::with_spinner(
        &msg,
        adapter.generate_proof(args.scheme, &witness, &args.circuit, &args.key),
    )
    .await?;

    let (proof, signals) = adapter.decode(args.scheme, raw)?;
    Ok((adapter, proof, signals))
}

/// [`prove`] followed by calldata export
pub(crate) async fn prove_and_export(
    args: &ProveArgs,
    cfg: &Config,
) -> Result<(PublicSignals, CalldataTuple)> {
    let (adapter, proof, signals) = prove(args, cfg).await?;
    let calldata = adapter.export_calldata(args.scheme, &proof, &signals).await?;
    Ok((signals, calldata))
}

pub(crate) fn signals_text(signals: &PublicSignals) -> String {
    signals
        .iter()
        .map(|s| s.to_str_radix(10))
        .collect::<Vec<_>>()
        .join(", ")
}
