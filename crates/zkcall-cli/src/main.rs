mod commands;
mod output;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use zkcall_sdk::config::BackendKind;
use zkcall_sdk::Scheme;

#[derive(Parser)]
#[command(name = "zkcall", about = "Prove, export calldata and verify against on-chain ZK verifiers")]
struct Cli {
    /// Print machine-readable JSON on stdout
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Cmd,
}

/// Inputs shared by every command that runs the prover
#[derive(Args)]
pub struct ProveArgs {
    /// groth16 | plonk
    #[arg(long, default_value = "groth16")]
    pub scheme: Scheme,
    /// Witness input JSON (signal name → value)
    #[arg(long)]
    pub input: PathBuf,
    /// Circuit artifact: `<name>.circuit.json` (native) or `.wasm` (snarkjs)
    #[arg(long)]
    pub circuit: PathBuf,
    /// Proving key: `circuit_final.pk` (native) or `.zkey` (snarkjs)
    #[arg(long)]
    pub key: PathBuf,
    /// native | snarkjs (defaults to the configured backend)
    #[arg(long)]
    pub backend: Option<BackendKind>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Trusted setup for a built-in circuit; writes manifest + proving key
    Setup {
        /// multiplier2 | multiplier3
        circuit: String,
        /// Output directory (defaults to the configured artifacts_dir)
        #[arg(long)]
        out: Option<PathBuf>,
        /// RNG seed for a reproducible setup
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Generate a proof and print it with its public signals
    Prove(ProveArgs),
    /// Generate a proof and print the verifier calldata tuple
    Calldata(ProveArgs),
    /// Full pipeline against an EVM verifier (snarkjs backend); exits non-zero if rejected
    Verify {
        #[command(flatten)]
        prove: ProveArgs,
        /// JSON-RPC endpoint (defaults to the configured rpc_url)
        #[arg(long)]
        rpc: Option<String>,
        /// Verifier contract address (defaults to the configured verifier_address)
        #[arg(long)]
        address: Option<String>,
    },
    /// Show or update ~/.zkcall/config.json
    Config {
        #[command(subcommand)]
        action: ConfigCmd,
    },
}

#[derive(Subcommand)]
enum ConfigCmd {
    /// Print the current configuration
    Show,
    /// Set a configuration key
    Set { key: String, value: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    output::set_json_mode(cli.json);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(json = cli.json, "zkcall starting");

    match cli.command {
        Cmd::Setup { circuit, out, seed } => commands::setup::run(&circuit, out, seed).await?,
        Cmd::Prove(args) => commands::prove::run(&args).await?,
        Cmd::Calldata(args) => commands::calldata::run(&args).await?,
        Cmd::Verify { prove, rpc, address } => {
            commands::verify::run(&prove, rpc.as_deref(), address.as_deref()).await?
        }
        Cmd::Config { action } => match action {
            ConfigCmd::Show => commands::config::show()?,
            ConfigCmd::Set { key, value } => commands::config::set(&key, &value)?,
        },
    }
    Ok(())
}
