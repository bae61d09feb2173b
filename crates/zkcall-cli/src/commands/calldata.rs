use anyhow::Result;
use zkcall_sdk::config::load_config;
use zkcall_sdk::CalldataTuple;

use crate::output;
use crate::ProveArgs;

pub async fn run(args: &ProveArgs) -> Result<()> {
    let cfg = load_config()?;
    let (_, calldata) = super::prove_and_export(args, &cfg).await?;

    if output::is_json() {
        return output::json_output(calldata.to_json());
    }

    output::label("elements", &calldata.len().to_string());
    match &calldata {
        CalldataTuple::Groth16 { a, b, c, inputs } => {
            output::label("a", &format!("[{}]", a.join(", ")));
            output::label("b", &format!("[[{}], [{}]]", b[0].join(", "), b[1].join(", ")));
            output::label("c", &format!("[{}]", c.join(", ")));
            output::label("inputs", &format!("[{}]", inputs.join(", ")));
        }
        CalldataTuple::Plonk { proof, inputs } => {
            output::label("proof", &format!("0x{} ({} bytes)", hex_prefix(proof), proof.len()));
            output::label("inputs", &format!("[{}]", inputs.join(", ")));
        }
        CalldataTuple::PlonkWords { proof, inputs } => {
            output::label("proof", &format!("[{}]", proof.join(", ")));
            output::label("inputs", &format!("[{}]", inputs.join(", ")));
        }
    }
    Ok(())
}

fn hex_prefix(bytes: &[u8]) -> String {
    let shown = hex::encode(&bytes[..bytes.len().min(16)]);
    if bytes.len() > 16 {
        format!("{shown}...")
    } else {
        shown
    }
}
