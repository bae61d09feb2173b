use anyhow::Result;
use zkcall_sdk::config::load_config;

use super::signals_text;
use crate::output;
use crate::ProveArgs;

pub async fn run(args: &ProveArgs) -> Result<()> {
    let cfg = load_config()?;
    let (_, proof, signals) = super::prove(args, &cfg).await?;

    if output::is_json() {
        output::json_output(serde_json::json!({
            "scheme": args.scheme.as_str(),
            "proof": proof.to_json(),
            "public_signals": signals.to_json(),
        }))?;
    } else {
        output::success("proof generated");
        output::label("scheme", args.scheme.as_str());
        output::label("public signals", &format!("[{}]", signals_text(&signals)));
        println!("{}", serde_json::to_string_pretty(&proof.to_json())?);
    }
    Ok(())
}
