use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

static JSON_MODE: AtomicBool = AtomicBool::new(false);

pub fn set_json_mode(enabled: bool) {
    JSON_MODE.store(enabled, Ordering::Relaxed);
}

pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

/// Human output goes to stderr and is suppressed under `--json`
fn human(line: impl std::fmt::Display) {
    if !is_json() {
        eprintln!("{line}");
    }
}

pub fn success(msg: &str) {
    human(msg.green());
}

pub fn warn(msg: &str) {
    human(msg.yellow());
}

pub fn label(key: &str, val: &str) {
    human(format_args!("{} {val}", format!("{key}:").bold()));
}

/// The command's result document, on stdout
pub fn json_output(value: serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

/// Spinner shown while `work` runs, cleared however it ends
pub async fn with_spinner<T>(msg: &str, work: impl Future<Output = T>) -> T {
    let pb = if is_json() {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner().with_message(msg.to_string());
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
        {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    };
    let out = work.await;
    pb.finish_and_clear();
    out
}

pub fn fail_with_hint(error: &str, hint: &str) -> anyhow::Error {
    anyhow::anyhow!("{}\n{} {hint}", error.red(), "hint:".bold())
}
