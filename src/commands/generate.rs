//! `generate` command handler.

use crate::cli::{generate_rerun_command, GenerateArgs, BIN_NAME};
use anyhow::Context;
use fuzz_script::ScriptEmitter;
use tracing::info;

/// Emit the replay script for the given options.
pub async fn run_generate(args: GenerateArgs) -> anyhow::Result<String> {
    let options = args.generation.to_options()?;
    info!("Seed: {} ({})", options.seed, options.seed_source);

    let rerun = generate_rerun_command(&options);
    let live = rerun.replacen(&format!("{BIN_NAME} generate"), &format!("{BIN_NAME} run"), 1);
    let script = ScriptEmitter::new(&options)
        .with_context([format!("generated by: {rerun}"), format!("live run: {live}")])
        .emit();

    match &args.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {parent:?}"))?;
            }
            std::fs::write(path, &script)
                .with_context(|| format!("Failed to write script to {path:?}"))?;
            info!("Replay script written to {path:?}");
        }
        None => print!("{script}"),
    }
    Ok(script)
}
