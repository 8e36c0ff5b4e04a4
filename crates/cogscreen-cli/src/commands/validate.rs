//! The `cogscreen validate` command.

use std::path::PathBuf;

use anyhow::Result;

use cogscreen_core::config::{load_config_from, validate_config};

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    match &config.word_bank {
        Some(path) => println!("Word bank: {}", path.display()),
        None => println!("Word bank: built-in defaults"),
    }
    let timing = &config.timing;
    println!(
        "Timing: words {}s, fluency {}s, stroop {}s, tick {}ms",
        timing.word_display_secs, timing.fluency_secs, timing.stroop_secs, timing.tick_millis
    );

    let warnings = validate_config(&config);
    for w in &warnings {
        println!("  WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Configuration valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
