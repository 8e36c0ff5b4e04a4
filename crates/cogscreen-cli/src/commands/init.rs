//! The `cogscreen init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing("cogscreen.toml", SAMPLE_CONFIG)?;
    write_if_missing("words.txt", SAMPLE_WORDS)?;

    println!("\nNext steps:");
    println!("  1. Edit words.txt to taste (one word per line)");
    println!("  2. Run: cogscreen validate");
    println!("  3. Run: cogscreen run");

    Ok(())
}

fn write_if_missing(path: &str, content: &str) -> Result<()> {
    if Path::new(path).exists() {
        println!("{path} already exists, skipping.");
    } else {
        std::fs::write(path, content)?;
        println!("Created {path}");
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# cogscreen configuration

# Word list the five recall words are drawn from.
word_bank = "words.txt"

# Uncomment for a reproducible session.
# seed = 42

[timing]
word_display_secs = 10
fluency_secs = 60
stroop_secs = 30
tick_millis = 1000
"#;

const SAMPLE_WORDS: &str = "apple
table
penny
garden
finger
river
candle
pencil
basket
window
orange
hammer
blanket
carpet
violin
";
