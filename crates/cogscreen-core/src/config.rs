//! Assessment configuration.
//!
//! Loaded from TOML. Every field has a default, so an absent file means the
//! standard timings and the built-in word list.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::random::{RandomSource, StdRandom};
use crate::wordbank::{is_memorable, FileWordSource, StaticWordSource, WordSource, WORD_COUNT};

/// Countdown lengths for the timed subtests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimingConfig {
    /// Seconds the five words stay on screen.
    #[serde(default = "default_word_display_secs")]
    pub word_display_secs: u32,
    /// Seconds allowed for naming animals.
    #[serde(default = "default_fluency_secs")]
    pub fluency_secs: u32,
    /// Seconds allowed for all Stroop trials.
    #[serde(default = "default_stroop_secs")]
    pub stroop_secs: u32,
    /// Wall-clock length of one countdown tick in milliseconds.
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
}

fn default_word_display_secs() -> u32 {
    10
}
fn default_fluency_secs() -> u32 {
    60
}
fn default_stroop_secs() -> u32 {
    30
}
fn default_tick_millis() -> u64 {
    1000
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            word_display_secs: default_word_display_secs(),
            fluency_secs: default_fluency_secs(),
            stroop_secs: default_stroop_secs(),
            tick_millis: default_tick_millis(),
        }
    }
}

impl TimingConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_millis.max(1))
    }
}

/// Top-level cogscreen configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssessmentConfig {
    /// Newline-separated word list to draw the five words from.
    #[serde(default)]
    pub word_bank: Option<PathBuf>,
    /// Seed for a reproducible session.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub timing: TimingConfig,
}

impl AssessmentConfig {
    /// The configured word source, or the built-in list.
    pub fn word_source(&self) -> Box<dyn WordSource> {
        match &self.word_bank {
            Some(path) => Box::new(FileWordSource::new(path)),
            None => Box::new(StaticWordSource::defaults()),
        }
    }

    /// A seeded source if a seed is configured, otherwise an entropy-seeded one.
    pub fn random_source(&self) -> Box<dyn RandomSource> {
        match self.seed {
            Some(seed) => Box::new(StdRandom::seeded(seed)),
            None => Box::new(StdRandom::from_entropy()),
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `cogscreen.toml` in the current directory
/// 2. `~/.config/cogscreen/config.toml`
///
/// Environment variable overrides: `COGSCREEN_WORD_BANK`, `COGSCREEN_SEED`.
pub fn load_config() -> Result<AssessmentConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<AssessmentConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("cogscreen.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => AssessmentConfig::default(),
    };

    if let Ok(path) = std::env::var("COGSCREEN_WORD_BANK") {
        if !path.trim().is_empty() {
            config.word_bank = Some(PathBuf::from(path));
        }
    }

    if let Ok(seed) = std::env::var("COGSCREEN_SEED") {
        let seed = seed
            .trim()
            .parse::<u64>()
            .with_context(|| format!("COGSCREEN_SEED is not a number: '{seed}'"))?;
        config.seed = Some(seed);
    }

    Ok(config)
}

/// Parse a TOML string into a config.
pub fn parse_config_str(content: &str) -> Result<AssessmentConfig> {
    toml::from_str::<AssessmentConfig>(content).context("invalid cogscreen config")
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("cogscreen"))
}

/// A warning from config validation.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
}

/// Check a config for settings that will not behave as intended.
pub fn validate_config(config: &AssessmentConfig) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();
    let mut warn = |message: String| warnings.push(ConfigWarning { message });

    let timing = &config.timing;
    for (name, secs) in [
        ("word_display_secs", timing.word_display_secs),
        ("fluency_secs", timing.fluency_secs),
        ("stroop_secs", timing.stroop_secs),
    ] {
        if secs == 0 {
            warn(format!("timing.{name} is 0; that stage will end on its first tick"));
        }
    }
    if timing.tick_millis == 0 {
        warn("timing.tick_millis is 0; ticks will run at 1ms".into());
    }

    if let Some(path) = &config.word_bank {
        match FileWordSource::new(path).candidates() {
            Ok(words) => {
                let memorable = words.iter().filter(|w| is_memorable(w)).count();
                if words.len() < WORD_COUNT {
                    warn(format!(
                        "word bank {} has {} words; the default words will be used",
                        path.display(),
                        words.len()
                    ));
                } else if memorable < WORD_COUNT {
                    warn(format!(
                        "word bank {} has only {memorable} words of 4-8 letters; \
                         words will be drawn from the full list",
                        path.display()
                    ));
                }
            }
            Err(e) => warn(format!("{e}; the default words will be used")),
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = AssessmentConfig::default();
        assert_eq!(config.timing.word_display_secs, 10);
        assert_eq!(config.timing.fluency_secs, 60);
        assert_eq!(config.timing.stroop_secs, 30);
        assert_eq!(config.timing.tick_interval(), Duration::from_secs(1));
        assert!(config.word_bank.is_none());
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn parse_partial_config() {
        let config = parse_config_str(
            r#"
seed = 42

[timing]
fluency_secs = 45
"#,
        )
        .unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.timing.fluency_secs, 45);
        assert_eq!(config.timing.stroop_secs, 30);
    }

    #[test]
    fn parse_malformed_config() {
        assert!(parse_config_str("timing = [not valid").is_err());
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = load_config_from(Some(Path::new("/no/such/cogscreen.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cogscreen.toml");
        std::fs::write(&path, "[timing]\nword_display_secs = 5\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.timing.word_display_secs, 5);
    }

    #[test]
    fn validate_flags_zero_timings_and_bad_word_bank() {
        let dir = tempfile::tempdir().unwrap();
        let small = dir.path().join("words.txt");
        std::fs::write(&small, "cat\ndog\n").unwrap();

        let config = AssessmentConfig {
            word_bank: Some(small),
            seed: None,
            timing: TimingConfig {
                stroop_secs: 0,
                ..Default::default()
            },
        };
        let warnings = validate_config(&config);
        assert!(warnings.iter().any(|w| w.message.contains("stroop_secs")));
        assert!(warnings.iter().any(|w| w.message.contains("has 2 words")));

        let missing = AssessmentConfig {
            word_bank: Some(dir.path().join("missing.txt")),
            ..Default::default()
        };
        let warnings = validate_config(&missing);
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("default words will be used")));
    }
}
