use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_quiz_duration_secs")]
    pub quiz_duration_secs: u64,
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,
    #[serde(default = "default_question_bank")]
    pub question_bank: String,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

fn default_quiz_duration_secs() -> u64 {
    1500
}
fn default_sample_size() -> usize {
    20
}
fn default_question_bank() -> String {
    "questions.json".to_string()
}
fn default_theme() -> String {
    "terminal-default".to_string()
}
fn default_tick_interval_ms() -> u64 {
    1000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quiz_duration_secs: default_quiz_duration_secs(),
            sample_size: default_sample_size(),
            question_bank: default_question_bank(),
            theme: default_theme(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("quizr")
            .join("config.toml")
    }

    pub fn quiz_duration(&self) -> Duration {
        Duration::from_secs(self.quiz_duration_secs)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Clamp numeric fields into usable ranges. Call after loading and after
    /// applying CLI overrides.
    pub fn validate(&mut self) {
        self.quiz_duration_secs = self.quiz_duration_secs.clamp(1, 24 * 60 * 60);
        self.sample_size = self.sample_size.clamp(1, 500);
        self.tick_interval_ms = self.tick_interval_ms.clamp(100, 5000);
        if self.question_bank.trim().is_empty() {
            self.question_bank = default_question_bank();
        }
    }
}
