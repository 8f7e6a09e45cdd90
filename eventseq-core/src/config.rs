use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use eventseq_types::{Bank, Direction};

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    sequence: SequenceConfig,
    #[serde(default)]
    clock: ClockConfig,
}

#[derive(Deserialize, Default)]
struct SequenceConfig {
    length: Option<u16>,
    direction: Option<String>,
    bank: Option<u8>,
}

#[derive(Deserialize, Default)]
struct ClockConfig {
    bpm: Option<u16>,
    steps_per_beat: Option<u8>,
}

/// Engine settings applied at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceDefaults {
    pub length: u16,
    pub direction: Direction,
    pub bank: Bank,
}

impl Default for SequenceDefaults {
    fn default() -> Self {
        Self {
            length: 16,
            direction: Direction::Forward,
            bank: Bank::A,
        }
    }
}

/// Simulated clock rate. The engine itself never reads this.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockSettings {
    pub bpm: u16,
    pub steps_per_beat: u8,
}

impl Default for ClockSettings {
    fn default() -> Self {
        Self {
            bpm: 120,
            steps_per_beat: 4,
        }
    }
}

impl ClockSettings {
    /// Time between two clock pulses.
    pub fn tick_interval(&self) -> Duration {
        let pulses_per_minute = self.bpm.max(1) as f64 * self.steps_per_beat.max(1) as f64;
        Duration::from_secs_f64(60.0 / pulses_per_minute)
    }
}

pub struct Config {
    sequence: SequenceConfig,
    clock: ClockConfig,
}

impl Config {
    /// Embedded defaults merged with the user's config file, if any.
    pub fn load() -> Self {
        let mut base: ConfigFile =
            toml::from_str(DEFAULT_CONFIG).expect("Failed to parse embedded config.toml");

        if let Some(path) = user_config_path() {
            if path.exists() {
                match std::fs::read_to_string(&path) {
                    Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
                        Ok(user) => merge(&mut base, user),
                        Err(e) => {
                            log::warn!(target: "config", "ignoring malformed config {}: {}", path.display(), e)
                        }
                    },
                    Err(e) => {
                        log::warn!(target: "config", "could not read config {}: {}", path.display(), e)
                    }
                }
            }
        }

        Config {
            sequence: base.sequence,
            clock: base.clock,
        }
    }

    /// Parse `contents` as an override of the embedded defaults.
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        let mut base: ConfigFile = toml::from_str(DEFAULT_CONFIG)?;
        let user: ConfigFile = toml::from_str(contents)?;
        merge(&mut base, user);
        Ok(Config {
            sequence: base.sequence,
            clock: base.clock,
        })
    }

    pub fn sequence(&self) -> SequenceDefaults {
        let fallback = SequenceDefaults::default();
        SequenceDefaults {
            // Zero is passed through; the engine rejects it with InvalidLength.
            length: self.sequence.length.unwrap_or(fallback.length),
            direction: self
                .sequence
                .direction
                .as_deref()
                .and_then(|s| {
                    let parsed = Direction::parse(s);
                    if parsed.is_none() {
                        log::warn!(target: "config", "unknown direction {:?}, using {}", s, fallback.direction.name());
                    }
                    parsed
                })
                .unwrap_or(fallback.direction),
            bank: self
                .sequence
                .bank
                .and_then(Bank::from_index)
                .unwrap_or(fallback.bank),
        }
    }

    /// Clock settings (bpm clamped to 1..999, steps per beat to 1..16).
    pub fn clock(&self) -> ClockSettings {
        let fallback = ClockSettings::default();
        ClockSettings {
            bpm: self.clock.bpm.unwrap_or(fallback.bpm).clamp(1, 999),
            steps_per_beat: self
                .clock
                .steps_per_beat
                .unwrap_or(fallback.steps_per_beat)
                .clamp(1, 16),
        }
    }
}

pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("eventseq").join("config.toml"))
}

fn merge(base: &mut ConfigFile, user: ConfigFile) {
    if user.sequence.length.is_some() {
        base.sequence.length = user.sequence.length;
    }
    if user.sequence.direction.is_some() {
        base.sequence.direction = user.sequence.direction;
    }
    if user.sequence.bank.is_some() {
        base.sequence.bank = user.sequence.bank;
    }
    if user.clock.bpm.is_some() {
        base.clock.bpm = user.clock.bpm;
    }
    if user.clock.steps_per_beat.is_some() {
        base.clock.steps_per_beat = user.clock.steps_per_beat;
    }
}
