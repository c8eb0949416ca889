use std::time::Duration;

use config::{Config, ConfigError, Environment, File, Map};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// Cells the pointer must travel before a press becomes a drag.
    pub drag_threshold: u16,
    pub drag_delay_ms: u64,
    pub tick_ms: u64,
    pub shuffle_hand: bool,
    pub life_points: u32,
    pub deck_size: u32,
    pub log_capacity: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            drag_threshold: 1,
            drag_delay_ms: 200,
            tick_ms: 50,
            shuffle_hand: false,
            life_points: 30,
            deck_size: 18,
            log_capacity: 200,
        }
    }
}

impl Settings {
    /// Defaults, then `duelboard.toml` if present, then `DUELBOARD_*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name("duelboard").required(false))
                .add_source(Self::environment(None)),
        )
    }

    /// `DUELBOARD_*` variables, read from the process unless `vars` is given.
    fn environment(vars: Option<Map<String, String>>) -> Environment {
        Environment::with_prefix("DUELBOARD").source(vars)
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, ConfigError> {
        let defaults = Settings::default();
        Config::builder()
            .set_default("drag_threshold", defaults.drag_threshold as i64)?
            .set_default("drag_delay_ms", defaults.drag_delay_ms as i64)?
            .set_default("tick_ms", defaults.tick_ms as i64)?
            .set_default("shuffle_hand", defaults.shuffle_hand)?
            .set_default("life_points", defaults.life_points as i64)?
            .set_default("deck_size", defaults.deck_size as i64)?
            .set_default("log_capacity", defaults.log_capacity as i64)?
            .add_source(builder.build()?)
            .build()?
            .try_deserialize()
    }

    pub fn drag_delay(&self) -> Duration {
        Duration::from_millis(self.drag_delay_ms)
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
