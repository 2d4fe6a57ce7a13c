#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    path::PathBuf,
    sync::{Arc, Mutex, OnceLock},
    time::Duration,
};

use anyhow::{Result, anyhow};
use state::InitCell;

use crate::{
    constants::{DEFAULT_NOTES_DIR, EXEC_TIME_MAX_MS, EXEC_TIME_MIN_MS, SIMULATED_LATENCY},
    grade::EvaluatorConfig,
    notes::FileStore,
};

/// Runtime configuration shared across the crate.
pub struct ConfigState {
    /// Directory backing the file note store.
    notes_dir:         PathBuf,
    /// Lazily constructed file note store.
    notes_store:       InitCell<FileStore>,
    /// Pause before runs and submits.
    simulated_latency: Duration,
    /// Settings handed to every evaluator built from this config.
    evaluator:         EvaluatorConfig,
}

impl ConfigState {
    /// Construct a new configuration instance from the environment.
    fn new() -> Result<Self> {
        let notes_dir = std::env::var("LABGRADE_NOTES_DIR")
            .map(|value| value.trim().to_owned())
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_NOTES_DIR.to_string());

        let exec_min = read_u64("LABGRADE_EXEC_TIME_MIN_MS", EXEC_TIME_MIN_MS);
        let exec_max = read_u64("LABGRADE_EXEC_TIME_MAX_MS", EXEC_TIME_MAX_MS);
        if exec_min > exec_max {
            return Err(anyhow!(
                "LABGRADE_EXEC_TIME_MIN_MS ({exec_min}) is greater than \
                 LABGRADE_EXEC_TIME_MAX_MS ({exec_max})"
            ));
        }

        let simulated_latency = Duration::from_millis(read_u64(
            "LABGRADE_SIMULATED_LATENCY_MS",
            SIMULATED_LATENCY.as_millis() as u64,
        ));

        Ok(Self {
            notes_dir: PathBuf::from(notes_dir),
            notes_store: InitCell::new(),
            simulated_latency,
            evaluator: EvaluatorConfig::builder()
                .exec_time_min_ms(exec_min)
                .exec_time_max_ms(exec_max)
                .build(),
        })
    }

    /// Returns the configured notes directory.
    pub fn notes_dir(&self) -> &PathBuf {
        &self.notes_dir
    }

    /// Returns the file note store, constructing it on first use.
    pub fn notes_store(&self) -> FileStore {
        if let Some(store) = self.notes_store.try_get() {
            return store.clone();
        }
        self.notes_store.set(FileStore::new(self.notes_dir.clone()));
        self.notes_store.get().clone()
    }

    /// Returns the simulated network latency.
    pub fn simulated_latency(&self) -> Duration {
        self.simulated_latency
    }

    /// Returns the evaluator settings.
    pub fn evaluator(&self) -> EvaluatorConfig {
        self.evaluator
    }
}

/// Shared configuration handle used throughout the crate.
#[derive(Clone)]
pub struct ConfigHandle(Arc<ConfigState>);

impl std::ops::Deref for ConfigHandle {
    type Target = ConfigState;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Global storage for the lazily constructed configuration state.
static CONFIG_SLOT: OnceLock<Mutex<Option<Arc<ConfigState>>>> = OnceLock::new();

/// Returns the mutex guarding the global configuration slot.
fn slot() -> &'static Mutex<Option<Arc<ConfigState>>> {
    CONFIG_SLOT.get_or_init(|| Mutex::new(None))
}

/// Ensure the global configuration has been initialized and return a handle.
pub fn ensure_initialized() -> Result<ConfigHandle> {
    let mut guard = slot()
        .lock()
        .map_err(|_| anyhow!("config slot poisoned"))?;
    if let Some(cfg) = guard.as_ref() {
        return Ok(ConfigHandle(Arc::clone(cfg)));
    }

    let cfg = Arc::new(ConfigState::new()?);
    *guard = Some(Arc::clone(&cfg));
    Ok(ConfigHandle(cfg))
}

/// Returns the active configuration, initializing it on demand.
pub fn get() -> ConfigHandle {
    ensure_initialized().expect("configuration initialization failed")
}

/// Returns the configured file note store.
pub fn notes_store() -> FileStore {
    get().notes_store()
}

/// Returns the configured simulated latency.
pub fn simulated_latency() -> Duration {
    get().simulated_latency()
}

/// Returns the configured evaluator settings.
pub fn evaluator() -> EvaluatorConfig {
    get().evaluator()
}

/// Parses an environment variable as `u64`, falling back to `default` when
/// parsing fails or the variable is missing.
fn read_u64(env: &str, default: u64) -> u64 {
    parse_u64(std::env::var(env).ok().as_deref(), default)
}

/// Parses a trimmed `u64`, falling back to `default`.
fn parse_u64(value: Option<&str>, default: u64) -> u64 {
    value
        .and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_settings_are_trimmed_before_parsing() {
        assert_eq!(parse_u64(Some(" 250\n"), 7), 250);
        assert_eq!(parse_u64(Some("0"), 7), 0);
    }

    #[test]
    fn numeric_settings_fall_back_when_missing_or_invalid() {
        assert_eq!(parse_u64(None, 1000), 1000);
        assert_eq!(parse_u64(Some("soon"), 1000), 1000);
        assert_eq!(parse_u64(Some("-5"), 1000), 1000);
    }
}
