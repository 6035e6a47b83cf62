//! Simulator configuration loading.
//!
//! The expected YAML structure is:
//! ```yaml
//! arena_bytes: 1024
//! log_path: scheduler.log
//! perf_path: scheduler.perf
//! ```
//!
//! Every field is optional; a missing file yields the defaults wholesale, so
//! the common `tickmill <policy> <quantum>` invocation needs no YAML at all.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

/// Arena size used when the YAML does not say otherwise.
pub const DEFAULT_ARENA_BYTES: u64 = 1024;

/// Default event-log file, written to the working directory.
pub const DEFAULT_LOG_PATH: &str = "scheduler.log";

/// Default end-of-run metrics file.
pub const DEFAULT_PERF_PATH: &str = "scheduler.perf";

// ── Private YAML deserialization type ─────────────────────────────────────────

/// Raw file layout.  Kept private – callers work with [`SimConfig`].
#[derive(Debug, Deserialize)]
struct SimConfigFile {
    #[serde(default = "default_arena_bytes")]
    arena_bytes: u64,
    #[serde(default = "default_log_path")]
    log_path: PathBuf,
    #[serde(default = "default_perf_path")]
    perf_path: PathBuf,
}

fn default_arena_bytes() -> u64 {
    DEFAULT_ARENA_BYTES
}

fn default_log_path() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_PATH)
}

fn default_perf_path() -> PathBuf {
    PathBuf::from(DEFAULT_PERF_PATH)
}

// ── Public configuration ──────────────────────────────────────────────────────

/// Resolved simulator configuration.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Buddy arena capacity in bytes.  Must be a power of two — validated
    /// when the arena is constructed, not here.
    pub arena_bytes: u64,
    /// Event log destination (truncated at the start of each run).
    pub log_path: PathBuf,
    /// End-of-run metrics destination.
    pub perf_path: PathBuf,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            arena_bytes: DEFAULT_ARENA_BYTES,
            log_path: default_log_path(),
            perf_path: default_perf_path(),
        }
    }
}

impl SimConfig {
    /// Load configuration from `path`, or return the defaults when `None`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or the YAML is
    /// structurally invalid.  An absent `--config` flag is not an error; an
    /// explicitly named file that does not exist is.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        info!("Loading simulator configuration from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open configuration file: {}", path.display()))?;

        let file: SimConfigFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML file: {}", path.display()))?;

        Ok(Self {
            arena_bytes: file.arena_bytes,
            log_path: file.log_path,
            perf_path: file.perf_path,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
