//! Configuration handling for the TUI

use crate::state::FormVariant;
use crate::view::Letterhead;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const DEFAULT_DOCTOR_NAME: &str = "Doctor";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TuiConfig {
    /// Name printed in the letterhead and under the signature line
    pub doctor_name: Option<String>,
    /// Clinic or branch address, one entry per printed line
    pub address_lines: Option<Vec<String>>,
    /// Contact number shown in the letterhead
    pub mobile: Option<String>,
    /// Directory the exported PDF is written into
    pub output_dir: Option<PathBuf>,
    /// Form sections in use
    pub variant: Option<FormVariant>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "rxpad", "prescription-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the user config directory
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from `path`, falling back to defaults on any problem
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::read(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring config at {}: {e:#}", path.display());
                Self::default()
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: TuiConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn letterhead(&self) -> Letterhead {
        Letterhead {
            doctor_name: self
                .doctor_name
                .clone()
                .unwrap_or_else(|| DEFAULT_DOCTOR_NAME.to_string()),
            address_lines: self.address_lines.clone().unwrap_or_default(),
            mobile: self.mobile.clone(),
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn variant(&self) -> FormVariant {
        self.variant.unwrap_or_default()
    }
}
