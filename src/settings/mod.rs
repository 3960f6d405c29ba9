use std::{
    fs, io,
    path::{Path, PathBuf},
};

use ron::{self, extensions::Extensions};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    algorithms::{GeneratorParams, TerrainWeights},
    solver::Algorithm,
};

const DEFAULT_ROWS: usize = 25;
const DEFAULT_COLS: usize = 25;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("RON parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("RON write error: {0}")]
    Write(#[from] ron::Error),
}

/// User settings. Every field is optional in the file and falls back to the default getter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    rows: Option<usize>,
    #[serde(default)]
    cols: Option<usize>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    terrain: Option<TerrainWeights>,
    #[serde(default)]
    braid_divisor: Option<usize>,
    #[serde(default)]
    hint_algorithm: Option<Algorithm>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_path() -> PathBuf {
        dirs::preference_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("terramaze")
            .join("settings.ron")
    }

    pub fn set_rows(mut self, value: usize) -> Self {
        self.rows = Some(value);
        self
    }

    pub fn get_rows(&self) -> usize {
        self.rows.unwrap_or(DEFAULT_ROWS)
    }

    pub fn set_cols(mut self, value: usize) -> Self {
        self.cols = Some(value);
        self
    }

    pub fn get_cols(&self) -> usize {
        self.cols.unwrap_or(DEFAULT_COLS)
    }

    pub fn set_seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn set_terrain(mut self, value: TerrainWeights) -> Self {
        self.terrain = Some(value);
        self
    }

    pub fn get_terrain(&self) -> TerrainWeights {
        self.terrain.unwrap_or_default()
    }

    pub fn set_braid_divisor(mut self, value: usize) -> Self {
        self.braid_divisor = Some(value);
        self
    }

    pub fn get_braid_divisor(&self) -> usize {
        self.braid_divisor
            .unwrap_or_else(|| GeneratorParams::default().braid_divisor)
    }

    pub fn set_hint_algorithm(mut self, value: Algorithm) -> Self {
        self.hint_algorithm = Some(value);
        self
    }

    pub fn get_hint_algorithm(&self) -> Option<Algorithm> {
        self.hint_algorithm
    }

    pub fn generator_params(&self) -> GeneratorParams {
        GeneratorParams {
            terrain: self.get_terrain(),
            braid_divisor: self.get_braid_divisor(),
        }
    }

    pub fn from_ron(text: &str) -> Result<Self, SettingsError> {
        let options = ron::Options::default().with_default_extension(Extensions::IMPLICIT_SOME);
        Ok(options.from_str(text)?)
    }

    /// Loads settings from `path`. A missing file is not an error, it gives the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_ron(&text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::debug!("no settings at {:?}, using defaults", path);
                Ok(Self::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Like [`Settings::load`], but falls back to defaults with a warning on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|err| {
            log::warn!("Error reading settings file ({:?}), {}", path, err);
            Self::default()
        })
    }

    /// Overwrites `path` with the bundled default settings.
    pub fn reset_config(path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, include_str!("./default_settings.ron"))?;
        Ok(())
    }

    pub fn to_ron(&self) -> Result<String, SettingsError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }
}
