//! Demo settings
//!
//! Loaded from an optional JSON file; every field falls back to the default
//! demo (a 9-row board with a two-cell ball).

use std::fs;
use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{FRAME_INTERVAL_MS, MAX_TICKS};
use crate::sim::{BoardGeometry, Glyphs, Pong, PongError, StartState};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Demo configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub geometry: BoardGeometry,
    pub glyphs: Glyphs,
    /// Fixed start; a seeded random start when absent
    pub start: Option<StartState>,
    /// Seed for the random start
    pub seed: u64,

    // === Driver ===
    /// Pause between printed frames
    pub frame_interval_ms: u64,
    /// Stop after this many ticks even if the game is still running
    pub max_ticks: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            geometry: BoardGeometry {
                ball_diameter: 2,
                ..BoardGeometry::with_height(9)
            },
            glyphs: Glyphs::default(),
            start: Some(StartState {
                x: 1,
                y: 3,
                ..StartState::default()
            }),
            seed: 0,
            frame_interval_ms: FRAME_INTERVAL_MS,
            max_ticks: MAX_TICKS,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_owned(),
            source,
        })?;
        let settings = serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
            path: path.to_owned(),
            source,
        })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Validate the geometry and set up the first frame
    pub fn build_game(&self) -> Result<Pong, PongError> {
        let layout = self.geometry.validate()?;
        match self.start {
            Some(start) => Pong::new(layout, self.glyphs, start),
            None => {
                log::info!("Random start with seed {}", self.seed);
                let mut rng = Pcg32::seed_from_u64(self.seed);
                Pong::random(layout, self.glyphs, &mut rng)
            }
        }
    }
}
