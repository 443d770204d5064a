//! Dataset files on disk and background loading.
//!
//! Each map `N` is three raw files in the data directory:
//! - `mapN.height`: 1024*1024 elevation bytes
//! - `mapN.color`: 1024*1024 palette indices
//! - `mapN.palette`: 256 RGB triples
//!
//! A load either produces a complete [`TerrainData`] or an error; nothing
//! partial ever leaves this module.
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use log::{debug, info};
use rand::Rng;
use thiserror::Error;

use crate::core::terrain::{TerrainData, TerrainError};

/// Number of maps shipped with the dataset.
pub const MAP_COUNT: u32 = 30;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("map index {0} is out of range")]
    UnknownMap(u32),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("map {map}: {source}")]
    Terrain {
        map: u32,
        #[source]
        source: TerrainError,
    },
    #[error("loader thread for map {0} went away")]
    Disconnected(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MapId(u32);

impl MapId {
    pub fn new(index: u32) -> Result<Self, LoadError> {
        if index >= MAP_COUNT {
            return Err(LoadError::UnknownMap(index));
        }
        Ok(MapId(index))
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        MapId(rng.gen_range(0..MAP_COUNT))
    }

    pub fn next(self) -> Self {
        MapId((self.0 + 1) % MAP_COUNT)
    }

    pub fn index(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct DatasetLoader {
    root: PathBuf,
}

impl DatasetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, id: MapId, ext: &str) -> PathBuf {
        self.root.join(format!("map{}.{}", id.0, ext))
    }

    fn read(&self, id: MapId, ext: &str) -> Result<Vec<u8>, LoadError> {
        let path = self.path_for(id, ext);
        debug!("reading {}", path.display());
        fs::read(&path).map_err(|source| LoadError::Io { path, source })
    }

    /// Reads and validates all three buffers of one map.
    pub fn load(&self, id: MapId) -> Result<TerrainData, LoadError> {
        let palette = self.read(id, "palette")?;
        let height = self.read(id, "height")?;
        let color = self.read(id, "color")?;
        let terrain = TerrainData::from_buffers(height, color, &palette)
            .map_err(|source| LoadError::Terrain { map: id.0, source })?;
        info!("loaded map {} from {}", id.0, self.root.display());
        Ok(terrain)
    }

    /// Loads on a worker thread; poll the returned handle between ticks.
    pub fn spawn(&self, id: MapId) -> PendingLoad {
        let (tx, rx) = mpsc::channel();
        let loader = self.clone();
        thread::spawn(move || {
            // The receiver may already be gone if a newer request replaced it.
            let _ = tx.send(loader.load(id));
        });
        PendingLoad { id, rx }
    }
}

/// A load in flight.
pub struct PendingLoad {
    id: MapId,
    rx: Receiver<Result<TerrainData, LoadError>>,
}

impl PendingLoad {
    pub fn id(&self) -> MapId {
        self.id
    }

    /// `None` while the worker is still running.
    pub fn poll(&self) -> Option<Result<TerrainData, LoadError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(LoadError::Disconnected(self.id.0))),
        }
    }

    /// Blocks until the worker finishes.
    pub fn wait(self) -> Result<TerrainData, LoadError> {
        self.rx.recv().map_err(|_| LoadError::Disconnected(self.id.0))?
    }
}
