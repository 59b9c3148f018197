//! On-disk weather cache: one JSON file per location id, with the file mtime
//! serving as the fetch timestamp.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use tracing::debug;

use crate::{
    error::WeatherError,
    model::{LocationId, WeatherDocument},
};

#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
    expiry: Duration,
}

impl CacheStore {
    /// Open a cache rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>, expiry: Duration) -> Result<Self, WeatherError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, expiry })
    }

    /// Return the cached document for `id` iff its entry is younger than the
    /// expiry window. An unreadable or unparsable entry counts as a miss.
    pub fn load(&self, id: &LocationId) -> Result<Option<WeatherDocument>, WeatherError> {
        let path = self.entry_path(id);

        let Ok(meta) = fs::metadata(&path) else {
            return Ok(None);
        };

        let age = meta
            .modified()?
            .elapsed()
            .unwrap_or(Duration::MAX); // mtime in the future: treat as expired
        if age >= self.expiry {
            debug!(location = %id, age_secs = age.as_secs(), "cache entry expired");
            return Ok(None);
        }

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) => {
                debug!(location = %id, %err, "unreadable cache entry, treating as miss");
                return Ok(None);
            }
        };

        match serde_json::from_str(&contents) {
            Ok(doc) => Ok(Some(doc)),
            Err(err) => {
                debug!(location = %id, %err, "corrupt cache entry, treating as miss");
                Ok(None)
            }
        }
    }

    /// Persist `doc` as the entry for `id`, overwriting any prior entry.
    /// Written to a temp file first and renamed into place, so a concurrent
    /// reader never observes a partial entry.
    pub fn store(&self, id: &LocationId, doc: &WeatherDocument) -> Result<(), WeatherError> {
        let json = serde_json::to_string_pretty(doc)?;

        let tmp = self.dir.join(format!(".{id}.json.tmp"));
        fs::write(&tmp, json)?;
        fs::rename(&tmp, self.entry_path(id))?;

        debug!(location = %id, "cache entry written");
        Ok(())
    }

    /// Remove all cache entries. A missing directory is not an error.
    pub fn clear(&self) -> Result<(), WeatherError> {
        match fs::remove_dir_all(&self.dir) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, id: &LocationId) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}
