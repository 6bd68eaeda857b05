//! Writing composites to disk.
//!
//! [`OutputWriter`] owns the output directory and the collision rule: an
//! existing file is never replaced unless overwriting is enabled; instead
//! `_1`, `_2`, ... is appended to the stem.

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};

use framegrid_core::{Format, ImageBackend};
use tracing::{debug, info};

use crate::error::{WriteError, WriteResult};

/// Number of suffixed names tried before giving up.
pub const MAX_RENAME_ATTEMPTS: usize = 10;

/// Writes bitmaps into one directory.
pub struct OutputWriter<'a, B: ImageBackend> {
    backend: &'a B,
    dir: PathBuf,
    overwrite: bool,
}

impl<'a, B: ImageBackend> OutputWriter<'a, B> {
    /// Creates a writer for `dir`. The directory is created on first write.
    pub fn new(backend: &'a B, dir: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            dir: dir.into(),
            overwrite: false,
        }
    }

    /// Replaces existing files instead of renaming.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The requested path followed by its `_1` .. `_10` alternatives.
    fn candidates(&self, file_name: &str) -> Vec<PathBuf> {
        let path = self.dir.join(file_name);
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = path.extension().map(|e| e.to_string_lossy().into_owned());

        let mut candidates = vec![path];
        for n in 1..=MAX_RENAME_ATTEMPTS {
            let name = match &ext {
                Some(ext) => format!("{stem}_{n}.{ext}"),
                None => format!("{stem}_{n}"),
            };
            candidates.push(self.dir.join(name));
        }
        candidates
    }

    fn collision(&self, file_name: &str) -> WriteError {
        WriteError::NameCollision {
            path: self.dir.join(file_name),
            attempts: MAX_RENAME_ATTEMPTS,
        }
    }

    /// Picks the path `file_name` would be written to right now.
    ///
    /// Only a preview: another writer may take the name before
    /// [`write`](Self::write) runs, which then moves on to the next free one.
    pub fn resolve(&self, file_name: &str) -> WriteResult<PathBuf> {
        if self.overwrite {
            return Ok(self.dir.join(file_name));
        }
        self.candidates(file_name)
            .into_iter()
            .find(|candidate| !candidate.exists())
            .ok_or_else(|| self.collision(file_name))
    }

    /// Reserves a free name by creating the file exclusively.
    fn claim(&self, file_name: &str) -> WriteResult<PathBuf> {
        if self.overwrite {
            return Ok(self.dir.join(file_name));
        }
        for candidate in self.candidates(file_name) {
            match OpenOptions::new().write(true).create_new(true).open(&candidate) {
                Ok(_) => {
                    if !candidate.ends_with(file_name) {
                        debug!(requested = file_name, chosen = %candidate.display(), "renamed output");
                    }
                    return Ok(candidate);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(source) => {
                    return Err(WriteError::IoFailure {
                        path: candidate,
                        source,
                    });
                }
            }
        }
        Err(self.collision(file_name))
    }

    /// Writes `bitmap` as `file_name` and returns the path actually used.
    pub fn write(&self, bitmap: &B::Bitmap, file_name: &str, format: Format) -> WriteResult<PathBuf> {
        std::fs::create_dir_all(&self.dir).map_err(|source| WriteError::IoFailure {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.claim(file_name)?;
        if let Err(source) = self.backend.write(bitmap, &path, format) {
            if !self.overwrite {
                // Release the reserved name.
                let _ = std::fs::remove_file(&path);
            }
            return Err(WriteError::Encode { path, source });
        }
        info!(path = %path.display(), %format, "wrote grid");
        Ok(path)
    }
}
