//! Frame loading from a directory.
//!
//! The loader lists a directory, keeps the files whose extension is on the
//! allow-list (and, optionally, whose name matches a glob), sorts them by
//! file name and decodes them in that order through an [`ImageBackend`].
//!
//! # Example
//!
//! ```rust,ignore
//! use framegrid_io::{DecodePolicy, FrameLoader, LoadOptions, RasterBackend};
//!
//! let backend = RasterBackend::new();
//! let options = LoadOptions::new().trim(true).policy(DecodePolicy::Skip);
//! let loaded = FrameLoader::new(&backend, options).load("render/peach".as_ref())?;
//! println!("{} frames, {} skipped", loaded.sequence.len(), loaded.skipped.len());
//! ```

use std::io;
use std::path::{Path, PathBuf};

use framegrid_core::{Format, Frame, FrameSequence, ImageBackend, Size};
use tracing::{debug, info, trace, warn};

use crate::error::{LoadError, LoadResult};

/// Extensions accepted when no allow-list is given: everything the raster
/// backend decodes.
pub fn default_extensions() -> Vec<String> {
    Format::ALL
        .iter()
        .flat_map(|f| f.extensions().iter().map(|e| e.to_string()))
        .collect()
}

/// What to do when a frame fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodePolicy {
    /// Stop loading and return the error.
    #[default]
    Abort,
    /// Log a warning, record the file and continue.
    Skip,
}

/// Loader settings.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    extensions: Vec<String>,
    pattern: Option<String>,
    limit: Option<usize>,
    trim: bool,
    policy: DecodePolicy,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            pattern: None,
            limit: None,
            trim: false,
            policy: DecodePolicy::default(),
        }
    }
}

impl LoadOptions {
    /// Default settings: all decodable extensions, no trim, abort on failure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the extension allow-list. Leading dots and case are ignored.
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    /// Keeps only files whose name matches a glob such as `frame*.png`.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Takes at most `limit` frames from the head of the sorted listing.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Enables border trimming of every frame.
    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Sets the decode failure policy.
    pub fn policy(mut self, policy: DecodePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the decode failure policy.
    pub fn decode_policy(&self) -> DecodePolicy {
        self.policy
    }

    /// Returns `true` if frames are trimmed on load.
    pub fn trims(&self) -> bool {
        self.trim
    }

    fn accepts_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| {
                let e = e.to_lowercase();
                self.extensions.iter().any(|allowed| *allowed == e)
            })
            .unwrap_or(false)
    }

    fn compiled_pattern(&self) -> LoadResult<Option<glob::Pattern>> {
        self.pattern
            .as_deref()
            .map(|p| {
                glob::Pattern::new(p).map_err(|e| LoadError::Pattern {
                    pattern: p.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()
    }
}

/// Per-frame progress, reported after each successful decode.
#[derive(Debug, Clone, Copy)]
pub struct FrameProgress<'a> {
    /// Position of the frame in the loaded sequence
    pub index: usize,
    /// Number of files selected for loading
    pub total: usize,
    /// Source file
    pub path: &'a Path,
    /// Decoded (and possibly trimmed) size
    pub size: Size,
}

/// A file left out under [`DecodePolicy::Skip`].
#[derive(Debug, Clone)]
pub struct SkippedFrame {
    /// The file that failed
    pub path: PathBuf,
    /// Backend message
    pub reason: String,
}

/// Result of a load.
#[derive(Debug)]
pub struct LoadedFrames<B> {
    /// Frames in load order
    pub sequence: FrameSequence<B>,
    /// Files skipped under [`DecodePolicy::Skip`]
    pub skipped: Vec<SkippedFrame>,
}

/// Loads directories of frames through a backend.
pub struct FrameLoader<'a, B: ImageBackend> {
    backend: &'a B,
    options: LoadOptions,
}

impl<'a, B: ImageBackend> FrameLoader<'a, B> {
    /// Creates a loader.
    pub fn new(backend: &'a B, options: LoadOptions) -> Self {
        Self { backend, options }
    }

    /// Returns the settings.
    pub fn options(&self) -> &LoadOptions {
        &self.options
    }

    /// Lists the files that would be loaded, in load order.
    pub fn scan(&self, dir: &Path) -> LoadResult<Vec<PathBuf>> {
        let meta = std::fs::metadata(dir).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LoadError::DirectoryNotFound(dir.to_path_buf()),
            _ => LoadError::ReadDir {
                path: dir.to_path_buf(),
                source: e,
            },
        })?;
        if !meta.is_dir() {
            return Err(LoadError::NotADirectory(dir.to_path_buf()));
        }

        let pattern = self.options.compiled_pattern()?;
        let read_err = |source| LoadError::ReadDir {
            path: dir.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(read_err)? {
            let path = entry.map_err(read_err)?.path();
            if !path.is_file() || !self.options.accepts_extension(&path) {
                continue;
            }
            if let Some(pattern) = &pattern {
                let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
                if !pattern.matches(name) {
                    continue;
                }
            }
            files.push(path);
        }

        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        if let Some(limit) = self.options.limit {
            files.truncate(limit);
        }
        Ok(files)
    }

    /// Loads every selected frame of `dir`.
    pub fn load(&self, dir: &Path) -> LoadResult<LoadedFrames<B::Bitmap>> {
        self.load_with(dir, |_| {})
    }

    /// Like [`load`](Self::load), calling `progress` after each frame.
    pub fn load_with<F>(&self, dir: &Path, mut progress: F) -> LoadResult<LoadedFrames<B::Bitmap>>
    where
        F: FnMut(&FrameProgress<'_>),
    {
        trace!(dir = %dir.display(), "FrameLoader::load");
        let files = self.scan(dir)?;
        let total = files.len();

        let mut sequence = FrameSequence::new();
        let mut skipped = Vec::new();

        for path in files {
            let bitmap = match self.decode(&path) {
                Ok(bitmap) => bitmap,
                Err(source) => match self.options.policy {
                    DecodePolicy::Abort => return Err(LoadError::DecodeFailure { path, source }),
                    DecodePolicy::Skip => {
                        warn!(path = %path.display(), error = %source, "skipping frame");
                        skipped.push(SkippedFrame {
                            path,
                            reason: source.to_string(),
                        });
                        continue;
                    }
                },
            };

            let frame = Frame::new(bitmap, path, sequence.len());
            let record = FrameProgress {
                index: frame.index(),
                total,
                path: frame.path(),
                size: frame.size(),
            };
            debug!(
                index = record.index,
                total = record.total,
                path = %record.path.display(),
                width = record.size.width,
                height = record.size.height,
                "frame loaded"
            );
            progress(&record);
            sequence.push(frame);
        }

        info!(
            dir = %dir.display(),
            frames = sequence.len(),
            skipped = skipped.len(),
            "frames loaded"
        );
        Ok(LoadedFrames { sequence, skipped })
    }

    fn decode(&self, path: &Path) -> framegrid_core::BackendResult<B::Bitmap> {
        let bitmap = self.backend.decode(path)?;
        if self.options.trim {
            self.backend.trim(bitmap)
        } else {
            Ok(bitmap)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::ProbeBackend;
    use crate::raster::RasterBackend;
    use framegrid_core::Bitmap;
    use image::{Rgba, RgbaImage};
    use std::fs;

    fn write_png(dir: &Path, name: &str, w: u32, h: u32) {
        RgbaImage::from_pixel(w, h, Rgba([1, 2, 3, 255]))
            .save(dir.join(name))
            .unwrap();
    }

    #[test]
    fn test_scan_sorts_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "frame010.png", 2, 2);
        write_png(dir.path(), "frame002.png", 2, 2);
        write_png(dir.path(), "Frame001.PNG", 2, 2);
        fs::write(dir.path().join("frame003.mpc"), b"cache").unwrap();
        fs::write(dir.path().join("frame004.cache"), b"cache").unwrap();
        fs::create_dir(dir.path().join("sub.png")).unwrap();

        let backend = ProbeBackend::new();
        let files = FrameLoader::new(&backend, LoadOptions::new())
            .scan(dir.path())
            .unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["Frame001.PNG", "frame002.png", "frame010.png"]);
    }

    #[test]
    fn test_scan_pattern_and_limit() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..5 {
            write_png(dir.path(), &format!("frame{i:03}.png"), 2, 2);
        }
        write_png(dir.path(), "thumb.png", 2, 2);

        let backend = ProbeBackend::new();
        let options = LoadOptions::new().pattern("frame*.png").limit(3);
        let files = FrameLoader::new(&backend, options).scan(dir.path()).unwrap();
        assert_eq!(files.len(), 3);
        assert!(files[2].ends_with("frame002.png"));

        let bad = LoadOptions::new().pattern("frame[");
        let err = FrameLoader::new(&backend, bad).scan(dir.path()).unwrap_err();
        assert!(matches!(err, LoadError::Pattern { .. }));
    }

    #[test]
    fn test_scan_custom_extensions() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "a.png", 2, 2);
        RgbaImage::new(2, 2).save(dir.path().join("b.bmp")).unwrap();

        let backend = ProbeBackend::new();
        let options = LoadOptions::new().extensions([".BMP"]);
        let files = FrameLoader::new(&backend, options).scan(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("b.bmp"));
    }

    #[test]
    fn test_missing_and_not_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let backend = ProbeBackend::new();
        let loader = FrameLoader::new(&backend, LoadOptions::new());

        let missing = dir.path().join("nope");
        assert!(matches!(
            loader.load(&missing),
            Err(LoadError::DirectoryNotFound(_))
        ));

        write_png(dir.path(), "file.png", 1, 1);
        assert!(matches!(
            loader.load(&dir.path().join("file.png")),
            Err(LoadError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_empty_directory_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let backend = ProbeBackend::new();
        let loaded = FrameLoader::new(&backend, LoadOptions::new())
            .load(dir.path())
            .unwrap();
        assert!(loaded.sequence.is_empty());
        assert!(loaded.skipped.is_empty());
    }

    #[test]
    fn test_decode_policy() {
        let dir = tempfile::tempdir().unwrap();
        write_png(dir.path(), "frame000.png", 4, 4);
        fs::write(dir.path().join("frame001.png"), b"garbage").unwrap();
        write_png(dir.path(), "frame002.png", 4, 4);
        let backend = ProbeBackend::new();

        let err = FrameLoader::new(&backend, LoadOptions::new())
            .load(dir.path())
            .unwrap_err();
        match err {
            LoadError::DecodeFailure { path, .. } => assert!(path.ends_with("frame001.png")),
            other => panic!("unexpected error: {other}"),
        }

        let options = LoadOptions::new().policy(DecodePolicy::Skip);
        let loaded = FrameLoader::new(&backend, options).load(dir.path()).unwrap();
        assert_eq!(loaded.sequence.len(), 2);
        assert_eq!(loaded.skipped.len(), 1);
        assert!(loaded.skipped[0].path.ends_with("frame001.png"));
        // Indices stay dense after a skip.
        assert_eq!(loaded.sequence.get(1).unwrap().index(), 1);
        assert!(loaded.sequence.get(1).unwrap().path().ends_with("frame002.png"));
    }

    #[test]
    fn test_progress_per_frame() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..4 {
            write_png(dir.path(), &format!("f{i}.png"), 3, 5);
        }
        let backend = ProbeBackend::new();
        let mut seen = Vec::new();
        let loaded = FrameLoader::new(&backend, LoadOptions::new())
            .load_with(dir.path(), |p| seen.push((p.index, p.total, p.size)))
            .unwrap();
        assert_eq!(loaded.sequence.len(), 4);
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[3], (3, 4, Size::new(3, 5)));
    }

    #[test]
    fn test_trim_applies_to_all_frames() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..2 {
            let mut img = RgbaImage::new(10, 10);
            img.put_pixel(2, 3, Rgba([255, 255, 255, 255]));
            img.put_pixel(5, 4, Rgba([255, 255, 255, 255]));
            img.save(dir.path().join(format!("f{i}.png"))).unwrap();
        }
        let backend = RasterBackend::new();
        let loaded = FrameLoader::new(&backend, LoadOptions::new().trim(true))
            .load(dir.path())
            .unwrap();
        for frame in &loaded.sequence {
            assert_eq!(frame.size(), Size::new(4, 2));
            assert_eq!(frame.bitmap().page().canvas(), Size::new(10, 10));
        }
    }
}
