//! YAML job files and their merge with command line arguments.
//!
//! Every option of `grid` and `plan` may come from a job file:
//!
//! ```yaml
//! input: render/peach
//! output: sheets
//! stack: [10, 12]
//! axis: both
//! scale: 50
//! formats: [png, webp]
//! trim: true
//! skip_bad: true
//! pattern: "frame*.png"
//! ```
//!
//! A value given on the command line wins over the file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use framegrid_core::{Axis, Format, Size};
use framegrid_io::{DecodePolicy, Filter, LoadOptions};
use framegrid_ops::TilingConfig;
use serde::Deserialize;

use crate::{LoadArgs, OutputArgs, TilingArgs};

/// Axis selection: one axis or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisChoice {
    /// Vertical stacks, laid out left to right
    #[value(alias = "v")]
    #[serde(alias = "v")]
    Vertical,
    /// Horizontal stacks, laid out top to bottom
    #[value(alias = "h")]
    #[serde(alias = "h")]
    Horizontal,
    /// One grid per axis
    Both,
}

impl AxisChoice {
    /// Axes to compose, in output order.
    pub fn axes(self) -> Vec<Axis> {
        match self {
            AxisChoice::Vertical => vec![Axis::Vertical],
            AxisChoice::Horizontal => vec![Axis::Horizontal],
            AxisChoice::Both => Axis::ALL.to_vec(),
        }
    }
}

/// Contents of a job file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JobConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub stack: Vec<usize>,
    pub axis: Option<AxisChoice>,
    pub scale: Option<f64>,
    pub prefix: Option<String>,
    pub formats: Vec<Format>,
    pub trim: Option<bool>,
    pub skip_bad: Option<bool>,
    pub extensions: Vec<String>,
    pub pattern: Option<String>,
    pub limit: Option<usize>,
    pub filter: Option<Filter>,
    pub overwrite: Option<bool>,
    pub parallel: Option<bool>,
}

impl JobConfig {
    /// Parses a job file from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text).context("Invalid job file")
    }

    /// Reads `path`, or returns an empty job when no file was given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read job file: {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("In job file: {}", path.display()))
    }

    /// Input directory and loader settings.
    pub fn selection(&self, args: &LoadArgs) -> Result<Selection> {
        let Some(input) = args.input.clone().or_else(|| self.input.clone()) else {
            bail!("No input directory given (positional INPUT or `input:` in the job file)");
        };

        let mut options = LoadOptions::new()
            .trim(args.trim || self.trim.unwrap_or(false))
            .policy(if args.skip_bad || self.skip_bad.unwrap_or(false) {
                DecodePolicy::Skip
            } else {
                DecodePolicy::Abort
            });
        let extensions = pick(&args.ext, &self.extensions);
        if !extensions.is_empty() {
            options = options.extensions(extensions);
        }
        if let Some(pattern) = args.pattern.as_ref().or(self.pattern.as_ref()) {
            options = options.pattern(pattern.clone());
        }
        if let Some(limit) = args.limit.or(self.limit) {
            options = options.limit(limit);
        }
        Ok(Selection { input, options })
    }

    /// Stack lengths, axes, scale and prefix.
    pub fn tiling(&self, args: &TilingArgs) -> Result<Tiling> {
        let stack_lengths = pick(&args.stack, &self.stack).to_vec();
        if stack_lengths.is_empty() {
            bail!("No stack length given (-s or `stack:` in the job file)");
        }
        let axes = args
            .axis
            .or(self.axis)
            .unwrap_or(AxisChoice::Vertical)
            .axes();
        Ok(Tiling {
            stack_lengths,
            axes,
            scale: args.scale.or(self.scale),
            prefix: args.prefix.clone().or_else(|| self.prefix.clone()),
        })
    }

    /// Output formats; PNG when none is given.
    pub fn formats(&self, cli: &[Format]) -> Vec<Format> {
        let formats = pick(cli, &self.formats);
        if formats.is_empty() {
            vec![Format::Png]
        } else {
            formats.to_vec()
        }
    }

    /// Output directory and writer behavior.
    pub fn output(&self, args: &OutputArgs) -> Output {
        Output {
            dir: args
                .output
                .clone()
                .or_else(|| self.output.clone())
                .unwrap_or_else(|| PathBuf::from(".")),
            formats: self.formats(&args.format),
            filter: args.filter.or(self.filter).unwrap_or_default(),
            overwrite: args.overwrite || self.overwrite.unwrap_or(false),
            parallel: args.parallel || self.parallel.unwrap_or(false),
        }
    }
}

/// Command line list if non-empty, else the file's list.
fn pick<'a, T>(cli: &'a [T], file: &'a [T]) -> &'a [T] {
    if cli.is_empty() { file } else { cli }
}

/// Which frames to load.
#[derive(Debug)]
pub struct Selection {
    pub input: PathBuf,
    pub options: LoadOptions,
}

/// Which grids to compose.
#[derive(Debug, Clone)]
pub struct Tiling {
    pub stack_lengths: Vec<usize>,
    pub axes: Vec<Axis>,
    pub scale: Option<f64>,
    pub prefix: Option<String>,
}

impl Tiling {
    /// One config per distinct `(stack length, axis)` pair, in first-seen order.
    ///
    /// Without an explicit prefix, names start with `{dir}[{w}x{h}]`.
    pub fn configs(&self, input: &Path, frame_size: Option<Size>) -> Vec<TilingConfig> {
        let prefix = self
            .prefix
            .clone()
            .unwrap_or_else(|| default_prefix(input, frame_size));
        let mut configs = Vec::new();
        for &length in &self.stack_lengths {
            for &axis in &self.axes {
                if configs
                    .iter()
                    .any(|c: &TilingConfig| c.stack_length == length && c.stack_axis == axis)
                {
                    continue;
                }
                let mut config = TilingConfig::new(length, axis).with_prefix(prefix.clone());
                if let Some(scale) = self.scale {
                    config = config.with_scale(scale);
                }
                configs.push(config);
            }
        }
        configs
    }
}

/// `peach[420x640]` for frames of 420x640 in `.../peach`.
pub fn default_prefix(input: &Path, frame_size: Option<Size>) -> String {
    let name = input
        .canonicalize()
        .ok()
        .as_deref()
        .unwrap_or(input)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match frame_size {
        Some(size) => format!("{name}[{size}]"),
        None => name,
    }
}

/// Where and how grids are written.
#[derive(Debug)]
pub struct Output {
    pub dir: PathBuf,
    pub formats: Vec<Format>,
    pub filter: Filter,
    pub overwrite: bool,
    pub parallel: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiling_args() -> TilingArgs {
        TilingArgs {
            stack: vec![],
            axis: None,
            scale: None,
            prefix: None,
        }
    }

    #[test]
    fn test_parse_job_file() {
        let job = JobConfig::from_yaml(
            "input: frames\nstack: [10, 12]\naxis: both\nscale: 50\nformats: [png, jpg]\nskip_bad: true\n",
        )
        .unwrap();
        assert_eq!(job.stack, vec![10, 12]);
        assert_eq!(job.axis, Some(AxisChoice::Both));
        assert_eq!(job.formats, vec![Format::Png, Format::Jpeg]);
        assert_eq!(job.skip_bad, Some(true));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(JobConfig::from_yaml("stacks: [10]\n").is_err());
    }

    #[test]
    fn test_cli_overrides_file() {
        let job = JobConfig::from_yaml("stack: [10]\naxis: h\nscale: 50\n").unwrap();
        let mut args = tiling_args();
        args.stack = vec![4];
        let tiling = job.tiling(&args).unwrap();
        assert_eq!(tiling.stack_lengths, vec![4]);
        assert_eq!(tiling.axes, vec![Axis::Horizontal]);
        assert_eq!(tiling.scale, Some(50.0));
    }

    #[test]
    fn test_missing_stack_length() {
        let err = JobConfig::default().tiling(&tiling_args()).unwrap_err();
        assert!(err.to_string().contains("stack length"));
    }

    #[test]
    fn test_configs_cover_combinations() {
        let tiling = Tiling {
            stack_lengths: vec![5, 10],
            axes: AxisChoice::Both.axes(),
            scale: None,
            prefix: Some("run".into()),
        };
        let configs = tiling.configs(Path::new("frames"), None);
        assert_eq!(configs.len(), 4);
        assert_eq!(configs[1].stack_length, 5);
        assert_eq!(configs[1].stack_axis, Axis::Horizontal);
        assert_eq!(configs[3].prefix.as_deref(), Some("run"));
    }

    #[test]
    fn test_configs_skip_repeated_pairs() {
        let tiling = Tiling {
            stack_lengths: vec![10, 5, 10],
            axes: vec![Axis::Vertical, Axis::Vertical],
            scale: None,
            prefix: Some("run".into()),
        };
        let configs = tiling.configs(Path::new("frames"), None);
        let lengths: Vec<usize> = configs.iter().map(|c| c.stack_length).collect();
        assert_eq!(lengths, vec![10, 5]);
    }

    #[test]
    fn test_default_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let peach = dir.path().join("peach");
        std::fs::create_dir(&peach).unwrap();
        assert_eq!(
            default_prefix(&peach, Some(Size::new(420, 640))),
            "peach[420x640]"
        );
    }

    #[test]
    fn test_formats_default_to_png() {
        assert_eq!(JobConfig::default().formats(&[]), vec![Format::Png]);
    }
}
