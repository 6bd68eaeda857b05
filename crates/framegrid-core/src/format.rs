//! Image file formats.
//!
//! Formats are identified by file extension only. The frame loader uses the
//! extension list as its allow-list, the output writer as its format hint.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Image file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// PNG format.
    Png,
    /// JPEG format.
    #[serde(alias = "jpg")]
    Jpeg,
    /// Windows bitmap.
    Bmp,
    /// GIF format.
    Gif,
    /// TIFF format.
    #[serde(alias = "tif")]
    Tiff,
    /// WebP format.
    WebP,
    /// Truevision TGA.
    Tga,
}

impl Format {
    /// Every known format.
    pub const ALL: [Format; 7] = [
        Format::Png,
        Format::Jpeg,
        Format::Bmp,
        Format::Gif,
        Format::Tiff,
        Format::WebP,
        Format::Tga,
    ];

    /// Detects format from file extension (case-insensitive).
    pub fn from_extension<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("png") => Some(Format::Png),
            Some("jpg") | Some("jpeg") => Some(Format::Jpeg),
            Some("bmp") => Some(Format::Bmp),
            Some("gif") => Some(Format::Gif),
            Some("tif") | Some("tiff") => Some(Format::Tiff),
            Some("webp") => Some(Format::WebP),
            Some("tga") => Some(Format::Tga),
            _ => None,
        }
    }

    /// Returns the typical file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Png => "png",
            Format::Jpeg => "jpg",
            Format::Bmp => "bmp",
            Format::Gif => "gif",
            Format::Tiff => "tif",
            Format::WebP => "webp",
            Format::Tga => "tga",
        }
    }

    /// Returns every extension that maps to this format.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Format::Png => &["png"],
            Format::Jpeg => &["jpg", "jpeg"],
            Format::Bmp => &["bmp"],
            Format::Gif => &["gif"],
            Format::Tiff => &["tif", "tiff"],
            Format::WebP => &["webp"],
            Format::Tga => &["tga"],
        }
    }

    /// Returns `true` if the format can carry an alpha channel.
    pub fn has_alpha(&self) -> bool {
        !matches!(self, Format::Jpeg)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim_start_matches('.');
        Format::from_extension(Path::new("x").with_extension(name))
            .ok_or_else(|| format!("unsupported format: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(Format::from_extension("frame000.PNG"), Some(Format::Png));
        assert_eq!(Format::from_extension("a/b.jpeg"), Some(Format::Jpeg));
        assert_eq!(Format::from_extension("cached_srcimg.mpc"), None);
        assert_eq!(Format::from_extension("frame000.cache"), None);
        assert_eq!(Format::from_extension("README"), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("tif".parse::<Format>(), Ok(Format::Tiff));
        assert_eq!(".webp".parse::<Format>(), Ok(Format::WebP));
        assert!("exr".parse::<Format>().is_err());
    }

    #[test]
    fn test_extensions_roundtrip() {
        for format in Format::ALL {
            for ext in format.extensions() {
                assert_eq!(ext.parse::<Format>(), Ok(format));
            }
        }
    }
}
