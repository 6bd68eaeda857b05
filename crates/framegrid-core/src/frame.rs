//! Frames and frame sequences.
//!
//! A [`FrameSequence`] is the ordered output of the frame loader and the
//! input of the grid composer. Its order is the tiling order.

use std::path::{Path, PathBuf};

use crate::backend::Bitmap;
use crate::rect::Size;

/// One decoded image of the input sequence.
#[derive(Debug)]
pub struct Frame<B> {
    bitmap: B,
    path: PathBuf,
    index: usize,
}

impl<B: Bitmap> Frame<B> {
    /// Wraps a decoded bitmap.
    ///
    /// `index` is the frame's position in the loaded sequence.
    pub fn new(bitmap: B, path: impl Into<PathBuf>, index: usize) -> Self {
        Self {
            bitmap,
            path: path.into(),
            index,
        }
    }

    /// Returns the bitmap.
    pub fn bitmap(&self) -> &B {
        &self.bitmap
    }

    /// Consumes the frame, returning the bitmap.
    pub fn into_bitmap(self) -> B {
        self.bitmap
    }

    /// Returns the source file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the position in the loaded sequence.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Pixel dimensions.
    pub fn size(&self) -> Size {
        self.bitmap.size()
    }
}

/// A frame whose size differs from the first frame of its sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeMismatch {
    /// Position of the offending frame
    pub index: usize,
    /// Source file of the offending frame
    pub path: PathBuf,
    /// Size of the first frame
    pub expected: Size,
    /// Size of the offending frame
    pub actual: Size,
}

/// Ordered collection of frames.
///
/// Read-only once built; composition only borrows it, so one sequence can
/// feed any number of compositions, also from several threads.
#[derive(Debug)]
pub struct FrameSequence<B> {
    frames: Vec<Frame<B>>,
}

impl<B> Default for FrameSequence<B> {
    fn default() -> Self {
        Self { frames: Vec::new() }
    }
}

impl<B: Bitmap> FrameSequence<B> {
    /// Creates an empty sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a sequence from bitmaps, numbering them in order.
    ///
    /// Paths are synthesized as `frame{index}`; useful for generated frames.
    pub fn from_bitmaps(bitmaps: impl IntoIterator<Item = B>) -> Self {
        let frames = bitmaps
            .into_iter()
            .enumerate()
            .map(|(index, bitmap)| Frame::new(bitmap, format!("frame{index}"), index))
            .collect();
        Self { frames }
    }

    /// Appends a frame.
    pub fn push(&mut self, frame: Frame<B>) {
        self.frames.push(frame);
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` if the sequence holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// All frames, in order.
    pub fn frames(&self) -> &[Frame<B>] {
        &self.frames
    }

    /// Iterates frames in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Frame<B>> {
        self.frames.iter()
    }

    /// Returns the frame at `index`.
    pub fn get(&self, index: usize) -> Option<&Frame<B>> {
        self.frames.get(index)
    }

    /// Size of the first frame, if any.
    pub fn frame_size(&self) -> Option<Size> {
        self.frames.first().map(Frame::size)
    }

    /// Checks that every frame has the size of the first one.
    ///
    /// Returns the common size (`None` for an empty sequence) or the first
    /// frame that breaks uniformity.
    pub fn uniform_size(&self) -> Result<Option<Size>, SizeMismatch> {
        let Some(expected) = self.frame_size() else {
            return Ok(None);
        };
        match self.frames.iter().find(|f| f.size() != expected) {
            Some(frame) => Err(SizeMismatch {
                index: frame.index(),
                path: frame.path().to_path_buf(),
                expected,
                actual: frame.size(),
            }),
            None => Ok(Some(expected)),
        }
    }
}

impl<B> IntoIterator for FrameSequence<B> {
    type Item = Frame<B>;
    type IntoIter = std::vec::IntoIter<Frame<B>>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.into_iter()
    }
}

impl<'a, B> IntoIterator for &'a FrameSequence<B> {
    type Item = &'a Frame<B>;
    type IntoIter = std::slice::Iter<'a, Frame<B>>;

    fn into_iter(self) -> Self::IntoIter {
        self.frames.iter()
    }
}

impl<B: Bitmap> FromIterator<Frame<B>> for FrameSequence<B> {
    fn from_iter<I: IntoIterator<Item = Frame<B>>>(iter: I) -> Self {
        Self {
            frames: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rect::Page;

    struct Dummy(Size);

    impl Bitmap for Dummy {
        fn size(&self) -> Size {
            self.0
        }

        fn page(&self) -> Page {
            Page::exact(self.0)
        }
    }

    #[test]
    fn test_from_bitmaps_numbers_frames() {
        let seq = FrameSequence::from_bitmaps((0..3).map(|_| Dummy(Size::new(4, 4))));
        assert_eq!(seq.len(), 3);
        let indices: Vec<_> = seq.iter().map(Frame::index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(seq.frames()[2].path(), Path::new("frame2"));
    }

    #[test]
    fn test_uniform_size() {
        let seq = FrameSequence::from_bitmaps([Dummy(Size::new(4, 4)), Dummy(Size::new(4, 4))]);
        assert_eq!(seq.uniform_size(), Ok(Some(Size::new(4, 4))));

        let empty: FrameSequence<Dummy> = FrameSequence::new();
        assert_eq!(empty.uniform_size(), Ok(None));
    }

    #[test]
    fn test_uniform_size_reports_first_mismatch() {
        let seq = FrameSequence::from_bitmaps([
            Dummy(Size::new(4, 4)),
            Dummy(Size::new(4, 4)),
            Dummy(Size::new(4, 5)),
            Dummy(Size::new(3, 4)),
        ]);
        let mismatch = seq.uniform_size().unwrap_err();
        assert_eq!(mismatch.index, 2);
        assert_eq!(mismatch.expected, Size::new(4, 4));
        assert_eq!(mismatch.actual, Size::new(4, 5));
    }
}
