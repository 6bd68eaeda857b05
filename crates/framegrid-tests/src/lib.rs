//! End-to-end tests for the framegrid crates.
//!
//! Frames are real PNG files in temporary directories. Each frame is
//! filled with a colour that encodes its number, so the position of every
//! frame in a written grid can be read back from the pixels.

#[cfg(test)]
mod tests {
    use std::path::Path;

    use framegrid_core::{Axis, Bitmap, Format, Size};
    use framegrid_io::{
        DecodePolicy, FrameLoader, LoadOptions, OutputWriter, ProbeBackend, RasterBackend,
    };
    use framegrid_ops::{CompositionError, GridComposer, TilingConfig};
    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    fn colour(n: usize) -> Rgba<u8> {
        Rgba([n as u8, 255 - n as u8, 7, 255])
    }

    /// Writes `count` frames named `frame000.png`, ... in reverse order.
    fn write_frames(dir: &Path, count: usize, size: Size) {
        for n in (0..count).rev() {
            RgbaImage::from_pixel(size.width, size.height, colour(n))
                .save(dir.join(format!("frame{n:03}.png")))
                .unwrap();
        }
    }

    /// Frame number found at cell (`col`, `row`) of a grid of `cell`-sized frames.
    fn frame_at(grid: &RgbaImage, cell: Size, col: u32, row: u32) -> usize {
        let px = grid.get_pixel(col * cell.width + cell.width / 2, row * cell.height + cell.height / 2);
        assert_eq!(px[1], 255 - px[0], "cell ({col}, {row}) holds no frame");
        px[0] as usize
    }

    #[test]
    fn test_vertical_grid_order() {
        let input = tempdir().unwrap();
        let out = tempdir().unwrap();
        let cell = Size::new(8, 6);
        write_frames(input.path(), 12, cell);

        let backend = RasterBackend::new();
        let loaded = FrameLoader::new(&backend, LoadOptions::new())
            .load(input.path())
            .unwrap();
        let config = TilingConfig::new(4, Axis::Vertical).with_prefix("walk");
        let grid = GridComposer::new(&backend)
            .compose(&loaded.sequence, &config)
            .unwrap();
        let name = grid.layout().file_name("png");
        assert_eq!(name, "walk_V12_image_grid_[3x4].png");

        let path = OutputWriter::new(&backend, out.path())
            .write(grid.bitmap(), &name, Format::Png)
            .unwrap();
        let written = image::open(&path).unwrap().to_rgba8();
        assert_eq!(written.dimensions(), (24, 24));

        // Stacks are columns; frames run down each column.
        for n in 0..12 {
            let (col, row) = ((n / 4) as u32, (n % 4) as u32);
            assert_eq!(frame_at(&written, cell, col, row), n);
        }
    }

    #[test]
    fn test_horizontal_grid_truncates_tail() {
        let input = tempdir().unwrap();
        let cell = Size::new(5, 9);
        write_frames(input.path(), 14, cell);

        let backend = RasterBackend::new();
        let loaded = FrameLoader::new(&backend, LoadOptions::new())
            .load(input.path())
            .unwrap();
        let grid = GridComposer::new(&backend)
            .compose(&loaded.sequence, &TilingConfig::new(4, Axis::Horizontal))
            .unwrap();
        assert_eq!(grid.layout().used, 12);
        assert_eq!(grid.layout().dropped, 2);

        let (bitmap, layout) = grid.into_parts();
        assert_eq!(bitmap.size(), Size::new(20, 27));
        assert_eq!((layout.columns(), layout.rows()), (4, 3));

        // Stacks are rows; frames run along each row.
        let pixels = bitmap.into_pixels();
        for n in 0..12 {
            let (col, row) = ((n % 4) as u32, (n / 4) as u32);
            assert_eq!(frame_at(&pixels, cell, col, row), n);
        }
    }

    #[test]
    fn test_scaled_grid_and_formats() {
        let input = tempdir().unwrap();
        let out = tempdir().unwrap();
        write_frames(input.path(), 16, Size::new(8, 8));

        let backend = RasterBackend::new();
        let loaded = FrameLoader::new(&backend, LoadOptions::new())
            .load(input.path())
            .unwrap();
        let config = TilingConfig::new(4, Axis::Vertical).with_scale(50.0);
        let grid = GridComposer::new(&backend)
            .compose(&loaded.sequence, &config)
            .unwrap();
        assert!(grid.bitmap().page().matches(Size::new(16, 16)));

        let writer = OutputWriter::new(&backend, out.path());
        for format in [Format::Png, Format::Jpeg, Format::Bmp, Format::Tiff] {
            let name = grid.layout().file_name(format.extension());
            let path = writer.write(grid.bitmap(), &name, format).unwrap();
            assert!(name.contains("_scale50"));
            assert_eq!(image::image_dimensions(&path).unwrap(), (16, 16));
        }
    }

    #[test]
    fn test_trimmed_frames_compose_with_clean_page() {
        let input = tempdir().unwrap();
        for n in 0..6 {
            let mut img = RgbaImage::new(20, 20);
            for y in 5..15 {
                for x in 4..10 {
                    img.put_pixel(x, y, colour(n));
                }
            }
            img.save(input.path().join(format!("f{n}.png"))).unwrap();
        }

        let backend = RasterBackend::new();
        let loaded = FrameLoader::new(&backend, LoadOptions::new().trim(true))
            .load(input.path())
            .unwrap();
        assert_eq!(loaded.sequence.frame_size(), Some(Size::new(6, 10)));

        let grid = GridComposer::new(&backend)
            .compose(&loaded.sequence, &TilingConfig::new(3, Axis::Vertical))
            .unwrap();
        assert_eq!(grid.bitmap().size(), Size::new(12, 30));
        assert!(grid.bitmap().page().matches(Size::new(12, 30)));
    }

    #[test]
    fn test_skip_policy_end_to_end() {
        let input = tempdir().unwrap();
        write_frames(input.path(), 5, Size::new(4, 4));
        std::fs::write(input.path().join("frame002.png"), b"corrupt").unwrap();

        let backend = RasterBackend::new();
        let strict = FrameLoader::new(&backend, LoadOptions::new()).load(input.path());
        assert!(strict.is_err());

        let options = LoadOptions::new().policy(DecodePolicy::Skip);
        let loaded = FrameLoader::new(&backend, options).load(input.path()).unwrap();
        assert_eq!(loaded.sequence.len(), 4);

        let grid = GridComposer::new(&backend)
            .compose(&loaded.sequence, &TilingConfig::new(2, Axis::Horizontal))
            .unwrap();
        let pixels = grid.bitmap().pixels();
        let cell = Size::new(4, 4);
        assert_eq!(frame_at(pixels, cell, 0, 1), 3);
        assert_eq!(frame_at(pixels, cell, 1, 1), 4);
    }

    #[test]
    fn test_probe_plan_matches_raster_grid() {
        let input = tempdir().unwrap();
        write_frames(input.path(), 23, Size::new(7, 3));

        let probe = ProbeBackend::new();
        let raster = RasterBackend::new();
        let shapes = FrameLoader::new(&probe, LoadOptions::new()).load(input.path()).unwrap();
        let pixels = FrameLoader::new(&raster, LoadOptions::new()).load(input.path()).unwrap();

        for axis in Axis::ALL {
            let config = TilingConfig::new(5, axis);
            let planned = GridComposer::new(&probe).compose(&shapes.sequence, &config).unwrap();
            let built = GridComposer::new(&raster).compose(&pixels.sequence, &config).unwrap();
            assert_eq!(planned.layout(), built.layout());
            assert_eq!(planned.bitmap().size(), built.bitmap().size());
        }
    }

    #[test]
    fn test_mixed_sizes_rejected() {
        let input = tempdir().unwrap();
        write_frames(input.path(), 3, Size::new(4, 4));
        RgbaImage::new(4, 5).save(input.path().join("frame003.png")).unwrap();

        let backend = ProbeBackend::new();
        let loaded = FrameLoader::new(&backend, LoadOptions::new()).load(input.path()).unwrap();
        let err = GridComposer::new(&backend)
            .compose(&loaded.sequence, &TilingConfig::new(2, Axis::Vertical))
            .unwrap_err();
        match err {
            CompositionError::NonUniformFrameSize { index, path, .. } => {
                assert_eq!(index, 3);
                assert!(path.ends_with("frame003.png"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_directory_writes_nothing() {
        let input = tempdir().unwrap();
        let backend = RasterBackend::new();
        let loaded = FrameLoader::new(&backend, LoadOptions::new()).load(input.path()).unwrap();
        let result = GridComposer::new(&backend)
            .compose(&loaded.sequence, &TilingConfig::new(1, Axis::Vertical));
        assert!(matches!(result, Err(CompositionError::EmptyInput)));
    }

    #[test]
    fn test_parallel_compositions_share_frames() {
        let input = tempdir().unwrap();
        write_frames(input.path(), 12, Size::new(4, 4));
        let backend = RasterBackend::new();
        let loaded = FrameLoader::new(&backend, LoadOptions::new()).load(input.path()).unwrap();
        let composer = GridComposer::new(&backend);

        let sizes: Vec<Size> = std::thread::scope(|s| {
            let handles: Vec<_> = [2, 3, 4, 6]
                .into_iter()
                .map(|len| {
                    let frames = &loaded.sequence;
                    s.spawn(move || {
                        composer
                            .compose(frames, &TilingConfig::new(len, Axis::Vertical))
                            .unwrap()
                            .bitmap()
                            .size()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert_eq!(
            sizes,
            vec![Size::new(24, 8), Size::new(16, 12), Size::new(12, 16), Size::new(8, 24)]
        );
    }
}
