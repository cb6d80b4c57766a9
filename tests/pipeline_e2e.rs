//! End-to-end pipeline scenarios against the real surface and a persisted
//! role store.

use cropkit::config::CropConfig;
use cropkit::cropping::{Dimensions, PixelDensity, Rect};
use cropkit::loader;
use cropkit::pipeline::{CropPipeline, ExportSettings};
use cropkit::profile::{AspectProfile, ImageRole};
use cropkit::raster::{PixelSurface, Quality, RasterError};
use cropkit::store::PersistedStore;
use image::{ExtendedColorType, ImageEncoder, RgbImage};
use std::path::Path;

/// Create a small valid JPEG file with the given dimensions.
fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        .unwrap();
}

fn cover_pipeline(density: f64) -> CropPipeline<PixelSurface> {
    let profile = AspectProfile::resolve(ImageRole::Cover, &CropConfig::default()).unwrap();
    CropPipeline::new(
        profile,
        PixelSurface::new(),
        ExportSettings {
            quality: Quality::default(),
            density: PixelDensity::new(density),
        },
    )
}

#[test]
fn crop_settle_store_at_density_two() {
    let tmp = tempfile::TempDir::new().unwrap();
    let image_path = tmp.path().join("photo.jpg");
    create_test_jpeg(&image_path, 800, 600);

    let mut pipeline = cover_pipeline(2.0);
    let mut store = PersistedStore::new(tmp.path().join("images.json"));
    store.rehydrate().unwrap();

    // Select, load, lay out at half size
    let ticket = pipeline.begin_selection();
    let loaded = loader::select_file(Some(&image_path)).expect("valid selection");
    assert!(pipeline.complete_load(ticket, loaded.source));

    let region = pipeline.display_at(Dimensions::new(400, 300)).unwrap();
    let displayed_px = region.to_pixels(Dimensions::new(400, 300));

    // Initial 16:9 crop spans the full displayed width at ~225px height
    assert_eq!(displayed_px, Rect::new(0.0, 37.5, 400.0, 225.0));

    pipeline.settle(displayed_px, &mut store).unwrap();
    store.save().unwrap();

    // The stored export is a real JPEG at floor(400*2*2) x floor(225*2*2)
    let stored = store.get(ImageRole::Cover).expect("cover entry");
    assert_eq!(stored.mime(), "image/jpeg");
    let decoded = image::load_from_memory(stored.bytes()).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (1600, 900));

    // And survives a fresh rehydrate from disk
    let mut reloaded = PersistedStore::new(tmp.path().join("images.json"));
    reloaded.rehydrate().unwrap();
    assert_eq!(reloaded.get(ImageRole::Cover), Some(stored));
}

#[test]
fn storing_a_role_twice_keeps_only_the_latest() {
    let tmp = tempfile::TempDir::new().unwrap();
    let image_path = tmp.path().join("photo.jpg");
    create_test_jpeg(&image_path, 320, 240);

    let mut pipeline = cover_pipeline(1.0);
    let mut store = PersistedStore::new(tmp.path().join("images.json"));
    store.rehydrate().unwrap();

    let ticket = pipeline.begin_selection();
    let loaded = loader::select_file(Some(&image_path)).unwrap();
    pipeline.complete_load(ticket, loaded.source);
    pipeline.display_at(Dimensions::new(320, 240));

    pipeline
        .settle(Rect::new(0.0, 30.0, 320.0, 180.0), &mut store)
        .unwrap();
    let first = store.get(ImageRole::Cover).unwrap();

    // Adjust and settle again: the entry is replaced, not accumulated
    pipeline
        .settle(Rect::new(0.0, 0.0, 160.0, 90.0), &mut store)
        .unwrap();
    store.save().unwrap();

    let mut reloaded = PersistedStore::new(tmp.path().join("images.json"));
    reloaded.rehydrate().unwrap();
    assert_eq!(reloaded.entries().len(), 1);

    let second = reloaded.get(ImageRole::Cover).unwrap();
    assert_ne!(first, second);
    let decoded = image::load_from_memory(second.bytes()).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (160, 90));
}

#[test]
fn new_selection_resets_the_crop_until_the_new_image_is_ready() {
    let tmp = tempfile::TempDir::new().unwrap();
    let a = tmp.path().join("a.jpg");
    let b = tmp.path().join("b.jpg");
    create_test_jpeg(&a, 800, 600);
    create_test_jpeg(&b, 600, 800);

    let mut pipeline = cover_pipeline(1.0);
    let mut store = PersistedStore::new(tmp.path().join("images.json"));
    store.rehydrate().unwrap();

    // Image A: crop, settle, stored
    let ticket = pipeline.begin_selection();
    pipeline.complete_load(ticket, loader::select_file(Some(&a)).unwrap().source);
    let region = pipeline.display_at(Dimensions::new(400, 300)).unwrap();
    pipeline
        .settle(region.to_pixels(Dimensions::new(400, 300)), &mut store)
        .unwrap();
    assert!(store.get(ImageRole::Cover).is_some());

    // Select image B: the region is unset before B is ready, and settling
    // in that window cannot touch the store
    let ticket = pipeline.begin_selection();
    assert_eq!(pipeline.region(), None);
    let premature = pipeline.settle(Rect::new(0.0, 0.0, 100.0, 56.0), &mut store);
    assert!(matches!(premature, Err(RasterError::MissingSource)));

    // B arrives and lays out: the solver reruns for B's portrait shape
    pipeline.complete_load(ticket, loader::select_file(Some(&b)).unwrap().source);
    let region = pipeline.display_at(Dimensions::new(300, 400)).unwrap();
    let px = region.to_pixels(Dimensions::new(300, 400));
    assert!((px.width - 300.0).abs() < 1e-9);
    assert!((px.height - 168.75).abs() < 1e-9); // 300 / (16/9)
}
