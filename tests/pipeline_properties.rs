//! End-to-end properties of the correlation pipeline on synthetic images.

use normxcorr::{correlate, find_peak, match_template, Raster};

/// Deterministic texture so templates have non-trivial variance everywhere.
fn make_image(width: usize, height: usize) -> Vec<f32> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let value = ((x * 13) ^ (y * 7) ^ (x * y)) & 0xFF;
            data.push(value as f32 / 255.0);
        }
    }
    data
}

fn extract_patch(
    image: &[f32],
    img_width: usize,
    x0: usize,
    y0: usize,
    width: usize,
    height: usize,
) -> Vec<f32> {
    let mut out = Vec::with_capacity(width * height);
    for y in 0..height {
        let row = (y0 + y) * img_width;
        for x in 0..width {
            out.push(image[row + x0 + x]);
        }
    }
    out
}

#[test]
fn identity_peaks_at_origin_with_unit_score() {
    let data = make_image(32, 32);
    let raster = Raster::new(data, 32, 32).unwrap();
    let (surface, peak) = match_template(&raster, &raster).unwrap();
    assert_eq!((surface.width(), surface.height()), (32, 32));
    assert_eq!((peak.x, peak.y), (0, 0));
    assert!((peak.score - 1.0).abs() < 1e-3, "score = {}", peak.score);
}

#[test]
fn translation_recovers_the_cut_offset() {
    let img_width = 100;
    let img_height = 100;
    let image = make_image(img_width, img_height);
    let search = Raster::new(image.clone(), img_width, img_height).unwrap();

    let (x0, y0) = (23, 17);
    let patch = extract_patch(&image, img_width, x0, y0, 10, 10);
    let template = Raster::new(patch, 10, 10).unwrap();

    let (_, peak) = match_template(&template, &search).unwrap();
    assert_eq!((peak.x, peak.y), (x0, y0));
    assert!((peak.score - 1.0).abs() < 1e-3, "score = {}", peak.score);
}

#[test]
fn surface_dimensions_equal_the_unpadded_search_raster() {
    // Odd, non-square search dimensions exercise the even/square padding and
    // the crop back to the original footprint.
    let search = Raster::new(make_image(37, 23), 37, 23).unwrap();
    let template = Raster::new(make_image(5, 4), 5, 4).unwrap();
    let surface = correlate(&template, &search).unwrap();
    assert_eq!((surface.width(), surface.height()), (37, 23));
}

#[test]
fn repeated_runs_are_bit_identical() {
    let search = Raster::new(make_image(64, 48), 64, 48).unwrap();
    let template = Raster::new(make_image(12, 9), 12, 9).unwrap();

    let first = correlate(&template, &search).unwrap();
    let second = correlate(&template, &search).unwrap();
    let bits = |s: &[f32]| s.iter().map(|v| v.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(first.scores()), bits(second.scores()));

    let peak_a = find_peak(&first).unwrap();
    let peak_b = find_peak(&second).unwrap();
    assert_eq!((peak_a.x, peak_a.y), (peak_b.x, peak_b.y));
}

#[test]
fn embedded_patch_beats_the_background() {
    // A textured patch pasted into a differently-textured background must
    // still win over every other offset.
    let img_width = 80;
    let img_height = 60;
    let mut image = make_image(img_width, img_height);

    let tpl_width = 16;
    let tpl_height = 12;
    let (x0, y0) = (41, 33);
    let patch: Vec<f32> = (0..tpl_width * tpl_height)
        .map(|i| ((i * 37) % 251) as f32 / 255.0)
        .collect();
    for y in 0..tpl_height {
        for x in 0..tpl_width {
            image[(y0 + y) * img_width + (x0 + x)] = patch[y * tpl_width + x];
        }
    }

    let search = Raster::new(image, img_width, img_height).unwrap();
    let template = Raster::new(patch, tpl_width, tpl_height).unwrap();
    let (_, peak) = match_template(&template, &search).unwrap();
    assert_eq!((peak.x, peak.y), (x0, y0));
    assert!(peak.score > 0.99);
}
