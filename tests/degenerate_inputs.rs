//! Precondition failures and numerically degenerate inputs.

use normxcorr::{correlate, match_template, NormXCorrError, Raster};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn textured(width: usize, height: usize) -> Raster {
    Raster::from_fn(width, height, |x, y| {
        (((x * 13) ^ (y * 7) ^ (x * y)) & 0xFF) as f32 / 255.0
    })
    .unwrap()
}

#[test]
fn oversized_template_is_rejected_before_any_work() {
    let search = textured(20, 20);
    for (w, h) in [(50, 5), (5, 50), (21, 21)] {
        let template = textured(w, h);
        assert!(matches!(
            correlate(&template, &search),
            Err(NormXCorrError::TemplateExceedsSearch { .. })
        ));
    }
}

#[test]
fn zero_area_raster_is_rejected() {
    let search = textured(20, 20);
    let empty = Raster::new(Vec::new(), 0, 7).unwrap();
    assert!(matches!(
        correlate(&empty, &search),
        Err(NormXCorrError::EmptyInput { .. })
    ));
    assert!(matches!(
        correlate(&search, &empty),
        Err(NormXCorrError::EmptyInput { .. })
    ));
}

#[test]
fn constant_template_flattens_instead_of_failing() {
    let template = Raster::from_fn(6, 6, |_, _| 0.3).unwrap();
    let search = textured(20, 20);
    let (surface, peak) = match_template(&template, &search).unwrap();

    let scores = surface.scores();
    assert!(scores.iter().all(|v| v.is_finite()));
    // Suppressed denominator: every cell collapses to (numerator ~ 0) / 1.
    let min = scores.iter().copied().fold(f32::INFINITY, f32::min);
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    assert!(max - min < 1e-4, "spread = {}", max - min);
    assert!(peak.score.abs() < 1e-3);
}

#[test]
fn constant_search_region_does_not_produce_nan() {
    // Flat search raster: every local window is degenerate.
    let template = textured(8, 8);
    let search = Raster::from_fn(30, 30, |_, _| 0.5).unwrap();
    let surface = correlate(&template, &search).unwrap();
    assert!(surface.scores().iter().all(|v| v.is_finite()));
}

#[test]
fn scores_stay_within_unit_range_for_random_inputs() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..4 {
        let template = Raster::from_fn(8, 8, |_, _| rng.random_range(0.0..1.0)).unwrap();
        let search = Raster::from_fn(40, 30, |_, _| rng.random_range(0.0..1.0)).unwrap();
        let surface = correlate(&template, &search).unwrap();
        for &v in surface.scores() {
            assert!(v.is_finite());
            assert!(v.abs() <= 1.0 + 5e-3, "score out of range: {v}");
        }
    }
}
