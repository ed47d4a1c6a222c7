use polarstate::prelude::*;
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;

/// Splits arbitrary samples into four same-shape intensity images.
fn images(samples: &[(u8, u8, u8, u8)], cols: u8) -> Option<[IntensityImage; 4]> {
    let cols = (cols % 8) as usize + 1;
    let rows = samples.len() / cols;
    if rows == 0 {
        return None;
    }

    let samples = &samples[..rows * cols];
    let plane = |pick: fn(&(u8, u8, u8, u8)) -> u8| {
        let pixels = samples.iter().map(|s| pick(s) as f64).collect();
        IntensityImage::from_vec(rows, cols, pixels).ok()
    };

    Some([
        plane(|s| s.0)?,
        plane(|s| s.1)?,
        plane(|s| s.2)?,
        plane(|s| s.3)?,
    ])
}

#[quickcheck]
fn four_angle_shapes(samples: Vec<(u8, u8, u8, u8)>, cols: u8) -> TestResult {
    let Some([i000, i045, i090, i135]) = images(&samples, cols) else {
        return TestResult::discard();
    };
    let (rows, cols) = i000.dimensions();

    let engine = StokesEngine::default();
    let stokes = engine
        .stokes_from_four(&[&i000, &i045, &i090, &i135])
        .unwrap();
    let metrics = engine.metrics_from_stokes(&stokes);

    TestResult::from_bool(
        stokes.dimensions() == (rows, cols, 3)
            && metrics.iter().all(|(_, plane)| plane.dimensions() == (rows, cols)),
    )
}

#[quickcheck]
fn two_angle_has_no_diagonal(samples: Vec<(u8, u8, u8, u8)>, cols: u8) -> TestResult {
    let Some([i000, _, i090, _]) = images(&samples, cols) else {
        return TestResult::discard();
    };

    let stokes = StokesEngine::default()
        .stokes_from_two(&i000, &i090)
        .unwrap();

    TestResult::from_bool(
        stokes.dimensions() == (i000.rows(), i000.cols(), 3)
            && stokes
                .plane(StokesChannel::S2)
                .as_slice()
                .iter()
                .all(|s2| *s2 == 0.),
    )
}

#[quickcheck]
fn dop_in_unit_range(stokes: Vec<(f64, f64, f64)>) -> bool {
    let data: Vec<f64> = stokes.iter().flat_map(|s| [s.0, s.1, s.2]).collect();
    let metrics = StokesEngine::default()
        .metrics_from_buffer(1, stokes.len(), 3, &data)
        .unwrap();

    metrics
        .dop
        .as_slice()
        .iter()
        .all(|dop| (0.0..=1.0).contains(dop))
}

#[quickcheck]
fn ellipticity_never_nan(stokes: Vec<(f64, f64, f64)>) -> bool {
    let data: Vec<f64> = stokes.iter().flat_map(|s| [s.0, s.1, s.2]).collect();
    let metrics = StokesEngine::default()
        .metrics_from_buffer(stokes.len(), 1, 3, &data)
        .unwrap();

    metrics
        .ellipticity_angle
        .as_slice()
        .iter()
        .all(|angle| !angle.is_nan())
}

#[quickcheck]
fn orientation_in_half_open_range(samples: Vec<(u8, u8, u8, u8)>, cols: u8) -> TestResult {
    let Some([i000, i045, i090, i135]) = images(&samples, cols) else {
        return TestResult::discard();
    };

    let engine = StokesEngine::default();
    let stokes = engine
        .stokes_from_four(&[&i000, &i045, &i090, &i135])
        .unwrap();
    let metrics = engine.metrics_from_stokes(&stokes);

    TestResult::from_bool(
        metrics
            .orientation_angle
            .as_slice()
            .iter()
            // Radian to degree conversion may round the upper bound by an ulp.
            .all(|angle| -90. < *angle && *angle <= 90. + 1e-9),
    )
}

#[quickcheck]
fn bit_identical_reruns(samples: Vec<(u8, u8, u8, u8)>, cols: u8) -> TestResult {
    let Some([i000, i045, i090, i135]) = images(&samples, cols) else {
        return TestResult::discard();
    };

    let engine = StokesEngine::default();
    let run = || {
        let stokes = engine
            .stokes_from_four(&[&i000, &i045, &i090, &i135])
            .unwrap();
        engine.metrics_from_stokes(&stokes)
    };
    let (first, second) = (run(), run());

    TestResult::from_bool(first.iter().zip(second.iter()).all(|((_, a), (_, b))| {
        a.as_slice()
            .iter()
            .zip(b.as_slice())
            .all(|(x, y)| x.to_bits() == y.to_bits())
    }))
}
