// tests/unit_tests.rs
use approx::assert_abs_diff_eq;
use gdal::raster::Buffer;
use ndvi_relief::batch::BatchConfig;
use ndvi_relief::colour::{ColourRamp, Palette, RampError, Rgb};
use ndvi_relief::processing::{ndvi, NdviCalculator, NODATA};

/// Helper function to create red/NIR blocks with specific dimensions
fn create_test_data(
    width: usize,
    height: usize,
    red_values: &[f32],
    nir_values: &[f32],
) -> (Buffer<f32>, Buffer<f32>) {
    let red_data = (0..width * height)
        .map(|i| red_values[i % red_values.len()])
        .collect();
    let nir_data = (0..width * height)
        .map(|i| nir_values[i % nir_values.len()])
        .collect();

    (
        Buffer::new((width, height), red_data),
        Buffer::new((width, height), nir_data),
    )
}

/// Test NDVI calculation with known values
#[test]
fn test_ndvi_calculation() {
    let test_cases = [
        // RED, NIR, Expected NDVI
        (2500.0, 5000.0, 0.33333), // (5000-2500)/(5000+2500)
        (3000.0, 3000.0, 0.0),
        (5000.0, 1000.0, -0.66667),
        (0.0, 0.0, NODATA), // divide by zero
    ];

    let red_values: Vec<f32> = test_cases.iter().map(|(red, _, _)| *red).collect();
    let nir_values: Vec<f32> = test_cases.iter().map(|(_, nir, _)| *nir).collect();
    let (red, nir) = create_test_data(2, 2, &red_values, &nir_values);

    let result = NdviCalculator::new(None, None).calculate(&red, &nir).unwrap();

    assert_eq!(result.shape(), (2, 2));
    for (i, (_, _, expected)) in test_cases.iter().enumerate() {
        if *expected == NODATA {
            assert_eq!(result.data()[i], NODATA);
        } else {
            assert_abs_diff_eq!(result.data()[i], *expected, epsilon = 1e-4);
        }
    }
}

#[test]
fn test_ndvi_zero_denominator_with_negative_inputs() {
    // -100 + 100 == 0 must not produce inf or NaN
    assert_eq!(ndvi(-100.0, 100.0), NODATA);
    assert_eq!(ndvi(100.0, -100.0), NODATA);
}

#[test]
fn test_ndvi_extremes() {
    assert_abs_diff_eq!(ndvi(0.0, 1200.0), 1.0);
    assert_abs_diff_eq!(ndvi(1200.0, 0.0), -1.0);
}

#[test]
fn test_ndvi_respects_band_nodata() {
    let (red, nir) = create_test_data(4, 1, &[0.0, 2500.0, 2500.0, 100.0], &[5000.0, 0.0, 5000.0, 300.0]);

    // 0 is no-data in red, 0 is no-data in NIR
    let result = NdviCalculator::new(Some(0.0), Some(0.0))
        .calculate(&red, &nir)
        .unwrap();

    assert_eq!(result.data()[0], NODATA);
    assert_eq!(result.data()[1], NODATA);
    assert_abs_diff_eq!(result.data()[2], 0.33333, epsilon = 1e-4);
    assert_abs_diff_eq!(result.data()[3], 0.5, epsilon = 1e-6);
}

#[test]
fn test_ndvi_shape_mismatch() {
    let red = Buffer::new((2, 1), vec![1.0f32, 2.0]);
    let nir = Buffer::new((1, 2), vec![1.0f32, 2.0]);
    assert!(NdviCalculator::new(None, None).calculate(&red, &nir).is_err());
}

#[test]
fn test_ramp_highest_first() {
    let ramp = ColourRamp::from_range(-0.2, 0.8, Palette::RedGreen).unwrap();
    let values: Vec<f64> = ramp.breakpoints().iter().map(|bp| bp.value).collect();

    assert_eq!(values, vec![0.6, 0.4, 0.2, 0.0, -0.2]);
    assert_eq!(ramp.breakpoints()[0].colour, Rgb(100, 0, 0));
    assert_eq!(ramp.breakpoints()[4].colour, Rgb(0, 100, 0));
}

#[test]
fn test_ramp_rounds_to_hundredths() {
    let ramp = ColourRamp::from_range(0.123, 0.789, Palette::Terrain).unwrap();
    let values: Vec<f64> = ramp.breakpoints().iter().map(|bp| bp.value).collect();

    // increment 0.1332
    assert_eq!(values, vec![0.66, 0.52, 0.39, 0.26, 0.12]);
    assert_eq!(ramp.first_colour(), Rgb(48, 100, 102));
}

#[test]
fn test_ramp_ties_round_to_even() {
    // steps of exactly 0.125
    let ramp = ColourRamp::from_range(0.0, 0.625, Palette::RedGreen).unwrap();
    let values: Vec<f64> = ramp.breakpoints().iter().map(|bp| bp.value).collect();

    assert_eq!(values, vec![0.5, 0.38, 0.25, 0.12, 0.0]);
}

#[test]
fn test_ramp_degenerate_range() {
    let ramp = ColourRamp::from_range(0.42, 0.42, Palette::RedGreen).unwrap();
    assert!(ramp.breakpoints().iter().all(|bp| bp.value == 0.42));
    assert_eq!(ramp.breakpoints().len(), 5);
}

#[test]
fn test_ramp_rejects_bad_ranges() {
    assert_eq!(
        ColourRamp::from_range(0.5, -0.5, Palette::RedGreen),
        Err(RampError::InvertedRange { min: 0.5, max: -0.5 })
    );
    assert!(matches!(
        ColourRamp::from_range(f64::NAN, 1.0, Palette::RedGreen),
        Err(RampError::NonFinite { .. })
    ));
}

#[test]
fn test_colour_map_file_layout() {
    let ramp = ColourRamp::from_range(-0.2, 0.8, Palette::RedGreen).unwrap();

    let expected = "\
1       100 0 0
0.60    100 0 0
0.40    255 0 0
0.20    255 255 0
0.00    0 200 0
-0.20    0 100 0
0       175 175 175
-1    0 0 0 0
nv    0 0 0 0
";
    assert_eq!(ramp.to_colour_map(), expected);
}

#[test]
fn test_colour_map_written_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("map.txt");
    let ramp = ColourRamp::from_range(0.0, 1.0, Palette::Terrain).unwrap();

    ramp.write_colour_map(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 9);
    assert_eq!(content.lines().nth(1), Some("0.80    48 100 102"));
    assert_eq!(content.lines().nth(5), Some("0.00    110 70 44"));
}

#[test]
fn test_batch_config_defaults_and_overrides() {
    let config = BatchConfig::parse(
        r#"{
            "global": { "compress": "ZSTD", "palette": "terrain" },
            "jobs": [
                { "red": "b04.tif", "nir": "b08.tif", "output_dir": "out" },
                { "red": "b04.tif", "nir": "b08.tif", "output_dir": "out2",
                  "palette": "red-green", "png": true, "tiled": false }
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(config.global.compress_level, 6);
    assert!(config.global.tiled);

    let first = config.jobs[0].run_options(&config.global);
    assert_eq!(first.palette, Palette::Terrain);
    assert_eq!(first.output.compress, "ZSTD");
    assert!(!first.png);

    let second = config.jobs[1].run_options(&config.global);
    assert_eq!(second.palette, Palette::RedGreen);
    assert!(second.png);
    assert!(!second.output.tiled);
}

#[test]
fn test_batch_config_accepts_map_numbers() {
    let config = BatchConfig::parse(
        r#"{
            "global": { "palette": 1 },
            "jobs": [
                { "red": "a", "nir": "b", "output_dir": "c" },
                { "red": "a", "nir": "b", "output_dir": "c", "palette": "0" },
                { "red": "a", "nir": "b", "output_dir": "c", "palette": 3 }
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(config.global.palette, Palette::Terrain);
    assert_eq!(config.jobs[0].run_options(&config.global).palette, Palette::Terrain);
    assert_eq!(config.jobs[1].palette, Some(Palette::RedGreen));
    assert_eq!(config.jobs[2].palette, Some(Palette::RedGreen));
}

#[test]
fn test_batch_config_rejects_unknown_palette() {
    let result = BatchConfig::parse(
        r#"{ "jobs": [ { "red": "a", "nir": "b", "output_dir": "c", "palette": "viridis" } ] }"#,
    );
    assert!(result.is_err());
}
