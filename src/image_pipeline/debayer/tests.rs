use proptest::prelude::*;

use crate::image_pipeline::common::error::CaptureError;
use crate::image_pipeline::debayer::bilinear::to_sample;
use crate::image_pipeline::debayer::{
    demosaic, run, BayerPattern, Channel, CpuDebayer, DebayerBackend,
};

const FIXTURE: [u8; 8] = [10, 20, 30, 40, 50, 60, 70, 80];

#[test]
fn test_golden_fixture_grbg() {
    let image = demosaic(&FIXTURE, 4, 2, BayerPattern::Grbg).unwrap();

    let expected: [[u8; 3]; 8] = [
        [20, 10, 50],
        [20, 40, 60],
        [30, 30, 70],
        [40, 55, 70],
        [20, 35, 50],
        [20, 60, 60],
        [30, 50, 70],
        [40, 80, 70],
    ];
    assert_eq!((image.width, image.height), (4, 2));
    assert_eq!(image.pixels().collect::<Vec<_>>(), expected);
}

#[test]
fn test_golden_fixture_rggb() {
    // R G R G / G B G B
    let image = demosaic(&FIXTURE, 4, 2, BayerPattern::Rggb).unwrap();

    assert_eq!(image.pixel(0, 0), Some([10, 35, 60]));
    assert_eq!(image.pixel(1, 0), Some([20, 20, 60]));
    assert_eq!(image.pixel(1, 1), Some([20, 40, 60]));
    assert_eq!(image.pixel(2, 1), Some([30, 70, 70]));
}

#[test]
fn test_own_sample_is_preserved() {
    let mosaic: Vec<u8> = (0..64).map(|i| (i * 3) as u8).collect();
    for pattern in BayerPattern::ALL {
        let image = demosaic(&mosaic, 8, 8, pattern).unwrap();
        for y in 0..8 {
            for x in 0..8 {
                let own = pattern.channel_at(x, y);
                let pixel = image.pixel(x, y).unwrap();
                assert_eq!(pixel[own.index()], mosaic[y * 8 + x], "{pattern} at ({x},{y})");
            }
        }
    }
}

#[test]
fn test_uniform_mosaic_stays_uniform() {
    let mosaic = vec![128u8; 6 * 5];
    let image = demosaic(&mosaic, 6, 5, BayerPattern::Gbrg).unwrap();
    assert!(image.data.iter().all(|&v| v == 128));
}

#[test]
fn test_single_pixel_mosaic() {
    let image = demosaic(&[200], 1, 1, BayerPattern::Grbg).unwrap();
    // green site with no red or blue neighbors
    assert_eq!(image.pixel(0, 0), Some([0, 200, 0]));
}

#[test]
fn test_single_row_mosaic() {
    let image = demosaic(&[10, 20, 30], 3, 1, BayerPattern::Rggb).unwrap();
    assert_eq!(image.pixel(0, 0), Some([10, 20, 0]));
    assert_eq!(image.pixel(1, 0), Some([20, 20, 0]));
    assert_eq!(image.pixel(2, 0), Some([30, 20, 0]));
}

#[test]
fn test_rejects_bad_dimensions() {
    assert!(matches!(
        demosaic(&[], 0, 4, BayerPattern::Rggb),
        Err(CaptureError::InvalidDimensions(0, 4))
    ));
    assert!(matches!(
        demosaic(&FIXTURE, 3, 3, BayerPattern::Rggb),
        Err(CaptureError::InvalidDimensions(3, 3))
    ));
}

#[test]
fn test_sample_conversion_clamps() {
    assert_eq!(to_sample(-12.0), 0);
    assert_eq!(to_sample(300.7), 255);
    assert_eq!(to_sample(127.5), 128);
    assert_eq!(to_sample(12.4), 12);
}

#[test]
fn test_pattern_parsing() {
    assert_eq!("GRBG".parse::<BayerPattern>().unwrap(), BayerPattern::Grbg);
    assert_eq!("rggb".parse::<BayerPattern>().unwrap(), BayerPattern::Rggb);
    let err = "xtrans".parse::<BayerPattern>().unwrap_err();
    assert!(matches!(err, CaptureError::UnsupportedPattern(ref name) if name == "xtrans"));
    assert!(!err.is_retryable());
}

#[test]
fn test_pattern_offsets() {
    assert_eq!(BayerPattern::default(), BayerPattern::Grbg);
    assert_eq!(BayerPattern::Grbg.channel_at(1, 0), Channel::Red);
    assert_eq!(BayerPattern::Grbg.channel_at(0, 1), Channel::Blue);
    assert_eq!(BayerPattern::Bggr.channel_at(3, 3), Channel::Red);
    assert_eq!(BayerPattern::Gbrg.channel_at(2, 0), Channel::Green);
}

#[test]
fn test_bayer_crate_backend_keeps_dimensions() {
    let mosaic = vec![90u8; 16 * 16];
    let image = CpuDebayer::new()
        .process(&mosaic, 16, 16, BayerPattern::Grbg)
        .unwrap();
    assert_eq!((image.width, image.height), (16, 16));
    assert_eq!(image.data.len(), 16 * 16 * 3);
}

#[test]
fn test_backend_dispatch() {
    let via_run = run(DebayerBackend::Bilinear, &FIXTURE, 4, 2, BayerPattern::Grbg).unwrap();
    let direct = demosaic(&FIXTURE, 4, 2, BayerPattern::Grbg).unwrap();
    assert_eq!(via_run, direct);

    assert!(matches!(
        run(DebayerBackend::BayerCrate, &[1], 1, 1, BayerPattern::Grbg),
        Err(CaptureError::InvalidDimensions(1, 1))
    ));
}

fn mosaic_strategy() -> impl Strategy<Value = (usize, usize, BayerPattern, Vec<u8>)> {
    (1usize..12, 1usize..12, 0usize..4).prop_flat_map(|(w, h, p)| {
        (
            Just(w),
            Just(h),
            Just(BayerPattern::ALL[p]),
            proptest::collection::vec(any::<u8>(), w * h),
        )
    })
}

proptest! {
    #[test]
    fn prop_demosaic_preserves_dimensions((w, h, pattern, mosaic) in mosaic_strategy()) {
        let image = demosaic(&mosaic, w, h, pattern).unwrap();
        prop_assert_eq!(image.width, w);
        prop_assert_eq!(image.height, h);
        prop_assert_eq!(image.data.len(), w * h * 3);
    }

    #[test]
    fn prop_interpolation_stays_within_neighbor_range((w, h, pattern, mosaic) in mosaic_strategy()) {
        let image = demosaic(&mosaic, w, h, pattern).unwrap();
        let lo = *mosaic.iter().min().unwrap();
        let hi = *mosaic.iter().max().unwrap();
        for value in image.data {
            prop_assert!(value == 0 || (lo..=hi).contains(&value));
        }
    }
}
