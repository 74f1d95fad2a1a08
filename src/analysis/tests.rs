use std::borrow::Cow;

use super::*;
use crate::config::SilenceSettings;
use crate::error::InvalidInputError;

const RATE: u32 = 8_000;

fn track_ms(ms: u64, rate: u32, loud_until_ms: u64, amplitude: f64) -> Vec<f64> {
    let len = (ms * u64::from(rate) / 1000) as usize;
    let loud = (loud_until_ms * u64::from(rate) / 1000) as usize;
    (0..len)
        .map(|i| {
            if i < loud {
                // alternate sign so the mean stays near zero like real audio
                if i % 2 == 0 { amplitude } else { -amplitude }
            } else {
                0.0
            }
        })
        .collect()
}

#[test]
fn dbfs_of_reference_levels() {
    assert_eq!(chunk_dbfs(&[0.0; 16]), f64::NEG_INFINITY);
    assert_eq!(chunk_dbfs(&[]), f64::NEG_INFINITY);
    assert!(chunk_dbfs(&[32768.0, -32768.0]).abs() < 1e-9);
    assert!((chunk_dbfs(&[16384.0; 4]) + 6.0206).abs() < 1e-3);
}

#[test]
fn ten_second_track_silent_after_four_seconds_ends_at_4250() {
    let mixed = track_ms(10_000, RATE, 4_000, 10_000.0);
    let scanner = SilenceScanner::new(&SilenceSettings::default());
    assert_eq!(scanner.scan(&mixed, RATE), Ok(4_250));
}

#[test]
fn silent_track_returns_zero() {
    let mixed = vec![0.0; 80_000];
    assert_eq!(SilenceScanner::default().scan(&mixed, RATE), Ok(0));
}

#[test]
fn quiet_noise_below_threshold_counts_as_silence() {
    // 100/32768 is about -50.3 dBFS, 120/32768 about -48.7 dBFS
    let scanner = SilenceScanner::default();
    assert_eq!(scanner.scan(&track_ms(2_000, RATE, 2_000, 100.0), RATE), Ok(0));
    assert_eq!(
        scanner.scan(&track_ms(2_000, RATE, 1_000, 120.0), RATE),
        Ok(1_250)
    );
}

#[test]
fn single_loud_sample_at_start_gives_roughly_the_padding() {
    let mut mixed = vec![0.0; 80_000];
    mixed[0] = 32767.0;
    let scanner = SilenceScanner::default();
    let boundary = scanner.scan(&mixed, RATE).unwrap();
    assert!(boundary >= scanner.padding_ms());
    assert!(boundary <= scanner.padding_ms() + scanner.chunk_ms());
    assert_eq!(boundary, 350);
}

#[test]
fn chunks_tile_from_the_end_so_the_first_one_is_short() {
    // 10,050 samples at 1 kHz: the leading chunk covers only [0, 50).
    let mut mixed = vec![0.0; 10_050];
    mixed[0] = 32767.0;
    assert_eq!(SilenceScanner::default().scan(&mixed, 1_000), Ok(300));
}

#[test]
fn loud_throughout_is_capped_at_duration() {
    let mixed = track_ms(3_000, RATE, 3_000, 8_000.0);
    assert_eq!(SilenceScanner::default().scan(&mixed, RATE), Ok(3_000));
}

#[test]
fn track_shorter_than_one_chunk_is_still_scanned() {
    let mixed = track_ms(50, RATE, 50, 8_000.0);
    assert_eq!(SilenceScanner::default().scan(&mixed, RATE), Ok(50));
}

#[test]
fn boundary_is_always_within_the_track() {
    let scanner = SilenceScanner::new(&SilenceSettings {
        threshold_dbfs: -30.0,
        chunk_ms: 37,
        padding_ms: 900,
    });
    for loud_until in [0u64, 1, 36, 500, 999, 1_000] {
        let mixed = track_ms(1_000, RATE, loud_until, 20_000.0);
        let boundary = scanner.scan(&mixed, RATE).unwrap();
        assert!(boundary <= 1_000, "loud_until={loud_until} boundary={boundary}");
    }
}

#[test]
fn degenerate_input_fails_fast() {
    let scanner = SilenceScanner::default();
    assert_eq!(scanner.scan(&[], RATE), Err(InvalidInputError::ZeroLengthTrack));
    assert_eq!(scanner.scan(&[1.0], 0), Err(InvalidInputError::ZeroSampleRate));

    let zero_chunk = SilenceScanner::new(&SilenceSettings {
        chunk_ms: 0,
        ..SilenceSettings::default()
    });
    assert_eq!(zero_chunk.scan(&[1.0], RATE), Err(InvalidInputError::ZeroChunk));
}

#[test]
fn chunk_len_never_drops_below_one_sample() {
    let scanner = SilenceScanner::new(&SilenceSettings {
        chunk_ms: 1,
        ..SilenceSettings::default()
    });
    assert_eq!(scanner.chunk_len(500), 1);
    assert_eq!(SilenceScanner::default().chunk_len(44_100), 4_410);
}

#[test]
fn downsample_under_budget_is_borrowed_unchanged() {
    let samples = [1.0, -2.0, 3.5];
    let out = downsample(&samples, 3);
    assert!(matches!(out, Cow::Borrowed(_)));
    assert_eq!(&*out, &samples);
}

#[test]
fn downsample_averages_blocks_and_drops_the_remainder() {
    let samples: Vec<f64> = (0..12).map(f64::from).collect();
    assert_eq!(&*downsample(&samples, 4), &[1.0, 4.0, 7.0, 10.0]);

    // block = 4; samples 8 and 9 are dropped
    let samples: Vec<f64> = (0..10).map(f64::from).collect();
    assert_eq!(&*downsample(&samples, 3), &[1.5, 5.5]);
}

#[test]
fn downsample_just_over_budget_covers_the_whole_track() {
    let mut samples = vec![0.0; 10_000];
    samples.resize(19_999, 1_000.0);

    let out = downsample(&samples, 10_000);
    assert_eq!(out.len(), 9_999);
    assert_eq!(out[4_999], 0.0);
    assert_eq!(out[5_000], 1_000.0);
    assert_eq!(*out.last().unwrap(), 1_000.0);

    let points = waveform(&samples, 19.999, 10_000);
    let loud = points.iter().find(|p| p.amplitude > 0.0).unwrap();
    assert!((loud.time_sec - 10.0).abs() < 0.01, "{}", loud.time_sec);
}

#[test]
fn downsample_never_exceeds_the_budget() {
    for len in [11usize, 14, 25, 99, 10_001, 19_999, 30_000] {
        let samples = vec![0.5; len];
        for max in [1usize, 4, 5, 7, 10_000] {
            let out = downsample(&samples, max);
            assert!(out.len() <= max, "len={len} max={max} got={}", out.len());
            if len > max {
                let block = len.div_ceil(max);
                assert!(len - out.len() * block < block, "len={len} max={max}");
            }
        }
    }
    assert!(downsample(&[1.0, 2.0], 0).is_empty());
}

#[test]
fn waveform_timestamps_are_positional() {
    let samples: Vec<f64> = (0..8).map(f64::from).collect();
    let points = waveform(&samples, 2.0, 4);
    let times: Vec<f64> = points.iter().map(|p| p.time_sec).collect();
    assert_eq!(times, vec![0.0, 0.5, 1.0, 1.5]);
    assert_eq!(points[3].amplitude, 6.5);
}
