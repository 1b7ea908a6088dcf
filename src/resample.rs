use crate::error::{Error, Result};
use crate::types::{Pose, Track, NUM_CHANNELS};
use crate::utils::{interp, unwrap_degrees, wrap_degrees};

/// Channels 0..3 are positions, 3..6 are rotations in degrees.
const FIRST_ROTATION_CHANNEL: usize = 3;

/// Sample times `i / fps` for `len` frames.
pub fn source_times(len: usize, fps: f64) -> Vec<f64> {
    (0..len).map(|i| i as f64 / fps).collect()
}

/// Every `k / target_fps` strictly below `end`.
pub fn target_times(end: f64, target_fps: f64) -> Vec<f64> {
    let mut times = Vec::new();
    let mut k: u64 = 0;
    loop {
        let t = k as f64 / target_fps;
        if t >= end {
            break;
        }
        times.push(t);
        k += 1;
    }
    times
}

fn check_rate(fps: f64) -> Result<()> {
    if !fps.is_finite() || fps <= 0.0 {
        return Err(Error::InvalidFrameRate(fps));
    }
    Ok(())
}

/// Resample a track recorded at `source_fps` to `target_fps`.
///
/// Positions are interpolated linearly. Rotations are unwrapped first so a
/// step from 350 to 10 degrees goes the short way round, interpolated, and
/// wrapped back into [0, 360). Equal rates return the input untouched.
pub fn resample(track: &[Pose], source_fps: f64, target_fps: f64) -> Result<Track> {
    if source_fps == target_fps {
        return Ok(track.to_vec());
    }
    check_rate(source_fps)?;
    check_rate(target_fps)?;
    if track.len() < 2 {
        return Err(Error::InsufficientSamples { found: track.len() });
    }

    let times = source_times(track.len(), source_fps);
    let targets = target_times(times[times.len() - 1], target_fps);

    let mut columns: Vec<Vec<f64>> = Vec::with_capacity(NUM_CHANNELS);
    for channel in 0..NUM_CHANNELS {
        let values: Vec<f64> = track.iter().map(|pose| pose.channels()[channel]).collect();
        let column = if channel < FIRST_ROTATION_CHANNEL {
            interp(&targets, &times, &values)
        } else {
            interp(&targets, &times, &unwrap_degrees(&values))
                .into_iter()
                .map(wrap_degrees)
                .collect()
        };
        columns.push(column);
    }

    Ok((0..targets.len())
        .map(|i| {
            let mut c = [0.0; NUM_CHANNELS];
            for (channel, value) in c.iter_mut().enumerate() {
                *value = columns[channel][i];
            }
            Pose::from_channels(c)
        })
        .collect())
}
