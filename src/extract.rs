use log::{debug, info, warn};

use crate::config::ExtractConfig;
use crate::replay::{ClientData, Replay};
use crate::types::{Pose, Position, Track, NUM_CHANNELS};

/////////////////////////////////////////////////////////////////////////////////////////////////

/// A value read from an engine-space client data record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceAxis {
    X,
    Y,
    Z,
    Pitch,
    Yaw,
    Roll,
}

/// `channel = scale * source + offset`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelMap {
    pub source: SourceAxis,
    pub scale: f64,
    pub offset: f64,
}

const fn map(source: SourceAxis, scale: f64, offset: f64) -> ChannelMap {
    ChannelMap {
        source,
        scale,
        offset,
    }
}

/// Engine space to BVH channel mapping, one entry per output channel:
/// `(-y, z + 16, -x, -roll, -pitch, yaw)`. The +16 lifts the origin to eye height.
pub const GOLDSRC_TO_BVH: [ChannelMap; NUM_CHANNELS] = [
    map(SourceAxis::Y, -1.0, 0.0),
    map(SourceAxis::Z, 1.0, 16.0),
    map(SourceAxis::X, -1.0, 0.0),
    map(SourceAxis::Roll, -1.0, 0.0),
    map(SourceAxis::Pitch, -1.0, 0.0),
    map(SourceAxis::Yaw, 1.0, 0.0),
];

/// Build a pose from a client data record. `None` when either half is missing.
pub fn remap_client_data(data: &ClientData, mapping: &[ChannelMap; NUM_CHANNELS]) -> Option<Pose> {
    let position: Position = data.position?;
    let rotation = data.rotation?;

    let mut channels = [0.0; NUM_CHANNELS];
    for (channel, m) in channels.iter_mut().zip(mapping.iter()) {
        let value = match m.source {
            SourceAxis::X => position.x,
            SourceAxis::Y => position.y,
            SourceAxis::Z => position.z,
            SourceAxis::Pitch => rotation.pitch,
            SourceAxis::Yaw => rotation.yaw,
            SourceAxis::Roll => rotation.roll,
        };
        *channel = m.scale * value + m.offset;
    }
    Some(Pose::from_channels(channels))
}

/////////////////////////////////////////////////////////////////////////////////////////////////

/// Camera track as recorded, before resampling.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceTrack {
    pub poses: Track,
    pub fps: f64,
    /// Frame records that had no usable position/rotation pair.
    pub skipped: usize,
}

/// Collect the camera poses of the playback directory and work out the rate
/// they were recorded at.
pub fn extract_track(replay: &Replay, config: &ExtractConfig) -> SourceTrack {
    let mut poses = Track::new();
    let mut skipped = 0;
    let mut frame_time = config.fallback_frame_time;
    let mut found = false;

    for directory in replay
        .directories
        .iter()
        .filter(|d| d.name == config.playback_directory)
    {
        found = true;
        if directory.frames > 0 {
            frame_time = directory.time as f64 / directory.frames as f64;
        }

        for record in directory.macros.iter() {
            let Some(data) = record.client_data.as_ref() else {
                continue;
            };
            match remap_client_data(data, &GOLDSRC_TO_BVH) {
                Some(pose) => poses.push(pose),
                None => {
                    skipped += 1;
                    debug!("skipping incomplete client data at frame {}", record.frame);
                }
            }
        }
    }

    if !found {
        warn!("no '{}' directory found in replay", config.playback_directory);
    }
    if skipped > 0 {
        info!("skipped {} incomplete camera records", skipped);
    }

    SourceTrack {
        poses,
        fps: 1.0 / frame_time,
        skipped,
    }
}
