//! The replay shape consumed by the track extractor.
//!
//! Decoders for concrete container formats fill these plain structs; the rest
//! of the crate never looks at raw replay bytes.

use crate::error::Result;
use crate::types::Position;

/// View angles in DEGREES, as stored by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewAngles {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

/// Per-frame camera data. Either half may be absent in partial records.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClientData {
    pub position: Option<Position>,
    pub rotation: Option<ViewAngles>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    NetworkMessage,
    DemoStart,
    ConsoleCommand,
    ClientData,
    NextSection,
    Event,
    WeaponAnim,
    Sound,
    DemoBuffer,
}

/// One record ("macro") of a directory's frame stream.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRecord {
    pub kind: FrameKind,
    pub time: f32,
    pub frame: i32,
    pub client_data: Option<ClientData>,
}

impl FrameRecord {
    pub fn client_data(time: f32, frame: i32, data: ClientData) -> FrameRecord {
        FrameRecord {
            kind: FrameKind::ClientData,
            time,
            frame,
            client_data: Some(data),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Directory {
    pub name: String,
    pub frames: i32,
    /// Total recorded time of the directory in seconds.
    pub time: f32,
    pub macros: Vec<FrameRecord>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Replay {
    pub directories: Vec<Directory>,
}

/// Turns the raw bytes of a replay container into a [`Replay`].
pub trait ReplayDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Replay>;
}
