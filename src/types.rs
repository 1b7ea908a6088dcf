use cgmath::Vector3;

/////////////////////////////////////////////////////////////////////////////////////////////////

pub type Position = Vector3<f64>;
/// A uniformly sampled sequence of poses. The sampling rate travels next to it.
pub type Track = Vec<Pose>;

pub const NUM_CHANNELS: usize = 6;

/////////////////////////////////////////////////////////////////////////////////////////////////

/// Rotation in DEGREES, one field per BVH rotation channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    pub z_rotation: f64,
    pub x_rotation: f64,
    pub y_rotation: f64,
}

impl Rotation {
    /// Arguments follow the channel order Zrotation, Xrotation, Yrotation.
    pub fn new(z_rotation: f64, x_rotation: f64, y_rotation: f64) -> Rotation {
        Rotation {
            z_rotation,
            x_rotation,
            y_rotation,
        }
    }
}

/// One camera sample: 3 position channels followed by 3 rotation channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Position,
    pub rotation: Rotation,
}

impl Pose {
    pub fn new(position: Position, rotation: Rotation) -> Pose {
        Pose { position, rotation }
    }

    /// The 6 channel values in the order they are written to a motion line.
    pub fn channels(&self) -> [f64; NUM_CHANNELS] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.rotation.z_rotation,
            self.rotation.x_rotation,
            self.rotation.y_rotation,
        ]
    }

    pub fn from_channels(c: [f64; NUM_CHANNELS]) -> Pose {
        Pose {
            position: Position::new(c[0], c[1], c[2]),
            rotation: Rotation::new(c[3], c[4], c[5]),
        }
    }
}

/////////////////////////////////////////////////////////////////////////////////////////////////

/// The single camera joint written to and read from .bvh files.
#[derive(Debug, Clone, PartialEq)]
pub struct Joint {
    pub name: String,
    pub offset: Position,
    pub channels: Vec<String>,
    pub endsite: Option<Endsite>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Endsite {
    pub offset: Position,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BvhMetadata {
    pub root: Joint,
    pub num_frames: usize,
    pub frame_time: f64,
    pub fps: u32,
}

/////////////////////////////////////////////////////////////////////////////////////////////////
