use std::fmt::Write;

use crate::types::{Endsite, Joint, Pose, Position};

/// Channel layout of the camera joint, matching [`Pose::channels`].
pub const CAMERA_CHANNELS: [&str; 6] = [
    "Xposition",
    "Yposition",
    "Zposition",
    "Zrotation",
    "Xrotation",
    "Yrotation",
];

pub const DEFAULT_ROOT_NAME: &str = "MdtCam";

/// The one-joint skeleton every output file declares.
pub fn camera_joint(name: &str) -> Joint {
    Joint {
        name: name.to_string(),
        offset: Position::new(0.0, 0.0, 0.0),
        channels: CAMERA_CHANNELS.iter().map(|c| c.to_string()).collect(),
        endsite: Some(Endsite {
            offset: Position::new(0.0, 0.0, -1.0),
        }),
    }
}

fn write_hierarchy(out: &mut String, joint: &Joint) {
    let o = joint.offset;
    out.push_str("HIERARCHY\n");
    // writing into a String cannot fail
    let _ = writeln!(out, "ROOT {}", joint.name);
    out.push_str("{\n");
    let _ = writeln!(out, "\tOFFSET {:.2} {:.2} {:.2}", o.x, o.y, o.z);
    let _ = writeln!(out, "\tCHANNELS {} {}", joint.channels.len(), joint.channels.join(" "));
    if let Some(endsite) = &joint.endsite {
        let e = endsite.offset;
        out.push_str("\tEnd Site\n");
        out.push_str("\t{\n");
        let _ = writeln!(out, "\t\tOFFSET {:.2} {:.2} {:.2}", e.x, e.y, e.z);
        out.push_str("\t}\n");
    }
    out.push_str("}\n");
}

fn write_motion(out: &mut String, track: &[Pose], target_fps: f64) {
    out.push_str("MOTION\n");
    let _ = writeln!(out, "Frames: {}", track.len());
    let _ = writeln!(out, "Frame Time: {:.6}", 1.0 / target_fps);
    for pose in track {
        let c = pose.channels();
        let _ = writeln!(
            out,
            "{:.6} {:.6} {:.6} {:.6} {:.6} {:.6}",
            c[0], c[1], c[2], c[3], c[4], c[5]
        );
    }
}

/// Serialize a camera track as .bvh text with the default root joint name.
pub fn write_bvh(track: &[Pose], target_fps: f64) -> String {
    write_bvh_with(&camera_joint(DEFAULT_ROOT_NAME), track, target_fps)
}

/// Serialize a camera track as .bvh text under the given root joint.
pub fn write_bvh_with(joint: &Joint, track: &[Pose], target_fps: f64) -> String {
    // header is ~200 bytes, a motion line rarely exceeds 80
    let mut out = String::with_capacity(256 + track.len() * 80);
    write_hierarchy(&mut out, joint);
    write_motion(&mut out, track, target_fps);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rotation;

    const EXPECTED_HEADER: &str = "HIERARCHY\n\
ROOT MdtCam\n\
{\n\
\tOFFSET 0.00 0.00 0.00\n\
\tCHANNELS 6 Xposition Yposition Zposition Zrotation Xrotation Yrotation\n\
\tEnd Site\n\
\t{\n\
\t\tOFFSET 0.00 0.00 -1.00\n\
\t}\n\
}\n";

    #[test]
    fn empty_track_has_fixed_header() {
        let text = write_bvh(&[], 30.0);
        let expected = format!("{}MOTION\nFrames: 0\nFrame Time: 0.033333\n", EXPECTED_HEADER);
        assert_eq!(text, expected);
    }

    #[test]
    fn motion_lines_use_six_decimals() {
        let track = vec![
            Pose::new(Position::new(1.0, -2.5, 1.0 / 3.0), Rotation::new(359.9999999, 0.0, 90.0)),
            Pose::new(Position::new(-0.0000001, 16.0, 0.0), Rotation::new(0.5, 180.0, 270.25)),
        ];
        let text = write_bvh(&track, 60.0);
        let motion: Vec<&str> = text.lines().skip(10).collect();
        assert_eq!(
            motion,
            vec![
                "MOTION",
                "Frames: 2",
                "Frame Time: 0.016667",
                "1.000000 -2.500000 0.333333 360.000000 0.000000 90.000000",
                "-0.000000 16.000000 0.000000 0.500000 180.000000 270.250000",
            ]
        );
    }

    #[test]
    fn output_is_deterministic() {
        let track: Vec<Pose> = (0..50)
            .map(|i| Pose::from_channels([i as f64 * 0.1, 1.0, 2.0, 3.0, 4.0, i as f64]))
            .collect();
        assert_eq!(write_bvh(&track, 24.0), write_bvh(&track, 24.0));
    }

    #[test]
    fn root_name_is_configurable() {
        let text = write_bvh_with(&camera_joint("Camera01"), &[], 30.0);
        assert!(text.contains("\nROOT Camera01\n"));
    }
}
