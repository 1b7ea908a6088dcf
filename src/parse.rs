use crate::error::{Error, Result};
use crate::types::*;
use regex::Regex;
use std::str::Lines;

///////////////////////////////////////////////////////////////////////////////////////////////////

/// Joint names the reader accepts after `ROOT`.
const JOINT_NAME: &str = r"\w+";

/// True when `name` can be written after `ROOT` and read back.
pub fn is_valid_joint_name(name: &str) -> bool {
    Regex::new(&format!("^{}$", JOINT_NAME))
        .expect("valid regex")
        .is_match(name)
}

fn bvh_error(line_number: usize, message: &str) -> Error {
    Error::BvhParse(format!("line {}: {}", line_number, message))
}

fn parse_floats(line_number: usize, text: &str) -> Result<Vec<f64>> {
    text.split_whitespace()
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| bvh_error(line_number, &format!("invalid number '{}'", s)))
        })
        .collect()
}

fn parse_offset(line_number: usize, text: &str) -> Result<Position> {
    let v = parse_floats(line_number, text)?;
    if v.len() != 3 {
        return Err(bvh_error(line_number, "OFFSET needs 3 values"));
    }
    Ok(Position::new(v[0], v[1], v[2]))
}

///////////////////////////////////////////////////////////////////////////////////////////////////

/// Parse a single-joint .bvh document: the camera hierarchy followed by its motion block.
fn parse_bvh(lines: Lines) -> Result<(BvhMetadata, Track)> {
    let re_joint = Regex::new(&format!("^ROOT ({})$", JOINT_NAME)).expect("valid regex");
    let re_offset = Regex::new(r"^OFFSET (.+)$").expect("valid regex");
    let re_channels = Regex::new(r"^CHANNELS (\d+) (.+)$").expect("valid regex");
    let re_frames = Regex::new(r"^Frames:\s*(\d+)$").expect("valid regex");
    let re_frame_time = Regex::new(r"^Frame Time:\s*(\S+)$").expect("valid regex");

    let mut root: Option<Joint> = None;
    let mut num_frames: Option<usize> = None;
    let mut frame_time: Option<f64> = None;
    let mut parsing_endsite = false;
    let mut depth: usize = 0;

    //// PARSING HIERARCHY LINE BY LINE
    let mut it = lines.enumerate();
    loop {
        let (i, line) = it
            .next()
            .ok_or_else(|| Error::BvhParse("unexpected end of file before motion data".to_string()))?;
        let n = i + 1;
        let line = line.trim();

        if line.is_empty() || line == "HIERARCHY" || line == "MOTION" {
            continue;
        } else if line.starts_with("JOINT") {
            return Err(bvh_error(n, "only a single root joint is supported"));
        } else if line.starts_with("ROOT") {
            let captures = re_joint
                .captures(line)
                .ok_or_else(|| bvh_error(n, "ROOT without a joint name"))?;
            if root.is_some() {
                return Err(bvh_error(n, "only a single root joint is supported"));
            }
            root = Some(Joint {
                name: captures[1].to_string(),
                offset: Position::new(0.0, 0.0, 0.0),
                channels: Vec::new(),
                endsite: None,
            });
        } else if line.to_lowercase().starts_with("end") {
            parsing_endsite = true;
        } else if line == "{" {
            depth += 1;
        } else if line == "}" {
            depth = depth
                .checked_sub(1)
                .ok_or_else(|| bvh_error(n, "unbalanced '}'"))?;
        } else if let Some(captures) = re_offset.captures(line) {
            let offset = parse_offset(n, &captures[1])?;
            let joint = root.as_mut().ok_or_else(|| bvh_error(n, "OFFSET before ROOT"))?;
            if parsing_endsite {
                joint.endsite = Some(Endsite { offset });
                parsing_endsite = false;
            } else {
                joint.offset = offset;
            }
        } else if let Some(captures) = re_channels.captures(line) {
            let joint = root.as_mut().ok_or_else(|| bvh_error(n, "CHANNELS before ROOT"))?;
            let declared: usize = captures[1]
                .parse()
                .map_err(|_| bvh_error(n, "invalid channel count"))?;
            joint.channels = captures[2].split_whitespace().map(str::to_string).collect();
            if joint.channels.len() != declared {
                return Err(bvh_error(n, "channel count does not match channel names"));
            }
        } else if let Some(captures) = re_frames.captures(line) {
            num_frames = Some(
                captures[1]
                    .parse()
                    .map_err(|_| bvh_error(n, "invalid frame count"))?,
            );
        } else if let Some(captures) = re_frame_time.captures(line) {
            frame_time = Some(
                captures[1]
                    .parse()
                    .map_err(|_| bvh_error(n, "invalid frame time"))?,
            );
            break; // jump to parsing motion
        } else {
            return Err(bvh_error(n, &format!("unexpected line '{}'", line)));
        }
    }

    let root = root.ok_or_else(|| Error::BvhParse("missing ROOT joint".to_string()))?;
    let num_frames =
        num_frames.ok_or_else(|| Error::BvhParse("missing 'Frames:' line".to_string()))?;
    let frame_time = frame_time.unwrap_or_default();
    if depth != 0 {
        return Err(Error::BvhParse("unbalanced braces in hierarchy".to_string()));
    }
    if root.channels.len() != NUM_CHANNELS {
        return Err(Error::BvhParse(format!(
            "expected {} channels, found {}",
            NUM_CHANNELS,
            root.channels.len()
        )));
    }

    /////////////////////////////////// PARSING MOTION ///////////////////////////////////

    let mut track = Track::with_capacity(num_frames);
    for (i, line) in it {
        if line.trim().is_empty() {
            continue;
        }
        let values = parse_floats(i + 1, line)?;
        let channels: [f64; NUM_CHANNELS] = values
            .try_into()
            .map_err(|_| bvh_error(i + 1, "motion line needs 6 values"))?;
        track.push(Pose::from_channels(channels));
    }
    if track.len() != num_frames {
        return Err(Error::BvhParse(format!(
            "header declares {} frames but {} were found",
            num_frames,
            track.len()
        )));
    }

    let fps = if frame_time > 0.0 {
        (1.0 / frame_time).round() as u32
    } else {
        0
    };
    let metadata = BvhMetadata {
        root,
        num_frames,
        frame_time,
        fps,
    };
    Ok((metadata, track))
}

//////////////////////////////////////////////////////////////// PUBLIC ////////////////////////////////////////////////////////////////

/// load a bvh file from a file path
pub fn load_bvh_from_file(file_path: &str) -> Result<(BvhMetadata, Track)> {
    let contents = std::fs::read_to_string(file_path)?;
    parse_bvh(contents.lines())
}

/// load a bvh file from a string
pub fn load_bvh_from_string(bvh_string: &str) -> Result<(BvhMetadata, Track)> {
    parse_bvh(bvh_string.lines())
}
