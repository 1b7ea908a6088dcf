#![allow(dead_code)]

use std::path::PathBuf;

use byteorder::{LittleEndian, WriteBytesExt};
use dem2bvh::goldsrc::{DIRECTORY_ENTRY_SIZE, HEADER_SIZE, MAGIC};

pub enum Frame {
    ClientData { origin: [f32; 3], angles: [f32; 3] },
    DemoStart,
    ConsoleCommand(&'static str),
    NetworkMessage(Vec<u8>),
    Event,
    WeaponAnim,
    Sound(Vec<u8>),
    DemoBuffer(Vec<u8>),
    NextSection,
    Unknown(u8),
}

pub struct Entry {
    pub name: &'static str,
    pub frames: i32,
    pub time: f32,
    pub data: Vec<Frame>,
}

fn put_str(out: &mut Vec<u8>, s: &str, size: usize) {
    let mut buf = vec![0u8; size];
    buf[..s.len()].copy_from_slice(s.as_bytes());
    out.extend_from_slice(&buf);
}

fn put_sized(out: &mut Vec<u8>, bytes: &[u8]) {
    out.write_i32::<LittleEndian>(bytes.len() as i32).unwrap();
    out.extend_from_slice(bytes);
}

fn encode_frames(frames: &[Frame]) -> Vec<u8> {
    let mut out = Vec::new();
    for (i, frame) in frames.iter().enumerate() {
        let kind = match frame {
            Frame::NetworkMessage(_) => 1,
            Frame::DemoStart => 2,
            Frame::ConsoleCommand(_) => 3,
            Frame::ClientData { .. } => 4,
            Frame::NextSection => 5,
            Frame::Event => 6,
            Frame::WeaponAnim => 7,
            Frame::Sound(_) => 8,
            Frame::DemoBuffer(_) => 9,
            Frame::Unknown(kind) => *kind,
        };
        out.write_u8(kind).unwrap();
        out.write_f32::<LittleEndian>(i as f32 * 0.01).unwrap();
        out.write_i32::<LittleEndian>(i as i32).unwrap();
        match frame {
            Frame::ClientData { origin, angles } => {
                for v in origin.iter().chain(angles.iter()) {
                    out.write_f32::<LittleEndian>(*v).unwrap();
                }
                out.write_i32::<LittleEndian>(0).unwrap(); // weapon bits
                out.write_f32::<LittleEndian>(90.0).unwrap(); // fov
            }
            Frame::ConsoleCommand(command) => put_str(&mut out, command, 64),
            Frame::NetworkMessage(message) => {
                out.extend_from_slice(&[0u8; 436 + 28]);
                put_sized(&mut out, message);
            }
            Frame::Event => out.extend_from_slice(&[0u8; 84]),
            Frame::WeaponAnim => out.extend_from_slice(&[0u8; 8]),
            Frame::Sound(sample) => {
                out.write_i32::<LittleEndian>(1).unwrap();
                put_sized(&mut out, sample);
                out.extend_from_slice(&[0u8; 16]);
            }
            Frame::DemoBuffer(buffer) => put_sized(&mut out, buffer),
            Frame::DemoStart | Frame::NextSection | Frame::Unknown(_) => {}
        }
    }
    out
}

/// Header, then the directory table, then each entry's frame stream.
pub fn build_demo(entries: &[Entry]) -> Vec<u8> {
    let streams: Vec<Vec<u8>> = entries.iter().map(|e| encode_frames(&e.data)).collect();
    let table_offset = HEADER_SIZE;
    let mut data_offset = table_offset + 4 + DIRECTORY_ENTRY_SIZE * entries.len();

    let mut out = Vec::new();
    out.extend_from_slice(MAGIC);
    out.write_i32::<LittleEndian>(5).unwrap();
    out.write_i32::<LittleEndian>(48).unwrap();
    put_str(&mut out, "kz_synthetic", 260);
    put_str(&mut out, "cstrike", 260);
    out.write_u32::<LittleEndian>(0xdead_beef).unwrap();
    out.write_i32::<LittleEndian>(table_offset as i32).unwrap();
    assert_eq!(out.len(), HEADER_SIZE);

    out.write_i32::<LittleEndian>(entries.len() as i32).unwrap();
    for (i, (entry, stream)) in entries.iter().zip(streams.iter()).enumerate() {
        out.write_i32::<LittleEndian>(i as i32).unwrap();
        put_str(&mut out, entry.name, 64);
        out.write_i32::<LittleEndian>(0).unwrap();
        out.write_i32::<LittleEndian>(-1).unwrap();
        out.write_f32::<LittleEndian>(entry.time).unwrap();
        out.write_i32::<LittleEndian>(entry.frames).unwrap();
        out.write_i32::<LittleEndian>(data_offset as i32).unwrap();
        out.write_i32::<LittleEndian>(stream.len() as i32).unwrap();
        data_offset += stream.len();
    }
    for stream in streams {
        out.extend_from_slice(&stream);
    }
    out
}

/// Client data frames moving along +x while the yaw turns through 0 degrees.
pub fn camera_frames(count: usize) -> Vec<Frame> {
    (0..count)
        .map(|i| Frame::ClientData {
            origin: [i as f32, 0.0, 0.0],
            angles: [5.0, (350.0 + i as f32 * 0.5) % 360.0, 0.0],
        })
        .collect()
}

/// A fresh, empty directory under the system temp dir.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("dem2bvh-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
