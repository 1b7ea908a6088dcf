//! Best-effort decoder for GoldSrc (`HLDEMO`) demo files.
//!
//! Only the parts the camera extractor needs are kept: directory names,
//! frame counts, recorded time and the client data frames. Everything else is
//! skipped by size.

use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};
use log::{debug, warn};

use crate::error::{Error, Result};
use crate::replay::{ClientData, Directory, FrameKind, FrameRecord, Replay, ReplayDecoder, ViewAngles};
use crate::types::Position;

pub const MAGIC: &[u8; 8] = b"HLDEMO\0\0";
pub const HEADER_SIZE: usize = 544;
pub const DIRECTORY_ENTRY_SIZE: usize = 92;

const NAME_SIZE: usize = 260;
const DESCRIPTION_SIZE: usize = 64;
const CONSOLE_COMMAND_SIZE: usize = 64;
const EVENT_SIZE: usize = 84;
const WEAPON_ANIM_SIZE: usize = 8;
const SOUND_TRAILER_SIZE: usize = 16;
const DEMO_INFO_SIZE: usize = 436;
const SEQUENCE_INFO_SIZE: usize = 28;
const MAX_DIRECTORY_ENTRIES: i32 = 1024;

/// Fixed 544 byte file header.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoHeader {
    pub demo_protocol: i32,
    pub network_protocol: i32,
    pub map_name: String,
    pub game_directory: String,
    pub map_crc: u32,
    pub directory_offset: i32,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct GoldSrcDecoder;

impl ReplayDecoder for GoldSrcDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<Replay> {
        let mut cur = Cursor::new(bytes);
        let header = read_header(&mut cur)?;
        debug!(
            "demo protocol {}, network protocol {}, map '{}', game '{}'",
            header.demo_protocol, header.network_protocol, header.map_name, header.game_directory
        );

        seek(&mut cur, header.directory_offset)
            .map_err(|_| format_error("directory offset points outside the file"))?;
        let count = cur.read_i32::<LittleEndian>().map_err(|_| format_error("missing directory table"))?;
        if !(0..=MAX_DIRECTORY_ENTRIES).contains(&count) {
            return Err(format_error(&format!("implausible directory count {}", count)));
        }

        let mut entries = Vec::with_capacity(count as usize);
        for _ in 0..count {
            entries.push(
                read_directory_entry(&mut cur).map_err(|_| format_error("truncated directory table"))?,
            );
        }

        let directories = entries
            .into_iter()
            .map(|entry| {
                let macros = read_frames(bytes, &entry);
                Directory {
                    name: entry.name,
                    frames: entry.frame_count,
                    time: entry.track_time,
                    macros,
                }
            })
            .collect();

        Ok(Replay { directories })
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////

struct DirectoryEntry {
    name: String,
    track_time: f32,
    frame_count: i32,
    offset: i32,
}

fn format_error(message: &str) -> Error {
    Error::ReplayFormat(message.to_string())
}

fn seek(cur: &mut Cursor<&[u8]>, offset: i32) -> Result<()> {
    if offset < 0 || offset as usize > cur.get_ref().len() {
        return Err(format_error("offset out of range"));
    }
    cur.set_position(offset as u64);
    Ok(())
}

fn skip(cur: &mut Cursor<&[u8]>, len: usize) -> Result<()> {
    let remaining = cur.get_ref().len() as u64 - cur.position().min(cur.get_ref().len() as u64);
    if len as u64 > remaining {
        return Err(format_error("unexpected end of data"));
    }
    cur.set_position(cur.position() + len as u64);
    Ok(())
}

fn skip_sized(cur: &mut Cursor<&[u8]>) -> Result<()> {
    let len = cur.read_i32::<LittleEndian>()?;
    if len < 0 {
        return Err(format_error(&format!("negative block length {}", len)));
    }
    skip(cur, len as usize)
}

/// Read a fixed-size, NUL padded string field.
fn read_c_string(cur: &mut Cursor<&[u8]>, size: usize) -> Result<String> {
    let mut buf = vec![0u8; size];
    cur.read_exact(&mut buf)?;
    Ok(c_string(&buf))
}

pub(crate) fn c_string(buf: &[u8]) -> String {
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..end]).into_owned()
}

pub fn read_header(cur: &mut Cursor<&[u8]>) -> Result<DemoHeader> {
    let mut magic = [0u8; 8];
    cur.read_exact(&mut magic)
        .map_err(|_| format_error("file is shorter than the demo header"))?;
    if magic[..7] != MAGIC[..7] {
        return Err(format_error("not a GoldSrc demo (bad magic)"));
    }
    read_header_fields(cur).map_err(|_| format_error("file is shorter than the demo header"))
}

fn read_header_fields(cur: &mut Cursor<&[u8]>) -> Result<DemoHeader> {
    Ok(DemoHeader {
        demo_protocol: cur.read_i32::<LittleEndian>()?,
        network_protocol: cur.read_i32::<LittleEndian>()?,
        map_name: read_c_string(cur, NAME_SIZE)?,
        game_directory: read_c_string(cur, NAME_SIZE)?,
        map_crc: cur.read_u32::<LittleEndian>()?,
        directory_offset: cur.read_i32::<LittleEndian>()?,
    })
}

fn read_directory_entry(cur: &mut Cursor<&[u8]>) -> Result<DirectoryEntry> {
    let _kind = cur.read_i32::<LittleEndian>()?;
    let name = read_c_string(cur, DESCRIPTION_SIZE)?;
    let _flags = cur.read_i32::<LittleEndian>()?;
    let _cd_track = cur.read_i32::<LittleEndian>()?;
    let track_time = cur.read_f32::<LittleEndian>()?;
    let frame_count = cur.read_i32::<LittleEndian>()?;
    let offset = cur.read_i32::<LittleEndian>()?;
    let _file_length = cur.read_i32::<LittleEndian>()?;
    Ok(DirectoryEntry {
        name,
        track_time,
        frame_count,
        offset,
    })
}

/// Decode the frame stream of one directory. Decoding stops at the first
/// NextSection frame; an unknown frame type or truncated data also stops it,
/// keeping whatever was decoded before.
fn read_frames(bytes: &[u8], entry: &DirectoryEntry) -> Vec<FrameRecord> {
    let mut cur = Cursor::new(bytes);
    let mut frames = Vec::new();
    if seek(&mut cur, entry.offset).is_err() {
        warn!("directory '{}' starts outside the file, skipping it", entry.name);
        return frames;
    }

    loop {
        match read_frame(&mut cur) {
            Ok(frame) => {
                let done = frame.kind == FrameKind::NextSection;
                frames.push(frame);
                if done {
                    break;
                }
            }
            Err(e) => {
                warn!(
                    "stopped reading directory '{}' after {} frames: {}",
                    entry.name,
                    frames.len(),
                    e
                );
                break;
            }
        }
    }
    frames
}

fn read_frame(cur: &mut Cursor<&[u8]>) -> Result<FrameRecord> {
    let kind_byte = cur.read_u8()?;
    let time = cur.read_f32::<LittleEndian>()?;
    let frame = cur.read_i32::<LittleEndian>()?;

    let mut client_data = None;
    let kind = match kind_byte {
        0 | 1 => {
            skip(cur, DEMO_INFO_SIZE + SEQUENCE_INFO_SIZE)?;
            skip_sized(cur)?;
            FrameKind::NetworkMessage
        }
        2 => FrameKind::DemoStart,
        3 => {
            skip(cur, CONSOLE_COMMAND_SIZE)?;
            FrameKind::ConsoleCommand
        }
        4 => {
            client_data = Some(read_client_data(cur)?);
            FrameKind::ClientData
        }
        5 => FrameKind::NextSection,
        6 => {
            skip(cur, EVENT_SIZE)?;
            FrameKind::Event
        }
        7 => {
            skip(cur, WEAPON_ANIM_SIZE)?;
            FrameKind::WeaponAnim
        }
        8 => {
            let _channel = cur.read_i32::<LittleEndian>()?;
            skip_sized(cur)?;
            skip(cur, SOUND_TRAILER_SIZE)?;
            FrameKind::Sound
        }
        9 => {
            skip_sized(cur)?;
            FrameKind::DemoBuffer
        }
        other => return Err(format_error(&format!("unknown frame type {}", other))),
    };

    Ok(FrameRecord {
        kind,
        time,
        frame,
        client_data,
    })
}

fn read_client_data(cur: &mut Cursor<&[u8]>) -> Result<ClientData> {
    let mut v = [0f32; 6];
    cur.read_f32_into::<LittleEndian>(&mut v)?;
    let _weapon_bits = cur.read_i32::<LittleEndian>()?;
    let _fov = cur.read_f32::<LittleEndian>()?;
    Ok(ClientData {
        position: Some(Position::new(v[0] as f64, v[1] as f64, v[2] as f64)),
        rotation: Some(ViewAngles {
            pitch: v[3] as f64,
            yaw: v[4] as f64,
            roll: v[5] as f64,
        }),
    })
}
