//! The save slot: a single plain-text file holding where the player left off.
//!
//! The format is line-oriented and prefix-tagged, one field per line:
//!
//! ```text
//! map: town
//! music: 1
//! xpos: 4
//! ypos: 5
//! ```
//!
//! Coordinates are grid cells. Field order does not matter, unrecognized
//! lines are skipped, and a record is only ever applied whole: reading
//! validates every field before the caller sees it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bevy_ecs::resource::Resource;
use glam::IVec2;
use tracing::debug;

use crate::constants::{GRID_CELL_SIZE, SAVE_DIR, SAVE_FILE, TRACK_COUNT};
use crate::error::SaveError;
use crate::map::MapId;

/// Where the single save slot lives on disk.
#[derive(Resource, Debug, Clone)]
pub struct SaveSlot {
    pub path: PathBuf,
}

impl Default for SaveSlot {
    fn default() -> Self {
        Self {
            path: Path::new(SAVE_DIR).join(SAVE_FILE),
        }
    }
}

/// Everything a save file stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveRecord {
    pub map: MapId,
    pub music: i32,
    pub xpos: i32,
    pub ypos: i32,
}

impl SaveRecord {
    /// The stored player cell.
    pub fn cell(&self) -> IVec2 {
        IVec2::new(self.xpos, self.ypos)
    }

    fn serialize(&self) -> String {
        format!(
            "map: {}\nmusic: {}\nxpos: {}\nypos: {}\n",
            self.map, self.music, self.xpos, self.ypos
        )
    }

    /// Range checks everything the line format cannot express structurally.
    fn validate(&self) -> Result<(), SaveError> {
        if self.xpos < 0 || self.xpos >= GRID_CELL_SIZE.x as i32 {
            return Err(SaveError::OutOfRange {
                key: "xpos",
                value: self.xpos,
            });
        }
        if self.ypos < 0 || self.ypos >= GRID_CELL_SIZE.y as i32 {
            return Err(SaveError::OutOfRange {
                key: "ypos",
                value: self.ypos,
            });
        }
        // Zero is silence; anything past the shipped tracks (or negative,
        // which would alias the shutdown sentinel) is rejected.
        if self.music < 0 || self.music > TRACK_COUNT {
            return Err(SaveError::OutOfRange {
                key: "music",
                value: self.music,
            });
        }
        Ok(())
    }
}

/// Writes a record to the slot, creating the save directory on first use.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn write_record(path: &Path, record: &SaveRecord) -> Result<(), SaveError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, record.serialize())?;
    Ok(())
}

/// Reads and fully validates the slot.
///
/// # Errors
///
/// Returns [`SaveError::Missing`] if no save exists yet, or a malformed /
/// missing-field / out-of-range error describing the first defect found.
/// Callers never see a partially valid record.
pub fn read_record(path: &Path) -> Result<SaveRecord, SaveError> {
    let contents = fs::read_to_string(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            SaveError::Missing(path.to_path_buf())
        } else {
            SaveError::Io(e)
        }
    })?;
    parse_record(&contents)
}

fn parse_record(contents: &str) -> Result<SaveRecord, SaveError> {
    let mut map = None;
    let mut music = None;
    let mut xpos = None;
    let mut ypos = None;

    for line in contents.lines() {
        if let Some(value) = line.strip_prefix("map:") {
            map = Some(parse_map(value)?);
        } else if let Some(value) = line.strip_prefix("music:") {
            music = Some(parse_int("music", value)?);
        } else if let Some(value) = line.strip_prefix("xpos:") {
            xpos = Some(parse_int("xpos", value)?);
        } else if let Some(value) = line.strip_prefix("ypos:") {
            ypos = Some(parse_int("ypos", value)?);
        } else if !line.trim().is_empty() {
            debug!(line, "Ignoring unrecognized save line");
        }
    }

    let record = SaveRecord {
        map: map.ok_or(SaveError::MissingField("map"))?,
        music: music.ok_or(SaveError::MissingField("music"))?,
        xpos: xpos.ok_or(SaveError::MissingField("xpos"))?,
        ypos: ypos.ok_or(SaveError::MissingField("ypos"))?,
    };
    record.validate()?;
    Ok(record)
}

fn parse_map(value: &str) -> Result<MapId, SaveError> {
    let value = value.trim();
    value.parse::<MapId>().map_err(|_| SaveError::Malformed {
        key: "map",
        value: value.to_string(),
    })
}

fn parse_int(key: &'static str, value: &str) -> Result<i32, SaveError> {
    let value = value.trim();
    value.parse::<i32>().map_err(|_| SaveError::Malformed {
        key,
        value: value.to_string(),
    })
}
