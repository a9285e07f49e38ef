//! Snapshot persistence for general state.
//!
//! Snapshots use an explicit, versioned binary layout instead of any
//! opaque object serialization, so persisted state stays portable across
//! platforms and future schema changes. All integers are little-endian
//! and fixed-width:
//!
//! - 4 bytes: magic `b"MSTR"`
//! - 1 byte: format version (currently 1)
//! - 4 bytes: name length (u32), then that many UTF-8 name bytes
//! - 8 bytes: gold (i64; signed on the wire, non-negative in memory)
//! - 4 bytes: soldier count (u32)
//! - Per soldier: 1 byte rank code, 4 bytes experience (u32)
//!
//! Decoding is strict: bad magic, an unknown version, truncation,
//! trailing bytes, a non-UTF-8 name, out-of-range gold, an unknown rank
//! code, and a dead soldier are all corrupt. The soldier count is checked
//! against the remaining input before any allocation happens.

use std::fs;
use std::path::Path;

use crate::error::{SnapshotError, SnapshotResult};
use crate::game::{General, Rank, Soldier};

/// Magic bytes for file format identification.
const MAGIC: &[u8; 4] = b"MSTR";

/// Current format version.
const VERSION: u8 = 1;

/// Wire size of one soldier record: rank code plus experience.
const SOLDIER_WIRE_LEN: usize = 1 + 4;

/// Encode a general into the snapshot wire format.
#[must_use]
pub fn encode(general: &General) -> Vec<u8> {
    let name = general.name().as_bytes();
    let mut out =
        Vec::with_capacity(MAGIC.len() + 17 + name.len() + general.army().len() * SOLDIER_WIRE_LEN);

    out.extend_from_slice(MAGIC);
    out.push(VERSION);

    #[allow(clippy::cast_possible_truncation)]
    let name_len = name.len() as u32;
    out.extend_from_slice(&name_len.to_le_bytes());
    out.extend_from_slice(name);

    out.extend_from_slice(&i64::from(general.gold()).to_le_bytes());

    #[allow(clippy::cast_possible_truncation)]
    let count = general.army().len() as u32;
    out.extend_from_slice(&count.to_le_bytes());
    for soldier in general.army() {
        out.push(soldier.rank().code());
        out.extend_from_slice(&soldier.experience().to_le_bytes());
    }

    out
}

/// Decode a general from the snapshot wire format.
///
/// # Errors
///
/// Returns [`SnapshotError::Corrupt`] if the bytes are malformed or
/// truncated in any way. No partial state escapes a failed decode.
pub fn decode(bytes: &[u8]) -> SnapshotResult<General> {
    let mut reader = Reader::new(bytes);

    let magic = reader.take(MAGIC.len())?;
    if magic != MAGIC {
        return Err(corrupt("bad magic"));
    }

    let version = reader.read_u8()?;
    if version != VERSION {
        return Err(corrupt(format!("unsupported version: {version}")));
    }

    let name_len = reader.read_u32()? as usize;
    let name_bytes = reader.take(name_len)?;
    let name = std::str::from_utf8(name_bytes)
        .map_err(|_| corrupt("name is not valid UTF-8"))?
        .to_owned();

    let wire_gold = reader.read_i64()?;
    let gold = u32::try_from(wire_gold)
        .map_err(|_| corrupt(format!("gold {wire_gold} out of range")))?;

    let count = reader.read_u32()? as usize;
    let expected = count
        .checked_mul(SOLDIER_WIRE_LEN)
        .ok_or_else(|| corrupt("soldier count overflow"))?;
    match reader.remaining().cmp(&expected) {
        std::cmp::Ordering::Less => return Err(corrupt("truncated snapshot")),
        std::cmp::Ordering::Greater => return Err(corrupt("trailing bytes")),
        std::cmp::Ordering::Equal => {}
    }

    let mut soldiers = Vec::with_capacity(count);
    for _ in 0..count {
        let code = reader.read_u8()?;
        let rank = Rank::from_code(code).ok_or_else(|| corrupt(format!("unknown rank code: {code}")))?;
        let experience = reader.read_u32()?;
        if experience == 0 {
            return Err(corrupt("dead soldier in snapshot"));
        }
        soldiers.push(Soldier::with_experience(rank, experience));
    }

    Ok(General::from_parts(name, gold, soldiers))
}

/// Save a general's snapshot to a file.
///
/// The file handle is scoped to this call and released on every path.
///
/// # Errors
///
/// Returns [`SnapshotError::Storage`] if writing fails.
pub fn save(general: &General, path: &Path) -> SnapshotResult<()> {
    fs::write(path, encode(general))?;
    Ok(())
}

/// Load a general from a snapshot file.
///
/// A failed load never mutates anything: the general only exists once
/// the whole snapshot has validated.
///
/// # Errors
///
/// Returns [`SnapshotError::Storage`] if reading fails, or
/// [`SnapshotError::Corrupt`] if the contents are malformed.
pub fn load(path: &Path) -> SnapshotResult<General> {
    let bytes = fs::read(path)?;
    decode(&bytes)
}

fn corrupt(reason: impl Into<String>) -> SnapshotError {
    SnapshotError::Corrupt(reason.into())
}

/// Bounds-checked little-endian reader over a byte slice.
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take(&mut self, len: usize) -> SnapshotResult<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .ok_or_else(|| corrupt("length overflow"))?;
        let slice = self
            .bytes
            .get(self.pos..end)
            .ok_or_else(|| corrupt("truncated snapshot"))?;
        self.pos = end;
        Ok(slice)
    }

    fn read_u8(&mut self) -> SnapshotResult<u8> {
        Ok(self.take(1)?[0])
    }

    fn read_u32(&mut self) -> SnapshotResult<u32> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.take(4)?);
        Ok(u32::from_le_bytes(buf))
    }

    fn read_i64(&mut self) -> SnapshotResult<i64> {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(self.take(8)?);
        Ok(i64::from_le_bytes(buf))
    }
}
