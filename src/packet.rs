use thiserror::Error;

use crate::types::SampleRecord;

/// Wire layout: u32 timestamp_ms, u16 session, u16 sequence, 6x f32 channels,
/// u8 flags, 3 padding bytes. Little-endian, 36 bytes total; kept in sync with
/// the logger firmware.
pub const PACKET_SIZE: usize = 36;

const FLAG_CAPTURE_ON: u8 = 0x01;
const FLAG_MARKER_EDGE: u8 = 0x02;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("wrong packet size: expected {expected} bytes, got {actual}")]
    WrongSize { expected: usize, actual: usize },
}

/// Decodes one wire packet into a [`SampleRecord`].
///
/// Rejects any input that is not exactly [`PACKET_SIZE`] bytes; no partial
/// decode is attempted. Flag bits other than capture/marker are ignored.
pub fn decode(data: &[u8]) -> Result<SampleRecord, DecodeError> {
    if data.len() != PACKET_SIZE {
        return Err(DecodeError::WrongSize {
            expected: PACKET_SIZE,
            actual: data.len(),
        });
    }

    let flags = data[32];
    Ok(SampleRecord {
        timestamp_ms: u32::from_le_bytes([data[0], data[1], data[2], data[3]]),
        session: u16::from_le_bytes([data[4], data[5]]),
        sequence: u16::from_le_bytes([data[6], data[7]]),
        ax: read_f32(data, 8),
        ay: read_f32(data, 12),
        az: read_f32(data, 16),
        gx: read_f32(data, 20),
        gy: read_f32(data, 24),
        gz: read_f32(data, 28),
        capture_on: flags & FLAG_CAPTURE_ON != 0,
        marker_edge: flags & FLAG_MARKER_EDGE != 0,
        label: None,
    })
}

/// Encodes a record back to the wire layout. Padding is written as zeros and
/// the flags byte is rebuilt from the two flag booleans; any label annotation
/// is dropped (labels never travel on the wire).
pub fn encode(record: &SampleRecord) -> [u8; PACKET_SIZE] {
    let mut buf = [0u8; PACKET_SIZE];
    buf[0..4].copy_from_slice(&record.timestamp_ms.to_le_bytes());
    buf[4..6].copy_from_slice(&record.session.to_le_bytes());
    buf[6..8].copy_from_slice(&record.sequence.to_le_bytes());
    buf[8..12].copy_from_slice(&record.ax.to_le_bytes());
    buf[12..16].copy_from_slice(&record.ay.to_le_bytes());
    buf[16..20].copy_from_slice(&record.az.to_le_bytes());
    buf[20..24].copy_from_slice(&record.gx.to_le_bytes());
    buf[24..28].copy_from_slice(&record.gy.to_le_bytes());
    buf[28..32].copy_from_slice(&record.gz.to_le_bytes());

    let mut flags = 0u8;
    if record.capture_on {
        flags |= FLAG_CAPTURE_ON;
    }
    if record.marker_edge {
        flags |= FLAG_MARKER_EDGE;
    }
    buf[32] = flags;
    buf
}

fn read_f32(data: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}
