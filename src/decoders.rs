use crate::boxes::BoxHeader;
use crate::error::{ParseError, Result};
use crate::known_boxes::KnownBox;
use crate::util::{decode_ascii_skip_nulls, language_code};
use byteorder::{BigEndian, ByteOrder};
use serde::Serialize;

/// Decoded fields of a recognized leaf box.
///
/// Offsets below are relative to the start of the payload, i.e. the
/// version+flags word sits at `[0, 4)` and is not exposed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BoxPayload {
    /// Movie Header Box (mvhd)
    Mvhd(MvhdData),
    /// Handler Reference Box (hdlr)
    Hdlr(HdlrData),
    /// Media Header Box (mdhd)
    Mdhd(MdhdData),
    /// Sample Description Box (stsd), first entry only
    Stsd(StsdData),
    /// Sample Size Box (stsz)
    Stsz(StszData),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MvhdData {
    pub creation_time: u32,
    pub modification_time: u32,
    pub timescale: u32,
    pub duration: u32,
    pub preferred_rate: u32,   // 16.16 fixed point
    pub preferred_volume: u16, // 8.8 fixed point
}

impl MvhdData {
    pub fn preferred_rate(&self) -> f64 {
        self.preferred_rate as f64 / 65536.0
    }

    pub fn preferred_volume(&self) -> f64 {
        self.preferred_volume as f64 / 256.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HdlrData {
    /// Component type (`mhlr`/`dhlr` in QuickTime files, zero in plain MP4).
    pub handler_type: String,
    /// `vide`, `soun`, ...
    pub subtype: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MdhdData {
    pub creation_time: u32,
    pub modification_time: u32,
    pub timescale: u32,
    pub duration: u32,
    pub language: u16,
}

impl MdhdData {
    pub fn language_code(&self) -> String {
        language_code(self.language)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StsdData {
    pub format: String,
    pub width: u16,
    pub height: u16,
    /// Integer part of the horizontal resolution (dpi).
    pub resolution: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StszData {
    pub sample_size: u32,
    pub sample_count: u32,
}

/// Number of payload bytes a decoder needs, `None` meaning the whole box.
pub fn payload_span(kind: KnownBox) -> Option<u64> {
    match kind {
        KnownBox::Mvhd => Some(26),
        KnownBox::Mdhd => Some(22),
        KnownBox::Stsd => Some(46),
        KnownBox::Stsz => Some(12),
        _ => None,
    }
}

/// Bounded view over a payload. Reads past its end are `OutOfRange`
/// reported in source offsets.
struct Fields<'a> {
    buf: &'a [u8],
    base: u64,
    limit: u64,
}

impl<'a> Fields<'a> {
    fn bytes(&self, start: usize, end: usize) -> Result<&'a [u8]> {
        self.buf.get(start..end).ok_or(ParseError::OutOfRange {
            start: self.base + start as u64,
            end: self.base + end as u64,
            len: self.limit,
        })
    }

    fn u16(&self, at: usize) -> Result<u16> {
        Ok(BigEndian::read_u16(self.bytes(at, at + 2)?))
    }

    fn u32(&self, at: usize) -> Result<u32> {
        Ok(BigEndian::read_u32(self.bytes(at, at + 4)?))
    }

    fn text(&self, start: usize, end: usize) -> Result<String> {
        Ok(decode_ascii_skip_nulls(self.bytes(start, end)?))
    }
}

/// Decodes `payload`, the bytes read from `hdr.payload_start()` onward.
///
/// Returns `None` for box types without a decoder.
pub fn decode_payload(hdr: &BoxHeader, payload: &[u8]) -> Result<Option<BoxPayload>> {
    let f = Fields {
        buf: payload,
        base: hdr.payload_start(),
        limit: hdr.end(),
    };

    let decoded = match KnownBox::from(hdr.typ) {
        KnownBox::Mvhd => BoxPayload::Mvhd(MvhdData {
            creation_time: f.u32(4)?,
            modification_time: f.u32(8)?,
            timescale: f.u32(12)?,
            duration: f.u32(16)?,
            preferred_rate: f.u32(20)?,
            preferred_volume: f.u16(24)?,
        }),
        KnownBox::Hdlr => BoxPayload::Hdlr(HdlrData {
            handler_type: f.text(4, 8)?,
            subtype: f.text(8, 12)?,
            name: f.text(12, payload.len().max(12))?,
        }),
        KnownBox::Mdhd => BoxPayload::Mdhd(MdhdData {
            creation_time: f.u32(4)?,
            modification_time: f.u32(8)?,
            timescale: f.u32(12)?,
            duration: f.u32(16)?,
            language: f.u16(20)?,
        }),
        KnownBox::Stsd => BoxPayload::Stsd(StsdData {
            format: f.text(12, 16)?,
            width: f.u16(40)?,
            height: f.u16(42)?,
            resolution: f.u16(44)?,
        }),
        KnownBox::Stsz => BoxPayload::Stsz(StszData {
            sample_size: f.u32(4)?,
            sample_count: f.u32(8)?,
        }),
        _ => return Ok(None),
    };
    Ok(Some(decoded))
}
