use crate::decoders::BoxPayload;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    pub fn from_str(s: &str) -> Option<Self> {
        let b = s.as_bytes();
        if b.len() == 4 {
            Some(FourCC([b[0], b[1], b[2], b[3]]))
        } else { None }
    }
    pub fn as_str_lossy(&self) -> String {
        self.0.iter().map(|&c| if (32..=126).contains(&c) { c as char } else { '.' })
            .collect()
    }
}
impl fmt::Debug for FourCC { fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.as_str_lossy()) } }
impl fmt::Display for FourCC { fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.as_str_lossy()) } }

impl PartialEq<[u8; 4]> for FourCC {
    fn eq(&self, other: &[u8; 4]) -> bool { &self.0 == other }
}

impl Serialize for FourCC {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.as_str_lossy())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxHeader {
    pub start: u64,         // source offset of header start
    pub size: u64,          // total size including header, sentinels already resolved
    pub header_size: u64,   // 8, or 16 for 64-bit sizes
    pub typ: FourCC,
}

impl BoxHeader {
    pub fn payload_start(&self) -> u64 { self.start + self.header_size }
    pub fn end(&self) -> u64 { self.start + self.size }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Container(Vec<Mp4Box>),
    Payload(BoxPayload),
    HeaderOnly,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mp4Box {
    pub header: BoxHeader,
    pub kind: NodeKind,
}

impl Mp4Box {
    pub fn typ(&self) -> FourCC { self.header.typ }

    pub fn size(&self) -> u64 { self.header.size }

    /// Child boxes in source order; empty for anything but a container.
    pub fn children(&self) -> &[Mp4Box] {
        match &self.kind {
            NodeKind::Container(kids) => kids,
            _ => &[],
        }
    }

    pub fn payload(&self) -> Option<&BoxPayload> {
        match &self.kind {
            NodeKind::Payload(p) => Some(p),
            _ => None,
        }
    }

    pub fn children_of<'a>(&'a self, tag: &'a [u8; 4]) -> impl Iterator<Item = &'a Mp4Box> + 'a {
        self.children().iter().filter(move |c| c.header.typ == *tag)
    }
}

// Presentation layers get `{offset, size, header_size, type}` plus either
// `children` or `payload` when the box has one.
impl Serialize for Mp4Box {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut m = s.serialize_map(None)?;
        m.serialize_entry("offset", &self.header.start)?;
        m.serialize_entry("size", &self.header.size)?;
        m.serialize_entry("header_size", &self.header.header_size)?;
        m.serialize_entry("type", &self.header.typ)?;
        match &self.kind {
            NodeKind::Container(kids) => m.serialize_entry("children", kids)?,
            NodeKind::Payload(p) => m.serialize_entry("payload", p)?,
            NodeKind::HeaderOnly => {}
        }
        m.end()
    }
}
