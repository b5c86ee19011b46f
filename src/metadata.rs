use crate::boxes::Mp4Box;
use crate::decoders::BoxPayload;
use crate::error::Result;
use crate::parser::parse_boxes;
use crate::source::{AsyncSource, ByteSource, ReaderSource, resolve_ready};
use serde::Serialize;
use std::io::{Read, Seek};
use std::path::Path;

/// Video properties derived from a parsed file, plus the tree they came from.
///
/// Every numeric field is optional: it is only set when the boxes it is
/// derived from exist and carry a non-zero value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Mp4Info {
    /// Movie duration in seconds (`mvhd.duration / mvhd.timescale`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<u16>,
    /// Frames per second of the video track.
    #[serde(rename = "frameRate", skip_serializing_if = "Option::is_none")]
    pub frame_rate: Option<f64>,
    pub boxes: Vec<Mp4Box>,
}

/// Derives [`Mp4Info`] from a complete box tree. No I/O.
///
/// Only top-level `moov` boxes are considered. Tracks whose handler is not
/// `vide` are skipped; when several video tracks exist, each one overwrites
/// the fields it has values for, so the last one wins.
pub fn summarize(boxes: Vec<Mp4Box>) -> Mp4Info {
    let mut info = Mp4Info::default();

    for moov in boxes.iter().filter(|b| b.typ() == *b"moov") {
        for mvhd in moov.children_of(b"mvhd") {
            if let Some(BoxPayload::Mvhd(m)) = mvhd.payload() {
                // zero timescale yields inf/NaN, left as is
                info.duration = Some(m.duration as f64 / m.timescale as f64);
            }
        }

        for trak in moov.children_of(b"trak") {
            for mdia in trak.children_of(b"mdia") {
                apply_media(mdia, &mut info);
            }
        }
    }

    info.boxes = boxes;
    info
}

fn apply_media(mdia: &Mp4Box, info: &mut Mp4Info) {
    let subtype = mdia.children_of(b"hdlr").find_map(|h| match h.payload() {
        Some(BoxPayload::Hdlr(d)) => Some(d.subtype.as_str()),
        _ => None,
    });
    if subtype != Some("vide") {
        return;
    }
    log::debug!("video track media box at {}", mdia.header.start);

    let mut timescale = 0;
    let mut duration = 0;
    for mdhd in mdia.children_of(b"mdhd") {
        if let Some(BoxPayload::Mdhd(m)) = mdhd.payload() {
            timescale = m.timescale;
            duration = m.duration;
        }
    }

    let mut sample_count = 0;
    for stbl in mdia.children_of(b"minf").flat_map(|minf| minf.children_of(b"stbl")) {
        for child in stbl.children() {
            match child.payload() {
                Some(BoxPayload::Stsd(s)) => {
                    if s.width != 0 {
                        info.width = Some(s.width);
                    }
                    if s.height != 0 {
                        info.height = Some(s.height);
                    }
                    if s.resolution != 0 {
                        info.resolution = Some(s.resolution);
                    }
                }
                Some(BoxPayload::Stsz(s)) => sample_count = s.sample_count,
                _ => {}
            }
        }
    }

    if sample_count != 0 && timescale != 0 && duration != 0 {
        info.frame_rate = Some(sample_count as f64 * timescale as f64 / duration as f64);
    }
}

/// Parses every box in `source` and summarizes the result.
///
/// Any error at any depth aborts the parse; no partial tree is returned.
pub async fn parse<S: ByteSource + ?Sized>(source: &mut S) -> Result<Mp4Info> {
    let len = source.len();
    log::debug!("parsing {} bytes", len);
    let boxes = parse_boxes(source, 0, len).await?;
    log::debug!("parsed {} top-level boxes", boxes.len());
    Ok(summarize(boxes))
}

/// Synchronous [`parse`] over an in-memory buffer.
pub fn parse_bytes(data: &[u8]) -> Result<Mp4Info> {
    let mut src = data;
    resolve_ready(parse(&mut src))
}

/// Synchronous [`parse`] over a blocking `Read + Seek` handle.
///
/// ```no_run
/// use std::fs::File;
///
/// let info = mp4meta::parse_reader(File::open("video.mp4")?)?;
/// println!("{:?}x{:?}", info.width, info.height);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn parse_reader<R: Read + Seek>(reader: R) -> Result<Mp4Info> {
    let mut src = ReaderSource::new(reader)?;
    resolve_ready(parse(&mut src))
}

/// Opens `path` asynchronously and parses it.
pub async fn analyze_file(path: impl AsRef<Path>) -> Result<Mp4Info> {
    let mut src = AsyncSource::open(path).await?;
    parse(&mut src).await
}
