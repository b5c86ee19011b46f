use crate::boxes::{BoxHeader, FourCC, Mp4Box, NodeKind};
use crate::decoders::{decode_payload, payload_span};
use crate::error::{ParseError, Result};
use crate::known_boxes::KnownBox;
use crate::source::ByteSource;
use crate::util::{decode_ascii_skip_nulls, decode_uint};

/// Reads and validates the header of the box starting at `n`, inside a
/// sibling range ending at `end`.
pub async fn read_box_header<S: ByteSource + ?Sized>(
    source: &mut S,
    n: u64,
    end: u64,
) -> Result<BoxHeader> {
    // Up to 16 bytes; boxes near the end of the range may offer fewer.
    let buf = source.read_range(n, end.min(n + 16)).await?;

    if buf.len() < 8 || decode_ascii_skip_nulls(&buf[4..8]).chars().count() != 4 {
        return Err(ParseError::InvalidAtomType { offset: n });
    }
    let typ = FourCC([buf[4], buf[5], buf[6], buf[7]]);

    let remaining = end - n;
    let mut size = decode_uint(&buf[0..4]);
    let mut header_size = 8;

    if size == 0 {
        size = remaining;
    } else if size == 1 {
        header_size = 16;
        if buf.len() < 16 {
            return Err(ParseError::InvalidAtomSize { offset: n, size, header_size, remaining });
        }
        size = decode_uint(&buf[8..16]);
    }

    if size < header_size || size > remaining {
        return Err(ParseError::InvalidAtomSize { offset: n, size, header_size, remaining });
    }

    Ok(BoxHeader { start: n, size, header_size, typ })
}

/// Deepest container nesting accepted below the top level.
pub const MAX_NESTING: usize = 64;

/// Parses the sibling boxes filling `[start, end)`, descending into containers.
pub async fn parse_boxes<S: ByteSource + ?Sized>(
    source: &mut S,
    start: u64,
    end: u64,
) -> Result<Vec<Mp4Box>> {
    parse_level(source, start, end, 0).await
}

async fn parse_level<S: ByteSource + ?Sized>(
    source: &mut S,
    start: u64,
    end: u64,
    depth: usize,
) -> Result<Vec<Mp4Box>> {
    let mut boxes = Vec::new();
    let mut n = start;
    while n < end {
        let hdr = read_box_header(source, n, end).await?;
        let payload_start = hdr.payload_start();
        let box_end = hdr.end();
        n = box_end;

        log::trace!("{} at {} size={} header={}", hdr.typ, hdr.start, hdr.size, hdr.header_size);

        let known = KnownBox::from(hdr.typ);
        let kind = if known.is_container() {
            if depth >= MAX_NESTING {
                return Err(ParseError::NestingTooDeep { offset: hdr.start, limit: MAX_NESTING });
            }
            let children = Box::pin(parse_level(source, payload_start, box_end, depth + 1)).await?;
            NodeKind::Container(children)
        } else if known.has_decoder() {
            let span_end = match payload_span(known) {
                Some(span) => box_end.min(payload_start + span),
                None => box_end,
            };
            let payload = source.read_range(payload_start, span_end).await?;
            match decode_payload(&hdr, &payload)? {
                Some(p) => NodeKind::Payload(p),
                None => NodeKind::HeaderOnly,
            }
        } else {
            NodeKind::HeaderOnly
        };

        boxes.push(Mp4Box { header: hdr, kind });
    }
    Ok(boxes)
}
