#![allow(dead_code)]

// Builders for synthetic MP4 byte streams.

pub fn bx(typ: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut v = Vec::new();
    v.extend_from_slice(&(8 + payload.len() as u32).to_be_bytes());
    v.extend_from_slice(typ);
    v.extend_from_slice(payload);
    v
}

pub fn container(typ: &[u8; 4], children: &[Vec<u8>]) -> Vec<u8> {
    bx(typ, &children.concat())
}

pub fn mvhd(timescale: u32, duration: u32) -> Vec<u8> {
    let mut p = Vec::new();
    p.extend_from_slice(&[0; 4]); // version + flags
    p.extend_from_slice(&1u32.to_be_bytes()); // creation
    p.extend_from_slice(&2u32.to_be_bytes()); // modification
    p.extend_from_slice(&timescale.to_be_bytes());
    p.extend_from_slice(&duration.to_be_bytes());
    p.extend_from_slice(&0x0001_0000u32.to_be_bytes()); // rate 1.0
    p.extend_from_slice(&0x0100u16.to_be_bytes()); // volume 1.0
    p.resize(100, 0); // reserved, matrix, pre_defined, next_track_id
    bx(b"mvhd", &p)
}

pub fn hdlr(subtype: &[u8; 4], name: &str) -> Vec<u8> {
    let mut p = Vec::new();
    p.extend_from_slice(&[0; 4]);
    p.extend_from_slice(&[0; 4]); // pre_defined
    p.extend_from_slice(subtype);
    p.extend_from_slice(&[0; 12]); // reserved
    p.extend_from_slice(name.as_bytes());
    p.push(0);
    bx(b"hdlr", &p)
}

pub fn mdhd(timescale: u32, duration: u32) -> Vec<u8> {
    let mut p = Vec::new();
    p.extend_from_slice(&[0; 4]);
    p.extend_from_slice(&0u32.to_be_bytes());
    p.extend_from_slice(&0u32.to_be_bytes());
    p.extend_from_slice(&timescale.to_be_bytes());
    p.extend_from_slice(&duration.to_be_bytes());
    p.extend_from_slice(&0x55C4u16.to_be_bytes()); // "und"
    p.extend_from_slice(&[0; 2]);
    bx(b"mdhd", &p)
}

pub fn stsd(width: u16, height: u16, resolution: u16) -> Vec<u8> {
    let mut entry = Vec::new();
    entry.extend_from_slice(&86u32.to_be_bytes());
    entry.extend_from_slice(b"avc1");
    entry.extend_from_slice(&[0; 6]); // reserved
    entry.extend_from_slice(&1u16.to_be_bytes()); // data_reference_index
    entry.extend_from_slice(&[0; 16]); // pre_defined + reserved
    entry.extend_from_slice(&width.to_be_bytes());
    entry.extend_from_slice(&height.to_be_bytes());
    entry.extend_from_slice(&((resolution as u32) << 16).to_be_bytes());
    entry.extend_from_slice(&((resolution as u32) << 16).to_be_bytes());
    entry.resize(86, 0); // reserved, frame_count, compressor, depth

    let mut p = Vec::new();
    p.extend_from_slice(&[0; 4]);
    p.extend_from_slice(&1u32.to_be_bytes()); // entry_count
    p.extend_from_slice(&entry);
    bx(b"stsd", &p)
}

pub fn stsz(sample_count: u32) -> Vec<u8> {
    let mut p = Vec::new();
    p.extend_from_slice(&[0; 4]);
    p.extend_from_slice(&1024u32.to_be_bytes()); // constant sample size
    p.extend_from_slice(&sample_count.to_be_bytes());
    bx(b"stsz", &p)
}

pub fn video_trak(timescale: u32, duration: u32, width: u16, height: u16, samples: u32) -> Vec<u8> {
    track(b"vide", timescale, duration, width, height, samples)
}

pub fn track(
    subtype: &[u8; 4],
    timescale: u32,
    duration: u32,
    width: u16,
    height: u16,
    samples: u32,
) -> Vec<u8> {
    let stbl = container(b"stbl", &[stsd(width, height, 72), stsz(samples)]);
    let minf = container(b"minf", &[stbl]);
    let mdia = container(b"mdia", &[hdlr(subtype, "Handler"), mdhd(timescale, duration), minf]);
    container(b"trak", &[mdia])
}

pub fn ftyp() -> Vec<u8> {
    let mut p = Vec::new();
    p.extend_from_slice(b"isom");
    p.extend_from_slice(&512u32.to_be_bytes());
    p.extend_from_slice(b"isom");
    bx(b"ftyp", &p)
}

/// `ftyp` + `moov{mvhd, video trak}` + `mdat`, 640x480 at 30 fps for 2 s.
pub fn minimal_movie() -> Vec<u8> {
    let moov = container(b"moov", &[mvhd(600, 1200), video_trak(600, 1200, 640, 480, 60)]);
    [ftyp(), moov, bx(b"mdat", &[0; 16])].concat()
}
