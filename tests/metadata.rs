mod common;

use common::*;
use mp4meta::decoders::BoxPayload;
use mp4meta::parse_bytes;

#[test]
fn minimal_movie_properties() {
    let info = parse_bytes(&minimal_movie()).expect("parse failed");

    assert_eq!(info.duration, Some(2.0));
    assert_eq!(info.width, Some(640));
    assert_eq!(info.height, Some(480));
    assert_eq!(info.resolution, Some(72));
    assert_eq!(info.frame_rate, Some(30.0));
}

#[test]
fn mvhd_duration_in_seconds() {
    let data = container(b"moov", &[mvhd(1000, 5000)]);
    let info = parse_bytes(&data).unwrap();
    assert_eq!(info.duration, Some(5.0));
    assert_eq!(info.width, None);
    assert_eq!(info.frame_rate, None);
}

#[test]
fn decoded_fields_are_exposed() {
    let info = parse_bytes(&minimal_movie()).unwrap();
    let moov = &info.boxes[1];

    match moov.children()[0].payload() {
        Some(BoxPayload::Mvhd(m)) => {
            assert_eq!((m.creation_time, m.modification_time), (1, 2));
            assert_eq!((m.timescale, m.duration), (600, 1200));
            assert_eq!(m.preferred_rate(), 1.0);
            assert_eq!(m.preferred_volume(), 1.0);
        }
        other => panic!("expected mvhd payload, got {:?}", other),
    }

    let mdia = &moov.children()[1].children()[0];
    match mdia.children()[0].payload() {
        Some(BoxPayload::Hdlr(h)) => {
            assert_eq!(h.handler_type, "");
            assert_eq!(h.subtype, "vide");
            assert_eq!(h.name, "Handler");
        }
        other => panic!("expected hdlr payload, got {:?}", other),
    }
    match mdia.children()[1].payload() {
        Some(BoxPayload::Mdhd(m)) => assert_eq!(m.language_code(), "und"),
        other => panic!("expected mdhd payload, got {:?}", other),
    }

    let stbl = &mdia.children()[2].children()[0];
    match stbl.children()[0].payload() {
        Some(BoxPayload::Stsd(s)) => assert_eq!(s.format, "avc1"),
        other => panic!("expected stsd payload, got {:?}", other),
    }
    match stbl.children()[1].payload() {
        Some(BoxPayload::Stsz(s)) => assert_eq!((s.sample_size, s.sample_count), (1024, 60)),
        other => panic!("expected stsz payload, got {:?}", other),
    }
}

#[test]
fn sound_track_is_skipped() {
    let moov = container(b"moov", &[mvhd(600, 1200), track(b"soun", 48000, 96000, 640, 480, 94)]);
    let info = parse_bytes(&moov).unwrap();

    assert_eq!(info.duration, Some(2.0));
    assert_eq!(info.width, None);
    assert_eq!(info.height, None);
    assert_eq!(info.resolution, None);
    assert_eq!(info.frame_rate, None);
}

#[test]
fn track_without_handler_is_skipped() {
    let stbl = container(b"stbl", &[stsd(320, 240, 72), stsz(10)]);
    let mdia = container(b"mdia", &[mdhd(600, 600), container(b"minf", &[stbl])]);
    let moov = container(b"moov", &[container(b"trak", &[mdia])]);
    let info = parse_bytes(&moov).unwrap();
    assert_eq!(info.width, None);
}

#[test]
fn last_video_track_wins() {
    let moov = container(
        b"moov",
        &[
            video_trak(600, 1200, 640, 480, 60),
            track(b"soun", 44100, 88200, 0, 0, 86),
            video_trak(1000, 1000, 1920, 1080, 25),
        ],
    );
    let info = parse_bytes(&moov).unwrap();
    assert_eq!(info.width, Some(1920));
    assert_eq!(info.height, Some(1080));
    assert_eq!(info.frame_rate, Some(25.0));
}

#[test]
fn zero_dimensions_do_not_override() {
    let moov = container(
        b"moov",
        &[video_trak(600, 1200, 640, 480, 60), video_trak(600, 1200, 0, 0, 0)],
    );
    let info = parse_bytes(&moov).unwrap();
    assert_eq!(info.width, Some(640));
    assert_eq!(info.height, Some(480));
    assert_eq!(info.frame_rate, Some(30.0));
}

#[test]
fn zero_timescale_is_not_clamped() {
    let moov = container(b"moov", &[mvhd(0, 1200), video_trak(0, 1200, 640, 480, 60)]);
    let info = parse_bytes(&moov).unwrap();
    assert!(info.duration.is_some_and(f64::is_infinite));
    assert_eq!(info.frame_rate, None);

    let info = parse_bytes(&container(b"moov", &[mvhd(0, 0)])).unwrap();
    assert!(info.duration.is_some_and(f64::is_nan));
}

#[test]
fn missing_sample_count_leaves_frame_rate_unset() {
    let stbl = container(b"stbl", &[stsd(640, 480, 72)]);
    let mdia = container(
        b"mdia",
        &[hdlr(b"vide", "Video"), mdhd(600, 1200), container(b"minf", &[stbl])],
    );
    let info = parse_bytes(&container(b"moov", &[container(b"trak", &[mdia])])).unwrap();
    assert_eq!(info.width, Some(640));
    assert_eq!(info.frame_rate, None);
}

#[test]
fn nested_moov_is_ignored() {
    // only top-level moov boxes are summarized
    let inner = container(b"moov", &[mvhd(1000, 5000)]);
    let outer = container(b"trak", &[inner]);
    let info = parse_bytes(&outer).unwrap();
    assert_eq!(info.duration, None);
}
