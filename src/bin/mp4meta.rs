use anyhow::Context;
use clap::{ArgAction, Parser};
use mp4meta::known_boxes::KnownBox;
use mp4meta::{AsyncSource, BoxPayload, Mp4Box, Mp4Info, NodeKind};

#[derive(Parser, Debug)]
#[command(version, about = "MP4/MOV duration, dimensions and frame rate")]
struct Args {
    /// MP4/ISOBMFF file path
    path: String,

    /// Emit JSON (properties plus the full box tree) instead of text
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,

    /// Also print the box tree
    #[arg(long, action = ArgAction::SetTrue)]
    tree: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut src = AsyncSource::open(&args.path)
        .await
        .with_context(|| format!("opening {}", args.path))?;
    let info = mp4meta::parse(&mut src)
        .await
        .with_context(|| format!("parsing {}", args.path))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    print_human(&args.path, &info);
    if args.tree {
        println!();
        for b in &info.boxes {
            print_box(b, 0);
        }
    }
    Ok(())
}

fn print_human(path: &str, info: &Mp4Info) {
    println!("File: {}", path);
    if let Some(d) = info.duration {
        println!("Duration: {:.3} s", d);
    }
    match (info.width, info.height) {
        (Some(w), Some(h)) => println!("Size: {}x{}", w, h),
        (Some(w), None) => println!("Width: {}", w),
        (None, Some(h)) => println!("Height: {}", h),
        (None, None) => {}
    }
    if let Some(r) = info.resolution {
        println!("Resolution: {} dpi", r);
    }
    if let Some(fps) = info.frame_rate {
        println!("Frame rate: {:.3} fps", fps);
    }
}

fn print_box(b: &Mp4Box, depth: usize) {
    let indent = "  ".repeat(depth);
    let hdr = &b.header;
    let name = KnownBox::from(hdr.typ).full_name();
    let offset = format!("{:#x}", hdr.start);
    match &b.kind {
        NodeKind::Container(children) => {
            println!("{indent}{:>8} {:>10} {} ({}, container)", offset, hdr.size, hdr.typ, name);
            for c in children {
                print_box(c, depth + 1);
            }
        }
        NodeKind::Payload(p) => {
            println!("{indent}{:>8} {:>10} {} ({})", offset, hdr.size, hdr.typ, name);
            println!("{indent}  -> {}", describe(p));
        }
        NodeKind::HeaderOnly => {
            println!("{indent}{:>8} {:>10} {}", offset, hdr.size, hdr.typ);
        }
    }
}

fn describe(p: &BoxPayload) -> String {
    match p {
        BoxPayload::Mvhd(m) => format!(
            "timescale={} duration={} rate={} volume={}",
            m.timescale,
            m.duration,
            m.preferred_rate(),
            m.preferred_volume()
        ),
        BoxPayload::Hdlr(h) => format!("handler={} name={:?}", h.subtype, h.name),
        BoxPayload::Mdhd(m) => format!(
            "timescale={} duration={} language={}",
            m.timescale,
            m.duration,
            m.language_code()
        ),
        BoxPayload::Stsd(s) => format!(
            "codec={} width={} height={} resolution={}",
            s.format, s.width, s.height, s.resolution
        ),
        BoxPayload::Stsz(s) => {
            format!("sample_size={} sample_count={}", s.sample_size, s.sample_count)
        }
    }
}
