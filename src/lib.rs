pub mod boxes;
pub mod decoders;
pub mod error;
pub mod known_boxes;
pub mod metadata;
pub mod parser;
pub mod source;
pub mod util;

pub use boxes::{BoxHeader, FourCC, Mp4Box, NodeKind};
pub use decoders::BoxPayload;
pub use error::{ParseError, Result};
pub use metadata::{Mp4Info, analyze_file, parse, parse_bytes, parse_reader, summarize};
pub use parser::{parse_boxes, read_box_header};
pub use source::{AsyncSource, ByteSource, ReaderSource};
