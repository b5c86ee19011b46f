use crate::boxes::FourCC;

/// The box types this crate descends into or decodes.
///
/// Anything else becomes `KnownBox::Unknown(fourcc)` and is kept header-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownBox {
    // containers
    Moov,
    Trak,
    Mdia,
    Minf,
    Dinf,
    Stbl,

    // decoded leaves
    Mvhd,
    Hdlr,
    Mdhd,
    Stsd,
    Stsz,

    Unknown(FourCC),
}

impl From<FourCC> for KnownBox {
    fn from(cc: FourCC) -> Self {
        match &cc.0 {
            b"moov" => KnownBox::Moov,
            b"trak" => KnownBox::Trak,
            b"mdia" => KnownBox::Mdia,
            b"minf" => KnownBox::Minf,
            b"dinf" => KnownBox::Dinf,
            b"stbl" => KnownBox::Stbl,

            b"mvhd" => KnownBox::Mvhd,
            b"hdlr" => KnownBox::Hdlr,
            b"mdhd" => KnownBox::Mdhd,
            b"stsd" => KnownBox::Stsd,
            b"stsz" => KnownBox::Stsz,

            _ => KnownBox::Unknown(cc),
        }
    }
}

impl KnownBox {
    /// Does this box *contain* child boxes?
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            KnownBox::Moov
                | KnownBox::Trak
                | KnownBox::Mdia
                | KnownBox::Minf
                | KnownBox::Dinf
                | KnownBox::Stbl
        )
    }

    /// Is there a body decoder for this box?
    pub fn has_decoder(&self) -> bool {
        matches!(
            self,
            KnownBox::Mvhd | KnownBox::Hdlr | KnownBox::Mdhd | KnownBox::Stsd | KnownBox::Stsz
        )
    }

    pub fn full_name(&self) -> &'static str {
        match self {
            KnownBox::Moov => "Movie Box",
            KnownBox::Trak => "Track Box",
            KnownBox::Mdia => "Media Box",
            KnownBox::Minf => "Media Information Box",
            KnownBox::Dinf => "Data Information Box",
            KnownBox::Stbl => "Sample Table Box",
            KnownBox::Mvhd => "Movie Header Box",
            KnownBox::Hdlr => "Handler Reference Box",
            KnownBox::Mdhd => "Media Header Box",
            KnownBox::Stsd => "Sample Description Box",
            KnownBox::Stsz => "Sample Size Box",
            KnownBox::Unknown(_) => "Unknown Box",
        }
    }
}
