/// Big-endian unsigned integer of any width.
///
/// Inputs wider than eight bytes keep only their low 64 bits.
pub fn decode_uint(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64)
}

/// Latin-1 string with every zero byte dropped, wherever it appears.
pub fn decode_ascii_skip_nulls(bytes: &[u8]) -> String {
    bytes.iter().filter(|&&b| b != 0).map(|&b| b as char).collect()
}

/// Unpacks the ISO-639-2/T code stored in `mdhd` (three 5-bit letters).
pub fn language_code(code: u16) -> String {
    if code == 0 {
        return "und".to_string();
    }
    [(code >> 10) & 0x1F, (code >> 5) & 0x1F, code & 0x1F]
        .iter()
        .map(|&c| (c as u8 + 0x60) as char)
        .collect()
}
