/// Number of bytes the symbol starting with `first_byte` occupies.
///
/// Classifies by the leading-bit pattern. Bytes that cannot start a
/// symbol (continuation bytes, `0xF8..=0xFF`) count as a single byte so a
/// walk over malformed input always makes progress.
pub const fn symbol_byte_length(first_byte: u8) -> usize {
    if first_byte & 0x80 == 0x00 {
        1
    } else if first_byte & 0xE0 == 0xC0 {
        2
    } else if first_byte & 0xF0 == 0xE0 {
        3
    } else if first_byte & 0xF8 == 0xF0 {
        4
    } else {
        1
    }
}
