/// Hex-dump text codec
///
/// A dump is two ruler lines followed by one line per cluster:
///
/// ```text
/// XX:                1               2               3
/// XX:0123456789ABCDEF0123456789ABCDEF0123456789ABCDEF0123456789ABCDEF
/// 00:0020305466C696E7400000000000000000000000000000000000000000000000
/// ```
///
/// Each data line is a two digit label, a colon and 64 hex digits. The digits
/// are shifted by one nibble: the high nibble of the first byte is not stored,
/// and the last digit is filler. Decoding puts the missing `0` nibble back in
/// front and discards the filler; encoding drops the first nibble and writes
/// `0` as filler.

use crate::error::{DecodeError, LineFault};
use crate::format::constants::*;
use crate::format::DumpOptions;
use crate::image::{ByteRow, DiskImage};
use std::fmt::Write;

/// Decode dump text with the default options
pub fn decode(text: &str) -> Result<DiskImage, DecodeError> {
    decode_with(text, &DumpOptions::default())
}

/// Decode dump text
///
/// Input past `max_input_chars` is ignored; a line cut short by the budget is
/// dropped rather than reported. Decoding stops at the first malformed line.
pub fn decode_with(text: &str, options: &DumpOptions) -> Result<DiskImage, DecodeError> {
    let text = apply_budget(text, options.max_input_chars);

    let mut lines = text.lines();
    for line_number in 1..=HEADER_LINES {
        if lines.next().is_none() {
            return Err(DecodeError::malformed(line_number, LineFault::MissingHeader));
        }
    }

    let mut rows = Vec::new();
    for (row_index, line) in lines.enumerate() {
        let line_number = row_index + HEADER_LINES + 1;
        let row = decode_line(line, line_number, row_index, options)?;
        rows.push(row);
    }

    log::debug!("Decoded {} clusters from dump text", rows.len());
    Ok(DiskImage::from_rows(rows))
}

/// Cut text to the character budget, dropping a trailing partial line
fn apply_budget(text: &str, limit: Option<usize>) -> &str {
    let Some(limit) = limit else {
        return text;
    };
    let Some((cut, _)) = text.char_indices().nth(limit) else {
        return text;
    };

    let (kept, rest) = text.split_at(cut);
    log::warn!(
        "Dump input exceeds {} characters; ignoring the remaining {} bytes",
        limit,
        rest.len()
    );

    // Cut between the two halves of a CRLF: the line itself is complete
    if kept.ends_with('\r') && rest.starts_with('\n') {
        return &kept[..kept.len() - 1];
    }
    if kept.ends_with('\n') || rest.starts_with('\n') || rest.starts_with("\r\n") {
        return kept;
    }
    match kept.rfind('\n') {
        Some(pos) => &kept[..=pos],
        None => kept,
    }
}

/// Decode a single data line into a row
fn decode_line(
    line: &str,
    line_number: usize,
    row_index: usize,
    options: &DumpOptions,
) -> Result<ByteRow, DecodeError> {
    let malformed = |fault| DecodeError::malformed(line_number, fault);
    let chars: Vec<char> = line.chars().collect();

    if chars.len() < LINE_WIDTH {
        return Err(malformed(LineFault::TooShort { width: chars.len() }));
    }
    if chars.len() > LINE_WIDTH {
        return Err(malformed(LineFault::TooLong { width: chars.len() }));
    }

    let mut label = 0usize;
    for &c in &chars[..LABEL_WIDTH] {
        let digit = nibble(c).ok_or_else(|| malformed(LineFault::BadLabel))?;
        label = (label << 4) | digit as usize;
    }
    if options.check_labels && label != row_index % 256 {
        return Err(malformed(LineFault::BadLabel));
    }

    if chars[LABEL_WIDTH] != ':' {
        return Err(malformed(LineFault::MissingColon));
    }

    let mut nibbles = [0u8; HEX_FIELD_WIDTH];
    for (column, &c) in chars.iter().enumerate().skip(PREFIX_WIDTH) {
        nibbles[column - PREFIX_WIDTH] =
            nibble(c).ok_or_else(|| malformed(LineFault::BadHexDigit { column }))?;
    }

    // The leading nibble is implicit zero and the last stored nibble is filler,
    // so each byte takes its high nibble from the previous position.
    let mut row: ByteRow = [0; BYTES_PER_CLUSTER];
    for (i, byte) in row.iter_mut().enumerate() {
        let high = if i == 0 { 0 } else { nibbles[2 * i - 1] };
        *byte = (high << 4) | nibbles[2 * i];
    }

    Ok(row)
}

fn nibble(c: char) -> Option<u8> {
    if c.is_ascii() {
        hex_value(c as u8)
    } else {
        None
    }
}

/// Encode an image as canonical dump text
///
/// The two ruler lines always end in a newline; data lines are joined by
/// newlines with none after the last. Labels wrap past cluster `FF`.
pub fn encode(image: &DiskImage) -> String {
    let mut out = String::with_capacity(
        HEADER_INDEX_RULER.len() + HEADER_HEX_RULER.len() + 2 + image.len() * (LINE_WIDTH + 1),
    );
    out.push_str(HEADER_INDEX_RULER);
    out.push('\n');
    out.push_str(HEADER_HEX_RULER);
    out.push('\n');

    for (index, row) in image.rows().iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        encode_row(&mut out, index, row);
    }

    out
}

fn encode_row(out: &mut String, index: usize, row: &ByteRow) {
    let _ = write!(out, "{:02X}:", index % 256);

    let mut hex = String::with_capacity(HEX_FIELD_WIDTH);
    for byte in row {
        let _ = write!(hex, "{:02X}", byte);
    }
    out.push_str(&hex[1..]);
    out.push(FILLER_CHAR);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> String {
        format!("{}\n{}\n", HEADER_INDEX_RULER, HEADER_HEX_RULER)
    }

    fn zero_line(label: &str) -> String {
        format!("{}:{}", label, "0".repeat(HEX_FIELD_WIDTH))
    }

    #[test]
    fn test_decode_header_only() {
        let image = decode(&header()).unwrap();
        assert!(image.is_empty());
    }

    #[test]
    fn test_decode_missing_header() {
        assert_eq!(
            decode(""),
            Err(DecodeError::malformed(1, LineFault::MissingHeader))
        );
        assert_eq!(
            decode(HEADER_INDEX_RULER),
            Err(DecodeError::malformed(2, LineFault::MissingHeader))
        );
    }

    #[test]
    fn test_decode_nibble_shift() {
        // Stored digits "3" then "0001..." map to bytes 03 00 01 ...
        let mut field = String::from("3000146");
        field.push_str(&"0".repeat(HEX_FIELD_WIDTH - field.len()));
        let text = format!("{}00:{}", header(), field);

        let image = decode(&text).unwrap();
        let row = image.rows()[0];
        assert_eq!(row[0], 0x03);
        assert_eq!(row[1], 0x00);
        assert_eq!(row[2], 0x01);
        assert_eq!(row[3], 0x46);
        assert!(row[4..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_decode_ignores_filler_digit() {
        let mut field = "0".repeat(HEX_FIELD_WIDTH - 1);
        field.push('F');
        let text = format!("{}00:{}", header(), field);

        let image = decode(&text).unwrap();
        assert!(image.rows()[0].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_decode_lowercase_digits() {
        let mut field = String::from("4ab");
        field.push_str(&"0".repeat(HEX_FIELD_WIDTH - field.len()));
        let text = format!("{}00:{}", header(), field);

        let image = decode(&text).unwrap();
        assert_eq!(image.rows()[0][..2], [0x04, 0xAB]);
    }

    #[test]
    fn test_decode_short_line() {
        let text = format!(
            "{}{}\n00:{}",
            header(),
            zero_line("00"),
            "0".repeat(HEX_FIELD_WIDTH - 1)
        );
        assert_eq!(
            decode(&text),
            Err(DecodeError::malformed(4, LineFault::TooShort { width: 66 }))
        );
    }

    #[test]
    fn test_decode_long_line() {
        let text = format!("{}{}0", header(), zero_line("00"));
        assert_eq!(
            decode(&text),
            Err(DecodeError::malformed(3, LineFault::TooLong { width: 68 }))
        );
    }

    #[test]
    fn test_decode_bad_label() {
        let text = format!("{}{}", header(), zero_line("G0"));
        assert_eq!(
            decode(&text),
            Err(DecodeError::malformed(3, LineFault::BadLabel))
        );
    }

    #[test]
    fn test_decode_missing_colon() {
        let text = format!("{}00;{}", header(), "0".repeat(HEX_FIELD_WIDTH));
        assert_eq!(
            decode(&text),
            Err(DecodeError::malformed(3, LineFault::MissingColon))
        );
    }

    #[test]
    fn test_decode_bad_digit() {
        let mut field = "0".repeat(HEX_FIELD_WIDTH);
        field.replace_range(10..11, "Z");
        let text = format!("{}00:{}", header(), field);
        assert_eq!(
            decode(&text),
            Err(DecodeError::malformed(3, LineFault::BadHexDigit { column: 13 }))
        );
    }

    #[test]
    fn test_decode_non_ascii() {
        let mut field = "0".repeat(HEX_FIELD_WIDTH - 1);
        field.push('é');
        let text = format!("{}00:{}", header(), field);
        assert_eq!(
            decode(&text),
            Err(DecodeError::malformed(3, LineFault::BadHexDigit { column: 66 }))
        );
    }

    #[test]
    fn test_decode_labels_informational() {
        let text = format!("{}{}\n{}", header(), zero_line("07"), zero_line("07"));
        assert_eq!(decode(&text).unwrap().len(), 2);
    }

    #[test]
    fn test_decode_checked_labels() {
        let text = format!("{}{}\n{}", header(), zero_line("00"), zero_line("07"));
        let opts = DumpOptions::default().check_labels(true);
        assert_eq!(
            decode_with(&text, &opts),
            Err(DecodeError::malformed(4, LineFault::BadLabel))
        );
    }

    #[test]
    fn test_decode_crlf_lines() {
        let text = format!(
            "{}\r\n{}\r\n{}\r\n",
            HEADER_INDEX_RULER,
            HEADER_HEX_RULER,
            zero_line("00")
        );
        assert_eq!(decode(&text).unwrap().len(), 1);
    }

    #[test]
    fn test_budget_drops_partial_line() {
        let text = format!("{}{}\n{}", header(), zero_line("00"), zero_line("01"));
        let limit = header().len() + LINE_WIDTH + 1 + 10;
        let opts = DumpOptions::default().max_input_chars(Some(limit));

        let image = decode_with(&text, &opts).unwrap();
        assert_eq!(image.len(), 1);
    }

    #[test]
    fn test_budget_keeps_line_ending_at_limit() {
        let text = format!("{}{}\n{}", header(), zero_line("00"), zero_line("01"));
        let limit = header().len() + LINE_WIDTH;
        let opts = DumpOptions::default().max_input_chars(Some(limit));

        let image = decode_with(&text, &opts).unwrap();
        assert_eq!(image.len(), 1);
    }

    #[test]
    fn test_budget_splitting_crlf() {
        let text = format!(
            "{}\r\n{}\r\n{}\r\n{}\r\n",
            HEADER_INDEX_RULER,
            HEADER_HEX_RULER,
            zero_line("00"),
            zero_line("01")
        );
        let header_len = HEADER_INDEX_RULER.len() + HEADER_HEX_RULER.len() + 4;
        let limit = header_len + LINE_WIDTH + 1;
        let opts = DumpOptions::default().max_input_chars(Some(limit));

        let image = decode_with(&text, &opts).unwrap();
        assert_eq!(image.len(), 1);
    }

    #[test]
    fn test_default_budget_truncates_large_dump() {
        let rows = vec![[0u8; BYTES_PER_CLUSTER]; 64];
        let text = encode(&DiskImage::from_rows(rows));

        let image = decode(&text).unwrap();
        let budget_rows = (MAX_INPUT_CHARS - header().len()) / (LINE_WIDTH + 1);
        assert_eq!(image.len(), budget_rows);

        let image = decode_with(&text, &DumpOptions::unbounded()).unwrap();
        assert_eq!(image.len(), 64);
    }

    #[test]
    fn test_encode_empty_image() {
        assert_eq!(encode(&DiskImage::default()), header());
    }

    #[test]
    fn test_encode_row() {
        let mut row = [0u8; BYTES_PER_CLUSTER];
        row[0] = 0x01;
        row[1] = 0xAB;
        row[31] = 0x0C;
        let text = encode(&DiskImage::from_rows(vec![row, row]));

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        let expected = format!("00:1AB{}C0", "0".repeat(59));
        assert_eq!(lines[2], expected);
        assert!(lines[3].starts_with("01:"));
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_encode_label_wraps() {
        let rows = vec![[0u8; BYTES_PER_CLUSTER]; 257];
        let text = encode(&DiskImage::from_rows(rows));
        let last = text.lines().last().unwrap();
        assert!(last.starts_with("00:"));
        assert_eq!(last.len(), LINE_WIDTH);
    }
}
