//! Text and hex conversions used to build transmit payloads.

use tracing::warn;

/// Decode a string of hexadecimal digit pairs into raw bytes.
///
/// Whitespace between digits is ignored, so `"48656C"` and `"48 65 6C"` decode
/// the same way. A pair that is not valid hex is skipped and an unpaired
/// trailing digit is dropped; both are logged rather than returned as errors.
pub fn hex_to_bytes(text: &str) -> Vec<u8> {
    let digits: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
    let mut bytes = Vec::with_capacity(digits.len() / 2);

    for (idx, pair) in digits.chunks(2).enumerate() {
        let [hi, lo] = pair else {
            let digit = pair[0];
            warn!(%digit, "dropping unpaired trailing hex digit");
            continue;
        };
        match (hi.to_digit(16), lo.to_digit(16)) {
            (Some(hi), Some(lo)) => bytes.push(((hi << 4) | lo) as u8),
            _ => warn!(pair = idx, "skipping invalid hex pair '{hi}{lo}'"),
        }
    }

    bytes
}

/// Replace two-character escape tokens (`\n`, `\r`, `\t`, ...) with the
/// characters they stand for.
///
/// Unrecognized tokens and a trailing lone backslash are kept verbatim.
pub fn resolve_escape_sequences(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(next) => match escape_char(next) {
                Some(resolved) => out.push(resolved),
                None => {
                    out.push('\\');
                    out.push(next);
                }
            },
            None => out.push('\\'),
        }
    }

    out
}

fn escape_char(c: char) -> Option<char> {
    let resolved = match c {
        'a' => '\x07',
        'b' => '\x08',
        'f' => '\x0C',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'v' => '\x0B',
        '0' => '\0',
        '\\' => '\\',
        '"' => '"',
        '\'' => '\'',
        _ => return None,
    };
    Some(resolved)
}

/// Format bytes as an upper-case, space-separated hex dump: `"0D 0A"`.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_decodes_pairs() {
        assert_eq!(hex_to_bytes("48656C6C6F"), b"Hello");
        assert_eq!(hex_to_bytes("00ff7F"), vec![0x00, 0xFF, 0x7F]);
    }

    #[test]
    fn hex_ignores_whitespace() {
        assert_eq!(hex_to_bytes(" 48 65\t6C\n6C 6F "), b"Hello");
    }

    #[test]
    fn hex_skips_invalid_pairs() {
        assert_eq!(hex_to_bytes("41ZZ42"), vec![0x41, 0x42]);
    }

    #[test]
    fn hex_drops_unpaired_digit() {
        assert_eq!(hex_to_bytes("414"), vec![0x41]);
    }

    #[test]
    fn hex_empty_is_empty() {
        assert!(hex_to_bytes("").is_empty());
        assert!(hex_to_bytes("   ").is_empty());
    }

    #[test]
    fn escapes_resolve_control_characters() {
        assert_eq!(resolve_escape_sequences(r"a\r\nb"), "a\r\nb");
        assert_eq!(resolve_escape_sequences(r"\t\v\f\a\b\0"), "\t\x0B\x0C\x07\x08\0");
        assert_eq!(resolve_escape_sequences(r#"\"q\'"#), "\"q'");
    }

    #[test]
    fn escaped_backslash_is_not_rescanned() {
        assert_eq!(resolve_escape_sequences(r"\\n"), "\\n");
    }

    #[test]
    fn unknown_escapes_pass_through() {
        assert_eq!(resolve_escape_sequences(r"\q\x41"), r"\q\x41");
        assert_eq!(resolve_escape_sequences("end\\"), "end\\");
    }

    #[test]
    fn escapes_keep_non_ascii_text() {
        assert_eq!(resolve_escape_sequences(r"µ°C\n"), "µ°C\n");
    }

    #[test]
    fn hex_dump_is_spaced_upper_case() {
        assert_eq!(bytes_to_hex(&[0x0d, 0x0a, 0xff]), "0D 0A FF");
        assert_eq!(bytes_to_hex(&[]), "");
    }
}
