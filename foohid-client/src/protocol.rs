//! Driver call ABI for the foohid service
//!
//! The driver exposes four external methods, each a fixed-length array of
//! 64-bit scalar words. Buffer arguments cross the boundary as a
//! (pointer, length) word pair; the referenced memory is borrowed by the
//! driver for the duration of the call only. The encoders here are the one
//! place that lowering happens; everything above them works with byte
//! slices.

use std::fmt;

/// Registered name of the driver's IOService.
pub const SERVICE_NAME: &str = "it_unbit_foohid";

/// External-method selectors
pub mod selector {
    /// Register a new virtual device.
    pub const CREATE: u32 = 0;
    /// Remove a device by name.
    pub const DESTROY: u32 = 1;
    /// Feed one input report to a device.
    pub const SEND: u32 = 2;
    /// Enumerate registered device names.
    pub const LIST: u32 = 3;

    /// Get human-readable name for a selector
    pub fn name(selector: u32) -> &'static str {
        match selector {
            CREATE => "CREATE",
            DESTROY => "DESTROY",
            SEND => "SEND",
            LIST => "LIST",
            _ => "UNKNOWN",
        }
    }
}

/// Input words for CREATE: name ptr/len, descriptor ptr/len, serial ptr/len,
/// vendor id, product id.
pub const CREATE_INPUT_WORDS: usize = 8;
/// Input words for DESTROY: name ptr/len.
pub const DESTROY_INPUT_WORDS: usize = 2;
/// Input words for SEND: name ptr/len, report ptr/len.
pub const SEND_INPUT_WORDS: usize = 4;
/// Input words for LIST: buffer ptr/len.
pub const LIST_INPUT_WORDS: usize = 2;
/// Output words for LIST: status-or-required-size, name count.
pub const LIST_OUTPUT_WORDS: usize = 2;

/// Encode the CREATE request words.
///
/// The pointer words are only meaningful while the borrows live; the call
/// must be issued before they end.
pub fn encode_create(
    name: &[u8],
    descriptor: &[u8],
    serial: &[u8],
    vendor_id: u32,
    product_id: u32,
) -> [u64; CREATE_INPUT_WORDS] {
    [
        name.as_ptr() as u64,
        name.len() as u64,
        descriptor.as_ptr() as u64,
        descriptor.len() as u64,
        serial.as_ptr() as u64,
        serial.len() as u64,
        u64::from(vendor_id),
        u64::from(product_id),
    ]
}

/// Encode the DESTROY request words.
pub fn encode_destroy(name: &[u8]) -> [u64; DESTROY_INPUT_WORDS] {
    [name.as_ptr() as u64, name.len() as u64]
}

/// Encode the SEND request words.
pub fn encode_send(name: &[u8], report: &[u8]) -> [u64; SEND_INPUT_WORDS] {
    [
        name.as_ptr() as u64,
        name.len() as u64,
        report.as_ptr() as u64,
        report.len() as u64,
    ]
}

/// Encode the LIST request words. The driver writes packed names into the
/// buffer through the pointer word.
pub fn encode_list(buf: &mut [u8]) -> [u64; LIST_INPUT_WORDS] {
    [buf.as_mut_ptr() as u64, buf.len() as u64]
}

/// Parse error for LIST response buffers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The buffer ended before name `index` reached its NUL terminator.
    MissingTerminator { index: u64 },
    /// Name `index` is not valid UTF-8.
    InvalidUtf8 { index: u64 },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTerminator { index } => {
                write!(f, "name {} is missing its NUL terminator", index)
            }
            Self::InvalidUtf8 { index } => {
                write!(f, "name {} is not valid UTF-8", index)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse `count` consecutive NUL-terminated UTF-8 names from the start of a
/// LIST response buffer, preserving driver order.
pub fn parse_device_names(buf: &[u8], count: u64) -> Result<Vec<String>, ParseError> {
    let mut names = Vec::new();
    let mut rest = buf;

    for index in 0..count {
        let nul = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or(ParseError::MissingTerminator { index })?;
        let name = std::str::from_utf8(&rest[..nul])
            .map_err(|_| ParseError::InvalidUtf8 { index })?;
        names.push(name.to_owned());
        rest = &rest[nul + 1..];
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_values_match_driver() {
        assert_eq!(selector::CREATE, 0);
        assert_eq!(selector::DESTROY, 1);
        assert_eq!(selector::SEND, 2);
        assert_eq!(selector::LIST, 3);
        assert_eq!(selector::name(selector::SEND), "SEND");
    }

    #[test]
    fn create_words_in_driver_order() {
        let name = b"dev1";
        let descriptor = [0x05u8, 0x01, 0x09, 0x02];
        let serial = b"SN1";

        let words = encode_create(name, &descriptor, serial, 2, 3);
        assert_eq!(words.len(), CREATE_INPUT_WORDS);
        assert_eq!(words[0], name.as_ptr() as u64);
        assert_eq!(words[1], name.len() as u64);
        assert_eq!(words[2], descriptor.as_ptr() as u64);
        assert_eq!(words[3], descriptor.len() as u64);
        assert_eq!(words[4], serial.as_ptr() as u64);
        assert_eq!(words[5], serial.len() as u64);
        assert_eq!(words[6], 2);
        assert_eq!(words[7], 3);
    }

    #[test]
    fn destroy_and_send_words() {
        let name = b"mouse";
        let report = [0u8, 5, 251];

        let words = encode_destroy(name);
        assert_eq!(words, [name.as_ptr() as u64, 5]);

        let words = encode_send(name, &report);
        assert_eq!(
            words,
            [name.as_ptr() as u64, 5, report.as_ptr() as u64, 3]
        );
    }

    #[test]
    fn list_words_cover_whole_buffer() {
        let mut buf = [0u8; 64];
        let ptr = buf.as_mut_ptr() as u64;
        let words = encode_list(&mut buf);
        assert_eq!(words, [ptr, 64]);
    }

    #[test]
    fn parse_packed_names_in_order() {
        let buf = b"alpha\0beta\0gamma\0";
        let names = parse_device_names(buf, 3).unwrap();
        assert_eq!(names, ["alpha", "beta", "gamma"]);
    }

    #[test]
    fn parse_ignores_trailing_slack() {
        // A 4096-byte scratch buffer is mostly slack after the packed names.
        let mut buf = vec![0u8; 64];
        buf[..11].copy_from_slice(b"alpha\0beta\0");
        let names = parse_device_names(&buf, 2).unwrap();
        assert_eq!(names, ["alpha", "beta"]);
    }

    #[test]
    fn parse_empty_list() {
        assert_eq!(parse_device_names(&[], 0).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn parse_rejects_missing_terminator() {
        let err = parse_device_names(b"alpha\0beta", 2).unwrap_err();
        assert_eq!(err, ParseError::MissingTerminator { index: 1 });
    }

    #[test]
    fn parse_rejects_invalid_utf8() {
        let err = parse_device_names(b"\xff\xfe\0", 1).unwrap_err();
        assert_eq!(err, ParseError::InvalidUtf8 { index: 0 });
    }
}
