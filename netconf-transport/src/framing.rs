//! NETCONF message framing (RFC 6242)
//!
//! Two framing mechanisms exist on a NETCONF session:
//! - end-of-message framing (`]]>]]>` delimiter), used by base:1.0 peers
//! - chunked framing (`\n#<size>\n<data>...\n##\n`), used once both peers
//!   advertise base:1.1

use std::io::{BufRead, ErrorKind, Read, Write};

use serde::{Deserialize, Serialize};

use crate::error::TransportError;

/// Delimiter terminating every message under end-of-message framing
pub const END_OF_MESSAGE: &[u8] = b"]]>]]>";

/// Largest chunk size allowed by RFC 6242
pub const MAX_CHUNK_SIZE: u64 = 4_294_967_295;

/// Framing mechanism used on a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Framing {
    /// `]]>]]>`-delimited messages (base:1.0)
    #[default]
    EndOfMessage,
    /// Length-prefixed chunks (base:1.1)
    Chunked,
}

/// Write a single framed message and flush the writer
pub fn write_message<W: Write>(
    writer: &mut W,
    framing: Framing,
    payload: &[u8],
) -> Result<(), TransportError> {
    match framing {
        Framing::EndOfMessage => {
            writer.write_all(payload)?;
            writer.write_all(END_OF_MESSAGE)?;
        }
        Framing::Chunked => {
            // An empty chunk is not representable, so an empty payload is just the terminator
            if !payload.is_empty() {
                write!(writer, "\n#{}\n", payload.len())?;
                writer.write_all(payload)?;
            }
            writer.write_all(b"\n##\n")?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Read a single framed message, returning its payload without framing bytes
///
/// Fails with `Framing` if the message grows beyond `max_size` bytes.
pub fn read_message<R: BufRead>(
    reader: &mut R,
    framing: Framing,
    max_size: usize,
) -> Result<Vec<u8>, TransportError> {
    match framing {
        Framing::EndOfMessage => read_end_of_message(reader, max_size),
        Framing::Chunked => read_chunked(reader, max_size),
    }
}

fn read_end_of_message<R: BufRead>(
    reader: &mut R,
    max_size: usize,
) -> Result<Vec<u8>, TransportError> {
    let limit = max_size.saturating_add(END_OF_MESSAGE.len());
    let mut message = Vec::new();
    loop {
        let available = match reader.fill_buf() {
            Ok(available) => available,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        if available.is_empty() {
            if message.iter().all(u8::is_ascii_whitespace) {
                return Err(TransportError::SessionClosed);
            }
            return Err(TransportError::Framing(
                "stream ended before end-of-message delimiter".to_string(),
            ));
        }

        // The delimiter ends in '>', so only check after taking up to one
        let (take, at_gt) = match available.iter().position(|&b| b == b'>') {
            Some(index) => (index + 1, true),
            None => (available.len(), false),
        };
        // Never buffer past the limit, even while no '>' has arrived
        if message.len() + take > limit {
            return Err(TransportError::Framing(format!(
                "message exceeds maximum size of {} bytes",
                max_size
            )));
        }
        message.extend_from_slice(&available[..take]);
        reader.consume(take);

        if at_gt && message.ends_with(END_OF_MESSAGE) {
            message.truncate(message.len() - END_OF_MESSAGE.len());
            return Ok(message);
        }
    }
}

fn read_chunked<R: BufRead>(reader: &mut R, max_size: usize) -> Result<Vec<u8>, TransportError> {
    let mut message = Vec::new();
    loop {
        expect_byte(reader, b'\n')?;
        expect_byte(reader, b'#')?;

        let first = read_byte(reader)?;
        if first == b'#' {
            expect_byte(reader, b'\n')?;
            return Ok(message);
        }

        let size = read_chunk_size(reader, first)?;
        if message.len() as u64 + size > max_size as u64 {
            return Err(TransportError::Framing(format!(
                "message exceeds maximum size of {} bytes",
                max_size
            )));
        }

        let start = message.len();
        message.resize(start + size as usize, 0);
        reader.read_exact(&mut message[start..])?;
    }
}

fn read_chunk_size<R: BufRead>(reader: &mut R, first: u8) -> Result<u64, TransportError> {
    // chunk-size = [1-9][0-9]*, no leading zeros
    if !(b'1'..=b'9').contains(&first) {
        return Err(TransportError::Framing(format!(
            "invalid chunk size start byte 0x{:02x}",
            first
        )));
    }

    let mut size = u64::from(first - b'0');
    loop {
        let byte = read_byte(reader)?;
        match byte {
            b'\n' => return Ok(size),
            b'0'..=b'9' => {
                size = size * 10 + u64::from(byte - b'0');
                if size > MAX_CHUNK_SIZE {
                    return Err(TransportError::Framing(
                        "chunk size exceeds 4294967295".to_string(),
                    ));
                }
            }
            other => {
                return Err(TransportError::Framing(format!(
                    "invalid byte 0x{:02x} in chunk size",
                    other
                )))
            }
        }
    }
}

fn read_byte<R: Read>(reader: &mut R) -> Result<u8, TransportError> {
    let mut byte = [0u8; 1];
    reader.read_exact(&mut byte)?;
    Ok(byte[0])
}

fn expect_byte<R: Read>(reader: &mut R, expected: u8) -> Result<(), TransportError> {
    let found = read_byte(reader)?;
    if found != expected {
        return Err(TransportError::Framing(format!(
            "expected byte 0x{:02x}, found 0x{:02x}",
            expected, found
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Cursor;

    #[test]
    fn test_write_end_of_message() {
        let mut out = Vec::new();
        write_message(&mut out, Framing::EndOfMessage, b"<rpc/>").unwrap();
        assert_eq!(out, b"<rpc/>]]>]]>");
    }

    #[test]
    fn test_write_chunked() {
        let mut out = Vec::new();
        write_message(&mut out, Framing::Chunked, b"<rpc/>").unwrap();
        assert_eq!(out, b"\n#6\n<rpc/>\n##\n");
    }

    #[test]
    fn test_read_end_of_message_with_markup_inside() {
        // '>' characters inside the document must not confuse the delimiter search
        let mut input = Cursor::new(b"<a><b>x</b></a>]]>]]><next/>]]>]]>".to_vec());
        let first = read_message(&mut input, Framing::EndOfMessage, 1024).unwrap();
        assert_eq!(first, b"<a><b>x</b></a>");
        let second = read_message(&mut input, Framing::EndOfMessage, 1024).unwrap();
        assert_eq!(second, b"<next/>");
    }

    #[test]
    fn test_read_end_of_message_closed_stream() {
        let mut input = Cursor::new(b"\n".to_vec());
        let result = read_message(&mut input, Framing::EndOfMessage, 1024);
        assert!(matches!(result, Err(TransportError::SessionClosed)));
    }

    #[test]
    fn test_read_end_of_message_truncated() {
        let mut input = Cursor::new(b"<rpc-reply>".to_vec());
        let result = read_message(&mut input, Framing::EndOfMessage, 1024);
        assert!(matches!(result, Err(TransportError::Framing(_))));
    }

    #[test]
    fn test_read_end_of_message_too_large() {
        let mut input = Cursor::new(b"<aaaaaaaaaaaaaaaaaaaaaaaaaa>]]>]]>".to_vec());
        let result = read_message(&mut input, Framing::EndOfMessage, 8);
        assert!(matches!(result, Err(TransportError::Framing(_))));
    }

    #[test]
    fn test_read_end_of_message_stops_at_limit_without_delimiter() {
        let mut input = Cursor::new(vec![b'a'; 1_000_000]);
        let result = read_message(&mut input, Framing::EndOfMessage, 16);
        assert!(matches!(result, Err(TransportError::Framing(_))));
        assert!(input.position() <= 16 + END_OF_MESSAGE.len() as u64);
    }

    #[test]
    fn test_read_end_of_message_small_buffer_reads() {
        let inner = Cursor::new(b"<rpc-reply><ok/></rpc-reply>]]>]]>aaaaaaaaaaaaaaaaaaaaaaaa".to_vec());
        let mut input = std::io::BufReader::with_capacity(4, inner);

        let message = read_message(&mut input, Framing::EndOfMessage, 64).unwrap();
        assert_eq!(message, b"<rpc-reply><ok/></rpc-reply>");

        let result = read_message(&mut input, Framing::EndOfMessage, 8);
        assert!(matches!(result, Err(TransportError::Framing(_))));
        assert!(input.get_ref().position() <= 34 + 8 + 6 + 4);
    }

    #[test]
    fn test_read_chunked_multiple_chunks() {
        let mut input = Cursor::new(b"\n#4\n<rpc\n#17\n message-id=\"102\"\n#3\n/>\n\n##\n".to_vec());
        let message = read_message(&mut input, Framing::Chunked, 1024).unwrap();
        assert_eq!(message, b"<rpc message-id=\"102\"/>\n");
    }

    #[rstest]
    #[case::leading_zero(b"\n#01\nx\n##\n".as_slice())]
    #[case::missing_hash(b"\n4\n<rpc\n##\n".as_slice())]
    #[case::bad_size_byte(b"\n#4x\n<rpc\n##\n".as_slice())]
    #[case::oversized(b"\n#4294967296\n".as_slice())]
    fn test_read_chunked_rejects_malformed_input(#[case] input: &[u8]) {
        let mut input = Cursor::new(input.to_vec());
        let result = read_message(&mut input, Framing::Chunked, 1024);
        assert!(matches!(result, Err(TransportError::Framing(_))), "{:?}", result);
    }

    #[test]
    fn test_read_chunked_truncated_chunk() {
        let mut input = Cursor::new(b"\n#10\n<rpc".to_vec());
        let result = read_message(&mut input, Framing::Chunked, 1024);
        assert!(matches!(result, Err(TransportError::SessionClosed)));
    }

    #[test]
    fn test_read_chunked_respects_max_size() {
        let mut input = Cursor::new(b"\n#10\n0123456789\n##\n".to_vec());
        let result = read_message(&mut input, Framing::Chunked, 4);
        assert!(matches!(result, Err(TransportError::Framing(_))));
    }

    #[rstest]
    #[case(Framing::EndOfMessage)]
    #[case(Framing::Chunked)]
    fn test_written_message_reads_back(#[case] framing: Framing) {
        let payload = b"<rpc message-id=\"101\"><get/></rpc>";
        let mut out = Vec::new();
        write_message(&mut out, framing, payload).unwrap();
        let mut input = Cursor::new(out);
        assert_eq!(read_message(&mut input, framing, 1024).unwrap(), payload);
    }
}
