//! Incremental UTF-8 decoding for streamed response bodies.
//!
//! The transport delivers the body as arbitrary byte chunks, so a multi-byte
//! character can be split across two reads. The decoder keeps the incomplete
//! tail of each chunk and prepends it to the next one instead of decoding
//! chunks independently.

use tracing::warn;

/// Stateful UTF-8 decoder.
///
/// Feed byte chunks with [`decode`](Utf8Decoder::decode) and call
/// [`finish`](Utf8Decoder::finish) once the stream ends. Invalid byte
/// sequences are replaced with U+FFFD; they never fail the stream.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    /// Trailing bytes of the previous chunk that did not form a complete
    /// character yet (at most 3 bytes).
    pending: Vec<u8>,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a chunk, returning all text that is complete so far.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let mut bytes = std::mem::take(&mut self.pending);
        bytes.extend_from_slice(chunk);

        let mut out = String::with_capacity(bytes.len());
        let mut rest: &[u8] = &bytes;
        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    out.push_str(text);
                    rest = &[];
                    break;
                }
                Err(err) => {
                    let (valid, tail) = rest.split_at(err.valid_up_to());
                    // The prefix up to valid_up_to is guaranteed well-formed,
                    // so the lossy conversion copies it verbatim.
                    out.push_str(&String::from_utf8_lossy(valid));
                    match err.error_len() {
                        Some(bad) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            rest = &tail[bad..];
                        }
                        None => {
                            // Incomplete sequence at the end of the chunk:
                            // carry it into the next decode call.
                            rest = tail;
                            break;
                        }
                    }
                }
            }
        }
        self.pending = rest.to_vec();
        out
    }

    /// Flush the decoder at end-of-stream.
    ///
    /// A leftover partial sequence means the stream was truncated mid
    /// character; it decodes to a single replacement character.
    pub fn finish(&mut self) -> String {
        if self.pending.is_empty() {
            return String::new();
        }
        warn!(bytes = self.pending.len(), "stream ended inside a UTF-8 sequence");
        self.pending.clear();
        char::REPLACEMENT_CHARACTER.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_passes_through() {
        let mut dec = Utf8Decoder::new();
        assert_eq!(dec.decode(b"hello"), "hello");
        assert_eq!(dec.finish(), "");
    }

    #[test]
    fn multibyte_split_across_chunks() {
        // "分" is e5 88 86; split it after the first byte.
        let bytes = "分析".as_bytes();
        let mut dec = Utf8Decoder::new();
        assert_eq!(dec.decode(&bytes[..1]), "");
        assert_eq!(dec.decode(&bytes[1..]), "分析");
        assert_eq!(dec.finish(), "");
    }

    #[test]
    fn every_split_point_of_multibyte_text() {
        let text = "正在检索相关文档…done";
        let bytes = text.as_bytes();
        for split in 0..=bytes.len() {
            let mut dec = Utf8Decoder::new();
            let mut out = dec.decode(&bytes[..split]);
            out.push_str(&dec.decode(&bytes[split..]));
            out.push_str(&dec.finish());
            assert_eq!(out, text, "split at byte {}", split);
        }
    }

    #[test]
    fn four_byte_emoji_split_three_ways() {
        let bytes = "🗂".as_bytes();
        let mut dec = Utf8Decoder::new();
        assert_eq!(dec.decode(&bytes[..2]), "");
        assert_eq!(dec.decode(&bytes[2..3]), "");
        assert_eq!(dec.decode(&bytes[3..]), "🗂");
    }

    #[test]
    fn invalid_byte_replaced_and_stream_continues() {
        let mut dec = Utf8Decoder::new();
        let out = dec.decode(b"ok\xffstill ok");
        assert_eq!(out, "ok\u{FFFD}still ok");
    }

    #[test]
    fn truncated_tail_becomes_replacement_on_finish() {
        let mut dec = Utf8Decoder::new();
        assert_eq!(dec.decode(&"分".as_bytes()[..2]), "");
        assert_eq!(dec.finish(), "\u{FFFD}");
        // Decoder is reusable after finish.
        assert_eq!(dec.decode(b"x"), "x");
    }

    #[test]
    fn empty_chunks_are_harmless() {
        let mut dec = Utf8Decoder::new();
        assert_eq!(dec.decode(b""), "");
        assert_eq!(dec.decode("中".as_bytes()), "中");
        assert_eq!(dec.decode(b""), "");
    }
}
