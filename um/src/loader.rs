use std::io::Read;

use byteorder::{BigEndian, ByteOrder};

use super::constants::WORD_BYTES;
use super::error::Error;
use super::Word;

/// Reads a program image as a sequence of 4-byte, big-endian words.
///
/// The stream length must be a multiple of [`WORD_BYTES`]; a trailing
/// partial word is reported as [`Error::MalformedImage`]. The returned
/// words become array 0 once handed to [`crate::Engine::new`].
pub fn load_image<R: Read>(mut reader: R) -> Result<Vec<Word>, Error> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    if bytes.len() % WORD_BYTES != 0 {
        return Err(Error::MalformedImage(bytes.len()));
    }

    let words: Vec<Word> = bytes
        .chunks_exact(WORD_BYTES)
        .map(BigEndian::read_u32)
        .collect();

    tracing::debug!(word_count = words.len(), "loaded program image");

    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_big_endian_words_in_order() {
        let bytes = [0x00, 0x00, 0x00, 0x01, 0xFF, 0x00, 0x00, 0x02];
        let words = load_image(Cursor::new(bytes)).unwrap();
        assert_eq!(words, vec![0x0000_0001, 0xFF00_0002]);
    }

    #[test]
    fn empty_stream_loads_empty_image() {
        let words = load_image(Cursor::new([])).unwrap();
        assert!(words.is_empty());
    }

    #[test]
    fn trailing_partial_word_is_malformed() {
        let bytes = [0x00, 0x00, 0x00, 0x01, 0x02];
        let err = load_image(Cursor::new(bytes)).unwrap_err();
        match err {
            Error::MalformedImage(len) => assert_eq!(len, 5),
            _ => panic!("expected MalformedImage"),
        }
    }
}
