use std::io::{self, Read, Write};

use super::error::Error;

/// Byte-granularity I/O as seen by operators 10 (`OUTPUT`) and 11 (`INPUT`).
///
/// End-of-input must be sticky: once a `read_byte` call reports `Ok(None)`,
/// every subsequent call must also report `Ok(None)`. Implementations are
/// expected to track that themselves rather than rely on the underlying
/// stream reporting EOF consistently on repeated reads.
pub trait IoPort {
    /// Reads one byte, or `Ok(None)` at end-of-input.
    fn read_byte(&mut self) -> Result<Option<u8>, Error>;

    /// Writes one byte. A newline must force a flush so interactive
    /// programs make progress; other bytes may be buffered.
    fn write_byte(&mut self, value: u8) -> Result<(), Error>;
}

/// An [`IoPort`] over arbitrary [`Read`]/[`Write`] streams, with sticky
/// end-of-input tracking. Used both by the CLI front-end (over real
/// stdin/stdout) and by tests (over in-memory buffers).
pub struct BufferedIo<R, W> {
    reader: R,
    writer: W,
    eof: bool,
}

impl<R: Read, W: Write> BufferedIo<R, W> {
    pub fn new(reader: R, writer: W) -> BufferedIo<R, W> {
        BufferedIo {
            reader,
            writer,
            eof: false,
        }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: Read, W: Write> IoPort for BufferedIo<R, W> {
    fn read_byte(&mut self) -> Result<Option<u8>, Error> {
        if self.eof {
            return Ok(None);
        }

        let mut byte = [0u8; 1];
        match self.reader.read(&mut byte) {
            Ok(0) => {
                self.eof = true;
                Ok(None)
            }
            Ok(_) => Ok(Some(byte[0])),
            Err(err) => Err(Error::Io(err)),
        }
    }

    fn write_byte(&mut self, value: u8) -> Result<(), Error> {
        self.writer.write_all(&[value]).map_err(Error::Io)?;
        if value == b'\n' {
            self.writer.flush().map_err(Error::Io)?;
        }
        Ok(())
    }
}

/// Convenience constructor wiring [`BufferedIo`] to the process's real
/// standard streams.
pub fn stdio() -> BufferedIo<io::Stdin, io::Stdout> {
    BufferedIo::new(io::stdin(), io::stdout())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn eof_is_sticky() {
        let mut io = BufferedIo::new(Cursor::new(Vec::new()), Vec::new());
        assert_eq!(io.read_byte().unwrap(), None);
        assert_eq!(io.read_byte().unwrap(), None);
    }

    #[test]
    fn reads_bytes_in_order() {
        let mut io = BufferedIo::new(Cursor::new(vec![1, 2, 3]), Vec::new());
        assert_eq!(io.read_byte().unwrap(), Some(1));
        assert_eq!(io.read_byte().unwrap(), Some(2));
        assert_eq!(io.read_byte().unwrap(), Some(3));
        assert_eq!(io.read_byte().unwrap(), None);
    }

    #[test]
    fn writes_are_observed_in_order() {
        let mut io = BufferedIo::new(Cursor::new(Vec::new()), Vec::new());
        io.write_byte(b'H').unwrap();
        io.write_byte(b'i').unwrap();
        io.write_byte(b'\n').unwrap();
        assert_eq!(io.into_writer(), b"Hi\n");
    }
}
