use std::io::{self, ErrorKind, Read};

use crate::instructions::SIZE_OF_ARM_INSTRUCTION;

/// Pulls big-endian instruction words out of a byte stream.
///
/// A trailing group of 1 to 3 bytes is not a word and ends the stream
/// like a clean end of file does.
#[derive(Debug)]
pub struct WordReader<R> {
    inner: R,
    done: bool,
}

impl<R: Read> WordReader<R> {
    pub const fn new(inner: R) -> Self {
        Self { inner, done: false }
    }

    /// Reads the next word, `Ok(None)` at the end of the stream.
    ///
    /// # Errors
    ///
    /// Any error of the underlying reader other than
    /// [`ErrorKind::Interrupted`].
    pub fn read_word(&mut self) -> io::Result<Option<u32>> {
        if self.done {
            return Ok(None);
        }

        let mut buf = [0_u8; SIZE_OF_ARM_INSTRUCTION];
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }

        if filled < buf.len() {
            self.done = true;
            if filled > 0 {
                tracing::debug!("dropping {filled} trailing byte(s), not a whole word");
            }
            return Ok(None);
        }

        Ok(Some(u32::from_be_bytes(buf)))
    }
}

impl<R: Read> Iterator for WordReader<R> {
    type Item = io::Result<u32>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_word().transpose()
    }
}
