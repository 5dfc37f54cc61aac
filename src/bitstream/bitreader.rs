//! BitReader: reads a packed bitstream one bit at a time, most significant bit first.
//!
//! NOTE: This module can read from any I/O source that supports the read() call.
//!

use log::error;

const BUFFER_SIZE: usize = 64 * 1024;
const BIT_MASK: u8 = 0xff;

#[derive(Debug)]
pub struct BitReader<R> {
    buffer: Vec<u8>,
    cursor: usize,
    bit_index: usize,
    source: R,
    /// First read error, kept for the caller once bit() has returned None
    error: Option<std::io::Error>,
}

impl<R: std::io::Read> BitReader<R> {
    /// Creates a new BitReader (with a 64k buffer).
    pub fn new(source: R) -> Self {
        Self {
            buffer: vec![0; BUFFER_SIZE],
            cursor: BUFFER_SIZE,
            bit_index: 0,
            source,
            error: None,
        }
    }

    /// Check (and refill) buffer. Returns true if we have data, false if there is no more
    fn have_data(&mut self) -> bool {
        // Only try to read more data when the buffer length is equal to the buffer cursor location
        if self.cursor == self.buffer.len() {
            self.buffer.resize(BUFFER_SIZE, 0);
            let size = loop {
                match self.source.read(&mut self.buffer) {
                    Ok(size) => break size,
                    Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                    Err(e) => {
                        error!("Unable to read source data: {}", e);
                        self.error = Some(e);
                        break 0;
                    }
                }
            };
            // If nothing came back from our read attempt, then we have no more data.
            if size == 0 {
                self.buffer.clear();
                self.cursor = 0;
                return false;
            }
            // Adjust the buffer if we read less than the buffer size
            self.buffer.truncate(size);
            // Reset the cursor and bit index
            self.cursor = 0;
            self.bit_index = 0;
        }
        true
    }

    /// Return bit as Option<usize> (1 or 0), or None if there is no more data to read
    pub fn bit(&mut self) -> Option<usize> {
        // If bit_index is == 0, check if we have a byte to read. Return None if we have no data
        if self.bit_index == 0 && !self.have_data() {
            return None;
        }
        let bit = (self.buffer[self.cursor] & BIT_MASK >> self.bit_index) >> (7 - self.bit_index);
        self.bit_index += 1;
        self.bit_index %= 8;
        if self.bit_index == 0 {
            self.cursor += 1;
        }
        Some(bit as usize)
    }

    /// Return Option<Bool> *true* if the next bit is 1, *false* if 0, consuming the bit,
    /// or None if there is no more data to read
    pub fn bool_bit(&mut self) -> Option<bool> {
        self.bit().map(|bit| bit == 1)
    }

    /// Takes the read error that ended the stream, if the stream did not simply run out.
    pub fn take_error(&mut self) -> Option<std::io::Error> {
        self.error.take()
    }

    /// Debugging function. Report current position in the buffer.
    pub fn loc(&self) -> String {
        format!("[{}.{}]", self.cursor, self.bit_index)
    }
}

#[cfg(test)]
mod test {
    use super::BitReader;
    use std::io::{Error, ErrorKind, Read};

    /// Replays `reads` from the back, one byte per successful read.
    struct Flaky {
        reads: Vec<std::io::Result<u8>>,
    }

    impl Read for Flaky {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            match self.reads.pop() {
                Some(Ok(byte)) => {
                    buf[0] = byte;
                    Ok(1)
                }
                Some(Err(e)) => Err(e),
                None => Ok(0),
            }
        }
    }

    #[test]
    fn basic_test() {
        let x = [0b10000001_u8].as_slice();
        let mut br = BitReader::new(x);
        assert_eq!(br.bit(), Some(1));
        assert_eq!(br.bit(), Some(0));
        assert_eq!(br.bit(), Some(0));
        assert_eq!(br.bit(), Some(0));
        assert_eq!(br.bit(), Some(0));
        assert_eq!(br.bit(), Some(0));
        assert_eq!(br.bit(), Some(0));
        assert_eq!(br.bit(), Some(1));
        assert_eq!(br.bit(), None);
        assert_eq!(br.bit(), None);
    }

    #[test]
    fn loc_test() {
        let x = "Hello, world!".as_bytes();
        let mut br = BitReader::new(x);
        (0..41).for_each(|_| {
            br.bit();
        });
        assert_eq!(br.loc(), "[5.1]");
    }

    #[test]
    fn bool_bit_test() {
        let x = [0b01010000].as_slice();
        let mut br = BitReader::new(x);
        assert_eq!(br.bool_bit(), Some(false));
        assert_eq!(br.bool_bit(), Some(true));
        assert_eq!(br.bool_bit(), Some(false));
        assert_eq!(br.bool_bit(), Some(true));
        assert_eq!(br.bool_bit(), Some(false));
        assert_eq!(br.bool_bit(), Some(false));
        assert_eq!(br.bool_bit(), Some(false));
        assert_eq!(br.bool_bit(), Some(false));
        assert_eq!(br.bool_bit(), None);
    }

    #[test]
    fn crosses_buffer_refill_test() {
        let data = vec![0xff_u8; super::BUFFER_SIZE + 1];
        let mut br = BitReader::new(data.as_slice());
        let ones = std::iter::from_fn(|| br.bit()).count();
        assert_eq!(ones, (super::BUFFER_SIZE + 1) * 8);
    }

    #[test]
    fn read_error_test() {
        let mut br = BitReader::new(Flaky {
            reads: vec![Err(Error::new(ErrorKind::Other, "disk gone")), Ok(0b1000_0000)],
        });
        assert_eq!(br.bit(), Some(1));
        (0..7).for_each(|_| assert_eq!(br.bit(), Some(0)));
        assert_eq!(br.bit(), None);
        assert_eq!(br.take_error().map(|e| e.kind()), Some(ErrorKind::Other));
        assert!(br.take_error().is_none());
    }

    #[test]
    fn interrupted_read_test() {
        let mut br = BitReader::new(Flaky {
            reads: vec![Ok(0b0100_0000), Err(Error::new(ErrorKind::Interrupted, "signal"))],
        });
        assert_eq!(br.bool_bit(), Some(false));
        assert_eq!(br.bool_bit(), Some(true));
        assert!(br.take_error().is_none());
    }

    #[test]
    fn clean_end_has_no_error_test() {
        let mut br = BitReader::new([0xa5_u8].as_slice());
        assert_eq!(std::iter::from_fn(|| br.bit()).count(), 8);
        assert!(br.take_error().is_none());
    }
}
