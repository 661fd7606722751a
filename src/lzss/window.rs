use crate::error::{Error, Result};

/// Ring-buffer dictionary of the most recently emitted bytes
///
/// Every slot is pre-filled at construction, so the storage is always full;
/// `first` is both the insertion cursor and the logical start of the window
/// (the oldest byte). Reads therefore have a defined answer at any position
/// below the capacity, even before that many real bytes were inserted.
#[derive(Debug)]
pub struct SlidingWindow {
    buffer: Box<[u8]>,
    /// Next insertion slot, also the oldest byte
    first: usize,
    /// Real bytes inserted, saturating at the capacity
    inserted: usize,
    /// Count distances backward from the newest byte instead of forward
    /// from the oldest
    from_end: bool,
}

impl SlidingWindow {
    /// Allocate a window of `size` bytes, every slot set to `fill`.
    ///
    /// `size` must be at least 1; a zero capacity has no valid insertion
    /// slot.
    pub fn new(size: usize, fill: u8, distance_from_end: bool) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidWindowSize(size));
        }
        Ok(Self {
            buffer: vec![fill; size].into_boxed_slice(),
            first: 0,
            inserted: 0,
            from_end: distance_from_end,
        })
    }

    /// Window capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Real bytes inserted so far, saturating at the capacity.
    pub fn inserted(&self) -> usize {
        self.inserted
    }

    /// Write one byte at the insertion cursor and advance it.
    pub fn insert(&mut self, byte: u8) {
        self.buffer[self.first] = byte;
        self.first += 1;
        if self.first == self.buffer.len() {
            self.first = 0;
        }
        if self.inserted < self.buffer.len() {
            self.inserted += 1;
        }
    }

    /// Insert each byte in order.
    pub fn insert_all(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.insert(byte);
        }
    }

    /// Materialise `length` bytes starting at `distance` under the active
    /// addressing mode.
    ///
    /// The run advances forward through physical storage, wrapping at the
    /// capacity. Distances at or beyond the capacity reduce modulo the
    /// capacity. The bytes are copied out before the caller re-inserts
    /// them, which is what makes overlapping self-copies reproduce
    /// run-length repetition.
    pub fn read(&self, distance: u64, length: u64) -> Result<Vec<u8>> {
        let size = self.buffer.len();
        if length > size as u64 {
            return Err(Error::ReferenceTooLong { length, capacity: size });
        }
        let length = length as usize;
        let distance = (distance % size as u64) as usize;

        let start = if self.from_end {
            // position 0 is the newest byte
            (self.first + size - 1 - distance) % size
        } else {
            // position 0 is the oldest byte
            (self.first + distance) % size
        };

        let mut out = Vec::with_capacity(length);
        let tail = (size - start).min(length);
        out.extend_from_slice(&self.buffer[start..start + tail]);
        out.extend_from_slice(&self.buffer[..length - tail]);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefill_reads() {
        let window = SlidingWindow::new(4, b'A', false).unwrap();
        assert_eq!(window.read(0, 4).unwrap(), b"AAAA");
        assert_eq!(window.inserted(), 0);
    }

    #[test]
    fn test_front_origin_after_insert() {
        // insert 'B' into an all-'A' window: stream is B,A,A,A
        let mut window = SlidingWindow::new(4, b'A', false).unwrap();
        window.insert(b'B');

        assert_eq!(window.read(0, 3).unwrap(), b"AAA");
        // position 3 is the newest byte; the run wraps to the oldest
        assert_eq!(window.read(3, 2).unwrap(), b"BA");
    }

    #[test]
    fn test_back_origin_after_insert() {
        let mut window = SlidingWindow::new(4, b'A', true).unwrap();
        window.insert(b'B');

        // position 0 is the newest byte
        assert_eq!(window.read(0, 1).unwrap(), b"B");
        assert_eq!(window.read(1, 1).unwrap(), b"A");
        // the run still advances forward through storage
        assert_eq!(window.read(1, 2).unwrap(), b"AB");
    }

    #[test]
    fn test_wrap_around_insertions() {
        // five inserts into a 4-byte window: physical buffer is E,B,C,D
        let mut window = SlidingWindow::new(4, b'A', false).unwrap();
        window.insert_all(b"ABCDE");

        assert_eq!(window.inserted(), 4);
        assert_eq!(window.read(0, 4).unwrap(), b"BCDE");
    }

    #[test]
    fn test_self_overlap_repetition() {
        // reading at the seed of an all-'A' window repeats the seed
        let mut window = SlidingWindow::new(8, b'A', false).unwrap();
        window.insert(b'A');

        let run = window.read(0, 5).unwrap();
        assert_eq!(run, b"AAAAA");
        window.insert_all(&run);
        assert_eq!(window.read(0, 6).unwrap(), b"AAAAAA");
    }

    #[test]
    fn test_window_equals_last_capacity_bytes() {
        // after k >= capacity inserts, the window holds the last
        // capacity bytes in stream order starting at position 0
        let mut window = SlidingWindow::new(8, 0, false).unwrap();
        let stream: Vec<u8> = (0..20u8).collect();
        window.insert_all(&stream);

        assert_eq!(window.read(0, 8).unwrap(), &stream[12..20]);
    }

    #[test]
    fn test_distance_reduces_modulo_capacity() {
        // window size 5 derives a 3-bit distance field, so 5..7 are
        // encodable; they alias 0..2
        let mut window = SlidingWindow::new(5, b'x', false).unwrap();
        window.insert_all(b"abcde");

        assert_eq!(window.read(6, 1).unwrap(), window.read(1, 1).unwrap());
    }

    #[test]
    fn test_oversized_length_rejected() {
        let window = SlidingWindow::new(4, 0, false).unwrap();
        let err = window.read(0, 5).unwrap_err();
        assert!(matches!(err, Error::ReferenceTooLong { length: 5, capacity: 4 }));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = SlidingWindow::new(0, 0, false).unwrap_err();
        assert!(matches!(err, Error::InvalidWindowSize(0)));
    }
}
