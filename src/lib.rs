//! Configurable LZSS sliding-window decoding.
//!
//! One decoder covers many LZSS dialects: window size, field widths, flag
//! polarity, length bias and the direction of distance addressing are all
//! parameters of [`DecodeConfig`]. The stream itself carries no framing or
//! metadata; the caller supplies the parameters out of band.
//!
//! ```
//! use unlzss::{DecodeConfig, Decoder};
//!
//! // a literal 'A' followed by a reference that repeats it twice
//! let stream = [0xA0, 0x82];
//! let config = DecodeConfig {
//!     window_size: 8,
//!     length_width: 3,
//!     flag_zero_means_literal: false,
//!     ..Default::default()
//! };
//! let decoder = Decoder::new(config)?;
//! let mut output = Vec::new();
//! decoder.decode(&stream[..], &mut output)?;
//! assert_eq!(output, b"AAA");
//! # Ok::<(), unlzss::Error>(())
//! ```

pub mod bits;
pub mod error;
pub mod lzss;

pub use bits::{BitBuffer, BitWriter};
pub use error::{Error, Result};
pub use lzss::{Decoder, SlidingWindow, Symbol};

/// Configuration for one LZSS dialect
///
/// Immutable once a [`Decoder`] is constructed from it; a zero
/// `distance_width` is resolved to `ceil(log2(window_size))` at that point.
#[derive(Clone, Debug)]
pub struct DecodeConfig {
    /// Sliding window capacity in bytes
    pub window_size: usize,
    /// Bit width of the reference length field
    pub length_width: u32,
    /// Added to every decoded reference length
    pub length_bias: u32,
    /// Bit width of the reference distance field; 0 derives it from the
    /// window size
    pub distance_width: u32,
    /// Bit width of the literal/reference flag
    pub flag_width: u32,
    /// Flag polarity: a zero flag marks a literal when true, a reference
    /// when false
    pub flag_zero_means_literal: bool,
    /// Count distances backward from the newest byte instead of forward
    /// from the oldest
    pub distance_from_end: bool,
    /// Source read granularity in bytes
    pub chunk_size: usize,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            window_size: 256,
            length_width: 8,
            length_bias: 0,
            distance_width: 0,
            flag_width: 1,
            flag_zero_means_literal: true,
            distance_from_end: false,
            chunk_size: 4096,
        }
    }
}

impl DecodeConfig {
    /// Widest accepted bit field; with the 8-bit literal this keeps every
    /// code word comfortably inside u64 arithmetic
    pub const MAX_FIELD_WIDTH: u32 = 32;

    /// Check all construction constraints eagerly.
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(Error::InvalidWindowSize(self.window_size));
        }
        if self.chunk_size == 0 {
            return Err(Error::InvalidChunkSize(self.chunk_size));
        }
        Self::check_width("flag", self.flag_width, 1)?;
        Self::check_width("length", self.length_width, 1)?;
        Self::check_width("distance", self.distance_width, 0)?;
        Ok(())
    }

    fn check_width(field: &'static str, width: u32, min: u32) -> Result<()> {
        if width < min {
            return Err(Error::ZeroFieldWidth { field });
        }
        if width > Self::MAX_FIELD_WIDTH {
            return Err(Error::FieldWidthTooLarge {
                field,
                width,
                max: Self::MAX_FIELD_WIDTH,
            });
        }
        Ok(())
    }
}

/// Statistics from one decoding session
#[derive(Clone, Debug, Default)]
pub struct DecodeStats {
    /// Bytes read from the source, including any unconsumed tail
    pub input_bytes: u64,
    /// Bytes written to the sink
    pub output_bytes: u64,
    /// Literal code words decoded
    pub literal_count: u64,
    /// Reference code words decoded
    pub reference_count: u64,
}
