use std::io::{ErrorKind, Read, Write};

use log::{debug, trace};

use crate::bits::BitBuffer;
use crate::error::{Error, Result};
use crate::lzss::symbol::Symbol;
use crate::lzss::window::SlidingWindow;
use crate::{DecodeConfig, DecodeStats};

/// Bit width of a literal byte
const LITERAL_BITS: u32 = 8;

/// Code-word widths resolved from a configuration, frozen per session
#[derive(Clone, Copy, Debug)]
struct CodeWordWidths {
    flag: u32,
    length: u32,
    distance: u32,
    literal_word: u32,
    reference_word: u32,
    min_word: u32,
    max_word: u32,
}

impl CodeWordWidths {
    fn resolve(config: &DecodeConfig) -> Self {
        let distance = if config.distance_width == 0 {
            ceil_log2(config.window_size)
        } else {
            config.distance_width
        };
        let literal_word = config.flag_width + LITERAL_BITS;
        let reference_word = config.flag_width + config.length_width + distance;
        Self {
            flag: config.flag_width,
            length: config.length_width,
            distance,
            literal_word,
            reference_word,
            min_word: literal_word.min(reference_word),
            max_word: literal_word.max(reference_word),
        }
    }
}

fn ceil_log2(n: usize) -> u32 {
    if n <= 1 {
        0
    } else {
        usize::BITS - (n - 1).leading_zeros()
    }
}

/// Decoder for one LZSS dialect
///
/// Construction validates the configuration and freezes the derived code
/// word widths; `decode` then runs complete sessions against a byte source
/// and sink. The decoder holds no session state, so one instance can decode
/// any number of streams of the same dialect.
pub struct Decoder {
    config: DecodeConfig,
    widths: CodeWordWidths,
}

impl Decoder {
    pub fn new(config: DecodeConfig) -> Result<Self> {
        config.validate()?;
        let widths = CodeWordWidths::resolve(&config);
        if widths.distance > DecodeConfig::MAX_FIELD_WIDTH {
            return Err(Error::FieldWidthTooLarge {
                field: "distance",
                width: widths.distance,
                max: DecodeConfig::MAX_FIELD_WIDTH,
            });
        }
        Ok(Self { config, widths })
    }

    /// Bit width of the distance field after derivation.
    pub fn distance_width(&self) -> u32 {
        self.widths.distance
    }

    /// Decode one stream from `input` to `output`.
    ///
    /// The stream ends when fewer bits than the narrowest code word remain;
    /// trailing bits below that threshold are discarded. Output written
    /// before a failure is not rolled back.
    pub fn decode<R: Read, W: Write>(&self, mut input: R, mut output: W) -> Result<DecodeStats> {
        let widths = self.widths;
        let mut bits = BitBuffer::new();
        let mut chunk = vec![0u8; self.config.chunk_size];
        let mut stats = DecodeStats::default();

        debug!(
            "code word widths: literal {}, reference {} bits",
            widths.literal_word, widths.reference_word
        );

        // The leading code word must be a literal; it seeds the window fill.
        fill_bits(&mut input, &mut bits, widths.literal_word as usize, &mut chunk)?;
        if bits.remaining_bits() < widths.literal_word as usize {
            return Err(Error::UnexpectedEof);
        }
        let flag = bits.take_bits(widths.flag)?;
        if !self.is_literal(flag) {
            return Err(Error::LeadingWordNotLiteral(flag));
        }
        let seed = bits.take_bits(LITERAL_BITS)? as u8;
        trace!("#0 literal {:#04x}", seed);
        let mut window =
            SlidingWindow::new(self.config.window_size, seed, self.config.distance_from_end)?;
        window.insert(seed);
        output.write_all(&[seed])?;
        stats.literal_count += 1;
        stats.output_bytes += 1;

        loop {
            if bits.remaining_bits() < widths.max_word as usize {
                fill_bits(&mut input, &mut bits, widths.max_word as usize, &mut chunk)?;
            }
            if bits.remaining_bits() < widths.min_word as usize {
                debug!("end of stream with {} trailing bits", bits.remaining_bits());
                break;
            }

            let symbol = self.read_symbol(&mut bits)?;
            trace!("#{} {:?}", stats.literal_count + stats.reference_count, symbol);
            match symbol {
                Symbol::Literal(byte) => {
                    window.insert(byte);
                    output.write_all(&[byte])?;
                    stats.literal_count += 1;
                    stats.output_bytes += 1;
                }
                Symbol::Reference { distance, length } => {
                    let bytes = window.read(distance, length)?;
                    window.insert_all(&bytes);
                    output.write_all(&bytes)?;
                    stats.reference_count += 1;
                    stats.output_bytes += bytes.len() as u64;
                }
            }
        }

        stats.input_bytes = bits.bytes_fed();
        Ok(stats)
    }

    /// Decode the next code word. The caller has already checked that at
    /// least `min_word` bits are buffered; a shortage past the flag means
    /// the stream ended inside a code word.
    fn read_symbol(&self, bits: &mut BitBuffer) -> Result<Symbol> {
        let flag = truncated(bits.take_bits(self.widths.flag))?;
        if self.is_literal(flag) {
            let byte = truncated(bits.take_bits(LITERAL_BITS))? as u8;
            Ok(Symbol::Literal(byte))
        } else {
            // distance before length is part of the wire format
            let distance = truncated(bits.take_bits(self.widths.distance))?;
            let raw_length = truncated(bits.take_bits(self.widths.length))?;
            Ok(Symbol::Reference {
                distance,
                length: raw_length + u64::from(self.config.length_bias),
            })
        }
    }

    fn is_literal(&self, flag: u64) -> bool {
        (flag == 0) == self.config.flag_zero_means_literal
    }
}

fn truncated(result: Result<u64>) -> Result<u64> {
    result.map_err(|err| match err {
        Error::InsufficientBits { .. } => Error::TruncatedCodeWord,
        other => other,
    })
}

/// Top up the bit buffer to at least `target_bits`, reading chunks from the
/// source until the target is met or the source is exhausted.
fn fill_bits<R: Read>(
    input: &mut R,
    bits: &mut BitBuffer,
    target_bits: usize,
    chunk: &mut [u8],
) -> Result<()> {
    while bits.remaining_bits() < target_bits {
        let n = match input.read(chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(Error::Io(e)),
        };
        bits.feed(&chunk[..n]);
        debug!("read {} bytes from source ({} total)", n, bits.bytes_fed());
    }
    Ok(())
}
