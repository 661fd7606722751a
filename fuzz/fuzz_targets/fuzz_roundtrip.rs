#![no_main]

use libfuzzer_sys::fuzz_target;
use unlzss::{BitWriter, DecodeConfig, Decoder};

fuzz_target!(|data: &[u8]| {
    // Pack the input as an all-literal stream and decode it back; this must
    // reproduce the input exactly for any byte content.

    if data.is_empty() {
        return;
    }
    let data = if data.len() > 64 * 1024 { &data[..64 * 1024] } else { data };

    let mut stream = BitWriter::with_capacity(data.len() + data.len() / 8 + 1);
    for &byte in data {
        stream.write_bits(0, 1);
        stream.write_bits(u64::from(byte), 8);
    }
    let stream = stream.finish();

    let decoder = Decoder::new(DecodeConfig::default()).expect("default config is valid");
    let mut output = Vec::with_capacity(data.len());
    decoder.decode(&stream[..], &mut output).expect("literal-only streams decode");

    assert_eq!(output, data);
});
