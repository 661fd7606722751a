#![no_main]

use libfuzzer_sys::fuzz_target;
use unlzss::{DecodeConfig, Decoder};

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes fed through a handful of dialects: decoding may fail
    // with a format error, but it must never panic, and the output must
    // never exceed what the stream's code words can expand to.

    let configs = [
        DecodeConfig::default(),
        DecodeConfig { window_size: 8, length_width: 3, ..Default::default() },
        DecodeConfig {
            window_size: 31,
            length_width: 5,
            length_bias: 2,
            flag_width: 2,
            flag_zero_means_literal: false,
            distance_from_end: true,
            ..Default::default()
        },
    ];

    for config in configs {
        let window_size = config.window_size as u64;
        let decoder = Decoder::new(config).expect("fuzz configs are valid");
        let mut output = Vec::new();
        if decoder.decode(data, &mut output).is_ok() {
            // each code word is at least two bits and expands to at most a
            // full window
            let max_expansion = (data.len() as u64 * 8 / 2 + 1) * window_size;
            assert!(output.len() as u64 <= max_expansion);
        }
    }
});
