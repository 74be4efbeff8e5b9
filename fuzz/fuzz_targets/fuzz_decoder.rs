#![no_main]

use libfuzzer_sys::fuzz_target;
use vtcore::sixel_decode;

fuzz_target!(|data: &[u8]| {
    // The decoder must never panic, and its output must stay within the
    // image caps no matter the input.
    let image = sixel_decode(data);
    assert!(image.width <= vtcore::decoder::WIDTH_MAX);
    assert!(image.height <= vtcore::decoder::HEIGHT_MAX);
    assert_eq!(image.pixels.len(), image.width * image.height * 4);
});
