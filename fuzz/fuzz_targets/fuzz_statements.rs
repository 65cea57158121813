//! Fuzz target for CLI statement handling.
//!
//! Arbitrary statements are split into words, joined back and loaded into an
//! in-memory device.

#![no_main]

use arbitrary::Arbitrary;
use junos_resources::codec::{join_words, next_word, split_words};
use junos_resources::session::MemoryDevice;
use libfuzzer_sys::fuzz_target;

/// Arbitrary statement input
#[derive(Debug, Arbitrary)]
struct FuzzStatements {
    words: Vec<String>,
    raw: String,
}

fuzz_target!(|input: FuzzStatements| {
    let joined = join_words(&input.words);
    assert_eq!(split_words(&joined), input.words);

    let _ = next_word(&input.raw);
    let device = MemoryDevice::from_set_text("fuzz", &input.raw);
    let _ = device.running_config();
});
