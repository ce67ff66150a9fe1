//! Sample message generation.
//!
//! When `--samples N` is given we generate extra messages that exercise the
//! round trip with inputs a hand-typed demo rarely covers.
//!
//! # Design
//!
//! Generated messages are a mix of:
//! - Plain ASCII sentences
//! - Unicode text (accents, CJK, emoji)
//! - Strings with embedded control characters
//! - The empty string
//!
//! All randomness comes from a seeded ChaCha8 RNG, so a printed seed
//! reproduces the exact same messages.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const WORDS: &[&str] = &[
    "packet", "frame", "segment", "bits", "header", "payload", "router", "switch", "session",
    "socket", "layer", "network", "hello", "data",
];

const UNICODE_WORDS: &[&str] = &[
    "Olá", "camada", "Transmissão", "données", "Schicht", "网络", "データ", "пакет", "🚀", "✓",
];

const CONTROL_CHARS: &[char] = &['\n', '\t', '\r', '\0', '\u{7f}', '\u{1b}'];

/// Generate `count` sample messages from `seed`.
pub fn generate_messages(seed: u64, count: usize) -> Vec<String> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count).map(|_| generate_message(&mut rng)).collect()
}

fn generate_message(rng: &mut ChaCha8Rng) -> String {
    let kind: u8 = rng.gen_range(0..10);

    match kind {
        // 40% plain sentences
        0..=3 => sentence(rng, WORDS),

        // 30% unicode
        4..=6 => sentence(rng, UNICODE_WORDS),

        // 20% control characters mixed in
        7..=8 => {
            let mut message = sentence(rng, WORDS);
            for _ in 0..rng.gen_range(1..=3) {
                let at = nearest_char_boundary(&message, rng.gen_range(0..=message.len()));
                let c = *CONTROL_CHARS.choose(rng).unwrap_or(&'\n');
                message.insert(at, c);
            }
            message
        }

        // 10% empty
        _ => String::new(),
    }
}

fn sentence(rng: &mut ChaCha8Rng, vocabulary: &[&str]) -> String {
    let len = rng.gen_range(1..=8);
    (0..len)
        .filter_map(|_| vocabulary.choose(rng).copied())
        .collect::<Vec<_>>()
        .join(" ")
}

fn nearest_char_boundary(s: &str, mut index: usize) -> usize {
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use osi_sim_core::Simulator;

    #[test]
    fn test_generate_count() {
        assert_eq!(generate_messages(42, 25).len(), 25);
        assert!(generate_messages(42, 0).is_empty());
    }

    #[test]
    fn test_determinism() {
        let messages1 = generate_messages(12345, 50);
        let messages2 = generate_messages(12345, 50);

        assert_eq!(messages1, messages2);
    }

    #[test]
    fn test_different_seeds() {
        let messages1 = generate_messages(1, 50);
        let messages2 = generate_messages(2, 50);

        assert_ne!(messages1, messages2);
    }

    #[test]
    fn test_mix_of_kinds() {
        let messages = generate_messages(7, 500);

        assert!(messages.iter().any(|m| m.is_empty()));
        assert!(messages.iter().any(|m| !m.is_ascii()));
        assert!(messages.iter().any(|m| m.chars().any(|c| c.is_control())));
    }

    #[test]
    fn test_generated_messages_round_trip() {
        let sim = Simulator::new();
        for message in generate_messages(999, 200) {
            assert!(sim.simulate_round_trip(&message), "failed on {message:?}");
        }
    }

    #[test]
    fn test_char_boundary() {
        let s = "aé";
        assert_eq!(nearest_char_boundary(s, 2), 1);
        assert_eq!(nearest_char_boundary(s, 3), 3);
    }
}
