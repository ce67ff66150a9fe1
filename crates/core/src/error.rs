//! Error types for the OSI simulator.
//!
//! Decapsulation is the only step that can fail in the layer chain. Packet
//! inspection (JSON rendering/parsing) has its own variant so that a bad
//! input file is never reported as a layer mismatch.

use thiserror::Error;

/// Top-level error type for all operations in the system.
#[derive(Debug, Error)]
pub enum Error {
    /// A layer was asked to unwrap a packet that it did not wrap.
    ///
    /// `actual` is `None` when the packet carries no layer number at all
    /// (an unwrapped raw payload).
    #[error("layer mismatch: expected layer {expected}, got {}", describe_layer(.actual))]
    LayerMismatch { expected: u8, actual: Option<u8> },

    /// Packet could not be rendered to or parsed from JSON
    #[error("packet JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn describe_layer(layer: &Option<u8>) -> String {
    match layer {
        Some(number) => format!("layer {number}"),
        None => "an unlayered payload".to_string(),
    }
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;
