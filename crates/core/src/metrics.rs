//! Metrics collection and reporting for simulation runs.
//!
//! Tracks what crossed the layer chain during a run:
//! - Messages and payload bytes in/out
//! - Headers added on the way down and removed on the way up
//! - Round trips attempted, failed, and aborted by layer mismatches
//!
//! # Design
//!
//! The simulator itself holds no mutable state, so metrics live with the
//! caller and are updated explicitly after each step.
//!
//! # Thread Safety
//!
//! The `Metrics` struct is NOT thread-safe. For multi-threaded use, keep one
//! per thread and `merge` them at the end.

use crate::error::Error;
use crate::layer::Layer;
use crate::simulator::RoundTrip;
use std::time::{Duration, Instant};

/// Counters and timing for one simulation run.
#[derive(Debug, Clone)]
pub struct Metrics {
    // === Timing ===
    /// When the run started
    pub start_time: Instant,

    /// When the run ended (set on completion)
    pub end_time: Option<Instant>,

    // === Sending ===
    /// Messages encapsulated
    pub messages_sent: u64,

    /// Payload bytes handed to `send`
    pub bytes_sent: u64,

    /// Headers added across all layers
    pub headers_added: u64,

    // === Receiving ===
    /// Messages fully decapsulated
    pub messages_received: u64,

    /// Payload bytes recovered by `receive`
    pub bytes_received: u64,

    /// Headers removed across all layers
    pub headers_removed: u64,

    // === Verification ===
    /// Round trips attempted
    pub round_trips: u64,

    /// Round trips whose recovered text differed from the original
    pub round_trip_failures: u64,

    /// Receives aborted by a layer mismatch
    pub layer_mismatches: u64,
}

impl Metrics {
    /// Create new metrics with start time set to now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            messages_sent: 0,
            bytes_sent: 0,
            headers_added: 0,
            messages_received: 0,
            bytes_received: 0,
            headers_removed: 0,
            round_trips: 0,
            round_trip_failures: 0,
            layer_mismatches: 0,
        }
    }

    /// Record a completed `send` that added `layers` envelopes.
    pub fn record_send(&mut self, data: &str, layers: usize) {
        self.messages_sent += 1;
        self.bytes_sent += data.len() as u64;
        self.headers_added += layers as u64;
    }

    /// Record a successful `receive` that unwrapped `layers` envelopes.
    pub fn record_receive(&mut self, data: &str, layers: usize) {
        self.messages_received += 1;
        self.bytes_received += data.len() as u64;
        self.headers_removed += layers as u64;
    }

    /// Record a failed `receive`.
    pub fn record_error(&mut self, error: &Error) {
        if matches!(error, Error::LayerMismatch { .. }) {
            self.layer_mismatches += 1;
        }
    }

    /// Record the outcome of a round trip of `message` (both directions and
    /// the check). The send always happened, even when the receive failed.
    pub fn record_round_trip(&mut self, message: &str, outcome: Result<&RoundTrip, &Error>) {
        self.round_trips += 1;

        match outcome {
            Ok(round_trip) => {
                self.record_send(message, round_trip.layers_traversed);
                self.record_receive(&round_trip.received, round_trip.layers_traversed);

                if !round_trip.is_intact() {
                    self.round_trip_failures += 1;
                }
            }
            Err(error) => {
                self.record_send(message, Layer::ALL.len());
                self.round_trip_failures += 1;
                self.record_error(error);
            }
        }
    }

    /// Fold another run's counters into this one.
    pub fn merge(&mut self, other: &Metrics) {
        self.messages_sent += other.messages_sent;
        self.bytes_sent += other.bytes_sent;
        self.headers_added += other.headers_added;
        self.messages_received += other.messages_received;
        self.bytes_received += other.bytes_received;
        self.headers_removed += other.headers_removed;
        self.round_trips += other.round_trips;
        self.round_trip_failures += other.round_trip_failures;
        self.layer_mismatches += other.layer_mismatches;
    }

    /// Mark the run as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Get total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Fraction of round trips that came back intact.
    ///
    /// Returns 0.0 if no round trips ran.
    pub fn success_rate(&self) -> f64 {
        if self.round_trips == 0 {
            0.0
        } else {
            (self.round_trips - self.round_trip_failures) as f64 / self.round_trips as f64
        }
    }

    /// Whether no round trip failed and no receive was aborted.
    pub fn is_clean(&self) -> bool {
        self.round_trip_failures == 0 && self.layer_mismatches == 0
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n=== Simulation Summary ===");
        println!("Duration: {} us", self.duration().as_micros());
        println!();

        println!("=== Sending ===");
        println!("Messages sent: {}", self.messages_sent);
        println!("Payload bytes: {}", self.bytes_sent);
        println!("Headers added: {}", self.headers_added);
        println!();

        println!("=== Receiving ===");
        println!("Messages received: {}", self.messages_received);
        println!("Payload bytes: {}", self.bytes_received);
        println!("Headers removed: {}", self.headers_removed);
        println!("Layer mismatches: {}", self.layer_mismatches);
        println!();

        println!("=== Verification ===");
        println!("Round trips: {}", self.round_trips);
        println!("Failures: {}", self.round_trip_failures);
        println!("Success rate: {:.1}%", self.success_rate() * 100.0);
        println!();
    }

    /// Print just the final result (pass/fail).
    pub fn print_result(&self) {
        if self.is_clean() {
            println!("✓ Simulation completed successfully");
            println!(
                "  {} messages ({} bytes) through 7 layers and back",
                self.messages_received, self.bytes_received
            );
        } else if self.layer_mismatches > 0 {
            println!("✗ Simulation failed: {} layer mismatches", self.layer_mismatches);
        } else {
            println!("✗ Simulation failed: {} round trips corrupted", self.round_trip_failures);
        }
    }

    /// Export metrics as a simple text format (for parsing/testing).
    pub fn export_text(&self) -> String {
        format!(
            "duration_us={}\n\
             messages_sent={}\n\
             bytes_sent={}\n\
             headers_added={}\n\
             messages_received={}\n\
             bytes_received={}\n\
             headers_removed={}\n\
             round_trips={}\n\
             round_trip_failures={}\n\
             layer_mismatches={}\n\
             success_rate={:.4}\n",
            self.duration().as_micros(),
            self.messages_sent,
            self.bytes_sent,
            self.headers_added,
            self.messages_received,
            self.bytes_received,
            self.headers_removed,
            self.round_trips,
            self.round_trip_failures,
            self.layer_mismatches,
            self.success_rate(),
        )
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
