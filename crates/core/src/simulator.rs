//! The layer chain: sending, receiving and round-trip verification.
//!
//! Sending folds `encapsulate` over the layers from Application (7) down to
//! Physical (1). Receiving folds `decapsulate` over the same layers in
//! reverse. Every step of the receive fold checks the layer stamp, so a
//! foreign or partially unwrapped packet is rejected at the first layer that
//! does not own it.
//!
//! # Verbose tracing
//!
//! `verbose` only controls whether each step is narrated through `tracing`
//! at info level. It never changes the packet, the result or the control
//! flow.

use crate::error::Result;
use crate::layer::Layer;
use crate::packet::Packet;
use tracing::{debug, info, warn};

/// Static description of one layer, as listed by [`Simulator::describe_layers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerDescriptor {
    pub number: u8,
    pub name: &'static str,
    pub description: &'static str,
}

/// Outcome of sending a message and receiving it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTrip {
    /// Message handed to `send`
    pub sent: String,

    /// Message recovered by `receive`
    pub received: String,

    /// Envelopes around the payload after sending
    pub layers_traversed: usize,
}

impl RoundTrip {
    /// Whether the recovered message equals the original exactly.
    pub fn is_intact(&self) -> bool {
        self.sent == self.received
    }
}

/// OSI model simulator owning the fixed chain of seven layers.
///
/// Immutable after construction; a single instance can serve any number of
/// independent sends and receives, including from several threads.
#[derive(Debug, Clone)]
pub struct Simulator {
    layers: [Layer; 7],
}

impl Simulator {
    /// Create a simulator with the layers in sending order (7 down to 1).
    pub fn new() -> Self {
        Self { layers: Layer::ALL }
    }

    /// Layers in sending order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Encapsulate `data` through every layer, Application first.
    ///
    /// Returns the packet as it leaves the Physical layer.
    pub fn send(&self, data: &str, verbose: bool) -> Packet {
        if verbose {
            info!(data, "sending data: encapsulation");
        }

        let packet = self.layers.iter().fold(Packet::raw(data), |payload, layer| {
            let packet = layer.encapsulate(payload);
            if verbose {
                if let Some(envelope) = packet.envelope() {
                    info!(header = ?envelope.header, "{layer}: header added");
                }
            }
            packet
        });

        if verbose {
            match self.layers.last().and_then(|layer| layer.transmit(&packet)) {
                Some(summary) => info!("{summary}"),
                None => warn!("physical layer produced no transmit summary"),
            }
        }

        debug!(depth = packet.depth(), "encapsulation complete");
        packet
    }

    /// Decapsulate `packet` through every layer, Physical first, and return
    /// the original message.
    ///
    /// A raw payload without `data` yields an empty string.
    ///
    /// # Errors
    /// `Error::LayerMismatch` at the first layer whose number differs from the
    /// packet's outermost stamp. The remaining layers are not attempted.
    pub fn receive(&self, packet: Packet, verbose: bool) -> Result<String> {
        if verbose {
            info!("receiving data: decapsulation");
        }

        let mut packet = packet;
        for layer in self.layers.iter().rev() {
            if verbose {
                info!("{layer}: removing header");
            }
            packet = layer.decapsulate(packet)?;
        }

        let data = packet.data().unwrap_or_default().to_string();

        if verbose {
            info!(data = %data, "data received");
        }

        Ok(data)
    }

    /// Send `message` and receive it back, reporting what came out.
    ///
    /// # Errors
    /// Propagates `Error::LayerMismatch` from `receive`.
    pub fn round_trip(&self, message: &str, verbose: bool) -> Result<RoundTrip> {
        let packet = self.send(message, verbose);
        let layers_traversed = packet.depth();
        let received = self.receive(packet, verbose)?;

        let round_trip = RoundTrip {
            sent: message.to_string(),
            received,
            layers_traversed,
        };

        if verbose {
            if round_trip.is_intact() {
                info!("transmission succeeded: data received intact");
            } else {
                warn!("transmission failed: data corrupted");
            }
        }

        Ok(round_trip)
    }

    /// Whether `message` survives a full send/receive cycle unchanged.
    pub fn simulate_round_trip(&self, message: &str) -> bool {
        match self.round_trip(message, false) {
            Ok(round_trip) => round_trip.is_intact(),
            Err(e) => {
                warn!(error = %e, "round trip aborted");
                false
            }
        }
    }

    /// Number, name and description of every layer, in sending order.
    pub fn describe_layers(&self) -> Vec<LayerDescriptor> {
        self.layers
            .iter()
            .map(|layer| LayerDescriptor {
                number: layer.number(),
                name: layer.name(),
                description: layer.description(),
            })
            .collect()
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}
