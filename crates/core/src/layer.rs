//! The seven OSI layers.
//!
//! Each layer knows its number, its name and the illustrative header it adds
//! when wrapping a payload. None of the header values are negotiated or
//! derived from the payload: they are fixed stand-ins that show what kind of
//! information a real protocol at that layer would carry.
//!
//! # Wrapping and unwrapping
//!
//! - `encapsulate` wraps any packet in a new envelope stamped with the layer
//!   number.
//! - `decapsulate` checks the stamp and returns the inner packet unchanged.
//!   The header is discarded, never parsed back into state.

use crate::error::{Error, Result};
use crate::packet::{Header, Packet};
use std::fmt;

/// Number of characters of the JSON rendering shown by [`Layer::transmit`].
const TRANSMIT_PREVIEW_CHARS: usize = 50;

/// One conceptual OSI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Application,
    Presentation,
    Session,
    Transport,
    Network,
    DataLink,
    Physical,
}

impl Layer {
    /// All layers in sending order, Application (7) down to Physical (1).
    pub const ALL: [Layer; 7] = [
        Layer::Application,
        Layer::Presentation,
        Layer::Session,
        Layer::Transport,
        Layer::Network,
        Layer::DataLink,
        Layer::Physical,
    ];

    /// Layer number, 1 (Physical) to 7 (Application).
    pub const fn number(self) -> u8 {
        match self {
            Layer::Application => 7,
            Layer::Presentation => 6,
            Layer::Session => 5,
            Layer::Transport => 4,
            Layer::Network => 3,
            Layer::DataLink => 2,
            Layer::Physical => 1,
        }
    }

    /// Look a layer up by number.
    pub fn from_number(number: u8) -> Option<Layer> {
        Layer::ALL.into_iter().find(|layer| layer.number() == number)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Layer::Application => "Application",
            Layer::Presentation => "Presentation",
            Layer::Session => "Session",
            Layer::Transport => "Transport",
            Layer::Network => "Network",
            Layer::DataLink => "Data Link",
            Layer::Physical => "Physical",
        }
    }

    /// One-line summary of what the layer is responsible for.
    pub const fn description(self) -> &'static str {
        match self {
            Layer::Application => "Interface to applications and network services",
            Layer::Presentation => "Data formatting, encryption and compression",
            Layer::Session => "Session management between applications",
            Layer::Transport => "Reliable end-to-end data delivery",
            Layer::Network => "Routing and logical addressing",
            Layer::DataLink => "Data transfer between adjacent nodes",
            Layer::Physical => "Bit transmission over the physical medium",
        }
    }

    fn header_fields(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Layer::Application => &[
                ("protocol", "HTTPS"),
                ("method", "GET"),
                ("content_type", "application/json"),
            ],
            Layer::Presentation => &[
                ("encoding", "UTF-8"),
                ("compression", "gzip"),
                ("encryption", "TLS 1.3"),
            ],
            Layer::Session => &[
                ("session_id", "sess_abc123"),
                ("dialog_control", "full-duplex"),
                ("synchronization", "enabled"),
            ],
            Layer::Transport => &[
                ("port_source", "8080"),
                ("port_dest", "443"),
                ("protocol", "TCP"),
                ("seq_number", "12345"),
            ],
            Layer::Network => &[
                ("ip_source", "192.168.1.100"),
                ("ip_dest", "192.168.1.1"),
                ("protocol", "IPv4"),
                ("ttl", "64"),
            ],
            Layer::DataLink => &[
                ("mac_source", "AA:BB:CC:DD:EE:FF"),
                ("mac_dest", "11:22:33:44:55:66"),
                ("frame_type", "Ethernet"),
            ],
            Layer::Physical => &[
                ("type", "bits"),
                ("encoding", "Manchester"),
                ("signal", "Electrical/Optical"),
            ],
        }
    }

    /// Build this layer's header for `payload`.
    ///
    /// The payload is accepted for symmetry with real protocols but never
    /// inspected: the header depends only on the layer.
    pub fn create_header(self, _payload: &Packet) -> Header {
        self.header_fields()
            .iter()
            .map(|(field, value)| (field.to_string(), value.to_string()))
            .collect()
    }

    /// Wrap `payload` in an envelope stamped with this layer's number.
    pub fn encapsulate(self, payload: Packet) -> Packet {
        let header = self.create_header(&payload);
        Packet::wrap(self.number(), self.name(), header, payload)
    }

    /// Strip this layer's envelope and return the inner packet.
    ///
    /// # Errors
    /// `Error::LayerMismatch` if the outermost envelope was not produced by
    /// this layer, or if there is no envelope left to strip.
    pub fn decapsulate(self, packet: Packet) -> Result<Packet> {
        match packet {
            Packet::Wrapped(envelope) if envelope.layer == self.number() => {
                Ok(envelope.into_payload())
            }
            other => Err(Error::LayerMismatch {
                expected: self.number(),
                actual: other.layer(),
            }),
        }
    }

    /// Describe the outgoing bit stream. Only the Physical layer transmits;
    /// every other layer returns `None`.
    ///
    /// Informational only: nothing on the data path depends on it.
    pub fn transmit(self, packet: &Packet) -> Option<String> {
        if self != Layer::Physical {
            return None;
        }

        let rendered = packet.to_json().ok()?;
        let preview: String = rendered.chars().take(TRANSMIT_PREVIEW_CHARS).collect();
        Some(format!("[{} layer] transmitting bits: {}...", self.name(), preview))
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Layer {}: {}", self.number(), self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_descend_from_seven() {
        for (i, layer) in Layer::ALL.iter().enumerate() {
            assert_eq!(layer.number() as usize, 7 - i);
        }
    }

    #[test]
    fn test_from_number() {
        assert_eq!(Layer::from_number(4), Some(Layer::Transport));
        assert_eq!(Layer::from_number(1), Some(Layer::Physical));
        assert_eq!(Layer::from_number(0), None);
        assert_eq!(Layer::from_number(8), None);
    }

    #[test]
    fn test_encapsulate() {
        let packet = Layer::Transport.encapsulate(Packet::raw("data"));

        let envelope = packet.envelope().unwrap();
        assert_eq!(envelope.layer, 4);
        assert_eq!(envelope.layer_name, "Transport");
        assert_eq!(envelope.header["protocol"], "TCP");
        assert_eq!(envelope.header["port_dest"], "443");
        assert_eq!(envelope.payload, Packet::raw("data"));
    }

    #[test]
    fn test_network_header() {
        let header = Layer::Network.create_header(&Packet::raw(""));

        assert_eq!(header["protocol"], "IPv4");
        assert_eq!(header["ttl"], "64");
        assert!(header.contains_key("ip_source"));
        assert!(header.contains_key("ip_dest"));
    }

    #[test]
    fn test_header_ignores_payload() {
        for layer in Layer::ALL {
            let a = layer.create_header(&Packet::raw("first payload"));
            let b = layer.create_header(&Layer::Session.encapsulate(Packet::raw("second")));
            assert_eq!(a, b, "{layer} header depends on payload");
        }
    }

    #[test]
    fn test_headers_are_nonempty() {
        for layer in Layer::ALL {
            assert!(!layer.create_header(&Packet::default()).is_empty());
        }
    }

    #[test]
    fn test_decapsulate_returns_payload() {
        let inner = Layer::Network.encapsulate(Packet::raw("x"));
        let outer = Layer::Transport.encapsulate(inner.clone());

        assert_eq!(Layer::Transport.decapsulate(outer).unwrap(), inner);
    }

    #[test]
    fn test_decapsulate_mismatch() {
        let packet = Layer::Network.encapsulate(Packet::raw("x"));

        let result = Layer::Physical.decapsulate(packet);
        assert!(matches!(
            result,
            Err(Error::LayerMismatch {
                expected: 1,
                actual: Some(3)
            })
        ));
    }

    #[test]
    fn test_decapsulate_raw_payload() {
        let result = Layer::Application.decapsulate(Packet::raw("x"));
        assert!(matches!(
            result,
            Err(Error::LayerMismatch {
                expected: 7,
                actual: None
            })
        ));
    }

    #[test]
    fn test_transmit_only_physical() {
        let packet = Layer::Physical.encapsulate(Packet::raw("bits please"));

        let summary = Layer::Physical.transmit(&packet).unwrap();
        assert!(summary.starts_with("[Physical layer] transmitting bits: {"));
        assert!(summary.ends_with("..."));

        assert!(Layer::DataLink.transmit(&packet).is_none());
    }

    #[test]
    fn test_transmit_preview_is_bounded() {
        let packet = Layer::Physical.encapsulate(Packet::raw("é".repeat(500)));
        let summary = Layer::Physical.transmit(&packet).unwrap();

        let prefix = "[Physical layer] transmitting bits: ";
        let preview = &summary[prefix.len()..summary.len() - 3];
        assert_eq!(preview.chars().count(), TRANSMIT_PREVIEW_CHARS);
    }

    #[test]
    fn test_display() {
        assert_eq!(Layer::DataLink.to_string(), "Layer 2: Data Link");
        assert_eq!(Layer::Application.to_string(), "Layer 7: Application");
    }
}
