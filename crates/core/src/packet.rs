//! Packet model: nested envelopes around a raw payload.
//!
//! Each encapsulation step wraps the previous packet in a new envelope that
//! records which layer wrapped it and the illustrative header it added.
//!
//! # Packet Shape
//!
//! ```text
//! { layer: 1, layer_name: "Physical", header: {..},
//!   payload: { layer: 2, layer_name: "Data Link", header: {..},
//!     payload: ...
//!       payload: { layer: 7, ..., payload: { data: "Hello" } } } }
//! ```
//!
//! The outermost `layer` is always the layer that most recently wrapped the
//! packet. Only that layer may unwrap it.
//!
//! # JSON
//!
//! Packets serialize to exactly the shape above. This is an inspection format
//! for people and tests, not a wire encoding. Parsing is lenient the same way
//! unwrapping is: a missing `layer_name`, `header` or `payload` degrades to an
//! empty value, and a raw payload without `data` is accepted. A malformed
//! envelope at any depth is a parse error, never an empty payload.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Header fields added by a single layer (field name -> illustrative value).
pub type Header = BTreeMap<String, String>;

/// A packet as seen by a layer: either another layer's envelope or the raw
/// application payload at the bottom of the nesting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Packet {
    /// Payload wrapped by a layer
    Wrapped(Box<Envelope>),

    /// Innermost application data
    Raw(RawPayload),
}

/// One layer's wrapping around an inner packet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Number (1-7) of the layer that produced this envelope
    pub layer: u8,

    /// Display name of that layer
    #[serde(default)]
    pub layer_name: String,

    /// Illustrative header fields, discarded on unwrap
    #[serde(default)]
    pub header: Header,

    /// The wrapped packet
    #[serde(default)]
    pub payload: Packet,
}

/// The innermost payload carrying the original message.
///
/// Only `data` is accepted, so a malformed envelope (anything with a `layer`
/// key) fails to parse instead of being read as an empty raw payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl Default for Packet {
    fn default() -> Self {
        Packet::Raw(RawPayload::default())
    }
}

impl Packet {
    /// Create the raw `{ data }` payload that seeds encapsulation.
    pub fn raw(data: impl Into<String>) -> Self {
        Packet::Raw(RawPayload {
            data: Some(data.into()),
        })
    }

    /// Wrap `payload` in an envelope for `layer`.
    pub fn wrap(layer: u8, layer_name: impl Into<String>, header: Header, payload: Packet) -> Self {
        Packet::Wrapped(Box::new(Envelope {
            layer,
            layer_name: layer_name.into(),
            header,
            payload,
        }))
    }

    /// Layer number recorded on the outermost envelope, `None` for a raw payload.
    pub fn layer(&self) -> Option<u8> {
        match self {
            Packet::Wrapped(envelope) => Some(envelope.layer),
            Packet::Raw(_) => None,
        }
    }

    /// The outermost envelope, if any.
    pub fn envelope(&self) -> Option<&Envelope> {
        match self {
            Packet::Wrapped(envelope) => Some(envelope.as_ref()),
            Packet::Raw(_) => None,
        }
    }

    /// Number of envelopes around the raw payload.
    pub fn depth(&self) -> usize {
        self.envelopes().count()
    }

    /// Iterate envelopes from the outermost inwards.
    pub fn envelopes(&self) -> impl Iterator<Item = &Envelope> {
        std::iter::successors(self.envelope(), |envelope| envelope.payload.envelope())
    }

    /// The original message at the bottom of the nesting, if present.
    pub fn data(&self) -> Option<&str> {
        let mut current = self;
        while let Packet::Wrapped(envelope) = current {
            current = &envelope.payload;
        }
        match current {
            Packet::Raw(raw) => raw.data.as_deref(),
            Packet::Wrapped(_) => None,
        }
    }

    /// Render as compact JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Render as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a packet from JSON, accepting hand-built packets.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

impl Envelope {
    /// Take the inner packet, dropping this envelope's header.
    pub fn into_payload(self) -> Packet {
        self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(pairs: &[(&str, &str)]) -> Header {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_raw_packet() {
        let packet = Packet::raw("hello");

        assert_eq!(packet.layer(), None);
        assert_eq!(packet.depth(), 0);
        assert_eq!(packet.data(), Some("hello"));
    }

    #[test]
    fn test_wrap_records_layer() {
        let inner = Packet::wrap(2, "Data Link", header(&[("frame_type", "Ethernet")]), Packet::raw("x"));
        let outer = Packet::wrap(3, "Network", Header::new(), inner.clone());

        assert_eq!(outer.layer(), Some(3));
        assert_eq!(outer.depth(), 2);
        assert_eq!(outer.data(), Some("x"));
        assert_eq!(outer.envelope().unwrap().payload, inner);
    }

    #[test]
    fn test_envelopes_outermost_first() {
        let packet = Packet::wrap(
            2,
            "b",
            Header::new(),
            Packet::wrap(1, "a", Header::new(), Packet::raw("")),
        );

        let layers: Vec<u8> = packet.envelopes().map(|e| e.layer).collect();
        assert_eq!(layers, vec![2, 1]);
    }

    #[test]
    fn test_json_shape() {
        let packet = Packet::wrap(1, "Physical", header(&[("type", "bits")]), Packet::raw("hi"));

        let json: serde_json::Value = serde_json::from_str(&packet.to_json().unwrap()).unwrap();

        assert_eq!(json["layer"], 1);
        assert_eq!(json["layer_name"], "Physical");
        assert_eq!(json["header"]["type"], "bits");
        assert_eq!(json["payload"]["data"], "hi");
    }

    #[test]
    fn test_parse_hand_built_packet() {
        let packet = Packet::from_json(r#"{"layer": 3, "payload": {"data": "x"}}"#).unwrap();

        assert_eq!(packet.layer(), Some(3));
        let envelope = packet.envelope().unwrap();
        assert!(envelope.layer_name.is_empty());
        assert!(envelope.header.is_empty());
        assert_eq!(packet.data(), Some("x"));
    }

    #[test]
    fn test_parse_raw_without_data() {
        let packet = Packet::from_json("{}").unwrap();

        assert_eq!(packet, Packet::default());
        assert_eq!(packet.data(), None);
    }

    #[test]
    fn test_parse_envelope_without_payload() {
        let packet = Packet::from_json(r#"{"layer": 1}"#).unwrap();

        assert_eq!(packet.depth(), 1);
        assert_eq!(packet.data(), None);
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = Packet::from_json("not json");
        assert!(matches!(result, Err(crate::error::Error::Json(_))));
    }

    #[test]
    fn test_parse_layer_of_wrong_type() {
        let result = Packet::from_json(r#"{"layer": "1", "payload": {"data": "x"}}"#);
        assert!(matches!(result, Err(crate::error::Error::Json(_))));
    }

    #[test]
    fn test_parse_layer_out_of_range() {
        let result = Packet::from_json(r#"{"layer": 300, "payload": {"data": "x"}}"#);
        assert!(matches!(result, Err(crate::error::Error::Json(_))));
    }

    #[test]
    fn test_parse_bad_value_deep_inside() {
        let result = Packet::from_json(r#"{"layer": 1, "payload": {"layer": 2, "payload": {"data": 5}}}"#);
        assert!(matches!(result, Err(crate::error::Error::Json(_))));
    }

    #[test]
    fn test_parse_raw_with_unknown_field() {
        let result = Packet::from_json(r#"{"data": "x", "layer_name": "Physical"}"#);
        assert!(matches!(result, Err(crate::error::Error::Json(_))));
    }

    #[test]
    fn test_pretty_json_parses_back() {
        let packet = Packet::wrap(5, "Session", header(&[("session_id", "s")]), Packet::raw("ü"));
        let text = packet.to_json_pretty().unwrap();

        assert!(text.contains('\n'));
        assert_eq!(Packet::from_json(&text).unwrap(), packet);
    }
}
