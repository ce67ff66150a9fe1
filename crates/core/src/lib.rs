//! osi-sim-core: Educational simulator of the seven-layer OSI model
//!
//! This library shows how a message is wrapped once per layer on the way
//! down the stack and unwrapped in reverse order on the way up:
//! - Each layer adds an illustrative header (fake ports, addresses, MACs)
//! - Each layer only unwraps envelopes it produced
//! - The round trip is verified by comparing the recovered text to the input
//!
//! # Architecture
//!
//! - `packet`: nested envelope model and its JSON inspection format
//! - `layer`: the seven layers and their headers
//! - `simulator`: the fixed layer chain, send/receive and round trips
//! - `metrics`: counters for a simulation run
//!
//! # Design Principles
//!
//! - **No panics**: decapsulation failures are structured errors
//! - **Stateless chain**: layers and the simulator are immutable values
//! - **Deterministic**: headers never depend on the payload
//!
//! # Example
//!
//! ```
//! use osi_sim_core::Simulator;
//!
//! let sim = Simulator::new();
//! let packet = sim.send("Hello", false);
//! assert_eq!(packet.layer(), Some(1));
//! assert_eq!(sim.receive(packet, false).unwrap(), "Hello");
//! ```

pub mod error;
pub mod layer;
pub mod metrics;
pub mod packet;
pub mod simulator;

// Re-export commonly used types
pub use error::{Error, Result};
pub use layer::Layer;
pub use packet::{Envelope, Header, Packet, RawPayload};
pub use simulator::{LayerDescriptor, RoundTrip, Simulator};
