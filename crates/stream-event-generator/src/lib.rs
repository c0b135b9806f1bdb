//! Synthetic event generator for the stream-emitter test-data tool.
//!
//! This crate produces the events that `emit-redis` appends to Redis streams.
//! It does no I/O: every random decision goes through a [`RandomSource`], so a
//! seeded source reproduces the same events and a scripted source lets tests
//! assert an exact sequence.
//!
//! # Architecture
//!
//! ```text
//!   streams + malformed probability
//!                │
//!                ▼
//!     ┌─────────────────────┐
//!     │   EventGenerator    │
//!     │                     │
//!     │  - source (random)  │
//!     │  - index            │
//!     └──────────┬──────────┘
//!                │
//!                ▼
//!   StreamEvent { index, stream, payload }
//! ```
//!
//! # Example
//!
//! ```rust
//! use stream_event_generator::{EventGenerator, EventPayload, RngSource};
//!
//! let streams = vec!["main-stream".to_string(), "other-stream".to_string()];
//! let mut generator = EventGenerator::new(streams, 0.0, RngSource::seeded(42)).unwrap();
//!
//! let event = generator.next_event();
//! assert_eq!(event.index, 0);
//! assert_eq!(event.payload, EventPayload::regular(0));
//! ```

pub mod generator;
pub mod payload;
pub mod random;
pub mod testing;

// Re-exports for convenience
pub use generator::{EventGenerator, EventIterator, GeneratorError, StreamEvent};
pub use payload::{EventPayload, FieldValue, MALFORMED_PRIORITY};
pub use random::{random_seed, RandomSource, RngSource};
