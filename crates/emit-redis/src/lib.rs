//! Redis stream emitter for synthetic test events.
//!
//! This crate takes events from `stream-event-generator` and appends them to
//! Redis streams with `XADD`, pausing between appends. Every so often an event
//! is replaced by a malformed payload so consumers downstream get to exercise
//! their parse-error paths.
//!
//! # Architecture
//!
//! ```text
//!   EmitterConfig (CLI / YAML)
//!            │
//!            ▼
//!   ┌─────────────────┐      ┌─────────────────┐
//!   │  StreamEmitter  │─────▶│ EventGenerator  │
//!   │                 │      │ (RandomSource)  │
//!   │  - banners      │◀─────│                 │
//!   │  - sleep        │      └─────────────────┘
//!   └────────┬────────┘
//!            │ open(), then append(stream, payload)
//!            ▼
//!   ┌─────────────────┐
//!   │   StreamSink    │  RedisStreamSink: XADD [MAXLEN] (+ PEXPIRE)
//!   │                 │  DryRunSink:      log only
//!   └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use emit_redis::{EmitterConfig, RedisConnectArgs, RedisStreamSink, StreamEmitter};
//! use stream_event_generator::RngSource;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = EmitterConfig::default();
//!     let sink = RedisStreamSink::new(&redis_args, &config)?;
//!
//!     let mut emitter = StreamEmitter::new(config, sink);
//!     let appended = emitter.run(RngSource::seeded(42), &mut std::io::stdout()).await?;
//!     println!("Appended {appended} entries");
//!
//!     Ok(())
//! }
//! ```

pub mod args;
pub mod config;
pub mod emitter;
pub mod encoder;
pub mod error;
pub mod sink;

// Re-exports for convenience
pub use args::{EmitArgs, EmitterArgs, RedisConnectArgs};
pub use config::{EmitterConfig, StreamTrim};
pub use emitter::{StreamEmitter, FINISH_BANNER, START_BANNER};
pub use error::EmitError;
pub use sink::{DryRunSink, RedisStreamSink, StreamSink};
