//! The run loop that emits events to a sink.
//!
//! One run is strictly linear: start banner, sink open, `iterations`
//! append-then-sleep steps, finish banner. The start banner goes out before
//! the sink talks to the broker. A failed open or append ends the run with the
//! error and the finish banner is not printed.

use crate::config::EmitterConfig;
use crate::error::EmitError;
use crate::sink::StreamSink;
use std::io::Write;
use std::time::Instant;
use stream_event_generator::{EventGenerator, RandomSource};
use tracing::{debug, info};

pub const START_BANNER: &str = "starting...";
pub const FINISH_BANNER: &str = "finished...";

/// Emits synthetic events to the streams of a [`StreamSink`].
///
/// The emitter owns the sink for its whole lifetime, so a Redis connection is
/// opened once per run, reused by every append and closed when the emitter is
/// dropped.
///
/// # Example
///
/// ```ignore
/// let config = EmitterConfig::default();
/// let sink = RedisStreamSink::new(&redis_args, &config)?;
/// let mut emitter = StreamEmitter::new(config, sink);
/// emitter.run(RngSource::seeded(42), &mut std::io::stdout()).await?;
/// ```
pub struct StreamEmitter<K> {
    config: EmitterConfig,
    sink: K,
}

impl<K: StreamSink> StreamEmitter<K> {
    pub fn new(config: EmitterConfig, sink: K) -> Self {
        Self { config, sink }
    }

    pub fn config(&self) -> &EmitterConfig {
        &self.config
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Give the sink back, ending the emitter.
    pub fn into_sink(self) -> K {
        self.sink
    }

    /// Run all iterations, writing the banners to `console`.
    ///
    /// Returns the number of entries appended.
    pub async fn run<S, W>(&mut self, source: S, console: &mut W) -> Result<u64, EmitError>
    where
        S: RandomSource,
        W: Write,
    {
        self.config.validate()?;
        let interval = self.config.interval()?;

        let mut generator = EventGenerator::new(
            self.config.streams.clone(),
            self.config.malformed_probability,
            source,
        )?;

        info!(
            "Emitting {} events to {:?} every {:?} (malformed probability {})",
            self.config.iterations,
            self.config.streams,
            interval,
            self.config.malformed_probability
        );

        print_banner(console, START_BANNER)?;
        self.sink.open().await?;

        let start_time = Instant::now();
        let mut appended = 0u64;
        let mut malformed = 0u64;

        for event in generator.events(self.config.iterations) {
            if event.payload.is_malformed() {
                malformed += 1;
                debug!(
                    "Injecting malformed payload at index {} into '{}'",
                    event.index, event.stream
                );
            }

            let id = self.sink.append(&event.stream, &event.payload).await?;
            appended += 1;

            debug!(
                "Appended entry {} to '{}' (index {})",
                id, event.stream, event.index
            );

            tokio::time::sleep(interval).await;
        }

        info!(
            "Emission complete: {} entries ({} malformed) in {:?}",
            appended,
            malformed,
            start_time.elapsed()
        );

        print_banner(console, FINISH_BANNER)?;

        Ok(appended)
    }
}

fn print_banner<W: Write>(console: &mut W, banner: &str) -> Result<(), EmitError> {
    writeln!(console, "{banner}")?;
    console.flush()?;
    Ok(())
}
