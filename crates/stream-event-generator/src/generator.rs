//! Main event generator for producing stream events.

use crate::payload::EventPayload;
use crate::random::RandomSource;

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// No stream to choose from
    #[error("At least one stream name is required")]
    NoStreams,

    /// A stream name that is empty or only whitespace
    #[error("Stream name at position {0} is blank")]
    BlankStreamName(usize),

    /// Probability outside [0, 1] or not a number
    #[error("Malformed probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),
}

/// One generated event: where it goes and what it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamEvent {
    /// Zero-based iteration index
    pub index: u64,
    /// Destination stream name
    pub stream: String,
    pub payload: EventPayload,
}

/// Generator that produces one [`StreamEvent`] per iteration.
///
/// Per event the source is asked for the stream pick first and the malformed
/// chance second. With a seeded source the sequence is reproducible.
pub struct EventGenerator<S> {
    streams: Vec<String>,
    malformed_probability: f64,
    source: S,
    index: u64,
}

impl<S: RandomSource> EventGenerator<S> {
    /// Create a generator over `streams`, injecting a malformed payload with
    /// probability `malformed_probability`.
    pub fn new(
        streams: Vec<String>,
        malformed_probability: f64,
        source: S,
    ) -> Result<Self, GeneratorError> {
        validate_streams(&streams)?;
        validate_probability(malformed_probability)?;

        Ok(Self {
            streams,
            malformed_probability,
            source,
            index: 0,
        })
    }

    /// Set the index the next event is numbered with.
    pub fn with_start_index(mut self, index: u64) -> Self {
        self.index = index;
        self
    }

    /// Get the current event index.
    pub fn current_index(&self) -> u64 {
        self.index
    }

    /// Generate the next event.
    pub fn next_event(&mut self) -> StreamEvent {
        let index = self.index;

        let stream = self.streams[self.source.pick_index(self.streams.len())].clone();

        let payload = if self.source.chance(self.malformed_probability) {
            EventPayload::Malformed
        } else {
            EventPayload::regular(index)
        };

        self.index += 1;

        StreamEvent {
            index,
            stream,
            payload,
        }
    }

    /// Generate `count` events lazily.
    pub fn events(&mut self, count: u64) -> EventIterator<'_, S> {
        EventIterator {
            generator: self,
            remaining: count,
        }
    }
}

fn validate_streams(streams: &[String]) -> Result<(), GeneratorError> {
    if streams.is_empty() {
        return Err(GeneratorError::NoStreams);
    }
    if let Some(position) = streams.iter().position(|s| s.trim().is_empty()) {
        return Err(GeneratorError::BlankStreamName(position));
    }
    Ok(())
}

fn validate_probability(probability: f64) -> Result<(), GeneratorError> {
    if (0.0..=1.0).contains(&probability) {
        Ok(())
    } else {
        Err(GeneratorError::InvalidProbability(probability))
    }
}

/// Iterator that lazily generates events.
pub struct EventIterator<'a, S> {
    generator: &'a mut EventGenerator<S>,
    remaining: u64,
}

impl<S: RandomSource> Iterator for EventIterator<'_, S> {
    type Item = StreamEvent;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;
        Some(self.generator.next_event())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // A u64 count may not fit in usize on 32-bit targets
        match usize::try_from(self.remaining) {
            Ok(remaining) => (remaining, Some(remaining)),
            Err(_) => (usize::MAX, None),
        }
    }
}
