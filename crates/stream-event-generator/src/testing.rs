//! Test helpers for driving the generator with recorded decisions.

use crate::random::RandomSource;
use std::collections::VecDeque;

/// One recorded random decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Draw {
    /// Answer to [`RandomSource::pick_index`]
    Pick(usize),
    /// Answer to [`RandomSource::chance`]
    Chance(bool),
}

/// Random source that replays a fixed script of decisions.
///
/// Picks and chance outcomes share one queue and are consumed in the order
/// they were recorded. Once the script runs out the source falls back to
/// index `0` and `false`, so a short script never panics mid-run.
///
/// # Panics
///
/// Asking for a pick when the next recorded decision is a chance (or the
/// other way round) panics: the caller drew in a different order than the
/// script was recorded in.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    draws: VecDeque<Draw>,
}

impl ScriptedSource {
    pub fn new(draws: impl IntoIterator<Item = Draw>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
        }
    }

    /// Script one `(stream pick, malformed)` pair per event, in the order the
    /// event generator draws them.
    pub fn events(events: impl IntoIterator<Item = (usize, bool)>) -> Self {
        Self::new(
            events
                .into_iter()
                .flat_map(|(pick, malformed)| [Draw::Pick(pick), Draw::Chance(malformed)]),
        )
    }

    /// Decisions not yet consumed.
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RandomSource for ScriptedSource {
    fn pick_index(&mut self, len: usize) -> usize {
        match self.draws.pop_front() {
            Some(Draw::Pick(index)) => index % len,
            None => 0,
            Some(other) => panic!("script expected {other:?}, got a pick over {len}"),
        }
    }

    fn chance(&mut self, probability: f64) -> bool {
        match self.draws.pop_front() {
            Some(Draw::Chance(outcome)) => outcome,
            None => false,
            Some(other) => panic!("script expected {other:?}, got a chance of {probability}"),
        }
    }
}
