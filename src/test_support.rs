use std::collections::VecDeque;

use crate::rng::RandomSource;

/// Random source that replays scripted answers, then falls back to the
/// lowest value / `false` once the script runs out.
#[derive(Debug, Default)]
pub(crate) struct ScriptedRng {
    ints: VecDeque<u32>,
    chances: VecDeque<bool>,
    indices: VecDeque<usize>,
}

impl ScriptedRng {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_ints(mut self, ints: &[u32]) -> Self {
        self.ints.extend(ints);
        self
    }

    pub(crate) fn with_chances(mut self, chances: &[bool]) -> Self {
        self.chances.extend(chances);
        self
    }

    pub(crate) fn with_indices(mut self, indices: &[usize]) -> Self {
        self.indices.extend(indices);
        self
    }
}

impl RandomSource for ScriptedRng {
    fn int_in(&mut self, low: u32, high: u32) -> u32 {
        self.ints.pop_front().unwrap_or(low).clamp(low, high)
    }

    fn chance(&mut self, _probability: f64) -> bool {
        self.chances.pop_front().unwrap_or(false)
    }

    fn index(&mut self, len: usize) -> usize {
        self.indices.pop_front().unwrap_or(0).min(len - 1)
    }
}
