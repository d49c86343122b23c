// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Debounce timer for typed input.
//!
//! Every [`Debouncer::arm`] starts a new generation and pushes the deadline
//! out. Only the latest generation can fire, and [`Debouncer::cancel`]
//! invalidates whatever is pending. The timer is polled from the application
//! tick rather than running its own thread.

use std::time::{Duration, Instant};

pub(crate) const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug)]
pub(crate) struct Debouncer {
    delay: Duration,
    generation: u64,
    deadline: Option<(u64, Instant)>,
}

impl Debouncer {
    pub(crate) fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            deadline: None,
        }
    }

    pub(crate) fn arm(&mut self, now: Instant) -> u64 {
        self.generation += 1;
        self.deadline = Some((self.generation, now + self.delay));
        self.generation
    }

    pub(crate) fn cancel(&mut self) {
        self.generation += 1;
        self.deadline = None;
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the generation that fired, if its deadline has passed.
    pub(crate) fn poll(&mut self, now: Instant) -> Option<u64> {
        match self.deadline {
            Some((generation, at)) if generation == self.generation && now >= at => {
                self.deadline = None;
                Some(generation)
            }
            _ => None,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(100);

    #[test]
    fn fires_once_after_deadline() {
        let mut debouncer = Debouncer::new(DELAY);
        let now = Instant::now();

        let generation = debouncer.arm(now);
        assert_eq!(debouncer.poll(now), None);
        assert_eq!(debouncer.poll(now + DELAY), Some(generation));
        assert_eq!(debouncer.poll(now + DELAY * 2), None);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn rearming_pushes_the_deadline_out() {
        let mut debouncer = Debouncer::new(DELAY);
        let now = Instant::now();

        debouncer.arm(now);
        let later = now + DELAY / 2;
        let second = debouncer.arm(later);

        assert_eq!(debouncer.poll(now + DELAY), None);
        assert_eq!(debouncer.poll(later + DELAY), Some(second));
    }

    #[test]
    fn cancel_discards_pending_generation() {
        let mut debouncer = Debouncer::new(DELAY);
        let now = Instant::now();

        let generation = debouncer.arm(now);
        debouncer.cancel();

        assert!(debouncer.generation() > generation);
        assert_eq!(debouncer.poll(now + DELAY), None);
    }
}
