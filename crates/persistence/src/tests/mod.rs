// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.


use metro_ticket::{Clock, DigitSource};
use time::OffsetDateTime;
use time::macros::datetime;

/// A clock pinned to one instant.
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

/// Default test instant: a Monday morning.
pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-02 10:00 UTC)
}

/// Deterministic digit source: zero-padded sequential counters.
#[derive(Default)]
pub struct SequentialDigits {
    counter: u64,
}

impl DigitSource for SequentialDigits {
    fn digits(&mut self, count: usize) -> String {
        self.counter += 1;
        format!("{:0width$}", self.counter, width = count)
    }
}
