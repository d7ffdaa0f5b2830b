// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rand::RngExt;

/// Source of random decimal digits, injectable for deterministic tests.
pub trait DigitSource {
    /// Returns `count` decimal digits as a string, leading zeros
    /// preserved.
    fn digits(&mut self, count: usize) -> String;
}

/// Thread-local RNG digit source.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngDigits;

impl DigitSource for ThreadRngDigits {
    fn digits(&mut self, count: usize) -> String {
        let mut rng = rand::rng();
        (0..count)
            .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
            .collect()
    }
}
