//! Linear scales between a value domain and a pixel range

use serde::Serialize;

/// Affine map from `domain` onto `range`, with an exact inverse.
///
/// A degenerate domain or range (zero width or non-finite) falls back to a
/// unit-slope map anchored at the domain start, so both directions stay
/// finite and remain inverses of each other.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        LinearScale { domain, range }
    }

    pub fn is_degenerate(&self) -> bool {
        let domain_width = self.domain.1 - self.domain.0;
        let range_width = self.range.1 - self.range.0;
        !(domain_width != 0.0
            && range_width != 0.0
            && domain_width.is_finite()
            && range_width.is_finite())
    }

    /// Pixels per domain unit (1 for a degenerate scale).
    pub fn slope(&self) -> f64 {
        if self.is_degenerate() {
            1.0
        } else {
            (self.range.1 - self.range.0) / (self.domain.1 - self.domain.0)
        }
    }

    pub fn apply(&self, value: f64) -> f64 {
        self.range.0 + (value - self.domain.0) * self.slope()
    }

    pub fn invert(&self, pixel: f64) -> f64 {
        self.domain.0 + (pixel - self.range.0) / self.slope()
    }
}
