use serde::{Deserialize, Serialize};

/// Default term-frequency saturation constant
pub const DEFAULT_K1: f32 = 1.2;

/// Default length normalization constant
pub const DEFAULT_B: f32 = 0.75;

/// Okapi BM25 ranking constants
///
/// `k1` controls term-frequency saturation; `b` controls how strongly
/// scores are normalized by field length relative to the field average.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bm25Params {
    pub k1: f32,
    pub b: f32,
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self {
            k1: DEFAULT_K1,
            b: DEFAULT_B,
        }
    }
}

impl Bm25Params {
    /// Create BM25 parameters with explicit constants
    pub fn new(k1: f32, b: f32) -> Self {
        Self { k1, b }
    }

    /// Set the term-frequency saturation constant
    pub fn with_k1(mut self, k1: f32) -> Self {
        self.k1 = k1;
        self
    }

    /// Set the length normalization constant
    pub fn with_b(mut self, b: f32) -> Self {
        self.b = b;
        self
    }
}
