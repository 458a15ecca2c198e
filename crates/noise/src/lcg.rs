/// 32-bit linear congruential stream (Numerical Recipes constants).
///
/// Used for the permutation shuffle and for per-tile prop streams. Cheap to
/// copy; two streams built from the same seed yield the same sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advance and return the raw 32-bit state.
    pub fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(1_664_525)
            .wrapping_add(1_013_904_223);
        self.state
    }

    /// Advance and return a uniform value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        unit_f64(self.next_u32())
    }
}

/// Map a raw 32-bit draw onto `[0, 1)`.
pub fn unit_f64(raw: u32) -> f64 {
    raw as f64 / 4_294_967_296.0
}

/// Derive an independent 32-bit seed from another one.
///
/// Splitmix64 finalizer, truncated. Feeding an LCG draw straight back into a
/// new LCG would replay the parent stream one step ahead; mixing breaks that.
pub fn mix_seed(seed: u32) -> u32 {
    let mut z = (seed as u64).wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    (z ^ (z >> 31)) as u32
}
