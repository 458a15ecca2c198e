use crate::lcg::Lcg;

/// Seeded 2D gradient noise over continuous coordinates.
///
/// The permutation of `0..256` is shuffled once with an [`Lcg`] stream and
/// mirrored to 512 entries so corner lookups never wrap. Samples are
/// remapped to `[0, 1]`.
#[derive(Clone)]
pub struct NoiseField {
    seed: u32,
    perm: [u8; 512],
}

impl std::fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseField").field("seed", &self.seed).finish()
    }
}

impl NoiseField {
    /// Build the permutation table for `seed` (Fisher-Yates from the top).
    pub fn new(seed: u32) -> Self {
        let mut table = [0u8; 256];
        for (i, slot) in table.iter_mut().enumerate() {
            *slot = i as u8;
        }
        let mut rng = Lcg::new(seed);
        for i in (1..256usize).rev() {
            let j = (rng.next_f64() * (i + 1) as f64).floor() as usize;
            table.swap(i, j);
        }

        let mut perm = [0u8; 512];
        perm[..256].copy_from_slice(&table);
        perm[256..].copy_from_slice(&table);
        Self { seed, perm }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn permutation(&self) -> &[u8; 512] {
        &self.perm
    }

    /// Noise value at `(x, z)`, in `[0, 1]`.
    ///
    /// Defined for every finite input, including negative and very large
    /// coordinates (the lattice cell wraps every 256 units). The gradient set
    /// can overshoot the unit range by a few percent near some lattice
    /// edges; those samples are clamped.
    pub fn sample(&self, x: f64, z: f64) -> f64 {
        let x0 = x.floor();
        let z0 = z.floor();
        let xi = (x0 as i64 & 255) as usize;
        let zi = (z0 as i64 & 255) as usize;
        let xf = x - x0;
        let zf = z - z0;
        let u = fade(xf);
        let v = fade(zf);

        let p = &self.perm;
        let a = p[xi] as usize;
        let b = p[xi + 1] as usize;
        let aa = p[a + zi];
        let ab = p[a + zi + 1];
        let ba = p[b + zi];
        let bb = p[b + zi + 1];

        let res = lerp(
            lerp(grad(aa, xf, zf), grad(ba, xf - 1.0, zf), u),
            lerp(grad(ab, xf, zf - 1.0), grad(bb, xf - 1.0, zf - 1.0), u),
            v,
        );
        ((res + 1.0) / 2.0).clamp(0.0, 1.0)
    }
}

/// Quintic smoothstep `6t^5 - 15t^4 + 10t^3`.
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Pseudo-gradient: the low two hash bits pick axis order and sign.
fn grad(hash: u8, x: f64, y: f64) -> f64 {
    let h = hash & 3;
    let (u, v) = if h < 2 { (x, y) } else { (y, x) };
    let u = if h & 1 != 0 { -u } else { u };
    let v = if h & 2 != 0 { -2.0 * v } else { 2.0 * v };
    u + v
}
