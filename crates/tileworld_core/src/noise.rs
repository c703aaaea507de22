//! Seeded 2D gradient noise.
//!
//! A [`NoiseField`] is a pure function of `(seed, x, y)`: the permutation
//! table is derived from the seed with a small linear-congruential generator,
//! so two fields built from the same seed sample identically on every
//! platform.

const C: f64 = 0.923_879_532_511_286_7;
const S: f64 = 0.382_683_432_365_089_8;
const R: f64 = 0.707_106_781_186_547_6;

/// Sixteen unit gradients, 22.5 degrees apart.
const GRADIENTS: [(f64, f64); 16] = [
    (1.0, 0.0),
    (C, S),
    (R, R),
    (S, C),
    (0.0, 1.0),
    (-S, C),
    (-R, R),
    (-C, S),
    (-1.0, 0.0),
    (-C, -S),
    (-R, -R),
    (-S, -C),
    (0.0, -1.0),
    (S, -C),
    (R, -R),
    (C, -S),
];

/// Numerical Recipes LCG, only used to shuffle the permutation.
struct Lcg(u32);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self((seed ^ (seed >> 32)) as u32)
    }

    fn next_u32(&mut self) -> u32 {
        self.0 = self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct NoiseField {
    seed: u64,
    permutation: [u8; 512],
}

impl NoiseField {
    pub fn new(seed: u64) -> Self {
        let mut perm = [0u8; 256];
        for (i, p) in perm.iter_mut().enumerate() {
            *p = i as u8;
        }

        // Fisher-Yates
        let mut lcg = Lcg::new(seed);
        for i in (1..256usize).rev() {
            let j = (lcg.next_u32() % (i as u32 + 1)) as usize;
            perm.swap(i, j);
        }

        let mut permutation = [0u8; 512];
        for (i, p) in permutation.iter_mut().enumerate() {
            *p = perm[i & 255];
        }

        Self { seed, permutation }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Gradient noise at `(x, y)`, roughly within `[-1, 1]`.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let x0 = x.floor();
        let y0 = y.floor();
        let xi = (x0 as i64 & 255) as usize;
        let yi = (y0 as i64 & 255) as usize;
        let xf = x - x0;
        let yf = y - y0;

        let u = fade(xf);
        let v = fade(yf);

        let p = &self.permutation;
        let aa = p[p[xi] as usize + yi];
        let ab = p[p[xi] as usize + yi + 1];
        let ba = p[p[xi + 1] as usize + yi];
        let bb = p[p[xi + 1] as usize + yi + 1];

        let x1 = lerp(grad(aa, xf, yf), grad(ba, xf - 1.0, yf), u);
        let x2 = lerp(grad(ab, xf, yf - 1.0), grad(bb, xf - 1.0, yf - 1.0), u);
        lerp(x1, x2, v)
    }
}

#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

#[inline]
fn grad(hash: u8, dx: f64, dy: f64) -> f64 {
    let (gx, gy) = GRADIENTS[(hash & 15) as usize];
    gx * dx + gy * dy
}
