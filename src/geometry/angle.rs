use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random source for direction sampling.
///
/// Owned by whoever samples; reseed it to make a run reproducible.
#[derive(Clone, Debug)]
pub struct AngleSampler {
    rng: StdRng,
}

impl AngleSampler {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Uniform integer degrees in `[center - range, center + range)`.
    ///
    /// A non-positive `range` always yields `center`. Results that would leave `i32` are
    /// returned as the equivalent angle in `[0, 360)`.
    pub fn angle_in_range(&mut self, center: i32, range: i32) -> i32 {
        random_angle_in_range(&mut self.rng, center, range)
    }

    /// Uniform integer degrees in `[0, 360)`.
    pub fn direction(&mut self) -> i32 {
        self.rng.random_range(0..360)
    }
}

/// Free-function form of [`AngleSampler::angle_in_range`] over any random source.
pub fn random_angle_in_range<R: Rng + ?Sized>(rng: &mut R, center: i32, range: i32) -> i32 {
    if range <= 0 {
        return center;
    }
    let offset = rng.random_range(-range..range);
    center.checked_add(offset).unwrap_or_else(|| {
        let wide = (i64::from(center) + i64::from(offset)).rem_euclid(360);
        wide as i32
    })
}
