//! Uniform position sampling for graph points.
//!
//! Each axis keeps its own cached distribution keyed by the requested range;
//! the distribution is rebuilt only when the range for that axis changes.

use rand::{Rng, SeedableRng, distributions::Uniform, rngs::SmallRng};
use tracing::trace;

use crate::error::{GraphError, Result};

/// SplitMix64 increment (the 64-bit golden ratio) used for per-worker seed
/// derivation.
const WORKER_SEED_SPACING: u64 = 0x9E37_79B9_7F4A_7C15;
const SPLITMIX_MULT_A: u64 = 0xBF58_476D_1CE4_E5B9;
const SPLITMIX_MULT_B: u64 = 0x94D0_49BB_1331_11EB;

#[inline]
pub(crate) fn mix_worker_seed(base_seed: u64, worker_index: usize) -> u64 {
    splitmix64(base_seed ^ ((worker_index as u64).wrapping_add(1)).wrapping_mul(WORKER_SEED_SPACING))
}

#[inline]
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(WORKER_SEED_SPACING);
    state = (state ^ (state >> 30)).wrapping_mul(SPLITMIX_MULT_A);
    state = (state ^ (state >> 27)).wrapping_mul(SPLITMIX_MULT_B);
    state ^ (state >> 31)
}

/// Half-open interval `[min, max)` that point coordinates are drawn from.
///
/// # Examples
/// ```
/// use rgg_core::SamplingRange;
///
/// let range = SamplingRange::new(-1.0, 1.0)?;
/// assert_eq!(range.span(), 2.0);
/// assert!(SamplingRange::new(1.0, 1.0).is_err());
/// # Ok::<(), rgg_core::GraphError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplingRange {
    min: f64,
    max: f64,
}

impl SamplingRange {
    /// The unit interval `[0, 1)`.
    pub const UNIT: Self = Self { min: 0.0, max: 1.0 };

    /// Creates a validated range.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidRange`] when either bound is non-finite,
    /// when `min >= max` or when the width `max - min` overflows.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min >= max || !(max - min).is_finite() {
            return Err(GraphError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower (inclusive) bound.
    #[must_use]
    #[rustfmt::skip]
    pub fn min(&self) -> f64 { self.min }

    /// Upper (exclusive) bound.
    #[must_use]
    #[rustfmt::skip]
    pub fn max(&self) -> f64 { self.max }

    /// Width of the interval.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

impl Default for SamplingRange {
    fn default() -> Self {
        Self::UNIT
    }
}

#[derive(Clone, Debug)]
struct AxisDistribution {
    range: SamplingRange,
    uniform: Uniform<f64>,
}

impl AxisDistribution {
    fn new(range: SamplingRange) -> Self {
        Self {
            range,
            uniform: Uniform::new(range.min, range.max),
        }
    }
}

/// Source of independent, uniformly distributed coordinates.
///
/// A sampler owns its generator; give each worker its own instance (see
/// [`PositionSampler::for_worker`]) rather than sharing one.
///
/// # Examples
/// ```
/// use rgg_core::PositionSampler;
///
/// let mut sampler = PositionSampler::seeded(7);
/// let x = sampler.sample(0.0, 1.0, 0)?;
/// assert!((0.0..1.0).contains(&x));
/// # Ok::<(), rgg_core::GraphError>(())
/// ```
#[derive(Clone, Debug)]
pub struct PositionSampler {
    rng: SmallRng,
    axes: Vec<AxisDistribution>,
}

impl PositionSampler {
    /// Creates a sampler seeded from the operating system's entropy source.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::from_rng(SmallRng::from_entropy())
    }

    /// Creates a sampler with a fixed seed for reproducible runs.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(SmallRng::seed_from_u64(seed))
    }

    /// Creates a sampler for `worker` whose seed is derived from `base_seed`.
    ///
    /// Distinct workers receive well-separated seeds, so samplers handed to
    /// parallel workers never share generator state.
    #[must_use]
    pub fn for_worker(base_seed: u64, worker: usize) -> Self {
        Self::seeded(mix_worker_seed(base_seed, worker))
    }

    fn from_rng(rng: SmallRng) -> Self {
        Self {
            rng,
            axes: Vec::new(),
        }
    }

    /// Draws a coordinate for `axis` from `[min, max)`.
    ///
    /// # Errors
    /// Returns [`GraphError::InvalidRange`] when the bounds do not form a
    /// valid range.
    pub fn sample(&mut self, min: f64, max: f64, axis: usize) -> Result<f64> {
        let range = SamplingRange::new(min, max)?;
        Ok(self.sample_in(range, axis))
    }

    /// Draws a coordinate for `axis` from an already validated range.
    pub fn sample_in(&mut self, range: SamplingRange, axis: usize) -> f64 {
        while self.axes.len() <= axis {
            self.axes.push(AxisDistribution::new(range));
        }
        let slot = &mut self.axes[axis];
        if slot.range != range {
            trace!(axis, min = range.min, max = range.max, "rebuilding axis distribution");
            *slot = AxisDistribution::new(range);
        }
        self.rng.sample(&slot.uniform)
    }

    /// Returns the range currently cached for `axis`, if one was built.
    #[must_use]
    pub fn cached_range(&self, axis: usize) -> Option<SamplingRange> {
        self.axes.get(axis).map(|slot| slot.range)
    }
}
