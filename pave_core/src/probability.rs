//! # Monte Carlo Probability Estimator
//!
//! Estimates how often each pavement type is recommended across the input
//! space by drawing parameter sets uniformly from the ten sampled domains
//! (traffic, design life, subgrade, slab, longitudinal joints, marine,
//! utilities, manual construction, initial cost, construction time) and
//! scoring each draw.
//!
//! Trials run in fixed-size chunks, each with its own RNG seeded from the
//! run seed and the chunk index. A seeded run therefore gives the same
//! counts whether the chunks run sequentially or on the rayon pool.
//!
//! ## Example
//!
//! ```rust
//! use pave_core::probability::Estimator;
//!
//! let report = Estimator::new(500).seed(7).run()?;
//! assert_eq!(report.counts.iter().map(|(_, c)| *c).sum::<usize>(), 500);
//! # Ok::<(), pave_core::errors::PaveError>(())
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::{PaveError, PaveResult};
use crate::params::{
    ConstructionTime, DesignLife, InitialCost, LongitudinalJoints, ParameterSet, SlabThickness, SubgradeCbr,
    TrafficVolume, YesNo,
};
use crate::pavement::PerType;
use crate::scoring::{score_with_calibration, Calibration};

/// Largest accepted sample size
pub const MAX_SAMPLE_SIZE: usize = 10_000_000;

/// Trials per chunk
pub const CHUNK_SIZE: usize = 10_000;

/// Recommendation frequencies over a Monte Carlo run.
///
/// ## JSON Example
///
/// ```json
/// {
///   "sampleSize": 1000,
///   "counts": { "JPCP": 239, "JRCP": 212, "CRCP": 127, "PCP": 422 },
///   "rawProbabilities": { "JPCP": 0.239, "JRCP": 0.212, "CRCP": 0.127, "PCP": 0.422 },
///   "formattedProbabilities": { "JPCP": "23.9%", "JRCP": "21.2%", "CRCP": "12.7%", "PCP": "42.2%" },
///   "calibrated": false,
///   "seed": 42
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbabilityReport {
    pub sample_size: usize,
    pub counts: PerType<usize>,
    /// count / sample size
    pub raw_probabilities: PerType<f64>,
    /// Percent with one decimal, e.g. "42.3%"
    pub formatted_probabilities: PerType<String>,
    pub calibrated: bool,
    /// Seed the run was derived from
    pub seed: u64,
}

impl ProbabilityReport {
    fn from_counts(counts: PerType<usize>, sample_size: usize, calibrated: bool, seed: u64) -> Self {
        let raw_probabilities = counts.map(|_, c| *c as f64 / sample_size as f64);
        let formatted_probabilities = raw_probabilities.map(|_, p| format!("{:.1}%", p * 100.0));
        ProbabilityReport {
            sample_size,
            counts,
            raw_probabilities,
            formatted_probabilities,
            calibrated,
            seed,
        }
    }
}

/// Monte Carlo run configuration.
#[derive(Debug, Clone)]
pub struct Estimator {
    sample_size: usize,
    seed: Option<u64>,
    calibration: Option<Calibration>,
    parallel: bool,
}

impl Estimator {
    pub fn new(sample_size: usize) -> Self {
        Estimator {
            sample_size,
            seed: None,
            calibration: None,
            parallel: false,
        }
    }

    /// Fix the run seed for reproducible counts
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Calibrate every trial's scores before picking the winner
    pub fn calibration(mut self, calibration: Calibration) -> Self {
        self.calibration = Some(calibration);
        self
    }

    /// Run chunks on the rayon thread pool
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    fn validate(&self) -> PaveResult<()> {
        if self.sample_size == 0 {
            return Err(PaveError::ZeroSampleSize);
        }
        if self.sample_size > MAX_SAMPLE_SIZE {
            return Err(PaveError::SampleSizeTooLarge {
                requested: self.sample_size,
                max: MAX_SAMPLE_SIZE,
            });
        }
        Ok(())
    }

    /// Run the estimate.
    ///
    /// Fails with [`PaveError::ZeroSampleSize`] or
    /// [`PaveError::SampleSizeTooLarge`] before drawing anything.
    pub fn run(&self) -> PaveResult<ProbabilityReport> {
        self.validate()?;

        let seed = self.seed.unwrap_or_else(rand::random);
        let chunks: Vec<(u64, usize)> = (0..self.sample_size.div_ceil(CHUNK_SIZE))
            .map(|index| {
                let len = CHUNK_SIZE.min(self.sample_size - index * CHUNK_SIZE);
                (chunk_seed(seed, index), len)
            })
            .collect();

        tracing::debug!(
            sample_size = self.sample_size,
            seed,
            chunks = chunks.len(),
            parallel = self.parallel,
            calibrated = self.calibration.is_some(),
            "starting Monte Carlo estimate"
        );

        let calibration = self.calibration.as_ref();
        let partials: Vec<PerType<usize>> = if self.parallel {
            chunks
                .par_iter()
                .map(|&(chunk_seed, len)| run_chunk(chunk_seed, len, calibration))
                .collect::<PaveResult<_>>()?
        } else {
            chunks
                .iter()
                .map(|&(chunk_seed, len)| run_chunk(chunk_seed, len, calibration))
                .collect::<PaveResult<_>>()?
        };

        let mut counts = PerType::splat(0usize);
        for partial in &partials {
            for (t, count) in partial.iter() {
                counts[t] += count;
            }
        }

        let report = ProbabilityReport::from_counts(counts, self.sample_size, calibration.is_some(), seed);
        tracing::debug!(
            jpcp = %report.formatted_probabilities.jpcp,
            jrcp = %report.formatted_probabilities.jrcp,
            crcp = %report.formatted_probabilities.crcp,
            pcp = %report.formatted_probabilities.pcp,
            "Monte Carlo estimate complete"
        );
        Ok(report)
    }
}

/// Run an unseeded, sequential, uncalibrated estimate
pub fn estimate(sample_size: usize) -> PaveResult<ProbabilityReport> {
    Estimator::new(sample_size).run()
}

fn chunk_seed(seed: u64, index: usize) -> u64 {
    seed.wrapping_add((index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

fn run_chunk(seed: u64, len: usize, calibration: Option<&Calibration>) -> PaveResult<PerType<usize>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut counts = PerType::splat(0usize);
    for _ in 0..len {
        let params = sample_parameters(&mut rng);
        let result = score_with_calibration(&params, calibration)?;
        counts[result.recommended_type] += 1;
    }
    Ok(counts)
}

fn pick<T: Copy, R: Rng + ?Sized>(rng: &mut R, values: &[T]) -> T {
    values[rng.gen_range(0..values.len())]
}

/// Draw one parameter set uniformly from the ten sampled domains
pub fn sample_parameters<R: Rng + ?Sized>(rng: &mut R) -> ParameterSet {
    ParameterSet {
        traffic_volume: Some(pick(rng, TrafficVolume::ALL)),
        design_life: Some(pick(rng, DesignLife::ALL)),
        subgrade_cbr: Some(pick(rng, SubgradeCbr::ALL)),
        slab_thickness: Some(pick(rng, SlabThickness::ALL)),
        longitudinal_joints: Some(pick(rng, LongitudinalJoints::ALL)),
        marine_environment: Some(pick(rng, YesNo::ALL)),
        utility_lines: Some(pick(rng, YesNo::ALL)),
        manual_construction: Some(pick(rng, YesNo::ALL)),
        initial_cost: Some(pick(rng, InitialCost::ALL)),
        construction_time: Some(pick(rng, ConstructionTime::ALL)),
        ..ParameterSet::default()
    }
}
