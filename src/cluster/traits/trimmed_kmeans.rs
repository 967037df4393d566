//! Trimmed K-Means (k-means--) clustering trait.
//!
//! Lloyd-style K-Means that excludes the `rate` fraction of points farthest
//! from their nearest mean when recomputing means, and can optionally move
//! those points into a separate noise cluster once iteration stops.

use crate::cluster::validation::{validate_n_clusters, validate_rate};
use numr::error::Result;
use numr::ops::DistanceMetric;
use numr::runtime::Runtime;
use numr::tensor::Tensor;

/// Label written for points moved into the noise cluster.
pub const NOISE_LABEL: i64 = -1;

/// Initialization method for trimmed K-Means.
#[derive(Debug, Clone, Default)]
pub enum TrimmedKMeansInit<R: Runtime> {
    /// K-Means++ initialization (default).
    #[default]
    KMeansPlusPlus,
    /// Random selection of distinct data points.
    Random,
    /// User-provided initial means [k, d].
    Points(Tensor<R>),
}

impl<R: Runtime> TrimmedKMeansInit<R> {
    /// Short name reported to observers.
    pub fn name(&self) -> &'static str {
        match self {
            Self::KMeansPlusPlus => "kmeans++",
            Self::Random => "random",
            Self::Points(_) => "points",
        }
    }
}

/// Options for trimmed K-Means clustering.
#[derive(Debug, Clone)]
pub struct TrimmedKMeansOptions<R: Runtime> {
    /// Number of clusters.
    pub n_clusters: usize,
    /// Maximum number of rounds. `0` runs until convergence or variance regression.
    pub max_iter: usize,
    /// Fraction of points, in `[0, 1)`, excluded from mean recomputation each round.
    pub rate: f64,
    /// Move points at or above the final threshold into a noise cluster.
    pub noise: bool,
    /// Distance between points and means.
    pub metric: DistanceMetric,
    /// Initialization method.
    pub init: TrimmedKMeansInit<R>,
}

impl<R: Runtime> Default for TrimmedKMeansOptions<R> {
    fn default() -> Self {
        Self {
            n_clusters: 8,
            max_iter: 0,
            rate: 0.05,
            noise: false,
            metric: DistanceMetric::SquaredEuclidean,
            init: TrimmedKMeansInit::KMeansPlusPlus,
        }
    }
}

impl<R: Runtime> TrimmedKMeansOptions<R> {
    /// Check the scalar parameters. Data-dependent checks (dtype, shape of
    /// initial points) happen when the algorithm runs.
    pub fn validate(&self) -> Result<()> {
        validate_n_clusters(self.n_clusters, "trimmed_kmeans")?;
        validate_rate(self.rate, "trimmed_kmeans")
    }

    /// Capacity of the threshold heap for a dataset of `n_points`.
    pub fn heap_size(&self, n_points: usize) -> usize {
        (n_points as f64 * self.rate).floor() as usize
    }
}

/// Why the iteration loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The dataset had no points; nothing was run.
    EmptyInput,
    /// A round finished without any point changing cluster.
    Converged,
    /// The variance sum grew compared to the previous round. The state of the
    /// round that grew is reported as-is.
    VarianceRegressed,
    /// `max_iter` rounds were executed.
    MaxIterations,
}

/// A non-empty regular cluster of the final partition.
#[derive(Debug, Clone, PartialEq)]
pub struct TrimmedCluster {
    /// Cluster index in `0..n_clusters`, also its row in `centroids`.
    pub index: usize,
    /// Row indices of the member points, ascending.
    pub members: Vec<usize>,
    /// Final mean.
    pub mean: Vec<f64>,
    /// Sum of assignment distances of the last round.
    pub variance: f64,
}

/// Points moved out of the regular clusters. Has no mean and zero variance.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NoiseCluster {
    /// Row indices of the noise points, ascending.
    pub members: Vec<usize>,
}

/// Result of trimmed K-Means clustering.
#[derive(Debug, Clone)]
pub struct TrimmedKMeansResult<R: Runtime> {
    /// Final means [k, d], including slots of empty clusters.
    pub centroids: Tensor<R>,
    /// Cluster of each point [n] I64, [`NOISE_LABEL`] for noise.
    pub labels: Tensor<R>,
    /// Per-cluster variance sums [k].
    pub variances: Tensor<R>,
    /// Non-empty regular clusters, ordered by index.
    pub clusters: Vec<TrimmedCluster>,
    /// Noise cluster, present only when enabled and non-empty.
    pub noise: Option<NoiseCluster>,
    /// Threshold of the last round.
    pub threshold: f64,
    /// Number of assignment rounds executed.
    pub n_iter: usize,
    /// Why iteration stopped.
    pub stop_reason: StopReason,
}

impl<R: Runtime> TrimmedKMeansResult<R> {
    /// Number of non-empty regular clusters.
    pub fn n_clusters(&self) -> usize {
        self.clusters.len()
    }

    /// Number of points in the noise cluster.
    pub fn n_noise(&self) -> usize {
        self.noise.as_ref().map_or(0, |noise| noise.members.len())
    }

    /// Total variance sum over the regular clusters.
    pub fn variance_sum(&self) -> f64 {
        self.clusters.iter().map(|c| c.variance).sum()
    }
}

/// Reported once, after initial means have been chosen.
#[derive(Debug, Clone, Copy)]
pub struct RunInfo<'a> {
    pub n_points: usize,
    pub n_features: usize,
    pub n_clusters: usize,
    /// Threshold heap capacity, `floor(n_points * rate)`.
    pub heap_size: usize,
    /// Name of the initialization method.
    pub init: &'a str,
}

/// Reported after the assignment step of every round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationStats {
    /// Zero-based round index.
    pub iteration: usize,
    /// Points whose cluster changed in this round.
    pub n_changed: usize,
    /// Sum of assignment distances over all points.
    pub variance_sum: f64,
    /// Threshold derived from this round's distances.
    pub threshold: f64,
    /// Points at or above the threshold.
    pub n_trimmed: usize,
}

/// Reported once, when the result is assembled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub stop_reason: StopReason,
    pub n_iter: usize,
    /// Non-empty regular clusters.
    pub n_clusters: usize,
    pub n_noise: usize,
    pub variance_sum: f64,
}

/// Callbacks invoked at iteration boundaries.
pub trait TrimmedKMeansObserver {
    fn on_start(&mut self, _info: &RunInfo<'_>) {}

    fn on_iteration(&mut self, _stats: &IterationStats) {}

    fn on_finish(&mut self, _summary: &RunSummary) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl TrimmedKMeansObserver for NoopObserver {}

/// Forwards events to the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl TrimmedKMeansObserver for LogObserver {
    fn on_start(&mut self, info: &RunInfo<'_>) {
        log::debug!(
            "trimmed_kmeans: n={} d={} k={} heap_size={} init={}",
            info.n_points,
            info.n_features,
            info.n_clusters,
            info.heap_size,
            info.init
        );
    }

    fn on_iteration(&mut self, stats: &IterationStats) {
        log::trace!(
            "trimmed_kmeans iteration {}: changed={} variance_sum={:.6} threshold={:.6} trimmed={}",
            stats.iteration,
            stats.n_changed,
            stats.variance_sum,
            stats.threshold,
            stats.n_trimmed
        );
    }

    fn on_finish(&mut self, summary: &RunSummary) {
        log::debug!(
            "trimmed_kmeans finished: {:?} after {} iterations, {} clusters, {} noise points",
            summary.stop_reason,
            summary.n_iter,
            summary.n_clusters,
            summary.n_noise
        );
    }
}

/// Records every iteration.
#[derive(Debug, Clone, Default)]
pub struct IterationHistory {
    pub iterations: Vec<IterationStats>,
    pub summary: Option<RunSummary>,
}

impl TrimmedKMeansObserver for IterationHistory {
    fn on_iteration(&mut self, stats: &IterationStats) {
        self.iterations.push(*stats);
    }

    fn on_finish(&mut self, summary: &RunSummary) {
        self.summary = Some(*summary);
    }
}

/// Trimmed K-Means clustering algorithms.
pub trait TrimmedKMeansAlgorithms<R: Runtime> {
    /// Fit trimmed K-Means clustering to data [n, d].
    fn trimmed_kmeans(
        &self,
        data: &Tensor<R>,
        options: &TrimmedKMeansOptions<R>,
    ) -> Result<TrimmedKMeansResult<R>> {
        self.trimmed_kmeans_observed(data, options, &mut NoopObserver)
    }

    /// Fit trimmed K-Means, reporting progress to `observer`.
    fn trimmed_kmeans_observed(
        &self,
        data: &Tensor<R>,
        options: &TrimmedKMeansOptions<R>,
        observer: &mut dyn TrimmedKMeansObserver,
    ) -> Result<TrimmedKMeansResult<R>>;

    /// Label new data [m, d] with the nearest of `centroids` [k, d].
    ///
    /// With `noise_threshold`, points whose nearest distance is at or above
    /// it are labelled [`NOISE_LABEL`].
    fn trimmed_kmeans_predict(
        &self,
        centroids: &Tensor<R>,
        data: &Tensor<R>,
        metric: DistanceMetric,
        noise_threshold: Option<f64>,
    ) -> Result<Tensor<R>>;
}
