//! Clustering algorithms.
//!
//! Outlier-tolerant partitional clustering with full backend support (CPU,
//! CUDA, WebGPU).

mod cpu;
pub mod impl_generic;
pub mod traits;
mod validation;

#[cfg(feature = "cuda")]
mod cuda;
#[cfg(feature = "wgpu")]
mod wgpu;

pub use impl_generic::{NO_TRIM_THRESHOLD, ThresholdHeap};
pub use traits::trimmed_kmeans::{
    IterationHistory, IterationStats, LogObserver, NOISE_LABEL, NoiseCluster, NoopObserver,
    RunInfo, RunSummary, StopReason, TrimmedCluster, TrimmedKMeansAlgorithms, TrimmedKMeansInit,
    TrimmedKMeansObserver, TrimmedKMeansOptions, TrimmedKMeansResult,
};
pub use validation::*;
