//! trimcluster - Outlier-robust K-Means clustering
//!
//! trimcluster implements k-means--, a Lloyd-style K-Means that excludes the
//! points farthest from their nearest mean when recomputing means, and can
//! collect those points into a separate noise cluster. Built on numr's tensor
//! primitives, it works across all backends (CPU, CUDA, WebGPU).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                    trimcluster                           │
//! │   (trimmed K-Means, threshold heap, noise extraction)   │
//! └──────────────────────────┬──────────────────────────────┘
//!                            │ uses
//! ┌──────────────────────────▼──────────────────────────────┐
//! │                       numr                               │
//! │   (tensors, cdist, scatter_reduce, random, indexing)    │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`cluster`] - Trimmed K-Means, initialization, threshold heap, observers
//!
//! # Backend Support
//!
//! trimcluster is generic over numr's `Runtime` trait. The same code works on:
//! - CPU (with SIMD acceleration)
//! - CUDA (NVIDIA GPUs)
//! - WebGPU (cross-platform GPU)
//!
//! # Feature Flags
//!
//! | Feature | Description | Dependencies |
//! |---------|-------------|--------------|
//! | `cuda`  | Enable CUDA GPU acceleration | CUDA 12.x, numr/cuda |
//! | `wgpu`  | Enable WebGPU cross-platform GPU | numr/wgpu |
//!
//! ## Backend Limitations
//!
//! - **WebGPU**: Only supports F32 precision (no F64)
//! - **CUDA**: Requires CUDA 12.x toolkit installed
//!
//! # Example
//!
//! ```ignore
//! use trimcluster::{LogObserver, TrimmedKMeansAlgorithms, TrimmedKMeansOptions};
//! use numr::runtime::cpu::{CpuClient, CpuDevice};
//!
//! let device = CpuDevice::new();
//! let client = CpuClient::new(device.clone());
//!
//! let data = /* [n, d] F64 tensor */;
//! let options = TrimmedKMeansOptions {
//!     n_clusters: 3,
//!     rate: 0.05,
//!     noise: true,
//!     ..Default::default()
//! };
//! let result = client
//!     .trimmed_kmeans_observed(&data, &options, &mut LogObserver)
//!     .unwrap();
//! println!("{} clusters, {} noise points", result.n_clusters(), result.n_noise());
//! ```

pub mod cluster;

// Re-export main types for convenience
pub use cluster::{
    IterationHistory, IterationStats, LogObserver, NOISE_LABEL, NoiseCluster, NoopObserver,
    RunInfo, RunSummary, StopReason, TrimmedCluster, TrimmedKMeansAlgorithms, TrimmedKMeansInit,
    TrimmedKMeansObserver, TrimmedKMeansOptions, TrimmedKMeansResult,
};

// Re-export numr types for convenience
pub use numr::dtype::DType;
pub use numr::error::{Error, Result};
pub use numr::ops::DistanceMetric;
pub use numr::runtime::{Runtime, RuntimeClient};
pub use numr::tensor::Tensor;
