//! CPU implementations of clustering algorithms.

mod trimmed_kmeans;
