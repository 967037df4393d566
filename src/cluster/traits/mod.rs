//! Clustering algorithm traits.

pub mod trimmed_kmeans;
