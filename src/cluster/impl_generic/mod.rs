//! Generic clustering algorithm implementations.

pub mod initialization;
pub mod threshold_heap;
pub mod trimmed_kmeans;

pub use initialization::{choose_initial_means, kmeans_plusplus_means, random_means};
pub use threshold_heap::{NO_TRIM_THRESHOLD, ThresholdHeap};
pub use trimmed_kmeans::{trimmed_kmeans_impl, trimmed_kmeans_predict_impl};
