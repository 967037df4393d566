//! WebGPU implementation of trimmed K-Means clustering.

use crate::cluster::impl_generic::{trimmed_kmeans_impl, trimmed_kmeans_predict_impl};
use crate::cluster::traits::trimmed_kmeans::{
    TrimmedKMeansAlgorithms, TrimmedKMeansObserver, TrimmedKMeansOptions, TrimmedKMeansResult,
};
use numr::error::Result;
use numr::ops::DistanceMetric;
use numr::runtime::wgpu::{WgpuClient, WgpuRuntime};
use numr::tensor::Tensor;

impl TrimmedKMeansAlgorithms<WgpuRuntime> for WgpuClient {
    fn trimmed_kmeans_observed(
        &self,
        data: &Tensor<WgpuRuntime>,
        options: &TrimmedKMeansOptions<WgpuRuntime>,
        observer: &mut dyn TrimmedKMeansObserver,
    ) -> Result<TrimmedKMeansResult<WgpuRuntime>> {
        trimmed_kmeans_impl(self, data, options, observer)
    }

    fn trimmed_kmeans_predict(
        &self,
        centroids: &Tensor<WgpuRuntime>,
        data: &Tensor<WgpuRuntime>,
        metric: DistanceMetric,
        noise_threshold: Option<f64>,
    ) -> Result<Tensor<WgpuRuntime>> {
        trimmed_kmeans_predict_impl(self, centroids, data, metric, noise_threshold)
    }
}
