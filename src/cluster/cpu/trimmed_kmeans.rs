//! CPU implementation of trimmed K-Means clustering.

use crate::cluster::impl_generic::{trimmed_kmeans_impl, trimmed_kmeans_predict_impl};
use crate::cluster::traits::trimmed_kmeans::{
    TrimmedKMeansAlgorithms, TrimmedKMeansObserver, TrimmedKMeansOptions, TrimmedKMeansResult,
};
use numr::error::Result;
use numr::ops::DistanceMetric;
use numr::runtime::cpu::{CpuClient, CpuRuntime};
use numr::tensor::Tensor;

impl TrimmedKMeansAlgorithms<CpuRuntime> for CpuClient {
    fn trimmed_kmeans_observed(
        &self,
        data: &Tensor<CpuRuntime>,
        options: &TrimmedKMeansOptions<CpuRuntime>,
        observer: &mut dyn TrimmedKMeansObserver,
    ) -> Result<TrimmedKMeansResult<CpuRuntime>> {
        trimmed_kmeans_impl(self, data, options, observer)
    }

    fn trimmed_kmeans_predict(
        &self,
        centroids: &Tensor<CpuRuntime>,
        data: &Tensor<CpuRuntime>,
        metric: DistanceMetric,
        noise_threshold: Option<f64>,
    ) -> Result<Tensor<CpuRuntime>> {
        trimmed_kmeans_predict_impl(self, centroids, data, metric, noise_threshold)
    }
}
