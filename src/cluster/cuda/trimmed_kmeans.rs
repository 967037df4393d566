//! CUDA implementation of trimmed K-Means clustering.

use crate::cluster::impl_generic::{trimmed_kmeans_impl, trimmed_kmeans_predict_impl};
use crate::cluster::traits::trimmed_kmeans::{
    TrimmedKMeansAlgorithms, TrimmedKMeansObserver, TrimmedKMeansOptions, TrimmedKMeansResult,
};
use numr::error::Result;
use numr::ops::DistanceMetric;
use numr::runtime::cuda::{CudaClient, CudaRuntime};
use numr::tensor::Tensor;

impl TrimmedKMeansAlgorithms<CudaRuntime> for CudaClient {
    fn trimmed_kmeans_observed(
        &self,
        data: &Tensor<CudaRuntime>,
        options: &TrimmedKMeansOptions<CudaRuntime>,
        observer: &mut dyn TrimmedKMeansObserver,
    ) -> Result<TrimmedKMeansResult<CudaRuntime>> {
        trimmed_kmeans_impl(self, data, options, observer)
    }

    fn trimmed_kmeans_predict(
        &self,
        centroids: &Tensor<CudaRuntime>,
        data: &Tensor<CudaRuntime>,
        metric: DistanceMetric,
        noise_threshold: Option<f64>,
    ) -> Result<Tensor<CudaRuntime>> {
        trimmed_kmeans_predict_impl(self, centroids, data, metric, noise_threshold)
    }
}
