//! Initial mean selection for trimmed K-Means.

use crate::cluster::traits::trimmed_kmeans::TrimmedKMeansInit;
use crate::cluster::validation::{validate_init_points, validate_sample_count};
use numr::error::Result;
use numr::ops::{
    CompareOps, CumulativeOps, DistanceMetric, DistanceOps, IndexingOps, RandomOps, ReduceOps,
    ScalarOps, ShapeOps, SortingOps, TensorOps, UnaryOps, UtilityOps,
};
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

/// K-Means++ seeding: each further mean is drawn with probability
/// proportional to the squared distance to the closest mean chosen so far.
pub fn kmeans_plusplus_means<R, C>(
    client: &C,
    data: &Tensor<R>,
    k: usize,
    metric: DistanceMetric,
) -> Result<Tensor<R>>
where
    R: Runtime,
    C: DistanceOps<R>
        + IndexingOps<R>
        + ReduceOps<R>
        + RandomOps<R>
        + ScalarOps<R>
        + TensorOps<R>
        + UnaryOps<R>
        + UtilityOps<R>
        + ShapeOps<R>
        + CompareOps<R>
        + CumulativeOps<R>
        + RuntimeClient<R>,
{
    let n = data.shape()[0];
    let device = data.device();
    let dtype = data.dtype();

    let rand_val = client.rand(&[1], dtype)?;
    let first_idx_f = client.mul_scalar(&rand_val, n as f64)?;
    let first_idx_val: f64 = first_idx_f.item()?;
    let first_idx = (first_idx_val as usize).min(n - 1);

    let idx_tensor = Tensor::<R>::from_slice(&[first_idx as i64], &[1], device);
    let mut means = client.index_select(data, 0, &idx_tensor)?;

    for _ in 1..k {
        let dists = client.cdist(data, &means, metric)?;
        let min_dists = client.min(&dists, &[1], false)?;
        let weights = match metric {
            DistanceMetric::SquaredEuclidean => min_dists,
            _ => client.mul(&min_dists, &min_dists)?,
        };
        let cum_weights = client.cumsum(&weights, 0)?;
        let total = cum_weights.narrow(0, n - 1, 1)?;
        let rand_val = client.rand(&[1], dtype)?;
        let target = client.mul(&rand_val, &total)?;
        // First index whose cumulative weight reaches the target
        let ge_mask = client.ge(&cum_weights, &target.reshape(&[1])?)?;
        let next_idx = client.argmax(&ge_mask, 0, false)?.reshape(&[1])?;

        let next_mean = client.index_select(data, 0, &next_idx)?;
        means = client.cat(&[&means, &next_mean], 0)?;
    }

    Ok(means)
}

/// Pick `k` distinct rows at random.
pub fn random_means<R, C>(client: &C, data: &Tensor<R>, k: usize) -> Result<Tensor<R>>
where
    R: Runtime,
    C: RandomOps<R> + SortingOps<R> + IndexingOps<R> + RuntimeClient<R>,
{
    let perm = client.randperm(data.shape()[0])?;
    let indices = perm.narrow(0, 0, k)?;
    client.index_select(data, 0, &indices)
}

/// Choose `k` initial means for `data` [n, d].
pub fn choose_initial_means<R, C>(
    client: &C,
    data: &Tensor<R>,
    init: &TrimmedKMeansInit<R>,
    k: usize,
    metric: DistanceMetric,
) -> Result<Tensor<R>>
where
    R: Runtime,
    C: DistanceOps<R>
        + IndexingOps<R>
        + ReduceOps<R>
        + RandomOps<R>
        + ScalarOps<R>
        + TensorOps<R>
        + UnaryOps<R>
        + UtilityOps<R>
        + ShapeOps<R>
        + CompareOps<R>
        + CumulativeOps<R>
        + SortingOps<R>
        + RuntimeClient<R>,
{
    let n = data.shape()[0];
    match init {
        TrimmedKMeansInit::KMeansPlusPlus => {
            validate_sample_count(k, n, "trimmed_kmeans")?;
            kmeans_plusplus_means(client, data, k, metric)
        }
        TrimmedKMeansInit::Random => {
            validate_sample_count(k, n, "trimmed_kmeans")?;
            random_means(client, data, k)
        }
        TrimmedKMeansInit::Points(points) => {
            validate_init_points(points.shape(), k, data.shape()[1], "trimmed_kmeans")?;
            if points.dtype() != data.dtype() {
                return Err(numr::error::Error::InvalidArgument {
                    arg: "init",
                    reason: format!(
                        "trimmed_kmeans: initial points dtype {:?} doesn't match data dtype {:?}",
                        points.dtype(),
                        data.dtype()
                    ),
                });
            }
            Ok(points.clone())
        }
    }
}
