//! Generic trimmed K-Means (k-means--) implementation.
//!
//! Each round computes the [n, k] distance matrix with one `cdist` call and
//! reads it to the host, where the arg-min scan, the threshold heap and the
//! per-cluster member lists are maintained. Mean recomputation runs on device
//! with `scatter_reduce`, trimmed points being routed to an overflow row.

use super::initialization::choose_initial_means;
use super::threshold_heap::{NO_TRIM_THRESHOLD, ThresholdHeap};
use crate::cluster::traits::trimmed_kmeans::{
    IterationStats, NOISE_LABEL, NoiseCluster, RunInfo, RunSummary, StopReason, TrimmedCluster,
    TrimmedKMeansObserver, TrimmedKMeansOptions, TrimmedKMeansResult,
};
use crate::cluster::validation::{
    validate_cluster_dtype, validate_data_2d, validate_feature_count, validate_n_clusters,
};
use numr::dtype::DType;
use numr::error::Result;
use numr::ops::{
    CompareOps, ConditionalOps, CumulativeOps, DistanceMetric, DistanceOps, IndexingOps,
    RandomOps, ReduceOps, ScalarOps, ScatterReduceOp, ShapeOps, SortingOps, TensorOps, UnaryOps,
    UtilityOps,
};
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

/// Assignment of a point before the first round.
const UNASSIGNED: i64 = -1;

/// (assignment distance, point id) pairs of one cluster, in point order.
type MemberList = Vec<(f64, usize)>;

/// Read a float tensor to the host as f64.
fn to_host_f64<R: Runtime>(tensor: &Tensor<R>) -> Vec<f64> {
    match tensor.dtype() {
        DType::F32 => tensor
            .to_vec::<f32>()
            .into_iter()
            .map(f64::from)
            .collect(),
        _ => tensor.to_vec::<f64>(),
    }
}

/// Upload host values as a tensor of the given float dtype.
fn from_host_f64<R: Runtime>(
    values: &[f64],
    shape: &[usize],
    dtype: DType,
    device: &R::Device,
) -> Tensor<R> {
    match dtype {
        DType::F32 => {
            let narrowed: Vec<f32> = values.iter().map(|&v| v as f32).collect();
            Tensor::<R>::from_slice(&narrowed, shape, device)
        }
        _ => Tensor::<R>::from_slice(values, shape, device),
    }
}

/// Index and distance of the closest mean in one row of the distance matrix.
///
/// Keeps the first strictly smaller distance, so ties go to the lowest index
/// and NaN is never selected. A row without any comparable distance yields
/// `(0, +inf)`.
fn nearest_mean(row: &[f64]) -> (usize, f64) {
    let mut min_index = 0;
    let mut min_dist = f64::INFINITY;
    for (i, &dist) in row.iter().enumerate() {
        if dist < min_dist {
            min_index = i;
            min_dist = dist;
        }
    }
    (min_index, min_dist)
}

/// Assign every point to its nearest mean.
///
/// `dists` is the row-major [n, k] distance matrix. Member lists, variance
/// sums and the heap must have been cleared by the caller. Returns the number
/// of points whose assignment changed.
fn assign_to_nearest_cluster(
    dists: &[f64],
    members: &mut [MemberList],
    assignment: &mut [i64],
    var_sum: &mut [f64],
    heap: &mut ThresholdHeap,
) -> usize {
    let k = members.len();
    var_sum.fill(0.0);

    let mut n_changed = 0;
    for (id, row) in dists.chunks_exact(k).enumerate() {
        let (min_index, min_dist) = nearest_mean(row);

        heap.insert(min_dist);
        var_sum[min_index] += min_dist;
        members[min_index].push((min_dist, id));

        let label = min_index as i64;
        if assignment[id] != label {
            assignment[id] = label;
            n_changed += 1;
        }
    }
    n_changed
}

/// Number of members at or above `threshold`.
fn count_trimmed(members: &[MemberList], threshold: f64) -> usize {
    members
        .iter()
        .flatten()
        .filter(|&&(dist, _)| dist >= threshold)
        .count()
}

/// Recompute means from members strictly below `threshold`.
///
/// Clusters left without any included member keep their previous mean.
fn means_with_threshold<R, C>(
    client: &C,
    data: &Tensor<R>,
    members: &[MemberList],
    means: &Tensor<R>,
    threshold: f64,
) -> Result<Tensor<R>>
where
    R: Runtime,
    C: IndexingOps<R>
        + ReduceOps<R>
        + ScalarOps<R>
        + TensorOps<R>
        + ConditionalOps<R>
        + CompareOps<R>
        + ShapeOps<R>
        + UtilityOps<R>
        + RuntimeClient<R>,
{
    let n = data.shape()[0];
    let d = data.shape()[1];
    let k = members.len();
    let dtype = data.dtype();
    let device = data.device();

    // Trimmed points land in row k, which is dropped after the reduction
    let mut bucket = vec![k as i64; n];
    let mut counts = vec![0.0; k];
    for (cluster, list) in members.iter().enumerate() {
        for &(dist, id) in list {
            if dist < threshold {
                bucket[id] = cluster as i64;
                counts[cluster] += 1.0;
            }
        }
    }

    let bucket = Tensor::<R>::from_slice(&bucket, &[n], device);
    let bucket_expanded = bucket.unsqueeze(1)?.broadcast_to(&[n, d])?;
    let dst = Tensor::<R>::zeros(&[k + 1, d], dtype, device);
    let sums = client.scatter_reduce(
        &dst,
        0,
        &bucket_expanded,
        data,
        ScatterReduceOp::Sum,
        false,
    )?;
    let sums = sums.narrow(0, 0, k)?.contiguous();

    let counts = from_host_f64::<R>(&counts, &[k], dtype, device);
    let zeros = Tensor::<R>::zeros(&[k], dtype, device);
    let ones = Tensor::<R>::ones(&[k], dtype, device);
    let is_zero = client.eq(&counts, &zeros)?;
    let safe_counts = client.where_cond(&is_zero, &ones, &counts)?;
    let safe_counts_expanded = safe_counts.unsqueeze(1)?.broadcast_to(&[k, d])?;
    let new_means = client.div(&sums, &safe_counts_expanded)?;

    let is_zero_expanded = is_zero.unsqueeze(1)?.broadcast_to(&[k, d])?;
    client.where_cond(&is_zero_expanded, means, &new_means)
}

/// Move members at or above `threshold` out of their clusters and relabel
/// them as noise. Returns the moved ids, ascending.
fn extract_noise(
    members: &mut [MemberList],
    assignment: &mut [i64],
    threshold: f64,
) -> Vec<usize> {
    let mut noise = Vec::new();
    for list in members.iter_mut() {
        list.retain(|&(dist, id)| {
            if dist >= threshold {
                noise.push(id);
                false
            } else {
                true
            }
        });
    }
    for &id in &noise {
        assignment[id] = NOISE_LABEL;
    }
    noise.sort_unstable();
    noise
}

fn empty_result<R: Runtime>(
    n_features: usize,
    dtype: DType,
    device: &R::Device,
) -> TrimmedKMeansResult<R> {
    TrimmedKMeansResult {
        centroids: Tensor::<R>::zeros(&[0, n_features], dtype, device),
        labels: Tensor::<R>::zeros(&[0], DType::I64, device),
        variances: Tensor::<R>::zeros(&[0], dtype, device),
        clusters: Vec::new(),
        noise: None,
        threshold: NO_TRIM_THRESHOLD,
        n_iter: 0,
        stop_reason: StopReason::EmptyInput,
    }
}

/// Generic trimmed K-Means implementation.
pub fn trimmed_kmeans_impl<R, C>(
    client: &C,
    data: &Tensor<R>,
    options: &TrimmedKMeansOptions<R>,
    observer: &mut dyn TrimmedKMeansObserver,
) -> Result<TrimmedKMeansResult<R>>
where
    R: Runtime,
    C: DistanceOps<R>
        + IndexingOps<R>
        + ReduceOps<R>
        + ScalarOps<R>
        + TensorOps<R>
        + UnaryOps<R>
        + CumulativeOps<R>
        + ConditionalOps<R>
        + CompareOps<R>
        + RandomOps<R>
        + SortingOps<R>
        + ShapeOps<R>
        + UtilityOps<R>
        + RuntimeClient<R>,
{
    validate_cluster_dtype(data.dtype(), "trimmed_kmeans")?;
    validate_data_2d(data.shape(), "trimmed_kmeans")?;
    options.validate()?;

    let n = data.shape()[0];
    let d = data.shape()[1];
    let k = options.n_clusters;
    let dtype = data.dtype();
    let device = data.device();

    if n == 0 {
        let result = empty_result::<R>(d, dtype, device);
        observer.on_finish(&RunSummary {
            stop_reason: result.stop_reason,
            n_iter: 0,
            n_clusters: 0,
            n_noise: 0,
            variance_sum: 0.0,
        });
        return Ok(result);
    }

    let mut means = choose_initial_means(client, data, &options.init, k, options.metric)?;
    let heap_size = options.heap_size(n);
    observer.on_start(&RunInfo {
        n_points: n,
        n_features: d,
        n_clusters: k,
        heap_size,
        init: options.init.name(),
    });

    let mut heap = ThresholdHeap::new(heap_size);
    let mut members: Vec<MemberList> = (0..k).map(|_| Vec::with_capacity(2 * n / k)).collect();
    let mut assignment = vec![UNASSIGNED; n];
    let mut var_sum = vec![0.0; k];

    let mut old_var_sum = f64::INFINITY;
    let mut threshold = NO_TRIM_THRESHOLD;
    let mut n_iter = 0;
    let mut stop_reason = StopReason::MaxIterations;

    while options.max_iter == 0 || n_iter < options.max_iter {
        heap.clear();
        members.iter_mut().for_each(Vec::clear);

        let dists = to_host_f64(&client.cdist(data, &means, options.metric)?);
        let n_changed = assign_to_nearest_cluster(
            &dists,
            &mut members,
            &mut assignment,
            &mut var_sum,
            &mut heap,
        );
        let new_var_sum: f64 = var_sum.iter().sum();
        threshold = heap.peek().unwrap_or(NO_TRIM_THRESHOLD);

        observer.on_iteration(&IterationStats {
            iteration: n_iter,
            n_changed,
            variance_sum: new_var_sum,
            threshold,
            n_trimmed: count_trimmed(&members, threshold),
        });
        n_iter += 1;

        if n_changed == 0 {
            stop_reason = StopReason::Converged;
            break;
        }
        // No rollback: the grown state is what gets reported
        if new_var_sum > old_var_sum {
            stop_reason = StopReason::VarianceRegressed;
            break;
        }

        means = means_with_threshold(client, data, &members, &means, threshold)?;
        old_var_sum = new_var_sum;
    }

    let noise = if options.noise {
        let ids = extract_noise(&mut members, &mut assignment, threshold);
        (!ids.is_empty()).then_some(NoiseCluster { members: ids })
    } else {
        None
    };

    let means = means.contiguous();
    let host_means = to_host_f64(&means);
    let clusters: Vec<TrimmedCluster> = members
        .iter()
        .enumerate()
        .filter(|(_, list)| !list.is_empty())
        .map(|(index, list)| TrimmedCluster {
            index,
            members: list.iter().map(|&(_, id)| id).collect(),
            mean: host_means[index * d..(index + 1) * d].to_vec(),
            variance: var_sum[index],
        })
        .collect();

    let result = TrimmedKMeansResult {
        centroids: means,
        labels: Tensor::<R>::from_slice(&assignment, &[n], device),
        variances: from_host_f64::<R>(&var_sum, &[k], dtype, device),
        clusters,
        noise,
        threshold,
        n_iter,
        stop_reason,
    };

    observer.on_finish(&RunSummary {
        stop_reason,
        n_iter,
        n_clusters: result.n_clusters(),
        n_noise: result.n_noise(),
        variance_sum: var_sum.iter().sum(),
    });

    Ok(result)
}

/// Label new data with its nearest centroid, optionally marking points at or
/// above `noise_threshold` as noise.
pub fn trimmed_kmeans_predict_impl<R, C>(
    client: &C,
    centroids: &Tensor<R>,
    data: &Tensor<R>,
    metric: DistanceMetric,
    noise_threshold: Option<f64>,
) -> Result<Tensor<R>>
where
    R: Runtime,
    C: DistanceOps<R> + RuntimeClient<R>,
{
    validate_cluster_dtype(data.dtype(), "trimmed_kmeans_predict")?;
    validate_data_2d(data.shape(), "trimmed_kmeans_predict")?;
    validate_data_2d(centroids.shape(), "trimmed_kmeans_predict")?;
    validate_n_clusters(centroids.shape()[0], "trimmed_kmeans_predict")?;
    validate_feature_count(centroids.shape()[1], data.shape()[1], "trimmed_kmeans_predict")?;

    let m = data.shape()[0];
    let k = centroids.shape()[0];
    let device = data.device();
    if m == 0 {
        return Ok(Tensor::<R>::zeros(&[0], DType::I64, device));
    }

    let dists = to_host_f64(&client.cdist(data, centroids, metric)?);
    let labels: Vec<i64> = dists
        .chunks_exact(k)
        .map(|row| {
            let (index, dist) = nearest_mean(row);
            match noise_threshold {
                Some(t) if dist >= t => NOISE_LABEL,
                _ => index as i64,
            }
        })
        .collect();

    Ok(Tensor::<R>::from_slice(&labels, &[m], device))
}
