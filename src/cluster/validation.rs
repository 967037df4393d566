//! Validation helpers for clustering algorithms.

use numr::dtype::DType;
use numr::error::{Error, Result};

/// Validate point set dtype (must be F32 or F64).
pub fn validate_cluster_dtype(dtype: DType, op: &'static str) -> Result<()> {
    match dtype {
        DType::F32 | DType::F64 => Ok(()),
        _ => Err(Error::UnsupportedDType { dtype, op }),
    }
}

/// Validate that data is 2D [n, d]. An empty point set is allowed.
pub fn validate_data_2d(shape: &[usize], op: &'static str) -> Result<()> {
    if shape.len() != 2 {
        return Err(Error::InvalidArgument {
            arg: "data",
            reason: format!("{op} requires 2D data [n, d], got {}-D", shape.len()),
        });
    }
    Ok(())
}

/// Validate n_clusters parameter.
pub fn validate_n_clusters(n_clusters: usize, op: &'static str) -> Result<()> {
    if n_clusters == 0 {
        return Err(Error::InvalidArgument {
            arg: "n_clusters",
            reason: format!("{op} requires n_clusters > 0"),
        });
    }
    Ok(())
}

/// Validate that `k` means can be drawn from `n_points` distinct rows.
pub fn validate_sample_count(k: usize, n_points: usize, op: &'static str) -> Result<()> {
    if k > n_points {
        return Err(Error::InvalidArgument {
            arg: "n_clusters",
            reason: format!("{op}: n_clusters={k} exceeds number of points {n_points}"),
        });
    }
    Ok(())
}

/// Validate the trimming rate (finite, in [0, 1)).
pub fn validate_rate(rate: f64, op: &'static str) -> Result<()> {
    if !rate.is_finite() || !(0.0..1.0).contains(&rate) {
        return Err(Error::InvalidArgument {
            arg: "rate",
            reason: format!("{op} requires rate in [0, 1), got {rate}"),
        });
    }
    Ok(())
}

/// Validate user-provided initial means are shaped [k, d].
pub fn validate_init_points(
    shape: &[usize],
    k: usize,
    n_features: usize,
    op: &'static str,
) -> Result<()> {
    if shape != [k, n_features] {
        return Err(Error::InvalidArgument {
            arg: "init",
            reason: format!(
                "{op}: initial points shape {shape:?} doesn't match [{k}, {n_features}]"
            ),
        });
    }
    Ok(())
}

/// Validate that data has the same number of features as the centroids.
pub fn validate_feature_count(expected: usize, got: usize, op: &'static str) -> Result<()> {
    if expected != got {
        return Err(Error::InvalidArgument {
            arg: "data",
            reason: format!("{op}: data has {got} features, centroids have {expected}"),
        });
    }
    Ok(())
}
