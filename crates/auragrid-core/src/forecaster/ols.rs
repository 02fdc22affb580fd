//! Least squares on the normal equations.

/// Diagonal loading that keeps the system positive definite when a feature
/// column is constant or collinear.
const RIDGE: f64 = 1e-8;

/// Solves `min ||X b - y||` for the coefficients `b`, one per column of `rows`.
pub(crate) fn fit_least_squares(rows: &[Vec<f64>], y: &[f64]) -> Option<Vec<f64>> {
    let num_params = rows.first().map(Vec::len)?;
    if num_params == 0 || rows.len() != y.len() {
        return None;
    }

    let mut xtx = vec![vec![0.0; num_params]; num_params];
    let mut xty = vec![0.0; num_params];

    for (row, &target) in rows.iter().zip(y) {
        if row.len() != num_params {
            return None;
        }
        for i in 0..num_params {
            xty[i] += row[i] * target;
            for j in i..num_params {
                xtx[i][j] += row[i] * row[j];
            }
        }
    }

    for i in 0..num_params {
        for j in 0..i {
            xtx[i][j] = xtx[j][i];
        }
        xtx[i][i] += RIDGE;
    }

    solve_symmetric(&xtx, &xty)
}

/// Solves `A x = b` for symmetric positive definite `A` by Cholesky decomposition.
fn solve_symmetric(a: &[Vec<f64>], b: &[f64]) -> Option<Vec<f64>> {
    let n = b.len();
    if n == 0 || a.len() != n {
        return None;
    }

    // A = L L^T
    let mut l = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in 0..=i {
            let mut sum = a[i][j];
            for k in 0..j {
                sum -= l[i][k] * l[j][k];
            }
            if i == j {
                if sum <= 0.0 || !sum.is_finite() {
                    return None;
                }
                l[i][i] = sum.sqrt();
            } else {
                l[i][j] = sum / l[j][j];
            }
        }
    }

    // L z = b
    let mut z = vec![0.0; n];
    for i in 0..n {
        let mut sum = b[i];
        for k in 0..i {
            sum -= l[i][k] * z[k];
        }
        z[i] = sum / l[i][i];
    }

    // L^T x = z
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = z[i];
        for k in (i + 1)..n {
            sum -= l[k][i] * x[k];
        }
        x[i] = sum / l[i][i];
    }

    Some(x)
}
