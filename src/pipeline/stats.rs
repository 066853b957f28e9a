//! Statistical primitives: correlation, one-way ANOVA, and KS goodness-of-fit
//!
//! These are the numeric kernels behind the hypothesis battery. They return
//! `Option` on degenerate inputs (zero variance, empty groups) and leave the
//! skip-vs-fallback policy to the caller.

use statrs::distribution::{ContinuousCDF, FisherSnedecor, Normal, StudentsT};

/// Pearson correlation with its two-sided p-value.
#[derive(Debug, Clone, Copy)]
pub struct PearsonResult {
    pub r: f64,
    pub p_value: f64,
    pub n: usize,
}

/// One-way analysis of variance across two or more groups.
#[derive(Debug, Clone, Copy)]
pub struct AnovaResult {
    pub f_statistic: f64,
    pub p_value: f64,
    pub df_between: usize,
    pub df_within: usize,
}

/// One-sample Kolmogorov-Smirnov result.
#[derive(Debug, Clone, Copy)]
pub struct KsResult {
    pub statistic: f64,
    pub p_value: f64,
}

pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return f64::NAN;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Sample standard deviation (n - 1 denominator).
pub fn std_dev(xs: &[f64]) -> f64 {
    if xs.len() < 2 {
        return f64::NAN;
    }
    let m = mean(xs);
    let ss: f64 = xs.iter().map(|x| (x - m) * (x - m)).sum();
    (ss / (xs.len() - 1) as f64).sqrt()
}

/// Subtract the mean and divide by the sample standard deviation.
///
/// Returns `None` when the input has fewer than 2 values or zero variance.
pub fn standardize(xs: &[f64]) -> Option<Vec<f64>> {
    let m = mean(xs);
    let s = std_dev(xs);
    if !s.is_finite() || s == 0.0 {
        return None;
    }
    Some(xs.iter().map(|x| (x - m) / s).collect())
}

/// Percentile via linear interpolation over a pre-sorted slice, `p` in [0, 1].
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let rank = p.clamp(0.0, 1.0) * (n - 1) as f64;
            let lo = rank.floor() as usize;
            let hi = rank.ceil() as usize;
            let frac = rank - lo as f64;
            sorted[lo] + (sorted[hi] - sorted[lo]) * frac
        }
    }
}

/// Pearson correlation coefficient with a two-sided p-value from the
/// Student's t distribution with n - 2 degrees of freedom.
///
/// Uses a single-pass Welford algorithm for numerical stability. Returns
/// `None` when fewer than 3 paired values are available or either series
/// has zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<PearsonResult> {
    let n = x.len();
    if n < 3 || n != y.len() {
        return None;
    }

    let mut count = 0.0;
    let mut mean_x = 0.0;
    let mut mean_y = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    let mut cov_xy = 0.0;

    for (&xv, &yv) in x.iter().zip(y.iter()) {
        count += 1.0;
        let dx = xv - mean_x;
        let dy = yv - mean_y;
        mean_x += dx / count;
        mean_y += dy / count;
        var_x += dx * (xv - mean_x);
        var_y += dy * (yv - mean_y);
        cov_xy += dx * (yv - mean_y);
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }

    let r = (cov_xy / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0);

    let df = (n - 2) as f64;
    let p_value = if (1.0 - r * r) <= f64::EPSILON {
        // Perfectly collinear series saturate the t statistic
        0.0
    } else {
        let t = r * (df / (1.0 - r * r)).sqrt();
        let dist = StudentsT::new(0.0, 1.0, df).ok()?;
        2.0 * (1.0 - dist.cdf(t.abs()))
    };

    Some(PearsonResult { r, p_value, n })
}

/// One-way ANOVA across the given groups.
///
/// Returns `None` when fewer than 2 groups are supplied, any group is
/// empty, or there are no within-group degrees of freedom. A zero
/// within-group sum of squares (identical values inside every group with
/// differing means) yields an infinite F and p = 0.
pub fn one_way_anova(groups: &[Vec<f64>]) -> Option<AnovaResult> {
    let k = groups.len();
    if k < 2 || groups.iter().any(|g| g.is_empty()) {
        return None;
    }

    let total: usize = groups.iter().map(|g| g.len()).sum();
    let df_between = k - 1;
    let df_within = total.checked_sub(k)?;
    if df_within == 0 {
        return None;
    }

    let grand_mean = groups.iter().flatten().sum::<f64>() / total as f64;

    let mut ss_between = 0.0;
    let mut ss_within = 0.0;
    for group in groups {
        let gm = mean(group);
        ss_between += group.len() as f64 * (gm - grand_mean) * (gm - grand_mean);
        ss_within += group.iter().map(|x| (x - gm) * (x - gm)).sum::<f64>();
    }

    let ms_between = ss_between / df_between as f64;
    let ms_within = ss_within / df_within as f64;

    let (f_statistic, p_value) = if ms_within == 0.0 {
        if ms_between == 0.0 {
            (0.0, 1.0)
        } else {
            (f64::INFINITY, 0.0)
        }
    } else {
        let f = ms_between / ms_within;
        let dist = FisherSnedecor::new(df_between as f64, df_within as f64).ok()?;
        (f, 1.0 - dist.cdf(f))
    };

    Some(AnovaResult {
        f_statistic,
        p_value,
        df_between,
        df_within,
    })
}

/// One-sample Kolmogorov-Smirnov test of an already-standardized sample
/// against the standard normal distribution.
///
/// The p-value uses the asymptotic Kolmogorov series with the Stephens
/// small-sample correction, matching common statistical tooling.
pub fn ks_test_standard_normal(xs: &[f64]) -> Option<KsResult> {
    let n = xs.len();
    if n == 0 {
        return None;
    }

    let mut sorted = xs.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let normal = Normal::new(0.0, 1.0).ok()?;
    let nf = n as f64;

    let mut d = 0.0f64;
    for (i, &x) in sorted.iter().enumerate() {
        let cdf = normal.cdf(x);
        let d_plus = (i + 1) as f64 / nf - cdf;
        let d_minus = cdf - i as f64 / nf;
        d = d.max(d_plus).max(d_minus);
    }

    let sqrt_n = nf.sqrt();
    let lambda = (sqrt_n + 0.12 + 0.11 / sqrt_n) * d;

    Some(KsResult {
        statistic: d,
        p_value: kolmogorov_survival(lambda),
    })
}

/// Survival function of the Kolmogorov distribution, Q(lambda).
fn kolmogorov_survival(lambda: f64) -> f64 {
    if lambda <= 0.0 {
        return 1.0;
    }

    let mut sum = 0.0;
    let mut sign = 1.0;
    for k in 1..=100 {
        let kf = k as f64;
        let term = (-2.0 * kf * kf * lambda * lambda).exp();
        sum += sign * term;
        sign = -sign;
        if term < 1e-12 {
            break;
        }
    }

    (2.0 * sum).clamp(0.0, 1.0)
}
