//! Platt sigmoid calibration
//!
//! Maps SVM decision values to probabilities with `P(y=1|f) = 1 / (1 + exp(A·f + B))`,
//! fitted by Newton's method with backtracking on smoothed targets
//! (Lin, Lin & Weng, 2007).

const MAX_ITER: usize = 100;
const MIN_STEP: f64 = 1e-10;
const SIGMA: f64 = 1e-12;
const TOLERANCE: f64 = 1e-5;

/// Fitted sigmoid parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlattSigmoid {
    pub a: f64,
    pub b: f64,
}

impl PlattSigmoid {
    /// Fit on decision values and binary ground truth.
    pub fn fit(decision: &[f64], positive: &[bool]) -> Self {
        let prior1 = positive.iter().filter(|p| **p).count() as f64;
        let prior0 = positive.len() as f64 - prior1;
        let hi = (prior1 + 1.0) / (prior1 + 2.0);
        let lo = 1.0 / (prior0 + 2.0);
        let targets: Vec<f64> = positive.iter().map(|&p| if p { hi } else { lo }).collect();

        let mut a = 0.0;
        let mut b = ((prior0 + 1.0) / (prior1 + 1.0)).ln();
        let mut fval = objective(decision, &targets, a, b);

        for _ in 0..MAX_ITER {
            let (mut h11, mut h22, mut h21) = (SIGMA, SIGMA, 0.0);
            let (mut g1, mut g2) = (0.0, 0.0);
            for (&f, &t) in decision.iter().zip(&targets) {
                let (p, q) = split(f * a + b);
                let d2 = p * q;
                h11 += f * f * d2;
                h22 += d2;
                h21 += f * d2;
                let d1 = t - p;
                g1 += f * d1;
                g2 += d1;
            }
            if g1.abs() < TOLERANCE && g2.abs() < TOLERANCE {
                break;
            }

            let det = h11 * h22 - h21 * h21;
            let da = -(h22 * g1 - h21 * g2) / det;
            let db = -(-h21 * g1 + h11 * g2) / det;
            let gd = g1 * da + g2 * db;

            let mut step = 1.0;
            while step >= MIN_STEP {
                let (na, nb) = (a + step * da, b + step * db);
                let nf = objective(decision, &targets, na, nb);
                if nf < fval + 1e-4 * step * gd {
                    a = na;
                    b = nb;
                    fval = nf;
                    break;
                }
                step /= 2.0;
            }
            if step < MIN_STEP {
                tracing::debug!("Platt line search did not converge");
                break;
            }
        }
        Self { a, b }
    }

    /// Probability of the positive class.
    pub fn probability(&self, decision: f64) -> f64 {
        split(decision * self.a + self.b).0
    }
}

/// `(p, 1 - p)` for `p = 1 / (1 + exp(x))`, evaluated without overflow.
fn split(x: f64) -> (f64, f64) {
    if x >= 0.0 {
        let e = (-x).exp();
        (e / (1.0 + e), 1.0 / (1.0 + e))
    } else {
        let e = x.exp();
        (1.0 / (1.0 + e), e / (1.0 + e))
    }
}

fn objective(decision: &[f64], targets: &[f64], a: f64, b: f64) -> f64 {
    decision
        .iter()
        .zip(targets)
        .map(|(&f, &t)| {
            let x = f * a + b;
            if x >= 0.0 {
                t * x + (-x).exp().ln_1p()
            } else {
                (t - 1.0) * x + x.exp().ln_1p()
            }
        })
        .sum()
}
