//! Real roots of polynomials up to degree four.
//!
//! The quartic is reduced to a depressed form and split into two quadratics
//! with Ferrari's method; the resolvent cubic is solved in closed form. Every
//! root is finished with a few Newton steps on the undepressed polynomial, which
//! recovers most of the precision lost in the reduction.

use std::f64::consts::PI;
use std::ops::Deref;

/// Coefficients smaller than this are treated as zero.
const EPSILON: f64 = 1e-12;

/// Newton iterations applied to each quartic root.
const POLISH_STEPS: usize = 4;

/// Up to four real roots, in no particular order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Roots {
    values: [f64; 4],
    len: usize,
}

impl Roots {
    /// No real roots.
    pub const NONE: Roots = Roots {
        values: [0.0; 4],
        len: 0,
    };

    fn push(&mut self, root: f64) {
        if self.len < self.values.len() && root.is_finite() {
            self.values[self.len] = root;
            self.len += 1;
        }
    }

    fn extend(&mut self, roots: Roots) {
        for &root in roots.iter() {
            self.push(root);
        }
    }
}

impl Deref for Roots {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.values[..self.len]
    }
}

/// Real roots of `a x + b`.
pub fn solve_linear(a: f64, b: f64) -> Roots {
    let mut roots = Roots::NONE;
    if a.abs() > EPSILON {
        roots.push(-b / a);
    }
    roots
}

/// Real roots of `a x^2 + b x + c`.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Roots {
    if a.abs() < EPSILON {
        return solve_linear(b, c);
    }

    let mut roots = Roots::NONE;
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return roots;
    }
    if discriminant == 0.0 {
        roots.push(-b / (2.0 * a));
        return roots;
    }

    // Avoid cancellation between -b and the square root
    let q = -0.5 * (b + b.signum() * discriminant.sqrt());
    roots.push(q / a);
    roots.push(c / q);
    roots
}

/// Real roots of `a x^3 + b x^2 + c x + d`.
pub fn solve_cubic(a: f64, b: f64, c: f64, d: f64) -> Roots {
    if a.abs() < EPSILON {
        return solve_quadratic(b, c, d);
    }
    solve_monic_cubic(b / a, c / a, d / a)
}

/// Real roots of `x^3 + a x^2 + b x + c`.
fn solve_monic_cubic(a: f64, b: f64, c: f64) -> Roots {
    let mut roots = Roots::NONE;
    let q = (a * a - 3.0 * b) / 9.0;
    let r = (2.0 * a * a * a - 9.0 * a * b + 27.0 * c) / 54.0;
    let shift = a / 3.0;

    let q3 = q * q * q;
    if r * r < q3 {
        // Three real roots
        let theta = (r / q3.sqrt()).clamp(-1.0, 1.0).acos();
        let scale = -2.0 * q.sqrt();
        roots.push(scale * (theta / 3.0).cos() - shift);
        roots.push(scale * ((theta + 2.0 * PI) / 3.0).cos() - shift);
        roots.push(scale * ((theta - 2.0 * PI) / 3.0).cos() - shift);
    } else {
        let big_a = -r.signum() * (r.abs() + (r * r - q3).sqrt()).cbrt();
        let big_b = if big_a != 0.0 { q / big_a } else { 0.0 };
        roots.push(big_a + big_b - shift);
    }
    roots
}

/// Real roots of `a x^4 + b x^3 + c x^2 + d x + e`.
///
/// Returns at most four roots in no particular order. Repeated roots may be
/// reported more than once.
pub fn solve_quartic(a: f64, b: f64, c: f64, d: f64, e: f64) -> Roots {
    if a.abs() < EPSILON {
        return solve_cubic(b, c, d, e);
    }

    let (b, c, d, e) = (b / a, c / a, d / a, e / a);

    // Depressed quartic y^4 + p y^2 + q y + r with x = y - b/4
    let shift = b / 4.0;
    let b2 = b * b;
    let p = c - 3.0 * b2 / 8.0;
    let q = d - b * c / 2.0 + b2 * b / 8.0;
    let r = e - b * d / 4.0 + b2 * c / 16.0 - 3.0 * b2 * b2 / 256.0;

    let mut depressed = Roots::NONE;
    if q.abs() < EPSILON {
        // Biquadratic: solve for y^2
        for &z in solve_quadratic(1.0, p, r).iter() {
            if z >= 0.0 {
                let y = z.sqrt();
                depressed.push(y);
                depressed.push(-y);
            }
        }
    } else {
        // Resolvent cubic m^3 + p m^2 + (p^2/4 - r) m - q^2/8 always has a
        // positive root when q != 0
        let resolvent = solve_monic_cubic(p, p * p / 4.0 - r, -q * q / 8.0);
        let m = resolvent.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if m <= 0.0 {
            return Roots::NONE;
        }
        let s = (2.0 * m).sqrt();
        let base = p / 2.0 + m;
        let skew = q / (2.0 * s);
        depressed.extend(solve_quadratic(1.0, s, base - skew));
        depressed.extend(solve_quadratic(1.0, -s, base + skew));
    }

    let mut roots = Roots::NONE;
    for &y in depressed.iter() {
        roots.push(polish(y - shift, [1.0, b, c, d, e]));
    }
    roots
}

/// Refine a quartic root with Newton's method.
fn polish(mut x: f64, coeffs: [f64; 5]) -> f64 {
    let [a, b, c, d, e] = coeffs;
    for _ in 0..POLISH_STEPS {
        let f = (((a * x + b) * x + c) * x + d) * x + e;
        let df = ((4.0 * a * x + 3.0 * b) * x + 2.0 * c) * x + d;
        if df.abs() < EPSILON {
            break;
        }
        let next = x - f / df;
        if !next.is_finite() {
            break;
        }
        x = next;
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(roots: Roots) -> Vec<f64> {
        let mut values = roots.to_vec();
        values.sort_by(|a, b| a.partial_cmp(b).unwrap());
        values
    }

    fn assert_roots(roots: Roots, expected: &[f64]) {
        let values = sorted(roots);
        assert_eq!(values.len(), expected.len(), "roots: {values:?}");
        for (got, want) in values.iter().zip(expected) {
            assert!((got - want).abs() < 1e-7, "got {got}, want {want}");
        }
    }

    #[test]
    fn test_quadratic() {
        assert_roots(solve_quadratic(1.0, -3.0, 2.0), &[1.0, 2.0]);
        assert_roots(solve_quadratic(1.0, 0.0, 1.0), &[]);
        assert_roots(solve_quadratic(0.0, 2.0, -4.0), &[2.0]);
    }

    #[test]
    fn test_cubic() {
        // (x - 1)(x - 2)(x - 3)
        assert_roots(solve_cubic(1.0, -6.0, 11.0, -6.0), &[1.0, 2.0, 3.0]);
        // x^3 + x + 1 has a single real root
        let roots = solve_cubic(1.0, 0.0, 1.0, 1.0);
        assert_eq!(roots.len(), 1);
        assert!((roots[0].powi(3) + roots[0] + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_quartic_four_distinct_roots() {
        // (t - 1)(t - 2)(t - 3)(t - 4)
        let roots = solve_quartic(1.0, -10.0, 35.0, -50.0, 24.0);
        assert_roots(roots, &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_quartic_scaled_leading_coefficient() {
        // 2 (t + 1)(t - 0.5)(t^2 + 1)
        let roots = solve_quartic(2.0, 1.0, 1.0, 1.0, -1.0);
        assert_roots(roots, &[-1.0, 0.5]);
    }

    #[test]
    fn test_quartic_biquadratic() {
        // t^4 - 5t^2 + 4 = (t^2 - 1)(t^2 - 4)
        let roots = solve_quartic(1.0, 0.0, -5.0, 0.0, 4.0);
        assert_roots(roots, &[-2.0, -1.0, 1.0, 2.0]);
    }

    #[test]
    fn test_quartic_no_real_roots() {
        assert!(solve_quartic(1.0, 0.0, 0.0, 0.0, 1.0).is_empty());
        assert!(solve_quartic(1.0, 0.0, 2.0, 0.0, 5.0).is_empty());
    }

    #[test]
    fn test_quartic_degenerates_to_cubic() {
        let roots = solve_quartic(0.0, 1.0, -6.0, 11.0, -6.0);
        assert_roots(roots, &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_quartic_general_case() {
        // (t - 1)(t - 2)(t - 3)(t - 5) has a non-zero cubic term after depression
        let roots = solve_quartic(1.0, -11.0, 41.0, -61.0, 30.0);
        assert_roots(roots, &[1.0, 2.0, 3.0, 5.0]);
    }

    #[test]
    fn test_quartic_torus_crossing() {
        // Ray from (5, 0, 0) along -X through a torus with R1 = 1, R2 = 0.25
        let roots = solve_quartic(1.0, -20.0, 147.875, -478.75, 572.75390625);
        assert_roots(roots, &[3.75, 4.25, 5.75, 6.25]);
    }
}
