//! Finite difference method for the 1D wave equation with periodic boundary data.
//!
//! The field lives on a ring of `n` samples: the left neighbour of sample `0`
//! is sample `n - 1` and the right neighbour of sample `n - 1` is sample `0`.
//! A pulse leaving one edge re-enters at the other; there is no separate
//! boundary treatment.
//!
//! The kernels work on plain slices. [`Simulation`] owns the buffers, runs
//! the time loop and records the energy of every step.
pub mod config;
pub mod error;
pub mod report;
pub mod simulation;

pub use config::SimConfig;
pub use error::{Error, Result};
pub use report::EnergyReport;
pub use simulation::{run, run_to_end, simulate, Simulation};

/// Indices of the left and right neighbour of `i` on a ring of `n` samples.
///
/// This is the periodic boundary policy of the whole crate. Index arithmetic
/// never clamps.
#[inline]
pub fn periodic_neighbours(i: usize, n: usize) -> (usize, usize) {
    debug_assert!(i < n);
    let left = if i == 0 { n - 1 } else { i - 1 };
    let right = if i + 1 == n { 0 } else { i + 1 };
    (left, right)
}

/// Discrete second derivative with unit spacing, `d2[i] = v[i+1] - 2 v[i] + v[i-1]`.
pub fn second_derivative(v: &[f64], d2: &mut [f64]) {
    assert_eq!(v.len(), d2.len());
    let n = v.len();
    for i in 0..n {
        let (l, r) = periodic_neighbours(i, n);
        d2[i] = v[r] - 2. * v[i] + v[l];
    }
}

/// Sum of squares of the field values.
pub fn energy(field: &[f64]) -> f64 {
    field.iter().map(|x| x * x).sum()
}

fn wave_step_sub(u: &[f64], v: &[f64], w: &mut [f64], range: (usize, usize), mu: f64) {
    let (rs, re) = range;
    let n = v.len();
    debug_assert!(rs <= re);
    debug_assert!(re <= n);
    debug_assert_eq!(u.len(), n);
    debug_assert_eq!(w.len(), re - rs);

    for i in rs..re {
        let (l, r) = periodic_neighbours(i, n);
        w[i - rs] = 2. * v[i] - u[i] + mu * (v[r] - 2. * v[i] + v[l]);
    }
}

/// Performs one step of the finite difference scheme for the wave equation with periodic
/// boundary condition.
///
/// The discretization is the standard central 2nd order difference in both space and time.
///
/// - `u`: value at step `n - 1`
/// - `v`: value at step `n`
/// - `w`: computed value at step `n + 1`
/// - `mu`: τ²c²/h², where τ is the time step, h is the space step and c the wave speed
pub fn wave_step(u: &[f64], v: &[f64], w: &mut [f64], mu: f64) {
    let n = v.len();
    assert_eq!(u.len(), n);
    assert_eq!(w.len(), n);

    wave_step_sub(u, v, w, (0, n), mu);
}

/// Same as `wave_step`, splitting the output between rayon workers.
///
/// Every sample only reads the previous two fields, so the result is
/// bit-identical to `wave_step`. Below the split threshold it runs serially.
#[cfg(feature = "rayon")]
pub fn wave_step_parallel(u: &[f64], v: &[f64], w: &mut [f64], mu: f64) {
    let n = v.len();
    assert_eq!(u.len(), n);
    assert_eq!(w.len(), n);

    fn inner(u: &[f64], v: &[f64], w: &mut [f64], range: (usize, usize), mu: f64) {
        let elems_per_thread = 64 * 1024;
        let (start, end) = range;
        if w.len() > elems_per_thread {
            let mid = (start + end) / 2;
            let (left, right) = w.split_at_mut(mid - start);
            rayon::join(|| inner(u, v, left, (start, mid), mu),
                        || inner(u, v, right, (mid, end), mu));
        } else {
            wave_step_sub(u, v, w, range, mu);
        }
    }

    inner(u, v, w, (0, n), mu);
}

#[cfg(test)]
mod test {
    use super::*;
    use ndarray::{Array, Array1};
    use ndarray_rand::rand_distr::Uniform;
    use ndarray_rand::RandomExt;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Reference implementation built from `roll`-style shifted copies.
    fn wave_step_reference(u: &Array1<f64>, v: &Array1<f64>, mu: f64) -> Array1<f64> {
        let n = v.len();
        let right = Array::from_shape_fn(n, |i| v[(i + 1) % n]);
        let left = Array::from_shape_fn(n, |i| v[(i + n - 1) % n]);
        let d2 = &right - &(v * 2.) + &left;
        &(v * 2.) - u + &(d2 * mu)
    }

    fn test_len(n: usize) {
        let mut rng = StdRng::seed_from_u64(n as u64);
        let mu = 0.81;
        let u = Array::random_using(n, Uniform::new(0., 1.), &mut rng);
        let v = Array::random_using(n, Uniform::new(0., 1.), &mut rng);
        let w_ref = wave_step_reference(&u, &v, mu);

        let mut w = Array1::<f64>::zeros(n);
        wave_step(u.as_slice().unwrap(),
                  v.as_slice().unwrap(),
                  w.as_slice_mut().unwrap(),
                  mu);

        let d = &w - &w_ref;
        let err = (&d * &d).sum();
        if err > 1e-20 {
            println!("{}\n", w);
            println!("{}\n", w_ref);
            panic!("Error too big: {}", err);
        }
    }

    #[test]
    fn test_equal() {
        test_len(1);
        test_len(2);
        test_len(3);
        test_len(20);
        test_len(401);
        test_len(300_000);
    }

    #[test]
    fn neighbours_wrap_around() {
        assert_eq!(periodic_neighbours(0, 5), (4, 1));
        assert_eq!(periodic_neighbours(4, 5), (3, 0));
        assert_eq!(periodic_neighbours(2, 5), (1, 3));
        assert_eq!(periodic_neighbours(0, 1), (0, 0));
        assert_eq!(periodic_neighbours(1, 2), (0, 0));
    }

    #[test]
    fn second_derivative_of_constant_is_zero() {
        let v = [3.5; 7];
        let mut d2 = [1.; 7];
        second_derivative(&v, &mut d2);
        assert!(d2.iter().all(|&x| x == 0.));
    }

    #[test]
    fn second_derivative_of_spike() {
        let v = [0., 0., 1., 0., 0.];
        let mut d2 = [0.; 5];
        second_derivative(&v, &mut d2);
        assert_eq!(d2, [0., 1., -2., 1., 0.]);

        // spike on the edge spills over to the other side
        let v = [1., 0., 0., 0., 0.];
        second_derivative(&v, &mut d2);
        assert_eq!(d2, [-2., 1., 0., 0., 1.]);
    }

    #[test]
    fn wave_step_matches_second_derivative() {
        let u = [0.1, 0.4, 0.2, 0.9];
        let v = [0.3, 0.8, 0.5, 0.6];
        let mu = 0.25;
        let mut d2 = [0.; 4];
        second_derivative(&v, &mut d2);
        let mut w = [0.; 4];
        wave_step(&u, &v, &mut w, mu);
        for i in 0..4 {
            assert_eq!(w[i], 2. * v[i] - u[i] + mu * d2[i]);
        }
    }

    #[test]
    fn energy_is_sum_of_squares() {
        assert_eq!(energy(&[]), 0.);
        assert_eq!(energy(&[1., -2., 3.]), 14.);
    }

    #[test]
    #[should_panic]
    fn wave_step_rejects_mismatched_lengths() {
        let mut w = [0.; 3];
        wave_step(&[0.; 3], &[0.; 4], &mut w, 1.);
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn parallel_is_bit_identical() {
        for &n in &[1, 5, 64 * 1024 + 1, 300_001] {
            let mut rng = StdRng::seed_from_u64(7);
            let u = Array::random_using(n, Uniform::new(-1., 1.), &mut rng);
            let v = Array::random_using(n, Uniform::new(-1., 1.), &mut rng);
            let mut w = Array1::<f64>::zeros(n);
            let mut w_par = Array1::<f64>::zeros(n);
            wave_step(u.as_slice().unwrap(), v.as_slice().unwrap(), w.as_slice_mut().unwrap(), 1.);
            wave_step_parallel(u.as_slice().unwrap(),
                               v.as_slice().unwrap(),
                               w_par.as_slice_mut().unwrap(),
                               1.);
            assert_eq!(w, w_par);
        }
    }
}
