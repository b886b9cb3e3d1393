//! Per-cell kernels. Every function here works on the populations of a single cell and
//! has no knowledge of the grid.

use crate::prelude_crate::*;

/// Inverse squared sound speed in physical units, `3 dt² / dx²`.
pub fn cs_2_inv(delta_x: Float, delta_t: Float) -> Float {
    CS_2_INV * delta_t * delta_t / (delta_x * delta_x)
}

/// Second-order Maxwell-Boltzmann equilibrium written in terms of density and momentum:
///
/// $$ f\_{i}^{eq} = w\_{i} \left( \rho + \frac{\mathbf{c}\_{i} \cdot \mathbf{j}}{c\_{s}^{2}}
/// + \frac{(\mathbf{c}\_{i} \cdot \mathbf{j})^{2}}{2 \rho c\_{s}^{4}}
/// - \frac{\mathbf{j} \cdot \mathbf{j}}{2 \rho c\_{s}^{2}} \right) $$
///
/// `density` must be strictly positive.
pub(crate) fn equilibrium(
    f_eq: &mut [Float],
    density: Float,
    momentum: &[Float],
    cs_2_inv: Float,
    vel_set_params: &velocity_set::Parameters,
) {
    let c = vel_set_params.get_c();
    let w = vel_set_params.get_w();
    let cs_4_inv = cs_2_inv * cs_2_inv;
    let half_inv_density = 0.5 / density;
    let j_dot_j = momentum.iter().map(|j_x| j_x * j_x).sum::<Float>();
    f_eq.iter_mut().enumerate().for_each(|(i, f_eq_i)| {
        let j_dot_c = momentum
            .iter()
            .zip(c[i].iter())
            .map(|(j_x, c_x)| j_x * (*c_x as Float))
            .sum::<Float>();
        *f_eq_i = w[i]
            * (density + j_dot_c * cs_2_inv + j_dot_c * j_dot_c * cs_4_inv * half_inv_density
                - j_dot_j * cs_2_inv * half_inv_density);
    });
}

/// Discrete H-function, `Σ p log p` over the strictly positive entries of `p`.
///
/// # Examples
/// ```
/// # use lbcollision::kernel::entropy;
/// let h = entropy(&[0.0, 0.5]);
///
/// assert!((h - 0.5 * 0.5_f64.ln()).abs() < 1e-12);
/// ```
pub fn entropy(p: &[Float]) -> Float {
    p.iter()
        .filter(|&&p_i| p_i > 0.0)
        .map(|p_i| p_i * p_i.ln())
        .sum()
}

/// H-function of the post-collision state `f + alpha (f_eq - f)`.
pub fn entropy_along(f: &[Float], f_eq: &[Float], alpha: Float) -> Float {
    f.iter()
        .zip(f_eq.iter())
        .map(|(f_i, f_eq_i)| f_i + alpha * (f_eq_i - f_i))
        .filter(|&p_i| p_i > 0.0)
        .map(|p_i| p_i * p_i.ln())
        .sum()
}

/// $$ f\_{i} \leftarrow f\_{i} + \omega (f\_{i}^{eq} - f\_{i}) $$
pub(crate) fn bgk_relaxation(f: &mut [Float], f_eq: &[Float], relax: Float) {
    f.iter_mut()
        .zip(f_eq.iter())
        .for_each(|(f_i, f_eq_i)| *f_i += relax * (f_eq_i - *f_i));
}

pub(crate) fn density(f: &[Float]) -> Float {
    f.iter().sum()
}

pub(crate) fn momentum(
    momentum: &mut [Float],
    f: &[Float],
    vel_set_params: &velocity_set::Parameters,
) {
    let c = vel_set_params.get_c();
    momentum.iter_mut().enumerate().for_each(|(x, j_x)| {
        *j_x = f
            .iter()
            .zip(c.iter())
            .map(|(f_i, c_i)| f_i * (c_i[x] as Float))
            .sum::<Float>();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d2q9_equilibrium(density: Float, momentum: &[Float]) -> Vec<Float> {
        let vel_set_params = velocity_set::Parameters::test_default(9);
        let mut f_eq = vec![0.0; 9];
        equilibrium(&mut f_eq, density, momentum, CS_2_INV, &vel_set_params);
        f_eq
    }

    #[test]
    fn test_cs_2_inv_lattice_units() {
        assert!((cs_2_inv(1.0, 1.0) - 3.0).abs() < 1e-12);
        assert!((cs_2_inv(2.0, 1.0) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_equilibrium_at_rest_is_weighted_density() {
        let w = velocity_set::Parameters::test_default(9).get_w();

        let f_eq = d2q9_equilibrium(1.3, &[0.0, 0.0]);

        f_eq.iter().zip(w.iter()).for_each(|(f_eq_i, w_i)| {
            assert!((f_eq_i - w_i * 1.3).abs() < 1e-12);
        });
    }

    #[test]
    fn test_equilibrium_conserves_mass_and_momentum() {
        let vel_set_params = velocity_set::Parameters::test_default(9);
        let c = vel_set_params.get_c();
        let density = 0.8;
        let momentum = [0.04, -0.07];

        let f_eq = d2q9_equilibrium(density, &momentum);

        assert!((f_eq.iter().sum::<Float>() - density).abs() < 1e-12);
        (0..2).for_each(|x| {
            let j_x = f_eq
                .iter()
                .zip(c.iter())
                .map(|(f_eq_i, c_i)| f_eq_i * c_i[x] as Float)
                .sum::<Float>();
            assert!((j_x - momentum[x]).abs() < 1e-12);
        });
    }

    #[test]
    fn test_equilibrium_matches_velocity_form() {
        let vel_set_params = velocity_set::Parameters::test_default(9);
        let c = vel_set_params.get_c();
        let w = vel_set_params.get_w();
        let density = 1.1;
        let velocity = [0.05, 0.02];
        let momentum = [density * velocity[0], density * velocity[1]];

        let f_eq = d2q9_equilibrium(density, &momentum);

        let u_dot_u = velocity[0] * velocity[0] + velocity[1] * velocity[1];
        (0..9).for_each(|i| {
            let u_dot_c = velocity[0] * c[i][0] as Float + velocity[1] * c[i][1] as Float;
            let target = w[i]
                * density
                * (1.0 + 3.0 * u_dot_c + 4.5 * u_dot_c * u_dot_c - 1.5 * u_dot_u);
            assert!((f_eq[i] - target).abs() < 1e-12);
        });
    }

    #[test]
    fn test_entropy_skips_non_positive_entries() {
        let p = [0.0, 0.25, -0.1, 0.75];

        let target = 0.25 * (0.25 as Float).ln() + 0.75 * (0.75 as Float).ln();

        assert!((entropy(&p) - target).abs() < 1e-12);
        assert_eq!(entropy(&[0.0, -1.0]), 0.0);
    }

    #[test]
    fn test_entropy_along_end_points() {
        let f = [0.3, 0.5, 0.2];
        let f_eq = [0.4, 0.4, 0.2];

        assert!((entropy_along(&f, &f_eq, 0.0) - entropy(&f)).abs() < 1e-12);
        assert!((entropy_along(&f, &f_eq, 1.0) - entropy(&f_eq)).abs() < 1e-12);
    }

    #[test]
    fn test_bgk_relaxation() {
        let mut f = vec![0.1, 0.2, 0.3];
        let f_eq = [0.2, 0.2, 0.2];

        bgk_relaxation(&mut f, &f_eq, 0.5);

        let target = [0.15, 0.2, 0.25];
        f.iter().zip(target.iter()).for_each(|(a, b)| {
            assert!((a - b).abs() < 1e-12);
        });
    }

    #[test]
    fn test_density_and_momentum() {
        let vel_set_params = velocity_set::Parameters::test_default(9);
        let f = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9];
        let mut j = [0.0; 2];

        momentum(&mut j, &f, &vel_set_params);

        assert!((density(&f) - 4.5).abs() < 1e-12);
        assert!((j[0] - (-0.2)).abs() < 1e-12);
        assert!((j[1] - (-0.6)).abs() < 1e-12);
    }
}
