use crate::prelude_crate::*;
use std::f64::consts::PI;

pub fn uniform_density(value: Float, n: [usize; 2]) -> ScalarField {
    ScalarField::filled(n, value)
}

pub fn uniform_momentum(value: [Float; 2], n: [usize; 2]) -> VectorField {
    VectorField::filled(n, value)
}

/// x-momentum `density * amplitude * sin(2 pi y / ny)`, a shear wave that decays
/// viscously on a periodic box.
///
/// # Examples
/// ```
/// # use lbcollision::functions::shear_wave_momentum;
/// let momentum = shear_wave_momentum(0.1, 1.0, [4, 4]);
///
/// assert!((momentum.get(0, 1)[0] - 0.1).abs() < 1e-12);
/// assert!(momentum.get(0, 0)[0].abs() < 1e-12);
/// assert_eq!(momentum.get(2, 1)[1], 0.0);
/// ```
pub fn shear_wave_momentum(amplitude: Float, density: Float, n: [usize; 2]) -> VectorField {
    let mut momentum = VectorField::filled(n, [0.0, 0.0]);
    let ny = n[1].max(1) as Float;
    (0..n[0]).for_each(|x| {
        (0..n[1]).for_each(|y| {
            let phase = 2.0 * PI * y as Float / ny;
            momentum.set(x, y, [density * amplitude * phase.sin(), 0.0]);
        });
    });
    momentum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_fields() {
        let density = uniform_density(1.2, [3, 2]);
        let momentum = uniform_momentum([0.1, -0.1], [3, 2]);

        assert!(density.as_slice().iter().all(|&rho| rho == 1.2));
        assert_eq!(momentum.get(2, 1), &[0.1, -0.1]);
    }

    #[test]
    fn test_shear_wave_has_zero_net_momentum() {
        let momentum = shear_wave_momentum(0.05, 1.0, [5, 8]);

        let total = momentum.as_slice().iter().sum::<Float>();

        assert!(total.abs() < 1e-12);
    }
}
