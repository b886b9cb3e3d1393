use crate::constants::Float;

pub(super) const D: usize = 2;

pub(super) const Q: usize = 9;

pub(super) const C: [[i32; D]; Q] = [
    [0, 0],
    [1, 0],
    [0, 1],
    [-1, 0],
    [0, -1],
    [1, 1],
    [-1, 1],
    [-1, -1],
    [1, -1],
];

pub(super) const W: [Float; Q] = [
    4.0 / 9.0,
    1.0 / 9.0,
    1.0 / 9.0,
    1.0 / 9.0,
    1.0 / 9.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_one_d2q9() {
        assert!((W.iter().sum::<Float>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_second_moment_is_isotropic_d2q9() {
        (0..D).for_each(|a| {
            (0..D).for_each(|b| {
                let moment = C
                    .iter()
                    .zip(W.iter())
                    .map(|(c_i, w_i)| w_i * (c_i[a] * c_i[b]) as Float)
                    .sum::<Float>();
                let target = if a == b { 1.0 / 3.0 } else { 0.0 };
                assert!((moment - target).abs() < 1e-12);
            });
        });
    }

    #[test]
    fn test_first_moment_vanishes_d2q9() {
        (0..D).for_each(|a| {
            let moment = C
                .iter()
                .zip(W.iter())
                .map(|(c_i, w_i)| w_i * c_i[a] as Float)
                .sum::<Float>();
            assert!(moment.abs() < 1e-12);
        });
    }
}
