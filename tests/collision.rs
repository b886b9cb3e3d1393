use approx::assert_relative_eq;
use lbcollision::collision::{Parameters, RelaxationField, RelaxationKind, Solver};
use lbcollision::field::{ScalarField, VectorField};
use lbcollision::functions;
use lbcollision::velocity_set::VelocitySet;

fn varying_fields(n: [usize; 2]) -> (ScalarField, VectorField) {
    let cells = n[0] * n[1];
    let density = (0..cells)
        .map(|cell| 0.7 + 0.6 * ((cell * 37 % 101) as f64 / 101.0))
        .collect::<Vec<f64>>();
    let momentum = (0..cells)
        .flat_map(|cell| {
            let phase = cell as f64 * 0.37;
            [0.08 * phase.sin(), -0.06 * phase.cos()]
        })
        .collect::<Vec<f64>>();
    (
        ScalarField::new(n, density).unwrap(),
        VectorField::new(n, momentum).unwrap(),
    )
}

#[test]
fn uniform_rest_state_end_to_end() {
    let n = [4, 4];
    let density = functions::uniform_density(1.0, n);
    let momentum = functions::uniform_momentum([0.0, 0.0], n);
    let params = Parameters {
        nu: 0.1,
        ..Parameters::test_default(RelaxationKind::Bgk)
    };
    let w = VelocitySet::D2Q9.get_velocity_set_parameters().get_w();

    let solver = Solver::initial(&density, &momentum, params).unwrap();
    let f_eq = solver.get_feq().unwrap();
    let relax = solver.get_relax().unwrap();

    for x in 0..4 {
        for y in 0..4 {
            for (i, w_i) in w.iter().enumerate() {
                assert_relative_eq!(f_eq.get(x, y, i), *w_i, epsilon = 1e-12);
            }
            assert_eq!(relax.get(x, y), 0.1);
        }
    }
    assert_eq!(
        relax.to_field(n).as_slice(),
        ScalarField::filled(n, 0.1).as_slice()
    );
}

#[test]
fn equilibrium_conserves_mass_and_momentum() {
    let n = [7, 5];
    let (density, momentum) = varying_fields(n);

    for velocity_set in [VelocitySet::D2Q9, VelocitySet::D2Q5] {
        let vel_set_params = velocity_set.get_velocity_set_parameters();
        let c = vel_set_params.get_c();

        let f_eq = Solver::eq_distribution(&density, &momentum, 1.0, 1.0, &vel_set_params).unwrap();

        for x in 0..n[0] {
            for y in 0..n[1] {
                let cell = f_eq.get_cell(x, y);
                assert_relative_eq!(
                    cell.iter().sum::<f64>(),
                    density.get(x, y),
                    epsilon = 1e-12
                );
                for d in 0..2 {
                    let j_d = cell
                        .iter()
                        .zip(c.iter())
                        .map(|(f_i, c_i)| f_i * c_i[d] as f64)
                        .sum::<f64>();
                    assert_relative_eq!(j_d, momentum.get(x, y)[d], epsilon = 1e-12);
                }
            }
        }
    }
}

#[test]
fn equilibrium_at_rest_is_weighted_density() {
    let n = [3, 6];
    let (density, _) = varying_fields(n);
    let momentum = functions::uniform_momentum([0.0, 0.0], n);
    let vel_set_params = VelocitySet::D2Q9.get_velocity_set_parameters();
    let w = vel_set_params.get_w();

    let f_eq = Solver::eq_distribution(&density, &momentum, 0.5, 0.25, &vel_set_params).unwrap();

    for x in 0..n[0] {
        for y in 0..n[1] {
            for (i, w_i) in w.iter().enumerate() {
                assert_relative_eq!(f_eq.get(x, y, i), w_i * density.get(x, y), epsilon = 1e-12);
            }
        }
    }
}

#[test]
fn entropic_relaxation_stays_within_bounds() {
    let n = [6, 6];
    let density = functions::uniform_density(1.0, n);
    let momentum = functions::shear_wave_momentum(0.08, 1.0, n);
    let params = Parameters::test_default(RelaxationKind::Entropic);
    let beta = lbcollision::collision::beta(params.nu, params.delta_x, params.delta_t);
    let mut solver = Solver::initial(&density, &momentum, params).unwrap();

    for _ in 0..10 {
        let relax = solver.get_relax().unwrap();
        let RelaxationField::Field(field) = relax else {
            panic!("Entropic relaxation must be a field");
        };
        for &value in field.as_slice() {
            let alpha = value / beta;
            assert!(alpha >= 0.0);
            assert!(alpha <= 2.0);
        }
        solver.step().unwrap();
    }
}

#[test]
fn mixed_relaxation_pins_the_boundary() {
    let n = [8, 6];
    let density = functions::uniform_density(1.0, n);
    let momentum = functions::shear_wave_momentum(0.08, 1.0, n);
    let params = Parameters {
        nu: 0.05,
        ..Parameters::test_default(RelaxationKind::Mixed)
    };
    let mut solver = Solver::initial(&density, &momentum, params).unwrap();
    solver.step().unwrap();

    let relax = solver.get_relax().unwrap();

    for x in 0..n[0] {
        assert_eq!(relax.get(x, 0), 0.05);
        assert_eq!(relax.get(x, n[1] - 1), 0.05);
    }
    for y in 0..n[1] {
        assert_eq!(relax.get(0, y), 0.05);
        assert_eq!(relax.get(n[0] - 1, y), 0.05);
    }
}

#[test]
fn shear_wave_decays_under_bgk() {
    let n = [4, 16];
    let density = functions::uniform_density(1.0, n);
    let momentum = functions::shear_wave_momentum(0.05, 1.0, n);
    let params = Parameters {
        nu: 1.0,
        ..Parameters::test_default(RelaxationKind::Bgk)
    };
    let mut solver = Solver::initial(&density, &momentum, params).unwrap();
    let mass = solver.get_f().total_mass();

    for _ in 0..50 {
        solver.step().unwrap();
    }

    let max_momentum = solver
        .get_momentum()
        .as_slice()
        .iter()
        .fold(0.0_f64, |acc, j| acc.max(j.abs()));
    assert!(max_momentum < 0.05);
    assert_relative_eq!(solver.get_f().total_mass(), mass, epsilon = 1e-9);
}
