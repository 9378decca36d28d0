// tests/integration_test.rs
use fast_langevin::grid::{GridShape, GridTopology, GridWiring};
use fast_langevin::models::coefficients::Coefficients;
use fast_langevin::models::decay::ConstantDrift;
use fast_langevin::models::dp_langevin::DpLangevin;
use fast_langevin::rng;
use fast_langevin::{FieldState, IntegrationMethod, Langevin, LangevinError, NoiseSampler};
use ndarray::Array1;
use rand::Rng;

const METHODS: [IntegrationMethod; 2] =
    [IntegrationMethod::Euler, IntegrationMethod::RungeKutta];

fn null_langevin(density: Vec<f64>) -> Langevin<ConstantDrift> {
    let field = FieldState::from_vec(density).expect("Valid field");
    let sampler = NoiseSampler::new(1.0, 0.0).expect("Valid sampler");
    Langevin::new(ConstantDrift::new(0.0), field, sampler, 0.1).expect("Valid integrator")
}

fn dp_langevin(n_x: usize, coefficients: &Coefficients, dx: f64, dt: f64) -> Langevin<DpLangevin> {
    let wiring =
        GridWiring::build(GridShape::d1(n_x), &[GridTopology::Periodic]).expect("Valid grid");
    let model = DpLangevin::new(coefficients, dx, wiring).expect("Valid model");
    let sampler = NoiseSampler::from_coefficients(coefficients.linear, coefficients.noise, dt)
        .expect("Valid sampler");
    let mut ic_rng = rng::seed_rng_from_u64(1);
    let density: Vec<f64> = (0..n_x).map(|_| ic_rng.gen_range(0.0..1.0)).collect();
    let field = FieldState::from_vec(density).expect("Valid field");
    Langevin::new(model, field, sampler, dt).expect("Valid integrator")
}

#[test]
fn test_null_drift_null_noise_scenario() {
    for method in METHODS {
        let mut langevin = null_langevin(vec![1.0, 2.0, 3.0]);
        let mut rng = rng::seed_rng_from_u64(42);

        langevin.integrate(method, &mut rng).expect("Finite step");

        assert_eq!(
            langevin.field().density().to_vec(),
            vec![0.0, 0.0, 0.0],
            "{} did not reset the field",
            method
        );
        assert_eq!(langevin.mean_density(), 0.0);
    }
}

#[test]
fn test_null_dynamics_idempotent() {
    for method in METHODS {
        let mut langevin = null_langevin(vec![1.0, 2.0, 3.0]);
        let mut rng = rng::seed_rng_from_u64(42);

        for tick in 0..10 {
            langevin.integrate(method, &mut rng).expect("Finite step");
            assert!(
                langevin.field().density().iter().all(|&rho| rho == 0.0),
                "{} left non-zero density at tick {}",
                method,
                tick
            );
            assert_eq!(langevin.mean_density(), 0.0);
        }
    }
}

#[test]
fn test_zero_rate_independent_of_entropy_state() {
    // A cell that is exactly zero before noise stays zero whatever the
    // generator has been through
    let no_drift = ConstantDrift::new(0.0);
    let sampler = NoiseSampler::from_coefficients(1.0, 1.0, 0.1).expect("Valid sampler");

    for method in METHODS {
        for seed in 0..20 {
            let field = FieldState::from_vec(vec![0.0, 0.5, 0.0, 2.0]).expect("Valid field");
            let mut langevin = Langevin::new(no_drift, field, sampler, 0.1).expect("Valid");
            let mut rng = rng::seed_rng_from_u64(seed);
            for _ in 0..seed {
                let _: u64 = rng.gen();
            }

            langevin.integrate(method, &mut rng).expect("Finite step");

            let density = langevin.field().density();
            assert_eq!(density[0], 0.0, "{} seed {}", method, seed);
            assert_eq!(density[2], 0.0, "{} seed {}", method, seed);
        }
    }
}

#[test]
fn test_dp_field_non_negative_and_mean_correct() {
    let coefficients = Coefficients::new(1.0, 2.0, 0.1, 1.0);

    for method in METHODS {
        let mut langevin = dp_langevin(64, &coefficients, 0.5, 0.05);
        let mut rng = rng::seed_rng_from_u64(2024);

        for tick in 0..400 {
            langevin.integrate(method, &mut rng).expect("Finite step");

            let density = langevin.field().density();
            assert!(
                density.iter().all(|&rho| rho >= 0.0 && rho.is_finite()),
                "{} produced a negative or non-finite density at tick {}",
                method,
                tick
            );
            let direct_mean = density.sum() / density.len() as f64;
            assert!(
                (langevin.mean_density() - direct_mean).abs() < 1e-12,
                "{} mean {} differs from field average {} at tick {}",
                method,
                langevin.mean_density(),
                direct_mean,
                tick
            );
        }
    }
}

#[test]
fn test_single_cell_field() {
    for method in METHODS {
        let field = FieldState::from_vec(vec![0.7]).expect("Valid field");
        let sampler = NoiseSampler::from_coefficients(0.5, 0.5, 0.01).expect("Valid sampler");
        let decay = |i: usize, f: &Array1<f64>| -f[i] * f[i];
        let mut langevin = Langevin::new(decay, field, sampler, 0.01).expect("Valid");
        let mut rng = rng::seed_rng_from_u64(3);

        for _ in 0..100 {
            langevin.integrate(method, &mut rng).expect("Finite step");
            assert_eq!(langevin.mean_density(), langevin.field().density()[0]);
        }
    }
}

#[test]
fn test_same_seed_same_field() {
    let coefficients = Coefficients::default();

    for method in METHODS {
        let mut first = dp_langevin(32, &coefficients, 0.5, 0.05);
        let mut second = dp_langevin(32, &coefficients, 0.5, 0.05);
        let mut rng1 = rng::seed_rng_from_u64(77);
        let mut rng2 = rng::seed_rng_from_u64(77);

        for _ in 0..50 {
            first.integrate(method, &mut rng1).expect("Finite step");
            second.integrate(method, &mut rng2).expect("Finite step");
        }

        assert_eq!(first.field().density(), second.field().density());
    }
}

#[test]
fn test_nan_drift_reported_and_field_kept() {
    let poisoned = |i: usize, f: &Array1<f64>| if f[i] > 1.5 { f64::NAN } else { 0.0 };
    let sampler = NoiseSampler::new(1.0, 1.0).expect("Valid sampler");

    for method in METHODS {
        let field = FieldState::from_vec(vec![1.0, 2.0, 1.0]).expect("Valid field");
        let mut langevin = Langevin::new(poisoned, field, sampler, 0.1).expect("Valid");
        let mut rng = rng::seed_rng_from_u64(5);

        let result = langevin.integrate(method, &mut rng);

        assert!(
            matches!(result, Err(LangevinError::NumericalInstability { .. })),
            "{} returned {:?}",
            method,
            result
        );
        assert_eq!(langevin.field().density().to_vec(), vec![1.0, 2.0, 1.0]);
        assert!((langevin.mean_density() - 4.0 / 3.0).abs() < 1e-15);
    }
}

#[test]
fn test_supercritical_dp_stays_active() {
    // Well above the critical point the homogeneous density settles near a/b
    let coefficients = Coefficients::new(1.0, 2.0, 0.5, 0.1);
    let mut langevin = dp_langevin(128, &coefficients, 1.0, 0.05);
    let mut rng = rng::seed_rng_from_u64(9);

    for _ in 0..400 {
        langevin.integrate_rungekutta(&mut rng).expect("Finite step");
    }

    let mean = langevin.mean_density();
    println!("Supercritical mean density after t = 20: {}", mean);
    assert!(
        (mean - coefficients.mean_field_fixed_point()).abs() < 0.05,
        "mean density {} far from a/b = {}",
        mean,
        coefficients.mean_field_fixed_point()
    );
    assert!((langevin.poisson_mean() - langevin.sampler().lambda_scaled() * mean).abs() < 1e-12);
}

#[test]
fn test_subcritical_dp_is_absorbed() {
    let coefficients = Coefficients::new(-1.0, 2.0, 0.1, 1.0);
    let mut langevin = dp_langevin(64, &coefficients, 0.5, 0.05);
    let mut rng = rng::seed_rng_from_u64(11);

    for _ in 0..400 {
        langevin.integrate_euler(&mut rng).expect("Finite step");
    }

    // Absorbing state: once every cell hits zero nothing can revive it
    assert_eq!(langevin.mean_density(), 0.0);
}
