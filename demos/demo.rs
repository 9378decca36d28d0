// demos/demo.rs
use fast_langevin::analytics::logistic_mean_field;
use fast_langevin::grid::{BoundaryCondition, GridDimension, GridTopology, InitialCondition};
use fast_langevin::math_utils::Timer;
use fast_langevin::models::coefficients::Coefficients;
use fast_langevin::output;
use fast_langevin::sim::{run_ensemble, RecordFlags, SimConfig, Simulation};
use fast_langevin::{IntegrationMethod, LangevinResult};
use tracing_subscriber::EnvFilter;

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    let args: Vec<String> = std::env::args().collect();
    let write_csv = args.iter().any(|arg| arg == "--csv");

    if let Err(e) = run_demo_mode(write_csv) {
        eprintln!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

fn run_demo_mode(write_csv: bool) -> LangevinResult<()> {
    println!("Running fast-langevin DP-Langevin Demo\n");

    let coefficients = Coefficients::new(1.0, 2.0, 0.1, 1.0);

    // --- 1D ring, Runge-Kutta, run in two segments ---
    let config_1d = SimConfig {
        t_final: 20.0,
        dx: 0.5,
        dt: 0.05,
        seed: 42,
        n_x: 500,
        initial_condition: InitialCondition::RandomUniform { min: 0.0, max: 1.0 },
        integration_method: IntegrationMethod::RungeKutta,
        record: RecordFlags::MEAN_DENSITY | RecordFlags::SEGMENT_SNAPSHOTS,
        ..Default::default()
    };

    let mut timer = Timer::new();
    timer.start();
    let mut sim_1d = Simulation::new(coefficients, config_1d)?;
    let half = (sim_1d.n_epochs() - 1) / 2;
    sim_1d.run(half)?;
    println!(
        "1d ring: t = {:.2}, <ρ> = {:.4}",
        sim_1d.t_current_epoch(),
        sim_1d.mean_density()
    );
    sim_1d.run_to_end()?;
    println!(
        "1d ring: t = {:.2}, <ρ> = {:.4} (mean field a/b = {:.4}), {:.1} ms",
        sim_1d.t_current_epoch(),
        sim_1d.mean_density(),
        coefficients.mean_field_fixed_point(),
        timer.elapsed_ms()
    );

    // --- 2D cylinder seeded from a single cell, Euler ---
    let config_2d = SimConfig {
        t_final: 10.0,
        dx: 1.0,
        dt: 0.05,
        seed: 7,
        grid_dimension: GridDimension::D2,
        n_x: 64,
        n_y: 32,
        grid_topologies: vec![GridTopology::Periodic, GridTopology::Bounded],
        boundary_conditions: vec![
            BoundaryCondition::FixedValue(0.0),
            BoundaryCondition::FixedValue(0.0),
            BoundaryCondition::Floating,
            BoundaryCondition::Floating,
        ],
        initial_condition: InitialCondition::SingleSeed {
            value: 5.0,
            x: 32,
            y: 16,
        },
        integration_method: IntegrationMethod::Euler,
        record: RecordFlags::MEAN_DENSITY | RecordFlags::POISSON_MEAN,
        ..Default::default()
    };

    timer.start();
    let mut sim_2d = Simulation::new(coefficients, config_2d)?;
    sim_2d.run_to_end()?;
    let density = sim_2d.density();
    let active = density.iter().filter(|&&rho| rho > 0.0).count();
    println!(
        "2d cylinder: <ρ> = {:.4}, Poisson mean = {:.2}, active cells {}/{}, {:.1} ms",
        sim_2d.mean_density(),
        sim_2d.poisson_mean(),
        active,
        density.len(),
        timer.elapsed_ms()
    );

    // --- Ensemble vs mean field ---
    let config_ensemble = SimConfig {
        t_final: 5.0,
        dx: 1.0,
        dt: 0.05,
        n_x: 256,
        initial_condition: InitialCondition::ConstantValue(0.05),
        ..Default::default()
    };
    timer.start();
    let summary = run_ensemble(&coefficients, &config_ensemble, 16)?;
    println!("\nEnsemble of 16 ({:.1} ms):", timer.elapsed_ms());
    println!("{:>8} {:>12} {:>12} {:>12}", "t", "<ρ>", "σ", "mean field");
    for i in (0..summary.t_epochs.len()).step_by(20) {
        let t = summary.t_epochs[i];
        println!(
            "{:>8.2} {:>12.4} {:>12.4} {:>12.4}",
            t,
            summary.mean[i],
            summary.std_dev[i],
            logistic_mean_field(0.05, coefficients.linear, coefficients.quadratic, t)
        );
    }

    if write_csv {
        let series_file = "mean_density_1d.csv";
        let grid_file = "density_2d.csv";
        match output::write_mean_densities_to_csv(
            series_file,
            sim_1d.t_epochs(),
            sim_1d.mean_densities(),
        ) {
            Ok(()) => println!("\nMean-density series written to {}", series_file),
            Err(e) => eprintln!("Could not write {}: {}", series_file, e),
        }
        match output::write_density_grid_to_csv(grid_file, &density) {
            Ok(()) => println!("2d density grid written to {}", grid_file),
            Err(e) => eprintln!("Could not write {}: {}", grid_file, e),
        }
    }

    Ok(())
}
