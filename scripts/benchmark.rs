// scripts/benchmark.rs
use fast_langevin::grid::{BoundaryCondition, GridDimension, GridTopology};
use fast_langevin::math_utils::Timer;
use fast_langevin::models::coefficients::Coefficients;
use fast_langevin::sim::{run_ensemble, SimConfig, Simulation};
use fast_langevin::{IntegrationMethod, LangevinResult};
use std::env;
use std::fs::File;
use std::io::{self, Write};
use std::process::Command;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_model: String,
    cpu_cores: usize,
    rust_version: String,
    rustc_flags: String,
    rayon_threads: usize,
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            cpu_model: Self::get_cpu_model(),
            cpu_cores: num_cpus::get(),
            rust_version: Self::get_rust_version(),
            rustc_flags: env::var("RUSTFLAGS").unwrap_or_else(|_| "default".to_string()),
            rayon_threads: rayon::current_num_threads(),
        }
    }

    fn get_cpu_model() -> String {
        #[cfg(target_os = "linux")]
        {
            std::fs::read_to_string("/proc/cpuinfo")
                .ok()
                .and_then(|content| {
                    content
                        .lines()
                        .find(|line| line.starts_with("model name"))
                        .and_then(|line| line.split(':').nth(1))
                        .map(|s| s.trim().to_string())
                })
                .unwrap_or_else(|| "Unknown CPU".to_string())
        }

        #[cfg(target_os = "macos")]
        {
            Command::new("sysctl")
                .args(["-n", "machdep.cpu.brand_string"])
                .output()
                .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
                .unwrap_or_else(|_| "Unknown CPU".to_string())
        }

        #[cfg(not(any(target_os = "linux", target_os = "macos")))]
        {
            "Unknown CPU".to_string()
        }
    }

    fn get_rust_version() -> String {
        Command::new("rustc")
            .arg("--version")
            .output()
            .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
            .unwrap_or_else(|_| "Unknown Rust version".to_string())
    }
}

#[derive(Debug)]
struct BenchmarkResult {
    name: String,
    n_cells: usize,
    n_steps: usize,
    time_ms: f64,
    cell_updates_per_sec: f64,
    final_mean_density: f64,
}

fn grid_config(
    dimension: GridDimension,
    n_x: usize,
    n_y: usize,
    method: IntegrationMethod,
) -> SimConfig {
    let (grid_topologies, boundary_conditions) = match dimension {
        GridDimension::D1 => (vec![GridTopology::Periodic], vec![BoundaryCondition::Floating; 2]),
        GridDimension::D2 => (
            vec![GridTopology::Periodic, GridTopology::Periodic],
            vec![BoundaryCondition::Floating; 4],
        ),
    };
    SimConfig {
        t_final: 10.0,
        dx: 1.0,
        dt: 0.05,
        seed: 42,
        grid_dimension: dimension,
        n_x,
        n_y,
        grid_topologies,
        boundary_conditions,
        integration_method: method,
        ..Default::default()
    }
}

fn run_integrator_benchmarks(coefficients: &Coefficients) -> LangevinResult<Vec<BenchmarkResult>> {
    let mut results = Vec::new();
    let grids = [
        (GridDimension::D1, 1_024, 1),
        (GridDimension::D1, 16_384, 1),
        (GridDimension::D2, 128, 128),
    ];

    for &(dimension, n_x, n_y) in &grids {
        for method in [IntegrationMethod::Euler, IntegrationMethod::RungeKutta] {
            println!("Benchmarking {} on {} {}x{} grid...", method, dimension, n_x, n_y);

            let config = grid_config(dimension, n_x, n_y, method);
            let n_cells = config.grid_shape().n_cells();
            let mut sim = Simulation::new(*coefficients, config)?;
            let n_steps = sim.n_epochs() - 1;

            let mut timer = Timer::new();
            timer.start();
            sim.run_to_end()?;
            let time_ms = timer.elapsed_ms();

            results.push(BenchmarkResult {
                name: format!("{} {} {}x{}", method, dimension, n_x, n_y),
                n_cells,
                n_steps,
                time_ms,
                cell_updates_per_sec: (n_cells * n_steps) as f64 / (time_ms / 1000.0),
                final_mean_density: sim.mean_density(),
            });
        }
    }

    Ok(results)
}

fn run_ensemble_benchmark(coefficients: &Coefficients) -> LangevinResult<BenchmarkResult> {
    let n_sims = 4 * rayon::current_num_threads();
    println!("Benchmarking ensemble of {} simulations...", n_sims);

    let config = grid_config(GridDimension::D1, 1_024, 1, IntegrationMethod::RungeKutta);
    let n_cells = config.grid_shape().n_cells();
    let n_steps = config.n_epochs() - 1;

    let mut timer = Timer::new();
    timer.start();
    let summary = run_ensemble(coefficients, &config, n_sims)?;
    let time_ms = timer.elapsed_ms();

    Ok(BenchmarkResult {
        name: format!("Ensemble x{} Runge-Kutta 1d 1024", n_sims),
        n_cells: n_cells * n_sims,
        n_steps,
        time_ms,
        cell_updates_per_sec: (n_cells * n_sims * n_steps) as f64 / (time_ms / 1000.0),
        final_mean_density: summary.mean.last().copied().unwrap_or(0.0),
    })
}

fn write_results_to_csv(
    results: &[BenchmarkResult],
    system_info: &SystemInfo,
    filename: &str,
) -> io::Result<()> {
    let mut file = File::create(filename)?;

    writeln!(file, "# System Information")?;
    writeln!(file, "# OS: {}", system_info.os)?;
    writeln!(file, "# CPU: {}", system_info.cpu_model)?;
    writeln!(file, "# CPU Cores: {}", system_info.cpu_cores)?;
    writeln!(file, "# Rust Version: {}", system_info.rust_version)?;
    writeln!(file, "# RUSTFLAGS: {}", system_info.rustc_flags)?;
    writeln!(file, "# Rayon Threads: {}", system_info.rayon_threads)?;
    writeln!(
        file,
        "# Benchmark Date: {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(file, "#")?;

    writeln!(
        file,
        "Benchmark,Cells,Steps,Time_ms,Cell_updates_per_sec,Final_mean_density"
    )?;
    for result in results {
        writeln!(
            file,
            "{},{},{},{:.2},{:.0},{:.6}",
            result.name,
            result.n_cells,
            result.n_steps,
            result.time_ms,
            result.cell_updates_per_sec,
            result.final_mean_density
        )?;
    }
    Ok(())
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    println!("fast-langevin Benchmark Suite");
    println!("=============================\n");

    let system_info = SystemInfo::gather();
    println!("System Information:");
    println!("  OS: {}", system_info.os);
    println!("  CPU: {}", system_info.cpu_model);
    println!("  CPU Cores: {}", system_info.cpu_cores);
    println!("  Rust Version: {}", system_info.rust_version);
    println!("  RUSTFLAGS: {}", system_info.rustc_flags);
    println!("  Rayon Threads: {}", system_info.rayon_threads);
    println!();

    let coefficients = Coefficients::new(1.0, 2.0, 0.1, 1.0);
    let mut all_results = match run_integrator_benchmarks(&coefficients) {
        Ok(results) => results,
        Err(e) => {
            eprintln!("Integrator benchmark failed: {}", e);
            std::process::exit(1);
        }
    };
    match run_ensemble_benchmark(&coefficients) {
        Ok(result) => all_results.push(result),
        Err(e) => eprintln!("Ensemble benchmark failed: {}", e),
    }

    println!("\n{:=<88}", "");
    println!("BENCHMARK RESULTS");
    println!("{:=<88}", "");
    println!(
        "{:<36} {:>9} {:>7} {:>12} {:>14} {:>6}",
        "Benchmark", "Cells", "Steps", "Time (ms)", "Cells/sec", "<ρ>"
    );
    println!("{:-<88}", "");
    for result in &all_results {
        println!(
            "{:<36} {:>9} {:>7} {:>12.2} {:>14.3e} {:>6.4}",
            result.name,
            result.n_cells,
            result.n_steps,
            result.time_ms,
            result.cell_updates_per_sec,
            result.final_mean_density
        );
    }
    println!("{:=<88}", "");

    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let filename = format!("benchmark_results_{}.csv", timestamp);
    match write_results_to_csv(&all_results, &system_info, &filename) {
        Ok(()) => println!("\nResults saved to: {}", filename),
        Err(e) => eprintln!("Could not write {}: {}", filename, e),
    }
    println!("\nTo reproduce: cargo run --bin benchmark --release");
}
