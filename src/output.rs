// src/output.rs
use ndarray::Array2;
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Write the mean-density time series as `epoch,t,mean_density`
pub fn write_mean_densities_to_csv(
    filename: &str,
    t_epochs: &[f64],
    mean_densities: &[f64],
) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(filename)?);
    writeln!(file, "epoch,t,mean_density")?;
    for (i, (t, mean_density)) in t_epochs.iter().zip(mean_densities).enumerate() {
        writeln!(file, "{},{},{}", i, t, mean_density)?;
    }
    file.flush()
}

/// Write a `(n_x, n_y)` density grid, one row per `y`
pub fn write_density_grid_to_csv(filename: &str, density: &Array2<f64>) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(filename)?);
    for column in density.columns() {
        let row: Vec<String> = column.iter().map(|rho| rho.to_string()).collect();
        writeln!(file, "{}", row.join(","))?;
    }
    file.flush()
}
