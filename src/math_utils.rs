// src/math_utils.rs

/// Round `value` to `n_decimals` decimal places
///
/// Used to keep accumulated epoch times from drifting: `0.1 + 0.2` becomes
/// `0.3` again at any `n_decimals ≤ 15`.
pub fn round_to_decimals(value: f64, n_decimals: u32) -> f64 {
    let multiplier = 10f64.powi(n_decimals as i32);
    (value * multiplier).round() / multiplier
}

pub struct Timer {
    start_time: std::time::Instant,
}

impl Timer {
    pub fn new() -> Timer {
        Timer {
            start_time: std::time::Instant::now(),
        }
    }

    pub fn start(&mut self) {
        self.start_time = std::time::Instant::now();
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}
