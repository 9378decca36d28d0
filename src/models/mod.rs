pub mod coefficients;
pub mod decay;
pub mod dp_langevin;
pub mod model;
