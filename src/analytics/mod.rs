pub mod mean_field;

pub use mean_field::{exponential_decay, logistic_mean_field};
