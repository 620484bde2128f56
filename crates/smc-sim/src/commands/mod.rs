pub mod linear;
pub mod normal_mean;
