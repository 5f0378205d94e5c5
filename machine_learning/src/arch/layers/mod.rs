mod dense;

pub use dense::{Dense, Gradient};
