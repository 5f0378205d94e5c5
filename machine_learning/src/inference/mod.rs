mod argmax;
mod predictor;

pub use argmax::argmax;
pub use predictor::{Evaluation, Predictor};
