pub mod activations;
pub mod layers;
pub mod loss;
mod architecture;
mod sequential;
mod state;

pub use architecture::Architecture;
pub use sequential::Sequential;
pub use state::{Activations, ForwardState};
