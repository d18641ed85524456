mod body;
mod integrator;

pub use body::{Body, GRAVITY};
pub use integrator::Solver;
