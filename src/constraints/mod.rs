mod rope;

pub use rope::{Rope, RopeError};
