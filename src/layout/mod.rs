pub mod solver;
pub mod transform;
