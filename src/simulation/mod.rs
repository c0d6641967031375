pub mod states;
pub mod params;
pub mod sampler;
pub mod registry;
pub mod forces;
pub mod integrator;
pub mod trails;
pub mod sync;
pub mod connections;
pub mod scenario;
