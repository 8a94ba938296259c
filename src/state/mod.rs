pub mod model;
pub mod store;

pub use model::RunState;
pub use store::StateStore;
