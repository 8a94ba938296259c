pub mod driver;
pub mod plan;

pub use driver::{BenchmarkRunner, RunSummary};
pub use plan::{WorkUnit, work_plan};
