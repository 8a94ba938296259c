pub mod model;
pub mod sink;

pub use model::{HEADER, ResultRecord};
pub use sink::ResultsLog;
