pub mod deps;
pub mod logger;
pub mod process;

pub use deps::DependencyStatus;
pub use logger::init_logging;
pub use process::{CommandRunner, SystemRunner};
