mod log_level;
mod outcome;

pub use log_level::LogLevel;
pub use outcome::Outcome;
