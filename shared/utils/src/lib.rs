pub mod config;
pub mod logging;
pub mod error;
pub mod validation;
pub mod spec;
pub mod export;
pub mod schedule;
pub mod filter;

pub use config::*;
pub use logging::*;
pub use error::*;
pub use validation::*;
pub use spec::{parse_spec_text, SpecParser};
pub use filter::filter_rows;
pub use schedule::{ParsedSchedule, ScheduleParser};
