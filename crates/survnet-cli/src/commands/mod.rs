pub mod analyze;
pub mod cuts;
pub mod inspect;
pub mod path;
pub mod telemetry;
pub mod util;
