mod activity;
mod duration;
mod session;

pub use activity::{
    Activity, ActivityKind, StepConfig, TimeConfig, DEFAULT_EFFORT_SECS, DEFAULT_ITERATIONS,
    DEFAULT_REST_SECS,
};
pub use duration::{
    deserialize_duration, parse_duration_offset, serialize_duration, DurationUnit,
};
pub use session::{Session, DEFAULT_SCHEDULE_TIME};
