/// Models generated from `models/blog.rs` by the build script.
pub mod blog {
    include!(concat!(env!("OUT_DIR"), "/blog.rs"));
}

mod exec_log;
pub use exec_log::ExecLog;

mod recording_driver;
pub use recording_driver::{BatchOrder, DriverOp, RecordingDriver};

mod setup;
pub use setup::Setup;

pub use std_util::*;
