//! neowatch viewer application.
//!
//! Wires config, logging, the feed client and the scene together behind a
//! console front end, and runs the fixed-timestep frame loop.

pub mod console;
pub mod display;
pub mod error;
pub mod frame_loop;
pub mod platform;
pub mod viewer;

pub use console::{Command, CommandError, read_commands};
pub use display::ConsoleDisplay;
pub use error::AppError;
pub use frame_loop::{FIXED_DT, FrameLoop, MAX_FRAME_TIME};
pub use platform::{PlatformDirs, PlatformError};
pub use viewer::Viewer;
