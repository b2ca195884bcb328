//! Scene-level building blocks for the sandbox renderer.
//!
//! The numeric core lives in the [`linalg`] module (the `sandbox-linalg` crate); this crate adds a
//! fly-through [`Camera`](camera::Camera) on top of it, plus logger initialization for
//! applications.
//!
//! # 3D Coordinates
//!
//! The sandbox uses the OpenGL coordinate conventions: X points to the right, Y points up, and the
//! camera looks down the negative Z axis. Clip space depth ranges from -1 (near plane) to 1 (far
//! plane).
//!
//! # Environment Variables
//!
//! * `RUST_LOG`: overrides the log filter set up by [`init_logger!`].
//! * `SANDBOX_EPSILON`: overrides the zero threshold used by the numeric guards (see
//!   [`linalg::config`]).

use log::LevelFilter;

pub use sandbox_linalg as linalg;

pub mod camera;

/// macro-use only, not part of public API.
#[doc(hidden)]
pub fn init_logger(calling_crate: &'static str) {
    let log_level = if cfg!(debug_assertions) {
        LevelFilter::Trace
    } else {
        LevelFilter::Debug
    };
    env_logger::Builder::new()
        .filter(Some(calling_crate), log_level)
        .filter(Some(env!("CARGO_CRATE_NAME")), log_level)
        .filter(Some("sandbox_linalg"), LevelFilter::Debug)
        .parse_default_env()
        .try_init()
        .ok();
}

/// Initializes logging to *stderr*.
///
/// If `cfg!(debug_assertions)` is enabled, the calling crate and this crate will log at *trace*
/// level. Otherwise, they will log at *debug* level.
///
/// `sandbox-linalg` always logs at *debug* level, since its *trace* output is per-operation.
///
/// Filters from the `RUST_LOG` environment variable are applied on top. If a global logger is
/// already registered, this macro will do nothing.
#[macro_export]
macro_rules! init_logger {
    () => {
        $crate::init_logger(env!("CARGO_CRATE_NAME"))
    };
}
