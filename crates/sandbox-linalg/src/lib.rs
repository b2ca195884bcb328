//! Dense linear algebra for the sandbox renderer.
//!
//! This crate provides dynamically-sized [`Vector`]s and row-major [`Matrix`] types, plus the
//! free functions that build transformation ([`transform`]) and camera ([`projection`]) matrices.
//!
//! # Conventions
//!
//! - Matrices are stored row-major. [`Matrix::as_bytes`] yields the raw row-major buffer; use
//!   [`Matrix::to_column_major`] (or let the shader transpose) when uploading to APIs that expect
//!   column-major data.
//! - Points are column vectors transformed as `M · p`. Translations live in the last column of a
//!   homogeneous transform, and `projection.matmul(&view.matmul(&model)?)` composes a
//!   model-view-projection matrix.
//! - View space is right-handed with the camera looking down -Z. Clip space uses the OpenGL depth
//!   range `[-1, 1]`.
//!
//! # Errors
//!
//! Operations with preconditions (matching shapes, non-singular matrices, non-zero divisors, ...)
//! return [`Result`]. Nothing is computed from invalid input. The arithmetic operators cannot
//! return errors and panic instead, like out-of-bounds slice indexing does.
//!
//! # Precision
//!
//! The element type is generic over [`f32`] and [`f64`]. [`Real`] is the default element type of
//! [`Vector`] and [`Matrix`] and is [`f32`] unless the `f64` cargo feature is enabled.
//!
//! # Environment Variables
//!
//! See [`config`].

pub mod config;
mod error;
mod matrix;
pub mod projection;
mod traits;
pub mod transform;
mod vector;

pub use error::{Error, Result};
pub use matrix::*;
pub use traits::*;
pub use vector::*;

/// The default scalar type.
#[cfg(not(feature = "f64"))]
pub type Real = f32;

/// The default scalar type.
#[cfg(feature = "f64")]
pub type Real = f64;
