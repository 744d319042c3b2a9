//! Digital watch face logic for the PineTime
//!
//! Everything here is independent of the nRF52832 and runs on the host for
//! testing:
//!
//! - `system`: clock and battery capabilities consumed by the face
//! - `face`: the watch face controller, its timers and the date scheduler
//! - `ui`: the display surface trait, text formatting and an
//!   `embedded-graphics` renderer for the 240x240 LCD
//! - `config`: tunable timing and gauge constants

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod face;
pub mod system;
pub mod ui;

pub use config::FaceConfig;
pub use error::Error;
pub use face::{Event, Mode, Visibility, WatchFace};
