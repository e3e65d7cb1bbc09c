//! Platform-agnostic Switch controller emulation core.
//!
//! This crate provides the chip-independent pieces of a USB gamepad
//! emulator: controller state, report encoding, and a sequencing layer
//! that turns high-level intents into timed report updates. It can be
//! used both in embedded `no_std` environments and on host for testing.
//!
//! # Overview
//!
//! The crate is organized into several modules:
//!
//! - [`types`]: Button bitfield and hat switch ([`Buttons`], [`Hat`])
//! - [`stick`]: Tilt ratios and polar conversion ([`polar_to_tilt`], [`StickDirection`])
//! - [`report`]: The 8-byte wire report ([`SwitchReport`])
//! - [`controller`]: Controller-state component ([`SwitchController`], [`ReportSink`])
//! - [`sequence`]: Timed input sequences ([`Sequencer`])
//!
//! # Example
//!
//! ```ignore
//! use switch_core::{Buttons, Sequencer, StickDirection, SwitchController};
//!
//! let controller = SwitchController::new(sink);
//! let mut seq = Sequencer::new(controller, delay);
//!
//! // Tap A three times, 200 ms apart
//! seq.tap_button(Buttons::A, 200, 3).await?;
//! // Walk forward for a second
//! seq.flick_left_stick(StickDirection::Up, 1000, 100).await?;
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod controller;
pub mod report;
pub mod sequence;
pub mod stick;
pub mod types;

// Re-export main types at crate root
pub use controller::{Controller, ReportSink, SinkError, SwitchController};
pub use report::SwitchReport;
pub use sequence::{Sequencer, DEFAULT_TAP_MS};
pub use stick::{polar_to_tilt, tilt_to_axis, StickDirection, AXIS_CENTER, AXIS_MAX, AXIS_MIN};
pub use types::{Buttons, Hat};
