//! Scripted Switch controller emulator for RP2040.
//!
//! This crate provides the embedded implementation of a USB pad emulator
//! that presents itself to the console as a HORI-licensed wired
//! controller and drives it from compiled macro sequences or from raw
//! reports received over UART.
//!
//! # Overview
//!
//! The firmware runs on a Raspberry Pi Pico (RP2040) and, depending on
//! the selected mode:
//!
//! - **`demo-macros`** (default): loops a scripted input sequence
//!   through the [`Sequencer`] (taps, combos, D-pad sweeps, stick tilts)
//! - **`serial-passthrough`**: receives raw 8-byte input reports over
//!   UART (115200 baud, 8N1) and forwards them to USB unmodified
//!
//! # Hardware Configuration
//!
//! | Function | GPIO | Description |
//! |----------|------|-------------|
//! | UART1 TX | 8    | Serial transmit |
//! | UART1 RX | 9    | Serial receive (raw report input) |
//! | LED      | 25   | On-board LED (error indicator) |
//!
//! # Architecture
//!
//! The firmware uses the Embassy async runtime. In passthrough mode it
//! runs three concurrent tasks (USB stack, UART input, USB output)
//! communicating through an Embassy [`Signal`](embassy_sync::signal::Signal)
//! with "latest value wins" semantics. In demo mode a single macro task
//! owns the sequencer and the USB stack runs alongside it.
//!
//! # Modules
//!
//! - [`usb_output`]: USB HID report sink ([`UsbReportSink`])
//! - [`serial_input`]: raw report frames from UART ([`RawReportSource`])
//! - [`demo`]: the built-in demonstration script
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)
//! - **`demo-macros`** (default): Run the built-in macro script
//! - **`serial-passthrough`**: Bridge raw UART reports to USB
//! - **`uart-flow-control`**: Enable hardware flow control (CTS/RTS on GPIO 10/11)
//!
//! # Re-exports
//!
//! This crate re-exports the public items from [`switch_core`] for
//! convenience, so consumers only need to depend on this crate.

#![no_std]

// The sequencer and the passthrough bridge both own the USB report sink
#[cfg(all(feature = "demo-macros", feature = "serial-passthrough"))]
compile_error!("Cannot enable both `demo-macros` and `serial-passthrough` features - exactly one may own the USB output");

#[cfg(not(any(feature = "demo-macros", feature = "serial-passthrough")))]
compile_error!("Select an operating mode: `demo-macros` or `serial-passthrough`");

// Re-export core types for convenience
pub use switch_core::{
    polar_to_tilt, tilt_to_axis, Buttons, Controller, Hat, ReportSink, Sequencer, SinkError,
    StickDirection, SwitchController, SwitchReport, DEFAULT_TAP_MS,
};

#[cfg(feature = "demo-macros")]
pub mod demo;

#[cfg(feature = "serial-passthrough")]
pub mod serial_input;

pub mod usb_output;

#[cfg(feature = "serial-passthrough")]
pub use serial_input::{FrameError, RawReportSource};

pub use usb_output::{configure_usb_hid, PadRequestHandler, UsbReportSink, REPORT_DESCRIPTOR};
