//! UART input source for raw report passthrough.
//!
//! Reads fixed 8-byte input reports from UART and hands them to the USB
//! output unmodified, so a host-side script can drive the pad directly.
//!
//! # Frame format
//!
//! `[buttons_lo, buttons_hi, hat, lx, ly, rx, ry, vendor]` - the
//! [`SwitchReport`] wire layout, no framing bytes, no checksum.
//!
//! # Pins
//!
//! Uses UART1 by default:
//! - GPIO 8: TX
//! - GPIO 9: RX
//! - GPIO 10: CTS (optional, with `uart-flow-control` feature)
//! - GPIO 11: RTS (optional, with `uart-flow-control` feature)

use defmt::Format;
use embassy_rp::uart::{Async, Error as UartError, UartRx};
use switch_core::SwitchReport;

/// Error type for raw frame reception.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum FrameError {
    /// UART/communication I/O error.
    Io,
    /// UART framing error.
    Framing,
    /// Receive FIFO overrun.
    Overrun,
}

/// Convert UART errors to [`FrameError`].
///
/// This is a helper function instead of a `From` impl because `UartError`
/// is defined in an external crate.
#[inline]
fn uart_error_to_frame_error(e: UartError) -> FrameError {
    match e {
        UartError::Framing => FrameError::Framing,
        UartError::Overrun => FrameError::Overrun,
        _ => FrameError::Io,
    }
}

/// UART-based source of raw input reports.
pub struct RawReportSource<'d> {
    rx: UartRx<'d, Async>,
}

impl<'d> RawReportSource<'d> {
    /// Create a new raw report source from the given UART receiver.
    #[must_use]
    pub fn new(rx: UartRx<'d, Async>) -> Self {
        Self { rx }
    }

    /// Wait for and receive the next 8-byte report frame.
    ///
    /// The stream has no resynchronization marker; the sender is trusted
    /// to emit whole frames, as the wire format dictates.
    pub async fn receive(&mut self) -> Result<SwitchReport, FrameError> {
        let mut frame = [0u8; SwitchReport::SIZE];
        self.rx
            .read(&mut frame)
            .await
            .map_err(uart_error_to_frame_error)?;
        Ok(SwitchReport::from_bytes(frame))
    }
}
