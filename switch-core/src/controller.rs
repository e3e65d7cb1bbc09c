//! Controller state tracking and the report transport seam.

use core::future::Future;

use crate::report::SwitchReport;
use crate::stick::tilt_to_axis;
use crate::types::{Buttons, Hat};

/// Error type for report transmission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SinkError {
    /// USB/communication I/O error.
    Io,
    /// Device not ready (e.g., USB not enumerated).
    NotReady,
}

/// Async trait for report sinks.
///
/// This trait abstracts the destination for input reports, enabling
/// different transports (USB HID, BLE HID, serial debug, etc.).
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap allocation.
pub trait ReportSink {
    /// Transmit an input report to the host.
    ///
    /// May block until the previous report has been sent.
    fn send(&mut self, report: &SwitchReport) -> impl Future<Output = Result<(), SinkError>>;

    /// Check if the sink is ready to accept reports.
    fn is_ready(&self) -> bool;
}

/// Async trait for the controller-state component.
///
/// This is the surface the sequencing layer drives: operations that
/// mutate button/hat/stick state and transmit the resulting report.
/// Abstracting it keeps the sequencer testable without a transport.
pub trait Controller {
    /// Press the given button(s), transmitting the updated report.
    fn press_buttons(&mut self, buttons: Buttons) -> impl Future<Output = Result<(), SinkError>>;

    /// Release the given button(s), transmitting the updated report.
    fn release_buttons(&mut self, buttons: Buttons) -> impl Future<Output = Result<(), SinkError>>;

    /// Set the hat switch direction, transmitting the updated report.
    fn press_hat(&mut self, hat: Hat) -> impl Future<Output = Result<(), SinkError>>;

    /// Release the hat switch to neutral, transmitting the updated report.
    fn release_hat(&mut self) -> impl Future<Output = Result<(), SinkError>>;

    /// Set all four stick tilt ratios (-100..=100 percent per axis),
    /// transmitting the updated report.
    fn set_stick_tilt(
        &mut self,
        lx: i8,
        ly: i8,
        rx: i8,
        ry: i8,
    ) -> impl Future<Output = Result<(), SinkError>>;

    /// Transmit a caller-supplied report without touching tracked state.
    fn send_raw(&mut self, report: &SwitchReport) -> impl Future<Output = Result<(), SinkError>>;
}

/// Controller-state component backed by a [`ReportSink`].
///
/// Owns the tracked input state (buttons, hat, stick tilt ratios) and
/// transmits a freshly rendered report after every mutation, so the host
/// always sees the current state.
pub struct SwitchController<S> {
    buttons: Buttons,
    hat: Hat,
    tilt: [i8; 4], // lx, ly, rx, ry
    sink: S,
}

impl<S: ReportSink> SwitchController<S> {
    /// Create a new controller in the neutral state.
    pub fn new(sink: S) -> Self {
        Self {
            buttons: Buttons::NONE,
            hat: Hat::Neutral,
            tilt: [0; 4],
            sink,
        }
    }

    /// Currently pressed buttons.
    #[inline]
    #[must_use]
    pub fn buttons(&self) -> Buttons {
        self.buttons
    }

    /// Current hat direction.
    #[inline]
    #[must_use]
    pub fn hat(&self) -> Hat {
        self.hat
    }

    /// Render the tracked state as a wire report.
    #[must_use]
    pub fn report(&self) -> SwitchReport {
        SwitchReport {
            buttons: self.buttons.raw(),
            hat: self.hat.raw(),
            lx: tilt_to_axis(self.tilt[0]),
            ly: tilt_to_axis(self.tilt[1]),
            rx: tilt_to_axis(self.tilt[2]),
            ry: tilt_to_axis(self.tilt[3]),
            vendor: 0,
        }
    }

    /// Get a reference to the report sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Get a mutable reference to the report sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Decompose into the underlying sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    async fn transmit(&mut self) -> Result<(), SinkError> {
        let report = self.report();
        self.sink.send(&report).await
    }
}

impl<S: ReportSink> Controller for SwitchController<S> {
    async fn press_buttons(&mut self, buttons: Buttons) -> Result<(), SinkError> {
        self.buttons |= buttons;
        self.transmit().await
    }

    async fn release_buttons(&mut self, buttons: Buttons) -> Result<(), SinkError> {
        self.buttons &= !buttons;
        self.transmit().await
    }

    async fn press_hat(&mut self, hat: Hat) -> Result<(), SinkError> {
        self.hat = hat;
        self.transmit().await
    }

    async fn release_hat(&mut self) -> Result<(), SinkError> {
        self.hat = Hat::Neutral;
        self.transmit().await
    }

    async fn set_stick_tilt(&mut self, lx: i8, ly: i8, rx: i8, ry: i8) -> Result<(), SinkError> {
        self.tilt = [lx, ly, rx, ry];
        self.transmit().await
    }

    async fn send_raw(&mut self, report: &SwitchReport) -> Result<(), SinkError> {
        self.sink.send(report).await
    }
}
