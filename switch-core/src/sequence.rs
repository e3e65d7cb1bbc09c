//! Sequencer: timed press/hold/release sequences over a controller.
//!
//! Translates high-level intents ("tap A three times", "tilt the left
//! stick to 45 degrees at half power for a second") into timed sequences
//! of controller-state updates. Execution is strictly sequential with
//! blocking async sleeps; the only error source is the report transport.

use embedded_hal_async::delay::DelayNs;

use crate::controller::{Controller, SinkError};
use crate::report::SwitchReport;
use crate::stick::{polar_to_tilt, StickDirection};
use crate::types::{Buttons, Hat};

/// Default time from pressing to releasing a button, in milliseconds.
pub const DEFAULT_TAP_MS: u32 = 40;

/// Drives a [`Controller`] through timed input sequences.
///
/// Generic over the controller-state component and the delay provider,
/// so sequences run unchanged on hardware (`embassy_time::Delay`) and in
/// host tests (mock delay).
pub struct Sequencer<C, D> {
    controller: C,
    delay: D,
    tap_ms: u32,
}

impl<C: Controller, D: DelayNs> Sequencer<C, D> {
    /// Create a sequencer with the default tap duration.
    pub fn new(controller: C, delay: D) -> Self {
        Self {
            controller,
            delay,
            tap_ms: DEFAULT_TAP_MS,
        }
    }

    /// Override the tap duration (time from press to release).
    #[must_use]
    pub fn with_tap_duration(mut self, tap_ms: u32) -> Self {
        self.tap_ms = tap_ms;
        self
    }

    /// Current tap duration in milliseconds.
    #[inline]
    #[must_use]
    pub fn tap_duration(&self) -> u32 {
        self.tap_ms
    }

    /// Get a reference to the controller.
    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// Get a mutable reference to the controller.
    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    /// Decompose into the controller and delay provider.
    pub fn into_parts(self) -> (C, D) {
        (self.controller, self.delay)
    }

    /// Tap button(s): press for the tap duration, release, then wait
    /// `delay_after_ms`. Repeated `repeat` times.
    ///
    /// `button` may be a combination, pressed simultaneously.
    pub async fn tap_button(
        &mut self,
        button: Buttons,
        delay_after_ms: u32,
        repeat: u32,
    ) -> Result<(), SinkError> {
        let hold_ms = self.tap_ms;
        self.hold_button(button, hold_ms, delay_after_ms, repeat).await
    }

    /// Hold button(s) for an explicit duration, release, then wait
    /// `delay_after_ms`. Repeated `repeat` times.
    pub async fn hold_button(
        &mut self,
        button: Buttons,
        hold_ms: u32,
        delay_after_ms: u32,
        repeat: u32,
    ) -> Result<(), SinkError> {
        for _ in 0..repeat {
            self.controller.press_buttons(button).await?;
            self.delay.delay_ms(hold_ms).await;
            self.controller.release_buttons(button).await?;
            self.delay.delay_ms(delay_after_ms).await;
        }
        Ok(())
    }

    /// Tap a hat direction: press for the tap duration, release, then
    /// wait `delay_after_ms`. Repeated `repeat` times.
    pub async fn tap_hat(
        &mut self,
        hat: Hat,
        delay_after_ms: u32,
        repeat: u32,
    ) -> Result<(), SinkError> {
        for _ in 0..repeat {
            self.controller.press_hat(hat).await?;
            self.delay.delay_ms(self.tap_ms).await;
            self.controller.release_hat().await?;
            self.delay.delay_ms(delay_after_ms).await;
        }
        Ok(())
    }

    /// Hold a hat direction for `hold_ms`, release, then wait one tap
    /// duration.
    pub async fn hold_hat(&mut self, hat: Hat, hold_ms: u32) -> Result<(), SinkError> {
        self.controller.press_hat(hat).await?;
        self.delay.delay_ms(hold_ms).await;
        self.controller.release_hat().await?;
        self.delay.delay_ms(self.tap_ms).await;
        Ok(())
    }

    /// Flick the left stick to full deflection in a cardinal direction.
    ///
    /// Same contract as [`tilt_sticks`](Self::tilt_sticks): a zero
    /// `delay_after_ms` leaves the stick deflected.
    pub async fn flick_left_stick(
        &mut self,
        direction: StickDirection,
        hold_ms: u32,
        delay_after_ms: u32,
    ) -> Result<(), SinkError> {
        let (x, y) = direction.tilt();
        self.tilt_sticks(x, y, 0, 0, hold_ms, delay_after_ms).await
    }

    /// Flick the right stick to full deflection in a cardinal direction.
    ///
    /// Same contract as [`tilt_sticks`](Self::tilt_sticks): a zero
    /// `delay_after_ms` leaves the stick deflected.
    pub async fn flick_right_stick(
        &mut self,
        direction: StickDirection,
        hold_ms: u32,
        delay_after_ms: u32,
    ) -> Result<(), SinkError> {
        let (x, y) = direction.tilt();
        self.tilt_sticks(0, 0, x, y, hold_ms, delay_after_ms).await
    }

    /// Tilt the left stick to a polar position: `direction_deg` clockwise
    /// from stick-up, `power` 0.0..=1.0.
    ///
    /// A zero `hold_ms` leaves the stick deflected (for sustained
    /// movement); otherwise the stick recenters after the hold, followed
    /// by an optional `delay_after_ms` wait.
    pub async fn tilt_left_stick(
        &mut self,
        direction_deg: i32,
        power: f32,
        hold_ms: u32,
        delay_after_ms: u32,
    ) -> Result<(), SinkError> {
        let (x, y) = polar_to_tilt(direction_deg, power);
        self.controller.set_stick_tilt(x, y, 0, 0).await?;
        if hold_ms > 0 {
            self.delay.delay_ms(hold_ms).await;
            self.controller.set_stick_tilt(0, 0, 0, 0).await?;
        }
        if delay_after_ms > 0 {
            self.delay.delay_ms(delay_after_ms).await;
        }
        Ok(())
    }

    /// Set all four stick tilt ratios (-100..=100 percent per axis) and
    /// hold for `hold_ms`.
    ///
    /// A zero `delay_after_ms` leaves the sticks deflected (for sustained
    /// movement); otherwise the sticks recenter and the sequencer waits
    /// `delay_after_ms`.
    pub async fn tilt_sticks(
        &mut self,
        lx: i8,
        ly: i8,
        rx: i8,
        ry: i8,
        hold_ms: u32,
        delay_after_ms: u32,
    ) -> Result<(), SinkError> {
        self.controller.set_stick_tilt(lx, ly, rx, ry).await?;
        self.delay.delay_ms(hold_ms).await;
        if delay_after_ms > 0 {
            self.controller.set_stick_tilt(0, 0, 0, 0).await?;
            self.delay.delay_ms(delay_after_ms).await;
        }
        Ok(())
    }

    /// Recenter both sticks and release the hat.
    ///
    /// Buttons are not touched: they are always released by the tap/hold
    /// sequence that pressed them.
    pub async fn reset(&mut self) -> Result<(), SinkError> {
        self.controller.set_stick_tilt(0, 0, 0, 0).await?;
        self.controller.release_hat().await
    }

    /// Transmit a raw report, bypassing tracked state.
    pub async fn send_raw(&mut self, report: &SwitchReport) -> Result<(), SinkError> {
        self.controller.send_raw(report).await
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::testing::block_on;
    use std::vec;
    use std::vec::Vec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Event {
        Press(Buttons),
        Release(Buttons),
        PressHat(Hat),
        ReleaseHat,
        Tilt(i8, i8, i8, i8),
        Raw(SwitchReport),
    }

    // Records controller operations in order
    struct MockController {
        events: Vec<Event>,
    }

    impl MockController {
        fn new() -> Self {
            Self { events: Vec::new() }
        }
    }

    impl Controller for MockController {
        async fn press_buttons(&mut self, buttons: Buttons) -> Result<(), SinkError> {
            self.events.push(Event::Press(buttons));
            Ok(())
        }

        async fn release_buttons(&mut self, buttons: Buttons) -> Result<(), SinkError> {
            self.events.push(Event::Release(buttons));
            Ok(())
        }

        async fn press_hat(&mut self, hat: Hat) -> Result<(), SinkError> {
            self.events.push(Event::PressHat(hat));
            Ok(())
        }

        async fn release_hat(&mut self) -> Result<(), SinkError> {
            self.events.push(Event::ReleaseHat);
            Ok(())
        }

        async fn set_stick_tilt(
            &mut self,
            lx: i8,
            ly: i8,
            rx: i8,
            ry: i8,
        ) -> Result<(), SinkError> {
            self.events.push(Event::Tilt(lx, ly, rx, ry));
            Ok(())
        }

        async fn send_raw(&mut self, report: &SwitchReport) -> Result<(), SinkError> {
            self.events.push(Event::Raw(*report));
            Ok(())
        }
    }

    // Records requested sleeps instead of waiting
    struct MockDelay {
        slept_ms: Vec<u32>,
    }

    impl MockDelay {
        fn new() -> Self {
            Self { slept_ms: Vec::new() }
        }
    }

    impl DelayNs for MockDelay {
        async fn delay_ns(&mut self, ns: u32) {
            self.slept_ms.push(ns / 1_000_000);
        }

        async fn delay_ms(&mut self, ms: u32) {
            self.slept_ms.push(ms);
        }
    }

    fn sequencer() -> Sequencer<MockController, MockDelay> {
        Sequencer::new(MockController::new(), MockDelay::new())
    }

    #[test]
    fn test_tap_button_press_then_release() {
        let mut seq = sequencer();
        block_on(seq.tap_button(Buttons::A, 200, 1)).unwrap();

        let (controller, delay) = seq.into_parts();
        assert_eq!(
            controller.events,
            vec![Event::Press(Buttons::A), Event::Release(Buttons::A)]
        );
        assert_eq!(delay.slept_ms, vec![DEFAULT_TAP_MS, 200]);
    }

    #[test]
    fn test_tap_button_repeats() {
        let mut seq = sequencer();
        block_on(seq.tap_button(Buttons::B, 100, 3)).unwrap();

        let (controller, delay) = seq.into_parts();
        assert_eq!(controller.events.len(), 6);
        assert_eq!(delay.slept_ms.len(), 6);
    }

    #[test]
    fn test_zero_repeat_is_noop() {
        let mut seq = sequencer();
        block_on(seq.tap_button(Buttons::A, 100, 0)).unwrap();

        let (controller, delay) = seq.into_parts();
        assert!(controller.events.is_empty());
        assert!(delay.slept_ms.is_empty());
    }

    #[test]
    fn test_hold_button_uses_explicit_duration() {
        let mut seq = sequencer();
        block_on(seq.hold_button(Buttons::ZL, 1500, 50, 1)).unwrap();

        let (_, delay) = seq.into_parts();
        assert_eq!(delay.slept_ms, vec![1500, 50]);
    }

    #[test]
    fn test_custom_tap_duration() {
        let mut seq = sequencer().with_tap_duration(80);
        block_on(seq.tap_button(Buttons::A, 0, 1)).unwrap();

        let (_, delay) = seq.into_parts();
        assert_eq!(delay.slept_ms, vec![80, 0]);
    }

    #[test]
    fn test_button_combo_pressed_simultaneously() {
        let mut seq = sequencer();
        block_on(seq.tap_button(Buttons::A | Buttons::B, 0, 1)).unwrap();

        let (controller, _) = seq.into_parts();
        assert_eq!(controller.events[0], Event::Press(Buttons::A | Buttons::B));
    }

    #[test]
    fn test_tap_hat() {
        let mut seq = sequencer();
        block_on(seq.tap_hat(Hat::Left, 120, 2)).unwrap();

        let (controller, delay) = seq.into_parts();
        assert_eq!(
            controller.events,
            vec![
                Event::PressHat(Hat::Left),
                Event::ReleaseHat,
                Event::PressHat(Hat::Left),
                Event::ReleaseHat,
            ]
        );
        assert_eq!(delay.slept_ms, vec![DEFAULT_TAP_MS, 120, DEFAULT_TAP_MS, 120]);
    }

    #[test]
    fn test_hold_hat_trailing_tap_delay() {
        let mut seq = sequencer();
        block_on(seq.hold_hat(Hat::Up, 500)).unwrap();

        let (controller, delay) = seq.into_parts();
        assert_eq!(
            controller.events,
            vec![Event::PressHat(Hat::Up), Event::ReleaseHat]
        );
        assert_eq!(delay.slept_ms, vec![500, DEFAULT_TAP_MS]);
    }

    #[test]
    fn test_flick_left_stick_recenters() {
        let mut seq = sequencer();
        block_on(seq.flick_left_stick(StickDirection::Up, 300, 100)).unwrap();

        let (controller, delay) = seq.into_parts();
        assert_eq!(
            controller.events,
            vec![Event::Tilt(0, -100, 0, 0), Event::Tilt(0, 0, 0, 0)]
        );
        assert_eq!(delay.slept_ms, vec![300, 100]);
    }

    #[test]
    fn test_flick_right_stick_uses_right_axes() {
        let mut seq = sequencer();
        block_on(seq.flick_right_stick(StickDirection::Right, 300, 100)).unwrap();

        let (controller, _) = seq.into_parts();
        assert_eq!(controller.events[0], Event::Tilt(0, 0, 100, 0));
    }

    #[test]
    fn test_tilt_sticks_zero_after_delay_leaves_deflection() {
        let mut seq = sequencer();
        block_on(seq.tilt_sticks(50, -50, 0, 0, 200, 0)).unwrap();

        let (controller, delay) = seq.into_parts();
        assert_eq!(controller.events, vec![Event::Tilt(50, -50, 0, 0)]);
        assert_eq!(delay.slept_ms, vec![200]);
    }

    #[test]
    fn test_tilt_left_stick_polar() {
        let mut seq = sequencer();
        block_on(seq.tilt_left_stick(90, 1.0, 250, 50)).unwrap();

        let (controller, delay) = seq.into_parts();
        assert_eq!(
            controller.events,
            vec![Event::Tilt(100, 0, 0, 0), Event::Tilt(0, 0, 0, 0)]
        );
        assert_eq!(delay.slept_ms, vec![250, 50]);
    }

    #[test]
    fn test_tilt_left_stick_zero_hold_leaves_deflection() {
        let mut seq = sequencer();
        block_on(seq.tilt_left_stick(180, 1.0, 0, 0)).unwrap();

        let (controller, delay) = seq.into_parts();
        assert_eq!(controller.events, vec![Event::Tilt(0, 100, 0, 0)]);
        assert!(delay.slept_ms.is_empty());
    }

    #[test]
    fn test_reset_centers_sticks_and_hat_only() {
        let mut seq = sequencer();
        block_on(seq.reset()).unwrap();

        let (controller, _) = seq.into_parts();
        assert_eq!(
            controller.events,
            vec![Event::Tilt(0, 0, 0, 0), Event::ReleaseHat]
        );
    }

    #[test]
    fn test_send_raw_passes_through() {
        let mut seq = sequencer();
        let report = SwitchReport {
            buttons: Buttons::HOME.raw(),
            ..SwitchReport::neutral()
        };
        block_on(seq.send_raw(&report)).unwrap();

        let (controller, _) = seq.into_parts();
        assert_eq!(controller.events, vec![Event::Raw(report)]);
    }
}
