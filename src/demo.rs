//! Built-in macro demonstration script.
//!
//! Exercises every kind of sequenced input once per pass: single taps,
//! a simultaneous button combo, a D-pad sweep, stick flicks, and a polar
//! tilt circle.

use embedded_hal_async::delay::DelayNs;
use switch_core::{Buttons, Controller, Hat, Sequencer, SinkError, StickDirection};

/// Run one pass of the demonstration script.
pub async fn run<C: Controller, D: DelayNs>(seq: &mut Sequencer<C, D>) -> Result<(), SinkError> {
    // Single taps, 200 ms apart
    for button in [Buttons::A, Buttons::B, Buttons::X, Buttons::Y] {
        seq.tap_button(button, 200, 1).await?;
    }

    // Simultaneous combo, then a held trigger pair
    seq.tap_button(Buttons::A | Buttons::B, 300, 1).await?;
    seq.hold_button(Buttons::ZL | Buttons::ZR, 500, 300, 1).await?;

    // D-pad sweep, twice around
    for hat in [Hat::Up, Hat::Right, Hat::Down, Hat::Left] {
        seq.tap_hat(hat, 150, 2).await?;
    }
    seq.hold_hat(Hat::Up, 500).await?;

    // Left stick flicks in all four directions
    for direction in [
        StickDirection::Up,
        StickDirection::Right,
        StickDirection::Down,
        StickDirection::Left,
    ] {
        seq.flick_left_stick(direction, 300, 100).await?;
    }
    seq.flick_right_stick(StickDirection::Right, 300, 100).await?;

    // Full-power circle on the left stick, then a gentle half-power nudge
    for angle in (0..360).step_by(45) {
        seq.tilt_left_stick(angle, 1.0, 100, 0).await?;
    }
    seq.tilt_left_stick(0, 0.5, 400, 100).await?;

    seq.reset().await
}
