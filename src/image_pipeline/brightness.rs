//! Colour brightness measurement and adjustment

use tracing::{debug, trace};

use crate::image_pipeline::common::color::Color;
use crate::image_pipeline::common::error::{ConversionError, Result};

/// Mean of the red, green and blue channels, truncated to a whole number.
pub fn brightness(color: Color) -> f64 {
    ((color.r as u32 + color.g as u32 + color.b as u32) / 3) as f64
}

/// Moves `color` towards the `target` brightness one unit per channel per step.
///
/// The direction is chosen once. Channels that reach 0 or 255 stop moving while
/// the others continue, so each channel keeps the sign of its deviation from the
/// mean. A target outside `[0, 255]`, a non-finite target, or one equal to the
/// current brightness returns the colour unchanged. When every channel is
/// clamped before the target is met (e.g. a fractional target) the result is
/// [`ConversionError::TargetUnreachable`]. Alpha is never modified.
pub fn with_brightness(color: Color, target: f64) -> Result<Color> {
    if !target.is_finite() || !(0.0..=255.0).contains(&target) || brightness(color) == target {
        return Ok(color);
    }

    let direction = if brightness(color) > target {
        Direction::Down
    } else {
        Direction::Up
    };
    debug!(?color, target, ?direction, "Adjusting brightness");

    let mut color = color;
    let mut state = State::Stepping;
    let mut steps = 0u32;
    loop {
        state = match state {
            State::Stepping if brightness(color) == target => State::Converged,
            State::Stepping if direction.all_clamped(color) => State::Saturated,
            State::Stepping => {
                color = direction.step(color);
                steps += 1;
                trace!(?color, steps, "Brightness step");
                State::Stepping
            }
            State::Converged => {
                debug!(?color, steps, "Brightness converged");
                return Ok(color);
            }
            State::Saturated => {
                debug!(?color, steps, "Brightness saturated");
                return Err(ConversionError::TargetUnreachable {
                    target,
                    reached: color,
                });
            }
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Stepping,
    Converged,
    Saturated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

impl Direction {
    fn step_channel(self, channel: u8) -> u8 {
        match self {
            Direction::Up => channel.saturating_add(1),
            Direction::Down => channel.saturating_sub(1),
        }
    }

    fn step(self, color: Color) -> Color {
        Color {
            a: color.a,
            r: self.step_channel(color.r),
            g: self.step_channel(color.g),
            b: self.step_channel(color.b),
        }
    }

    fn all_clamped(self, color: Color) -> bool {
        let limit = match self {
            Direction::Up => u8::MAX,
            Direction::Down => u8::MIN,
        };
        color.r == limit && color.g == limit && color.b == limit
    }
}
