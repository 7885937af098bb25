//! Actuator stop-reason decoding.
//!
//! The actuator reports why a move ended as a single wire code. Every
//! code other than "reached full requested distance" maps to a danger
//! kind; a code this build does not recognize is surfaced explicitly as
//! [`DangerKind::Unmapped`] rather than dropped.

use disha_map::DangerKind;
use serde::{Deserialize, Serialize};

/// Cause reported by the actuator for ending a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// The full requested distance was covered.
    FullDistance,
    /// Left bumper pressed.
    LeftBumper,
    /// Right bumper pressed.
    RightBumper,
    /// Both bumpers pressed.
    BothBumpers,
    /// Left cliff sensor fired.
    LeftCliff,
    /// Right cliff sensor fired.
    RightCliff,
    /// Front-left cliff sensor fired.
    FrontLeftCliff,
    /// Front-right cliff sensor fired.
    FrontRightCliff,
    /// White boundary tape under the front-left sensor.
    TapeFrontLeft,
    /// White boundary tape under the front-right sensor.
    TapeFrontRight,
    /// White boundary tape under the left sensor.
    TapeLeft,
    /// White boundary tape under the right sensor.
    TapeRight,
    /// Left wheel lost floor contact.
    LeftWheelDrop,
    /// Right wheel lost floor contact.
    RightWheelDrop,
    /// Both wheels lost floor contact.
    BothWheelDrops,
    /// A wire code with no known mapping.
    Unmapped(u8),
}

impl StopReason {
    /// Decode a wire code.
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => StopReason::FullDistance,
            1 => StopReason::LeftBumper,
            2 => StopReason::RightBumper,
            3 => StopReason::BothBumpers,
            4 => StopReason::LeftCliff,
            5 => StopReason::RightCliff,
            6 => StopReason::FrontLeftCliff,
            7 => StopReason::FrontRightCliff,
            8 => StopReason::TapeFrontLeft,
            9 => StopReason::TapeFrontRight,
            10 => StopReason::TapeLeft,
            11 => StopReason::TapeRight,
            12 => StopReason::LeftWheelDrop,
            13 => StopReason::RightWheelDrop,
            14 => StopReason::BothWheelDrops,
            other => StopReason::Unmapped(other),
        }
    }

    /// Danger kind this stop implies, or `None` for a clean stop.
    pub fn to_danger(self) -> Option<DangerKind> {
        match self {
            StopReason::FullDistance => None,
            StopReason::LeftBumper | StopReason::RightBumper | StopReason::BothBumpers => {
                Some(DangerKind::Bump)
            }
            StopReason::LeftCliff
            | StopReason::RightCliff
            | StopReason::FrontLeftCliff
            | StopReason::FrontRightCliff => Some(DangerKind::Cliff),
            StopReason::TapeFrontLeft
            | StopReason::TapeFrontRight
            | StopReason::TapeLeft
            | StopReason::TapeRight => Some(DangerKind::Tape),
            StopReason::LeftWheelDrop
            | StopReason::RightWheelDrop
            | StopReason::BothWheelDrops => Some(DangerKind::WheelDrop),
            StopReason::Unmapped(code) => Some(DangerKind::Unmapped(code)),
        }
    }
}
