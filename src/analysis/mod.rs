/// Water balance analysis for the AquaSmart water-supply service.
///
/// Submodules:
/// - `balance`    — clipped level accumulation and trailing-window trend.
/// - `projection` — days-of-supply projection and the projector entry point.

pub mod balance;
pub mod projection;
