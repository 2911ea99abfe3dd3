/// Alerting for the AquaSmart water-supply service.
///
/// Submodules:
/// - `supply` — days-remaining alert classification and banner text.

pub mod supply;
