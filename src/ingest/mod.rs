/// Data collaborators feeding the dashboard.
///
/// Each source gets its own file: URL construction, response parsing and
/// the blocking fetch live together, parsers are pure so they can be
/// tested against `fixtures`.

pub mod open_meteo;
pub mod sabesp;
pub mod synthetic;

#[cfg(test)]
pub(crate) mod fixtures;
