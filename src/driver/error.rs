use thiserror::Error;

#[derive(Debug, Error)]
pub enum DriverError {
    /// Station-day records referenced air-quality stations with no row in the
    /// distance matrix. Every offending id is collected before the run
    /// aborts, not just the first.
    #[error("Air-quality station(s) absent from the distance matrix: {}", .ids.join(", "))]
    UnknownStations { ids: Vec<String> },
}
