//! Route finder configuration.

/// Calibration constants and limits for route finding.
///
/// A leg's ETA is
/// `round(distance / speed * distance_weight + stops * minutes_per_stop) + boarding_offset_mins`,
/// where `distance` is from the assigned bus to the boarding stop and
/// `stops` is the number of stops ridden. The second leg of a connecting
/// journey also pays `transfer_penalty_mins`.
#[derive(Debug, Clone)]
pub struct FinderConfig {
    /// Minutes per (grid distance / bus speed).
    pub distance_weight: f64,

    /// Minutes per stop ridden.
    pub minutes_per_stop: f64,

    /// Fixed minutes added to every boarding.
    pub boarding_offset_mins: u32,

    /// Fixed minutes added to the second leg of a connecting journey.
    pub transfer_penalty_mins: u32,

    /// Maximum number of suggestions to return.
    pub max_results: usize,
}

impl FinderConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        distance_weight: f64,
        minutes_per_stop: f64,
        boarding_offset_mins: u32,
        transfer_penalty_mins: u32,
        max_results: usize,
    ) -> Self {
        Self {
            distance_weight,
            minutes_per_stop,
            boarding_offset_mins,
            transfer_penalty_mins,
            max_results,
        }
    }

    /// Override the result cap.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            distance_weight: 1.0,
            minutes_per_stop: 3.0,
            boarding_offset_mins: 5,
            transfer_penalty_mins: 5,
            max_results: 3,
        }
    }
}
