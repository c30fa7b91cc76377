//! JSON network files.
//!
//! A network file bundles the static stops and routes with the initial
//! fleet:
//!
//! ```json
//! {
//!   "stops": [{ "id": "stop_1", "name": "Central Station", "position": { "lat": 5, "lng": 5 } }],
//!   "routes": [{ "id": "route_A", "name": "Route A", "stops": ["stop_1", "stop_2"] }],
//!   "buses": [{ "id": "bus_101", "route_id": "route_A", "current_stop_index": 0,
//!               "progress": 0.5, "speed": 0.1, "position": { "lat": 5, "lng": 10 } }]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{Bus, Route, Stop};

use super::TransitNetwork;
use super::error::NetworkError;

/// The sample network shipped with the server.
const SAMPLE_JSON: &str = include_str!("sample.json");

/// Raw contents of a network file, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkFile {
    pub stops: Vec<Stop>,
    pub routes: Vec<Route>,
    #[serde(default)]
    pub buses: Vec<Bus>,
}

impl NetworkFile {
    /// Parse a network file from JSON text.
    pub fn from_json(json: &str) -> Result<Self, NetworkError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a network file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, NetworkError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| NetworkError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// The built-in sample: 16 stops on a 4x4 grid, four routes, five buses.
    pub fn sample() -> Result<Self, NetworkError> {
        Self::from_json(SAMPLE_JSON)
    }

    /// Validate the file into a network and its initial fleet.
    pub fn into_parts(self) -> Result<(TransitNetwork, Vec<Bus>), NetworkError> {
        let network = TransitNetwork::new(self.stops, self.routes)?;
        network.validate_fleet(&self.buses)?;
        Ok((network, self.buses))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn sample_is_valid() {
        let (network, buses) = NetworkFile::sample().unwrap().into_parts().unwrap();
        assert_eq!(network.stops().len(), 16);
        assert_eq!(network.routes().len(), 4);
        assert_eq!(buses.len(), 5);
        assert_eq!(buses[0].id.as_str(), "bus_101");
    }

    #[test]
    fn load_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("network.json");
        std::fs::write(&path, SAMPLE_JSON).unwrap();

        let file = NetworkFile::load(&path).unwrap();
        assert_eq!(file.stops.len(), 16);
        assert_eq!(file.routes[2].id.as_str(), "route_C");
    }

    #[test]
    fn buses_are_optional() {
        let json = r#"{
            "stops": [
                { "id": "a", "name": "A", "position": { "lat": 0, "lng": 0 } },
                { "id": "b", "name": "B", "position": { "lat": 0, "lng": 10 } }
            ],
            "routes": [{ "id": "r", "name": "R", "stops": ["a", "b"] }]
        }"#;

        let (network, buses) = NetworkFile::from_json(json).unwrap().into_parts().unwrap();
        assert_eq!(network.routes().len(), 1);
        assert!(buses.is_empty());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let err = NetworkFile::load(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, NetworkError::Io { .. }));
    }

    #[test]
    fn malformed_json_is_json_error() {
        let err = NetworkFile::from_json("{ \"stops\": [").unwrap_err();
        assert!(matches!(err, NetworkError::Json(_)));
    }

    #[test]
    fn invalid_id_in_file_is_rejected() {
        let json = r#"{
            "stops": [{ "id": "", "name": "Nowhere", "position": { "lat": 0, "lng": 0 } }],
            "routes": []
        }"#;
        assert!(matches!(
            NetworkFile::from_json(json).unwrap_err(),
            NetworkError::Json(_)
        ));
    }

    #[test]
    fn fleet_errors_surface_from_into_parts() {
        let mut file = NetworkFile::sample().unwrap();
        file.buses[0].speed = 0.0;
        assert!(matches!(
            file.into_parts().unwrap_err(),
            NetworkError::InvalidSpeed(_)
        ));
    }
}
