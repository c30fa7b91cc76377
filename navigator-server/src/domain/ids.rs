//! Identifier types for stops, routes and buses.

use std::fmt;

/// Error returned when parsing an invalid identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} id: {reason}")]
pub struct InvalidId {
    kind: &'static str,
    reason: &'static str,
}

fn validate(s: &str, kind: &'static str) -> Result<(), InvalidId> {
    if s.is_empty() {
        return Err(InvalidId {
            kind,
            reason: "must not be empty",
        });
    }

    if s.chars().any(char::is_whitespace) {
        return Err(InvalidId {
            kind,
            reason: "must not contain whitespace",
        });
    }

    Ok(())
}

/// Defines a validated string identifier.
///
/// Every generated type is guaranteed non-empty and whitespace-free, and
/// deserializes through the same validation as `parse`.
macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Parse an identifier, rejecting empty or whitespace-containing input.
            pub fn parse(s: &str) -> Result<Self, InvalidId> {
                validate(s, $kind)?;
                Ok(Self(s.to_string()))
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = InvalidId;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                validate(&s, $kind)?;
                Ok(Self(s))
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

identifier!(
    /// Identifier of a stop, e.g. `stop_1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use navigator_server::domain::StopId;
    ///
    /// let id = StopId::parse("stop_1").unwrap();
    /// assert_eq!(id.as_str(), "stop_1");
    ///
    /// assert!(StopId::parse("").is_err());
    /// assert!(StopId::parse("stop 1").is_err());
    /// ```
    StopId,
    "stop"
);

identifier!(
    /// Identifier of a route, e.g. `route_A`.
    RouteId,
    "route"
);

identifier!(
    /// Identifier of a bus, e.g. `bus_101`.
    BusId,
    "bus"
);
