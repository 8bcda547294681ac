//! Zone model and the fixed Mallorca coastal zone table

use serde::Serialize;

/// One named coastal zone with fixed coordinates
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct Zone {
    /// Human-readable zone name
    pub name: &'static str,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
}

impl Zone {
    /// Format zone coordinates as a string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.2}, {:.2}", self.latitude, self.longitude)
    }
}

/// The fixed zone table. Order matters: ranking ties are broken by the
/// position of the zone in this table.
pub const MALLORCA_ZONES: &[Zone] = &[
    Zone {
        name: "Isla Dragonera",
        latitude: 39.60,
        longitude: 2.30,
    },
    Zone {
        name: "Isla de Cabrera",
        latitude: 39.17,
        longitude: 2.89,
    },
    Zone {
        name: "Bahía de Palma",
        latitude: 39.57,
        longitude: 2.73,
    },
    Zone {
        name: "Portals Vells",
        latitude: 39.52,
        longitude: 2.54,
    },
    Zone {
        name: "Llucmajor",
        latitude: 39.33,
        longitude: 3.07,
    },
    Zone {
        name: "Punta Negra",
        latitude: 39.45,
        longitude: 3.00,
    },
    Zone {
        name: "Cala d'Or",
        latitude: 39.35,
        longitude: 3.40,
    },
    Zone {
        name: "Porto Cristo",
        latitude: 39.42,
        longitude: 3.41,
    },
    Zone {
        name: "Cala Millor",
        latitude: 39.49,
        longitude: 3.38,
    },
    Zone {
        name: "Bahía Pollença",
        latitude: 39.83,
        longitude: 3.09,
    },
    Zone {
        name: "Alcúdia",
        latitude: 39.85,
        longitude: 3.11,
    },
    Zone {
        name: "Can Picafort",
        latitude: 39.73,
        longitude: 3.14,
    },
    Zone {
        name: "Formentor",
        latitude: 39.96,
        longitude: 3.25,
    },
    Zone {
        name: "Cala Sant Vicenç",
        latitude: 39.88,
        longitude: 3.13,
    },
    Zone {
        name: "Sóller",
        latitude: 39.77,
        longitude: 2.73,
    },
];
