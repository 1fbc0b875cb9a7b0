#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A point of interest shown as a map marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Place {
    pub id: &'static str,
    pub name: &'static str,
    pub coords: Coordinates,
    pub note: &'static str,
    /// Map zoom level used when jumping to the place.
    pub zoom: u8,
}

impl Place {
    /// Marker popup markup.
    pub fn popup_html(&self) -> String {
        format!("<strong>{}</strong><br>{}", self.name, self.note)
    }
}

pub const TYRE_CENTER: Coordinates = Coordinates {
    lat: 33.27083,
    lng: 35.19611,
};

pub static PLACES: [Place; 3] = [
    Place {
        id: "tyre",
        name: "Tyre / صور (Center)",
        coords: TYRE_CENTER,
        note: "General center point for navigation.",
        zoom: 13,
    },
    Place {
        id: "beach",
        name: "Beach area (approx)",
        coords: Coordinates {
            lat: 33.2616,
            lng: 35.1967,
        },
        note: "Sandy beach zone for relaxing walks.",
        zoom: 14,
    },
    Place {
        id: "ruins",
        name: "Ruins area (approx)",
        coords: Coordinates {
            lat: 33.2676,
            lng: 35.2099,
        },
        note: "Archaeological zone, great to visit early.",
        zoom: 14,
    },
];

pub fn place(id: &str) -> Option<&'static Place> {
    PLACES.iter().find(|place| place.id == id)
}

/// Driving directions from Beirut to the city center on Google Maps.
pub fn directions_url() -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&origin=Beirut&destination={},{}&travelmode=driving",
        TYRE_CENTER.lat, TYRE_CENTER.lng
    )
}

pub fn openstreetmap_url() -> String {
    format!(
        "https://www.openstreetmap.org/#map=13/{}/{}",
        TYRE_CENTER.lat, TYRE_CENTER.lng
    )
}
