//! Room Category Model

use serde::{Deserialize, Serialize};

use super::stay::Season;

/// Default occupancy grouping of a room category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OccupancyGroup {
    #[default]
    #[serde(rename = "")]
    Unset,
    #[serde(rename = "double", alias = "casal")]
    Double,
    #[serde(rename = "single", alias = "solteiro")]
    Single,
}

/// Room category entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomCategory {
    pub id: String,
    pub name: String,
    /// Maximum occupants; meals are charged per occupant
    pub capacity: u32,
    #[serde(default)]
    pub double_beds: u32,
    #[serde(default)]
    pub single_beds: u32,
    pub high_with_breakfast: f64,
    pub high_no_breakfast: f64,
    pub low_with_breakfast: f64,
    pub low_no_breakfast: f64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub occupancy: OccupancyGroup,
    /// Physical unit numbers (e.g. "01", "02") belonging to this category
    #[serde(default)]
    pub unit_numbers: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl RoomCategory {
    /// Nightly rate for a season, with or without breakfast
    pub fn rate(&self, season: Season, breakfast: bool) -> f64 {
        match (season, breakfast) {
            (Season::High, true) => self.high_with_breakfast,
            (Season::High, false) => self.high_no_breakfast,
            (Season::Low, true) => self.low_with_breakfast,
            (Season::Low, false) => self.low_no_breakfast,
        }
    }

    /// Bed composition, e.g. "1 Cama Casal + 2 Camas Solteiro"
    pub fn bed_description(&self) -> String {
        let mut parts = Vec::new();
        if self.double_beds > 0 {
            let plural = if self.double_beds > 1 { "s" } else { "" };
            parts.push(format!("{} Cama{} Casal", self.double_beds, plural));
        }
        if self.single_beds > 0 {
            let plural = if self.single_beds > 1 { "s" } else { "" };
            parts.push(format!("{} Cama{} Solteiro", self.single_beds, plural));
        }
        if parts.is_empty() {
            "Configuração sob consulta".to_string()
        } else {
            parts.join(" + ")
        }
    }

    /// Single/double grouping used by the comparison table
    ///
    /// An explicit occupancy wins; otherwise a one-person room is single, and
    /// bed composition decides the rest.
    pub fn inferred_group(&self) -> OccupancyGroup {
        match self.occupancy {
            OccupancyGroup::Unset => {}
            explicit => return explicit,
        }
        if self.capacity == 1 {
            return OccupancyGroup::Single;
        }
        if self.single_beds >= 3 && self.double_beds == 0 {
            return OccupancyGroup::Single;
        }
        if self.double_beds > 0 {
            OccupancyGroup::Double
        } else {
            OccupancyGroup::Single
        }
    }
}

/// Create room category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomCategoryCreate {
    pub name: String,
    pub capacity: Option<u32>,
    pub double_beds: Option<u32>,
    pub single_beds: Option<u32>,
    pub high_with_breakfast: Option<f64>,
    pub high_no_breakfast: Option<f64>,
    pub low_with_breakfast: Option<f64>,
    pub low_no_breakfast: Option<f64>,
    pub description: Option<String>,
    pub occupancy: Option<OccupancyGroup>,
    #[serde(default)]
    pub unit_numbers: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

/// Update room category payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomCategoryUpdate {
    pub name: Option<String>,
    pub capacity: Option<u32>,
    pub double_beds: Option<u32>,
    pub single_beds: Option<u32>,
    pub high_with_breakfast: Option<f64>,
    pub high_no_breakfast: Option<f64>,
    pub low_with_breakfast: Option<f64>,
    pub low_no_breakfast: Option<f64>,
    pub is_active: Option<bool>,
    pub description: Option<String>,
    pub occupancy: Option<OccupancyGroup>,
    pub unit_numbers: Option<Vec<String>>,
    pub amenities: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(double_beds: u32, single_beds: u32, capacity: u32) -> RoomCategory {
        RoomCategory {
            id: "c1".to_string(),
            name: "Standard".to_string(),
            capacity,
            double_beds,
            single_beds,
            high_with_breakfast: 380.0,
            high_no_breakfast: 350.0,
            low_with_breakfast: 280.0,
            low_no_breakfast: 250.0,
            is_active: true,
            description: None,
            occupancy: OccupancyGroup::Unset,
            unit_numbers: vec![],
            amenities: vec![],
        }
    }

    #[test]
    fn test_rate_matrix() {
        let c = category(1, 0, 2);
        assert_eq!(c.rate(Season::High, true), 380.0);
        assert_eq!(c.rate(Season::High, false), 350.0);
        assert_eq!(c.rate(Season::Low, true), 280.0);
        assert_eq!(c.rate(Season::Low, false), 250.0);
    }

    #[test]
    fn test_bed_description() {
        assert_eq!(category(1, 0, 2).bed_description(), "1 Cama Casal");
        assert_eq!(
            category(2, 1, 5).bed_description(),
            "2 Camas Casal + 1 Cama Solteiro"
        );
        assert_eq!(
            category(0, 0, 2).bed_description(),
            "Configuração sob consulta"
        );
    }

    #[test]
    fn test_inferred_group() {
        assert_eq!(category(1, 0, 1).inferred_group(), OccupancyGroup::Single);
        assert_eq!(category(0, 3, 3).inferred_group(), OccupancyGroup::Single);
        assert_eq!(category(1, 1, 3).inferred_group(), OccupancyGroup::Double);
        assert_eq!(category(0, 2, 2).inferred_group(), OccupancyGroup::Single);

        let mut explicit = category(1, 0, 2);
        explicit.occupancy = OccupancyGroup::Single;
        assert_eq!(explicit.inferred_group(), OccupancyGroup::Single);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{
            "id": "x", "name": "Luxo", "capacity": 3,
            "highWithBreakfast": 580, "highNoBreakfast": 550,
            "lowWithBreakfast": 430, "lowNoBreakfast": 400,
            "occupancy": "casal"
        }"#;
        let c: RoomCategory = serde_json::from_str(json).unwrap();
        assert!(c.is_active);
        assert_eq!(c.occupancy, OccupancyGroup::Double);
        assert!(c.unit_numbers.is_empty());
    }
}
