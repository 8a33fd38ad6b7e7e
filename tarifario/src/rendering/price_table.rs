//! Season price table
//!
//! Categories that share the same set of unit numbers are listed together,
//! one row per category, headed by the unit list.

use shared::models::{RoomCategory, Season};

use super::builder::{TextBuilder, bold};
use crate::utils::format::format_brl;

/// One category row inside a group
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRow {
    pub label: String,
    pub beds: String,
    pub with_breakfast: f64,
    pub without_breakfast: f64,
}

/// Categories sharing one unit set
#[derive(Debug, Clone, PartialEq)]
pub struct PriceGroup {
    pub title: String,
    pub units: String,
    pub priority: u8,
    pub rows: Vec<PriceRow>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    pub season: Season,
    pub groups: Vec<PriceGroup>,
}

fn sorted_units(category: &RoomCategory) -> Vec<String> {
    let mut units: Vec<String> = category
        .unit_numbers
        .iter()
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .collect();
    units.sort();
    units
}

/// `1 Cama de Casal e 2 Camas de Solteiro`
fn bed_text(category: &RoomCategory) -> String {
    let mut parts = Vec::new();
    if category.double_beds > 0 {
        let noun = if category.double_beds > 1 { "Camas" } else { "Cama" };
        parts.push(format!("{} {} de Casal", category.double_beds, noun));
    }
    if category.single_beds > 0 {
        let noun = if category.single_beds > 1 { "Camas" } else { "Cama" };
        parts.push(format!("{} {} de Solteiro", category.single_beds, noun));
    }
    if parts.is_empty() {
        "Configuração de camas não definida".to_string()
    } else {
        parts.join(" e ")
    }
}

fn group_priority(members: &[&RoomCategory]) -> u8 {
    let premium = members.iter().any(|c| {
        let name = c.name.to_lowercase();
        name.contains("master")
            || name.contains("deluxe")
            || (c.double_beds > 0 && !name.contains("superior"))
    });
    if premium {
        1
    } else if members.len() > 1 {
        2
    } else {
        3
    }
}

fn group_title(first: &RoomCategory) -> String {
    let base = first.name.split('(').next().unwrap_or_default();
    let title = base
        .replace("Casal", "")
        .replace("1 Pessoa", "")
        .trim()
        .to_uppercase();
    if title.is_empty() {
        "CATEGORIA".to_string()
    } else {
        title
    }
}

fn row_suffix(category: &RoomCategory, group_len: usize) -> &'static str {
    if group_len <= 1 {
        return "";
    }
    let name = category.name.to_lowercase();
    if name.contains("pessoa") || name.contains("single") || name.contains('1') || category.capacity == 1 {
        " (1 Pessoa)"
    } else {
        " (Casal ou adulto com criança)"
    }
}

/// Group the categories that have unit numbers and order the groups
///
/// Groups keep first-seen order within the same priority.
pub fn build_price_table(categories: &[RoomCategory], season: Season) -> PriceTable {
    let mut buckets: Vec<(Vec<String>, Vec<&RoomCategory>)> = Vec::new();
    for category in categories {
        let units = sorted_units(category);
        if units.is_empty() {
            continue;
        }
        match buckets.iter_mut().find(|(key, _)| *key == units) {
            Some((_, members)) => members.push(category),
            None => buckets.push((units, vec![category])),
        }
    }

    let mut groups: Vec<PriceGroup> = buckets
        .into_iter()
        .map(|(units, members)| {
            let rows = members
                .iter()
                .map(|c| PriceRow {
                    label: format!("{}{}", bed_text(c), row_suffix(c, members.len())),
                    beds: bed_text(c),
                    with_breakfast: c.rate(season, true),
                    without_breakfast: c.rate(season, false),
                })
                .collect();
            PriceGroup {
                title: group_title(members[0]),
                units: units.join(", "),
                priority: group_priority(&members),
                rows,
            }
        })
        .collect();
    // stable
    groups.sort_by_key(|g| g.priority);

    PriceTable { season, groups }
}

impl PriceTable {
    pub fn season_title(&self) -> &'static str {
        match self.season {
            Season::High => "ALTA",
            Season::Low => "BAIXA",
        }
    }

    pub fn to_text(&self) -> String {
        let mut b = TextBuilder::new();
        b.line(&bold(&format!("TABELA DE PREÇOS - {} TEMPORADA", self.season_title())));
        for group in &self.groups {
            b.newline()
                .line(&format!("🏨 {}", bold(&group.title)))
                .line(&format!("Unidades: {}", group.units));
            for row in &group.rows {
                b.line(&format!("🛏️ {}", row.label)).line(&format!(
                    "   ☕ Com café: {} | ❌ Sem café: {}",
                    format_brl(row.with_breakfast),
                    format_brl(row.without_breakfast)
                ));
            }
        }
        b.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::OccupancyGroup;

    fn category(name: &str, doubles: u32, singles: u32, capacity: u32, units: &[&str]) -> RoomCategory {
        RoomCategory {
            id: name.to_lowercase(),
            name: name.to_string(),
            capacity,
            double_beds: doubles,
            single_beds: singles,
            high_with_breakfast: 380.0,
            high_no_breakfast: 350.0,
            low_with_breakfast: 280.0,
            low_no_breakfast: 250.0,
            is_active: true,
            description: None,
            occupancy: OccupancyGroup::Unset,
            unit_numbers: units.iter().map(|s| s.to_string()).collect(),
            amenities: vec![],
        }
    }

    #[test]
    fn test_groups_by_identical_unit_sets() {
        let cats = vec![
            category("Superior Casal", 0, 2, 2, &["05", "06"]),
            category("Superior 1 Pessoa", 0, 1, 1, &["06", "05"]),
            category("Sem unidades", 1, 0, 2, &[]),
            category("Suíte Master", 1, 0, 2, &["10"]),
        ];
        let table = build_price_table(&cats, Season::High);
        assert_eq!(table.groups.len(), 2);

        // Master is premium and jumps ahead of the shared group
        assert_eq!(table.groups[0].title, "SUÍTE MASTER");
        assert_eq!(table.groups[0].priority, 1);
        assert_eq!(table.groups[0].rows[0].label, "1 Cama de Casal");

        let superior = &table.groups[1];
        assert_eq!(superior.title, "SUPERIOR");
        assert_eq!(superior.units, "05, 06");
        assert_eq!(superior.priority, 2);
        assert_eq!(
            superior.rows[0].label,
            "2 Camas de Solteiro (Casal ou adulto com criança)"
        );
        assert_eq!(superior.rows[1].label, "1 Cama de Solteiro (1 Pessoa)");
    }

    #[test]
    fn test_season_prices() {
        let cats = vec![category("Standard", 1, 0, 2, &["01"])];
        let high = build_price_table(&cats, Season::High);
        assert_eq!(high.groups[0].rows[0].with_breakfast, 380.0);
        let low = build_price_table(&cats, Season::Low);
        assert_eq!(low.groups[0].rows[0].without_breakfast, 250.0);
        assert_eq!(low.season_title(), "BAIXA");
    }

    #[test]
    fn test_fallback_texts() {
        let cats = vec![category("(Casal)", 0, 0, 2, &["07"])];
        let table = build_price_table(&cats, Season::Low);
        assert_eq!(table.groups[0].title, "CATEGORIA");
        assert_eq!(table.groups[0].priority, 3);
        assert_eq!(table.groups[0].rows[0].label, "Configuração de camas não definida");
    }

    #[test]
    fn test_text_output() {
        let cats = vec![category("Standard", 1, 0, 2, &["01", "02"])];
        let text = build_price_table(&cats, Season::High).to_text();
        assert!(text.starts_with("*TABELA DE PREÇOS - ALTA TEMPORADA*\n\n🏨 *STANDARD*\nUnidades: 01, 02\n"));
        assert!(text.contains("   ☕ Com café: R$ 380,00 | ❌ Sem café: R$ 350,00\n"));
    }
}
