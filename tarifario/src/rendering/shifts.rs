//! Night shift rotation
//!
//! Two workers split the night. On working days the first takes the 18h-00h
//! shift and the second the 00h-06h one; on off days a single worker covers
//! both, alternating every off-day block.

use chrono::{Datelike, Days, NaiveDate};
use shared::error::{AppError, AppResult};
use shared::models::{ShiftConfig, WorkerSlot};

use super::builder::{TextBuilder, bold};
use crate::utils::format::weekday_short;

const MONTHS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Longest range a rotation may cover
pub const MAX_ROTATION_DAYS: i64 = 366;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftDay {
    pub date: NaiveDate,
    pub is_off_day: bool,
    /// 00h-06h
    pub dawn: WorkerSlot,
    /// 18h-00h
    pub night: WorkerSlot,
    pub off_worker: Option<WorkerSlot>,
    /// The dawn worker continues from the previous night
    pub handover_in: bool,
    /// Saturday night continues into Sunday's dawn
    pub handover_out: bool,
}

impl ShiftDay {
    /// `20/dez`
    pub fn label(&self) -> String {
        format!("{:02}/{}", self.date.day(), MONTHS[self.date.month0() as usize])
    }
}

/// Sunday-first calendar of shift days; `None` pads the first and last week
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rotation {
    pub first_worker: String,
    pub second_worker: String,
    pub weeks: Vec<[Option<ShiftDay>; 7]>,
}

impl Rotation {
    pub fn worker(&self, slot: WorkerSlot) -> &str {
        match slot {
            WorkerSlot::First => &self.first_worker,
            WorkerSlot::Second => &self.second_worker,
        }
    }

    pub fn days(&self) -> impl Iterator<Item = &ShiftDay> {
        self.weeks.iter().flat_map(|w| w.iter().flatten())
    }
}

fn weekday(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

fn cover_slot(cycle: u32) -> WorkerSlot {
    if cycle % 2 == 0 {
        WorkerSlot::Second
    } else {
        WorkerSlot::First
    }
}

fn other(slot: WorkerSlot) -> WorkerSlot {
    match slot {
        WorkerSlot::First => WorkerSlot::Second,
        WorkerSlot::Second => WorkerSlot::First,
    }
}

fn fallback(name: &str, default: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        default.to_string()
    } else {
        name.to_string()
    }
}

/// Build the rotation for `start..=end`
pub fn build_rotation(config: &ShiftConfig, start: NaiveDate, end: NaiveDate) -> AppResult<Rotation> {
    if end < start {
        return Err(AppError::validation("Rotation end date is before its start date"));
    }
    if (end - start).num_days() >= MAX_ROTATION_DAYS {
        return Err(AppError::validation(format!(
            "Rotation covers more than {} days",
            MAX_ROTATION_DAYS
        )));
    }

    let mut cycle: u32 = if config.first_off == WorkerSlot::First { 1 } else { 0 };
    let mut prev_off = false;
    let mut last_night: Option<WorkerSlot> = None;

    let mut weeks: Vec<[Option<ShiftDay>; 7]> = Vec::new();
    let mut week: [Option<ShiftDay>; 7] = Default::default();

    for date in start.iter_days().take_while(|d| *d <= end) {
        let wd = weekday(date);
        let off = config.is_off_day(wd);
        if !off && prev_off {
            cycle += 1;
        }
        prev_off = off;

        let (dawn, night) = if off {
            (cover_slot(cycle), cover_slot(cycle))
        } else {
            (WorkerSlot::Second, WorkerSlot::First)
        };

        let mut handover_out = false;
        if wd == 6
            && let Some(next) = date.checked_add_days(Days::new(1))
            && next <= end
        {
            let next_off = config.is_off_day(weekday(next));
            let next_cycle = if !next_off && prev_off { cycle + 1 } else { cycle };
            let next_dawn = if next_off {
                cover_slot(next_cycle)
            } else {
                WorkerSlot::Second
            };
            handover_out = next_dawn == night;
        }

        week[wd as usize] = Some(ShiftDay {
            date,
            is_off_day: off,
            dawn,
            night,
            off_worker: off.then(|| other(night)),
            handover_in: last_night == Some(dawn),
            handover_out,
        });
        last_night = Some(night);

        if wd == 6 {
            weeks.push(std::mem::take(&mut week));
        }
    }
    if week.iter().any(Option::is_some) {
        weeks.push(week);
    }

    tracing::debug!(%start, %end, weeks = weeks.len(), "Built night shift rotation");

    Ok(Rotation {
        first_worker: fallback(&config.first_worker, "P1"),
        second_worker: fallback(&config.second_worker, "P2"),
        weeks,
    })
}

/// Plain-text rendition, one line per day
pub fn render_rotation_text(rotation: &Rotation) -> String {
    let mut b = TextBuilder::new();
    b.line(&bold("ESCALA NOTURNA"))
        .line("Madrugada 00h-06h | Equipe do Dia 06h-18h | Noite 18h-00h");
    for week in &rotation.weeks {
        b.newline();
        for day in week.iter().flatten() {
            let arrow_in = if day.handover_in { "➔ " } else { "" };
            let arrow_out = if day.handover_out { " ➔" } else { "" };
            let mut line = format!(
                "{} {}: Madrugada {}{} | Equipe do Dia | Noite {}{}",
                weekday_short(day.date),
                day.label(),
                arrow_in,
                rotation.worker(day.dawn),
                rotation.worker(day.night),
                arrow_out
            );
            if let Some(off) = day.off_worker {
                line.push_str(&format!(" (Folga: {})", rotation.worker(off)));
            }
            b.line(&line);
        }
    }
    b.build()
}
