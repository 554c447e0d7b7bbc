use chrono::{Datelike, Duration, NaiveDate};

use crate::error::TimelineError;
use crate::model::Item;

/// Spacing of header gridlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TickGranularity {
    Days,
    #[default]
    Weeks,
    Months,
}

/// A header gridline position.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub date: NaiveDate,
    pub x: f32,
    pub label: String,
}

/// Fixed linear mapping from the scenario's date domain onto `[0, width]`.
///
/// Built once from the full item set; hiding items later never changes it.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeScale {
    /// Earliest start date of any layoutable item.
    start: NaiveDate,
    /// Latest end date of any layoutable item.
    end: NaiveDate,
    width: f32,
    pixels_per_day: f32,
}

impl TimeScale {
    /// Compute the domain from every item with a usable date range.
    pub fn build(items: &[Item], width: f32) -> Result<Self, TimelineError> {
        let mut ranges = items.iter().filter_map(Item::date_range);
        let (mut start, mut end) = ranges.next().ok_or(TimelineError::EmptyDomain)?;
        for (item_start, item_end) in ranges {
            start = start.min(item_start);
            end = end.max(item_end);
        }
        Ok(Self::from_domain(start, end, width))
    }

    /// A scale over an explicit domain. `end` earlier than `start` is treated
    /// as a single-day domain.
    pub fn from_domain(start: NaiveDate, end: NaiveDate, width: f32) -> Self {
        let end = end.max(start);
        let span_days = (end - start).num_days().max(1) as f32;
        Self {
            start,
            end,
            width,
            pixels_per_day: width / span_days,
        }
    }

    pub fn domain(&self) -> (NaiveDate, NaiveDate) {
        (self.start, self.end)
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn pixels_per_day(&self) -> f32 {
        self.pixels_per_day
    }

    /// Convert a date to an x offset from the domain start, clamped to the range.
    pub fn map(&self, date: NaiveDate) -> f32 {
        let days = (date - self.start).num_days() as f32;
        (days * self.pixels_per_day).clamp(0.0, self.width)
    }

    /// Convert an x offset back to the nearest date inside the domain.
    pub fn x_to_date(&self, x: f32) -> NaiveDate {
        let span = (self.end - self.start).num_days();
        let days = ((x / self.pixels_per_day).round() as i64).clamp(0, span);
        self.start + Duration::days(days)
    }

    /// Pixel the last domain date maps to.
    pub fn domain_end_x(&self) -> f32 {
        self.map(self.end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Position of a "today" marker, or `None` when `today` is off the timeline.
    pub fn today_x(&self, today: NaiveDate) -> Option<f32> {
        self.contains(today).then(|| self.map(today))
    }

    /// Gridline positions inside the domain.
    pub fn ticks(&self, granularity: TickGranularity) -> Vec<Tick> {
        let mut ticks = Vec::new();
        let mut date = match granularity {
            TickGranularity::Days => self.start,
            TickGranularity::Weeks => {
                let weekday = self.start.weekday().num_days_from_monday() as i64;
                if weekday == 0 {
                    self.start
                } else {
                    self.start + Duration::days(7 - weekday)
                }
            }
            TickGranularity::Months => {
                if self.start.day() == 1 {
                    self.start
                } else {
                    match next_month(self.start) {
                        Some(date) => date,
                        None => return ticks,
                    }
                }
            }
        };

        while date <= self.end {
            let label = match granularity {
                TickGranularity::Days => date.format("%d").to_string(),
                TickGranularity::Weeks => date.format("W%V").to_string(),
                TickGranularity::Months => date.format("%b %Y").to_string(),
            };
            ticks.push(Tick {
                date,
                x: self.map(date),
                label,
            });
            date = match granularity {
                TickGranularity::Days => date + Duration::days(1),
                TickGranularity::Weeks => date + Duration::days(7),
                TickGranularity::Months => match next_month(date) {
                    Some(next) => next,
                    None => break,
                },
            };
        }
        ticks
    }
}

/// First day of the month after `date`.
fn next_month(date: NaiveDate) -> Option<NaiveDate> {
    let (y, m) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)
}
