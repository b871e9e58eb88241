use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::parser::Ticket;

const ISO_DATE_FMT: &str = "%Y-%m-%d";

/// Inclusive date range used to filter tickets for one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Observed min/max `Criado` dates of the loaded set.
/// The loader guarantees at least one ticket.
pub fn dataset_bounds(tickets: &[Ticket]) -> (NaiveDate, NaiveDate) {
    let mut min = tickets[0].criado_date();
    let mut max = min;
    for t in &tickets[1..] {
        let d = t.criado_date();
        if d < min {
            min = d;
        }
        if d > max {
            max = d;
        }
    }
    (min, max)
}

/// Resolve the period selector into a concrete window.
///
/// `today` is injected by the caller — day/week/month are trailing windows
/// ending on the request date, and tests need a fixed clock.
///
/// Fallback (unknown selector, or `custom` with a missing/unparsable bound):
/// the dataset's own range, with its upper end clamped to `today`. A `custom`
/// window with both bounds valid is taken verbatim, even when start > end —
/// the aggregator then simply matches nothing.
pub fn resolve_window(
    period: &str,
    start_date: Option<&str>,
    end_date: Option<&str>,
    data_min: NaiveDate,
    data_max: NaiveDate,
    today: NaiveDate,
) -> DateWindow {
    match period {
        "day" => DateWindow {
            start: today,
            end: today,
        },
        "week" => DateWindow {
            start: today - Duration::days(7),
            end: today,
        },
        "month" => DateWindow {
            start: today - Duration::days(30),
            end: today,
        },
        "custom" => {
            let start = start_date.and_then(parse_iso_date);
            let end = end_date.and_then(parse_iso_date);
            match (start, end) {
                (Some(start), Some(end)) => DateWindow { start, end },
                _ => fallback_window(data_min, data_max, today),
            }
        }
        _ => fallback_window(data_min, data_max, today),
    }
}

fn fallback_window(data_min: NaiveDate, data_max: NaiveDate, today: NaiveDate) -> DateWindow {
    DateWindow {
        start: data_min,
        end: data_max.min(today),
    }
}

fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, ISO_DATE_FMT).ok()
}
