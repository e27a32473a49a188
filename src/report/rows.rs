//! Report content built from a drawn event

use crate::remote::api::{display_date, display_time, Event};
use crate::report::error::{ReportError, ReportResult};
use crate::report::formats::ReportFormat;
use serde::Serialize;

pub const REPORT_HEADING: &str = "Raffle Draw Results";
pub const COLUMNS: [&str; 5] = ["Rank", "Prize", "Winner Name", "Location", "Time"];

/// One line of the results table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WinnerRow {
    pub rank: String,
    pub prize: String,
    pub winner_name: String,
    pub location: String,
    pub time: String,
}

impl WinnerRow {
    pub fn cells(&self) -> [&str; 5] {
        [
            &self.rank,
            &self.prize,
            &self.winner_name,
            &self.location,
            &self.time,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WinnerReport {
    pub heading: String,
    pub event: String,
    pub date: String,
    pub rows: Vec<WinnerRow>,
}

impl WinnerReport {
    /// Build the report for an event, first prize first
    pub fn from_event(event: &Event) -> ReportResult<Self> {
        if event.winners.is_empty() {
            return Err(ReportError::NoWinners {
                event: event.title.clone(),
            });
        }

        let rows = event
            .winners_by_rank()
            .into_iter()
            .map(|winner| WinnerRow {
                rank: format!("#{}", winner.gift.rank),
                prize: winner.gift.name.clone(),
                winner_name: winner.user.name.clone(),
                location: winner
                    .user
                    .location
                    .as_deref()
                    .filter(|l| !l.trim().is_empty())
                    .unwrap_or("-")
                    .to_string(),
                time: display_time(&winner.won_at),
            })
            .collect();

        Ok(Self {
            heading: REPORT_HEADING.to_string(),
            event: event.title.clone(),
            date: display_date(&event.date),
            rows,
        })
    }
}

/// `Raffle-Results-<title>.<ext>` in the working directory
///
/// Each whitespace run in the title becomes one `-`, leading and trailing
/// runs included. Path separators also become `-`.
pub fn default_filename(title: &str, format: ReportFormat) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut in_space = false;
    for c in title.chars() {
        if c.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        slug.push(if matches!(c, '/' | '\\') { '-' } else { c });
    }
    format!("Raffle-Results-{slug}.{}", format.extension())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::api::{EventStatus, Gift, User, Winner};

    fn winner(id: i64, rank: u32, prize: &str, name: &str, location: Option<&str>) -> Winner {
        Winner {
            id,
            user: User {
                id: id + 100,
                name: name.to_string(),
                location: location.map(str::to_string),
                photo_url: None,
                created_at: None,
            },
            gift: Gift {
                id,
                name: prize.to_string(),
                image_url: String::new(),
                rank,
                event_id: Some(7),
            },
            won_at: "not a timestamp".to_string(),
            event_id: Some(7),
            user_id: None,
            gift_id: None,
        }
    }

    fn event(winners: Vec<Winner>) -> Event {
        Event {
            id: 7,
            title: "Year End  Party".to_string(),
            date: "2025-12-20".to_string(),
            enrollment_key: None,
            status: EventStatus::Completed,
            gifts: vec![],
            winners,
            attendances: vec![],
        }
    }

    #[test]
    fn test_rows_are_sorted_by_rank() {
        let report = WinnerReport::from_event(&event(vec![
            winner(1, 3, "Mug", "Omar", Some("Lagos")),
            winner(2, 1, "Laptop", "Jane", None),
            winner(3, 2, "Bike", "Ana", Some("  ")),
        ]))
        .unwrap();

        let ranks: Vec<&str> = report.rows.iter().map(|r| r.rank.as_str()).collect();
        assert_eq!(ranks, vec!["#1", "#2", "#3"]);
        assert_eq!(report.rows[0].location, "-");
        assert_eq!(report.rows[1].location, "-");
        assert_eq!(report.rows[2].location, "Lagos");
        assert_eq!(report.rows[2].time, "not a timestamp");
        assert_eq!(report.heading, "Raffle Draw Results");
        assert_eq!(report.date, "2025-12-20");
    }

    #[test]
    fn test_event_without_winners_is_rejected() {
        let err = WinnerReport::from_event(&event(vec![])).unwrap_err();
        assert!(matches!(err, ReportError::NoWinners { .. }));
    }

    #[test]
    fn test_default_filename_collapses_whitespace() {
        assert_eq!(
            default_filename("Year End  Party", ReportFormat::Csv),
            "Raffle-Results-Year-End-Party.csv"
        );
        assert_eq!(
            default_filename("Gala", ReportFormat::Markdown),
            "Raffle-Results-Gala.md"
        );
    }

    #[test]
    fn test_default_filename_keeps_edge_whitespace_as_dashes() {
        assert_eq!(
            default_filename("  Gala \t", ReportFormat::Json),
            "Raffle-Results--Gala-.json"
        );
    }

    #[test]
    fn test_default_filename_never_names_a_directory() {
        let name = default_filename("Q1/Q2 Draw\\Finals", ReportFormat::Csv);
        assert_eq!(name, "Raffle-Results-Q1-Q2-Draw-Finals.csv");
        assert_eq!(std::path::Path::new(&name).components().count(), 1);
    }
}
