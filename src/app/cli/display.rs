//! Table output for listings and event details

use crate::core::styles::StyleRole;
use crate::remote::api::{
    display_date, display_time, resolve_image_url, AttendanceStatus, Event, User,
};
use prettytable::{format, Cell, Row, Table};

/// A borderless table with (optionally colored) column titles
fn table(titles: &[&str], color: bool) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
    let spec = color
        .then(|| StyleRole::Header.to_prettytable_spec())
        .flatten();
    table.set_titles(Row::new(
        titles
            .iter()
            .map(|t| match &spec {
                Some(spec) => Cell::new(t).style_spec(spec),
                None => Cell::new(t),
            })
            .collect(),
    ));
    table
}

fn styled(text: &str, role: StyleRole, color: bool) -> Cell {
    match color.then(|| role.to_prettytable_spec()).flatten() {
        Some(spec) => Cell::new(text).style_spec(&spec),
        None => Cell::new(text),
    }
}

/// Events whose title contains `search`, ignoring case
pub fn filter_events<'a>(events: &'a [Event], search: Option<&str>) -> Vec<&'a Event> {
    let needle = search.map(str::to_lowercase).unwrap_or_default();
    events
        .iter()
        .filter(|e| e.title.to_lowercase().contains(&needle))
        .collect()
}

pub fn events_table(events: &[&Event], color: bool) -> String {
    if events.is_empty() {
        return "No events found.\n".to_string();
    }
    let mut t = table(&["ID", "Title", "Date", "Status", "Key"], color);
    for event in events {
        t.add_row(Row::new(vec![
            Cell::new(&event.id.to_string()),
            Cell::new(&event.title),
            Cell::new(&display_date(&event.date)),
            Cell::new(&event.status.to_string()),
            Cell::new(event.enrollment_key.as_deref().unwrap_or("-")),
        ]));
    }
    t.to_string()
}

pub fn users_table(users: &[User], color: bool) -> String {
    if users.is_empty() {
        return "No users found.\n".to_string();
    }
    let mut t = table(&["ID", "Name", "Location", "Joined"], color);
    for user in users {
        t.add_row(Row::new(vec![
            Cell::new(&user.id.to_string()),
            Cell::new(&user.name),
            Cell::new(user.location.as_deref().unwrap_or("-")),
            Cell::new(
                &user
                    .created_at
                    .as_deref()
                    .map(display_date)
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]));
    }
    t.to_string()
}

/// Full event view: prizes by rank, winners, and participants with their status
pub fn event_details(event: &Event, api_base: &str, color: bool) -> String {
    let mut out = format!(
        "{}\nDate: {}  Status: {}  Key: {}\nParticipants: {} ({} present)\n",
        StyleRole::Header.paint(&event.title, color),
        display_date(&event.date),
        event.status,
        event.enrollment_key.as_deref().unwrap_or("-"),
        event.attendances.len(),
        event.present_count()
    );

    out.push_str("\nPrizes\n");
    if event.gifts.is_empty() {
        out.push_str("No prizes yet.\n");
    } else {
        let mut t = table(&["ID", "Rank", "Prize", "Image"], color);
        for gift in event.gifts_by_rank() {
            t.add_row(Row::new(vec![
                Cell::new(&gift.id.to_string()),
                Cell::new(&format!("#{}", gift.rank)),
                Cell::new(&gift.name),
                Cell::new(
                    &resolve_image_url(api_base, Some(&gift.image_url))
                        .unwrap_or_else(|| "-".to_string()),
                ),
            ]));
        }
        out.push_str(&t.to_string());
    }

    out.push_str("\nWinners\n");
    if event.winners.is_empty() {
        out.push_str("Not drawn yet.\n");
    } else {
        let mut t = table(&["Rank", "Prize", "Winner", "Time"], color);
        for winner in event.winners_by_rank() {
            t.add_row(Row::new(vec![
                Cell::new(&format!("#{}", winner.gift.rank)),
                Cell::new(&winner.gift.name),
                styled(&winner.user.name, StyleRole::Accent, color),
                Cell::new(&display_time(&winner.won_at)),
            ]));
        }
        out.push_str(&t.to_string());
    }

    out.push_str("\nParticipants\n");
    if event.attendances.is_empty() {
        out.push_str("No participants yet.\n");
    } else {
        let mut t = table(&["ID", "Name", "Location", "Status"], color);
        for attendance in &event.attendances {
            let role = match attendance.status {
                AttendanceStatus::Present => StyleRole::Present,
                _ => StyleRole::Pending,
            };
            t.add_row(Row::new(vec![
                Cell::new(&attendance.user.id.to_string()),
                Cell::new(&attendance.user.name),
                Cell::new(attendance.user.location.as_deref().unwrap_or("-")),
                styled(&attendance.status.to_string(), role, color),
            ]));
        }
        out.push_str(&t.to_string());
    }
    out
}
