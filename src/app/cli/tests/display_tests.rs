//! Tests for listing tables

use crate::app::cli::display::*;
use crate::remote::api::{Attendance, AttendanceStatus, Event, EventStatus, Gift, User};

fn event(id: i64, title: &str) -> Event {
    Event {
        id,
        title: title.to_string(),
        date: "2025-12-20".to_string(),
        enrollment_key: Some("XMAS".to_string()),
        status: EventStatus::Upcoming,
        gifts: vec![],
        winners: vec![],
        attendances: vec![],
    }
}

#[test]
fn test_search_is_case_insensitive() {
    let events = vec![event(1, "Year End Party"), event(2, "Spring Launch")];
    let found = filter_events(&events, Some("PARTY"));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, 1);
    assert_eq!(filter_events(&events, None).len(), 2);
    assert!(filter_events(&events, Some("gala")).is_empty());
}

#[test]
fn test_empty_listing_says_so() {
    assert_eq!(events_table(&[], false), "No events found.\n");
    assert_eq!(users_table(&[], false), "No users found.\n");
}

#[test]
fn test_events_table_lists_titles() {
    let events = vec![event(1, "Year End Party")];
    let refs: Vec<&Event> = events.iter().collect();
    let out = events_table(&refs, false);
    assert!(out.contains("Year End Party"));
    assert!(out.contains("UPCOMING"));
    assert!(out.contains("XMAS"));
}

#[test]
fn test_event_details_sections() {
    let mut e = event(7, "Gala");
    e.gifts.push(Gift {
        id: 3,
        name: "Bike".to_string(),
        image_url: "uploads\\bike.png".to_string(),
        rank: 2,
        event_id: Some(7),
    });
    e.attendances.push(Attendance {
        user: User {
            id: 42,
            name: "Jane".to_string(),
            location: Some("Lagos".to_string()),
            photo_url: None,
            created_at: None,
        },
        status: AttendanceStatus::Present,
    });

    let out = event_details(&e, "http://api:4000", false);
    assert!(out.starts_with("Gala\n"));
    assert!(out.contains("Participants: 1 (1 present)"));
    assert!(out.contains("http://api:4000/uploads/bike.png"));
    assert!(out.contains("#2"));
    assert!(out.contains("Not drawn yet."));
    assert!(out.contains("PRESENT"));
}
