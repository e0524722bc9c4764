use std::path::Path;

use serde_json::Value;

use crate::error::NotificationError;
use crate::file_system::FileSystem;
use crate::legacy::parse_notification_value;
use crate::notification::Notification;

/// Parse a JSON array of notifications, migrating legacy entries.
///
/// The returned list is ordered with [`sort_notifications`].
pub fn parse_notification_list(payload: &str) -> Result<Vec<Notification>, NotificationError> {
    let entries = match serde_json::from_str::<Value>(payload)? {
        Value::Array(entries) => entries,
        _ => return Err(NotificationError::NotAList),
    };

    let mut notifications = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let parsed = parse_notification_value(entry)
            .map_err(|source| NotificationError::InvalidEntry { index, source })?;
        if parsed.is_legacy() {
            log::debug!("migrated legacy notification at index {}", index);
        }
        notifications.push(parsed.into_notification());
    }

    sort_notifications(&mut notifications);
    Ok(notifications)
}

/// Read and parse a notification list from disk
pub fn load_notification_list<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<Notification>, NotificationError> {
    let path = path.as_ref();
    let payload = FileSystem::read_file_safe(path)?;
    let notifications = parse_notification_list(&payload)?;
    log::info!(
        "loaded {} notifications from {}",
        notifications.len(),
        path.display()
    );
    Ok(notifications)
}

/// Order by firing time, then by referenced step and offset. Stable.
///
/// `timeAbsolute` includes the length of earlier steps, so an offset past
/// the end of its own step can fire after a notification on a later step.
/// Records without a computed `timeAbsolute` (all zero) fall back to step
/// grouping.
pub fn sort_notifications(notifications: &mut [Notification]) {
    notifications.sort_by_key(|n| (n.time_absolute, n.ref_step_index, n.time_from_start));
}

/// First notification that has not been delivered yet
pub fn next_pending(notifications: &[Notification]) -> Option<&Notification> {
    notifications.iter().find(|n| n.is_pending())
}

pub fn to_json_pretty(notifications: &[Notification]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(notifications)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const SCHEDULE: &str = r#"[
        {
            "name": "Start Lautering",
            "message": "Please Start Lautering/Sparging",
            "timeFromStart": 85,
            "timePoint": 0,
            "buzzer": true,
            "refStepIndex": 0,
            "timeAbsolute": 0
        },
        {"name": "Whirlpool", "timeFromStart": 5, "buzzer": false, "refStepIndex": 2},
        {"name": "Add Grains", "message": null, "timeFromStart": 5, "buzzer": true}
    ]"#;

    fn notification(name: &str, ref_step_index: u32, time_from_start: i64) -> Notification {
        Notification {
            ref_step_index,
            time_from_start,
            ..Notification::named(name)
        }
    }

    #[test]
    fn test_parse_mixed_list_is_sorted() {
        let notifications = parse_notification_list(SCHEDULE).unwrap();

        let names: Vec<&str> = notifications.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Add Grains", "Start Lautering", "Whirlpool"]);
        assert_eq!(notifications[0].message, "");
        assert_eq!(notifications[2].ref_step_index, 2);
    }

    #[test]
    fn test_parse_empty_list() {
        assert!(parse_notification_list("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let result = parse_notification_list(r#"{"name": "Boil"}"#);
        assert!(matches!(result, Err(NotificationError::NotAList)));
    }

    #[test]
    fn test_parse_reports_invalid_entry_index() {
        let payload = r#"[
            {"name": "Ok", "timeFromStart": 1, "buzzer": true},
            {"name": "Broken", "buzzer": "yes"}
        ]"#;

        match parse_notification_list(payload) {
            Err(NotificationError::InvalidEntry { index, .. }) => assert_eq!(index, 1),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        let result = parse_notification_list("[");
        assert!(matches!(result, Err(NotificationError::Parse(_))));
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let mut notifications = vec![
            notification("second step", 1, 0),
            notification("first", 0, 10),
            notification("also first", 0, 10),
            notification("earliest", 0, -5),
        ];

        sort_notifications(&mut notifications);

        let names: Vec<&str> = notifications.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["earliest", "first", "also first", "second step"]);
    }

    #[test]
    fn test_sort_uses_absolute_time_across_steps() {
        // Step 0 runs for 60 minutes; lautering is set 85 minutes into it
        let mut notifications = vec![
            Notification {
                time_absolute: 85,
                ..notification("Lauter", 0, 85)
            },
            Notification {
                time_absolute: 60,
                ..notification("Hops", 1, 0)
            },
        ];

        sort_notifications(&mut notifications);

        let names: Vec<&str> = notifications.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Hops", "Lauter"]);
        assert_eq!(next_pending(&notifications).unwrap().name, "Hops");
    }

    #[test]
    fn test_next_pending_skips_done() {
        let mut notifications = vec![notification("a", 0, 0), notification("b", 0, 5)];
        assert_eq!(next_pending(&notifications).unwrap().name, "a");

        notifications[0].mark_done();
        assert_eq!(next_pending(&notifications).unwrap().name, "b");

        notifications[1].mark_done();
        assert!(next_pending(&notifications).is_none());
    }

    #[test]
    fn test_next_pending_treats_missing_done_as_pending() {
        let payload = r#"[{
            "name": "Rest",
            "message": "",
            "timeFromStart": 30,
            "timePoint": 0,
            "buzzer": true,
            "refStepIndex": 2,
            "timeAbsolute": 0
        }]"#;

        let notifications = parse_notification_list(payload).unwrap();
        assert_eq!(next_pending(&notifications).unwrap().name, "Rest");
    }

    #[test]
    fn test_load_notification_list_from_file() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let path = temp_dir.path().join("mash.json");
        fs::write(&path, SCHEDULE).unwrap();

        let notifications = load_notification_list(&path).unwrap();
        assert_eq!(notifications.len(), 3);
    }

    #[test]
    fn test_load_notification_list_missing_file() {
        let temp_dir = tempdir().expect("Failed to create temporary directory");
        let result = load_notification_list(temp_dir.path().join("missing.json"));
        assert!(matches!(result, Err(NotificationError::FileSystem(_))));
    }

    #[test]
    fn test_pretty_output_round_trips_normalized_list() {
        let notifications = parse_notification_list(SCHEDULE).unwrap();
        let output = to_json_pretty(&notifications).unwrap();

        assert!(output.contains("\"refStepIndex\": 2"));
        assert_eq!(parse_notification_list(&output).unwrap(), notifications);
    }
}
