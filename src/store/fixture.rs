use chrono::NaiveDate;

use super::entities::{Log, Mood, Role, Task, TeamMember};

fn task(id: &str, description: &str, time_spent: u32, completed: bool) -> Task {
    Task {
        id: id.into(),
        description: description.into(),
        time_spent,
        completed,
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("Seed dates are valid")
}

/// Logs every process starts with.
pub fn seed_logs() -> Vec<Log> {
    vec![
        Log {
            id: "log-1".into(),
            user_id: "dev-123".into(),
            date: date(2025, 4, 19),
            tasks: vec![
                task("task-1", "Implemented login flow", 120, true),
                task("task-2", "Fixed navigation bug", 45, true),
                task("task-3", "Started work on profile page", 90, false),
            ],
            mood: Mood::Productive,
            blockers: Some("Need design assets for profile page".into()),
            reviewed: false,
            manager_comments: None,
        },
        Log {
            id: "log-2".into(),
            user_id: "dev-123".into(),
            date: date(2025, 4, 18),
            tasks: vec![
                task("task-4", "Code review for PR #123", 60, true),
                task("task-5", "Team meeting", 45, true),
                task("task-6", "Documentation update", 120, true),
            ],
            mood: Mood::Neutral,
            blockers: None,
            reviewed: true,
            manager_comments: Some(
                "Good work on the documentation. Let's discuss the login flow implementation."
                    .into(),
            ),
        },
        Log {
            id: "log-3".into(),
            user_id: "dev-456".into(),
            date: date(2025, 4, 19),
            tasks: vec![
                task("task-7", "API integration", 180, true),
                task("task-8", "Unit testing", 120, false),
            ],
            mood: Mood::Frustrated,
            blockers: Some("API documentation is outdated".into()),
            reviewed: false,
            manager_comments: None,
        },
    ]
}

pub fn seed_team_members() -> Vec<TeamMember> {
    let member = |id: &str, name: &str, email: &str, team: &str| TeamMember {
        id: id.into(),
        name: name.into(),
        email: email.into(),
        role: Role::Developer,
        team: Some(team.into()),
        manager_id: "mgr-456".into(),
    };
    vec![
        member("dev-123", "John Developer", "john@example.com", "frontend"),
        member("dev-456", "Alice Engineer", "alice@example.com", "backend"),
        member("dev-789", "Bob Coder", "bob@example.com", "frontend"),
    ]
}
