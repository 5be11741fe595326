//! Text renderers for the terminal. Everything returns a `String` so the
//! actions decide where it goes; the `print_*` helpers write status lines to
//! stdout/stderr.

use crate::{
    auth::{Feedback, FeedbackKind},
    session::Session,
    ui::{popup::Popup, profile::Profile},
    users::{DeleteStep, DetailView, TableState, UserDetail, UserRow, UserTable},
};
use colored::Colorize;
use std::fmt::Write as _;

pub const EMPTY_PLACEHOLDER: &str = "No users found";

const HEADERS: [&str; 3] = ["Name", "Email", "Role"];
const MAX_COLUMN_WIDTH: usize = 40;

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".bright_red().bold(), msg.bright_red());
}

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".bright_green().bold(), msg.bright_green());
}

pub fn print_info(msg: &str) {
    println!("{} {}", "ℹ".bright_blue(), msg);
}

/// Renders the table in its current state.
#[must_use]
pub fn user_table(table: &UserTable) -> String {
    match table.state() {
        TableState::Loading => format!("{}\n", "Loading users...".dimmed()),
        TableState::Error(message) => format!("{} {}\n", "✗".bright_red(), message.bright_red()),
        TableState::Loaded(users) if users.is_empty() => {
            format!("{}\n", EMPTY_PLACEHOLDER.dimmed())
        }
        TableState::Loaded(_) => {
            let rows = table.rows();
            let mut out = rows_table(&rows);
            let plural = if rows.len() == 1 { "" } else { "s" };
            let _ = writeln!(out, "{} user{plural}", rows.len());
            out
        }
    }
}

fn rows_table(rows: &[UserRow]) -> String {
    let cells: Vec<[String; 3]> = rows
        .iter()
        .map(|row| {
            [
                truncate(&row.name, MAX_COLUMN_WIDTH),
                truncate(&row.email, MAX_COLUMN_WIDTH),
                truncate(&row.role, MAX_COLUMN_WIDTH),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    border(&mut out, &widths, '┌', '┬', '┐');
    out.push('│');
    for (header, width) in HEADERS.iter().zip(widths) {
        let _ = write!(out, " {} │", pad(header, width).bold().cyan());
    }
    out.push('\n');
    border(&mut out, &widths, '├', '┼', '┤');
    for row in &cells {
        out.push('│');
        for (cell, width) in row.iter().zip(widths) {
            let _ = write!(out, " {} │", pad(cell, width));
        }
        out.push('\n');
    }
    border(&mut out, &widths, '└', '┴', '┘');
    out
}

fn border(out: &mut String, widths: &[usize], left: char, mid: char, right: char) {
    out.push(left);
    for (i, width) in widths.iter().enumerate() {
        out.push_str(&"─".repeat(width + 2));
        if i + 1 < widths.len() {
            out.push(mid);
        }
    }
    out.push(right);
    out.push('\n');
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{text}{}", " ".repeat(width.saturating_sub(len)))
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// Renders the detail popup. Controls the session cannot use are shown as
/// disabled rather than hidden.
#[must_use]
pub fn user_detail(popup: &Popup<UserDetail>, session: Option<&Session>) -> String {
    let Some(detail) = popup.content() else {
        return String::new();
    };
    let user = detail.user();
    let mut out = String::new();

    let _ = writeln!(out, "{}", format!("User {}", user.id).bold());
    match detail.view() {
        DetailView::Display => {
            let _ = writeln!(out, "  {:<6} {}", "Name:".dimmed(), user.name);
            let _ = writeln!(out, "  {:<6} {}", "Email:".dimmed(), user.email);
            let _ = writeln!(out, "  {:<6} {}", "Role:".dimmed(), user.role);
        }
        DetailView::Edit(draft) => {
            let _ = writeln!(out, "  {}", "Editing".yellow());
            let _ = writeln!(out, "  {:<6} {}", "Name:".dimmed(), draft.name);
            let _ = writeln!(out, "  {:<6} {}", "Email:".dimmed(), draft.email);
            let _ = writeln!(out, "  {:<6} {}", "Role:".dimmed(), draft.role);
        }
    }

    let edit = control("Edit", UserDetail::edit_enabled(session));
    let delete = control("Delete", UserDetail::delete_enabled(session));
    let _ = writeln!(out, "  {edit}  {delete}");

    if detail.delete_step() == DeleteStep::Confirming {
        let _ = writeln!(
            out,
            "  {}",
            format!("Delete {}? This cannot be undone.", user.name).bright_red()
        );
    }
    out
}

fn control(label: &str, enabled: bool) -> String {
    if enabled {
        format!("[{}]", label.bright_green())
    } else {
        format!("[{} (disabled)]", label.dimmed())
    }
}

#[must_use]
pub fn feedback(feedback: &Feedback) -> String {
    match feedback.kind {
        FeedbackKind::Success => format!("{} {}", "✓".bright_green().bold(), feedback.message.bright_green()),
        FeedbackKind::Error => format!("{} {}", "✗".bright_red().bold(), feedback.message.bright_red()),
    }
}

#[must_use]
pub fn profile(profile: &Profile) -> String {
    let mut out = format!("{}\n{}\n", profile.name.bold(), profile.email);
    if let Some(role) = &profile.role {
        let _ = writeln!(out, "{}", role.dimmed());
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::User;
    use serde_json::json;

    fn session(permissions: &[&str]) -> Session {
        serde_json::from_value(json!({
            "token": "t",
            "user": {"id": "1", "name": "A", "email": "a@x.com", "role": "admin", "permission": permissions}
        }))
        .unwrap()
    }

    fn detail_popup() -> Popup<UserDetail> {
        let mut popup = Popup::new();
        popup.show(UserDetail::new(User {
            id: "9".to_string(),
            name: "Alan".to_string(),
            email: "alan@x.com".to_string(),
            role: "user".to_string(),
        }));
        popup
    }

    #[test]
    fn rows_table_lists_every_cell() {
        let rendered = rows_table(&[UserRow {
            name: "A".to_string(),
            email: "a@x.com".to_string(),
            role: "admin".to_string(),
        }]);
        assert!(rendered.contains("a@x.com"));
        assert!(rendered.contains("admin"));
        // borders, header, separator, one row, bottom border
        assert_eq!(rendered.lines().count(), 5);
    }

    #[test]
    fn loading_table_is_not_empty_placeholder() {
        let table = UserTable::new();
        assert!(user_table(&table).contains("Loading users"));
        assert!(!user_table(&table).contains(EMPTY_PLACEHOLDER));
    }

    #[test]
    fn controls_without_capability_are_disabled() {
        let popup = detail_popup();
        let viewer = user_detail(&popup, Some(&session(&[])));
        assert!(viewer.contains("(disabled)"));
        assert!(viewer.contains("alan@x.com"));

        let admin = user_detail(&popup, Some(&session(&["edit_user", "delete_user"])));
        assert!(!admin.contains("(disabled)"));
    }

    #[test]
    fn closed_popup_renders_nothing() {
        let popup: Popup<UserDetail> = Popup::new();
        assert!(user_detail(&popup, None).is_empty());
    }

    #[test]
    fn long_cells_are_truncated() {
        let long = "x".repeat(60);
        let cut = truncate(&long, MAX_COLUMN_WIDTH);
        assert_eq!(cut.chars().count(), MAX_COLUMN_WIDTH);
        assert!(cut.ends_with('…'));
    }
}
