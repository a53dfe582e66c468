//! Plain-text rendering of marketplace data for the terminal.

use std::fmt::Write;

use ecodeli_core::auth::TokenClaims;
use ecodeli_core::models::{Task, TaskApplication, User};
use ecodeli_core::utils::{format_date, format_duration, truncate_string};

/// Maximum title width in list views
const TITLE_WIDTH: usize = 36;

pub fn session_status(claims: &TokenClaims, now: i64) -> String {
    let who = claims
        .email
        .as_deref()
        .or(claims.sub.as_deref())
        .unwrap_or("unknown user");
    let minutes = claims.seconds_until_expiry(now) / 60;
    format!("Logged in as {} (session expires in {} min)", who, minutes)
}

pub fn user(user: &User) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} [{}]", user.full_name(), user.initials());
    if let Some(email) = &user.email {
        let _ = writeln!(out, "  Email:   {}", email);
    }
    if let Some(phone) = &user.phone {
        let _ = writeln!(out, "  Phone:   {}", phone);
    }
    if let Some(role) = user.role {
        let _ = writeln!(out, "  Role:    {}", role);
    }
    if let Some(created_at) = &user.created_at {
        let _ = writeln!(out, "  Since:   {}", format_date(created_at));
    }
    out.trim_end().to_string()
}

pub fn task_list(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks".to_string();
    }
    tasks
        .iter()
        .map(|task| {
            format!(
                "{:<26} {:<11} {:<10} {:<width$} {:>14}",
                task.id,
                task.task_type.to_string(),
                task.status.to_string(),
                truncate_string(&task.title, TITLE_WIDTH),
                task.price_display(),
                width = TITLE_WIDTH,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn application_list(applications: &[TaskApplication]) -> String {
    if applications.is_empty() {
        return "No applications".to_string();
    }
    applications
        .iter()
        .map(|application| {
            let title = application
                .task
                .as_deref()
                .map(|t| truncate_string(&t.title, TITLE_WIDTH))
                .unwrap_or_default();
            let code = application
                .validation_code
                .as_deref()
                .map(|c| format!("  code {}", c))
                .unwrap_or_default();
            let marker = if application.is_active() { '*' } else { ' ' };
            format!(
                "{} {:<26} {:<11} {:<width$}{}",
                marker,
                application.id,
                application.status.to_string(),
                title,
                code,
                width = TITLE_WIDTH,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn task_detail(task: &Task) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({}, {})", task.title, task.task_type, task.status);
    let _ = writeln!(out, "  {}", task.description);
    let _ = writeln!(out, "  Address:  {}", task.address.display());
    if let Some((lat, lng)) = task.address.coordinates() {
        let _ = writeln!(out, "  Location: {:.5}, {:.5}", lat, lng);
    }
    let _ = writeln!(out, "  Price:    {}", task.price_display());
    if let Some(owner) = &task.user {
        let _ = writeln!(out, "  Posted by {}", owner.full_name());
    }
    if let Some(category) = &task.category {
        let _ = writeln!(out, "  Category: {}", category.name);
    }
    if let Some(shipping) = &task.shipping {
        let _ = writeln!(out, "  Package:  {}", shipping.package_category);
        let _ = writeln!(out, "  Route:    {}", shipping.route());
        if let Some(km) = shipping.distance_km() {
            let _ = writeln!(out, "  Distance: {:.1} km", km);
        }
        if let Some(minutes) = shipping.estimated_duration_in_minutes {
            let _ = writeln!(out, "  Duration: {}", format_duration(minutes));
        }
    }
    if let Some(created_at) = &task.created_at {
        let _ = writeln!(out, "  Created:  {}", format_date(created_at));
    }
    if let Some(validated_at) = &task.validated_at {
        let _ = writeln!(out, "  Validated: {}", format_date(validated_at));
    }
    if task.status.awaiting_validation() {
        let _ = writeln!(out, "  Awaiting validation code");
    } else if task.status.is_closed() {
        let _ = writeln!(out, "  Closed");
    }

    let applications = task.applications();
    if !applications.is_empty() {
        let _ = writeln!(out, "\nApplications:");
        for application in applications {
            let applicant = application
                .applicant
                .as_ref()
                .map(User::full_name)
                .unwrap_or_default();
            let _ = writeln!(out, "  - {} {} ({})", application.id, applicant, application.status);
        }
    }

    let messages = task.messages();
    if !messages.is_empty() {
        let _ = writeln!(out, "\nMessages ({} unread):", task.unread_messages());
        for message in messages {
            let sender = message.sender.as_ref().map(User::full_name).unwrap_or_default();
            let marker = if message.is_read { ' ' } else { '*' };
            let _ = writeln!(
                out,
                "  {} [{}] {}: {}",
                marker, message.message_type, sender, message.content
            );
        }
    }
    out.trim_end().to_string()
}
