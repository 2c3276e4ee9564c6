use colored::*;
use jiff::Timestamp;

use crate::{
    models::{
        project::{Color, Project},
        task::{Priority, Task},
    },
    services::dashboard::{DashboardStats, ProjectOverview, ProjectSummary, is_overdue},
};

/// Get the terminal width, defaulting to 80 if unavailable
fn get_terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(80)
}

pub fn plural(count: usize, singular: &str, plural: &str) -> String {
    format!("{} {}", count, if count == 1 { singular } else { plural })
}

/// Paint text with the project's color tag
pub fn tint(text: &str, color: Color) -> ColoredString {
    match color {
        Color::Blue => text.blue(),
        Color::Green => text.green(),
        Color::Purple => text.purple(),
        Color::Red => text.red(),
        Color::Yellow => text.yellow(),
        Color::Pink => text.bright_magenta(),
    }
}

/// Get the appropriate status glyph for a task
pub fn get_status_glyph(task: &Task, is_overdue: bool) -> ColoredString {
    if task.completed {
        "✓".dimmed()
    } else if is_overdue {
        "●".red()
    } else {
        "○".normal()
    }
}

fn priority_label(priority: Priority) -> ColoredString {
    match priority {
        Priority::High => "high".red(),
        Priority::Medium => "medium".yellow(),
        Priority::Low => "low".dimmed(),
    }
}

/// Format a date for display (e.g., "Dec 15, 2024")
pub fn format_date(timestamp: Timestamp) -> String {
    timestamp.strftime("%b %d, %Y").to_string()
}

/// Print `left`, then `right` dimmed against the right edge when it fits
fn print_with_right_context(left: ColoredString, left_visible_len: usize, right: &str) {
    let terminal_width = get_terminal_width();
    let right_visible_len = right.chars().count();
    let total_content = left_visible_len + right_visible_len;

    if !right.is_empty() && total_content + 4 < terminal_width {
        let padding = terminal_width - total_content - 2;
        println!("{}{}{}", left, " ".repeat(padding), right.dimmed());
    } else {
        println!("{}", left);
    }
}

/// Render a single task line with glyph, title, and right-aligned project
pub fn render_task_line(task: &Task, project_name: Option<&str>, now: Timestamp) {
    let glyph = get_status_glyph(task, is_overdue(task, now));
    let left_section = format!("  {}  {}", glyph, task.title);
    let left_visible_len = format!("  {}  {}", " ", task.title).chars().count();

    let styled_left = if task.completed {
        left_section.dimmed()
    } else {
        left_section.bold()
    };

    let right_section = match project_name {
        Some(name) => format!("{}  ·  {}", name, task.priority),
        None => task.priority.to_string(),
    };

    print_with_right_context(styled_left, left_visible_len, &right_section);
    println!("     {}", task.id.dimmed());
}

/// Render every field of a task
pub fn render_task_detail(task: &Task, project_name: Option<&str>, now: Timestamp) {
    let glyph = get_status_glyph(task, is_overdue(task, now));
    println!("\n  {}  {}\n", glyph, task.title.bold());
    println!("  {:<10} {}", "id".dimmed(), task.id);
    println!(
        "  {:<10} {} {}",
        "project".dimmed(),
        project_name.unwrap_or("(missing)"),
        format!("({})", task.project_id).dimmed()
    );
    println!("  {:<10} {}", "status".dimmed(), task.status);
    println!("  {:<10} {}", "priority".dimmed(), priority_label(task.priority));
    if let Some(assignee) = &task.assignee {
        println!("  {:<10} {}", "assignee".dimmed(), assignee);
    }
    if let Some(due) = task.due_date {
        let due_text = format_date(due);
        let due_text = if is_overdue(task, now) {
            due_text.red()
        } else {
            due_text.normal()
        };
        println!("  {:<10} {}", "due".dimmed(), due_text);
    }
    if let Some(description) = &task.description {
        println!("\n  {}", description);
    }
    println!();
}

/// Render a project line with its task count and progress
pub fn render_project_line(overview: &ProjectOverview) {
    let project = &overview.project;
    let left_section = format!("  {} {}", tint("■", project.color), project.name.bold());
    let left_visible_len = format!("  ■ {}", project.name).chars().count();

    let right_section = format!(
        "{}  ·  {}  ·  {}%",
        project.status,
        plural(overview.task_count, "task", "tasks"),
        overview.progress
    );

    print_with_right_context(left_section.normal(), left_visible_len, &right_section);
    println!("    {}", project.id.dimmed());
}

/// Render every field of a project followed by its tasks
pub fn render_project_detail(
    project: &Project,
    tasks: &[Task],
    summary: &ProjectSummary,
    now: Timestamp,
) {
    println!(
        "\n  {} {}\n",
        tint("■", project.color),
        project.name.cyan().bold()
    );
    println!("  {:<10} {}", "id".dimmed(), project.id);
    println!("  {:<10} {}", "status".dimmed(), project.status);
    println!("  {:<10} {}", "color".dimmed(), tint(project.color.as_str(), project.color));
    if let Some(due) = project.due_date {
        println!("  {:<10} {}", "due".dimmed(), format_date(due));
    }
    println!("  {:<10} {}", "created".dimmed(), format_date(project.created_at));
    println!("  {:<10} {}", "updated".dimmed(), format_date(project.updated_at));
    println!("  {:<10} {}%", "progress".dimmed(), summary.progress);

    let high_priority = summary.high_priority_open.to_string();
    println!(
        "  {:<10} {}",
        "high".dimmed(),
        if summary.high_priority_open > 0 {
            high_priority.yellow()
        } else {
            high_priority.normal()
        }
    );
    let overdue = summary.overdue.to_string();
    println!(
        "  {:<10} {}",
        "overdue".dimmed(),
        if summary.overdue > 0 {
            overdue.red()
        } else {
            overdue.normal()
        }
    );
    if let Some(description) = &project.description {
        println!("\n  {}", description);
    }

    if tasks.is_empty() {
        println!("\n  No tasks in this project\n");
        return;
    }

    render_section_header("Tasks");
    for task in tasks {
        render_task_line(task, None, now);
    }
    println!();
}

/// Render a view header with title and count
pub fn render_view_header(title: &str, count: usize, singular: &str, plural_word: &str) {
    println!(
        "\n  {} ({})\n",
        title.cyan().bold(),
        plural(count, singular, plural_word)
    );
}

/// Render a section header (e.g., "Tasks", "Projects")
pub fn render_section_header(title: &str) {
    println!("\n  ─── {} ───\n", title.bold());
}

/// Render the dashboard counters
pub fn render_stats(stats: &DashboardStats) {
    println!(
        "\n  {}  {}   {}  {}   {}  {}   {}  {}%",
        "Projects".dimmed(),
        stats.total_projects.to_string().bold(),
        "Active".dimmed(),
        stats.active_tasks.to_string().bold(),
        "Completed".dimmed(),
        stats.completed_tasks.to_string().green(),
        "Rate".dimmed(),
        stats.completion_rate.to_string().bold()
    );
}
