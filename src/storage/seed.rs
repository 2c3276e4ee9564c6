use jiff::{Timestamp, civil, tz::TimeZone};
use log::info;

use crate::{
    models::{
        project::{Color, Project, ProjectStatus},
        task::{Priority, Task, TaskStatus},
    },
    storage::memory::MemStorage,
};

/// Inserts the sample projects and tasks. Records are stored as built, so
/// `create` defaults are not involved; `updated_at` is the seeding time.
pub fn populate(storage: &mut MemStorage) -> Result<(), jiff::Error> {
    let now = Timestamp::now();

    let projects = sample_projects(now)?;
    let tasks = sample_tasks(now)?;
    let (project_count, task_count) = (projects.len(), tasks.len());

    for project in projects {
        storage.insert_project(project);
    }
    for task in tasks {
        storage.insert_task(task);
    }

    info!("event=store_seeded projects={project_count} tasks={task_count}");
    Ok(())
}

/// Midnight UTC of the given day.
fn day(year: i16, month: i8, day: i8) -> Result<Timestamp, jiff::Error> {
    Ok(civil::date(year, month, day)
        .to_zoned(TimeZone::UTC)?
        .timestamp())
}

fn sample_projects(now: Timestamp) -> Result<Vec<Project>, jiff::Error> {
    Ok(vec![
        Project {
            id: String::from("1"),
            name: String::from("E-commerce Platform"),
            description: Some(String::from(
                "Full e-commerce platform with an admin panel and payment integration.",
            )),
            status: ProjectStatus::InProgress,
            color: Color::Blue,
            due_date: Some(day(2024, 12, 15)?),
            created_at: day(2024, 11, 1)?,
            updated_at: now,
        },
        Project {
            id: String::from("2"),
            name: String::from("TaskFlow Mobile App"),
            description: Some(String::from(
                "Native iOS and Android app with real-time sync and offline mode.",
            )),
            status: ProjectStatus::Review,
            color: Color::Green,
            due_date: Some(day(2024, 12, 18)?),
            created_at: day(2024, 10, 15)?,
            updated_at: now,
        },
        Project {
            id: String::from("3"),
            name: String::from("Analytics Dashboard"),
            description: Some(String::from(
                "Analytics with interactive charts and automated management reports.",
            )),
            status: ProjectStatus::Completed,
            color: Color::Purple,
            due_date: Some(day(2024, 11, 30)?),
            created_at: day(2024, 9, 20)?,
            updated_at: now,
        },
        Project {
            id: String::from("4"),
            name: String::from("Security Hardening"),
            description: Some(String::from(
                "Multi-factor authentication and real-time security monitoring.",
            )),
            status: ProjectStatus::Planning,
            color: Color::Red,
            due_date: Some(day(2024, 12, 20)?),
            created_at: day(2024, 11, 25)?,
            updated_at: now,
        },
    ])
}

fn sample_tasks(now: Timestamp) -> Result<Vec<Task>, jiff::Error> {
    Ok(vec![
        Task {
            id: String::from("t1"),
            project_id: String::from("1"),
            title: String::from("Implement OAuth sign-in"),
            description: Some(String::from(
                "Social login with Google, Facebook and GitHub.",
            )),
            status: TaskStatus::InProgress,
            priority: Priority::High,
            completed: false,
            assignee: Some(String::from("João Silva")),
            due_date: Some(day(2024, 12, 15)?),
            created_at: day(2024, 11, 1)?,
            updated_at: now,
        },
        Task {
            id: String::from("t2"),
            project_id: String::from("2"),
            title: String::from("Design the mobile login screen"),
            description: Some(String::from(
                "Responsive sign-in screen for mobile devices.",
            )),
            status: TaskStatus::Todo,
            priority: Priority::Medium,
            completed: false,
            assignee: Some(String::from("Maria Santos")),
            due_date: Some(day(2024, 12, 18)?),
            created_at: day(2024, 11, 2)?,
            updated_at: now,
        },
        Task {
            id: String::from("t3"),
            project_id: String::from("3"),
            title: String::from("Set up performance metrics"),
            description: Some(String::from(
                "Collect and monitor application performance metrics.",
            )),
            status: TaskStatus::Completed,
            priority: Priority::Low,
            completed: true,
            assignee: Some(String::from("Pedro Costa")),
            due_date: Some(day(2024, 11, 29)?),
            created_at: day(2024, 11, 3)?,
            updated_at: now,
        },
        Task {
            id: String::from("t4"),
            project_id: String::from("4"),
            title: String::from("Encrypt sensitive data"),
            description: Some(String::from(
                "Add an encryption layer for sensitive user data.",
            )),
            status: TaskStatus::Todo,
            priority: Priority::High,
            completed: false,
            assignee: Some(String::from("Ana Silva")),
            due_date: Some(day(2024, 12, 20)?),
            created_at: day(2024, 11, 4)?,
            updated_at: now,
        },
    ])
}
