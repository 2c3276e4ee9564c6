use clap::Subcommand;
use colored::*;
use jiff::Timestamp;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::{
    models::{
        project::{Color, ProjectStatus},
        task::{Priority, Task, TaskStatus},
    },
    services::{
        ServiceError,
        dashboard::{dashboard_stats, project_overviews, project_summary},
        projects::{
            CreateProjectParameters, ProjectFilter, UpdateProjectParameters, create_project,
            delete_project, get_project, list_projects, update_project,
        },
        tasks::{
            CreateTaskParameters, TaskFilter, UpdateTaskParameters, create_task, delete_task,
            get_task, list_tasks, set_task_completed, update_task,
        },
        users::{find_user, get_user, register_user},
    },
    storage::{Storage, UserStorage},
    ui,
};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show totals and the progress of every project
    Dashboard,

    /// Manage projects
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Manage tasks
    #[command(subcommand)]
    Task(TaskCommands),

    /// Manage users
    #[command(subcommand)]
    User(UserCommands),

    /// Read commands from stdin, one per line, against the same store
    Shell,
}

#[derive(Debug, Subcommand)]
pub enum ProjectCommands {
    /// List projects, most recently updated first
    List {
        /// Only show projects with this status
        #[arg(short, long, value_enum)]
        status: Option<ProjectStatus>,
    },
    /// Show a project and its tasks
    Show { id: String },
    /// Create a new project
    New {
        /// Project name
        name: String,

        /// Describe the project
        #[arg(short, long)]
        description: Option<String>,

        /// Initial status (defaults to planning)
        #[arg(short, long, value_enum)]
        status: Option<ProjectStatus>,

        /// Color tag (defaults to blue)
        #[arg(short, long, value_enum)]
        color: Option<Color>,

        /// Due date (e.g., "2025-03-01" or "2025-03-01T18:00:00Z")
        #[arg(long)]
        due: Option<String>,
    },
    /// Change some fields of a project
    Edit {
        id: String,

        /// New name
        #[arg(short, long)]
        name: Option<String>,

        /// New description
        #[arg(short, long, conflicts_with = "no_description")]
        description: Option<String>,

        /// Remove the description
        #[arg(long)]
        no_description: bool,

        /// New status
        #[arg(short, long, value_enum)]
        status: Option<ProjectStatus>,

        /// New color tag
        #[arg(short, long, value_enum)]
        color: Option<Color>,

        /// New due date
        #[arg(long, conflicts_with = "no_due")]
        due: Option<String>,

        /// Remove the due date
        #[arg(long)]
        no_due: bool,
    },
    /// Delete a project together with all of its tasks
    Delete { id: String },
}

#[derive(Debug, Subcommand)]
pub enum TaskCommands {
    /// List tasks, most recently updated first
    List {
        /// Only show tasks of this project
        #[arg(short, long)]
        project: Option<String>,

        /// Only show tasks with this priority
        #[arg(long, value_enum)]
        priority: Option<Priority>,
    },
    /// Show a task
    Show { id: String },
    /// Add a task to a project
    New {
        /// Id of the owning project
        project_id: String,

        /// Task title
        title: String,

        /// Describe the task
        #[arg(short, long)]
        description: Option<String>,

        /// Initial status (defaults to todo)
        #[arg(short, long, value_enum)]
        status: Option<TaskStatus>,

        /// Priority (defaults to medium)
        #[arg(long, value_enum)]
        priority: Option<Priority>,

        /// Who works on the task
        #[arg(short, long)]
        assignee: Option<String>,

        /// Due date (e.g., "2025-03-01" or "2025-03-01T18:00:00Z")
        #[arg(long)]
        due: Option<String>,
    },
    /// Change some fields of a task
    Edit {
        id: String,

        /// Move the task to another project
        #[arg(short, long)]
        project: Option<String>,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New description
        #[arg(short, long, conflicts_with = "no_description")]
        description: Option<String>,

        /// Remove the description
        #[arg(long)]
        no_description: bool,

        /// New status
        #[arg(short, long, value_enum)]
        status: Option<TaskStatus>,

        /// New priority
        #[arg(long, value_enum)]
        priority: Option<Priority>,

        /// New assignee
        #[arg(short, long, conflicts_with = "no_assignee")]
        assignee: Option<String>,

        /// Remove the assignee
        #[arg(long)]
        no_assignee: bool,

        /// New due date
        #[arg(long, conflicts_with = "no_due")]
        due: Option<String>,

        /// Remove the due date
        #[arg(long)]
        no_due: bool,
    },
    /// Mark a task as completed
    Done { id: String },
    /// Reopen a completed task
    Undo { id: String },
    /// Delete a task
    Delete { id: String },
}

#[derive(Debug, Subcommand)]
pub enum UserCommands {
    /// Register a user
    New {
        username: String,

        #[arg(long)]
        password: String,
    },
    /// Show a user by id
    Show { id: String },
    /// Look a user up by username
    Find { username: String },
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read input: {0}")]
    Input(#[from] std::io::Error),

    #[error("Already inside a shell")]
    NestedShell,
}

/// Maps a `--value` / `--no-value` pair onto a nullable patch field.
fn nullable(value: Option<String>, clear: bool) -> Option<Option<String>> {
    if clear { Some(None) } else { value.map(Some) }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CommandError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn project_name(storage: &impl Storage, project_id: &str) -> Option<String> {
    storage.get_project(project_id).map(|p| p.name)
}

fn render_task_list(storage: &impl Storage, tasks: &[Task]) {
    let now = Timestamp::now();
    ui::render_view_header("Tasks", tasks.len(), "task", "tasks");
    for task in tasks {
        ui::render_task_line(task, project_name(storage, &task.project_id).as_deref(), now);
    }
    println!();
}

fn render_task(storage: &impl Storage, task: &Task) {
    ui::render_task_detail(
        task,
        project_name(storage, &task.project_id).as_deref(),
        Timestamp::now(),
    );
}

pub fn execute<S>(command: Commands, storage: &mut S, json: bool) -> Result<(), CommandError>
where
    S: Storage + UserStorage,
{
    match command {
        Commands::Dashboard => {
            let stats = dashboard_stats(&*storage);
            let overviews = project_overviews(&*storage);

            if json {
                return print_json(&json!({ "stats": stats, "projects": overviews }));
            }

            ui::render_stats(&stats);
            ui::render_view_header("Projects", overviews.len(), "project", "projects");
            for overview in &overviews {
                ui::render_project_line(overview);
            }
            println!();
        }
        Commands::Project(command) => execute_project(command, storage, json)?,
        Commands::Task(command) => execute_task(command, storage, json)?,
        Commands::User(command) => execute_user(command, storage, json)?,
        Commands::Shell => return Err(CommandError::NestedShell),
    }

    Ok(())
}

fn execute_project(
    command: ProjectCommands,
    storage: &mut impl Storage,
    json: bool,
) -> Result<(), CommandError> {
    match command {
        ProjectCommands::List { status } => {
            let projects = list_projects(&*storage, &ProjectFilter { status });
            if json {
                return print_json(&projects);
            }

            let overviews: Vec<_> = project_overviews(&*storage)
                .into_iter()
                .filter(|o| projects.iter().any(|p| p.id == o.project.id))
                .collect();

            if overviews.is_empty() {
                println!("No projects");
            } else {
                ui::render_view_header("Projects", overviews.len(), "project", "projects");
                for overview in &overviews {
                    ui::render_project_line(overview);
                }
                println!();
            }
        }
        ProjectCommands::Show { id } => {
            let project = get_project(&*storage, &id)?;
            let tasks = storage.list_tasks_by_project(&id);
            let now = Timestamp::now();
            let summary = project_summary(&tasks, now);
            if json {
                return print_json(
                    &json!({ "project": project, "summary": summary, "tasks": tasks }),
                );
            }
            ui::render_project_detail(&project, &tasks, &summary, now);
        }
        ProjectCommands::New {
            name,
            description,
            status,
            color,
            due,
        } => {
            let project = create_project(
                storage,
                CreateProjectParameters {
                    name,
                    description,
                    status,
                    color,
                    due_date: due,
                },
            )?;
            if json {
                return print_json(&project);
            }
            println!(
                "{} Created project {} {}",
                "✓".green(),
                project.name.bold(),
                format!("({})", project.id).dimmed()
            );
        }
        ProjectCommands::Edit {
            id,
            name,
            description,
            no_description,
            status,
            color,
            due,
            no_due,
        } => {
            let project = update_project(
                storage,
                UpdateProjectParameters {
                    id,
                    name,
                    description: nullable(description, no_description),
                    status,
                    color,
                    due_date: nullable(due, no_due),
                },
            )?;
            if json {
                return print_json(&project);
            }
            println!("{} Updated project {}", "✓".green(), project.name.bold());
        }
        ProjectCommands::Delete { id } => {
            let result = delete_project(storage, &id)?;
            if json {
                return print_json(&json!({
                    "deleted": result.project.id,
                    "cascadedTasks": result.cascaded_tasks_count
                }));
            }
            println!(
                "{} Deleted project {} and {}",
                "✓".green(),
                result.project.name.bold(),
                ui::plural(result.cascaded_tasks_count, "task", "tasks")
            );
        }
    }

    Ok(())
}

fn execute_task(
    command: TaskCommands,
    storage: &mut impl Storage,
    json: bool,
) -> Result<(), CommandError> {
    match command {
        TaskCommands::List { project, priority } => {
            let tasks = list_tasks(
                &*storage,
                &TaskFilter {
                    project_id: project,
                    priority,
                },
            );
            if json {
                return print_json(&tasks);
            }
            if tasks.is_empty() {
                println!("No tasks");
            } else {
                render_task_list(&*storage, &tasks);
            }
        }
        TaskCommands::Show { id } => {
            let task = get_task(&*storage, &id)?;
            if json {
                return print_json(&task);
            }
            render_task(&*storage, &task);
        }
        TaskCommands::New {
            project_id,
            title,
            description,
            status,
            priority,
            assignee,
            due,
        } => {
            let task = create_task(
                &mut *storage,
                CreateTaskParameters {
                    project_id,
                    title,
                    description,
                    status,
                    priority,
                    assignee,
                    due_date: due,
                },
            )?;
            if json {
                return print_json(&task);
            }
            println!(
                "{} Created task {} {}",
                "✓".green(),
                task.title.bold(),
                format!("({})", task.id).dimmed()
            );
            if storage.get_project(&task.project_id).is_none() {
                println!(
                    "  {}",
                    format!("note: no project with id '{}' exists", task.project_id).yellow()
                );
            }
        }
        TaskCommands::Edit {
            id,
            project,
            title,
            description,
            no_description,
            status,
            priority,
            assignee,
            no_assignee,
            due,
            no_due,
        } => {
            let task = update_task(
                storage,
                UpdateTaskParameters {
                    id,
                    project_id: project,
                    title,
                    description: nullable(description, no_description),
                    status,
                    priority,
                    assignee: nullable(assignee, no_assignee),
                    due_date: nullable(due, no_due),
                },
            )?;
            if json {
                return print_json(&task);
            }
            println!("{} Updated task {}", "✓".green(), task.title.bold());
        }
        TaskCommands::Done { id } => {
            let task = set_task_completed(storage, &id, true)?;
            if json {
                return print_json(&task);
            }
            println!("{} Completed {}", "✓".green(), task.title.bold());
        }
        TaskCommands::Undo { id } => {
            let task = set_task_completed(storage, &id, false)?;
            if json {
                return print_json(&task);
            }
            println!("{} Reopened {}", "○".normal(), task.title.bold());
        }
        TaskCommands::Delete { id } => {
            let task = delete_task(storage, &id)?;
            if json {
                return print_json(&json!({ "deleted": task.id }));
            }
            println!("{} Deleted task {}", "✓".green(), task.title.bold());
        }
    }

    Ok(())
}

fn execute_user(
    command: UserCommands,
    storage: &mut impl UserStorage,
    json: bool,
) -> Result<(), CommandError> {
    let user = match command {
        UserCommands::New { username, password } => register_user(storage, username, password)?,
        UserCommands::Show { id } => get_user(&*storage, &id)?,
        UserCommands::Find { username } => find_user(&*storage, &username)?,
    };

    if json {
        return print_json(&user);
    }
    println!("  {} {}", user.username.bold(), user.id.dimmed());

    Ok(())
}
