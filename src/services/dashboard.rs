use jiff::Timestamp;
use serde::Serialize;

use crate::{
    models::{
        project::Project,
        task::{Priority, Task},
    },
    storage::Storage,
};

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_projects: usize,
    pub active_tasks: usize,
    pub completed_tasks: usize,
    /// Whole percentage of tasks completed
    pub completion_rate: u8,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOverview {
    #[serde(flatten)]
    pub project: Project,
    pub task_count: usize,
    pub completed_task_count: usize,
    pub progress: u8,
}

/// Figures shown on a single project's page.
#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub progress: u8,
    /// Open tasks with high priority
    pub high_priority_open: usize,
    pub overdue: usize,
}

/// Rounded share of `done` over `total` as a percentage; 0 when `total` is 0.
fn percentage(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((done as f64 / total as f64) * 100.0).round() as u8
}

/// Progress of a project given its tasks.
pub fn project_progress(tasks: &[Task]) -> u8 {
    let completed = tasks.iter().filter(|t| t.completed).count();
    percentage(completed, tasks.len())
}

/// A task is overdue when it is open and its due date has passed
pub fn is_overdue(task: &Task, now: Timestamp) -> bool {
    !task.completed && task.due_date.is_some_and(|due| due < now)
}

pub fn project_summary(tasks: &[Task], now: Timestamp) -> ProjectSummary {
    ProjectSummary {
        progress: project_progress(tasks),
        high_priority_open: tasks
            .iter()
            .filter(|t| t.priority == Priority::High && !t.completed)
            .count(),
        overdue: tasks.iter().filter(|t| is_overdue(t, now)).count(),
    }
}

pub fn dashboard_stats(storage: &impl Storage) -> DashboardStats {
    let tasks = storage.list_tasks();
    let completed_tasks = tasks.iter().filter(|t| t.completed).count();

    DashboardStats {
        total_projects: storage.list_projects().len(),
        active_tasks: tasks.len() - completed_tasks,
        completed_tasks,
        completion_rate: percentage(completed_tasks, tasks.len()),
    }
}

/// Every project, newest first, with its task counts and progress.
pub fn project_overviews(storage: &impl Storage) -> Vec<ProjectOverview> {
    storage
        .list_projects()
        .into_iter()
        .map(|project| {
            let tasks = storage.list_tasks_by_project(&project.id);
            ProjectOverview {
                task_count: tasks.len(),
                completed_task_count: tasks.iter().filter(|t| t.completed).count(),
                progress: project_progress(&tasks),
                project,
            }
        })
        .collect()
}
