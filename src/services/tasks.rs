use log::info;

use crate::{
    models::task::{NewTask, Priority, Task, TaskPatch, TaskStatus},
    services::{ServiceError, parse_due_date, parse_nullable_due_date},
    storage::Storage,
};

pub struct CreateTaskParameters {
    pub project_id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub assignee: Option<String>,
    pub due_date: Option<String>,
}

/// Creates a task. The owning project is deliberately not looked up.
pub fn create_task(
    storage: &mut impl Storage,
    parameters: CreateTaskParameters,
) -> Result<Task, ServiceError> {
    let due_date = parameters
        .due_date
        .as_deref()
        .map(parse_due_date)
        .transpose()?;

    Ok(storage.create_task(NewTask {
        project_id: parameters.project_id,
        title: parameters.title,
        description: parameters.description,
        status: parameters.status,
        priority: parameters.priority,
        completed: None,
        assignee: parameters.assignee,
        due_date,
    }))
}

#[derive(Default)]
pub struct UpdateTaskParameters {
    pub id: String,
    pub project_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub assignee: Option<Option<String>>,
    pub due_date: Option<Option<String>>,
}

pub fn update_task(
    storage: &mut impl Storage,
    parameters: UpdateTaskParameters,
) -> Result<Task, ServiceError> {
    let patch = TaskPatch {
        project_id: parameters.project_id,
        title: parameters.title,
        description: parameters.description,
        status: parameters.status,
        priority: parameters.priority,
        completed: None,
        assignee: parameters.assignee,
        due_date: parse_nullable_due_date(parameters.due_date)?,
    };

    storage
        .update_task(&parameters.id, patch)
        .ok_or(ServiceError::TaskNotFound(parameters.id))
}

/// Marks a task done or not done, moving its status along with the flag.
pub fn set_task_completed(
    storage: &mut impl Storage,
    id: &str,
    completed: bool,
) -> Result<Task, ServiceError> {
    let status = if completed {
        TaskStatus::Completed
    } else {
        TaskStatus::Todo
    };

    storage
        .update_task(
            id,
            TaskPatch {
                completed: Some(completed),
                status: Some(status),
                ..TaskPatch::default()
            },
        )
        .ok_or_else(|| ServiceError::TaskNotFound(id.to_string()))
}

pub fn get_task(storage: &impl Storage, id: &str) -> Result<Task, ServiceError> {
    storage
        .get_task(id)
        .ok_or_else(|| ServiceError::TaskNotFound(id.to_string()))
}

#[derive(Default)]
pub struct TaskFilter {
    pub project_id: Option<String>,
    pub priority: Option<Priority>,
}

pub fn list_tasks(storage: &impl Storage, filter: &TaskFilter) -> Vec<Task> {
    let tasks = match &filter.project_id {
        Some(project_id) => storage.list_tasks_by_project(project_id),
        None => storage.list_tasks(),
    };

    tasks
        .into_iter()
        .filter(|t| filter.priority.is_none_or(|priority| t.priority == priority))
        .collect()
}

pub fn delete_task(storage: &mut impl Storage, id: &str) -> Result<Task, ServiceError> {
    let task = get_task(&*storage, id)?;

    if !storage.delete_task(id) {
        return Err(ServiceError::TaskNotFound(id.to_string()));
    }

    info!("event=task_removed id={id}");

    Ok(task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemStorage;

    fn parameters(project_id: &str, title: &str) -> CreateTaskParameters {
        CreateTaskParameters {
            project_id: String::from(project_id),
            title: String::from(title),
            description: None,
            status: None,
            priority: None,
            assignee: None,
            due_date: None,
        }
    }

    #[test]
    fn test_create_task_without_existing_project() {
        let mut storage = MemStorage::new();

        let task = create_task(&mut storage, parameters("nonexistent", "x")).unwrap();

        assert_eq!(get_task(&storage, &task.id).unwrap(), task);
        assert!(storage.get_project("nonexistent").is_none());
    }

    #[test]
    fn test_create_task_rejects_bad_due_date() {
        let mut storage = MemStorage::new();

        let result = create_task(
            &mut storage,
            CreateTaskParameters {
                due_date: Some(String::from("31/12/2024")),
                ..parameters("p", "x")
            },
        );

        assert!(matches!(result, Err(ServiceError::InvalidDate(..))));
        assert!(storage.list_tasks().is_empty());
    }

    #[test]
    fn test_set_task_completed_moves_status() {
        let mut storage = MemStorage::new();
        let task = create_task(
            &mut storage,
            CreateTaskParameters {
                status: Some(TaskStatus::InProgress),
                ..parameters("p", "x")
            },
        )
        .unwrap();

        let done = set_task_completed(&mut storage, &task.id, true).unwrap();
        assert!(done.completed);
        assert_eq!(done.status, TaskStatus::Completed);

        let reopened = set_task_completed(&mut storage, &task.id, false).unwrap();
        assert!(!reopened.completed);
        assert_eq!(reopened.status, TaskStatus::Todo);
        assert_eq!(reopened.created_at, task.created_at);
    }

    #[test]
    fn test_set_task_completed_on_missing_task() {
        let mut storage = MemStorage::new();

        assert!(matches!(
            set_task_completed(&mut storage, "ghost", true),
            Err(ServiceError::TaskNotFound(_))
        ));
    }

    #[test]
    fn test_update_task_can_move_and_unassign() {
        let mut storage = MemStorage::new();
        let task = create_task(
            &mut storage,
            CreateTaskParameters {
                assignee: Some(String::from("Ana")),
                ..parameters("a", "x")
            },
        )
        .unwrap();

        let updated = update_task(
            &mut storage,
            UpdateTaskParameters {
                id: task.id.clone(),
                project_id: Some(String::from("b")),
                assignee: Some(None),
                ..UpdateTaskParameters::default()
            },
        )
        .unwrap();

        assert_eq!(updated.project_id, "b");
        assert_eq!(updated.assignee, None);
        assert_eq!(updated.title, "x");
        assert!(storage.list_tasks_by_project("a").is_empty());
    }

    #[test]
    fn test_list_tasks_filters_by_project_and_priority() {
        let storage = MemStorage::with_sample_data().unwrap();

        let high = list_tasks(
            &storage,
            &TaskFilter {
                priority: Some(Priority::High),
                ..TaskFilter::default()
            },
        );
        assert_eq!(high.len(), 2);

        let high_in_first = list_tasks(
            &storage,
            &TaskFilter {
                project_id: Some(String::from("1")),
                priority: Some(Priority::High),
            },
        );
        assert_eq!(high_in_first.len(), 1);
        assert_eq!(high_in_first[0].id, "t1");

        let low_in_first = list_tasks(
            &storage,
            &TaskFilter {
                project_id: Some(String::from("1")),
                priority: Some(Priority::Low),
            },
        );
        assert!(low_in_first.is_empty());
    }

    #[test]
    fn test_delete_task_twice() {
        let mut storage = MemStorage::new();
        let task = create_task(&mut storage, parameters("p", "x")).unwrap();

        assert_eq!(delete_task(&mut storage, &task.id).unwrap().id, task.id);
        assert!(matches!(
            delete_task(&mut storage, &task.id),
            Err(ServiceError::TaskNotFound(_))
        ));
    }
}
