use log::info;

use crate::{
    models::project::{Color, NewProject, Project, ProjectPatch, ProjectStatus},
    services::{ServiceError, parse_due_date, parse_nullable_due_date},
    storage::Storage,
};

pub struct CreateProjectParameters {
    pub name: String,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub color: Option<Color>,
    pub due_date: Option<String>,
}

pub fn create_project(
    storage: &mut impl Storage,
    parameters: CreateProjectParameters,
) -> Result<Project, ServiceError> {
    let due_date = parameters
        .due_date
        .as_deref()
        .map(parse_due_date)
        .transpose()?;

    Ok(storage.create_project(NewProject {
        name: parameters.name,
        description: parameters.description,
        status: parameters.status,
        color: parameters.color,
        due_date,
    }))
}

/// `None` fields are left untouched; `Some(None)` clears a nullable field.
#[derive(Default)]
pub struct UpdateProjectParameters {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<ProjectStatus>,
    pub color: Option<Color>,
    pub due_date: Option<Option<String>>,
}

pub fn update_project(
    storage: &mut impl Storage,
    parameters: UpdateProjectParameters,
) -> Result<Project, ServiceError> {
    let patch = ProjectPatch {
        name: parameters.name,
        description: parameters.description,
        status: parameters.status,
        color: parameters.color,
        due_date: parse_nullable_due_date(parameters.due_date)?,
    };

    storage
        .update_project(&parameters.id, patch)
        .ok_or(ServiceError::ProjectNotFound(parameters.id))
}

pub fn get_project(storage: &impl Storage, id: &str) -> Result<Project, ServiceError> {
    storage
        .get_project(id)
        .ok_or_else(|| ServiceError::ProjectNotFound(id.to_string()))
}

#[derive(Default)]
pub struct ProjectFilter {
    pub status: Option<ProjectStatus>,
}

pub fn list_projects(storage: &impl Storage, filter: &ProjectFilter) -> Vec<Project> {
    storage
        .list_projects()
        .into_iter()
        .filter(|p| filter.status.is_none_or(|status| p.status == status))
        .collect()
}

pub struct DeleteProjectResult {
    pub project: Project,
    pub cascaded_tasks_count: usize,
}

pub fn delete_project(
    storage: &mut impl Storage,
    id: &str,
) -> Result<DeleteProjectResult, ServiceError> {
    let project = get_project(&*storage, id)?;
    let cascaded_tasks_count = storage
        .delete_project_cascading(id)
        .ok_or_else(|| ServiceError::ProjectNotFound(id.to_string()))?;

    info!("event=project_removed id={id} cascaded_tasks={cascaded_tasks_count}");

    Ok(DeleteProjectResult {
        project,
        cascaded_tasks_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::task::NewTask, storage::memory::MemStorage};

    fn create(storage: &mut MemStorage, name: &str) -> Project {
        create_project(
            storage,
            CreateProjectParameters {
                name: String::from(name),
                description: None,
                status: None,
                color: None,
                due_date: None,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_create_project_parses_due_date() {
        let mut storage = MemStorage::new();

        let project = create_project(
            &mut storage,
            CreateProjectParameters {
                name: String::from("Launch"),
                description: Some(String::from("Go live")),
                status: Some(ProjectStatus::InProgress),
                color: Some(Color::Pink),
                due_date: Some(String::from("2025-01-31")),
            },
        )
        .unwrap();

        assert_eq!(project.color, Color::Pink);
        assert_eq!(
            project.due_date,
            Some("2025-01-31T00:00:00Z".parse().unwrap())
        );
    }

    #[test]
    fn test_create_project_with_bad_date_stores_nothing() {
        let mut storage = MemStorage::new();

        let result = create_project(
            &mut storage,
            CreateProjectParameters {
                name: String::from("Launch"),
                description: None,
                status: None,
                color: None,
                due_date: Some(String::from("someday")),
            },
        );

        assert!(matches!(result, Err(ServiceError::InvalidDate(..))));
        assert!(storage.list_projects().is_empty());
    }

    #[test]
    fn test_update_project_clears_due_date() {
        let mut storage = MemStorage::new();
        let project = create_project(
            &mut storage,
            CreateProjectParameters {
                name: String::from("Launch"),
                description: None,
                status: None,
                color: None,
                due_date: Some(String::from("2025-01-31")),
            },
        )
        .unwrap();

        let updated = update_project(
            &mut storage,
            UpdateProjectParameters {
                id: project.id.clone(),
                due_date: Some(None),
                ..UpdateProjectParameters::default()
            },
        )
        .unwrap();

        assert_eq!(updated.due_date, None);
        assert_eq!(updated.name, "Launch");
    }

    #[test]
    fn test_update_missing_project_is_not_found() {
        let mut storage = MemStorage::new();

        let result = update_project(
            &mut storage,
            UpdateProjectParameters {
                id: String::from("ghost"),
                name: Some(String::from("x")),
                ..UpdateProjectParameters::default()
            },
        );

        assert!(matches!(result, Err(ServiceError::ProjectNotFound(id)) if id == "ghost"));
    }

    #[test]
    fn test_list_projects_filters_by_status() {
        let mut storage = MemStorage::with_sample_data().unwrap();

        let completed = list_projects(
            &storage,
            &ProjectFilter {
                status: Some(ProjectStatus::Completed),
            },
        );
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].id, "3");

        create(&mut storage, "Fresh");
        assert_eq!(list_projects(&storage, &ProjectFilter::default()).len(), 5);
    }

    #[test]
    fn test_delete_project_reports_cascaded_tasks() {
        let mut storage = MemStorage::new();
        let project = create(&mut storage, "A");
        for title in ["one", "two"] {
            storage.create_task(NewTask {
                project_id: project.id.clone(),
                title: String::from(title),
                ..NewTask::default()
            });
        }

        let result = delete_project(&mut storage, &project.id).unwrap();

        assert_eq!(result.project.id, project.id);
        assert_eq!(result.cascaded_tasks_count, 2);
        assert!(storage.list_tasks().is_empty());
        assert!(matches!(
            delete_project(&mut storage, &project.id),
            Err(ServiceError::ProjectNotFound(_))
        ));
    }
}
