use std::collections::HashMap;

use log::debug;

use crate::{
    models::{
        project::{NewProject, Project, ProjectPatch},
        task::{NewTask, Task, TaskPatch},
        user::{NewUser, User},
    },
    storage::{Storage, Table, UserStorage, new_id, seed},
};

/// Process-local store backing every entity with an in-memory table.
///
/// Owned by the composition root and handed to callers by reference.
#[derive(Default)]
pub struct MemStorage {
    projects: Table<Project>,
    tasks: Table<Task>,
    users: HashMap<String, User>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with the sample projects and tasks.
    pub fn with_sample_data() -> Result<Self, jiff::Error> {
        let mut storage = Self::new();
        seed::populate(&mut storage)?;
        Ok(storage)
    }

    pub(crate) fn insert_project(&mut self, project: Project) {
        self.projects.insert(project);
    }

    pub(crate) fn insert_task(&mut self, task: Task) {
        self.tasks.insert(task);
    }

}

impl Storage for MemStorage {
    fn list_projects(&self) -> Vec<Project> {
        self.projects.list()
    }

    fn get_project(&self, id: &str) -> Option<Project> {
        self.projects.get(id)
    }

    fn create_project(&mut self, fields: NewProject) -> Project {
        let project = self.projects.create(fields);
        debug!("event=project_created id={}", project.id);
        project
    }

    fn update_project(&mut self, id: &str, patch: ProjectPatch) -> Option<Project> {
        let project = self.projects.update(id, patch);
        debug!("event=project_updated id={id} found={}", project.is_some());
        project
    }

    /// Deletes the project's tasks first and then the project. Unknown
    /// projects are left alone, along with any tasks pointing at them.
    fn delete_project_cascading(&mut self, id: &str) -> Option<usize> {
        if !self.projects.contains(id) {
            debug!("event=project_delete_missed id={id}");
            return None;
        }

        let cascaded = self.tasks.remove_where(|task| task.project_id == id);
        self.projects.delete(id);
        debug!("event=project_deleted id={id} cascaded={cascaded}");

        Some(cascaded)
    }

    fn list_tasks(&self) -> Vec<Task> {
        self.tasks.list()
    }

    fn get_task(&self, id: &str) -> Option<Task> {
        self.tasks.get(id)
    }

    fn list_tasks_by_project(&self, project_id: &str) -> Vec<Task> {
        self.tasks.list_where(|task| task.project_id == project_id)
    }

    fn create_task(&mut self, fields: NewTask) -> Task {
        let task = self.tasks.create(fields);
        debug!(
            "event=task_created id={} project_id={}",
            task.id, task.project_id
        );
        task
    }

    fn update_task(&mut self, id: &str, patch: TaskPatch) -> Option<Task> {
        let task = self.tasks.update(id, patch);
        debug!("event=task_updated id={id} found={}", task.is_some());
        task
    }

    fn delete_task(&mut self, id: &str) -> bool {
        let removed = self.tasks.delete(id);
        debug!("event=task_deleted id={id} found={removed}");
        removed
    }
}

impl UserStorage for MemStorage {
    fn get_user(&self, id: &str) -> Option<User> {
        self.users.get(id).cloned()
    }

    fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.users
            .values()
            .find(|user| user.username == username)
            .cloned()
    }

    fn create_user(&mut self, fields: NewUser) -> User {
        let user = User {
            id: new_id(),
            username: fields.username,
            password: fields.password,
        };
        self.users.insert(user.id.clone(), user.clone());
        debug!("event=user_created id={}", user.id);
        user
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_project(name: &str) -> NewProject {
        NewProject {
            name: String::from(name),
            ..NewProject::default()
        }
    }

    fn new_task(project_id: &str, title: &str) -> NewTask {
        NewTask {
            project_id: String::from(project_id),
            title: String::from(title),
            ..NewTask::default()
        }
    }

    fn hours_ago(hours: i64) -> jiff::Timestamp {
        jiff::Timestamp::now()
            .checked_sub(jiff::SignedDuration::from_hours(hours))
            .unwrap()
    }

    #[test]
    fn test_update_moves_record_to_front_of_lists() {
        let mut storage = MemStorage::new();
        for (id, age) in [("a", 3), ("b", 2), ("c", 1)] {
            storage.insert_project(Project::from_new(
                String::from(id),
                new_project(id),
                hours_ago(age),
            ));
            storage.insert_task(Task::from_new(
                format!("t{id}"),
                new_task("p", id),
                hours_ago(age),
            ));
        }

        storage
            .update_project(
                "a",
                ProjectPatch {
                    name: Some(String::from("renamed")),
                    ..ProjectPatch::default()
                },
            )
            .unwrap();
        storage.update_task("ta", TaskPatch::default()).unwrap();

        let project_ids: Vec<_> = storage.list_projects().into_iter().map(|p| p.id).collect();
        let task_ids: Vec<_> = storage.list_tasks().into_iter().map(|t| t.id).collect();
        let by_project: Vec<_> = storage
            .list_tasks_by_project("p")
            .into_iter()
            .map(|t| t.id)
            .collect();

        assert_eq!(project_ids, ["a", "c", "b"]);
        assert_eq!(task_ids, ["ta", "tc", "tb"]);
        assert_eq!(by_project, task_ids);
    }

    #[test]
    fn test_list_projects_returns_every_created_project_newest_first() {
        let mut storage = MemStorage::new();
        for i in 0..5 {
            storage.create_project(new_project(&format!("Project {i}")));
        }

        let projects = storage.list_projects();

        assert_eq!(projects.len(), 5);
        assert!(
            projects
                .windows(2)
                .all(|pair| pair[0].updated_at >= pair[1].updated_at)
        );
    }

    #[test]
    fn test_created_project_has_equal_timestamps() {
        let mut storage = MemStorage::new();

        let project = storage.create_project(new_project("A"));

        assert_eq!(project.created_at, project.updated_at);
        assert_eq!(storage.get_project(&project.id), Some(project));
    }

    #[test]
    fn test_update_unknown_project_changes_nothing() {
        let mut storage = MemStorage::new();
        storage.create_project(new_project("A"));

        let result = storage.update_project(
            "missing",
            ProjectPatch {
                name: Some(String::from("B")),
                ..ProjectPatch::default()
            },
        );

        assert!(result.is_none());
        assert!(storage.get_project("missing").is_none());
        assert_eq!(storage.list_projects().len(), 1);
    }

    #[test]
    fn test_update_unknown_task_changes_nothing() {
        let mut storage = MemStorage::new();

        let result = storage.update_task("missing", TaskPatch::default());

        assert!(result.is_none());
        assert!(storage.list_tasks().is_empty());
    }

    #[test]
    fn test_partial_update_preserves_untouched_fields() {
        let mut storage = MemStorage::new();
        let project = storage.create_project(NewProject {
            name: String::from("A"),
            description: Some(String::from("first")),
            ..NewProject::default()
        });

        let updated = storage
            .update_project(
                &project.id,
                ProjectPatch {
                    status: Some(crate::models::project::ProjectStatus::Review),
                    ..ProjectPatch::default()
                },
            )
            .unwrap();

        assert_eq!(updated.name, "A");
        assert_eq!(updated.description.as_deref(), Some("first"));
        assert_eq!(updated.color, project.color);
        assert_eq!(updated.created_at, project.created_at);
        assert!(updated.updated_at >= project.updated_at);
    }

    #[test]
    fn test_task_update_keeps_created_at_and_advances_updated_at() {
        let mut storage = MemStorage::new();
        let task = storage.create_task(new_task("p", "Write"));

        let updated = storage
            .update_task(
                &task.id,
                TaskPatch {
                    completed: Some(true),
                    ..TaskPatch::default()
                },
            )
            .unwrap();

        assert!(updated.completed);
        assert_eq!(updated.title, "Write");
        assert_eq!(updated.created_at, task.created_at);
        assert!(updated.updated_at >= task.updated_at);
        assert_eq!(storage.get_task(&task.id), Some(updated));
    }

    #[test]
    fn test_delete_project_cascades_to_its_tasks_only() {
        let mut storage = MemStorage::new();
        let p1 = storage.create_project(new_project("A"));
        storage.create_task(new_task(&p1.id, "T1"));
        storage.create_task(new_task(&p1.id, "T2"));
        let t3 = storage.create_task(new_task("other", "T3"));

        assert!(storage.delete_project(&p1.id));

        let remaining: Vec<_> = storage.list_tasks().into_iter().map(|t| t.id).collect();
        assert_eq!(remaining, [t3.id]);
        assert!(storage.get_project(&p1.id).is_none());
    }

    #[test]
    fn test_delete_project_twice_returns_false_and_cascades_nothing() {
        let mut storage = MemStorage::new();
        let project = storage.create_project(new_project("A"));
        assert!(storage.delete_project(&project.id));

        // Tasks pointing at a vanished project must survive a second delete.
        storage.create_task(new_task(&project.id, "late"));

        assert!(!storage.delete_project(&project.id));
        assert_eq!(storage.list_tasks().len(), 1);
    }

    #[test]
    fn test_delete_project_cascading_reports_removed_tasks() {
        let mut storage = MemStorage::new();
        let project = storage.create_project(new_project("A"));
        storage.create_task(new_task(&project.id, "T1"));
        storage.create_task(new_task(&project.id, "T2"));
        storage.create_task(new_task("ghost", "orphan"));

        assert_eq!(storage.delete_project_cascading(&project.id), Some(2));
        assert_eq!(storage.delete_project_cascading("ghost"), None);
        assert_eq!(storage.list_tasks_by_project("ghost").len(), 1);
    }

    #[test]
    fn test_create_task_for_unknown_project_is_allowed() {
        let mut storage = MemStorage::new();

        let task = storage.create_task(new_task("nonexistent", "x"));

        assert_eq!(storage.get_task(&task.id), Some(task));
    }

    #[test]
    fn test_list_tasks_by_project_filters_without_checking_project() {
        let mut storage = MemStorage::new();
        storage.create_task(new_task("a", "one"));
        storage.create_task(new_task("a", "two"));
        storage.create_task(new_task("b", "three"));

        let tasks = storage.list_tasks_by_project("a");

        assert_eq!(tasks.len(), 2);
        assert!(tasks.iter().all(|task| task.project_id == "a"));
        assert!(storage.list_tasks_by_project("nobody").is_empty());
    }

    #[test]
    fn test_delete_task() {
        let mut storage = MemStorage::new();
        let task = storage.create_task(new_task("a", "one"));

        assert!(storage.delete_task(&task.id));
        assert!(!storage.delete_task(&task.id));
        assert!(storage.get_task(&task.id).is_none());
    }

    #[test]
    fn test_users_are_found_by_id_and_username() {
        let mut storage = MemStorage::new();

        let user = storage.create_user(NewUser {
            username: String::from("maria"),
            password: String::from("secret"),
        });

        assert_eq!(storage.get_user(&user.id), Some(user.clone()));
        assert_eq!(storage.get_user_by_username("maria"), Some(user));
        assert!(storage.get_user_by_username("joao").is_none());
    }
}
