use std::collections::HashMap;

use jiff::Timestamp;
use uuid::Uuid;

use crate::models::{
    project::{NewProject, Project, ProjectPatch},
    task::{NewTask, Task, TaskPatch},
    user::{NewUser, User},
};

pub mod memory;
pub mod seed;

/// Storage contract shared by every backend.
///
/// Missing records are reported as `None` or `false`, never as an error.
/// Every `list_*` method returns records ordered by `updated_at`, newest
/// first.
pub trait Storage {
    fn list_projects(&self) -> Vec<Project>;
    fn get_project(&self, id: &str) -> Option<Project>;
    fn create_project(&mut self, fields: NewProject) -> Project;
    fn update_project(&mut self, id: &str, patch: ProjectPatch) -> Option<Project>;
    /// Removes the project and, before it, every task it owns.
    fn delete_project(&mut self, id: &str) -> bool {
        self.delete_project_cascading(id).is_some()
    }
    /// Like [`Storage::delete_project`], returning how many tasks went with
    /// the project. `None` when the project does not exist.
    fn delete_project_cascading(&mut self, id: &str) -> Option<usize>;

    fn list_tasks(&self) -> Vec<Task>;
    fn get_task(&self, id: &str) -> Option<Task>;
    /// Tasks whose `project_id` matches. The project itself need not exist.
    fn list_tasks_by_project(&self, project_id: &str) -> Vec<Task>;
    fn create_task(&mut self, fields: NewTask) -> Task;
    fn update_task(&mut self, id: &str, patch: TaskPatch) -> Option<Task>;
    fn delete_task(&mut self, id: &str) -> bool;
}

/// Identity sub-store. Shares nothing with projects and tasks.
pub trait UserStorage {
    fn get_user(&self, id: &str) -> Option<User>;
    fn get_user_by_username(&self, username: &str) -> Option<User>;
    fn create_user(&mut self, fields: NewUser) -> User;
}

/// A record kept in a [`Table`].
pub trait Record: Clone {
    type Fields;
    type Patch;

    fn id(&self) -> &str;
    fn updated_at(&self) -> Timestamp;
    fn build(id: String, fields: Self::Fields, now: Timestamp) -> Self;
    fn apply(&mut self, patch: Self::Patch, now: Timestamp);
}

impl Record for Project {
    type Fields = NewProject;
    type Patch = ProjectPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    fn build(id: String, fields: NewProject, now: Timestamp) -> Self {
        Project::from_new(id, fields, now)
    }

    fn apply(&mut self, patch: ProjectPatch, now: Timestamp) {
        self.merge(patch);
        self.updated_at = now;
    }
}

impl Record for Task {
    type Fields = NewTask;
    type Patch = TaskPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    fn build(id: String, fields: NewTask, now: Timestamp) -> Self {
        Task::from_new(id, fields, now)
    }

    fn apply(&mut self, patch: TaskPatch, now: Timestamp) {
        self.merge(patch);
        self.updated_at = now;
    }
}

/// In-memory keyed collection with the CRUD semantics of [`Storage`].
pub struct Table<R> {
    rows: HashMap<String, R>,
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
        }
    }
}

impl<R: Record> Table<R> {
    pub fn list(&self) -> Vec<R> {
        self.list_where(|_| true)
    }

    pub fn list_where(&self, predicate: impl Fn(&R) -> bool) -> Vec<R> {
        let mut rows: Vec<R> = self
            .rows
            .values()
            .filter(|row| predicate(row))
            .cloned()
            .collect();
        rows.sort_by_key(|row| std::cmp::Reverse(row.updated_at()));
        rows
    }

    pub fn get(&self, id: &str) -> Option<R> {
        self.rows.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.rows.contains_key(id)
    }

    pub fn create(&mut self, fields: R::Fields) -> R {
        let record = R::build(new_id(), fields, Timestamp::now());
        self.insert(record.clone());
        record
    }

    pub fn update(&mut self, id: &str, patch: R::Patch) -> Option<R> {
        let row = self.rows.get_mut(id)?;
        let now = next_timestamp(row.updated_at());
        row.apply(patch, now);
        Some(row.clone())
    }

    pub fn delete(&mut self, id: &str) -> bool {
        self.rows.remove(id).is_some()
    }

    /// Stores a fully built record as is, replacing any record with its id.
    pub fn insert(&mut self, record: R) {
        self.rows.insert(record.id().to_owned(), record);
    }

    /// Removes every record matching `predicate` and returns how many went.
    pub fn remove_where(&mut self, predicate: impl Fn(&R) -> bool) -> usize {
        let before = self.rows.len();
        self.rows.retain(|_, row| !predicate(row));
        before - self.rows.len()
    }
}

/// Generates an opaque identifier. Collisions are not checked.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Current time, never earlier than `previous` even if the clock stepped back.
pub fn next_timestamp(previous: Timestamp) -> Timestamp {
    Timestamp::now().max(previous)
}
