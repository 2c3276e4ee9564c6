use std::fmt;

use clap::ValueEnum;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::models::{non_empty, nullable};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Opaque identifier of the project
    pub id: String,
    /// Name of the project
    pub name: String,
    /// Description of the project
    pub description: Option<String>,
    /// Workflow status of the project
    pub status: ProjectStatus,
    /// Color tag used when the project is displayed
    pub color: Color,
    /// Due date of the project
    pub due_date: Option<Timestamp>,
    /// Created at timestamp of the project
    pub created_at: Timestamp,
    /// Last time the project was created or updated
    pub updated_at: Timestamp,
}

#[derive(Serialize, Deserialize, ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    Planning,
    InProgress,
    Review,
    Completed,
    OnHold,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Planning => "planning",
            ProjectStatus::InProgress => "in-progress",
            ProjectStatus::Review => "review",
            ProjectStatus::Completed => "completed",
            ProjectStatus::OnHold => "on-hold",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Color {
    #[default]
    Blue,
    Green,
    Purple,
    Red,
    Yellow,
    Pink,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Purple => "purple",
            Color::Red => "red",
            Color::Yellow => "yellow",
            Color::Pink => "pink",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields accepted when creating a project. Missing values get defaults.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub status: Option<ProjectStatus>,
    pub color: Option<Color>,
    pub due_date: Option<Timestamp>,
}

/// Partial update of a project. `None` leaves the field untouched, and for
/// nullable fields `Some(None)` clears it.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    pub status: Option<ProjectStatus>,
    pub color: Option<Color>,
    #[serde(default, deserialize_with = "nullable")]
    pub due_date: Option<Option<Timestamp>>,
}

impl Project {
    pub(crate) fn from_new(id: String, fields: NewProject, now: Timestamp) -> Project {
        Project {
            id,
            name: fields.name,
            description: non_empty(fields.description),
            status: fields.status.unwrap_or_default(),
            color: fields.color.unwrap_or_default(),
            due_date: fields.due_date,
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn merge(&mut self, patch: ProjectPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
    }
}
