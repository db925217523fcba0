use backlog_core::{BacklogError, BacklogResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::field_update::FieldUpdate;

/// Server-assigned item identifier. Opaque and stable across reorders.
pub type ItemId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = BacklogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(BacklogError::Validation(format!(
                "unknown priority '{}' (expected high, medium or low)",
                other
            ))),
        }
    }
}

/// User reference attached to an item. Owned elsewhere; read-only here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignee {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl Assignee {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or(&self.id)
    }
}

/// A backlog entry.
///
/// There is no stored position: an item's position is its index in the
/// [`OrderedItemList`](crate::OrderedItemList) holding it. A `position` field
/// in server payloads is ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BacklogItem {
    #[serde(alias = "_id")]
    pub id: ItemId,
    pub title: String,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_points: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<Assignee>,
}

impl BacklogItem {
    pub fn new(id: impl Into<ItemId>, title: impl Into<String>, priority: Priority) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            priority,
            story_points: None,
            assignee: None,
        }
    }

    pub fn with_story_points(mut self, points: u32) -> Self {
        self.story_points = Some(points);
        self
    }

    pub fn update_title(&mut self, title: String) -> BacklogResult<()> {
        self.title = validate_title(title)?;
        Ok(())
    }

    pub fn update_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    /// Apply an in-place edit. The title is validated before anything changes.
    pub fn apply(&mut self, update: ItemUpdate) -> BacklogResult<()> {
        if let Some(title) = update.title {
            self.update_title(title)?;
        }
        if let Some(priority) = update.priority {
            self.update_priority(priority);
        }
        update.story_points.apply_to(&mut self.story_points);
        Ok(())
    }
}

/// Fields for creating an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBacklogItem {
    pub title: String,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_points: Option<u32>,
}

impl NewBacklogItem {
    pub fn new(title: impl Into<String>, priority: Priority) -> Self {
        Self {
            title: title.into(),
            priority,
            story_points: None,
        }
    }

    /// Trim the title and reject it if nothing remains.
    pub fn validated(self) -> BacklogResult<Self> {
        Ok(Self {
            title: validate_title(self.title)?,
            ..self
        })
    }
}

/// Partial edit of an item's title, priority or story points.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "FieldUpdate::is_no_change")]
    pub story_points: FieldUpdate<u32>,
}

impl ItemUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.priority.is_none() && self.story_points.is_no_change()
    }

    pub fn validated(self) -> BacklogResult<Self> {
        if self.is_empty() {
            return Err(BacklogError::Validation("nothing to update".into()));
        }
        let title = self.title.map(validate_title).transpose()?;
        Ok(Self { title, ..self })
    }
}

fn validate_title(title: String) -> BacklogResult<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(BacklogError::Validation("title must not be empty".into()));
    }
    Ok(trimmed.to_string())
}
