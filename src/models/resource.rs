//! Resource kinds managed by the admin client.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;

/// Entity type listed and mutated through the REST backend.
///
/// Every list screen of the dashboard maps to exactly one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    Vacancies,
    Applications,
    Candidates,
    Companies,
    Blogs,
    BlogCategories,
    BlogTags,
    Commentaries,
    Categories,
    Users,
}

/// Table column: header text plus a dotted JSON path into each row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub header: &'static str,
    pub path: &'static str,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 10] = [
        ResourceKind::Vacancies,
        ResourceKind::Applications,
        ResourceKind::Candidates,
        ResourceKind::Companies,
        ResourceKind::Blogs,
        ResourceKind::BlogCategories,
        ResourceKind::BlogTags,
        ResourceKind::Commentaries,
        ResourceKind::Categories,
        ResourceKind::Users,
    ];

    /// Command-line and cache-key name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Vacancies => "vacancies",
            ResourceKind::Applications => "applications",
            ResourceKind::Candidates => "candidates",
            ResourceKind::Companies => "companies",
            ResourceKind::Blogs => "blogs",
            ResourceKind::BlogCategories => "blog-categories",
            ResourceKind::BlogTags => "blog-tags",
            ResourceKind::Commentaries => "commentaries",
            ResourceKind::Categories => "categories",
            ResourceKind::Users => "users",
        }
    }

    /// Path segment below the API base URL.
    pub fn path(&self) -> &'static str {
        self.as_str()
    }

    /// Singular label used in notifications, e.g. "Vacancy".
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Vacancies => "Vacancy",
            ResourceKind::Applications => "Application",
            ResourceKind::Candidates => "Candidate",
            ResourceKind::Companies => "Company",
            ResourceKind::Blogs => "Blog",
            ResourceKind::BlogCategories => "Blog category",
            ResourceKind::BlogTags => "Blog tag",
            ResourceKind::Commentaries => "Commentary",
            ResourceKind::Categories => "Category",
            ResourceKind::Users => "User",
        }
    }

    /// Heading of the list screen, e.g. "Vacancies".
    pub fn title(&self) -> &'static str {
        match self {
            ResourceKind::Vacancies => "Vacancies",
            ResourceKind::Applications => "Applications",
            ResourceKind::Candidates => "Candidates",
            ResourceKind::Companies => "Companies",
            ResourceKind::Blogs => "Blogs",
            ResourceKind::BlogCategories => "Blog categories",
            ResourceKind::BlogTags => "Blog tags",
            ResourceKind::Commentaries => "Commentaries",
            ResourceKind::Categories => "Categories",
            ResourceKind::Users => "Users",
        }
    }

    pub fn columns(&self) -> &'static [Column] {
        match self {
            ResourceKind::Vacancies => &[
                Column { header: "ID", path: "id" },
                Column { header: "Title", path: "title" },
                Column { header: "Company", path: "company.name" },
                Column { header: "Category", path: "category.name" },
                Column { header: "Location", path: "location" },
                Column { header: "Status", path: "status" },
                Column { header: "Created", path: "createdAt" },
            ],
            ResourceKind::Applications => &[
                Column { header: "ID", path: "id" },
                Column { header: "Vacancy", path: "vacancy.title" },
                Column { header: "Candidate", path: "candidate.fullName" },
                Column { header: "Status", path: "status" },
                Column { header: "Applied", path: "createdAt" },
            ],
            ResourceKind::Candidates => &[
                Column { header: "ID", path: "id" },
                Column { header: "Name", path: "fullName" },
                Column { header: "Email", path: "email" },
                Column { header: "Phone", path: "phone" },
                Column { header: "City", path: "city" },
                Column { header: "Created", path: "createdAt" },
            ],
            ResourceKind::Companies => &[
                Column { header: "ID", path: "id" },
                Column { header: "Name", path: "name" },
                Column { header: "Email", path: "email" },
                Column { header: "Website", path: "website" },
                Column { header: "Created", path: "createdAt" },
            ],
            ResourceKind::Blogs => &[
                Column { header: "ID", path: "id" },
                Column { header: "Title", path: "title" },
                Column { header: "Category", path: "category.name" },
                Column { header: "Published", path: "published" },
                Column { header: "Created", path: "createdAt" },
            ],
            ResourceKind::BlogCategories | ResourceKind::BlogTags => &[
                Column { header: "ID", path: "id" },
                Column { header: "Name", path: "name" },
                Column { header: "Slug", path: "slug" },
            ],
            ResourceKind::Commentaries => &[
                Column { header: "ID", path: "id" },
                Column { header: "Blog", path: "blog.title" },
                Column { header: "Author", path: "author" },
                Column { header: "Comment", path: "content" },
                Column { header: "Created", path: "createdAt" },
            ],
            ResourceKind::Categories => &[
                Column { header: "ID", path: "id" },
                Column { header: "Name", path: "name" },
                Column { header: "Description", path: "description" },
            ],
            ResourceKind::Users => &[
                Column { header: "ID", path: "id" },
                Column { header: "Username", path: "username" },
                Column { header: "Email", path: "email" },
                Column { header: "Role", path: "role" },
                Column { header: "Active", path: "active" },
            ],
        }
    }
}

impl Column {
    /// Display text of this column for one row; missing values render empty.
    pub fn extract(&self, row: &Value) -> String {
        let value = self
            .path
            .split('.')
            .try_fold(row, |current, key| current.get(key));

        match value {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Bool(true)) => "yes".to_string(),
            Some(Value::Bool(false)) => "no".to_string(),
            Some(other) => other.to_string(),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| AppError::Validation {
                field: "kind".to_string(),
                reason: format!(
                    "Unknown resource '{}'. Valid resources are: {}",
                    s,
                    ResourceKind::ALL.map(|k| k.as_str()).join(", ")
                ),
            })
    }
}
