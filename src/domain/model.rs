use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Content category used to group and filter portfolio items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Section {
    Skills,
    Certificates,
    Projects,
    #[default]
    About,
    Contact,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Skills,
        Section::Certificates,
        Section::Projects,
        Section::About,
        Section::Contact,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Skills => "Skills",
            Section::Certificates => "Certificates",
            Section::Projects => "Projects",
            Section::About => "About",
            Section::Contact => "Contact",
        }
    }

    /// Exact match on the canonical name, as stored in the remote select property.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == name)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSection(pub String);

impl fmt::Display for UnknownSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown section '{}', expected one of: skills, certificates, projects, about, contact",
            self.0
        )
    }
}

impl std::error::Error for UnknownSection {}

impl FromStr for Section {
    type Err = UnknownSection;

    /// Accepts canonical names and the lowercase slugs used as page section ids.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|section| section.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownSection(s.to_string()))
    }
}

/// Normalized portfolio entry. Field names on the wire follow the backend's JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    #[serde(rename = "content")]
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub section: Section,
    pub order: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Body of `GET /health` on the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    #[serde(default)]
    pub status: String,
    /// Informational only. Unparseable values become `None`.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// RFC 3339 strings or epoch milliseconds; anything else is dropped.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|at| at.with_timezone(&Utc)),
        Some(serde_json::Value::Number(n)) => n.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    })
}

impl HealthResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuerySort {
    pub property: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectEquals {
    pub equals: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryFilter {
    pub property: String,
    pub select: SelectEquals,
}

/// Body of a Notion database query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryRequest {
    pub page_size: u32,
    pub sorts: Vec<QuerySort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<QueryFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
}

impl QueryRequest {
    /// Ordered by the `Order` property, optionally restricted to one section.
    pub fn for_section(section: Option<Section>, page_size: u32) -> Self {
        Self {
            page_size,
            sorts: vec![QuerySort {
                property: "Order".to_string(),
                direction: SortDirection::Ascending,
            }],
            filter: section.map(|s| QueryFilter {
                property: "Section".to_string(),
                select: SelectEquals {
                    equals: s.as_str().to_string(),
                },
            }),
            start_cursor: None,
        }
    }
}

/// One page of Notion query results. Records stay untyped until normalized.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}
