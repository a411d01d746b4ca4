//! Projects modal content: response parsing and body rendering.
//!
//! The fetch itself lives in the web frontend; it hands the outcome to
//! [`ModalContent::from_result`] and writes [`ModalContent::body_html`] into the
//! modal. Both an empty list and a failed request show the "no projects"
//! message; a failure adds an error line above it and flips the modal state.

use crate::tool::Tool;
use serde::Deserialize;

pub const EMPTY_PROJECTS_MESSAGE: &str = "No projects found for this tool yet.";
pub const LOADING_MESSAGE: &str = "Loading projects…";
pub const PROJECTS_ERROR_MESSAGE: &str = "Error loading projects.";

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
enum ToolTag {
    Named {
        #[serde(default)]
        name: Option<String>,
    },
    Bare(String),
}

impl ToolTag {
    fn into_name(self) -> Option<String> {
        match self {
            ToolTag::Named { name } => name,
            ToolTag::Bare(name) => Some(name),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
struct ProjectRecord {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    tools: Option<Vec<Option<ToolTag>>>,
}

#[derive(Clone, Debug, Deserialize)]
struct ProjectsResponse {
    #[serde(default)]
    tool: Option<String>,
    #[serde(default)]
    projects: Option<Vec<serde_json::Value>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub link: Option<String>,
    pub tools: Vec<String>,
}

impl ProjectRecord {
    fn into_project(self) -> Project {
        Project {
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            link: self.link.filter(|l| !l.trim().is_empty()),
            tools: self
                .tools
                .into_iter()
                .flatten()
                .flatten()
                .filter_map(ToolTag::into_name)
                .collect(),
        }
    }
}

/// Parsed body of `/api/projects/`. Accepts both `{projects}` and
/// `{tool, projects}` shapes and both `tools: [{name}]` and `tools: [name]`.
/// Missing or `null` fields fall back to empty values; an entry of the wrong
/// shape is skipped without losing the rest.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectList {
    pub tool: Option<String>,
    pub projects: Vec<Project>,
}

impl ProjectList {
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        let resp: ProjectsResponse = serde_json::from_str(json)?;
        let projects = resp
            .projects
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .filter_map(|(i, raw)| match serde_json::from_value::<ProjectRecord>(raw) {
                Ok(rec) => Some(rec.into_project()),
                Err(e) => {
                    log::warn!("[api] skipping project {}: {}", i, e);
                    None
                }
            })
            .collect();
        Ok(Self {
            tool: resp.tool,
            projects,
        })
    }
}

/// Tool details shown in the modal header above the project list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToolSummary {
    pub name: String,
    pub category: String,
    pub description: String,
}

impl ToolSummary {
    /// Header for a tool the registry no longer knows; only the name survives.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

impl From<&Tool> for ToolSummary {
    fn from(tool: &Tool) -> Self {
        Self {
            name: tool.name.clone(),
            category: tool.category.clone(),
            description: tool.description.clone(),
        }
    }
}

/// Modal lifecycle as seen by the renderer.
#[derive(Clone, Debug, PartialEq)]
pub enum ModalContent {
    Loading {
        title: String,
        tool: ToolSummary,
    },
    Loaded {
        title: String,
        tool: ToolSummary,
        projects: Vec<Project>,
    },
    Failed {
        title: String,
        tool: ToolSummary,
        reason: String,
    },
}

impl ModalContent {
    pub fn loading(tool: ToolSummary) -> Self {
        ModalContent::Loading {
            title: modal_title(&tool.name),
            tool,
        }
    }

    pub fn from_result<E: std::fmt::Display>(
        tool: ToolSummary,
        result: Result<ProjectList, E>,
    ) -> Self {
        match result {
            Ok(list) => ModalContent::Loaded {
                title: modal_title(list.tool.as_deref().unwrap_or(&tool.name)),
                tool,
                projects: list.projects,
            },
            Err(e) => ModalContent::Failed {
                title: modal_title(&tool.name),
                tool,
                reason: e.to_string(),
            },
        }
    }

    pub fn title(&self) -> &str {
        match self {
            ModalContent::Loading { title, .. }
            | ModalContent::Loaded { title, .. }
            | ModalContent::Failed { title, .. } => title,
        }
    }

    pub fn tool(&self) -> &ToolSummary {
        match self {
            ModalContent::Loading { tool, .. }
            | ModalContent::Loaded { tool, .. }
            | ModalContent::Failed { tool, .. } => tool,
        }
    }

    /// Value for the modal's `data-state` attribute.
    pub fn state_name(&self) -> &'static str {
        match self {
            ModalContent::Loading { .. } => "loading",
            ModalContent::Loaded { projects, .. } if projects.is_empty() => "empty",
            ModalContent::Loaded { .. } => "ready",
            ModalContent::Failed { .. } => "error",
        }
    }

    pub fn body_html(&self) -> String {
        match self {
            ModalContent::Loading { .. } => {
                format!("<p class=\"modal-loading\">{}</p>", LOADING_MESSAGE)
            }
            ModalContent::Loaded { projects, .. } if !projects.is_empty() => {
                projects.iter().map(project_card_html).collect()
            }
            ModalContent::Loaded { .. } => empty_body_html(),
            ModalContent::Failed { .. } => format!(
                "<p class=\"modal-error\">{}</p>{}",
                PROJECTS_ERROR_MESSAGE,
                empty_body_html()
            ),
        }
    }
}

pub fn modal_title(tool_name: &str) -> String {
    format!("Projects using {}", tool_name)
}

pub fn empty_body_html() -> String {
    format!("<p class=\"modal-empty\">{}</p>", EMPTY_PROJECTS_MESSAGE)
}

fn project_card_html(p: &Project) -> String {
    let heading = match &p.link {
        Some(link) => format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>",
            escape_html(link),
            escape_html(&p.title)
        ),
        None => format!("<h3>{}</h3>", escape_html(&p.title)),
    };
    let tags: String = p
        .tools
        .iter()
        .map(|t| format!("<span class=\"tag\">{}</span>", escape_html(t)))
        .collect();
    format!(
        "<div class=\"pcard\">{}<div class=\"pmeta\">{}</div><div class=\"project-tags\">{}</div></div>",
        heading,
        escape_html(&p.description),
        tags
    )
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
