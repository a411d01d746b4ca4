//! Tool metadata: typed records validated at the load boundary.

use crate::constants::ICON_DIR;
use crate::error::CatalogError;
use serde::Deserialize;
use std::hash::Hasher;

/// Packed 0xRRGGBB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u32);

impl Rgb {
    /// Parse `#RRGGBB`, `RRGGBB` or `0xRRGGBB`.
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.trim();
        let digits = s
            .strip_prefix('#')
            .or_else(|| s.strip_prefix("0x"))
            .unwrap_or(s);
        if digits.len() != 6 {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Rgb)
    }

    pub fn to_array(self) -> [f32; 3] {
        [
            ((self.0 >> 16) & 0xff) as f32 / 255.0,
            ((self.0 >> 8) & 0xff) as f32 / 255.0,
            (self.0 & 0xff) as f32 / 255.0,
        ]
    }

    pub fn to_css(self) -> String {
        format!("#{:06x}", self.0 & 0x00ff_ffff)
    }
}

/// Stable colour for a tool name, used for fallback discs and missing colours.
pub fn derive_color(name: &str) -> Rgb {
    let mut h = fnv::FnvHasher::default();
    h.write(name.trim().to_lowercase().as_bytes());
    let hue = (h.finish() % 360) as f32;
    hsl_to_rgb(hue, 0.65, 0.55)
}

fn hsl_to_rgb(hue_deg: f32, s: f32, l: f32) -> Rgb {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let hp = hue_deg / 60.0;
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    let to_u8 = |v: f32| ((v + m).clamp(0.0, 1.0) * 255.0).round() as u32;
    Rgb((to_u8(r1) << 16) | (to_u8(g1) << 8) | to_u8(b1))
}

/// Conventional icon location: directory plus lower-cased tool name.
pub fn icon_path_for(name: &str) -> String {
    format!("{}/{}.png", ICON_DIR, name.trim().to_lowercase())
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tool {
    pub name: String,
    pub category: String,
    pub description: String,
    pub icon_ref: String,
    pub link_ref: Option<String>,
    pub color: Rgb,
    pub tags: Vec<String>,
}

impl Tool {
    pub fn new(name: &str, category: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            description: description.to_string(),
            icon_ref: icon_path_for(name),
            link_ref: None,
            color: derive_color(name),
            tags: Vec::new(),
        }
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.color = Rgb(color);
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_link(mut self, link: &str) -> Self {
        self.link_ref = Some(link.to_string());
        self
    }

    /// Query key sent to the projects endpoint.
    pub fn key(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ColorField {
    Text(String),
    Packed(u32),
}

/// Raw record as delivered by `/api/tools/`. Any field may be missing or
/// `null`; [`ToolRecord::into_tool`] rejects a blank name and fills the rest
/// with defaults.
#[derive(Debug, Deserialize)]
pub struct ToolRecord {
    #[serde(default)]
    name: Option<String>,
    #[serde(default, alias = "icon_path")]
    icon_url: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    color: Option<ColorField>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    tags: Option<Vec<Option<String>>>,
}

impl ToolRecord {
    /// Decode and validate one catalog entry on its own, so a malformed
    /// record costs only itself.
    pub fn decode(raw: serde_json::Value, index: usize) -> Result<Tool, CatalogError> {
        let rec: ToolRecord = serde_json::from_value(raw)
            .map_err(|source| CatalogError::BadRecord { index, source })?;
        rec.into_tool(index)
    }

    pub fn into_tool(self, index: usize) -> Result<Tool, CatalogError> {
        let name = self.name.as_deref().unwrap_or_default().trim().to_string();
        if name.is_empty() {
            return Err(CatalogError::MissingName { index });
        }
        let color = match self.color {
            Some(ColorField::Text(s)) => Rgb::from_hex(&s),
            Some(ColorField::Packed(v)) if v <= 0x00ff_ffff => Some(Rgb(v)),
            _ => None,
        }
        .unwrap_or_else(|| derive_color(&name));
        let icon_ref = match self.icon_url.as_deref().map(str::trim) {
            Some(u) if u.starts_with('/') || u.starts_with("http") => u.to_string(),
            Some(u) if !u.is_empty() => format!("/static/{}", u),
            _ => icon_path_for(&name),
        };
        let link_ref = self
            .link
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());
        Ok(Tool {
            category: self
                .category
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| "Tool".to_string()),
            description: self.description.unwrap_or_default(),
            icon_ref,
            link_ref,
            color,
            tags: self.tags.into_iter().flatten().flatten().collect(),
            name,
        })
    }
}

#[derive(Debug, Deserialize)]
struct CatalogResponse {
    #[serde(default)]
    tools: Option<Vec<serde_json::Value>>,
}

/// Parse a `{ "tools": [...] }` body. Records without a name, or with a field
/// of the wrong type, are dropped; an empty result is an error so callers fall
/// back to [`default_tools`].
pub fn parse_catalog(json: &str) -> Result<Vec<Tool>, CatalogError> {
    let resp: CatalogResponse = serde_json::from_str(json)?;
    let tools: Vec<Tool> = resp
        .tools
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .filter_map(|(i, raw)| match ToolRecord::decode(raw, i) {
            Ok(t) => Some(t),
            Err(e) => {
                log::warn!("[catalog] skipping record: {}", e);
                None
            }
        })
        .collect();
    if tools.is_empty() {
        return Err(CatalogError::Empty);
    }
    Ok(tools)
}

/// Built-in catalog used when the tools endpoint is absent or fails.
pub fn default_tools() -> Vec<Tool> {
    vec![
        Tool::new("Ansible", "Automation", "Configuration management & deployment automation.")
            .with_color(0xEE0000)
            .with_tags(&["Playbooks", "IaC"]),
        Tool::new("AWS", "Cloud", "AWS infrastructure & services.")
            .with_color(0xFF9900)
            .with_tags(&["EC2", "VPC", "IAM"]),
        Tool::new("Azure", "Cloud", "Azure cloud services.")
            .with_color(0x0078D4)
            .with_tags(&["VM", "AKS"]),
        Tool::new("Bash", "Scripting", "Shell scripting for automation.")
            .with_color(0x4EAA25)
            .with_tags(&["CLI", "Linux"]),
        Tool::new("Datadog", "Observability", "Metrics, logs, traces, alerting.")
            .with_color(0x632CA6)
            .with_tags(&["APM", "Dashboards"]),
        Tool::new("Docker", "Containerization", "Container platform for building, shipping, and running applications.")
            .with_color(0x2496ED)
            .with_tags(&["Images", "Compose"]),
        Tool::new("Git", "Version Control", "Source control workflows.")
            .with_color(0xF05032)
            .with_tags(&["Commits", "Merge"]),
        Tool::new("GitLab", "CI/CD", "Pipelines & runners.")
            .with_color(0xFC6D26)
            .with_tags(&["CI", "Runners"]),
        Tool::new("Grafana", "Monitoring", "Dashboards and alerts.")
            .with_color(0xF46800)
            .with_tags(&["Panels", "Alerts"]),
        Tool::new("Helm", "Kubernetes", "Deploy apps with charts.")
            .with_color(0x0F1689)
            .with_tags(&["Charts", "Releases"]),
        Tool::new("Jenkins", "CI/CD", "Pipeline automation.")
            .with_color(0xD33833)
            .with_tags(&["Pipelines", "Agents"]),
        Tool::new("Kubernetes", "Orchestration", "Run containers at scale.")
            .with_color(0x326CE5)
            .with_tags(&["Pods", "Services"]),
        Tool::new("Linux", "OS", "Ops: networking, services, permissions.")
            .with_color(0xFCC624)
            .with_tags(&["Systemd", "Networking"]),
        Tool::new("Maven", "Build Tool", "Java build & deps.")
            .with_color(0xC71A36)
            .with_tags(&["POM", "Build"]),
        Tool::new("Nginx", "Web Server", "Reverse proxy & TLS.")
            .with_color(0x009639)
            .with_tags(&["Proxy", "TLS"]),
        Tool::new("Prometheus", "Monitoring", "Metrics and alert rules.")
            .with_color(0xE6522C)
            .with_tags(&["Scrape", "Alerts"]),
        Tool::new("Python", "Programming", "Automation scripts, APIs, Django.")
            .with_color(0x3776AB)
            .with_tags(&["Django", "Automation"]),
        Tool::new("Snyk", "Security", "Dependency vulnerability scanning.")
            .with_color(0x4C4A73)
            .with_tags(&["SCA", "Fix PRs"]),
        Tool::new("SonarQube", "Code Quality", "Static analysis & quality gates.")
            .with_color(0x4E9BCD)
            .with_tags(&["Quality Gate"]),
        Tool::new("Terraform", "IaC", "Provision infra declaratively.")
            .with_color(0x7B42BC)
            .with_tags(&["Modules", "State"]),
        Tool::new("Trivy", "Security", "Scan images and IaC.")
            .with_color(0x1904DA)
            .with_tags(&["Containers", "IaC"]),
    ]
}
