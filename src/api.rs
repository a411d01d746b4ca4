use crate::constants::PROJECTS_ENDPOINT;
use crate::core::{parse_catalog, ProjectList, Tool};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// GET `url` and return the body text; non-2xx statuses are errors.
pub async fn fetch_text(url: &str) -> anyhow::Result<String> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp_value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!("fetch {}: {:?}", url, e))?;
    let resp: web::Response = resp_value
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    if !resp.ok() {
        anyhow::bail!("HTTP {} for {}", resp.status(), url);
    }
    let text = JsFuture::from(resp.text().map_err(|e| anyhow::anyhow!("{:?}", e))?)
        .await
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    text.as_string()
        .ok_or_else(|| anyhow::anyhow!("response body is not text"))
}

pub async fn fetch_tool_catalog(endpoint: &str) -> anyhow::Result<Vec<Tool>> {
    let body = fetch_text(endpoint).await?;
    Ok(parse_catalog(&body)?)
}

pub fn projects_url(tool_key: &str) -> String {
    let encoded: String = js_sys::encode_uri_component(tool_key).into();
    format!("{}?tool={}", PROJECTS_ENDPOINT, encoded)
}

pub async fn fetch_projects(tool_key: &str) -> anyhow::Result<ProjectList> {
    let body = fetch_text(&projects_url(tool_key)).await?;
    Ok(ProjectList::parse(&body)?)
}
