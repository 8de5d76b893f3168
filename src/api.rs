use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Json, State},
    response::Html,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::cluster::{self, ClusterResult, KeywordFormRequest};
use crate::config::AppConfig;
use crate::llm::{GenerationBackend, GenerationError};
use crate::tools::ToolRegistry;
use crate::TARGET_WEB_REQUEST;

/// Shared state for the request handlers.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn GenerationBackend>,
    /// Present only when tool calling is enabled.
    pub tools: Option<Arc<ToolRegistry>>,
}

/// The form-boundary envelope: either the generated cluster or a single
/// human-readable error string. Errors stay in-band; the HTTP status is 200
/// for all three outcomes.
#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ClusterResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl KeywordsResponse {
    fn ok(data: ClusterResult) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Runs one form submission through the pipeline: validate, generate,
/// wrap. All failures come back as an envelope, never as a panic or a
/// non-200 response.
pub async fn process_submission(state: &AppState, form: KeywordFormRequest) -> KeywordsResponse {
    let request = match cluster::validate(&form) {
        Ok(request) => request,
        Err(e) => {
            info!(target: TARGET_WEB_REQUEST, "Rejected submission: {}", e);
            return KeywordsResponse::err(e.to_string());
        }
    };

    match cluster::generate_cluster(&request, state.backend.as_ref(), state.tools.as_deref()).await
    {
        Ok(result) => KeywordsResponse::ok(result),
        Err(e @ (GenerationError::NoOutput | GenerationError::Unparseable(_))) => {
            warn!(target: TARGET_WEB_REQUEST, "Generation failed for \"{}\": {}", request.seed_keyword, e);
            KeywordsResponse::err(
                "Keyword generation failed: the model did not return a usable result.",
            )
        }
        Err(GenerationError::Backend(detail)) => {
            error!(target: TARGET_WEB_REQUEST, "Unexpected backend failure for \"{}\": {}", request.seed_keyword, detail);
            KeywordsResponse::err("An unexpected error occurred while generating keywords.")
        }
    }
}

async fn generate_keywords(
    State(state): State<AppState>,
    Json(form): Json<KeywordFormRequest>,
) -> Json<KeywordsResponse> {
    Json(process_submission(&state, form).await)
}

async fn status_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/status", get(status_check))
        .route("/api/keywords", post(generate_keywords))
        .with_state(state)
}

/// Binds the server and serves requests until the process is stopped.
pub async fn serve(config: &AppConfig, state: AppState) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server running on http://{}", addr);
    axum::serve(listener, router(state).into_make_service()).await?;
    Ok(())
}

static INDEX_HTML: &str = r##"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Keywordsmith</title>
<style>
  body { font-family: system-ui, sans-serif; max-width: 60rem; margin: 2rem auto; padding: 0 1rem; }
  form { display: grid; gap: 0.75rem; max-width: 28rem; }
  label { font-weight: 600; }
  input, select, button { padding: 0.4rem; font-size: 1rem; }
  button { cursor: pointer; }
  .error { color: #b00020; }
  details { margin: 1rem 0; }
  table { border-collapse: collapse; width: 100%; }
  th, td { border: 1px solid #ccc; padding: 0.4rem 0.6rem; text-align: left; }
  th { cursor: pointer; background: #f4f4f4; }
</style>
</head>
<body>
<h1>Keywordsmith</h1>
<p>Expand a seed keyword into a categorized keyword cluster.</p>
<form id="kw-form">
  <label for="seedKeyword">Seed keyword</label>
  <input id="seedKeyword" name="seedKeyword" placeholder="running shoes">
  <label for="contentType">Content type</label>
  <select id="contentType" name="contentType">
    <option value="article">Article</option>
    <option value="internal page">Internal page</option>
    <option value="landing page">Landing page</option>
  </select>
  <label for="websiteType">Website type</label>
  <input id="websiteType" name="websiteType" placeholder="e-commerce, blog, SaaS...">
  <label for="country">Country</label>
  <input id="country" name="country" value="global" placeholder="us, es, global...">
  <button type="submit">Generate keywords</button>
</form>
<p id="message"></p>
<div id="results"></div>
<script>
const CATEGORIES = [
  ["relatedKeywords", "Related keywords"],
  ["semanticKeywords", "Semantic keywords"],
  ["phraseMatchKeywords", "Phrase-match keywords"],
];
const COLUMNS = [
  ["keyword", "Keyword", "The keyword itself"],
  ["searchVolume", "Search volume", "Estimated monthly search volume"],
  ["rankingDifficulty", "Difficulty", "How hard it is to rank for this keyword (0-100)"],
  ["trendScore", "Trend", "Relative popularity trajectory (0-100)"],
];

function renderTable(entries, sortKey, dir) {
  const rows = [...entries];
  if (sortKey) {
    rows.sort((a, b) => {
      const x = a[sortKey] ?? "", y = b[sortKey] ?? "";
      return (x > y ? 1 : x < y ? -1 : 0) * dir;
    });
  }
  const header = COLUMNS.map(([key, label, tip]) =>
    `<th data-key="${key}" title="${tip}">${label}</th>`).join("");
  const body = rows.map(e => `<tr>
    <td>${e.keyword}</td>
    <td>${e.searchVolume}</td>
    <td>${e.rankingDifficulty}</td>
    <td>${e.trendScore ?? "—"}</td>
  </tr>`).join("");
  return `<table><thead><tr>${header}</tr></thead><tbody>${body}</tbody></table>`;
}

function renderResults(data) {
  const container = document.getElementById("results");
  container.innerHTML = "";
  for (const [key, title] of CATEGORIES) {
    const entries = data[key] || [];
    const details = document.createElement("details");
    details.open = true;
    details.innerHTML = `<summary>${title} (${entries.length})</summary>` + renderTable(entries);
    let sortKey = null, dir = 1;
    details.addEventListener("click", ev => {
      const th = ev.target.closest("th");
      if (!th) return;
      dir = th.dataset.key === sortKey ? -dir : 1;
      sortKey = th.dataset.key;
      details.querySelector("table").outerHTML = renderTable(entries, sortKey, dir);
    });
    container.appendChild(details);
  }
}

document.getElementById("kw-form").addEventListener("submit", async ev => {
  ev.preventDefault();
  const message = document.getElementById("message");
  message.textContent = "Generating...";
  message.className = "";
  const payload = Object.fromEntries(new FormData(ev.target));
  try {
    const res = await fetch("/api/keywords", {
      method: "POST",
      headers: { "Content-Type": "application/json" },
      body: JSON.stringify(payload),
    });
    const body = await res.json();
    if (body.success) {
      message.textContent = "";
      renderResults(body.data);
    } else {
      message.textContent = body.error;
      message.className = "error";
    }
  } catch (e) {
    message.textContent = "Request failed: " + e;
    message.className = "error";
  }
});
</script>
</body>
</html>
"##;
