// Axum Resource Server
//
// Serves documents from a sandbox directory. The URL path is untrusted and is
// handed straight to an ExtensionOverlayRoot: `/guide` serves `guide.html`
// or, failing that, `guide.md` rendered into a paragraph. `/raw/*path` reads
// through the plain FilesystemRoot, and `POST /lookup` accepts a JSON target
// (string or array of segments).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use resource_root::{
    identity, text_filter, ExtensionMap, ExtensionOverlayRoot, FilesystemRoot, ResourceRootError,
    Target,
};
use std::fs;

#[derive(Clone)]
struct Site {
    pages: ExtensionOverlayRoot,
    raw: FilesystemRoot,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all("axum_site/docs")?;
    fs::write("axum_site/index.html", "<h1>Hello</h1>")?;
    fs::write("axum_site/docs/guide.md", "A short guide")?;

    let raw = FilesystemRoot::try_new("axum_site")?;
    let map = ExtensionMap::new()
        .with(".html", identity)
        .with(".md", text_filter(|text| format!("<p>{text}</p>")));
    let site = Site {
        pages: ExtensionOverlayRoot::from_root(raw.clone(), map),
        raw,
    };

    // In CI or when EXAMPLES_RUN_SERVER is not set, run a quick offline simulation
    if std::env::var("EXAMPLES_RUN_SERVER").is_err() {
        for target in ["index", "docs/guide", "../../etc/passwd"] {
            match site.pages.text(target) {
                Ok(body) => println!("Offline demo: {target} -> {body}"),
                Err(err) => println!("Offline demo: {target} -> {err}"),
            }
        }
        fs::remove_dir_all("axum_site").ok();
        return Ok(());
    }

    let app = Router::new()
        .route("/", get(index))
        .route("/raw/*path", get(serve_raw))
        .route("/lookup", post(lookup))
        .route("/*path", get(serve_page))
        .with_state(site);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:8082").await?;
    println!("Axum server on http://127.0.0.1:8082");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn index(State(site): State<Site>) -> Response {
    render(tokio::task::spawn_blocking(move || site.pages.text("index")).await)
}

async fn serve_page(State(site): State<Site>, Path(path): Path<String>) -> Response {
    render(tokio::task::spawn_blocking(move || site.pages.text(path)).await)
}

async fn serve_raw(State(site): State<Site>, Path(path): Path<String>) -> Response {
    match tokio::task::spawn_blocking(move || site.raw.read(path)).await {
        Ok(Ok(bytes)) => (StatusCode::OK, bytes).into_response(),
        Ok(Err(err)) => error_response(&err),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn lookup(State(site): State<Site>, Json(body): Json<serde_json::Value>) -> Response {
    let target = match Target::from_json_value(&body["target"]) {
        Ok(target) => target,
        Err(err) => return error_response(&err),
    };
    let resolved = tokio::task::spawn_blocking(move || {
        site.raw
            .resolve(&target)
            .map(|path| path.strip_prefix(site.raw.root()).map(|p| p.display().to_string()))
    })
    .await;
    match resolved {
        Ok(Ok(Ok(relative))) => Json(serde_json::json!({ "resolved": relative })).into_response(),
        Ok(Err(err)) => error_response(&err),
        _ => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

fn render(result: Result<resource_root::Result<String>, tokio::task::JoinError>) -> Response {
    match result {
        Ok(Ok(body)) => Html(body).into_response(),
        Ok(Err(err)) => error_response(&err),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

fn error_response(err: &ResourceRootError) -> Response {
    tracing::debug!(error = %err, "request failed");
    match err {
        ResourceRootError::NotFound { .. } => (StatusCode::NOT_FOUND, "Not found").into_response(),
        ResourceRootError::InvalidInput { .. } => {
            (StatusCode::BAD_REQUEST, "Invalid target").into_response()
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}
