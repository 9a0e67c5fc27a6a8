//! Static file serving module
//!
//! Serves the map website assets: file loading, MIME type detection, and
//! response building with conditional-request support.

use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs;

const FAVICON_PATH: &str = "static/favicon.svg";

/// Serve favicon
pub async fn serve_favicon(ctx: &RequestContext<'_>) -> Response<Full<Bytes>> {
    match load_favicon().await {
        Some(data) => build_favicon_response(&data, ctx.if_none_match.as_deref(), ctx.is_head),
        None => http::build_404_response(),
    }
}

/// Serve a site asset from the configured site directory
pub async fn serve_site(
    ctx: &RequestContext<'_>,
    site_dir: &str,
    index_files: &[String],
) -> Response<Full<Bytes>> {
    match load_from_directory(site_dir, ctx.path, index_files).await {
        Some((content, content_type)) => build_static_file_response(
            &content,
            content_type,
            ctx.if_none_match.as_deref(),
            ctx.is_head,
        ),
        None => http::build_404_response(),
    }
}

/// Load a site asset with index file support
pub async fn load_from_directory(
    site_dir: &str,
    path: &str,
    index_files: &[String],
) -> Option<(Vec<u8>, &'static str)> {
    let file_path = resolve_asset_path(site_dir, path, index_files)?;

    let content = match fs::read(&file_path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {}",
                file_path.display(),
                e
            ));
            return None;
        }
    };

    // Determine content type from extension
    let content_type = mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));

    Some((content, content_type))
}

/// Resolve a request path to an asset inside the site directory.
///
/// Strips the leading slash and any `..` components, falls back to the
/// configured index files for directory requests, and rejects anything
/// that canonicalizes outside the site directory.
fn resolve_asset_path(site_dir: &str, path: &str, index_files: &[String]) -> Option<PathBuf> {
    let site_root = match Path::new(site_dir).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Site directory not found or inaccessible '{site_dir}': {e}"
            ));
            return None;
        }
    };

    let relative = path.trim_start_matches('/').replace("..", "");
    let mut candidate = site_root.join(&relative);

    // Directory requests fall back to the first index file present
    if candidate.is_dir() || relative.is_empty() || relative.ends_with('/') {
        let index = index_files
            .iter()
            .map(|index| candidate.join(index))
            .find(|p| p.is_file())?;
        candidate = index;
    }

    // A missing file is the common 404 case, not worth logging
    let resolved = candidate.canonicalize().ok()?;
    if resolved.starts_with(&site_root) {
        Some(resolved)
    } else {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {path} -> {}",
            resolved.display()
        ));
        None
    }
}

/// Load favicon
pub async fn load_favicon() -> Option<Vec<u8>> {
    fs::read(FAVICON_PATH).await.ok()
}

/// Built-in landing page, shown when no site directory is configured
pub fn get_landing_page() -> String {
    String::from(
        r"<!DOCTYPE html>
<html>
<head>
    <meta charset='utf-8'>
    <meta name='viewport' content='width=device-width, initial-scale=1'>
    <title>NY Rare Bird Alert</title>
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            max-width: 640px;
            margin: 80px auto;
            padding: 0 20px;
            line-height: 1.6;
            color: #222;
        }
        h1 { font-size: 1.8em; }
        code {
            background: #f2f2f2;
            padding: 2px 6px;
            border-radius: 4px;
        }
    </style>
</head>
<body>
    <h1>NY Rare Bird Alert</h1>
    <p>This server publishes the most recent rare-bird sighting snapshot.</p>
    <ul>
        <li><code>GET /api/latest</code> &mdash; newest snapshot as JSON</li>
        <li><code>GET /healthz</code> &mdash; liveness probe</li>
    </ul>
    <p>No site directory is configured; set <code>routes.site_dir</code> to
    serve the map page from here.</p>
</body>
</html>",
    )
}

/// Build favicon response
fn build_favicon_response(
    data: &[u8],
    if_none_match: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(data);

    if cache::check_etag_match(if_none_match, &etag) {
        return http::build_304_response(&etag);
    }

    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(data.to_owned())
    };

    Response::builder()
        .status(200)
        .header("Content-Type", "image/svg+xml")
        .header("Content-Length", data.len())
        .header("ETag", etag)
        .header("Cache-Control", "public, max-age=86400")
        .header("Access-Control-Allow-Origin", "*")
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build favicon response: {e}"));
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build static file response with `ETag` support
fn build_static_file_response(
    data: &[u8],
    content_type: &str,
    if_none_match: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let etag = cache::generate_etag(data);

    // Check if client has cached version
    if cache::check_etag_match(if_none_match, &etag) {
        return http::build_304_response(&etag);
    }

    http::response::build_cached_response(Bytes::from(data.to_owned()), content_type, &etag, is_head)
}
