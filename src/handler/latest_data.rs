//! Latest-snapshot responder
//!
//! Serves the raw bytes of the most recently modified snapshot file. The
//! snapshot directory is re-scanned on every request, so a new file written
//! by the producer is picked up immediately. The content is treated as an
//! opaque blob; nothing is parsed or validated.

use crate::config::AppState;
use crate::handler::router::RequestContext;
use crate::http;
use crate::logger;
use crate::snapshot;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use tokio::fs;

/// Serve the newest snapshot file as a JSON passthrough response
///
/// Responds 404 with a JSON error body when no file matches the pattern,
/// and 500 with a JSON error body when the directory cannot be scanned or
/// the selected file cannot be read (e.g. removed by the producer between
/// discovery and read).
pub async fn serve_latest(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let latest = match snapshot::find_latest(&state.snapshot_dir, &state.pattern).await {
        Ok(found) => found,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to scan snapshot directory '{}': {e}",
                state.snapshot_dir.display()
            ));
            return http::build_json_error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to read data file",
            );
        }
    };

    let Some(path) = latest else {
        return http::build_json_error_response(StatusCode::NOT_FOUND, "No data files found");
    };

    match fs::read(&path).await {
        Ok(content) => {
            http::build_json_passthrough_response(Bytes::from(content), ctx.is_head)
        }
        Err(e) => {
            // The producer may have replaced or removed the file between
            // discovery and read.
            logger::log_error(&format!(
                "Failed to read snapshot '{}': {e}",
                path.display()
            ));
            http::build_json_error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to read data file",
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use http_body_util::BodyExt;
    use std::io::Write;

    fn state_for(dir: &std::path::Path) -> AppState {
        let mut config = Config::load_from("definitely_missing_config").unwrap();
        config.data.dir = dir.to_str().unwrap().to_string();
        AppState::new(config)
    }

    fn ctx(is_head: bool) -> RequestContext<'static> {
        RequestContext {
            path: "/api/latest",
            is_head,
            if_none_match: None,
        }
    }

    fn write_snapshot(dir: &std::path::Path, name: &str, content: &str, mtime_secs: u64) {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.set_modified(
            std::time::SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(mtime_secs),
        )
        .unwrap();
    }

    async fn body_bytes(resp: Response<Full<Bytes>>) -> Bytes {
        resp.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_serves_newest_snapshot_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        write_snapshot(dir.path(), "ny_rare_birds_20240101.json", r#"{"a":1}"#, 100);
        write_snapshot(dir.path(), "ny_rare_birds_20240215.json", r#"{"a":2}"#, 200);
        let state = state_for(dir.path());

        let resp = serve_latest(&ctx(false), &state).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "application/json"
        );
        assert_eq!(
            resp.headers().get("Access-Control-Allow-Origin").unwrap(),
            "*"
        );
        assert_eq!(body_bytes(resp).await.as_ref(), br#"{"a":2}"#);
    }

    #[tokio::test]
    async fn test_repeat_requests_identical() {
        let dir = tempfile::tempdir().unwrap();
        write_snapshot(dir.path(), "ny_rare_birds_1.json", r#"{"x":true}"#, 100);
        let state = state_for(dir.path());

        let first = body_bytes(serve_latest(&ctx(false), &state).await).await;
        let second = body_bytes(serve_latest(&ctx(false), &state).await).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_no_files_found() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("readme.txt"), "hello").unwrap();
        let state = state_for(dir.path());

        let resp = serve_latest(&ctx(false), &state).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "application/json"
        );
        assert_eq!(
            resp.headers().get("Access-Control-Allow-Origin").unwrap(),
            "*"
        );
        assert_eq!(
            body_bytes(resp).await.as_ref(),
            br#"{"error":"No data files found"}"#
        );
    }

    #[tokio::test]
    async fn test_missing_directory_is_structured_error() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("nope");
        let state = state_for(&gone);

        let resp = serve_latest(&ctx(false), &state).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            resp.headers().get("Access-Control-Allow-Origin").unwrap(),
            "*"
        );
        assert_eq!(
            body_bytes(resp).await.as_ref(),
            br#"{"error":"Failed to read data file"}"#
        );
    }

    #[tokio::test]
    async fn test_head_request_has_empty_body() {
        let dir = tempfile::tempdir().unwrap();
        write_snapshot(dir.path(), "ny_rare_birds_1.json", r#"{"a":1}"#, 100);
        let state = state_for(dir.path());

        let resp = serve_latest(&ctx(true), &state).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("Content-Length").unwrap(), "7");
        assert!(body_bytes(resp).await.is_empty());
    }
}
