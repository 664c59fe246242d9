//! Background thread that owns the OpenSubtitles client for its lifetime.
//!
//! The blocking reqwest client carries its own runtime and must not be built or
//! dropped inside the tokio runtime, so it is created inside the thread rather
//! than passed in. All communication is via channels: `ApiRequest` in,
//! `AppEvent::ApiResult` out. Requests are served strictly one at a time.

use crossbeam_channel::Receiver;
use subgrab_core::{ApiConfig, ApiError, OpenSubtitlesClient, SubtitleApi};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, warn};

use crate::api::types::{ApiRequest, ApiResult};
use crate::event::AppEvent;

/// Entry point for the API worker thread.
///
/// Builds the client from `config` and loops over incoming requests until the
/// channel is closed (sender dropped) or the event bus goes away. If the client
/// cannot be built, every request is answered with that error so the UI still
/// leaves its busy state.
pub fn api_worker_loop(
    config: ApiConfig,
    rx: Receiver<ApiRequest>,
    event_tx: UnboundedSender<AppEvent>,
) {
    let client = match OpenSubtitlesClient::new(config) {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "api client init failed");
            let message = e.to_string();
            for request in rx {
                let result = ApiResult::failed(request, ApiError::ClientInit(message.clone()));
                if event_tx.send(AppEvent::ApiResult(Box::new(result))).is_err() {
                    break;
                }
            }
            return;
        }
    };

    for request in rx {
        let result = handle_request(&client, request);
        if event_tx.send(AppEvent::ApiResult(Box::new(result))).is_err() {
            break;
        }
    }
    debug!("api worker exiting");
}

/// Runs one request against `api` and packages the outcome.
///
/// A download is two round trips: link resolution, then the file fetch. The
/// fetch is skipped when resolution fails.
pub fn handle_request(api: &impl SubtitleApi, request: ApiRequest) -> ApiResult {
    debug!(kind = request.kind(), "api request");
    let result = match request {
        ApiRequest::Login { username, password } => {
            let result = api.login(&username, &password);
            ApiResult::Login { username, result }
        }
        ApiRequest::Search { token, query } => {
            let result = api.search(token.as_deref(), &query);
            ApiResult::Search { query, result }
        }
        ApiRequest::Download {
            token,
            file_id,
            directory,
        } => {
            let result = api
                .resolve_download(token.as_deref(), file_id)
                .and_then(|link| api.fetch_file(&link.url, &directory, &link.file_name));
            ApiResult::Download { file_id, result }
        }
    };
    log_failure(&result);
    result
}

fn log_failure(result: &ApiResult) {
    let err = match result {
        ApiResult::Login { result: Err(e), .. } => e,
        ApiResult::Search { result: Err(e), .. } => e,
        ApiResult::Download { result: Err(e), .. } => e,
        _ => return,
    };
    warn!(error = %err, "api request failed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use subgrab_core::SearchQuery;

    #[test]
    fn download_resolves_then_fetches() {
        let tmp = tempfile::TempDir::new().unwrap();
        let api = FakeApi::default();

        let result = handle_request(
            &api,
            ApiRequest::Download {
                token: Some("jwt".to_owned()),
                file_id: 123,
                directory: tmp.path().to_path_buf(),
            },
        );

        match result {
            ApiResult::Download { file_id, result } => {
                assert_eq!(file_id, 123);
                assert_eq!(result.unwrap(), tmp.path().join("Inception.srt"));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(api.calls(), vec!["resolve_download:123", "fetch_file:http://x/y.srt"]);
        assert_eq!(api.last_token(), Some("jwt".to_owned()));
    }

    #[test]
    fn failed_resolution_skips_fetch() {
        let tmp = tempfile::TempDir::new().unwrap();
        let api = FakeApi {
            fail_resolve: true,
            ..FakeApi::default()
        };

        let result = handle_request(
            &api,
            ApiRequest::Download {
                token: None,
                file_id: 5,
                directory: tmp.path().to_path_buf(),
            },
        );

        assert!(matches!(
            result,
            ApiResult::Download { result: Err(ApiError::MissingLink), .. }
        ));
        assert_eq!(api.calls(), vec!["resolve_download:5"]);
    }

    #[test]
    fn search_passes_token_and_query_through() {
        let api = FakeApi::default();
        let query = SearchQuery {
            title: "Inception".to_owned(),
            language: "en".to_owned(),
        };

        let result = handle_request(
            &api,
            ApiRequest::Search {
                token: Some("jwt".to_owned()),
                query: query.clone(),
            },
        );

        match result {
            ApiResult::Search { query: q, result } => {
                assert_eq!(q, query);
                assert_eq!(result.unwrap().len(), 1);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(api.calls(), vec!["search:Inception:en"]);
    }

    #[test]
    fn worker_loop_reports_missing_key_without_network() {
        // Without an API key every call fails before any I/O.
        let config = ApiConfig {
            base_url: "http://127.0.0.1:9".to_owned(),
            api_key: None,
            user_agent: "subgrab-test".to_owned(),
        };
        let (tx, rx) = crossbeam_channel::unbounded();
        let (event_tx, mut event_rx) = tokio::sync::mpsc::unbounded_channel();

        tx.send(ApiRequest::Login {
            username: "a".to_owned(),
            password: "b".to_owned(),
        })
        .unwrap();
        drop(tx);
        api_worker_loop(config, rx, event_tx);

        match event_rx.try_recv().unwrap() {
            AppEvent::ApiResult(result) => assert!(matches!(
                *result,
                ApiResult::Login { result: Err(ApiError::MissingCredentials), .. }
            )),
            other => panic!("unexpected {other:?}"),
        }
        assert!(event_rx.try_recv().is_err());
    }
}
