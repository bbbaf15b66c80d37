//! Synthetic live-streaming channel.
//!
//! Emits one sample per second with a value alternating between 10 and 20,
//! on the single fixed `stream` path. The samples are synthetic and have
//! nothing to do with the aggregation engine; the channel exists so a live
//! panel can be wired up end to end. Publishing is never allowed.

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use chrono::{DateTime, Utc};
use futures::stream::Stream;
use serde::Serialize;

const STREAM_PATH: &str = "stream";

#[derive(Debug, Serialize)]
struct StreamFrame {
    time: DateTime<Utc>,
    value: i64,
}

/// GET /stream/:path - subscribe; only the expected path is allowed.
pub async fn subscribe(
    Path(path): Path<String>,
) -> std::result::Result<Sse<impl Stream<Item = std::result::Result<Event, Infallible>>>, StatusCode>
{
    if path != STREAM_PATH {
        tracing::info!("Rejecting stream subscription on path '{}'", path);
        return Err(StatusCode::FORBIDDEN);
    }

    let stream = async_stream::stream! {
        let mut ticker = tokio::time::interval(Duration::from_secs(1));
        // The first tick fires immediately; skip it so frames are 1s apart.
        ticker.tick().await;

        let mut counter: i64 = 0;
        loop {
            ticker.tick().await;

            let frame = StreamFrame {
                time: Utc::now(),
                value: 10 * (counter % 2 + 1),
            };
            counter += 1;

            match serde_json::to_string(&frame) {
                Ok(data) => {
                    yield std::result::Result::<Event, Infallible>::Ok(Event::default().data(data));
                }
                Err(e) => {
                    tracing::error!("Error serializing stream frame: {}", e);
                }
            }
        }
    };

    Ok(Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(30))
            .text("ping"),
    ))
}

/// POST /stream/:path - publishing is not allowed on any path.
pub async fn publish(Path(path): Path<String>) -> StatusCode {
    tracing::info!("Rejecting publish on stream path '{}'", path);
    StatusCode::FORBIDDEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribe_accepts_only_expected_path() {
        assert!(subscribe(Path("stream".to_string())).await.is_ok());
        assert_eq!(
            subscribe(Path("other".to_string())).await.err(),
            Some(StatusCode::FORBIDDEN)
        );
    }

    #[tokio::test]
    async fn test_publish_is_always_denied() {
        assert_eq!(
            publish(Path("stream".to_string())).await,
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            publish(Path("other".to_string())).await,
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_frame_values_alternate() {
        let values: Vec<i64> = (0..4).map(|counter| 10 * (counter % 2 + 1)).collect();
        assert_eq!(values, vec![10, 20, 10, 20]);
    }
}
