//! Verbatim relay of the upstream's line-oriented response stream.
//!
//! Lines are forwarded exactly as received, one `\n` appended each; no
//! batching, reordering or reparsing. The single failure hook is a
//! mid-stream read error, which becomes one synthetic `event: error`
//! record before the stream ends.

use async_stream::stream;
use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};
use slipstream_types::error::GatewayError;

/// Forward each non-empty upstream line with a single trailing newline.
///
/// On a read failure exactly one synthetic error event is emitted and
/// the stream terminates; nothing is read afterwards. A trailing
/// unterminated fragment is flushed as a final line on clean EOF.
/// Dropping the returned stream releases the upstream connection.
pub fn relay_lines<S, E>(upstream: S) -> impl Stream<Item = Bytes>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: std::fmt::Display,
{
    stream! {
        let mut upstream = std::pin::pin!(upstream);
        let mut buffer = BytesMut::new();
        loop {
            match upstream.next().await {
                Some(Ok(chunk)) => {
                    buffer.extend_from_slice(&chunk);
                    while let Some(pos) = buffer.iter().position(|&b| b == b'\n') {
                        let mut line = buffer.split_to(pos + 1);
                        line.truncate(line.len() - 1);
                        if line.last() == Some(&b'\r') {
                            line.truncate(line.len() - 1);
                        }
                        if !line.is_empty() {
                            line.extend_from_slice(b"\n");
                            yield line.freeze();
                        }
                    }
                }
                Some(Err(err)) => {
                    tracing::error!("stream relay failed: {err}");
                    yield error_event(&err.to_string());
                    return;
                }
                None => {
                    if !buffer.is_empty() {
                        buffer.extend_from_slice(b"\n");
                        yield buffer.freeze();
                    }
                    return;
                }
            }
        }
    }
}

fn error_event(message: &str) -> Bytes {
    let err = GatewayError::StreamInterrupted { message: message.to_string() };
    let data = serde_json::json!({ "error": err.to_string() });
    Bytes::from(format!("event: error\ndata: {data}\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;

    type ChunkResult = Result<Bytes, String>;

    async fn collect(chunks: Vec<ChunkResult>) -> Vec<String> {
        relay_lines(stream::iter(chunks))
            .map(|b| String::from_utf8(b.to_vec()).unwrap())
            .collect()
            .await
    }

    #[tokio::test]
    async fn test_lines_forwarded_verbatim() {
        let out = collect(vec![Ok(Bytes::from("one\ntwo\n"))]).await;
        assert_eq!(out, ["one\n", "two\n"]);
    }

    #[tokio::test]
    async fn test_lines_split_across_chunks() {
        let out = collect(vec![
            Ok(Bytes::from("par")),
            Ok(Bytes::from("tial\nnext")),
            Ok(Bytes::from(" line\n")),
        ])
        .await;
        assert_eq!(out, ["partial\n", "next line\n"]);
    }

    #[tokio::test]
    async fn test_blank_lines_dropped_and_crlf_trimmed() {
        let out = collect(vec![Ok(Bytes::from("a\r\n\n\r\nb\n"))]).await;
        assert_eq!(out, ["a\n", "b\n"]);
    }

    #[tokio::test]
    async fn test_trailing_fragment_flushed_on_eof() {
        let out = collect(vec![Ok(Bytes::from("done"))]).await;
        assert_eq!(out, ["done\n"]);
    }

    #[tokio::test]
    async fn test_read_failure_emits_one_error_event_then_stops() {
        let out = collect(vec![
            Ok(Bytes::from("ok\n")),
            Err("connection reset".to_string()),
            Ok(Bytes::from("never seen\n")),
        ])
        .await;
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], "ok\n");
        assert!(out[1].starts_with("event: error\ndata: "));
        assert!(out[1].contains("connection reset"));
        assert!(out[1].ends_with("\n\n"));
    }
}
