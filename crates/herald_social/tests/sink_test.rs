use herald_error::{DiscordErrorKind, HeraldErrorKind};
use herald_social::{
    DiscordChannelSink, DiscordMessage, DiscordWebhookSink, NotificationSink, RecordingSink,
};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serves one HTTP request with a canned response and returns the raw request.
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&request);
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if request.len() >= end + 4 + length {
                    break;
                }
            }
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        String::from_utf8_lossy(&request).to_string()
    });

    (format!("http://{}", addr), handle)
}

#[tokio::test]
async fn test_channel_sink_posts_as_bot() {
    let (base, server) = serve_once("200 OK", r#"{"id":"1"}"#).await;
    let sink = DiscordChannelSink::new("tok", "42", base, Duration::from_secs(5)).unwrap();

    sink.send(&DiscordMessage::new("hello").suppress_link_previews())
        .await
        .unwrap();

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /channels/42/messages"));
    assert!(request.to_lowercase().contains("authorization: bot tok"));
    assert!(request.contains(r#""flags":4"#));
    assert!(request.contains(r#""allowed_mentions":{"parse":["roles"]}"#));
}

#[tokio::test]
async fn test_rate_limit_is_transient() {
    let (base, server) = serve_once("429 Too Many Requests", r#"{"retry_after":1.5}"#).await;
    let sink = DiscordWebhookSink::new(format!("{}/api/webhooks/1/abc", base), Duration::from_secs(5))
        .unwrap();

    let err = sink.send(&DiscordMessage::new("hello")).await.unwrap_err();
    server.await.unwrap();

    match err.kind() {
        HeraldErrorKind::Discord(e) => assert!(matches!(e.kind, DiscordErrorKind::RateLimited(_))),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_bad_request_is_not_transient() {
    let (base, server) = serve_once("400 Bad Request", r#"{"message":"Cannot send an empty message"}"#).await;
    let sink = DiscordChannelSink::new("tok", "42", base, Duration::from_secs(5)).unwrap();

    let err = sink.send(&DiscordMessage::default()).await.unwrap_err();
    server.await.unwrap();

    match err.kind() {
        HeraldErrorKind::Discord(e) => match &e.kind {
            DiscordErrorKind::Rejected { status, body } => {
                assert_eq!(*status, 400);
                assert!(body.contains("empty message"));
            }
            other => panic!("unexpected kind: {other}"),
        },
        other => panic!("unexpected error: {other}"),
    }
    assert!(!err.is_transient());
}

#[tokio::test]
async fn test_recording_sink_counts_failed_attempts() {
    let sink = RecordingSink::failing_at([0]);

    assert!(sink.send(&DiscordMessage::new("first")).await.is_err());
    sink.send(&DiscordMessage::new("second")).await.unwrap();

    assert_eq!(sink.attempts(), 2);
    let sent = sink.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].content(), "second");
}
