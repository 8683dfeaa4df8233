//! Geminiクライアントのテスト
//!
//! ローカルのTCPサーバーを generateContent エンドポイントに見立てて、
//! 成功・HTTPエラー・不正レスポンス・接続失敗・タイムアウトを検証する

use protocol_optimizer::analyzer::{analyze_protocol, GeminiClient};
use protocol_optimizer::config::Config;
use protocol_optimizer::error::OptimizerError;
use protocol_optimizer_common::{Protocol, REMOTE_SOURCE};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// 1回だけ応答するサーバーを起動し、(endpoint, 受信リクエスト) を返す
async fn serve_once(status_line: &'static str, body: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().expect("no local addr");

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept failed");
        let request = read_request(&mut socket).await;
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.expect("write failed");
        let _ = socket.shutdown().await;
        request
    });

    (format!("http://{}/v1beta/models", addr), handle)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.expect("read failed");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..pos]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= pos + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

fn config_for(endpoint: &str) -> Config {
    Config {
        endpoint: endpoint.to_string(),
        ..Default::default()
    }
}

fn pcr_protocol() -> Protocol {
    Protocol::new(
        "PCR setup",
        "PCR amplification using thermocycler",
        vec!["Taq polymerase".to_string(), "primers".to_string()],
        Vec::new(),
        "Limited budget",
    )
}

fn gemini_body(text: &str) -> String {
    json!({
        "candidates": [
            { "content": { "parts": [ { "text": text } ], "role": "model" } }
        ]
    })
    .to_string()
}

/// 成功レスポンスが提案に変換される
#[tokio::test]
async fn test_success_parses_suggestions() {
    let text = "TYPE: Cost Reduction\nSUGGESTION: Buy reagents in bulk\nSAVINGS: 30% lower unit price\nCONFIDENCE: 0.8\nREASONING: Volume discounts\n---\nTYPE: Time Reduction\nSUGGESTION: Use a fast polymerase\nSAVINGS: 50% faster cycling\nCONFIDENCE: 0.95\n---";
    let (endpoint, server) = serve_once("200 OK", gemini_body(text)).await;

    let client = GeminiClient::new(&config_for(&endpoint), "test-key").expect("client");
    let records = client.fetch_suggestions(&pcr_protocol()).await.expect("fetch failed");

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].suggestion, "Buy reagents in bulk");
    assert_eq!(records[0].confidence, 0.8);
    assert_eq!(records[1].estimated_time_reduction, 0.5);
    assert!(records.iter().all(|r| r.source == REMOTE_SOURCE));

    let request = server.await.expect("server task");
    assert!(request.starts_with("POST /v1beta/models/gemini-pro:generateContent?key=test-key "));
    assert!(request.contains("\"maxOutputTokens\":2048"));
    assert!(request.contains("Title: PCR setup"));
    assert!(request.contains("Materials: Taq polymerase, primers"));
}

/// キーはクエリ文字列としてエンコードされる
#[tokio::test]
async fn test_api_key_is_query_encoded() {
    let text = "TYPE: Automation\nSUGGESTION: Use a plate washer\n---";
    let (endpoint, server) = serve_once("200 OK", gemini_body(text)).await;

    let client = GeminiClient::new(&config_for(&endpoint), "a&b c#d").expect("client");
    let records = client.fetch_suggestions(&pcr_protocol()).await.expect("fetch failed");
    assert_eq!(records.len(), 1);

    let request = server.await.expect("server task");
    assert!(request.starts_with("POST /v1beta/models/gemini-pro:generateContent?key=a%26b+c%23d "));
}

/// HTTP 500 は型付きエラーになる
#[tokio::test]
async fn test_http_500_is_typed_error() {
    let (endpoint, _server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#.to_string()).await;

    let client = GeminiClient::new(&config_for(&endpoint), "k").expect("client");
    let result = client.fetch_suggestions(&pcr_protocol()).await;

    match result {
        Err(OptimizerError::ApiStatus { status, body }) => {
            assert_eq!(status, 500);
            assert!(body.contains("boom"));
        }
        other => panic!("Expected ApiStatus error, got {:?}", other.map(|r| r.len())),
    }
}

/// HTTP 500 でもパイプラインは継続し、カタログの提案だけが残る
#[tokio::test]
async fn test_http_500_pipeline_keeps_catalogue_results() {
    let (endpoint, _server) = serve_once("500 Internal Server Error", "{}".to_string()).await;

    let client = GeminiClient::new(&config_for(&endpoint), "k").expect("client");
    let result = analyze_protocol(&pcr_protocol(), Some(&client)).await;

    assert_eq!(result.optimization_count, 3);
    assert!(result.optimizations.iter().all(|o| o.source != REMOTE_SOURCE));
}

/// 200 でもJSONでなければ解析エラー、suggest は空
#[tokio::test]
async fn test_malformed_body() {
    let (endpoint, _server) = serve_once("200 OK", "not json at all".to_string()).await;
    let client = GeminiClient::new(&config_for(&endpoint), "k").expect("client");
    let result = client.fetch_suggestions(&pcr_protocol()).await;
    assert!(matches!(result, Err(OptimizerError::ApiParse(_))));

    let (endpoint, _server) = serve_once("200 OK", "not json at all".to_string()).await;
    let client = GeminiClient::new(&config_for(&endpoint), "k").expect("client");
    assert!(client.suggest(&pcr_protocol()).await.is_empty());
}

/// 接続できない場合も suggest は空
#[tokio::test]
async fn test_connection_refused() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().expect("no local addr");
    drop(listener);

    let client = GeminiClient::new(&config_for(&format!("http://{}/models", addr)), "k").expect("client");
    let result = client.fetch_suggestions(&pcr_protocol()).await;
    assert!(matches!(result, Err(OptimizerError::ApiCall(_))));
    assert!(client.suggest(&pcr_protocol()).await.is_empty());
}

/// 応答が来なければタイムアウトで打ち切る
#[tokio::test]
async fn test_timeout() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().expect("no local addr");
    let _server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.expect("accept failed");
        tokio::time::sleep(std::time::Duration::from_secs(10)).await;
        drop(socket);
    });

    let config = Config {
        endpoint: format!("http://{}/models", addr),
        timeout_seconds: 1,
        ..Default::default()
    };
    let client = GeminiClient::new(&config, "k").expect("client");
    let result = client.fetch_suggestions(&pcr_protocol()).await;
    assert!(matches!(result, Err(OptimizerError::ApiCall(_))));
}
