//! Exercises the HTTP client against a one-shot loopback server.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use septoctor_model::IntakeError;
use septoctor_ocr::{HttpOcrClient, OcrClient, OcrConfig, OcrError};

/// Serves one request with `status` and `body`, returning the request body.
fn serve_once(status: &'static str, body: &'static str) -> (SocketAddr, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);

        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().unwrap();
                }
            }
        }
        let mut request_body = vec![0u8; content_length];
        reader.read_exact(&mut request_body).unwrap();

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let mut stream = reader.into_inner();
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        String::from_utf8(request_body).unwrap()
    });
    (addr, handle)
}

fn client_for(addr: SocketAddr) -> HttpOcrClient {
    HttpOcrClient::new(&OcrConfig::new(format!("http://{addr}/ocr")).with_timeout_secs(5)).unwrap()
}

#[test]
fn posts_base64_and_returns_text() {
    let (addr, server) = serve_once("200 OK", r#"{"text":"Birth weight: 1800 g"}"#);
    let document = b"%PDF-1.4 case sheet";

    let text = client_for(addr).extract_text(document).unwrap();
    assert_eq!(text, "Birth weight: 1800 g");

    let request: serde_json::Value = serde_json::from_str(&server.join().unwrap()).unwrap();
    assert_eq!(request["imageBase64"], STANDARD.encode(document));
}

#[test]
fn missing_text_is_empty() {
    let (addr, server) = serve_once("200 OK", "{}");
    let text = client_for(addr).extract_text(b"scan").unwrap();
    assert_eq!(text, "");
    server.join().unwrap();
}

#[test]
fn error_status_is_service_failure() {
    let (addr, server) = serve_once("500 Internal Server Error", r#"{"error":"model offline"}"#);
    let err = client_for(addr).extract_text(b"scan").unwrap_err();
    match &err {
        OcrError::Service { status, message } => {
            assert_eq!(*status, 500);
            assert!(message.contains("model offline"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(matches!(
        IntakeError::from(err),
        IntakeError::OcrFailure { .. }
    ));
    server.join().unwrap();
}

#[test]
fn unreachable_service_is_network_failure() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let err = client_for(addr).extract_text(b"scan").unwrap_err();
    assert!(matches!(err, OcrError::Network(_)), "{err:?}");
}

#[test]
fn slow_service_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let server = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        thread::sleep(Duration::from_secs(3));
        drop(stream);
    });

    let client =
        HttpOcrClient::new(&OcrConfig::new(format!("http://{addr}/ocr")).with_timeout_secs(1))
            .unwrap();
    let err = client.extract_text(b"scan").unwrap_err();
    assert!(matches!(err, OcrError::Timeout), "{err:?}");
    server.join().unwrap();
}
