//! Wire-format tests for the Pushover adapter.
//!
//! A one-shot listener on the loopback interface captures the raw HTTP
//! request so the body encoding and headers can be asserted byte for
//! byte, then answers with a scripted status line.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

use pibell::notify::pushover::PushoverClient;
use pibell::{Credentials, Notification, Notifier};

struct CapturedRequest {
    request_line: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl CapturedRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

fn serve_once(status_line: &'static str) -> (String, thread::JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local listener");
    let addr = listener.local_addr().expect("local addr");
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("accept connection");
        handle_connection(stream, status_line)
    });
    (format!("http://{addr}/1/messages.json"), handle)
}

fn handle_connection(mut stream: TcpStream, status_line: &str) -> CapturedRequest {
    let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
    let mut request_line = String::new();
    reader
        .read_line(&mut request_line)
        .expect("read request line");
    let mut headers = Vec::new();
    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).expect("read header line");
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        let (name, value) = line.split_once(':').expect("malformed header");
        let name = name.trim().to_ascii_lowercase();
        let value = value.trim().to_string();
        if name == "content-length" {
            content_length = value.parse().expect("content-length value");
        }
        headers.push((name, value));
    }
    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).expect("read body");
    let response = format!("{status_line}\r\ncontent-length: 2\r\nconnection: close\r\n\r\nok");
    stream.write_all(response.as_bytes()).expect("write response");
    CapturedRequest {
        request_line: request_line.trim_end().to_string(),
        headers,
        body: String::from_utf8(body).expect("utf8 body"),
    }
}

fn doorbell_note() -> Notification {
    Notification::doorbell(&Credentials {
        token: "tok123".to_string(),
        user: "usr456".to_string(),
    })
}

#[test]
fn posts_form_encoded_fields_in_wire_order() {
    let (endpoint, server) = serve_once("HTTP/1.1 200 OK");
    let client = PushoverClient::with_endpoint(&endpoint).unwrap();

    let delivery = client.notify(&doorbell_note()).unwrap();
    let request = server.join().unwrap();

    assert!(
        request.request_line.starts_with("POST /1/messages.json"),
        "unexpected request line: {}",
        request.request_line
    );
    assert_eq!(
        request.header("content-type"),
        Some("application/x-www-form-urlencoded")
    );
    assert_eq!(
        request.body,
        "token=tok123&user=usr456&title=Doorbell%21&message=Somebody+just+rang+the+doorbell"
    );
    assert_eq!(delivery.status, 200);
    assert_eq!(delivery.reason, "OK");
    assert!(delivery.is_success());
}

#[test]
fn non_2xx_response_is_reported_not_raised() {
    let (endpoint, server) = serve_once("HTTP/1.1 400 Bad Request");
    let client = PushoverClient::with_endpoint(&endpoint).unwrap();

    let delivery = client.notify(&doorbell_note()).unwrap();
    server.join().unwrap();

    assert_eq!(delivery.status, 400);
    assert_eq!(delivery.reason, "Bad Request");
    assert!(!delivery.is_success());
    assert_eq!(delivery.to_string(), "Status 400: Bad Request");
}

#[test]
fn server_error_keeps_the_reason_phrase() {
    let (endpoint, server) = serve_once("HTTP/1.1 500 Internal Server Error");
    let client = PushoverClient::with_endpoint(&endpoint).unwrap();

    let delivery = client.notify(&doorbell_note()).unwrap();
    server.join().unwrap();

    assert_eq!(delivery.to_string(), "Status 500: Internal Server Error");
}

#[test]
fn connection_refused_is_a_transient_send_failure() {
    // Bind then drop to get a port with nothing listening on it.
    let endpoint = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe listener");
        format!(
            "http://{}/1/messages.json",
            listener.local_addr().expect("local addr")
        )
    };
    let client = PushoverClient::with_endpoint(&endpoint).unwrap();

    let err = client.notify(&doorbell_note()).unwrap_err();
    assert_eq!(err.code(), "BELL-2101");
    assert!(err.is_transient());
}
