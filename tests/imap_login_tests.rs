//! Tests for the IMAP login probe against a scripted local server.
#![cfg(feature = "imap")]

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;

use credflow::error::{CredflowError, ErrorCategory};
use credflow::imap::ImapProbe;

const GOOD_PASSWORD: &str = "right-password";

/// Serves one IMAP session: greeting, LOGIN, LOGOUT. Returns the bound port.
fn spawn_fake_imap_server() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();

    thread::spawn(move || {
        let Ok((stream, _)) = listener.accept() else {
            return;
        };
        let mut writer = stream.try_clone().expect("clone stream");
        let mut reader = BufReader::new(stream);
        writer.write_all(b"* OK IMAP4rev1 ready\r\n").expect("greeting");

        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line).unwrap_or(0) == 0 {
                return;
            }
            let mut parts = line.split_whitespace();
            let tag = parts.next().unwrap_or("*").to_string();
            let command = parts.next().unwrap_or("").to_ascii_uppercase();

            let reply = match command.as_str() {
                "LOGIN" if line.contains(GOOD_PASSWORD) => format!("{tag} OK LOGIN completed\r\n"),
                "LOGIN" => format!("{tag} NO [AUTHENTICATIONFAILED] Invalid credentials\r\n"),
                "LOGOUT" => format!("* BYE logging out\r\n{tag} OK LOGOUT completed\r\n"),
                _ => format!("{tag} BAD unknown command\r\n"),
            };
            if writer.write_all(reply.as_bytes()).is_err() || command == "LOGOUT" {
                return;
            }
        }
    });

    port
}

#[tokio::test]
async fn login_check_succeeds_with_valid_login() {
    let port = spawn_fake_imap_server();

    let probe = ImapProbe::new("127.0.0.1", port, "user@example.com", GOOD_PASSWORD).with_tls(false);

    probe.check().await.expect("login should succeed");
}

#[tokio::test]
async fn login_check_surfaces_server_rejection() {
    let port = spawn_fake_imap_server();

    let probe = ImapProbe::new("127.0.0.1", port, "user@example.com", "wrong").with_tls(false);

    let err = probe.check().await.expect_err("login rejected");

    match err {
        CredflowError::Imap(ref message) => assert!(
            message.contains("Invalid credentials"),
            "unexpected message: {message}"
        ),
        other => panic!("expected IMAP error, got {other:?}"),
    }
    assert_eq!(err.category(), ErrorCategory::Transport);
}

#[tokio::test]
async fn login_check_reports_connection_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);

    let probe = ImapProbe::new("127.0.0.1", port, "u", "p").with_tls(false);

    let err = probe.check().await.expect_err("nothing listening");

    assert!(matches!(err, CredflowError::Imap(_)));
}

#[tokio::test]
async fn login_check_reports_unresolvable_host() {
    let probe = ImapProbe::new("imap.invalid", 993, "u", "p").with_tls(false);

    let err = probe.check().await.expect_err("reserved TLD never resolves");

    assert!(matches!(err, CredflowError::Imap(_)));
    assert_eq!(err.category(), ErrorCategory::Transport);
}
