//! One-shot HTTP/1.1 responder for exercising the real client in tests.

use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
    task::JoinHandle,
};
use url::Url;

pub struct OneShotServer {
    pub base_url: Url,
    handle: JoinHandle<String>,
}

impl OneShotServer {
    /// Raw request text (head and body) the server received.
    pub async fn request(self) -> String {
        self.handle.await.unwrap()
    }
}

pub async fn serve_once(status: u16, body: &'static str) -> OneShotServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut received = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let read = socket.read(&mut chunk).await.unwrap();
            if read == 0 {
                break;
            }
            received.extend_from_slice(&chunk[..read]);
            if request_complete(&received) {
                break;
            }
        }

        let reason = if status < 400 { "OK" } else { "Error" };
        let response = format!(
            "HTTP/1.1 {status} {reason}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        String::from_utf8_lossy(&received).into_owned()
    });

    OneShotServer {
        base_url: Url::parse(&format!("http://{addr}")).unwrap(),
        handle,
    }
}

fn request_complete(received: &[u8]) -> bool {
    let Some(head_end) = received.windows(4).position(|w| w == b"\r\n\r\n") else {
        return false;
    };
    let head = String::from_utf8_lossy(&received[..head_end]).to_ascii_lowercase();
    let content_length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    received.len() >= head_end + 4 + content_length
}

pub struct SilentServer {
    pub base_url: Url,
    _handle: JoinHandle<()>,
}

/// Accepts one connection and never answers it.
pub async fn serve_silent() -> SilentServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (_socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(std::time::Duration::from_secs(60)).await;
    });

    SilentServer {
        base_url: Url::parse(&format!("http://{addr}")).unwrap(),
        _handle: handle,
    }
}
