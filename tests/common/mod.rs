//! Shared utilities for integration testing: raw-TCP mock upstreams.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Read an HTTP request head (through the blank line) from a socket.
pub async fn read_request_head(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if buf.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Keep reading until the peer goes idle, appending whatever arrives
/// (captures request bodies without parsing their framing).
async fn read_until_idle(socket: &mut TcpStream, buf: &mut String) {
    let mut chunk = [0u8; 1024];
    while let Ok(Ok(n)) = tokio::time::timeout(
        Duration::from_millis(100),
        socket.read(&mut chunk),
    )
    .await
    {
        if n == 0 {
            break;
        }
        buf.push_str(&String::from_utf8_lossy(&chunk[..n]));
    }
}

/// Start a mock upstream that answers every connection with the given raw
/// HTTP response. Returns the bound ephemeral address.
pub async fn start_mock_upstream(raw_response: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let _ = read_request_head(&mut socket).await;
                        let _ = socket.write_all(raw_response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// A mock upstream that records everything each connection sent.
pub struct CapturingUpstream {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

impl CapturingUpstream {
    /// Start a capturing upstream answering with the given raw response.
    pub async fn start(raw_response: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let captured = requests.clone();

        tokio::spawn(async move {
            loop {
                match listener.accept().await {
                    Ok((mut socket, _)) => {
                        let captured = captured.clone();
                        tokio::spawn(async move {
                            let mut request = read_request_head(&mut socket).await;
                            read_until_idle(&mut socket, &mut request).await;
                            captured.lock().unwrap().push(request);
                            let _ = socket.write_all(raw_response.as_bytes()).await;
                            let _ = socket.shutdown().await;
                        });
                    }
                    Err(_) => break,
                }
            }
        });

        Self { addr, requests }
    }

    /// Everything captured so far, one entry per connection.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Start a mock upstream whose per-connection behavior is scripted by the
/// caller. The script owns the raw socket.
pub async fn start_scripted_upstream<F, Fut>(script: F) -> SocketAddr
where
    F: Fn(TcpStream) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let script = Arc::new(script);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let script = script.clone();
                    tokio::spawn(async move {
                        script(socket).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}
