//! Shared utilities for integration tests.
//!
//! Provides a canned Consul agent: a local HTTP listener that answers
//! health queries from a fixed route table and records every request.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use matchmaker_consul::RegistryConfig;

/// Health response with one healthy (`host1`) and one failing (`host2`) instance.
pub const COMPUTE_HEALTH: &str = r#"[
  {
    "Node": {"ID": "a1", "Node": "host1", "Address": "10.0.0.1", "Datacenter": "dc1"},
    "Service": {"ID": "compute-1", "Service": "compute", "Port": 5672},
    "Checks": [
      {"CheckID": "serfHealth", "Name": "Serf Health Status", "Status": "passing"},
      {"CheckID": "service:compute-1", "Name": "compute", "Status": "passing"}
    ]
  },
  {
    "Node": {"ID": "a2", "Node": "host2", "Address": "10.0.0.2", "Datacenter": "dc1"},
    "Service": {"ID": "compute-2", "Service": "compute", "Port": 5672},
    "Checks": [
      {"CheckID": "serfHealth", "Name": "Serf Health Status", "Status": "passing"},
      {"CheckID": "service:compute-2", "Name": "compute", "Status": "critical"}
    ]
  }
]"#;

/// Canned Consul agent bound to an ephemeral local port.
pub struct CannedConsul {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
    task: JoinHandle<()>,
}

impl CannedConsul {
    /// Serve `routes` (path -> (status, body)). Unknown paths answer
    /// `200 []`, as the agent does for unregistered services.
    pub async fn start(routes: &[(&str, u16, &str)]) -> Self {
        let routes: Arc<HashMap<String, (u16, String)>> = Arc::new(
            routes
                .iter()
                .map(|(path, status, body)| (path.to_string(), (*status, body.to_string())))
                .collect(),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        let task = tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let routes = Arc::clone(&routes);
                let recorded = Arc::clone(&recorded);
                tokio::spawn(async move {
                    let head = read_head(&mut socket).await;
                    let target = head.split_whitespace().nth(1).unwrap_or("/").to_string();
                    let path = target.split('?').next().unwrap_or_default().to_string();
                    recorded.lock().unwrap().push(head);

                    let (status, body) = routes
                        .get(&path)
                        .cloned()
                        .unwrap_or_else(|| (200, "[]".to_string()));
                    let reason = if status < 400 { "OK" } else { "Error" };
                    let response = format!(
                        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                        status,
                        reason,
                        body.len(),
                        body
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self {
            addr,
            requests,
            task,
        }
    }

    pub fn registry_config(&self) -> RegistryConfig {
        RegistryConfig::new(self.addr.ip().to_string(), self.addr.port())
    }

    /// Raw request heads received so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Request-line targets (path and query) received so far.
    pub fn request_targets(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|head| head.split_whitespace().nth(1).map(str::to_string))
            .collect()
    }
}

impl Drop for CannedConsul {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn read_head(socket: &mut tokio::net::TcpStream) -> String {
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

/// Listener that accepts connections and never answers.
pub async fn silent_agent() -> (RegistryConfig, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let task = tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    let mut config = RegistryConfig::new(addr.ip().to_string(), addr.port());
    config.timeout_secs = 1;
    (config, task)
}

/// Config pointing at a port nothing listens on.
pub async fn closed_port_config() -> RegistryConfig {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    RegistryConfig::new(addr.ip().to_string(), addr.port())
}
