//! Shared test utilities: an in-memory inventory API and a tiny HTTP stub.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use ims::api::ResourceApi;
use ims::models::{Order, Product, Resource, Stock, Supplier};
use ims::{ImsError, Result};
use reqwest::StatusCode;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

// ============================================================================
// In-memory API
// ============================================================================

/// A failure to return from the next call with a matching method.
#[derive(Debug, Clone)]
struct Failure {
    method: &'static str,
    status: StatusCode,
    message: Option<String>,
}

#[derive(Debug, Default)]
pub struct FakeState {
    pub products: Vec<Product>,
    pub suppliers: Vec<Supplier>,
    pub stock: Vec<Stock>,
    pub orders: Vec<Order>,
    /// Calls in arrival order, e.g. `"POST products"`.
    pub calls: Vec<String>,
    next_id: i64,
    failures: Vec<Failure>,
}

/// In-memory stand-in for the inventory service.
///
/// Clones share state, like clones of a real HTTP client share a pool.
#[derive(Debug, Clone, Default)]
pub struct FakeApi {
    state: Arc<Mutex<FakeState>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` with exclusive access to the stored collections.
    pub fn with_state<T>(&self, f: impl FnOnce(&mut FakeState) -> T) -> T {
        let mut state = self.state.lock().expect("fake state poisoned");
        f(&mut state)
    }

    /// Makes the next call using `method` fail with `status`.
    pub fn fail_next(&self, method: &'static str, status: StatusCode, message: Option<&str>) {
        self.with_state(|s| {
            s.failures.push(Failure {
                method,
                status,
                message: message.map(str::to_string),
            });
        });
    }

    pub fn calls(&self) -> Vec<String> {
        self.with_state(|s| s.calls.clone())
    }

    /// Number of recorded calls whose label starts with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.with_state(|s| s.calls.iter().filter(|c| c.starts_with(prefix)).count())
    }

    fn record(&self, method: &'static str, path: &str) -> Result<()> {
        self.with_state(|s| {
            s.calls.push(format!("{method} {path}"));
            match s.failures.iter().position(|f| f.method == method) {
                Some(i) => {
                    let failure = s.failures.remove(i);
                    Err(ImsError::Status {
                        status: failure.status,
                        message: failure.message,
                    })
                }
                None => Ok(()),
            }
        })
    }
}

/// Resources the fake can store.
pub trait Materialize: Resource<Id = i64> {
    fn collection(state: &mut FakeState) -> &mut Vec<Self>;

    /// Builds the stored entity the server would create from a payload.
    fn materialize(id: i64, payload: &Self::Payload) -> Self;
}

impl Materialize for Product {
    fn collection(state: &mut FakeState) -> &mut Vec<Self> {
        &mut state.products
    }

    fn materialize(id: i64, payload: &Self::Payload) -> Self {
        Product {
            product_id: id,
            name: payload.name.clone(),
            category: payload.category.clone(),
            price: payload.price,
            description: payload.description.clone(),
        }
    }
}

impl Materialize for Supplier {
    fn collection(state: &mut FakeState) -> &mut Vec<Self> {
        &mut state.suppliers
    }

    fn materialize(id: i64, payload: &Self::Payload) -> Self {
        Supplier {
            supplier_id: id,
            name: payload.name.clone(),
            contact_info: payload.contact_info.clone(),
        }
    }
}

impl Materialize for Stock {
    fn collection(state: &mut FakeState) -> &mut Vec<Self> {
        &mut state.stock
    }

    fn materialize(id: i64, payload: &Self::Payload) -> Self {
        Stock {
            stock_id: id,
            product_id: payload.product_id,
            quantity: payload.quantity,
            extra: serde_json::Map::new(),
        }
    }
}

impl Materialize for Order {
    fn collection(state: &mut FakeState) -> &mut Vec<Self> {
        &mut state.orders
    }

    fn materialize(id: i64, payload: &Self::Payload) -> Self {
        Order {
            order_id: id,
            product_id: payload.product_id,
            quantity: payload.quantity,
            order_date: Some("2024-03-01T10:15:00".to_string()),
            status: Some("PENDING".to_string()),
        }
    }
}

impl<R: Materialize> ResourceApi<R> for FakeApi {
    async fn list(&self) -> Result<Vec<R>> {
        self.record("GET", R::PATH)?;
        Ok(self.with_state(|s| R::collection(s).clone()))
    }

    async fn create(&self, payload: &R::Payload) -> Result<()> {
        self.record("POST", R::PATH)?;
        self.with_state(|s| {
            s.next_id += 1;
            let id = s.next_id;
            R::collection(s).push(R::materialize(id, payload));
        });
        Ok(())
    }

    async fn update(&self, id: &R::Id, payload: &R::Payload) -> Result<()> {
        self.record("PUT", R::PATH)?;
        self.with_state(|s| {
            let items = R::collection(s);
            match items.iter().position(|item| item.id() == *id) {
                Some(i) => {
                    items[i] = R::materialize(*id, payload);
                    Ok(())
                }
                None => Err(ImsError::Status {
                    status: StatusCode::NOT_FOUND,
                    message: Some(format!("{} {id} not found", R::PATH)),
                }),
            }
        })
    }

    async fn delete(&self, id: &R::Id) -> Result<()> {
        self.record("DELETE", R::PATH)?;
        self.with_state(|s| R::collection(s).retain(|item| item.id() != *id));
        Ok(())
    }
}

// ============================================================================
// HTTP stub server
// ============================================================================

/// A request received by [`StubServer`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

/// Canned HTTP/1.1 server answering from a route table.
///
/// Unmatched routes answer `200 []`.
pub struct StubServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubServer {
    /// Starts the server on an ephemeral port.
    ///
    /// Routes map `(method, path)` to `(status, body)`.
    pub async fn start(routes: &[(&str, &str, u16, &str)]) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind stub server");
        let addr = listener.local_addr().expect("no local address");

        let routes: Arc<HashMap<(String, String), (u16, String)>> = Arc::new(
            routes
                .iter()
                .map(|(method, path, status, body)| {
                    (
                        (method.to_string(), path.to_string()),
                        (*status, body.to_string()),
                    )
                })
                .collect(),
        );
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let routes = Arc::clone(&routes);
                let recorded = Arc::clone(&recorded);
                tokio::spawn(async move {
                    let _ = serve(stream, &routes, &recorded).await;
                });
            }
        });

        Self {
            base_url: format!("http://{addr}/api"),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests poisoned").clone()
    }
}

async fn serve(
    mut stream: TcpStream,
    routes: &HashMap<(String, String), (u16, String)>,
    recorded: &Mutex<Vec<RecordedRequest>>,
) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let path = request_line.next().unwrap_or_default().to_string();
    let content_length = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let body = String::from_utf8_lossy(&buf[header_end..]).to_string();

    let (status, response) = routes
        .get(&(method.clone(), path.clone()))
        .cloned()
        .unwrap_or((200, "[]".to_string()));

    recorded
        .lock()
        .expect("requests poisoned")
        .push(RecordedRequest { method, path, body });

    let reason = StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown");
    let reply = format!(
        "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{response}",
        response.len()
    );
    stream.write_all(reply.as_bytes()).await?;
    stream.shutdown().await
}
