#![allow(dead_code)]

use std::cell::RefCell;
use std::net::SocketAddr;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use storecheck::report::{Reporter, RunInfo, RunReport};
use storecheck::testing::CaseOutcome;

/// How the stub store answers.
#[derive(Debug, Clone, Copy)]
pub enum Behavior {
    Faithful,
    ServerError,
    Slow(Duration),
}

struct StubState {
    hits: AtomicUsize,
    behavior: Behavior,
}

/// A local stand-in for fakestoreapi.com serving the same seed records.
pub struct StubStore {
    pub addr: SocketAddr,
    state: Arc<StubState>,
}

impl StubStore {
    pub async fn spawn(behavior: Behavior) -> Self {
        let state = Arc::new(StubState {
            hits: AtomicUsize::new(0),
            behavior,
        });

        let app = Router::new()
            .route("/products", get(list_products).post(create_product))
            .route(
                "/products/{id}",
                get(get_product).put(update_product).delete(get_product),
            )
            .route("/carts", get(list_carts).post(create_cart))
            .route("/carts/{id}", get(get_cart).put(update_cart).delete(get_cart))
            .layer(middleware::from_fn_with_state(state.clone(), intercept));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }
}

async fn intercept(State(state): State<Arc<StubState>>, request: Request, next: Next) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    match state.behavior {
        Behavior::Faithful => next.run(request).await,
        Behavior::ServerError => (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response(),
        Behavior::Slow(delay) => {
            tokio::time::sleep(delay).await;
            next.run(request).await
        }
    }
}

fn products() -> Value {
    json!([
        {
            "id": 1,
            "title": "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops",
            "price": 109.95,
            "category": "men's clothing"
        },
        {
            "id": 2,
            "title": "Mens Casual Premium Slim Fit T-Shirts ",
            "price": 22.3,
            "category": "men's clothing"
        }
    ])
}

fn carts() -> Value {
    json!([
        { "id": 1, "userId": 1, "date": "2020-03-02T00:00:00.000Z", "products": [{ "productId": 1, "quantity": 4 }] },
        { "id": 2, "userId": 1, "date": "2020-01-02T00:00:00.000Z", "products": [{ "productId": 2, "quantity": 4 }] }
    ])
}

fn by_id(items: Value, id: u64) -> Response {
    let found = items
        .as_array()
        .and_then(|items| items.iter().find(|item| item["id"] == id).cloned());
    match found {
        Some(item) => Json(item).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

fn with_id(mut body: Value, id: u64) -> Json<Value> {
    if let Some(map) = body.as_object_mut() {
        map.insert("id".to_string(), json!(id));
    }
    Json(body)
}

async fn list_products() -> Json<Value> {
    Json(products())
}

async fn get_product(Path(id): Path<u64>) -> Response {
    by_id(products(), id)
}

async fn create_product(Json(body): Json<Value>) -> Json<Value> {
    with_id(body, 21)
}

async fn update_product(Path(id): Path<u64>, Json(body): Json<Value>) -> Json<Value> {
    with_id(body, id)
}

async fn list_carts() -> Json<Value> {
    Json(carts())
}

async fn get_cart(Path(id): Path<u64>) -> Response {
    by_id(carts(), id)
}

async fn create_cart(Json(body): Json<Value>) -> Json<Value> {
    with_id(body, 11)
}

async fn update_cart(Path(id): Path<u64>, Json(body): Json<Value>) -> Json<Value> {
    with_id(body, id)
}

/// Reporter that logs each lifecycle call, for asserting call order.
#[derive(Clone, Default)]
pub struct Recorder {
    pub events: Rc<RefCell<Vec<String>>>,
}

impl Recorder {
    pub fn events(&self) -> Vec<String> {
        self.events.borrow().clone()
    }
}

impl Reporter for Recorder {
    fn attach(&mut self, info: &RunInfo) -> storecheck::Result<()> {
        self.events.borrow_mut().push(format!("attach {}", info.total_cases));
        Ok(())
    }

    fn record(&mut self, outcome: &CaseOutcome) -> storecheck::Result<()> {
        let verdict = if outcome.passed { "pass" } else { "fail" };
        self.events
            .borrow_mut()
            .push(format!("record {} {verdict}", outcome.name));
        Ok(())
    }

    fn finalize(&mut self, report: &RunReport) -> storecheck::Result<()> {
        self.events
            .borrow_mut()
            .push(format!("finalize {}/{}", report.passed, report.total));
        Ok(())
    }
}
