use {
    axum::extract::{self, State},
    std::{
        net::SocketAddr,
        sync::{Arc, Mutex},
    },
};

/// How the path and query of a request are matched.
#[derive(Debug, Clone)]
pub enum Path {
    Exact(String),
    /// Matches when the request starts with the given path. Useful when the
    /// query string contains values with more than one valid encoding.
    Prefix(String),
}

impl Path {
    pub fn exact(path: impl Into<String>) -> Self {
        Self::Exact(path.into())
    }

    pub fn prefix(path: impl Into<String>) -> Self {
        Self::Prefix(path.into())
    }

    fn assert_matches(&self, actual: &str) {
        match self {
            Self::Exact(expected) => {
                assert_eq!(actual, expected, "request has unexpected path")
            }
            Self::Prefix(expected) => assert!(
                actual.starts_with(expected.as_str()),
                "request path {actual} does not start with {expected}"
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Expectation {
    Get {
        path: Path,
        res: serde_json::Value,
    },
    Post {
        path: Path,
        req: serde_json::Value,
        res: serde_json::Value,
    },
}

type Expectations = Arc<Mutex<Vec<Expectation>>>;

/// Sets up a mock aggregator API that answers the expected requests in
/// order.
pub async fn setup(expectations: Vec<Expectation>) -> SocketAddr {
    let state: Expectations = Arc::new(Mutex::new(expectations.into_iter().rev().collect()));
    let app = axum::Router::new()
        .route("/{*path}", axum::routing::get(get).post(post))
        .with_state(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    addr
}

async fn get(
    State(state): State<Expectations>,
    extract::Path(path): extract::Path<String>,
    extract::RawQuery(query): extract::RawQuery,
) -> axum::Json<serde_json::Value> {
    let mut state = state.lock().unwrap();
    let expectation = state
        .pop()
        .expect("got another GET request, but didn't expect any more");
    let (expected_path, res) = match expectation {
        Expectation::Get { path, res } => (path, res),
        other => panic!("expected GET request but got {other:?}"),
    };

    expected_path.assert_matches(&full_path(path, query));
    axum::Json(res)
}

async fn post(
    State(state): State<Expectations>,
    extract::Path(path): extract::Path<String>,
    extract::RawQuery(query): extract::RawQuery,
    axum::Json(req): axum::Json<serde_json::Value>,
) -> axum::Json<serde_json::Value> {
    let mut state = state.lock().unwrap();
    let expectation = state
        .pop()
        .expect("got another POST request, but didn't expect any more");
    let (expected_path, expected_req, res) = match expectation {
        Expectation::Post { path, req, res } => (path, req, res),
        other => panic!("expected POST request but got {other:?}"),
    };

    expected_path.assert_matches(&full_path(path, query));
    assert_eq!(req, expected_req, "POST request has unexpected body");
    axum::Json(res)
}

fn full_path(path: String, query: Option<String>) -> String {
    match query {
        Some(query) => format!("{path}?{query}"),
        None => path,
    }
}
