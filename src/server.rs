//! HTTP dispatcher for the article store
//!
//! Routes:
//!
//! | Path | Method | Action |
//! |---|---|---|
//! | `/articles` | GET | list every article |
//! | `/articles` | POST | create an article |
//! | `/articles` | other | 405 |
//! | `/articles/search?q=<token>` | any | whole-word search |
//! | `/articles/{id}` | any | fetch one article |
//!
//! Any other path, including `/articles/` and paths deeper than one segment
//! under `/articles`, is a 404 with an empty body.
//!
//! # Example
//!
//! ```no_run
//! use articles_rs::{server, ArticleStore, ServerConfig};
//! use std::sync::Arc;
//!
//! # async fn example() -> articles_rs::Result<()> {
//! let listener = server::bind(&ServerConfig::local(8080))?;
//! server::serve(listener, Arc::new(ArticleStore::new())).await?;
//! # Ok(())
//! # }
//! ```

use std::net::ToSocketAddrs;
use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Path, RawQuery, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use serde::Serialize;
use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

use crate::article::{self, NewArticle};
use crate::error::{ArticleError, Result};
use crate::search::search;
use crate::{ArticleStore, ServerConfig};

/// Pending connection queue length for the listening socket
const LISTEN_BACKLOG: i32 = 1024;

/// The only content-type accepted by the create endpoint
const JSON_MIME: &str = "application/json";

/// Build the article router with `store` injected as shared state
pub fn router(store: Arc<ArticleStore>) -> Router {
    Router::new()
        .route(
            "/articles",
            get(list_articles)
                // HEAD would otherwise be answered by the GET handler
                .head(method_not_allowed)
                .post(create_article)
                .fallback(method_not_allowed),
        )
        .route("/articles/search", any(search_articles))
        .route("/articles/{id}", any(get_article))
        .with_state(store)
}

/// Bind a listening socket for `config`
///
/// The socket is created through socket2 so address reuse and the backlog
/// can be set before tokio takes it over. Must be called from within a tokio
/// runtime.
pub fn bind(config: &ServerConfig) -> Result<TcpListener> {
    let addr = config.addr();
    let socket_addr = addr
        .to_socket_addrs()
        .map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Failed to resolve address {addr}: {e}"),
            )
        })?
        .next()
        .ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("No address resolved for {addr}"),
            )
        })?;

    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    // Allow immediate rebinding after a restart while old connections sit in TIME_WAIT
    socket.set_reuse_address(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(LISTEN_BACKLOG)?;
    socket.set_nonblocking(true)?;

    let listener = TcpListener::from_std(socket.into())?;
    info!("Listening on {}", listener.local_addr()?);
    Ok(listener)
}

/// Serve the article API on `listener` until Ctrl-C
pub async fn serve(listener: TcpListener, store: Arc<ArticleStore>) -> Result<()> {
    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

/// Bind according to `config`, prepare the store, and serve
pub async fn run(config: ServerConfig) -> Result<()> {
    let store = if config.seed {
        ArticleStore::with_articles([article::sample()])
    } else {
        ArticleStore::new()
    };
    debug!("Store starts with {} article(s)", store.len());

    let listener = bind(&config)?;
    serve(listener, Arc::new(store)).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal handler the server simply runs until killed
        warn!("Failed to install Ctrl-C handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

/// Encode `value` as a 200 JSON response
fn json_response<T: Serialize + ?Sized>(value: &T) -> Result<Response> {
    let body = serde_json::to_vec(value).map_err(ArticleError::Serialization)?;
    Ok(([(header::CONTENT_TYPE, JSON_MIME)], body).into_response())
}

async fn list_articles(State(store): State<Arc<ArticleStore>>) -> Result<Response> {
    // Snapshot first so the lock is released before encoding
    let articles = store.get_all();
    debug!("Listing {} article(s)", articles.len());
    json_response(&articles)
}

async fn create_article(
    State(store): State<Arc<ArticleStore>>,
    headers: HeaderMap,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<StatusCode> {
    let body = body.map_err(|e| ArticleError::BodyRead(e.body_text()))?;

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
        .unwrap_or_default();
    if content_type != JSON_MIME {
        return Err(ArticleError::UnsupportedMediaType(content_type));
    }

    let new: NewArticle = serde_json::from_slice(&body).map_err(ArticleError::MalformedJson)?;
    let id = store.next_id();
    let replaced = store.insert(new.into_article(id.clone()));
    if replaced.is_some() {
        warn!("Article {} replaced an existing entry", id);
    }
    debug!("Created article {}", id);

    // The id is not echoed back; success is an empty 200
    Ok(StatusCode::OK)
}

async fn get_article(
    State(store): State<Arc<ArticleStore>>,
    Path(id): Path<String>,
) -> Result<Response> {
    let article = store.get_by_id(&id).ok_or(ArticleError::NotFound)?;
    json_response(&article)
}

async fn search_articles(
    State(store): State<Arc<ArticleStore>>,
    RawQuery(query): RawQuery,
) -> Result<Response> {
    let token = query.as_deref().map(first_q).unwrap_or_default();

    let snapshot = store.get_all();
    let hits = search(&snapshot, &token);
    debug!("Search for {:?} matched {} time(s)", token, hits.len());
    json_response(&hits)
}

/// First `q` value of a raw query string
///
/// Decoding is lossy and never fails, so a bad pair elsewhere in the query
/// does not hide `q`.
fn first_q(query: &str) -> String {
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "q")
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default()
}

async fn method_not_allowed() -> ArticleError {
    ArticleError::MethodNotAllowed
}
