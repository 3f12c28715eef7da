//! Seed-granting HTTP endpoint.
//!
//! Binds to localhost and answers `POST /random`: a matching shared key
//! gets 64 fresh bits from the OS entropy source, anything else gets 403.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use hyper::body::to_bytes;
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Method, Request, Response, Server, StatusCode};
use serde::Serialize;

use crate::random::{EntropySource, OsEntropy};
use crate::rpc::{SeedRequest, SeedResponse};

/// Seed endpoint configuration, constructed explicitly at startup.
#[derive(Debug, Clone)]
pub struct SeedServerConfig {
    /// Port to bind on localhost.
    pub port: u16,
    /// Shared secret a caller must present.
    pub api_key: String,
}

/// The seed-granting endpoint.
pub struct SeedServer {
    address: SocketAddr,
    api_key: String,
}

impl SeedServer {
    pub fn new(config: SeedServerConfig) -> Self {
        // Localhost only; the shared key is no substitute for transport security.
        let address = SocketAddr::from(([127, 0, 0, 1], config.port));
        Self {
            address,
            api_key: config.api_key,
        }
    }

    /// Serve until the process is stopped.
    pub async fn start(self) -> Result<()> {
        let ctx = Arc::new(self);
        let server_addr = ctx.address;
        let make_svc = make_service_fn(move |_| {
            let ctx = Arc::clone(&ctx);
            async move {
                Ok::<_, hyper::Error>(service_fn(move |req| {
                    let ctx = Arc::clone(&ctx);
                    async move { ctx.handle(req).await }
                }))
            }
        });

        println!("Seed endpoint listening on http://{}", server_addr);
        let server = Server::bind(&server_addr).serve(make_svc);
        server.await.map_err(|e| anyhow!("seed server error: {e}"))
    }

    async fn handle(self: &Arc<Self>, req: Request<Body>) -> Result<Response<Body>, hyper::Error> {
        match (req.method(), req.uri().path()) {
            (&Method::POST, "/random") => self.handle_random(req).await,
            _ => Ok(Response::builder()
                .status(StatusCode::NOT_FOUND)
                .body(Body::from("Not Found"))
                .unwrap()),
        }
    }

    async fn handle_random(&self, req: Request<Body>) -> Result<Response<Body>, hyper::Error> {
        let bytes = to_bytes(req.into_body()).await?;
        let request: SeedRequest = match serde_json::from_slice(&bytes) {
            Ok(v) => v,
            Err(e) => {
                return Ok(error_response(
                    StatusCode::BAD_REQUEST,
                    &format!("invalid JSON: {e}"),
                ))
            }
        };

        if request.key != self.api_key {
            return Ok(error_response(StatusCode::FORBIDDEN, "invalid API key"));
        }

        let mut entropy = OsEntropy;
        let response = SeedResponse {
            random_value: entropy.bits64(),
        };
        json_response(&response)
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    detail: &'a str,
}

fn error_response(status: StatusCode, detail: &str) -> Response<Body> {
    let body = serde_json::to_vec(&ErrorBody { detail }).unwrap_or_default();
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn json_response<T: Serialize>(value: &T) -> Result<Response<Body>, hyper::Error> {
    let body = serde_json::to_vec_pretty(value).unwrap_or_default();
    Ok(Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap())
}
