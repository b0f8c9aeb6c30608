//! HTTP front end
//!
//! A single actix-web catch-all service converts each request into an
//! [`ApiRequest`], hands it to [`NotesApi`], and writes the [`ApiResponse`]
//! back. Every request is logged with its status and elapsed time.

use std::collections::HashMap;
use std::time::Instant;

use actix_web::http::{StatusCode, header};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use eyre::{Context, Result};
use tracing::{debug, info};

use crate::api::{ApiError, ApiRequest, ApiResponse, Method, NotesApi};

/// Convert an actix request into an [`ApiRequest`].
///
/// Decoding is form-style: bad percent escapes pass through and invalid
/// UTF-8 is replaced. A query that still cannot be decoded is a 400.
fn to_api_request(req: &HttpRequest, body: web::Bytes) -> Result<ApiRequest, ApiError> {
    let query = web::Query::<HashMap<String, String>>::from_query(req.query_string())
        .map_err(|e| ApiError::MalformedQuery(e.to_string()))?
        .into_inner();

    Ok(ApiRequest {
        method: Method::from(req.method().as_str()),
        path: req.path().to_string(),
        query,
        body: body.to_vec(),
        host: Some(req.connection_info().host().to_string()),
    })
}

fn to_http_response(resp: ApiResponse) -> HttpResponse {
    let status = StatusCode::from_u16(resp.status.code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let mut builder = HttpResponse::build(status);
    if let Some(location) = resp.location {
        builder.insert_header((header::LOCATION, location));
    }
    match resp.body {
        Some(body) => builder.json(body),
        None => builder.finish(),
    }
}

/// Catch-all handler; routing happens in [`NotesApi`]
async fn dispatch(req: HttpRequest, body: web::Bytes, api: web::Data<NotesApi>) -> HttpResponse {
    let started = Instant::now();
    let resp = match to_api_request(&req, body) {
        Ok(api_req) => api.handle(api_req).await,
        Err(e) => {
            debug!(query = %req.query_string(), error = %e, "Request rejected");
            e.into_response()
        }
    };
    info!(
        method = %req.method(),
        path = %req.path(),
        status = resp.status.code(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request"
    );
    to_http_response(resp)
}

/// Register the notes service on an actix app
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.default_service(web::to(dispatch));
}

/// Bind `addr` and serve `api` until the server is stopped
pub async fn serve(addr: &str, api: NotesApi) -> Result<()> {
    let api = web::Data::new(api);
    let server = HttpServer::new(move || App::new().app_data(api.clone()).configure(configure))
        .bind(addr)
        .context(format!("Failed to bind {}", addr))?;

    info!(%addr, "Server listening");
    server.run().await.context("HTTP server failed")?;
    info!("Server stopped");
    Ok(())
}
