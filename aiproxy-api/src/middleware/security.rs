/// Response hardening middleware
///
/// Adds headers to every response so proxied payloads, which include OAuth
/// tokens, are never cached or sniffed.
///
/// # Headers Applied
///
/// - `X-Content-Type-Options: nosniff`
/// - `Cache-Control: no-store`
/// - `Pragma: no-cache`
/// - `Referrer-Policy: no-referrer`
/// - `Strict-Transport-Security` (production only)
///
/// # Example
///
/// ```no_run
/// use axum::Router;
/// use aiproxy_api::middleware::security::NoStoreHeadersLayer;
///
/// let app: Router = Router::new()
///     .layer(NoStoreHeadersLayer::new(true)); // true = production mode
/// ```

use axum::{
    extract::Request,
    http::{header, HeaderValue},
    response::Response,
};
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Response hardening layer
#[derive(Clone)]
pub struct NoStoreHeadersLayer {
    /// Whether to send HSTS (production behind HTTPS)
    enable_hsts: bool,
}

impl NoStoreHeadersLayer {
    pub fn new(enable_hsts: bool) -> Self {
        Self { enable_hsts }
    }
}

impl<S> Layer<S> for NoStoreHeadersLayer {
    type Service = NoStoreHeaders<S>;

    fn layer(&self, inner: S) -> Self::Service {
        NoStoreHeaders {
            inner,
            enable_hsts: self.enable_hsts,
        }
    }
}

/// Response hardening service
#[derive(Clone)]
pub struct NoStoreHeaders<S> {
    inner: S,
    enable_hsts: bool,
}

impl<S> Service<Request> for NoStoreHeaders<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let future = self.inner.call(request);
        let enable_hsts = self.enable_hsts;

        Box::pin(async move {
            let mut response = future.await?;
            let headers = response.headers_mut();

            headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
            headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
            headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
            headers.insert(header::REFERRER_POLICY, HeaderValue::from_static("no-referrer"));

            if enable_hsts {
                headers.insert(
                    header::STRICT_TRANSPORT_SECURITY,
                    HeaderValue::from_static("max-age=31536000; includeSubDomains"),
                );
            }

            Ok(response)
        })
    }
}
