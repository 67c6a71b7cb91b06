use std::future::{Ready, ready};
use std::rc::Rc;
use std::time::Instant;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{Error, ResponseError};
use futures_util::future::LocalBoxFuture;

use crate::metrics::{AppMetrics, RequestOutcome};

/// Route label for requests no resource matched, so unknown paths can't
/// grow the label set
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// Wraps the app so every exchange lands in `http_requests_total`, the
/// latency histogram and the in-flight gauge
pub struct MetricsMiddleware {
    metrics: AppMetrics,
}

impl MetricsMiddleware {
    pub fn new(metrics: AppMetrics) -> Self {
        Self { metrics }
    }
}

impl<S, B> Transform<S, ServiceRequest> for MetricsMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestMetrics<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestMetrics {
            inner: Rc::new(service),
            metrics: self.metrics.clone(),
        }))
    }
}

pub struct RequestMetrics<S> {
    inner: Rc<S>,
    metrics: AppMetrics,
}

impl<S, B> Service<ServiceRequest> for RequestMetrics<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(inner);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let inner = Rc::clone(&self.inner);
        let metrics = self.metrics.clone();

        Box::pin(async move {
            // Dropped with the future, so aborted requests still leave the gauge
            let _in_flight = metrics.in_flight();
            let started = Instant::now();
            let method = req.method().clone();

            let result = inner.call(req).await;

            let (route, status) = match &result {
                Ok(res) => (
                    res.request()
                        .match_pattern()
                        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string()),
                    res.status(),
                ),
                Err(e) => (
                    UNMATCHED_ROUTE.to_string(),
                    ResponseError::status_code(e.as_response_error()),
                ),
            };

            metrics.record_http_request(&RequestOutcome {
                method: method.as_str(),
                route: &route,
                status,
                elapsed: started.elapsed(),
            });

            result
        })
    }
}
