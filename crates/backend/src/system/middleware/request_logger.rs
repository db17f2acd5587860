use axum::body::Body;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

/// Middleware для логирования HTTP запросов: длительность, статус,
/// метод и путь — одной строкой на запрос.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let duration = start.elapsed();
    let status = response.status().as_u16();

    if status >= 500 {
        tracing::error!("{:>5}ms | {} {:>6} {}", duration.as_millis(), status, method, path);
    } else {
        tracing::info!("{:>5}ms | {} {:>6} {}", duration.as_millis(), status, method, path);
    }

    response
}
