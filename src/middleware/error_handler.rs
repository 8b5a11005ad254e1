use axum::{
    body::{Body, to_bytes},
    http::{Request, header::CONTENT_LENGTH},
    middleware::Next,
    response::Response,
};
use tracing::error;

// 日志里只记录响应体的前 4KB，返回给客户端的响应体保持完整
const MAX_LOGGED_BODY: usize = 4096;

/// 记录所有 5xx 响应，401 等客户端错误不记录
pub async fn log_errors(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let response = next.run(req).await;

    if !response.status().is_server_error() {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            error!(%method, %uri, status = %parts.status, "Failed to read error response body: {}", e);
            parts.headers.remove(CONTENT_LENGTH);
            return Response::from_parts(parts, Body::empty());
        }
    };

    let logged = &bytes[..bytes.len().min(MAX_LOGGED_BODY)];
    error!(
        %method,
        %uri,
        status = %parts.status,
        body = %String::from_utf8_lossy(logged),
        truncated = bytes.len() > MAX_LOGGED_BODY,
        "Server error occurred"
    );

    // 重置body以便重新构建响应
    parts.headers.remove(CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(bytes))
}
