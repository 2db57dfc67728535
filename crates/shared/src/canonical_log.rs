//! # Canonical Log Line ミドルウェア
//!
//! HTTP リクエスト完了時に、メソッド・パス・ステータス・レスポンスサイズ・
//! 処理時間を 1 行に集約したアクセスログを出力する tower Layer。
//!
//! ## レイヤー配置
//!
//! TraceLayer の内側に配置し、スパンフィールド（request_id など）を
//! ログに含める:
//!
//! ```text
//! SetRequestId → TraceLayer → CanonicalLogLineLayer → Router
//! ```

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use http::{Request, Response, header::CONTENT_LENGTH};
use tower::{Layer, Service};

/// ヘルスチェックパス（`/health`, `/health/ready`）はログ対象外
fn is_health_check_path(path: &str) -> bool {
    path.starts_with("/health")
}

/// `content-length` ヘッダーの値を取り出す
///
/// ストリーミングなどでヘッダーがない場合は `None`。
fn content_length<B>(response: &Response<B>) -> Option<u64> {
    response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

/// Canonical Log Line を出力する Layer
#[derive(Clone, Debug)]
pub struct CanonicalLogLineLayer;

impl<S> Layer<S> for CanonicalLogLineLayer {
    type Service = CanonicalLogLineService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CanonicalLogLineService { inner }
    }
}

/// [`CanonicalLogLineLayer`] が生成する Service
#[derive(Clone, Debug)]
pub struct CanonicalLogLineService<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for CanonicalLogLineService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: std::fmt::Display + 'static,
    ReqBody: Send + 'static,
    ResBody: Send + 'static,
{
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;
    type Response = S::Response;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        // poll_ready 済みの inner を取り出し、代わりに clone を残す
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let method = req.method().clone();
        let path = req.uri().path().to_owned();

        if is_health_check_path(&path) {
            return Box::pin(async move { inner.call(req).await });
        }

        let start = Instant::now();

        Box::pin(async move {
            let result = inner.call(req).await;
            let latency_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(response) => {
                    tracing::info!(
                        log.r#type = "canonical",
                        http.method = %method,
                        http.path = %path,
                        http.status_code = response.status().as_u16(),
                        http.response_bytes = content_length(response),
                        http.latency_ms = latency_ms,
                        "リクエスト完了"
                    );
                }
                Err(err) => {
                    tracing::error!(
                        log.r#type = "canonical",
                        http.method = %method,
                        http.path = %path,
                        http.latency_ms = latency_ms,
                        error.message = %err,
                        "リクエスト処理エラー"
                    );
                }
            }

            result
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{
        convert::Infallible,
        sync::{Arc, Mutex},
    };

    use tower::{ServiceExt as _, service_fn};
    use tracing_subscriber::layer::SubscriberExt as _;

    use super::*;

    /// キャプチャしたイベント（フィールド名と値の組）
    type Captured = Arc<Mutex<Vec<Vec<(String, String)>>>>;

    struct CaptureLayer {
        events: Captured,
    }

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for CaptureLayer {
        fn on_event(
            &self,
            event: &tracing::Event<'_>,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            let mut visitor = FieldVisitor::default();
            event.record(&mut visitor);
            self.events.lock().unwrap().push(visitor.fields);
        }
    }

    #[derive(Default)]
    struct FieldVisitor {
        fields: Vec<(String, String)>,
    }

    impl tracing::field::Visit for FieldVisitor {
        fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
            self.fields
                .push((field.name().to_string(), format!("{value:?}")));
        }

        fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
            self.fields
                .push((field.name().to_string(), value.to_string()));
        }

        fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
            self.fields
                .push((field.name().to_string(), value.to_string()));
        }
    }

    fn setup_capture() -> (tracing::subscriber::DefaultGuard, Captured) {
        let events: Captured = Arc::new(Mutex::new(Vec::new()));
        let subscriber = tracing_subscriber::registry().with(CaptureLayer {
            events: events.clone(),
        });
        (tracing::subscriber::set_default(subscriber), events)
    }

    fn field<'a>(fields: &'a [(String, String)], name: &str) -> Option<&'a str> {
        fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    async fn call(method: &str, path: &str, status: u16) {
        let inner = service_fn(move |_req: Request<()>| async move {
            Ok::<_, Infallible>(
                Response::builder()
                    .status(status)
                    .header(CONTENT_LENGTH, "27")
                    .body(())
                    .unwrap(),
            )
        });
        let request = Request::builder().method(method).uri(path).body(()).unwrap();

        CanonicalLogLineLayer
            .layer(inner)
            .oneshot(request)
            .await
            .unwrap();
    }

    #[test]
    fn test_health配下のみ除外対象() {
        assert!(is_health_check_path("/health"));
        assert!(is_health_check_path("/health/ready"));
        assert!(!is_health_check_path("/api/persons"));
        assert!(!is_health_check_path("/info"));
    }

    #[tokio::test]
    async fn test_アクセスログにメソッドとパスとステータスが含まれる() {
        let (_guard, events) = setup_capture();

        call("POST", "/api/persons", 400).await;

        let captured = events.lock().unwrap();
        assert_eq!(captured.len(), 1);
        let fields = &captured[0];
        assert_eq!(field(fields, "log.type"), Some("canonical"));
        assert_eq!(field(fields, "http.method"), Some("POST"));
        assert_eq!(field(fields, "http.path"), Some("/api/persons"));
        assert_eq!(field(fields, "http.status_code"), Some("400"));
        assert_eq!(field(fields, "http.response_bytes"), Some("27"));
    }

    #[tokio::test]
    async fn test_healthパスではログが出力されない() {
        let (_guard, events) = setup_capture();

        call("GET", "/health/ready", 200).await;

        assert!(events.lock().unwrap().is_empty());
    }
}
