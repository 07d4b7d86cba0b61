use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{Html, Response},
};

use crate::state::AppState;

/// 每个经过静态资源前缀的请求都计数一次。
pub(crate) async fn count_hits(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    state.service.hit_counter().increment();
    next.run(request).await
}

pub(crate) async fn admin_metrics(State(state): State<AppState>) -> Html<String> {
    let hits = state.service.hit_counter().get();
    Html(format!(
        r#"<html>
  <body>
    <h1>Welcome, Chirpy Admin</h1>
    <p>Chirpy has been visited {hits} times!</p>
  </body>
</html>
"#
    ))
}
