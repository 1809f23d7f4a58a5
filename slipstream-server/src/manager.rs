//! Browser console for credential administration.
//!
//! Login exchanges the admin key for an in-memory session cookie; the
//! console page drives `/manager/api/*` with it. Same pool operations as
//! the bearer API, different auth path.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;
use serde_json::json;
use slipstream_core::middleware::key_matches;
use slipstream_core::pool::format_session_cookie;

use crate::state::ServerState;

const SESSION_COOKIE: &str = "slipstream_session";

const LOGIN_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Slipstream Manager</title>
<style>
body{font-family:system-ui,sans-serif;display:flex;justify-content:center;margin-top:10rem}
form{display:flex;gap:.5rem}
input,button{padding:.5rem .75rem;font-size:1rem}
</style>
</head>
<body>
<form method="post" action="/manager/login">
<input type="password" name="key" placeholder="API key" autofocus>
<button type="submit">Sign in</button>
</form>
</body>
</html>
"#;

const CONSOLE_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Slipstream Manager</title>
<style>
body{font-family:system-ui,sans-serif;max-width:40rem;margin:3rem auto}
table{border-collapse:collapse;width:100%;margin:1rem 0}
td,th{border:1px solid #ccc;padding:.4rem .6rem;text-align:left}
input,button{padding:.4rem .6rem}
</style>
</head>
<body>
<h1>Credential pool</h1>
<form id="add"><input name="sso" placeholder="sso value"><button>Add</button></form>
<table><thead><tr><th>id</th><th>index</th><th>valid</th><th></th></tr></thead>
<tbody id="rows"></tbody></table>
<script>
async function refresh(){
  const res = await fetch('/manager/api/get');
  if(res.status === 401){ location.href = '/manager/login'; return; }
  const map = await res.json();
  const rows = Object.entries(map).map(([id, s]) =>
    `<tr><td>${id}</td><td>${s.index}</td><td>${s.isValid}</td>` +
    `<td><button data-id="${id}">delete</button></td></tr>`).join('');
  document.getElementById('rows').innerHTML = rows;
}
document.getElementById('add').addEventListener('submit', async e => {
  e.preventDefault();
  const sso = new FormData(e.target).get('sso');
  await fetch('/manager/api/add', {method:'POST',
    headers:{'Content-Type':'application/json'}, body:JSON.stringify({sso})});
  e.target.reset(); refresh();
});
document.getElementById('rows').addEventListener('click', async e => {
  const id = e.target.dataset.id;
  if(!id) return;
  await fetch('/manager/api/delete', {method:'POST',
    headers:{'Content-Type':'application/json'}, body:JSON.stringify({sso:id})});
  refresh();
});
refresh();
</script>
</body>
</html>
"#;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub key: String,
}

#[derive(Debug, Deserialize)]
pub struct SsoBody {
    pub sso: String,
}

fn session_from(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(SESSION_COOKIE).and_then(|rest| rest.strip_prefix('=')))
}

fn has_session(state: &ServerState, headers: &HeaderMap) -> bool {
    session_from(headers).is_some_and(|token| state.session_valid(token))
}

fn api_denied() -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({"error": "Unauthorized"}))).into_response()
}

pub async fn login_page() -> Html<&'static str> {
    Html(LOGIN_PAGE)
}

pub async fn login(State(state): State<ServerState>, Form(form): Form<LoginForm>) -> Response {
    if !key_matches(Some(form.key.as_str()), &state.gateway.config.api_key) {
        tracing::warn!("manager login rejected");
        return (StatusCode::UNAUTHORIZED, Html(LOGIN_PAGE)).into_response();
    }
    let token = state.open_session();
    let cookie = format!("{SESSION_COOKIE}={token}; HttpOnly; Path=/");
    ([(header::SET_COOKIE, cookie)], Redirect::to("/manager")).into_response()
}

pub async fn console(State(state): State<ServerState>, headers: HeaderMap) -> Response {
    if !has_session(&state, &headers) {
        return Redirect::to("/manager/login").into_response();
    }
    Html(CONSOLE_PAGE).into_response()
}

pub async fn api_get(State(state): State<ServerState>, headers: HeaderMap) -> Response {
    if !has_session(&state, &headers) {
        return api_denied();
    }
    Json(state.gateway.pool.status_snapshot()).into_response()
}

pub async fn api_add(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(body): Json<SsoBody>,
) -> Response {
    if !has_session(&state, &headers) {
        return api_denied();
    }
    if body.sso.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "sso value is required"})))
            .into_response();
    }
    state.gateway.pool.add(&format_session_cookie(body.sso.trim()));
    Json(json!({"success": true})).into_response()
}

pub async fn api_delete(
    State(state): State<ServerState>,
    headers: HeaderMap,
    Json(body): Json<SsoBody>,
) -> Response {
    if !has_session(&state, &headers) {
        return api_denied();
    }
    if body.sso.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "sso value is required"})))
            .into_response();
    }
    state.gateway.pool.remove(&format_session_cookie(body.sso.trim()));
    Json(json!({"success": true})).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::{get, post};
    use axum::Router;
    use axum_test::TestServer;
    use serde_json::Value;
    use slipstream_core::{AppState, GatewayConfig};

    fn manager_server() -> (TestServer, ServerState) {
        let config = GatewayConfig { api_key: "secret".to_string(), ..GatewayConfig::default() };
        let state = ServerState::new(AppState::new(config).unwrap());
        let app = Router::new()
            .route("/manager/login", get(login_page).post(login))
            .route("/manager", get(console))
            .route("/manager/api/get", get(api_get))
            .route("/manager/api/add", post(api_add))
            .route("/manager/api/delete", post(api_delete))
            .with_state(state.clone());
        (TestServer::new(app).unwrap(), state)
    }

    #[tokio::test]
    async fn test_console_redirects_without_session() {
        let (server, _state) = manager_server();
        let response = server.get("/manager").await;
        assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_key() {
        let (server, _state) = manager_server();
        let response = server.post("/manager/login").form(&[("key", "wrong")]).await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_login_opens_session_for_api() {
        let (server, state) = manager_server();

        let response = server.post("/manager/login").form(&[("key", "secret")]).await;
        assert_eq!(response.status_code(), StatusCode::SEE_OTHER);
        let set_cookie = response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
        let token = set_cookie
            .split(';')
            .next()
            .and_then(|pair| pair.strip_prefix("slipstream_session="))
            .unwrap()
            .to_string();
        assert!(state.session_valid(&token));

        let cookie: axum::http::HeaderValue =
            format!("slipstream_session={token}").parse().unwrap();
        let response = server.get("/manager/api/get").add_header(header::COOKIE, cookie).await;
        assert_eq!(response.status_code(), StatusCode::OK);
        let listing: Value = response.json();
        assert!(listing.as_object().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_api_rejected_without_session() {
        let (server, _state) = manager_server();
        let response = server.get("/manager/api/get").await;
        assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    }
}
