#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, Query, Request, State},
    http::{HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use dashboard::{
    Dashboard,
    client::RedirectQueue,
    config::Config,
    session::{AuthDomain, MemoryStorage, Session, SessionUser, TokenStore},
};
use serde_json::{Value, json};

pub const PASSWORD: &str = "secret";
pub const SALES_PASSWORD: &str = "sales-secret";

/// 模拟后端收到的一次请求
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub request_id: Option<String>,
}

#[derive(Default)]
pub struct MockState {
    requests: Mutex<Vec<RecordedRequest>>,
    tokens: Mutex<HashMap<String, (AuthDomain, Value)>>,
    next_token: AtomicUsize,
    delay_ms: AtomicU64,
    projects: Mutex<Vec<Value>>,
    removed_beta_testers: Mutex<Vec<String>>,
}

impl MockState {
    /// 为某个域签发一个后端认可的令牌
    pub fn issue_token(&self, domain: AuthDomain) -> String {
        self.issue_token_for(domain, user_json(domain, None))
    }

    /// 用指定的用户信息签发令牌，`me` 接口返回该用户
    pub fn issue_token_for(&self, domain: AuthDomain, user: Value) -> String {
        let n = self.next_token.fetch_add(1, Ordering::SeqCst);
        let token = format!("{}-token-{}", domain.as_str(), n);
        self.tokens
            .lock()
            .unwrap()
            .insert(token.clone(), (domain, user));
        token
    }

    /// 让所有已签发的令牌失效
    pub fn revoke_tokens(&self) {
        self.tokens.lock().unwrap().clear();
    }

    pub fn set_delay(&self, delay: Duration) {
        self.delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// 后端解码后收到的内测人员 ID
    pub fn removed_beta_testers(&self) -> Vec<String> {
        self.removed_beta_testers.lock().unwrap().clone()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn total_requests(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn authorize(&self, headers: &HeaderMap, domain: AuthDomain) -> Result<Value, Response> {
        let token = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));
        let tokens = self.tokens.lock().unwrap();
        match token.and_then(|t| tokens.get(t)) {
            Some((d, user)) if *d == domain => Ok(user.clone()),
            _ => Err(error(StatusCode::UNAUTHORIZED, "Token expired")),
        }
    }
}

pub struct MockBackend {
    pub state: Arc<MockState>,
    addr: SocketAddr,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        state.projects.lock().unwrap().extend([
            project_json("1", "Orbit", "beta"),
            project_json("2", "Lumen", "draft"),
        ]);

        let app = Router::new()
            .route(
                "/api/v1/auth/login",
                post(|State(s): State<Arc<MockState>>, Json(b): Json<Value>| async move {
                    login(&s, AuthDomain::Admin, &b)
                }),
            )
            .route(
                "/api/v1/auth/me",
                get(|State(s): State<Arc<MockState>>, h: HeaderMap| async move {
                    me(&s, AuthDomain::Admin, &h)
                }),
            )
            .route(
                "/api/v1/auth/logout",
                post(|State(s): State<Arc<MockState>>, h: HeaderMap| async move {
                    logout(&s, AuthDomain::Admin, &h)
                }),
            )
            .route(
                "/api/v1/influencer-manager/auth/login",
                post(|State(s): State<Arc<MockState>>, Json(b): Json<Value>| async move {
                    login(&s, AuthDomain::InfluencerManager, &b)
                }),
            )
            .route(
                "/api/v1/influencer-manager/auth/me",
                get(|State(s): State<Arc<MockState>>, h: HeaderMap| async move {
                    me(&s, AuthDomain::InfluencerManager, &h)
                }),
            )
            .route(
                "/api/v1/influencer-portal/auth/me",
                get(|State(s): State<Arc<MockState>>, h: HeaderMap| async move {
                    me(&s, AuthDomain::InfluencerPortal, &h)
                }),
            )
            .route("/api/v1/projects", get(list_projects).post(create_project))
            .route(
                "/api/v1/projects/{id}",
                get(get_project).patch(update_project).delete(delete_project),
            )
            .route("/api/v1/beta-testers", get(list_beta_testers))
            .route("/api/v1/beta-testers/invite", post(invite_beta_tester))
            .route("/api/v1/beta-testers/{id}", delete(remove_beta_tester))
            .route("/api/v1/sales/demos", get(list_sales_demos))
            .route("/api/v1/influencer-manager/influencers", get(list_influencers))
            .route("/api/v1/influencer-portal/profile", get(portal_profile))
            .route("/api/v1/health/database", get(database_health))
            .layer(middleware::from_fn_with_state(state.clone(), record))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { state, addr }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

async fn record(State(state): State<Arc<MockState>>, req: Request, next: Next) -> Response {
    let recorded = {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        RecordedRequest {
            method: req.method().to_string(),
            path: req.uri().path().to_string(),
            query: req.uri().query().map(str::to_string),
            authorization: header("authorization"),
            request_id: header("x-request-id"),
        }
    };
    state.requests.lock().unwrap().push(recorded);

    let delay = state.delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
    next.run(req).await
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

fn data(value: Value) -> Response {
    Json(json!({ "data": value })).into_response()
}

fn login(state: &MockState, domain: AuthDomain, body: &Value) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    if body["password"] != PASSWORD {
        return error(StatusCode::UNAUTHORIZED, "Invalid email or password");
    }
    let user = user_json(domain, Some(email));
    let token = state.issue_token_for(domain, user.clone());
    data(json!({ "token": token, "user": user }))
}

fn me(state: &MockState, domain: AuthDomain, headers: &HeaderMap) -> Response {
    match state.authorize(headers, domain) {
        Ok(user) => data(user),
        Err(resp) => resp,
    }
}

fn logout(state: &MockState, domain: AuthDomain, headers: &HeaderMap) -> Response {
    match state.authorize(headers, domain) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(resp) => resp,
    }
}

async fn list_projects(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(resp) = state.authorize(&headers, AuthDomain::Admin) {
        return resp;
    }
    let projects: Vec<Value> = state
        .projects
        .lock()
        .unwrap()
        .iter()
        .filter(|p| params.get("status").is_none_or(|s| p["status"] == s.as_str()))
        .cloned()
        .collect();
    data(Value::Array(projects))
}

async fn get_project(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(resp) = state.authorize(&headers, AuthDomain::Admin) {
        return resp;
    }
    let projects = state.projects.lock().unwrap();
    match projects.iter().find(|p| p["id"] == id.as_str()) {
        Some(project) => data(project.clone()),
        None => error(StatusCode::NOT_FOUND, "Project not found"),
    }
}

async fn create_project(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = state.authorize(&headers, AuthDomain::Admin) {
        return resp;
    }
    let mut projects = state.projects.lock().unwrap();
    let id = (projects.len() + 1).to_string();
    let name = body["name"].as_str().unwrap_or_default();
    let project = project_json(&id, name, "draft");
    projects.push(project.clone());
    (StatusCode::CREATED, Json(json!({ "data": project, "message": "created" }))).into_response()
}

async fn update_project(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = state.authorize(&headers, AuthDomain::Admin) {
        return resp;
    }
    let mut projects = state.projects.lock().unwrap();
    let Some(project) = projects.iter_mut().find(|p| p["id"] == id.as_str()) else {
        return error(StatusCode::NOT_FOUND, "Project not found");
    };
    if let Some(name) = body.get("name") {
        project["name"] = name.clone();
    }
    if let Some(status) = body.get("status") {
        project["status"] = status.clone();
    }
    data(project.clone())
}

async fn delete_project(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(resp) = state.authorize(&headers, AuthDomain::Admin) {
        return resp;
    }
    state.projects.lock().unwrap().retain(|p| p["id"] != id.as_str());
    StatusCode::NO_CONTENT.into_response()
}

async fn list_beta_testers(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if let Err(resp) = state.authorize(&headers, AuthDomain::Admin) {
        return resp;
    }
    data(json!([]))
}

async fn remove_beta_tester(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(resp) = state.authorize(&headers, AuthDomain::Admin) {
        return resp;
    }
    state.removed_beta_testers.lock().unwrap().push(id);
    StatusCode::NO_CONTENT.into_response()
}

async fn invite_beta_tester(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = state.authorize(&headers, AuthDomain::Admin) {
        return resp;
    }
    let email = body["email"].as_str().unwrap_or_default();
    if email.starts_with("taken") {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "message": "Email already invited", "field": "email" })),
        )
            .into_response();
    }
    data(json!({
        "id": 900,
        "projectId": body["projectId"],
        "email": email,
        "reviewStatus": "pending",
        "invitedAt": "2026-03-01T10:00:00Z",
    }))
}

async fn list_sales_demos(Query(params): Query<HashMap<String, String>>) -> Response {
    if params.get("password").map(String::as_str) != Some(SALES_PASSWORD) {
        return error(StatusCode::UNAUTHORIZED, "Invalid sales password");
    }
    data(json!([{
        "id": "d-1",
        "companyName": "Acme",
        "contactName": "Sam",
        "contactEmail": "sam@acme.io",
        "scheduledAt": "2026-03-02T15:00:00Z",
        "status": "scheduled",
    }]))
}

async fn list_influencers(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if let Err(resp) = state.authorize(&headers, AuthDomain::InfluencerManager) {
        return resp;
    }
    data(json!([{ "id": 5, "handle": "@trail", "platform": "youtube", "followers": 12000 }]))
}

async fn portal_profile(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    match state.authorize(&headers, AuthDomain::InfluencerPortal) {
        Ok(user) => data(json!({
            "id": user["id"],
            "handle": "@creator",
            "email": user["email"],
            "platforms": ["tiktok"],
        })),
        Err(resp) => resp,
    }
}

async fn database_health(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if let Err(resp) = state.authorize(&headers, AuthDomain::Admin) {
        return resp;
    }
    // 旧接口，不带 data 包装
    Json(json!({
        "status": "healthy",
        "latencyMs": 3.2,
        "connections": { "active": 4, "idle": 6, "max": 20 },
        "checkedAt": "2026-03-01T10:00:00Z",
    }))
    .into_response()
}

pub fn project_json(id: &str, name: &str, status: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "status": status,
        "createdAt": "2026-01-15T08:30:00Z",
    })
}

pub fn user_json(domain: AuthDomain, email: Option<&str>) -> Value {
    match domain {
        AuthDomain::Admin => {
            let email = email.unwrap_or("admin@example.com");
            let role = if email.starts_with("sales") { "sales" } else { "admin" };
            json!({ "id": 1, "email": email, "role": role, "name": "Ada" })
        }
        AuthDomain::InfluencerManager => json!({
            "id": "im-7",
            "email": email.unwrap_or("manager@example.com"),
            "role": "influencer_manager",
        }),
        AuthDomain::InfluencerPortal => json!({
            "id": 42,
            "email": email.unwrap_or("creator@example.com"),
            "role": "influencer",
        }),
    }
}

pub fn session_user(domain: AuthDomain) -> SessionUser {
    serde_json::from_value(user_json(domain, None)).unwrap()
}

pub fn test_config(backend: &MockBackend) -> Config {
    let mut config = Config::with_base_url(backend.url());
    config.sales_shared_password = Some(SALES_PASSWORD.to_string());
    config
}

pub struct TestApp {
    pub backend: MockBackend,
    pub dashboard: Dashboard,
    pub redirects: Arc<RedirectQueue>,
    pub storage: Arc<MemoryStorage>,
}

impl TestApp {
    /// 与应用共用会话代数的存储句柄
    pub fn store(&self, domain: AuthDomain) -> TokenStore {
        self.dashboard.session(domain).store().clone()
    }

    /// 在后端签发令牌并写入本地存储，模拟之前登录过的会话
    pub fn seed_session(&self, domain: AuthDomain) -> Session {
        let token = self.backend.state.issue_token(domain);
        let session = Session::new(token, session_user(domain));
        self.store(domain).set(&session).unwrap();
        session
    }
}

pub async fn spawn_app() -> TestApp {
    let backend = MockBackend::start().await;
    spawn_app_with(backend, |_| {}).await
}

pub async fn spawn_app_with<F>(backend: MockBackend, configure: F) -> TestApp
where
    F: FnOnce(&mut Config),
{
    let mut config = test_config(&backend);
    configure(&mut config);

    let storage = Arc::new(MemoryStorage::new());
    let redirects = Arc::new(RedirectQueue::new());
    let dashboard = Dashboard::new(config, storage.clone(), redirects.clone()).unwrap();

    TestApp {
        backend,
        dashboard,
        redirects,
        storage,
    }
}
