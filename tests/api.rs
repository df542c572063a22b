use std::{collections::HashSet, sync::Arc};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use party_draw_back::{
    config::AppConfig,
    dao::{
        game_store::{GameStore, memory::MemoryGameStore},
        seed::SAMPLE_ADMIN_OPENID,
    },
    routes,
    state::AppState,
};

async fn app(store: MemoryGameStore) -> Router {
    let config = AppConfig {
        uploads_dir: std::env::temp_dir().join("party-draw-api-tests"),
        ..AppConfig::default()
    };
    let state = AppState::with_store(config, Arc::new(store) as Arc<dyn GameStore>).await;
    routes::router(state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn login(app: &Router) -> String {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/admin/login",
            None,
            json!({ "openid": SAMPLE_ADMIN_OPENID }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_owned()
}

fn names(body: &Value) -> HashSet<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|game| game["name"].as_str().unwrap().to_owned())
        .collect()
}

#[tokio::test]
async fn random_on_empty_catalog_is_not_found() {
    let app = app(MemoryGameStore::new()).await;

    let (status, body) = send(&app, get("/api/games/random")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "no eligible records" }));
}

#[tokio::test]
async fn player_count_filters_list_and_draw() {
    let app = app(MemoryGameStore::seeded()).await;
    let expected: HashSet<String> = ["狼人杀", "阿瓦隆", "剧本杀", "德州扑克"]
        .into_iter()
        .map(str::to_owned)
        .collect();

    let (status, body) = send(&app, get("/api/games?playerCount=7")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), expected);

    for _ in 0..20 {
        let (status, body) = send(&app, get("/api/games/random?playerCount=7")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(expected.contains(body["name"].as_str().unwrap()));
        assert!(body["playerCount"]["min"].as_u64().unwrap() <= 7);
        assert!(body["playerCount"]["max"].as_u64().unwrap() >= 7);
    }

    let (status, body) = send(&app, get("/api/games?playerCount=40")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));

    let (status, _) = send(&app, get("/api/games/random?playerCount=40")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_queries_and_ids_are_rejected() {
    let app = app(MemoryGameStore::seeded()).await;

    let (status, _) = send(&app, get("/api/games/random?playerCount=abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, get("/api/games/not-a-uuid")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        get("/api/games/00000000-0000-0000-0000-000000000000"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "game not found" }));
}

#[tokio::test]
async fn mutations_require_an_admin_token() {
    let app = app(MemoryGameStore::seeded()).await;
    let game = json!({
        "name": "新游戏",
        "description": "测试",
        "playerCount": { "min": 2, "max": 4 }
    });

    let (status, _) = send(&app, json_request("POST", "/api/games", None, game.clone())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        json_request("POST", "/api/games", Some("not-a-token"), game),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/admin/login",
            None,
            json!({ "openid": "someone-else" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_manages_the_catalog() {
    let app = app(MemoryGameStore::seeded()).await;
    let token = login(&app).await;

    let (status, body) = send(&app, {
        let mut request = get("/api/admin/check");
        request.headers_mut().insert(
            header::AUTHORIZATION,
            format!("Bearer {token}").parse().unwrap(),
        );
        request
    })
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["admin"]["openid"], SAMPLE_ADMIN_OPENID);

    let (status, created) = send(
        &app,
        json_request(
            "POST",
            "/api/games",
            Some(&token),
            json!({
                "name": "  骰子派对 ",
                "description": "掷骰子比大小",
                "playerCount": { "min": 3, "max": 30, "optimal": [6] },
                "tags": ["骰子", " 骰子 ", ""]
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], "active");
    assert_eq!(created["tags"], json!(["骰子"]));
    let id = created["id"].as_str().unwrap().to_owned();

    let (status, body) = send(&app, get("/api/games/random?playerCount=25")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.as_str());

    let (status, updated) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/games/{id}"),
            Some(&token),
            json!({
                "name": "骰子派对",
                "description": "掷骰子比大小",
                "playerCount": { "min": 3, "max": 30 },
                "status": "inactive"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let (status, _) = send(&app, get("/api/games/random?playerCount=25")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        json_request("DELETE", &format!("/api/games/{id}"), Some(&token), json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "deleted" }));

    let (status, _) = send(&app, get(&format!("/api/games/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_player_range_is_rejected() {
    let app = app(MemoryGameStore::seeded()).await;
    let token = login(&app).await;

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/games",
            Some(&token),
            json!({
                "name": "反了",
                "description": "最小大于最大",
                "playerCount": { "min": 8, "max": 2 }
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_reports_ok_with_a_store() {
    let app = app(MemoryGameStore::new()).await;
    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn openapi_document_lists_the_catalog_routes() {
    let app = app(MemoryGameStore::new()).await;
    let (status, body) = send(&app, get(routes::docs::OPENAPI_JSON_PATH)).await;
    assert_eq!(status, StatusCode::OK);
    for path in ["/api/games", "/api/games/random", "/api/games/{id}", "/api/admin/login"] {
        assert!(body["paths"].get(path).is_some(), "missing {path}");
    }
    assert!(body["components"]["securitySchemes"].get("bearer").is_some());
}
