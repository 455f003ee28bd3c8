//! Local HTTP front end: the planner's operations as JSON endpoints plus an
//! embedded page that calls them.

mod handlers;
mod state;
mod static_files;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::llm::ChatModel;
use crate::places::PlacesApi;
use crate::planner::TripPlanner;
pub use state::AppState;

pub fn build_router<P, M>(planner: TripPlanner<P, M>) -> Router
where
    P: PlacesApi + Send + 'static,
    M: ChatModel + Send + 'static,
{
    let state = Arc::new(AppState::new(planner));

    Router::new()
        .route("/", get(handlers::index))
        .route("/app.js", get(handlers::script))
        .route("/health", get(handlers::health))
        .route("/api/country", post(handlers::set_country::<P, M>))
        .route("/api/city", post(handlers::set_city::<P, M>))
        .route("/api/date", post(handlers::set_date::<P, M>))
        .route("/api/hostels", get(handlers::hostels::<P, M>))
        .route("/api/hostels/{hostel}/restaurants", get(handlers::restaurants::<P, M>))
        .route(
            "/api/hostels/{hostel}/restaurants/{restaurant}/menu",
            get(handlers::menu::<P, M>),
        )
        .route("/api/stats", get(handlers::stats::<P, M>))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start<P, M>(planner: TripPlanner<P, M>, host: &str, port: u16) -> anyhow::Result<()>
where
    P: PlacesApi + Send + 'static,
    M: ChatModel + Send + 'static,
{
    use anyhow::Context;

    let app = build_router(planner);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Cannot bind to {}", addr))?;

    info!("School Tripper listening on http://{}", addr);
    eprintln!("  Press Ctrl+C to stop.");

    axum::serve(listener, app).await.context("Server error")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::SearchLimits;
    use crate::testing::{record, FakeChat, FakePlaces};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn router() -> (Router, Arc<FakePlaces>, Arc<FakeChat>) {
        let places = Arc::new(
            FakePlaces::new()
                .respond("restaurant near Wombat's", vec![record("Frici Papa", Some(4.4))])
                .respond("hotel in Budapest, Hungary", vec![record("Wombat's", Some(4.5))])
                .respond("hungary", vec![record("Hungary", None)])
                .respond("budapest", vec![record("Budapest", None)]),
        );
        let chat = Arc::new(
            FakeChat::new()
                .reply("Wombat's", "6500Ft")
                .reply("Frici Papa", "1. Carbonara;3400Ft\n2. Gulyás;2600Ft"),
        );
        let planner = TripPlanner::new(places.clone(), chat.clone(), SearchLimits::default());
        (build_router(planner), places, chat)
    }

    async fn call(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, serde_json::Value) {
        let mut req = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(b) => {
                req = req.header("content-type", "application/json");
                Body::from(b.to_string())
            }
            None => Body::empty(),
        };
        let resp = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_health_and_index() {
        let (app, _, _) = router();
        let (status, _) = call(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);

        let resp = app
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_full_flow() {
        let (app, places, chat) = router();

        let (_, v) = call(&app, "POST", "/api/country", Some(r#"{"value":"hungary"}"#)).await;
        assert_eq!(v["country"], "Hungary");
        let (_, v) = call(&app, "POST", "/api/city", Some(r#"{"value":"budapest"}"#)).await;
        assert_eq!(v["city"], "Budapest");
        let (_, v) = call(&app, "POST", "/api/date", Some(r#"{"value":"2026-05-14"}"#)).await;
        assert_eq!(v["date"], "2026-05-14");

        let (status, v) = call(&app, "GET", "/api/hostels", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["names"][0], "Wombat's");
        assert_eq!(v["prices"][0], "6500Ft");

        let (_, v) = call(&app, "GET", "/api/hostels/0/restaurants", None).await;
        assert_eq!(v[0]["name"], "Frici Papa");

        let (_, v) = call(&app, "GET", "/api/hostels/0/restaurants/0/menu", None).await;
        assert_eq!(v.as_array().unwrap().len(), 5);
        assert_eq!(v[1]["name"], "Gulyás");
        assert_eq!(v[4]["name"], "Nem találhatóak az adatok.");

        let searches = places.calls();
        let completions = chat.calls();
        call(&app, "GET", "/api/hostels/0/restaurants/0/menu", None).await;
        assert_eq!(places.calls(), searches);
        assert_eq!(chat.calls(), completions);

        let (_, v) = call(&app, "GET", "/api/stats", None).await;
        assert_eq!(v["menus"]["hits"], 1);
    }

    #[tokio::test]
    async fn test_out_of_range_menu() {
        let (app, _, _) = router();
        let (status, v) = call(&app, "GET", "/api/hostels/3/restaurants/9/menu", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v.as_array().unwrap().len(), 5);
        assert_eq!(v[0]["price"], "");
    }

    #[tokio::test]
    async fn test_bad_index_rejected() {
        let (app, _, _) = router();
        let (status, _) = call(&app, "GET", "/api/hostels/abc/restaurants", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
