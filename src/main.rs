use axum::{
    routing::{get, post, put},
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod config;
mod db;
mod dto;
mod error;
mod handlers;
mod models;
mod quotes;
mod repository;
mod services;

use config::Config;
use quotes::{QuotableClient, QuoteSource};
use repository::{MoodRepository, QuoteRepository, SqliteMoodRepository, SqliteQuoteRepository};

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub moods: Arc<dyn MoodRepository>,
    pub quotes: Arc<dyn QuoteRepository>,
}

impl AppState {
    pub fn new(db: SqlitePool, source: Option<Arc<dyn QuoteSource>>) -> Self {
        Self {
            moods: Arc::new(SqliteMoodRepository::new(db.clone())),
            quotes: Arc::new(SqliteQuoteRepository::new(db.clone(), source)),
            db,
        }
    }
}

fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz));

    let api_routes = Router::new()
        .route("/api/mood-levels", get(handlers::moods::list_mood_levels))
        // Moods
        .route(
            "/api/moods",
            get(handlers::moods::list_moods).post(handlers::moods::create_mood),
        )
        .route("/api/moods/summary", get(handlers::moods::get_mood_summary))
        .route("/api/moods/date/:date", get(handlers::moods::get_mood_by_date))
        .route(
            "/api/moods/:id",
            put(handlers::moods::update_mood).delete(handlers::moods::delete_mood),
        )
        // Quotes
        .route("/api/quotes", get(handlers::quotes::list_quotes))
        .route("/api/quotes/today", get(handlers::quotes::quote_of_the_day))
        .route(
            "/api/quotes/favorites",
            get(handlers::quotes::list_favorite_quotes),
        )
        .route("/api/quotes/:id", get(handlers::quotes::get_quote))
        .route(
            "/api/quotes/:id/favorite",
            post(handlers::quotes::toggle_favorite),
        );

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let mut origins = vec![config.frontend_url.parse::<axum::http::HeaderValue>()?];
    for origin in &config.cors_extra_origins {
        match origin.parse::<axum::http::HeaderValue>() {
            Ok(hv) => origins.push(hv),
            Err(_) => tracing::warn!(origin = %origin, "Ignoring invalid CORS origin"),
        }
    }

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ]))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mindfulme_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env());

    // Database
    let db = db::create_pool(&config.database_url, config.database_max_connections).await?;
    db::run_migrations(&db).await?;
    tracing::info!("Database migrations applied");

    let source: Option<Arc<dyn QuoteSource>> = if config.quote_api_enabled {
        let client = QuotableClient::new(
            &config.quote_api_url,
            Duration::from_secs(config.quote_api_timeout_secs),
        )?;
        tracing::info!(url = %config.quote_api_url, "Remote quote source enabled");
        Some(Arc::new(client))
    } else {
        tracing::info!("Remote quote source disabled, serving bundled quotes");
        None
    };

    let state = AppState::new(db, source);
    let app = build_router(state).layer(cors_layer(&config)?);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn test_app() -> Router {
        build_router(AppState::new(db::test_pool().await, None))
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app().await;
        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], "mindfulme-api");

        let (status, body) = send(&app, "GET", "/readyz", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["checks"]["database"], "ok");
    }

    #[tokio::test]
    async fn test_mood_levels_listed_in_order() {
        let app = test_app().await;
        let (status, body) = send(&app, "GET", "/api/mood-levels", None).await;
        assert_eq!(status, StatusCode::OK);
        let values: Vec<i64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|l| l["value"].as_i64().unwrap())
            .collect();
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_create_and_fetch_mood_by_date() {
        let app = test_app().await;
        let (status, created) = send(
            &app,
            "POST",
            "/api/moods",
            Some(json!({ "date": "2024-01-15", "mood_level": 4, "note": "sunny walk" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(created["id"].as_i64().unwrap() > 0);

        let (status, found) = send(&app, "GET", "/api/moods/date/2024-01-15", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(found["mood_level"], 4);
        assert_eq!(found["note"], "sunny walk");

        let (status, body) = send(&app, "GET", "/api/moods/date/2024-01-16", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], 404);
    }

    #[tokio::test]
    async fn test_create_mood_rejects_invalid_level() {
        let app = test_app().await;
        let (status, body) = send(
            &app,
            "POST",
            "/api/moods",
            Some(json!({ "date": "2024-01-15", "mood_level": 9 })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["message"], "Mood level must be 1-5");
    }

    #[tokio::test]
    async fn test_list_moods_by_range() {
        let app = test_app().await;
        for date in ["2024-01-01", "2024-01-15", "2024-02-01"] {
            send(
                &app,
                "POST",
                "/api/moods",
                Some(json!({ "date": date, "mood_level": 3 })),
            )
            .await;
        }

        let (status, body) = send(
            &app,
            "GET",
            "/api/moods?start_date=2024-01-01&end_date=2024-01-31",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let dates: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["date"].as_str().unwrap())
            .collect();
        assert_eq!(dates, vec!["2024-01-01", "2024-01-15"]);

        let (status, body) = send(&app, "GET", "/api/moods", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 3);

        let (status, _) = send(&app, "GET", "/api/moods?start_date=2024-01-01", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_update_and_delete_mood() {
        let app = test_app().await;
        let (_, created) = send(
            &app,
            "POST",
            "/api/moods",
            Some(json!({ "date": "2024-03-03", "mood_level": 2 })),
        )
        .await;
        let id = created["id"].as_i64().unwrap();

        let (status, updated) = send(
            &app,
            "PUT",
            &format!("/api/moods/{}", id),
            Some(json!({ "mood_level": 5, "note": "good news" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["id"], id);
        assert_eq!(updated["mood_level"], 5);
        assert_eq!(updated["note"], "good news");

        let (status, body) = send(&app, "DELETE", &format!("/api/moods/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["deleted"], true);

        let (status, _) = send(&app, "DELETE", &format!("/api/moods/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_mood_summary_over_explicit_range() {
        let app = test_app().await;
        for (date, level) in [("2024-05-01", 2), ("2024-05-02", 4), ("2024-05-03", 4)] {
            send(
                &app,
                "POST",
                "/api/moods",
                Some(json!({ "date": date, "mood_level": level })),
            )
            .await;
        }

        let (status, body) = send(
            &app,
            "GET",
            "/api/moods/summary?start_date=2024-05-01&end_date=2024-05-03",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_entries"], 3);
        assert_eq!(body["dominant_level"], 4);
        assert_eq!(body["longest_streak"], 3);
        assert_eq!(body["current_streak"], 3);
    }

    #[tokio::test]
    async fn test_quote_of_the_day_and_favorite_toggle() {
        let app = test_app().await;
        let (status, quote) = send(&app, "GET", "/api/quotes/today", None).await;
        assert_eq!(status, StatusCode::OK);
        let id = quote["id"].as_str().unwrap().to_string();

        let (_, again) = send(&app, "GET", "/api/quotes/today", None).await;
        assert_eq!(again["id"], id.as_str());

        let (status, toggled) =
            send(&app, "POST", &format!("/api/quotes/{}/favorite", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(toggled["is_favorite"], true);

        let (_, favorites) = send(&app, "GET", "/api/quotes/favorites", None).await;
        assert_eq!(favorites.as_array().unwrap().len(), 1);

        let (status, fetched) = send(&app, "GET", &format!("/api/quotes/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["is_favorite"], true);
    }

    #[tokio::test]
    async fn test_unknown_quote_is_not_found() {
        let app = test_app().await;
        let (status, _) = send(&app, "GET", "/api/quotes/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "POST", "/api/quotes/nope/favorite", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_dates_beyond_year_9999_are_rejected() {
        let app = test_app().await;
        let (status, body) = send(
            &app,
            "POST",
            "/api/moods",
            Some(json!({ "date": "+10000-01-01", "mood_level": 3 })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], 422);

        let (status, body) =
            send(&app, "GET", "/api/moods/date/%2B10000-01-01", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], 422);

        let (status, _) = send(
            &app,
            "GET",
            "/api/moods?start_date=2024-01-01&end_date=%2B10000-12-31",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (_, all) = send(&app, "GET", "/api/moods", None).await;
        assert!(all.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_summary_before_year_one_is_rejected() {
        let app = test_app().await;
        let (status, body) =
            send(&app, "GET", "/api/moods/summary?end_date=-262143-01-01", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], 422);

        let (status, body) =
            send(&app, "GET", "/api/moods/summary?end_date=0001-01-01", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_entries"], 0);
    }

    #[tokio::test]
    async fn test_malformed_dates_use_error_envelope() {
        let app = test_app().await;
        let (status, body) = send(&app, "GET", "/api/moods/date/not-a-date", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], 422);
        assert!(body["error"]["message"].is_string());

        let (status, body) = send(
            &app,
            "GET",
            "/api/moods?start_date=bad&end_date=bad",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], 422);

        let (status, body) = send(&app, "DELETE", "/api/moods/abc", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], 422);
    }

    #[tokio::test]
    async fn test_cors_allows_configured_extra_origin() {
        let config = Config {
            database_url: "sqlite::memory:".into(),
            database_max_connections: 1,
            host: "127.0.0.1".into(),
            port: 0,
            frontend_url: "http://localhost:3000".into(),
            cors_extra_origins: vec!["http://phone.local:3000".into()],
            quote_api_url: "http://localhost:9".into(),
            quote_api_enabled: false,
            quote_api_timeout_secs: 1,
        };
        let app = test_app().await.layer(cors_layer(&config).unwrap());

        let request = Request::builder()
            .method("OPTIONS")
            .uri("/api/moods")
            .header("origin", "http://phone.local:3000")
            .header("access-control-request-method", "GET")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "http://phone.local:3000"
        );
    }
}
