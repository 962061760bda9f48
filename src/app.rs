use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    let base_path = state.base_path.to_string();
    let routes = Router::new()
        .route("/", get(handlers::index))
        .route("/session/start", post(handlers::start_form))
        .route("/session/resume", post(handlers::resume_form))
        .route("/session/setup", post(handlers::setup_form))
        .route("/session/end", post(handlers::end_form))
        .route("/events", post(handlers::record_form))
        .route("/events/adjust", post(handlers::adjust_form))
        .route("/events/undo", post(handlers::undo_form))
        .route("/timer/toggle", post(handlers::toggle_timer_form))
        .route("/timer/reset", post(handlers::reset_timer_form))
        .route("/api/state", get(handlers::get_state))
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/session", post(handlers::start))
        .route("/api/session/resume", post(handlers::resume))
        .route("/api/session/setup", post(handlers::setup))
        .route("/api/session/end", post(handlers::end))
        .route("/api/events", post(handlers::record))
        .route("/api/events/adjust", post(handlers::adjust))
        .route("/api/events/undo", post(handlers::undo))
        .route("/api/timer/toggle", post(handlers::toggle_timer))
        .route("/api/timer/reset", post(handlers::reset_timer));

    if base_path.is_empty() {
        return routes.with_state(state);
    }

    // A nested "/" only answers the bare prefix; page links and redirects
    // use the trailing-slash form.
    Router::new()
        .route(&format!("{base_path}/"), get(handlers::index))
        .nest(&base_path, routes)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::PersistenceBridge;
    use crate::session::Tracker;
    use reqwest::{Client, StatusCode, redirect::Policy};

    async fn serve(base_path: &str) -> String {
        let state = AppState::new(Tracker::restore(PersistenceBridge::in_memory()), base_path);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(state)).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn prefixed_form_redirect_lands_on_the_page() {
        let origin = serve("/Courtside").await;
        let client = Client::builder().redirect(Policy::none()).build().unwrap();

        let response = client
            .post(format!("{origin}/Courtside/session/start"))
            .form(&[("sport", "Basketball")])
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response.headers()["location"].to_str().unwrap().to_string();
        assert_eq!(location, "/Courtside/");

        for path in [location.as_str(), "/Courtside", "/Courtside/?summary=true"] {
            let page = client.get(format!("{origin}{path}")).send().await.unwrap();
            assert_eq!(page.status(), StatusCode::OK, "GET {path}");
        }

        let state = client
            .get(format!("{origin}/Courtside/api/state"))
            .send()
            .await
            .unwrap();
        assert_eq!(state.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unprefixed_router_serves_root() {
        let origin = serve("").await;
        let page = Client::new().get(format!("{origin}/")).send().await.unwrap();
        assert_eq!(page.status(), StatusCode::OK);
    }
}
