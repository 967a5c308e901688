//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState, endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    record::{create_record_endpoint, delete_records_endpoint, get_records_page},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::RECORDS_VIEW, get(get_records_page))
        .route(endpoints::RECORDS_API, post(create_record_endpoint))
        .route(endpoints::DELETE_RECORDS_API, post(delete_records_endpoint))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the records page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::RECORDS_VIEW)
}

#[cfg(test)]
mod root_route_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::{endpoints, routing::get_index_page};

    #[tokio::test]
    async fn root_redirects_to_records() {
        let response = get_index_page().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::RECORDS_VIEW);
    }
}

#[cfg(test)]
mod router_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;

    use crate::{AppState, build_router};

    fn get_test_server() -> TestServer {
        let conn = Connection::open_in_memory().unwrap();
        let state = AppState::new(conn, "Etc/UTC").unwrap();

        TestServer::new(build_router(state))
    }

    #[tokio::test]
    async fn unknown_route_renders_not_found_page() {
        let server = get_test_server();

        let response = server.get("/unknown").await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn add_then_remove_record_resets_totals() {
        let server = get_test_server();

        // Add a record for April 2023.
        let response = server
            .post("/api/records")
            .form(&[("value", "100,50"), ("date", "2023-04-15")])
            .await;
        response.assert_status_see_other();
        let redirect = response
            .headers()
            .get("hx-redirect")
            .expect("expected the header hx-redirect")
            .to_str()
            .unwrap()
            .to_owned();
        assert_eq!(redirect, "/records?year=2023&month=4&flash=added");

        // The refreshed page lists the record and its total.
        let page = server.get(&redirect).await.text();
        assert!(page.contains("15/04/2023"), "got {page}");
        assert!(page.contains("Total: R$ 100,50"), "got {page}");
        assert!(page.contains("Registro Adicionado"), "got {page}");

        // Remove it again. The first record always has ID 1.
        let response = server
            .post("/api/records/delete")
            .form(&[("record_id", "1"), ("year", "2023"), ("month", "4")])
            .await;
        response.assert_status_see_other();

        let page = server.get("/records?year=2023&month=4&flash=removed").await.text();
        assert!(page.contains("Total: R$ 0,00"), "got {page}");
        assert!(page.contains("empty-placeholder"), "got {page}");
        assert!(page.contains("Registro Removido"), "got {page}");
    }

    #[tokio::test]
    async fn out_of_range_month_filter_still_renders_page() {
        let server = get_test_server();

        let response = server.get("/records?year=2023&month=999").await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn empty_amount_is_rejected_with_validation_message() {
        let server = get_test_server();

        let response = server
            .post("/api/records")
            .form(&[("value", ""), ("date", "")])
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body = response.text();
        assert!(body.contains("Informe um valor"), "got {body}");
    }
}
