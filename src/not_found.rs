//! Defines the template and route handler for the 404 page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::html::error_view;

pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

pub fn get_404_not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        error_view(
            "Página Não Encontrada",
            "404",
            "Esta página não existe.",
            "Verifique o endereço ou volte para a página inicial.",
        ),
    )
        .into_response()
}
