//! Caderneta is a self-hosted web app for recording and reviewing personal
//! financial records.
//!
//! Each record is a monetary value and a calendar date. The app serves a
//! single page with a form for adding records, a table filtered by year and
//! month, and the total plus average-per-day for the filtered rows.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod config;
mod db;
mod endpoints;
mod html;
mod internal_server_error;
mod not_found;
mod record;
mod routing;
mod state;
mod timezone;

pub use config::Config;
pub use db::initialize as initialize_db;
pub use routing::build_router;
pub use state::AppState;

use crate::{
    alert::Alert, html::render, internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The amount field of the record form was submitted empty.
    #[error("no amount was entered")]
    EmptyAmount,

    /// The amount field of the record form did not match the accepted
    /// monetary format: digits, optionally followed by a comma or period and
    /// exactly two decimal digits.
    #[error("\"{0}\" is not a valid monetary amount")]
    InvalidAmount(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// The configuration file could not be read or parsed.
    #[error("could not load the configuration file: {0}")]
    ConfigError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Fuso horário inválido",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check the timezone field in \
                    the configuration file and ensure it is a valid, canonical timezone string."
                ),
            }
            .into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::EmptyAmount => render(
                StatusCode::UNPROCESSABLE_ENTITY,
                Alert::error("Valor em branco", "Informe um valor para o registro.").into_html(),
            ),
            Error::InvalidAmount(value) => render(
                StatusCode::UNPROCESSABLE_ENTITY,
                Alert::error(
                    "Valor inválido",
                    &format!(
                        "O valor \"{value}\" não é um valor monetário válido. \
                        Use apenas dígitos, com centavos opcionais: 1234 ou 1234,56."
                    ),
                )
                .into_html(),
            ),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                render(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Alert::error(
                        "Algo deu errado",
                        "Ocorreu um erro inesperado. Verifique os logs do servidor.",
                    )
                    .into_html(),
                )
            }
        }
    }
}
