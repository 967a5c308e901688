//! Defines the endpoint for creating a new record.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    record::{
        amount::parse_amount,
        core::create_record,
        records_page::{Flash, records_page_url},
    },
    timezone::current_local_date,
};

/// The state needed to create a record.
#[derive(Debug, Clone)]
pub struct CreateRecordState {
    /// The database connection for managing records.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateRecordState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The form data for creating a record.
#[derive(Debug, Deserialize)]
pub struct RecordForm {
    /// The monetary value as entered, e.g. "1234,56".
    pub value: String,
    /// The date of the record. Defaults to today when left empty.
    #[serde(default)]
    pub date: Option<Date>,
}

/// A route handler for creating a new record.
///
/// On success, redirects to the records page filtered to the new record's
/// year and month, with a confirmation flash. On an empty or invalid value,
/// renders a validation alert and writes nothing.
pub async fn create_record_endpoint(
    State(state): State<CreateRecordState>,
    Form(form): Form<RecordForm>,
) -> Response {
    let value = match parse_amount(&form.value) {
        Ok(value) => value,
        Err(error) => return error.into_alert_response(),
    };

    let date = match form.date {
        Some(date) => date,
        None => match current_local_date(&state.local_timezone) {
            Ok(today) => today,
            Err(error) => return error.into_response(),
        },
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match create_record(value, date, &connection) {
        Ok(record) => {
            let url = records_page_url(record.date.year(), record.date.month(), Some(Flash::Added));
            (HxRedirect(url), StatusCode::SEE_OTHER).into_response()
        }
        Err(error) => error.into_response(),
    }
}
