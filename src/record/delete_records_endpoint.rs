//! Defines the endpoint for deleting the records selected in the table.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since it collects repeated checkbox fields into
// a Vec and parses an empty string as None instead of crashing like
// axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;
use time::Month;

use crate::{
    AppState, Error, endpoints,
    record::{
        core::{RecordId, delete_record},
        records_page::{Flash, records_page_url},
    },
};

/// The state needed to delete records.
#[derive(Debug, Clone)]
pub struct DeleteRecordsState {
    /// The database connection for managing records.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteRecordsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The form data for deleting records: the checked row IDs plus the current
/// filter, carried in hidden inputs so the redirect can preserve it.
#[derive(Debug, Deserialize)]
pub struct DeleteRecordsForm {
    /// The IDs of the checked table rows.
    #[serde(default)]
    pub record_id: Vec<RecordId>,
    /// The year filter on the page the form was submitted from.
    pub year: Option<i32>,
    /// The month filter on the page the form was submitted from.
    pub month: Option<u8>,
}

/// A route handler for deleting the selected records.
///
/// Each ID is deleted by primary key; IDs that no longer resolve are silently
/// skipped. Redirects back to the records page with the submitted filter and,
/// when anything was deleted, a confirmation flash.
pub async fn delete_records_endpoint(
    State(state): State<DeleteRecordsState>,
    Form(form): Form<DeleteRecordsForm>,
) -> Response {
    let mut deleted = 0;

    {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Error::DatabaseLockError.into_response();
            }
        };

        for record_id in &form.record_id {
            match delete_record(*record_id, &connection) {
                Ok(0) => {
                    tracing::debug!("record {record_id} was already deleted, skipping");
                }
                Ok(_) => deleted += 1,
                Err(error) => {
                    tracing::error!("could not delete record {record_id}: {error}");
                    return error.into_response();
                }
            }
        }
    }

    let flash = (deleted > 0).then_some(Flash::Removed);
    let url = match (form.year, form.month.and_then(|number| Month::try_from(number).ok())) {
        (Some(year), Some(month)) => records_page_url(year, month, flash),
        _ => endpoints::RECORDS_VIEW.to_owned(),
    };

    (HxRedirect(url), StatusCode::SEE_OTHER).into_response()
}
