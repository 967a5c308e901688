//! Defines the route handler for the page that displays records as a table.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::Response,
};
use rusqlite::Connection;
use serde::Deserialize;
use time::{Date, Month};

use crate::{
    AppState, Error, endpoints,
    html::render,
    record::{
        core::{Record, get_all_records},
        summary::{
            average_per_day, distinct_years, filter_by_year_month, months_for_year, total,
        },
        view::records_view,
    },
    timezone::current_local_date,
};

/// A confirmation message carried across the redirect that follows a
/// successful submission or removal.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(super) enum Flash {
    Added,
    Removed,
}

impl Flash {
    pub(super) fn as_query_value(self) -> &'static str {
        match self {
            Flash::Added => "added",
            Flash::Removed => "removed",
        }
    }

    pub(super) fn message(self) -> &'static str {
        match self {
            Flash::Added => "Registro Adicionado",
            Flash::Removed => "Registro Removido",
        }
    }
}

/// The query parameters of the records page.
#[derive(Debug, Default, Deserialize)]
pub struct RecordsQuery {
    /// The year filter. Defaults to the current year.
    year: Option<i32>,
    /// The month filter as a calendar number (1-12). Defaults to the current
    /// month. Out-of-range values, including ones that do not fit a month
    /// number at all, fall back to the default.
    month: Option<i64>,
    /// The confirmation message to show, if any.
    flash: Option<Flash>,
}

/// The URL of the records page filtered to (`year`, `month`).
pub(super) fn records_page_url(year: i32, month: Month, flash: Option<Flash>) -> String {
    let mut url = format!(
        "{}?year={year}&month={}",
        endpoints::RECORDS_VIEW,
        u8::from(month)
    );

    if let Some(flash) = flash {
        url.push_str("&flash=");
        url.push_str(flash.as_query_value());
    }

    url
}

/// The state needed for the records page.
#[derive(Debug, Clone)]
pub struct RecordsPageState {
    /// The database connection for reading records.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,
}

impl FromRef<AppState> for RecordsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Everything the records page template needs.
pub(super) struct RecordsViewModel {
    /// The years available in the year filter, ascending.
    pub(super) years: Vec<i32>,
    /// The currently selected year.
    pub(super) selected_year: i32,
    /// The months available in the month filter, in calendar order.
    pub(super) months: Vec<Month>,
    /// The currently selected month.
    pub(super) selected_month: Month,
    /// The records matching the filter, sorted ascending by date.
    pub(super) rows: Vec<Record>,
    /// The sum of the filtered values.
    pub(super) total: f64,
    /// The filtered total divided by the current day-of-month.
    pub(super) average: f64,
    /// Today's date, used as the default for the date input.
    pub(super) today: Date,
    /// The confirmation message to show, if any.
    pub(super) flash: Option<Flash>,
}

/// Render the records page: the entry form, the (year, month) filter, the
/// table of matching records and their total and average-per-day.
pub async fn get_records_page(
    State(state): State<RecordsPageState>,
    Query(query): Query<RecordsQuery>,
) -> Result<Response, Error> {
    let today = current_local_date(&state.local_timezone)?;

    let records = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_all_records(&connection)
            .inspect_err(|error| tracing::error!("could not get records: {error}"))?
    };

    let model = build_records_view_model(&records, &query, today);

    Ok(render(StatusCode::OK, records_view(&model)))
}

fn build_records_view_model(
    records: &[Record],
    query: &RecordsQuery,
    today: Date,
) -> RecordsViewModel {
    let selected_year = query.year.unwrap_or_else(|| today.year());
    let selected_month = query
        .month
        .and_then(|number| u8::try_from(number).ok())
        .and_then(|number| Month::try_from(number).ok())
        .unwrap_or_else(|| today.month());

    // The filter options are the years and months with records, but they must
    // always include the selection itself so the select elements render it.
    let mut years = distinct_years(records);
    if !years.contains(&selected_year) {
        years.push(selected_year);
        years.sort_unstable();
    }

    let mut months = months_for_year(records, selected_year);
    if !months.contains(&selected_month) {
        months.push(selected_month);
        months.sort_by_key(|month| u8::from(*month));
    }

    let rows = filter_by_year_month(records, selected_year, selected_month);
    let total = total(&rows);
    let average = average_per_day(&rows, today.day());

    RecordsViewModel {
        years,
        selected_year,
        months,
        selected_month,
        rows,
        total,
        average,
        today,
        flash: query.flash,
    }
}

#[cfg(test)]
mod view_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        body::Body,
        extract::{Query, State},
        http::{Response, StatusCode},
    };
    use rusqlite::Connection;
    use scraper::{ElementRef, Html, Selector};
    use time::{OffsetDateTime, macros::date};

    use crate::{
        db::initialize,
        record::{core::create_record, records_page::RecordsQuery, summary::month_name},
    };

    use super::{Flash, RecordsPageState, get_records_page, records_page_url};

    fn get_test_state() -> RecordsPageState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        RecordsPageState {
            db_connection: Arc::new(Mutex::new(conn)),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    fn query(year: i32, month: i64) -> Query<RecordsQuery> {
        Query(RecordsQuery {
            year: Some(year),
            month: Some(month),
            flash: None,
        })
    }

    async fn parse_html(response: Response<Body>) -> Html {
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Could not get response body");
        let text = String::from_utf8_lossy(&body).to_string();

        Html::parse_document(&text)
    }

    fn select_texts(document: &Html, selector: &str) -> Vec<String> {
        let selector = Selector::parse(selector).unwrap();
        document
            .select(&selector)
            .map(|element| element.text().collect::<String>().trim().to_owned())
            .collect()
    }

    #[track_caller]
    fn assert_label(document: &Html, id: &str, want: &str) {
        let texts = select_texts(document, &format!("#{id}"));
        assert_eq!(texts.len(), 1, "want exactly one #{id} element");
        assert_eq!(texts[0], want);
    }

    #[tokio::test]
    async fn empty_database_renders_placeholder_and_zero_totals() {
        let state = get_test_state();

        let response = get_records_page(State(state), Query(RecordsQuery::default()))
            .await
            .unwrap();

        let document = parse_html(response).await;
        let placeholder = select_texts(&document, "tbody tr.empty-placeholder");
        assert_eq!(placeholder.len(), 1, "want one placeholder row");
        assert_label(&document, "total-label", "Total: R$ 0,00");
        assert_label(&document, "average-label", "Média: R$ 0,00");
    }

    #[tokio::test]
    async fn filtered_rows_are_sorted_ascending_by_date() {
        let state = get_test_state();
        {
            let conn = state.db_connection.lock().unwrap();
            create_record(100.50, date!(2023 - 04 - 15), &conn).unwrap();
            create_record(25.0, date!(2023 - 04 - 12), &conn).unwrap();
            create_record(99.0, date!(2023 - 05 - 01), &conn).unwrap();
        }

        let response = get_records_page(State(state), query(2023, 4)).await.unwrap();

        let document = parse_html(response).await;
        let dates = select_texts(&document, "tbody tr td.record-date");
        assert_eq!(dates, vec!["12/04/2023", "15/04/2023"]);
        let values = select_texts(&document, "tbody tr td.record-value");
        assert_eq!(values, vec!["R$ 25,00", "R$ 100,50"]);
    }

    #[tokio::test]
    async fn totals_cover_only_the_filtered_rows() {
        let state = get_test_state();
        {
            let conn = state.db_connection.lock().unwrap();
            create_record(100.50, date!(2023 - 04 - 15), &conn).unwrap();
            create_record(57.0, date!(2023 - 04 - 12), &conn).unwrap();
            create_record(1000.0, date!(2022 - 04 - 12), &conn).unwrap();
        }

        let response = get_records_page(State(state), query(2023, 4)).await.unwrap();

        let document = parse_html(response).await;
        assert_label(&document, "total-label", "Total: R$ 157,50");

        let day_of_month = OffsetDateTime::now_utc().date().day();
        let want_average = 157.50 / f64::from(day_of_month);
        assert_label(
            &document,
            "average-label",
            &format!("Média: {}", crate::html::format_currency(want_average)),
        );
    }

    #[tokio::test]
    async fn filter_options_list_years_and_months_with_records() {
        let state = get_test_state();
        {
            let conn = state.db_connection.lock().unwrap();
            create_record(25.0, date!(2023 - 12 - 12), &conn).unwrap();
            create_record(30.0, date!(2023 - 04 - 01), &conn).unwrap();
            create_record(45.0, date!(2022 - 01 - 01), &conn).unwrap();
        }

        let response = get_records_page(State(state), query(2023, 12)).await.unwrap();

        let document = parse_html(response).await;
        let years = select_texts(&document, "select[name=year] option");
        assert_eq!(years, vec!["2022", "2023"]);
        let months = select_texts(&document, "select[name=month] option");
        assert_eq!(months, vec!["Abril", "Dezembro"]);
        assert_selected_option(&document, "select[name=month]", "Dezembro");
    }

    #[tokio::test]
    async fn selection_without_records_is_still_listed() {
        let state = get_test_state();
        {
            let conn = state.db_connection.lock().unwrap();
            create_record(25.0, date!(2023 - 12 - 12), &conn).unwrap();
        }

        let response = get_records_page(State(state), query(2024, 2)).await.unwrap();

        let document = parse_html(response).await;
        let years = select_texts(&document, "select[name=year] option");
        assert_eq!(years, vec!["2023", "2024"]);
        let months = select_texts(&document, "select[name=month] option");
        assert_eq!(months, vec!["Fevereiro"]);
    }

    #[tokio::test]
    async fn flash_parameter_renders_confirmation_alert() {
        let state = get_test_state();

        let response = get_records_page(
            State(state),
            Query(RecordsQuery {
                year: None,
                month: None,
                flash: Some(Flash::Added),
            }),
        )
        .await
        .unwrap();

        let document = parse_html(response).await;
        let alerts = select_texts(&document, "div[role=status]");
        assert_eq!(alerts.len(), 1, "want one confirmation alert");
        assert!(
            alerts[0].contains("Registro Adicionado"),
            "got {:?}",
            alerts[0]
        );
    }

    #[tokio::test]
    async fn out_of_range_month_falls_back_to_current_month() {
        let want = month_name(OffsetDateTime::now_utc().date().month());

        for month in [13, 999, -1] {
            let state = get_test_state();

            let response = get_records_page(
                State(state),
                Query(RecordsQuery {
                    year: None,
                    month: Some(month),
                    flash: None,
                }),
            )
            .await
            .unwrap();

            let document = parse_html(response).await;
            assert_selected_option(&document, "select[name=month]", want);
        }
    }

    #[track_caller]
    fn assert_selected_option(document: &Html, select: &str, want: &str) {
        let selector = Selector::parse(&format!("{select} option[selected]")).unwrap();
        let selected: Vec<ElementRef> = document.select(&selector).collect();
        assert_eq!(selected.len(), 1, "want exactly one selected option");
        assert_eq!(selected[0].text().collect::<String>().trim(), want);
    }

    #[test]
    fn records_page_url_includes_filter_and_flash() {
        let url = records_page_url(2023, time::Month::April, Some(Flash::Added));

        assert_eq!(url, "/records?year=2023&month=4&flash=added");

        let url = records_page_url(2023, time::Month::December, None);

        assert_eq!(url, "/records?year=2023&month=12");
    }
}
