//! HTML rendering for the records page.

use maud::{Markup, html};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    alert::Alert,
    endpoints,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_SELECT_STYLE,
        FORM_TEXT_INPUT_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base, format_currency,
    },
    record::{
        amount::AMOUNT_PATTERN,
        core::Record,
        records_page::RecordsViewModel,
        summary::month_name,
    },
};

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[day]/[month]/[year]");

pub(super) fn records_view(model: &RecordsViewModel) -> Markup {
    let content = html! {
        main class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold mb-4" { "Caderneta" }

            @if let Some(flash) = model.flash {
                (Alert::success(flash.message()).into_html())
            }

            div id="form-alert" class="w-full lg:max-w-4xl" {}

            div class="flex flex-col lg:flex-row gap-8 w-full lg:max-w-4xl"
            {
                (record_form(model.today))
                (records_section(model))
            }
        }
    };

    base("Registros", &content)
}

/// The form for adding a record: the amount, the date (defaulting to today)
/// and the submit button.
fn record_form(today: Date) -> Markup {
    html! {
        section class="lg:w-72"
        {
            form hx-post=(endpoints::RECORDS_API) hx-target-error="#form-alert" hx-swap="innerHTML"
            {
                div class="mb-4"
                {
                    label for="value" class=(FORM_LABEL_STYLE) { "Valor" }
                    input
                        type="text"
                        name="value"
                        id="value"
                        inputmode="decimal"
                        placeholder="0,00"
                        pattern=(AMOUNT_PATTERN)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div class="mb-4"
                {
                    label for="date" class=(FORM_LABEL_STYLE) { "Data" }
                    input
                        type="date"
                        name="date"
                        id="date"
                        value=(today)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Adicionar Registro" }
            }
        }
    }
}

/// The filter selects, the table of filtered records with their checkboxes,
/// the remove button and the total and average labels.
fn records_section(model: &RecordsViewModel) -> Markup {
    html! {
        section class="flex-1"
        {
            h2 class="text-xl font-bold text-center mb-4" { "Registros" }

            (filter_controls(model))

            form hx-post=(endpoints::DELETE_RECORDS_API)
            {
                input type="hidden" name="year" value=(model.selected_year);
                input type="hidden" name="month" value=(u8::from(model.selected_month));

                (records_table(&model.rows))

                button type="submit" class=(BUTTON_DELETE_STYLE) { "Remover Registros" }
            }

            p id="total-label" class="mt-4 font-medium"
            {
                "Total: " (format_currency(model.total))
            }

            p id="average-label" class="font-medium"
            {
                "Média: " (format_currency(model.average))
            }
        }
    }
}

/// The year and month selects. Changing either submits the GET form and
/// reloads the page with the new filter.
fn filter_controls(model: &RecordsViewModel) -> Markup {
    html! {
        form method="get" action=(endpoints::RECORDS_VIEW) class="flex gap-4 mb-4"
        {
            div class="flex-1"
            {
                label for="year" class=(FORM_LABEL_STYLE) { "Ano" }
                select name="year" id="year" onchange="this.form.submit()" class=(FORM_SELECT_STYLE)
                {
                    @for year in &model.years
                    {
                        option value=(year) selected[*year == model.selected_year] { (year) }
                    }
                }
            }

            div class="flex-1"
            {
                label for="month" class=(FORM_LABEL_STYLE) { "Mês" }
                select name="month" id="month" onchange="this.form.submit()" class=(FORM_SELECT_STYLE)
                {
                    @for month in &model.months
                    {
                        option
                            value=(u8::from(*month))
                            selected[*month == model.selected_month]
                        {
                            (month_name(*month))
                        }
                    }
                }
            }
        }
    }
}

fn records_table(rows: &[Record]) -> Markup {
    html! {
        table id="records-table" class="w-full my-2 text-sm text-left text-gray-500 dark:text-gray-400"
        {
            thead class=(TABLE_HEADER_STYLE)
            {
                tr
                {
                    th scope="col" class="px-6 py-3" { "" }
                    th scope="col" class="px-6 py-3" { "Id" }
                    th scope="col" class="px-6 py-3 text-right" { "Valor" }
                    th scope="col" class="px-6 py-3" { "Data" }
                }
            }

            tbody
            {
                @if rows.is_empty() {
                    tr class=(format!("empty-placeholder {TABLE_ROW_STYLE}"))
                    {
                        td class=(TABLE_CELL_STYLE) {}
                        td class=(TABLE_CELL_STYLE) {}
                        td class=(TABLE_CELL_STYLE) {}
                        td class=(TABLE_CELL_STYLE) {}
                    }
                } @else {
                    @for record in rows
                    {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td class=(TABLE_CELL_STYLE)
                            {
                                input type="checkbox" name="record_id" value=(record.id);
                            }

                            td class=(format!("record-id {TABLE_CELL_STYLE}")) { (record.id) }

                            td class=(format!("record-value {TABLE_CELL_STYLE} text-right"))
                            {
                                (format_currency(record.value))
                            }

                            td class=(format!("record-date {TABLE_CELL_STYLE}"))
                            {
                                (format_date(record.date))
                            }
                        }
                    }
                }
            }
        }
    }
}

fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}
