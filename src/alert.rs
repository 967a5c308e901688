//! Alert fragments for displaying success and error messages to the user.

use maud::{Markup, html};

/// Alert message types for styling
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlertType {
    Success,
    Error,
}

/// An alert message with an optional detail line.
#[derive(Debug, Clone)]
pub struct Alert<'a> {
    pub alert_type: AlertType,
    pub message: &'a str,
    pub details: &'a str,
}

impl<'a> Alert<'a> {
    /// Create a new success alert
    pub fn success(message: &'a str) -> Self {
        Self {
            alert_type: AlertType::Success,
            message,
            details: "",
        }
    }

    /// Create a new error alert
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self {
            alert_type: AlertType::Error,
            message,
            details,
        }
    }

    pub fn into_html(self) -> Markup {
        let (role, style) = match self.alert_type {
            AlertType::Success => (
                "status",
                "p-4 mb-4 text-sm rounded-lg bg-green-50 text-green-800 \
                dark:bg-gray-800 dark:text-green-400",
            ),
            AlertType::Error => (
                "alert",
                "p-4 mb-4 text-sm rounded-lg bg-red-50 text-red-800 \
                dark:bg-gray-800 dark:text-red-400",
            ),
        };

        html! {
            div role=(role) class=(style)
            {
                span class="font-medium" { (self.message) }

                @if !self.details.is_empty() {
                    p { (self.details) }
                }
            }
        }
    }
}

#[cfg(test)]
mod alert_tests {
    use super::Alert;

    #[test]
    fn success_alert_contains_message() {
        let markup = Alert::success("Registro Adicionado").into_html();

        let text = markup.into_string();
        assert!(text.contains("Registro Adicionado"), "got {text}");
        assert!(text.contains("role=\"status\""), "got {text}");
    }

    #[test]
    fn error_alert_contains_message_and_details() {
        let markup = Alert::error("Valor em branco", "Informe um valor.").into_html();

        let text = markup.into_string();
        assert!(text.contains("Valor em branco"), "got {text}");
        assert!(text.contains("Informe um valor."), "got {text}");
        assert!(text.contains("role=\"alert\""), "got {text}");
    }
}
