//! The app's route URIs.

/// The root route which redirects to the records page.
pub const ROOT: &str = "/";
/// The page for adding, filtering and removing records.
pub const RECORDS_VIEW: &str = "/records";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to create a record.
pub const RECORDS_API: &str = "/api/records";
/// The route to delete the records selected in the table.
pub const DELETE_RECORDS_API: &str = "/api/records/delete";
