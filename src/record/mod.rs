//! Record management for the app.
//!
//! This module contains everything related to financial records:
//! - The `Record` model and its database functions
//! - The filter and aggregation logic for the records page
//! - The route handlers for adding, listing and removing records

mod amount;
mod core;
mod create_record_endpoint;
mod delete_records_endpoint;
mod records_page;
mod summary;
mod view;

pub use core::create_record_table;
pub use create_record_endpoint::create_record_endpoint;
pub use delete_records_endpoint::delete_records_endpoint;
pub use records_page::get_records_page;
