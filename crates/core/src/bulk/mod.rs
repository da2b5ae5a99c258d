//! Bulk module - "find and replace" and "set to" over update form rows.

mod bulk_model;
mod bulk_service;


pub use bulk_model::{formset_field_name, ActionKind, BulkAction, UpdateRow};
pub use bulk_service::{apply_bulk_action, select_all, selected_indices};
