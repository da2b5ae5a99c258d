use std::time::Duration;

/// Quiet period after the last keystroke before a field is validated.
pub const DEFAULT_QUIET_INTERVAL: Duration = Duration::from_millis(200);

/// Structural pattern every billing ID must match (e.g. `123456-789`).
///
/// Spelled with ASCII classes since `\d` in `regex` also matches non-ASCII digits.
pub const BILLING_ID_PATTERN: &str = r"^[0-9]{6}-[0-9]{3}$";

/// Separator between the project and activity parts of a billing ID.
pub const BILLING_ID_SEPARATOR: char = '-';

/// Message shown when the user tries to leave a page with an unsaved form.
pub const LEAVE_PAGE_MESSAGE: &str =
    "Are you sure you want to leave? You will lose progress on the current form.";

/// Prefix of the update form's formset fields.
pub const UPDATE_FORMSET_PREFIX: &str = "update_ids_form";

/// Maximum number of lookups in flight during batch validation.
pub const BATCH_LOOKUP_CONCURRENCY: usize = 4;
