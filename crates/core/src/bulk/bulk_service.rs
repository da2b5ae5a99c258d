use std::collections::BTreeSet;

use log::debug;

use super::{BulkAction, UpdateRow};

/// Indices of the rows whose checkbox is ticked.
pub fn selected_indices(rows: &[UpdateRow]) -> BTreeSet<usize> {
    rows.iter()
        .enumerate()
        .filter(|(_, row)| row.selected)
        .map(|(index, _)| index)
        .collect()
}

/// Ticks or unticks every row (the "select all" checkbox).
pub fn select_all(rows: &mut [UpdateRow], checked: bool) {
    for row in rows.iter_mut() {
        row.selected = checked;
    }
}

/// Writes the action's value into the updated-billing-ID field of the
/// selected rows. Returns how many rows were written.
///
/// Unselected rows are never touched, and indices past the end of `rows`
/// are ignored.
pub fn apply_bulk_action(
    rows: &mut [UpdateRow],
    selected: &BTreeSet<usize>,
    action: &BulkAction,
) -> usize {
    let mut written = 0;

    for (index, row) in rows.iter_mut().enumerate() {
        if !selected.contains(&index) {
            continue;
        }

        let new_value = match action {
            BulkAction::FindAndReplace { find, replace } => {
                if row.current_billing_id != *find {
                    continue;
                }
                replace
            }
            BulkAction::SetTo { value } => value,
        };

        row.updated_billing_id.clone_from(new_value);
        written += 1;
    }

    debug!(
        "Applied {} to {} of {} selected row(s)",
        action.kind(),
        written,
        selected.len()
    );
    written
}
