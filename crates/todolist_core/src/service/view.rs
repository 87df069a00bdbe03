//! Derived view over the record store.
//!
//! # Invariants
//! - Output is a subsequence of the input: nothing invented, nothing
//!   duplicated, relative order preserved.
//! - `derive_view(records, All, All)` is the identity.
//! - Status filtering runs before completion filtering; the two commute.

use crate::model::filter::{CompletionFilter, StatusFilter};
use crate::model::todo::Todo;

/// Projects `records` through both selectors.
pub fn derive_view(
    records: &[Todo],
    completion: CompletionFilter,
    status: StatusFilter,
) -> Vec<Todo> {
    records
        .iter()
        .filter(|todo| status.matches(todo))
        .filter(|todo| completion.matches(todo))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::derive_view;
    use crate::model::filter::{CompletionFilter, StatusFilter};
    use crate::model::todo::{Todo, TodoStatus};

    #[test]
    fn status_filter_drops_unclassified_records() {
        let records = vec![
            Todo::new(1, "plain", false, 1),
            Todo::new(2, "tagged", false, 1).with_status(TodoStatus::Primary),
            Todo::new(3, "other", true, 1).with_status(TodoStatus::Secondary),
        ];

        let primary = derive_view(
            &records,
            CompletionFilter::All,
            StatusFilter::Only(TodoStatus::Primary),
        );
        assert_eq!(primary.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2]);

        let done_secondary = derive_view(
            &records,
            CompletionFilter::Completed,
            TodoStatus::Secondary.into(),
        );
        assert_eq!(done_secondary.iter().map(|t| t.id).collect::<Vec<_>>(), vec![3]);
    }
}
