use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::reservation::ReservationStatus;

/// Anything the dashboard can filter by status.
pub trait HasStatus {
    fn status(&self) -> ReservationStatus;
}

/// Statuses the operator has ticked in the dashboard.
///
/// An empty set means "show nothing", not "show everything".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusFilterSet(HashSet<ReservationStatus>);

impl StatusFilterSet {
    pub fn select_all() -> Self {
        Self(ReservationStatus::ALL.into_iter().collect())
    }

    pub fn clear_all() -> Self {
        Self(HashSet::new())
    }

    /// What the dashboard starts with: everything except cancelled.
    pub fn dashboard_default() -> Self {
        Self::from_iter([
            ReservationStatus::Pending,
            ReservationStatus::Confirmed,
            ReservationStatus::Completed,
        ])
    }

    /// Returns a new set with `status` flipped.
    pub fn toggle(&self, status: ReservationStatus) -> Self {
        let mut next = self.0.clone();
        if !next.remove(&status) {
            next.insert(status);
        }
        Self(next)
    }

    pub fn contains(&self, status: ReservationStatus) -> bool {
        self.0.contains(&status)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Declaration order (pending, confirmed, completed, cancelled).
    pub fn sorted_statuses(&self) -> Vec<ReservationStatus> {
        ReservationStatus::ALL
            .into_iter()
            .filter(|s| self.0.contains(s))
            .collect()
    }

    pub fn matches<T: HasStatus>(&self, record: &T) -> bool {
        self.contains(record.status())
    }

    /// Keeps the records whose status is selected. Empty set keeps none.
    pub fn apply<T: HasStatus>(&self, records: impl IntoIterator<Item = T>) -> Vec<T> {
        if self.is_empty() {
            return Vec::new();
        }
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

impl FromIterator<ReservationStatus> for StatusFilterSet {
    fn from_iter<I: IntoIterator<Item = ReservationStatus>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
