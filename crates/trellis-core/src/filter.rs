use tracing::trace;

use crate::task::{
  Priority,
  Status,
  Task
};

/// Display filter over the two
/// closed task facets. Every flag on
/// means no filtering. Total over
/// the domain by construction: the
/// enums are the only keys.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
)]
pub struct ViewFilter {
  priority: [bool; 3],
  status:   [bool; 3]
}

impl Default for ViewFilter {
  fn default() -> Self {
    Self {
      priority: [true; 3],
      status:   [true; 3]
    }
  }
}

fn priority_slot(
  priority: Priority
) -> usize {
  match priority {
    | Priority::High => 0,
    | Priority::Medium => 1,
    | Priority::Low => 2
  }
}

fn status_slot(
  status: Status
) -> usize {
  match status {
    | Status::Pending => 0,
    | Status::InProgress => 1,
    | Status::Completed => 2
  }
}

impl ViewFilter {
  pub fn allows_priority(
    &self,
    priority: Priority
  ) -> bool {
    self.priority
      [priority_slot(priority)]
  }

  pub fn allows_status(
    &self,
    status: Status
  ) -> bool {
    self.status[status_slot(status)]
  }

  /// Pure conjunction of the two
  /// facet flags.
  pub fn matches(
    &self,
    task: &Task
  ) -> bool {
    let ok = self
      .allows_priority(task.priority)
      && self.allows_status(task.status);
    trace!(
      id = ?task.id,
      priority = ?task.priority,
      status = ?task.status,
      ok,
      "filter check"
    );
    ok
  }

  /// Flips exactly one priority
  /// flag.
  pub fn toggle_priority(
    &mut self,
    priority: Priority
  ) {
    let slot = priority_slot(priority);
    self.priority[slot] =
      !self.priority[slot];
  }

  /// Flips exactly one status flag.
  pub fn toggle_status(
    &mut self,
    status: Status
  ) {
    let slot = status_slot(status);
    self.status[slot] =
      !self.status[slot];
  }

  /// Back to all-on.
  pub fn reset(&mut self) {
    *self = Self::default();
  }

  pub fn apply<'a>(
    &self,
    tasks: &[&'a Task]
  ) -> Vec<&'a Task> {
    tasks
      .iter()
      .copied()
      .filter(|task| self.matches(task))
      .collect()
  }

  /// Enabled flags, for the filter
  /// badge.
  pub fn active_count(&self) -> usize {
    self
      .priority
      .iter()
      .chain(self.status.iter())
      .filter(|flag| **flag)
      .count()
  }

  pub fn flag_count() -> usize {
    6
  }

  pub fn is_unfiltered(&self) -> bool {
    self.active_count()
      == Self::flag_count()
  }
}

#[cfg(test)]
mod tests {
  use chrono::{
    TimeZone,
    Utc
  };

  use super::ViewFilter;
  use crate::task::{
    Priority,
    Status,
    Task
  };

  fn task(
    priority: Priority,
    status: Status
  ) -> Task {
    let now = Utc
      .with_ymd_and_hms(
        2024, 6, 1, 0, 0, 0
      )
      .single()
      .expect("valid now");
    let mut task = Task::new_pending(
      "t".to_string(),
      now,
      1
    );
    task.priority = priority;
    task.status = status;
    task
  }

  #[test]
  fn default_passes_everything() {
    let filter = ViewFilter::default();
    assert!(filter.is_unfiltered());
    assert!(filter.matches(&task(
      Priority::Low,
      Status::Completed
    )));
  }

  #[test]
  fn both_facets_must_allow() {
    let mut filter =
      ViewFilter::default();
    filter
      .toggle_priority(Priority::Low);

    let low_pending = task(
      Priority::Low,
      Status::Pending
    );
    let high_pending = task(
      Priority::High,
      Status::Pending
    );
    assert!(
      !filter.matches(&low_pending)
    );
    assert!(
      filter.matches(&high_pending)
    );

    filter
      .toggle_status(Status::Pending);
    assert!(
      !filter.matches(&high_pending)
    );
  }

  #[test]
  fn toggle_flips_only_one_flag() {
    let mut filter =
      ViewFilter::default();
    filter.toggle_status(
      Status::InProgress
    );

    assert!(filter
      .allows_status(Status::Pending));
    assert!(!filter.allows_status(
      Status::InProgress
    ));
    assert!(filter.allows_status(
      Status::Completed
    ));
    assert_eq!(
      filter.active_count(),
      5
    );

    filter.toggle_status(
      Status::InProgress
    );
    assert!(filter.is_unfiltered());
  }

  #[test]
  fn reset_restores_all_flags() {
    let mut filter =
      ViewFilter::default();
    filter
      .toggle_priority(Priority::High);
    filter.toggle_status(
      Status::Completed
    );
    filter.reset();
    assert_eq!(
      filter,
      ViewFilter::default()
    );
  }

  #[test]
  fn matching_is_stateless() {
    let filter = ViewFilter::default();
    let sample = task(
      Priority::Medium,
      Status::InProgress
    );
    let once =
      filter.matches(&sample);
    let twice =
      filter.matches(&sample);
    assert_eq!(once, twice);
  }

  #[test]
  fn apply_keeps_order() {
    let mut filter =
      ViewFilter::default();
    filter.toggle_status(
      Status::Completed
    );

    let a = task(
      Priority::High,
      Status::Pending
    );
    let b = task(
      Priority::Low,
      Status::Completed
    );
    let c = task(
      Priority::Low,
      Status::InProgress
    );

    let kept: Vec<&Task> = filter
      .apply(&[&a, &b, &c]);
    assert_eq!(kept.len(), 2);
    assert_eq!(kept[0].title, "t");
    assert!(kept.iter().all(|t| {
      t.status != Status::Completed
    }));
  }
}
