//! Pure derived views over the authoritative task list.
//!
//! No side effects, no suspension: given the list and a filter value, these
//! functions compute the visible subsequence and the active count. Order is
//! always preserved relative to the authoritative list.

use termtodo_proto::task::Task;

/// Which subset of tasks is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    /// Every task.
    #[default]
    All,
    /// Tasks not yet completed.
    Active,
    /// Completed tasks.
    Completed,
}

impl Filter {
    /// All filter values, in display order.
    pub const ALL_VALUES: [Self; 3] = [Self::All, Self::Active, Self::Completed];

    /// Returns `true` if the task belongs to this filter's subset.
    #[must_use]
    pub const fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Active => write!(f, "Active"),
            Self::Completed => write!(f, "Completed"),
        }
    }
}

/// Returns the visible subsequence of `tasks` under `filter`, order
/// preserved.
#[must_use]
pub fn visible(tasks: &[Task], filter: Filter) -> Vec<&Task> {
    tasks.iter().filter(|t| filter.matches(t)).collect()
}

/// Returns the number of tasks not yet completed.
#[must_use]
pub fn active_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|t| !t.completed).count()
}
