use chrono::{DateTime, Local};

/// Maximum number of entries kept in the recent searches list.
pub const HISTORY_CAPACITY: usize = 5;

/// Human label for the time elapsed between `then` and `now`.
///
/// Produces "Just now", "10 min ago", "1 hour ago", "2 hours ago",
/// "Yesterday" and "2 days ago" style strings.
pub fn relative_label(then: DateTime<Local>, now: DateTime<Local>) -> String {
    let elapsed = now.signed_duration_since(then);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{} min ago", minutes)
    } else if hours == 1 {
        "1 hour ago".to_string()
    } else if hours < 24 {
        format!("{} hours ago", hours)
    } else if days == 1 {
        "Yesterday".to_string()
    } else {
        format!("{} days ago", days)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecentSearch {
    pub from: String,
    pub to: String,
    pub searched_at: DateTime<Local>,
}

impl RecentSearch {
    pub fn title(&self) -> String {
        format!("{} → {}", self.from, self.to)
    }

    fn same_trip(&self, from: &str, to: &str) -> bool {
        self.from.eq_ignore_ascii_case(from) && self.to.eq_ignore_ascii_case(to)
    }
}

/// Most-recent-first list of trip searches. Lives in memory only.
#[derive(Debug, Clone, Default)]
pub struct SearchHistory {
    entries: Vec<RecentSearch>,
}

impl SearchHistory {
    pub fn new(entries: Vec<RecentSearch>) -> Self {
        let mut history = Self { entries };
        history.entries.truncate(HISTORY_CAPACITY);
        history
    }

    /// Records a search, moving an existing identical trip to the front.
    ///
    /// Blank endpoints are ignored. Returns whether the history changed.
    pub fn record(&mut self, from: &str, to: &str, at: DateTime<Local>) -> bool {
        let (from, to) = (from.trim(), to.trim());
        if from.is_empty() || to.is_empty() {
            return false;
        }
        self.entries.retain(|entry| !entry.same_trip(from, to));
        self.entries.insert(
            0,
            RecentSearch {
                from: from.to_string(),
                to: to.to_string(),
                searched_at: at,
            },
        );
        self.entries.truncate(HISTORY_CAPACITY);
        true
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[RecentSearch] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
