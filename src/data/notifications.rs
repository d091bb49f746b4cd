use chrono::{DateTime, Local};

use super::searches::relative_label;

#[derive(Debug, Clone, PartialEq)]
/// Service alert listed in the header's notification popup.
pub struct Notification {
    pub id: u32,
    pub message: String,
    pub posted: DateTime<Local>,
}

impl Notification {
    pub fn age_label(&self, now: DateTime<Local>) -> String {
        relative_label(self.posted, now)
    }
}
