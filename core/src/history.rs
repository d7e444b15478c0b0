use serde::{Deserialize, Serialize};

/// One visited page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub href: String,
    pub namespace: String,
}

/// Append-only log of visited pages with a movable cursor.
///
/// `push` records a visit this code initiated (the host must advance its
/// own history stack alongside). `add` records a visit the browser already
/// made on its own stack (popstate replay): if the href was seen before the
/// cursor moves back to that entry instead of appending. `cancel` undoes
/// the most recent `push`/`add`, so a failed navigation cycle leaves the
/// log exactly as it found it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
    cursor: usize,
    /// (cursor, len) before the last mutation, consumed by `cancel`.
    rollback: Option<(usize, usize)>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new visit and advance the cursor, dropping any forward
    /// entries left over from history traversal.
    pub fn push(&mut self, href: impl Into<String>, namespace: impl Into<String>) {
        self.rollback = Some((self.cursor, self.entries.len()));
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(HistoryEntry {
            href: href.into(),
            namespace: namespace.into(),
        });
        self.cursor = self.entries.len() - 1;
    }

    /// Record a replayed visit. The cursor moves to the matching known
    /// entry when one exists; an unknown href is appended.
    pub fn add(&mut self, href: impl Into<String>, namespace: impl Into<String>) {
        let href = href.into();
        self.rollback = Some((self.cursor, self.entries.len()));
        if let Some(idx) = self.entries.iter().rposition(|e| e.href == href) {
            self.cursor = idx;
            return;
        }
        self.entries.push(HistoryEntry {
            href,
            namespace: namespace.into(),
        });
        self.cursor = self.entries.len() - 1;
    }

    /// Roll back the most recent `push`/`add`. A second call without an
    /// intervening mutation is a no-op.
    pub fn cancel(&mut self) {
        if let Some((cursor, len)) = self.rollback.take() {
            self.entries.truncate(len);
            self.cursor = cursor;
        }
    }

    /// The presently-active entry.
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.cursor)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
        self.rollback = None;
    }

    /// Inspection surface for devtools.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_advances_cursor() {
        let mut log = HistoryLog::new();
        log.push("/home", "home");
        log.push("/about", "about");
        assert_eq!(log.len(), 2);
        assert_eq!(log.current().unwrap().href, "/about");
    }

    #[test]
    fn cancel_is_a_net_rollback() {
        let mut log = HistoryLog::new();
        log.push("/home", "home");
        let before = log.clone();

        log.push("/about", "about");
        log.cancel();
        assert_eq!(log.len(), before.len());
        assert_eq!(log.current(), before.current());

        // Idempotent without an intervening mutation.
        log.cancel();
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn add_replays_known_entry() {
        let mut log = HistoryLog::new();
        log.push("/home", "home");
        log.push("/about", "about");

        log.add("/home", "home");
        assert_eq!(log.len(), 2);
        assert_eq!(log.current().unwrap().href, "/home");
    }

    #[test]
    fn add_appends_unknown_entry() {
        let mut log = HistoryLog::new();
        log.push("/home", "home");
        log.add("/deep-link", "");
        assert_eq!(log.len(), 2);
        assert_eq!(log.current().unwrap().href, "/deep-link");
    }

    #[test]
    fn cancel_restores_replay_cursor() {
        let mut log = HistoryLog::new();
        log.push("/home", "home");
        log.push("/about", "about");
        log.add("/home", "home");
        log.cancel();
        assert_eq!(log.current().unwrap().href, "/about");
    }

    #[test]
    fn push_after_back_drops_forward_entries() {
        let mut log = HistoryLog::new();
        log.push("/a", "");
        log.push("/b", "");
        log.add("/a", "");
        log.push("/c", "");
        assert_eq!(log.len(), 2);
        assert_eq!(log.current().unwrap().href, "/c");
    }
}
