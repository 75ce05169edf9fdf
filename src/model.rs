//! Post record definition

/// Username recorded for posts whose author account was deleted
pub const DELETED_USER: &str = "[Deleted]";

/// Column names written to the table header, in field order
pub const COLUMNS: [&str; 6] = ["Title", "Username", "Date", "Comments", "Upvotes", "Link"];

/// One submission extracted from a listing page
///
/// Values are kept as the page presents them: `date` is the raw timestamp
/// attribute and `upvotes` the raw score attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    pub title: String,
    pub username: String,
    pub date: String,
    pub comments: u32,
    pub upvotes: String,
    pub link: String,
}

impl PostRecord {
    /// Returns true if the author account was deleted
    pub fn is_deleted_author(&self) -> bool {
        self.username == DELETED_USER
    }

    /// Field values in `COLUMNS` order
    pub fn to_row(&self) -> [String; 6] {
        [
            self.title.clone(),
            self.username.clone(),
            self.date.clone(),
            self.comments.to_string(),
            self.upvotes.clone(),
            self.link.clone(),
        ]
    }
}
