use chrono::{DateTime, Utc};
use nutype::nutype;

#[nutype(derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Deref,
    From,
    Display,
    Serialize,
    Deserialize,
))]
pub struct ContactMessageId(i64);

/// A stored contact form submission.
///
/// Messages are immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub id: ContactMessageId,
    pub author: ContactMessageAuthor,
    pub content: ContactMessageContent,
    /// Time at which the server received the submission.
    pub created_at: DateTime<Utc>,
}

/// A validated submission which has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactMessage {
    pub author: ContactMessageAuthor,
    pub content: ContactMessageContent,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessageAuthor {
    pub name: ContactMessageName,
    pub mobile: ContactMessageMobile,
    /// Free-form text containing an `@`. Not guaranteed to be a deliverable
    /// address.
    pub email: ContactMessageEmail,
}

impl NewContactMessage {
    pub fn with_id(self, id: ContactMessageId) -> ContactMessage {
        ContactMessage {
            id,
            author: self.author,
            content: self.content,
            created_at: self.created_at,
        }
    }
}

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_min = ContactMessageName::MIN_LEN),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Display, Serialize, Deserialize)
)]
pub struct ContactMessageName(String);

impl ContactMessageName {
    pub const MIN_LEN: usize = 2;
}

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_min = ContactMessageMobile::MIN_LEN),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Display, Serialize, Deserialize)
)]
pub struct ContactMessageMobile(String);

impl ContactMessageMobile {
    pub const MIN_LEN: usize = 6;
}

#[nutype(
    sanitize(trim),
    validate(
        len_char_min = ContactMessageEmail::MIN_LEN,
        predicate = |email: &str| email.contains(ContactMessageEmail::REQUIRED_CHAR)
    ),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Display, Serialize, Deserialize)
)]
pub struct ContactMessageEmail(String);

impl ContactMessageEmail {
    pub const MIN_LEN: usize = 5;
    pub const REQUIRED_CHAR: char = '@';
}

#[nutype(
    sanitize(trim),
    validate(not_empty, len_char_min = ContactMessageContent::MIN_LEN),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Display, Serialize, Deserialize)
)]
pub struct ContactMessageContent(String);

impl ContactMessageContent {
    pub const MIN_LEN: usize = 3;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn fields_are_trimmed() {
        let name = ContactMessageName::try_new("  Jo \n").unwrap();
        assert_eq!(name.as_str(), "Jo");

        let email = ContactMessageEmail::try_new("\tjo@example.com ").unwrap();
        assert_eq!(email.as_str(), "jo@example.com");
    }

    #[test]
    fn minimum_lengths_apply_after_trimming() {
        assert!(ContactMessageName::try_new(" J ").is_err());
        assert!(ContactMessageName::try_new("").is_err());
        assert!(ContactMessageMobile::try_new("12345").is_err());
        assert!(ContactMessageMobile::try_new("123456").is_ok());
        assert!(ContactMessageContent::try_new("Hi").is_err());
        assert!(ContactMessageContent::try_new("Hi!").is_ok());
    }

    #[test]
    fn email_needs_at_sign_and_five_chars() {
        assert!(ContactMessageEmail::try_new("not-an-email").is_err());
        assert!(ContactMessageEmail::try_new("a@b").is_err());
        assert!(ContactMessageEmail::try_new("a@b.c").is_ok());
    }

    #[test]
    fn lengths_count_characters() {
        assert!(ContactMessageName::try_new("علي").is_ok());
        assert!(ContactMessageName::try_new("ع").is_err());
    }

    #[test]
    fn long_values_are_accepted() {
        assert!(ContactMessageName::try_new("x".repeat(300)).is_ok());
        assert!(ContactMessageMobile::try_new("1".repeat(300)).is_ok());
        assert!(ContactMessageEmail::try_new(format!("{}@example.com", "x".repeat(300))).is_ok());
        assert!(ContactMessageContent::try_new("x".repeat(5000)).is_ok());
    }
}
