use std::sync::LazyLock;

use anyhow::ensure;
use chrono::{DateTime, TimeZone, Utc};
use tyre_models::contact::{
    ContactMessage, ContactMessageAuthor, ContactMessageContent, ContactMessageEmail,
    ContactMessageMobile, ContactMessageName, NewContactMessage,
};
use tyre_persistence_contracts::contact::ContactRepository;

pub static ALL_CONTACT_MESSAGES: LazyLock<Vec<&ContactMessage>> =
    LazyLock::new(|| vec![&*JO, &*SAMIRA]);

pub static NEW_JO: LazyLock<NewContactMessage> = LazyLock::new(|| NewContactMessage {
    author: author("Jo", "12345678", "jo@example.com"),
    content: content("Hi there"),
    created_at: timestamp(2024, 6, 1, 9, 15, 0),
});

pub static JO: LazyLock<ContactMessage> = LazyLock::new(|| NEW_JO.clone().with_id(1.into()));

pub static NEW_SAMIRA: LazyLock<NewContactMessage> = LazyLock::new(|| NewContactMessage {
    author: author("Samira Haddad", "+961 7 123 456", "samira@example.org"),
    content: content(
        "We are a group of twelve visiting the Al-Bass hippodrome next month. Is a guided tour \
         available in Arabic?",
    ),
    created_at: timestamp(2024, 6, 2, 17, 40, 12),
});

pub static SAMIRA: LazyLock<ContactMessage> =
    LazyLock::new(|| NEW_SAMIRA.clone().with_id(2.into()));

/// A valid submission that is not part of the demo data.
pub static NEW_KARIM: LazyLock<NewContactMessage> = LazyLock::new(|| NewContactMessage {
    author: author("Karim", "70112233", "karim@example.net"),
    content: content("Is the old souk open on Sundays?"),
    created_at: timestamp(2024, 6, 3, 8, 0, 0),
});

pub async fn create<Txn: Send + Sync + 'static>(
    txn: &mut Txn,
    repo: impl ContactRepository<Txn>,
) -> anyhow::Result<()> {
    for (new, expected) in [(&*NEW_JO, &*JO), (&*NEW_SAMIRA, &*SAMIRA)] {
        let inserted = repo.create(txn, new).await?;
        ensure!(
            inserted.id == expected.id,
            "Demo data expects an empty database, got id {} instead of {}",
            inserted.id,
            expected.id
        );
    }
    Ok(())
}

fn author(name: &str, mobile: &str, email: &str) -> ContactMessageAuthor {
    ContactMessageAuthor {
        name: ContactMessageName::try_new(name).unwrap(),
        mobile: ContactMessageMobile::try_new(mobile).unwrap(),
        email: ContactMessageEmail::try_new(email).unwrap(),
    }
}

fn content(message: &str) -> ContactMessageContent {
    ContactMessageContent::try_new(message).unwrap()
}

fn timestamp(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
        .unwrap()
}
