use anyhow::{bail, Context};
use chrono::SecondsFormat;
use clap::Subcommand;
use tyre_client::{
    client::ContactClient,
    controller::{ContactFormController, StatusKind, SubmissionMode},
    form::ContactForm,
    i18n::Language,
};
use tyre_config::Config;
use tyre_persistence_contracts::{contact::ContactRepository, Database, Transaction};
use tyre_persistence_sqlite::contact::SqliteContactRepository;
use url::Url;

use crate::database;

#[derive(Debug, Subcommand)]
pub enum ContactCommand {
    /// Print all stored contact messages
    #[command(aliases(["ls", "l"]))]
    List,
    /// Submit a contact message to a running server
    Send {
        /// Base url of the site
        #[arg(long, default_value = "http://127.0.0.1:3000/")]
        url: Url,
        #[arg(long)]
        name: String,
        #[arg(long)]
        mobile: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
        /// Language of the printed status (`en` or `ar`)
        #[arg(long, default_value = "en")]
        lang: Language,
    },
}

impl ContactCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            Self::List => list(config).await,
            Self::Send {
                url,
                name,
                mobile,
                email,
                message,
                lang,
            } => {
                let form = [
                    ("name", name),
                    ("mobile", mobile),
                    ("email", email),
                    ("message", message),
                ]
                .into_iter()
                .collect();
                send(&url, form, lang).await
            }
        }
    }
}

async fn list(config: Config) -> anyhow::Result<()> {
    let db = database::connect(&config.database).await?;
    let mut txn = db.begin_transaction().await?;
    let messages = SqliteContactRepository.list(&mut txn).await?;
    txn.rollback().await?;

    for message in &messages {
        println!(
            "#{} {} {} <{}> {}",
            message.id,
            message
                .created_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            message.author.name.as_str(),
            message.author.email.as_str(),
            message.author.mobile.as_str(),
        );
        for line in message.content.lines() {
            println!("    {line}");
        }
    }
    println!("{} contact messages", messages.len());

    Ok(())
}

/// Submits `form` the way the contact form on the site does and prints the
/// resulting status.
pub async fn send(url: &Url, mut form: ContactForm, language: Language) -> anyhow::Result<()> {
    let client = ContactClient::new(url).context("Invalid site url")?;
    let controller = ContactFormController::new(SubmissionMode::Remote(client));

    let status = controller
        .submit(&mut form, language)
        .await
        .context("Another submission is in flight")?;
    match status.kind {
        StatusKind::Ok => {
            println!("{}", status.text);
            Ok(())
        }
        StatusKind::Error | StatusKind::Warning => bail!("{}", status.text),
    }
}
