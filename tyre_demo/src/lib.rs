use tyre_persistence_contracts::contact::ContactRepository;

pub mod contact;

/// Populates an empty database with the demo contact messages.
///
/// Messages are inserted in order, so on a fresh database they receive the
/// ids used by [`contact::JO`] and [`contact::SAMIRA`].
pub async fn create<Txn: Send + Sync + 'static>(
    txn: &mut Txn,
    contact: impl ContactRepository<Txn>,
) -> anyhow::Result<()> {
    contact::create(txn, contact).await?;
    Ok(())
}
