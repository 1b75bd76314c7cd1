use crate::domain::ports::TransactionRepositoryBox;
use crate::domain::response::WorldlineResponse;
use crate::domain::transaction::TransactionRecord;
use crate::error::Result;
use tracing::{debug, info};

/// Result of reconciling one vendor response.
#[derive(Debug, PartialEq, Clone)]
pub enum SaveOutcome {
    /// A new history entry was written.
    Recorded(TransactionRecord),
    /// The last stored entry already carries this status code and transaction id.
    Unchanged,
}

/// Turns vendor payment and refund responses into transaction history entries.
///
/// A response is written only when it differs from the most recent entry for
/// the same order in status code or transaction id. The lookup and the insert
/// are not atomic: two concurrent deliveries of the same state may both be
/// written.
pub struct TransactionResponseManager {
    repository: TransactionRepositoryBox,
}

impl TransactionResponseManager {
    pub fn new(repository: TransactionRepositoryBox) -> Self {
        Self { repository }
    }

    pub async fn save_transaction(&self, response: &WorldlineResponse) -> Result<SaveOutcome> {
        let increment_id = response.merchant_reference();
        let status_code = response.status_output().status_code;

        if let Some(last) = self.repository.last_transaction(increment_id).await?
            && last.matches_state(status_code, response.id())
        {
            debug!(
                increment_id,
                transaction_id = response.id(),
                status_code,
                "Transaction state already recorded, skipping"
            );
            return Ok(SaveOutcome::Unchanged);
        }

        let record = self
            .repository
            .save(TransactionRecord::from_response(response))
            .await?;
        info!(
            increment_id,
            transaction_id = %record.transaction_id,
            status = %record.status,
            status_code,
            "Transaction recorded"
        );

        Ok(SaveOutcome::Recorded(record))
    }

    /// Transaction history of an order, oldest first.
    pub async fn history(&self, increment_id: &str) -> Result<Vec<TransactionRecord>> {
        self.repository.history(increment_id).await
    }
}
