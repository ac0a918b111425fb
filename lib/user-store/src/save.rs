//! First-login persistence.

use signet_identity::UserClaims;
use tracing::{error, info, instrument};

use crate::store::{PutOutcome, UserStore};

/// What `save_if_absent` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// No record existed; one was written.
    Created,
    /// A record already existed and was left as is.
    AlreadyExists,
    /// The store failed. The error has been logged.
    Failed,
}

/// Records the claims unless a record for the subject already exists.
///
/// Looks the subject up first and writes only when nothing is found. Store
/// failures are logged and reported as `SaveOutcome::Failed`; they never
/// surface to the caller as errors, so a storage outage does not block login.
#[instrument(skip(store, claims), fields(sub = %claims.subject()))]
pub async fn save_if_absent(store: &dyn UserStore, claims: &UserClaims) -> SaveOutcome {
    match store.get(claims.subject()).await {
        Ok(Some(_)) => return SaveOutcome::AlreadyExists,
        Ok(None) => {}
        Err(e) => {
            error!(error = %e, "failed to look up user record");
            return SaveOutcome::Failed;
        }
    }

    match store.put(claims).await {
        Ok(PutOutcome::Created) => {
            info!("recorded new user");
            SaveOutcome::Created
        }
        Ok(PutOutcome::AlreadyExists) => SaveOutcome::AlreadyExists,
        Err(e) => {
            error!(error = %e, "failed to write user record");
            SaveOutcome::Failed
        }
    }
}
