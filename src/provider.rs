//! Resource lifecycle against a configuration session.
//!
//! [`Provider`] sequences the calls a resource needs on a device:
//!
//! ```text
//! validate + encode ──► lock (retried) ──► load ──► commit ──► unlock ──► read back
//!                                           │         │
//!                                           └── error ┴──► discard + unlock
//! ```
//!
//! The provider owns its session and every operation takes `&mut self`, so
//! two operations can never interleave on the same candidate configuration.

use crate::config::SessionSettings;
use crate::error::{Error, Result};
use crate::resources::Resource;
use crate::session::{Session, SessionError, SessionResult};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Drives resource operations over one [`Session`].
pub struct Provider<S: Session> {
    session: S,
    settings: SessionSettings,
}

impl<S: Session> Provider<S> {
    /// Create a provider owning `session`.
    pub fn new(session: S, settings: SessionSettings) -> Self {
        Self { session, settings }
    }

    /// The underlying session.
    pub fn session(&self) -> &S {
        &self.session
    }

    /// Give the session back.
    pub fn into_session(self) -> S {
        self.session
    }

    /// Read `id` from the device. `Ok(None)` when the device has nothing for it.
    pub async fn read<R: Resource>(&mut self, id: &str) -> Result<Option<R>> {
        R::validate_id(id)?;
        let raw = self.session.command_exec(&R::show_command(id)).await?;
        let resource = R::from_config(&raw, id)?;
        debug!(
            resource = R::TYPE_NAME,
            id,
            found = resource.is_some(),
            "read configuration"
        );
        Ok(resource)
    }

    /// Create `resource` and return it as read back after the commit.
    ///
    /// Named resources must not exist yet. Singletons replace whatever the
    /// device already holds for them.
    pub async fn create<R: Resource>(&mut self, resource: &R) -> Result<R> {
        let set_lines = resource.set_lines()?;
        let id = resource.id();

        let lines = if R::SINGLETON {
            let mut lines = R::delete_lines(&id)?;
            lines.extend(set_lines);
            lines
        } else {
            if self.read::<R>(&id).await?.is_some() {
                return Err(Error::AlreadyExists {
                    resource: R::TYPE_NAME.to_string(),
                    id,
                });
            }
            set_lines
        };

        let comment = self.settings.commit_comment("create", R::TYPE_NAME);
        self.apply(&lines, &comment).await?;
        self.read_back(&id).await
    }

    /// Replace the stored configuration of `resource` with its current model.
    pub async fn update<R: Resource>(&mut self, resource: &R) -> Result<R> {
        let set_lines = resource.set_lines()?;
        let id = resource.id();

        let mut lines = R::delete_lines(&id)?;
        lines.extend(set_lines);

        let comment = self.settings.commit_comment("update", R::TYPE_NAME);
        self.apply(&lines, &comment).await?;
        self.read_back(&id).await
    }

    /// Remove `id` from the device. A malformed `id` is rejected before the
    /// configuration is locked.
    pub async fn delete<R: Resource>(&mut self, id: &str) -> Result<()> {
        let lines = R::delete_lines(id)?;
        let comment = self.settings.commit_comment("delete", R::TYPE_NAME);
        self.apply(&lines, &comment).await
    }

    /// Read `id`, failing when the device has nothing for it.
    pub async fn import<R: Resource>(&mut self, id: &str) -> Result<R> {
        self.read::<R>(id)
            .await?
            .ok_or_else(|| Error::not_found(R::TYPE_NAME, id))
    }

    async fn read_back<R: Resource>(&mut self, id: &str) -> Result<R> {
        self.read::<R>(id)
            .await?
            .ok_or_else(|| Error::NotExistsAfterCommit {
                resource: R::TYPE_NAME.to_string(),
                id: id.to_string(),
            })
    }

    /// Load and commit `lines` under the configuration lock.
    async fn apply(&mut self, lines: &[String], comment: &str) -> Result<()> {
        self.lock().await?;

        match self.load_and_commit(lines, comment).await {
            Ok(()) => {
                self.session.unlock().await?;
                info!(
                    device = self.session.identifier(),
                    count = lines.len(),
                    comment,
                    "configuration committed"
                );
                Ok(())
            }
            Err(err) => {
                warn!(
                    device = self.session.identifier(),
                    error = %err,
                    "configuration change failed, discarding candidate"
                );
                if let Err(e) = self.session.discard().await {
                    warn!(error = %e, "discard failed");
                }
                if let Err(e) = self.session.unlock().await {
                    warn!(error = %e, "unlock failed");
                }
                Err(err.into())
            }
        }
    }

    async fn load_and_commit(&mut self, lines: &[String], comment: &str) -> SessionResult<()> {
        self.session.config_apply(lines).await?;
        self.session.commit(comment).await
    }

    async fn lock(&mut self) -> Result<()> {
        let delay = Duration::from_millis(self.settings.lock_retry_delay_ms);
        let mut attempt = 0;

        loop {
            match self.session.lock().await {
                Ok(()) => return Ok(()),
                Err(SessionError::LockDenied(reason)) if attempt < self.settings.lock_retries => {
                    attempt += 1;
                    warn!(
                        device = self.session.identifier(),
                        attempt,
                        max_retries = self.settings.lock_retries,
                        reason = %reason,
                        "configuration lock denied, retrying in {:?}",
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}
