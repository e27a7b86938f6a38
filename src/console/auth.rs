use std::path::PathBuf;

use crate::domain::types::Credential;
use crate::repository::http::HttpRepository;
use crate::repository::{RepositoryError, RepositoryResult};

/// Source of the credential persisted by the external login flow.
pub trait CredentialStore {
    fn load(&self) -> Option<Credential>;
}

/// Reads the bearer token from a file, ignoring surrounding whitespace.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Option<Credential> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Credential::new(contents).ok(),
            Err(e) => {
                log::debug!("No credential at {}: {e}", self.path.display());
                None
            }
        }
    }
}

impl CredentialStore for Option<Credential> {
    fn load(&self) -> Option<Credential> {
        self.clone()
    }
}

/// Checks a credential with the data service and keeps it for later calls.
pub trait Authenticator {
    fn authenticate(&mut self, credential: Credential) -> RepositoryResult<()>;
    fn sign_out(&mut self);
}

impl Authenticator for HttpRepository {
    fn authenticate(&mut self, credential: Credential) -> RepositoryResult<()> {
        self.set_credential(Some(credential));
        let verified = self.verify_credential();
        if verified.is_err() {
            self.set_credential(None);
        }
        verified
    }

    fn sign_out(&mut self) {
        self.set_credential(None);
    }
}

/// Interactive yes/no gate in front of destructive actions.
pub trait Confirmation {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirmation for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

pub(crate) fn is_rejection(error: &RepositoryError) -> bool {
    matches!(error, RepositoryError::Unauthorized)
}
