//! The local account store: one JSON document holding every saved account.
//!
//! The whole document is read, modified in memory and rewritten on every
//! mutation. There is no locking; concurrent external writers can race and
//! lose updates, which is an accepted limitation for an operator tool.

use std::fmt::{Debug, Formatter};
use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use ecsctl_aliyun_ecs::{Credential, Region};
use ecsctl_core::utils::Redact;
use ecsctl_core::{Error, Result};

/// One set of stored cloud credentials.
#[derive(Clone, Serialize, Deserialize)]
pub struct Account {
    /// Store-assigned identifier, unique among the saved accounts.
    pub id: String,
    /// Operator-supplied display label.
    pub name: String,
    /// Creation date as entered by the operator; never interpreted.
    pub date: String,
    /// Access key id, sent in plaintext with every request.
    pub access_key_id: String,
    /// Access key secret, used only as HMAC key material.
    pub access_key_secret: String,
    /// Region this account operates in.
    pub region_id: Region,
}

impl Account {
    /// The signing credential for this account.
    pub fn credential(&self) -> Credential {
        Credential::new(&self.access_key_id, &self.access_key_secret)
    }
}

impl Debug for Account {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("date", &self.date)
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("access_key_secret", &Redact::from(&self.access_key_secret))
            .field("region_id", &self.region_id)
            .finish()
    }
}

/// The persisted document: `{ "accounts": [...] }`.
#[derive(Default, Serialize, Deserialize)]
struct Document {
    accounts: Vec<Account>,
}

/// Where accounts are loaded from and saved to.
///
/// Implementations persist the whole list at once; callers do the
/// read-modify-write as one scoped transaction.
pub trait AccountRepository {
    /// Load every stored account.
    fn load(&self) -> Result<Vec<Account>>;

    /// Replace the stored accounts with the given list.
    fn save(&self, accounts: &[Account]) -> Result<()>;
}

/// File-backed repository holding the JSON document.
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    /// Create a repository backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AccountRepository for JsonFileRepository {
    fn load(&self) -> Result<Vec<Account>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            // A store that does not exist yet is simply empty.
            Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let doc: Document = serde_json::from_str(&raw).map_err(|e| {
            Error::config_invalid(format!("malformed account store {}", self.path.display()))
                .with_source(e)
        })?;
        Ok(doc.accounts)
    }

    fn save(&self, accounts: &[Account]) -> Result<()> {
        let doc = Document {
            accounts: accounts.to_vec(),
        };
        let raw = serde_json::to_string_pretty(&doc)
            .map_err(|e| Error::unexpected("failed to serialize account store").with_source(e))?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

/// High-level account operations, each one scoped load-modify-save
/// transaction against the repository.
pub struct AccountStore<R: AccountRepository> {
    repo: R,
}

impl<R: AccountRepository> AccountStore<R> {
    /// Wrap a repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// All stored accounts, in insertion order.
    pub fn list(&self) -> Result<Vec<Account>> {
        self.repo.load()
    }

    /// Add a new account and return it with its assigned id.
    pub fn add(
        &self,
        name: impl Into<String>,
        date: impl Into<String>,
        access_key_id: impl Into<String>,
        access_key_secret: impl Into<String>,
        region_id: Region,
    ) -> Result<Account> {
        let mut accounts = self.repo.load()?;
        let account = Account {
            id: next_id(&accounts),
            name: name.into(),
            date: date.into(),
            access_key_id: access_key_id.into(),
            access_key_secret: access_key_secret.into(),
            region_id,
        };
        accounts.push(account.clone());
        self.repo.save(&accounts)?;
        Ok(account)
    }

    /// Remove every account whose id matches, returning how many went away.
    pub fn remove(&self, id: &str) -> Result<usize> {
        let mut accounts = self.repo.load()?;
        let before = accounts.len();
        accounts.retain(|a| a.id != id);
        let removed = before - accounts.len();
        if removed > 0 {
            self.repo.save(&accounts)?;
        }
        Ok(removed)
    }
}

/// Pick the id for a new account: one past the highest numeric id in use.
///
/// Deleting an account in the middle of the list therefore never re-issues
/// a surviving record's id. Non-numeric ids (hand-edited stores) fall back
/// to counting records.
fn next_id(accounts: &[Account]) -> String {
    let highest = accounts
        .iter()
        .filter_map(|a| a.id.parse::<u64>().ok())
        .max()
        .unwrap_or(accounts.len() as u64);
    (highest + 1).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> AccountStore<JsonFileRepository> {
        AccountStore::new(JsonFileRepository::new(dir.path().join("access.json")))
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(store_in(&dir).list().unwrap().is_empty());
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let a = store
            .add("prod", "2024-01-01", "key-a", "secret-a", Region::ApSoutheast5)
            .unwrap();
        let b = store
            .add("staging", "2024-02-01", "key-b", "secret-b", Region::ApSoutheast1)
            .unwrap();
        assert_eq!(a.id, "1");
        assert_eq!(b.id, "2");

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "prod");
        assert_eq!(listed[1].region_id, Region::ApSoutheast1);
    }

    #[test]
    fn test_add_after_remove_does_not_reuse_surviving_id() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.add("a", "d", "k", "s", Region::ApSoutheast5).unwrap();
        store.add("b", "d", "k", "s", Region::ApSoutheast5).unwrap();
        store.add("c", "d", "k", "s", Region::ApSoutheast5).unwrap();
        assert_eq!(store.remove("2").unwrap(), 1);

        // The legacy len+1 scheme would hand out "3" again here.
        let d = store.add("d", "d", "k", "s", Region::ApSoutheast5).unwrap();
        assert_eq!(d.id, "4");
    }

    #[test]
    fn test_remove_filters_every_match() {
        let dir = TempDir::new().unwrap();
        let repo = JsonFileRepository::new(dir.path().join("access.json"));

        // Hand-build a store with colliding ids, as the legacy len+1 scheme
        // could produce.
        let dup = |name: &str| Account {
            id: "1".to_string(),
            name: name.to_string(),
            date: "2024-01-01".to_string(),
            access_key_id: "k".to_string(),
            access_key_secret: "s".to_string(),
            region_id: Region::ApSoutheast5,
        };
        repo.save(&[dup("first"), dup("second")]).unwrap();

        let store = AccountStore::new(repo);
        assert_eq!(store.remove("1").unwrap(), 2);
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.add("a", "d", "k", "s", Region::ApSoutheast5).unwrap();
        assert_eq!(store.remove("99").unwrap(), 0);
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_document_shape_on_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("access.json");
        let store = AccountStore::new(JsonFileRepository::new(&path));
        store
            .add("prod", "2024-01-01", "key-a", "secret-a", Region::ApSoutheast3)
            .unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(doc["accounts"][0]["id"], "1");
        assert_eq!(doc["accounts"][0]["region_id"], "ap-southeast-3");
    }

    #[test]
    fn test_malformed_store_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("access.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonFileRepository::new(&path).load().unwrap_err();
        assert_eq!(err.kind(), ecsctl_core::ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let account = Account {
            id: "1".to_string(),
            name: "prod".to_string(),
            date: "2024-01-01".to_string(),
            access_key_id: "LTAI5tAbCdEfGhIj".to_string(),
            access_key_secret: "verysecretverysecret".to_string(),
            region_id: Region::ApSoutheast5,
        };
        let out = format!("{account:?}");
        assert!(!out.contains("verysecretverysecret"));
    }
}
