//! Persisted authentication state: [`StorageState`] and [`StateStore`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Serialized browser-storage snapshot: cookies plus per-origin local
/// storage. Matches the storage-state JSON layout emitted by mainstream
/// automation tooling so existing captures remain loadable.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StorageState {
	#[serde(default)]
	pub cookies: Vec<StoredCookie>,
	#[serde(default)]
	pub origins: Vec<OriginState>,
}

impl StorageState {
	/// Local-storage entries captured for `origin`, if any.
	pub fn local_storage_for(&self, origin: &str) -> Option<&[LocalStorageEntry]> {
		self.origins
			.iter()
			.find(|o| o.origin == origin)
			.map(|o| o.local_storage.as_slice())
	}

	pub fn is_empty(&self) -> bool {
		self.cookies.is_empty() && self.origins.is_empty()
	}
}

/// One captured cookie.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredCookie {
	pub name: String,
	pub value: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub domain: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub path: Option<String>,
	/// Unix epoch seconds; negative means session cookie.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub expires: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub secure: Option<bool>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub http_only: Option<bool>,
}

/// Local storage captured for one origin.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OriginState {
	pub origin: String,
	#[serde(default)]
	pub local_storage: Vec<LocalStorageEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocalStorageEntry {
	pub name: String,
	pub value: String,
}

/// File-backed cache for one [`StorageState`].
///
/// The file is written once under an existence check and trusted verbatim
/// until [`invalidate`](StateStore::invalidate) deletes it. Two workers
/// racing on first-time login may both write; login is idempotent so the
/// race is benign.
#[derive(Debug, Clone)]
pub struct StateStore {
	path: PathBuf,
}

impl StateStore {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn exists(&self) -> bool {
		self.path.exists()
	}

	/// Loads the persisted state, `None` when the file does not exist.
	pub fn load(&self) -> Result<Option<StorageState>> {
		if !self.path.exists() {
			return Ok(None);
		}
		let content = fs::read_to_string(&self.path)?;
		Ok(Some(serde_json::from_str(&content)?))
	}

	/// Persists `state` unless a file is already present.
	///
	/// Returns true when this call wrote the file.
	pub fn save_if_absent(&self, state: &StorageState) -> Result<bool> {
		if self.path.exists() {
			return Ok(false);
		}
		self.save(state)?;
		Ok(true)
	}

	/// Unconditionally persists `state`.
	pub fn save(&self, state: &StorageState) -> Result<()> {
		if let Some(parent) = self.path.parent() {
			fs::create_dir_all(parent)?;
		}
		fs::write(&self.path, serde_json::to_string_pretty(state)?)?;
		Ok(())
	}

	/// Deletes the persisted state, forcing re-login on next use.
	pub fn invalidate(&self) -> Result<()> {
		if self.path.exists() {
			fs::remove_file(&self.path)?;
		}
		Ok(())
	}
}
