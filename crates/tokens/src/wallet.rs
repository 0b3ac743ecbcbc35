//! The player's side of the token balance.
//!
//! A wallet owns a device id and a small JSON profile on disk. The server is
//! authoritative when reachable; the profile keeps the balance across runs
//! when it is not.

use crate::types::{SaveUserDataRequest, UserRecord};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const PROFILE_FILE: &str = "profile.json";
const RANDOM_SUFFIX_LEN: usize = 13;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    #[error("profile i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("profile {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to encode profile: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub device_id: String,
    #[serde(default)]
    pub hopla_tokens: u64,
}

#[derive(Debug)]
pub struct Wallet {
    dir: PathBuf,
    data: UserData,
}

impl Wallet {
    /// Platform data directory, or the working directory if none is known.
    pub fn default_dir() -> PathBuf {
        directories::ProjectDirs::from("com", "hopla", "HoplaArcade")
            .map(|dirs| dirs.data_local_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("./"))
    }

    /// Reads the profile in `dir`, creating one with a fresh device id if there is none.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, WalletError> {
        let dir = dir.into();
        let path = dir.join(PROFILE_FILE);

        let data = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).map_err(|source| WalletError::Corrupt {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let data = UserData {
                    device_id: generate_device_id(&mut rand::thread_rng()),
                    hopla_tokens: 0,
                };
                tracing::info!(device_id = %data.device_id, "new device id");
                data
            }
            Err(e) => return Err(e.into()),
        };

        let wallet = Self { dir, data };
        wallet.save()?;
        Ok(wallet)
    }

    pub fn device_id(&self) -> &str {
        &self.data.device_id
    }

    pub fn balance(&self) -> u64 {
        self.data.hopla_tokens
    }

    pub fn profile_path(&self) -> PathBuf {
        self.dir.join(PROFILE_FILE)
    }

    /// Takes the server's balance when there is one, otherwise keeps the cached value.
    pub fn load(&mut self, remote: Option<&UserRecord>) -> Result<u64, WalletError> {
        if let Some(record) = remote {
            if record.hopla_tokens != self.data.hopla_tokens {
                tracing::debug!(
                    local = self.data.hopla_tokens,
                    remote = record.hopla_tokens,
                    "balance taken from server"
                );
            }
            self.data.hopla_tokens = record.hopla_tokens;
            self.save()?;
        }
        Ok(self.data.hopla_tokens)
    }

    /// Credits locally and returns the request that pushes the new balance upstream.
    pub fn add_tokens(
        &mut self,
        amount: u64,
        score: Option<u64>,
    ) -> Result<SaveUserDataRequest, WalletError> {
        self.data.hopla_tokens = self.data.hopla_tokens.saturating_add(amount);
        self.save()?;
        tracing::info!(amount, balance = self.data.hopla_tokens, "tokens awarded");

        Ok(SaveUserDataRequest {
            device_id: self.data.device_id.clone(),
            hopla_tokens: self.data.hopla_tokens,
            score,
        })
    }

    /// Zeroes the balance. The device id is kept.
    pub fn reset(&mut self) -> Result<(), WalletError> {
        self.data.hopla_tokens = 0;
        self.save()
    }

    fn save(&self) -> Result<(), WalletError> {
        std::fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_vec_pretty(&self.data)?;
        write_atomic(&self.profile_path(), &json)?;
        Ok(())
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, bytes)?;
    std::fs::rename(&tmp, path)
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

/// `device_<base36 millis>_<13 random base36 chars>`
pub fn generate_device_id(rng: &mut impl Rng) -> String {
    let millis = crate::store::now_millis();
    let suffix: String = (0..RANDOM_SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("device_{}_{}", to_base36(millis), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tokens: u64) -> UserRecord {
        UserRecord {
            device_id: "device_x".into(),
            hopla_tokens: tokens,
            total_wins: 1,
            last_score: 5,
            last_updated: 0,
        }
    }

    #[test]
    fn base36_digits() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(1_295), "zz");
    }

    #[test]
    fn device_id_shape() {
        let id = generate_device_id(&mut rand::thread_rng());
        let parts: Vec<_> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "device");
        assert_eq!(parts[2].len(), RANDOM_SUFFIX_LEN);
        assert!(parts[1..]
            .iter()
            .all(|p| p.bytes().all(|b| BASE36.contains(&b))));
    }

    #[test]
    fn device_id_embeds_the_store_clock() {
        let before = crate::store::now_millis();
        let id = generate_device_id(&mut rand::thread_rng());
        let after = crate::store::now_millis();

        let stamp = id.split('_').nth(1).unwrap();
        let millis = u64::from_str_radix(stamp, 36).unwrap();
        assert!((before..=after).contains(&millis));
    }

    #[test]
    fn device_id_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let mut wallet = Wallet::open(dir.path()).unwrap();
        let id = wallet.device_id().to_string();
        wallet.add_tokens(2, Some(5)).unwrap();

        let reopened = Wallet::open(dir.path()).unwrap();
        assert_eq!(reopened.device_id(), id);
        assert_eq!(reopened.balance(), 2);
    }

    #[test]
    fn load_prefers_remote_then_cache() {
        let dir = tempfile::tempdir().unwrap();
        let mut wallet = Wallet::open(dir.path()).unwrap();
        assert_eq!(wallet.load(None).unwrap(), 0);

        wallet.add_tokens(1, None).unwrap();
        assert_eq!(wallet.load(None).unwrap(), 1);
        assert_eq!(wallet.load(Some(&record(7))).unwrap(), 7);
        assert_eq!(Wallet::open(dir.path()).unwrap().balance(), 7);
    }

    #[test]
    fn add_tokens_builds_sync_request() {
        let dir = tempfile::tempdir().unwrap();
        let mut wallet = Wallet::open(dir.path()).unwrap();
        wallet.load(Some(&record(3))).unwrap();

        let request = wallet.add_tokens(1, Some(5)).unwrap();
        assert_eq!(request.device_id, wallet.device_id());
        assert_eq!(request.hopla_tokens, 4);
        assert_eq!(request.score, Some(5));
    }

    #[test]
    fn reset_keeps_device_id() {
        let dir = tempfile::tempdir().unwrap();
        let mut wallet = Wallet::open(dir.path()).unwrap();
        let id = wallet.device_id().to_string();
        wallet.add_tokens(9, None).unwrap();
        wallet.reset().unwrap();
        assert_eq!(wallet.balance(), 0);
        assert_eq!(wallet.device_id(), id);
    }

    #[test]
    fn corrupt_profile_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(PROFILE_FILE), "nope").unwrap();
        assert!(matches!(
            Wallet::open(dir.path()),
            Err(WalletError::Corrupt { .. })
        ));
    }
}
