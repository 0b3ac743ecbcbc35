//! Per-device token balances: storage, the HTTP API over it, a client for that
//! API and the local wallet the games credit.

pub mod api;
pub mod client;
pub mod store;
pub mod types;
pub mod wallet;

pub use api::{router, ApiError};
pub use client::{ClientError, TokenClient};
pub use store::{AnyStore, FileStore, MemoryStore, StoreError, TokenStore};
pub use types::{ApiResponse, SaveUserDataRequest, UserRecord};
pub use wallet::{UserData, Wallet, WalletError};
