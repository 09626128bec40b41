pub mod entry;
pub mod policy;
pub mod role;
pub mod wallet;

pub use entry::{Direction, EntryStatus, WalletEntry};
pub use policy::AccessPolicy;
pub use role::UserRole;
pub use wallet::Wallet;
