pub mod privatbank;

pub use privatbank::{DEFAULT_BASE_URL, PrivatBankProvider};
