pub mod account;
pub mod atm;

pub use account::{Account, BankAccount, BankError, MinimumBalanceAccount};
pub use atm::{Atm, AtmExit, LoginAttempt};
