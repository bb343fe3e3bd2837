use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BankError {
    #[error("Action not allowed: user not authenticated.")]
    NotAuthenticated,

    #[error("{action} amount must be a positive integer.")]
    InvalidAmount { action: &'static str },

    #[error("Insufficient funds.")]
    InsufficientFunds,

    #[error("Cannot withdraw {amount}: balance would drop below minimum ({minimum}).")]
    BelowMinimum { amount: i64, minimum: i64 },

    #[error("Deposit of {amount} would overflow the balance.")]
    BalanceOverflow { amount: i64 },
}

/// 所有帳戶共用的狀態
#[derive(Debug, Clone)]
pub struct Credentials {
    username: String,
    password: String,
    authenticated: bool,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            authenticated: false,
        }
    }
}

pub trait Account: Send {
    fn credentials(&self) -> &Credentials;
    fn credentials_mut(&mut self) -> &mut Credentials;
    fn balance(&self) -> i64;
    fn set_balance(&mut self, balance: i64);

    /// 檢查提款後的餘額是否允許
    fn check_withdrawal(&self, amount: i64) -> Result<(), BankError>;

    fn username(&self) -> &str {
        &self.credentials().username
    }

    fn is_authenticated(&self) -> bool {
        self.credentials().authenticated
    }

    fn authenticate(&mut self, username: &str, password: &str) -> bool {
        let creds = self.credentials_mut();
        if creds.username == username && creds.password == password {
            creds.authenticated = true;
            return true;
        }
        false
    }

    fn logout(&mut self) {
        self.credentials_mut().authenticated = false;
    }

    fn ensure_authenticated(&self) -> Result<(), BankError> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(BankError::NotAuthenticated)
        }
    }

    fn deposit(&mut self, amount: i64) -> Result<i64, BankError> {
        self.ensure_authenticated()?;
        if amount <= 0 {
            return Err(BankError::InvalidAmount { action: "Deposit" });
        }
        let balance = self
            .balance()
            .checked_add(amount)
            .ok_or(BankError::BalanceOverflow { amount })?;
        self.set_balance(balance);
        tracing::debug!("💰 {} deposited {} (balance {})", self.username(), amount, balance);
        Ok(balance)
    }

    fn withdraw(&mut self, amount: i64) -> Result<i64, BankError> {
        self.ensure_authenticated()?;
        if amount <= 0 {
            return Err(BankError::InvalidAmount { action: "Withdrawal" });
        }
        self.check_withdrawal(amount)?;
        let balance = self.balance() - amount;
        self.set_balance(balance);
        tracing::debug!("💸 {} withdrew {} (balance {})", self.username(), amount, balance);
        Ok(balance)
    }
}

#[derive(Debug, Clone)]
pub struct BankAccount {
    credentials: Credentials,
    balance: i64,
}

impl BankAccount {
    pub fn new(balance: i64, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(username, password),
            balance,
        }
    }
}

impl Account for BankAccount {
    fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn credentials_mut(&mut self) -> &mut Credentials {
        &mut self.credentials
    }

    fn balance(&self) -> i64 {
        self.balance
    }

    fn set_balance(&mut self, balance: i64) {
        self.balance = balance;
    }

    fn check_withdrawal(&self, amount: i64) -> Result<(), BankError> {
        if amount > self.balance {
            return Err(BankError::InsufficientFunds);
        }
        Ok(())
    }
}

/// 餘額不得低於最低限額的帳戶
#[derive(Debug, Clone)]
pub struct MinimumBalanceAccount {
    account: BankAccount,
    minimum_balance: i64,
}

impl MinimumBalanceAccount {
    pub fn new(
        balance: i64,
        username: impl Into<String>,
        password: impl Into<String>,
        minimum_balance: i64,
    ) -> Self {
        Self {
            account: BankAccount::new(balance, username, password),
            minimum_balance,
        }
    }

    pub fn minimum_balance(&self) -> i64 {
        self.minimum_balance
    }
}

impl Account for MinimumBalanceAccount {
    fn credentials(&self) -> &Credentials {
        self.account.credentials()
    }

    fn credentials_mut(&mut self) -> &mut Credentials {
        self.account.credentials_mut()
    }

    fn balance(&self) -> i64 {
        self.account.balance()
    }

    fn set_balance(&mut self, balance: i64) {
        self.account.set_balance(balance);
    }

    fn check_withdrawal(&self, amount: i64) -> Result<(), BankError> {
        if self.balance() - amount < self.minimum_balance {
            return Err(BankError::BelowMinimum {
                amount,
                minimum: self.minimum_balance,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operations_require_authentication() {
        let mut account = BankAccount::new(300, "alice", "1234");
        assert_eq!(account.deposit(10), Err(BankError::NotAuthenticated));

        assert!(!account.authenticate("alice", "wrong"));
        assert!(account.authenticate("alice", "1234"));
        assert_eq!(account.deposit(10), Ok(310));
    }

    #[test]
    fn test_rejects_non_positive_amounts() {
        let mut account = BankAccount::new(300, "alice", "1234");
        account.authenticate("alice", "1234");
        assert_eq!(
            account.deposit(0),
            Err(BankError::InvalidAmount { action: "Deposit" })
        );
        assert_eq!(
            account.withdraw(-5),
            Err(BankError::InvalidAmount { action: "Withdrawal" })
        );
    }

    #[test]
    fn test_deposit_overflow_leaves_balance_untouched() {
        let mut account = BankAccount::new(300, "alice", "1234");
        account.authenticate("alice", "1234");
        assert_eq!(
            account.deposit(i64::MAX),
            Err(BankError::BalanceOverflow { amount: i64::MAX })
        );
        assert_eq!(account.balance(), 300);
        assert_eq!(account.deposit(1), Ok(301));
    }

    #[test]
    fn test_withdraw_limits() {
        let mut plain = BankAccount::new(300, "alice", "1234");
        plain.authenticate("alice", "1234");
        assert_eq!(plain.withdraw(301), Err(BankError::InsufficientFunds));
        assert_eq!(plain.withdraw(300), Ok(0));

        let mut guarded = MinimumBalanceAccount::new(1000, "bob", "abcd", 200);
        guarded.authenticate("bob", "abcd");
        assert_eq!(guarded.withdraw(800), Ok(200));
        assert_eq!(
            guarded.withdraw(1),
            Err(BankError::BelowMinimum {
                amount: 1,
                minimum: 200
            })
        );
    }

    #[test]
    fn test_logout_clears_authentication() {
        let mut account = MinimumBalanceAccount::new(1000, "bob", "abcd", 200);
        account.authenticate("bob", "abcd");
        account.logout();
        assert!(!account.is_authenticated());
        assert_eq!(account.withdraw(10), Err(BankError::NotAuthenticated));
    }
}
