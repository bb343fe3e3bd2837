use crate::bank::account::Account;
use crate::utils::error::Result;
use crate::utils::prompt::Prompter;
use std::io::{BufRead, Write};

const FALLBACK_TRY_LIMIT: u32 = 2;

/// ATM 工作階段的結束方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtmExit {
    Goodbye,
    LockedOut,
}

impl AtmExit {
    pub fn exit_code(self) -> i32 {
        match self {
            AtmExit::Goodbye => 0,
            AtmExit::LockedOut => 1,
        }
    }
}

/// 登入嘗試的結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginAttempt {
    Success(usize),
    Failed { tries: u32, limit: u32 },
    LockedOut,
}

pub struct Atm {
    accounts: Vec<Box<dyn Account>>,
    try_limit: u32,
    current_tries: u32,
}

impl Atm {
    pub fn new(accounts: Vec<Box<dyn Account>>, try_limit: i64) -> Self {
        let try_limit = match u32::try_from(try_limit) {
            Ok(limit) if limit > 0 => limit,
            _ => {
                tracing::warn!(
                    "⚠️ [ATM WARNING] try_limit must be a positive integer (got {}). Falling back to try_limit={}.",
                    try_limit,
                    FALLBACK_TRY_LIMIT
                );
                FALLBACK_TRY_LIMIT
            }
        };

        Self {
            accounts,
            try_limit,
            current_tries: 0,
        }
    }

    pub fn try_limit(&self) -> u32 {
        self.try_limit
    }

    pub fn current_tries(&self) -> u32 {
        self.current_tries
    }

    pub fn account(&self, index: usize) -> Option<&dyn Account> {
        self.accounts.get(index).map(|a| a.as_ref())
    }

    /// 嘗試登入；成功時重設失敗次數
    pub fn log_in(&mut self, username: &str, password: &str) -> LoginAttempt {
        if let Some(index) = self
            .accounts
            .iter_mut()
            .position(|acc| acc.authenticate(username, password))
        {
            self.current_tries = 0;
            tracing::info!("🔓 {} logged in", username);
            return LoginAttempt::Success(index);
        }

        self.current_tries += 1;
        tracing::warn!(
            "Login failed for '{}' ({}/{})",
            username,
            self.current_tries,
            self.try_limit
        );
        if self.current_tries >= self.try_limit {
            LoginAttempt::LockedOut
        } else {
            LoginAttempt::Failed {
                tries: self.current_tries,
                limit: self.try_limit,
            }
        }
    }

    /// 主選單迴圈
    pub fn run<R: BufRead, W: Write>(&mut self, prompter: &mut Prompter<R, W>) -> Result<AtmExit> {
        loop {
            prompter.say("\n=== ATM Main Menu ===")?;
            prompter.say("1) Log in")?;
            prompter.say("2) Exit")?;
            let Some(choice) = prompter.ask("Select an option: ")? else {
                return Ok(AtmExit::Goodbye);
            };

            match choice.trim() {
                "1" => {
                    if let Some(exit) = self.login_flow(prompter)? {
                        return Ok(exit);
                    }
                }
                "2" => {
                    prompter.say("Goodbye!")?;
                    return Ok(AtmExit::Goodbye);
                }
                _ => prompter.say("Invalid selection. Please try again.")?,
            }
        }
    }

    fn login_flow<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<Option<AtmExit>> {
        loop {
            let Some(username) = prompter.ask("Username: ")? else {
                return Ok(Some(AtmExit::Goodbye));
            };
            let Some(password) = prompter.ask("Password: ")? else {
                return Ok(Some(AtmExit::Goodbye));
            };

            match self.log_in(username.trim(), password.trim()) {
                LoginAttempt::Success(index) => {
                    let name = self.accounts[index].username().to_string();
                    prompter.say(format!("Welcome, {}!", name))?;
                    self.account_menu(index, prompter)?;
                    return Ok(None);
                }
                LoginAttempt::Failed { tries, limit } => {
                    prompter.say(format!("Login failed. Tries: {}/{}", tries, limit))?;
                }
                LoginAttempt::LockedOut => {
                    prompter
                        .say("You have reached the maximum number of tries. Shutting down.")?;
                    return Ok(Some(AtmExit::LockedOut));
                }
            }
        }
    }

    fn account_menu<R: BufRead, W: Write>(
        &mut self,
        index: usize,
        prompter: &mut Prompter<R, W>,
    ) -> Result<()> {
        loop {
            prompter.say("\n=== Account Menu ===")?;
            prompter.say("1) Balance")?;
            prompter.say("2) Deposit")?;
            prompter.say("3) Withdraw")?;
            prompter.say("4) Log out")?;
            let Some(choice) = prompter.ask("Select an option: ")? else {
                self.accounts[index].logout();
                return Ok(());
            };

            let account = &mut self.accounts[index];
            match choice.trim() {
                "1" => prompter.say(format!("Current balance: {}", account.balance()))?,
                "2" => {
                    let raw = prompter.ask("Amount to deposit (integer): ")?.unwrap_or_default();
                    match parse_amount(&raw) {
                        Ok(amount) => match account.deposit(amount) {
                            Ok(balance) => prompter
                                .say(format!("Deposited {}. Balance: {}", amount, balance))?,
                            Err(e) => prompter.say(format!("Error: {}", e))?,
                        },
                        Err(message) => prompter.say(format!("Error: {}", message))?,
                    }
                }
                "3" => {
                    let raw = prompter.ask("Amount to withdraw (integer): ")?.unwrap_or_default();
                    match parse_amount(&raw) {
                        Ok(amount) => match account.withdraw(amount) {
                            Ok(balance) => prompter
                                .say(format!("Withdrew {}. Balance: {}", amount, balance))?,
                            Err(e) => prompter.say(format!("Error: {}", e))?,
                        },
                        Err(message) => prompter.say(format!("Error: {}", message))?,
                    }
                }
                "4" => {
                    account.logout();
                    prompter.say("Logged out.")?;
                    return Ok(());
                }
                _ => prompter.say("Invalid selection. Please try again.")?,
            }
        }
    }
}

fn parse_amount(raw: &str) -> std::result::Result<i64, String> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| format!("'{}' is not a whole number.", raw.trim()))
}
