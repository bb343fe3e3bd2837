use crate::utils::error::{DrillError, Result};
use std::fmt;
use std::ops::{Add, AddAssign};

#[derive(Debug, Clone, PartialEq)]
pub struct Currency {
    currency: String,
    amount: f64,
}

impl Currency {
    pub fn new(currency: impl Into<String>, amount: f64) -> Self {
        Self {
            currency: currency.into(),
            amount,
        }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn as_int(&self) -> i64 {
        self.amount.trunc() as i64
    }

    fn ensure_same_currency(&self, other: &Currency) -> Result<()> {
        if self.currency != other.currency {
            return Err(DrillError::ValidationError {
                message: format!(
                    "Cannot add between Currency type <{}> and <{}>",
                    self.currency, other.currency
                ),
            });
        }
        Ok(())
    }

    /// 相同幣別相加，回傳金額
    pub fn checked_add(&self, other: &Currency) -> Result<f64> {
        self.ensure_same_currency(other)?;
        Ok(self.amount + other.amount)
    }

    pub fn try_add_assign(&mut self, other: &Currency) -> Result<()> {
        self.ensure_same_currency(other)?;
        self.amount += other.amount;
        Ok(())
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = if self.amount == 1.0 || self.currency.ends_with('s') {
            ""
        } else {
            "s"
        };
        write!(f, "{} {}{}", self.amount, self.currency, suffix)
    }
}

impl Add<f64> for &Currency {
    type Output = f64;

    fn add(self, rhs: f64) -> f64 {
        self.amount + rhs
    }
}

impl Add<&Currency> for f64 {
    type Output = f64;

    fn add(self, rhs: &Currency) -> f64 {
        self + rhs.amount
    }
}

/// 幣別不同時回傳錯誤，因此結果是 `Result`
impl Add<&Currency> for &Currency {
    type Output = Result<f64>;

    fn add(self, rhs: &Currency) -> Result<f64> {
        self.checked_add(rhs)
    }
}

impl AddAssign<f64> for Currency {
    fn add_assign(&mut self, rhs: f64) {
        self.amount += rhs;
    }
}
