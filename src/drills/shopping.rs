use crate::utils::error::{DrillError, Result};
use std::collections::BTreeSet;
use std::fmt;

pub const PIZZA_BASE_PRICE: f64 = 10.0;
pub const PIZZA_TOPPING_PRICE: f64 = 2.5;

/// 移除所有非數字字元："$1,000" → 1000
pub fn clean_price(raw: &str) -> Result<u64> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    digits.parse().map_err(|_| DrillError::InvalidInput {
        field: "price".to_string(),
        value: raw.to_string(),
        reason: "Price contains no digits".to_string(),
    })
}

/// 購物結果，空籃子顯示為 "Nothing"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchase(pub Vec<String>);

impl fmt::Display for Purchase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("Nothing")
        } else {
            write!(f, "{:?}", self.0)
        }
    }
}

/// 依優先順序購買買得起的商品，最後以字母排序
pub fn affordable_items(items: &[(&str, &str)], wallet: &str) -> Result<Purchase> {
    let mut remaining = clean_price(wallet)?;
    let mut basket = Vec::new();

    for (item, price) in items {
        let price = clean_price(price)?;
        if remaining >= price {
            basket.push(item.to_string());
            remaining -= price;
        }
    }

    basket.sort();
    tracing::debug!("🛒 Bought {} items, {} left in wallet", basket.len(), remaining);
    Ok(Purchase(basket))
}

pub fn ticket_price(age: u32) -> u32 {
    match age {
        0..=2 => 0,
        3..=12 => 10,
        _ => 15,
    }
}

pub fn family_ticket_total(ages: &[u32]) -> u32 {
    ages.iter().copied().map(ticket_price).sum()
}

/// 限制級電影只允許 16 到 21 歲
pub fn restricted_attendees(ages: &[u32]) -> Vec<u32> {
    ages.iter().copied().filter(|age| (16..=21).contains(age)).collect()
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PizzaOrder {
    toppings: Vec<String>,
}

impl PizzaOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入配料並回傳提示訊息
    pub fn add_topping(&mut self, topping: &str) -> String {
        let topping = topping.trim().to_lowercase();
        let message = format!("Adding {} to your pizza.", topping);
        self.toppings.push(topping);
        message
    }

    pub fn toppings(&self) -> &[String] {
        &self.toppings
    }

    pub fn total_cost(&self) -> f64 {
        PIZZA_BASE_PRICE + self.toppings.len() as f64 * PIZZA_TOPPING_PRICE
    }

    pub fn summary(&self) -> String {
        let toppings = if self.toppings.is_empty() {
            "No extra toppings".to_string()
        } else {
            self.toppings.join(", ")
        };
        format!(
            "\n--- Your Pizza Order ---\nToppings: {}\nTotal cost: ${:.2}",
            toppings,
            self.total_cost()
        )
    }
}

/// 1.5, 2, 2.5, ..., 5，不逐一寫死
pub fn half_step_sequence() -> Vec<f64> {
    (3..=10).map(|x| f64::from(x) / 2.0).collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteNumbers(BTreeSet<i64>);

impl FavoriteNumbers {
    pub fn new(numbers: impl IntoIterator<Item = i64>) -> Self {
        Self(numbers.into_iter().collect())
    }

    pub fn add(&mut self, n: i64) -> bool {
        self.0.insert(n)
    }

    pub fn remove(&mut self, n: i64) -> bool {
        self.0.remove(&n)
    }

    pub fn union(&self, other: &FavoriteNumbers) -> FavoriteNumbers {
        FavoriteNumbers(self.0.union(&other.0).copied().collect())
    }

    pub fn to_vec(&self) -> Vec<i64> {
        self.0.iter().copied().collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Basket(Vec<String>);

impl Basket {
    pub fn new(items: &[&str]) -> Self {
        Self(items.iter().map(|s| s.to_string()).collect())
    }

    /// 移除第一個相符的項目
    pub fn remove(&mut self, item: &str) -> bool {
        match self.0.iter().position(|i| i == item) {
            Some(index) => {
                self.0.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn push(&mut self, item: &str) {
        self.0.push(item.to_string());
    }

    pub fn insert_front(&mut self, item: &str) {
        self.0.insert(0, item.to_string());
    }

    pub fn count(&self, item: &str) -> usize {
        self.0.iter().filter(|i| *i == item).count()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn items(&self) -> &[String] {
        &self.0
    }
}
