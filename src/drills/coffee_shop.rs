use crate::utils::error::{DrillError, Result};
use crate::utils::prompt::Prompter;
use std::io::{BufRead, Write};

/// 依加入順序排列的飲料價目表
#[derive(Debug, Clone, PartialEq)]
pub struct Menu {
    items: Vec<(String, f64)>,
}

impl Default for Menu {
    fn default() -> Self {
        Self {
            items: vec![
                ("espresso".to_string(), 7.0),
                ("latte".to_string(), 12.0),
                ("cappuccino".to_string(), 10.0),
            ],
        }
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

fn not_found(name: &str) -> DrillError {
    DrillError::InvalidInput {
        field: "item".to_string(),
        value: name.to_string(),
        reason: "Item not found.".to_string(),
    }
}

impl Menu {
    pub fn empty() -> Self {
        Self { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn search(&self, name: &str) -> Option<f64> {
        let name = normalize(name);
        self.items
            .iter()
            .find(|(item, _)| *item == name)
            .map(|(_, price)| *price)
    }

    pub fn add_item(&mut self, name: &str, price: f64) -> Result<()> {
        let name = normalize(name);
        if name.is_empty() {
            return Err(DrillError::InvalidInput {
                field: "item".to_string(),
                value: name,
                reason: "Item name cannot be empty.".to_string(),
            });
        }
        if self.search(&name).is_some() {
            return Err(DrillError::InvalidInput {
                field: "item".to_string(),
                value: name,
                reason: "Item already exists!".to_string(),
            });
        }
        validate_price(price)?;
        self.items.push((name, price));
        Ok(())
    }

    pub fn update_price(&mut self, name: &str, price: f64) -> Result<()> {
        validate_price(price)?;
        let name = normalize(name);
        let entry = self
            .items
            .iter_mut()
            .find(|(item, _)| *item == name)
            .ok_or_else(|| not_found(&name))?;
        entry.1 = price;
        Ok(())
    }

    pub fn delete_item(&mut self, name: &str) -> Result<()> {
        let name = normalize(name);
        let index = self
            .items
            .iter()
            .position(|(item, _)| *item == name)
            .ok_or_else(|| not_found(&name))?;
        self.items.remove(index);
        Ok(())
    }

    /// 全部品項打折，價格四捨五入到小數點後兩位
    pub fn apply_discount(&mut self, percent: f64) -> Result<()> {
        if !(0.0..=100.0).contains(&percent) {
            return Err(DrillError::InvalidInput {
                field: "percent".to_string(),
                value: percent.to_string(),
                reason: "Percent must be between 0 and 100.".to_string(),
            });
        }
        for (_, price) in &mut self.items {
            *price = (*price * (1.0 - percent / 100.0) * 100.0).round() / 100.0;
        }
        Ok(())
    }

    pub fn render(&self) -> String {
        if self.items.is_empty() {
            return "The menu is empty.".to_string();
        }
        let mut lines = vec!["Current menu:".to_string()];
        lines.extend(
            self.items
                .iter()
                .map(|(name, price)| format!("{} - {:.1}₪", name, price)),
        );
        lines.join("\n")
    }
}

fn validate_price(price: f64) -> Result<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(DrillError::InvalidInput {
            field: "price".to_string(),
            value: price.to_string(),
            reason: "Invalid price.".to_string(),
        });
    }
    Ok(())
}

fn parse_price(raw: &str) -> std::result::Result<f64, String> {
    match raw.trim().parse::<f64>() {
        Ok(price) if price >= 0.0 => Ok(price),
        Ok(_) => Err("Invalid price.".to_string()),
        Err(_) => Err("Invalid price. Try again.".to_string()),
    }
}

fn parse_percent(raw: &str) -> std::result::Result<f64, String> {
    match raw.trim().parse::<f64>() {
        Ok(p) if (0.0..=100.0).contains(&p) => Ok(p),
        Ok(_) => Err("Percent must be between 0 and 100.".to_string()),
        Err(_) => Err("Invalid percent. Try again.".to_string()),
    }
}

fn reason(e: &DrillError) -> String {
    match e {
        DrillError::InvalidInput { reason, .. } => reason.clone(),
        other => other.to_string(),
    }
}

/// 咖啡店互動選單，選項 5 離開
pub fn run_coffee_shop<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    menu: &mut Menu,
) -> Result<()> {
    loop {
        prompter.say("What would you like to do?")?;
        for option in [
            "1. Show menu",
            "2. Add item",
            "3. Update price",
            "4. Delete item",
            "5. Exit",
            "6. Search item",
            "7. Apply discount",
        ] {
            prompter.say(option)?;
        }
        let Some(choice) = prompter.ask("> ")? else {
            return Ok(());
        };

        match choice.trim() {
            "1" => prompter.say(menu.render())?,
            "2" => {
                let name = prompter.ask("Enter new drink name: ")?.unwrap_or_default();
                let name = normalize(&name);
                if name.is_empty() {
                    prompter.say("Item name cannot be empty.")?;
                    continue;
                }
                if menu.search(&name).is_some() {
                    prompter.say("Item already exists!")?;
                    continue;
                }
                let Some(price) = prompter.ask_until("Enter price: ", parse_price)? else {
                    return Ok(());
                };
                match menu.add_item(&name, price) {
                    Ok(()) => prompter.say(format!("\"{}\" added!", name))?,
                    Err(e) => prompter.say(reason(&e))?,
                }
            }
            "3" => {
                let name = prompter
                    .ask("Which drink do you want to update? ")?
                    .unwrap_or_default();
                if menu.search(&name).is_none() {
                    prompter.say("Item not found.")?;
                    continue;
                }
                let Some(price) = prompter.ask_until("Enter the new price: ", parse_price)? else {
                    return Ok(());
                };
                match menu.update_price(&name, price) {
                    Ok(()) => prompter.say("Price updated!")?,
                    Err(e) => prompter.say(reason(&e))?,
                }
            }
            "4" => {
                let name = prompter
                    .ask("Which drink do you want to delete? ")?
                    .unwrap_or_default();
                match menu.delete_item(&name) {
                    Ok(()) => prompter.say("Item deleted.")?,
                    Err(e) => prompter.say(reason(&e))?,
                }
            }
            "5" => {
                prompter.say("Goodbye!")?;
                return Ok(());
            }
            "6" => {
                let name = prompter
                    .ask("Enter drink name to search: ")?
                    .unwrap_or_default();
                match menu.search(&name) {
                    Some(price) => prompter.say(format!("{} - {:.1}₪", normalize(&name), price))?,
                    None => prompter.say("Not in the menu.")?,
                }
            }
            "7" => {
                let Some(percent) =
                    prompter.ask_until("Enter discount percent (0-100): ", parse_percent)?
                else {
                    return Ok(());
                };
                menu.apply_discount(percent)?;
                prompter.say(format!("Applied {:.0}% discount to all items.", percent))?;
            }
            _ => prompter.say("Invalid choice, try again.")?,
        }
    }
}
