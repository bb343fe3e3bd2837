#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
}

impl Person {
    pub fn is_adult(&self) -> bool {
        self.age >= 18
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Majority {
    Allowed,
    NotAllowed,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Family {
    last_name: String,
    members: Vec<Person>,
}

impl Family {
    pub fn new(last_name: impl Into<String>) -> Self {
        Self {
            last_name: last_name.into(),
            members: Vec::new(),
        }
    }

    pub fn members(&self) -> &[Person] {
        &self.members
    }

    pub fn born(&mut self, first_name: &str, age: u32) -> String {
        self.members.push(Person {
            first_name: first_name.to_string(),
            last_name: self.last_name.clone(),
            age,
        });
        format!(
            "{} {} was born into the {} family!",
            first_name, self.last_name, self.last_name
        )
    }

    pub fn check_majority(&self, first_name: &str) -> Majority {
        match self.members.iter().find(|m| m.first_name == first_name) {
            Some(person) if person.is_adult() => Majority::Allowed,
            Some(_) => Majority::NotAllowed,
            None => Majority::Unknown,
        }
    }

    pub fn majority_message(&self, first_name: &str) -> String {
        match self.check_majority(first_name) {
            Majority::Allowed => {
                "You are over 18, your parents accept that you will go out with your friends."
                    .to_string()
            }
            Majority::NotAllowed => {
                "Sorry, you are not allowed to go out with your friends.".to_string()
            }
            Majority::Unknown => format!("No family member named {} found.", first_name),
        }
    }

    pub fn presentation(&self) -> String {
        let mut lines = vec![format!("The {} Family:", self.last_name)];
        lines.extend(
            self.members
                .iter()
                .map(|m| format!("- {} {}, age {}", m.first_name, m.last_name, m.age)),
        );
        lines.join("\n")
    }
}

/// 農場動物依加入順序累計數量
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Farm {
    name: String,
    animals: Vec<(String, u32)>,
}

impl Farm {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            animals: Vec::new(),
        }
    }

    pub fn add_animal(&mut self, kind: &str, count: u32) {
        match self.animals.iter_mut().find(|(k, _)| k == kind) {
            Some((_, total)) => *total = total.saturating_add(count),
            None => self.animals.push((kind.to_string(), count)),
        }
    }

    pub fn count(&self, kind: &str) -> u32 {
        self.animals
            .iter()
            .find(|(k, _)| k == kind)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    pub fn get_info(&self) -> String {
        let width = self.animals.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
        let mut out = format!("{}'s farm\n\n", self.name);
        for (kind, count) in &self.animals {
            out.push_str(&format!("{:<width$} : {}\n", kind, count, width = width));
        }
        out.push_str("\n    E-I-E-I-0!");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_majority() {
        let mut bruks = Family::new("Bruk");
        assert_eq!(bruks.born("Paul", 28), "Paul Bruk was born into the Bruk family!");
        bruks.born("Anna", 16);

        assert_eq!(bruks.check_majority("Paul"), Majority::Allowed);
        assert_eq!(bruks.check_majority("Anna"), Majority::NotAllowed);
        assert_eq!(bruks.check_majority("Zoe"), Majority::Unknown);
        assert_eq!(bruks.majority_message("Zoe"), "No family member named Zoe found.");
        assert_eq!(
            bruks.presentation(),
            "The Bruk Family:\n- Paul Bruk, age 28\n- Anna Bruk, age 16"
        );
    }

    #[test]
    fn test_farm_accumulates() {
        let mut farm = Farm::new("McDonald");
        farm.add_animal("cow", 5);
        farm.add_animal("sheep", 1);
        farm.add_animal("sheep", 1);
        farm.add_animal("goat", 12);

        assert_eq!(farm.count("sheep"), 2);
        assert_eq!(
            farm.get_info(),
            "McDonald's farm\n\ncow   : 5\nsheep : 2\ngoat  : 12\n\n    E-I-E-I-0!"
        );
    }

    #[test]
    fn test_farm_count_saturates() {
        let mut farm = Farm::new("McDonald");
        farm.add_animal("chicken", u32::MAX - 1);
        farm.add_animal("chicken", 5);
        assert_eq!(farm.count("chicken"), u32::MAX);
    }
}
