use crate::utils::error::{DrillError, Result};

pub trait Cat {
    fn name(&self) -> &str;
    fn age(&self) -> u32;
    fn sing(&self, sounds: &str) -> String;

    fn is_lazy(&self) -> bool {
        true
    }

    fn walk(&self) -> String {
        format!("{} is just walking around", self.name())
    }
}

macro_rules! cat_breed {
    ($breed:ident, |$cat:ident, $sounds:ident| $song:expr) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $breed {
            name: String,
            age: u32,
        }

        impl $breed {
            pub fn new(name: impl Into<String>, age: u32) -> Self {
                Self {
                    name: name.into(),
                    age,
                }
            }
        }

        impl Cat for $breed {
            fn name(&self) -> &str {
                &self.name
            }

            fn age(&self) -> u32 {
                self.age
            }

            fn sing(&self, $sounds: &str) -> String {
                let $cat = self;
                $song
            }
        }
    };
}

cat_breed!(Bengal, |_cat, sounds| sounds.to_string());
cat_breed!(Chartreux, |_cat, sounds| sounds.to_string());
cat_breed!(Siamese, |cat, sounds| format!("{} sings {}", cat.name, sounds));

pub struct Pets {
    animals: Vec<Box<dyn Cat>>,
}

impl Pets {
    pub fn new(animals: Vec<Box<dyn Cat>>) -> Self {
        Self { animals }
    }

    pub fn walk(&self) -> Vec<String> {
        self.animals.iter().map(|cat| cat.walk()).collect()
    }

    pub fn oldest(&self) -> Option<&dyn Cat> {
        self.animals
            .iter()
            .max_by_key(|cat| cat.age())
            .map(|cat| cat.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dog {
    name: String,
    age: u32,
    weight: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl Dog {
    pub fn new(name: impl Into<String>, age: u32, weight: f64) -> Result<Self> {
        if age == 0 {
            return Err(DrillError::InvalidInput {
                field: "age".to_string(),
                value: age.to_string(),
                reason: "A dog's age must be at least 1".to_string(),
            });
        }
        Ok(Self {
            name: name.into(),
            age,
            weight,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bark(&self) -> String {
        format!("{} is barking", self.name)
    }

    pub fn run_speed(&self) -> f64 {
        round2(self.weight / f64::from(self.age) * 10.0)
    }

    /// 以 速度 × 體重 比較勝負
    pub fn fight(&self, other: &Dog) -> String {
        let mine = self.run_speed() * self.weight;
        let theirs = other.run_speed() * other.weight;

        if mine > theirs {
            format!("{} wins the fight against {}!", self.name, other.name)
        } else if theirs > mine {
            format!("{} wins the fight against {}!", other.name, self.name)
        } else {
            format!("It's a tie between {} and {}!", self.name, other.name)
        }
    }
}

const TRICKS: [&str; 4] = [
    "does a barrel roll",
    "stands on his back legs",
    "shakes your hand",
    "plays dead",
];

#[derive(Debug, Clone, PartialEq)]
pub struct PetDog {
    dog: Dog,
    trained: bool,
}

impl PetDog {
    pub fn new(name: impl Into<String>, age: u32, weight: f64) -> Result<Self> {
        Ok(Self {
            dog: Dog::new(name, age, weight)?,
            trained: false,
        })
    }

    pub fn dog(&self) -> &Dog {
        &self.dog
    }

    pub fn is_trained(&self) -> bool {
        self.trained
    }

    pub fn train(&mut self) -> String {
        self.trained = true;
        self.dog.bark()
    }

    pub fn play(&self, others: &[&PetDog]) -> String {
        let names: Vec<&str> = std::iter::once(self.dog.name())
            .chain(others.iter().map(|d| d.dog.name()))
            .collect();
        format!("{} all play together", names.join(", "))
    }

    /// 未訓練前不會表演
    pub fn do_a_trick(&self, rng: &mut fastrand::Rng) -> Option<String> {
        if !self.trained {
            return None;
        }
        let trick = TRICKS[rng.usize(..TRICKS.len())];
        Some(format!("{} {}", self.dog.name(), trick))
    }
}
