use crate::utils::error::Result;
use crate::utils::prompt::Prompter;
use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Item {
    Rock,
    Paper,
    Scissors,
}

impl Item {
    pub const ALL: [Item; 3] = [Item::Rock, Item::Paper, Item::Scissors];

    /// 這個選擇能打敗的對手
    pub fn beats(self) -> Item {
        match self {
            Item::Rock => Item::Scissors,
            Item::Paper => Item::Rock,
            Item::Scissors => Item::Paper,
        }
    }

    pub fn random(rng: &mut fastrand::Rng) -> Item {
        Item::ALL[rng.usize(..Item::ALL.len())]
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Item::Rock => "rock",
            Item::Paper => "paper",
            Item::Scissors => "scissors",
        })
    }
}

impl FromStr for Item {
    type Err = String;

    fn from_str(raw: &str) -> std::result::Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "r" | "rock" => Ok(Item::Rock),
            "p" | "paper" => Ok(Item::Paper),
            "s" | "scissors" => Ok(Item::Scissors),
            _ => Err("Please choose rock, paper, or scissors (r/p/s).".to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    pub fn decide(user: Item, computer: Item) -> Outcome {
        if user == computer {
            Outcome::Draw
        } else if user.beats() == computer {
            Outcome::Win
        } else {
            Outcome::Loss
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Outcome::Win => "win",
            Outcome::Draw => "draw",
            Outcome::Loss => "loss",
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scoreboard {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl Scoreboard {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    pub fn summary(&self) -> String {
        format!(
            "\n=== Game Summary ===\nWins:   {}\nLosses: {}\nDraws:  {}\nTotal:  {}\nThanks for playing!\n",
            self.wins,
            self.losses,
            self.draws,
            self.total()
        )
    }
}

pub struct Game {
    rng: fastrand::Rng,
}

impl Game {
    pub fn new(rng: &mut fastrand::Rng) -> Self {
        Self { rng: rng.fork() }
    }

    /// 進行一回合；輸入中斷時回傳 `None`
    pub fn play_round<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<Option<Outcome>> {
        let user_item = prompter.ask_until("Choose [r]ock, [p]aper, or [s]cissors: ", |raw| {
            raw.parse::<Item>()
                .map_err(|e| format!("Invalid choice: {}", e))
        })?;
        let Some(user_item) = user_item else {
            return Ok(None);
        };

        let computer_item = Item::random(&mut self.rng);
        let outcome = Outcome::decide(user_item, computer_item);
        prompter.say(format!("\nYou chose: {}", user_item))?;
        prompter.say(format!("Computer chose: {}", computer_item))?;
        prompter.say(format!("Result: {}\n", outcome.to_string().to_uppercase()))?;
        tracing::debug!("🎲 {} vs {} -> {}", user_item, computer_item, outcome);
        Ok(Some(outcome))
    }
}

pub fn run_menu<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    game: &mut Game,
) -> Result<Scoreboard> {
    let mut scores = Scoreboard::default();

    loop {
        prompter.say("=== Rock Paper Scissors ===")?;
        prompter.say("1) Play a new game")?;
        prompter.say("2) Show scores")?;
        prompter.say("3) Quit")?;
        let Some(choice) = prompter.ask("Select an option (1-3): ")? else {
            prompter.say(scores.summary())?;
            return Ok(scores);
        };

        match choice.trim() {
            "1" => match game.play_round(prompter)? {
                Some(outcome) => scores.record(outcome),
                None => {
                    prompter.say(scores.summary())?;
                    return Ok(scores);
                }
            },
            "2" => prompter.say(scores.summary())?,
            "3" => {
                prompter.say(scores.summary())?;
                return Ok(scores);
            }
            _ => prompter.say("Invalid input. Please enter 1, 2, or 3.\n")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::prompt::test_support::{scripted, transcript};

    #[test]
    fn test_parse_aliases() {
        assert_eq!(" R ".parse::<Item>(), Ok(Item::Rock));
        assert_eq!("Paper".parse::<Item>(), Ok(Item::Paper));
        assert_eq!("s".parse::<Item>(), Ok(Item::Scissors));
        assert!("lizard".parse::<Item>().is_err());
    }

    #[test]
    fn test_outcome_matrix() {
        assert_eq!(Outcome::decide(Item::Rock, Item::Scissors), Outcome::Win);
        assert_eq!(Outcome::decide(Item::Paper, Item::Rock), Outcome::Win);
        assert_eq!(Outcome::decide(Item::Scissors, Item::Paper), Outcome::Win);
        assert_eq!(Outcome::decide(Item::Rock, Item::Paper), Outcome::Loss);
        assert_eq!(Outcome::decide(Item::Scissors, Item::Scissors), Outcome::Draw);
    }

    #[test]
    fn test_menu_tallies_rounds() {
        let mut game = Game::new(&mut fastrand::Rng::with_seed(7));
        let mut prompter = scripted(&["1", "x", "r", "1", "p", "9", "2", "3"]);
        let scores = run_menu(&mut prompter, &mut game).unwrap();

        assert_eq!(scores.total(), 2);
        let output = transcript(prompter);
        assert!(output.contains("Invalid choice: Please choose rock, paper, or scissors"));
        assert!(output.contains("Invalid input. Please enter 1, 2, or 3."));
        assert_eq!(output.matches("=== Game Summary ===").count(), 2);
        assert!(output.contains("Total:  2"));
    }
}
