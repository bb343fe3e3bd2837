use clap::Parser;
use drillbook::bank::{Atm, BankAccount, MinimumBalanceAccount};
use drillbook::config::Command;
use drillbook::drills::anagram::{run_anagram_menu, AnagramChecker};
use drillbook::drills::cards::Deck;
use drillbook::drills::circle::{self, Circle};
use drillbook::drills::coffee_shop::{run_coffee_shop, Menu};
use drillbook::drills::currency::Currency;
use drillbook::drills::family::{Family, Farm};
use drillbook::drills::genetics::{evolve, Chromosome, Dna, Gene, Organism};
use drillbook::drills::pets::{Bengal, Cat, Chartreux, PetDog, Pets, Siamese};
use drillbook::drills::shopping::{self, Basket, FavoriteNumbers, PizzaOrder};
use drillbook::drills::text::{Text, TextModification};
use drillbook::drills::{calendar, payroll, sentence, strings};
use drillbook::games::{rock_paper_scissors, tic_tac_toe};
use drillbook::utils::prompt::Prompter;
use drillbook::utils::{logger, validation::Validate};
use drillbook::{CliConfig, DrillError, LocalStorage, Result};
use std::io::{BufRead, Write};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("🚀 Starting drillbook");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let mut prompter = Prompter::stdio();
    let mut rng = config.rng();

    match run(&config.command, &mut prompter, &mut rng).await {
        Ok(0) => tracing::info!("✅ Done"),
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!(
                "❌ {} failed: {} (Category: {:?}, Severity: {:?})",
                command_name(&config.command),
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            let exit_code = e.severity().exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn command_name(command: &Command) -> String {
    format!("{:?}", command)
        .split([' ', '{'])
        .next()
        .unwrap_or_default()
        .to_string()
}

/// 執行子命令，回傳程式結束碼
async fn run<R: BufRead, W: Write>(
    command: &Command,
    prompter: &mut Prompter<R, W>,
    rng: &mut fastrand::Rng,
) -> Result<i32> {
    tracing::debug!("▶️ Running {}", command_name(command));

    match command {
        Command::Strings => string_checks(prompter, rng)?,
        Command::Multiples => multiples(prompter)?,
        Command::Dedupe => {
            if let Some(raw) = prompter.ask("Enter a word: ")? {
                prompter.say(strings::remove_consecutive_duplicates(&raw))?;
            }
        }
        Command::Letters => {
            let word = prompter.ask_until("Enter a word: ", |raw| {
                strings::parse_word(raw).map_err(|e| match e {
                    DrillError::InvalidInput { reason, .. } => reason,
                    other => other.to_string(),
                })
            })?;
            if let Some(word) = word {
                let indices = strings::letter_indices(&word);
                prompter.say(strings::render_letter_indices(&indices))?;
            }
        }
        Command::Shopping => shopping_demo(prompter)?,
        Command::Tickets => tickets(prompter)?,
        Command::Pizza => pizza(prompter)?,
        Command::Coffee => run_coffee_shop(prompter, &mut Menu::default())?,
        Command::TicTacToe => {
            let outcome = tic_tac_toe::play(prompter)?;
            tracing::info!("🎮 Tic-tac-toe finished: {:?}", outcome);
        }
        Command::Rps => {
            let mut game = rock_paper_scissors::Game::new(rng);
            rock_paper_scissors::run_menu(prompter, &mut game)?;
        }
        Command::Atm => {
            let mut atm = Atm::new(
                vec![
                    Box::new(BankAccount::new(300, "alice", "1234")),
                    Box::new(MinimumBalanceAccount::new(1000, "bob", "abcd", 200)),
                ],
                3,
            );
            let exit = atm.run(prompter)?;
            return Ok(exit.exit_code());
        }
        Command::Anagram { words } => {
            let checker = AnagramChecker::from_file(words)?;
            tracing::info!("📖 Loaded {} words from {}", checker.len(), words);
            run_anagram_menu(prompter, &checker)?;
        }
        Command::Text { file } => text_report(prompter, file.as_deref())?,
        Command::Cards => {
            let mut deck = Deck::new(rng);
            for _ in 0..5 {
                prompter.say(format!("Dealt: {}", deck.deal()?))?;
            }
            prompter.say(format!("{} cards left", deck.len()))?;
            deck.shuffle();
            prompter.say(format!("Shuffled. {} cards in the deck", deck.len()))?;
        }
        Command::Evolve {
            environment,
            max_generations,
        } => evolution(prompter, rng, *environment, *max_generations)?,
        Command::Currency => currency_demo(prompter)?,
        Command::Circles => circles_demo(prompter)?,
        Command::Pets => pets_demo(prompter, rng)?,
        Command::Family => family_demo(prompter)?,
        Command::Calendar { birthdate } => {
            let now = chrono::Local::now().naive_local();
            let remaining = calendar::time_until_new_year(now)?;
            prompter.say(format!(
                "Time left until January 1st: {}",
                calendar::format_duration(remaining)
            ))?;
            let minutes = calendar::minutes_lived(birthdate, now)?;
            prompter.say(format!(
                "You have lived {} minutes",
                calendar::format_thousands(minutes)
            ))?;
        }
        Command::Sentence { words } => {
            let storage = LocalStorage::new(".");
            let words = sentence::load_words(&storage, words).await?;
            sentence::run_sentence_generator(prompter, &words, rng)?;
        }
        Command::Payroll { output } => {
            let doc = payroll::parse_company(payroll::SAMPLE_COMPANY)?;
            prompter.say(format!("Salary: {}", payroll::salary(&doc)?))?;
            let doc = payroll::with_birth_date(doc, "1990-01-01")?;
            let storage = LocalStorage::new(output.as_str());
            payroll::dump(&storage, "company.json", &doc).await?;
            prompter.say(format!("📁 Output saved to: {}/company.json", output))?;
        }
    }

    Ok(0)
}

fn string_checks<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    rng: &mut fastrand::Rng,
) -> Result<()> {
    let word = prompter.ask_until("Enter a string of exactly 10 characters: ", |raw| {
        match strings::check_length(raw) {
            strings::LengthVerdict::Perfect => Ok(raw.to_string()),
            verdict => Err(verdict.to_string()),
        }
    })?;
    let Some(word) = word else {
        return Ok(());
    };

    prompter.say(strings::LengthVerdict::Perfect.to_string())?;
    if let Some((first, last)) = strings::first_and_last(&word) {
        prompter.say(format!("First: {}, last: {}", first, last))?;
    }
    for prefix in strings::progressive_prefixes(&word) {
        prompter.say(prefix)?;
    }
    prompter.say(strings::shuffle_chars(&word, rng))?;
    Ok(())
}

fn multiples<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<()> {
    let Some(number) = prompter.ask_until("Number: ", |raw| {
        raw.trim()
            .parse::<i64>()
            .map_err(|_| "Please enter a whole number.".to_string())
    })?
    else {
        return Ok(());
    };
    let Some(length) = prompter.ask_until("Length: ", |raw| {
        raw.trim()
            .parse::<u32>()
            .map_err(|_| "Please enter a non-negative whole number.".to_string())
    })?
    else {
        return Ok(());
    };
    prompter.say(format!("{:?}", strings::multiples(number, length)?))?;
    Ok(())
}

fn shopping_demo<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<()> {
    let items = [
        ("Water", "$1"),
        ("Bread", "$3"),
        ("TV", "$1,000"),
        ("Fertilizer", "$20"),
    ];
    let purchase = shopping::affordable_items(&items, "$300")?;
    prompter.say(format!("With $300 you can buy: {}", purchase))?;

    let steps: Vec<String> = shopping::half_step_sequence()
        .iter()
        .map(|n| n.to_string())
        .collect();
    prompter.say(format!("Half steps: {}", steps.join(", ")))?;

    let mut mine = FavoriteNumbers::new([7, 13, 42]);
    mine.add(99);
    mine.remove(13);
    let friends = FavoriteNumbers::new([1, 7, 21]);
    prompter.say(format!(
        "Our favorite numbers: {:?}",
        mine.union(&friends).to_vec()
    ))?;

    let mut basket = Basket::new(&["Banana", "Apples", "Oranges", "Blueberries"]);
    basket.remove("Banana");
    basket.remove("Blueberries");
    basket.push("Kiwi");
    basket.insert_front("Apples");
    prompter.say(format!(
        "Basket: {:?} ({} apples)",
        basket.items(),
        basket.count("Apples")
    ))?;
    basket.clear();
    prompter.say(format!("Basket after clearing: {:?}", basket.items()))?;
    Ok(())
}

fn tickets<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<()> {
    let mut ages = Vec::new();
    loop {
        let age = prompter.ask_until("Age of attendee (empty line to finish): ", |raw| {
            if raw.trim().is_empty() {
                return Ok(None);
            }
            raw.trim()
                .parse::<u32>()
                .map(Some)
                .map_err(|_| "Please enter a valid age.".to_string())
        })?;
        match age.flatten() {
            Some(age) => ages.push(age),
            None => break,
        }
    }

    prompter.say(format!(
        "Total ticket cost: ${}",
        shopping::family_ticket_total(&ages)
    ))?;
    prompter.say(format!(
        "Allowed into the 16-21 movie: {:?}",
        shopping::restricted_attendees(&ages)
    ))?;
    Ok(())
}

fn pizza<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<()> {
    let mut order = PizzaOrder::new();
    while let Some(topping) = prompter.ask("Enter a topping (or 'quit'): ")? {
        if topping.trim().eq_ignore_ascii_case("quit") {
            break;
        }
        prompter.say(order.add_topping(&topping))?;
    }
    prompter.say(order.summary())?;
    Ok(())
}

fn text_report<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    file: Option<&str>,
) -> Result<()> {
    let text = match file {
        Some(path) => Text::from_file(path)?,
        None => {
            let Some(raw) = prompter.ask("Enter some text: ")? else {
                return Ok(());
            };
            Text::new(&raw)
        }
    };

    match text.most_common_word() {
        Some(word) => prompter.say(format!(
            "Most common word: {} ({} times)",
            word,
            text.word_frequency(&word).unwrap_or_default()
        ))?,
        None => prompter.say("The text is empty.")?,
    }
    prompter.say(format!("Unique words: {}", text.unique_words().join(", ")))?;

    let mut modified = TextModification::new(text.as_str());
    prompter.say(format!("Without punctuation: {}", modified.remove_punctuation()))?;
    prompter.say(format!("Without stop words: {}", modified.remove_stop_words()))?;
    Ok(())
}

fn evolution<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    rng: &mut fastrand::Rng,
    environment: f64,
    max_generations: u64,
) -> Result<()> {
    // 每條染色體的基因一致，整體翻轉才可能全部變成 1
    let chromosomes = (0..10)
        .map(|_| Chromosome::new(vec![Gene::random(rng); 10]))
        .collect();
    let mut organism = Organism::new(Dna::new(chromosomes), environment);

    match evolve(&mut organism, rng, max_generations) {
        Some(generations) => prompter.say(format!(
            "It took {} generations to get a perfect organism.",
            generations
        ))?,
        None => prompter.say(format!(
            "No perfect organism after {} generations.",
            max_generations
        ))?,
    }
    Ok(())
}

fn currency_demo<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<()> {
    let mut c1 = Currency::new("dollar", 5.0);
    let c2 = Currency::new("dollar", 10.0);
    let c3 = Currency::new("shekel", 1.0);

    prompter.say(format!("{} / {} / {}", c1, c2, c3))?;
    prompter.say(format!("int(c1) = {}", c1.as_int()))?;
    prompter.say(format!("c1 + 5 = {}", &c1 + 5.0))?;
    prompter.say(format!("c1 + c2 = {}", (&c1 + &c2)?))?;
    c1 += 5.0;
    prompter.say(format!("c1 += 5 -> {}", c1))?;
    c1.try_add_assign(&c2)?;
    prompter.say(format!("c1 += c2 -> {}", c1))?;
    if let Err(e) = &c1 + &c3 {
        prompter.say(format!("c1 + c3: {}", e.user_friendly_message()))?;
    }
    Ok(())
}

fn circles_demo<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<()> {
    let circles = [
        Circle::from_radius(50.0)?,
        Circle::from_diameter(30.0)?,
        Circle::from_radius(5.0)?,
    ];
    for c in circle::sorted(&circles) {
        prompter.say(c.to_string())?;
    }
    prompter.say(format!(
        "Biggest is larger than smallest: {}",
        circles[0] > circles[2]
    ))?;
    Ok(())
}

fn pets_demo<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    rng: &mut fastrand::Rng,
) -> Result<()> {
    let pets = Pets::new(vec![
        Box::new(Bengal::new("Tom", 3)),
        Box::new(Chartreux::new("Luna", 7)),
        Box::new(Siamese::new("Mimi", 5)),
    ]);
    for line in pets.walk() {
        prompter.say(line)?;
    }
    if let Some(oldest) = pets.oldest() {
        prompter.say(format!("{} is the oldest ({})", oldest.name(), oldest.sing("meow")))?;
    }

    let mut rex = PetDog::new("Rex", 4, 20.0)?;
    let fido = PetDog::new("Fido", 2, 8.0)?;
    let buddy = PetDog::new("Buddy", 6, 30.0)?;
    prompter.say(rex.dog().fight(buddy.dog()))?;
    prompter.say(rex.train())?;
    prompter.say(rex.play(&[&fido, &buddy]))?;
    if let Some(trick) = rex.do_a_trick(rng) {
        prompter.say(trick)?;
    }
    Ok(())
}

fn family_demo<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<()> {
    let mut family = Family::new("Smith");
    prompter.say(family.born("Michael", 35))?;
    prompter.say(family.born("Sarah", 32))?;
    prompter.say(family.born("Emily", 1))?;
    for name in ["Michael", "Emily", "Nobody"] {
        prompter.say(family.majority_message(name))?;
    }
    prompter.say(family.presentation())?;

    let mut farm = Farm::new("McDonald");
    farm.add_animal("cow", 5);
    farm.add_animal("sheep", 1);
    farm.add_animal("sheep", 1);
    farm.add_animal("goat", 12);
    prompter.say(farm.get_info())?;
    Ok(())
}
