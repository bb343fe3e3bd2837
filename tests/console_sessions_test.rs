use drillbook::bank::{Atm, AtmExit, BankAccount, MinimumBalanceAccount};
use drillbook::drills::anagram::{run_anagram_menu, AnagramChecker};
use drillbook::drills::coffee_shop::{run_coffee_shop, Menu};
use drillbook::games::rock_paper_scissors::{self, Game};
use drillbook::games::tic_tac_toe::{self, GameOutcome, Mark};
use drillbook::utils::prompt::Prompter;
use std::io::Cursor;

type Session = Prompter<Cursor<Vec<u8>>, Vec<u8>>;

fn session(lines: &[&str]) -> Session {
    let mut input = lines.join("\n");
    input.push('\n');
    Prompter::new(Cursor::new(input.into_bytes()), Vec::new())
}

fn output(prompter: Session) -> String {
    String::from_utf8(prompter.into_output()).unwrap()
}

fn demo_atm() -> Atm {
    Atm::new(
        vec![
            Box::new(BankAccount::new(300, "alice", "1234")),
            Box::new(MinimumBalanceAccount::new(1000, "bob", "abcd", 200)),
        ],
        3,
    )
}

#[test]
fn test_atm_session_deposit_withdraw_and_exit() {
    let mut atm = demo_atm();
    let mut prompter = session(&[
        "1", "bob", "abcd", // 登入
        "2", "50", // 存款
        "3", "900", // 低於最低餘額
        "3", "100", // 提款
        "1", "4", // 查餘額後登出
        "2",
    ]);

    let exit = atm.run(&mut prompter).unwrap();
    assert_eq!(exit, AtmExit::Goodbye);
    assert_eq!(exit.exit_code(), 0);

    let text = output(prompter);
    assert!(text.contains("Welcome, bob!"));
    assert!(text.contains("Deposited 50. Balance: 1050"));
    assert!(text.contains("Error:"));
    assert!(text.contains("Withdrew 100. Balance: 950"));
    assert!(text.contains("Current balance: 950"));
    assert!(text.contains("Logged out."));
    assert!(text.contains("Goodbye!"));
}

#[test]
fn test_atm_lockout_returns_non_zero_exit() {
    let mut atm = demo_atm();
    let mut prompter = session(&["1", "alice", "0000", "alice", "1111", "alice", "2222"]);

    let exit = atm.run(&mut prompter).unwrap();
    assert_eq!(exit, AtmExit::LockedOut);
    assert_eq!(exit.exit_code(), 1);
    assert!(output(prompter).contains("Login failed. Tries: 2/3"));
}

#[test]
fn test_tic_tac_toe_full_game() {
    let mut prompter = session(&["1 1", "2 1", "9 9", "1 2", "2 2", "1 3"]);

    let outcome = tic_tac_toe::play(&mut prompter).unwrap();
    assert_eq!(outcome, GameOutcome::Winner(Mark::X));

    let text = output(prompter);
    assert!(text.contains("Welcome to TIC TAC TOE!"));
    assert!(text.contains("Invalid move. Make sure it is within 1 to 3 and the cell is empty!"));
    assert!(text.contains("Player X wins!"));
}

#[test]
fn test_tic_tac_toe_abandoned_on_eof() {
    let mut prompter = session(&["2 2"]);
    assert_eq!(
        tic_tac_toe::play(&mut prompter).unwrap(),
        GameOutcome::Abandoned
    );
}

#[test]
fn test_coffee_shop_add_and_show() {
    let mut menu = Menu::default();
    let mut prompter = session(&["2", "Mocha", "15", "1", "8", "5"]);

    run_coffee_shop(&mut prompter, &mut menu).unwrap();
    assert_eq!(menu.search("mocha"), Some(15.0));

    let text = output(prompter);
    assert!(text.contains("\"mocha\" added!"));
    assert!(text.contains("mocha - 15.0₪"));
    assert!(text.contains("Invalid choice, try again."));
    assert!(text.contains("Goodbye!"));
}

#[test]
fn test_rock_paper_scissors_rounds_are_tallied() {
    let mut game = Game::new(&mut fastrand::Rng::with_seed(7));
    let mut prompter = session(&["1", "rock", "1", "lizard", "p", "3"]);

    let scores = rock_paper_scissors::run_menu(&mut prompter, &mut game).unwrap();
    assert_eq!(scores.total(), 2);

    let text = output(prompter);
    assert!(text.contains("Invalid choice:"));
    assert!(text.contains("Total:  2"));
    assert!(text.contains("Thanks for playing!"));
}

#[test]
fn test_anagram_menu_lists_anagrams() {
    let checker = AnagramChecker::from_words("listen silent enlist google").unwrap();
    let mut prompter = session(&["1", "two words", "Listen", "2"]);

    run_anagram_menu(&mut prompter, &checker).unwrap();

    let text = output(prompter);
    assert!(text.contains("Error: Please enter exactly one word."));
    assert!(text.contains("This is a valid English word."));
    assert!(text.contains("silent"));
    assert!(text.contains("enlist"));
    assert!(text.contains("Goodbye!"));
}
