use crate::utils::error::Result;
use crate::utils::prompt::Prompter;
use std::fmt;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn other(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => f.write_str("X"),
            Mark::O => f.write_str("O"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Mark),
    Draw,
    /// 輸入在遊戲結束前中斷
    Abandoned,
}

/// 3×3 棋盤，座標以 0 為起點
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Mark>; 3]; 3],
}

/// 八條可獲勝的線：三列、三行、兩條對角線
const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<Mark> {
        self.cells.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    /// 1-based 座標是否在範圍內且格子為空
    pub fn is_valid_move(&self, row: usize, col: usize) -> bool {
        (1..=3).contains(&row) && (1..=3).contains(&col) && self.cells[row - 1][col - 1].is_none()
    }

    /// 以 1-based 座標落子
    pub fn place(&mut self, row: usize, col: usize, mark: Mark) -> bool {
        if !self.is_valid_move(row, col) {
            return false;
        }
        self.cells[row - 1][col - 1] = Some(mark);
        true
    }

    pub fn has_won(&self, mark: Mark) -> bool {
        LINES.iter().any(|line| {
            line.iter()
                .all(|&(r, c)| self.cells[r][c] == Some(mark))
        })
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    pub fn render(&self) -> String {
        let mut out = String::from("***************\n");
        for (r, row) in self.cells.iter().enumerate() {
            let cells: Vec<String> = row
                .iter()
                .map(|cell| cell.map(|m| m.to_string()).unwrap_or_else(|| " ".to_string()))
                .collect();
            out.push_str(&format!("*  {}  *\n", cells.join(" | ")));
            if r < 2 {
                out.push_str("* ---+---+--- *\n");
            }
        }
        out.push_str("***************\n");
        out
    }
}

/// 解析 "2 3" 形式的輸入
pub fn parse_move(raw: &str) -> Option<(usize, usize)> {
    let parts: Vec<&str> = raw.split_whitespace().collect();
    if parts.len() != 2 {
        return None;
    }
    let row = parts[0].parse().ok()?;
    let col = parts[1].parse().ok()?;
    Some((row, col))
}

pub fn play<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<GameOutcome> {
    prompter.say("\nWelcome to TIC TAC TOE!\n")?;
    let mut board = Board::new();
    let mut current = Mark::X;
    prompter.say(board.render())?;

    loop {
        let prompt = format!("Player {}, enter row and column (like '2' '3') : ", current);
        let snapshot = board.clone();
        let chosen = prompter.ask_until(&prompt, |raw| match parse_move(raw.trim()) {
            None => Err("Please enter two integers between 1 and 3 (e.g. 1 3)".to_string()),
            Some((r, c)) if !snapshot.is_valid_move(r, c) => Err(
                "Invalid move. Make sure it is within 1 to 3 and the cell is empty!".to_string(),
            ),
            Some(mv) => Ok(mv),
        })?;

        let Some((row, col)) = chosen else {
            tracing::info!("Game abandoned before completion");
            return Ok(GameOutcome::Abandoned);
        };

        board.place(row, col, current);
        prompter.say(board.render())?;

        if board.has_won(current) {
            prompter.say(format!("Player {} wins!", current))?;
            return Ok(GameOutcome::Winner(current));
        }
        if board.is_full() {
            prompter.say("It is a draw. Try to play again ;)")?;
            return Ok(GameOutcome::Draw);
        }
        current = current.other();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::prompt::test_support::{scripted, transcript};

    #[test]
    fn test_full_top_row_wins() {
        let mut board = Board::new();
        for col in 1..=3 {
            assert!(board.place(1, col, Mark::X));
        }
        assert!(board.has_won(Mark::X));
        assert!(!board.has_won(Mark::O));
    }

    #[test]
    fn test_anti_diagonal_wins() {
        let mut board = Board::new();
        board.place(1, 3, Mark::O);
        board.place(2, 2, Mark::O);
        board.place(3, 1, Mark::O);
        assert!(board.has_won(Mark::O));
    }

    #[test]
    fn test_invalid_moves() {
        let mut board = Board::new();
        assert!(!board.is_valid_move(0, 1));
        assert!(!board.is_valid_move(1, 4));
        board.place(2, 2, Mark::X);
        assert!(!board.is_valid_move(2, 2));
        assert!(!board.place(2, 2, Mark::O));
        assert_eq!(board.cell(1, 1), Some(Mark::X));
    }

    #[test]
    fn test_parse_move() {
        assert_eq!(parse_move("2 3"), Some((2, 3)));
        assert_eq!(parse_move("  1   1 "), Some((1, 1)));
        assert_eq!(parse_move("1"), None);
        assert_eq!(parse_move("a b"), None);
        assert_eq!(parse_move("1 2 3"), None);
    }

    #[test]
    fn test_render_frame() {
        let mut board = Board::new();
        board.place(1, 1, Mark::X);
        let rendered = board.render();
        assert!(rendered.starts_with("***************\n*  X |   |    *\n"));
        assert_eq!(rendered.matches("---+---+---").count(), 2);
    }

    #[test]
    fn test_play_until_x_wins() {
        let mut prompter = scripted(&["1 1", "2 1", "bad", "1 2", "1 2", "2 2", "1 3"]);
        let outcome = play(&mut prompter).unwrap();

        assert_eq!(outcome, GameOutcome::Winner(Mark::X));
        let output = transcript(prompter);
        assert!(output.contains("Please enter two integers"));
        assert!(output.contains("Invalid move."));
        assert!(output.contains("Player X wins!"));
    }

    #[test]
    fn test_play_draw() {
        // X O X / X O O / O X X
        let moves = [
            "1 1", "1 2", "1 3", "2 2", "2 1", "2 3", "3 2", "3 1", "3 3",
        ];
        let mut prompter = scripted(&moves);
        assert_eq!(play(&mut prompter).unwrap(), GameOutcome::Draw);
    }

    #[test]
    fn test_play_abandoned_on_eof() {
        let mut prompter = scripted(&["1 1"]);
        assert_eq!(play(&mut prompter).unwrap(), GameOutcome::Abandoned);
    }
}
