pub mod rock_paper_scissors;
pub mod tic_tac_toe;
