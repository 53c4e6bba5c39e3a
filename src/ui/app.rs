use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::JoinHandle;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};

use crate::ai::ScoringAgent;
use crate::config::AppConfig;
use crate::error::BoardError;
use crate::game::{Board, GameOutcome, GameState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Difficulty,
    Playing,
}

/// A computer move being searched on a worker thread.
struct PendingMove {
    rx: mpsc::Receiver<(ScoringAgent, Option<usize>)>,
    cancel: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

pub struct App {
    config: AppConfig,
    screen: Screen,
    game_state: GameState,
    selected_column: usize,
    difficulty: usize,
    agent: Option<ScoringAgent>,
    pending: Option<PendingMove>,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self, BoardError> {
        let game_state = Self::fresh_state(&config)?;
        let mut app = App {
            screen: Screen::Difficulty,
            selected_column: game_state.board().cols() / 2,
            game_state,
            difficulty: 0,
            agent: None,
            pending: None,
            should_quit: false,
            message: None,
            config,
        };
        if let Some(difficulty) = app.config.ai.difficulty {
            app.start_game(difficulty);
        }
        Ok(app)
    }

    fn fresh_state(config: &AppConfig) -> Result<GameState, BoardError> {
        let board = Board::new(config.board.rows, config.board.cols)?;
        let first = if config.ui.human_first {
            config.ui.human_piece
        } else {
            config.ui.human_piece.opponent()
        };
        Ok(GameState::new(board, first))
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn game_state(&self) -> &GameState {
        &self.game_state
    }

    pub fn is_thinking(&self) -> bool {
        self.pending.is_some()
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        let poll = Duration::from_millis(self.config.ui.poll_interval_ms);
        loop {
            self.collect_computer_move();
            self.maybe_start_computer_move();

            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(poll)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }
        }
        self.cancel_pending();
        Ok(())
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
            self.should_quit = true;
            return;
        }
        match self.screen {
            Screen::Difficulty => self.handle_difficulty_key(key),
            Screen::Playing => self.handle_game_key(key),
        }
    }

    fn handle_difficulty_key(&mut self, key: KeyEvent) {
        if let KeyCode::Char(c) = key.code {
            match c.to_digit(10).map(|d| d as usize) {
                Some(level) if level <= self.config.ai.max_difficulty => self.start_game(level),
                _ => {
                    self.message = Some(format!(
                        "Choose a difficulty between 0 and {}",
                        self.config.ai.max_difficulty
                    ));
                }
            }
        }
    }

    fn handle_game_key(&mut self, key: KeyEvent) {
        let cols = self.game_state.board().cols();
        match key.code {
            KeyCode::Left => {
                if self.selected_column > 0 {
                    self.selected_column -= 1;
                }
            }
            KeyCode::Right => {
                if self.selected_column + 1 < cols {
                    self.selected_column += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece(self.selected_column + 1);
            }
            KeyCode::Char('r') => self.restart(),
            KeyCode::Char('d') => {
                self.cancel_pending();
                self.screen = Screen::Difficulty;
                self.message = None;
            }
            KeyCode::Char(c) => {
                if let Some(col) = c.to_digit(10).map(|d| d as usize) {
                    if (1..=cols).contains(&col) {
                        self.selected_column = col - 1;
                    }
                    self.drop_piece(col);
                }
            }
            _ => {}
        }
    }

    fn start_game(&mut self, difficulty: usize) {
        self.cancel_pending();
        self.difficulty = difficulty;
        self.agent = Some(self.build_agent());
        self.screen = Screen::Playing;
        tracing::info!(difficulty, "game started");
        self.restart();
    }

    fn build_agent(&self) -> ScoringAgent {
        let agent = match self.config.ai.seed {
            Some(seed) => ScoringAgent::with_seed(self.difficulty, seed),
            None => ScoringAgent::new(self.difficulty),
        };
        agent.parallel(self.config.ai.parallel)
    }

    fn restart(&mut self) {
        self.cancel_pending();
        // Dimensions were validated when the app was built
        if let Ok(state) = Self::fresh_state(&self.config) {
            self.game_state = state;
        }
        self.selected_column = self.game_state.board().cols() / 2;
        self.message = Some("New game started!".to_string());
    }

    fn human_to_move(&self) -> bool {
        self.game_state.current_piece() == self.config.ui.human_piece
    }

    /// Drop the human's piece in the 1-indexed column
    fn drop_piece(&mut self, col: usize) {
        if self.game_state.is_terminal() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }
        if !self.human_to_move() {
            self.message = Some("I'm thinking about my move...".to_string());
            return;
        }
        match self.game_state.apply_move(col) {
            Ok(()) => self.message = self.outcome_message(),
            Err(err) => self.message = Some(err.to_string()),
        }
    }

    /// "'X' won!" or "It's a draw!" once the game is over
    pub fn outcome_message(&self) -> Option<String> {
        self.game_state.outcome().map(|outcome| match outcome {
            GameOutcome::Winner(piece) => format!("'{piece}' won!"),
            GameOutcome::Draw => "It's a draw!".to_string(),
        })
    }

    fn maybe_start_computer_move(&mut self) {
        if self.screen != Screen::Playing
            || self.pending.is_some()
            || self.game_state.is_terminal()
            || self.human_to_move()
        {
            return;
        }
        let Some(mut agent) = self.agent.take() else {
            return;
        };

        let board = self.game_state.board().clone();
        let piece = self.game_state.current_piece();
        let cancel = Arc::new(AtomicBool::new(false));
        let cancel_clone = cancel.clone();
        let (tx, rx) = mpsc::channel();

        tracing::debug!(%piece, depth = agent.depth(), "computer search started");
        let handle = std::thread::spawn(move || {
            let col = agent.select_column_cancellable(&board, piece, &cancel_clone);
            let _ = tx.send((agent, col));
        });

        self.message = Some("I'm thinking about my move...".to_string());
        self.pending = Some(PendingMove { rx, cancel, handle });
    }

    fn collect_computer_move(&mut self) {
        let Some(pending) = &self.pending else {
            return;
        };
        let (agent, col) = match pending.rx.try_recv() {
            Ok(result) => result,
            Err(mpsc::TryRecvError::Empty) => return,
            Err(mpsc::TryRecvError::Disconnected) => {
                tracing::error!("computer search thread exited without a move");
                self.pending = None;
                self.agent = Some(self.build_agent());
                return;
            }
        };
        if let Some(pending) = self.pending.take() {
            let _ = pending.handle.join();
        }
        self.agent = Some(agent);

        let Some(col) = col else {
            return;
        };
        match self.game_state.apply_move(col) {
            Ok(()) => {
                tracing::info!(col, "computer moved");
                self.message = self
                    .outcome_message()
                    .or_else(|| Some(format!("I played in column {col}.")));
            }
            Err(err) => {
                tracing::error!(col, %err, "computer chose an illegal column");
            }
        }
    }

    /// Stop a running search and take the agent back
    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel.store(true, Ordering::Relaxed);
            let _ = pending.handle.join();
            self.agent = match pending.rx.try_recv() {
                Ok((agent, _)) => Some(agent),
                Err(_) => Some(self.build_agent()),
            };
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        match self.screen {
            Screen::Difficulty => super::game_view::render_difficulty(
                frame,
                self.config.ai.max_difficulty,
                &self.message,
            ),
            Screen::Playing => {
                let status = match &self.agent {
                    Some(agent) => format!("Difficulty {}", agent.depth()),
                    None => "Thinking...".to_string(),
                };
                super::game_view::render(
                    frame,
                    &self.game_state,
                    self.selected_column,
                    &self.message,
                    &status,
                );
            }
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Piece;
    use crossterm::event::KeyModifiers;
    use std::time::Instant;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    /// Poll the worker until the computer has answered
    fn wait_for_computer(app: &mut App) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while app.is_thinking() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
            app.collect_computer_move();
        }
        assert!(!app.is_thinking(), "computer did not answer in time");
    }

    #[test]
    fn test_starts_on_difficulty_screen() {
        let app = App::new(AppConfig::default()).unwrap();
        assert_eq!(app.screen(), Screen::Difficulty);
    }

    #[test]
    fn test_configured_difficulty_skips_prompt() {
        let mut config = AppConfig::default();
        config.ai.difficulty = Some(2);
        let app = App::new(config).unwrap();
        assert_eq!(app.screen(), Screen::Playing);
    }

    #[test]
    fn test_difficulty_out_of_range_is_rejected() {
        let mut app = App::new(AppConfig::default()).unwrap();
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.screen(), Screen::Difficulty);
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.screen(), Screen::Playing);
    }

    #[test]
    fn test_human_then_computer_move() {
        let mut config = AppConfig::default();
        config.ai.seed = Some(11);
        let mut app = App::new(config).unwrap();
        press(&mut app, KeyCode::Char('2'));

        press(&mut app, KeyCode::Char('4'));
        assert_eq!(app.game_state().board().get(0, 3), Some(Piece::X));
        assert_eq!(app.game_state().current_piece(), Piece::O);

        app.maybe_start_computer_move();
        assert!(app.is_thinking());
        wait_for_computer(&mut app);
        assert_eq!(app.game_state().move_count(), 2);
        assert_eq!(app.game_state().current_piece(), Piece::X);
    }

    #[test]
    fn test_computer_moves_first_when_configured() {
        let mut config = AppConfig::default();
        config.ai.difficulty = Some(1);
        config.ui.human_first = false;
        let mut app = App::new(config).unwrap();

        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.game_state().move_count(), 0, "human must wait");

        app.maybe_start_computer_move();
        wait_for_computer(&mut app);
        assert_eq!(app.game_state().move_count(), 1);
    }

    #[test]
    fn test_invalid_column_reports_message() {
        let mut config = AppConfig::default();
        config.ai.difficulty = Some(1);
        let mut app = App::new(config).unwrap();
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.message.as_deref(), Some("Invalid column!"));
        assert_eq!(app.game_state().move_count(), 0);
    }

    #[test]
    fn test_restart_cancels_search() {
        let mut config = AppConfig::default();
        config.ai.difficulty = Some(6);
        config.ui.human_first = false;
        let mut app = App::new(config).unwrap();

        app.maybe_start_computer_move();
        press(&mut app, KeyCode::Char('r'));
        assert!(!app.is_thinking());
        assert_eq!(app.game_state().move_count(), 0);
        assert!(app.agent.is_some());
    }

    #[test]
    fn test_restart_cancels_parallel_search() {
        let mut config = AppConfig::default();
        config.ai.difficulty = Some(8);
        config.ai.max_difficulty = 8;
        config.ai.parallel = true;
        config.ui.human_first = false;
        let mut app = App::new(config).unwrap();

        app.maybe_start_computer_move();
        let started = Instant::now();
        press(&mut app, KeyCode::Char('r'));
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(!app.is_thinking());
        assert!(app.agent.as_ref().is_some_and(ScoringAgent::is_parallel));
    }

    #[test]
    fn test_lost_worker_rebuilds_agent() {
        let mut config = AppConfig::default();
        config.ai.difficulty = Some(3);
        config.ui.human_first = false;
        let mut app = App::new(config).unwrap();

        // A worker that dies without sending anything
        let (tx, rx) = mpsc::channel();
        drop(tx);
        app.agent = None;
        app.pending = Some(PendingMove {
            rx,
            cancel: Arc::new(AtomicBool::new(false)),
            handle: std::thread::spawn(|| {}),
        });

        app.collect_computer_move();
        assert!(!app.is_thinking());
        assert_eq!(app.agent.as_ref().map(ScoringAgent::depth), Some(3));

        app.maybe_start_computer_move();
        wait_for_computer(&mut app);
        assert_eq!(app.game_state().move_count(), 1);
    }

    #[test]
    fn test_quit() {
        let mut app = App::new(AppConfig::default()).unwrap();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
