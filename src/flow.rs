//! Screen flow state machine
//!
//! Which screen is showing and what each input event moves it to. The
//! transitions are a pure function so the host loop just feeds events in and
//! acts on the result.

use serde::{Deserialize, Serialize};

/// Current top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Screen {
    #[default]
    MainMenu,
    /// A run is in progress
    Playing,
    /// Run ended with this score
    GameOver { score: u64 },
    Settings,
    HighScores,
}

/// Events that can move the flow between screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEvent {
    NewGame,
    OpenHighScores,
    OpenSettings,
    /// Escape / back button
    Back,
    RunEnded { score: u64 },
    /// Play again from the game over screen
    Retry,
    /// Window closed or Exit chosen
    Quit,
}

/// Result of feeding an event to the current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Goto(Screen),
    Stay,
    Exit,
}

impl Screen {
    pub fn next(self, event: FlowEvent) -> Transition {
        use FlowEvent::*;

        match (self, event) {
            (_, Quit) => Transition::Exit,

            (Screen::MainMenu, NewGame) => Transition::Goto(Screen::Playing),
            (Screen::MainMenu, OpenHighScores) => Transition::Goto(Screen::HighScores),
            (Screen::MainMenu, OpenSettings) => Transition::Goto(Screen::Settings),

            (Screen::Playing, RunEnded { score }) => Transition::Goto(Screen::GameOver { score }),
            (Screen::Playing, Back) => Transition::Goto(Screen::MainMenu),

            (Screen::GameOver { .. }, Retry) => Transition::Goto(Screen::Playing),
            (Screen::GameOver { .. }, OpenHighScores) => Transition::Goto(Screen::HighScores),
            (Screen::GameOver { .. }, Back) => Transition::Goto(Screen::MainMenu),

            (Screen::Settings | Screen::HighScores, Back) => Transition::Goto(Screen::MainMenu),

            _ => Transition::Stay,
        }
    }

    /// Apply an event, returning the new screen or `None` on exit
    pub fn apply(self, event: FlowEvent) -> Option<Screen> {
        match self.next(event) {
            Transition::Goto(screen) => {
                log::debug!("Screen {:?} -> {:?}", self, screen);
                Some(screen)
            }
            Transition::Stay => Some(self),
            Transition::Exit => None,
        }
    }
}

/// Main menu entries, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    NewGame,
    HighScores,
    Settings,
    Exit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 4] = [
        MenuOption::NewGame,
        MenuOption::HighScores,
        MenuOption::Settings,
        MenuOption::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuOption::NewGame => "New Game",
            MenuOption::HighScores => "High Scores",
            MenuOption::Settings => "Settings",
            MenuOption::Exit => "Exit",
        }
    }

    pub fn event(&self) -> FlowEvent {
        match self {
            MenuOption::NewGame => FlowEvent::NewGame,
            MenuOption::HighScores => FlowEvent::OpenHighScores,
            MenuOption::Settings => FlowEvent::OpenSettings,
            MenuOption::Exit => FlowEvent::Quit,
        }
    }
}

/// Highlighted main menu entry; wraps at both ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuCursor {
    index: usize,
}

impl MenuCursor {
    pub fn up(&mut self) {
        let len = MenuOption::ALL.len();
        self.index = (self.index + len - 1) % len;
    }

    pub fn down(&mut self) {
        self.index = (self.index + 1) % MenuOption::ALL.len();
    }

    /// Jump straight to an entry (mouse hover)
    pub fn select(&mut self, option: MenuOption) {
        if let Some(i) = MenuOption::ALL.iter().position(|o| *o == option) {
            self.index = i;
        }
    }

    pub fn selected(&self) -> MenuOption {
        MenuOption::ALL[self.index]
    }
}
