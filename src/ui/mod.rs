//! Terminal UI: a main menu to seat the players, and the match view with
//! mouse-driven meeple selection and drag-and-drop.

mod app;
mod game_view;
mod menu;
mod terminal;

pub use app::App;
pub use game_view::status_line;
pub use terminal::{cell_center, CrosstermTerminal, PointerTracker, TerminalFrontend};
