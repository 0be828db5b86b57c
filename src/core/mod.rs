pub mod action;
pub mod command;
pub mod keymap;

pub use action::{Action, NotifyLevel};
pub use command::{parse_command, Command};
pub use keymap::{Binding, HelpEntry, Keymap, Scope};
