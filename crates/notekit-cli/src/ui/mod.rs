mod console;
pub mod render;

pub use console::{ConsoleNavigator, ConsoleNotifier};
