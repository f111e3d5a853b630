//! Built-in controls.

mod fixed;
mod label;
pub mod menu;
mod panel;
mod stack;

pub use fixed::Fixed;
pub use label::Label;
pub use menu::{Menu, MenuItem, MenuStrip};
pub use panel::Panel;
pub use stack::StackLayout;
