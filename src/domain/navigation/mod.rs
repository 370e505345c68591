//! Navigation domain module

mod menu;

pub use menu::{Menu, SessionEnd, Transition};
