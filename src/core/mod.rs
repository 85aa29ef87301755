// Author: Dustin Pilgrim
// License: MIT

pub mod action;
pub mod config;
pub mod events;
pub mod focus;
pub mod state;
pub mod tracker;
pub mod utils;
