// Author: Dustin Pilgrim
// License: MIT

pub mod daemon_mode;
