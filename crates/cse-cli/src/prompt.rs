//! Pause before exit.

use std::io::{self, IsTerminal, Write};

/// Blocks until ENTER is pressed. Does nothing when stdin is not a terminal.
pub(crate) fn wait_for_enter() {
    if !io::stdin().is_terminal() {
        return;
    }
    println!();
    print!("*** Press ENTER to close the window ***");
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().read_line(&mut line);
}
