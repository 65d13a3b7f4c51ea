//! Version command

/// Run the version command.
pub fn run() {
    println!("devpod {}", env!("CARGO_PKG_VERSION"));
}
