fn main() {
    if let Err(e) = moodbot::cli::main() {
        eprintln!("❌ Error: {e}");
        std::process::exit(1);
    }
}
