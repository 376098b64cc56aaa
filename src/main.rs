fn main() {
    if let Err(err) = padview::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
