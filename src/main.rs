fn main() {
    pokermind::cli::run();
}
