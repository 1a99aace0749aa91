#![forbid(unsafe_code)]

fn main() {
    std::process::exit(mailforge_cli::run());
}
