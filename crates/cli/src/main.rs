use std::process::ExitCode;

fn main() -> ExitCode {
    goodscart_cli::run()
}
