use std::process::ExitCode;

fn main() -> ExitCode {
    sheetjson_cli::cli::run()
}
