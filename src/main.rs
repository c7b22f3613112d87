use std::process::ExitCode;

fn main() -> ExitCode {
    folio_tools_lib::run()
}
