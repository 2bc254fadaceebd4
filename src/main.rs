use std::process::ExitCode;

fn main() -> ExitCode {
    match focusgauge_lib::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
