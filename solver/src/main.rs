use std::io::Read;
use std::process::ExitCode;

use unicursal::run_batch;

fn main() -> ExitCode {
    let mut input = String::new();
    if let Err(err) = std::io::stdin().read_to_string(&mut input) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    match run_batch(&input) {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
