use curlshell::error::RunError;
use curlshell::{run, ShellConfig};

fn main() -> Result<(), RunError> {
    run(ShellConfig::default())
}
