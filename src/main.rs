use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
  worklog::cli::cli()
}
