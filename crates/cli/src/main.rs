use clap::Parser;
use log::debug;
use rust_choices_core::error::Result;
use rust_choices_core::{config, file_handling};
use std::io::{stderr, stdin, stdout, Write};
use std::process::ExitCode;

use rust_choices_cli::choice_prompt::{ChoicePrompt, CrosstermTerminal};
use rust_choices_cli::cli_args::Args;

fn execute() -> Result<()> {
    let args = Args::parse();

    let choices_path = config::get_choices_path(&args.config_path);
    debug!("Choices path: `{}`", choices_path);

    let definitions = file_handling::get_choice_definitions(&choices_path)?;
    let settings = args.session_config()?;

    // The list is drawn on stderr so stdout only carries the selected keys
    let mut prompt = ChoicePrompt::new(
        &definitions,
        settings,
        stdin().lock(),
        stderr(),
        CrosstermTerminal::default(),
    )?;
    let selected = prompt.ask()?;

    let mut stdout = stdout().lock();
    for key in &selected {
        writeln!(stdout, "{key}")?;
    }
    stdout.flush()?;

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
