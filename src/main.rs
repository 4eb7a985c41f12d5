mod apt;
mod cli;
mod commands;
mod system;
mod testutil;
mod ui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};

use crate::apt::Apt;
use crate::ui::{Animated, Effects, PlainText, Silent};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Command::Check) => {
            let result = commands::cmd_check(&Apt)?;
            output(&result, cli.json, commands::format_check_human)?;
        }
        Some(Command::Info) => {
            let result = commands::cmd_info();
            output(&result, cli.json, commands::format_info_human)?;
        }
        None => {
            let fx = effects(&cli);
            let result = commands::cmd_run(&Apt, fx.as_ref())?;
            output(&result, cli.json, commands::format_run_human)?;
        }
    }
    Ok(())
}

fn effects(cli: &Cli) -> Box<dyn Effects> {
    if cli.json {
        Box::new(Silent)
    } else if cli.plain {
        Box::new(PlainText)
    } else {
        Box::new(Animated::new())
    }
}

fn output<T: serde::Serialize>(result: &T, json: bool, human_fn: fn(&T) -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        let text = human_fn(result);
        if !text.is_empty() {
            println!("{}", text);
        }
    }
    Ok(())
}
