mod bootstrap;
mod ledger_file;

use std::{borrow::Cow, env, fs, process};

use bootstrap::AppConfig;
use evensplit_application::SettlementProcessor;
use evensplit_presentation::SettlementPresenter;
use ledger_file::LedgerFile;

type CliResult<T> = Result<T, Cow<'static, str>>;

fn main() {
    bootstrap::init_logging();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> CliResult<()> {
    let Some(path) = env::args().nth(1) else {
        return Err("Usage: evensplit <ledger-file>".into());
    };

    let source =
        fs::read_to_string(&path).map_err(|err| format!("Failed to read '{path}': {err}"))?;

    let config = AppConfig::from_env()?;
    let ledger = LedgerFile::parse(&source).map_err(|err| err.to_string())?;

    let processor = SettlementProcessor::new(&ledger, &ledger);
    let result = processor
        .compute(config.context)
        .map_err(|err| err.to_string())?;

    print!("{}", SettlementPresenter::render(&result));
    Ok(())
}
