//! Thin CLI around the gate. Commands are intentionally small and auditable
//! so operators can see exactly how the master password is handled.

use std::env;
use std::process::ExitCode;

use zeroize::Zeroize;

use latchkey::config::{load_config, GateConfig};
use latchkey::gate::{AuthGate, GateError, SecretPrompt, TerminalPrompt};
use latchkey::logging::init_logging;
use latchkey::store::{SqliteCredentialStore, StoreError};

const EXIT_FAILURE: u8 = 1;
const EXIT_INVALID: u8 = 2;
const EXIT_UNCONFIGURED: u8 = 3;

fn print_usage() {
    eprintln!("Commands:\n  init [config-path]\n  unlock [config-path]\n  status [config-path]");
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        print_usage();
        return ExitCode::from(EXIT_FAILURE);
    }

    let config = match args.get(2) {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("config load failed: {err}");
                return ExitCode::from(EXIT_FAILURE);
            }
        },
        None => GateConfig::default(),
    };

    let _log_guard = match init_logging(&config.log_dir) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("logging setup failed: {err}");
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    let store = SqliteCredentialStore::new(config.database_path());
    let gate = AuthGate::with_store(Box::new(store));

    match args[1].as_str() {
        "init" => run_init(&gate),
        "unlock" => run_unlock(&gate),
        "status" => run_status(&gate),
        _ => {
            print_usage();
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run_init(gate: &AuthGate) -> ExitCode {
    match gate.is_configured() {
        Ok(true) => {
            eprintln!("A master password is already configured.");
            return ExitCode::from(EXIT_FAILURE);
        }
        Ok(false) => {}
        Err(err) => return report_failure(err),
    }

    let mut prompt = TerminalPrompt::new();
    let mut secret = match prompt.read_secret("Choose master password") {
        Ok(secret) => secret,
        Err(err) => return report_failure(err.into()),
    };
    if secret.is_empty() {
        eprintln!("The master password must not be empty.");
        return ExitCode::from(EXIT_FAILURE);
    }
    let mut confirmation = match prompt.read_secret("Confirm master password") {
        Ok(secret) => secret,
        Err(err) => {
            secret.zeroize();
            return report_failure(err.into());
        }
    };

    let matched = secret == confirmation;
    confirmation.zeroize();
    if !matched {
        secret.zeroize();
        eprintln!("Passwords do not match.");
        return ExitCode::from(EXIT_FAILURE);
    }

    match gate.set_secret(secret) {
        Ok(()) => {
            println!("Master password configured.");
            ExitCode::SUCCESS
        }
        Err(err) => report_failure(err),
    }
}

fn run_unlock(gate: &AuthGate) -> ExitCode {
    let mut prompt = TerminalPrompt::new();
    match gate.prompt_and_verify(&mut prompt) {
        Ok(true) => {
            println!("Access granted.");
            ExitCode::SUCCESS
        }
        Ok(false) => ExitCode::from(EXIT_INVALID),
        Err(GateError::Store(StoreError::NotConfigured)) => {
            eprintln!("No master password configured. Run 'latchkey init' first.");
            ExitCode::from(EXIT_UNCONFIGURED)
        }
        Err(err) => report_failure(err),
    }
}

fn run_status(gate: &AuthGate) -> ExitCode {
    match gate.is_configured() {
        Ok(true) => {
            println!("configured");
            ExitCode::SUCCESS
        }
        Ok(false) => {
            println!("not configured");
            ExitCode::from(EXIT_UNCONFIGURED)
        }
        Err(err) => report_failure(err),
    }
}

fn report_failure(err: GateError) -> ExitCode {
    tracing::error!(error = %err, "gate operation failed");
    match &err {
        GateError::Store(_) => eprintln!("cannot access credential store: {err}"),
        GateError::Prompt(_) => eprintln!("{err}"),
    }
    ExitCode::from(EXIT_FAILURE)
}
