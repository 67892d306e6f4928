//! Developer chores for the `SlotWatch` workspace.
//!
//! Run with: `cargo xtask <command>`
//!
//! Output goes straight to the terminal with `println!` and `eprintln!`.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::env;
use std::process::{Command, ExitCode};

use anyhow::Context;

/// One cargo invocation the gate can run on its own or as part of `ci`.
struct Check {
    name: &'static str,
    about: &'static str,
    args: &'static [&'static str],
    hint: &'static str,
}

const CHECKS: &[Check] = &[
    Check {
        name: "fmt",
        about: "rustfmt in check mode over every crate",
        args: &["fmt", "--all", "--", "--check"],
        hint: "run `cargo fmt --all` and commit the result",
    },
    Check {
        name: "clippy",
        about: "clippy on all targets, warnings denied",
        args: &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        hint: "fix the lints reported above",
    },
    Check {
        name: "test",
        about: "unit and integration tests (wiremock, tempfile)",
        args: &["test", "--workspace"],
        hint: "see the failing tests above",
    },
];

fn main() -> ExitCode {
    let task = env::args().nth(1);

    let result = match task.as_deref() {
        Some("ci") => run_gate(),
        Some("help" | "-h" | "--help") | None => {
            print_usage();
            Ok(())
        }
        Some(name) => match CHECKS.iter().find(|check| check.name == name) {
            Some(check) => run_check(check),
            None => {
                eprintln!("xtask: no task named `{name}`\n");
                print_usage();
                Err(anyhow::anyhow!("unknown task `{name}`"))
            }
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("xtask: {e}");
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    println!("cargo xtask <task>\n");
    println!("  {:<8}every check below, stopping at the first failure", "ci");
    for check in CHECKS {
        println!("  {:<8}{}", check.name, check.about);
    }
}

/// The gate a change must pass before it lands.
fn run_gate() -> anyhow::Result<()> {
    for (index, check) in CHECKS.iter().enumerate() {
        println!("[{}/{}] {}", index + 1, CHECKS.len(), check.name);
        run_check(check)?;
    }
    println!("slotwatch: gate passed");
    Ok(())
}

fn run_check(check: &Check) -> anyhow::Result<()> {
    let status = Command::new("cargo")
        .args(check.args)
        .status()
        .with_context(|| format!("could not start `cargo {}`", check.args.join(" ")))?;
    if !status.success() {
        anyhow::bail!("{} failed: {}", check.name, check.hint);
    }
    Ok(())
}
