use std::process::ExitCode;

use clap::Parser;
use parkade::scenarios::{self, Outcome};
use tracing::Level;

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "parkade")]
#[command(about = "Run the parking lot scenario suite")]
#[command(version)]
struct Args {
    /// Only run scenarios whose name contains this string
    #[arg(short, long)]
    filter: Option<String>,

    /// Print scenario names and exit
    #[arg(long)]
    list: bool,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(verbose > 1)
        .try_init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let selected = scenarios::matching(args.filter.as_deref());

    if args.list {
        for s in &selected {
            println!("{}", s.name);
        }
        return ExitCode::SUCCESS;
    }

    // Crashes are reported in the summary line; keep the default hook quiet.
    std::panic::set_hook(Box::new(|info| {
        tracing::debug!(%info, "scenario panicked");
    }));

    println!("=== Parking Lot Scenario Suite ===");
    let mut passed = 0usize;
    for (i, scenario) in selected.iter().enumerate() {
        let status = match scenario.run() {
            Outcome::Passed => {
                passed += 1;
                "PASSED".to_owned()
            }
            Outcome::Failed(failure) => format!("FAILED ({failure})"),
            Outcome::Crashed(msg) => format!("CRASHED ({msg})"),
        };
        println!("Test {:02}: {} - {}", i + 1, scenario.name, status);
    }
    let failed = selected.len() - passed;

    println!();
    println!("=== Summary ===");
    println!("Total:  {}", selected.len());
    println!("Passed: {passed}");
    println!("Failed: {failed}");
    println!("===============");

    if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
