//! Stepwise command-line player
//!
//! Build a trace from the command line and autoplay it, or dump it as JSON.
//!
//! ```text
//! stepwise avl [--insert] "5,3,8,1"
//! stepwise reconstruct "3,9,20,15,7" "9,3,15,20,7"
//! stepwise search first-last "5,7,7,8,8,10" 8
//! stepwise sort heap "5,2,9,1" --json
//! ```

use std::env;
use std::process::ExitCode;

use stepwise_algorithms::{build_trace, AnyTrace, Request};
use stepwise_trace::{PlaybackState, Player, PlayerConfig, Trace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: stepwise <avl|reconstruct|search|sort> [options] <inputs...> [--json]";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stepwise=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let json = match args.iter().position(|a| a == "--json") {
        Some(i) => {
            args.remove(i);
            true
        }
        None => false,
    };

    let request = match Request::from_args(args.as_slice()) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("{USAGE}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let trace = match build_trace(&request) {
        Ok(trace) => trace,
        Err(e) => {
            eprintln!("invalid input: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&trace)?);
        return Ok(ExitCode::SUCCESS);
    }

    tracing::info!(snapshots = trace.len(), "playing trace");
    let config = PlayerConfig::default();
    match trace {
        AnyTrace::Avl(t) => autoplay(t, &config).await,
        AnyTrace::Reconstruct(t) => autoplay(t, &config).await,
        AnyTrace::Search(t) => autoplay(t, &config).await,
        AnyTrace::Sort(t) => autoplay(t, &config).await,
    }
    Ok(ExitCode::SUCCESS)
}

/// Play `trace` from the start, printing each step as the cursor reaches it.
async fn autoplay<S>(trace: Trace<S>, config: &PlayerConfig)
where
    S: Clone + Send + 'static,
{
    let len = trace.len();
    let mut player = Player::from_config(trace, config);
    let mut status = player.subscribe();

    print_step(&player, len).await;
    player.play().await;

    let mut shown = 0;
    while status.changed().await.is_ok() {
        let current = status.borrow_and_update().clone();
        if current.cursor != shown {
            shown = current.cursor;
            print_step(&player, len).await;
        }
        if current.state == PlaybackState::Finished {
            break;
        }
    }
}

async fn print_step<S>(player: &Player<S>, len: usize)
where
    S: Clone + Send + 'static,
{
    let snapshot = player.current_snapshot().await;
    let line = snapshot
        .source_line
        .map(|l| format!(" (line {l})"))
        .unwrap_or_default();
    println!("[{:>3}/{len}] {}{line}", snapshot.index + 1, snapshot.description);
}
