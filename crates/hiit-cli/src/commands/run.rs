use std::io::{BufRead, Write};
use std::thread;
use std::time::Duration;

use clap::Args;
use hiit_core::bootstrap;
use hiit_core::diagnostics::StderrDiagnostics;
use hiit_core::engine::{format_clock, Phase, PhaseController, TICK_MS};
use hiit_core::events::{CompletionSummary, Event};
use hiit_core::feedback::{Cue, CueKind, CueSink};
use hiit_core::settings::Config;

#[derive(Args)]
pub struct RunArgs {
    /// JSON-encoded activity to run standalone
    #[arg(long, conflicts_with = "session")]
    activity: Option<String>,
    /// JSON-encoded session to run one activity of
    #[arg(long)]
    session: Option<String>,
    /// Index of the session activity to run
    #[arg(long, requires = "session")]
    index: Option<usize>,
}

/// Prints sound cues as a terminal bell and haptic pulses as markers.
/// Delays are rendered, not awaited; pulses never block the tick loop.
struct TerminalSink;

impl CueSink for TerminalSink {
    fn play(&mut self, cue: &Cue) {
        match cue.kind {
            CueKind::Sound { .. } => {
                print!("\x07");
                let _ = std::io::stdout().flush();
            }
            CueKind::Haptic { duration_ms } => {
                if cue.delay_ms > 0 {
                    println!("  ~ pulse {duration_ms} ms (after {} ms)", cue.delay_ms);
                } else {
                    println!("  ~ pulse {duration_ms} ms");
                }
            }
        }
    }
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let diag = StderrDiagnostics;

    let params = super::build_params(args.activity, args.session, args.index);
    let resolution = bootstrap::resolve(&params, &diag)?;
    if let Some(blocker) = resolution.blocker {
        return Err(blocker.into());
    }

    let mut controller = PhaseController::new(
        resolution.context,
        config.ready_secs,
        config.feedback,
        Box::new(TerminalSink),
    );
    if let Some(activity) = controller.current_activity() {
        let label = if activity.name.is_empty() {
            activity.id.as_str()
        } else {
            activity.name.as_str()
        };
        println!("running '{label}' ({} iterations)", activity.iterations());
    }

    controller.start_or_pause();
    let stdin = std::io::stdin();
    let mut summary: Option<CompletionSummary> = None;

    loop {
        for event in controller.poll_events() {
            if let Event::Completed { summary: s, .. } = &event {
                summary = Some(s.clone());
            }
            if let Some(line) = describe(&event) {
                println!("{line}");
            }
        }
        match controller.phase() {
            Phase::Done => break,
            Phase::Effort
                if controller
                    .current_activity()
                    .map(|a| a.is_user_paced())
                    .unwrap_or(false) =>
            {
                print!("  press Enter to finish the set... ");
                let _ = std::io::stdout().flush();
                let mut line = String::new();
                stdin.lock().read_line(&mut line)?;
                controller.advance();
            }
            _ => {
                thread::sleep(Duration::from_millis(TICK_MS));
                controller.tick();
            }
        }
    }

    if let Some(summary) = summary {
        let name = if summary.activity.name.is_empty() {
            summary.activity.id.clone()
        } else {
            summary.activity.name.clone()
        };
        println!("completed '{name}': {} iterations", summary.activity.iterations());
        if let Some(session_id) = &summary.session_id {
            println!(
                "session {session_id}: next activity index {}",
                summary.next_activity_index()
            );
        }
    }
    Ok(())
}

fn describe(event: &Event) -> Option<String> {
    match event {
        Event::ReadyStarted { duration_secs, .. } => {
            Some(format!("ready ({duration_secs} s)"))
        }
        Event::EffortStarted {
            iteration,
            duration_secs: Some(secs),
            ..
        } => Some(format!(
            "effort {iteration} — {}",
            format_clock(f64::from(*secs))
        )),
        Event::EffortStarted { iteration, .. } => {
            Some(format!("effort {iteration} — user-paced"))
        }
        Event::RestStarted {
            iteration,
            duration_secs,
            ..
        } => Some(format!(
            "rest {iteration} — {}",
            format_clock(f64::from(*duration_secs))
        )),
        Event::PhaseSkipped { phase, .. } => Some(format!("skipped {phase:?}")),
        Event::Paused { remaining_secs, .. } => {
            Some(format!("paused at {}", format_clock(*remaining_secs)))
        }
        Event::Resumed { .. } | Event::Completed { .. } => None,
    }
}
