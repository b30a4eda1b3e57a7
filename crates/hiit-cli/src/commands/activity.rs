use clap::{Subcommand, ValueEnum};
use hiit_core::workout::{Activity, ActivityKind};

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Time,
    Step,
}

#[derive(Subcommand)]
pub enum ActivityAction {
    /// Scaffold an activity and print it as JSON
    New {
        #[arg(long, value_enum, default_value = "time")]
        kind: KindArg,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long)]
        iterations: Option<u32>,
        /// Effort duration in seconds (time kind only)
        #[arg(long)]
        effort: Option<u32>,
        /// Rest duration in seconds
        #[arg(long)]
        rest: Option<u32>,
    },
}

pub fn run(action: ActivityAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ActivityAction::New {
            kind,
            name,
            iterations,
            effort,
            rest,
        } => {
            let mut activity = match kind {
                KindArg::Time => Activity::new_time(name),
                KindArg::Step => Activity::new_step(name),
            };
            match &mut activity.kind {
                ActivityKind::Time(cfg) => {
                    if let Some(iterations) = iterations {
                        cfg.iterations = iterations;
                    }
                    if let Some(effort) = effort {
                        cfg.effort_duration = effort;
                    }
                    if let Some(rest) = rest {
                        cfg.rest_duration = rest;
                    }
                }
                ActivityKind::Step(cfg) => {
                    if let Some(iterations) = iterations {
                        cfg.iterations = iterations;
                    }
                    if let Some(rest) = rest {
                        cfg.rest_duration = rest;
                    }
                }
            }
            activity.assign_generated_id(None);
            println!("{}", serde_json::to_string_pretty(&activity)?);
        }
    }
    Ok(())
}
