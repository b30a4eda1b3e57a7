use clap::Args;
use hiit_core::bootstrap;
use hiit_core::diagnostics::StderrDiagnostics;

#[derive(Args)]
pub struct ResolveArgs {
    /// JSON-encoded activity
    #[arg(long, conflicts_with = "session")]
    activity: Option<String>,
    /// JSON-encoded session
    #[arg(long)]
    session: Option<String>,
    /// Index of the session activity
    #[arg(long, requires = "session")]
    index: Option<usize>,
}

pub fn run(args: ResolveArgs) -> Result<(), Box<dyn std::error::Error>> {
    let params = super::build_params(args.activity, args.session, args.index);
    let resolution = bootstrap::resolve(&params, &StderrDiagnostics)?;

    println!("{}", serde_json::to_string_pretty(&resolution.context)?);
    if let Some(blocker) = resolution.blocker {
        return Err(blocker.into());
    }
    Ok(())
}
