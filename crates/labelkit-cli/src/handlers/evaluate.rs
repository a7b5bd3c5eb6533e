//! Evaluate command handler.
//!
//! Runs the fan-out in this process. The command stays up until the run
//! settles, since exiting would cancel the detached task.

use anyhow::{Context, Result};
use labelkit_core::RunCompletion;

use crate::commands::EvaluateArgs;

pub async fn execute(args: EvaluateArgs) -> Result<()> {
    let config = args.runtime.to_server_config(labelkit_axum::bootstrap::DEFAULT_PORT);
    let ctx = labelkit_axum::bootstrap(config).await?;
    let evaluations = ctx.core.evaluations();

    let started = evaluations
        .start(args.project, args.prompt, args.spec)
        .await
        .context("starting evaluation")?;
    let run_id = started.run.id;
    println!("Started evaluation run {run_id}");

    let completion = started
        .completion
        .await
        .context("evaluation task panicked")?;

    match completion {
        RunCompletion::Completed(outcome) => {
            println!("Run {run_id}: {}", outcome.state());
            println!("{}", outcome.analysis_text());
        }
        RunCompletion::Abandoned => {
            println!("Run {run_id} was deleted before it finished");
            return Ok(());
        }
        RunCompletion::Unrecorded(outcome) => {
            anyhow::bail!(
                "run {run_id} settled as {} but the result could not be stored",
                outcome.state()
            );
        }
    }

    if args.wait {
        let run = evaluations.get_with_details(run_id).await?;
        println!("{}", serde_json::to_string_pretty(&run)?);
    }
    Ok(())
}
