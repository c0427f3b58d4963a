mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use workflow::QueryWorkflow;

fn main() -> Result<()> {
    hubfind::logging::init();
    let cli = parse_cli();

    let resolved = settings::load(&cli)?;
    if cli.print_config {
        resolved.print_summary();
    }

    let workflow = QueryWorkflow::new(&cli, resolved)?;
    let page = workflow.run();

    match cli.output {
        OutputFormat::Plain => print_plain(&page),
        OutputFormat::Json => print_json(&page)?,
    }

    if cli.show_url {
        println!("?{}", workflow.share_query());
    }

    Ok(())
}
