use anyhow::Context;
use clap::Parser;
use eegviscore::records::Electrode;
use generator::profile::{write_dataset, GeneratorConfig};
use gui_bridge::bridge::{gui_bind_address, GuiBridge};
use std::path::PathBuf;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod generator;
mod gui_bridge;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Scroll-driven EEG scene driver")]
struct Args {
    /// Load a workflow config from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,
    #[arg(long, default_value = "frames")]
    out_dir: PathBuf,
    /// Electrode drawn on first render (TP9, AF7, AF8, TP10)
    #[arg(long)]
    electrode: Option<Electrode>,
    /// Model index selected after the first render (0-3)
    #[arg(long)]
    model: Option<usize>,
    /// Write a synthetic dataset into this directory before anything else
    #[arg(long)]
    generate: Option<PathBuf>,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Render every section once and write the settled frames
    #[arg(long, default_value_t = false)]
    offline: bool,
    /// Keep the HTTP bridge alive for scroll and selection events
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Some(dir) = args.generate.as_ref() {
        let generator = GeneratorConfig {
            seed: args.seed,
            ..Default::default()
        };
        let written = write_dataset(dir, &generator)?;
        println!("Generated {} files in {}", written.len(), dir.display());
    }

    let mut workflow_config = if let Some(path) = args.config {
        WorkflowConfig::load(path)?
    } else {
        WorkflowConfig::from_args(args.data_dir, args.out_dir)
    };
    if let Some(electrode) = args.electrode {
        workflow_config = workflow_config.with_electrode(electrode);
    }
    if let Some(model) = args.model {
        workflow_config = workflow_config.with_model(model);
    }
    let runner = Runner::new(workflow_config);

    if args.offline {
        let result = runner.execute()?;
        println!(
            "Offline run -> frames {}, activations {}, replayed {}, into {}",
            result.frames.len(),
            result.metrics.activations,
            result.metrics.replayed,
            runner.config().out_dir.display()
        );
        if let Some(path) = result.animation {
            println!("Header animation -> {}", path.display());
        }
    }
    if args.serve {
        let gui_bridge = GuiBridge::new(runner.prepare()?);
        let address = gui_bind_address(runner.config().port);
        gui_bridge.spawn(address);
        gui_bridge.publish_status(&format!(
            "HTTP bridge on http://{} (Ctrl+C to stop)...",
            address
        ));
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}
