use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use lightlab_common::NodeId;
use lightlab_driver::{DemoConfig, DemoScene, ManualClock};
use lightlab_render::DebugTextRenderer;
use lightlab_tools::SceneInspector;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lightlab-cli", about = "Headless tools for the lighting demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// YAML config overriding the demo defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and scene summary
    Info,
    /// Drive the demo on a fixed-step clock and report the final state
    Run {
        /// Number of frames to drive
        #[arg(short, long, default_value = "600")]
        frames: u64,
        /// Seconds between frames
        #[arg(long, default_value = "0.016666666666666666")]
        dt: f64,
        /// Print the text frame every N frames (0 prints only the last)
        #[arg(long, default_value = "0")]
        every: u64,
    },
    /// List scene nodes
    Inspect {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
        /// Only show this node id
        #[arg(long)]
        node: Option<u32>,
    },
    /// Print the effective config as YAML
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => DemoConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DemoConfig::default(),
    };

    match cli.command {
        Commands::Info => {
            println!("lightlab-cli v{}", env!("CARGO_PKG_VERSION"));
            let demo = DemoScene::build(&config)?;
            println!("{}", SceneInspector::summary(&demo.scene));
            println!(
                "spin: x={} y={} rad/s, damping={}",
                config.spin.x, config.spin.y, config.controls.enable_damping
            );
        }
        Commands::Run { frames, dt, every } => {
            if !(dt.is_finite() && dt >= 0.0) {
                bail!("--dt must be a non-negative number, got {dt}");
            }
            let demo = DemoScene::build(&config)?;
            let tracked = [demo.meshes.sphere, demo.meshes.cube, demo.meshes.torus];
            let mut driver = demo.into_driver(ManualClock::stepping(dt));
            let mut renderer = DebugTextRenderer::new();

            let mut last = String::new();
            let mut last_elapsed = 0.0;
            driver.run_with(
                &mut renderer,
                |done| done < frames,
                |info, text| {
                    if every > 0 && info.number % every == 0 {
                        println!("{text}");
                    }
                    last_elapsed = info.elapsed;
                    last = text;
                },
            )?;

            if every == 0 && !last.is_empty() {
                println!("{last}");
            }
            println!("frames={} elapsed={last_elapsed:.3}s", driver.frame_count());
            for id in tracked {
                print_rotation(driver.scene(), id)?;
            }
            println!("state_hash={:016x}", driver.scene().state_hash());
        }
        Commands::Inspect { json, node } => {
            let demo = DemoScene::build(&config)?;
            let nodes = match node {
                Some(id) => {
                    let info = SceneInspector::inspect_node(&demo.scene, NodeId(id))
                        .with_context(|| format!("no node #{id}"))?;
                    vec![info]
                }
                None => SceneInspector::list_nodes(&demo.scene),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&nodes)?);
            } else {
                if node.is_none() {
                    println!("{}", SceneInspector::summary(&demo.scene));
                }
                for info in &nodes {
                    println!("{info}");
                }
            }
        }
        Commands::Config => {
            print!("{}", config.to_yaml()?);
        }
    }

    Ok(())
}

fn print_rotation(scene: &lightlab_scene::Scene, id: NodeId) -> anyhow::Result<()> {
    let node = scene.get(id)?;
    let r = node.transform.rotation;
    println!("{} {}: rot=({:.3}, {:.3}, {:.3})", node.id, node.name, r.x, r.y, r.z);
    Ok(())
}
