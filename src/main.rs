use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};

use alexnet_viz::demo::{ConvolutionDemo, Demo, PoolingDemo};
use alexnet_viz::ui::{self, TerminalUi};
use alexnet_viz::{
    ArchitectureModel, DemoKind, DemoRunner, Error, KeyCommand, RenderSurface, Result,
    ScrollAnchor, StageController, StageId, StagePanel, StageRenderer, SvgSurface, UiSink,
    VizConfig, format_parameters, logging,
};

#[derive(Parser, Debug)]
#[command(name = "alexnet-viz")]
#[command(about = "An interactive walkthrough of the AlexNet architecture")]
#[command(version)]
struct Args {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every stage with its parameter count
    Stages,

    /// Print the info panel for one stage
    Info {
        /// Stage id, 1-9
        id: StageId,
    },

    /// Draw one stage to an SVG file
    Render {
        /// Stage id, 1-9
        id: StageId,

        /// Sample image for the output stage (cat, dog, car)
        #[arg(short, long)]
        sample: Option<String>,

        /// Output file
        #[arg(short, long, default_value = "stage.svg")]
        out: PathBuf,

        /// Container width; the canvas is this minus the padding
        #[arg(short, long)]
        width: Option<f64>,
    },

    /// Draw one frame of a demo to an SVG file
    Demo {
        /// conv, pool, relu or features
        name: String,

        /// Step to show for the animated demos
        #[arg(long, default_value = "0")]
        step: u32,

        /// Stage to highlight in the feature hierarchy
        #[arg(long)]
        stage: Option<StageId>,

        /// Output file (defaults to <canvas>.svg)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Step through the stages from stdin commands
    Walk {
        /// Write the canvas here after every command
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Explain a technical term, or list them all
    Glossary {
        /// Term to look up
        term: Option<String>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = logging::init_tracing(args.verbose) {
        eprintln!("warning: {e}");
    }

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let config = match &args.config {
        Some(path) => VizConfig::from_file(path)?,
        None => VizConfig::default(),
    };
    let model = ArchitectureModel::alexnet();
    info!(
        total_parameters = %format_parameters(model.total_parameters()),
        "AlexNet model loaded"
    );

    match args.command {
        Command::Stages => list_stages(model),
        Command::Info { id } => show_info(model, id),
        Command::Render {
            id,
            sample,
            out,
            width,
        } => render_stage(model, config, id, sample, &out, width),
        Command::Demo {
            name,
            step,
            stage,
            out,
        } => render_demo(model, &config, &name, step, stage, out),
        Command::Walk { out } => walk(model, &config, out.as_deref()),
        Command::Glossary { term } => show_glossary(term.as_deref()),
    }
}

fn list_stages(model: ArchitectureModel) -> Result<()> {
    println!("{:>2}  {:<34} {:<26} {:>10}", "#", "Stage", "Operation", "Parameters");
    for stage in model.stages() {
        println!(
            "{:>2}  {:<34} {:<26} {:>10}",
            stage.id,
            stage.name,
            stage.operation,
            format_parameters(stage.parameters)
        );
    }
    println!(
        "\nTotal parameters: {} ({})",
        model.total_parameters(),
        format_parameters(model.total_parameters())
    );
    Ok(())
}

fn show_info(model: ArchitectureModel, id: StageId) -> Result<()> {
    let stage = model.get_stage(id).ok_or(Error::StageNotFound(id))?;
    let total = model.total_stages();
    let mut ui = TerminalUi::stdout();
    ui.set_stage_info(&StagePanel::for_stage(stage, total));
    ui.set_progress(id, total, ui::progress_percent(id, total));
    Ok(())
}

fn render_stage(
    model: ArchitectureModel,
    mut config: VizConfig,
    id: StageId,
    sample: Option<String>,
    out: &Path,
    width: Option<f64>,
) -> Result<()> {
    model.get_stage(id).ok_or(Error::StageNotFound(id))?;
    if let Some(width) = width {
        config = config.with_container_width(width);
    }
    let sample = sample.unwrap_or_else(|| config.default_sample.clone());
    if !model.is_known_sample(&sample) {
        warn!(sample = %sample, "unknown sample, using the default predictions");
    }

    let mut renderer = StageRenderer::new(model, SvgSurface::new(0.0, 0.0), &config);
    renderer.draw(id, &sample);
    renderer.surface().write_to(out)?;
    println!("Wrote stage {id} to {}", out.display());
    Ok(())
}

fn render_demo(
    model: ArchitectureModel,
    config: &VizConfig,
    name: &str,
    step: u32,
    stage: Option<StageId>,
    out: Option<PathBuf>,
) -> Result<()> {
    let kind: DemoKind = name.parse()?;
    if let Some(id) = stage {
        model.get_stage(id).ok_or(Error::StageNotFound(id))?;
    }

    let demo: Box<dyn Demo> = match kind {
        DemoKind::Convolution => {
            Box::new(ConvolutionDemo::new(config.frames_per_step).at_step(step))
        }
        DemoKind::Pooling => Box::new(PoolingDemo::new(config.frames_per_step).at_step(step)),
        DemoKind::Relu | DemoKind::FeatureHierarchy => kind.build(config.frames_per_step, stage),
    };

    let canvas_id = kind.canvas_id();
    let mut runner: DemoRunner<SvgSurface> = DemoRunner::new(config.frames_per_step);
    runner.add_canvas(canvas_id, SvgSurface::new(0.0, 0.0));
    runner.start(canvas_id, demo);
    runner.stop_all();

    let out = out.unwrap_or_else(|| PathBuf::from(format!("{canvas_id}.svg")));
    if let Some(surface) = runner.surface(canvas_id) {
        surface.write_to(&out)?;
    }
    println!("Wrote {name} demo to {}", out.display());
    Ok(())
}

const WALK_HELP: &str = "Commands: n = next, p = previous, r = reset, \
<enter> = start/next, cat|dog|car = sample, w <width> = resize, q = quit";

fn walk(model: ArchitectureModel, config: &VizConfig, out: Option<&Path>) -> Result<()> {
    let renderer = StageRenderer::new(model, SvgSurface::new(0.0, 0.0), config);
    let mut controller = StageController::new(model, renderer, TerminalUi::stdout())
        .with_sample(&config.default_sample);

    controller.ui_mut().scroll_into_view(ScrollAnchor::Top);
    controller.mount();
    println!("{WALK_HELP}");

    let frame_interval = Duration::from_millis(config.frame_interval_ms);
    for line in io::stdin().lock().lines() {
        let line = line?;
        let input = line.trim();

        match input {
            "q" | "quit" | "exit" => break,
            "" | "space" => {
                controller.handle_key(KeyCommand::StartOrAdvance);
            }
            "?" | "help" => println!("{WALK_HELP}"),
            sample if model.is_known_sample(sample) => controller.select_sample(sample),
            _ => {
                if let Some(width) = input.strip_prefix("w ") {
                    match width.trim().parse::<f64>() {
                        Ok(width) => controller.resize(width),
                        Err(_) => println!("not a width: {width}"),
                    }
                } else if let Some(command) = KeyCommand::from_key(input) {
                    if !controller.handle_key(command) {
                        debug!(input, "command had no effect");
                    }
                } else {
                    println!("unknown command '{input}'. {WALK_HELP}");
                }
            }
        }

        while controller.is_transitioning() {
            std::thread::sleep(frame_interval);
            controller.tick();
        }

        if let Some(path) = out {
            controller.renderer().surface().write_to(path)?;
        }
    }
    Ok(())
}

fn show_glossary(term: Option<&str>) -> Result<()> {
    match term {
        Some(term) => {
            let entry = ui::lookup(term).ok_or_else(|| Error::UnknownTerm(term.to_string()))?;
            println!("{}: {}", entry.term, entry.definition);
        }
        None => {
            for entry in &ui::GLOSSARY {
                println!("{:<16} {}", entry.term, entry.definition);
            }
        }
    }
    Ok(())
}
