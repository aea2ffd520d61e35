use anyhow::Context;
use clap::Parser;
use generator::demo::{demo_forest, synthetic_dataset, DemoConfig};
use log::info;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use web::bridge::{serve, AppState};
use winequality::dataset::{ReferenceDataset, ReferenceSample};
use winequality::{Classifier, RandomForest};
use workflow::config::{load_form_input, ServerConfig, DEFAULT_BIND};
use workflow::report::outcome_table;
use workflow::runner::Runner;

mod generator;
mod web;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Red wine quality prediction form")]
struct Args {
    /// Load server settings from YAML instead of the flags below
    #[arg(long)]
    config: Option<PathBuf>,
    /// Random forest artifact exported as JSON
    #[arg(long, default_value = "rf_model.json")]
    model: PathBuf,
    /// Reference table with the feature columns and `quality`
    #[arg(long, default_value = "red_wine_quality.csv")]
    dataset: PathBuf,
    #[arg(long, default_value = DEFAULT_BIND)]
    bind: SocketAddr,
    #[arg(long, default_value_t = winequality::dataset::DEFAULT_SAMPLE_SIZE)]
    sample_size: usize,
    #[arg(long, default_value_t = winequality::dataset::DEFAULT_SAMPLE_SEED)]
    sample_seed: u64,
    /// Use the built-in demo forest and a synthetic reference table
    #[arg(long, default_value_t = false)]
    demo: bool,
    /// Run one submission read from YAML, print the results table and exit
    #[arg(long)]
    submit: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = if let Some(path) = args.config {
        ServerConfig::load(path)?
    } else {
        ServerConfig::from_args(
            args.model,
            args.dataset,
            args.bind,
            args.sample_size,
            args.sample_seed,
        )
    };

    let classifier: Arc<dyn Classifier> = if args.demo {
        info!("using built-in demo forest");
        Arc::new(demo_forest().context("building demo forest")?)
    } else {
        Arc::new(RandomForest::load(&config.model_path).with_context(|| {
            format!("loading model artifact {}", config.model_path.display())
        })?)
    };
    let runner = Runner::new(classifier.clone());

    if let Some(path) = args.submit {
        let input = load_form_input(&path)?;
        let outcome = runner.execute(&input)?;
        print!("{}", outcome_table(&outcome));
        return Ok(());
    }

    let dataset = if args.demo {
        synthetic_dataset(classifier.as_ref(), &DemoConfig::default())?
    } else {
        ReferenceDataset::load(&config.dataset_path).with_context(|| {
            format!("loading reference dataset {}", config.dataset_path.display())
        })?
    };
    let sample = ReferenceSample::draw(&dataset, config.sample_size, config.sample_seed)
        .context("drawing reference sample")?;

    serve(AppState::new(runner, sample)?, config.bind)
}
