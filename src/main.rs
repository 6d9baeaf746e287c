use clap::{Args, Parser, Subcommand};
use ecoscore::config::AppConfig;
use ecoscore::error::AppError;
use ecoscore::product::{build_tree, ImpactRecord, ProductRecord};
use ecoscore::reports::{ReportPayload, VisitorRegistry};
use ecoscore::scoring::{HiggIndexStrategy, ScoreBreakdown, ScoringEngine, ScoringParams};
use ecoscore::supply_chain::{ResolutionRequest, ResolverChain, SupplyDataResolver};
use ecoscore::telemetry;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "ecoscore",
    about = "Score garment sustainability from material component trees",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a product with one strategy and optional badges
    Score(ScoreArgs),
    /// Run a report visitor over a product
    Report(ReportArgs),
    /// Resolve supplier carbon data through the resolver chain
    Resolve(ResolveArgs),
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// Product JSON file
    #[arg(long)]
    product: PathBuf,
    /// Strategy identifier
    #[arg(long, default_value = HiggIndexStrategy::ID)]
    strategy: String,
    /// Criterion weight for the custom strategy (criterion=value)
    #[arg(long = "weight", value_parser = parse_weight)]
    weights: Vec<(String, f64)>,
    /// Badge applied in addition to those listed in the product file
    #[arg(long = "badge")]
    badges: Vec<String>,
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Product JSON file
    #[arg(long)]
    product: PathBuf,
    /// Visitor identifier
    #[arg(long, default_value = VisitorRegistry::PDF)]
    visitor: String,
    /// Print the plain-text rendering instead of JSON (pdf only)
    #[arg(long)]
    text: bool,
}

#[derive(Args, Debug)]
struct ResolveArgs {
    /// Supplier identifier
    #[arg(long)]
    supplier: String,
    /// Optional material the request is scoped to
    #[arg(long)]
    material: Option<String>,
}

#[derive(Debug, Serialize)]
struct ScoreResponse {
    product: String,
    aggregate: ImpactRecord,
    scorecard: ScoreBreakdown,
    average_score: f64,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    info!(?config.environment, "ecoscore starting");

    match cli.command {
        Command::Score(args) => run_score(&config, args),
        Command::Report(args) => run_report(args),
        Command::Resolve(args) => run_resolve(&config, args),
    }
}

fn parse_weight(raw: &str) -> Result<(String, f64), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected criterion=value, got '{raw}'"))?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("invalid weight '{value}' ({err})"))?;
    Ok((key.trim().to_string(), value))
}

fn load_product(path: &PathBuf) -> Result<ProductRecord, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_score(config: &AppConfig, args: ScoreArgs) -> Result<(), AppError> {
    let record = load_product(&args.product)?;
    let product = build_tree(&record)?;

    let params: ScoringParams = args.weights.into_iter().collect();
    let mut badges = record.badges.clone();
    badges.extend(args.badges);

    let engine = ScoringEngine::new(config.scoring);
    let scorecard = engine.scorecard(&product, &args.strategy, &params, &badges)?;
    let average_score = engine.average_score(&product, &badges)?;

    print_json(&ScoreResponse {
        product: product.name().to_string(),
        aggregate: product.aggregate(),
        scorecard,
        average_score,
    })
}

fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let record = load_product(&args.product)?;
    let product = build_tree(&record)?;

    match VisitorRegistry::standard().run(&product, &args.visitor)? {
        ReportPayload::Pdf(report) if args.text => {
            println!("{}", report.render_text());
            Ok(())
        }
        payload => print_json(&payload),
    }
}

fn run_resolve(config: &AppConfig, args: ResolveArgs) -> Result<(), AppError> {
    let resolver = SupplyDataResolver::new(ResolverChain::standard(), &config.resolver);

    let mut request = ResolutionRequest::new(args.supplier);
    if let Some(material) = args.material {
        request = request.with_material(material);
    }

    print_json(&resolver.resolve(&request))
}
