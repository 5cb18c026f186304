use bigdecimal::BigDecimal;
use clap::Parser;
use mutuelle_semelles::report::format_results;
use mutuelle_semelles::{AppConfig, ComparatorService, PlanRepository};
use std::sync::Arc;

/// 比较所有互助保险的鞋垫报销 (文本报告)
#[derive(Debug, Parser)]
#[command(name = "comparer", about = "Compare le remboursement des semelles orthopédiques")]
struct Args {
    /// Prix des semelles
    #[arg(default_value = "150")]
    prix: BigDecimal,

    /// Ne garder qu'une formule
    #[arg(long)]
    formule: Option<String>,

    /// Fichier de données (sinon configuration)
    #[arg(long)]
    data: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();
    let path = match args.data {
        Some(path) => path,
        None => AppConfig::from_env()?.data.path,
    };

    let service = ComparatorService::new(Arc::new(PlanRepository::load(path)?));
    let results = service.compare(&args.prix, args.formule.as_deref())?;

    println!("{}", format_results(&results));
    Ok(())
}
