use std::path::PathBuf;

use clap::{Parser, Subcommand};

use matzip_agent::domain::weather::{self, WeatherInfo};
use matzip_agent::infrastructure::logging::init_logging;
use matzip_agent::{AppConfig, create_agent};

#[derive(Parser)]
#[command(name = "matzip-agent", about = "잠실 맛집 추천 에이전트", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ask the agent a question
    Ask {
        /// The question, e.g. "점심으로 냉면 어때?"
        question: Vec<String>,
    },
    /// Build a weather-driven question from a weather snapshot and ask it
    Weather {
        /// Path to a JSON weather snapshot
        #[arg(long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_logging(&config.logging);

    let cli = Cli::parse();
    let question = match cli.command {
        Command::Ask { question } => {
            if question.is_empty() {
                anyhow::bail!("질문을 입력해주세요");
            }
            question.join(" ")
        }
        Command::Weather { file } => {
            let raw = std::fs::read_to_string(&file)?;
            let snapshot: WeatherInfo = serde_json::from_str(&raw)?;
            weather::build_weather_question(&snapshot)
        }
    };

    let agent = create_agent(&config)?;
    let response = agent.respond(&question).await;

    println!("{}", response.answer);
    if !response.sources.is_empty() {
        println!();
        for source in &response.sources {
            let name = source.name.as_deref().unwrap_or("이름 없음");
            println!("- {name}");
            if let Some(link) = &source.map_link {
                println!("  지도: {link}");
            }
            if let Some(thumbnail) = &source.thumbnail {
                println!("  이미지: {thumbnail}");
            }
        }
    }

    Ok(())
}
