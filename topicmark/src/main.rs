use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use dotenv::dotenv;
use std::io::Read;
use std::path::PathBuf;

use common::Settings;
use topicmark::RichTextPipeline;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Variant {
    /// 帖子正文
    Topic,
    /// 通用
    Generic,
}

/// 把帖子正文渲染为 HTML
#[derive(Debug, Parser)]
#[command(name = "topicmark", version)]
struct Cli {
    /// 渲染配置
    #[arg(long, value_enum, default_value_t = Variant::Topic)]
    variant: Variant,

    /// JSON 配置文件，未指定时从环境变量读取
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 输入文件，未指定时读取标准输入
    files: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::from_env()?,
    };

    let pipeline = match cli.variant {
        Variant::Topic => RichTextPipeline::topic(&settings),
        Variant::Generic => RichTextPipeline::generic(&settings),
    };

    let inputs = read_inputs(&cli.files)?;
    log::info!("Rendering {} inputs with {:?} variant", inputs.len(), cli.variant);

    for html in pipeline.convert_batch(inputs).await {
        println!("{}", html);
    }
    Ok(())
}

fn read_inputs(files: &[PathBuf]) -> Result<Vec<String>> {
    if files.is_empty() {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("Failed to read standard input")?;
        return Ok(vec![raw]);
    }

    files
        .iter()
        .map(|path| {
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))
        })
        .collect()
}
