//! poke CLI - 分析 MySQL 慢查询日志
//!
//! 读取 time 和 query_time 字段并计算 time_start（time - query_time），
//! 按指定规则排序后以 JSON 格式输出全部记录。

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use poke::{DEFAULT_SORT, NormalizedRecord, ParserConfig, SortKey, parse_records_from_file, sort_records};

#[derive(Parser)]
#[command(name = "poke")]
#[command(version, about = "Analyse MySQL slow query logs and print records as JSON", long_about = None)]
struct Cli {
    /// File to read
    #[arg(short, long, default_value = "/dev/stdin")]
    file: PathBuf,

    /// Sort rules as a comma-separated list, e.g. rows_read:desc,rows_sent:asc
    #[arg(short, long, default_value = DEFAULT_SORT)]
    sort: String,

    /// Separator inserted between consecutive query lines
    #[arg(long, default_value = "\n", hide_default_value = true)]
    separator: String,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {:#}", err);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let keys = SortKey::parse_list(&cli.sort).context("--sort flag has invalid syntax")?;
    let config = ParserConfig::default().with_query_separator(cli.separator);

    let (mut records, warnings) = parse_records_from_file(&cli.file, &config)
        .with_context(|| format!("can't read {}", cli.file.display()))?;

    for warning in &warnings {
        log::warn!("{}", warning);
    }

    sort_records(&mut records, &keys).context("unable to sort records")?;

    write_json(&records).context("unable to encode records to JSON")
}

/// 以 4 空格缩进输出 JSON 数组
fn write_json(records: &[NormalizedRecord]) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut out, formatter);
    records.serialize(&mut serializer)?;

    writeln!(out)?;
    out.flush()?;
    Ok(())
}
