//! Stats command implementation

use serde_json::{Map, Value};

use super::RunStatus;
use crate::cli::{OutputFormat, StatsArgs};
use crate::drift::{summarize, ReferenceColumnStatistic};
use crate::error::Result;
use crate::io::read_csv;

pub fn run_stats(args: StatsArgs, quiet: bool) -> Result<RunStatus> {
    let data = read_csv(&args.data)?;
    let statistics = summarize(&data);

    match args.format {
        OutputFormat::Text => {
            if !quiet {
                println!(
                    "{} ({} rows, {} columns)",
                    args.data.display(),
                    data.n_rows(),
                    data.n_columns()
                );
                for (name, stat) in &statistics {
                    println!();
                    println!("{}", format_statistic(name, stat));
                }
            }
        }
        OutputFormat::Json => {
            let mut map = Map::new();
            for (name, stat) in &statistics {
                map.insert(name.clone(), serde_json::to_value(stat)?);
            }
            println!("{}", serde_json::to_string_pretty(&Value::Object(map))?);
        }
    }

    Ok(RunStatus::Clean)
}

/// Multi-line text block for one column
pub fn format_statistic(name: &str, stat: &ReferenceColumnStatistic) -> String {
    match stat {
        ReferenceColumnStatistic::Continuous(s) => format!(
            "{name} (continuous, {} values)\n  mean={:.4} std={:.4}\n  min={:.4} q25={:.4} median={:.4} q75={:.4} max={:.4}",
            s.count, s.mean, s.std, s.min, s.q25, s.median, s.q75, s.max
        ),
        ReferenceColumnStatistic::Categorical(s) => {
            let mut lines = vec![
                format!("{name} (categorical, {} values)", s.count),
                format!(
                    "  {} categories, mode={}",
                    s.unique_values,
                    s.mode.as_deref().unwrap_or("-")
                ),
            ];
            lines.extend(s.counts.iter().map(|(category, n)| format!("    {category}: {n}")));
            lines.join("\n")
        }
    }
}
