//! Cache management commands

use tabled::Tabled;

use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;
use crate::output::{json, table};

/// Show cache status/statistics
pub fn status(ctx: &CommandContext) -> Result<()> {
    let stats = ctx.service.cache().stats();

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&stats)?),
        _ => {
            println!("Cache Status");
            println!("────────────────────────────────────────");
            println!("Location:       {}", stats.location);
            println!("Fresh entries:  {}", stats.fresh_entries);
            println!("Stale entries:  {}", stats.stale_entries);
            println!("Total size:     {}", format_size(stats.size_bytes));

            for (data_type, count) in &stats.by_type {
                println!("  {:<18}{}", data_type, count);
            }
            if let Some(oldest) = stats.oldest_entry {
                println!("Oldest entry:   {}", format_millis(oldest));
            }
            if let Some(newest) = stats.newest_entry {
                println!("Newest entry:   {}", format_millis(newest));
            }
        }
    }

    Ok(())
}

/// Clear all cache entries
pub fn clear(ctx: &CommandContext) -> Result<()> {
    let removed = ctx.service.cache().stats().total_entries;
    ctx.service.clear_cache();

    match ctx.format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "entries_removed": removed,
                "success": true,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => {
            if removed > 0 {
                println!("Cleared {} cache entries", removed);
            } else {
                println!("Cache was already empty");
            }
        }
    }

    Ok(())
}

/// Show where the cache lives
pub fn path(ctx: &CommandContext) -> Result<()> {
    println!("{}", ctx.service.cache().stats().location);
    Ok(())
}

#[derive(Debug, Tabled)]
struct TtlRow {
    #[tabled(rename = "DATA TYPE")]
    data_type: &'static str,
    #[tabled(rename = "TTL (MIN)")]
    minutes: u64,
}

/// Show configured lifetimes
pub fn ttl(ctx: &CommandContext) -> Result<()> {
    let rows: Vec<TtlRow> = ctx
        .service
        .cache()
        .ttl()
        .entries()
        .into_iter()
        .map(|(data_type, lifetime)| TtlRow {
            data_type,
            minutes: lifetime.as_secs() / 60,
        })
        .collect();

    match ctx.format {
        OutputFormat::Json => {
            let by_type: serde_json::Map<String, serde_json::Value> = rows
                .iter()
                .map(|r| (r.data_type.to_string(), r.minutes.into()))
                .collect();
            println!("{}", json::format_json(&by_type)?);
        }
        _ => println!("{}", table::format_table(&rows)),
    }

    Ok(())
}

fn format_millis(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|d| {
            d.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "unknown".to_string())
}

/// Format bytes as human-readable size
fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
