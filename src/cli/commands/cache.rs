//! Cache command - inspect cached predictions

use super::print_json;
use super::request::builder;
use crate::cache::{fingerprint, Fingerprint, SqliteStore};
use crate::cli::args::{CacheAction, CacheArgs, OutputFormat};
use crate::config::{Config, ConfigManager};
use crate::error::{WagecastError, WagecastResult};
use crate::ui;

/// Stored text shown in a listing before truncation
const PREVIEW_CHARS: usize = 48;

/// Execute the cache command
pub async fn execute(args: CacheArgs, config: &Config) -> WagecastResult<()> {
    let db_path = ConfigManager::cache_db_path(config);

    match args.action {
        CacheAction::Path => {
            println!("{}", db_path.display());
            Ok(())
        }
        CacheAction::Key(fields) => {
            let request = builder(&fields).build()?;
            println!("{}", fingerprint(&request));
            Ok(())
        }
        CacheAction::Show { fingerprint } => {
            let key = Fingerprint::parse(&fingerprint)?;
            let store = SqliteStore::open(&db_path).await?;
            let entry = store
                .entry(&key)
                .await?
                .ok_or_else(|| WagecastError::CacheEntryNotFound(key.to_string()))?;
            println!("{}", entry.result_text);
            Ok(())
        }
        CacheAction::List { limit, format } => {
            let store = SqliteStore::open(&db_path).await?;
            let entries = store.list(limit).await?;

            match format {
                OutputFormat::Json => print_json(&entries)?,
                OutputFormat::Plain => {
                    for entry in &entries {
                        println!("{}\t{}", entry.fingerprint, entry.result_text);
                    }
                }
                OutputFormat::Table => {
                    let total = store.count().await?;
                    let rows: Vec<Vec<String>> = entries
                        .iter()
                        .map(|e| {
                            vec![
                                e.fingerprint.short().to_string(),
                                e.created_at.format("%Y-%m-%d %H:%M").to_string(),
                                preview(&e.result_text),
                            ]
                        })
                        .collect();
                    ui::table(&["FINGERPRINT", "CREATED", "ESTIMATE"], &rows);
                    println!("\n{} of {} cached predictions", entries.len(), total);
                }
            }
            Ok(())
        }
    }
}

/// First line of a result, shortened for a table cell
fn preview(text: &str) -> String {
    let line = text.lines().next().unwrap_or_default();
    if line.chars().count() > PREVIEW_CHARS {
        let cut: String = line.chars().take(PREVIEW_CHARS - 3).collect();
        format!("{}...", cut)
    } else {
        line.to_string()
    }
}
