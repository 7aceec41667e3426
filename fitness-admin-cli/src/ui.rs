use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;

use fitness_admin::models::Entity;
use fitness_admin::store::{EntityStore, Mode, StoreBackend};

/// Run `action` behind a spinner; the spinner stays hidden when stderr is not a terminal
pub async fn loading<F, T>(message: &str, action: F) -> T
where
    F: Future<Output = T>,
{
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));

    let output = action.await;

    spinner.finish_and_clear();
    output
}

/// Offline banner plus any advisory the store is holding
pub fn render_status<E, B>(store: &EntityStore<E, B>)
where
    E: Entity,
    B: ?Sized + StoreBackend<E>,
{
    match store.mode() {
        Mode::Local => {
            let advisory = store
                .error()
                .map(|e| e.detail.clone())
                .unwrap_or_else(|| "Offline mode: showing sample data".to_string());
            println!("{}", format!("⚠ {}", advisory).yellow().bold());
            println!();
        }
        Mode::Remote => tracing::debug!("Serving live data"),
    }
}

pub fn success(message: impl AsRef<str>) {
    println!("{} {}", "✓".green(), message.as_ref());
}

pub fn heading(title: &str) {
    println!("{}", title.bold());
    println!("{}", "─".repeat(title.chars().count().max(32)));
}

pub fn empty(noun: &str) {
    println!("{}", format!("No {} found.", noun).dimmed());
}

/// Truncate to `width` characters, marking the cut
pub fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut clipped: String = value.chars().take(width.saturating_sub(1)).collect();
    clipped.push('…');
    clipped
}
