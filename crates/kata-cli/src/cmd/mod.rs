pub mod config;
pub mod new;
pub mod start;
pub mod stats;

use crate::theme;
use kata_core::types::KataType;

/// Uniform exit for a prompt the user backed out of.
pub(crate) fn bail_cancelled() -> anyhow::Result<()> {
    println!("{}", theme::dim("Cancelled."));
    Ok(())
}

pub(crate) fn tier_labels() -> Vec<String> {
    KataType::all()
        .iter()
        .map(|kt| {
            let minutes = match kt {
                KataType::MiniKata => "10-15",
                KataType::NamiKata => "15-30",
                KataType::DevKata => "30-45",
            };
            format!("{kt} ({minutes} min)")
        })
        .collect()
}
