use std::path::PathBuf;

use clap::Subcommand;
use serde_json::json;

#[derive(Subcommand)]
pub enum GenerateSubcommands {
    /// Write a sample delivery plan to try the optimizer with
    SamplePlan {
        #[arg(long, short = 'o')]
        out: PathBuf,
    },
}

pub fn run(subcommand: GenerateSubcommands) -> Result<(), anyhow::Error> {
    match subcommand {
        GenerateSubcommands::SamplePlan { out } => {
            let plan = sample_plan();

            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)?;
            }

            std::fs::write(out, serde_json::to_string_pretty(&plan)?)?;
        }
    }

    Ok(())
}

/// A handful of delivery stops around central Chengdu.
fn sample_plan() -> serde_json::Value {
    json!({
        "start": { "lat": 30.6586, "lng": 104.0647, "address": "Tianfu Square" },
        "destinations": [
            { "id": "1", "lat": 30.6398, "lng": 104.0633, "address": "Jiuyanqiao" },
            { "id": "2", "lat": 30.6722, "lng": 104.0431, "address": "Kuanzhai Alley" },
            { "id": "3", "lat": 30.6517, "lng": 104.0822, "address": "Dongmen Bridge" },
            { "id": "4", "lat": 30.6831, "lng": 104.0636, "address": "Wenshu Monastery" },
            { "id": "5", "lat": 30.6330, "lng": 104.0830, "address": "Sichuan University" }
        ]
    })
}
