use optima_register::config::load_config;
use optima_register::field::io::{load_grayscale_field, save_grayscale_field, write_json_file};
use optima_register::field::GridShape;
use optima_register::operator::{AdjointReport, GradientOperator, LinearOperator};
use optima_register::sampling::GridSampler;
use optima_register::MatcherParams;
use serde::Serialize;
use std::env;
use std::path::Path;
use std::time::Instant;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let op = GradientOperator::new();
    let norm = op.get_norm();
    let mut timings = Vec::new();

    let start = Instant::now();
    let random = op.self_check(&config.self_check).map_err(|e| e.to_string())?;
    timings.push(StageTiming::since("selfCheck", start));

    let image = match &config.input {
        Some(input) => {
            let start = Instant::now();
            let field = load_grayscale_field(input)?;
            let shape = field.shape();
            let mut sampler = match config.self_check.seed {
                Some(seed) => GridSampler::new(seed),
                None => GridSampler::from_entropy(),
            };
            let y = sampler
                .random_vector_sample(shape.with_components())
                .map_err(|e| e.to_string())?;
            // Inner products scale with the pixel count
            let tolerance = config.self_check.tolerance * shape.len().max(1) as f64;
            let report = op
                .check_adjoint_pair(&field, &y, tolerance)
                .map_err(|e| e.to_string())?;
            let gradient = op.apply_forward(&field).map_err(|e| e.to_string())?;
            if let Some(path) = &config.output.gradient_image {
                save_grayscale_field(&gradient.magnitude(), path)?;
                println!("Saved gradient magnitude to {}", path.display());
            }
            timings.push(StageTiming::since("imageCheck", start));
            Some(ImageCheckSummary {
                shape,
                total_variation: gradient.magnitude().data.iter().sum(),
                report,
            })
        }
        None => None,
    };

    let summary = AdjointCheckSummary {
        norm,
        matcher: config.matcher,
        random,
        image,
        timings,
    };
    write_json_file(&config.output.report_json, &summary)?;
    println!(
        "Adjoint check passed (defect {:.3e}); report written to {}",
        summary.random.defect,
        config.output.report_json.display()
    );
    Ok(())
}

fn usage() -> String {
    "Usage: adjoint_check <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StageTiming {
    label: &'static str,
    elapsed_ms: f64,
}

impl StageTiming {
    fn since(label: &'static str, start: Instant) -> Self {
        Self {
            label,
            elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageCheckSummary {
    shape: GridShape,
    total_variation: f64,
    report: AdjointReport,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AdjointCheckSummary {
    norm: f64,
    matcher: MatcherParams,
    random: AdjointReport,
    image: Option<ImageCheckSummary>,
    timings: Vec<StageTiming>,
}
