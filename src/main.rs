// main.rs - CLI entry point

use std::time::Instant;

use msaoutlier::cli::Config;
use msaoutlier::prelude::*;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), String> {
    let mut args: Args = argh::from_env();

    // Handle generate config first
    if args.generate_config {
        println!("{}", Config::generate_sample());
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    let log_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if args.list_models {
        println!("Available distance models:");
        for model in DistanceModel::all() {
            println!("  - {}: {}", model.name(), model.description());
        }
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
        println!("📄 Loaded configuration from: {}", config_path);
    }

    let validation = validate_args(&args)?;
    let config = &validation.analysis;

    println!("🚀 {}", msaoutlier::get_info());
    println!("📐 Distance model: {} ({})", config.model.name(), config.model.description());
    println!("🎯 Z-score threshold: {}", config.z_threshold);

    // Configure thread pool
    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
        println!("🧵 Threads: {}", n);
    } else {
        println!("🧵 Threads: {} (auto-detected)", rayon::current_num_threads());
    }

    let files = find_alignment_files(
        &validation.input_dir,
        validation.include_regex.as_ref(),
        validation.exclude_regex.as_ref(),
    )?;
    if files.is_empty() {
        println!("No FASTA files found in {}", validation.input_dir.display());
        return Ok(());
    }
    println!("🔍 Found {} alignment files to process.", files.len());

    std::fs::create_dir_all(&validation.output_dir).map_err(|e| {
        format!(
            "Failed to create output directory '{}': {}",
            validation.output_dir.display(),
            e
        )
    })?;

    let start = Instant::now();
    let summary = process_all(&files, config, &validation.output_dir, true);

    for failure in &summary.failures {
        println!("⚠️  Skipped {}: {}", failure.file_path.display(), failure.error);
    }

    let report_path = write_report(
        &validation.output_dir,
        &summary,
        config.z_threshold,
        config.model.name(),
    )?;
    println!("📝 Report saved to {}", report_path.display());

    if args.json {
        let json_path = write_summary_json(
            &validation.output_dir,
            &summary,
            config.z_threshold,
            config.model.name(),
        )?;
        println!("📝 JSON summary saved to {}", json_path.display());
    }

    println!(
        "✅ Analysis complete! {} alignments, {} outliers, {} skipped ({:.2}s)",
        summary.reports.len(),
        summary.total_outliers(),
        summary.failures.len(),
        start.elapsed().as_secs_f64()
    );

    if config.plot {
        let shown = std::fs::canonicalize(&validation.output_dir)
            .unwrap_or_else(|_| validation.output_dir.clone());
        println!("\n📊 Plots have been saved to: {}", shown.display());
    }

    Ok(())
}
