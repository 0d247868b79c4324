use std::fs;
use std::path::PathBuf;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use pencilsketch::{
    ServiceParams, export_download, sketch_file_to_path, sketch_stages_to_dir,
    write_report_sidecar,
};

use super::args::CliArgs;
use super::errors::AppError;

/// Parse `--size`: a positive integer or "original" (no cap).
fn parse_size(size: &str) -> Result<Option<usize>, AppError> {
    if size == "original" {
        return Ok(None);
    }
    let parsed_size = size.parse::<usize>().map_err(|_| AppError::InvalidSize {
        size: size.to_string(),
    })?;
    if parsed_size == 0 {
        return Err(AppError::ZeroSize { size: parsed_size });
    }
    Ok(Some(parsed_size))
}

/// Config file (if any) first, then explicit flags on top.
fn resolve_params(args: &CliArgs) -> Result<ServiceParams, AppError> {
    let mut params = match &args.config {
        Some(path) => ServiceParams::from_json_file(path)?,
        None => ServiceParams::default(),
    };
    if let Some(size) = &args.size {
        params.max_dimension = parse_size(size)?;
    }
    if let Some(format) = args.format {
        params.output_format = format;
    }
    if args.seed.is_some() {
        params.seed = args.seed;
    }
    Ok(params)
}

fn required(path: &Option<PathBuf>, arg: &str) -> Result<PathBuf, AppError> {
    path.clone().ok_or(AppError::MissingArgument {
        arg: arg.to_string(),
    })
}

fn run_download(args: &CliArgs, params: &ServiceParams) -> Result<(), AppError> {
    let source = required(&args.data_url_input, "--data-url-input")?;
    let dir = required(&args.download_dir, "--download-dir")?;

    let data_url = fs::read_to_string(&source)?;
    let file = export_download(data_url.trim(), &dir, params)?;
    info!(
        "Download ready at {:?} (offered as {}, {})",
        file.path, file.download_name, file.mime_type
    );
    println!("{}", file.path.display());
    Ok(())
}

fn run_sketch(args: &CliArgs, params: &ServiceParams) -> Result<(), AppError> {
    let input = required(&args.input, "--input")?;
    let output = match (&args.output, &args.stages_dir) {
        (Some(output), _) => Some(output.clone()),
        (None, Some(_)) => None,
        (None, None) => return Err(AppError::MissingArgument {
            arg: "--output".to_string(),
        }),
    };

    if let Some(output) = &output {
        let extension = params.output_format.extension();
        if output.extension().and_then(|e| e.to_str()) != Some(extension) {
            warn!(
                "Output {:?} does not end in .{}; writing {} anyway",
                output, extension, params.output_format
            );
        }
        let report =
            sketch_file_to_path(&input, output, args.original_output.as_deref(), params)?;
        info!(
            "Sketch {}x{} written (seed {}, resized: {})",
            report.width, report.height, report.seed, report.resized
        );
        if args.report {
            write_report_sidecar(output, &report)?;
        }
    }

    if let Some(dir) = &args.stages_dir {
        let written = sketch_stages_to_dir(&input, dir, params)?;
        for path in written {
            info!("Stage map: {:?}", path);
        }
    }
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    }

    let params = resolve_params(&args)?;

    if args.data_url_input.is_some() {
        run_download(&args, &params)?;
    } else {
        run_sketch(&args, &params)?;
    }
    Ok(())
}
