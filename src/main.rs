mod batch;
mod config;
mod coordinates;
mod error;
mod metadata;
mod output;
mod processor;
mod storage;
mod storage_clients;
mod tags;
mod walker;

#[cfg(test)]
mod test_support;

use crate::batch::BatchReport;
use crate::config::{AppConfig, Mode};
use crate::output::CsvLayout;
use crate::storage::Uploader;
use crate::storage_clients::gcs::GcsUploader;
use anyhow::Result;
use log::info;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

fn prompt_for_folder(prompt: &str) -> io::Result<PathBuf> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(PathBuf::from(line.trim()))
}

async fn run_extract(config: &AppConfig, folder: &Path) -> Result<()> {
    let report = batch::run_batch(folder, config.allowed_extensions(), None).await?;

    let csv_path = Path::new(config.output_csv());
    output::write_csv(csv_path, &report.records, CsvLayout::Metadata)?;
    println!(
        "Metadata extraction complete. Data saved to {}.",
        csv_path.display()
    );
    print_extract_summary(&report);
    Ok(())
}

async fn run_upload(config: &AppConfig, folder: &Path) -> Result<()> {
    println!(
        "\nNote: Ensure that your GCS bucket has public read access for the images to be accessible via URLs.\n"
    );
    let uploader = GcsUploader::new(config)?;
    let report = batch::run_batch(
        folder,
        config.allowed_extensions(),
        Some(&uploader as &dyn Uploader),
    )
    .await?;

    let csv_path = Path::new(config.output_csv());
    output::write_csv(csv_path, &report.records, CsvLayout::MetadataWithLinks)?;
    if report.records.is_empty() {
        println!("No images were processed.");
    } else {
        println!(
            "Metadata extraction and upload complete. Data saved to {}.",
            csv_path.display()
        );
    }

    let log_path = Path::new(&config.error_log_path);
    if output::write_error_log(log_path, &report.errors)? {
        println!(
            "Errors were encountered. Details are logged in {}.",
            log_path.display()
        );
    }

    println!(
        "\nProcessing complete: {} images uploaded successfully, {} images failed.",
        report.uploaded, report.upload_failures
    );
    Ok(())
}

fn print_extract_summary(report: &BatchReport) {
    let located = report.records.iter().filter(|r| r.position.is_some()).count();
    let dated = report.records.iter().filter(|r| r.captured_at.is_some()).count();
    println!(
        "\nProcessing complete: {} images processed ({} with GPS, {} with date), {} errors, {} files skipped.",
        report.records.len(),
        located,
        dated,
        report.errors.len(),
        report.skipped
    );
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = AppConfig::new()?;

    // Initialize env_logger based on config.log_level
    env_logger::Builder::new()
        .filter_level(config.log_level.parse().unwrap_or(log::LevelFilter::Info))
        .init();

    info!("Starting photo-metadata in {} mode", config.mode);

    let folder = match &config.scan_directory {
        Some(dir) => PathBuf::from(dir),
        None => {
            let prompt = match config.mode {
                Mode::Extract => "Enter the folder path containing the photos: ",
                Mode::Upload => "Enter the folder path containing the images: ",
            };
            prompt_for_folder(prompt)?
        }
    };

    if !folder.is_dir() {
        println!("The specified folder does not exist.");
        return Ok(());
    }

    match config.mode {
        Mode::Extract => run_extract(&config, &folder).await?,
        Mode::Upload => run_upload(&config, &folder).await?,
    }

    info!("photo-metadata finished");

    Ok(())
}
