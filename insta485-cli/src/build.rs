//! `insta485generator INPUT_DIR`: render every route and copy static files.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use insta485_build::{pipeline, BuildEvent, BuildOptions, BuildReport};

/// Arguments for a site build.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Input directory containing config.json, templates/ and static/.
    #[arg(value_name = "INPUT_DIR", value_parser = existing_path)]
    pub input_dir: PathBuf,

    /// Output directory (default: INPUT_DIR/html).
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Print more output.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

fn existing_path(raw: &str) -> std::result::Result<PathBuf, String> {
    let path = PathBuf::from(raw);
    if path.exists() {
        Ok(path)
    } else {
        Err(format!("path '{raw}' does not exist"))
    }
}

impl BuildArgs {
    pub fn run(self) -> Result<()> {
        let verbose = self.verbose;
        let options = BuildOptions {
            input_dir: self.input_dir,
            output_dir: self.output,
        };

        let report = pipeline::run_with(&options, |event| {
            if verbose {
                print_event(event);
            }
        })?;

        if verbose {
            print_summary(&options, &report);
        }
        Ok(())
    }
}

fn print_event(event: BuildEvent<'_>) {
    match event {
        BuildEvent::PageRendered(page) => {
            println!("Rendered {} -> {}", page.template, page.path.display())
        }
        BuildEvent::StaticCopied(copy) => println!(
            "Copied {} -> {}",
            copy.source.display(),
            copy.destination.display()
        ),
    }
}

fn print_summary(options: &BuildOptions, report: &BuildReport) {
    let static_files = report.static_copy.as_ref().map_or(0, |c| c.files.len());
    println!(
        "{} {} pages, {} static files → {}",
        "✓".green(),
        report.pages.len(),
        static_files,
        options.layout().output_dir().display()
    );
}
