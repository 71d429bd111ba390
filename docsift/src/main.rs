use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docsift::{write_outputs, Config, ExtractionDispatcher};

#[derive(Parser)]
#[command(name = "docsift")]
#[command(version)]
#[command(about = "Extract plain text from a folder of PDF, DOCX and spreadsheet files")]
struct Args {
    /// Directory to scan [env: DOCSIFT_INPUT_DIR, default: uploads]
    input_dir: Option<PathBuf>,

    /// Where extracted_<name>.txt files are written [env: DOCSIFT_OUTPUT_DIR, default: extracted_output]
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Print the filename -> text mapping as JSON instead of writing files
    #[arg(long)]
    json: bool,

    /// Stop at the first file that fails instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Rasterization resolution for OCR [env: OCR_DPI]
    #[arg(long)]
    dpi: Option<u32>,

    /// Tesseract languages, e.g. eng or eng+deu [env: OCR_LANGUAGES]
    #[arg(long)]
    languages: Option<String>,

    /// Keep an empty entry for PDFs that cannot be opened [env: DOCSIFT_KEEP_FAILED_PDFS]
    #[arg(long)]
    keep_failed_pdfs: Option<bool>,
}

impl Args {
    fn apply(self, mut config: Config) -> (Config, bool, bool) {
        if let Some(input_dir) = self.input_dir {
            config.extraction.input_dir = input_dir;
        }
        if let Some(output_dir) = self.output_dir {
            config.extraction.output_dir = output_dir;
        }
        if let Some(keep) = self.keep_failed_pdfs {
            config.extraction.keep_failed_pdfs = keep;
        }
        if let Some(dpi) = self.dpi {
            config.ocr.dpi = dpi;
        }
        if let Some(languages) = self.languages {
            config.ocr.languages = languages;
        }
        (config, self.json, self.strict)
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "docsift=info".into());
    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();
    init_tracing();

    let (config, json, strict) = args.apply(Config::from_env());

    tracing::info!(
        "Extracting text from {}...",
        config.extraction.input_dir.display()
    );
    let dispatcher = ExtractionDispatcher::new(&config);
    let result = if strict {
        dispatcher.try_extract_dir(&config.extraction.input_dir)?
    } else {
        dispatcher.extract_dir(&config.extraction.input_dir)
    };
    tracing::info!("Extracted {} file(s)", result.len());

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        write_outputs(&result, &config.extraction.output_dir)?;
    }

    Ok(())
}
