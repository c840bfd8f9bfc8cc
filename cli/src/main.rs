//! pdfconv CLI - PDF conversion and page tools

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfconv::{
    add_pages_file, classify_lines, convert_file, remove_pages_file, rotate_file, ConvertOptions,
    ConvertReport, InsertionPoint, NodeKind, Outcome, PageSelection, ParseOptions, PdfSource,
    RenderOptions, StructureBuilder,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "pdfconv")]
#[command(version)]
#[command(about = "Convert resume-like PDFs to Word, HTML, Markdown, text or JSON")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a PDF; the format follows the output extension unless --format is given
    Convert {
        /// Input PDF file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Output format (docx, html, md, txt, json)
        #[arg(short, long, env = "PDFCONV_FORMAT")]
        format: Option<String>,

        #[command(flatten)]
        extract: ExtractArgs,
    },

    /// Convert a PDF to Word (.docx)
    #[command(alias = "docx")]
    Word {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        #[command(flatten)]
        extract: ExtractArgs,
    },

    /// Convert a PDF to a standalone HTML page
    Html {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Add a "Page N" heading per page
        #[arg(long)]
        page_headings: bool,

        #[command(flatten)]
        extract: ExtractArgs,
    },

    /// Classify plain text lines from a file or stdin
    Classify {
        /// Text file (stdin if not specified)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Print nodes as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rotate pages by 90, 180 or 270 degrees
    Rotate {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Rotation angle in degrees
        #[arg(value_name = "ANGLE")]
        angle: i64,

        /// Page range (e.g., "1-3", "1,3,5"); all pages if not specified
        #[arg(long)]
        pages: Option<String>,
    },

    /// Remove pages from a PDF
    RemovePages {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Pages to remove (e.g., "2", "1,4-6")
        #[arg(value_name = "PAGES")]
        pages: String,
    },

    /// Insert all pages of another PDF
    AddPages {
        /// PDF to insert into
        #[arg(value_name = "MAIN")]
        main: PathBuf,

        /// PDF whose pages are inserted
        #[arg(value_name = "ADD")]
        add: PathBuf,

        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// "start", "end" or the page number the first inserted page takes
        #[arg(value_name = "POSITION", default_value = "end")]
        position: String,
    },

    /// Show document information
    Info {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args)]
struct ExtractArgs {
    /// Page range (e.g., "1-10", "1,3,5")
    #[arg(long)]
    pages: Option<String>,

    /// Ignore font metrics and classify plain text only
    #[arg(long, env = "PDFCONV_PLAIN_TEXT")]
    plain_text: bool,

    /// Keep going when a page fails to extract
    #[arg(long, env = "PDFCONV_LENIENT")]
    lenient: bool,

    /// Document title for the output
    #[arg(long)]
    title: Option<String>,

    /// Do not insert page breaks between pages
    #[arg(long)]
    no_page_breaks: bool,
}

impl ExtractArgs {
    fn options(&self, format: Option<&str>) -> CliResult<ConvertOptions> {
        let mut parse = ParseOptions::new();
        if let Some(ref pages) = self.pages {
            parse = parse.with_pages(PageSelection::parse(pages)?);
        }
        if self.plain_text {
            parse = parse.plain_text();
        }
        if self.lenient {
            parse = parse.lenient();
        }

        let mut render = RenderOptions::new().with_page_breaks(!self.no_page_breaks);
        if let Some(ref title) = self.title {
            render = render.with_title(title.clone());
        }

        let mut options = ConvertOptions::new()
            .with_parse_options(parse)
            .with_render_options(render);
        if let Some(format) = format {
            options = options.with_format(format);
        }
        Ok(options)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Convert {
            input,
            output,
            format,
            extract,
        } => extract
            .options(format.as_deref())
            .and_then(|options| cmd_convert(&input, &output, &options)),
        Commands::Word {
            input,
            output,
            extract,
        } => extract
            .options(Some("docx"))
            .and_then(|options| cmd_convert(&input, &output, &options)),
        Commands::Html {
            input,
            output,
            page_headings,
            extract,
        } => extract.options(Some("html")).and_then(|mut options| {
            options.render = options.render.with_page_headings(page_headings);
            cmd_convert(&input, &output, &options)
        }),
        Commands::Rotate {
            input,
            output,
            angle,
            pages,
        } => cmd_rotate(&input, &output, angle, pages.as_deref()),
        Commands::RemovePages {
            input,
            output,
            pages,
        } => cmd_remove_pages(&input, &output, &pages),
        Commands::AddPages {
            main,
            add,
            output,
            position,
        } => cmd_add_pages(&main, &add, &output, &position),
        Commands::Classify { input, json } => {
            exit_on_error(cmd_classify(input.as_deref(), json));
            return;
        }
        Commands::Info { input } => {
            exit_on_error(cmd_info(&input));
            return;
        }
        Commands::Version => {
            cmd_version();
            return;
        }
    };

    let outcome = match outcome {
        Ok(message) => Outcome::ok(message),
        Err(e) => Outcome::failure(e.to_string()),
    };
    println!("{}", outcome.to_json());
    if !outcome.success {
        std::process::exit(1);
    }
}

fn exit_on_error(result: CliResult<()>) {
    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn require_input(input: &Path) -> CliResult<()> {
    if !input.exists() {
        return Err(format!("Input file not found: {}", input.display()).into());
    }
    Ok(())
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn cmd_convert(input: &Path, output: &Path, options: &ConvertOptions) -> CliResult<String> {
    require_input(input)?;

    let pb = spinner("Converting PDF...");
    let result = convert_file(input, output, options);
    pb.finish_and_clear();

    let report: ConvertReport = result?;
    log::info!(
        "{} -> {} ({} bytes)",
        report.input.display(),
        report.output.display(),
        report.output_bytes
    );
    Ok(report.message())
}

fn cmd_rotate(input: &Path, output: &Path, angle: i64, pages: Option<&str>) -> CliResult<String> {
    require_input(input)?;
    let selection = match pages {
        Some(p) => PageSelection::parse(p)?,
        None => PageSelection::All,
    };
    let report = rotate_file(input, output, angle, &selection)?;
    Ok(report.message())
}

fn cmd_remove_pages(input: &Path, output: &Path, pages: &str) -> CliResult<String> {
    require_input(input)?;
    let selection = PageSelection::parse(pages)?;
    let report = remove_pages_file(input, output, &selection)?;
    Ok(report.message())
}

fn cmd_add_pages(main: &Path, add: &Path, output: &Path, position: &str) -> CliResult<String> {
    require_input(main)?;
    require_input(add)?;
    let report = add_pages_file(main, add, output, InsertionPoint::parse(position))?;
    Ok(report.message())
}

fn cmd_classify(input: Option<&Path>, json: bool) -> CliResult<()> {
    let text = match input {
        Some(path) => {
            require_input(path)?;
            fs::read_to_string(path)?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let lines: Vec<&str> = text.lines().collect();
    let nodes = classify_lines(&lines);

    if json {
        println!("{}", serde_json::to_string_pretty(&nodes)?);
        return Ok(());
    }

    for node in &nodes {
        let label = format!("{:<14}", node.kind.as_str());
        let label = match node.kind {
            NodeKind::Name => label.magenta().bold(),
            NodeKind::Contact => label.blue(),
            NodeKind::SectionHeader => label.cyan().bold(),
            NodeKind::JobTitle => label.green().bold(),
            NodeKind::CompanyDate => label.yellow(),
            NodeKind::ListItem | NodeKind::NumberedItem => label.white(),
            _ => label.dimmed(),
        };
        println!("{} {}", label, node.text);
    }
    Ok(())
}

fn cmd_info(input: &Path) -> CliResult<()> {
    require_input(input)?;
    let source = PdfSource::open(input)?;
    let metadata = source.metadata();

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: PDF {}", "Format".bold(), metadata.pdf_version);
    println!("{}: {}", "Pages".bold(), metadata.page_count);

    if let Some(ref title) = metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref author) = metadata.author {
        println!("{}: {}", "Author".bold(), author);
    }
    if let Some(ref creator) = metadata.creator {
        println!("{}: {}", "Creator".bold(), creator);
    }
    if let Some(ref producer) = metadata.producer {
        println!("{}: {}", "Producer".bold(), producer);
    }
    if let Some(ref created) = metadata.created {
        println!("{}: {}", "Created".bold(), created);
    }
    if let Some(ref modified) = metadata.modified {
        println!("{}: {}", "Modified".bold(), modified);
    }

    println!();
    println!("{}", "Structure".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    // Metadata is still worth showing when no text can be structured
    let pages = source.extract_pages(&ParseOptions::new().lenient())?;
    match StructureBuilder::new().build_with_metadata(pages, metadata) {
        Ok(doc) => {
            for (kind, count) in doc.kind_counts() {
                println!("{}: {}", kind.as_str().bold(), count);
            }
            let text = doc.plain_text();
            println!("{}: {}", "Words".bold(), text.split_whitespace().count());
        }
        Err(e) => println!("{}", e.to_string().yellow()),
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfconv".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF to Word/HTML/Markdown conversion and page tools");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_convert_args() {
        let cli = parse(&[
            "pdfconv", "convert", "in.pdf", "out.bin", "-f", "md", "--pages", "1-2",
        ]);
        let Commands::Convert {
            format, extract, ..
        } = cli.command
        else {
            panic!("expected convert");
        };
        assert_eq!(format.as_deref(), Some("md"));

        let options = extract.options(format.as_deref()).unwrap();
        assert_eq!(options.format.as_deref(), Some("md"));
        assert_eq!(options.parse.pages, PageSelection::pages([1, 2]));
        assert!(options.render.page_breaks);
    }

    #[test]
    fn test_bad_page_range_is_an_error() {
        let cli = parse(&["pdfconv", "word", "in.pdf", "out.docx", "--pages", "x-y"]);
        let Commands::Word { extract, .. } = cli.command else {
            panic!("expected word");
        };
        assert!(extract.options(Some("docx")).is_err());
    }

    #[test]
    fn test_docx_alias() {
        let cli = parse(&["pdfconv", "docx", "in.pdf", "out.docx", "--no-page-breaks"]);
        let Commands::Word { extract, .. } = cli.command else {
            panic!("expected word");
        };
        let options = extract.options(Some("docx")).unwrap();
        assert!(!options.render.page_breaks);
    }

    #[test]
    fn test_rotate_args() {
        let cli = parse(&["pdfconv", "rotate", "in.pdf", "out.pdf", "90", "--pages", "2"]);
        assert!(matches!(
            cli.command,
            Commands::Rotate { angle: 90, pages: Some(_), .. }
        ));
    }

    #[test]
    fn test_add_pages_args() {
        let cli = parse(&["pdfconv", "add-pages", "main.pdf", "extra.pdf", "out.pdf"]);
        let Commands::AddPages { position, .. } = cli.command else {
            panic!("expected add-pages");
        };
        assert_eq!(InsertionPoint::parse(&position), InsertionPoint::End);

        let cli = parse(&["pdfconv", "add-pages", "main.pdf", "extra.pdf", "out.pdf", "2"]);
        let Commands::AddPages { position, .. } = cli.command else {
            panic!("expected add-pages");
        };
        assert_eq!(InsertionPoint::parse(&position), InsertionPoint::At(2));
    }

    #[test]
    fn test_add_pages_reports_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let main = dir.path().join("main.pdf");
        fs::write(&main, b"%PDF-1.4").unwrap();
        let err = cmd_add_pages(
            &main,
            &dir.path().join("missing.pdf"),
            &dir.path().join("out.pdf"),
            "end",
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("Input file not found"));
    }

    #[test]
    fn test_require_input() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.pdf");
        let err = require_input(&missing).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Input file not found: {}", missing.display())
        );

        let present = dir.path().join("present.pdf");
        fs::write(&present, b"%PDF-1.4").unwrap();
        assert!(require_input(&present).is_ok());
    }

    #[test]
    fn test_remove_pages_reports_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let result = cmd_remove_pages(
            &dir.path().join("missing.pdf"),
            &dir.path().join("out.pdf"),
            "1",
        );
        assert!(result.unwrap_err().to_string().starts_with("Input file not found"));
    }
}
