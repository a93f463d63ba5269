//! cvpress CLI - render CV and business-plan inputs to PDF

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use cvpress::export::{layout_to_json, to_text_with, HeadingMarkerVisitor};
use cvpress::layout::group_blocks;
use cvpress::model::{Block, ListKind, PageKind};
use cvpress::theme::ThemeResolver;
use cvpress::{
    input_from_json, layout_document, parse_text, to_json, Accent, DocumentStats, FontFamily,
    JsonFormat, PageSize, Pipeline, RawDocumentInput, RenderOptions, TemplateVariant,
};

type CliResult = Result<(), Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "cvpress")]
#[command(author = "cvpress contributors")]
#[command(version)]
#[command(about = "Render CV and business-plan text to themed PDF documents", long_about = None)]
struct Cli {
    /// Input JSON file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    style: StyleArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render an input to PDF
    Render {
        /// Input JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory (current directory if not specified)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Render an input to plain text
    Text {
        /// Input JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Include YAML frontmatter
        #[arg(short, long)]
        frontmatter: bool,

        /// Prefix parsed headings with `#` markers
        #[arg(long)]
        markers: bool,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Render an input to JSON
    Json {
        /// Input JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Emit drawing operations of the laid-out pages instead of the page tree
        #[arg(long)]
        layout: bool,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Show document information
    Info {
        /// Input JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Parse a raw text file and show its blocks and render groups
    Blocks {
        /// Raw text file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// List templates, accents and fonts
    Themes,

    /// Show version information
    Version,
}

/// Style overrides shared by the rendering commands.
#[derive(Args, Clone, Default)]
struct StyleArgs {
    /// Template name (Classic, Modern, Creative, Manager, AI, Reviewed)
    #[arg(long, env = "CVPRESS_TEMPLATE")]
    template: Option<String>,

    /// Accent name (Default, Red, Green, Purple, Yellow)
    #[arg(long, env = "CVPRESS_ACCENT")]
    accent: Option<String>,

    /// Font name (Helvetica, Times-Roman, Courier)
    #[arg(long, env = "CVPRESS_FONT")]
    font: Option<String>,

    /// Review type (manager, reviewed)
    #[arg(long, env = "CVPRESS_REVIEW")]
    review: Option<String>,

    /// Use US Letter paper instead of A4
    #[arg(long, env = "CVPRESS_LETTER")]
    letter: bool,

    /// Compose extras pages on one thread
    #[arg(long, env = "CVPRESS_SEQUENTIAL")]
    sequential: bool,

    /// Write uncompressed content streams
    #[arg(long, env = "CVPRESS_NO_COMPRESS")]
    no_compress: bool,
}

impl StyleArgs {
    fn apply(&self, input: &mut RawDocumentInput) {
        if let Some(ref template) = self.template {
            input.style.template = template.clone();
        }
        if let Some(ref accent) = self.accent {
            input.style.accent = accent.clone();
        }
        if let Some(ref font) = self.font {
            input.style.font = font.clone();
        }
        if let Some(ref review) = self.review {
            input.style.review_type = review.clone();
        }
    }

    fn options(&self) -> RenderOptions {
        let mut options = RenderOptions::new().with_compression(!self.no_compress);
        if self.letter {
            options = options.with_page_size(PageSize::Letter);
        }
        if self.sequential {
            options = options.sequential();
        }
        options
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Render {
            input,
            output,
            style,
        }) => cmd_render(&input, output.as_deref(), &style),
        Some(Commands::Text {
            input,
            output,
            frontmatter,
            markers,
            style,
        }) => cmd_text(&input, output.as_deref(), frontmatter, markers, &style),
        Some(Commands::Json {
            input,
            output,
            compact,
            layout,
            style,
        }) => cmd_json(&input, output.as_deref(), compact, layout, &style),
        Some(Commands::Info { input, style }) => cmd_info(&input, &style),
        Some(Commands::Blocks { input }) => cmd_blocks(&input),
        Some(Commands::Themes) => {
            cmd_themes();
            Ok(())
        }
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: render if input is provided
            if let Some(input) = cli.input {
                cmd_render(&input, cli.output.as_deref(), &cli.style)
            } else {
                println!("{}", "Usage: cvpress <FILE> [OUTPUT]".yellow());
                println!("       cvpress --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_input(path: &Path, style: &StyleArgs) -> Result<RawDocumentInput, Box<dyn std::error::Error>> {
    let json = fs::read_to_string(path)?;
    let mut input = input_from_json(&json)?;
    style.apply(&mut input);
    Ok(input)
}

fn write_or_print(output: Option<&Path>, content: &str) -> CliResult {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_render(input: &Path, output: Option<&Path>, style: &StyleArgs) -> CliResult {
    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(3);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Reading input...");
    let record = load_input(input, style)?;
    pb.inc(1);

    pb.set_message("Composing pages...");
    let pipeline = Pipeline::new(style.options());
    let document = pipeline.render(&record);
    pb.inc(1);

    pb.set_message("Encoding PDF...");
    let exported = pipeline.encode(&record, &document)?;
    let path = exported.save_in(&output_dir)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{}", "Output:".green().bold());
    println!("  {} {}", "├─".dimmed(), path.display());
    println!(
        "  {} {} template, {} logical pages, {} bytes",
        "└─".dimmed(),
        document.metadata.template.slug(),
        document.page_count(),
        exported.len()
    );

    Ok(())
}

fn cmd_text(
    input: &Path,
    output: Option<&Path>,
    frontmatter: bool,
    markers: bool,
    style: &StyleArgs,
) -> CliResult {
    let record = load_input(input, style)?;
    let document = Pipeline::new(style.options()).render(&record);

    let text = if markers {
        to_text_with(&document, &mut HeadingMarkerVisitor, frontmatter)
    } else {
        cvpress::to_text(&document, frontmatter)
    };

    write_or_print(output, &text)
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    layout: bool,
    style: &StyleArgs,
) -> CliResult {
    let record = load_input(input, style)?;
    let document = Pipeline::new(style.options()).render(&record);

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = if layout {
        layout_to_json(&layout_document(&document), format)?
    } else {
        to_json(&document, format)?
    };

    write_or_print(output, &json)
}

fn cmd_info(input: &Path, style: &StyleArgs) -> CliResult {
    let record = load_input(input, style)?;
    let document = Pipeline::new(style.options()).render(&record);
    let physical = layout_document(&document);
    let stats = DocumentStats::collect(&document);

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {:?}", "Kind".bold(), document.metadata.kind);
    println!("{}: {}", "Template".bold(), document.metadata.template.slug());
    if let Some(ref title) = document.metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref author) = document.metadata.author {
        println!("{}: {}", "Author".bold(), author);
    }
    println!(
        "{}: {}",
        "File name".bold(),
        cvpress::suggested_file_name(&record, document.metadata.template)
    );

    println!();
    println!("{}", "Pages".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for page in &document.pages {
        let sheets = physical
            .iter()
            .filter(|p| p.logical_page == page.number)
            .count();
        let label = match page.kind {
            PageKind::Primary => "primary".to_string(),
            PageKind::Extra { ref title, .. } => title.clone(),
        };
        println!("  {:>2}. {} ({} sheet(s))", page.number, label, sheets);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Physical pages".bold(), physical.len());
    println!("{}: {}", "Extras pages".bold(), stats.extra_pages);
    println!("{}: {}", "Headings".bold(), stats.headings);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraphs);
    println!("{}: {}", "List items".bold(), stats.list_items);
    println!("{}: {}", "Tables".bold(), stats.tables);
    println!("{}: {}", "Words".bold(), stats.words);

    Ok(())
}

fn cmd_blocks(input: &Path) -> CliResult {
    let raw = fs::read_to_string(input)?;
    let blocks = parse_text(&raw);
    let groups = group_blocks(&blocks);

    println!(
        "{} {} blocks in {} groups",
        "Parsed".green().bold(),
        blocks.len(),
        groups.len()
    );

    for (i, group) in groups.iter().enumerate() {
        let kind = if group.is_atomic() {
            "keep".yellow()
        } else {
            "flow".dimmed()
        };
        println!("\n{} {}", format!("#{}", i + 1).cyan().bold(), kind);
        for block in group.blocks() {
            println!("  {}", describe(block));
        }
    }

    Ok(())
}

fn describe(block: &Block) -> String {
    match block {
        Block::Heading { level, text } => format!("H{} {}", level, text),
        Block::Paragraph { text } => format!("P  {}", text),
        list => format!(
            "{} {}",
            if list.list_kind() == Some(ListKind::Ordered) {
                "OL"
            } else {
                "UL"
            },
            list.items().join(" | ")
        ),
    }
}

fn cmd_themes() {
    let resolver = ThemeResolver::default();

    println!("{}", "Templates".cyan().bold());
    for variant in TemplateVariant::ALL {
        println!("  {:<10} {:?} ({:?})", variant.slug(), variant, variant.kind());
    }

    println!("\n{}", "Accents".cyan().bold());
    for accent in Accent::ALL {
        let colors = resolver.palette().accent(accent);
        println!(
            "  {:<10} primary {} light {}",
            format!("{:?}", accent),
            colors.primary,
            colors.light
        );
    }

    println!("\n{}", "Fonts".cyan().bold());
    for font in FontFamily::ALL {
        println!("  {:<12} bold: {}", font.regular(), font.bold());
    }
}

fn cmd_version() {
    println!("{} {}", "cvpress".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("CV and business-plan PDF renderer");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_overrides() {
        let style = StyleArgs {
            template: Some("Creative".into()),
            accent: Some("Red".into()),
            letter: true,
            ..Default::default()
        };
        let mut input = RawDocumentInput::default();
        style.apply(&mut input);
        assert_eq!(input.style.template, "Creative");
        assert_eq!(input.style.accent, "Red");
        assert!(input.style.font.is_empty());
        assert_eq!(style.options().page_size, PageSize::Letter);
        assert!(style.options().compress);
    }

    #[test]
    fn test_render_writes_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("order.json");
        fs::write(
            &input,
            r#"{"kind": "cv", "id": "7", "response": "SUMMARY\nBuilt APIs."}"#,
        )
        .unwrap();

        cmd_render(&input, Some(dir.path()), &StyleArgs::default()).unwrap();
        let pdf = fs::read(dir.path().join("cv-classic-7.pdf")).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    #[test]
    fn test_describe_blocks() {
        let blocks = parse_text("## Experience\n1. Shipped");
        let lines: Vec<String> = blocks.iter().map(describe).collect();
        assert_eq!(lines, vec!["H2 Experience", "OL Shipped"]);
    }
}
