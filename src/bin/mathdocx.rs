//! mathdocx CLI - MathML → LaTeX conversion for HTML documents

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use mathdocx::{
    core::html::wrap,
    diagnostics::{check_html, format_diagnostics},
    CommandTranslator, Config, ConversionError, ConversionOutput, ConversionWarning, Converter,
    PandocRunner, PandocStatus, Placement,
};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read, Write};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "mathdocx")]
#[command(version)]
#[command(about = "mathdocx - convert MathML in HTML documents to LaTeX for pandoc/DOCX", long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input HTML file (reads from stdin if not provided)
    input_file: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Produce a Word document through pandoc instead of HTML
    #[arg(long)]
    docx: bool,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Primary translator tried before the built-in one
    #[arg(long, value_enum, default_value_t = Primary::None)]
    primary: Primary,

    /// Do not inject the default stylesheet
    #[arg(long)]
    no_style: bool,

    /// Check mode - analyze formulas for potential issues without converting
    #[arg(long)]
    check: bool,

    /// Disable colored diagnostics
    #[arg(long)]
    no_color: bool,

    /// Strict mode: exit with error if any conversion warnings occur
    #[arg(long)]
    strict: bool,

    /// Quiet mode: suppress warning output to stderr
    #[arg(short, long)]
    quiet: bool,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Translate a single MathML formula to LaTeX
    Math {
        /// MathML markup (reads from stdin if not provided)
        mathml: Option<String>,

        /// Delimiters to wrap the result in
        #[arg(short, long, value_enum, default_value_t = Delimiters::None)]
        delimiters: Delimiters,

        /// Primary translator tried before the built-in one
        #[arg(long, value_enum, default_value_t = Primary::None)]
        primary: Primary,
    },

    /// Batch convert every HTML file in a directory
    Batch {
        /// Input directory or single file
        input: String,

        /// Output directory
        #[arg(short, long)]
        output_dir: String,

        /// Write .docx files through pandoc
        #[arg(long)]
        docx: bool,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Check whether pandoc is installed
    Pandoc {
        /// TOML configuration file (for a custom pandoc path)
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Show version and feature info
    Info,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum Primary {
    /// Built-in translator only
    None,
    /// pandoc (html → latex) first, built-in translator on failure
    Pandoc,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum Delimiters {
    /// Bare LaTeX
    None,
    /// `$...$`
    Inline,
    /// `$$...$$`
    Display,
}

#[cfg(feature = "cli")]
fn main() -> io::Result<()> {
    let cli = Cli::parse();

    // Handle subcommands first
    if let Some(cmd) = cli.command {
        return handle_subcommand(cmd);
    }

    let input = read_input(cli.input_file.as_deref())?;

    // If check mode, analyze and report issues
    if cli.check {
        let result = check_html(&input);
        println!("{}", format_diagnostics(&result, !cli.no_color));

        // Exit with error code if there are errors
        if result.has_errors() {
            std::process::exit(1);
        }
        return Ok(());
    }

    let mut config = load_config(cli.config.as_deref())?;
    if cli.no_style {
        config.convert.inject_stylesheet = false;
    }

    let converter = build_converter(&config, cli.primary);
    let ConversionOutput { content, warnings } = converter
        .convert_html_with_diagnostics(&input)
        .map_err(to_io)?;

    // Print warnings to stderr (unless quiet mode)
    if !cli.quiet && !warnings.is_empty() {
        print_warnings_to_stderr(&warnings, !cli.no_color);
    }

    // Check strict mode
    if cli.strict && !warnings.is_empty() {
        eprintln!(
            "Error: {} conversion warning(s) in strict mode",
            warnings.len()
        );
        std::process::exit(1);
    }

    if cli.docx {
        let runner = PandocRunner::new(config.pandoc.clone());
        match cli.output {
            Some(path) => {
                runner.html_to_docx(&content, Path::new(&path)).map_err(to_io)?;
                report_written(&path, warnings.len());
            }
            None => {
                let bytes = runner.html_to_docx_bytes(&content).map_err(to_io)?;
                io::stdout().write_all(&bytes)?;
            }
        }
        return Ok(());
    }

    // Output
    match cli.output {
        Some(path) => {
            fs::write(&path, &content)?;
            report_written(&path, warnings.len());
        }
        None => {
            println!("{}", content);
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn handle_subcommand(cmd: Commands) -> io::Result<()> {
    match cmd {
        Commands::Math {
            mathml,
            delimiters,
            primary,
        } => {
            let mathml = match mathml {
                Some(markup) => markup,
                None => read_input(None)?,
            };

            let converter = build_converter(&Config::default(), primary);
            let output = converter.mathml_to_latex(&mathml);
            for warning in &output.warnings {
                eprintln!("⚠ {}", warning);
            }

            let latex = match delimiters {
                Delimiters::None => output.content,
                Delimiters::Inline => wrap(&output.content, Placement::Inline),
                Delimiters::Display => wrap(&output.content, Placement::Display),
            };
            println!("{}", latex);
        }

        Commands::Batch {
            input,
            output_dir,
            docx,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            let converter = build_converter(&config, Primary::None);
            let runner = PandocRunner::new(config.pandoc.clone());

            // Create output directory if it doesn't exist
            fs::create_dir_all(&output_dir)?;
            let out_ext = if docx { "docx" } else { "html" };

            // Find input files
            let input_path = Path::new(&input);
            let files: Vec<PathBuf> = if input_path.is_dir() {
                let mut files: Vec<PathBuf> = fs::read_dir(input_path)?
                    .filter_map(|e| e.ok())
                    .map(|e| e.path())
                    .filter(|path| {
                        let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");
                        ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm")
                    })
                    .collect();
                files.sort();
                files
            } else {
                // Single file
                vec![input_path.to_path_buf()]
            };

            let mut success_count = 0;
            let mut error_count = 0;

            for file_path in files {
                let filename = file_path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("output");
                let output_path = Path::new(&output_dir).join(format!("{}.{}", filename, out_ext));

                let content = match fs::read_to_string(&file_path) {
                    Ok(content) => content,
                    Err(e) => {
                        eprintln!("✗ {} - read error: {}", file_path.display(), e);
                        error_count += 1;
                        continue;
                    }
                };

                let result = converter
                    .convert_html_with_diagnostics(&content)
                    .and_then(|output| {
                        if docx {
                            runner.html_to_docx(&output.content, &output_path)?;
                        } else {
                            fs::write(&output_path, &output.content)?;
                        }
                        Ok(output.warnings.len())
                    });

                match result {
                    Ok(0) => {
                        eprintln!("✓ {}", output_path.display());
                        success_count += 1;
                    }
                    Ok(n) => {
                        eprintln!("⚠ {} ({} warning(s))", output_path.display(), n);
                        success_count += 1;
                    }
                    Err(e) => {
                        eprintln!("✗ {} - {}", output_path.display(), e);
                        error_count += 1;
                    }
                }
            }

            eprintln!(
                "\nBatch conversion complete: {} succeeded, {} failed",
                success_count, error_count
            );

            if error_count > 0 {
                std::process::exit(1);
            }
        }

        Commands::Pandoc { config } => {
            let config = load_config(config.as_deref())?;
            let status = PandocRunner::new(config.pandoc).check_installation();
            match status {
                PandocStatus::Available(ref version) => println!("✓ pandoc: {}", version),
                PandocStatus::NotInstalled => {
                    println!("✗ pandoc: {}", status);
                    println!("  Installation: https://pandoc.org/installing.html");
                    std::process::exit(1);
                }
            }
        }

        Commands::Info => {
            println!("mathdocx - MathML → LaTeX conversion for HTML documents");
            println!("Version: {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Features:");
            println!("  ✓ MathML → LaTeX (built-in translator, optional pandoc primary)");
            println!("  ✓ Isotope notation (mmultiscripts with prescripts)");
            println!("  ✓ Inline $...$ and display $$...$$ placement");
            println!("  ✓ HTML cleanup and Word stylesheet injection");
            println!("  ✓ HTML → DOCX through pandoc");
            println!("  ✓ Batch file processing");
            println!("  ✓ Formula diagnostics and checking");
            println!();
            println!("Supported MathML elements:");
            println!("  - math, mrow, mi, mn, mo, mtext");
            println!("  - mfrac, msup, msub, msubsup");
            println!("  - mmultiscripts, mprescripts, none");
            println!();
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn read_input(path: Option<&str>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

#[cfg(feature = "cli")]
fn load_config(path: Option<&str>) -> io::Result<Config> {
    match path {
        Some(path) => Config::load(path).map_err(to_io),
        None => Ok(Config::default()),
    }
}

#[cfg(feature = "cli")]
fn build_converter(config: &Config, primary: Primary) -> Converter {
    let converter = Converter::with_options(config.convert.clone());
    match primary {
        Primary::None => converter,
        Primary::Pandoc => {
            converter.with_primary(CommandTranslator::pandoc(config.pandoc.program.clone()))
        }
    }
}

#[cfg(feature = "cli")]
fn to_io(err: ConversionError) -> io::Error {
    io::Error::other(err)
}

#[cfg(feature = "cli")]
fn report_written(path: &str, warnings: usize) {
    if warnings == 0 {
        eprintln!("✓ Output written to: {}", path);
    } else {
        eprintln!("⚠ Output written to: {} ({} warning(s))", path, warnings);
    }
}

/// Print conversion warnings to stderr with optional color coding.
#[cfg(feature = "cli")]
fn print_warnings_to_stderr(warnings: &[ConversionWarning], use_color: bool) {
    use mathdocx::WarningKind;

    eprintln!();
    eprintln!(
        "{}Conversion Warnings ({}):{}",
        if use_color { "\x1b[33m" } else { "" },
        warnings.len(),
        if use_color { "\x1b[0m" } else { "" }
    );
    eprintln!();

    for warning in warnings {
        let color = match (use_color, warning.kind) {
            (false, _) => "",
            (true, WarningKind::EmptyFormula) => "\x1b[31m",
            (true, WarningKind::UnknownElement) => "\x1b[34m",
            (true, _) => "\x1b[33m",
        };
        let reset = if use_color { "\x1b[0m" } else { "" };

        if let Some(island) = warning.island {
            eprintln!(
                "  {}[{}]{} formula #{}: {}",
                color,
                warning.kind,
                reset,
                island + 1,
                warning.message
            );
        } else {
            eprintln!("  {}[{}]{} {}", color, warning.kind, reset, warning.message);
        }
    }
    eprintln!();
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install mathdocx --features cli");
    eprintln!("  mathdocx [OPTIONS] [INPUT_FILE]");
}
