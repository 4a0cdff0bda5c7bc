use linelight::config::runtime::{LoggingPreferences, LogLevel, ScannerPreferences};
use linelight::highlight::Category;
use linelight::{document::LineEntry, logging, DocumentHighlighter, Lexicon};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <input.py> [options]", args[0]);
        eprintln!("       {} --help", args[0]);
        std::process::exit(1);
    }

    if args[1] == "--help" {
        print_help(&args[0]);
        return Ok(());
    }

    let options = parse_options(&args[2..]);

    if options.quiet {
        // Must happen before the global logger resolves its preferences
        logging::config::init_runtime_preferences(LoggingPreferences {
            min_log_level: LogLevel::Error,
            ..LoggingPreferences::default()
        });
    }

    logging::init_global_logging()?;

    let lexicon = match &options.lexicon_path {
        Some(path) => match Lexicon::from_toml_path(path) {
            Ok(lexicon) => lexicon,
            Err(error) => {
                eprintln!("Error: failed to load lexicon: {}", error);
                std::process::exit(1);
            }
        },
        None => Lexicon::python_default(),
    };

    let input_path = Path::new(&args[1]);
    let source = match std::fs::read_to_string(input_path) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Error: cannot read {}: {}", input_path.display(), error);
            std::process::exit(1);
        }
    };

    logging::set_document_context(input_path.to_path_buf());

    let mut scanner_preferences = ScannerPreferences::default();
    if options.brackets {
        scanner_preferences.style_brackets = true;
    }

    let mut highlighter = DocumentHighlighter::with_preferences(
        Arc::new(lexicon),
        scanner_preferences,
        Default::default(),
    );
    highlighter.set_text(&source)?;

    if options.json {
        print_json(&highlighter)?;
    } else {
        for entry in highlighter.lines() {
            println!("{}", render_line(entry, options.color));
        }
    }

    logging::clear_document_context();
    Ok(())
}

fn print_help(program_name: &str) {
    println!("linelight v{}", env!("CARGO_PKG_VERSION"));
    println!("Incremental line-based syntax highlighter");
    println!();
    println!("USAGE:");
    println!("    {} <input.py> [options]", program_name);
    println!();
    println!("ARGUMENTS:");
    println!("    <input.py>     Path to the source file to highlight");
    println!();
    println!("OPTIONS:");
    println!("    --help              Show this help message");
    println!("    --json              Emit spans as JSON instead of ANSI text");
    println!("    --no-color          Print plain text without ANSI styling");
    println!("    --brackets          Also style bracket characters");
    println!("    --lexicon <path>    Load keyword lists from a TOML file");
    println!("    --quiet             Only log errors");
    println!();
    println!("EXAMPLES:");
    println!("    {} script.py                    # ANSI output", program_name);
    println!("    {} script.py --json             # Machine-readable spans", program_name);
    println!(
        "    {} script.py --lexicon sql.toml # Custom word lists",
        program_name
    );
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RenderOptions {
    json: bool,
    color: bool,
    brackets: bool,
    quiet: bool,
    lexicon_path: Option<PathBuf>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            json: false,
            color: true,
            brackets: false,
            quiet: false,
            lexicon_path: None,
        }
    }
}

fn parse_options(args: &[String]) -> RenderOptions {
    let mut options = RenderOptions::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--json" => {
                options.json = true;
            }
            "--no-color" => {
                options.color = false;
            }
            "--brackets" => {
                options.brackets = true;
            }
            "--quiet" => {
                options.quiet = true;
            }
            "--lexicon" => {
                if i + 1 < args.len() {
                    options.lexicon_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1; // Skip the path argument
                } else {
                    eprintln!("Warning: --lexicon requires a path");
                }
            }
            _ => {
                eprintln!("Warning: Unknown option '{}'", args[i]);
            }
        }
        i += 1;
    }

    options
}

/// ANSI escape for one category, matching the editor palette
fn ansi_style(category: Category) -> &'static str {
    match category {
        Category::Keyword => "\x1b[1;38;2;255;140;0m",
        Category::FunctionName => "\x1b[1;38;2;220;120;0m",
        Category::ClassName => "\x1b[1;38;2;102;153;204m",
        Category::String => "\x1b[38;2;0;200;0m",
        Category::Comment => "\x1b[3;38;2;136;136;136m",
        Category::MagicMethod => "\x1b[1;38;2;255;99;71m",
        Category::Number => "\x1b[38;2;187;131;230m",
        Category::SelfReference => "\x1b[3;38;2;187;131;230m",
        Category::Bracket => "\x1b[38;2;255;255;255m",
        Category::Normal => "\x1b[0m",
    }
}

const ANSI_RESET: &str = "\x1b[0m";

fn render_line(entry: &LineEntry, color: bool) -> String {
    if !color {
        return entry.text.clone();
    }

    let mut out = String::with_capacity(entry.text.len() + entry.spans.len() * 24);
    let mut cursor = 0;

    for span in &entry.spans {
        if span.start > cursor {
            out.push_str(&entry.text[cursor..span.start]);
        }
        out.push_str(ansi_style(span.category));
        out.push_str(span.text(&entry.text));
        out.push_str(ANSI_RESET);
        cursor = span.end();
    }
    out.push_str(&entry.text[cursor..]);

    out
}

fn print_json(highlighter: &DocumentHighlighter) -> Result<(), serde_json::Error> {
    let lines: Vec<serde_json::Value> = highlighter
        .lines()
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_json::json!({
                "line": index,
                "text": entry.text,
                "spans": entry.spans,
            })
        })
        .collect();

    let document = serde_json::json!({
        "lines": lines,
        "final_state": highlighter.final_state(),
    });

    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use linelight::highlight::HighlightState;
    use linelight::StyledSpan;

    #[test]
    fn test_parse_options() {
        let args = vec![
            "--json".to_string(),
            "--no-color".to_string(),
            "--lexicon".to_string(),
            "custom.toml".to_string(),
        ];

        let options = parse_options(&args);
        assert!(options.json);
        assert!(!options.color);
        assert_eq!(options.lexicon_path, Some(PathBuf::from("custom.toml")));
        assert!(!options.quiet);
    }

    #[test]
    fn test_parse_options_unknown_flag() {
        let args = vec!["--bogus".to_string()];
        let options = parse_options(&args);
        assert_eq!(options, RenderOptions::default());
    }

    #[test]
    fn test_parse_options_lexicon_without_path() {
        let args = vec!["--lexicon".to_string()];
        let options = parse_options(&args);
        assert_eq!(options.lexicon_path, None);
    }

    #[test]
    fn test_render_line_plain() {
        let entry = LineEntry {
            text: "if x".to_string(),
            entering: HighlightState::default(),
            spans: vec![StyledSpan::new(0, 2, Category::Keyword)],
            exiting: HighlightState::default(),
        };
        assert_eq!(render_line(&entry, false), "if x");
    }

    #[test]
    fn test_render_line_colors_spans_only() {
        let entry = LineEntry {
            text: "if x".to_string(),
            entering: HighlightState::default(),
            spans: vec![StyledSpan::new(0, 2, Category::Keyword)],
            exiting: HighlightState::default(),
        };
        let rendered = render_line(&entry, true);
        assert!(rendered.starts_with(ansi_style(Category::Keyword)));
        assert!(rendered.ends_with(" x"));
        assert!(rendered.contains(ANSI_RESET));
    }
}
