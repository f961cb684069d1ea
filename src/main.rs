use clap::{Parser, Subcommand};
use elevate_site::contact::ContactForm;
use elevate_site::{config, gallery, generate, masonry, output, scan};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup; called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "elevate-site")]
#[command(about = "Static site generator for the Elevate Events marketing site")]
#[command(long_about = "\
Static site generator for the Elevate Events marketing site

Content is a directory of TOML data files and markdown. Every file is
optional; missing data renders as an empty section.

Content structure:

  content/
  ├── config.toml                  # Site config (optional, overrides defaults)
  ├── portfolio.toml               # [[items]] shown in the masonry gallery
  ├── testimonials.toml            # [[testimonials]] for the carousel
  ├── services.toml                # [[services]] cards
  ├── team.toml                    # [[members]], [[stats]], [[values]]
  ├── about.md                     # Story on the about page
  ├── privacy.md                   # Legal pages
  ├── terms.md
  ├── blog/
  │   ├── 010-spring-trends.md     # Post (number orders the listing)
  │   └── 010-spring-trends.toml   # Post metadata sidecar (optional)
  └── assets/                      # Copied verbatim to the output root

Run 'elevate-site gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".elevate-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan content directory into a manifest
    Scan,
    /// Produce the final HTML site from the manifest
    Generate,
    /// Run the full pipeline: scan → generate
    Build,
    /// Validate content directory without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Print the masonry layout for a filter and viewport
    Layout(LayoutArgs),
    /// Validate a contact enquiry the way the contact form does
    Contact(ContactArgs),
}

#[derive(clap::Args)]
struct LayoutArgs {
    /// Category to filter by ("all" for every item)
    #[arg(long, default_value = "all")]
    category: String,

    /// Viewport width in pixels; picks the column count from the breakpoints
    #[arg(long, default_value_t = 1280, conflicts_with = "columns")]
    width: u32,

    /// Explicit column count (1 to 3)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=3))]
    columns: Option<u8>,
}

#[derive(clap::Args)]
struct ContactArgs {
    #[arg(long, default_value = "")]
    name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    /// Event type, by value or label (e.g. "private-party")
    #[arg(long, default_value = "")]
    event_type: String,
    #[arg(long, default_value = "")]
    date: String,
    #[arg(long, default_value = "")]
    guest_count: String,
    #[arg(long, default_value = "")]
    budget: String,
    #[arg(long, default_value = "")]
    message: String,
}

impl From<ContactArgs> for ContactForm {
    fn from(args: ContactArgs) -> Self {
        ContactForm {
            name: args.name,
            email: args.email,
            phone: args.phone,
            event_type: args.event_type,
            date: args.date,
            guest_count: args.guest_count,
            budget: args.budget,
            message: args.message,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);
        }
        Command::Generate => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            let manifest_content = std::fs::read_to_string(&manifest_path)?;
            let manifest: scan::Manifest = serde_json::from_str(&manifest_content)?;
            init_thread_pool(&manifest.config.build);
            let report = generate::generate(&manifest_path, &cli.source, &cli.output)?;
            output::print_generate_output(&report);
        }
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            let manifest_path = write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            init_thread_pool(&manifest.config.build);
            let report = generate::generate(&manifest_path, &cli.source, &cli.output)?;
            output::print_generate_output(&report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source);
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::Layout(args) => {
            let manifest = scan::scan(&cli.source)?;
            let cfg = &manifest.config.gallery;
            let categories = gallery::categories(&manifest.portfolio);
            let filter = gallery::parse_filter(&args.category, &categories)?;
            let items = gallery::filter_items(&manifest.portfolio, &filter);
            let layout = match args.columns {
                Some(columns) => masonry::layout(&items, usize::from(columns), cfg),
                None => masonry::layout_for_width(&items, args.width, cfg),
            };
            println!("{} ({} items)", cfg.label(filter.key()), items.len());
            output::print_layout(&layout);
        }
        Command::Contact(args) => match ContactForm::from(args).validate() {
            Ok(submission) => output::print_contact_submission(&submission),
            Err(errors) => {
                output::print_contact_errors(&errors);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

fn write_manifest(manifest: &scan::Manifest, temp_dir: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    std::fs::create_dir_all(temp_dir)?;
    let manifest_path = temp_dir.join("manifest.json");
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(&manifest_path, json)?;
    Ok(manifest_path)
}

/// Initialize the rayon thread pool based on build config.
///
/// Caps at the number of available CPU cores. The config can lower the
/// thread count, not raise it.
fn init_thread_pool(build: &config::BuildConfig) {
    let threads = config::effective_threads(build);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout_args(args: &[&str]) -> Result<LayoutArgs, clap::Error> {
        let argv = ["elevate-site", "layout"].iter().chain(args);
        match Cli::try_parse_from(argv)?.command {
            Command::Layout(layout) => Ok(layout),
            _ => panic!("expected the layout command"),
        }
    }

    // =========================================================================
    // layout --columns
    // =========================================================================

    #[test]
    fn columns_accepts_one_to_three() {
        for n in ["1", "2", "3"] {
            let args = layout_args(&["--columns", n]).unwrap();
            assert_eq!(args.columns.map(u32::from), Some(n.parse().unwrap()));
        }
    }

    #[test]
    fn columns_outside_range_rejected() {
        for n in ["0", "4", "12"] {
            assert!(layout_args(&["--columns", n]).is_err(), "--columns {n}");
        }
    }

    #[test]
    fn columns_conflicts_with_width() {
        assert!(layout_args(&["--columns", "2", "--width", "900"]).is_err());
    }

    #[test]
    fn layout_defaults() {
        let args = layout_args(&[]).unwrap();
        assert_eq!(args.category, "all");
        assert_eq!(args.width, 1280);
        assert_eq!(args.columns, None);
    }
}
