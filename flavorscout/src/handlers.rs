use clap::ArgMatches;
use colored::Colorize;
use flavorscout_core::export::{generate_report, render_csv, render_json};
use flavorscout_core::resolve::ProgressCallback;
use flavorscout_core::{ExportCache, Resolver};
use flavorscout_scanner::{SeedOrigin, Traversal};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing_subscriber;
use url::Url;

/// Load seed sites from either repeatable arguments or a file.
pub fn load_sites_from_source(
    sites: &[String],
    sites_file: Option<&PathBuf>,
) -> Result<Vec<String>, String> {
    if let Some(path) = sites_file {
        load_sites_from_file(path)
    } else if !sites.is_empty() {
        Ok(sites.iter().filter_map(|s| parse_site_line(s)).collect())
    } else {
        Err("Either --site or --sites-file must be provided".to_string())
    }
}

/// Load and parse seed site URLs from a newline-delimited file.
pub fn load_sites_from_file(path: &PathBuf) -> Result<Vec<String>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read sites file {}: {}", path.display(), e))?;

    let sites: Vec<String> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| parse_site_line(line.trim()))
        .collect();

    if sites.is_empty() {
        return Err(format!("No valid site URLs found in {}", path.display()));
    }

    Ok(sites)
}

/// Parse a single line as a site URL, trying to add http:// if needed.
pub fn parse_site_line(line: &str) -> Option<String> {
    if Url::parse(line).is_ok() {
        return Some(line.to_string());
    }

    let with_scheme = format!("http://{}", line);
    if Url::parse(&with_scheme).is_ok() {
        return Some(with_scheme);
    }

    eprintln!("[!]  Skipping invalid site URL '{}'", line);
    None
}

/// Load flavor names from either repeatable arguments or a file.
pub fn load_flavors_from_source(
    flavors: &[String],
    flavors_file: Option<&PathBuf>,
) -> Result<Vec<String>, String> {
    if let Some(path) = flavors_file {
        load_flavors_from_file(path)
    } else if !flavors.is_empty() {
        Ok(flavors.to_vec())
    } else {
        Err("Either --flavor or --flavors-file must be provided".to_string())
    }
}

/// Load flavor names from a newline-delimited file, skipping blank lines.
pub fn load_flavors_from_file(path: &PathBuf) -> Result<Vec<String>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read flavors file {}: {}", path.display(), e))?;

    let flavors: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if flavors.is_empty() {
        return Err(format!("No flavor names found in {}", path.display()));
    }

    Ok(flavors)
}

pub async fn handle_scrape(args: &ArgMatches) {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let inline_sites: Vec<String> = args
        .get_many::<String>("site")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let sites_file = args.get_one::<PathBuf>("sites-file");

    let inline_flavors: Vec<String> = args
        .get_many::<String>("flavor")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let flavors_file = args.get_one::<PathBuf>("flavors-file");

    let brand = args.get_one::<String>("brand").unwrap();
    let concurrency = *args.get_one::<usize>("concurrency").unwrap();
    let timeout = *args.get_one::<u64>("timeout").unwrap();
    let max_pages = *args.get_one::<usize>("max-pages").unwrap();
    let output = args.get_one::<String>("output");
    let as_json = args.get_flag("json");

    let sites = match load_sites_from_source(&inline_sites, sites_file) {
        Ok(sites) => sites,
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    let flavors = match load_flavors_from_source(&inline_flavors, flavors_file) {
        Ok(flavors) => flavors,
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    let origins: Vec<SeedOrigin> = sites
        .iter()
        .filter_map(|site| match SeedOrigin::parse(site) {
            Ok(origin) => Some(origin),
            Err(e) => {
                eprintln!("[!]  Skipping seed '{}': {}", site, e);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        eprintln!("{} No usable seed origins", "✗".red().bold());
        std::process::exit(1);
    }

    println!(
        "\n🔎 Resolving {} flavor(s) for {} across {} site(s)\n",
        flavors.len(),
        brand.bright_white().bold(),
        origins.len()
    );

    // Single spinner tracking per-flavor completion
    let progress_bar = ProgressBar::new_spinner();
    progress_bar.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    progress_bar.enable_steady_tick(Duration::from_millis(100));
    progress_bar.set_message("Starting resolution...");

    let done = Arc::new(AtomicUsize::new(0));
    let total = flavors.len();
    let progress_callback: ProgressCallback = {
        let pb = progress_bar.clone();
        let done = done.clone();
        Arc::new(move |record| {
            let count = done.fetch_add(1, Ordering::Relaxed) + 1;
            pb.set_message(format!("Resolved {}/{}: {}", count, total, record.flavor));
            pb.tick();
        })
    };

    let traversal = Traversal::with_timeout(timeout).with_max_pages(max_pages);
    let resolver = Resolver::new()
        .with_traversal(traversal)
        .with_concurrency(concurrency)
        .with_progress_callback(progress_callback);

    let records = resolver.resolve(&origins, &flavors).await;
    progress_bar.finish_and_clear();

    if as_json {
        match render_json(&records) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("{} JSON rendering failed: {}", "✗".red().bold(), e);
                std::process::exit(1);
            }
        }
    } else {
        print!("{}", generate_report(brand, &records));
    }

    // The export slot holds the CSV of the most recent run only.
    let cache = ExportCache::new();
    match render_csv(&records) {
        Ok(csv) => cache.store(csv),
        Err(e) => eprintln!("[!]  CSV rendering failed: {}", e),
    }

    if let Some(path) = output {
        let expanded = shellexpand::tilde(path);
        match cache.latest() {
            Some(csv) => match fs::write(expanded.as_ref(), csv) {
                Ok(()) => println!("{} Export written to {}", "✓".green().bold(), expanded),
                Err(e) => {
                    eprintln!("{} Failed to write {}: {}", "✗".red().bold(), expanded, e);
                    std::process::exit(1);
                }
            },
            None => eprintln!("[!]  No export available - run a scrape first"),
        }
    }
}
