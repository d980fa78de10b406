use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use errkit_migrate::migrate::{ReviewPolicy, check_file, convert_file};
use errkit_migrate::rule::{ChangeKind, CheckResult};
use errkit_migrate::utils::glob_expand::expand_inputs;
use errkit_migrate::{MigrateConfig, RuleRegistry, Strictness};

#[derive(Parser)]
#[command(name = "errkit-migrate")]
#[command(about = "Migrate pkg/errors call sites to errkit")]
#[command(version)]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report what would be migrated
    Check {
        /// Input files, directories or glob patterns like "pkg/**/*.go"
        #[arg(required = true)]
        paths: Vec<String>,

        /// Rules to run (defaults to "all")
        #[arg(short = 'r', long = "rule", default_values_t = vec!["all".to_string()])]
        rule: Vec<String>,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,

        /// Output results as JSONL
        #[arg(long)]
        json: bool,

        /// Save detailed results to file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Migrate files
    Convert {
        /// Input files, directories or glob patterns like "pkg/**/*.go"
        #[arg(required = true)]
        paths: Vec<String>,

        /// Rules to apply (defaults to "all")
        #[arg(short = 'r', long = "rule", default_values_t = vec!["all".to_string()])]
        rule: Vec<String>,

        /// Edit files in place
        #[arg(short, long)]
        in_place: bool,

        /// Check mode: show what would be changed without modifying files
        #[arg(short, long)]
        check: bool,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,

        /// Override how unrecognized formatted messages are handled
        #[arg(long, value_enum)]
        strictness: Option<Strictness>,

        /// Leave lines needing manual migration without a marker comment
        #[arg(long)]
        no_annotate: bool,
    },

    /// List all available rules
    ListRules,
}

fn load_config(path: Option<&PathBuf>) -> Result<MigrateConfig> {
    match path {
        Some(path) => MigrateConfig::load(path)
            .with_context(|| format!("Failed to load configuration: {}", path.display())),
        None => Ok(MigrateConfig::default()),
    }
}

fn main() -> Result<()> {
    // Logs go to stderr; converted content may be on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "errkit_migrate=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Check {
            paths,
            rule: rule_names,
            verbose,
            json,
            output,
        } => {
            let registry = RuleRegistry::new(&config);
            let rules = registry.resolve(&rule_names)?;
            let review = ReviewPolicy::from_config(&config);
            let file_paths = expand_inputs(&paths, |p| config.accepts_extension(p))?;

            let mut all_results = Vec::new();

            for file_path in &file_paths {
                if verbose && !json {
                    println!("Checking: {}", file_path.display());
                }

                match check_file(file_path, &rules, &review) {
                    Ok(results) => {
                        for result in results {
                            if !json {
                                let mark = match result.kind {
                                    ChangeKind::Rewritten => "→".cyan(),
                                    ChangeKind::NeedsReview => "!".yellow(),
                                    ChangeKind::Malformed => "✗".red(),
                                };
                                println!("  {} {}", mark, result.message.clone().unwrap_or_default());
                            }
                            all_results.push(result);
                        }
                    }
                    Err(e) => {
                        if !json {
                            eprintln!("  {} Error checking {}: {}", "✗".red(), file_path.display(), e);
                        }
                    }
                }
            }

            if !json {
                print_check_summary(file_paths.len(), &all_results);
            }

            if json {
                for result in &all_results {
                    println!("{}", serde_json::to_string(result)?);
                }
            }

            if let Some(output_path) = output {
                let mut output_str = String::new();
                for result in &all_results {
                    output_str.push_str(&serde_json::to_string(result)?);
                    output_str.push('\n');
                }
                std::fs::write(&output_path, output_str)
                    .with_context(|| format!("Failed to write results: {}", output_path.display()))?;
            }

            Ok(())
        }

        Commands::Convert {
            paths,
            rule: rule_names,
            in_place,
            check: check_mode,
            verbose,
            strictness,
            no_annotate,
        } => {
            if let Some(strictness) = strictness {
                config.strictness = strictness;
            }
            if no_annotate {
                config.annotate_review = false;
            }

            let registry = RuleRegistry::new(&config);
            let rules = registry.resolve(&rule_names)?;
            let review = ReviewPolicy::from_config(&config);
            let file_paths = expand_inputs(&paths, |p| config.accepts_extension(p))?;

            for file_path in &file_paths {
                if verbose {
                    println!("Processing: {}", file_path.display());
                }

                match convert_file(file_path, &rules, &review, in_place, check_mode) {
                    Ok(result) => {
                        let touched = result.lines_rewritten + result.lines_needing_review;
                        if touched > 0 && (verbose || check_mode) {
                            println!(
                                "  {} {} - {} line(s) rewritten, {} need review, {} malformed",
                                if check_mode { "Would fix" } else { "Fixed" },
                                result.file_path,
                                result.lines_rewritten.to_string().green(),
                                result.lines_needing_review.to_string().yellow(),
                                result.lines_malformed
                            );
                        }

                        if !in_place && !check_mode {
                            if let Some(content) = result.content {
                                print!("{}", content);
                            }
                        }
                    }
                    Err(e) => {
                        eprintln!("  {} Error converting {}: {}", "✗".red(), file_path.display(), e);
                        // Stop on first error (transactional)
                        return Err(e);
                    }
                }
            }

            Ok(())
        }

        Commands::ListRules => {
            let registry = RuleRegistry::new(&config);
            println!("{}", "Available rules:".bold());
            for name in registry.list_names() {
                let rule = registry.get(&name)?;
                println!("  {} - {}", name.cyan(), rule.description());
            }
            Ok(())
        }
    }
}

fn print_check_summary(total_files: usize, results: &[CheckResult]) {
    use std::collections::{BTreeMap, HashSet};

    let mut files_with_issues = HashSet::new();
    let mut by_kind: BTreeMap<String, usize> = BTreeMap::new();
    let mut issues_by_rule: BTreeMap<String, usize> = BTreeMap::new();
    let mut files_by_rule: BTreeMap<String, HashSet<String>> = BTreeMap::new();

    for result in results {
        files_with_issues.insert(result.file_path.as_str());
        *by_kind.entry(result.kind.to_string()).or_insert(0) += result.issue_count;
        *issues_by_rule.entry(result.rule_name.clone()).or_insert(0) += result.issue_count;
        files_by_rule
            .entry(result.rule_name.clone())
            .or_default()
            .insert(result.file_path.clone());
    }

    let files_with_issues_count = files_with_issues.len();
    let files_clean = total_files - files_with_issues_count;

    println!("\n{}", "=== Summary ===".bold());
    println!("Total files:         {}", total_files);
    println!(
        "Files to migrate:    {} {}",
        files_with_issues_count,
        if files_with_issues_count > 0 {
            "✗".red()
        } else {
            "✓".green()
        }
    );
    println!("Clean files:         {} {}", files_clean, "✓".green());

    if !issues_by_rule.is_empty() {
        println!("\n{}", "Lines by rule:".bold());
        for (rule_name, count) in &issues_by_rule {
            println!(
                "  {}: {} line(s) in {} file(s)",
                rule_name.cyan(),
                count,
                files_by_rule[rule_name].len()
            );
        }

        println!("\n{}", "Lines by outcome:".bold());
        for (kind, count) in &by_kind {
            println!("  {}: {}", kind, count);
        }
    }

    println!("\nTotal lines reported: {}", results.len());
}
