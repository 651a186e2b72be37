// Command-line interface.
// Parses subcommands and maps each onto a `Gignore` operation.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::engine::{ArgValueCandidates, CompletionCandidate};
use dialoguer::Confirm;
use tracing::debug;

use crate::api::{GitignoreClient, LanguageName, Languages, TemplateSource};
use crate::config::Config;
use crate::error::{GignoreError, Result};
use crate::gignore::{AssumeYes, GenerateOutcome, Gignore, OverwritePrompt};

const MESSAGE_PREFIX: &str = "[gignore]";

#[derive(Parser, Debug)]
#[command(name = "gignore")]
#[command(version)]
#[command(about = "Generate .gitignore files from gitignore.io templates")]
#[command(after_help = "Shell completion: add `source <(COMPLETE=bash gignore)` to your shell rc \
(zsh, fish, elvish and powershell work the same way)")]
pub struct Cli {
    /// Directory for the cached language list (supports ~ and $VARS)
    #[arg(long, global = true, value_name = "DIR")]
    pub cache_dir: Option<String>,

    /// Base URL of the template API
    #[arg(long, global = true, value_name = "URL")]
    pub api_base: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List supported template names, one per line
    List,

    /// Print the combined ignore text for templates
    Show(LanguageArgs),

    /// Write .gitignore at the root of the enclosing git repository
    Generate(GenerateCommand),

    /// Replace a file's content with the ignore text for templates
    Insert(InsertCommand),

    /// Delete the cached language list
    ClearCache,
}

#[derive(Args, Debug)]
pub struct LanguageArgs {
    /// Template names, e.g. rust macos visualstudiocode
    #[arg(
        required = true,
        value_name = "LANG",
        add = ArgValueCandidates::new(complete_languages)
    )]
    pub languages: Vec<LanguageName>,
}

impl LanguageArgs {
    fn languages(&self) -> Result<Languages> {
        Languages::new(self.languages.clone())
    }
}

#[derive(Args, Debug)]
pub struct GenerateCommand {
    /// Overwrite an existing .gitignore without asking
    #[arg(short, long)]
    pub yes: bool,

    /// Start the repository search here instead of the current directory
    #[arg(long, value_name = "PATH")]
    pub path: Option<PathBuf>,

    #[command(flatten)]
    pub languages: LanguageArgs,
}

#[derive(Args, Debug)]
pub struct InsertCommand {
    /// File to replace; a missing file is treated as empty
    pub file: PathBuf,

    #[command(flatten)]
    pub languages: LanguageArgs,
}

/// Interactive yes/no prompt on the terminal; defaults to no.
pub struct TerminalPrompt;

impl OverwritePrompt for TerminalPrompt {
    fn confirm_overwrite(&self, path: &Path) -> Result<bool> {
        Confirm::new()
            .with_prompt(format!(
                "{} already exists. Do you want to overwrite it?",
                path.display()
            ))
            .default(false)
            .interact()
            .map_err(|e| GignoreError::Prompt(e.to_string()))
    }
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        match &self.command {
            Commands::List => {
                let languages = self.app()?.languages().await?;
                let mut stdout = io::stdout().lock();
                for language in languages {
                    writeln!(stdout, "{language}")?;
                }
            }
            Commands::Show(args) => {
                let text = self.app()?.text(&args.languages()?).await?;
                io::stdout().write_all(text.as_bytes())?;
            }
            Commands::Generate(cmd) => {
                let languages = cmd.languages.languages()?;
                let prompt: &dyn OverwritePrompt = if cmd.yes {
                    &AssumeYes
                } else {
                    &TerminalPrompt
                };
                let outcome = self
                    .app()?
                    .generate(cmd.path.as_deref(), &languages, prompt)
                    .await?;
                match outcome {
                    GenerateOutcome::Written(path) => {
                        eprintln!("{MESSAGE_PREFIX} Success: generated {}", path.display());
                    }
                    GenerateOutcome::Canceled => eprintln!("{MESSAGE_PREFIX} Canceled"),
                }
            }
            Commands::Insert(cmd) => {
                let languages = cmd.languages.languages()?;
                self.app()?.insert_file(&cmd.file, &languages).await?;
            }
            Commands::ClearCache => {
                let app = self.app()?;
                let cache = app.cache();
                cache.clear()?;
                eprintln!("{MESSAGE_PREFIX} Removed {}", cache.path().display());
            }
        }

        Ok(())
    }

    fn app(&self) -> Result<Gignore<GitignoreClient>> {
        let config = Config::resolve(self.cache_dir.as_deref(), self.api_base.as_deref())?;
        debug!(?config, "resolved configuration");
        let client = GitignoreClient::new(&config.api_base)?;
        Ok(Gignore::new(client, config.cache_dir))
    }

    /// Default log filter for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

/// `LANG` completion. Flags are not parsed yet at this point, so the cache
/// location comes from the environment or the platform default.
fn complete_languages() -> Vec<CompletionCandidate> {
    let app = Config::resolve(None, None).and_then(|config| {
        let client = GitignoreClient::new(&config.api_base)?;
        Ok(Gignore::new(client, config.cache_dir))
    });
    match app {
        Ok(app) => language_candidates(&app),
        Err(e) => {
            debug!(error = %e, "language completion unavailable");
            Vec::new()
        }
    }
}

/// Completion candidates from the language list, fetched and cached on first
/// use exactly like `gignore list`.
pub fn language_candidates<S: TemplateSource>(app: &Gignore<S>) -> Vec<CompletionCandidate> {
    let languages = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(GignoreError::from)
        .and_then(|runtime| runtime.block_on(app.languages()));

    match languages {
        Ok(languages) => languages
            .into_iter()
            .filter(|name| !name.is_empty())
            .map(CompletionCandidate::new)
            .collect(),
        Err(e) => {
            debug!(error = %e, "language completion unavailable");
            Vec::new()
        }
    }
}

/// Prefix an error for display, matching the status messages.
pub fn error_message(err: &GignoreError) -> String {
    format!("{MESSAGE_PREFIX} Error: {err}")
}
