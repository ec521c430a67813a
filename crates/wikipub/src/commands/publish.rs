//! `wikipub publish` command implementation.

use std::path::PathBuf;

use clap::Args;
use wikipub_config::{CliSettings, Config, ConfluenceConfig, Settings};
use wikipub_confluence::{
    ConfluenceClient, DryRunResult, PublishConfig, PublishResult, Publisher, SyncAction,
};
use wikipub_markdown::{
    AssetCache, Document, DocumentConverter, HttpMathRenderer, MermaidInkRenderer, create_agent,
};

use crate::discovery::discover_documents;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the publish command.
#[derive(Args)]
pub(crate) struct PublishArgs {
    /// Path to configuration file (default: auto-discover wikipub.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Folder containing the markdown documents (overrides config).
    #[arg(long, env = "WIKIPUB_BASE_FOLDER")]
    base_folder: Option<PathBuf>,

    /// Confluence base URL, e.g. `https://example.atlassian.net/wiki`.
    #[arg(long, env = "CONFLUENCE_URL")]
    confluence_url: Option<String>,

    /// Confluence user name or email.
    #[arg(long, env = "CONFLUENCE_USERNAME")]
    username: Option<String>,

    /// Confluence API token.
    #[arg(long, env = "CONFLUENCE_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,

    /// Key of the space pages are published to.
    #[arg(long, env = "CONFLUENCE_SPACE_KEY")]
    space_key: Option<String>,

    /// Directory for rendered diagrams and formulas (overrides config).
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Mermaid rendering service URL (overrides config).
    #[arg(long)]
    mermaid_url: Option<String>,

    /// Math rendering service URL (overrides config).
    #[arg(long)]
    math_url: Option<String>,

    /// Convert documents and list assets without calling Confluence.
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl PublishArgs {
    /// Execute the publish command.
    ///
    /// Documents are published one at a time; the first failure stops the run.
    /// Pages published before the failure stay published.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            base_folder: self.base_folder,
            cache_dir: self.cache_dir,
            base_url: self.confluence_url,
            username: self.username,
            api_token: self.api_token,
            space_key: self.space_key,
            mermaid_url: self.mermaid_url,
            math_url: self.math_url,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        config.validate()?;

        // Dry runs never reach Confluence, so its settings are optional there.
        let confluence = if self.dry_run {
            config.confluence_resolved.clone()
        } else {
            config.require_confluence()?.clone()
        };

        let base_folder = &config.docs_resolved.base_folder;
        let documents = discover_documents(base_folder)?;
        if documents.is_empty() {
            output.warning(&format!(
                "No markdown files found in {}",
                base_folder.display()
            ));
            return Ok(());
        }
        let settings = Settings::load(base_folder);

        let agent = create_agent(config.http.timeout());
        let diagrams =
            MermaidInkRenderer::new(&config.diagrams.mermaid_url).with_agent(agent.clone());
        let math = HttpMathRenderer::new(&config.math.renderer_url).with_agent(agent);
        let cache = AssetCache::new(&config.docs_resolved.cache_dir);
        let converter = DocumentConverter::new(&diagrams, &math, &cache);

        let client = create_confluence_client(&confluence, &config);
        let publish_config = PublishConfig {
            space_key: confluence.space_key.clone(),
            default_parent_id: settings.parent_id,
        };
        let publisher = Publisher::new(&client, converter, publish_config);

        if self.dry_run {
            output.highlight("[DRY RUN] No changes made.");
        }

        let mut summary = Summary::default();
        for relative_path in &documents {
            let document = Document::load(base_folder, relative_path).map_err(|source| {
                CliError::ReadDocument {
                    path: base_folder.join(relative_path),
                    source,
                }
            })?;
            output.info(&format!("Converting {relative_path}..."));

            if self.dry_run {
                let result = publisher
                    .dry_run(&document)
                    .map_err(|source| publish_error(relative_path, source))?;
                print_dry_run_result(output, &result);
            } else {
                let result = publisher
                    .publish(&document)
                    .map_err(|source| publish_error(relative_path, source))?;
                print_publish_result(output, &result);
                summary.record(&result);
            }
        }

        if !self.dry_run {
            output.success(&format!(
                "\nPublished {} document(s): {} created, {} updated.",
                documents.len(),
                summary.created,
                summary.updated
            ));
        }
        Ok(())
    }
}

#[derive(Default)]
struct Summary {
    created: usize,
    updated: usize,
}

impl Summary {
    fn record(&mut self, result: &PublishResult) {
        match result.action {
            SyncAction::Created => self.created += 1,
            SyncAction::Updated => self.updated += 1,
        }
    }
}

fn publish_error(document: &str, source: wikipub_confluence::PublishError) -> CliError {
    CliError::Publish {
        document: document.to_owned(),
        source,
    }
}

fn create_confluence_client(confluence: &ConfluenceConfig, config: &Config) -> ConfluenceClient {
    ConfluenceClient::new(
        &confluence.base_url,
        &confluence.username,
        &confluence.api_token,
        config.http.timeout(),
    )
}

fn print_dry_run_result(output: &Output, result: &DryRunResult) {
    match &result.parent_title {
        Some(parent) => output.info(&format!("Title: {} (parent: {parent})", result.title)),
        None => output.info(&format!("Title: {}", result.title)),
    }
    output.info(&format!("Body: {} bytes", result.body.len()));

    if !result.assets.is_empty() {
        output.info(&format!("Attachments ({}):", result.assets.len()));
        for asset in &result.assets {
            if asset.path.is_some() {
                output.item(&asset.filename);
            } else {
                output.item(&format!("{} (remote, not uploaded)", asset.filename));
            }
        }
    }
}

fn print_publish_result(output: &Output, result: &PublishResult) {
    output.success(&format!(
        "{} \"{}\" (id {}, version {})",
        result.action, result.title, result.page_id, result.version
    ));
    if result.attachments_uploaded > 0 {
        output.item(&format!(
            "Attachments uploaded: {}",
            result.attachments_uploaded
        ));
    }
}
