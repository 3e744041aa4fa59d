use docsense::classify::Classifier;
use docsense::cli::{Cli, Commands, ConfigAction};
use docsense::config::Config;
use docsense::embedding::{DocumentEmbedder, EmbeddingProvider, FastEmbedProvider};
use docsense::error::Result;
use docsense::extract::TextExtractor;
use docsense::pipeline::IngestPipeline;
use docsense::search::{
    DocumentCandidate, DocumentMeta, SemanticRanker, SentenceHighlighter,
};
use docsense::taxonomy::RuleRegistry;
use std::path::{Path, PathBuf};
use std::sync::Arc;

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse_args();

    match cli.command {
        Commands::Extract { file } => cmd_extract(cli.config, &file)?,
        Commands::Classify { file, scores } => cmd_classify(cli.config, &file, scores)?,
        Commands::Ingest { file, description } => cmd_ingest(cli.config, &file, &description)?,
        Commands::Search {
            query,
            dir,
            limit,
            json,
        } => cmd_search(cli.config, &query, &dir, limit, json)?,
        Commands::Highlight { file, query, json } => {
            cmd_highlight(cli.config, &file, &query, json)?
        }
        Commands::Config { action } => cmd_config(cli.config, action)?,
    }

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("docsense=info"));

    fmt().with_env_filter(filter).with_target(false).init();
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    Config::load_or_default(path.as_deref())
}

fn build_classifier(config: &Config) -> Result<Classifier> {
    let registry = match &config.classifier.rules_file {
        Some(path) => RuleRegistry::from_config_file(path)?,
        None => RuleRegistry::default_rules()?,
    };
    Ok(Classifier::new(Arc::new(registry)))
}

fn build_provider(config: &Config) -> Result<Arc<dyn EmbeddingProvider>> {
    Ok(Arc::new(FastEmbedProvider::new(&config.embedding.model)?))
}

fn cmd_extract(config_path: Option<PathBuf>, file: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let extractor = TextExtractor::new(config.extraction);

    let text = extractor.extract(file);
    if text.is_empty() {
        eprintln!("(no text extracted)");
    } else {
        println!("{}", text);
    }
    Ok(())
}

fn cmd_classify(config_path: Option<PathBuf>, file: &Path, scores: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let extractor = TextExtractor::new(config.extraction.clone());
    let classifier = build_classifier(&config)?;

    let text = extractor.extract(file);
    let category = classifier.classify(&text);
    println!("{}", category);

    if scores {
        let lowered = text.to_lowercase();
        let board = classifier
            .entity_signals(&text)
            .merge(&classifier.keyword_signals(&lowered))
            .merge(&classifier.structural_signals(&lowered));
        for (idx, name) in classifier.registry().categories().iter().enumerate() {
            println!("  {:<20} {}", name, board.score(idx));
        }
    }
    Ok(())
}

fn cmd_ingest(config_path: Option<PathBuf>, file: &Path, description: &str) -> Result<()> {
    let config = load_config(config_path)?;
    let extractor = Arc::new(TextExtractor::new(config.extraction.clone()));
    let classifier = Arc::new(build_classifier(&config)?);
    let provider = build_provider(&config)?;
    let embedder = Arc::new(DocumentEmbedder::new(provider, config.embedding.max_chars));

    let pipeline = IngestPipeline::new(extractor, classifier, embedder);
    let outcome = pipeline.ingest_file(file, description);

    println!("category:   {}", outcome.category);
    println!("text chars: {}", outcome.text.chars().count());
    match &outcome.embedding {
        Some(vector) => println!("embedding:  {} dimensions", vector.len()),
        None => println!("embedding:  none (not yet searchable)"),
    }
    Ok(())
}

fn cmd_search(
    config_path: Option<PathBuf>,
    query: &str,
    dir: &Path,
    limit: usize,
    json: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let extractor = TextExtractor::new(config.extraction.clone());
    let provider = build_provider(&config)?;
    let embedder = DocumentEmbedder::new(provider.clone(), config.embedding.max_chars);
    let ranker = SemanticRanker::new(provider, config.search.clone());

    // Embed the directory's documents on the fly; a real deployment hands
    // stored embeddings to the ranker instead
    let mut candidates = Vec::new();
    let entries = std::fs::read_dir(dir).map_err(|e| docsense::DocsenseError::Io {
        source: e,
        context: format!("Failed to read directory: {:?}", dir),
    })?;
    for (id, entry) in entries.flatten().enumerate() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        let text = extractor.extract(&path);
        let embedding = match embedder.embed_document(&text, &filename, "") {
            Ok(vector) => Some(vector),
            Err(e) => {
                tracing::warn!(filename = %filename, error = %e, "skipping unembeddable document");
                None
            }
        };

        candidates.push(DocumentCandidate {
            id: id as i64,
            embedding,
            meta: DocumentMeta {
                filename,
                ..DocumentMeta::default()
            },
        });
    }

    let mut results = ranker.rank(query, &candidates)?;
    results.truncate(limit);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&results).map_err(|e| docsense::DocsenseError::Json {
                source: e,
                context: "Failed to serialize search results".to_string(),
            })?
        );
    } else if results.is_empty() {
        println!("No matches above threshold.");
    } else {
        for result in &results {
            println!("{:.3}  {}", result.score, result.meta.filename);
        }
    }
    Ok(())
}

fn cmd_highlight(
    config_path: Option<PathBuf>,
    file: &Path,
    query: &str,
    json: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let extractor = TextExtractor::new(config.extraction.clone());
    let provider = build_provider(&config)?;
    let highlighter = SentenceHighlighter::new(provider, config.search.clone());

    let text = extractor.extract(file);
    let matches = highlighter.highlight(&text, query)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&matches).map_err(|e| docsense::DocsenseError::Json {
                source: e,
                context: "Failed to serialize highlights".to_string(),
            })?
        );
    } else if matches.is_empty() {
        println!("No sentences above threshold.");
    } else {
        for m in &matches {
            println!("{:.3}  {}", m.score, m.sentence);
        }
    }
    Ok(())
}

fn cmd_config(config_path: Option<PathBuf>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Init { force } => {
            let path = config_path.unwrap_or_else(Config::default_path);
            if path.exists() && !force {
                eprintln!(
                    "Config already exists at {} (use --force to overwrite)",
                    path.display()
                );
                return Ok(());
            }
            let config = Config::default();
            config.save(&path)?;
            println!("Wrote default config to {}", path.display());
        }
        ConfigAction::Show => {
            let config = load_config(config_path)?;
            println!("{}", toml::to_string_pretty(&config)?);
        }
    }
    Ok(())
}
