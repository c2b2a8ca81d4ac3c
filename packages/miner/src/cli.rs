//! Command-line interface for the miner.

use std::path::{Path, PathBuf};

use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use textwrap::{fill, Options};

use crate::clean::TextCleaner;
use crate::config::{
    Lexicon, CHART_SIZE, DEFAULT_CLOUD_WORDS, DEFAULT_HEADNOTE_CLASS, DEFAULT_MAX_RANK,
    TEXT_WRAP_WIDTH,
};
use crate::error::Result;
use crate::extract::{ObligationExtractor, Sentence};
use crate::html::{extract_headnotes, load_html};
use crate::parse::{read_sentences, ParseFormat, ParsedSentence};
use crate::plot::{save_plot, PlotKind, PlotOptions};
use crate::report::{load_frequency_table, merge_frequency_report, save_report, Payload, Report};
use crate::vocab::FrequencyTable;

/// Obligation Miner - Extract normative statements from statutes.
#[derive(Parser)]
#[command(name = "obligation-miner")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Lexicon YAML overriding lemmas, dependency labels, stopwords or patterns
    #[arg(long, global = true)]
    pub lexicon: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract headnotes and their cleaned body text from an HTML statute.
    Headnotes {
        /// HTML document
        html: PathBuf,

        /// Prefix for every headnote key (e.g., the act name)
        #[arg(short, long)]
        prefix: String,

        /// CSS class marking headnotes
        #[arg(short, long, default_value = DEFAULT_HEADNOTE_CLASS)]
        class: String,

        /// Report file (.yaml or .json); prints to the console when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Extract subject, obligation verbs and object from parsed sentences.
    Obligations {
        /// Parse files (CoNLL-U or spaCy JSON)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Parse file format
        #[arg(short, long, value_enum, default_value_t = ParseFormat::Auto)]
        format: ParseFormat,

        /// Section label for sentences without a `section` comment
        #[arg(long)]
        section: Option<String>,

        /// Title label for sentences without a `title` comment
        #[arg(long)]
        title: Option<String>,

        /// Keep only sentences with an obligation verb
        #[arg(long)]
        only_obligations: bool,

        /// Report file (.yaml or .json); prints to the console when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Count non-stopword lemmas of parsed sentences under a label.
    Vocab {
        /// Parse files (CoNLL-U or spaCy JSON)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Label of this document group
        #[arg(short, long)]
        label: String,

        /// Parse file format
        #[arg(short, long, value_enum, default_value_t = ParseFormat::Auto)]
        format: ParseFormat,

        /// Existing frequency report to merge into (and overwrite)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render a bar chart and/or word cloud from a frequency report.
    Plot {
        /// Frequency report written by `vocab`
        table: PathBuf,

        /// Label to plot
        #[arg(short, long)]
        label: String,

        /// Chart kind
        #[arg(short, long, value_enum, default_value_t = PlotKind::Combined)]
        kind: PlotKind,

        /// Highest rank shown in the bar chart
        #[arg(
            long,
            default_value_t = DEFAULT_MAX_RANK,
            value_parser = RangedU64ValueParser::<usize>::new().range(1..)
        )]
        max_rank: usize,

        /// Number of words in the cloud
        #[arg(long, default_value_t = DEFAULT_CLOUD_WORDS)]
        max_words: usize,

        /// SVG output file
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let lexicon = match &cli.lexicon {
        Some(path) => Lexicon::from_file(path)?,
        None => Lexicon::default(),
    };

    match cli.command {
        Commands::Headnotes {
            html,
            prefix,
            class,
            output,
        } => headnotes_command(&lexicon, &html, &prefix, &class, output.as_deref()),
        Commands::Obligations {
            inputs,
            format,
            section,
            title,
            only_obligations,
            output,
        } => obligations_command(
            &lexicon,
            &inputs,
            format,
            SentenceLabels {
                section: section.as_deref(),
                title: title.as_deref(),
            },
            only_obligations,
            output.as_deref(),
        ),
        Commands::Vocab {
            inputs,
            label,
            format,
            output,
        } => vocab_command(&lexicon, &inputs, &label, format, output.as_deref()),
        Commands::Plot {
            table,
            label,
            kind,
            max_rank,
            max_words,
            output,
        } => plot_command(
            &table,
            &label,
            kind,
            &PlotOptions {
                max_rank,
                max_words,
                size: CHART_SIZE,
            },
            &output,
        ),
    }
}

fn wrap(text: &str) -> String {
    fill(text, Options::new(TEXT_WRAP_WIDTH).subsequent_indent("    "))
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .expect("valid template"),
    );
    pb
}

/// Read every input file, advancing a progress bar.
fn read_all(inputs: &[PathBuf], format: ParseFormat) -> Result<Vec<(PathBuf, Vec<ParsedSentence>)>> {
    let pb = progress_bar(inputs.len());
    let mut documents = Vec::with_capacity(inputs.len());
    for path in inputs {
        pb.set_message(path.display().to_string());
        match read_sentences(path, format) {
            Ok(sentences) => documents.push((path.clone(), sentences)),
            Err(e) => {
                pb.finish_and_clear();
                return Err(e);
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();
    Ok(documents)
}

fn headnotes_command(
    lexicon: &Lexicon,
    html: &Path,
    prefix: &str,
    class: &str,
    output: Option<&Path>,
) -> Result<()> {
    let cleaner = TextCleaner::from_lexicon(lexicon)?;
    let document = load_html(html)?;
    let headnotes = extract_headnotes(&document, prefix, class, &cleaner)?;

    println!(
        "{} {} headnotes from {}",
        style("Extracted").bold(),
        style(headnotes.len()).cyan(),
        style(html.display()).green()
    );

    match output {
        Some(path) => {
            let report = Report::new(vec![html.to_path_buf()], Payload::Headnotes(headnotes));
            save_report(&report, path)?;
            println!("{} {}", style("Saved to:").green().bold(), path.display());
        }
        None => {
            for (title, body) in &headnotes {
                println!();
                println!("{}", style(title).bold());
                println!("    {}", wrap(body));
            }
        }
    }
    Ok(())
}

/// Fallback labels for sentences without metadata.
#[derive(Debug, Clone, Copy)]
struct SentenceLabels<'a> {
    section: Option<&'a str>,
    title: Option<&'a str>,
}

/// Prefix of generated sentence ids for each input, in input order.
///
/// The prefix is the file stem. Inputs sharing a stem get their 1-based
/// position appended (`rta.2`) so generated ids stay unique.
fn id_prefixes(inputs: &[PathBuf]) -> Vec<String> {
    let stems: Vec<String> = inputs
        .iter()
        .map(|path| {
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
        .collect();

    stems
        .iter()
        .enumerate()
        .map(|(i, stem)| {
            if stems.iter().filter(|other| *other == stem).count() > 1 {
                format!("{stem}.{}", i + 1)
            } else {
                stem.clone()
            }
        })
        .collect()
}

/// Build records for every sentence of one parse file.
///
/// Sentences without a `sent_id` get `"{prefix}-{n}"`.
fn analyze_document(
    extractor: &ObligationExtractor<'_>,
    prefix: &str,
    sentences: &[ParsedSentence],
    labels: SentenceLabels<'_>,
) -> Vec<Sentence> {
    sentences
        .iter()
        .enumerate()
        .map(|(n, sentence)| {
            let sid = sentence
                .id()
                .map(String::from)
                .unwrap_or_else(|| format!("{prefix}-{}", n + 1));
            let section = sentence
                .metadata("section")
                .or(labels.section)
                .unwrap_or_default();
            let title = sentence
                .metadata("title")
                .or(labels.title)
                .unwrap_or_default();
            extractor.make_sentence(sid, sentence, section, title)
        })
        .collect()
}

fn obligations_command(
    lexicon: &Lexicon,
    inputs: &[PathBuf],
    format: ParseFormat,
    labels: SentenceLabels<'_>,
    only_obligations: bool,
    output: Option<&Path>,
) -> Result<()> {
    let extractor = ObligationExtractor::new(lexicon);
    let documents = read_all(inputs, format)?;
    let prefixes = id_prefixes(inputs);

    let mut records: Vec<Sentence> = documents
        .iter()
        .zip(&prefixes)
        .flat_map(|((_, sentences), prefix)| {
            analyze_document(&extractor, prefix, sentences, labels)
        })
        .collect();
    let total = records.len();
    if only_obligations {
        records.retain(Sentence::has_obligation);
    }
    let with_obligation = records.iter().filter(|r| r.has_obligation()).count();

    println!(
        "{} {} sentences, {} with obligations",
        style("Analyzed").bold(),
        style(total).cyan(),
        style(with_obligation).green()
    );

    match output {
        Some(path) => {
            let report = Report::new(inputs.to_vec(), Payload::Sentences(records));
            save_report(&report, path)?;
            println!("{} {}", style("Saved to:").green().bold(), path.display());
        }
        None => {
            for record in records.iter().filter(|r| r.has_obligation()) {
                println!();
                println!("{} {}", style(&record.sid).bold(), wrap(&record.text));
                println!("  subject: {}", style(&record.subj).cyan());
                println!("  verbs:   {}", style(record.verb_texts().join(", ")).yellow());
                println!("  object:  {}", style(&record.obj).cyan());
            }
        }
    }
    Ok(())
}

fn vocab_command(
    lexicon: &Lexicon,
    inputs: &[PathBuf],
    label: &str,
    format: ParseFormat,
    output: Option<&Path>,
) -> Result<()> {
    let documents = read_all(inputs, format)?;
    let table = FrequencyTable::from_sentences(
        label,
        documents.iter().flat_map(|(_, sentences)| sentences),
        lexicon,
    );

    println!(
        "{} {} distinct lemmas for {}",
        style("Counted").bold(),
        style(table.rows().len()).cyan(),
        style(label).green()
    );

    match output {
        Some(path) => {
            let report = merge_frequency_report(path, inputs, table)?;
            save_report(&report, path)?;
            println!("{} {}", style("Saved to:").green().bold(), path.display());
        }
        None => {
            for row in table.top_ranked(label, DEFAULT_MAX_RANK) {
                println!("{:>4}  {:<24} {}", row.rank, row.word, row.count);
            }
        }
    }
    Ok(())
}

fn plot_command(
    table: &Path,
    label: &str,
    kind: PlotKind,
    options: &PlotOptions,
    output: &Path,
) -> Result<()> {
    let frequencies = load_frequency_table(table)?;
    save_plot(&frequencies, label, kind, options, output)?;
    println!("{} {}", style("Saved to:").green().bold(), output.display());
    Ok(())
}
