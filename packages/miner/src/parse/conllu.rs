//! CoNLL-U reader.
//!
//! Sentences are separated by blank lines. Comment lines of the form
//! `# key = value` become sentence metadata; `sent_id` and `text` are also
//! used as the sentence id and text.

use std::collections::BTreeMap;

use super::types::{DependencyToken, ParsedSentence};
use crate::error::{MinerError, Result};

const COLUMNS: usize = 10;

/// A token line before validation.
struct Row {
    form: String,
    lemma: String,
    upos: String,
    xpos: String,
    head: usize,
    deprel: String,
    space_after: bool,
}

/// Sentence under construction.
#[derive(Default)]
struct Block {
    first_line: usize,
    metadata: BTreeMap<String, String>,
    rows: Vec<Row>,
}

impl Block {
    fn is_empty(&self) -> bool {
        self.metadata.is_empty() && self.rows.is_empty()
    }

    fn finish(mut self) -> Result<ParsedSentence> {
        let id = self.metadata.get("sent_id").cloned();
        let text = self
            .metadata
            .get("text")
            .cloned()
            .unwrap_or_else(|| rebuild_text(&self.rows));

        let tokens = self
            .rows
            .drain(..)
            .enumerate()
            .map(|(index, row)| DependencyToken {
                index,
                text: row.form,
                lemma: row.lemma,
                pos: row.upos,
                tag: row.xpos,
                dep: row.deprel,
                // HEAD is 1-based with 0 for the root
                head: if row.head == 0 { index } else { row.head - 1 },
            })
            .collect();

        let first_line = self.first_line;
        ParsedSentence::new(id, text, tokens)
            .map(|s| s.with_metadata(self.metadata))
            .map_err(|e| match e {
                MinerError::MalformedParse { reason, .. } => MinerError::Conllu {
                    line: first_line,
                    message: reason,
                },
                other => other,
            })
    }
}

fn rebuild_text(rows: &[Row]) -> String {
    let mut text = String::new();
    for row in rows {
        text.push_str(&row.form);
        if row.space_after {
            text.push(' ');
        }
    }
    text.trim_end().to_string()
}

fn parse_comment(line: &str, block: &mut Block) {
    let body = line.trim_start_matches('#').trim();
    if let Some((key, value)) = body.split_once('=') {
        let key = key.trim();
        if !key.is_empty() && !key.contains(' ') {
            block
                .metadata
                .insert(key.to_string(), value.trim().to_string());
        }
    }
}

fn parse_row(line: &str, line_no: usize) -> Result<Option<Row>> {
    let error = |message: String| MinerError::Conllu {
        line: line_no,
        message,
    };

    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != COLUMNS {
        return Err(error(format!(
            "expected {COLUMNS} columns, found {}",
            fields.len()
        )));
    }

    // Multiword ranges (1-2) and empty nodes (1.1) carry no tree position
    if fields[0].contains('-') || fields[0].contains('.') {
        return Ok(None);
    }
    fields[0]
        .parse::<usize>()
        .map_err(|_| error(format!("invalid token id '{}'", fields[0])))?;

    let head = fields[6]
        .parse::<usize>()
        .map_err(|_| error(format!("invalid head '{}'", fields[6])))?;

    let value = |field: &str| {
        if field == "_" {
            String::new()
        } else {
            field.to_string()
        }
    };

    Ok(Some(Row {
        form: fields[1].to_string(),
        lemma: value(fields[2]),
        upos: value(fields[3]),
        xpos: value(fields[4]),
        head,
        deprel: value(fields[7]),
        space_after: !fields[9].split('|').any(|m| m == "SpaceAfter=No"),
    }))
}

/// Parse CoNLL-U text into sentences.
///
/// # Examples
/// ```
/// use obligation_miner::parse::parse_conllu;
///
/// let src = "# sent_id = s1\n1\tRent\trent\tNOUN\tNN\t_\t0\tROOT\t_\t_\n";
/// let sentences = parse_conllu(src).unwrap();
/// assert_eq!(sentences[0].id(), Some("s1"));
/// assert!(sentences[0].tokens()[0].is_root());
/// ```
pub fn parse_conllu(source: &str) -> Result<Vec<ParsedSentence>> {
    let mut sentences = Vec::new();
    let mut block = Block::default();

    for (offset, raw) in source.lines().enumerate() {
        let line_no = offset + 1;
        let line = raw.trim_end_matches('\r');

        if line.trim().is_empty() {
            if !block.is_empty() {
                sentences.push(std::mem::take(&mut block).finish()?);
            }
            continue;
        }

        if block.is_empty() {
            block.first_line = line_no;
        }

        if line.starts_with('#') {
            parse_comment(line, &mut block);
        } else if let Some(row) = parse_row(line, line_no)? {
            block.rows.push(row);
        }
    }

    if !block.is_empty() {
        sentences.push(block.finish()?);
    }

    tracing::debug!(count = sentences.len(), "Parsed CoNLL-U sentences");
    Ok(sentences)
}
