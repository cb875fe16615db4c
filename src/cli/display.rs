// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal display utilities for the ngram-suggest CLI.
//!
//! Colors only when stdout is a terminal and `NO_COLOR` is unset, so output
//! piped into another tool stays plain.

use std::io::IsTerminal;
use std::sync::OnceLock;
use std::time::Duration;

use ngram_suggest::binary::IndexHeader;
use ngram_suggest::{Candidate, SearchIndex};

// Box drawing constants - width between │ and │ (excluding border chars)
pub const BOX_WIDTH: usize = 60;

static COLOR: OnceLock<bool> = OnceLock::new();

fn color_enabled() -> bool {
    let detect = || std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal();
    *COLOR.get_or_init(detect)
}

fn paint(code: &str, text: &str) -> String {
    if color_enabled() {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

pub fn dim(text: &str) -> String {
    paint("2", text)
}

pub fn bold(text: &str) -> String {
    paint("1", text)
}

pub fn green(text: &str) -> String {
    paint("32", text)
}

/// Timing colored by how it feels: green under 1ms, yellow under 10ms, red beyond.
pub fn timing(elapsed: Duration) -> String {
    let micros = elapsed.as_micros();
    let text = if micros < 1_000 {
        format!("{}µs", micros)
    } else {
        format!("{:.2}ms", micros as f64 / 1_000.0)
    };
    let code = match micros {
        0..=999 => "32",
        1_000..=9_999 => "33",
        _ => "31",
    };
    paint(code, &text)
}

fn box_line(left: char, right: char) -> String {
    format!("{}{}{}", left, "─".repeat(BOX_WIDTH), right)
}

fn box_row(text: &str) -> String {
    let width = text.chars().count();
    let padding = BOX_WIDTH.saturating_sub(width + 1);
    format!("│ {}{}│", text, " ".repeat(padding))
}

/// Ranked results, one per line: rank, score, doc id, entry.
pub fn print_results(index: &SearchIndex, results: &[Candidate], elapsed: Duration) {
    if results.is_empty() {
        println!(
            "{} {}",
            dim("no results"),
            dim(&format!("({})", timing(elapsed)))
        );
        return;
    }

    for (rank, candidate) in results.iter().enumerate() {
        let entry = index.entry(candidate.doc_id).unwrap_or("?");
        println!(
            "{:>3}. {} {} {}",
            rank + 1,
            green(&format!("{:.3}", candidate.score)),
            dim(&format!("#{:<6}", candidate.doc_id)),
            bold(entry)
        );
    }
    let summary = format!("{} results in {}", results.len(), timing(elapsed));
    println!("{}", dim(&summary));
}

/// Header fields and section sizes of an index file.
pub fn print_header(file: &str, size: usize, header: &IndexHeader) {
    let offsets = header.section_offsets();
    let rows = [
        format!("file        {}", file),
        format!("size        {} bytes", size),
        format!("version     {}", header.version),
        format!("ngram size  {}", header.ngram_size),
        format!("entries     {}", header.doc_count),
        format!("terms       {}", header.term_count),
        format!(
            "dictionary  {} bytes @ {}",
            header.dictionary_len, offsets.dictionary.0
        ),
        format!(
            "vocabulary  {} bytes @ {}",
            header.vocab_len, offsets.vocabulary.0
        ),
        format!(
            "postings    {} bytes @ {}",
            header.postings_len, offsets.postings.0
        ),
    ];

    println!("{}", box_line('┌', '┐'));
    for row in &rows {
        println!("{}", box_row(row));
    }
    println!("{}", box_line('└', '┘'));
}
