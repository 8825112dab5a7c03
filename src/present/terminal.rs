// Terminal renderer: tables, metrics and coloured banners
use std::io::{self, Write};
use termcolor::{Color, ColorSpec, WriteColor};

use super::metric;
use crate::dispatch::Outcome;
use crate::nlp::sentiment::SentimentLabel;

#[derive(Debug, Clone, Copy)]
enum Banner {
    Success,
    Warning,
    Error,
}

impl Banner {
    fn color(self) -> Color {
        match self {
            Banner::Success => Color::Green,
            Banner::Warning => Color::Yellow,
            Banner::Error => Color::Red,
        }
    }
}

pub fn render<W: WriteColor>(out: &mut W, outcome: &Outcome) -> io::Result<()> {
    match outcome {
        Outcome::EmptyInput => banner(out, Banner::Warning, Outcome::EMPTY_INPUT_MESSAGE),
        Outcome::Tokens { tokens } => {
            heading(out, "Tokenization & Lemmatization")?;
            let rows: Vec<[&str; 2]> = tokens
                .iter()
                .map(|t| [t.text.as_str(), t.lemma.as_str()])
                .collect();
            table(out, ["Token", "Lemma"], &rows)
        }
        Outcome::Entities { entities, count } => {
            heading(out, "Named Entity Recognition")?;
            let rows: Vec<[&str; 2]> = entities
                .iter()
                .map(|e| [e.text.as_str(), e.label.as_str()])
                .collect();
            table(out, ["Entity", "Label"], &rows)?;
            banner(
                out,
                Banner::Success,
                &format!("Total Entities Found: {count}"),
            )
        }
        Outcome::Sentiment {
            polarity,
            subjectivity,
            label,
        } => {
            heading(out, "Sentiment Analysis")?;
            writeln!(out, "Polarity:     {}", metric(*polarity))?;
            writeln!(out, "Subjectivity: {}", metric(*subjectivity))?;
            let kind = match label {
                SentimentLabel::Positive => Banner::Success,
                SentimentLabel::Negative => Banner::Error,
                SentimentLabel::Neutral => Banner::Warning,
            };
            banner(out, kind, &format!("{label} Sentiment"))
        }
        Outcome::Summary { method, sentences } => {
            heading(out, &format!("Text Summarization ({})", method.display_name()))?;
            if sentences.is_empty() {
                return banner(out, Banner::Warning, "No sentences found to summarize.");
            }
            banner(out, Banner::Success, "Summary Generated:")?;
            writeln!(out, "{}", Outcome::summary_text(sentences))
        }
    }
}

fn heading<W: WriteColor>(out: &mut W, title: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_bold(true))?;
    writeln!(out, "{title}")?;
    out.reset()?;
    writeln!(out, "{}", "─".repeat(title.chars().count()))
}

fn banner<W: WriteColor>(out: &mut W, kind: Banner, message: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(kind.color())).set_bold(true))?;
    writeln!(out, "{message}")?;
    out.reset()
}

fn table<W: WriteColor>(out: &mut W, header: [&str; 2], rows: &[[&str; 2]]) -> io::Result<()> {
    let width = |col: usize| {
        rows.iter()
            .map(|r| r[col].chars().count())
            .chain(std::iter::once(header[col].chars().count()))
            .max()
            .unwrap_or(0)
    };
    let (w0, w1) = (width(0), width(1));

    out.set_color(ColorSpec::new().set_bold(true))?;
    writeln!(out, "{:<w0$}  {:<w1$}", header[0], header[1])?;
    out.reset()?;
    writeln!(out, "{}  {}", "─".repeat(w0), "─".repeat(w1))?;
    for [left, right] in rows {
        writeln!(out, "{left:<w0$}  {right}")?;
    }
    Ok(())
}
