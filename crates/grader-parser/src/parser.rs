use super::ast::*;
use chrono::NaiveDate;
use grader_common::{ModelError, OsatsMetric, Procedure};
use grader_common::clock::{ClockError, ClockTime};
use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;
use thiserror::Error;

#[derive(Parser)]
#[grammar = "form.pest"]
pub struct FormParser;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Pest error: {0}")]
    Pest(#[from] pest::error::Error<Rule>),
    #[error("Unknown rule: {0:?}")]
    UnknownRule(Rule),
    #[error("Missing {0}")]
    Missing(&'static str),
    #[error("Invalid integer: {0}")]
    InvalidInteger(#[from] std::num::ParseIntError),
    #[error("Invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error(transparent)]
    Clock(#[from] ClockError),
    #[error(transparent)]
    Model(#[from] ModelError),
}

pub fn parse(input: &str) -> Result<Script, ParseError> {
    let mut pairs = FormParser::parse(Rule::form_input, input)?;
    let mut script = Script { lines: Vec::new() };

    if let Some(pair) = pairs.next() {
        for inner in pair.into_inner() {
            if inner.as_rule() == Rule::line {
                script.lines.push(parse_line(inner)?);
            }
        }
    }

    Ok(script)
}

fn parse_line(pair: Pair<Rule>) -> Result<Line, ParseError> {
    let mut command = None;
    let mut comment = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::comment => {
                comment = Some(inner.as_str().trim_start_matches('#').trim().to_string());
            }
            _ => command = Some(parse_command(inner)?),
        }
    }

    Ok(Line { command, comment })
}

fn parse_command(pair: Pair<Rule>) -> Result<Command, ParseError> {
    match pair.as_rule() {
        // Procedure information
        Rule::name_cmd => Ok(Command::Name(text_arg(pair, "name")?)),
        Rule::grader_cmd => Ok(Command::Grader(text_arg(pair, "grader")?)),
        Rule::date_cmd => Ok(Command::Date(parse_date(pair)?)),
        Rule::procedure_cmd => {
            let word = find_inner(pair, Rule::word, "procedure")?;
            Ok(Command::Procedure(word.as_str().parse::<Procedure>()?))
        }

        // Entries
        Rule::entry_cmd => Ok(Command::Entry(parse_entry(pair)?)),
        Rule::add_entry_cmd => Ok(Command::AddEntry),

        // Summary
        Rule::total_time_cmd => Ok(Command::TotalTime(parse_clock(pair)?)),
        Rule::errors_cmd => {
            let count = find_inner(pair, Rule::number, "error count")?;
            Ok(Command::Errors(count.as_str().parse::<u32>()?))
        }
        Rule::score_cmd => Ok(Command::Score(parse_score(pair)?)),

        // Events
        Rule::save_cmd => Ok(Command::Save),
        Rule::export_cmd => Ok(Command::Export),
        Rule::preview_cmd => Ok(Command::Preview),

        // Inspection
        Rule::show_cmd => Ok(Command::Show),
        Rule::records_cmd => Ok(Command::Records(RecordsCmd {
            json: pair.into_inner().any(|p| p.as_rule() == Rule::json_flag),
        })),
        Rule::help_cmd => Ok(Command::Help),

        rule => Err(ParseError::UnknownRule(rule)),
    }
}

// --- Parsers for specific commands ---

fn parse_date(pair: Pair<Rule>) -> Result<DateValue, ParseError> {
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::today => return Ok(DateValue::Today),
            Rule::date_value => {
                let raw = inner.as_str();
                return NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .map(DateValue::On)
                    .map_err(|_| ParseError::InvalidDate(raw.to_string()));
            }
            _ => {}
        }
    }
    Err(ParseError::Missing("date"))
}

fn parse_entry(pair: Pair<Rule>) -> Result<EntryCmd, ParseError> {
    let mut index = None;
    let mut field = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::number => index = Some(inner.as_str().parse::<usize>()?),
            Rule::time_field => field = Some(EntryField::Time(parse_clock(inner)?)),
            Rule::comment_field => field = Some(EntryField::Comment(text_arg(inner, "comment")?)),
            Rule::metric_field => field = Some(EntryField::Metric(parse_metric_choice(inner)?)),
            Rule::remarks_field => field = Some(EntryField::Remarks(text_arg(inner, "remarks")?)),
            _ => {}
        }
    }

    Ok(EntryCmd {
        index: index.ok_or(ParseError::Missing("entry number"))?,
        field: field.ok_or(ParseError::Missing("entry field"))?,
    })
}

fn parse_clock(pair: Pair<Rule>) -> Result<ClockValue, ParseError> {
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::clear => return Ok(ClockValue::Clear),
            Rule::clock_value => return Ok(ClockValue::Set(inner.as_str().parse::<ClockTime>()?)),
            _ => {}
        }
    }
    Err(ParseError::Missing("clock value"))
}

/// `none` or an empty string selects the blank option.
fn parse_metric_choice(pair: Pair<Rule>) -> Result<Option<OsatsMetric>, ParseError> {
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::none => return Ok(None),
            Rule::quoted | Rule::bare => {
                let label = parse_text(inner);
                if label.trim().is_empty() {
                    return Ok(None);
                }
                return Ok(Some(label.parse::<OsatsMetric>()?));
            }
            _ => {}
        }
    }
    Err(ParseError::Missing("metric"))
}

fn parse_score(pair: Pair<Rule>) -> Result<ScoreCmd, ParseError> {
    let mut metric = None;
    let mut score = None;

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::quoted => metric = Some(parse_text(inner).parse::<OsatsMetric>()?),
            Rule::number => score = Some(inner.as_str().parse::<u8>()?),
            _ => {}
        }
    }

    Ok(ScoreCmd {
        metric: metric.ok_or(ParseError::Missing("metric"))?,
        score: score.ok_or(ParseError::Missing("score"))?,
    })
}

// --- Helpers ---

fn find_inner<'i>(
    pair: Pair<'i, Rule>,
    rule: Rule,
    what: &'static str,
) -> Result<Pair<'i, Rule>, ParseError> {
    pair.into_inner()
        .find(|p| p.as_rule() == rule)
        .ok_or(ParseError::Missing(what))
}

fn text_arg(pair: Pair<Rule>, what: &'static str) -> Result<String, ParseError> {
    pair.into_inner()
        .find(|p| matches!(p.as_rule(), Rule::quoted | Rule::bare))
        .map(parse_text)
        .ok_or(ParseError::Missing(what))
}

fn parse_text(pair: Pair<Rule>) -> String {
    match pair.as_rule() {
        Rule::quoted => pair
            .into_inner()
            .next()
            .map(|inner| unescape(inner.as_str()))
            .unwrap_or_default(),
        _ => pair.as_str().trim().to_string(),
    }
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
