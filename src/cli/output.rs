//! Output formatting for CLI commands.
//!
//! This module handles formatting output as either JSON or human-readable text.

use anyhow::Result;
use chrono::NaiveDateTime;
use datesift::{Config, ModeConfiguration, ParsedResult, ResolvedMoment, TemporalField};
use serde::Serialize;

#[derive(Serialize)]
struct ParseReport<'a> {
    reference: NaiveDateTime,
    results: &'a [ParsedResult],
}

#[derive(Serialize)]
struct ModeReport<'a> {
    locale: String,
    strictness: String,
    correction: String,
    matchers: Vec<&'a str>,
    stages: Vec<&'static str>,
}

/// Print parse results.
pub fn print_results(results: &[ParsedResult], reference: NaiveDateTime, json: bool) -> Result<()> {
    if json {
        let report = ParseReport { reference, results };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No dates found.");
        return Ok(());
    }

    for (i, result) in results.iter().enumerate() {
        println!("{}. \"{}\" (offset {}, {} bytes)", i + 1, result.text, result.index, result.length);
        println!("   start: {}", describe(&result.start));
        if let Some(end) = &result.end {
            println!("   end:   {}", describe(end));
        }
        let tags: Vec<String> = result.tags.iter().map(|t| format!("{:?}", t)).collect();
        println!("   tags:  {}", tags.join(", "));
    }
    Ok(())
}

/// Print the matchers and stages of a mode.
pub fn print_mode(config: &Config, mode: &ModeConfiguration, json: bool) -> Result<()> {
    let report = ModeReport {
        locale: config.parser.locale.to_string(),
        strictness: format!("{:?}", config.parser.strictness).to_lowercase(),
        correction: format!("{:?}", config.parser.correction).to_lowercase(),
        matchers: mode.matchers().iter().map(|m| m.name()).collect(),
        stages: mode.stage_names(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Locale: {}  Strictness: {}  Correction: {}",
        report.locale, report.strictness, report.correction
    );
    println!("\nMatchers ({}):", report.matchers.len());
    for (priority, name) in report.matchers.iter().enumerate() {
        println!("  {:>2}. {}", priority, name);
    }
    println!("\nStages ({}):", report.stages.len());
    for (i, name) in report.stages.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, name);
    }
    Ok(())
}

/// "2026-01-20 15:00:00 +09:00 [certain: hour minute]"
fn describe(moment: &ResolvedMoment) -> String {
    let mut line = moment.datetime.to_string();
    if let Some(aware) = moment.with_offset() {
        line.push(' ');
        line.push_str(&aware.offset().to_string());
    }
    let certain: Vec<&str> = moment.certain.iter().map(|f| field_name(*f)).collect();
    if !certain.is_empty() {
        line.push_str(&format!(" [certain: {}]", certain.join(" ")));
    }
    line
}

fn field_name(field: TemporalField) -> &'static str {
    match field {
        TemporalField::Year => "year",
        TemporalField::Month => "month",
        TemporalField::Day => "day",
        TemporalField::Weekday => "weekday",
        TemporalField::Hour => "hour",
        TemporalField::Minute => "minute",
        TemporalField::Second => "second",
        TemporalField::Meridiem => "meridiem",
        TemporalField::TimezoneOffset => "timezone",
    }
}
