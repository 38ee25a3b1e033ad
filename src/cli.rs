use std::{env, path::PathBuf, sync::Arc};

use anyhow::Context;
use chrono::Weekday;
use serde::Serialize;

use calpick::{
    app::{DatePicker, SelectionEvent},
    calendar::CalendarDate,
    dots::{DotLoader, StaticDotSource},
    selection::{DayState, Range},
    storage::config::Config,
    ui::MonthLayout,
};

const USAGE: &str = "Usage: calpick [--config PATH] [--month YYYY/MM] [--tap YYYY/MM/DD]... [--json]";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub month: Option<(i32, u32)>,
    pub taps: Vec<CalendarDate>,
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliMode {
    Help,
    Run(CliOptions),
}

pub fn usage() -> &'static str {
    USAGE
}

pub fn parse_cli_mode() -> Result<CliMode, String> {
    parse_args(env::args().skip(1))
}

pub fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliMode, String> {
    let mut options = CliOptions::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().ok_or("--config needs a path")?;
                options.config = Some(PathBuf::from(path));
            }
            "--month" => {
                let value = args.next().ok_or("--month needs YYYY/MM")?;
                options.month = Some(parse_month(&value)?);
            }
            "--tap" => {
                let value = args.next().ok_or("--tap needs YYYY/MM/DD")?;
                let date = value
                    .parse::<CalendarDate>()
                    .map_err(|_| format!("Invalid date '{}'. Use YYYY/MM/DD.", value))?;
                options.taps.push(date);
            }
            "--json" => options.json = true,
            "--help" | "-h" => return Ok(CliMode::Help),
            _ => return Err(format!("Unknown argument: {}", arg)),
        }
    }

    Ok(CliMode::Run(options))
}

fn parse_month(value: &str) -> Result<(i32, u32), String> {
    let invalid = || format!("Invalid month '{}'. Use YYYY/MM.", value);
    let (year, month) = value.split_once('/').ok_or_else(invalid)?;
    let year = year.parse::<i32>().map_err(|_| invalid())?;
    let month = month.parse::<u32>().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

#[derive(Serialize)]
struct Report<'a> {
    events: &'a [SelectionEvent],
    layout: &'a MonthLayout,
}

pub async fn run(options: CliOptions) -> anyhow::Result<()> {
    let config = match &options.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load_or_create().context("loading default config")?,
    };
    let state = config.view_state()?;

    let loader = DotLoader::new(Arc::new(StaticDotSource::new(config.dots.dates.iter().copied())));
    let mut picker = DatePicker::new(state).with_dot_loader(loader.clone());

    let mut events = Vec::new();
    for tap in &options.taps {
        for event in picker.on_date_clicked(*tap) {
            tracing::info!("Tap on {} emitted {:?}", tap, event);
            events.push(event);
        }
    }

    let (year, month) = options
        .month
        .or_else(|| picker.initial_position().and_then(|p| picker.month_at(p)))
        .unwrap_or_else(|| {
            let today = picker.today();
            (today.year(), today.month())
        });

    if let Some(handle) = loader.ensure(year) {
        handle.await.context("loading dots")?;
    }
    let layout = picker.layout_for(year, month);

    if options.json {
        let report = Report {
            events: &events,
            layout: &layout,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for event in &events {
            println!("{}", describe_event(event));
        }
        if !events.is_empty() {
            println!();
        }
        print!("{}", format_month_text(&layout));
    }

    Ok(())
}

fn describe_event(event: &SelectionEvent) -> String {
    match event {
        SelectionEvent::SelectedDatesChanged { start, end, .. } => format!(
            "selected: {} .. {}",
            start.map_or("-".to_string(), |d| d.to_string()),
            end.map_or("-".to_string(), |d| d.to_string())
        ),
        SelectionEvent::RangeCompleted { start, end, select_type } => {
            format!("completed {}: {} .. {}", select_type.name(), start, end)
        }
        SelectionEvent::SelectLimitExceeded { start, attempted, limit, select_type } => format!(
            "limit of {} exceeded for {} from {}: {}",
            limit,
            select_type.name(),
            start,
            attempted
        ),
        SelectionEvent::SelectedBeforeStartDate { bound, attempted } => {
            format!("{} is before start date {}", attempted, bound)
        }
        SelectionEvent::SelectedAfterEndDate { bound, attempted } => {
            format!("{} is after end date {}", attempted, bound)
        }
    }
}

fn cell_marker(state: &DayState) -> char {
    match state.range() {
        Some(Range::OneDay) => '*',
        Some(Range::Start) => '[',
        Some(Range::Middle) => '=',
        Some(Range::End) => ']',
        None if state.is_disabled() => '.',
        None if state.is_today() => '!',
        None if state.has_dot() => '+',
        None => ' ',
    }
}

fn format_month_text(layout: &MonthLayout) -> String {
    let mut lines = Vec::new();

    let title = CalendarDate::new(layout.year, layout.month, 1)
        .map(|first| first.naive().format("%B %Y").to_string())
        .unwrap_or_else(|_| format!("{}/{:02}", layout.year, layout.month));
    lines.push(title);

    let mut weekday = layout.week_start.parse::<Weekday>().unwrap_or(Weekday::Sun);
    let mut header = Vec::new();
    for _ in 0..7 {
        header.push(format!("{:<3}", &weekday.to_string()[..2]));
        weekday = weekday.succ();
    }
    lines.push(header.join("").trim_end().to_string());

    for week in &layout.weeks {
        let row: Vec<String> = week
            .days
            .iter()
            .map(|cell| match (cell.date, cell.state) {
                (Some(date), Some(state)) => format!("{:>2}{}", date.day(), cell_marker(&state)),
                _ => "   ".to_string(),
            })
            .collect();
        lines.push(row.join("").trim_end().to_string());
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}
