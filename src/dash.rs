use log::{debug, info, warn};

use games_analytics::*;
use snafu::{prelude::*, Snafu};

use std::fs;

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;

pub mod io_common;
pub mod io_csv;
pub mod io_xlsx;

/// The columns the results table must provide. Extra columns are ignored.
pub const RESULT_COLUMNS: [&str; 14] = [
    "Name", "Sex", "Age", "Height", "Weight", "Team", "NOC", "Games", "Year", "Season", "City",
    "Sport", "Event", "Medal",
];

/// The columns the region lookup table must provide.
pub const REGION_COLUMNS: [&str; 2] = ["NOC", "region"];

#[derive(Debug, Snafu)]
pub enum DashError {
    #[snafu(display("Error opening file {path}"))]
    OpeningCsv { source: csv::Error, path: String },
    #[snafu(display("Error reading line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Line {lineno} is too short"))]
    CsvLineTooShort { lineno: usize },
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("No usable worksheet in {path}"))]
    EmptyExcel { path: String },
    #[snafu(display("Unexpected cell content at line {lineno}: {content}"))]
    ExcelWrongCellType { lineno: usize, content: String },
    #[snafu(display("Required column {column} is missing from {path}"))]
    MissingColumn { column: String, path: String },
    #[snafu(display("Could not read the {column} field at line {lineno}"))]
    FieldParse { column: String, lineno: usize },
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display(""))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type DashResult<T> = Result<T, DashError>;

/// The selectors a summary was computed for, echoed back into the output so
/// that a summary file is self-describing.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SummaryQuery {
    pub view: String,
    pub year: Option<String>,
    pub country: Option<String>,
    pub sport: Option<String>,
    pub limit: Option<usize>,
}

fn year_selector(arg: &Option<String>) -> DashResult<Selector<i32>> {
    match arg.as_deref() {
        None => Ok(Selector::AllOf),
        Some(s) if s == OVERALL => Ok(Selector::AllOf),
        Some(s) => match s.trim().parse::<i32>() {
            Ok(y) => Ok(Selector::OnlyOf(y)),
            Err(_) => whatever!("Cannot parse year selector {:?}", s),
        },
    }
}

fn name_selector(arg: &Option<String>) -> Selector<String> {
    match arg.as_deref() {
        None => Selector::AllOf,
        Some(s) if s == OVERALL => Selector::AllOf,
        Some(s) => Selector::OnlyOf(s.to_string()),
    }
}

fn tally_js(tally: &MedalTally) -> JSValue {
    let rows: Vec<JSValue> = tally
        .rows
        .iter()
        .map(|r| {
            json!({
                "group": r.group,
                "gold": r.gold,
                "silver": r.silver,
                "bronze": r.bronze,
                "total": r.total,
            })
        })
        .collect();
    let grouping = match tally.grouping {
        TallyGrouping::ByRegion => "region",
        TallyGrouping::ByYear => "year",
    };
    json!({ "grouping": grouping, "rows": rows })
}

fn series_js(series: &TimeSeries) -> JSValue {
    let points: Vec<JSValue> = series
        .points
        .iter()
        .map(|p| json!({"edition": p.year, "count": p.count}))
        .collect();
    json!({ "label": series.label, "points": points })
}

fn matrix_js(matrix: &SportYearMatrix) -> JSValue {
    json!({
        "sports": matrix.sports,
        "years": matrix.years,
        "cells": matrix.cells,
    })
}

fn athletes_js(ranked: &[AthleteRank]) -> JSValue {
    let rows: Vec<JSValue> = ranked
        .iter()
        .map(|a| {
            json!({
                "name": a.name,
                "medals": a.medals,
                "sport": a.sport,
                "region": a.region,
            })
        })
        .collect();
    json!({ "rows": rows })
}

fn yearly_js(points: &[YearlyMedals]) -> JSValue {
    let points: Vec<JSValue> = points
        .iter()
        .map(|p| json!({"year": p.year, "medals": p.medals}))
        .collect();
    json!({ "points": points })
}

fn ages_js(series: &[AgeSeries]) -> JSValue {
    let series: Vec<JSValue> = series
        .iter()
        .map(|s| json!({"label": s.label, "ages": s.ages}))
        .collect();
    json!({ "series": series })
}

fn body_js(rows: &[BodyRow]) -> JSValue {
    let rows: Vec<JSValue> = rows
        .iter()
        .map(|r| {
            json!({
                "name": r.name,
                "height": r.height,
                "weight": r.weight,
                "medal": r.medal.map(|m| m.label()),
                "sex": r.sex.map(|s| s.label()),
            })
        })
        .collect();
    json!({ "rows": rows })
}

fn sex_js(rows: &[SexSplit]) -> JSValue {
    let rows: Vec<JSValue> = rows
        .iter()
        .map(|r| json!({"year": r.year, "male": r.male, "female": r.female}))
        .collect();
    json!({ "rows": rows })
}

fn overview_js(stats: &OverviewStats) -> JSValue {
    json!({
        "editions": stats.editions,
        "hosts": stats.hosts,
        "sports": stats.sports,
        "events": stats.events,
        "athletes": stats.athletes,
        "nations": stats.nations,
    })
}

/// Evaluates the view selected by the arguments and assembles the summary
/// document.
pub fn summary_js(ds: &Dataset, args: &Args) -> DashResult<JSValue> {
    let view = match &args.view {
        Some(v) => v.as_str(),
        None => whatever!("no view specified (--view)"),
    };
    debug!("summary_js: view: {:?}", view);
    let results = match view {
        "selectors" => {
            let (years, countries) = list_years_and_countries(ds);
            json!({
                "years": years,
                "countries": countries,
                "sports": list_sports(ds),
            })
        }
        "medal-tally" => {
            let tally = medal_tally(
                ds,
                &year_selector(&args.year)?,
                &name_selector(&args.country),
            );
            tally_js(&tally)
        }
        "overview" => overview_js(&overview_stats(ds)),
        "nations-over-time" => series_js(&series_over_time(
            ds,
            Dimension::Region,
            "No. of Countries",
        )),
        "events-over-time" => {
            series_js(&series_over_time(ds, Dimension::Event, "No. of Events"))
        }
        "athletes-over-time" => {
            series_js(&series_over_time(ds, Dimension::Athlete, "No. of Athletes"))
        }
        "sport-year-matrix" => matrix_js(&sport_year_matrix(ds)),
        "top-athletes" => athletes_js(&top_athletes(
            ds,
            &name_selector(&args.sport),
            args.limit.unwrap_or(15),
        )),
        "country-series" => yearly_js(&country_medal_series(ds, &name_selector(&args.country))),
        "country-heatmap" => matrix_js(&country_sport_heatmap(ds, &name_selector(&args.country))),
        "country-top-athletes" => match name_selector(&args.country) {
            Selector::OnlyOf(country) => athletes_js(&top_athletes_countrywise(
                ds,
                &country,
                args.limit.unwrap_or(10),
            )),
            // There is no global variant of this view; degrade to an empty
            // table rather than failing.
            Selector::AllOf => athletes_js(&[]),
        },
        "age-distribution" => ages_js(&age_distributions(ds, AgeGrouping::ByMedal)),
        "age-by-sport" => ages_js(&age_distributions(ds, AgeGrouping::GoldBySport)),
        "height-weight" => body_js(&weight_vs_height(ds, &name_selector(&args.sport))),
        "sex-participation" => sex_js(&participation_by_sex(ds)),
        x => whatever!("View not implemented {:?}", x),
    };
    let query = SummaryQuery {
        view: view.to_string(),
        year: args.year.clone(),
        country: args.country.clone(),
        sport: args.sport.clone(),
        limit: args.limit,
    };
    Ok(json!({ "query": query, "results": results }))
}

pub fn read_summary(path: String) -> DashResult<JSValue> {
    let contents = fs::read_to_string(path.clone()).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}

/// Loads the two input tables, builds the canonical dataset, evaluates the
/// selected view and writes the summary. If a reference summary is given,
/// the computed summary is checked against it.
pub fn run_view(args: &Args) -> DashResult<()> {
    let data_path = match &args.data {
        Some(p) => p.clone(),
        None => whatever!("no results table specified (--data)"),
    };
    let regions_path = match &args.regions {
        Some(p) => p.clone(),
        None => whatever!("no region table specified (--regions)"),
    };

    let (raw, regions) = match args.input_type.as_deref().unwrap_or("csv") {
        "csv" => (
            io_csv::read_results_csv(&data_path)?,
            io_csv::read_regions_csv(&regions_path)?,
        ),
        "xlsx" => (
            io_xlsx::read_results_xlsx(&data_path, &args.excel_worksheet_name)?,
            io_xlsx::read_regions_xlsx(&regions_path, &args.excel_worksheet_name)?,
        ),
        x => whatever!("Input type not implemented {:?}", x),
    };

    let ds = normalize(raw, &regions);
    info!("run_view: {} canonical records", ds.len());

    let summary = summary_js(&ds, args)?;
    let pretty_js_stats = serde_json::to_string_pretty(&summary).context(ParsingJsonSnafu {})?;
    match &args.out {
        Some(path) if path != "stdout" => {
            fs::write(path, &pretty_js_stats).context(WritingSummarySnafu {
                path: path.as_str(),
            })?
        }
        _ => println!("{}", pretty_js_stats),
    }

    // The reference summary, if provided for comparison
    if let Some(summary_p) = &args.reference {
        let summary_ref = read_summary(summary_p.clone())?;
        debug!("summary: {:?}", summary_ref);
        let pretty_js_summary_ref =
            serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        if pretty_js_summary_ref != pretty_js_stats {
            warn!("Found differences with the reference summary");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            whatever!("Difference detected between computed summary and reference summary")
        }
    }

    Ok(())
}
