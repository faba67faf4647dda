// Primitives for reading the two input tables from CSV files.

use std::collections::HashMap;

use games_analytics::{Medal, RawRecord, RegionRow, Sex};
use log::debug;

use crate::dash::io_common::{check_columns, opt_number, opt_text};
use crate::dash::*;

pub fn read_results_csv(path: &str) -> DashResult<Vec<RawRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .from_path(path)
        .context(OpeningCsvSnafu { path })?;
    let header = rdr
        .headers()
        .context(CsvLineParseSnafu { lineno: 1usize })?
        .clone();
    let cols = column_map(&header);
    check_columns(&cols, &RESULT_COLUMNS, path)?;

    let mut res: Vec<RawRecord> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        // The header occupies the first line.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        res.push(parse_result_row(&line, &cols, lineno)?);
    }
    debug!("read_results_csv: {} rows from {:?}", res.len(), path);
    Ok(res)
}

pub fn read_regions_csv(path: &str) -> DashResult<Vec<RegionRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .from_path(path)
        .context(OpeningCsvSnafu { path })?;
    let header = rdr
        .headers()
        .context(CsvLineParseSnafu { lineno: 1usize })?
        .clone();
    let cols = column_map(&header);
    check_columns(&cols, &REGION_COLUMNS, path)?;
    let notes_idx = cols.get("notes").copied();

    let mut res: Vec<RegionRow> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        let noc = line
            .get(cols["NOC"])
            .context(CsvLineTooShortSnafu { lineno })?
            .trim()
            .to_string();
        let region = line
            .get(cols["region"])
            .context(CsvLineTooShortSnafu { lineno })
            .map(opt_text)?;
        let notes = notes_idx.and_then(|i| line.get(i)).and_then(opt_text);
        res.push(RegionRow { noc, region, notes });
    }
    debug!("read_regions_csv: {} rows from {:?}", res.len(), path);
    Ok(res)
}

fn field<'a>(
    line: &'a csv::StringRecord,
    cols: &HashMap<String, usize>,
    column: &str,
    lineno: usize,
) -> DashResult<&'a str> {
    line.get(cols[column]).context(CsvLineTooShortSnafu { lineno })
}

fn parse_result_row(
    line: &csv::StringRecord,
    cols: &HashMap<String, usize>,
    lineno: usize,
) -> DashResult<RawRecord> {
    let year = field(line, cols, "Year", lineno)?
        .trim()
        .parse::<i32>()
        .ok()
        .context(FieldParseSnafu {
            column: "Year",
            lineno,
        })?;
    Ok(RawRecord {
        name: field(line, cols, "Name", lineno)?.to_string(),
        sex: Sex::parse(field(line, cols, "Sex", lineno)?.trim()),
        age: opt_number(field(line, cols, "Age", lineno)?),
        height: opt_number(field(line, cols, "Height", lineno)?),
        weight: opt_number(field(line, cols, "Weight", lineno)?),
        team: field(line, cols, "Team", lineno)?.to_string(),
        noc: field(line, cols, "NOC", lineno)?.trim().to_string(),
        games: field(line, cols, "Games", lineno)?.to_string(),
        year,
        season: field(line, cols, "Season", lineno)?.trim().to_string(),
        city: field(line, cols, "City", lineno)?.to_string(),
        sport: field(line, cols, "Sport", lineno)?.to_string(),
        event: field(line, cols, "Event", lineno)?.to_string(),
        medal: Medal::parse(field(line, cols, "Medal", lineno)?.trim()),
    })
}

fn column_map(header: &csv::StringRecord) -> HashMap<String, usize> {
    header
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.trim().to_string(), idx))
        .collect()
}
