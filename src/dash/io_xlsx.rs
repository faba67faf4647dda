// Primitives for reading the two input tables from Excel workbooks.

use std::collections::HashMap;

use calamine::{open_workbook, DataType, Range, Reader, Xlsx};
use games_analytics::{Medal, RawRecord, RegionRow, Sex};
use log::debug;

use crate::dash::io_common::{check_columns, opt_number, opt_text};
use crate::dash::*;

static EMPTY_CELL: DataType = DataType::Empty;

pub fn read_results_xlsx(path: &str, worksheet: &Option<String>) -> DashResult<Vec<RawRecord>> {
    let wrange = get_range(path, worksheet)?;
    let mut rows = wrange.rows();
    let header = rows.next().context(EmptyExcelSnafu { path })?;
    debug!("read_results_xlsx: header: {:?}", header);
    let cols = header_map(header);
    check_columns(&cols, &RESULT_COLUMNS, path)?;

    let mut res: Vec<RawRecord> = Vec::new();
    for (idx, row) in rows.enumerate() {
        let lineno = idx + 2;
        let cell = |column: &str| row.get(cols[column]).unwrap_or(&EMPTY_CELL);
        let year = cell_year(cell("Year"), lineno)?;
        res.push(RawRecord {
            name: cell_text(cell("Name")),
            sex: Sex::parse(cell_text(cell("Sex")).as_str()),
            age: cell_number(cell("Age")),
            height: cell_number(cell("Height")),
            weight: cell_number(cell("Weight")),
            team: cell_text(cell("Team")),
            noc: cell_text(cell("NOC")),
            games: cell_text(cell("Games")),
            year,
            season: cell_text(cell("Season")),
            city: cell_text(cell("City")),
            sport: cell_text(cell("Sport")),
            event: cell_text(cell("Event")),
            medal: Medal::parse(cell_text(cell("Medal")).as_str()),
        });
    }
    debug!("read_results_xlsx: {} rows from {:?}", res.len(), path);
    Ok(res)
}

pub fn read_regions_xlsx(path: &str, worksheet: &Option<String>) -> DashResult<Vec<RegionRow>> {
    let wrange = get_range(path, worksheet)?;
    let mut rows = wrange.rows();
    let header = rows.next().context(EmptyExcelSnafu { path })?;
    let cols = header_map(header);
    check_columns(&cols, &REGION_COLUMNS, path)?;
    let notes_idx = cols.get("notes").copied();

    let mut res: Vec<RegionRow> = Vec::new();
    for row in rows {
        let noc = cell_text(row.get(cols["NOC"]).unwrap_or(&EMPTY_CELL));
        let region = opt_text(&cell_text(row.get(cols["region"]).unwrap_or(&EMPTY_CELL)));
        let notes = notes_idx
            .and_then(|i| row.get(i))
            .and_then(|c| opt_text(&cell_text(c)));
        res.push(RegionRow { noc, region, notes });
    }
    debug!("read_regions_xlsx: {} rows from {:?}", res.len(), path);
    Ok(res)
}

fn get_range(path: &str, worksheet: &Option<String>) -> DashResult<Range<DataType>> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange = match worksheet {
        Some(name) => workbook.worksheet_range(name),
        None => workbook.worksheet_range_at(0),
    };
    wrange
        .context(EmptyExcelSnafu { path })?
        .context(OpeningExcelSnafu { path })
}

fn header_map(header: &[DataType]) -> HashMap<String, usize> {
    header
        .iter()
        .enumerate()
        .map(|(idx, cell)| (cell_text(cell), idx))
        .collect()
}

fn cell_text(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.trim().to_string(),
        DataType::Int(i) => i.to_string(),
        DataType::Float(f) if f.fract() == 0.0 => (*f as i64).to_string(),
        DataType::Float(f) => f.to_string(),
        DataType::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn cell_number(cell: &DataType) -> Option<f64> {
    match cell {
        DataType::Float(f) => Some(*f),
        DataType::Int(i) => Some(*i as f64),
        DataType::String(s) => opt_number(s),
        _ => None,
    }
}

fn cell_year(cell: &DataType, lineno: usize) -> DashResult<i32> {
    match cell {
        DataType::Int(i) => Ok(*i as i32),
        DataType::Float(f) => Ok(*f as i32),
        DataType::String(s) => s.trim().parse::<i32>().ok().context(FieldParseSnafu {
            column: "Year",
            lineno,
        }),
        _ => Err(DashError::ExcelWrongCellType {
            lineno,
            content: format!("{:?}", cell),
        }),
    }
}
