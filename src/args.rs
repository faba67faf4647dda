use clap::Parser;

/// This is an analytics program for historical Olympic results.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The results table, one row per athlete entry in an event.
    /// See the library manual for the expected columns.
    #[clap(short, long, value_parser)]
    pub data: Option<String>,

    /// (file path) The lookup table mapping NOC codes to region names.
    #[clap(short, long, value_parser)]
    pub regions: Option<String>,

    /// (default csv) The type of the input tables: csv or xlsx.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (first worksheet if not specified) When using Excel files, indicates
    /// the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// The view to evaluate. See the library manual for the list of views.
    #[clap(short, long, value_parser)]
    pub view: Option<String>,

    /// (a year or 'Overall') Year selector for the views that accept one.
    #[clap(short, long, value_parser)]
    pub year: Option<String>,

    /// (a region name or 'Overall') Country selector for the views that
    /// accept one.
    #[clap(short, long, value_parser)]
    pub country: Option<String>,

    /// (a sport name or 'Overall') Sport selector for the views that accept
    /// one.
    #[clap(short, long, value_parser)]
    pub sport: Option<String>,

    /// Overrides the row cap of the top-athlete views.
    #[clap(short, long, value_parser)]
    pub limit: Option<usize>,

    /// (file path, 'stdout' or empty) If specified, the summary of the view
    /// will be written in JSON format to the given location instead of the
    /// standard output.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference summary in JSON format. If provided, medalist
    /// will check that the computed summary matches the reference.
    #[clap(long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard
    /// output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
