// ********* Input data structures ***********

use std::ops::{Add, AddAssign};

/// The season marker of the editions retained by normalization.
pub const SUMMER: &str = "Summer";

/// The sentinel presented to users for an unfiltered dimension.
///
/// It only exists at the presentation boundary: the selector domains prepend
/// it to their value lists and front ends translate it back to
/// [Selector::AllOf]. The query functions themselves never compare against
/// this string.
pub const OVERALL: &str = "Overall";

/// The outcome of one entry in the results table.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    /// Reads a medal cell. Anything that is not one of the three medal names
    /// (`NA`, blanks, surprises) counts as no medal.
    pub fn parse(s: &str) -> Option<Medal> {
        match s {
            "Gold" => Some(Medal::Gold),
            "Silver" => Some(Medal::Silver),
            "Bronze" => Some(Medal::Bronze),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Medal::Gold => "Gold",
            Medal::Silver => "Silver",
            Medal::Bronze => "Bronze",
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn parse(s: &str) -> Option<Sex> {
        match s {
            "M" => Some(Sex::Male),
            "F" => Some(Sex::Female),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }
}

/// One row of the raw results table, before normalization.
///
/// Missing cells are `None`; they are carried through, never rejected.
#[derive(PartialEq, Debug, Clone)]
pub struct RawRecord {
    pub name: String,
    pub sex: Option<Sex>,
    pub age: Option<f64>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub team: String,
    pub noc: String,
    pub games: String,
    pub year: i32,
    pub season: String,
    pub city: String,
    pub sport: String,
    pub event: String,
    pub medal: Option<Medal>,
}

impl RawRecord {
    /// A minimal summer-games row. The remaining fields start out blank and
    /// can be filled in with the `with_` methods.
    pub fn new(
        name: &str,
        noc: &str,
        year: i32,
        sport: &str,
        event: &str,
        medal: Option<Medal>,
    ) -> RawRecord {
        RawRecord {
            name: name.to_string(),
            sex: None,
            age: None,
            height: None,
            weight: None,
            team: noc.to_string(),
            noc: noc.to_string(),
            games: format!("{} Summer", year),
            year,
            season: SUMMER.to_string(),
            city: String::new(),
            sport: sport.to_string(),
            event: event.to_string(),
            medal,
        }
    }

    pub fn with_sex(mut self, sex: Sex) -> RawRecord {
        self.sex = Some(sex);
        self
    }

    pub fn with_age(mut self, age: f64) -> RawRecord {
        self.age = Some(age);
        self
    }

    pub fn with_body(mut self, height: f64, weight: f64) -> RawRecord {
        self.height = Some(height);
        self.weight = Some(weight);
        self
    }

    pub fn with_city(mut self, city: &str) -> RawRecord {
        self.city = city.to_string();
        self
    }

    pub fn with_season(mut self, season: &str) -> RawRecord {
        self.season = season.to_string();
        self.games = format!("{} {}", self.year, season);
        self
    }
}

/// One row of the region lookup table.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RegionRow {
    pub noc: String,
    pub region: Option<String>,
    pub notes: Option<String>,
}

// ********* Canonical data structures ***********

/// The per-record medal counters derived during normalization.
///
/// For a single record the three fields are the indicator columns: exactly
/// one of them is 1 when the record carries a medal, all are 0 otherwise.
/// Summing the counters over a group of records yields that group's tally.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Default)]
pub struct MedalCount {
    pub gold: u64,
    pub silver: u64,
    pub bronze: u64,
}

impl MedalCount {
    pub const EMPTY: MedalCount = MedalCount {
        gold: 0,
        silver: 0,
        bronze: 0,
    };

    pub fn of(medal: &Option<Medal>) -> MedalCount {
        match medal {
            Some(Medal::Gold) => MedalCount {
                gold: 1,
                ..MedalCount::EMPTY
            },
            Some(Medal::Silver) => MedalCount {
                silver: 1,
                ..MedalCount::EMPTY
            },
            Some(Medal::Bronze) => MedalCount {
                bronze: 1,
                ..MedalCount::EMPTY
            },
            None => MedalCount::EMPTY,
        }
    }

    pub fn total(&self) -> u64 {
        self.gold + self.silver + self.bronze
    }
}

impl std::iter::Sum for MedalCount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(MedalCount::EMPTY, |acc, c| acc + c)
    }
}

impl AddAssign for MedalCount {
    fn add_assign(&mut self, rhs: MedalCount) {
        self.gold += rhs.gold;
        self.silver += rhs.silver;
        self.bronze += rhs.bronze;
    }
}

impl Add for MedalCount {
    type Output = MedalCount;
    fn add(self: MedalCount, rhs: MedalCount) -> MedalCount {
        MedalCount {
            gold: self.gold + rhs.gold,
            silver: self.silver + rhs.silver,
            bronze: self.bronze + rhs.bronze,
        }
    }
}

/// One row of the canonical dataset: a raw record with the region name
/// joined on and the medal counters derived.
#[derive(PartialEq, Debug, Clone)]
pub struct Record {
    pub name: String,
    pub sex: Option<Sex>,
    pub age: Option<f64>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub team: String,
    pub noc: String,
    /// Region name for the NOC code, or `None` when the code has no entry
    /// in the lookup table.
    pub region: Option<String>,
    pub games: String,
    pub year: i32,
    pub season: String,
    pub city: String,
    pub sport: String,
    pub event: String,
    pub medal: Option<Medal>,
    pub medals: MedalCount,
}

/// The canonical record set.
///
/// Built once by [crate::normalize] and read-only afterwards: the rows are
/// not reachable mutably, so sharing a dataset across query calls is safe by
/// construction.
#[derive(PartialEq, Debug, Clone)]
pub struct Dataset {
    pub(crate) records: Vec<Record>,
}

impl Dataset {
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A filter on one dimension of the dataset.
///
/// This replaces the usual "magic value means no filter" convention with an
/// explicit tag. Values that do not occur in the dataset are not an error:
/// they simply admit nothing and the query returns an empty result.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Selector<T> {
    AllOf,
    OnlyOf(T),
}

impl<T: PartialEq> Selector<T> {
    /// Whether the given value passes this filter.
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Selector::AllOf => true,
            Selector::OnlyOf(x) => x == value,
        }
    }
}

impl Selector<String> {
    /// Region matching. A record without a region is admitted by the
    /// unfiltered selector only.
    pub fn admits_region(&self, region: &Option<String>) -> bool {
        match self {
            Selector::AllOf => true,
            Selector::OnlyOf(x) => region.as_deref() == Some(x.as_str()),
        }
    }
}

// ******** Output data structures *********

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum TallyGrouping {
    ByRegion,
    ByYear,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TallyRow {
    pub group: String,
    pub gold: u64,
    pub silver: u64,
    pub bronze: u64,
    pub total: u64,
}

impl TallyRow {
    pub fn new(group: String, count: MedalCount) -> TallyRow {
        TallyRow {
            group,
            gold: count.gold,
            silver: count.silver,
            bronze: count.bronze,
            total: count.total(),
        }
    }
}

/// A medal tally table. The grouping axis depends on the selectors that
/// produced it, so it is carried along with the rows.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct MedalTally {
    pub grouping: TallyGrouping,
    pub rows: Vec<TallyRow>,
}

/// The dimensions whose per-edition distinct count can be charted.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Dimension {
    Region,
    Event,
    Athlete,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct EditionPoint {
    pub year: i32,
    pub count: u64,
}

/// One count per edition, in ascending year order.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TimeSeries {
    pub label: String,
    pub points: Vec<EditionPoint>,
}

/// A sport × year cross-tabulation. Rows are sports in ascending order,
/// columns are years in ascending order, and `cells` is row-major.
///
/// A query with nothing to tabulate yields the zero-sized matrix, which is
/// structurally distinct from a matrix of zero-valued cells.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SportYearMatrix {
    pub sports: Vec<String>,
    pub years: Vec<i32>,
    pub cells: Vec<Vec<u64>>,
}

impl SportYearMatrix {
    pub fn empty() -> SportYearMatrix {
        SportYearMatrix {
            sports: Vec::new(),
            years: Vec::new(),
            cells: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sports.is_empty() || self.years.is_empty()
    }

    pub fn cell(&self, sport: &str, year: i32) -> Option<u64> {
        let row = self.sports.iter().position(|s| s == sport)?;
        let col = self.years.iter().position(|y| *y == year)?;
        Some(self.cells[row][col])
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct AthleteRank {
    pub name: String,
    pub medals: u64,
    /// The sport and region shown next to the athlete. When an athlete
    /// appears under several sports or regions, this is the pairing of the
    /// first medal-bearing record encountered in the queried subset; no
    /// canonical choice is made.
    pub sport: String,
    pub region: Option<String>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct YearlyMedals {
    pub year: i32,
    pub medals: u64,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum AgeGrouping {
    /// Overall plus one series per medal category.
    ByMedal,
    /// Gold medalists of each sport in [FAMOUS_SPORTS].
    GoldBySport,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct AgeSeries {
    pub label: String,
    pub ages: Vec<u32>,
}

/// One scatter point per record; no aggregation.
#[derive(PartialEq, Debug, Clone)]
pub struct BodyRow {
    pub name: String,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub medal: Option<Medal>,
    pub sex: Option<Sex>,
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SexSplit {
    pub year: i32,
    pub male: u64,
    pub female: u64,
}

/// Distinct counts over the whole dataset.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct OverviewStats {
    pub editions: u64,
    pub hosts: u64,
    pub sports: u64,
    pub events: u64,
    pub athletes: u64,
    pub nations: u64,
}

/// The sports enumerated by the gold-medalist age view, in display order.
pub const FAMOUS_SPORTS: [&str; 42] = [
    "Basketball",
    "Judo",
    "Football",
    "Tug-Of-War",
    "Athletics",
    "Swimming",
    "Sailing",
    "Badminton",
    "Gymnastics",
    "Art Competitions",
    "Handball",
    "Weightlifting",
    "Wrestling",
    "Water Polo",
    "Hockey",
    "Rowing",
    "Fencing",
    "Shooting",
    "Boxing",
    "Taekwondo",
    "Cycling",
    "Diving",
    "Canoeing",
    "Tennis",
    "Golf",
    "Softball",
    "Archery",
    "Volleyball",
    "Synchronized Swimming",
    "Table Tennis",
    "Baseball",
    "Rhythmic Gymnastics",
    "Rugby Sevens",
    "Beach Volleyball",
    "Triathlon",
    "Rugby",
    "Ice Hockey",
    "Polo",
    "Figure Skating",
    "Trampolining",
    "Modern Pentathlon",
    "Motorboating",
];
