mod model;
pub mod builder;
pub mod manual;

use log::{debug, info};

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

pub use crate::model::*;

// **** Private structures ****

// Full-row identity used for deduplication. Floating point fields take part
// through their bit pattern; a missing value is distinct from every number.
#[derive(Eq, PartialEq, Hash)]
struct RowKey {
    name: String,
    sex: Option<Sex>,
    age: Option<u64>,
    height: Option<u64>,
    weight: Option<u64>,
    team: String,
    noc: String,
    games: String,
    year: i32,
    season: String,
    city: String,
    sport: String,
    event: String,
    medal: Option<Medal>,
    region: Option<String>,
}

fn row_key(raw: &RawRecord, region: &Option<String>) -> RowKey {
    RowKey {
        name: raw.name.clone(),
        sex: raw.sex,
        age: raw.age.map(f64::to_bits),
        height: raw.height.map(f64::to_bits),
        weight: raw.weight.map(f64::to_bits),
        team: raw.team.clone(),
        noc: raw.noc.clone(),
        games: raw.games.clone(),
        year: raw.year,
        season: raw.season.clone(),
        city: raw.city.clone(),
        sport: raw.sport.clone(),
        event: raw.event.clone(),
        medal: raw.medal,
        region: region.clone(),
    }
}

/// Builds the canonical dataset from the raw results table and the region
/// lookup table.
///
/// Keeps the summer editions only, attaches a region name to every record
/// through its NOC code (codes without a lookup entry keep an empty region,
/// the record itself is kept), removes exact duplicate rows and derives the
/// per-record medal counters. Missing values pass through untouched.
pub fn normalize(records: Vec<RawRecord>, regions: &[RegionRow]) -> Dataset {
    info!(
        "normalize: {} raw records, {} region rows",
        records.len(),
        regions.len()
    );
    let region_by_noc: HashMap<&str, &str> = regions
        .iter()
        .filter_map(|r| r.region.as_deref().map(|name| (r.noc.as_str(), name)))
        .collect();

    let mut seen: HashSet<RowKey> = HashSet::new();
    let mut out: Vec<Record> = Vec::new();
    for raw in records {
        if raw.season != SUMMER {
            continue;
        }
        let region = region_by_noc
            .get(raw.noc.as_str())
            .map(|name| name.to_string());
        if !seen.insert(row_key(&raw, &region)) {
            continue;
        }
        let medals = MedalCount::of(&raw.medal);
        out.push(Record {
            name: raw.name,
            sex: raw.sex,
            age: raw.age,
            height: raw.height,
            weight: raw.weight,
            team: raw.team,
            noc: raw.noc,
            region,
            games: raw.games,
            year: raw.year,
            season: raw.season,
            city: raw.city,
            sport: raw.sport,
            event: raw.event,
            medal: raw.medal,
            medals,
        });
    }
    debug!("normalize: {} canonical records", out.len());
    Dataset { records: out }
}

/// The year and country drop-down domains: distinct years in descending
/// order and distinct region names in ascending order, each with the
/// [OVERALL] sentinel prepended.
pub fn list_years_and_countries(ds: &Dataset) -> (Vec<String>, Vec<String>) {
    let year_set: BTreeSet<i32> = ds.records.iter().map(|r| r.year).collect();
    let mut years = vec![OVERALL.to_string()];
    years.extend(year_set.into_iter().rev().map(|y| y.to_string()));

    let country_set: BTreeSet<&str> = ds.records.iter().filter_map(|r| r.region.as_deref()).collect();
    let mut countries = vec![OVERALL.to_string()];
    countries.extend(country_set.into_iter().map(|c| c.to_string()));
    (years, countries)
}

/// The sport drop-down domain, ascending, with [OVERALL] prepended.
pub fn list_sports(ds: &Dataset) -> Vec<String> {
    let sport_set: BTreeSet<&str> = ds.records.iter().map(|r| r.sport.as_str()).collect();
    let mut sports = vec![OVERALL.to_string()];
    sports.extend(sport_set.into_iter().map(|s| s.to_string()));
    sports
}

/// The medal tally for the given year and country filters.
///
/// With a country fixed and the years unfiltered, the tally is grouped by
/// year in ascending order. In every other case it is grouped by region and
/// ordered by gold, then silver, then bronze count descending; remaining
/// ties keep the ascending region order. Records without a region carry no
/// group to tally under and are skipped. Selector values that match nothing
/// produce an empty table.
pub fn medal_tally(ds: &Dataset, year: &Selector<i32>, country: &Selector<String>) -> MedalTally {
    info!("medal_tally: year: {:?} country: {:?}", year, country);
    let filtered = ds
        .records
        .iter()
        .filter(|r| year.admits(&r.year) && country.admits_region(&r.region));

    if matches!(year, Selector::AllOf) && matches!(country, Selector::OnlyOf(_)) {
        let mut by_year: BTreeMap<i32, MedalCount> = BTreeMap::new();
        for r in filtered {
            *by_year.entry(r.year).or_insert(MedalCount::EMPTY) += r.medals;
        }
        let rows = by_year
            .into_iter()
            .map(|(y, count)| TallyRow::new(y.to_string(), count))
            .collect();
        return MedalTally {
            grouping: TallyGrouping::ByYear,
            rows,
        };
    }

    let mut by_region: BTreeMap<String, MedalCount> = BTreeMap::new();
    for r in filtered {
        let region = match &r.region {
            Some(x) => x.clone(),
            None => continue,
        };
        *by_region.entry(region).or_insert(MedalCount::EMPTY) += r.medals;
    }
    let mut rows: Vec<TallyRow> = by_region
        .into_iter()
        .map(|(region, count)| TallyRow::new(region, count))
        .collect();
    // The sort is stable, so equal counts stay in region order.
    rows.sort_by(|a, b| (b.gold, b.silver, b.bronze).cmp(&(a.gold, a.silver, a.bronze)));
    MedalTally {
        grouping: TallyGrouping::ByRegion,
        rows,
    }
}

/// How many distinct values of the given dimension took part in each
/// edition. One point per edition, ascending. Records with no value on the
/// dimension (an unmapped region) do not contribute a value.
pub fn series_over_time(ds: &Dataset, dimension: Dimension, label: &str) -> TimeSeries {
    debug!("series_over_time: dimension: {:?}", dimension);
    let mut by_year: BTreeMap<i32, HashSet<&str>> = BTreeMap::new();
    for r in ds.records.iter() {
        let value = match dimension {
            Dimension::Region => match r.region.as_deref() {
                Some(x) => x,
                None => continue,
            },
            Dimension::Event => r.event.as_str(),
            Dimension::Athlete => r.name.as_str(),
        };
        by_year.entry(r.year).or_default().insert(value);
    }
    let points = by_year
        .into_iter()
        .map(|(year, values)| EditionPoint {
            year,
            count: values.len() as u64,
        })
        .collect();
    TimeSeries {
        label: label.to_string(),
        points,
    }
}

/// How many distinct events each sport held in each year.
pub fn sport_year_matrix(ds: &Dataset) -> SportYearMatrix {
    let triples: HashSet<(i32, &str, &str)> = ds
        .records
        .iter()
        .map(|r| (r.year, r.sport.as_str(), r.event.as_str()))
        .collect();
    let mut counts: HashMap<(String, i32), u64> = HashMap::new();
    for (year, sport, _event) in triples {
        *counts.entry((sport.to_string(), year)).or_insert(0) += 1;
    }
    assemble_matrix(&counts)
}

fn assemble_matrix(counts: &HashMap<(String, i32), u64>) -> SportYearMatrix {
    let sports: BTreeSet<&String> = counts.keys().map(|(s, _)| s).collect();
    let years: BTreeSet<i32> = counts.keys().map(|(_, y)| *y).collect();
    let cells: Vec<Vec<u64>> = sports
        .iter()
        .map(|sport| {
            years
                .iter()
                .map(|year| {
                    counts
                        .get(&((*sport).clone(), *year))
                        .copied()
                        .unwrap_or(0)
                })
                .collect()
        })
        .collect();
    SportYearMatrix {
        sports: sports.into_iter().cloned().collect(),
        years: years.into_iter().collect(),
        cells,
    }
}

// Counts the medal-bearing records per athlete name over an already
// filtered record sequence and keeps the most successful ones. The sort is
// stable on the first-encountered name order, so equal counts do not get
// reshuffled between calls.
fn rank_athletes<'a>(records: impl Iterator<Item = &'a Record>, limit: usize) -> Vec<AthleteRank> {
    let mut order: Vec<&'a str> = Vec::new();
    let mut counts: HashMap<&'a str, u64> = HashMap::new();
    let mut first_record: HashMap<&'a str, &'a Record> = HashMap::new();
    for r in records {
        let count = counts.entry(r.name.as_str()).or_insert(0);
        if *count == 0 {
            order.push(r.name.as_str());
            first_record.insert(r.name.as_str(), r);
        }
        *count += 1;
    }

    let mut ranked = order;
    ranked.sort_by(|a, b| counts[b].cmp(&counts[a]));
    ranked.truncate(limit);
    ranked
        .iter()
        .map(|name| {
            let r = first_record[name];
            AthleteRank {
                name: name.to_string(),
                medals: counts[name],
                sport: r.sport.clone(),
                region: r.region.clone(),
            }
        })
        .collect()
}

/// The most successful athletes, optionally restricted to one sport: at
/// most `limit` rows, medal counts descending.
pub fn top_athletes(ds: &Dataset, sport: &Selector<String>, limit: usize) -> Vec<AthleteRank> {
    info!("top_athletes: sport: {:?} limit: {}", sport, limit);
    rank_athletes(
        ds.records
            .iter()
            .filter(|r| r.medal.is_some() && sport.admits(&r.sport)),
        limit,
    )
}

/// The most successful athletes of one country.
pub fn top_athletes_countrywise(ds: &Dataset, country: &str, limit: usize) -> Vec<AthleteRank> {
    info!("top_athletes_countrywise: country: {:?} limit: {}", country, limit);
    rank_athletes(
        ds.records
            .iter()
            .filter(|r| r.medal.is_some() && r.region.as_deref() == Some(country)),
        limit,
    )
}

/// Medals won per edition, optionally restricted to one country, ascending
/// by year. Editions without a matching medal produce no row.
pub fn country_medal_series(ds: &Dataset, country: &Selector<String>) -> Vec<YearlyMedals> {
    let mut by_year: BTreeMap<i32, u64> = BTreeMap::new();
    for r in ds
        .records
        .iter()
        .filter(|r| r.medal.is_some() && country.admits_region(&r.region))
    {
        *by_year.entry(r.year).or_insert(0) += r.medals.total();
    }
    by_year
        .into_iter()
        .map(|(year, medals)| YearlyMedals { year, medals })
        .collect()
}

/// Medals of one country cross-tabulated by sport and year. The unfiltered
/// selector yields the zero-sized matrix: there is no meaningful global
/// version of this table, and an empty result must stay recognizable as
/// such.
pub fn country_sport_heatmap(ds: &Dataset, country: &Selector<String>) -> SportYearMatrix {
    let country = match country {
        Selector::AllOf => return SportYearMatrix::empty(),
        Selector::OnlyOf(c) => c,
    };
    let mut counts: HashMap<(String, i32), u64> = HashMap::new();
    for r in ds
        .records
        .iter()
        .filter(|r| r.medal.is_some() && r.region.as_deref() == Some(country.as_str()))
    {
        *counts.entry((r.sport.clone(), r.year)).or_insert(0) += 1;
    }
    assemble_matrix(&counts)
}

// One record per athlete, first encounter wins. The kept row also fixes the
// age and medal value the athlete contributes to the distributions.
fn dedup_athletes(ds: &Dataset) -> Vec<&Record> {
    let mut seen: HashSet<(&str, Option<&str>)> = HashSet::new();
    ds.records
        .iter()
        .filter(|r| seen.insert((r.name.as_str(), r.region.as_deref())))
        .collect()
}

fn ages_of(athletes: &[&Record], label: &str, keep: impl Fn(&Record) -> bool) -> AgeSeries {
    let ages = athletes
        .iter()
        .filter(|r| keep(r))
        .filter_map(|r| r.age)
        .map(|a| a as u32)
        .collect();
    AgeSeries {
        label: label.to_string(),
        ages,
    }
}

/// Age distributions over distinct athletes. Ages are whole years; athletes
/// without an age are left out of every series. Series with no data points
/// are emitted empty rather than dropped, so the caller always sees the
/// full group list.
pub fn age_distributions(ds: &Dataset, grouping: AgeGrouping) -> Vec<AgeSeries> {
    let athletes = dedup_athletes(ds);
    match grouping {
        AgeGrouping::ByMedal => {
            let mut series = vec![ages_of(&athletes, "Overall Age", |_| true)];
            for medal in [Medal::Gold, Medal::Silver, Medal::Bronze] {
                let label = format!("{} Medalist", medal.label());
                series.push(ages_of(&athletes, &label, |r| r.medal == Some(medal)));
            }
            series
        }
        AgeGrouping::GoldBySport => FAMOUS_SPORTS
            .iter()
            .map(|sport| {
                ages_of(&athletes, sport, |r| {
                    r.sport == *sport && r.medal == Some(Medal::Gold)
                })
            })
            .collect(),
    }
}

/// The height/weight scatter rows, optionally restricted to one sport. One
/// row per record, nothing aggregated.
pub fn weight_vs_height(ds: &Dataset, sport: &Selector<String>) -> Vec<BodyRow> {
    ds.records
        .iter()
        .filter(|r| sport.admits(&r.sport))
        .map(|r| BodyRow {
            name: r.name.clone(),
            height: r.height,
            weight: r.weight,
            medal: r.medal,
            sex: r.sex,
        })
        .collect()
}

/// Distinct athletes per edition and sex, ascending by year. A sex with no
/// athletes in an edition counts 0.
pub fn participation_by_sex(ds: &Dataset) -> Vec<SexSplit> {
    let mut seen: HashSet<(&str, Sex, i32)> = HashSet::new();
    let mut by_year: BTreeMap<i32, (u64, u64)> = BTreeMap::new();
    for r in ds.records.iter() {
        let sex = match r.sex {
            Some(s) => s,
            None => continue,
        };
        if !seen.insert((r.name.as_str(), sex, r.year)) {
            continue;
        }
        let entry = by_year.entry(r.year).or_insert((0, 0));
        match sex {
            Sex::Male => entry.0 += 1,
            Sex::Female => entry.1 += 1,
        }
    }
    by_year
        .into_iter()
        .map(|(year, (male, female))| SexSplit { year, male, female })
        .collect()
}

/// The headline distinct counts of the dataset.
pub fn overview_stats(ds: &Dataset) -> OverviewStats {
    let mut years: HashSet<i32> = HashSet::new();
    let mut cities: HashSet<&str> = HashSet::new();
    let mut sports: HashSet<&str> = HashSet::new();
    let mut events: HashSet<&str> = HashSet::new();
    let mut athletes: HashSet<&str> = HashSet::new();
    let mut nations: HashSet<&str> = HashSet::new();
    for r in ds.records.iter() {
        years.insert(r.year);
        cities.insert(r.city.as_str());
        sports.insert(r.sport.as_str());
        events.insert(r.event.as_str());
        athletes.insert(r.name.as_str());
        if let Some(region) = r.region.as_deref() {
            nations.insert(region);
        }
    }
    // The 1906 intercalated games do not count as an edition.
    let editions = years.iter().filter(|y| **y != 1906).count() as u64;
    OverviewStats {
        editions,
        hosts: cities.len() as u64,
        sports: sports.len() as u64,
        events: events.len() as u64,
        athletes: athletes.len() as u64,
        nations: nations.len() as u64,
    }
}

#[cfg(test)]
mod tests {
    use crate::builder::DatasetBuilder;
    use crate::*;
    use std::collections::HashSet;

    fn sample() -> Dataset {
        let _ = env_logger::builder().is_test(true).try_init();
        DatasetBuilder::new()
            .region("USA", "USA")
            .region("NGR", "Nigeria")
            .region("BRA", "Brazil")
            .region("NOR", "Norway")
            .region("LIB", "Lebanon")
            .row(
                RawRecord::new(
                    "A. Carlsen",
                    "USA",
                    2000,
                    "Judo",
                    "Judo Men's Heavyweight",
                    Some(Medal::Gold),
                )
                .with_sex(Sex::Male)
                .with_age(24.0)
                .with_body(180.0, 80.0)
                .with_city("Sydney"),
            )
            .row(
                RawRecord::new(
                    "B. Reyes",
                    "USA",
                    2000,
                    "Judo",
                    "Judo Women's Middleweight",
                    Some(Medal::Silver),
                )
                .with_sex(Sex::Female)
                .with_age(22.0)
                .with_body(170.0, 60.0)
                .with_city("Sydney"),
            )
            // Exact duplicate of the first row, must not survive.
            .row(
                RawRecord::new(
                    "A. Carlsen",
                    "USA",
                    2000,
                    "Judo",
                    "Judo Men's Heavyweight",
                    Some(Medal::Gold),
                )
                .with_sex(Sex::Male)
                .with_age(24.0)
                .with_body(180.0, 80.0)
                .with_city("Sydney"),
            )
            .row(
                RawRecord::new(
                    "C. Okoro",
                    "NGR",
                    2000,
                    "Athletics",
                    "Athletics Men's 100 metres",
                    None,
                )
                .with_sex(Sex::Male)
                .with_age(28.0)
                .with_body(175.0, 72.0)
                .with_city("Sydney"),
            )
            .row(
                RawRecord::new(
                    "A. Carlsen",
                    "USA",
                    2004,
                    "Judo",
                    "Judo Men's Heavyweight",
                    Some(Medal::Gold),
                )
                .with_sex(Sex::Male)
                .with_age(28.0)
                .with_body(180.0, 81.0)
                .with_city("Athens"),
            )
            .row(
                RawRecord::new(
                    "D. Silva",
                    "BRA",
                    2004,
                    "Football",
                    "Football Men's Football",
                    Some(Medal::Bronze),
                )
                .with_sex(Sex::Male)
                .with_age(30.0)
                .with_body(182.0, 85.0)
                .with_city("Athens"),
            )
            // NOC without a lookup entry: the region stays empty.
            .row(
                RawRecord::new(
                    "E. Petrova",
                    "UNK",
                    2000,
                    "Gymnastics",
                    "Gymnastics Women's Individual All-Around",
                    Some(Medal::Gold),
                )
                .with_sex(Sex::Female)
                .with_age(19.0)
                .with_body(168.0, 55.0)
                .with_city("Sydney"),
            )
            // Winter row, filtered out by normalization.
            .row(
                RawRecord::new(
                    "F. Winter",
                    "NOR",
                    1994,
                    "Ice Hockey",
                    "Ice Hockey Men's Ice Hockey",
                    Some(Medal::Gold),
                )
                .with_sex(Sex::Male)
                .with_age(25.0)
                .with_city("Lillehammer")
                .with_season("Winter"),
            )
            .row(
                RawRecord::new(
                    "B. Reyes",
                    "USA",
                    2004,
                    "Judo",
                    "Judo Women's Middleweight",
                    Some(Medal::Gold),
                )
                .with_sex(Sex::Female)
                .with_age(26.0)
                .with_body(170.0, 61.0)
                .with_city("Athens"),
            )
            .row(
                RawRecord::new(
                    "G. Haddad",
                    "LIB",
                    2000,
                    "Wrestling",
                    "Wrestling Men's Greco-Roman Heavyweight",
                    None,
                )
                .with_sex(Sex::Male)
                .with_city("Sydney"),
            )
            .row(
                RawRecord::new(
                    "D. Silva",
                    "BRA",
                    2008,
                    "Football",
                    "Football Men's Football",
                    None,
                )
                .with_sex(Sex::Male)
                .with_age(34.0)
                .with_body(182.0, 86.0)
                .with_city("Beijing"),
            )
            .build()
    }

    fn only(country: &str) -> Selector<String> {
        Selector::OnlyOf(country.to_string())
    }

    #[test]
    fn normalize_keeps_only_summer_rows() {
        let ds = sample();
        assert!(ds.records().iter().all(|r| r.season == SUMMER));
        assert!(!ds.records().iter().any(|r| r.name == "F. Winter"));
    }

    #[test]
    fn normalize_removes_exact_duplicates() {
        let ds = sample();
        assert_eq!(ds.len(), 9);
        let carlsen_2000 = ds
            .records()
            .iter()
            .filter(|r| r.name == "A. Carlsen" && r.year == 2000)
            .count();
        assert_eq!(carlsen_2000, 1);
    }

    #[test]
    fn normalize_left_joins_regions() {
        let ds = sample();
        let petrova = ds
            .records()
            .iter()
            .find(|r| r.name == "E. Petrova")
            .unwrap();
        assert_eq!(petrova.region, None);
        let carlsen = ds
            .records()
            .iter()
            .find(|r| r.name == "A. Carlsen")
            .unwrap();
        assert_eq!(carlsen.region.as_deref(), Some("USA"));
    }

    #[test]
    fn medal_counters_sum_to_at_most_one() {
        let ds = sample();
        for r in ds.records() {
            assert!(r.medals.total() <= 1, "bad counters on {:?}", r.name);
            match r.medal {
                Some(Medal::Gold) => assert_eq!(r.medals.gold, 1),
                Some(Medal::Silver) => assert_eq!(r.medals.silver, 1),
                Some(Medal::Bronze) => assert_eq!(r.medals.bronze, 1),
                None => assert_eq!(r.medals.total(), 0),
            }
        }
    }

    #[test]
    fn tally_overall_sorts_by_gold_then_silver_then_bronze() {
        let ds = sample();
        let tally = medal_tally(&ds, &Selector::AllOf, &Selector::AllOf);
        assert_eq!(tally.grouping, TallyGrouping::ByRegion);
        let expected = vec![
            TallyRow {
                group: "USA".to_string(),
                gold: 3,
                silver: 1,
                bronze: 0,
                total: 4,
            },
            TallyRow {
                group: "Brazil".to_string(),
                gold: 0,
                silver: 0,
                bronze: 1,
                total: 1,
            },
            // The tie between the medal-less regions keeps the region order.
            TallyRow {
                group: "Lebanon".to_string(),
                gold: 0,
                silver: 0,
                bronze: 0,
                total: 0,
            },
            TallyRow {
                group: "Nigeria".to_string(),
                gold: 0,
                silver: 0,
                bronze: 0,
                total: 0,
            },
        ];
        assert_eq!(tally.rows, expected);
    }

    #[test]
    fn tally_overall_matches_per_year_tallies() {
        let ds = sample();
        let overall = medal_tally(&ds, &Selector::AllOf, &Selector::AllOf);
        for row in overall.rows.iter() {
            let per_year = medal_tally(&ds, &Selector::AllOf, &only(&row.group));
            assert_eq!(per_year.grouping, TallyGrouping::ByYear);
            let gold: u64 = per_year.rows.iter().map(|r| r.gold).sum();
            let silver: u64 = per_year.rows.iter().map(|r| r.silver).sum();
            let bronze: u64 = per_year.rows.iter().map(|r| r.bronze).sum();
            assert_eq!((gold, silver, bronze), (row.gold, row.silver, row.bronze));
        }
    }

    #[test]
    fn tally_fixed_country_groups_by_year() {
        let ds = sample();
        let tally = medal_tally(&ds, &Selector::AllOf, &only("USA"));
        assert_eq!(tally.grouping, TallyGrouping::ByYear);
        assert_eq!(
            tally.rows,
            vec![
                TallyRow {
                    group: "2000".to_string(),
                    gold: 1,
                    silver: 1,
                    bronze: 0,
                    total: 2,
                },
                TallyRow {
                    group: "2004".to_string(),
                    gold: 2,
                    silver: 0,
                    bronze: 0,
                    total: 2,
                },
            ]
        );
    }

    #[test]
    fn tally_both_selectors_fixed_groups_by_region() {
        let ds = sample();
        let tally = medal_tally(&ds, &Selector::OnlyOf(2004), &only("USA"));
        assert_eq!(tally.grouping, TallyGrouping::ByRegion);
        assert_eq!(
            tally.rows,
            vec![TallyRow {
                group: "USA".to_string(),
                gold: 2,
                silver: 0,
                bronze: 0,
                total: 2,
            }]
        );
    }

    #[test]
    fn tally_unknown_selector_values_yield_empty_tables() {
        let ds = sample();
        assert!(medal_tally(&ds, &Selector::OnlyOf(1896), &Selector::AllOf)
            .rows
            .is_empty());
        assert!(medal_tally(&ds, &Selector::AllOf, &only("Atlantis"))
            .rows
            .is_empty());
    }

    #[test]
    fn tally_two_record_scenario() {
        let ds = DatasetBuilder::new()
            .region("USA", "USA")
            .row(RawRecord::new(
                "A",
                "USA",
                2000,
                "Judo",
                "Judo Men's Heavyweight",
                Some(Medal::Gold),
            ))
            .row(RawRecord::new(
                "B",
                "USA",
                2000,
                "Judo",
                "Judo Women's Middleweight",
                Some(Medal::Silver),
            ))
            .build();
        let tally = medal_tally(&ds, &Selector::AllOf, &Selector::AllOf);
        assert_eq!(
            tally.rows,
            vec![TallyRow {
                group: "USA".to_string(),
                gold: 1,
                silver: 1,
                bronze: 0,
                total: 2,
            }]
        );
    }

    #[test]
    fn series_counts_match_a_reference_group_by() {
        let ds = sample();
        for (dimension, label) in [
            (Dimension::Region, "No. of Countries"),
            (Dimension::Event, "No. of Events"),
            (Dimension::Athlete, "No. of Athletes"),
        ] {
            let series = series_over_time(&ds, dimension, label);
            assert_eq!(series.label, label);
            let years: Vec<i32> = series.points.iter().map(|p| p.year).collect();
            let mut sorted = years.clone();
            sorted.sort_unstable();
            assert_eq!(years, sorted);
            for point in series.points.iter() {
                let reference: HashSet<&str> = ds
                    .records()
                    .iter()
                    .filter(|r| r.year == point.year)
                    .filter_map(|r| match dimension {
                        Dimension::Region => r.region.as_deref(),
                        Dimension::Event => Some(r.event.as_str()),
                        Dimension::Athlete => Some(r.name.as_str()),
                    })
                    .collect();
                assert_eq!(point.count, reference.len() as u64);
            }
        }
    }

    #[test]
    fn series_excludes_missing_regions() {
        let ds = sample();
        let series = series_over_time(&ds, Dimension::Region, "No. of Countries");
        // 2000 has records from USA, Nigeria, Lebanon and one unmapped NOC.
        let p2000 = series.points.iter().find(|p| p.year == 2000).unwrap();
        assert_eq!(p2000.count, 3);
    }

    #[test]
    fn sport_year_matrix_counts_distinct_events() {
        let ds = sample();
        let matrix = sport_year_matrix(&ds);
        assert_eq!(
            matrix.sports,
            vec!["Athletics", "Football", "Gymnastics", "Judo", "Wrestling"]
        );
        assert_eq!(matrix.years, vec![2000, 2004, 2008]);
        assert_eq!(matrix.cell("Judo", 2000), Some(2));
        assert_eq!(matrix.cell("Judo", 2004), Some(2));
        assert_eq!(matrix.cell("Judo", 2008), Some(0));
        assert_eq!(matrix.cell("Football", 2008), Some(1));
        assert_eq!(matrix.cell("Athletics", 2004), Some(0));
        assert_eq!(
            matrix.cells,
            vec![
                vec![1, 0, 0],
                vec![0, 1, 1],
                vec![1, 0, 0],
                vec![2, 2, 0],
                vec![1, 0, 0],
            ]
        );
    }

    #[test]
    fn top_athletes_counts_and_order() {
        let ds = sample();
        let ranked = top_athletes(&ds, &Selector::AllOf, 15);
        assert!(ranked.len() <= 15);
        let names: Vec<&str> = ranked.iter().map(|a| a.name.as_str()).collect();
        // Ties keep the first-encountered order: Carlsen before Reyes,
        // Silva before Petrova.
        assert_eq!(
            names,
            vec!["A. Carlsen", "B. Reyes", "D. Silva", "E. Petrova"]
        );
        for athlete in ranked.iter() {
            let reference = ds
                .records()
                .iter()
                .filter(|r| r.medal.is_some() && r.name == athlete.name)
                .count() as u64;
            assert_eq!(athlete.medals, reference);
        }
        let petrova = ranked.iter().find(|a| a.name == "E. Petrova").unwrap();
        assert_eq!(petrova.region, None);
        assert_eq!(petrova.sport, "Gymnastics");
    }

    #[test]
    fn top_athletes_respects_the_limit() {
        let ds = sample();
        let ranked = top_athletes(&ds, &Selector::AllOf, 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].medals, 2);
        assert_eq!(ranked[1].medals, 2);
    }

    #[test]
    fn top_athletes_unknown_sport_is_empty() {
        let ds = sample();
        assert!(top_athletes(&ds, &only("Quidditch"), 15).is_empty());
    }

    #[test]
    fn top_athletes_countrywise_surfaces_the_sport() {
        let ds = sample();
        let ranked = top_athletes_countrywise(&ds, "USA", 10);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].name, "A. Carlsen");
        assert_eq!(ranked[0].sport, "Judo");
        assert_eq!(ranked[1].name, "B. Reyes");
        assert_eq!(ranked[1].medals, 2);
    }

    #[test]
    fn country_medal_series_is_ascending_and_filtered() {
        let ds = sample();
        let usa = country_medal_series(&ds, &only("USA"));
        assert_eq!(
            usa,
            vec![
                YearlyMedals {
                    year: 2000,
                    medals: 2,
                },
                YearlyMedals {
                    year: 2004,
                    medals: 2,
                },
            ]
        );
        let all = country_medal_series(&ds, &Selector::AllOf);
        // 2008 has no medal rows at all, so it gets no point.
        assert_eq!(
            all,
            vec![
                YearlyMedals {
                    year: 2000,
                    medals: 3,
                },
                YearlyMedals {
                    year: 2004,
                    medals: 3,
                },
            ]
        );
    }

    #[test]
    fn heatmap_overall_is_zero_sized() {
        let ds = sample();
        let matrix = country_sport_heatmap(&ds, &Selector::AllOf);
        assert!(matrix.is_empty());
        assert!(matrix.sports.is_empty());
        assert!(matrix.years.is_empty());
        assert!(matrix.cells.is_empty());
    }

    #[test]
    fn heatmap_counts_medals_per_sport_and_year() {
        let ds = sample();
        let matrix = country_sport_heatmap(&ds, &only("USA"));
        assert_eq!(matrix.sports, vec!["Judo"]);
        assert_eq!(matrix.years, vec![2000, 2004]);
        assert_eq!(matrix.cells, vec![vec![2, 2]]);
    }

    #[test]
    fn age_distributions_by_medal() {
        let ds = sample();
        let series = age_distributions(&ds, AgeGrouping::ByMedal);
        let labels: Vec<&str> = series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Overall Age",
                "Gold Medalist",
                "Silver Medalist",
                "Bronze Medalist"
            ]
        );
        // G. Haddad has no age recorded and is left out everywhere.
        assert_eq!(series[0].ages, vec![24, 22, 28, 30, 19]);
        assert_eq!(series[1].ages, vec![24, 19]);
        assert_eq!(series[2].ages, vec![22]);
        assert_eq!(series[3].ages, vec![30]);
    }

    #[test]
    fn age_distributions_by_sport_emit_every_group() {
        let ds = sample();
        let series = age_distributions(&ds, AgeGrouping::GoldBySport);
        assert_eq!(series.len(), FAMOUS_SPORTS.len());
        let judo = series.iter().find(|s| s.label == "Judo").unwrap();
        assert_eq!(judo.ages, vec![24]);
        let gym = series.iter().find(|s| s.label == "Gymnastics").unwrap();
        assert_eq!(gym.ages, vec![19]);
        let athletics = series.iter().find(|s| s.label == "Athletics").unwrap();
        assert!(athletics.ages.is_empty());
    }

    #[test]
    fn weight_vs_height_keeps_every_record() {
        let ds = sample();
        let judo = weight_vs_height(&ds, &only("Judo"));
        // B. Reyes took part in two editions and keeps both points.
        assert_eq!(judo.len(), 4);
        assert!(judo.iter().all(|p| p.height.is_some()));
        let all = weight_vs_height(&ds, &Selector::AllOf);
        assert_eq!(all.len(), ds.len());
    }

    #[test]
    fn participation_by_sex_counts_distinct_athletes() {
        let ds = sample();
        let split = participation_by_sex(&ds);
        assert_eq!(
            split,
            vec![
                SexSplit {
                    year: 2000,
                    male: 3,
                    female: 2,
                },
                SexSplit {
                    year: 2004,
                    male: 2,
                    female: 1,
                },
                SexSplit {
                    year: 2008,
                    male: 1,
                    female: 0,
                },
            ]
        );
    }

    #[test]
    fn selector_domains_are_ordered_with_overall_first() {
        let ds = sample();
        let (years, countries) = list_years_and_countries(&ds);
        assert_eq!(years, vec!["Overall", "2008", "2004", "2000"]);
        assert_eq!(
            countries,
            vec!["Overall", "Brazil", "Lebanon", "Nigeria", "USA"]
        );
        let sports = list_sports(&ds);
        assert_eq!(
            sports,
            vec![
                "Overall",
                "Athletics",
                "Football",
                "Gymnastics",
                "Judo",
                "Wrestling"
            ]
        );
    }

    #[test]
    fn overview_counts_distinct_values() {
        let ds = sample();
        let stats = overview_stats(&ds);
        assert_eq!(
            stats,
            OverviewStats {
                editions: 3,
                hosts: 3,
                sports: 5,
                events: 6,
                athletes: 6,
                nations: 4,
            }
        );
    }

    #[test]
    fn overview_discounts_the_1906_games() {
        let ds = DatasetBuilder::new()
            .region("GRE", "Greece")
            .row(RawRecord::new(
                "H. Louis",
                "GRE",
                1906,
                "Athletics",
                "Athletics Men's Marathon",
                None,
            ))
            .row(RawRecord::new(
                "I. Jensen",
                "GRE",
                2000,
                "Athletics",
                "Athletics Men's Marathon",
                None,
            ))
            .build();
        assert_eq!(overview_stats(&ds).editions, 1);
    }
}
