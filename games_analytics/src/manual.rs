/*!

This is the long-form manual for `games_analytics` and `medalist`.

## The canonical dataset

Everything starts from two tables:

* the results table, one row per athlete entry in an event, with the columns
  `Name`, `Sex`, `Age`, `Height`, `Weight`, `Team`, `NOC`, `Games`, `Year`,
  `Season`, `City`, `Sport`, `Event` and `Medal`. Extra columns are ignored.
  `NA` or blank cells are missing values and stay missing.
* the region lookup table, with the columns `NOC`, `region` and optionally
  `notes`, one row per NOC code.

[crate::normalize] turns them into the canonical dataset: summer editions
only, the region name joined onto every record (a code without a lookup
entry keeps an empty region), exact duplicate rows removed, and the three
medal counters derived. The dataset is built once and is read-only
afterwards; every query below is a pure function of the dataset and its
selectors.

## Selectors

A query dimension is filtered with a [crate::Selector]: either `AllOf` (no
filter) or `OnlyOf(value)`. A value that does not occur in the dataset is
not an error; the query returns an empty table. The `"Overall"` entry that
front ends display in their drop-downs comes from the selector-domain
queries and maps to `AllOf`.

## Views

| View | Function | Selectors |
|------|----------|-----------|
| `selectors` | [crate::list_years_and_countries], [crate::list_sports] | |
| `medal-tally` | [crate::medal_tally] | year, country |
| `overview` | [crate::overview_stats] | |
| `nations-over-time` | [crate::series_over_time] | |
| `events-over-time` | [crate::series_over_time] | |
| `athletes-over-time` | [crate::series_over_time] | |
| `sport-year-matrix` | [crate::sport_year_matrix] | |
| `top-athletes` | [crate::top_athletes] | sport, limit |
| `country-series` | [crate::country_medal_series] | country |
| `country-heatmap` | [crate::country_sport_heatmap] | country |
| `country-top-athletes` | [crate::top_athletes_countrywise] | country, limit |
| `age-distribution` | [crate::age_distributions] | |
| `age-by-sport` | [crate::age_distributions] | |
| `height-weight` | [crate::weight_vs_height] | sport |
| `sex-participation` | [crate::participation_by_sex] | |

Notes on the trickier ones:

* `medal-tally` groups by region and orders by gold, silver and bronze
  count descending. Fixing the country (and only then) switches the
  grouping to years, ascending.
* the `-over-time` views count *distinct* values per edition, not rows.
* `country-heatmap` with an unfiltered country returns the zero-sized
  matrix: a global heatmap is not meaningful and an empty result must not
  look like an all-zero one.
* `top-athletes` shows one sport/region pairing per athlete. For athletes
  that competed under several, it is the first one encountered in the
  queried subset; the source data does not define a canonical choice.
* the age views work on distinct athletes (first appearance wins) and drop
  records without an age.

## Error handling

The query functions do not fail: unknown selector values, empty datasets
and empty groups all degrade to empty tables or series. The only fatal
condition is a required column missing from an input table, which the
loaders report before any view can run.

*/
