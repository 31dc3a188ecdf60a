use countrydex::listing::{ListProcessor, NameCollator};
use countrydex::{process, Country, FilterState, SortOrder};

fn catalog() -> Vec<Country> {
    vec![
        Country::new("PER", "Peru").with_region("Americas").with_population(33).with_area(1_285_216.0),
        Country::new("ALA", "Åland Islands").with_region("Europe").with_population(29).with_area(1580.0),
        Country::new("JPN", "Japan").with_region("Asia").with_population(125).with_area(377_930.0),
        Country::new("CHN", "China").with_region("Asia").with_population(1412).with_area(9_597_000.0),
        Country::new("AUT", "Austria").with_region("Europe").with_population(9).with_area(83_871.0),
        Country::new("TCD", "Chad").with_region("Africa").with_population(17).with_area(1_284_000.0),
        Country::new("NPL", "Nepal").with_region("Asia").with_population(29).with_area(147_181.0),
    ]
}

fn names(rows: &[Vec<&Country>]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|c| c.common_name.clone()).collect())
        .collect()
}

fn flatten<'a>(rows: &[Vec<&'a Country>]) -> Vec<&'a Country> {
    rows.iter().flatten().copied().collect()
}

#[test]
fn default_state_is_alphabetical_chunked() {
    let countries = catalog();
    let collator = NameCollator::new_or_fallback("en");

    let mut expected: Vec<&Country> = countries.iter().collect();
    expected.sort_by(|a, b| collator.compare(&a.common_name, &b.common_name));

    for columns in 1..=4 {
        let rows = process(&countries, &FilterState::default(), columns);
        assert_eq!(flatten(&rows), expected, "columns = {columns}");
    }
}

#[test]
fn accented_names_sort_with_their_base_letter() {
    let countries = catalog();
    let rows = process(&countries, &FilterState::default(), 10);
    let names = names(&rows);
    assert_eq!(names[0][..2], ["Åland Islands", "Austria"]);
}

#[test]
fn output_is_a_subset_without_duplicates() {
    let countries = catalog();
    let state = FilterState::default().with_search("a").with_sort(SortOrder::Area);
    let rows = process(&countries, &state, 3);
    let flat = flatten(&rows);

    for country in &flat {
        assert!(countries.iter().any(|c| std::ptr::eq(c, *country)));
    }
    let mut codes: Vec<&str> = flat.iter().map(|c| c.code.as_str()).collect();
    let before = codes.len();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), before);
}

#[test]
fn repeated_calls_are_identical() {
    let countries = catalog();
    let state = FilterState::default()
        .with_search("n")
        .with_sort(SortOrder::Population);
    let processor = ListProcessor::default();
    assert_eq!(
        processor.process(&countries, &state, 2),
        processor.process(&countries, &state, 2)
    );
}

#[test]
fn population_ties_keep_input_order() {
    let countries = catalog();
    let state = FilterState::default().with_sort(SortOrder::Population);
    let flat: Vec<String> = flatten(&process(&countries, &state, 1))
        .iter()
        .map(|c| c.common_name.clone())
        .collect();

    let aland = flat.iter().position(|n| n == "Åland Islands");
    let nepal = flat.iter().position(|n| n == "Nepal");
    assert!(aland < nepal);
}

#[test]
fn rows_are_full_except_the_last() {
    let countries = catalog();
    for columns in 1..=8 {
        let rows = process(&countries, &FilterState::default(), columns);
        let (last, full) = rows.split_last().expect("non-empty catalog");
        assert!(full.iter().all(|row| row.len() == columns));
        assert!((1..=columns).contains(&last.len()));
    }
}

#[test]
fn ch_by_population_in_two_columns() {
    let countries = vec![
        Country::new("TCD", "Chad").with_population(17).with_area(1284.0),
        Country::new("CHL", "Chile").with_population(19).with_area(756.0),
        Country::new("CHN", "China").with_population(1412).with_area(9597.0),
    ];
    let state = FilterState::default()
        .with_search("ch")
        .with_sort(SortOrder::Population);
    let rows = process(&countries, &state, 2);
    assert_eq!(names(&rows), vec![vec!["China", "Chile"], vec!["Chad"]]);
}

#[test]
fn unmatched_search_yields_no_rows() {
    let countries = catalog();
    let state = FilterState::default().with_search("zz");
    assert!(process(&countries, &state, 3).is_empty());
    assert!(process(&[], &FilterState::default(), 3).is_empty());
}

#[test]
fn region_filter_preserves_sort() {
    let countries = catalog();
    let state = FilterState::default()
        .with_region("Asia")
        .with_sort(SortOrder::Population);
    let rows = process(&countries, &state, 5);
    assert_eq!(names(&rows), vec![vec!["China", "Japan", "Nepal"]]);
    assert!(flatten(&rows).iter().all(|c| c.region == "Asia"));
}

#[test]
fn canonically_equal_names_keep_input_order() {
    let composed = Country::new("CUW", "Cura\u{e7}ao");
    let decomposed = Country::new("CUX", "Curac\u{327}ao");

    for countries in [
        vec![composed.clone(), decomposed.clone()],
        vec![decomposed.clone(), composed.clone()],
    ] {
        let expected: Vec<&str> = countries.iter().map(|c| c.code.as_str()).collect();
        let rows = process(&countries, &FilterState::default(), 2);
        let flat = flatten(&rows);
        let codes: Vec<&str> = flat.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, expected);
    }
}

#[test]
fn area_ties_keep_input_order() {
    let countries = vec![
        Country::new("AAA", "Zeta").with_area(500.0),
        Country::new("BBB", "Alpha").with_area(900.0),
        Country::new("CCC", "Mu").with_area(500.0),
        Country::new("DDD", "Beta").with_area(500.0),
    ];
    let state = FilterState::default().with_sort(SortOrder::Area);
    let rows = process(&countries, &state, 4);
    assert_eq!(names(&rows), vec![vec!["Alpha", "Zeta", "Mu", "Beta"]]);
}
