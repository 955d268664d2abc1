//! Column-wise operations over [`Table`]s.
//!
//! Every operation returns a new table; the input is left untouched.
//! Row mappings run in parallel with `rayon` and keep row order.

use std::collections::BTreeSet;

use callejero_matching::address::add_house_number;
use callejero_matching::extract::PatternExtractor;
use callejero_matching::spelling::SpellingCorrector;
use rayon::prelude::*;

use crate::{DatasetError, Table};

/// Extracts the earliest matching pattern from each cell of `base` and
/// stores the upper-cased label in `target`.
///
/// Missing cells and cells without a match produce missing values.
///
/// # Errors
///
/// Returns [`DatasetError::ColumnNotFound`] if `base` does not exist.
pub fn extract_and_store(
    table: &Table,
    extractor: &PatternExtractor,
    base: &str,
    target: &str,
) -> Result<Table, DatasetError> {
    let labels = map_column(table, base, |text| extractor.extract(text))?;
    let matched = labels.iter().filter(|l| l.is_some()).count();
    log::info!(
        "Matched {matched}/{} rows of {base} into {target}",
        labels.len()
    );

    let mut out = table.clone();
    out.set_column(target, labels)?;
    Ok(out)
}

/// Corrects the spelling of each cell of `base` and stores the result in
/// `target`. Missing cells stay missing.
///
/// # Errors
///
/// Returns [`DatasetError::ColumnNotFound`] if `base` does not exist.
pub fn correct_column(
    table: &Table,
    corrector: &SpellingCorrector,
    base: &str,
    target: &str,
) -> Result<Table, DatasetError> {
    let corrected = map_column(table, base, |text| Some(corrector.correct(text)))?;
    let mut out = table.clone();
    out.set_column(target, corrected)?;
    Ok(out)
}

/// Appends a house number to each cell of `base` that has none and
/// stores the result in `target`.
///
/// # Errors
///
/// Returns [`DatasetError::ColumnNotFound`] if `base` does not exist.
pub fn add_house_numbers(table: &Table, base: &str, target: &str) -> Result<Table, DatasetError> {
    let numbered = map_column(table, base, |text| Some(add_house_number(text)))?;
    let mut out = table.clone();
    out.set_column(target, numbered)?;
    Ok(out)
}

/// Distinct lowercase values of `column` (and `column2`, when given),
/// sorted by descending length and then alphabetically.
///
/// Typically used to build a pattern list from a reference table of
/// street names.
///
/// # Errors
///
/// Returns [`DatasetError::ColumnNotFound`] if either column does not
/// exist.
pub fn unique_names(
    table: &Table,
    column: &str,
    column2: Option<&str>,
) -> Result<Vec<String>, DatasetError> {
    let first = table.column(column)?;
    let second = column2.map(|c| table.column(c)).transpose()?;

    let names: BTreeSet<String> = first
        .iter()
        .chain(second.into_iter().flatten())
        .flatten()
        .map(|name| name.to_lowercase())
        .collect();

    let mut names: Vec<String> = names.into_iter().collect();
    names.sort_by(|a, b| {
        b.chars()
            .count()
            .cmp(&a.chars().count())
            .then_with(|| a.cmp(b))
    });
    Ok(names)
}

/// Fills missing cells of each target column with the value at the same
/// row of the paired filler column of `filler`.
///
/// `filler_columns` defaults to `target_columns`.
///
/// # Errors
///
/// Returns [`DatasetError::ColumnLengthMismatch`] if the two column lists
/// differ in length, [`DatasetError::ColumnNotFound`] if a column is
/// missing from its table, or [`DatasetError::RowCountMismatch`] if
/// `filler` has fewer rows than `table`.
pub fn fill_missing<S: AsRef<str>>(
    table: &Table,
    filler: &Table,
    target_columns: &[S],
    filler_columns: Option<&[S]>,
) -> Result<Table, DatasetError> {
    let filler_columns = filler_columns.unwrap_or(target_columns);
    if target_columns.len() != filler_columns.len() {
        return Err(DatasetError::ColumnLengthMismatch {
            targets: target_columns.len(),
            fillers: filler_columns.len(),
        });
    }

    let mut out = table.clone();
    for (target, source) in target_columns.iter().zip(filler_columns) {
        let (target, source) = (target.as_ref(), source.as_ref());
        let current = table.column(target)?;
        let replacement = filler.column(source)?;
        if replacement.len() < current.len() {
            return Err(DatasetError::RowCountMismatch {
                column: source.to_string(),
                expected: current.len(),
                actual: replacement.len(),
            });
        }

        let filled: Vec<Option<String>> = current
            .iter()
            .zip(replacement)
            .map(|(value, fill)| value.clone().or_else(|| fill.clone()))
            .collect();
        let count = current.iter().zip(&filled).filter(|(a, b)| a != b).count();
        log::debug!("Filled {count} missing cells of {target} from {source}");

        out.set_column(target, filled)?;
    }

    Ok(out)
}

fn map_column<F>(table: &Table, base: &str, f: F) -> Result<Vec<Option<String>>, DatasetError>
where
    F: Fn(&str) -> Option<String> + Sync,
{
    Ok(table
        .column(base)?
        .par_iter()
        .map(|cell| cell.as_deref().and_then(&f))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::cells;
    use callejero_matching::MisspellingDictionary;
    use callejero_matching::extract::ExtractOptions;

    fn names_table() -> Table {
        Table::new()
            .with_column(
                "col1",
                vec![
                    Some("Alice".to_string()),
                    Some("Bob".to_string()),
                    Some("alice".to_string()),
                    Some("Charlie".to_string()),
                    None,
                    Some("Arroyomolinos".to_string()),
                    Some("Molinos".to_string()),
                ],
            )
            .unwrap()
            .with_column(
                "col2",
                cells(&[
                    "David",
                    "Eve",
                    "Frank",
                    "Bob",
                    "David",
                    "Los Molinos",
                    "Conde de Orgaz",
                ]),
            )
            .unwrap()
    }

    #[test]
    fn unique_names_from_two_columns() {
        assert_eq!(
            unique_names(&names_table(), "col1", Some("col2")).unwrap(),
            [
                "conde de orgaz",
                "arroyomolinos",
                "los molinos",
                "charlie",
                "molinos",
                "alice",
                "david",
                "frank",
                "bob",
                "eve",
            ]
        );
    }

    #[test]
    fn unique_names_from_one_column() {
        assert_eq!(
            unique_names(&names_table(), "col1", None).unwrap(),
            ["arroyomolinos", "charlie", "molinos", "alice", "bob"]
        );
    }

    #[test]
    fn unique_names_of_numbers_sort_alphabetically() {
        let table = Table::new()
            .with_column("col1", cells(&["1", "2", "3", "2", "1"]))
            .unwrap()
            .with_column("col2", cells(&["4", "5", "6", "5", "4"]))
            .unwrap();
        assert_eq!(
            unique_names(&table, "col1", Some("col2")).unwrap(),
            ["1", "2", "3", "4", "5", "6"]
        );
    }

    #[test]
    fn unique_names_rejects_unknown_columns() {
        assert!(matches!(
            unique_names(&names_table(), "nonexistent_col", None),
            Err(DatasetError::ColumnNotFound(_))
        ));
        assert!(matches!(
            unique_names(&names_table(), "col1", Some("nonexistent_col")),
            Err(DatasetError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn extracts_into_target_column() {
        let extractor = PatternExtractor::from_phrases(
            ["la corte de faraon", "pico de peña golosa"],
            &ExtractOptions::default(),
        )
        .unwrap();
        let table = Table::new()
            .with_column(
                "ADDRESS",
                vec![
                    Some("La Corte de Faraon".to_string()),
                    Some("Valleguerra".to_string()),
                    None,
                ],
            )
            .unwrap();

        let out = extract_and_store(&table, &extractor, "ADDRESS", "ADDRESS2").unwrap();
        assert_eq!(
            out.column("ADDRESS2").unwrap(),
            [Some("LA CORTE DE FARAON".to_string()), None, None]
        );
        assert_eq!(out.column("ADDRESS").unwrap(), table.column("ADDRESS").unwrap());
        assert!(!table.has_column("ADDRESS2"));
    }

    #[test]
    fn extracts_from_empty_table() {
        let extractor =
            PatternExtractor::from_phrases(["wad-ras"], &ExtractOptions::default()).unwrap();
        let table = Table::new().with_column("ADDRESS", Vec::new()).unwrap();
        let out = extract_and_store(&table, &extractor, "ADDRESS", "ADDRESS2").unwrap();
        assert!(out.column("ADDRESS2").unwrap().is_empty());
    }

    #[test]
    fn extract_rejects_unknown_base_column() {
        let extractor =
            PatternExtractor::from_phrases(["wad-ras"], &ExtractOptions::default()).unwrap();
        assert!(matches!(
            extract_and_store(&Table::new(), &extractor, "ADDRESS", "ADDRESS2"),
            Err(DatasetError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn extraction_keeps_row_order_on_large_tables() {
        let extractor =
            PatternExtractor::from_phrases(["wad-ras", "lopez grass"], &ExtractOptions::default())
                .unwrap();
        let inputs: Vec<Option<String>> = (0..2_000)
            .map(|i| match i % 3 {
                0 => Some(format!("wad ras {i}")),
                1 => Some(format!("lopez grass {i}")),
                _ => None,
            })
            .collect();
        let table = Table::new().with_column("ADDRESS", inputs).unwrap();
        let out = extract_and_store(&table, &extractor, "ADDRESS", "STREET").unwrap();

        for (i, label) in out.column("STREET").unwrap().iter().enumerate() {
            let expected = match i % 3 {
                0 => Some("WAD-RAS"),
                1 => Some("LOPEZ GRASS"),
                _ => None,
            };
            assert_eq!(label.as_deref(), expected, "row {i}");
        }
    }

    #[test]
    fn corrects_column() {
        let corrector = SpellingCorrector::new(
            &MisspellingDictionary::new().with_entry("alacala", "alcala"),
        );
        let table = Table::new()
            .with_column(
                "STREET",
                vec![Some("Alacala".to_string()), None, Some("Gran Vía".to_string())],
            )
            .unwrap();
        let out = correct_column(&table, &corrector, "STREET", "STREET").unwrap();
        assert_eq!(
            out.column("STREET").unwrap(),
            [Some("alcala".to_string()), None, Some("gran via".to_string())]
        );
    }

    #[test]
    fn adds_house_numbers() {
        let table = Table::new()
            .with_column("ADDRESS", vec![Some("calle mayor, madrid".to_string()), None])
            .unwrap();
        let out = add_house_numbers(&table, "ADDRESS", "ADDRESS_NUM").unwrap();
        assert_eq!(
            out.column("ADDRESS_NUM").unwrap(),
            [Some("calle mayor 1, madrid".to_string()), None]
        );
    }

    #[test]
    fn fills_missing_cells_from_filler() {
        let table = Table::new()
            .with_column("a", vec![Some("x".to_string()), None, None])
            .unwrap();
        let filler = Table::new()
            .with_column("b", vec![Some("y".to_string()), Some("z".to_string()), None])
            .unwrap();

        let out = fill_missing(&table, &filler, &["a"], Some(&["b"][..])).unwrap();
        assert_eq!(
            out.column("a").unwrap(),
            [Some("x".to_string()), Some("z".to_string()), None]
        );
    }

    #[test]
    fn fill_defaults_to_same_column_names() {
        let table = Table::new().with_column("a", vec![None]).unwrap();
        let filler = Table::new().with_column("a", cells(&["y"])).unwrap();
        let out = fill_missing(&table, &filler, &["a"], None).unwrap();
        assert_eq!(out.column("a").unwrap(), [Some("y".to_string())]);
    }

    #[test]
    fn fill_rejects_mismatched_column_lists() {
        let table = Table::new().with_column("a", vec![None]).unwrap();
        assert!(matches!(
            fill_missing(&table, &table, &["a", "a"], Some(&["a"][..])),
            Err(DatasetError::ColumnLengthMismatch {
                targets: 2,
                fillers: 1
            })
        ));
    }

    #[test]
    fn fill_rejects_unknown_columns() {
        let table = Table::new().with_column("a", vec![None]).unwrap();
        assert!(matches!(
            fill_missing(&table, &table, &["a"], Some(&["b"][..])),
            Err(DatasetError::ColumnNotFound(name)) if name == "b"
        ));
    }

    #[test]
    fn fill_rejects_short_filler() {
        let table = Table::new().with_column("a", vec![None, None]).unwrap();
        let filler = Table::new().with_column("a", cells(&["y"])).unwrap();
        assert!(matches!(
            fill_missing(&table, &filler, &["a"], None),
            Err(DatasetError::RowCountMismatch { .. })
        ));
    }
}
