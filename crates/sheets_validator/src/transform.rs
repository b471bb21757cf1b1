//! Output record construction.

use sheets_core::{Record, Row, RuleSet};

/// Builds the output record of an accepted row.
///
/// Only declared columns with a present value produce an entry, keyed by the
/// rule's `field`. Columns without a transform keep their raw value; extra
/// columns in the row are dropped.
pub fn transform_row(row: &Row, rules: &RuleSet) -> Record {
    let mut record = Record::new();

    for (column, rule) in rules.iter() {
        let Some(value) = row.get(column).filter(|v| !v.is_missing()) else {
            continue;
        };

        let output = match &rule.transform {
            Some(transform) => transform.apply(value),
            None => value.clone(),
        };
        record.insert(rule.field.clone(), output);
    }

    record
}
