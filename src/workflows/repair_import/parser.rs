use serde::{Deserialize, Deserializer};
use std::io::Read;

/// One data row as it appears in the export, before any typing.
#[derive(Debug)]
pub(crate) struct RawRepairRow {
    pub(crate) row: usize,
    pub(crate) category: String,
    pub(crate) article_number: Option<String>,
    pub(crate) quantity: String,
    pub(crate) unit_price: String,
    pub(crate) discount: Option<String>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<RawRepairRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for (index, record) in csv_reader.deserialize::<RepairRow>().enumerate() {
        let row = record?;
        rows.push(RawRepairRow {
            row: index + 1,
            category: normalize_label(&row.category),
            article_number: row.article_number,
            quantity: row.quantity,
            unit_price: row.unit_price,
            discount: row.discount,
        });
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct RepairRow {
    #[serde(rename = "Category")]
    category: String,
    #[serde(
        rename = "Article Number",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    article_number: Option<String>,
    #[serde(rename = "Quantity")]
    quantity: String,
    #[serde(rename = "Unit Price")]
    unit_price: String,
    #[serde(rename = "Discount", default, deserialize_with = "empty_string_as_none")]
    discount: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Spreadsheet exports leave byte-order marks and zero-width spaces in cells.
pub(crate) fn normalize_label(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn normalize_label_strips_marks_and_collapses_whitespace() {
        assert_eq!(
            normalize_label("\u{feff}Arbeid   monteringspris\u{200b} "),
            "Arbeid monteringspris"
        );
    }

    #[test]
    fn blank_optional_columns_read_as_none() {
        let rows = parse_rows(Cursor::new(
            "Category,Article Number,Quantity,Unit Price,Discount\nGlass, ,1,280,\n",
        ))
        .expect("parse");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].row, 1);
        assert!(rows[0].article_number.is_none());
        assert!(rows[0].discount.is_none());
        assert_eq!(rows[0].unit_price, "280");
    }

    #[test]
    fn discount_column_may_be_absent() {
        let rows = parse_rows(Cursor::new(
            "Category,Article Number,Quantity,Unit Price\nRutelim,ADH-001,1,25\n",
        ))
        .expect("parse");

        assert_eq!(rows[0].article_number.as_deref(), Some("ADH-001"));
        assert!(rows[0].discount.is_none());
    }
}
