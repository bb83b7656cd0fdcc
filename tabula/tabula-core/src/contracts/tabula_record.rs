use indexmap::IndexMap;

/// One row of extracted data: column name to cell value, in source column order.
pub type Record = IndexMap<String, String>;

/// Rows in the order the model produced them.
pub type Dataset = Vec<Record>;
